//! Lexes the Markdown dialect into a flat stream of [`Token`]s.
//!
//! `pulldown-cmark` does the CommonMark heavy lifting; this layer flattens its
//! events into slide-oriented tokens, merges adjacent text, lifts trailing
//! `{...}` attribute suffixes onto the paragraph that carries them and expands
//! emoji shortcodes.

use std::ops::Range;

use log::debug;
use pulldown_cmark::{CodeBlockKind, CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use crate::converters::markdown::attributes::Attributes;
use crate::converters::markdown::emoji::{self, Segment};
use crate::definition::ListKind;

/// A single lexical unit of the Markdown dialect.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    HeadingOpen { level: u8, attrs: Attributes },
    HeadingClose { level: u8 },
    ParagraphOpen { attrs: Attributes },
    ParagraphClose,
    Text(String),
    EmphasisOpen,
    EmphasisClose,
    StrongOpen,
    StrongClose,
    StrikethroughOpen,
    StrikethroughClose,
    LinkOpen { href: String },
    LinkClose,
    Image { src: String, alt: String },
    ListOpen { kind: ListKind },
    ListClose { kind: ListKind },
    ListItemOpen,
    ListItemClose,
    TableOpen,
    TableClose,
    TableRowOpen,
    TableRowClose,
    TableCellOpen,
    TableCellClose,
    FencedCode { info: String, content: String },
    InlineCode(String),
    HtmlBlock(String),
    HtmlInline(String),
    HorizontalRule,
    SoftBreak,
    HardBreak,
    Emoji { shortcode: String, glyph: String },
}

fn parser_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options
}

/// Tokenizes `markdown`. Never fails: unknown constructs are dropped and malformed
/// attribute suffixes stay in the text.
///
/// A `---` line directly under a paragraph is a slide break, not a setext heading
/// underline: the paragraph stays a paragraph and a rule follows it.
pub fn tokenize(markdown: &str) -> Vec<Token> {
    let mut lexer = Lexer::default();
    for (event, range) in Parser::new_ext(markdown, parser_options()).into_offset_iter() {
        lexer.push(event, markdown, range);
    }
    lexer.finish()
}

/// True when the source of a heading ends in a `---` setext underline.
fn has_rule_underline(source: &str) -> bool {
    source
        .trim_end()
        .lines()
        .last()
        .map(str::trim)
        .is_some_and(|line| line.len() >= 3 && line.chars().all(|c| c == '-'))
}

#[derive(Default)]
struct Lexer {
    tokens: Vec<Token>,
    /// Indices of the `ParagraphOpen` tokens still open.
    paragraphs: Vec<usize>,
    code_block: Option<(String, String)>,
    html_block: Option<String>,
    image: Option<(String, String)>,
    /// Set while inside a setext heading that is lexed as paragraph + rule.
    rule_heading: bool,
}

impl Lexer {
    fn push(&mut self, event: Event<'_>, source: &str, range: Range<usize>) {
        match event {
            Event::Start(Tag::Heading {
                level: HeadingLevel::H2,
                id,
                classes,
                attrs,
            }) if has_rule_underline(source.get(range.clone()).unwrap_or_default()) => {
                self.rule_heading = true;
                self.paragraphs.push(self.tokens.len());
                self.tokens.push(Token::ParagraphOpen {
                    attrs: heading_attributes(id, classes, attrs),
                });
            }
            Event::End(TagEnd::Heading(_)) if self.rule_heading => {
                self.rule_heading = false;
                self.lift_trailing_attributes();
                self.tokens.push(Token::ParagraphClose);
                self.tokens.push(Token::HorizontalRule);
            }
            Event::Start(tag) => self.open(tag),
            Event::End(tag) => self.close(tag),
            Event::Text(text) => {
                if let Some((_, content)) = &mut self.code_block {
                    content.push_str(&text);
                } else if let Some((_, alt)) = &mut self.image {
                    alt.push_str(&text);
                } else {
                    self.push_text(&text);
                }
            }
            Event::Code(code) => self.tokens.push(Token::InlineCode(code.to_string())),
            Event::Html(html) => match &mut self.html_block {
                Some(block) => block.push_str(&html),
                None => self.tokens.push(Token::HtmlBlock(html.to_string())),
            },
            Event::InlineHtml(html) => self.tokens.push(Token::HtmlInline(html.to_string())),
            Event::SoftBreak => self.tokens.push(Token::SoftBreak),
            Event::HardBreak => self.tokens.push(Token::HardBreak),
            Event::Rule => self.tokens.push(Token::HorizontalRule),
            other => debug!("[tokenize] Ignoring unsupported event {:?}", other),
        }
    }

    fn open(&mut self, tag: Tag<'_>) {
        let token = match tag {
            Tag::Paragraph => {
                self.paragraphs.push(self.tokens.len());
                Token::ParagraphOpen {
                    attrs: Attributes::default(),
                }
            }
            Tag::Heading {
                level,
                id,
                classes,
                attrs,
            } => Token::HeadingOpen {
                level: level as u8,
                attrs: heading_attributes(id, classes, attrs),
            },
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.to_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code_block = Some((info, String::new()));
                return;
            }
            Tag::HtmlBlock => {
                self.html_block = Some(String::new());
                return;
            }
            Tag::List(first) => Token::ListOpen {
                kind: list_kind(first.is_some()),
            },
            Tag::Item => Token::ListItemOpen,
            Tag::Table(_) => Token::TableOpen,
            Tag::TableHead | Tag::TableRow => Token::TableRowOpen,
            Tag::TableCell => Token::TableCellOpen,
            Tag::Emphasis => Token::EmphasisOpen,
            Tag::Strong => Token::StrongOpen,
            Tag::Strikethrough => Token::StrikethroughOpen,
            Tag::Link { dest_url, .. } => Token::LinkOpen {
                href: dest_url.to_string(),
            },
            Tag::Image { dest_url, .. } => {
                self.image = Some((dest_url.to_string(), String::new()));
                return;
            }
            other => {
                debug!("[tokenize] Ignoring container {:?}", other);
                return;
            }
        };
        self.tokens.push(token);
    }

    fn close(&mut self, tag: TagEnd) {
        let token = match tag {
            TagEnd::Paragraph => {
                self.lift_trailing_attributes();
                Token::ParagraphClose
            }
            TagEnd::Heading(level) => Token::HeadingClose { level: level as u8 },
            TagEnd::CodeBlock => match self.code_block.take() {
                Some((info, content)) => Token::FencedCode { info, content },
                None => return,
            },
            TagEnd::HtmlBlock => match self.html_block.take() {
                Some(html) => Token::HtmlBlock(html),
                None => return,
            },
            TagEnd::List(ordered) => Token::ListClose {
                kind: list_kind(ordered),
            },
            TagEnd::Item => Token::ListItemClose,
            TagEnd::Table => Token::TableClose,
            TagEnd::TableHead | TagEnd::TableRow => Token::TableRowClose,
            TagEnd::TableCell => Token::TableCellClose,
            TagEnd::Emphasis => Token::EmphasisClose,
            TagEnd::Strong => Token::StrongClose,
            TagEnd::Strikethrough => Token::StrikethroughClose,
            TagEnd::Link => Token::LinkClose,
            TagEnd::Image => match self.image.take() {
                Some((src, alt)) => Token::Image { src, alt },
                None => return,
            },
            _ => return,
        };
        self.tokens.push(token);
    }

    fn push_text(&mut self, text: &str) {
        if let Some(Token::Text(previous)) = self.tokens.last_mut() {
            previous.push_str(text);
        } else {
            self.tokens.push(Token::Text(text.to_string()));
        }
    }

    /// Moves a `{...}` suffix at the end of the closing paragraph onto its open token.
    fn lift_trailing_attributes(&mut self) {
        let Some(open_index) = self.paragraphs.pop() else {
            return;
        };
        let Some(Token::Text(text)) = self.tokens.last() else {
            return;
        };
        let Some((rest, attrs)) = Attributes::split_trailing(text) else {
            return;
        };

        if rest.is_empty() {
            self.tokens.pop();
            while matches!(
                self.tokens.last(),
                Some(Token::SoftBreak | Token::HardBreak)
            ) {
                self.tokens.pop();
            }
        } else {
            let rest = rest.to_string();
            if let Some(Token::Text(text)) = self.tokens.last_mut() {
                *text = rest;
            }
        }

        if let Some(Token::ParagraphOpen { attrs: slot }) = self.tokens.get_mut(open_index) {
            *slot = attrs;
        }
    }

    fn finish(self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(self.tokens.len());
        for token in self.tokens {
            match token {
                Token::Text(text) => {
                    for segment in emoji::split(&text) {
                        tokens.push(match segment {
                            Segment::Text(text) => Token::Text(text.to_string()),
                            Segment::Emoji { shortcode, glyph } => Token::Emoji {
                                shortcode: shortcode.to_string(),
                                glyph: glyph.to_string(),
                            },
                        });
                    }
                }
                other => tokens.push(other),
            }
        }
        tokens
    }
}

fn heading_attributes(
    id: Option<CowStr<'_>>,
    classes: Vec<CowStr<'_>>,
    attrs: Vec<(CowStr<'_>, Option<CowStr<'_>>)>,
) -> Attributes {
    let mut attributes = Attributes {
        id: id.map(|id| id.to_string()),
        classes: classes.iter().map(|c| c.to_string()).collect(),
        ..Default::default()
    };
    for (key, value) in attrs {
        attributes.pairs.insert(
            key.to_string(),
            value.map(|v| v.to_string()).unwrap_or_default(),
        );
    }
    attributes
}

fn list_kind(ordered: bool) -> ListKind {
    if ordered {
        ListKind::Ordered
    } else {
        ListKind::Unordered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Token {
        Token::Text(s.to_string())
    }

    #[test]
    fn heading_with_attributes() {
        let tokens = tokenize("# Big idea {.big}");
        let Token::HeadingOpen { level, attrs } = &tokens[0] else {
            panic!("expected heading, got {:?}", tokens[0]);
        };
        assert_eq!(*level, 1);
        assert!(attrs.has_class("big"));
        assert_eq!(tokens[1], text("Big idea"));
        assert_eq!(tokens[2], Token::HeadingClose { level: 1 });
    }

    #[test]
    fn paragraph_suffix_moves_to_open_token() {
        let tokens = tokenize("{.column}");
        assert_eq!(tokens.len(), 2);
        let Token::ParagraphOpen { attrs } = &tokens[0] else {
            panic!("expected paragraph, got {:?}", tokens[0]);
        };
        assert!(attrs.has_class("column"));
        assert_eq!(tokens[1], Token::ParagraphClose);

        let tokens = tokenize("Some text\n{layout=MAIN_POINT}");
        let Token::ParagraphOpen { attrs } = &tokens[0] else {
            panic!("expected paragraph, got {:?}", tokens[0]);
        };
        assert_eq!(attrs.get("layout"), Some("MAIN_POINT"));
        assert_eq!(&tokens[1..], &[text("Some text"), Token::ParagraphClose]);
    }

    #[test]
    fn inline_styles_and_code() {
        let tokens = tokenize("Use **bold** and `code`");
        assert_eq!(
            tokens,
            vec![
                Token::ParagraphOpen {
                    attrs: Attributes::default()
                },
                text("Use "),
                Token::StrongOpen,
                text("bold"),
                Token::StrongClose,
                text(" and "),
                Token::InlineCode("code".to_string()),
                Token::ParagraphClose,
            ]
        );
    }

    #[test]
    fn lists_and_rules() {
        let tokens = tokenize("---\n\n1. one\n2. two\n");
        assert_eq!(tokens[0], Token::HorizontalRule);
        assert_eq!(
            tokens[1],
            Token::ListOpen {
                kind: ListKind::Ordered
            }
        );
        assert_eq!(
            tokens.last(),
            Some(&Token::ListClose {
                kind: ListKind::Ordered
            })
        );
    }

    #[test]
    fn fenced_code_keeps_info_and_content() {
        let tokens = tokenize("```rust\nfn main() {}\n```\n");
        assert_eq!(
            tokens,
            vec![Token::FencedCode {
                info: "rust".to_string(),
                content: "fn main() {}\n".to_string(),
            }]
        );
    }

    #[test]
    fn comment_block_is_one_token() {
        let tokens = tokenize("<!--\nSpeaker **notes**\n-->\n");
        assert_eq!(tokens.len(), 1);
        let Token::HtmlBlock(html) = &tokens[0] else {
            panic!("expected html block, got {:?}", tokens[0]);
        };
        assert!(html.starts_with("<!--"));
        assert!(html.trim_end().ends_with("-->"));
    }

    #[test]
    fn dashes_under_a_paragraph_break_the_slide() {
        let tokens = tokenize("body\n---\n# Next");
        assert_eq!(
            &tokens[..4],
            &[
                Token::ParagraphOpen {
                    attrs: Attributes::default()
                },
                text("body"),
                Token::ParagraphClose,
                Token::HorizontalRule,
            ]
        );
        assert!(matches!(tokens[4], Token::HeadingOpen { level: 1, .. }));

        let tokens = tokenize("Sub\n--");
        assert!(matches!(tokens[0], Token::HeadingOpen { level: 2, .. }));
        let tokens = tokenize("Title\n===");
        assert!(matches!(tokens[0], Token::HeadingOpen { level: 1, .. }));
    }

    #[test]
    fn table_head_becomes_a_row() {
        let tokens = tokenize("| a | b |\n|---|---|\n| 1 | 2 |\n");
        let rows = tokens
            .iter()
            .filter(|t| **t == Token::TableRowOpen)
            .count();
        let cells = tokens
            .iter()
            .filter(|t| **t == Token::TableCellOpen)
            .count();
        assert_eq!(rows, 2);
        assert_eq!(cells, 4);
    }

    #[test]
    fn emoji_and_images() {
        let tokens = tokenize("![logo](https://example.com/a.png) :tada:");
        assert!(tokens.contains(&Token::Image {
            src: "https://example.com/a.png".to_string(),
            alt: "logo".to_string(),
        }));
        assert!(tokens.contains(&Token::Emoji {
            shortcode: "tada".to_string(),
            glyph: "🎉".to_string(),
        }));
    }
}
