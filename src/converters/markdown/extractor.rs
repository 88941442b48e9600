//! Folds the token stream into [`SlideDefinition`]s.
//!
//! The [`Extractor`] is a single-pass state machine. It owns the slide being built,
//! the text block currently receiving text, the stack of open style runs and the
//! list and table under construction. Each token is handled by one rule which
//! drives the builder through its named transitions.

use std::mem;

use log::{debug, warn};

use crate::converters::markdown::html::{self, InlineHtml, MONOSPACE_FONT};
use crate::converters::markdown::tokenizer::{tokenize, Token};
use crate::definition::{
    BodyBlock, ImageDefinition, ListKind, ListMarker, SlideDefinition, StyleRun, TableModel,
    TextBlock,
};
use crate::errors::{Result, SlidesError};
use crate::models::link::Link;
use crate::models::properties::TextStyle;

/// Line break inside a paragraph. Used for hard breaks and code block lines.
const LINE_BREAK: char = '\u{000b}';

/// Which rule set applies to the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// Full document rules: headings, slide breaks, columns, tables, notes.
    Document,
    /// Speaker-notes fragments: every block flows into a single text block.
    Notes,
}

/// Compiles a Markdown document into slide definitions, in document order.
pub fn extract_slides(markdown: &str) -> Result<Vec<SlideDefinition>> {
    let mut extractor = Extractor::new(ParseMode::Document);
    extractor.fold(tokenize(markdown))?;
    Ok(extractor.finish())
}

/// Renders a Markdown fragment (the body of an HTML comment) as plain notes text.
fn extract_notes(markdown: &str) -> Result<String> {
    let mut extractor = Extractor::new(ParseMode::Notes);
    extractor.fold(tokenize(markdown))?;
    Ok(extractor.finish_notes())
}

#[derive(Debug)]
struct StyleSeed {
    start: usize,
    style: TextStyle,
    /// Element name for seeds opened by inline HTML.
    html_tag: Option<String>,
}

#[derive(Debug, Clone, Copy)]
struct ListState {
    kind: ListKind,
    depth: usize,
    start: usize,
}

/// A text block set aside together with the styles that were open on it.
#[derive(Debug, Default)]
struct Parked {
    text: TextBlock,
    styles: Vec<StyleSeed>,
}

#[derive(Debug, Default)]
struct TableBuilder {
    rows: Vec<Vec<TextBlock>>,
    row: Vec<TextBlock>,
}

struct Extractor {
    mode: ParseMode,
    slides: Vec<SlideDefinition>,
    slide: SlideDefinition,
    text: TextBlock,
    /// Body text set aside while a heading or table owns `text`.
    parked: Vec<Parked>,
    styles: Vec<StyleSeed>,
    list: Option<ListState>,
    table: Option<TableBuilder>,
    background_paragraph: bool,
    seen_tokens: usize,
}

impl Extractor {
    fn new(mode: ParseMode) -> Self {
        Extractor {
            mode,
            slides: Vec::new(),
            slide: SlideDefinition::default(),
            text: TextBlock::default(),
            parked: Vec::new(),
            styles: Vec::new(),
            list: None,
            table: None,
            background_paragraph: false,
            seen_tokens: 0,
        }
    }

    fn fold(&mut self, tokens: Vec<Token>) -> Result<()> {
        for token in tokens {
            self.apply(token)?;
            self.seen_tokens += 1;
        }
        Ok(())
    }

    fn apply(&mut self, token: Token) -> Result<()> {
        match token {
            Token::HeadingOpen { level, attrs } => {
                if self.is_slide_heading(level) {
                    self.open_text_block();
                    self.text.big = attrs.has_class("big");
                } else {
                    self.break_paragraph();
                }
                if let Some(layout) = attrs.get("layout") {
                    self.set_custom_layout(layout);
                }
                self.push_style(heading_style(level, self.mode), None);
            }
            Token::HeadingClose { level } => {
                self.pop_style(None);
                if self.is_slide_heading(level) {
                    let heading = self.close_text_block();
                    let slot = if level == 1 {
                        &mut self.slide.title
                    } else {
                        &mut self.slide.subtitle
                    };
                    if slot.is_some() {
                        warn!("Replacing earlier h{} on the same slide", level);
                    }
                    *slot = Some(heading);
                } else {
                    self.break_paragraph();
                }
            }
            Token::ParagraphOpen { attrs } => {
                if self.mode == ParseMode::Document {
                    if attrs.has_class("column") {
                        self.close_column();
                    }
                    if attrs.has_class("big") {
                        self.text.big = true;
                    }
                    if let Some(layout) = attrs.get("layout") {
                        self.set_custom_layout(layout);
                    }
                    self.background_paragraph = attrs.has_class("background");
                }
            }
            Token::ParagraphClose => {
                self.break_paragraph();
                self.background_paragraph = false;
            }
            Token::Text(text) => self.append_text(&text),
            Token::Emoji { glyph, .. } => self.append_text(&glyph),
            Token::EmphasisOpen => self.push_style(
                TextStyle {
                    italic: Some(true),
                    ..Default::default()
                },
                None,
            ),
            Token::StrongOpen => self.push_style(
                TextStyle {
                    bold: Some(true),
                    ..Default::default()
                },
                None,
            ),
            Token::StrikethroughOpen => self.push_style(
                TextStyle {
                    strikethrough: Some(true),
                    ..Default::default()
                },
                None,
            ),
            Token::LinkOpen { href } => self.push_style(
                TextStyle {
                    link: Some(Link::url(href)),
                    ..Default::default()
                },
                None,
            ),
            Token::EmphasisClose
            | Token::StrongClose
            | Token::StrikethroughClose
            | Token::LinkClose => self.pop_style(None),
            Token::Image { src, alt } => match self.mode {
                ParseMode::Document => self.slide.images.push(ImageDefinition {
                    url: src,
                    alt,
                    background: self.background_paragraph,
                }),
                ParseMode::Notes => self.append_text(&alt),
            },
            Token::ListOpen { kind } => self.open_list(kind)?,
            Token::ListClose { .. } => self.close_list(),
            Token::ListItemOpen => self.open_list_item(),
            Token::ListItemClose => {
                if !self.text.ends_with_newline() {
                    self.append_text("\n");
                }
            }
            Token::TableOpen => self.open_table(),
            Token::TableRowOpen => {
                if let Some(table) = &mut self.table {
                    table.row.clear();
                }
            }
            Token::TableCellOpen => self.open_cell(),
            Token::TableCellClose => self.close_cell(),
            Token::TableRowClose => self.close_row(),
            Token::TableClose => self.close_table()?,
            Token::FencedCode { info, content } => {
                debug!("[extract] Code block (info: '{}')", info);
                self.break_paragraph();
                let code = content
                    .trim_end_matches('\n')
                    .replace("\r\n", "\n")
                    .replace('\n', &LINE_BREAK.to_string());
                self.append_styled(&code, monospace());
                self.break_paragraph();
            }
            Token::InlineCode(code) => self.append_styled(&code, monospace()),
            Token::HtmlBlock(raw) => match html::comment_bodies(&raw)? {
                Some(bodies) => {
                    for body in bodies {
                        self.add_notes(&body)?;
                    }
                }
                None => warn!("Ignoring HTML block: {}", raw.trim()),
            },
            Token::HtmlInline(raw) => match html::parse_inline(&raw)? {
                InlineHtml::Open { tag, style } => self.push_style(style, Some(tag)),
                InlineHtml::Close { tag } => self.pop_style(Some(&tag)),
                InlineHtml::Comment(body) => self.add_notes(&body)?,
            },
            Token::HorizontalRule => match self.mode {
                ParseMode::Document if self.seen_tokens == 0 => {
                    debug!("[extract] Skipping leading horizontal rule");
                }
                ParseMode::Document => {
                    self.close_slide();
                    self.open_slide();
                }
                ParseMode::Notes => self.break_paragraph(),
            },
            Token::SoftBreak => self.append_text(" "),
            Token::HardBreak => self.append_text(&LINE_BREAK.to_string()),
        }
        Ok(())
    }

    fn is_slide_heading(&self, level: u8) -> bool {
        self.mode == ParseMode::Document && level <= 2 && self.table.is_none()
    }

    // --- slides ---

    fn open_slide(&mut self) {
        self.slide = SlideDefinition::default();
        self.text = TextBlock::default();
        self.parked.clear();
        self.styles.clear();
        self.list = None;
        self.table = None;
    }

    fn close_slide(&mut self) {
        self.flush_styles();
        let body = mem::take(&mut self.text).finish();
        if !body.is_blank() {
            self.slide.bodies.push(BodyBlock { text: body });
        }
        let slide = mem::take(&mut self.slide);
        debug!(
            "[extract] Slide {} closed: title={:?}, {} bodies, {} tables",
            self.slides.len() + 1,
            slide.title.as_ref().map(|t| t.raw_text.as_str()),
            slide.bodies.len(),
            slide.tables.len()
        );
        self.slides.push(slide);
    }

    fn set_custom_layout(&mut self, layout: &str) {
        if self.mode == ParseMode::Document {
            self.slide.custom_layout = Some(layout.to_string());
        }
    }

    fn add_notes(&mut self, body: &str) -> Result<()> {
        if self.mode == ParseMode::Notes {
            debug!("[extract] Ignoring comment nested in notes");
            return Ok(());
        }
        let notes = extract_notes(body)?;
        let notes = notes.trim();
        if !notes.is_empty() {
            self.slide.append_notes(notes);
        }
        Ok(())
    }

    // --- text blocks ---

    fn open_text_block(&mut self) {
        self.parked.push(Parked {
            text: mem::take(&mut self.text),
            styles: mem::take(&mut self.styles),
        });
    }

    fn close_text_block(&mut self) -> TextBlock {
        self.flush_styles();
        self.unpark().finish()
    }

    /// Restores the parked block and its styles, returning the block it replaces.
    fn unpark(&mut self) -> TextBlock {
        let parked = self.parked.pop().unwrap_or_default();
        self.styles = parked.styles;
        mem::replace(&mut self.text, parked.text)
    }

    /// A `{.column}` paragraph ends the current body and starts the next one.
    fn close_column(&mut self) {
        self.flush_styles();
        let body = mem::take(&mut self.text).finish();
        self.slide.bodies.push(BodyBlock { text: body });
    }

    fn append_text(&mut self, text: &str) {
        self.text.raw_text.push_str(text);
    }

    fn append_styled(&mut self, text: &str, style: TextStyle) {
        self.push_style(style, None);
        self.append_text(text);
        self.pop_style(None);
    }

    /// Ends the current paragraph unless the text is empty or already ended.
    fn break_paragraph(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with_newline() {
            self.append_text("\n");
        }
    }

    fn push_style(&mut self, style: TextStyle, html_tag: Option<String>) {
        self.styles.push(StyleSeed {
            start: self.text.len(),
            style,
            html_tag,
        });
    }

    /// Closes the innermost open style of the same origin: the matching HTML
    /// element for inline HTML, the innermost Markdown style otherwise.
    fn pop_style(&mut self, html_tag: Option<&str>) {
        let position = self
            .styles
            .iter()
            .rposition(|seed| seed.html_tag.as_deref() == html_tag);
        let Some(position) = position else {
            warn!("Closing style with none open (tag: {:?})", html_tag);
            return;
        };
        let seed = self.styles.remove(position);
        self.emit_run(seed);
    }

    /// Ends every style still open on the current block at its end. Only unbalanced
    /// inline HTML leaves styles open here.
    fn flush_styles(&mut self) {
        while let Some(seed) = self.styles.pop() {
            warn!("Unclosed inline HTML element {:?}", seed.html_tag);
            self.emit_run(seed);
        }
    }

    fn emit_run(&mut self, seed: StyleSeed) {
        let end = self.text.len();
        if end > seed.start && !seed.style.is_empty() {
            self.text.runs.push(StyleRun {
                start: seed.start,
                end,
                style: seed.style,
            });
        }
    }

    // --- lists ---

    fn open_list(&mut self, kind: ListKind) -> Result<()> {
        match &mut self.list {
            None => {
                self.break_paragraph();
                self.list = Some(ListState {
                    kind,
                    depth: 0,
                    start: self.text.len(),
                });
            }
            Some(list) if list.kind == kind => list.depth += 1,
            Some(_) => {
                return Err(SlidesError::Structural(
                    "Nested lists of mixed ordered/unordered types are not supported.".to_string(),
                ))
            }
        }
        Ok(())
    }

    fn close_list(&mut self) {
        match &mut self.list {
            Some(list) if list.depth > 0 => list.depth -= 1,
            Some(list) => {
                let marker = ListMarker {
                    start: list.start,
                    end: self.text.len(),
                    kind: list.kind,
                };
                self.text.list_markers.push(marker);
                self.list = None;
            }
            None => warn!("List close without an open list"),
        }
    }

    fn open_list_item(&mut self) {
        self.break_paragraph();
        let depth = self.list.map_or(0, |list| list.depth);
        self.append_text(&"\t".repeat(depth));
    }

    // --- tables ---

    fn open_table(&mut self) {
        match self.mode {
            ParseMode::Document => {
                self.open_text_block();
                self.table = Some(TableBuilder::default());
            }
            ParseMode::Notes => self.break_paragraph(),
        }
    }

    fn open_cell(&mut self) {
        match self.mode {
            ParseMode::Document => self.text = TextBlock::default(),
            ParseMode::Notes => {
                if !self.text.is_empty() && !self.text.ends_with_newline() {
                    self.append_text("\t");
                }
            }
        }
    }

    fn close_cell(&mut self) {
        if self.table.is_some() {
            self.flush_styles();
        }
        if let Some(table) = &mut self.table {
            let cell = mem::take(&mut self.text).finish();
            table.row.push(cell);
        }
    }

    fn close_row(&mut self) {
        match &mut self.table {
            Some(table) => {
                let row = mem::take(&mut table.row);
                table.rows.push(row);
            }
            None => self.break_paragraph(),
        }
    }

    fn close_table(&mut self) -> Result<()> {
        let Some(table) = self.table.take() else {
            return Ok(());
        };
        self.flush_styles();
        self.unpark();
        if !self.slide.tables.is_empty() {
            return Err(SlidesError::Structural(
                "Multiple tables per slide are not supported.".to_string(),
            ));
        }
        self.slide.tables.push(TableModel::from_cells(table.rows));
        Ok(())
    }

    // --- results ---

    fn finish(mut self) -> Vec<SlideDefinition> {
        self.close_slide();
        self.slides
    }

    fn finish_notes(self) -> String {
        self.text.finish().raw_text
    }
}

fn heading_style(level: u8, mode: ParseMode) -> TextStyle {
    let body_heading = mode == ParseMode::Notes || level > 2;
    TextStyle {
        bold: body_heading.then_some(true),
        ..Default::default()
    }
}

fn monospace() -> TextStyle {
    TextStyle {
        font_family: Some(MONOSPACE_FONT.to_string()),
        ..Default::default()
    }
}
