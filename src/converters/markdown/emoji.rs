//! `:shortcode:` emoji support.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

static SHORTCODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([a-z0-9_+-]+):").expect("valid shortcode regex"));

static GLYPHS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("smile", "😄"),
        ("smiley", "😃"),
        ("grin", "😁"),
        ("laughing", "😆"),
        ("joy", "😂"),
        ("wink", "😉"),
        ("blush", "😊"),
        ("heart_eyes", "😍"),
        ("sunglasses", "😎"),
        ("thinking", "🤔"),
        ("neutral_face", "😐"),
        ("confused", "😕"),
        ("cry", "😢"),
        ("scream", "😱"),
        ("angry", "😠"),
        ("heart", "❤️"),
        ("broken_heart", "💔"),
        ("star", "⭐"),
        ("sparkles", "✨"),
        ("fire", "🔥"),
        ("zap", "⚡"),
        ("tada", "🎉"),
        ("rocket", "🚀"),
        ("bulb", "💡"),
        ("warning", "⚠️"),
        ("bug", "🐛"),
        ("lock", "🔒"),
        ("key", "🔑"),
        ("memo", "📝"),
        ("chart_with_upwards_trend", "📈"),
        ("calendar", "📆"),
        ("clock3", "🕒"),
        ("coffee", "☕"),
        ("eyes", "👀"),
        ("wave", "👋"),
        ("clap", "👏"),
        ("pray", "🙏"),
        ("muscle", "💪"),
        ("thumbsup", "👍"),
        ("+1", "👍"),
        ("thumbsdown", "👎"),
        ("-1", "👎"),
        ("ok_hand", "👌"),
        ("point_right", "👉"),
        ("white_check_mark", "✅"),
        ("heavy_check_mark", "✔️"),
        ("x", "❌"),
        ("question", "❓"),
        ("exclamation", "❗"),
        ("100", "💯"),
        ("crab", "🦀"),
    ])
});

/// Looks up the glyph for a shortcode (without the surrounding colons).
pub fn glyph(shortcode: &str) -> Option<&'static str> {
    GLYPHS.get(shortcode).copied()
}

/// A piece of text split around recognised shortcodes.
#[derive(Debug, PartialEq)]
pub enum Segment<'a> {
    Text(&'a str),
    Emoji {
        shortcode: &'a str,
        glyph: &'static str,
    },
}

/// Splits `text` into literal and emoji segments. Unknown shortcodes stay literal,
/// and their closing colon may open the next shortcode.
pub fn split(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;
    let mut search = 0;
    while let Some(caps) = SHORTCODE.captures_at(text, search) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        let Some(glyph) = glyph(name.as_str()) else {
            search = whole.end() - 1;
            continue;
        };
        if whole.start() > cursor {
            segments.push(Segment::Text(&text[cursor..whole.start()]));
        }
        segments.push(Segment::Emoji {
            shortcode: name.as_str(),
            glyph,
        });
        cursor = whole.end();
        search = cursor;
    }
    if cursor < text.len() {
        segments.push(Segment::Text(&text[cursor..]));
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_known_shortcodes_only() {
        assert_eq!(
            split("Ship it :rocket: now :not_an_emoji:"),
            vec![
                Segment::Text("Ship it "),
                Segment::Emoji {
                    shortcode: "rocket",
                    glyph: "🚀"
                },
                Segment::Text(" now :not_an_emoji:"),
            ]
        );
    }

    #[test]
    fn unknown_shortcode_does_not_swallow_the_next_one() {
        assert_eq!(
            split("ratio a:b:smile: end"),
            vec![
                Segment::Text("ratio a:b"),
                Segment::Emoji {
                    shortcode: "smile",
                    glyph: "😄"
                },
                Segment::Text(" end"),
            ]
        );
    }

    #[test]
    fn text_without_shortcodes_is_single_segment() {
        assert_eq!(split("10:30"), vec![Segment::Text("10:30")]);
    }
}
