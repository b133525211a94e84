//! Pure rendering of records into text/color token sequences.
//!
//! [`render`] maps a [`Record`] to the exact sequence of literals and
//! color switches the console stream should receive. Keeping this a pure
//! function keeps the fixed per-severity table testable without a
//! terminal: tests compare token sequences, not escape bytes.
//!
//! The line shape is
//!
//! ```text
//! <origin>|<indent padding><color><location><marker><body color><body><reset>\n
//! ```
//!
//! with marker and colors drawn from the severity table:
//!
//! | Severity | Marker | Color |
//! |---|---|---|
//! | Error | `:error:` | red |
//! | Warning | `:warning:` | yellow |
//! | Notify / NotifyH | `:: ` | bright blue, body bright white / magenta |
//! | Action | ` > ` | bright cyan, body bright white |
//! | Action2 | `   > ` | bright cyan, body bright white |
//! | Action3 | `   - ` | bright cyan, body default |
//! | Success | ` o ` | bright green |
//! | Failure | ` x ` | red |
//! | Note | ` - ` | bright white |
//! | Message | `:` | default |
//! | Title | none, trailing `:` | bright cyan |
//! | File | none (raw body) | none |

use crate::console::Color;

use super::record::Record;
use super::severity::Severity;

/// One element of a rendered message: a literal or a color switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal text to write.
    Text(String),
    /// Switch the stream to this color.
    Color(Color),
}

impl Token {
    fn text(s: impl Into<String>) -> Self {
        Token::Text(s.into())
    }
}

/// The color set before the location is printed, coloring location and
/// marker. `None` for kinds rendered without any color switch.
fn head_color(severity: Severity) -> Option<Color> {
    match severity {
        Severity::Error | Severity::Failure => Some(Color::ERROR),
        Severity::Warning => Some(Color::WARNING),
        s if s.is_notify() => Some(Color::NOTIFY),
        s if s.is_action() || s.is_title() => Some(Color::ACTION),
        Severity::Success => Some(Color::PROPER),
        Severity::Note => Some(Color::NOTIFY2),
        Severity::File => None,
        _ => Some(Color::MESSAGE),
    }
}

/// Render a record to its token sequence, ending with the newline.
pub fn render(record: &Record) -> Vec<Token> {
    let mut tokens = Vec::new();

    tokens.push(Token::text(format!("{}|", record.origin)));
    if record.indent > 0 {
        tokens.push(Token::text("  ".repeat(record.indent as usize)));
    }

    if let Some(color) = head_color(record.severity) {
        tokens.push(Token::Color(color));
    }

    let location = record.location.to_string();
    if !location.is_empty() {
        tokens.push(Token::Text(location));
    }

    match record.severity {
        Severity::Error => tokens.push(Token::text(":error:")),
        Severity::Warning => tokens.push(Token::text(":warning:")),
        Severity::Notify => {
            tokens.push(Token::text(":: "));
            tokens.push(Token::Color(Color::NOTIFY2));
        }
        Severity::NotifyH => {
            tokens.push(Token::text(":: "));
            tokens.push(Token::Color(Color::NOTIFY_H));
        }
        Severity::Action => {
            tokens.push(Token::text(" > "));
            tokens.push(Token::Color(Color::NOTIFY2));
        }
        Severity::Action2 => {
            tokens.push(Token::text("   > "));
            tokens.push(Token::Color(Color::NOTIFY2));
        }
        Severity::Action3 => {
            tokens.push(Token::text("   - "));
            tokens.push(Token::Color(Color::RESET));
        }
        Severity::Success => {
            tokens.push(Token::text(" o "));
            tokens.push(Token::Color(Color::RESET));
        }
        Severity::Failure => {
            tokens.push(Token::text(" x "));
            tokens.push(Token::Color(Color::RESET));
        }
        Severity::Note => {
            tokens.push(Token::text(" - "));
            tokens.push(Token::Color(Color::RESET));
        }
        Severity::Message => tokens.push(Token::text(":")),
        // Title and File carry no marker; Title closes with `:` below.
        Severity::Title | Severity::File => {}
    }

    tokens.push(Token::Text(record.text.clone()));
    tokens.push(Token::Color(Color::RESET));

    if record.severity.is_title() {
        tokens.push(Token::text(":"));
    }

    tokens.push(Token::text("\n"));
    tokens
}

/// Collapse a token sequence to its literal text, dropping color switches.
pub fn plain_text(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Text(s) => Some(s.as_str()),
            Token::Color(_) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::Location;

    fn record(severity: Severity, text: &str, location: Location) -> Record {
        Record {
            id: 1,
            location,
            indent: 0,
            text: text.to_string(),
            severity,
            origin: 42,
        }
    }

    #[test]
    fn error_with_location() {
        let tokens = render(&record(
            Severity::Error,
            "undefined symbol",
            Location::span("foo.c", 10, 5, 10, 5),
        ));
        assert_eq!(
            plain_text(&tokens),
            "42|foo.c:10.5:error:undefined symbol\n"
        );
        assert!(tokens.contains(&Token::Color(Color::ERROR)));
    }

    #[test]
    fn warning_without_location() {
        let tokens = render(&record(Severity::Warning, "look out", Location::null()));
        assert_eq!(plain_text(&tokens), "42|:warning:look out\n");
        assert_eq!(tokens[1], Token::Color(Color::WARNING));
    }

    #[test]
    fn marker_table() {
        let cases = [
            (Severity::Notify, "42|:: hello\n"),
            (Severity::NotifyH, "42|:: hello\n"),
            (Severity::Action, "42| > hello\n"),
            (Severity::Action2, "42|   > hello\n"),
            (Severity::Action3, "42|   - hello\n"),
            (Severity::Success, "42| o hello\n"),
            (Severity::Failure, "42| x hello\n"),
            (Severity::Note, "42| - hello\n"),
            (Severity::Message, "42|:hello\n"),
        ];
        for (severity, expected) in cases {
            let tokens = render(&record(severity, "hello", Location::null()));
            assert_eq!(plain_text(&tokens), expected, "{severity:?}");
        }
    }

    #[test]
    fn notify_body_colors_differ() {
        let notify = render(&record(Severity::Notify, "x", Location::null()));
        let notify_h = render(&record(Severity::NotifyH, "x", Location::null()));
        assert!(notify.contains(&Token::Color(Color::NOTIFY2)));
        assert!(notify_h.contains(&Token::Color(Color::NOTIFY_H)));
    }

    #[test]
    fn title_has_trailing_colon_and_no_marker() {
        let tokens = render(&record(Severity::Title, "main.c", Location::null()));
        assert_eq!(plain_text(&tokens), "42|main.c:\n");
        assert_eq!(tokens[1], Token::Color(Color::ACTION));
    }

    #[test]
    fn file_renders_raw_body() {
        let tokens = render(&record(
            Severity::File,
            "int main() {\n}\n",
            Location::null(),
        ));
        assert_eq!(plain_text(&tokens), "42|int main() {\n}\n\n");
        // No color switch before the body.
        assert!(matches!(tokens[0], Token::Text(_)));
        assert!(matches!(tokens[1], Token::Text(_)));
    }

    #[test]
    fn indent_padding_is_two_spaces_per_level() {
        let mut rec = record(Severity::Message, "deep", Location::null());
        rec.indent = 3;
        assert_eq!(plain_text(&render(&rec)), "42|      :deep\n");
    }

    #[test]
    fn failure_is_colored_like_error() {
        let tokens = render(&record(Severity::Failure, "nope", Location::null()));
        assert_eq!(tokens[1], Token::Color(Color::ERROR));
    }
}
