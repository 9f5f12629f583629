//! Double-quoted strings, as found in `257` replies to `PWD`.

use super::{Cursor, Grammar};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Quote {
    #[default]
    Before,
    Inside,
    Escaped,
}

/// Text between double quotes.
///
/// Leading whitespace is skipped, then an opening `"` is required. A `\`
/// escapes the byte after it. Parsing stops right after the closing quote,
/// so anything that follows is left unconsumed.
#[derive(Debug, Clone, Default)]
pub struct DoubleQuoted {
    quote: Quote,
    text: Vec<u8>,
}

impl DoubleQuoted {
    /// Creates a quoted-string parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Grammar for DoubleQuoted {
    type Output = String;

    fn advance(&mut self, cursor: &mut Cursor<'_>) -> Option<bool> {
        while let Some(byte) = cursor.advance() {
            match (self.quote, byte) {
                (Quote::Before, b'"') => self.quote = Quote::Inside,
                (Quote::Before, _) if byte.is_ascii_whitespace() => {}
                (Quote::Before, _) => return Some(false),
                (Quote::Inside, b'"') => return Some(true),
                (Quote::Inside, b'\\') => self.quote = Quote::Escaped,
                (Quote::Inside, _) => self.text.push(byte),
                (Quote::Escaped, _) => {
                    self.text.push(byte);
                    self.quote = Quote::Inside;
                }
            }
        }

        None
    }

    fn take_output(&mut self) -> Option<String> {
        Some(String::from_utf8_lossy(&std::mem::take(&mut self.text)).into_owned())
    }
}
