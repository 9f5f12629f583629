//! Trailing name column of a listing line.

use super::{Cursor, Grammar};

/// Separator between a symlink name and its target.
const LINK_ARROW: &[u8] = b" -> ";

/// Entry name, running from the first non-space byte up to CR or LF.
///
/// The line terminator is left unconsumed. A `/` in the name fails the
/// parse. For symlinks ([`FileName::symlink`]) the text after ` -> ` is
/// the link target, in which `/` is allowed.
#[derive(Debug, Clone, Default)]
pub struct FileName {
    raw: Vec<u8>,
    symlink: bool,
    arrow_at: Option<usize>,
}

impl FileName {
    /// Creates a parser for a plain entry name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a parser that splits `name -> target`.
    #[must_use]
    pub fn symlink() -> Self {
        Self {
            symlink: true,
            ..Self::default()
        }
    }

    fn split(&self) -> Option<(String, Option<String>)> {
        let (name, target) = match self.arrow_at {
            Some(at) => (&self.raw[..at], Some(&self.raw[at + LINK_ARROW.len()..])),
            None => (&self.raw[..], None),
        };
        if name.is_empty() {
            return None;
        }

        Some((
            String::from_utf8_lossy(name).into_owned(),
            target.map(|t| String::from_utf8_lossy(t).into_owned()),
        ))
    }
}

impl Grammar for FileName {
    /// Entry name and, for symlinks, the link target.
    type Output = (String, Option<String>);

    fn advance(&mut self, cursor: &mut Cursor<'_>) -> Option<bool> {
        if self.raw.is_empty() {
            cursor.skip_spaces();
        }

        while let Some(byte) = cursor.advance() {
            match byte {
                b'\r' | b'\n' => {
                    cursor.back();
                    return Some(self.split().is_some());
                }
                b'/' if self.arrow_at.is_none() => return Some(false),
                _ => {
                    self.raw.push(byte);
                    if self.symlink && self.arrow_at.is_none() && self.raw.ends_with(LINK_ARROW) {
                        self.arrow_at = Some(self.raw.len() - LINK_ARROW.len());
                    }
                }
            }
        }

        None
    }

    fn end_of_input(&mut self) -> bool {
        self.split().is_some()
    }

    fn take_output(&mut self) -> Option<Self::Output> {
        self.split()
    }
}
