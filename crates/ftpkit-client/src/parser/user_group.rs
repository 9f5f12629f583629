//! Owner and group columns.

use super::{Cursor, Grammar};

/// User or group name matching `[A-Za-z_][A-Za-z0-9_-]*[$]?`.
///
/// Leading spaces are skipped. The name ends before the first byte outside
/// the grammar, or right after a `$`, which is kept as part of the name.
#[derive(Debug, Clone, Default)]
pub struct UserGroupName {
    name: Vec<u8>,
}

impl UserGroupName {
    /// Creates a name parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Grammar for UserGroupName {
    type Output = String;

    fn advance(&mut self, cursor: &mut Cursor<'_>) -> Option<bool> {
        if self.name.is_empty() {
            cursor.skip_spaces();
            let first = cursor.advance()?;
            if first != b'_' && !first.is_ascii_alphabetic() {
                return Some(false);
            }
            self.name.push(first);
        }

        while let Some(byte) = cursor.advance() {
            match byte {
                b'$' => {
                    self.name.push(byte);
                    return Some(true);
                }
                b'_' | b'-' => self.name.push(byte),
                _ if byte.is_ascii_alphanumeric() => self.name.push(byte),
                _ => {
                    cursor.back();
                    return Some(true);
                }
            }
        }

        None
    }

    fn end_of_input(&mut self) -> bool {
        !self.name.is_empty()
    }

    fn take_output(&mut self) -> Option<String> {
        Some(String::from_utf8_lossy(&std::mem::take(&mut self.name)).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_complete;

    #[test]
    fn stops_at_separator() {
        let mut parser = UserGroupName::new().into_parser();
        parser.input(b" www-data staff");
        assert!(parser.succeeded());
        assert_eq!(parser.consumed(), 9);
        assert_eq!(parser.into_output().as_deref(), Some("www-data"));
    }

    #[test]
    fn dollar_terminates() {
        let mut parser = UserGroupName::new().into_parser();
        parser.input(b"host$x");
        assert!(parser.succeeded());
        assert_eq!(parser.consumed(), 5);
        assert_eq!(parser.into_output().as_deref(), Some("host$"));
    }

    #[test]
    fn invalid_first_character() {
        assert_eq!(parse_complete(UserGroupName::new(), b"1000"), None);
        assert_eq!(parse_complete(UserGroupName::new(), b" -x"), None);
    }

    #[test]
    fn name_at_end_of_input() {
        assert_eq!(
            parse_complete(UserGroupName::new(), b"_apt").as_deref(),
            Some("_apt")
        );
        assert_eq!(parse_complete(UserGroupName::new(), b"  "), None);
    }

    #[test]
    fn split_across_windows() {
        let mut parser = UserGroupName::new().into_parser();
        parser.input(b"  ");
        parser.input(b"ro");
        parser.input(b"ot ");
        assert!(parser.succeeded());
        assert_eq!(parser.into_output().as_deref(), Some("root"));
    }
}
