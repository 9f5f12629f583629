//! Type and permission columns of a listing line.

use super::{Cursor, Grammar};
use crate::types::{FileType, Permissions};

/// Columns after the type indicator that hold permission symbols.
const PERMISSION_COLUMNS: u8 = 9;

/// Leading status column of a Unix listing, e.g. `drwxr-xr-x`.
///
/// One type indicator, nine permission symbols and one trailing column
/// (a separator or an ACL marker) which is consumed and ignored.
#[derive(Debug, Clone, Default)]
pub struct FileStatus {
    column: u8,
    file_type: FileType,
    permissions: Permissions,
}

impl FileStatus {
    /// Creates a status parser.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Grammar for FileStatus {
    type Output = (FileType, Permissions);

    fn advance(&mut self, cursor: &mut Cursor<'_>) -> Option<bool> {
        if self.column == 0 {
            cursor.skip_spaces();
        }

        while let Some(byte) = cursor.advance() {
            match self.column {
                0 => self.file_type = FileType::from_indicator(byte),
                1..=PERMISSION_COLUMNS => {
                    if !self.permissions.apply_symbol(self.column - 1, byte) {
                        return Some(false);
                    }
                }
                _ => return Some(true),
            }
            self.column += 1;
        }

        None
    }

    fn take_output(&mut self) -> Option<Self::Output> {
        Some((self.file_type, self.permissions))
    }
}
