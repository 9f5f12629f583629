//! Unix-style `LIST` output.

use chrono::{Datelike, Utc};

use super::{
    Cursor, FileName, FileStatus, Grammar, Incremental, Number, Step, Timestamp, UserGroupName,
    feed,
};
use crate::types::{FileEntry, FileType};

/// Column of the listing line currently being parsed.
#[derive(Debug, Clone)]
enum Field {
    StartOfLine,
    Status(Incremental<FileStatus>),
    Links(Incremental<Number<u64>>),
    Owner(Incremental<UserGroupName>),
    Group(Incremental<UserGroupName>),
    Size(Incremental<Number<u64>>),
    Modified(Incremental<Timestamp>),
    Name(Incremental<FileName>),
    EndOfLine { seen_cr: bool },
}

/// Hands the window to the column parser, returning early from `advance`
/// until the column is complete.
macro_rules! column {
    ($parser:expr, $cursor:expr) => {
        match feed($parser, $cursor) {
            Step::Pending => return None,
            Step::Failed => return Some(false),
            Step::Done(value) => value,
        }
    };
}

/// Directory listing in `ls -l` format, one entry per line:
///
/// ```text
/// drwxr-xr-x  2 owner group  4096 Mar 14 09:26 src
/// -rw-r--r--  1 owner group  1024 Jan  1  2020 file.txt
/// ```
///
/// Any malformed line fails the whole listing. At end of input the
/// listing must end on a line boundary, or inside a non-empty last name.
#[derive(Debug, Clone)]
pub struct FileList {
    field: Field,
    current_year: i32,
    pending: FileEntry,
    entries: Vec<FileEntry>,
}

impl FileList {
    /// Creates a listing parser that infers the current UTC year.
    #[must_use]
    pub fn new() -> Self {
        Self::with_current_year(Utc::now().year())
    }

    /// Creates a listing parser that uses `year` for timestamps without one.
    #[must_use]
    pub fn with_current_year(year: i32) -> Self {
        Self {
            field: Field::StartOfLine,
            current_year: year,
            pending: FileEntry::default(),
            entries: Vec::new(),
        }
    }

    fn commit(&mut self, (name, link_target): (String, Option<String>)) {
        self.pending.name = name;
        self.pending.link_target = link_target;
        self.entries.push(std::mem::take(&mut self.pending));
    }
}

impl Default for FileList {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar for FileList {
    type Output = Vec<FileEntry>;

    fn advance(&mut self, cursor: &mut Cursor<'_>) -> Option<bool> {
        while !cursor.is_empty() {
            self.field = match &mut self.field {
                Field::StartOfLine => Field::Status(FileStatus::new().into_parser()),
                Field::Status(parser) => {
                    let (file_type, permissions) = column!(parser, cursor);
                    self.pending.file_type = file_type;
                    self.pending.permissions = permissions;
                    Field::Links(Number::new().into_parser())
                }
                Field::Links(parser) => {
                    self.pending.links = column!(parser, cursor);
                    Field::Owner(UserGroupName::new().into_parser())
                }
                Field::Owner(parser) => {
                    self.pending.owner = column!(parser, cursor);
                    Field::Group(UserGroupName::new().into_parser())
                }
                Field::Group(parser) => {
                    self.pending.group = column!(parser, cursor);
                    Field::Size(Number::new().into_parser())
                }
                Field::Size(parser) => {
                    self.pending.size = column!(parser, cursor);
                    Field::Modified(Timestamp::with_current_year(self.current_year).into_parser())
                }
                Field::Modified(parser) => {
                    self.pending.modified = column!(parser, cursor);
                    let name = if self.pending.file_type == FileType::Symlink {
                        FileName::symlink()
                    } else {
                        FileName::new()
                    };
                    Field::Name(name.into_parser())
                }
                Field::Name(parser) => {
                    let name = column!(parser, cursor);
                    self.commit(name);
                    Field::EndOfLine { seen_cr: false }
                }
                Field::EndOfLine { seen_cr } => {
                    if !*seen_cr && cursor.eat(b'\r') {
                        *seen_cr = true;
                        continue;
                    }
                    if !cursor.eat(b'\n') {
                        return Some(true);
                    }
                    Field::StartOfLine
                }
            };
        }

        None
    }

    fn end_of_input(&mut self) -> bool {
        match &mut self.field {
            Field::StartOfLine | Field::EndOfLine { .. } => true,
            Field::Name(parser) => {
                parser.eoi();
                match parser.take_output() {
                    Some(name) => {
                        self.commit(name);
                        true
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    fn take_output(&mut self) -> Option<Vec<FileEntry>> {
        Some(std::mem::take(&mut self.entries))
    }
}
