//! Directory entries produced from `LIST` output.

use std::fmt;

use chrono::NaiveDateTime;

/// Kind of a directory entry, from the first column of a listing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FileType {
    /// Regular file (`-`).
    Regular,
    /// Directory (`d`).
    Directory,
    /// Symbolic link (`l`).
    Symlink,
    /// Named pipe (`p`).
    Fifo,
    /// Unix socket (`s`).
    Socket,
    /// Block device (`b`).
    BlockDevice,
    /// Character device (`c`).
    CharDevice,
    /// Any other indicator.
    #[default]
    Unknown,
}

impl FileType {
    /// Maps a listing type indicator to a file type.
    #[must_use]
    pub const fn from_indicator(indicator: u8) -> Self {
        match indicator {
            b'-' => Self::Regular,
            b'd' => Self::Directory,
            b'l' => Self::Symlink,
            b'p' => Self::Fifo,
            b's' => Self::Socket,
            b'b' => Self::BlockDevice,
            b'c' => Self::CharDevice,
            _ => Self::Unknown,
        }
    }

    /// Returns the listing indicator for this type.
    #[must_use]
    pub const fn indicator(self) -> char {
        match self {
            Self::Regular => '-',
            Self::Directory => 'd',
            Self::Symlink => 'l',
            Self::Fifo => 'p',
            Self::Socket => 's',
            Self::BlockDevice => 'b',
            Self::CharDevice => 'c',
            Self::Unknown => '?',
        }
    }
}

/// Permission class (row of the permission columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// File owner.
    Owner,
    /// Owning group.
    Group,
    /// Everyone else.
    Other,
}

impl Class {
    const fn shift(self) -> u16 {
        match self {
            Self::Owner => 6,
            Self::Group => 3,
            Self::Other => 0,
        }
    }

    const fn from_row(row: u8) -> Option<Self> {
        match row {
            0 => Some(Self::Owner),
            1 => Some(Self::Group),
            2 => Some(Self::Other),
            _ => None,
        }
    }
}

/// Read/write/execute flags of one [`Class`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct Access {
    /// Read permission.
    pub read: bool,
    /// Write permission.
    pub write: bool,
    /// Execute (search, for directories) permission.
    pub execute: bool,
}

/// Unix permission bits of a directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Permissions(u16);

impl Permissions {
    /// Set-user-ID bit.
    pub const SETUID: u16 = 0o4000;
    /// Set-group-ID bit.
    pub const SETGID: u16 = 0o2000;
    /// Sticky bit.
    pub const STICKY: u16 = 0o1000;

    /// Creates permissions from a numeric mode, ignoring file-type bits.
    #[must_use]
    pub const fn from_mode(mode: u16) -> Self {
        Self(mode & 0o7777)
    }

    /// Returns the numeric mode.
    #[must_use]
    pub const fn mode(self) -> u16 {
        self.0
    }

    /// Returns true if every bit of `bits` is set.
    #[must_use]
    pub const fn contains(self, bits: u16) -> bool {
        self.0 & bits == bits
    }

    /// Returns the access flags of one class.
    #[must_use]
    pub const fn access(self, class: Class) -> Access {
        let bits = self.0 >> class.shift();
        Access {
            read: bits & 0o4 != 0,
            write: bits & 0o2 != 0,
            execute: bits & 0o1 != 0,
        }
    }

    /// Applies the symbol found in permission column `index` (0..9).
    ///
    /// Returns false if the symbol is not valid in that column.
    pub(crate) const fn apply_symbol(&mut self, index: u8, symbol: u8) -> bool {
        let Some(class) = Class::from_row(index / 3) else {
            return false;
        };
        let shift = class.shift();
        let special = match class {
            Class::Owner => Self::SETUID,
            Class::Group => Self::SETGID,
            Class::Other => Self::STICKY,
        };

        let bits = match (index % 3, symbol, class) {
            (_, b'-', _) => 0,
            (0, b'r', _) => 0o4 << shift,
            (1, b'w', _) => 0o2 << shift,
            (2, b'x', _) => 0o1 << shift,
            (2, b's', Class::Owner | Class::Group) | (2, b't', Class::Other) => {
                (0o1 << shift) | special
            }
            (2, b'S', Class::Owner | Class::Group) | (2, b'T', Class::Other) => special,
            _ => return false,
        };

        self.0 |= bits;
        true
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (class, special, set, unset) in [
            (Class::Owner, Self::SETUID, 's', 'S'),
            (Class::Group, Self::SETGID, 's', 'S'),
            (Class::Other, Self::STICKY, 't', 'T'),
        ] {
            let access = self.access(class);
            let execute = match (access.execute, self.contains(special)) {
                (true, true) => set,
                (false, true) => unset,
                (true, false) => 'x',
                (false, false) => '-',
            };
            write!(
                f,
                "{}{}{execute}",
                if access.read { 'r' } else { '-' },
                if access.write { 'w' } else { '-' },
            )?;
        }
        Ok(())
    }
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileEntry {
    /// Entry kind.
    pub file_type: FileType,
    /// Permission bits.
    pub permissions: Permissions,
    /// Hard link count.
    pub links: u64,
    /// Owner name.
    pub owner: String,
    /// Group name.
    pub group: String,
    /// Size in bytes.
    pub size: u64,
    /// Last modification time, as printed by the server (no time zone).
    pub modified: NaiveDateTime,
    /// Entry name.
    pub name: String,
    /// Target of a symbolic link, when the listing shows one.
    pub link_target: Option<String>,
}

impl FileEntry {
    /// Returns true if the entry is a directory.
    #[must_use]
    pub fn is_directory(&self) -> bool {
        self.file_type == FileType::Directory
    }

    /// Returns true if the entry is a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.file_type == FileType::Regular
    }

    /// Returns true if the entry is a symbolic link.
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        self.file_type == FileType::Symlink
    }
}
