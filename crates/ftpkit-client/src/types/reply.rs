//! FTP reply types.

use crate::error::{Error, Result};

/// Category of a reply, given by the first digit of its code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplyType {
    /// 1xx: action started, expect another reply.
    Preliminary,
    /// 2xx: action completed.
    Completion,
    /// 3xx: more information needed.
    Intermediate,
    /// 4xx: action not taken, may succeed later.
    TransientNegative,
    /// 5xx: action not taken.
    PermanentNegative,
}

/// FTP reply code, always in `100..=599`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReplyCode(u16);

impl ReplyCode {
    /// Creates a reply code, or `None` if `code` is outside `100..=599`.
    #[must_use]
    pub const fn new(code: u16) -> Option<Self> {
        if code >= 100 && code < 600 {
            Some(Self(code))
        } else {
            None
        }
    }

    /// Returns the numeric code.
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    /// Returns the reply category.
    #[must_use]
    pub const fn reply_type(self) -> ReplyType {
        match self.0 / 100 {
            1 => ReplyType::Preliminary,
            2 => ReplyType::Completion,
            3 => ReplyType::Intermediate,
            4 => ReplyType::TransientNegative,
            _ => ReplyType::PermanentNegative,
        }
    }

    /// Returns true for 1xx codes.
    #[must_use]
    pub const fn is_preliminary(self) -> bool {
        matches!(self.reply_type(), ReplyType::Preliminary)
    }

    /// Returns true for 2xx codes.
    #[must_use]
    pub const fn is_completion(self) -> bool {
        matches!(self.reply_type(), ReplyType::Completion)
    }

    /// Returns true for 3xx codes.
    #[must_use]
    pub const fn is_intermediate(self) -> bool {
        matches!(self.reply_type(), ReplyType::Intermediate)
    }

    /// Returns true for 4xx codes.
    #[must_use]
    pub const fn is_transient(self) -> bool {
        matches!(self.reply_type(), ReplyType::TransientNegative)
    }

    /// Returns true for 5xx codes.
    #[must_use]
    pub const fn is_permanent(self) -> bool {
        matches!(self.reply_type(), ReplyType::PermanentNegative)
    }

    /// Returns true for 1xx, 2xx and 3xx codes.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 < 400
    }

    /// Returns true for 4xx and 5xx codes.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        !self.is_positive()
    }
}

impl std::fmt::Display for ReplyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// Codes this client meets
impl ReplyCode {
    /// 150 File status okay; about to open data connection
    pub const OPENING_DATA: Self = Self(150);
    /// 200 Command okay
    pub const COMMAND_OK: Self = Self(200);
    /// 220 Service ready for new user
    pub const SERVICE_READY: Self = Self(220);
    /// 221 Service closing control connection
    pub const CLOSING: Self = Self(221);
    /// 226 Closing data connection, transfer complete
    pub const TRANSFER_COMPLETE: Self = Self(226);
    /// 227 Entering passive mode
    pub const PASSIVE_MODE: Self = Self(227);
    /// 230 User logged in
    pub const LOGGED_IN: Self = Self(230);
    /// 250 Requested file action okay, completed
    pub const FILE_ACTION_OK: Self = Self(250);
    /// 257 Pathname created / current directory
    pub const PATHNAME: Self = Self(257);
    /// 331 User name okay, need password
    pub const NEED_PASSWORD: Self = Self(331);
    /// 425 Can't open data connection
    pub const CANT_OPEN_DATA: Self = Self(425);
    /// 426 Connection closed; transfer aborted
    pub const TRANSFER_ABORTED: Self = Self(426);
    /// 450 File unavailable (busy)
    pub const FILE_BUSY: Self = Self(450);
    /// 530 Not logged in
    pub const NOT_LOGGED_IN: Self = Self(530);
    /// 550 File unavailable (not found, no access)
    pub const FILE_UNAVAILABLE: Self = Self(550);
}

/// One reply line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Reply code.
    pub code: ReplyCode,
    /// Text after the code and separator.
    pub message: String,
    /// False when the line is a `DDD-` continuation.
    pub last: bool,
}

impl Reply {
    /// Parses one reply line: `DDD`, then an optional space or `-`, then
    /// the message. A trailing CR/LF is ignored.
    ///
    /// # Errors
    ///
    /// Returns `Error::BadReply` if the line does not start with a reply
    /// code in `100..=599` followed by a valid separator.
    pub fn parse(line: &str) -> Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let bad = || Error::BadReply(line.to_string());

        let bytes = line.as_bytes();
        if bytes.len() < 3 || !bytes[..3].iter().all(u8::is_ascii_digit) {
            return Err(bad());
        }
        if !(b'1'..=b'5').contains(&bytes[0]) {
            return Err(bad());
        }

        let separator = bytes.get(3).copied();
        if !matches!(separator, None | Some(b' ' | b'-')) {
            return Err(bad());
        }

        let code = line[..3]
            .parse::<u16>()
            .ok()
            .and_then(ReplyCode::new)
            .ok_or_else(bad)?;

        Ok(Self {
            code,
            message: line.get(4..).unwrap_or_default().to_string(),
            last: separator != Some(b'-'),
        })
    }

    /// Returns the reply category.
    #[must_use]
    pub const fn reply_type(&self) -> ReplyType {
        self.code.reply_type()
    }

    /// Returns true for 1xx, 2xx and 3xx replies.
    #[must_use]
    pub const fn is_positive(&self) -> bool {
        self.code.is_positive()
    }

    /// Returns true for 4xx and 5xx replies.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.code.is_negative()
    }
}

/// A logical reply made of one or more lines.
///
/// Lines are added with [`ReplySequence::parse`] until [`ReplySequence::is_end`]
/// holds: the last line has a space separator and repeats the opening code.
/// The classification helpers look at the first line only and are all false
/// on an empty sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplySequence {
    replies: Vec<Reply>,
}

impl ReplySequence {
    /// Creates an empty sequence.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            replies: Vec::new(),
        }
    }

    /// Parses `line` and appends it.
    ///
    /// # Errors
    ///
    /// Returns `Error::BadReply` if the line is malformed; the sequence is
    /// left unchanged.
    pub fn parse(&mut self, line: &str) -> Result<()> {
        let reply = Reply::parse(line)?;
        self.replies.push(reply);
        Ok(())
    }

    /// Returns true once the terminating line has been added.
    #[must_use]
    pub fn is_end(&self) -> bool {
        match (self.replies.first(), self.replies.last()) {
            (Some(first), Some(last)) => last.last && last.code == first.code,
            _ => false,
        }
    }

    /// Returns true if the opening line is positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.first().is_some_and(Reply::is_positive)
    }

    /// Returns true if the opening line is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.first().is_some_and(Reply::is_negative)
    }

    /// Returns the category of the opening line.
    #[must_use]
    pub fn reply_type(&self) -> Option<ReplyType> {
        self.first().map(Reply::reply_type)
    }

    /// Returns the code of the opening line.
    #[must_use]
    pub fn code(&self) -> Option<ReplyCode> {
        self.first().map(|reply| reply.code)
    }

    /// Returns the opening line.
    #[must_use]
    pub fn first(&self) -> Option<&Reply> {
        self.replies.first()
    }

    /// Returns the message of the opening line, or `""` if empty.
    #[must_use]
    pub fn message(&self) -> &str {
        self.first().map_or("", |reply| reply.message.as_str())
    }

    /// Returns all messages joined by newlines.
    #[must_use]
    pub fn message_text(&self) -> String {
        self.replies
            .iter()
            .map(|reply| reply.message.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.replies.len()
    }

    /// Returns true if no line has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.replies.is_empty()
    }

    /// Iterates over the lines in arrival order.
    pub fn iter(&self) -> std::slice::Iter<'_, Reply> {
        self.replies.iter()
    }
}

impl<'a> IntoIterator for &'a ReplySequence {
    type Item = &'a Reply;
    type IntoIter = std::slice::Iter<'a, Reply>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
