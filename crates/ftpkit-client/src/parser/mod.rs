//! Incremental parsers for FTP replies and directory listings.
//!
//! Every parser here consumes input that may arrive in arbitrarily sized
//! chunks. A [`Grammar`] describes one grammar fragment; [`Incremental`]
//! drives it across repeated [`Incremental::input`] calls:
//!
//! ```
//! use ftpkit_client::parser::{Grammar, HostPortTuple};
//!
//! let mut parser = HostPortTuple::new().into_parser();
//! parser.input(b"Entering Passive Mode (127,0,");
//! assert!(!parser.is_finished());
//! parser.input(b"0,1,4,1)");
//! assert!(parser.succeeded());
//!
//! let address = parser.into_output().unwrap();
//! assert_eq!(address.host(), "127.0.0.1");
//! assert_eq!(address.port(), 1025);
//! ```
//!
//! Once no more input will arrive, [`Incremental::eoi`] lets a parser that
//! is still assembling a value decide from what it has.

mod cursor;
mod dquoted;
mod file_list;
mod file_name;
mod file_status;
mod host_port;
mod number;
mod timestamp;
mod user_group;

pub use cursor::Cursor;
pub use dquoted::DoubleQuoted;
pub use file_list::FileList;
pub use file_name::FileName;
pub use file_status::FileStatus;
pub use host_port::HostPortTuple;
pub use number::Number;
pub use timestamp::Timestamp;
pub use user_group::UserGroupName;

/// Progress of an incremental parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseState {
    /// More input is needed.
    #[default]
    Ongoing,
    /// A value was recognised.
    Succeeded,
    /// The input does not match the grammar.
    Failed,
}

/// One grammar fragment that can be parsed incrementally.
pub trait Grammar {
    /// Value produced on success.
    type Output;

    /// Consumes bytes from `cursor`.
    ///
    /// Returns `None` when the window ran out before the fragment was
    /// complete, otherwise `Some(success)`. Bytes that belong to whatever
    /// follows the fragment must be left unconsumed.
    fn advance(&mut self, cursor: &mut Cursor<'_>) -> Option<bool>;

    /// Decides the outcome when no more input will arrive.
    fn end_of_input(&mut self) -> bool {
        false
    }

    /// Moves the recognised value out of the grammar.
    fn take_output(&mut self) -> Option<Self::Output>;

    /// Wraps the grammar in an [`Incremental`] driver.
    fn into_parser(self) -> Incremental<Self>
    where
        Self: Sized,
    {
        Incremental::new(self)
    }
}

/// Drives a [`Grammar`] over a sequence of input windows.
#[derive(Debug, Clone)]
pub struct Incremental<G> {
    grammar: G,
    state: ParseState,
    consumed: usize,
}

impl<G: Grammar> Incremental<G> {
    /// Creates a driver in the [`ParseState::Ongoing`] state.
    #[must_use]
    pub const fn new(grammar: G) -> Self {
        Self {
            grammar,
            state: ParseState::Ongoing,
            consumed: 0,
        }
    }

    /// Feeds the next window of input.
    ///
    /// Does nothing once the parser has finished.
    pub fn input(&mut self, window: &[u8]) {
        self.consumed = 0;
        if self.is_finished() {
            return;
        }

        let mut cursor = Cursor::new(window);
        if let Some(success) = self.grammar.advance(&mut cursor) {
            self.finish(success);
        }
        self.consumed = cursor.position();
    }

    /// Declares that no further input will arrive.
    pub fn eoi(&mut self) {
        if !self.is_finished() {
            let success = self.grammar.end_of_input();
            self.finish(success);
        }
    }

    /// Returns the bytes accepted from the most recent [`Incremental::input`].
    #[must_use]
    pub const fn consumed(&self) -> usize {
        self.consumed
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> ParseState {
        self.state
    }

    /// Returns true once the parser succeeded or failed.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.state != ParseState::Ongoing
    }

    /// Returns true if the parser succeeded.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.state == ParseState::Succeeded
    }

    /// Returns true if the parser failed.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.state == ParseState::Failed
    }

    /// Moves the value out after success.
    pub fn take_output(&mut self) -> Option<G::Output> {
        if self.succeeded() {
            self.grammar.take_output()
        } else {
            None
        }
    }

    /// Consumes the driver and returns the value after success.
    #[must_use]
    pub fn into_output(mut self) -> Option<G::Output> {
        self.take_output()
    }

    fn finish(&mut self, success: bool) {
        self.state = if success {
            ParseState::Succeeded
        } else {
            ParseState::Failed
        };
    }
}

/// Parses one complete input: feeds `input`, then signals end of input.
pub fn parse_complete<G: Grammar>(grammar: G, input: &[u8]) -> Option<G::Output> {
    let mut parser = grammar.into_parser();
    parser.input(input);
    parser.eoi();
    parser.into_output()
}

/// Outcome of handing a window to a sub-parser.
pub(crate) enum Step<T> {
    /// The sub-parser wants more input.
    Pending,
    /// The sub-parser failed.
    Failed,
    /// The sub-parser produced a value.
    Done(T),
}

/// Feeds the cursor's remaining window to `parser` and advances the cursor
/// past whatever the sub-parser accepted.
pub(crate) fn feed<G: Grammar>(parser: &mut Incremental<G>, cursor: &mut Cursor<'_>) -> Step<G::Output> {
    parser.input(cursor.remaining());
    cursor.skip(parser.consumed());
    match parser.state() {
        ParseState::Ongoing => Step::Pending,
        ParseState::Failed => Step::Failed,
        ParseState::Succeeded => parser.take_output().map_or(Step::Failed, Step::Done),
    }
}
