//! Read-only cursor over one input window.

/// Forward cursor over a caller-supplied byte window.
///
/// The cursor never reads past the end of the window. The only backwards
/// movement is [`Cursor::back`], which undoes a single [`Cursor::advance`].
#[derive(Debug)]
pub struct Cursor<'a> {
    window: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `window`.
    #[must_use]
    pub const fn new(window: &'a [u8]) -> Self {
        Self { window, pos: 0 }
    }

    /// Returns the number of bytes consumed so far.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unconsumed part of the window.
    #[must_use]
    pub fn remaining(&self) -> &'a [u8] {
        &self.window[self.pos..]
    }

    /// Returns true if the whole window has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.pos >= self.window.len()
    }

    /// Peeks at the current byte without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.window.get(self.pos).copied()
    }

    /// Consumes and returns the current byte.
    pub fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        Some(byte)
    }

    /// Steps back over the byte returned by the last [`Cursor::advance`].
    pub const fn back(&mut self) {
        self.pos = self.pos.saturating_sub(1);
    }

    /// Consumes the current byte if it equals `byte`.
    pub fn eat(&mut self, byte: u8) -> bool {
        if self.peek() == Some(byte) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Skips up to `n` bytes.
    pub fn skip(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.window.len());
    }

    /// Skips a run of spaces.
    pub fn skip_spaces(&mut self) {
        while self.eat(b' ') {}
    }
}
