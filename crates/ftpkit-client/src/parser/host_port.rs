//! `h1,h2,h3,h4,p1,p2` tuples from `227` replies.

use super::{Cursor, Grammar, Incremental, Number, Step, feed};
use crate::types::HostPort;

/// Number of octets in a host/port tuple.
const TUPLE_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    /// Skipping text before the first digit.
    Start,
    /// Inside an octet.
    Octet,
    /// Expecting the comma after an octet.
    Comma,
}

/// Six comma-separated decimal octets, e.g. `(127,0,0,1,4,1)`.
///
/// Text before the first digit (such as `Entering Passive Mode (`) is
/// skipped; text after the sixth octet is left unconsumed.
#[derive(Debug, Clone)]
pub struct HostPortTuple {
    position: Position,
    octets: [u8; TUPLE_LEN],
    count: usize,
    octet: Incremental<Number<u8>>,
}

impl HostPortTuple {
    /// Creates a tuple parser.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: Position::Start,
            octets: [0; TUPLE_LEN],
            count: 0,
            octet: Incremental::new(Number::new()),
        }
    }

    fn begin_octet(&mut self) {
        self.octet = Number::new().into_parser();
        self.position = Position::Octet;
    }

    /// Stores a finished octet; returns true once the tuple is complete.
    fn push_octet(&mut self, octet: u8) -> bool {
        self.octets[self.count] = octet;
        self.count += 1;
        self.position = Position::Comma;
        self.count == TUPLE_LEN
    }
}

impl Default for HostPortTuple {
    fn default() -> Self {
        Self::new()
    }
}

impl Grammar for HostPortTuple {
    type Output = HostPort;

    fn advance(&mut self, cursor: &mut Cursor<'_>) -> Option<bool> {
        loop {
            match self.position {
                Position::Start => {
                    while !cursor.peek()?.is_ascii_digit() {
                        cursor.advance();
                    }
                    self.begin_octet();
                }
                Position::Octet => match feed(&mut self.octet, cursor) {
                    Step::Pending => return None,
                    Step::Failed => return Some(false),
                    Step::Done(octet) => {
                        if self.push_octet(octet) {
                            return Some(true);
                        }
                    }
                },
                Position::Comma => {
                    if cursor.peek()? != b',' {
                        return Some(false);
                    }
                    cursor.advance();
                    self.begin_octet();
                }
            }
        }
    }

    fn end_of_input(&mut self) -> bool {
        if self.position != Position::Octet || self.count != TUPLE_LEN - 1 {
            return false;
        }

        self.octet.eoi();
        match self.octet.take_output() {
            Some(octet) => self.push_octet(octet),
            None => false,
        }
    }

    fn take_output(&mut self) -> Option<HostPort> {
        (self.count == TUPLE_LEN).then(|| HostPort::from_octets(self.octets))
    }
}
