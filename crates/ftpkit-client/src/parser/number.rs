//! Unsigned decimal numbers.

use std::marker::PhantomData;

use super::{Cursor, Grammar};

/// Decimal number of the unsigned integer type `T`.
///
/// Leading spaces are skipped. The number ends at the first non-digit, which
/// is left unconsumed. Fails on overflow of `T`, on a multi-digit number
/// with a leading `0`, and when no digit was seen.
#[derive(Debug, Clone)]
pub struct Number<T> {
    value: u64,
    digits: usize,
    leading_zero: bool,
    _target: PhantomData<T>,
}

impl<T> Number<T> {
    /// Creates a number parser.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            value: 0,
            digits: 0,
            leading_zero: false,
            _target: PhantomData,
        }
    }

    const fn is_valid(&self) -> bool {
        self.digits == 1 || (self.digits > 1 && !self.leading_zero)
    }
}

impl<T> Default for Number<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TryFrom<u64>> Grammar for Number<T> {
    type Output = T;

    fn advance(&mut self, cursor: &mut Cursor<'_>) -> Option<bool> {
        if self.digits == 0 {
            cursor.skip_spaces();
        }

        while let Some(byte) = cursor.peek() {
            if !byte.is_ascii_digit() {
                return Some(self.is_valid());
            }

            let digit = u64::from(byte - b'0');
            let Some(value) = self.value.checked_mul(10).and_then(|v| v.checked_add(digit)) else {
                return Some(false);
            };
            if T::try_from(value).is_err() {
                return Some(false);
            }

            if self.digits == 0 {
                self.leading_zero = digit == 0;
            }
            self.value = value;
            self.digits += 1;
            cursor.advance();
        }

        None
    }

    fn end_of_input(&mut self) -> bool {
        self.is_valid()
    }

    fn take_output(&mut self) -> Option<T> {
        T::try_from(self.value).ok()
    }
}
