use core::fmt::{self, Write};

use super::error::SerializeError;
use super::serialize::{ReadContext, WriteContext};

/// Active step window `first..=last` over an array of `N` steps.
///
/// `0 <= first <= last <= N - 1` holds after every mutation: each bound is
/// clamped against the other one, never pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepRange<const N: usize> {
    first: u8,
    last: u8,
}

impl<const N: usize> Default for StepRange<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> StepRange<N> {
    const VALID_STEP_COUNT: () = assert!(N >= 1 && N <= 256, "step count must be 1..=256");

    /// Full range `0..=N - 1`.
    pub fn new() -> Self {
        let () = Self::VALID_STEP_COUNT;
        Self {
            first: 0,
            last: (N - 1) as u8,
        }
    }

    pub fn first(&self) -> usize {
        usize::from(self.first)
    }

    pub fn last(&self) -> usize {
        usize::from(self.last)
    }

    /// Number of steps in the window, at least one.
    pub fn step_count(&self) -> usize {
        self.last() - self.first() + 1
    }

    /// Clamped to `0..=last`.
    pub fn set_first(&mut self, first: i32) {
        self.first = first.clamp(0, i32::from(self.last)) as u8;
    }

    /// Clamped to `first..=N - 1`.
    pub fn set_last(&mut self, last: i32) {
        self.last = last.clamp(i32::from(self.first), N as i32 - 1) as u8;
    }

    pub fn edit_first(&mut self, delta: i32, _shift: bool) {
        self.set_first(i32::from(self.first).saturating_add(delta));
    }

    pub fn edit_last(&mut self, delta: i32, _shift: bool) {
        self.set_last(i32::from(self.last).saturating_add(delta));
    }

    /// One-based.
    pub fn print_first<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "{}", self.first() + 1)
    }

    /// One-based.
    pub fn print_last<W: Write>(&self, out: &mut W) -> fmt::Result {
        write!(out, "{}", self.last() + 1)
    }

    pub fn write(&self, context: &mut WriteContext<'_>) -> Result<(), SerializeError> {
        context.write_u8(self.first)?;
        context.write_u8(self.last)
    }

    /// Out-of-range bytes are clamped: `last` first, then `first` against it.
    pub fn read(&mut self, context: &mut ReadContext<'_>) -> Result<(), SerializeError> {
        let first = context.read_u8()?;
        let last = context.read_u8()?;
        self.first = 0;
        self.last = (N - 1) as u8;
        self.set_last(i32::from(last));
        self.set_first(i32::from(first));
        Ok(())
    }
}
