//! Editing helpers shared by the sequence records.
//!
//! These implement the encoder-turn behaviour of the UI: musically indexed
//! divisor steps, power-of-two measure counts and cyclic enum selection.
//! Callers still clamp the result into the field's own range.
//!
//! The structural step operations shared by note and curve sequences live
//! here too: [`shift_steps`] and [`duplicate_steps`].

use core::fmt::{self, Write};

use super::step_range::StepRange;

/// Ticks per quarter note of the sequence clock that divisors count.
pub const SEQUENCE_PPQN: i32 = 48;

/// Divisor of a cleared sequence (1/16).
pub const DEFAULT_DIVISOR: u8 = 12;

/// Largest divisor a sequence accepts (1/1).
pub const MAX_DIVISOR: i32 = 192;

/// Largest reset measure a sequence accepts.
pub const MAX_RESET_MEASURE: i32 = 128;

/// Rhythmic flavour of a known divisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DivisorKind {
    Straight,
    Triplet,
    Dotted,
}

/// A divisor with a note-value name, e.g. `12` ticks = `1/16`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KnownDivisor {
    pub divisor: u8,
    pub denominator: u8,
    pub kind: DivisorKind,
}

const fn known(divisor: u8, denominator: u8, kind: DivisorKind) -> KnownDivisor {
    KnownDivisor {
        divisor,
        denominator,
        kind,
    }
}

/// Known divisors at [`SEQUENCE_PPQN`], sorted ascending.
///
/// Covers 1/64T up to 1/1. Every entry is a whole number of ticks.
pub const KNOWN_DIVISORS: [KnownDivisor; 19] = [
    known(2, 64, DivisorKind::Triplet),
    known(3, 64, DivisorKind::Straight),
    known(4, 32, DivisorKind::Triplet),
    known(6, 32, DivisorKind::Straight),
    known(8, 16, DivisorKind::Triplet),
    known(9, 32, DivisorKind::Dotted),
    known(12, 16, DivisorKind::Straight),
    known(16, 8, DivisorKind::Triplet),
    known(18, 16, DivisorKind::Dotted),
    known(24, 8, DivisorKind::Straight),
    known(32, 4, DivisorKind::Triplet),
    known(36, 8, DivisorKind::Dotted),
    known(48, 4, DivisorKind::Straight),
    known(64, 2, DivisorKind::Triplet),
    known(72, 4, DivisorKind::Dotted),
    known(96, 2, DivisorKind::Straight),
    known(128, 1, DivisorKind::Triplet),
    known(144, 2, DivisorKind::Dotted),
    known(192, 1, DivisorKind::Straight),
];

/// Position of `divisor` in [`KNOWN_DIVISORS`].
pub fn divisor_to_index(divisor: i32) -> Option<usize> {
    KNOWN_DIVISORS
        .iter()
        .position(|known| i32::from(known.divisor) == divisor)
}

/// Divisor at `index` in [`KNOWN_DIVISORS`].
pub fn index_to_divisor(index: usize) -> Option<i32> {
    KNOWN_DIVISORS
        .get(index)
        .map(|known| i32::from(known.divisor))
}

/// Move `divisor` by `delta` entries of the known-divisor table.
///
/// With `shift` only straight divisors are visited, giving coarser jumps.
/// A divisor that is not in the table moves to the nearest entry in the
/// direction of travel. Movement stops at either end of the table.
pub fn adjusted_by_divisor(divisor: i32, delta: i32, shift: bool) -> i32 {
    let candidates = || {
        KNOWN_DIVISORS
            .iter()
            .filter(move |known| !shift || known.kind == DivisorKind::Straight)
            .map(|known| i32::from(known.divisor))
    };

    let mut value = divisor;
    for _ in 0..delta.unsigned_abs() {
        let next = if delta > 0 {
            candidates().find(|&d| d > value)
        } else {
            candidates().filter(|&d| d < value).last()
        };
        match next {
            Some(d) => value = d,
            None => break,
        }
    }
    value
}

/// Move `value` by `delta` powers of two (0, 1, 2, 4, …), or linearly by
/// `delta` when `shift` is held.
///
/// Values between powers of two move to the next power in the direction
/// of travel. The result is never negative.
pub fn adjusted_by_power_of_two(value: i32, delta: i32, shift: bool) -> i32 {
    if shift {
        return value.saturating_add(delta).max(0);
    }

    let mut value = value.max(0) as u32;
    for _ in 0..delta.unsigned_abs() {
        if delta > 0 {
            if value >= 1 << 30 {
                break;
            }
            value = (value + 1).next_power_of_two();
        } else {
            if value == 0 {
                break;
            }
            value = if value == 1 {
                0
            } else {
                1 << (31 - (value - 1).leading_zeros())
            };
        }
    }
    value as i32
}

/// Step an enum index by `delta`, wrapping around `count` variants.
pub fn adjusted_enum(index: usize, count: usize, delta: i32) -> usize {
    (index as i64 + i64::from(delta)).rem_euclid(count as i64) as usize
}

/// Rotate `steps` by one: towards higher indices for a positive
/// `direction`, towards lower ones for a negative one. Zero is a no-op.
pub fn shift_steps<T>(steps: &mut [T], direction: i32) {
    if direction > 0 {
        steps.rotate_right(1);
    } else if direction < 0 {
        steps.rotate_left(1);
    }
}

/// Repeat the steps of `range` into the steps after `range.last()`.
///
/// The copy stops at the end of `steps`; it never wraps to step 0. Steps
/// inside the range are left unchanged.
pub fn duplicate_steps<T: Copy, const N: usize>(steps: &mut [T], range: &StepRange<N>) {
    let first = range.first();
    let last = range.last();
    let len = range.step_count();
    for dst in last + 1..steps.len() {
        steps[dst] = steps[first + (dst - last - 1) % len];
    }
}

/// Write a divisor as a note value ("1/16", "1/8T", "1/4.") or, when it
/// has no name, as its tick count.
pub fn print_divisor<W: Write>(out: &mut W, divisor: i32) -> fmt::Result {
    match divisor_to_index(divisor) {
        Some(index) => {
            let known = KNOWN_DIVISORS[index];
            let suffix = match known.kind {
                DivisorKind::Straight => "",
                DivisorKind::Triplet => "T",
                DivisorKind::Dotted => ".",
            };
            write!(out, "1/{}{}", known.denominator, suffix)
        }
        None => write!(out, "{}", divisor),
    }
}
