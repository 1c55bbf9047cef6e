use core::fmt::{self, Write};

use super::adjust;
use super::config::SequenceDefaults;
use super::error::SerializeError;
use super::note_step::NoteStep;
use super::scale::{Scale, SCALE_COUNT};
use super::serialize::{ReadContext, WriteContext};
use super::step_range::StepRange;
use super::types::{self, RunMode};
use super::STEP_COUNT;

/// A note track's steps plus the settings that shape their playback.
///
/// `scale` and `root_note` use `-1` for "follow the project default"; the
/// defaults themselves are passed in by the caller as a
/// [`SequenceDefaults`] when resolving them.
///
/// Every `edit_*(delta, shift)` helper mirrors an encoder turn and every
/// `print_*` helper renders the UI string. Neither can move a field out of
/// its range.
///
/// # Examples
///
/// ```
/// use stepwise::model::{NoteSequence, SequenceDefaults};
///
/// let mut seq: NoteSequence<8> = NoteSequence::new();
/// seq.set_gates(&[true, false, true]);
/// seq.set_last_step(1);
/// seq.duplicate_steps();
/// assert!(seq.steps()[4].gate());
///
/// let defaults = SequenceDefaults::new(1, 2);
/// assert_eq!(seq.selected_scale(&defaults).name(), "Major");
/// assert_eq!(seq.selected_root_note(&defaults), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoteSequence<const N: usize = STEP_COUNT> {
    scale: i8,
    root_note: i8,
    divisor: u8,
    reset_measure: u8,
    run_mode: RunMode,
    range: StepRange<N>,
    steps: [NoteStep; N],
}

impl<const N: usize> Default for NoteSequence<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> NoteSequence<N> {
    /// A cleared sequence.
    pub fn new() -> Self {
        Self {
            scale: -1,
            root_note: -1,
            divisor: adjust::DEFAULT_DIVISOR,
            reset_measure: 0,
            run_mode: RunMode::Forward,
            range: StepRange::new(),
            steps: [NoteStep::default(); N],
        }
    }

    // ── scale ────────────────────────────────────────────────────────

    /// Scale index, or `-1` for the project default.
    pub fn scale(&self) -> i32 {
        i32::from(self.scale)
    }

    /// Clamped to `-1..SCALE_COUNT`.
    pub fn set_scale(&mut self, scale: i32) {
        self.scale = scale.clamp(-1, SCALE_COUNT as i32 - 1) as i8;
    }

    pub fn edit_scale(&mut self, delta: i32, _shift: bool) {
        self.set_scale(self.scale().saturating_add(delta));
    }

    /// Scale name, or "Default" when unset.
    pub fn print_scale<W: Write>(&self, out: &mut W) -> fmt::Result {
        if self.scale < 0 {
            out.write_str("Default")
        } else {
            out.write_str(Scale::get(self.scale as usize).name())
        }
    }

    /// The sequence's scale, or the project default when unset.
    pub fn selected_scale(&self, defaults: &SequenceDefaults) -> &'static Scale {
        if self.scale < 0 {
            defaults.selected_scale()
        } else {
            Scale::get(self.scale as usize)
        }
    }

    // ── root note ────────────────────────────────────────────────────

    /// Root pitch class `0..=11`, or `-1` for the project default.
    pub fn root_note(&self) -> i32 {
        i32::from(self.root_note)
    }

    /// Clamped to `-1..=11`.
    pub fn set_root_note(&mut self, root_note: i32) {
        self.root_note = root_note.clamp(-1, 11) as i8;
    }

    pub fn edit_root_note(&mut self, delta: i32, _shift: bool) {
        self.set_root_note(self.root_note().saturating_add(delta));
    }

    pub fn print_root_note<W: Write>(&self, out: &mut W) -> fmt::Result {
        if self.root_note < 0 {
            out.write_str("Default")
        } else {
            types::print_note(out, self.root_note())
        }
    }

    /// The sequence's root note, or the project default when unset.
    pub fn selected_root_note(&self, defaults: &SequenceDefaults) -> i32 {
        if self.root_note < 0 {
            defaults.root_note()
        } else {
            self.root_note()
        }
    }

    // ── divisor ──────────────────────────────────────────────────────

    /// Step duration in ticks of [`adjust::SEQUENCE_PPQN`].
    pub fn divisor(&self) -> i32 {
        i32::from(self.divisor)
    }

    /// Clamped to `1..=192`.
    pub fn set_divisor(&mut self, divisor: i32) {
        self.divisor = divisor.clamp(1, adjust::MAX_DIVISOR) as u8;
    }

    /// Position of the divisor in [`adjust::KNOWN_DIVISORS`], if it has one.
    pub fn indexed_divisor(&self) -> Option<usize> {
        adjust::divisor_to_index(self.divisor())
    }

    /// Ignored when `index` is past the end of the table.
    pub fn set_indexed_divisor(&mut self, index: usize) {
        if let Some(divisor) = adjust::index_to_divisor(index) {
            self.set_divisor(divisor);
        }
    }

    /// Steps through the known divisors, straight ones only with `shift`.
    pub fn edit_divisor(&mut self, delta: i32, shift: bool) {
        self.set_divisor(adjust::adjusted_by_divisor(self.divisor(), delta, shift));
    }

    pub fn print_divisor<W: Write>(&self, out: &mut W) -> fmt::Result {
        adjust::print_divisor(out, self.divisor())
    }

    // ── reset measure ────────────────────────────────────────────────

    /// Measures until playback returns to the first step, `0` = off.
    pub fn reset_measure(&self) -> i32 {
        i32::from(self.reset_measure)
    }

    /// Clamped to `0..=128`.
    pub fn set_reset_measure(&mut self, reset_measure: i32) {
        self.reset_measure = reset_measure.clamp(0, adjust::MAX_RESET_MEASURE) as u8;
    }

    /// Powers of two, linear with `shift`.
    pub fn edit_reset_measure(&mut self, delta: i32, shift: bool) {
        self.set_reset_measure(adjust::adjusted_by_power_of_two(
            self.reset_measure(),
            delta,
            shift,
        ));
    }

    pub fn print_reset_measure<W: Write>(&self, out: &mut W) -> fmt::Result {
        if self.reset_measure == 0 {
            out.write_str("off")
        } else {
            write!(out, "{}", self.reset_measure)
        }
    }

    // ── run mode ─────────────────────────────────────────────────────

    pub fn run_mode(&self) -> RunMode {
        self.run_mode
    }

    pub fn set_run_mode(&mut self, run_mode: RunMode) {
        self.run_mode = run_mode;
    }

    /// Cycles through [`RunMode::ALL`] with wraparound.
    pub fn edit_run_mode(&mut self, delta: i32, _shift: bool) {
        let index = adjust::adjusted_enum(self.run_mode.index(), RunMode::COUNT, delta);
        self.set_run_mode(RunMode::ALL[index]);
    }

    pub fn print_run_mode<W: Write>(&self, out: &mut W) -> fmt::Result {
        out.write_str(self.run_mode.name())
    }

    // ── first / last step ────────────────────────────────────────────

    pub fn first_step(&self) -> usize {
        self.range.first()
    }

    /// Clamped to `0..=last_step`.
    pub fn set_first_step(&mut self, first_step: i32) {
        self.range.set_first(first_step);
    }

    pub fn edit_first_step(&mut self, delta: i32, shift: bool) {
        self.range.edit_first(delta, shift);
    }

    pub fn print_first_step<W: Write>(&self, out: &mut W) -> fmt::Result {
        self.range.print_first(out)
    }

    pub fn last_step(&self) -> usize {
        self.range.last()
    }

    /// Clamped to `first_step..=N - 1`.
    pub fn set_last_step(&mut self, last_step: i32) {
        self.range.set_last(last_step);
    }

    pub fn edit_last_step(&mut self, delta: i32, shift: bool) {
        self.range.edit_last(delta, shift);
    }

    pub fn print_last_step<W: Write>(&self, out: &mut W) -> fmt::Result {
        self.range.print_last(out)
    }

    // ── steps ────────────────────────────────────────────────────────

    pub fn steps(&self) -> &[NoteStep; N] {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut [NoteStep; N] {
        &mut self.steps
    }

    /// Returns `None` if `index >= N`.
    pub fn step(&self, index: usize) -> Option<&NoteStep> {
        self.steps.get(index)
    }

    /// Returns `None` if `index >= N`.
    pub fn step_mut(&mut self, index: usize) -> Option<&mut NoteStep> {
        self.steps.get_mut(index)
    }

    // ── Structural operations ────────────────────────────────────────

    /// Reset every setting to its default and clear all steps.
    pub fn clear(&mut self) {
        self.set_scale(-1);
        self.set_root_note(-1);
        self.set_divisor(i32::from(adjust::DEFAULT_DIVISOR));
        self.set_reset_measure(0);
        self.set_run_mode(RunMode::Forward);
        self.range = StepRange::new();
        self.clear_steps();
    }

    /// Clear all steps, keeping the sequence settings.
    pub fn clear_steps(&mut self) {
        for step in self.steps.iter_mut() {
            step.clear();
        }
    }

    /// Set the gates of the leading steps, one value per step. Steps past
    /// the end of `gates` are left untouched; values past `N` are dropped.
    pub fn set_gates(&mut self, gates: &[bool]) {
        if gates.len() > N {
            #[cfg(feature = "defmt")]
            defmt::warn!("set_gates: {} values for {} steps", gates.len(), N);
        }
        for (step, &gate) in self.steps.iter_mut().zip(gates) {
            step.set_gate(gate);
        }
    }

    /// Set the notes of the leading steps, one value per step. Steps past
    /// the end of `notes` are left untouched; values past `N` are dropped.
    pub fn set_notes(&mut self, notes: &[i32]) {
        if notes.len() > N {
            #[cfg(feature = "defmt")]
            defmt::warn!("set_notes: {} values for {} steps", notes.len(), N);
        }
        for (step, &note) in self.steps.iter_mut().zip(notes) {
            step.set_note(note);
        }
    }

    /// Rotate the whole step array by one: towards higher indices for a
    /// positive `direction`, towards lower ones for a negative one.
    pub fn shift_steps(&mut self, direction: i32) {
        adjust::shift_steps(&mut self.steps, direction);
    }

    /// Repeat the active `first..=last` steps into the steps after `last`.
    ///
    /// The copy stops at the end of the array; it never wraps to step 0.
    /// The active range itself is unchanged.
    pub fn duplicate_steps(&mut self) {
        adjust::duplicate_steps(&mut self.steps, &self.range);
    }

    // ── Serialization ────────────────────────────────────────────────

    pub fn write(&self, context: &mut WriteContext<'_>) -> Result<(), SerializeError> {
        context.write_i8(self.scale)?;
        context.write_i8(self.root_note)?;
        context.write_u8(self.divisor)?;
        context.write_u8(self.reset_measure)?;
        context.write_u8(self.run_mode.index() as u8)?;
        self.range.write(context)?;
        for step in self.steps.iter() {
            step.write(context)?;
        }
        Ok(())
    }

    /// Values are passed through the clamping setters as they are read.
    ///
    /// On error the sequence is left as it was.
    pub fn read(&mut self, context: &mut ReadContext<'_>) -> Result<(), SerializeError> {
        let mut next = self.clone();
        next.read_fields(context)?;
        *self = next;
        Ok(())
    }

    fn read_fields(&mut self, context: &mut ReadContext<'_>) -> Result<(), SerializeError> {
        self.set_scale(i32::from(context.read_i8()?));
        self.set_root_note(i32::from(context.read_i8()?));
        self.set_divisor(i32::from(context.read_u8()?));
        self.set_reset_measure(i32::from(context.read_u8()?));
        self.set_run_mode(RunMode::from_index_clamped(usize::from(context.read_u8()?)));
        self.range.read(context)?;
        for step in self.steps.iter_mut() {
            step.read(context)?;
        }
        Ok(())
    }
}
