use core::fmt::{self, Write};

use super::adjust;
use super::curve_sequence::CurveSequence;
use super::error::SerializeError;
use super::note_sequence::NoteSequence;
use super::serialize::{ReadContext, WriteContext};
use super::step_range::StepRange;
use super::types::{PlayMode, TrackMode};
use super::STEP_COUNT;

/// Step data of a track, matching the track's [`TrackMode`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TrackSequence<const N: usize = STEP_COUNT> {
    Note(NoteSequence<N>),
    Curve(CurveSequence<N>),
}

impl<const N: usize> TrackSequence<N> {
    /// A cleared record for `mode`.
    pub fn new(mode: TrackMode) -> Self {
        match mode {
            TrackMode::Note => TrackSequence::Note(NoteSequence::new()),
            TrackMode::Curve => TrackSequence::Curve(CurveSequence::new()),
        }
    }

    pub fn mode(&self) -> TrackMode {
        match self {
            TrackSequence::Note(_) => TrackMode::Note,
            TrackSequence::Curve(_) => TrackMode::Curve,
        }
    }
}

/// A track's sequence slot: play mode, sequence-level step window and the
/// mode-specific step data.
///
/// Persisted as `play_mode`, `first_step`, `last_step`, followed by the
/// step data for whatever mode the project reports for the track.
///
/// # Examples
///
/// ```
/// use stepwise::model::serialize::{ReadContext, SliceReader, SliceWriter, WriteContext};
/// use stepwise::model::{Sequence, TrackMode};
///
/// let tracks = [TrackMode::Note, TrackMode::Curve];
///
/// let mut seq: Sequence<4> = Sequence::new(TrackMode::Curve);
/// seq.set_last_step(2);
///
/// let mut buf = [0u8; 64];
/// let mut writer = SliceWriter::new(&mut buf);
/// seq.write(&mut WriteContext::new(&mut writer, &tracks), 1).unwrap();
/// let len = writer.written().len();
///
/// let mut restored: Sequence<4> = Sequence::new(TrackMode::Note);
/// let mut reader = SliceReader::new(&buf[..len]);
/// restored.read(&mut ReadContext::new(&mut reader, &tracks), 1).unwrap();
/// assert_eq!(restored, seq);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sequence<const N: usize = STEP_COUNT> {
    play_mode: PlayMode,
    range: StepRange<N>,
    data: TrackSequence<N>,
}

impl<const N: usize> Default for Sequence<N> {
    fn default() -> Self {
        Self::new(TrackMode::default())
    }
}

impl<const N: usize> Sequence<N> {
    /// Aligned play mode, full step range and cleared step data for `mode`.
    pub fn new(mode: TrackMode) -> Self {
        Self {
            play_mode: PlayMode::default(),
            range: StepRange::new(),
            data: TrackSequence::new(mode),
        }
    }

    // ── play mode ────────────────────────────────────────────────────

    pub fn play_mode(&self) -> PlayMode {
        self.play_mode
    }

    pub fn set_play_mode(&mut self, play_mode: PlayMode) {
        self.play_mode = play_mode;
    }

    /// Cycles through [`PlayMode::ALL`] with wraparound.
    pub fn edit_play_mode(&mut self, delta: i32, _shift: bool) {
        let index = adjust::adjusted_enum(self.play_mode.index(), PlayMode::COUNT, delta);
        self.set_play_mode(PlayMode::ALL[index]);
    }

    pub fn print_play_mode<W: Write>(&self, out: &mut W) -> fmt::Result {
        out.write_str(self.play_mode.name())
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

    /// One-based.
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

    /// One-based.
    pub fn print_last_step<W: Write>(&self, out: &mut W) -> fmt::Result {
        self.range.print_last(out)
    }

    // ── step data ────────────────────────────────────────────────────

    /// Mode of the held step data.
    pub fn track_mode(&self) -> TrackMode {
        self.data.mode()
    }

    /// Switch the step data to `mode`. Existing data is discarded only
    /// when the mode actually changes.
    pub fn set_track_mode(&mut self, mode: TrackMode) {
        if self.data.mode() != mode {
            self.data = TrackSequence::new(mode);
        }
    }

    pub fn data(&self) -> &TrackSequence<N> {
        &self.data
    }

    /// The note step data, `None` in curve mode.
    pub fn note(&self) -> Option<&NoteSequence<N>> {
        match &self.data {
            TrackSequence::Note(seq) => Some(seq),
            TrackSequence::Curve(_) => None,
        }
    }

    pub fn note_mut(&mut self) -> Option<&mut NoteSequence<N>> {
        match &mut self.data {
            TrackSequence::Note(seq) => Some(seq),
            TrackSequence::Curve(_) => None,
        }
    }

    /// The curve step data, `None` in note mode.
    pub fn curve(&self) -> Option<&CurveSequence<N>> {
        match &self.data {
            TrackSequence::Curve(seq) => Some(seq),
            TrackSequence::Note(_) => None,
        }
    }

    pub fn curve_mut(&mut self) -> Option<&mut CurveSequence<N>> {
        match &mut self.data {
            TrackSequence::Curve(seq) => Some(seq),
            TrackSequence::Note(_) => None,
        }
    }

    /// Reset play mode and step window, and clear the step data in its
    /// current mode.
    pub fn clear(&mut self) {
        self.play_mode = PlayMode::default();
        self.range = StepRange::new();
        match &mut self.data {
            TrackSequence::Note(seq) => seq.clear(),
            TrackSequence::Curve(seq) => seq.clear(),
        }
    }

    // ── Serialization ────────────────────────────────────────────────

    /// Write this sequence as the sequence of `track`.
    ///
    /// Fails with [`SerializeError::TrackModeMismatch`] if the project's
    /// mode for `track` differs from the held step data.
    pub fn write(&self, context: &mut WriteContext<'_>, track: usize) -> Result<(), SerializeError> {
        let mode = context.track_mode(track)?;
        if mode != self.data.mode() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Sequence::write: track {} is {} but sequence holds {}",
                track,
                mode,
                self.data.mode()
            );
            return Err(SerializeError::TrackModeMismatch);
        }

        context.write_u8(self.play_mode.index() as u8)?;
        self.range.write(context)?;
        match &self.data {
            TrackSequence::Note(seq) => seq.write(context),
            TrackSequence::Curve(seq) => seq.write(context),
        }
    }

    /// Read the sequence of `track`, switching the step data to the mode
    /// the project reports for it.
    ///
    /// On error the sequence, including its step data and mode, is left as
    /// it was.
    pub fn read(&mut self, context: &mut ReadContext<'_>, track: usize) -> Result<(), SerializeError> {
        let mode = context.track_mode(track)?;
        let mut next = self.clone();
        next.read_fields(context, mode)?;
        *self = next;
        Ok(())
    }

    fn read_fields(&mut self, context: &mut ReadContext<'_>, mode: TrackMode) -> Result<(), SerializeError> {
        self.play_mode = PlayMode::from_index_clamped(usize::from(context.read_u8()?));
        self.range.read(context)?;

        self.set_track_mode(mode);
        match &mut self.data {
            TrackSequence::Note(seq) => seq.read(context),
            TrackSequence::Curve(seq) => seq.read(context),
        }
    }
}
