//! Curve track records: per-step CV shapes between a min and max level.
//!
//! ```text
//! data (u32)
//!  31      21 20     13 12      5 4     0
//! [ reserved ][  max   ][  min   ][shape]
//! ```

use core::fmt::{self, Write};

use super::adjust;
use super::bitfield::{layout_is_valid, BitField};
use super::bounded::{BoundedValue, UnsignedValue};
use super::error::SerializeError;
use super::serialize::{ReadContext, WriteContext};
use super::step_range::StepRange;
use super::types::{LayerRange, RunMode};
use super::STEP_COUNT;

/// Number of [`CurveShape`] variants.
pub const CURVE_SHAPE_COUNT: usize = 14;

/// Shape drawn across one curve step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CurveShape {
    #[default]
    Low,
    High,
    RampUp,
    RampDown,
    ExpUp,
    ExpDown,
    LogUp,
    LogDown,
    SmoothUp,
    SmoothDown,
    Triangle,
    Bell,
    StepUp,
    StepDown,
}

impl CurveShape {
    pub const ALL: [CurveShape; CURVE_SHAPE_COUNT] = [
        CurveShape::Low,
        CurveShape::High,
        CurveShape::RampUp,
        CurveShape::RampDown,
        CurveShape::ExpUp,
        CurveShape::ExpDown,
        CurveShape::LogUp,
        CurveShape::LogDown,
        CurveShape::SmoothUp,
        CurveShape::SmoothDown,
        CurveShape::Triangle,
        CurveShape::Bell,
        CurveShape::StepUp,
        CurveShape::StepDown,
    ];

    pub fn name(self) -> &'static str {
        match self {
            CurveShape::Low => "Low",
            CurveShape::High => "High",
            CurveShape::RampUp => "Ramp Up",
            CurveShape::RampDown => "Ramp Down",
            CurveShape::ExpUp => "Exp Up",
            CurveShape::ExpDown => "Exp Down",
            CurveShape::LogUp => "Log Up",
            CurveShape::LogDown => "Log Down",
            CurveShape::SmoothUp => "Smooth Up",
            CurveShape::SmoothDown => "Smooth Down",
            CurveShape::Triangle => "Triangle",
            CurveShape::Bell => "Bell",
            CurveShape::StepUp => "Step Up",
            CurveShape::StepDown => "Step Down",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Negative indices clamp to the first shape, large ones to the last.
    pub fn from_index_clamped(index: i32) -> Self {
        Self::ALL[index.clamp(0, CURVE_SHAPE_COUNT as i32 - 1) as usize]
    }
}

pub type Level = UnsignedValue<8>;

type ShapeField = BitField<0, 5>;
type MinField = BitField<5, 8>;
type MaxField = BitField<13, 8>;

const DATA_LAYOUT: [(u32, u32); 3] = [(0, 5), (5, Level::BITS), (13, Level::BITS)];

const _: () = assert!(layout_is_valid(&DATA_LAYOUT, u32::BITS));
const _: () = assert!(CURVE_SHAPE_COUNT as u32 <= ShapeField::MAX + 1);

// ── Layers ───────────────────────────────────────────────────────────

/// Identifies one per-step parameter of a [`CurveStep`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CurveLayer {
    Shape,
    Min,
    Max,
}

impl CurveLayer {
    pub const COUNT: usize = 3;

    pub const ALL: [CurveLayer; Self::COUNT] = [CurveLayer::Shape, CurveLayer::Min, CurveLayer::Max];

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            CurveLayer::Shape => "Shape",
            CurveLayer::Min => "Min",
            CurveLayer::Max => "Max",
        }
    }

    pub fn range(self) -> LayerRange {
        match self {
            CurveLayer::Shape => LayerRange::new(0, CURVE_SHAPE_COUNT as i32 - 1),
            CurveLayer::Min | CurveLayer::Max => LayerRange::new(Level::MIN, Level::MAX),
        }
    }
}

// ── Step ─────────────────────────────────────────────────────────────

/// One step of a curve sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurveStep {
    data: u32,
}

impl CurveStep {
    /// Raw packed word.
    pub fn raw(&self) -> u32 {
        self.data
    }

    pub fn shape(&self) -> CurveShape {
        CurveShape::from_index_clamped(ShapeField::get(self.data) as i32)
    }

    /// Shape drawn across the step.
    pub fn set_shape(&mut self, shape: CurveShape) {
        ShapeField::set(&mut self.data, shape.index() as u32);
    }

    /// Level at the low end of the shape, `0..=255`.
    pub fn min(&self) -> i32 {
        Level::decode(MinField::get(self.data))
    }

    /// Clamped to `0..=255`.
    pub fn set_min(&mut self, value: i32) {
        MinField::set(&mut self.data, Level::encode(Level::clamped(value)));
    }

    /// Level at the high end of the shape, `0..=255`.
    pub fn max(&self) -> i32 {
        Level::decode(MaxField::get(self.data))
    }

    /// Clamped to `0..=255`.
    pub fn set_max(&mut self, value: i32) {
        MaxField::set(&mut self.data, Level::encode(Level::clamped(value)));
    }

    /// Value of `layer`; the shape reads as its index.
    pub fn layer_value(&self, layer: CurveLayer) -> i32 {
        match layer {
            CurveLayer::Shape => self.shape().index() as i32,
            CurveLayer::Min => self.min(),
            CurveLayer::Max => self.max(),
        }
    }

    /// Set `layer`, clamped to [`CurveLayer::range()`].
    pub fn set_layer_value(&mut self, layer: CurveLayer, value: i32) {
        match layer {
            CurveLayer::Shape => self.set_shape(CurveShape::from_index_clamped(value)),
            CurveLayer::Min => self.set_min(value),
            CurveLayer::Max => self.set_max(value),
        }
    }

    /// Reset to a low shape with both levels at zero.
    pub fn clear(&mut self) {
        self.data = 0;
    }

    pub fn write(&self, context: &mut WriteContext<'_>) -> Result<(), SerializeError> {
        context.write_u32(self.data)
    }

    /// Shape values past the last variant are clamped to it.
    pub fn read(&mut self, context: &mut ReadContext<'_>) -> Result<(), SerializeError> {
        self.data = context.read_u32()?;
        self.set_shape(self.shape());
        Ok(())
    }
}

// ── Sequence ─────────────────────────────────────────────────────────

/// A curve track's steps plus their timing settings.
///
/// Editing behaves like [`NoteSequence`](super::NoteSequence).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CurveSequence<const N: usize = STEP_COUNT> {
    divisor: u8,
    reset_measure: u8,
    run_mode: RunMode,
    range: StepRange<N>,
    steps: [CurveStep; N],
}

impl<const N: usize> Default for CurveSequence<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CurveSequence<N> {
    /// A cleared sequence.
    pub fn new() -> Self {
        Self {
            divisor: adjust::DEFAULT_DIVISOR,
            reset_measure: 0,
            run_mode: RunMode::Forward,
            range: StepRange::new(),
            steps: [CurveStep::default(); N],
        }
    }

    /// Step duration in ticks of [`adjust::SEQUENCE_PPQN`].
    pub fn divisor(&self) -> i32 {
        i32::from(self.divisor)
    }

    /// Clamped to `1..=192`.
    pub fn set_divisor(&mut self, divisor: i32) {
        self.divisor = divisor.clamp(1, adjust::MAX_DIVISOR) as u8;
    }

    /// Steps through the known divisors, straight ones only with `shift`.
    pub fn edit_divisor(&mut self, delta: i32, shift: bool) {
        self.set_divisor(adjust::adjusted_by_divisor(self.divisor(), delta, shift));
    }

    pub fn print_divisor<W: Write>(&self, out: &mut W) -> fmt::Result {
        adjust::print_divisor(out, self.divisor())
    }

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

    pub fn steps(&self) -> &[CurveStep; N] {
        &self.steps
    }

    pub fn steps_mut(&mut self) -> &mut [CurveStep; N] {
        &mut self.steps
    }

    /// Reset every setting to its default and clear all steps.
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Clear all steps, keeping the sequence settings.
    pub fn clear_steps(&mut self) {
        for step in self.steps.iter_mut() {
            step.clear();
        }
    }

    /// See [`adjust::shift_steps`].
    pub fn shift_steps(&mut self, direction: i32) {
        adjust::shift_steps(&mut self.steps, direction);
    }

    /// See [`adjust::duplicate_steps`].
    pub fn duplicate_steps(&mut self) {
        adjust::duplicate_steps(&mut self.steps, &self.range);
    }

    pub fn write(&self, context: &mut WriteContext<'_>) -> Result<(), SerializeError> {
        context.write_u8(self.divisor)?;
        context.write_u8(self.reset_measure)?;
        context.write_u8(self.run_mode.index() as u8)?;
        self.range.write(context)?;
        for step in self.steps.iter() {
            step.write(context)?;
        }
        Ok(())
    }

    /// Values are passed through the clamping setters. On error the
    /// sequence is left as it was.
    pub fn read(&mut self, context: &mut ReadContext<'_>) -> Result<(), SerializeError> {
        let mut next = self.clone();
        next.read_fields(context)?;
        *self = next;
        Ok(())
    }

    fn read_fields(&mut self, context: &mut ReadContext<'_>) -> Result<(), SerializeError> {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::serialize::{SliceReader, SliceWriter};
    use crate::model::types::TrackMode;

    const TRACKS: [TrackMode; 1] = [TrackMode::Curve];

    #[test]
    fn cleared_step_is_low_at_zero() {
        let step = CurveStep::default();
        assert_eq!(step.shape(), CurveShape::Low);
        assert_eq!(step.min(), 0);
        assert_eq!(step.max(), 0);
    }

    #[test]
    fn fields_are_independent() {
        let mut step = CurveStep::default();
        step.set_shape(CurveShape::StepDown);
        step.set_min(255);
        step.set_max(17);
        assert_eq!(step.raw(), 13 | (255 << 5) | (17 << 13));
        step.set_min(0);
        assert_eq!(step.shape(), CurveShape::StepDown);
        assert_eq!(step.max(), 17);
    }

    #[test]
    fn layer_round_trip_and_clamping() {
        for layer in CurveLayer::ALL {
            let range = layer.range();
            let mut step = CurveStep::default();
            for value in range.min..=range.max {
                step.set_layer_value(layer, value);
                assert_eq!(step.layer_value(layer), value, "{}", layer.name());
            }
            step.set_layer_value(layer, range.max + 10);
            assert_eq!(step.layer_value(layer), range.max);
            step.set_layer_value(layer, range.min - 10);
            assert_eq!(step.layer_value(layer), range.min);
        }
    }

    #[test]
    fn shape_names_cover_every_variant() {
        for (index, shape) in CurveShape::ALL.iter().enumerate() {
            assert_eq!(shape.index(), index);
            assert!(!shape.name().is_empty());
        }
        assert_eq!(CurveLayer::from_index(3), None);
    }

    #[test]
    fn duplicate_and_shift_use_the_active_range() {
        let mut seq = CurveSequence::<6>::new();
        for (i, step) in seq.steps_mut().iter_mut().enumerate() {
            step.set_min(i as i32);
        }
        seq.set_last_step(2);
        seq.set_first_step(1);
        seq.duplicate_steps();
        let mins: [i32; 6] = core::array::from_fn(|i| seq.steps()[i].min());
        assert_eq!(mins, [0, 1, 2, 1, 2, 1]);
        assert_eq!((seq.first_step(), seq.last_step()), (1, 2));

        seq.steps_mut()[0].set_min(9);
        seq.shift_steps(1);
        assert_eq!(seq.steps()[1].min(), 9);
        seq.shift_steps(-1);
        assert_eq!(seq.steps()[0].min(), 9);
    }

    #[test]
    fn clear_restores_defaults() {
        let mut seq = CurveSequence::<4>::new();
        seq.set_divisor(48);
        seq.edit_run_mode(1, false);
        seq.steps_mut()[2].set_max(200);
        seq.clear();
        assert_eq!(seq, CurveSequence::<4>::new());
    }

    #[test]
    fn write_read_round_trip() {
        let mut seq = CurveSequence::<4>::new();
        seq.set_divisor(96);
        seq.set_reset_measure(2);
        seq.set_run_mode(RunMode::Backward);
        seq.set_first_step(1);
        for (i, step) in seq.steps_mut().iter_mut().enumerate() {
            step.set_shape(CurveShape::ALL[i * 3]);
            step.set_min(i as i32 * 20);
            step.set_max(255 - i as i32);
        }

        let mut buf = [0u8; 5 + 4 * 4];
        let mut writer = SliceWriter::new(&mut buf);
        seq.write(&mut WriteContext::new(&mut writer, &TRACKS)).unwrap();

        let mut restored = CurveSequence::<4>::new();
        let mut reader = SliceReader::new(&buf);
        restored
            .read(&mut ReadContext::new(&mut reader, &TRACKS))
            .unwrap();
        assert_eq!(restored, seq);
    }

    #[test]
    fn truncated_read_leaves_sequence_unchanged() {
        let mut source = CurveSequence::<4>::new();
        source.set_divisor(96);
        source.steps_mut()[3].set_max(99);
        let mut buf = [0u8; 5 + 4 * 4];
        let mut writer = SliceWriter::new(&mut buf);
        source.write(&mut WriteContext::new(&mut writer, &TRACKS)).unwrap();

        let mut seq = CurveSequence::<4>::new();
        seq.steps_mut()[0].set_shape(CurveShape::Bell);
        let before = seq.clone();
        for cut in [2, 5, 9, buf.len() - 1] {
            let mut reader = SliceReader::new(&buf[..cut]);
            assert_eq!(
                seq.read(&mut ReadContext::new(&mut reader, &TRACKS)),
                Err(SerializeError::UnexpectedEnd)
            );
            assert_eq!(seq, before);
        }
    }

    #[test]
    fn read_clamps_unknown_shape() {
        let data = (31u32 | (7 << 5)).to_le_bytes();
        let mut reader = SliceReader::new(&data);
        let mut step = CurveStep::default();
        step.read(&mut ReadContext::new(&mut reader, &TRACKS))
            .unwrap();
        assert_eq!(step.shape(), CurveShape::StepDown);
        assert_eq!(step.raw() & 0x1F, 13);
        assert_eq!(step.min(), 7);
    }

    #[test]
    fn print_helpers() {
        let mut seq = CurveSequence::<4>::new();
        let mut s: heapless::String<32> = heapless::String::new();
        seq.print_divisor(&mut s).unwrap();
        seq.print_reset_measure(&mut s).unwrap();
        seq.edit_reset_measure(2, false);
        seq.print_reset_measure(&mut s).unwrap();
        seq.print_run_mode(&mut s).unwrap();
        assert_eq!(s.as_str(), "1/16off2Forward");
    }
}
