//! Note step record and its layer dispatch.
//!
//! A [`NoteStep`] packs eleven parameters into one `u32` and one `u16`:
//!
//! ```text
//! data0 (u32)
//!  31  29 28     22 21     15 14  12 11   8 7   5 4   2  1  0
//! [nvp  ][  nvr    ][  note   ][ lvp ][lvr ][len][gp ][sl][g]
//!
//! data1 (u16)
//!  15        6 5   3 2   0
//! [ reserved  ][ rp ][ rt ]
//! ```
//!
//! The bit positions are part of the persisted format and must not move.
//! Numeric fields store `value - MIN`, so a zeroed step is the cleared
//! step: gates off, every parameter at its minimum.

use super::bitfield::{layout_is_valid, BitField};
use super::bounded::{BoundedValue, SignedValue, UnsignedValue};
use super::error::SerializeError;
use super::serialize::{ReadContext, WriteContext};
use super::types::LayerRange;

pub type GateProbability = UnsignedValue<3>;
pub type Retrigger = UnsignedValue<3>;
pub type RetriggerProbability = UnsignedValue<3>;
pub type Length = UnsignedValue<3>;
pub type LengthVariationRange = SignedValue<4>;
pub type LengthVariationProbability = UnsignedValue<3>;
pub type Note = SignedValue<7>;
pub type NoteVariationRange = SignedValue<7>;
pub type NoteVariationProbability = UnsignedValue<3>;

// data0
type GateField = BitField<0, 1>;
type SlideField = BitField<1, 1>;
type GateProbabilityField = BitField<2, 3>;
type LengthField = BitField<5, 3>;
type LengthVariationRangeField = BitField<8, 4>;
type LengthVariationProbabilityField = BitField<12, 3>;
type NoteField = BitField<15, 7>;
type NoteVariationRangeField = BitField<22, 7>;
type NoteVariationProbabilityField = BitField<29, 3>;

// data1, 10 bits left
type RetriggerField = BitField<0, 3>;
type RetriggerProbabilityField = BitField<3, 3>;

const DATA0_LAYOUT: [(u32, u32); 9] = [
    (0, 1),
    (1, 1),
    (2, GateProbability::BITS),
    (5, Length::BITS),
    (8, LengthVariationRange::BITS),
    (12, LengthVariationProbability::BITS),
    (15, Note::BITS),
    (22, NoteVariationRange::BITS),
    (29, NoteVariationProbability::BITS),
];

const DATA1_LAYOUT: [(u32, u32); 2] = [
    (0, Retrigger::BITS),
    (3, RetriggerProbability::BITS),
];

const _: () = assert!(layout_is_valid(&DATA0_LAYOUT, u32::BITS));
const _: () = assert!(layout_is_valid(&DATA1_LAYOUT, u16::BITS));

// ── Layers ───────────────────────────────────────────────────────────

/// Identifies one per-step parameter of a [`NoteStep`] for generic access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NoteLayer {
    Gate,
    GateProbability,
    Retrigger,
    RetriggerProbability,
    Length,
    LengthVariationRange,
    LengthVariationProbability,
    Note,
    NoteVariationRange,
    NoteVariationProbability,
    Slide,
}

impl NoteLayer {
    /// Number of layers.
    pub const COUNT: usize = 11;

    /// All layers in display order.
    pub const ALL: [NoteLayer; Self::COUNT] = [
        NoteLayer::Gate,
        NoteLayer::GateProbability,
        NoteLayer::Retrigger,
        NoteLayer::RetriggerProbability,
        NoteLayer::Length,
        NoteLayer::LengthVariationRange,
        NoteLayer::LengthVariationProbability,
        NoteLayer::Note,
        NoteLayer::NoteVariationRange,
        NoteLayer::NoteVariationProbability,
        NoteLayer::Slide,
    ];

    /// Returns `None` for `index >= COUNT`.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Stable display name. These strings may appear in saved presets.
    pub fn name(self) -> &'static str {
        match self {
            NoteLayer::Gate => "Gate",
            NoteLayer::GateProbability => "Gate Prob.",
            NoteLayer::Retrigger => "Retrigger",
            NoteLayer::RetriggerProbability => "Retrigger Prob.",
            NoteLayer::Length => "Length",
            NoteLayer::LengthVariationRange => "Length Var. Range",
            NoteLayer::LengthVariationProbability => "Length Var. Prob.",
            NoteLayer::Note => "Note",
            NoteLayer::NoteVariationRange => "Note Var. Range",
            NoteLayer::NoteVariationProbability => "Note Var. Prob.",
            NoteLayer::Slide => "Slide",
        }
    }

    /// Logical bounds of the layer's value. Boolean layers are `0..=1`.
    pub fn range(self) -> LayerRange {
        fn bounds<V: BoundedValue>() -> LayerRange {
            LayerRange::new(V::MIN, V::MAX)
        }

        match self {
            NoteLayer::Gate | NoteLayer::Slide => LayerRange::new(0, 1),
            NoteLayer::GateProbability => bounds::<GateProbability>(),
            NoteLayer::Retrigger => bounds::<Retrigger>(),
            NoteLayer::RetriggerProbability => bounds::<RetriggerProbability>(),
            NoteLayer::Length => bounds::<Length>(),
            NoteLayer::LengthVariationRange => bounds::<LengthVariationRange>(),
            NoteLayer::LengthVariationProbability => bounds::<LengthVariationProbability>(),
            NoteLayer::Note => bounds::<Note>(),
            NoteLayer::NoteVariationRange => bounds::<NoteVariationRange>(),
            NoteLayer::NoteVariationProbability => bounds::<NoteVariationProbability>(),
        }
    }
}

/// Display name for a numeric layer index, `None` past the last layer.
pub fn layer_name(index: usize) -> Option<&'static str> {
    NoteLayer::from_index(index).map(NoteLayer::name)
}

// ── Step ─────────────────────────────────────────────────────────────

/// One step of a note sequence, packed into six bytes.
///
/// Every setter clamps into the parameter's range; nothing here fails.
///
/// # Examples
///
/// ```
/// use stepwise::model::{NoteLayer, NoteStep};
///
/// let mut step = NoteStep::default();
/// step.set_note(100);
/// assert_eq!(step.note(), 63);
///
/// step.set_layer_value(NoteLayer::LengthVariationRange, -3);
/// assert_eq!(step.length_variation_range(), -3);
/// assert_eq!(step.layer_value(NoteLayer::Note), 63);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NoteStep {
    data0: u32,
    data1: u16,
}

impl NoteStep {
    /// Raw packed words `(data0, data1)`.
    pub fn raw(&self) -> (u32, u16) {
        (self.data0, self.data1)
    }

    // gate

    /// Whether the step triggers a note.
    pub fn gate(&self) -> bool {
        GateField::get(self.data0) != 0
    }

    /// Turn the gate on or off.
    pub fn set_gate(&mut self, gate: bool) {
        GateField::set(&mut self.data0, u32::from(gate));
    }

    /// Invert the gate.
    pub fn toggle_gate(&mut self) {
        self.set_gate(!self.gate());
    }

    // slide

    /// Whether the pitch glides into this step.
    pub fn slide(&self) -> bool {
        SlideField::get(self.data0) != 0
    }

    /// Turn the slide on or off.
    pub fn set_slide(&mut self, slide: bool) {
        SlideField::set(&mut self.data0, u32::from(slide));
    }

    /// Invert the slide.
    pub fn toggle_slide(&mut self) {
        self.set_slide(!self.slide());
    }

    // gate probability

    /// Chance the gate fires, `0..=7`.
    pub fn gate_probability(&self) -> i32 {
        GateProbability::decode(GateProbabilityField::get(self.data0))
    }

    /// Clamped to `0..=7`.
    pub fn set_gate_probability(&mut self, value: i32) {
        let raw = GateProbability::encode(GateProbability::clamped(value));
        GateProbabilityField::set(&mut self.data0, raw);
    }

    // retrigger

    /// Extra triggers within the step, `0..=7`.
    pub fn retrigger(&self) -> i32 {
        Retrigger::decode(RetriggerField::get(self.data1))
    }

    /// Clamped to `0..=7`.
    pub fn set_retrigger(&mut self, value: i32) {
        let raw = Retrigger::encode(Retrigger::clamped(value));
        RetriggerField::set(&mut self.data1, raw);
    }

    // retrigger probability

    /// Chance the retriggers fire, `0..=7`.
    pub fn retrigger_probability(&self) -> i32 {
        RetriggerProbability::decode(RetriggerProbabilityField::get(self.data1))
    }

    /// Clamped to `0..=7`.
    pub fn set_retrigger_probability(&mut self, value: i32) {
        let raw = RetriggerProbability::encode(RetriggerProbability::clamped(value));
        RetriggerProbabilityField::set(&mut self.data1, raw);
    }

    // length

    /// Gate length, `0..=7`.
    pub fn length(&self) -> i32 {
        Length::decode(LengthField::get(self.data0))
    }

    /// Clamped to `0..=7`.
    pub fn set_length(&mut self, value: i32) {
        let raw = Length::encode(Length::clamped(value));
        LengthField::set(&mut self.data0, raw);
    }

    // length variation range

    /// Random length offset bound, `-8..=7`.
    pub fn length_variation_range(&self) -> i32 {
        LengthVariationRange::decode(LengthVariationRangeField::get(self.data0))
    }

    /// Clamped to `-8..=7`.
    pub fn set_length_variation_range(&mut self, value: i32) {
        let raw = LengthVariationRange::encode(LengthVariationRange::clamped(value));
        LengthVariationRangeField::set(&mut self.data0, raw);
    }

    // length variation probability

    /// Chance the length varies, `0..=7`.
    pub fn length_variation_probability(&self) -> i32 {
        LengthVariationProbability::decode(LengthVariationProbabilityField::get(self.data0))
    }

    /// Clamped to `0..=7`.
    pub fn set_length_variation_probability(&mut self, value: i32) {
        let raw = LengthVariationProbability::encode(LengthVariationProbability::clamped(value));
        LengthVariationProbabilityField::set(&mut self.data0, raw);
    }

    // note

    /// Note as a semitone offset, `-64..=63`.
    pub fn note(&self) -> i32 {
        Note::decode(NoteField::get(self.data0))
    }

    /// Clamped to `-64..=63`.
    pub fn set_note(&mut self, value: i32) {
        let raw = Note::encode(Note::clamped(value));
        NoteField::set(&mut self.data0, raw);
    }

    // note variation range

    /// Random note offset bound, `-64..=63`.
    pub fn note_variation_range(&self) -> i32 {
        NoteVariationRange::decode(NoteVariationRangeField::get(self.data0))
    }

    /// Clamped to `-64..=63`.
    pub fn set_note_variation_range(&mut self, value: i32) {
        let raw = NoteVariationRange::encode(NoteVariationRange::clamped(value));
        NoteVariationRangeField::set(&mut self.data0, raw);
    }

    // note variation probability

    /// Chance the note varies, `0..=7`.
    pub fn note_variation_probability(&self) -> i32 {
        NoteVariationProbability::decode(NoteVariationProbabilityField::get(self.data0))
    }

    /// Clamped to `0..=7`.
    pub fn set_note_variation_probability(&mut self, value: i32) {
        let raw = NoteVariationProbability::encode(NoteVariationProbability::clamped(value));
        NoteVariationProbabilityField::set(&mut self.data0, raw);
    }

    // ── Generic layer access ─────────────────────────────────────────

    /// Value of `layer`; boolean layers read as `0` or `1`.
    pub fn layer_value(&self, layer: NoteLayer) -> i32 {
        match layer {
            NoteLayer::Gate => i32::from(self.gate()),
            NoteLayer::GateProbability => self.gate_probability(),
            NoteLayer::Retrigger => self.retrigger(),
            NoteLayer::RetriggerProbability => self.retrigger_probability(),
            NoteLayer::Length => self.length(),
            NoteLayer::LengthVariationRange => self.length_variation_range(),
            NoteLayer::LengthVariationProbability => self.length_variation_probability(),
            NoteLayer::Note => self.note(),
            NoteLayer::NoteVariationRange => self.note_variation_range(),
            NoteLayer::NoteVariationProbability => self.note_variation_probability(),
            NoteLayer::Slide => i32::from(self.slide()),
        }
    }

    /// Set `layer` through its typed setter, clamped to
    /// [`NoteLayer::range()`]. Boolean layers store `true` only for values
    /// at or above `1`.
    pub fn set_layer_value(&mut self, layer: NoteLayer, value: i32) {
        match layer {
            NoteLayer::Gate => self.set_gate(value > 0),
            NoteLayer::GateProbability => self.set_gate_probability(value),
            NoteLayer::Retrigger => self.set_retrigger(value),
            NoteLayer::RetriggerProbability => self.set_retrigger_probability(value),
            NoteLayer::Length => self.set_length(value),
            NoteLayer::LengthVariationRange => self.set_length_variation_range(value),
            NoteLayer::LengthVariationProbability => {
                self.set_length_variation_probability(value)
            }
            NoteLayer::Note => self.set_note(value),
            NoteLayer::NoteVariationRange => self.set_note_variation_range(value),
            NoteLayer::NoteVariationProbability => self.set_note_variation_probability(value),
            NoteLayer::Slide => self.set_slide(value > 0),
        }
    }

    /// Add `delta` to `layer`, clamped to [`NoteLayer::range()`].
    pub fn adjust_layer_value(&mut self, layer: NoteLayer, delta: i32) {
        let value = layer
            .range()
            .clamp(self.layer_value(layer).saturating_add(delta));
        self.set_layer_value(layer, value);
    }

    /// Reset to gates off and every parameter at its minimum.
    pub fn clear(&mut self) {
        self.data0 = 0;
        self.data1 = 0;
    }

    // ── Serialization ────────────────────────────────────────────────

    /// Writes `data0` then `data1`.
    pub fn write(&self, context: &mut WriteContext<'_>) -> Result<(), SerializeError> {
        context.write_u32(self.data0)?;
        context.write_u16(self.data1)
    }

    /// On error the step is left as it was.
    pub fn read(&mut self, context: &mut ReadContext<'_>) -> Result<(), SerializeError> {
        let data0 = context.read_u32()?;
        let data1 = context.read_u16()?;
        self.data0 = data0;
        self.data1 = data1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::serialize::{SliceReader, SliceWriter};
    use crate::model::types::TrackMode;

    const TRACKS: [TrackMode; 1] = [TrackMode::Note];

    fn step_with_all_fields_at_max() -> NoteStep {
        let mut step = NoteStep::default();
        for layer in NoteLayer::ALL {
            step.set_layer_value(layer, layer.range().max);
        }
        step
    }

    // ── Defaults ─────────────────────────────────────────────────────

    #[test]
    fn default_step_is_cleared() {
        let step = NoteStep::default();
        assert!(!step.gate());
        assert!(!step.slide());
        assert_eq!(step.raw(), (0, 0));
        for layer in NoteLayer::ALL {
            assert_eq!(step.layer_value(layer), layer.range().min, "{}", layer.name());
        }
    }

    #[test]
    fn clear_resets_every_field() {
        let mut step = step_with_all_fields_at_max();
        step.clear();
        assert_eq!(step, NoteStep::default());
        assert_eq!(step.note(), -64);
        assert_eq!(step.length_variation_range(), -8);
    }

    // ── Bit layout ───────────────────────────────────────────────────

    #[test]
    fn data0_bit_positions() {
        let mut step = NoteStep::default();
        step.set_gate(true);
        assert_eq!(step.raw().0, 1 << 0);

        let mut step = NoteStep::default();
        step.set_slide(true);
        assert_eq!(step.raw().0, 1 << 1);

        let mut step = NoteStep::default();
        step.set_gate_probability(7);
        assert_eq!(step.raw().0, 0b111 << 2);

        let mut step = NoteStep::default();
        step.set_length(7);
        assert_eq!(step.raw().0, 0b111 << 5);

        let mut step = NoteStep::default();
        step.set_length_variation_range(7);
        assert_eq!(step.raw().0, 0b1111 << 8);

        let mut step = NoteStep::default();
        step.set_length_variation_probability(7);
        assert_eq!(step.raw().0, 0b111 << 12);

        let mut step = NoteStep::default();
        step.set_note(63);
        assert_eq!(step.raw().0, 0x7F << 15);

        let mut step = NoteStep::default();
        step.set_note_variation_range(63);
        assert_eq!(step.raw().0, 0x7F << 22);

        let mut step = NoteStep::default();
        step.set_note_variation_probability(7);
        assert_eq!(step.raw().0, 0b111 << 29);
    }

    #[test]
    fn data1_bit_positions() {
        let mut step = NoteStep::default();
        step.set_retrigger(7);
        assert_eq!(step.raw(), (0, 0b111));

        let mut step = NoteStep::default();
        step.set_retrigger_probability(7);
        assert_eq!(step.raw(), (0, 0b111 << 3));
    }

    #[test]
    fn all_fields_at_max_fill_the_used_bits() {
        let step = step_with_all_fields_at_max();
        assert_eq!(step.raw(), (u32::MAX, 0b11_1111));
    }

    #[test]
    fn signed_fields_store_offset_values() {
        let mut step = NoteStep::default();
        step.set_note(0);
        assert_eq!(step.raw().0, 64 << 15);
        step.set_note(-64);
        assert_eq!(step.raw().0, 0);
    }

    #[test]
    fn setting_one_field_keeps_siblings() {
        let mut step = step_with_all_fields_at_max();
        step.set_note(-64);
        for layer in NoteLayer::ALL {
            let expected = if layer == NoteLayer::Note {
                -64
            } else {
                layer.range().max
            };
            assert_eq!(step.layer_value(layer), expected, "{}", layer.name());
        }
    }

    // ── Clamping ─────────────────────────────────────────────────────

    #[test]
    fn setters_clamp_to_nearest_bound() {
        for layer in NoteLayer::ALL {
            let range = layer.range();
            let mut step = NoteStep::default();

            step.set_layer_value(layer, range.max + 1);
            assert_eq!(step.layer_value(layer), range.max, "{}", layer.name());
            step.set_layer_value(layer, i32::MAX);
            assert_eq!(step.layer_value(layer), range.max, "{}", layer.name());

            step.set_layer_value(layer, range.min - 1);
            assert_eq!(step.layer_value(layer), range.min, "{}", layer.name());
            step.set_layer_value(layer, range.max);
            step.set_layer_value(layer, i32::MIN);
            assert_eq!(step.layer_value(layer), range.min, "{}", layer.name());
        }
    }

    #[test]
    fn typed_setters_clamp() {
        let mut step = NoteStep::default();
        step.set_length_variation_range(-20);
        assert_eq!(step.length_variation_range(), -8);
        step.set_note_variation_range(200);
        assert_eq!(step.note_variation_range(), 63);
        step.set_retrigger(-1);
        assert_eq!(step.retrigger(), 0);
        step.set_gate_probability(9);
        assert_eq!(step.gate_probability(), 7);
    }

    #[test]
    fn boolean_layers_clamp_like_numeric_ones() {
        let mut step = NoteStep::default();
        step.set_layer_value(NoteLayer::Gate, -1);
        step.set_layer_value(NoteLayer::Slide, -1);
        assert_eq!(
            (step.layer_value(NoteLayer::Gate), step.layer_value(NoteLayer::Slide)),
            (0, 0)
        );

        step.set_layer_value(NoteLayer::Gate, 1);
        step.set_layer_value(NoteLayer::Gate, -5);
        assert!(!step.gate());
        step.set_layer_value(NoteLayer::Slide, 2);
        assert!(step.slide());
        assert_eq!(step.layer_value(NoteLayer::Slide), 1);
    }

    // ── Toggles ──────────────────────────────────────────────────────

    #[test]
    fn toggles_flip_only_their_field() {
        let mut step = NoteStep::default();
        step.set_note(12);
        step.toggle_gate();
        assert!(step.gate());
        assert!(!step.slide());
        step.toggle_slide();
        step.toggle_gate();
        assert!(!step.gate());
        assert!(step.slide());
        assert_eq!(step.note(), 12);
    }

    // ── Layers ───────────────────────────────────────────────────────

    #[test]
    fn layer_round_trip_over_full_range() {
        for layer in NoteLayer::ALL {
            let range = layer.range();
            let mut step = NoteStep::default();
            for value in range.min..=range.max {
                step.set_layer_value(layer, value);
                assert_eq!(step.layer_value(layer), value, "{}", layer.name());
            }
        }
    }

    #[test]
    fn layer_dispatch_matches_typed_accessors() {
        let mut step = NoteStep::default();
        step.set_gate(true);
        step.set_gate_probability(1);
        step.set_retrigger(2);
        step.set_retrigger_probability(3);
        step.set_length(4);
        step.set_length_variation_range(-5);
        step.set_length_variation_probability(6);
        step.set_note(-7);
        step.set_note_variation_range(8);
        step.set_note_variation_probability(5);

        let expected = [1, 1, 2, 3, 4, -5, 6, -7, 8, 5, 0];
        for (layer, value) in NoteLayer::ALL.iter().zip(expected) {
            assert_eq!(step.layer_value(*layer), value, "{}", layer.name());
        }
    }

    #[test]
    fn layer_ranges() {
        assert_eq!(NoteLayer::Gate.range(), LayerRange::new(0, 1));
        assert_eq!(NoteLayer::Slide.range(), LayerRange::new(0, 1));
        assert_eq!(NoteLayer::Note.range(), LayerRange::new(-64, 63));
        assert_eq!(NoteLayer::NoteVariationRange.range(), LayerRange::new(-64, 63));
        assert_eq!(NoteLayer::LengthVariationRange.range(), LayerRange::new(-8, 7));
        assert_eq!(NoteLayer::Retrigger.range(), LayerRange::new(0, 7));
        assert_eq!(NoteLayer::GateProbability.range(), LayerRange::new(0, 7));
    }

    #[test]
    fn layer_names_are_stable() {
        let names = [
            "Gate",
            "Gate Prob.",
            "Retrigger",
            "Retrigger Prob.",
            "Length",
            "Length Var. Range",
            "Length Var. Prob.",
            "Note",
            "Note Var. Range",
            "Note Var. Prob.",
            "Slide",
        ];
        for (index, name) in names.iter().enumerate() {
            assert_eq!(layer_name(index), Some(*name));
        }
        assert_eq!(layer_name(NoteLayer::COUNT), None);
    }

    #[test]
    fn layer_indices_are_dense() {
        for (index, layer) in NoteLayer::ALL.iter().enumerate() {
            assert_eq!(layer.index(), index);
            assert_eq!(NoteLayer::from_index(index), Some(*layer));
        }
        assert_eq!(NoteLayer::from_index(NoteLayer::COUNT), None);
    }

    #[test]
    fn adjust_layer_value_clamps_to_range() {
        let mut step = NoteStep::default();
        step.adjust_layer_value(NoteLayer::Note, 70);
        assert_eq!(step.note(), 6);
        step.adjust_layer_value(NoteLayer::Note, 1000);
        assert_eq!(step.note(), 63);
        step.adjust_layer_value(NoteLayer::Gate, 3);
        assert!(step.gate());
        step.adjust_layer_value(NoteLayer::Gate, -1);
        assert!(!step.gate());
    }

    // ── Serialization ────────────────────────────────────────────────

    #[test]
    fn write_emits_raw_words() {
        let mut step = NoteStep::default();
        step.set_gate(true);
        step.set_retrigger(5);

        let mut buf = [0u8; 6];
        let mut writer = SliceWriter::new(&mut buf);
        step.write(&mut WriteContext::new(&mut writer, &TRACKS)).unwrap();
        assert_eq!(writer.written(), &[1, 0, 0, 0, 5, 0]);
    }

    #[test]
    fn write_read_round_trip() {
        let mut step = NoteStep::default();
        step.set_gate(true);
        step.set_slide(true);
        step.set_gate_probability(3);
        step.set_length(6);
        step.set_length_variation_range(-2);
        step.set_length_variation_probability(1);
        step.set_note(-30);
        step.set_note_variation_range(17);
        step.set_note_variation_probability(4);
        step.set_retrigger(2);
        step.set_retrigger_probability(7);

        let mut buf = [0u8; 6];
        let mut writer = SliceWriter::new(&mut buf);
        step.write(&mut WriteContext::new(&mut writer, &TRACKS)).unwrap();

        let mut restored = NoteStep::default();
        let mut reader = SliceReader::new(&buf);
        restored
            .read(&mut ReadContext::new(&mut reader, &TRACKS))
            .unwrap();
        assert_eq!(restored, step);
    }

    #[test]
    fn round_trip_holds_for_every_layer_value() {
        let bases = [NoteStep::default(), step_with_all_fields_at_max()];
        for base in bases {
            for layer in NoteLayer::ALL {
                let range = layer.range();
                for value in range.min..=range.max {
                    let mut step = base;
                    step.set_layer_value(layer, value);

                    let mut buf = [0u8; 6];
                    let mut writer = SliceWriter::new(&mut buf);
                    step.write(&mut WriteContext::new(&mut writer, &TRACKS))
                        .unwrap();

                    let mut restored = NoteStep::default();
                    let mut reader = SliceReader::new(&buf);
                    restored
                        .read(&mut ReadContext::new(&mut reader, &TRACKS))
                        .unwrap();
                    assert_eq!(restored, step, "{} = {}", layer.name(), value);
                    assert_eq!(restored.layer_value(layer), value);
                }
            }
        }
    }

    #[test]
    fn truncated_read_leaves_step_unchanged() {
        let data = [0xFFu8; 5];
        let mut reader = SliceReader::new(&data);
        let mut step = NoteStep::default();
        step.set_note(12);
        let before = step;
        assert_eq!(
            step.read(&mut ReadContext::new(&mut reader, &TRACKS)),
            Err(SerializeError::UnexpectedEnd)
        );
        assert_eq!(step, before);
    }
}
