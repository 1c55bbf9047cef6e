//! Step, layer and sequence records of a step sequencer track.
//!
//! This module provides the value types the sequencer engine plays back and
//! the UI edits: packed [`NoteStep`] / [`CurveStep`] records, the per-track
//! [`NoteSequence`] / [`CurveSequence`] containers and the track-level
//! [`Sequence`] that selects between them.
//!
//! # Architecture
//!
//! ```text
//! Sequence ── play mode, first/last step
//!    └─ TrackSequence
//!         ├─ Note(NoteSequence)   scale, root, divisor, reset, run mode, range
//!         │     └─ [NoteStep; N]  11 bit-packed layers in 48 bits
//!         └─ Curve(CurveSequence) divisor, reset, run mode, range
//!               └─ [CurveStep; N] shape, min, max in 21 bits
//! ```
//!
//! Every field has a fixed valid range. Setters clamp instead of failing,
//! so a stored or decoded record always holds in-range values no matter
//! what the caller or the byte stream supplied.
//!
//! # Layers
//!
//! A step is edited through its layers. [`NoteLayer`] and [`CurveLayer`]
//! enumerate them with a display name and an integer [`LayerRange`];
//! `layer_value` / `set_layer_value` give uniform integer access so the UI
//! can treat every layer alike.
//!
//! # Serialization
//!
//! Records write and read themselves through the [`serialize`] contexts as
//! fixed little-endian byte sequences. Reading passes every value through
//! the clamping setters, so corrupt data degrades to in-range values rather
//! than errors. Only a short stream or an unknown track index fails.
//!
//! # `no_std` Compatibility
//!
//! No heap allocation. Step arrays are sized by a const generic that
//! defaults to [`STEP_COUNT`]. The optional `defmt` feature enables
//! structured logging where input is silently normalized.

pub mod adjust;
pub mod bitfield;
pub mod bounded;
mod config;
mod curve_sequence;
mod error;
mod note_sequence;
mod note_step;
mod scale;
mod sequence;
pub mod serialize;
mod step_range;
mod types;

pub use config::SequenceDefaults;
pub use curve_sequence::{CurveLayer, CurveSequence, CurveShape, CurveStep, Level, CURVE_SHAPE_COUNT};
pub use error::SerializeError;
pub use note_sequence::NoteSequence;
pub use note_step::{
    layer_name, GateProbability, Length, LengthVariationProbability, LengthVariationRange, Note,
    NoteLayer, NoteStep, NoteVariationProbability, NoteVariationRange, Retrigger,
    RetriggerProbability,
};
pub use scale::{Scale, SCALE_COUNT};
pub use sequence::{Sequence, TrackSequence};
pub use serialize::{ReadContext, Reader, SliceReader, SliceWriter, TrackModes, WriteContext, Writer};
pub use step_range::StepRange;
pub use types::{note_name, print_note, LayerRange, PlayMode, RunMode, TrackMode};

/// Number of steps in a sequence.
pub const STEP_COUNT: usize = 16;
