//! Step sequencer data model.
//!
//! See [`model`] for the step, layer and sequence records and their
//! serialization contract.
//!
//! # Crate Features
//!
//! - **`defmt`**: structured logging and `defmt::Format` derives for
//!   embedded targets.

#![no_std]

pub mod model;
