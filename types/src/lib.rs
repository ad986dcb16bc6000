//! Core domain types for spindle.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application: the slice map that partitions the wheel, the motion
//! phases/programs the schedulers emit, and the rotation state carried
//! between spins.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory

mod motion;
mod slices;
mod spin;

pub use motion::{EasingKind, MotionProgram, Phase};
pub use slices::{SLICE_COUNT, SliceBand, SliceError, SliceId, SliceMap};
pub use spin::{RotationState, SpinRequest, SpinResult};
