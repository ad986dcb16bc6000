//! Spin engine for spindle - sequencing state machine and playback.
//!
//! This crate contains the [`SpinSession`] state machine and the motion
//! program player without any rendering dependencies. The presentation
//! layer observes spins through [`SpinObserver`] and reads angles back
//! from the session each frame.

mod config;
mod events;
mod player;
mod session;

pub use config::{ConfigLoadError, SpindleConfig};
pub use events::{EventQueue, NullObserver, SpinEvent, SpinObserver};
pub use player::ProgramPlayer;
pub use session::{Controls, SessionPhase, SpinError, SpinSession};

// Re-export the domain surface so the presentation layer needs one import.
pub use spindle_core::{
    ConfigError, GameRng, PointerPlan, SeededRng, SpinRng, SpinTuning, SpinnerPlan, plan_pointer,
    plan_spinner,
};
pub use spindle_types::{
    EasingKind, MotionProgram, Phase, RotationState, SliceBand, SliceError, SliceId, SliceMap,
    SpinRequest, SpinResult,
};
