//! Rotation scheduling for spindle.
//!
//! Given a winning slice and a duration, the two planners here compute the
//! needle's bounce program and the wheel's long rotation so that both end
//! at the same instant with the needle indicating the winning band. The
//! randomness the planners draw on sits behind [`SpinRng`] so scenario
//! tests can pin every draw.

mod easing;
mod pointer;
mod rng;
mod spinner;
mod tuning;

pub use easing::ease;
pub use pointer::{PointerPlan, plan_pointer};
pub use rng::{GameRng, SeededRng, SpinRng};
pub use spinner::{SpinnerPlan, plan_spinner};
pub use tuning::{ConfigError, SpinTuning};
