//! Runtime support shared by every demo.
//!
//! - Deterministic RNG (PCG) for mock scene data
//! - Interval timer for the animated training demo

pub mod rng;
pub mod timer;

pub use rng::DemoRng;
pub use timer::IntervalTimer;
