//! # pyshowcase
//!
//! Interactive slide presentation of five Python libraries, each with a
//! mock demo driven by a panel of controls.
//!
//! - NumPy: element-wise matrix math
//! - Pandas: a filtered data frame
//! - Matplotlib: sine and cosine charts
//! - Django: list, detail and admin pages
//! - TensorFlow: a timer-driven training curve
//!
//! Every demo is a plain state record with a projection pair. `project`
//! turns the state into control descriptors; `apply` folds edited
//! descriptors back into a new state. The [`presentation::Presentation`]
//! controller routes control changes to the demo on the current slide.
//!
//! ## Example
//!
//! ```rust
//! use pyshowcase::prelude::*;
//!
//! let config = ShowcaseConfig::builder().seed(7).build();
//! let mut presentation = Presentation::from_config(&config)?;
//!
//! presentation.handle_control_change("arraySize", ControlValue::Number(3.0));
//! presentation.handle_control_change("isPlaying", ControlValue::Flag(true));
//! assert!(!presentation.scene().is_idle());
//! # Ok::<(), ShowcaseError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,
    clippy::missing_const_for_fn,  // Many functions can't be const in stable Rust
)]

pub mod cli;
pub mod config;
pub mod controls;
pub mod demos;
pub mod engine;
pub mod error;
pub mod presentation;
pub mod tui;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ShowcaseConfig, ShowcaseConfigBuilder};
    pub use crate::controls::{ControlDescriptor, ControlKind, ControlPanel, ControlValue};
    pub use crate::demos::{DemoKind, DemoRenderer, DemoState, SceneContext};
    pub use crate::engine::{DemoRng, IntervalTimer};
    pub use crate::error::{ShowcaseError, ShowcaseResult};
    pub use crate::presentation::{ActiveScene, Presentation, PresentationEvent, SlideDeck};
}

/// Re-export for public API
pub use error::{ShowcaseError, ShowcaseResult};
