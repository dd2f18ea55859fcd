//! The five library demos.
//!
//! Each demo is a plain state record plus a projection pair: `project`
//! turns the state into control descriptors, `apply` folds descriptors
//! back into a new state. Scene data (matrices, tables, chart series,
//! records, training curves) is regenerated from the state by
//! [`DemoRenderer`] only when one of the demo's explicit triggers
//! changes.
//!
//! # Demos
//!
//! 1. [`numeric_array`] - element-wise matrix math (NumPy)
//! 2. [`dataframe`] - tabular view with filtering (Pandas)
//! 3. [`chart`] - line/bar chart of trigonometric series (Matplotlib)
//! 4. [`web_admin`] - list/detail/admin pages (Django)
//! 5. [`training`] - timer-driven training curve (TensorFlow)

pub mod chart;
pub mod dataframe;
pub mod numeric_array;
pub mod training;
pub mod web_admin;

pub use chart::{ChartScene, ChartState, ChartType};
pub use dataframe::{DataFrameScene, DataFrameState, FilterMode};
pub use numeric_array::{ArrayScene, ArrayState, Operation};
pub use training::{TrainingPhase, TrainingRun, TrainingState};
pub use web_admin::{ViewType, WebAdminScene, WebAdminState};

use crate::controls::{snap_to_range, ControlDescriptor};
use crate::engine::DemoRng;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Id of the play/stop toggle shared by every demo.
pub const IS_PLAYING: &str = "isPlaying";

/// Identifies one demo domain. Slide `i` shows `DemoKind::ALL[i]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DemoKind {
    /// NumPy array math.
    NumericArray,
    /// Pandas data frame.
    DataFrame,
    /// Matplotlib chart.
    Chart,
    /// Django web admin.
    WebAdmin,
    /// TensorFlow training loop.
    Training,
}

impl DemoKind {
    /// All domains in slide order.
    pub const ALL: [Self; 5] = [
        Self::NumericArray,
        Self::DataFrame,
        Self::Chart,
        Self::WebAdmin,
        Self::Training,
    ];

    /// Domain shown on the given slide.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Slide index of this domain.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::NumericArray => 0,
            Self::DataFrame => 1,
            Self::Chart => 2,
            Self::WebAdmin => 3,
            Self::Training => 4,
        }
    }

    /// Name of the simulated library.
    #[must_use]
    pub const fn library(self) -> &'static str {
        match self {
            Self::NumericArray => "NumPy",
            Self::DataFrame => "Pandas",
            Self::Chart => "Matplotlib",
            Self::WebAdmin => "Django",
            Self::Training => "TensorFlow",
        }
    }
}

impl fmt::Display for DemoKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.library())
    }
}

/// Inputs to scene generation that come from configuration rather than
/// from the demo state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneContext {
    /// Date that mock records are dated back from.
    pub reference_date: NaiveDate,
    /// Interval between training epochs.
    pub tick_interval: Duration,
}

impl Default for SceneContext {
    fn default() -> Self {
        Self {
            reference_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default(),
            tick_interval: Duration::from_millis(500),
        }
    }
}

/// A demo's state record and its projection pair.
pub trait DemoState: Clone + PartialEq + Default + fmt::Debug {
    /// Domain this state belongs to.
    const KIND: DemoKind;

    /// Fields whose change regenerates the scene.
    type Trigger: Clone + PartialEq + fmt::Debug;

    /// Generated display data.
    type Scene: fmt::Debug;

    /// Project the state into its control descriptors. Same ids, same
    /// order, every call.
    fn project(&self) -> Vec<ControlDescriptor>;

    /// Fold one descriptor into the state. Unknown ids and values of the
    /// wrong kind are ignored.
    fn apply_control(&mut self, control: &ControlDescriptor);

    /// Fold a descriptor list over the state, returning the new state.
    #[must_use]
    fn apply(&self, controls: &[ControlDescriptor]) -> Self {
        let mut next = self.clone();
        for control in controls {
            next.apply_control(control);
        }
        next
    }

    /// Whether the demo is running.
    fn is_playing(&self) -> bool;

    /// Start or stop the demo.
    fn set_playing(&mut self, playing: bool);

    /// Current regeneration key. Display-only toggles are not part of it.
    fn trigger(&self) -> Self::Trigger;

    /// Build fresh scene data for this state.
    fn generate(&self, ctx: &SceneContext, rng: &mut DemoRng) -> Self::Scene;
}

/// Inclusive integer slider range with a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliderBounds {
    /// Lower bound.
    pub min: u32,
    /// Upper bound.
    pub max: u32,
    /// Step.
    pub step: u32,
}

impl SliderBounds {
    /// Create bounds.
    #[must_use]
    pub const fn new(min: u32, max: u32, step: u32) -> Self {
        Self { min, max, step }
    }

    /// Slider descriptor for `value` within these bounds.
    #[must_use]
    pub fn descriptor(&self, id: &str, label: &str, value: u32) -> ControlDescriptor {
        ControlDescriptor::slider(
            id,
            label,
            f64::from(value),
            f64::from(self.min),
            f64::from(self.max),
            f64::from(self.step),
        )
    }

    /// Read a slider descriptor, clamped and snapped to these bounds.
    #[must_use]
    pub fn read(&self, control: &ControlDescriptor) -> Option<u32> {
        let value = control.number()?;
        let snapped = snap_to_range(
            value,
            f64::from(self.min),
            f64::from(self.max),
            f64::from(self.step),
        )?;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        Some(snapped.round() as u32)
    }

    /// Whether `value` lies within these bounds on the step grid.
    #[must_use]
    pub const fn contains(&self, value: u32) -> bool {
        value >= self.min
            && value <= self.max
            && (self.step == 0 || (value - self.min) % self.step == 0)
    }
}

/// Caches a demo's scene and regenerates it on trigger changes.
#[derive(Debug)]
pub struct DemoRenderer<S: DemoState> {
    scene: Option<S::Scene>,
    trigger: Option<S::Trigger>,
}

impl<S: DemoState> Default for DemoRenderer<S> {
    fn default() -> Self {
        Self {
            scene: None,
            trigger: None,
        }
    }
}

impl<S: DemoState> DemoRenderer<S> {
    /// Create an idle renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the scene in line with `state`.
    ///
    /// A stopped demo has no scene. A running demo regenerates only when
    /// it was stopped before or its trigger changed. Returns whether a
    /// new scene was generated.
    pub fn sync(&mut self, state: &S, ctx: &SceneContext, rng: &mut DemoRng) -> bool {
        if !state.is_playing() {
            self.deactivate();
            return false;
        }

        let trigger = state.trigger();
        if self.trigger.as_ref() == Some(&trigger) {
            return false;
        }

        self.scene = Some(state.generate(ctx, rng));
        self.trigger = Some(trigger);
        tracing::debug!(demo = %S::KIND, "scene regenerated");
        true
    }

    /// Drop the scene, as when the demo stops or its slide is left.
    pub fn deactivate(&mut self) {
        self.scene = None;
        self.trigger = None;
    }

    /// Current scene, if the demo is running.
    #[must_use]
    pub const fn scene(&self) -> Option<&S::Scene> {
        self.scene.as_ref()
    }

    pub(crate) fn scene_mut(&mut self) -> Option<&mut S::Scene> {
        self.scene.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_index_roundtrip() {
        for (i, kind) in DemoKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
            assert_eq!(DemoKind::from_index(i), Some(*kind));
        }
        assert_eq!(DemoKind::from_index(5), None);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(DemoKind::Training.to_string(), "TensorFlow");
    }

    #[test]
    fn test_slider_bounds_read_clamps_and_snaps() {
        let bounds = SliderBounds::new(5, 50, 5);
        let read = |v: f64| bounds.read(&bounds.descriptor("epochs", "Epochs", 10).with_value(
            crate::controls::ControlValue::Number(v),
        ));
        assert_eq!(read(23.0), Some(25));
        assert_eq!(read(0.0), Some(5));
        assert_eq!(read(99.0), Some(50));
        assert_eq!(read(f64::NAN), None);
    }

    #[test]
    fn test_slider_bounds_read_rejects_toggle() {
        let bounds = SliderBounds::new(2, 10, 1);
        let toggle = ControlDescriptor::toggle("arraySize", "Array size", true);
        assert_eq!(bounds.read(&toggle), None);
    }

    #[test]
    fn test_slider_bounds_contains() {
        let bounds = SliderBounds::new(5, 50, 5);
        assert!(bounds.contains(5));
        assert!(bounds.contains(50));
        assert!(!bounds.contains(12));
        assert!(!bounds.contains(55));
    }

    #[test]
    fn test_slider_bounds_zero_step() {
        let bounds = SliderBounds::new(2, 8, 0);
        assert!(bounds.contains(2));
        assert!(bounds.contains(7));
        assert!(!bounds.contains(9));
        let slider = bounds.descriptor("size", "Size", 3).with_value(
            crate::controls::ControlValue::Number(6.4),
        );
        assert_eq!(bounds.read(&slider), Some(6));
    }

    #[test]
    fn test_renderer_lifecycle() {
        let ctx = SceneContext::default();
        let mut rng = DemoRng::new(1);
        let mut renderer = DemoRenderer::<ArrayState>::new();

        let stopped = ArrayState::default();
        assert!(!renderer.sync(&stopped, &ctx, &mut rng));
        assert!(renderer.scene().is_none());

        let playing = ArrayState {
            is_playing: true,
            ..ArrayState::default()
        };
        assert!(renderer.sync(&playing, &ctx, &mut rng));
        assert!(!renderer.sync(&playing, &ctx, &mut rng));

        let toggled_display = ArrayState {
            show_performance: !playing.show_performance,
            ..playing.clone()
        };
        assert!(!renderer.sync(&toggled_display, &ctx, &mut rng));

        let resized = ArrayState {
            array_size: 3,
            ..playing
        };
        assert!(renderer.sync(&resized, &ctx, &mut rng));
        assert_eq!(renderer.scene().map(|s| s.lhs.len()), Some(3));

        renderer.deactivate();
        assert!(renderer.scene().is_none());
    }
}
