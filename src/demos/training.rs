//! Demo 5: TensorFlow training loop.
//!
//! A mock training run advanced by an interval timer. Each tick is one
//! epoch; accuracy climbs along a saturating curve and loss decays
//! exponentially, both as functions of the fraction of epochs done.
//!
//! # Curves
//!
//! ```text
//! accuracy(e) = 0.5 + 0.45 · (e/E)^1.5
//! loss(e)     = 2.5 · exp(-3 · e/E)
//! ```
//!
//! The run is a small state machine: `Running` until the epoch counter
//! reaches `E`, then `Finished` with its timer cancelled. Stopping the
//! demo, resetting it or leaving its slide drops the run together with
//! its timer; starting again begins at epoch zero.

use super::{DemoKind, DemoRenderer, DemoState, SceneContext, SliderBounds, IS_PLAYING};
use crate::controls::ControlDescriptor;
use crate::engine::{DemoRng, IntervalTimer};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Bounds of the model complexity slider.
pub const MODEL_COMPLEXITY: SliderBounds = SliderBounds::new(1, 5, 1);

/// Bounds of the epoch slider.
pub const EPOCHS: SliderBounds = SliderBounds::new(5, 50, 5);

/// Accuracy before any learning.
pub const BASE_ACCURACY: f64 = 0.5;

/// Accuracy gained by the final epoch.
pub const MAX_IMPROVEMENT: f64 = 0.45;

/// Loss at epoch zero.
pub const INITIAL_LOSS: f64 = 2.5;

/// Exponential decay rate of the loss over the whole run.
pub const LOSS_DECAY: f64 = 3.0;

/// Accuracy after `epoch` of `total` epochs.
#[must_use]
pub fn accuracy_at(epoch: u32, total: u32) -> f64 {
    if total == 0 {
        return BASE_ACCURACY + MAX_IMPROVEMENT;
    }
    let progress = (f64::from(epoch) / f64::from(total)).clamp(0.0, 1.0);
    BASE_ACCURACY + MAX_IMPROVEMENT * progress.powf(1.5)
}

/// Loss after `epoch` of `total` epochs.
#[must_use]
pub fn loss_at(epoch: u32, total: u32) -> f64 {
    if total == 0 {
        return INITIAL_LOSS * (-LOSS_DECAY).exp();
    }
    let progress = (f64::from(epoch) / f64::from(total)).clamp(0.0, 1.0);
    INITIAL_LOSS * (-LOSS_DECAY * progress).exp()
}

/// Layer listing of a model with `complexity` hidden layers.
#[must_use]
pub fn model_summary(complexity: u32) -> Vec<String> {
    let mut layers = vec!["Input Layer (784 neurons)".to_string()];
    for i in 0..complexity {
        let neurons = 128u32.checked_shr(i).unwrap_or(0).max(1);
        layers.push(format!("Dense Layer ({neurons} neurons, ReLU activation)"));
        if i + 1 < complexity {
            layers.push("Dropout Layer (20%)".to_string());
        }
    }
    layers.push("Output Layer (10 neurons, Softmax activation)".to_string());
    layers
}

/// TensorFlow demo state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingState {
    /// Number of hidden layers.
    pub model_complexity: u32,
    /// Epochs to train.
    pub epochs: u32,
    /// Whether the loss chart is drawn.
    pub show_loss: bool,
    /// Whether training is running.
    pub is_playing: bool,
}

impl Default for TrainingState {
    fn default() -> Self {
        Self {
            model_complexity: 2,
            epochs: 10,
            show_loss: true,
            is_playing: false,
        }
    }
}

/// Lifecycle of a training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainingPhase {
    /// Timer armed, epochs remaining.
    Running,
    /// All epochs done, timer cancelled.
    Finished,
    /// Stopped before completion, timer cancelled.
    Cancelled,
}

/// Metrics recorded at the end of one epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// 1-based epoch number.
    pub epoch: u32,
    /// Training loss.
    pub loss: f64,
    /// Training accuracy in `[0, 1]`.
    pub accuracy: f64,
}

/// An in-flight or completed mock training run.
#[derive(Debug, Clone)]
pub struct TrainingRun {
    total_epochs: u32,
    epoch: u32,
    history: Vec<EpochMetrics>,
    layers: Vec<String>,
    timer: IntervalTimer,
    phase: TrainingPhase,
}

impl TrainingRun {
    /// Start a run for `state`, ticking every `interval`.
    #[must_use]
    pub fn start(state: &TrainingState, interval: Duration) -> Self {
        let mut run = Self {
            total_epochs: state.epochs,
            epoch: 0,
            history: Vec::with_capacity(state.epochs as usize),
            layers: model_summary(state.model_complexity),
            timer: IntervalTimer::started(interval),
            phase: TrainingPhase::Running,
        };
        if state.epochs == 0 {
            run.finish();
        }
        tracing::debug!(
            epochs = state.epochs,
            complexity = state.model_complexity,
            "training started"
        );
        run
    }

    /// Current epoch; equals the number of ticks applied.
    #[must_use]
    pub const fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Epochs this run trains for.
    #[must_use]
    pub const fn total_epochs(&self) -> u32 {
        self.total_epochs
    }

    /// Lifecycle phase.
    #[must_use]
    pub const fn phase(&self) -> TrainingPhase {
        self.phase
    }

    /// Whether the run's timer can still fire.
    #[must_use]
    pub const fn is_timer_armed(&self) -> bool {
        self.timer.is_armed()
    }

    /// Per-epoch metrics in order.
    #[must_use]
    pub fn history(&self) -> &[EpochMetrics] {
        &self.history
    }

    /// Layer listing of the model.
    #[must_use]
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Accuracy after the latest epoch, if any has run.
    #[must_use]
    pub fn accuracy(&self) -> Option<f64> {
        self.history.last().map(|m| m.accuracy)
    }

    /// Loss after the latest epoch, if any has run.
    #[must_use]
    pub fn loss(&self) -> Option<f64> {
        self.history.last().map(|m| m.loss)
    }

    /// Fraction of epochs completed.
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.total_epochs == 0 {
            1.0
        } else {
            f64::from(self.epoch) / f64::from(self.total_epochs)
        }
    }

    /// Apply one timer tick. Returns `false` once the run is no longer
    /// running.
    pub fn tick(&mut self) -> bool {
        if self.phase != TrainingPhase::Running {
            return false;
        }

        self.epoch += 1;
        self.history.push(EpochMetrics {
            epoch: self.epoch,
            loss: loss_at(self.epoch, self.total_epochs),
            accuracy: accuracy_at(self.epoch, self.total_epochs),
        });

        if self.epoch >= self.total_epochs {
            self.finish();
        }
        true
    }

    /// Feed elapsed time to the timer and apply every tick that became
    /// due. Returns the number of ticks applied.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        let due = self.timer.advance(elapsed);
        let mut applied = 0;
        for _ in 0..due {
            if !self.tick() {
                break;
            }
            applied += 1;
        }
        applied
    }

    /// Stop before completion.
    pub fn cancel(&mut self) {
        if self.phase == TrainingPhase::Running {
            self.timer.cancel();
            self.phase = TrainingPhase::Cancelled;
            tracing::debug!(epoch = self.epoch, "training cancelled");
        }
    }

    fn finish(&mut self) {
        self.timer.cancel();
        self.phase = TrainingPhase::Finished;
        tracing::debug!(epochs = self.total_epochs, "training finished");
    }
}

impl DemoState for TrainingState {
    const KIND: DemoKind = DemoKind::Training;

    type Trigger = (u32, u32);
    type Scene = TrainingRun;

    fn project(&self) -> Vec<ControlDescriptor> {
        vec![
            MODEL_COMPLEXITY.descriptor("modelComplexity", "Model complexity", self.model_complexity),
            EPOCHS.descriptor("epochs", "Training epochs", self.epochs),
            ControlDescriptor::toggle("showLoss", "Show loss chart", self.show_loss),
            ControlDescriptor::toggle(IS_PLAYING, "Train model", self.is_playing),
        ]
    }

    fn apply_control(&mut self, control: &ControlDescriptor) {
        match control.id.as_str() {
            "modelComplexity" => {
                if let Some(c) = MODEL_COMPLEXITY.read(control) {
                    self.model_complexity = c;
                }
            }
            "epochs" => {
                if let Some(e) = EPOCHS.read(control) {
                    self.epochs = e;
                }
            }
            "showLoss" => {
                if let Some(flag) = control.flag() {
                    self.show_loss = flag;
                }
            }
            IS_PLAYING => {
                if let Some(flag) = control.flag() {
                    self.is_playing = flag;
                }
            }
            _ => {}
        }
    }

    fn is_playing(&self) -> bool {
        self.is_playing
    }

    fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    fn trigger(&self) -> Self::Trigger {
        (self.model_complexity, self.epochs)
    }

    fn generate(&self, ctx: &SceneContext, _rng: &mut DemoRng) -> TrainingRun {
        TrainingRun::start(self, ctx.tick_interval)
    }
}

impl DemoRenderer<TrainingState> {
    /// Drive the active run's timer. Returns the number of epochs applied.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        self.scene_mut().map_or(0, |run| run.advance(elapsed))
    }

    /// Cancel the active run, if any, and drop it.
    pub fn stop(&mut self) {
        if let Some(run) = self.scene_mut() {
            run.cancel();
        }
        self.deactivate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: Duration = Duration::from_millis(500);

    fn ten_epochs() -> TrainingState {
        TrainingState {
            epochs: 10,
            is_playing: true,
            ..TrainingState::default()
        }
    }

    #[test]
    fn test_exactly_total_ticks() {
        let mut run = TrainingRun::start(&ten_epochs(), TICK);
        let mut ticks = 0;
        for k in 1..=10 {
            assert!(run.tick());
            ticks += 1;
            assert_eq!(run.epoch(), k);
        }
        assert_eq!(ticks, 10);
        assert_eq!(run.phase(), TrainingPhase::Finished);
        assert!(!run.is_timer_armed());
        assert!(!run.tick());
        assert_eq!(run.epoch(), 10);
    }

    #[test]
    fn test_timer_driven_completion() {
        let mut run = TrainingRun::start(&ten_epochs(), TICK);
        let mut applied = 0;
        for _ in 0..100 {
            applied += run.advance(Duration::from_millis(100));
        }
        assert_eq!(applied, 10);
        assert_eq!(run.history().len(), 10);
        assert_eq!(run.phase(), TrainingPhase::Finished);
    }

    #[test]
    fn test_one_large_frame_stops_at_total() {
        let mut run = TrainingRun::start(&ten_epochs(), TICK);
        assert_eq!(run.advance(Duration::from_secs(60)), 10);
        assert_eq!(run.epoch(), 10);
    }

    #[test]
    fn test_curves_monotonic_and_bounded() {
        let mut run = TrainingRun::start(&ten_epochs(), TICK);
        while run.tick() {}
        let history = run.history();
        for pair in history.windows(2) {
            assert!(pair[1].loss < pair[0].loss);
            assert!(pair[1].accuracy >= pair[0].accuracy);
        }
        for m in history {
            assert!((0.5..=0.95).contains(&m.accuracy));
        }
        assert!((run.accuracy().unwrap_or_default() - 0.95).abs() < 1e-12);
    }

    #[test]
    fn test_cancel_mid_run() {
        let mut run = TrainingRun::start(&ten_epochs(), TICK);
        assert_eq!(run.advance(TICK * 3), 3);
        run.cancel();
        assert_eq!(run.phase(), TrainingPhase::Cancelled);
        assert!(!run.is_timer_armed());
        assert_eq!(run.advance(Duration::from_secs(10)), 0);
        assert_eq!(run.epoch(), 3);
    }

    #[test]
    fn test_model_summary_layers() {
        assert_eq!(
            model_summary(2),
            vec![
                "Input Layer (784 neurons)",
                "Dense Layer (128 neurons, ReLU activation)",
                "Dropout Layer (20%)",
                "Dense Layer (64 neurons, ReLU activation)",
                "Output Layer (10 neurons, Softmax activation)",
            ]
        );
        let deep = model_summary(5);
        assert_eq!(deep.len(), 2 + 5 + 4);
        assert!(deep.contains(&"Dense Layer (8 neurons, ReLU activation)".to_string()));
    }

    #[test]
    fn test_accuracy_and_loss_endpoints() {
        assert!((accuracy_at(0, 10) - 0.5).abs() < 1e-12);
        assert!((accuracy_at(10, 10) - 0.95).abs() < 1e-12);
        assert!((loss_at(0, 10) - 2.5).abs() < 1e-12);
        assert!((loss_at(10, 10) - 2.5 * (-3.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_renderer_restart_from_zero() {
        let ctx = SceneContext {
            tick_interval: TICK,
            ..SceneContext::default()
        };
        let mut rng = DemoRng::new(0);
        let mut renderer = DemoRenderer::<TrainingState>::new();
        let mut state = ten_epochs();

        renderer.sync(&state, &ctx, &mut rng);
        assert_eq!(renderer.advance(TICK * 3), 3);

        state.is_playing = false;
        renderer.sync(&state, &ctx, &mut rng);
        assert!(renderer.scene().is_none());
        assert_eq!(renderer.advance(Duration::from_secs(30)), 0);

        state.is_playing = true;
        renderer.sync(&state, &ctx, &mut rng);
        assert_eq!(renderer.scene().map(TrainingRun::epoch), Some(0));
        assert_eq!(renderer.advance(TICK), 1);
    }

    #[test]
    fn test_epoch_change_restarts_run() {
        let ctx = SceneContext::default();
        let mut rng = DemoRng::new(0);
        let mut renderer = DemoRenderer::<TrainingState>::new();
        let state = ten_epochs();
        renderer.sync(&state, &ctx, &mut rng);
        renderer.advance(ctx.tick_interval * 4);

        let longer = state.apply(&[ControlDescriptor::slider("epochs", "", 20.0, 5.0, 50.0, 5.0)]);
        assert!(renderer.sync(&longer, &ctx, &mut rng));
        let run = renderer.scene().map(|r| (r.epoch(), r.total_epochs()));
        assert_eq!(run, Some((0, 20)));
    }

    #[test]
    fn test_show_loss_does_not_restart() {
        let ctx = SceneContext::default();
        let mut rng = DemoRng::new(0);
        let mut renderer = DemoRenderer::<TrainingState>::new();
        let state = ten_epochs();
        renderer.sync(&state, &ctx, &mut rng);
        renderer.advance(ctx.tick_interval * 2);

        let hidden = TrainingState {
            show_loss: false,
            ..state
        };
        assert!(!renderer.sync(&hidden, &ctx, &mut rng));
        assert_eq!(renderer.scene().map(TrainingRun::epoch), Some(2));
    }

    #[test]
    fn test_renderer_stop() {
        let ctx = SceneContext::default();
        let mut rng = DemoRng::new(0);
        let mut renderer = DemoRenderer::<TrainingState>::new();
        renderer.sync(&ten_epochs(), &ctx, &mut rng);
        renderer.stop();
        assert!(renderer.scene().is_none());
        assert_eq!(renderer.advance(Duration::from_secs(10)), 0);
    }
}
