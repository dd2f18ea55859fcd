//! Presentation controller.
//!
//! Owns the slide deck, the five demo states with their renderers, and
//! the current slide index. Control changes are routed to the demo on
//! the current slide only; switching slides tears down the outgoing
//! demo's scene (cancelling a running training timer) and syncs the
//! incoming one.

pub mod slides;

pub use slides::{CodeSnippet, Slide, SlideDeck};

use crate::config::ShowcaseConfig;
use crate::controls::{update_controls, ControlDescriptor, ControlValue};
use crate::demos::{
    ArrayScene, ArrayState, ChartScene, ChartState, DataFrameScene, DataFrameState, DemoKind,
    DemoRenderer, DemoState, SceneContext, TrainingRun, TrainingState, WebAdminScene,
    WebAdminState,
};
use crate::engine::DemoRng;
use crate::error::ShowcaseResult;
use std::time::Duration;

/// Input the controller understands.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentationEvent {
    /// A control on the active panel changed.
    ControlChanged {
        /// Control id.
        id: String,
        /// New value.
        value: ControlValue,
    },
    /// Go to the next slide.
    Next,
    /// Go to the previous slide.
    Previous,
    /// Go to a specific slide.
    GoTo(usize),
    /// Restore the active demo's defaults.
    Reset,
}

/// One demo's state together with its renderer.
#[derive(Debug)]
struct Slot<S: DemoState> {
    state: S,
    renderer: DemoRenderer<S>,
}

impl<S: DemoState> Default for Slot<S> {
    fn default() -> Self {
        Self {
            state: S::default(),
            renderer: DemoRenderer::new(),
        }
    }
}

impl<S: DemoState> Slot<S> {
    fn apply(&mut self, controls: &[ControlDescriptor], ctx: &SceneContext, rng: &mut DemoRng) {
        let next = self.state.apply(controls);
        if next != self.state {
            tracing::debug!(demo = %S::KIND, from = ?self.state, to = ?next, "state replaced");
            self.state = next;
        }
        self.renderer.sync(&self.state, ctx, rng);
    }

    fn reset(&mut self, stops_playback: bool, ctx: &SceneContext, rng: &mut DemoRng) {
        let mut fresh = S::default();
        if !stops_playback {
            fresh.set_playing(self.state.is_playing());
        }
        self.renderer.deactivate();
        self.state = fresh;
        self.renderer.sync(&self.state, ctx, rng);
        tracing::info!(demo = %S::KIND, playing = self.state.is_playing(), "controls reset");
    }

    fn activate(&mut self, ctx: &SceneContext, rng: &mut DemoRng) {
        self.renderer.sync(&self.state, ctx, rng);
    }

    fn deactivate(&mut self) {
        self.renderer.deactivate();
    }
}

/// The five demo slots, one per [`DemoKind`].
#[derive(Debug, Default)]
struct Slots {
    numeric_array: Slot<ArrayState>,
    dataframe: Slot<DataFrameState>,
    chart: Slot<ChartState>,
    web_admin: Slot<WebAdminState>,
    training: Slot<TrainingState>,
}

/// Runs `$body` with `$slot` bound to the slot of `$kind`.
macro_rules! with_slot {
    ($slots:expr, $kind:expr, $slot:ident => $body:expr) => {
        match $kind {
            DemoKind::NumericArray => {
                let $slot = &mut $slots.numeric_array;
                $body
            }
            DemoKind::DataFrame => {
                let $slot = &mut $slots.dataframe;
                $body
            }
            DemoKind::Chart => {
                let $slot = &mut $slots.chart;
                $body
            }
            DemoKind::WebAdmin => {
                let $slot = &mut $slots.web_admin;
                $body
            }
            DemoKind::Training => {
                let $slot = &mut $slots.training;
                $body
            }
        }
    };
}

/// Borrowed view of the active demo for rendering.
#[derive(Debug, Clone, Copy)]
pub enum ActiveScene<'a> {
    /// NumPy demo.
    NumericArray {
        /// Current state.
        state: &'a ArrayState,
        /// Generated data, if running.
        scene: Option<&'a ArrayScene>,
    },
    /// Pandas demo.
    DataFrame {
        /// Current state.
        state: &'a DataFrameState,
        /// Generated data, if running.
        scene: Option<&'a DataFrameScene>,
    },
    /// Matplotlib demo.
    Chart {
        /// Current state.
        state: &'a ChartState,
        /// Generated data, if running.
        scene: Option<&'a ChartScene>,
    },
    /// Django demo.
    WebAdmin {
        /// Current state.
        state: &'a WebAdminState,
        /// Generated data, if running.
        scene: Option<&'a WebAdminScene>,
    },
    /// TensorFlow demo.
    Training {
        /// Current state.
        state: &'a TrainingState,
        /// Training run, if running.
        run: Option<&'a TrainingRun>,
    },
}

impl ActiveScene<'_> {
    /// Domain of the scene.
    #[must_use]
    pub const fn kind(&self) -> DemoKind {
        match self {
            Self::NumericArray { .. } => DemoKind::NumericArray,
            Self::DataFrame { .. } => DemoKind::DataFrame,
            Self::Chart { .. } => DemoKind::Chart,
            Self::WebAdmin { .. } => DemoKind::WebAdmin,
            Self::Training { .. } => DemoKind::Training,
        }
    }

    /// Whether the demo is idle and should show its placeholder.
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        match self {
            Self::NumericArray { scene, .. } => scene.is_none(),
            Self::DataFrame { scene, .. } => scene.is_none(),
            Self::Chart { scene, .. } => scene.is_none(),
            Self::WebAdmin { scene, .. } => scene.is_none(),
            Self::Training { run, .. } => run.is_none(),
        }
    }
}

/// Slide deck, demo states and the current slide.
#[derive(Debug)]
pub struct Presentation {
    deck: SlideDeck,
    current: usize,
    slots: Slots,
    rng: DemoRng,
    ctx: SceneContext,
    reset_stops_playback: bool,
}

impl Presentation {
    /// Create a presentation over `deck`.
    ///
    /// The start slide is clamped to the deck.
    #[must_use]
    pub fn new(deck: SlideDeck, config: &ShowcaseConfig) -> Self {
        let last = deck.len().saturating_sub(1);
        let mut presentation = Self {
            current: config.presentation.start_slide.min(last),
            deck,
            slots: Slots::default(),
            rng: DemoRng::new(config.seed),
            ctx: config.scene_context(),
            reset_stops_playback: config.presentation.reset_stops_playback,
        };
        presentation.activate_current();
        presentation
    }

    /// Create a presentation with the deck named by `config`, or the
    /// embedded deck.
    ///
    /// # Errors
    ///
    /// Returns error if the deck cannot be loaded or is invalid.
    pub fn from_config(config: &ShowcaseConfig) -> ShowcaseResult<Self> {
        let deck = match &config.content.slides_path {
            Some(path) => SlideDeck::load(path)?,
            None => SlideDeck::embedded()?,
        };
        Ok(Self::new(deck, config))
    }

    /// Zero-based index of the current slide.
    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current
    }

    /// Number of slides.
    #[must_use]
    pub fn total_slides(&self) -> usize {
        self.deck.len()
    }

    /// Whether the current slide is the first.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.current == 0
    }

    /// Whether the current slide is the last.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.current + 1 >= self.total_slides()
    }

    /// Content of the current slide.
    #[must_use]
    pub fn current_slide(&self) -> &Slide {
        &self.deck.slides()[self.current]
    }

    /// Domain shown on the current slide.
    #[must_use]
    pub fn active_kind(&self) -> DemoKind {
        DemoKind::from_index(self.current).unwrap_or(DemoKind::NumericArray)
    }

    /// Go to the next slide. Returns whether the slide changed.
    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    /// Go to the previous slide. Returns whether the slide changed.
    pub fn previous(&mut self) -> bool {
        match self.current.checked_sub(1) {
            Some(index) => self.go_to(index),
            None => false,
        }
    }

    /// Go to `index`. Out-of-range indices and the current index are
    /// no-ops. Returns whether the slide changed.
    pub fn go_to(&mut self, index: usize) -> bool {
        if index >= self.total_slides() || index == self.current {
            return false;
        }

        let outgoing = self.active_kind();
        if outgoing == DemoKind::Training {
            self.slots.training.renderer.stop();
        } else {
            with_slot!(self.slots, outgoing, slot => slot.deactivate());
        }
        self.current = index;
        self.activate_current();

        tracing::info!(slide = index, demo = %self.active_kind(), "slide changed");
        true
    }

    fn activate_current(&mut self) {
        let kind = self.active_kind();
        with_slot!(self.slots, kind, slot => slot.activate(&self.ctx, &mut self.rng));
    }

    /// Control descriptors of the active demo.
    #[must_use]
    pub fn controls(&self) -> Vec<ControlDescriptor> {
        match self.active_kind() {
            DemoKind::NumericArray => self.slots.numeric_array.state.project(),
            DemoKind::DataFrame => self.slots.dataframe.state.project(),
            DemoKind::Chart => self.slots.chart.state.project(),
            DemoKind::WebAdmin => self.slots.web_admin.state.project(),
            DemoKind::Training => self.slots.training.state.project(),
        }
    }

    /// Apply a descriptor list to the active demo.
    pub fn apply_controls(&mut self, controls: &[ControlDescriptor]) {
        let kind = self.active_kind();
        with_slot!(self.slots, kind, slot => slot.apply(controls, &self.ctx, &mut self.rng));
    }

    /// Apply one `(id, value)` change from the control panel to the
    /// active demo.
    pub fn handle_control_change(&mut self, id: &str, value: ControlValue) {
        tracing::debug!(demo = %self.active_kind(), id, ?value, "control changed");
        let updated = update_controls(&self.controls(), id, value);
        self.apply_controls(&updated);
    }

    /// Restore the active demo's defaults. A running training timer is
    /// always cancelled; whether the demo keeps playing afterwards is
    /// configured by `reset_stops_playback`.
    pub fn reset_controls(&mut self) {
        let kind = self.active_kind();
        let stops = self.reset_stops_playback;
        with_slot!(self.slots, kind, slot => slot.reset(stops, &self.ctx, &mut self.rng));
    }

    /// Handle one input event.
    pub fn handle_event(&mut self, event: PresentationEvent) {
        match event {
            PresentationEvent::ControlChanged { id, value } => {
                self.handle_control_change(&id, value);
            }
            PresentationEvent::Next => {
                self.next();
            }
            PresentationEvent::Previous => {
                self.previous();
            }
            PresentationEvent::GoTo(index) => {
                self.go_to(index);
            }
            PresentationEvent::Reset => self.reset_controls(),
        }
    }

    /// Feed elapsed wall time to the active demo's timer. Only a running
    /// training demo reacts. Returns the number of epochs applied.
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        if self.active_kind() == DemoKind::Training {
            self.slots.training.renderer.advance(elapsed)
        } else {
            0
        }
    }

    /// Active demo's state and generated data.
    #[must_use]
    pub fn scene(&self) -> ActiveScene<'_> {
        match self.active_kind() {
            DemoKind::NumericArray => ActiveScene::NumericArray {
                state: &self.slots.numeric_array.state,
                scene: self.slots.numeric_array.renderer.scene(),
            },
            DemoKind::DataFrame => ActiveScene::DataFrame {
                state: &self.slots.dataframe.state,
                scene: self.slots.dataframe.renderer.scene(),
            },
            DemoKind::Chart => ActiveScene::Chart {
                state: &self.slots.chart.state,
                scene: self.slots.chart.renderer.scene(),
            },
            DemoKind::WebAdmin => ActiveScene::WebAdmin {
                state: &self.slots.web_admin.state,
                scene: self.slots.web_admin.renderer.scene(),
            },
            DemoKind::Training => ActiveScene::Training {
                state: &self.slots.training.state,
                run: self.slots.training.renderer.scene(),
            },
        }
    }

    /// NumPy demo state.
    #[must_use]
    pub const fn array_state(&self) -> &ArrayState {
        &self.slots.numeric_array.state
    }

    /// Pandas demo state.
    #[must_use]
    pub const fn dataframe_state(&self) -> &DataFrameState {
        &self.slots.dataframe.state
    }

    /// Matplotlib demo state.
    #[must_use]
    pub const fn chart_state(&self) -> &ChartState {
        &self.slots.chart.state
    }

    /// Django demo state.
    #[must_use]
    pub const fn web_admin_state(&self) -> &WebAdminState {
        &self.slots.web_admin.state
    }

    /// TensorFlow demo state.
    #[must_use]
    pub const fn training_state(&self) -> &TrainingState {
        &self.slots.training.state
    }

    /// Training run, if one is live. Only the active training slide
    /// ever holds one.
    #[must_use]
    pub fn training_run(&self) -> Option<&TrainingRun> {
        self.slots.training.renderer.scene()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::demos::{Operation, TrainingPhase};

    const TICK: Duration = Duration::from_millis(500);

    fn presentation() -> Presentation {
        Presentation::from_config(&ShowcaseConfig::default()).expect("embedded deck")
    }

    fn play(p: &mut Presentation) {
        p.handle_control_change("isPlaying", ControlValue::Flag(true));
    }

    #[test]
    fn test_initial_state() {
        let p = presentation();
        assert_eq!(p.current_index(), 0);
        assert_eq!(p.total_slides(), 5);
        assert!(p.is_first());
        assert!(!p.is_last());
        assert_eq!(p.active_kind(), DemoKind::NumericArray);
        assert_eq!(p.current_slide().title, "NumPy");
        assert!(p.scene().is_idle());
    }

    #[test]
    fn test_navigation_clamped() {
        let mut p = presentation();
        assert!(!p.previous());
        assert_eq!(p.current_index(), 0);

        for expected in 1..5 {
            assert!(p.next());
            assert_eq!(p.current_index(), expected);
        }
        assert!(p.is_last());
        assert!(!p.next());
        assert_eq!(p.current_index(), 4);

        assert!(p.previous());
        assert_eq!(p.current_index(), 3);
    }

    #[test]
    fn test_go_to() {
        let mut p = presentation();
        assert!(p.go_to(3));
        assert_eq!(p.active_kind(), DemoKind::WebAdmin);
        assert!(!p.go_to(3));
        assert!(!p.go_to(5));
        assert_eq!(p.current_index(), 3);
    }

    #[test]
    fn test_start_slide_from_config() {
        let config = ShowcaseConfig::builder().start_slide(4).build();
        let p = Presentation::from_config(&config).expect("deck");
        assert_eq!(p.active_kind(), DemoKind::Training);
    }

    #[test]
    fn test_dispatch_only_to_active() {
        let mut p = presentation();
        p.handle_control_change("operation", ControlValue::Flag(true));
        assert_eq!(p.array_state().operation, Operation::Multiplication);

        p.next();
        // "operation" is not a DataFrame control; nothing changes anywhere.
        p.handle_control_change("operation", ControlValue::Flag(false));
        assert_eq!(p.array_state().operation, Operation::Multiplication);
        assert_eq!(p.dataframe_state(), &DataFrameState::default());

        play(&mut p);
        assert!(p.dataframe_state().is_playing);
        assert!(!p.array_state().is_playing);
    }

    #[test]
    fn test_foreign_list_reaches_only_shared_ids() {
        let mut p = presentation();
        p.handle_control_change("arraySize", ControlValue::Number(9.0));
        p.handle_control_change("operation", ControlValue::Flag(true));
        let array_controls = p.controls();

        p.next();
        p.apply_controls(&array_controls);
        assert_eq!(p.dataframe_state(), &DataFrameState::default());

        let playing = update_controls(&array_controls, "isPlaying", ControlValue::Flag(true));
        p.apply_controls(&playing);
        assert_eq!(
            p.dataframe_state(),
            &DataFrameState {
                is_playing: true,
                ..DataFrameState::default()
            }
        );
        assert!(!p.array_state().is_playing);
        assert_eq!(p.array_state().array_size, 9);
    }

    #[test]
    fn test_deck_built_through_serde_is_checked() {
        assert!(serde_yaml::from_str::<SlideDeck>("slides: []").is_err());

        let yaml = serde_yaml::to_string(&SlideDeck::embedded().expect("embedded deck"))
            .expect("serialize deck");
        let deck: SlideDeck = serde_yaml::from_str(&yaml).expect("five slides");
        let config = ShowcaseConfig::builder().start_slide(4).build();
        let p = Presentation::new(deck, &config);
        assert_eq!(p.current_slide().title, "TensorFlow");
    }

    #[test]
    fn test_slider_change_is_clamped() {
        let mut p = presentation();
        p.handle_control_change("arraySize", ControlValue::Number(42.0));
        assert_eq!(p.array_state().array_size, 10);
    }

    #[test]
    fn test_play_generates_scene() {
        let mut p = presentation();
        play(&mut p);
        match p.scene() {
            ActiveScene::NumericArray { scene: Some(scene), state } => {
                assert_eq!(scene.result.len(), state.array_size as usize);
            }
            other => panic!("unexpected scene {other:?}"),
        }
    }

    #[test]
    fn test_training_runs_only_while_active() {
        let mut p = presentation();
        assert_eq!(p.advance(TICK * 4), 0);

        p.go_to(4);
        play(&mut p);
        assert_eq!(p.advance(TICK * 3), 3);

        // Leaving the slide drops the run and its timer.
        p.previous();
        assert!(p.training_run().is_none());
        assert_eq!(p.advance(TICK * 10), 0);

        // Coming back restarts from epoch zero because the state still plays.
        p.next();
        assert!(p.training_state().is_playing);
        assert_eq!(p.training_run().map(TrainingRun::epoch), Some(0));
        assert_eq!(p.advance(TICK * 20), 10);
        assert_eq!(
            p.training_run().map(TrainingRun::phase),
            Some(TrainingPhase::Finished)
        );
    }

    #[test]
    fn test_stop_mid_run_then_restart() {
        let mut p = presentation();
        p.go_to(4);
        play(&mut p);
        assert_eq!(p.advance(TICK * 3), 3);

        p.handle_control_change("isPlaying", ControlValue::Flag(false));
        assert_eq!(p.advance(TICK * 10), 0);
        assert!(p.training_run().is_none());

        play(&mut p);
        assert_eq!(p.training_run().map(TrainingRun::epoch), Some(0));
        assert_eq!(p.advance(TICK), 1);
    }

    #[test]
    fn test_reset_stops_playback_by_default() {
        let mut p = presentation();
        p.handle_control_change("arraySize", ControlValue::Number(3.0));
        play(&mut p);
        p.reset_controls();
        assert_eq!(p.array_state(), &ArrayState::default());
        assert!(p.scene().is_idle());
    }

    #[test]
    fn test_reset_can_keep_playing() {
        let config = ShowcaseConfig::builder().reset_stops_playback(false).build();
        let mut p = Presentation::from_config(&config).expect("deck");
        p.go_to(4);
        p.handle_control_change("epochs", ControlValue::Number(20.0));
        play(&mut p);
        p.advance(TICK * 5);

        p.reset_controls();
        let state = p.training_state();
        assert_eq!(state.epochs, 10);
        assert!(state.is_playing);
        // The old timer is gone; a fresh run starts at epoch zero.
        assert_eq!(p.training_run().map(TrainingRun::epoch), Some(0));
        assert_eq!(p.training_run().map(TrainingRun::total_epochs), Some(10));
    }

    #[test]
    fn test_handle_events() {
        let mut p = presentation();
        p.handle_event(PresentationEvent::Next);
        p.handle_event(PresentationEvent::ControlChanged {
            id: "filterColumn".to_string(),
            value: ControlValue::Flag(true),
        });
        assert!(p.dataframe_state().filter.is_alternate());
        p.handle_event(PresentationEvent::Reset);
        assert!(!p.dataframe_state().filter.is_alternate());
        p.handle_event(PresentationEvent::GoTo(4));
        assert_eq!(p.current_index(), 4);
        p.handle_event(PresentationEvent::Previous);
        assert_eq!(p.current_index(), 3);
    }

    #[test]
    fn test_controls_follow_slide() {
        let mut p = presentation();
        let ids = |p: &Presentation| -> Vec<String> { p.controls().into_iter().map(|c| c.id).collect() };
        assert_eq!(ids(&p), ["arraySize", "operation", "showPerformance", "isPlaying"]);
        p.go_to(2);
        assert_eq!(
            ids(&p),
            ["chartType", "dataPoints", "showGrid", "showLegend", "isPlaying"]
        );
    }

    #[test]
    fn test_same_seed_same_scene() {
        let mut a = presentation();
        let mut b = presentation();
        play(&mut a);
        play(&mut b);
        let matrices = |p: &Presentation| match p.scene() {
            ActiveScene::NumericArray { scene, .. } => scene.map(|s| s.lhs.clone()),
            _ => None,
        };
        assert!(matrices(&a).is_some());
        assert_eq!(matrices(&a), matrices(&b));
    }
}
