//! Showcase TUI application state and logic.
//!
//! Key handling and frame updates live here so they can be tested
//! without a terminal. The binary only draws and feeds events.

use crate::config::ShowcaseConfig;
use crate::controls::ControlPanel;
use crate::error::ShowcaseResult;
use crate::presentation::{CodeSnippet, Presentation};
use crossterm::event::KeyCode;
use std::time::Duration;

/// Tab of the demo panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelTab {
    /// Control list.
    #[default]
    Controls,
    /// Rendered demo.
    Demo,
    /// Code listings.
    Code,
}

impl PanelTab {
    /// All tabs in display order.
    pub const ALL: [Self; 3] = [Self::Controls, Self::Demo, Self::Code];

    /// Tab title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Controls => "Controls",
            Self::Demo => "Demo",
            Self::Code => "Code",
        }
    }

    /// Position in [`Self::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Controls => 0,
            Self::Demo => 1,
            Self::Code => 2,
        }
    }

    /// Following tab, wrapping.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Controls => Self::Demo,
            Self::Demo => Self::Code,
            Self::Code => Self::Controls,
        }
    }
}

/// Application state for the showcase TUI.
#[derive(Debug)]
pub struct ShowcaseApp {
    /// Slides and demos.
    pub presentation: Presentation,
    /// Control selection.
    pub panel: ControlPanel,
    /// Visible panel tab.
    pub tab: PanelTab,
    /// Selected listing in the Code tab.
    pub snippet: usize,
    /// Frame counter.
    pub frame_count: u64,
    /// Whether the app should quit.
    pub should_quit: bool,
}

impl ShowcaseApp {
    /// Create the app around a presentation.
    #[must_use]
    pub fn new(presentation: Presentation) -> Self {
        Self {
            presentation,
            panel: ControlPanel::new(),
            tab: PanelTab::Controls,
            snippet: 0,
            frame_count: 0,
            should_quit: false,
        }
    }

    /// Create the app from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the slide deck cannot be loaded.
    pub fn from_config(config: &ShowcaseConfig) -> ShowcaseResult<Self> {
        Ok(Self::new(Presentation::from_config(config)?))
    }

    /// Restore the current demo's defaults.
    pub fn reset(&mut self) {
        self.presentation.reset_controls();
        self.panel.reset_selection();
    }

    /// Advance one frame by `elapsed` wall time.
    pub fn update(&mut self, elapsed: Duration) {
        self.presentation.advance(elapsed);
        self.frame_count += 1;
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Left => {
                let changed = self.presentation.previous();
                self.on_slide_change(changed);
            }
            KeyCode::Right => {
                let changed = self.presentation.next();
                self.on_slide_change(changed);
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                let changed = self.presentation.go_to(index);
                self.on_slide_change(changed);
            }
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::Up => self.select(false),
            KeyCode::Down => self.select(true),
            KeyCode::Char(' ') | KeyCode::Enter => self.activate(),
            KeyCode::Char('+' | '=') => self.adjust(1),
            KeyCode::Char('-') => self.adjust(-1),
            KeyCode::Char('r') => self.reset(),
            _ => {}
        }
    }

    /// Listings of the current slide.
    #[must_use]
    pub fn snippets(&self) -> &[CodeSnippet] {
        &self.presentation.current_slide().code_snippets
    }

    fn on_slide_change(&mut self, changed: bool) {
        if changed {
            self.panel.reset_selection();
            self.snippet = 0;
        }
    }

    fn select(&mut self, forward: bool) {
        match self.tab {
            PanelTab::Controls => {
                let len = self.presentation.controls().len();
                if forward {
                    self.panel.select_next(len);
                } else {
                    self.panel.select_previous(len);
                }
            }
            PanelTab::Code => {
                let len = self.snippets().len();
                if len > 0 {
                    self.snippet = if forward {
                        (self.snippet + 1) % len
                    } else {
                        (self.snippet + len - 1) % len
                    };
                }
            }
            PanelTab::Demo => {}
        }
    }

    fn activate(&mut self) {
        if self.tab != PanelTab::Controls {
            return;
        }
        let controls = self.presentation.controls();
        let presentation = &mut self.presentation;
        self.panel
            .activate(&controls, |id, value| presentation.handle_control_change(id, value));
    }

    fn adjust(&mut self, steps: i32) {
        if self.tab != PanelTab::Controls {
            return;
        }
        let controls = self.presentation.controls();
        let presentation = &mut self.presentation;
        self.panel
            .adjust(&controls, steps, |id, value| presentation.handle_control_change(id, value));
    }
}
