//! Control panel: turns user interaction into `(id, value)` events.
//!
//! The panel owns nothing but a selection cursor. It renders whatever
//! descriptor list it is handed and reports changes through a callback,
//! so the same panel drives all five demos.

use super::{ControlDescriptor, ControlKind, ControlValue};

/// One rendered control row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRow {
    /// Display label.
    pub label: String,
    /// Rendered current state (`Enabled`, `5 [2..10]`, `Apply`).
    pub state: String,
    /// Whether the row is under the cursor.
    pub selected: bool,
    /// Whether the row is a toggle that is currently on.
    pub highlighted: bool,
}

/// Interactive list of controls with a selection cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlPanel {
    selected: usize,
}

impl ControlPanel {
    /// Create a panel with the first control selected.
    #[must_use]
    pub const fn new() -> Self {
        Self { selected: 0 }
    }

    /// Index of the selected row.
    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Move the cursor down, wrapping at the end of a list of `len` rows.
    pub fn select_next(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = (self.selected + 1) % len;
        }
    }

    /// Move the cursor up, wrapping at the start of a list of `len` rows.
    pub fn select_previous(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
        } else {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Put the cursor back on the first row.
    pub fn reset_selection(&mut self) {
        self.selected = 0;
    }

    fn current<'a>(&self, controls: &'a [ControlDescriptor]) -> Option<&'a ControlDescriptor> {
        controls.get(self.selected)
    }

    /// Click the selected control.
    ///
    /// Toggles report the negation of their current state and buttons
    /// always report `true`. Sliders do not react to clicks.
    pub fn activate<F>(&self, controls: &[ControlDescriptor], mut on_change: F)
    where
        F: FnMut(&str, ControlValue),
    {
        let Some(control) = self.current(controls) else {
            return;
        };
        match control.kind {
            ControlKind::Toggle { active } => on_change(&control.id, ControlValue::Flag(!active)),
            ControlKind::Button => on_change(&control.id, ControlValue::Flag(true)),
            ControlKind::Slider { .. } => {}
        }
    }

    /// Move the selected slider by `steps` increments, staying within its
    /// bounds. Other kinds do not react. Nothing is reported when the
    /// slider is already at the bound it is pushed against.
    pub fn adjust<F>(&self, controls: &[ControlDescriptor], steps: i32, mut on_change: F)
    where
        F: FnMut(&str, ControlValue),
    {
        let Some(control) = self.current(controls) else {
            return;
        };
        if let ControlKind::Slider {
            value,
            min,
            max,
            step,
        } = control.kind
        {
            let next = (value + f64::from(steps) * step).clamp(min, max);
            if (next - value).abs() > f64::EPSILON {
                on_change(&control.id, ControlValue::Number(next));
            }
        }
    }

    /// One row per descriptor, in order.
    #[must_use]
    pub fn rows(&self, controls: &[ControlDescriptor]) -> Vec<ControlRow> {
        controls
            .iter()
            .enumerate()
            .map(|(i, control)| {
                let (state, highlighted) = match control.kind {
                    ControlKind::Button => ("Apply".to_string(), false),
                    ControlKind::Slider {
                        value, min, max, ..
                    } => (format!("{value} [{min}..{max}]"), false),
                    ControlKind::Toggle { active } => {
                        let text = if active { "Enabled" } else { "Disabled" };
                        (text.to_string(), active)
                    }
                };
                ControlRow {
                    label: control.label.clone(),
                    state,
                    selected: i == self.selected,
                    highlighted,
                }
            })
            .collect()
    }
}
