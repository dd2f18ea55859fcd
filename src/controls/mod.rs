//! Control descriptors: declarative, id-keyed descriptions of one
//! adjustable parameter and its current value.
//!
//! A demo projects its state into a list of descriptors, the
//! [`ControlPanel`] turns user input into `(id, value)` events, and the
//! demo folds the updated list back into a new state. Neither the panel
//! nor the descriptor knows what an id means.

pub mod panel;

pub use panel::{ControlPanel, ControlRow};

use serde::{Deserialize, Serialize};

/// The kind of control, carrying the value that is meaningful for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControlKind {
    /// One-shot action. Always reports `true` when pressed.
    Button,
    /// Numeric parameter within `[min, max]` in increments of `step`.
    Slider {
        /// Current position.
        value: f64,
        /// Lower bound.
        min: f64,
        /// Upper bound.
        max: f64,
        /// Granularity.
        step: f64,
    },
    /// Enabled/disabled flag. Clicking flips it.
    Toggle {
        /// Whether the toggle is on.
        active: bool,
    },
}

/// Payload of a control change event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    /// New slider position.
    Number(f64),
    /// New toggle state, or `true` for a button press.
    Flag(bool),
}

/// One adjustable parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlDescriptor {
    /// Identifier, unique within one descriptor list.
    pub id: String,
    /// Display label.
    pub label: String,
    /// Kind and current value.
    #[serde(flatten)]
    pub kind: ControlKind,
}

impl ControlDescriptor {
    /// Slider descriptor.
    #[must_use]
    pub fn slider(
        id: impl Into<String>,
        label: impl Into<String>,
        value: f64,
        min: f64,
        max: f64,
        step: f64,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ControlKind::Slider {
                value,
                min,
                max,
                step,
            },
        }
    }

    /// Toggle descriptor.
    #[must_use]
    pub fn toggle(id: impl Into<String>, label: impl Into<String>, active: bool) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ControlKind::Toggle { active },
        }
    }

    /// Button descriptor.
    #[must_use]
    pub fn button(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind: ControlKind::Button,
        }
    }

    /// Slider position, if this is a slider.
    #[must_use]
    pub const fn number(&self) -> Option<f64> {
        match self.kind {
            ControlKind::Slider { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Toggle state, if this is a toggle.
    #[must_use]
    pub const fn flag(&self) -> Option<bool> {
        match self.kind {
            ControlKind::Toggle { active } => Some(active),
            _ => None,
        }
    }

    /// Return this descriptor updated with a change event payload.
    ///
    /// Toggles take `Flag`, sliders take `Number`. Any other pairing,
    /// and any button, is returned unchanged.
    #[must_use]
    pub fn with_value(&self, value: ControlValue) -> Self {
        let kind = match (&self.kind, value) {
            (ControlKind::Toggle { .. }, ControlValue::Flag(active)) => {
                ControlKind::Toggle { active }
            }
            (
                ControlKind::Slider {
                    min, max, step, ..
                },
                ControlValue::Number(value),
            ) => ControlKind::Slider {
                value,
                min: *min,
                max: *max,
                step: *step,
            },
            (kind, _) => kind.clone(),
        };
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            kind,
        }
    }
}

/// Apply one `(id, value)` event to a descriptor list, returning the
/// updated list. Descriptors with other ids are carried over unchanged.
#[must_use]
pub fn update_controls(
    controls: &[ControlDescriptor],
    id: &str,
    value: ControlValue,
) -> Vec<ControlDescriptor> {
    controls
        .iter()
        .map(|control| {
            if control.id == id {
                control.with_value(value)
            } else {
                control.clone()
            }
        })
        .collect()
}

/// Bring a slider value into `[min, max]` on the `step` grid anchored at
/// `min`. Returns `None` for non-finite input.
#[must_use]
pub fn snap_to_range(value: f64, min: f64, max: f64, step: f64) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    let clamped = value.clamp(min, max);
    if step <= 0.0 {
        return Some(clamped);
    }
    let steps = ((clamped - min) / step).round();
    Some((min + steps * step).min(max))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_accepts_flag() {
        let toggle = ControlDescriptor::toggle("showGrid", "Show grid", false);
        let updated = toggle.with_value(ControlValue::Flag(true));
        assert_eq!(updated.flag(), Some(true));
        assert_eq!(updated.id, "showGrid");
    }

    #[test]
    fn test_toggle_ignores_number() {
        let toggle = ControlDescriptor::toggle("showGrid", "Show grid", true);
        assert_eq!(toggle.with_value(ControlValue::Number(3.0)), toggle);
    }

    #[test]
    fn test_slider_accepts_number_keeps_bounds() {
        let slider = ControlDescriptor::slider("epochs", "Epochs", 10.0, 5.0, 50.0, 5.0);
        let updated = slider.with_value(ControlValue::Number(25.0));
        assert_eq!(
            updated.kind,
            ControlKind::Slider {
                value: 25.0,
                min: 5.0,
                max: 50.0,
                step: 5.0
            }
        );
    }

    #[test]
    fn test_slider_ignores_flag() {
        let slider = ControlDescriptor::slider("epochs", "Epochs", 10.0, 5.0, 50.0, 5.0);
        assert_eq!(slider.with_value(ControlValue::Flag(true)), slider);
    }

    #[test]
    fn test_button_unchanged() {
        let button = ControlDescriptor::button("apply", "Apply");
        assert_eq!(button.with_value(ControlValue::Flag(true)), button);
        assert_eq!(button.number(), None);
        assert_eq!(button.flag(), None);
    }

    #[test]
    fn test_update_controls_targets_one_id() {
        let controls = vec![
            ControlDescriptor::toggle("a", "A", false),
            ControlDescriptor::toggle("b", "B", false),
        ];
        let updated = update_controls(&controls, "b", ControlValue::Flag(true));
        assert_eq!(updated[0].flag(), Some(false));
        assert_eq!(updated[1].flag(), Some(true));
    }

    #[test]
    fn test_update_controls_unknown_id_is_noop() {
        let controls = vec![ControlDescriptor::toggle("a", "A", false)];
        assert_eq!(
            update_controls(&controls, "missing", ControlValue::Flag(true)),
            controls
        );
    }

    #[test]
    fn test_snap_to_range() {
        assert_eq!(snap_to_range(12.0, 5.0, 50.0, 5.0), Some(10.0));
        assert_eq!(snap_to_range(13.0, 5.0, 50.0, 5.0), Some(15.0));
        assert_eq!(snap_to_range(500.0, 5.0, 50.0, 5.0), Some(50.0));
        assert_eq!(snap_to_range(-4.0, 2.0, 10.0, 1.0), Some(2.0));
        assert_eq!(snap_to_range(f64::NAN, 2.0, 10.0, 1.0), None);
        assert_eq!(snap_to_range(f64::INFINITY, 2.0, 10.0, 1.0), None);
    }

    #[test]
    fn test_descriptor_serialization() {
        let controls = vec![
            ControlDescriptor::slider("arraySize", "Array size", 5.0, 2.0, 10.0, 1.0),
            ControlDescriptor::toggle("isPlaying", "Run", true),
            ControlDescriptor::button("apply", "Apply"),
        ];
        let json = serde_json::to_string(&controls).expect("serialize");
        assert!(json.contains(r#""type":"slider""#));
        assert!(json.contains(r#""type":"toggle""#));
        assert!(json.contains(r#""active":true"#));

        let back: Vec<ControlDescriptor> = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, controls);
    }
}
