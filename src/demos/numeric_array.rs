//! Demo 1: NumPy array math.
//!
//! Two random `n×n` integer matrices combined element-wise, with mock
//! timings contrasting an interpreted loop against a vectorized kernel.
//! Nothing is benchmarked; the timings only illustrate the gap.

use super::{DemoKind, DemoState, SceneContext, SliderBounds, IS_PLAYING};
use crate::controls::ControlDescriptor;
use crate::engine::DemoRng;
use serde::{Deserialize, Serialize};

/// Bounds of the matrix size slider.
pub const ARRAY_SIZE: SliderBounds = SliderBounds::new(2, 10, 1);

/// Entries are drawn from `[0, MAX_ENTRY]`.
pub const MAX_ENTRY: u32 = 9;

/// Element-wise operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// `a + b`
    #[default]
    Addition,
    /// `a * b`
    Multiplication,
}

impl Operation {
    /// Operation selected by the toggle state.
    #[must_use]
    pub const fn from_flag(alternate: bool) -> Self {
        if alternate {
            Self::Multiplication
        } else {
            Self::Addition
        }
    }

    /// Whether the alternate value is selected.
    #[must_use]
    pub const fn is_alternate(self) -> bool {
        matches!(self, Self::Multiplication)
    }

    /// Apply to one pair of entries.
    #[must_use]
    pub const fn combine(self, a: u32, b: u32) -> u32 {
        match self {
            Self::Addition => a + b,
            Self::Multiplication => a * b,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Multiplication => "multiplication",
        }
    }
}

/// NumPy demo state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrayState {
    /// Matrix dimension.
    pub array_size: u32,
    /// Element-wise operation.
    pub operation: Operation,
    /// Whether to show the timing comparison.
    pub show_performance: bool,
    /// Whether the computation is shown.
    pub is_playing: bool,
}

impl Default for ArrayState {
    fn default() -> Self {
        Self {
            array_size: 5,
            operation: Operation::Addition,
            show_performance: true,
            is_playing: false,
        }
    }
}

/// Generated matrices and mock timings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayScene {
    /// Left operand.
    pub lhs: Vec<Vec<u32>>,
    /// Right operand.
    pub rhs: Vec<Vec<u32>>,
    /// Element-wise result.
    pub result: Vec<Vec<u32>>,
    /// Operation used.
    pub operation: Operation,
    /// Mock time of a pure-Python nested loop, in milliseconds.
    pub interpreted_ms: f64,
    /// Mock time of the vectorized operation, in milliseconds.
    pub vectorized_ms: f64,
}

fn random_matrix(n: usize, rng: &mut DemoRng) -> Vec<Vec<u32>> {
    (0..n)
        .map(|_| (0..n).map(|_| rng.gen_below(MAX_ENTRY + 1)).collect())
        .collect()
}

impl DemoState for ArrayState {
    const KIND: DemoKind = DemoKind::NumericArray;

    type Trigger = (u32, Operation);
    type Scene = ArrayScene;

    fn project(&self) -> Vec<ControlDescriptor> {
        vec![
            ARRAY_SIZE.descriptor("arraySize", "Array size", self.array_size),
            ControlDescriptor::toggle(
                "operation",
                "Multiplication instead of addition",
                self.operation.is_alternate(),
            ),
            ControlDescriptor::toggle(
                "showPerformance",
                "Show performance metrics",
                self.show_performance,
            ),
            ControlDescriptor::toggle(IS_PLAYING, "Run computation", self.is_playing),
        ]
    }

    fn apply_control(&mut self, control: &ControlDescriptor) {
        match control.id.as_str() {
            "arraySize" => {
                if let Some(size) = ARRAY_SIZE.read(control) {
                    self.array_size = size;
                }
            }
            "operation" => {
                if let Some(flag) = control.flag() {
                    self.operation = Operation::from_flag(flag);
                }
            }
            "showPerformance" => {
                if let Some(flag) = control.flag() {
                    self.show_performance = flag;
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
        (self.array_size, self.operation)
    }

    fn generate(&self, _ctx: &SceneContext, rng: &mut DemoRng) -> ArrayScene {
        let n = self.array_size as usize;
        let lhs = random_matrix(n, rng);
        let rhs = random_matrix(n, rng);
        let result = lhs
            .iter()
            .zip(&rhs)
            .map(|(a_row, b_row)| {
                a_row
                    .iter()
                    .zip(b_row)
                    .map(|(&a, &b)| self.operation.combine(a, b))
                    .collect()
            })
            .collect();

        // The interpreted path pays a fixed overhead plus a per-row cost.
        let interpreted_ms = 500.0 + 50.0 * f64::from(self.array_size) + rng.gen_range_f64(0.0, 5.0);
        let vectorized_ms = rng.gen_range_f64(0.01, 0.2);

        ArrayScene {
            lhs,
            rhs,
            result,
            operation: self.operation,
            interpreted_ms,
            vectorized_ms,
        }
    }
}

/// Render a matrix one row per line, entries right-aligned to the widest.
#[must_use]
pub fn format_matrix(matrix: &[Vec<u32>]) -> String {
    let width = matrix
        .iter()
        .flatten()
        .map(|n| n.to_string().len())
        .max()
        .unwrap_or(1);

    matrix
        .iter()
        .map(|row| {
            let cells: Vec<String> = row.iter().map(|n| format!("{n:>width$}")).collect();
            format!("[{}]", cells.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
