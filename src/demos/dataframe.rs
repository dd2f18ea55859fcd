//! Demo 2: Pandas data frame.
//!
//! A random table with a numeric, a categorical and a boolean column, an
//! optional category filter, and per-category counts for a bar chart.

use super::{DemoKind, DemoState, SceneContext, SliderBounds, IS_PLAYING};
use crate::controls::ControlDescriptor;
use crate::engine::DemoRng;
use serde::{Deserialize, Serialize};

/// Bounds of the row count slider.
pub const DATASET_SIZE: SliderBounds = SliderBounds::new(3, 10, 1);

/// Values of the categorical column.
pub const CATEGORIES: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

/// Row filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Keep every row.
    #[default]
    Value,
    /// Keep rows whose `column_b` is `A` or `B`.
    ColumnB,
}

impl FilterMode {
    /// Filter selected by the toggle state.
    #[must_use]
    pub const fn from_flag(alternate: bool) -> Self {
        if alternate {
            Self::ColumnB
        } else {
            Self::Value
        }
    }

    /// Whether the alternate value is selected.
    #[must_use]
    pub const fn is_alternate(self) -> bool {
        matches!(self, Self::ColumnB)
    }

    /// Whether a row passes the filter.
    #[must_use]
    pub const fn keeps(self, row: &DataRow) -> bool {
        match self {
            Self::Value => true,
            Self::ColumnB => matches!(row.column_b, 'A' | 'B'),
        }
    }
}

/// Pandas demo state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFrameState {
    /// Number of rows.
    pub dataset_size: u32,
    /// Row filter.
    pub filter: FilterMode,
    /// Whether to show the category chart.
    pub show_charts: bool,
    /// Whether the table is shown.
    pub is_playing: bool,
}

impl Default for DataFrameState {
    fn default() -> Self {
        Self {
            dataset_size: 5,
            filter: FilterMode::Value,
            show_charts: true,
            is_playing: false,
        }
    }
}

/// One table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRow {
    /// 1-based row id.
    pub id: u32,
    /// Numeric column in `[0, 99]`.
    pub column_a: u32,
    /// Categorical column, one of [`CATEGORIES`].
    pub column_b: char,
    /// Boolean column.
    pub column_c: bool,
}

/// Generated table, filtered view and category counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFrameScene {
    /// All generated rows.
    pub rows: Vec<DataRow>,
    /// Rows passing the filter.
    pub filtered: Vec<DataRow>,
    /// Count of filtered rows per category, in [`CATEGORIES`] order.
    pub category_counts: Vec<(char, usize)>,
}

impl DemoState for DataFrameState {
    const KIND: DemoKind = DemoKind::DataFrame;

    type Trigger = (u32, FilterMode);
    type Scene = DataFrameScene;

    fn project(&self) -> Vec<ControlDescriptor> {
        vec![
            DATASET_SIZE.descriptor("datasetSize", "Dataset size", self.dataset_size),
            ControlDescriptor::toggle(
                "filterColumn",
                "Filter by column B",
                self.filter.is_alternate(),
            ),
            ControlDescriptor::toggle("showCharts", "Show charts", self.show_charts),
            ControlDescriptor::toggle(IS_PLAYING, "Process data", self.is_playing),
        ]
    }

    fn apply_control(&mut self, control: &ControlDescriptor) {
        match control.id.as_str() {
            "datasetSize" => {
                if let Some(size) = DATASET_SIZE.read(control) {
                    self.dataset_size = size;
                }
            }
            "filterColumn" => {
                if let Some(flag) = control.flag() {
                    self.filter = FilterMode::from_flag(flag);
                }
            }
            "showCharts" => {
                if let Some(flag) = control.flag() {
                    self.show_charts = flag;
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
        (self.dataset_size, self.filter)
    }

    fn generate(&self, _ctx: &SceneContext, rng: &mut DemoRng) -> DataFrameScene {
        let rows: Vec<DataRow> = (1..=self.dataset_size)
            .map(|id| DataRow {
                id,
                column_a: rng.gen_below(100),
                column_b: rng.choose(&CATEGORIES).copied().unwrap_or('A'),
                column_c: rng.gen_bool(),
            })
            .collect();

        let filtered: Vec<DataRow> = rows
            .iter()
            .filter(|row| self.filter.keeps(row))
            .cloned()
            .collect();

        let category_counts = CATEGORIES
            .iter()
            .map(|&c| (c, filtered.iter().filter(|row| row.column_b == c).count()))
            .collect();

        DataFrameScene {
            rows,
            filtered,
            category_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_for(size: u32, filter: FilterMode, seed: u64) -> DataFrameScene {
        DataFrameState {
            dataset_size: size,
            filter,
            is_playing: true,
            ..DataFrameState::default()
        }
        .generate(&SceneContext::default(), &mut DemoRng::new(seed))
    }

    #[test]
    fn test_rows_shape() {
        let scene = scene_for(8, FilterMode::Value, 1);
        assert_eq!(scene.rows.len(), 8);
        assert_eq!(scene.filtered, scene.rows);
        for (i, row) in scene.rows.iter().enumerate() {
            assert_eq!(row.id as usize, i + 1);
            assert!(row.column_a < 100);
            assert!(CATEGORIES.contains(&row.column_b));
        }
    }

    #[test]
    fn test_column_b_filter() {
        for seed in 0..20 {
            let scene = scene_for(10, FilterMode::ColumnB, seed);
            assert!(scene
                .filtered
                .iter()
                .all(|row| row.column_b == 'A' || row.column_b == 'B'));
            let expected = scene
                .rows
                .iter()
                .filter(|row| matches!(row.column_b, 'A' | 'B'))
                .count();
            assert_eq!(scene.filtered.len(), expected);
        }
    }

    #[test]
    fn test_category_counts_sum_to_filtered() {
        let scene = scene_for(10, FilterMode::Value, 9);
        let total: usize = scene.category_counts.iter().map(|(_, n)| n).sum();
        assert_eq!(total, scene.filtered.len());
        assert_eq!(scene.category_counts.len(), CATEGORIES.len());
    }

    #[test]
    fn test_filter_flip() {
        let state = DataFrameState::default();
        let on = state.apply(&[ControlDescriptor::toggle("filterColumn", "", true)]);
        assert_eq!(on.filter, FilterMode::ColumnB);
        let off = on.apply(&[ControlDescriptor::toggle("filterColumn", "", false)]);
        assert_eq!(off.filter, FilterMode::Value);
    }

    #[test]
    fn test_show_charts_not_a_trigger() {
        let state = DataFrameState::default();
        let hidden = DataFrameState {
            show_charts: false,
            ..state.clone()
        };
        assert_eq!(state.trigger(), hidden.trigger());
    }
}
