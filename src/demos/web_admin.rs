//! Demo 4: Django web admin.
//!
//! Mock blog records shown as a list page, a detail page for the first
//! record, or an admin table.

use super::{DemoKind, DemoState, SceneContext, SliderBounds, IS_PLAYING};
use crate::controls::ControlDescriptor;
use crate::engine::DemoRng;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Bounds of the record count slider.
pub const NUM_RECORDS: SliderBounds = SliderBounds::new(1, 10, 1);

/// Possible record authors.
pub const AUTHORS: [&str; 4] = ["John", "Jane", "Alex", "Maria"];

/// Records are dated up to this many days before the reference date.
pub const MAX_AGE_DAYS: u32 = 115;

/// Characters of content shown per record on the list page.
pub const EXCERPT_LEN: usize = 60;

/// Page layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewType {
    /// All records with excerpts.
    #[default]
    List,
    /// The first record in full.
    Detail,
}

impl ViewType {
    /// View selected by the toggle state.
    #[must_use]
    pub const fn from_flag(alternate: bool) -> Self {
        if alternate {
            Self::Detail
        } else {
            Self::List
        }
    }

    /// Whether the alternate value is selected.
    #[must_use]
    pub const fn is_alternate(self) -> bool {
        matches!(self, Self::Detail)
    }
}

/// Django demo state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAdminState {
    /// List or detail page.
    pub view_type: ViewType,
    /// Number of records.
    pub num_records: u32,
    /// Whether the admin table replaces the public page.
    pub show_admin: bool,
    /// Whether the page is shown.
    pub is_playing: bool,
}

impl Default for WebAdminState {
    fn default() -> Self {
        Self {
            view_type: ViewType::List,
            num_records: 5,
            show_admin: false,
            is_playing: false,
        }
    }
}

/// One blog article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// 1-based id.
    pub id: u32,
    /// `Article {id}`.
    pub title: String,
    /// Body text.
    pub content: String,
    /// One of [`AUTHORS`].
    pub author: String,
    /// Publication date.
    pub created: NaiveDate,
}

impl Record {
    /// First [`EXCERPT_LEN`] characters of the content.
    #[must_use]
    pub fn excerpt(&self) -> String {
        let mut excerpt: String = self.content.chars().take(EXCERPT_LEN).collect();
        excerpt.push_str("...");
        excerpt
    }
}

/// What the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page<'a> {
    /// Public list of records.
    List(&'a [Record]),
    /// One record in full, if any exists.
    Detail(Option<&'a Record>),
    /// Admin table of all records.
    Admin(&'a [Record]),
}

/// Generated records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebAdminScene {
    /// Records in id order.
    pub records: Vec<Record>,
    /// Index of the record shown on the detail page.
    pub selected: Option<usize>,
}

impl WebAdminScene {
    /// Page to display for the given state. The admin toggle only gates
    /// which view of the existing records is shown.
    #[must_use]
    pub fn page(&self, state: &WebAdminState) -> Page<'_> {
        if state.show_admin {
            Page::Admin(&self.records)
        } else if state.view_type == ViewType::Detail {
            Page::Detail(self.selected.and_then(|i| self.records.get(i)))
        } else {
            Page::List(&self.records)
        }
    }
}

impl DemoState for WebAdminState {
    const KIND: DemoKind = DemoKind::WebAdmin;

    type Trigger = (ViewType, u32);
    type Scene = WebAdminScene;

    fn project(&self) -> Vec<ControlDescriptor> {
        vec![
            ControlDescriptor::toggle("viewType", "Detail view", self.view_type.is_alternate()),
            NUM_RECORDS.descriptor("numRecords", "Number of records", self.num_records),
            ControlDescriptor::toggle("showAdmin", "Show admin panel", self.show_admin),
            ControlDescriptor::toggle(IS_PLAYING, "Render page", self.is_playing),
        ]
    }

    fn apply_control(&mut self, control: &ControlDescriptor) {
        match control.id.as_str() {
            "viewType" => {
                if let Some(flag) = control.flag() {
                    self.view_type = ViewType::from_flag(flag);
                }
            }
            "numRecords" => {
                if let Some(n) = NUM_RECORDS.read(control) {
                    self.num_records = n;
                }
            }
            "showAdmin" => {
                if let Some(flag) = control.flag() {
                    self.show_admin = flag;
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
        (self.view_type, self.num_records)
    }

    fn generate(&self, ctx: &SceneContext, rng: &mut DemoRng) -> WebAdminScene {
        let records: Vec<Record> = (1..=self.num_records)
            .map(|id| {
                let age = Days::new(u64::from(rng.gen_below(MAX_AGE_DAYS)));
                Record {
                    id,
                    title: format!("Article {id}"),
                    content: format!(
                        "This is the content for article {id}. \
                         Django makes it easy to create and manage web content."
                    ),
                    author: rng.choose(&AUTHORS).copied().unwrap_or("John").to_string(),
                    created: ctx
                        .reference_date
                        .checked_sub_days(age)
                        .unwrap_or(ctx.reference_date),
                }
            })
            .collect();

        let selected = (self.view_type == ViewType::Detail && !records.is_empty()).then_some(0);

        WebAdminScene { records, selected }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene_for(state: &WebAdminState) -> WebAdminScene {
        state.generate(&SceneContext::default(), &mut DemoRng::new(5))
    }

    #[test]
    fn test_records_generated() {
        let ctx = SceneContext::default();
        let state = WebAdminState {
            num_records: 7,
            is_playing: true,
            ..WebAdminState::default()
        };
        let scene = scene_for(&state);
        assert_eq!(scene.records.len(), 7);
        for (i, record) in scene.records.iter().enumerate() {
            assert_eq!(record.id as usize, i + 1);
            assert_eq!(record.title, format!("Article {}", i + 1));
            assert!(AUTHORS.contains(&record.author.as_str()));
            assert!(record.created <= ctx.reference_date);
            let age = (ctx.reference_date - record.created).num_days();
            assert!(age < i64::from(MAX_AGE_DAYS));
        }
        assert_eq!(scene.selected, None);
    }

    #[test]
    fn test_detail_selects_first() {
        let state = WebAdminState {
            view_type: ViewType::Detail,
            is_playing: true,
            ..WebAdminState::default()
        };
        let scene = scene_for(&state);
        assert_eq!(scene.selected, Some(0));
        assert!(matches!(scene.page(&state), Page::Detail(Some(r)) if r.id == 1));
    }

    #[test]
    fn test_admin_overrides_view() {
        let state = WebAdminState {
            view_type: ViewType::Detail,
            show_admin: true,
            is_playing: true,
            ..WebAdminState::default()
        };
        let scene = scene_for(&state);
        assert!(matches!(scene.page(&state), Page::Admin(records) if records.len() == 5));
    }

    #[test]
    fn test_list_page() {
        let state = WebAdminState {
            is_playing: true,
            ..WebAdminState::default()
        };
        let scene = scene_for(&state);
        assert!(matches!(scene.page(&state), Page::List(records) if records.len() == 5));
    }

    #[test]
    fn test_excerpt_truncates() {
        let state = WebAdminState::default();
        let scene = scene_for(&state);
        let excerpt = scene.records[0].excerpt();
        assert!(excerpt.ends_with("..."));
        assert_eq!(excerpt.chars().count(), EXCERPT_LEN + 3);
    }

    #[test]
    fn test_show_admin_not_a_trigger() {
        let state = WebAdminState::default();
        let admin = WebAdminState {
            show_admin: true,
            ..state.clone()
        };
        assert_eq!(state.trigger(), admin.trigger());
    }
}
