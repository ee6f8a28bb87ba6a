//! Faceted filter state for the schedule grid.
//!
//! [`FilterEngine`] keeps one option list per [`Dimension`], rebuilt from
//! the sections actually present in the current semester, plus the user's
//! selections. The layout engine consumes a [`Selections`] snapshot taken
//! from it.
//!
//! # Example
//!
//! ```
//! use coursegrid::filter::{Dimension, FilterEngine};
//! use coursegrid_core::{
//!     catalog::Lookups,
//!     identifier::Id,
//!     model::{PropertyValue, Section},
//! };
//!
//! let mut section = Section::new(Id::new("s1"), Id::new("fall"));
//! section.campus_id = Some(Id::new("north"));
//! let lookups = Lookups::new().with_campuses([PropertyValue::new(Id::new("north"), "North")]);
//!
//! let mut filter = FilterEngine::new();
//! filter.populate_options(&[section], &lookups);
//! filter.set_selected(Dimension::Campus, Id::new("north"), true);
//!
//! assert!(filter.is_active());
//! assert_eq!(filter.active_summary(), "Campus: North");
//! ```

mod dimension;
mod selection;

pub use dimension::{Dimension, Granularity};
pub use selection::{SelectionSet, Selections};

use std::collections::HashSet;

use log::{debug, trace};

use coursegrid_core::{catalog::Lookups, identifier::Id, model::Section};

use crate::notify::{ChangeNotifier, SubscriptionId};

/// Summary shown when no dimension has a selection.
pub const NO_FILTERS_SUMMARY: &str = "No filters active";

const SUMMARY_SEPARATOR: &str = " · ";

/// One checkable value within a dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    id: Id,
    name: String,
    is_selected: bool,
}

impl FilterOption {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            is_selected: false,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_selected(&self) -> bool {
        self.is_selected
    }
}

/// Option lists and selection state for every filter dimension.
#[derive(Debug, Default)]
pub struct FilterEngine {
    options: [Vec<FilterOption>; 7],
    changed: ChangeNotifier,
}

impl FilterEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds every option list from the ids referenced by `sections`.
    ///
    /// Ids that do not resolve through `lookups` are dropped. Lists are
    /// ordered by display name, then id. Options that survive the rebuild
    /// keep their selection; everything else starts unselected. Listeners
    /// are notified once for the whole rebuild.
    pub fn populate_options(&mut self, sections: &[Section], lookups: &Lookups) {
        for dimension in Dimension::ALL {
            let list = &mut self.options[dimension.index()];
            let previously_selected: HashSet<Id> = list
                .iter()
                .filter(|option| option.is_selected)
                .map(|option| option.id)
                .collect();

            let mut resolved: Vec<(String, String, Id)> = dimension
                .referenced_ids(sections, lookups)
                .into_iter()
                .filter_map(|id| {
                    dimension
                        .resolve_name(id, lookups)
                        .map(|name| (name, id.to_string(), id))
                })
                .collect();
            // Alphabetical ignoring case; exact name then id break ties.
            resolved.sort_by_cached_key(|(name, id_text, _)| {
                (name.to_lowercase(), name.clone(), id_text.clone())
            });

            *list = resolved
                .into_iter()
                .map(|(name, _, id)| FilterOption {
                    id,
                    name,
                    is_selected: previously_selected.contains(&id),
                })
                .collect();

            debug!(dimension:% = dimension, options = list.len(); "Rebuilt filter options");
        }

        trace!(summary = self.active_summary(); "Filter options populated");
        self.changed.notify();
    }

    /// Sets the selection of one option.
    ///
    /// Returns `true` and notifies listeners only when the flag changed.
    /// Ids not present in the dimension's list are ignored.
    pub fn set_selected(&mut self, dimension: Dimension, id: Id, selected: bool) -> bool {
        let Some(option) = self.options[dimension.index()]
            .iter_mut()
            .find(|option| option.id == id)
        else {
            debug!(dimension:% = dimension, id:% = id; "Ignoring selection of unknown option");
            return false;
        };

        if option.is_selected == selected {
            return false;
        }
        option.is_selected = selected;
        self.changed.notify();
        true
    }

    /// Flips one option and returns its new state, or `None` if the id is
    /// not in the dimension's list.
    pub fn toggle(&mut self, dimension: Dimension, id: Id) -> Option<bool> {
        let current = self
            .options(dimension)
            .iter()
            .find(|option| option.id == id)?
            .is_selected;
        self.set_selected(dimension, id, !current);
        Some(!current)
    }

    /// Deselects every option in every dimension with a single notification.
    pub fn clear_all(&mut self) {
        for option in self.options.iter_mut().flatten() {
            option.is_selected = false;
        }
        self.changed.notify();
    }

    pub fn options(&self, dimension: Dimension) -> &[FilterOption] {
        &self.options[dimension.index()]
    }

    /// The ids currently selected in `dimension`.
    pub fn selection(&self, dimension: Dimension) -> SelectionSet {
        self.options(dimension)
            .iter()
            .filter(|option| option.is_selected)
            .map(|option| option.id)
            .collect()
    }

    /// A snapshot of all seven selections.
    pub fn selections(&self) -> Selections {
        let mut selections = Selections::new();
        for dimension in Dimension::ALL {
            selections.set(dimension, self.selection(dimension));
        }
        selections
    }

    /// `true` if any dimension has at least one selected option.
    pub fn is_active(&self) -> bool {
        self.options.iter().flatten().any(|option| option.is_selected)
    }

    /// Human-readable description of the active selections, e.g.
    /// `"Instructor: Okafor, Ada · Tags: Online"`.
    pub fn active_summary(&self) -> String {
        let parts: Vec<String> = Dimension::ALL
            .into_iter()
            .filter_map(|dimension| {
                let names: Vec<&str> = self
                    .options(dimension)
                    .iter()
                    .filter(|option| option.is_selected)
                    .map(|option| option.name.as_str())
                    .collect();
                (!names.is_empty()).then(|| format!("{}: {}", dimension.label(), names.join(", ")))
            })
            .collect();

        if parts.is_empty() {
            NO_FILTERS_SUMMARY.to_string()
        } else {
            parts.join(SUMMARY_SEPARATOR)
        }
    }

    /// Registers a listener fired after every filter change.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> SubscriptionId {
        self.changed.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.changed.unsubscribe(id)
    }
}
