//! Selected-id sets and the matching rules applied by the layout engine.
//!
//! Dimensions combine with AND. Inside a dimension the selected ids combine
//! with OR, except tags, where a section must carry every selected tag. An
//! empty selection always passes.

use std::collections::HashSet;

use coursegrid_core::{
    catalog::Lookups,
    identifier::Id,
    model::{Meeting, Section},
};

use super::dimension::{Dimension, Granularity};

/// The ids currently selected in one dimension.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: HashSet<Id>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.ids.contains(&id)
    }

    /// Passes when nothing is selected or `candidate` is selected.
    /// A missing reference fails an active selection.
    fn admits(&self, candidate: Option<Id>) -> bool {
        self.is_empty() || candidate.is_some_and(|id| self.contains(id))
    }

    /// Passes when nothing is selected or any of `candidates` is selected.
    fn admits_any(&self, mut candidates: impl Iterator<Item = Id>) -> bool {
        self.is_empty() || candidates.any(|id| self.contains(id))
    }

    /// Passes when every selected id appears in `candidates`.
    fn is_subset_of(&self, candidates: &[Id]) -> bool {
        self.ids.iter().all(|id| candidates.contains(id))
    }
}

impl FromIterator<Id> for SelectionSet {
    fn from_iter<T: IntoIterator<Item = Id>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// A snapshot of every dimension's selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selections {
    sets: [SelectionSet; 7],
}

impl Selections {
    /// A snapshot with nothing selected; every section passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces one dimension's selection.
    pub fn with(mut self, dimension: Dimension, ids: impl IntoIterator<Item = Id>) -> Self {
        self.sets[dimension.index()] = ids.into_iter().collect();
        self
    }

    pub fn get(&self, dimension: Dimension) -> &SelectionSet {
        &self.sets[dimension.index()]
    }

    pub(crate) fn set(&mut self, dimension: Dimension, selection: SelectionSet) {
        self.sets[dimension.index()] = selection;
    }

    /// `true` if any dimension has a selection.
    pub fn is_active(&self) -> bool {
        self.sets.iter().any(|set| !set.is_empty())
    }

    /// Applies every section-granularity dimension to `section`.
    pub fn section_passes(&self, section: &Section, lookups: &Lookups) -> bool {
        Dimension::ALL
            .into_iter()
            .filter(|d| d.granularity() == Granularity::Section)
            .all(|dimension| {
                let selection = self.get(dimension);
                match dimension {
                    Dimension::Instructor => selection.admits_any(section.instructor_ids()),
                    Dimension::Subject => selection.admits(lookups.subject_of(section)),
                    Dimension::Campus => selection.admits(section.campus_id),
                    Dimension::SectionType => selection.admits(section.section_type_id),
                    Dimension::Tag => selection.is_subset_of(&section.tag_ids),
                    Dimension::Room | Dimension::MeetingType => true,
                }
            })
    }

    /// Applies the meeting-granularity dimensions (room, meeting type).
    pub fn meeting_passes(&self, meeting: &Meeting) -> bool {
        self.get(Dimension::Room).admits(meeting.room_id)
            && self.get(Dimension::MeetingType).admits(meeting.meeting_type_id)
    }
}
