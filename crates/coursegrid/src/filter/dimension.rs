//! Filter dimensions and how each one reads sections.

use std::{collections::HashSet, fmt};

use coursegrid_core::{catalog::Lookups, identifier::Id, model::Section};

/// One facet of the grid filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dimension {
    Instructor,
    Room,
    Subject,
    Campus,
    SectionType,
    Tag,
    MeetingType,
}

/// Whether a dimension is tested once per section or once per meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Section,
    Meeting,
}

impl Dimension {
    /// Every dimension, in summary order.
    pub const ALL: [Dimension; 7] = [
        Self::Instructor,
        Self::Room,
        Self::Subject,
        Self::Campus,
        Self::SectionType,
        Self::Tag,
        Self::MeetingType,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            Self::Instructor => 0,
            Self::Room => 1,
            Self::Subject => 2,
            Self::Campus => 3,
            Self::SectionType => 4,
            Self::Tag => 5,
            Self::MeetingType => 6,
        }
    }

    /// Label used in the active-filter summary.
    pub fn label(self) -> &'static str {
        match self {
            Self::Instructor => "Instructor",
            Self::Room => "Room",
            Self::Subject => "Subject",
            Self::Campus => "Campus",
            Self::SectionType => "Type",
            Self::Tag => "Tags",
            Self::MeetingType => "Meeting Type",
        }
    }

    pub fn granularity(self) -> Granularity {
        match self {
            Self::Room | Self::MeetingType => Granularity::Meeting,
            _ => Granularity::Section,
        }
    }

    /// Ids of this dimension referenced anywhere in `sections`.
    ///
    /// Subjects are reached through each section's course; sections without
    /// a resolvable course contribute nothing. Empty ids are skipped.
    pub(crate) fn referenced_ids(self, sections: &[Section], lookups: &Lookups) -> HashSet<Id> {
        let mut ids = HashSet::new();
        for section in sections {
            match self {
                Self::Instructor => ids.extend(section.instructor_ids()),
                Self::Room => ids.extend(section.schedule.iter().filter_map(|m| m.room_id)),
                Self::Subject => ids.extend(lookups.subject_of(section)),
                Self::Campus => ids.extend(section.campus_id),
                Self::SectionType => ids.extend(section.section_type_id),
                Self::Tag => ids.extend(section.tag_ids.iter().copied()),
                Self::MeetingType => {
                    ids.extend(section.schedule.iter().filter_map(|m| m.meeting_type_id))
                }
            }
        }
        ids.retain(|id| !id.is_empty());
        ids
    }

    /// Display name for `id`, or `None` if it does not resolve.
    pub(crate) fn resolve_name(self, id: Id, lookups: &Lookups) -> Option<String> {
        match self {
            Self::Instructor => lookups.instructors.get(&id).map(|i| i.display_name()),
            Self::Room => lookups.rooms.get(&id).map(|r| r.display_name()),
            Self::Subject => lookups.subjects.get(&id).map(|s| s.name.clone()),
            Self::Campus => lookups.campuses.get(&id).map(|v| v.name.clone()),
            Self::SectionType => lookups.section_types.get(&id).map(|v| v.name.clone()),
            Self::Tag => lookups.tags.get(&id).map(|v| v.name.clone()),
            Self::MeetingType => lookups.meeting_types.get(&id).map(|v| v.name.clone()),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
