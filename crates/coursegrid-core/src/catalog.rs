//! Lookup tables and the in-memory catalog snapshot.
//!
//! [`Lookups`] is the id-to-entity view the filter and layout engines resolve
//! display names through. [`Catalog`] holds a full snapshot of the store
//! (years, semesters, entities and sections) as loaded from a file.

use std::collections::HashMap;

use log::debug;
use serde::Deserialize;

use crate::{
    identifier::Id,
    model::{AcademicYear, Course, Instructor, PropertyValue, Room, Section, Semester, Subject},
};

/// Id-keyed lookup maps for every entity kind the grid resolves.
#[derive(Debug, Clone, Default)]
pub struct Lookups {
    pub courses: HashMap<Id, Course>,
    pub instructors: HashMap<Id, Instructor>,
    pub rooms: HashMap<Id, Room>,
    pub subjects: HashMap<Id, Subject>,
    pub campuses: HashMap<Id, PropertyValue>,
    pub section_types: HashMap<Id, PropertyValue>,
    pub tags: HashMap<Id, PropertyValue>,
    pub meeting_types: HashMap<Id, PropertyValue>,
}

impl Lookups {
    /// Creates empty lookups.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_courses(mut self, courses: impl IntoIterator<Item = Course>) -> Self {
        self.courses = courses.into_iter().map(|c| (c.id, c)).collect();
        self
    }

    pub fn with_instructors(mut self, instructors: impl IntoIterator<Item = Instructor>) -> Self {
        self.instructors = instructors.into_iter().map(|i| (i.id, i)).collect();
        self
    }

    pub fn with_rooms(mut self, rooms: impl IntoIterator<Item = Room>) -> Self {
        self.rooms = rooms.into_iter().map(|r| (r.id, r)).collect();
        self
    }

    pub fn with_subjects(mut self, subjects: impl IntoIterator<Item = Subject>) -> Self {
        self.subjects = subjects.into_iter().map(|s| (s.id, s)).collect();
        self
    }

    pub fn with_campuses(mut self, values: impl IntoIterator<Item = PropertyValue>) -> Self {
        self.campuses = index_values(values);
        self
    }

    pub fn with_section_types(mut self, values: impl IntoIterator<Item = PropertyValue>) -> Self {
        self.section_types = index_values(values);
        self
    }

    pub fn with_tags(mut self, values: impl IntoIterator<Item = PropertyValue>) -> Self {
        self.tags = index_values(values);
        self
    }

    pub fn with_meeting_types(mut self, values: impl IntoIterator<Item = PropertyValue>) -> Self {
        self.meeting_types = index_values(values);
        self
    }

    /// Resolves a section's course to its subject id.
    ///
    /// Returns `None` when the section has no course or the course is
    /// missing from the lookup.
    pub fn subject_of(&self, section: &Section) -> Option<Id> {
        section
            .course_id
            .and_then(|course_id| self.courses.get(&course_id))
            .map(|course| course.subject_id)
    }
}

fn index_values(values: impl IntoIterator<Item = PropertyValue>) -> HashMap<Id, PropertyValue> {
    values.into_iter().map(|v| (v.id, v)).collect()
}

/// A semester paired with a display label that includes its academic year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterDisplay {
    pub semester_id: Id,
    pub display_name: String,
}

/// A complete snapshot of the scheduling store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Catalog {
    pub academic_years: Vec<AcademicYear>,
    pub semesters: Vec<Semester>,
    pub subjects: Vec<Subject>,
    pub courses: Vec<Course>,
    pub instructors: Vec<Instructor>,
    pub rooms: Vec<Room>,
    pub campuses: Vec<PropertyValue>,
    pub section_types: Vec<PropertyValue>,
    pub tags: Vec<PropertyValue>,
    pub meeting_types: Vec<PropertyValue>,
    pub resources: Vec<PropertyValue>,
    pub reserves: Vec<PropertyValue>,
    pub sections: Vec<Section>,
}

impl Catalog {
    /// Sections belonging to `semester_id`, in catalog order.
    pub fn sections_for_semester(&self, semester_id: Id) -> Vec<Section> {
        let sections: Vec<Section> = self
            .sections
            .iter()
            .filter(|s| s.semester_id == semester_id)
            .cloned()
            .collect();
        debug!(semester:% = semester_id, count = sections.len(); "Selected semester sections");
        sections
    }

    /// Builds lookup maps over the catalog's entities.
    pub fn lookups(&self) -> Lookups {
        Lookups::new()
            .with_courses(self.courses.iter().cloned())
            .with_instructors(self.instructors.iter().cloned())
            .with_rooms(self.rooms.iter().cloned())
            .with_subjects(self.subjects.iter().cloned())
            .with_campuses(self.campuses.iter().cloned())
            .with_section_types(self.section_types.iter().cloned())
            .with_tags(self.tags.iter().cloned())
            .with_meeting_types(self.meeting_types.iter().cloned())
    }

    /// Semesters with `"{year} — {semester}"` labels, ordered by academic
    /// year start, then sort order, then name.
    ///
    /// A semester whose academic year is missing is labelled with its own
    /// name and sorts after every known year.
    pub fn semester_displays(&self) -> Vec<SemesterDisplay> {
        let years: HashMap<Id, &AcademicYear> =
            self.academic_years.iter().map(|y| (y.id, y)).collect();

        let mut semesters: Vec<&Semester> = self.semesters.iter().collect();
        semesters.sort_by(|a, b| {
            let year_a = years.get(&a.academic_year_id).map_or(i32::MAX, |y| y.start_year());
            let year_b = years.get(&b.academic_year_id).map_or(i32::MAX, |y| y.start_year());
            year_a
                .cmp(&year_b)
                .then(a.sort_order.cmp(&b.sort_order))
                .then_with(|| a.name.cmp(&b.name))
        });

        semesters
            .into_iter()
            .map(|semester| SemesterDisplay {
                semester_id: semester.id,
                display_name: match years.get(&semester.academic_year_id) {
                    Some(year) => format!("{} — {}", year.name, semester.name),
                    None => semester.name.clone(),
                },
            })
            .collect()
    }
}
