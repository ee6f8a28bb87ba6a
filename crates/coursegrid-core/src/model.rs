//! Domain entities read by the schedule grid.
//!
//! These mirror the rows kept by the external store. The grid only ever
//! reads them; nothing here is mutated once a catalog is loaded. All types
//! implement [`serde::Deserialize`] so snapshots can be loaded from TOML.

use serde::Deserialize;

use crate::identifier::Id;

/// A scheduled offering of a course within a semester.
#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    pub id: Id,
    pub semester_id: Id,
    #[serde(default)]
    pub course_id: Option<Id>,
    #[serde(default)]
    pub section_code: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub schedule: Vec<Meeting>,
    #[serde(default)]
    pub instructor_assignments: Vec<InstructorAssignment>,
    #[serde(default)]
    pub section_type_id: Option<Id>,
    #[serde(default)]
    pub campus_id: Option<Id>,
    #[serde(default)]
    pub tag_ids: Vec<Id>,
    #[serde(default)]
    pub resource_ids: Vec<Id>,
    #[serde(default)]
    pub reserves: Vec<SectionReserve>,
}

impl Section {
    /// Creates an empty section with the given id and semester.
    pub fn new(id: Id, semester_id: Id) -> Self {
        Self {
            id,
            semester_id,
            course_id: None,
            section_code: String::new(),
            notes: String::new(),
            schedule: Vec::new(),
            instructor_assignments: Vec::new(),
            section_type_id: None,
            campus_id: None,
            tag_ids: Vec::new(),
            resource_ids: Vec::new(),
            reserves: Vec::new(),
        }
    }

    /// Ids of the assigned instructors, in assignment order.
    pub fn instructor_ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.instructor_assignments.iter().map(|a| a.instructor_id)
    }
}

/// Links an instructor to a section, with an optional workload share.
#[derive(Debug, Clone, Deserialize)]
pub struct InstructorAssignment {
    pub instructor_id: Id,
    /// Workload contribution, e.g. `1.0` for full and `0.5` for half.
    #[serde(default)]
    pub workload: Option<f64>,
}

impl InstructorAssignment {
    pub fn new(instructor_id: Id) -> Self {
        Self {
            instructor_id,
            workload: None,
        }
    }
}

/// A reserved seat block on a section.
#[derive(Debug, Clone, Deserialize)]
pub struct SectionReserve {
    pub reserve_id: Id,
    #[serde(default)]
    pub code: String,
}

/// One weekly occurrence of a section.
#[derive(Debug, Clone, Deserialize)]
pub struct Meeting {
    /// Day of week, `1` = Monday through `6` = Saturday.
    pub day: u8,
    /// Start time in minutes from midnight, e.g. `510` = 08:30.
    pub start_minutes: u32,
    pub duration_minutes: u32,
    #[serde(default)]
    pub room_id: Option<Id>,
    #[serde(default)]
    pub meeting_type_id: Option<Id>,
}

impl Meeting {
    pub fn new(day: u8, start_minutes: u32, duration_minutes: u32) -> Self {
        Self {
            day,
            start_minutes,
            duration_minutes,
            room_id: None,
            meeting_type_id: None,
        }
    }

    /// End time in minutes from midnight. Derived, never stored.
    ///
    /// Saturates at `u32::MAX` instead of wrapping.
    pub fn end_minutes(&self) -> u32 {
        self.start_minutes.saturating_add(self.duration_minutes)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Course {
    pub id: Id,
    pub subject_id: Id,
    #[serde(default)]
    pub calendar_code: String,
    #[serde(default)]
    pub title: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Instructor {
    pub id: Id,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub initials: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub department: String,
}

impl Instructor {
    /// Display name in `Last, First` form.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Room {
    pub id: Id,
    #[serde(default)]
    pub building: String,
    #[serde(default)]
    pub room_number: String,
    #[serde(default)]
    pub capacity: u32,
}

impl Room {
    /// Building and room number, or just the room number when the building
    /// is blank.
    pub fn display_name(&self) -> String {
        if self.building.trim().is_empty() {
            self.room_number.clone()
        } else {
            format!("{} {}", self.building, self.room_number)
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Subject {
    pub id: Id,
    pub name: String,
    #[serde(default)]
    pub calendar_abbreviation: String,
}

/// A named value of one of the section property kinds: campus, section
/// type, tag, meeting type, resource or reserve.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyValue {
    pub id: Id,
    pub name: String,
    /// Short code used as a section code prefix. Only meaningful for campuses.
    #[serde(default)]
    pub section_code_abbreviation: Option<String>,
}

impl PropertyValue {
    pub fn new(id: Id, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            section_code_abbreviation: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AcademicYear {
    pub id: Id,
    /// Usually formatted as `YYYY-YYYY`.
    pub name: String,
}

impl AcademicYear {
    /// The leading four-digit year of the name, or `i32::MAX` when the name
    /// does not start with one, so unrecognised years sort last.
    pub fn start_year(&self) -> i32 {
        self.name
            .get(..4)
            .and_then(|prefix| prefix.parse().ok())
            .unwrap_or(i32::MAX)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Semester {
    pub id: Id,
    pub academic_year_id: Id,
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_true() -> bool {
    true
}
