//! Weekly time-grid layout.
//!
//! [`GridLayoutEngine::compute`] is the whole pipeline: apply the filter
//! selections to a semester's sections, split the surviving meetings by
//! day, and lay each day out as non-overlapping tiles. The result is a
//! fresh [`GridData`] value; nothing is cached between calls, and the same
//! inputs always produce the same output.

mod grid;
mod tiles;

pub use grid::{DayColumn, Entry, GridData, Tile};
pub use tiles::{MeetingSlot, layout_day};

use log::{debug, info, trace, warn};

use coursegrid_core::{catalog::Lookups, model::Section, time::Weekday};

use crate::{config::GridConfig, filter::Selections};

/// Start of the visible window, 08:30.
pub const FIRST_ROW_MINUTES: u32 = 8 * 60 + 30;

/// End of the visible window, 22:00.
pub const LAST_ROW_MINUTES: u32 = 22 * 60;

/// Lays out filtered sections on the weekly grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridLayoutEngine {
    include_saturday: bool,
}

impl GridLayoutEngine {
    pub fn new(include_saturday: bool) -> Self {
        Self { include_saturday }
    }

    pub fn from_config(config: &GridConfig) -> Self {
        Self::new(config.include_saturday())
    }

    /// Monday to Friday, plus Saturday when enabled.
    pub fn visible_days(&self) -> Vec<Weekday> {
        let mut days = Weekday::WORK_WEEK.to_vec();
        if self.include_saturday {
            days.push(Weekday::Saturday);
        }
        days
    }

    /// Computes the grid for `sections` under `selections`.
    pub fn compute(
        &self,
        sections: &[Section],
        selections: &Selections,
        lookups: &Lookups,
    ) -> GridData {
        let slots = apply_filter(sections, selections, lookups);
        info!(
            sections = sections.len(),
            meetings = slots.len(),
            filtered = selections.is_active();
            "Computing schedule grid"
        );

        let days = self.visible_days();
        for slot in &slots {
            if !days.iter().any(|day| day.number() == slot.day) {
                debug!(
                    section:% = slot.entry.section_id,
                    day = slot.day;
                    "Skipping meeting on a day outside the grid"
                );
            }
        }

        let day_columns: Vec<DayColumn> = days
            .into_iter()
            .map(|day| {
                let day_slots = slots.iter().filter(|slot| slot.day == day.number()).cloned();
                DayColumn {
                    day,
                    header: day.name().to_string(),
                    tiles: layout_day(day_slots),
                }
            })
            .collect();

        let grid = GridData {
            first_row_minutes: FIRST_ROW_MINUTES,
            last_row_minutes: LAST_ROW_MINUTES,
            day_columns,
        };
        debug!(tiles = grid.tile_count(), columns = grid.day_columns.len(); "Grid computed");
        trace!(grid:?; "Grid data");
        grid
    }
}

/// Enumerates every meeting that survives `selections`, in section order.
///
/// Section-granularity dimensions reject whole sections; room and meeting
/// type are then checked per meeting. Meetings that fall outside the fixed
/// visible window are kept and reported with a warning.
pub fn apply_filter(
    sections: &[Section],
    selections: &Selections,
    lookups: &Lookups,
) -> Vec<MeetingSlot> {
    let mut slots = Vec::new();

    for section in sections {
        if !selections.section_passes(section, lookups) {
            continue;
        }

        let label = section_label(section, lookups);
        let sub_label = section_sub_label(section, lookups);

        for meeting in section
            .schedule
            .iter()
            .filter(|meeting| selections.meeting_passes(meeting))
        {
            let end = meeting.end_minutes();
            if meeting.start_minutes < FIRST_ROW_MINUTES || end > LAST_ROW_MINUTES {
                warn!(
                    section:% = section.id,
                    day = meeting.day,
                    start = meeting.start_minutes,
                    end = end;
                    "Meeting falls outside the visible grid window"
                );
            }

            slots.push(MeetingSlot {
                day: meeting.day,
                start_minutes: meeting.start_minutes,
                end_minutes: end,
                entry: Entry::new(label.clone(), sub_label.clone(), section.id),
            });
        }
    }

    slots
}

/// `"{calendar code} {section code}"`, or the bare section code when the
/// course does not resolve.
fn section_label(section: &Section, lookups: &Lookups) -> String {
    match section
        .course_id
        .and_then(|course_id| lookups.courses.get(&course_id))
    {
        Some(course) => format!("{} {}", course.calendar_code, section.section_code),
        None => section.section_code.clone(),
    }
}

/// Initials of the first assigned instructor, or empty.
fn section_sub_label(section: &Section, lookups: &Lookups) -> String {
    section
        .instructor_ids()
        .next()
        .and_then(|id| lookups.instructors.get(&id))
        .map(|instructor| instructor.initials.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use coursegrid_core::{
        identifier::Id,
        model::{Course, Instructor, InstructorAssignment, Meeting},
    };

    use super::*;
    use crate::filter::Dimension;

    fn instructor(id: &str, initials: &str) -> Instructor {
        Instructor {
            id: Id::new(id),
            last_name: initials.to_string(),
            first_name: String::new(),
            initials: initials.to_string(),
            email: String::new(),
            department: String::new(),
        }
    }

    fn lookups() -> Lookups {
        Lookups::new()
            .with_instructors([instructor("I1", "AB"), instructor("I2", "CD")])
            .with_courses([Course {
                id: Id::new("c-math"),
                subject_id: Id::new("math"),
                calendar_code: "MATH 101".to_string(),
                title: String::new(),
                is_active: true,
            }])
    }

    fn section(id: &str, instructor: &str, day: u8, start: u32, duration: u32) -> Section {
        let mut section = Section::new(Id::new(id), Id::new("fall"));
        section.section_code = id.to_string();
        section.instructor_assignments = vec![InstructorAssignment::new(Id::new(instructor))];
        section.schedule.push(Meeting::new(day, start, duration));
        section
    }

    fn monday(grid: &GridData) -> &[Tile] {
        &grid.column(Weekday::Monday).unwrap().tiles
    }

    #[test]
    fn test_overlapping_sections_share_a_cluster() {
        let sections = [
            section("S1", "I1", 1, 510, 90),
            section("S2", "I2", 1, 540, 90),
        ];
        let grid = GridLayoutEngine::default().compute(&sections, &Selections::new(), &lookups());

        let tiles = monday(&grid);
        assert_eq!(tiles.len(), 2);
        assert_eq!((tiles[0].overlap_index, tiles[0].overlap_count), (0, 2));
        assert_eq!((tiles[1].overlap_index, tiles[1].overlap_count), (1, 2));
    }

    #[test]
    fn test_identical_spans_merge_into_one_tile() {
        let sections = [
            section("S1", "I1", 1, 510, 90),
            section("S3", "I2", 1, 510, 90),
        ];
        let grid = GridLayoutEngine::default().compute(&sections, &Selections::new(), &lookups());

        let tiles = monday(&grid);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].entries.len(), 2);
        assert_eq!(tiles[0].overlap_count, 1);
        assert_eq!(tiles[0].entries[0].section_id, "S1");
        assert_eq!(tiles[0].entries[1].section_id, "S3");
    }

    #[test]
    fn test_instructor_filter_leaves_single_tile() {
        let sections = [
            section("S1", "I1", 1, 510, 90),
            section("S2", "I2", 1, 540, 90),
        ];
        let selections = Selections::new().with(Dimension::Instructor, [Id::new("I2")]);
        let grid = GridLayoutEngine::default().compute(&sections, &selections, &lookups());

        let tiles = monday(&grid);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].overlap_count, 1);
        assert_eq!(tiles[0].entries[0].section_id, "S2");
    }

    #[test]
    fn test_visible_days() {
        let weekdays = GridLayoutEngine::new(false).visible_days();
        assert_eq!(weekdays.len(), 5);
        assert!(!weekdays.contains(&Weekday::Saturday));

        let with_saturday = GridLayoutEngine::new(true).visible_days();
        assert_eq!(with_saturday.last(), Some(&Weekday::Saturday));
    }

    #[test]
    fn test_saturday_meetings_need_the_saturday_column() {
        let sections = [section("S1", "I1", 6, 600, 60)];

        let weekdays = GridLayoutEngine::new(false).compute(&sections, &Selections::new(), &lookups());
        assert_eq!(weekdays.day_columns.len(), 5);
        assert!(!weekdays.has_data());

        let full = GridLayoutEngine::new(true).compute(&sections, &Selections::new(), &lookups());
        assert_eq!(full.day_columns.len(), 6);
        assert_eq!(full.column(Weekday::Saturday).unwrap().tiles.len(), 1);
    }

    #[test]
    fn test_window_is_fixed() {
        let sections = [section("early", "I1", 2, 420, 60)];
        let grid = GridLayoutEngine::default().compute(&sections, &Selections::new(), &lookups());

        assert_eq!(grid.first_row_minutes, FIRST_ROW_MINUTES);
        assert_eq!(grid.last_row_minutes, LAST_ROW_MINUTES);
        // Out-of-window meetings are kept, not clipped.
        let tuesday = &grid.column(Weekday::Tuesday).unwrap().tiles;
        assert_eq!(tuesday[0].start_minutes, 420);
    }

    #[test]
    fn test_meeting_ending_past_u32_max_is_kept() {
        let sections = [section("late", "I1", 1, u32::MAX - 5, 10)];
        let grid = GridLayoutEngine::default().compute(&sections, &Selections::new(), &lookups());

        let tiles = monday(&grid);
        assert_eq!(tiles.len(), 1);
        assert_eq!(tiles[0].start_minutes, u32::MAX - 5);
        assert_eq!(tiles[0].end_minutes, u32::MAX);
        assert_eq!(tiles[0].overlap_count, 1);
    }

    #[test]
    fn test_empty_sections_give_empty_columns() {
        let grid = GridLayoutEngine::default().compute(&[], &Selections::new(), &lookups());
        assert_eq!(grid.day_columns.len(), 5);
        assert_eq!(grid.day_columns[0].header, "Monday");
        assert!(!grid.has_data());
    }

    #[test]
    fn test_labels() {
        let mut with_course = section("A01", "I1", 1, 510, 60);
        with_course.course_id = Some(Id::new("c-math"));
        let mut dangling = section("B02", "nobody", 1, 600, 60);
        dangling.course_id = Some(Id::new("c-gone"));
        let no_instructor = {
            let mut s = section("C03", "I1", 1, 700, 60);
            s.instructor_assignments.clear();
            s
        };

        let slots = apply_filter(
            &[with_course, dangling, no_instructor],
            &Selections::new(),
            &lookups(),
        );
        let labels: Vec<(&str, &str)> = slots
            .iter()
            .map(|s| (s.entry.label.as_str(), s.entry.sub_label.as_str()))
            .collect();
        assert_eq!(labels, [("MATH 101 A01", "AB"), ("B02", ""), ("C03", "")]);
    }

    #[test]
    fn test_room_filter_is_per_meeting() {
        let mut section = section("S1", "I1", 1, 510, 60);
        let mut other_room = Meeting::new(3, 510, 60);
        other_room.room_id = Some(Id::new("r2"));
        section.schedule[0].room_id = Some(Id::new("r1"));
        section.schedule.push(other_room);

        let selections = Selections::new().with(Dimension::Room, [Id::new("r1")]);
        let slots = apply_filter(&[section], &selections, &lookups());

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].day, 1);
    }

    #[test]
    fn test_compute_is_repeatable() {
        let sections = [
            section("S1", "I1", 1, 510, 90),
            section("S2", "I2", 1, 540, 90),
            section("S3", "I1", 1, 510, 90),
            section("S4", "I2", 4, 780, 50),
        ];
        let engine = GridLayoutEngine::new(true);
        let first = engine.compute(&sections, &Selections::new(), &lookups());
        let second = engine.compute(&sections, &Selections::new(), &lookups());
        assert_eq!(first, second);
    }
}
