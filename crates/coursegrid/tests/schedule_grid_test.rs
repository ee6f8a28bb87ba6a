//! Integration tests for the ScheduleGrid host API
//!
//! These tests drive the full pipeline through a catalog loaded from TOML,
//! the way an application host would.

use std::{cell::Cell, rc::Rc};

use coursegrid::{
    GridError, RELOAD_ERROR_MESSAGE, ScheduleGrid, ScheduleSource,
    catalog::{Catalog, Lookups},
    config::{AppConfig, GridConfig, StyleConfig},
    filter::Dimension,
    identifier::Id,
    model::Section,
    time::Weekday,
};

const CATALOG: &str = r#"
[[academic_years]]
id = "ay"
name = "2025-2026"

[[semesters]]
id = "fall"
academic_year_id = "ay"
name = "Fall"

[[semesters]]
id = "winter"
academic_year_id = "ay"
name = "Winter"
sort_order = 1

[[subjects]]
id = "math"
name = "Mathematics"

[[subjects]]
id = "chem"
name = "Chemistry"

[[courses]]
id = "c-math"
subject_id = "math"
calendar_code = "MATH 101"

[[courses]]
id = "c-chem"
subject_id = "chem"
calendar_code = "CHEM 110"

[[instructors]]
id = "I1"
last_name = "Okafor"
first_name = "Ada"
initials = "AO"

[[instructors]]
id = "I2"
last_name = "Lindqvist"
first_name = "Erik"
initials = "EL"

[[rooms]]
id = "r1"
building = "SCI"
room_number = "101"

[[tags]]
id = "online"
name = "Online"

[[tags]]
id = "evening"
name = "Evening"

[[sections]]
id = "S1"
semester_id = "fall"
course_id = "c-math"
section_code = "A01"
tag_ids = ["online", "evening"]
instructor_assignments = [{ instructor_id = "I1" }]
schedule = [{ day = 1, start_minutes = 510, duration_minutes = 90, room_id = "r1" }]

[[sections]]
id = "S2"
semester_id = "fall"
course_id = "c-chem"
section_code = "B01"
tag_ids = ["online"]
instructor_assignments = [{ instructor_id = "I2" }]
schedule = [{ day = 1, start_minutes = 540, duration_minutes = 90 }]

[[sections]]
id = "S3"
semester_id = "fall"
course_id = "c-math"
section_code = "A02"
instructor_assignments = [{ instructor_id = "I2" }]
schedule = [
    { day = 1, start_minutes = 510, duration_minutes = 90 },
    { day = 6, start_minutes = 600, duration_minutes = 60 },
]

[[sections]]
id = "W1"
semester_id = "winter"
course_id = "c-chem"
section_code = "C01"
instructor_assignments = [{ instructor_id = "I1" }]
schedule = [{ day = 3, start_minutes = 600, duration_minutes = 50 }]
"#;

fn catalog() -> Catalog {
    toml::from_str(CATALOG).expect("test catalog should parse")
}

fn monday_spans(grid: &ScheduleGrid<&Catalog>) -> Vec<(u32, u32, usize, usize, usize)> {
    grid.grid_data()
        .column(Weekday::Monday)
        .expect("Monday is always visible")
        .tiles
        .iter()
        .map(|t| {
            (
                t.start_minutes,
                t.end_minutes,
                t.entries.len(),
                t.overlap_index,
                t.overlap_count,
            )
        })
        .collect()
}

struct FailingSource;

impl ScheduleSource for FailingSource {
    fn sections_for_semester(&self, _semester_id: Id) -> Result<Vec<Section>, GridError> {
        Err(GridError::source_error("database is locked"))
    }

    fn lookups(&self) -> Result<Lookups, GridError> {
        Ok(Lookups::new())
    }
}

/// Fails until `failing` is cleared, then reads from the catalog.
struct FlakySource<'a> {
    catalog: &'a Catalog,
    failing: Cell<bool>,
}

impl ScheduleSource for FlakySource<'_> {
    fn sections_for_semester(&self, semester_id: Id) -> Result<Vec<Section>, GridError> {
        if self.failing.get() {
            return Err(GridError::source_error("connection reset"));
        }
        Ok(self.catalog.sections_for_semester(semester_id))
    }

    fn lookups(&self) -> Result<Lookups, GridError> {
        Ok(self.catalog.lookups())
    }
}

#[test]
fn test_no_semester_gives_empty_grid() {
    let catalog = catalog();
    let mut grid = ScheduleGrid::new(&catalog, &AppConfig::default());
    grid.reload();

    assert!(!grid.grid_data().has_data());
    assert!(grid.last_error().is_none());
}

#[test]
fn test_semester_layout() {
    let catalog = catalog();
    let mut grid = ScheduleGrid::new(&catalog, &AppConfig::default());
    grid.set_semester(Some(Id::new("fall")));

    // S1 and S3 share 08:30-10:00; S2 overlaps them.
    assert_eq!(monday_spans(&grid), [(510, 600, 2, 0, 2), (540, 630, 1, 1, 2)]);

    let first = &grid.grid_data().column(Weekday::Monday).unwrap().tiles[0];
    assert_eq!(first.entries[0].label, "MATH 101 A01");
    assert_eq!(first.entries[0].sub_label, "AO");
    assert_eq!(first.entries[1].section_id, "S3");

    assert_eq!(grid.grid_data().day_columns.len(), 5);
}

#[test]
fn test_saturday_setting() {
    let catalog = catalog();
    let config = AppConfig::new(GridConfig::new(true), StyleConfig::default());
    let mut grid = ScheduleGrid::new(&catalog, &config);
    grid.set_semester(Some(Id::new("fall")));

    let saturday = grid.grid_data().column(Weekday::Saturday).unwrap();
    assert_eq!(saturday.header, "Saturday");
    assert_eq!(saturday.tiles.len(), 1);

    grid.set_include_saturday(false);
    assert!(grid.grid_data().column(Weekday::Saturday).is_none());
}

#[test]
fn test_filter_option_reloads_grid() {
    let catalog = catalog();
    let mut grid = ScheduleGrid::new(&catalog, &AppConfig::default());
    grid.set_semester(Some(Id::new("fall")));

    assert!(grid.set_filter_option(Dimension::Instructor, Id::new("I2"), true));
    assert_eq!(monday_spans(&grid), [(510, 600, 1, 0, 2), (540, 630, 1, 1, 2)]);
    assert_eq!(grid.filter().active_summary(), "Instructor: Lindqvist, Erik");

    assert!(grid.set_filter_option(Dimension::Subject, Id::new("chem"), true));
    assert_eq!(monday_spans(&grid), [(540, 630, 1, 0, 1)]);
}

#[test]
fn test_tag_filter_requires_all_tags() {
    let catalog = catalog();
    let mut grid = ScheduleGrid::new(&catalog, &AppConfig::default());
    grid.set_semester(Some(Id::new("fall")));

    grid.set_filter_option(Dimension::Tag, Id::new("online"), true);
    assert_eq!(grid.grid_data().tile_count(), 2);

    grid.set_filter_option(Dimension::Tag, Id::new("evening"), true);
    assert_eq!(monday_spans(&grid), [(510, 600, 1, 0, 1)]);
}

#[test]
fn test_room_filter_drops_meetings_without_room() {
    let catalog = catalog();
    let mut grid = ScheduleGrid::new(&catalog, &AppConfig::default());
    grid.set_semester(Some(Id::new("fall")));

    assert_eq!(grid.toggle_filter_option(Dimension::Room, Id::new("r1")), Some(true));
    assert_eq!(monday_spans(&grid), [(510, 600, 1, 0, 1)]);
}

#[test]
fn test_semester_switch_clears_filters() {
    let catalog = catalog();
    let mut grid = ScheduleGrid::new(&catalog, &AppConfig::default());
    grid.set_semester(Some(Id::new("fall")));
    grid.set_filter_option(Dimension::Instructor, Id::new("I1"), true);
    assert!(grid.filter().is_active());

    grid.set_semester(Some(Id::new("winter")));
    assert!(!grid.filter().is_active());
    assert_eq!(
        grid.grid_data().column(Weekday::Wednesday).unwrap().tiles.len(),
        1
    );
    assert!(grid.filter().options(Dimension::Tag).is_empty());
}

#[test]
fn test_clear_filters() {
    let catalog = catalog();
    let mut grid = ScheduleGrid::new(&catalog, &AppConfig::default());
    grid.set_semester(Some(Id::new("fall")));
    grid.set_filter_option(Dimension::Subject, Id::new("chem"), true);
    assert_eq!(grid.grid_data().tile_count(), 1);

    grid.clear_filters();
    assert_eq!(grid.grid_data().tile_count(), 2);
}

#[test]
fn test_one_notification_per_reload() {
    let catalog = catalog();
    let mut grid = ScheduleGrid::new(&catalog, &AppConfig::default());

    let hits = Rc::new(Cell::new(0));
    let counter = Rc::clone(&hits);
    let subscription = grid.subscribe(move || counter.set(counter.get() + 1));

    grid.set_semester(Some(Id::new("fall")));
    assert_eq!(hits.get(), 1);

    // Unchanged selection does not reload.
    grid.set_filter_option(Dimension::Instructor, Id::new("I1"), false);
    assert_eq!(hits.get(), 1);

    grid.clear_filters();
    assert_eq!(hits.get(), 2);

    assert!(grid.unsubscribe(subscription));
    grid.reload();
    assert_eq!(hits.get(), 2);
}

#[test]
fn test_source_failure_degrades_to_empty_grid() {
    let mut grid = ScheduleGrid::new(FailingSource, &AppConfig::default());
    grid.set_semester(Some(Id::new("fall")));

    assert!(!grid.grid_data().has_data());
    assert!(grid.grid_data().day_columns.is_empty());
    assert_eq!(grid.last_error(), Some(RELOAD_ERROR_MESSAGE));

    grid.dismiss_error();
    assert!(grid.last_error().is_none());
}

#[test]
fn test_successful_reload_clears_advisory() {
    let catalog = catalog();
    let source = FlakySource {
        catalog: &catalog,
        failing: Cell::new(true),
    };
    let mut grid = ScheduleGrid::new(&source, &AppConfig::default());

    grid.set_semester(Some(Id::new("fall")));
    assert_eq!(grid.last_error(), Some(RELOAD_ERROR_MESSAGE));
    assert!(!grid.grid_data().has_data());

    source.failing.set(false);
    grid.reload();
    assert!(grid.last_error().is_none());
    assert_eq!(grid.grid_data().tile_count(), 2);
}

#[test]
fn test_selection_and_edit_requests() {
    let catalog = catalog();
    let mut grid = ScheduleGrid::new(&catalog, &AppConfig::default());
    grid.set_semester(Some(Id::new("fall")));

    let clicked = grid.grid_data().column(Weekday::Monday).unwrap().tiles[1].entries[0].section_id;
    grid.select_section(clicked);
    assert_eq!(grid.selected_section(), Some(Id::new("S2")));

    assert!(!grid.request_edit(clicked));

    let opened = Rc::new(Cell::new(None));
    let sink = Rc::clone(&opened);
    grid.set_edit_handler(move |id| sink.set(Some(id)));
    assert!(grid.request_edit(clicked));
    assert_eq!(opened.get(), Some(Id::new("S2")));
}
