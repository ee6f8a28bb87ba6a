//! Output types of the grid layout.

use coursegrid_core::{identifier::Id, time::Weekday};

use super::{FIRST_ROW_MINUTES, LAST_ROW_MINUTES};

/// One meeting's projection inside a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Course calendar code and section code, e.g. `"MATH 101 A01"`.
    pub label: String,
    /// Initials of the first assigned instructor, possibly empty.
    pub sub_label: String,
    /// The section the meeting belongs to, for click correlation.
    pub section_id: Id,
}

impl Entry {
    pub fn new(label: impl Into<String>, sub_label: impl Into<String>, section_id: Id) -> Self {
        Self {
            label: label.into(),
            sub_label: sub_label.into(),
            section_id,
        }
    }
}

/// A positioned rectangle on one day of the grid.
///
/// Every entry shares the tile's time span. `overlap_index` is the 0-based
/// column inside the tile's overlap cluster and is always less than
/// `overlap_count`, the number of columns that cluster uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub entries: Vec<Entry>,
    pub start_minutes: u32,
    pub end_minutes: u32,
    pub overlap_index: usize,
    pub overlap_count: usize,
}

impl Tile {
    /// Whether the half-open spans `[start, end)` of two tiles intersect.
    pub fn overlaps(&self, other: &Tile) -> bool {
        self.start_minutes < other.end_minutes && other.start_minutes < self.end_minutes
    }
}

/// The tiles of one visible weekday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayColumn {
    pub day: Weekday,
    pub header: String,
    pub tiles: Vec<Tile>,
}

/// Everything a renderer needs to draw the weekly grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridData {
    pub first_row_minutes: u32,
    pub last_row_minutes: u32,
    pub day_columns: Vec<DayColumn>,
}

impl GridData {
    /// A grid with the fixed visible window and no day columns.
    pub fn empty() -> Self {
        Self {
            first_row_minutes: FIRST_ROW_MINUTES,
            last_row_minutes: LAST_ROW_MINUTES,
            day_columns: Vec::new(),
        }
    }

    /// `true` if any day column holds at least one tile.
    pub fn has_data(&self) -> bool {
        self.day_columns.iter().any(|column| !column.tiles.is_empty())
    }

    /// The column for `day`, if it is visible.
    pub fn column(&self, day: Weekday) -> Option<&DayColumn> {
        self.day_columns.iter().find(|column| column.day == day)
    }

    /// Total number of tiles across all days.
    pub fn tile_count(&self) -> usize {
        self.day_columns.iter().map(|column| column.tiles.len()).sum()
    }
}

impl Default for GridData {
    fn default() -> Self {
        Self::empty()
    }
}
