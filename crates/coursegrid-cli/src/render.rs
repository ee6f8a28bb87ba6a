//! Output writers for a computed [`GridData`].
//!
//! Both writers are consumers of the layout engine: they read tile
//! positions and overlap columns and never re-derive them.

use std::fmt::{self, Write as _};

use svg::{self, node::Text as SvgText, node::element as svg_element};

use coursegrid::{
    GridError,
    config::StyleConfig,
    layout::{DayColumn, GridData, Tile},
    time::format_minutes,
};

const TIME_AXIS_WIDTH: f32 = 56.0;
const DAY_WIDTH: f32 = 180.0;
const HEADER_HEIGHT: f32 = 48.0;
const PIXELS_PER_MINUTE: f32 = 1.0;
const TILE_GAP: f32 = 2.0;
const FONT_SIZE: f32 = 11.0;
const LINE_HEIGHT: f32 = 13.0;

const DEFAULT_BACKGROUND: &str = "white";
const DEFAULT_TILE: &str = "#dbe9f6";
const GRID_LINE: &str = "#d0d0d0";

/// Renders the grid as a plain-text listing.
///
/// ```text
/// Fall 2025
/// Filters: No filters active
///
/// Monday
///   08:30-10:00 [1/2] MATH 101 A01 (AO); MATH 101 A02 (EL)
/// ```
pub fn render_text(grid: &GridData, title: &str, summary: &str) -> String {
    let mut out = String::new();
    write_listing(&mut out, grid, title, summary)
        .expect("Writing to String buffer is infallible");
    out
}

fn write_listing(out: &mut String, grid: &GridData, title: &str, summary: &str) -> fmt::Result {
    writeln!(out, "{title}")?;
    writeln!(out, "Filters: {summary}")?;

    for column in &grid.day_columns {
        writeln!(out)?;
        writeln!(out, "{}", column.header)?;
        if column.tiles.is_empty() {
            writeln!(out, "  (no meetings)")?;
        }
        for tile in &column.tiles {
            writeln!(out, "  {}", describe_tile(tile))?;
        }
    }
    Ok(())
}

fn describe_tile(tile: &Tile) -> String {
    let entries = tile
        .entries
        .iter()
        .map(|entry| {
            if entry.sub_label.is_empty() {
                entry.label.clone()
            } else {
                format!("{} ({})", entry.label, entry.sub_label)
            }
        })
        .collect::<Vec<_>>()
        .join("; ");

    format!(
        "{}-{} [{}/{}] {}",
        format_minutes(tile.start_minutes),
        format_minutes(tile.end_minutes),
        tile.overlap_index + 1,
        tile.overlap_count,
        entries
    )
}

/// Renders the grid as an SVG document.
///
/// Each day column is split into `overlap_count` equal lanes per tile, and
/// the tile is drawn in lane `overlap_index`.
///
/// # Errors
///
/// Returns [`GridError::Config`] if a configured style color is invalid.
pub fn render_svg(
    grid: &GridData,
    style: &StyleConfig,
    title: &str,
    summary: &str,
) -> Result<String, GridError> {
    let background = style
        .background_color()
        .map_err(GridError::Config)?
        .map_or_else(|| DEFAULT_BACKGROUND.to_string(), |c| c.to_string());
    let tile_fill = style
        .tile_color()
        .map_err(GridError::Config)?
        .map_or_else(|| DEFAULT_TILE.to_string(), |c| c.to_string());

    let span_minutes = grid.last_row_minutes.saturating_sub(grid.first_row_minutes);
    let width = TIME_AXIS_WIDTH + DAY_WIDTH * grid.day_columns.len() as f32;
    let height = HEADER_HEIGHT + span_minutes as f32 * PIXELS_PER_MINUTE;

    let mut doc = svg::Document::new()
        .set("viewBox", format!("0 0 {width} {height}"))
        .set("width", width)
        .set("height", height)
        .add(
            svg_element::Rectangle::new()
                .set("width", width)
                .set("height", height)
                .set("fill", background),
        )
        .add(text_at(4.0, 14.0, title).set("font-weight", "bold"))
        .add(text_at(4.0, 28.0, summary));

    doc = doc.add(render_time_axis(grid, width));

    for (index, column) in grid.day_columns.iter().enumerate() {
        let x = TIME_AXIS_WIDTH + DAY_WIDTH * index as f32;
        doc = doc.add(render_column(grid, column, x, height, &tile_fill));
    }

    Ok(doc.to_string())
}

fn render_time_axis(grid: &GridData, width: f32) -> svg_element::Group {
    let mut group = svg_element::Group::new();
    let mut minutes = grid.first_row_minutes;
    while minutes <= grid.last_row_minutes {
        let y = y_for(grid, minutes);
        group = group
            .add(
                svg_element::Line::new()
                    .set("x1", TIME_AXIS_WIDTH)
                    .set("x2", width)
                    .set("y1", y)
                    .set("y2", y)
                    .set("stroke", GRID_LINE),
            )
            .add(text_at(4.0, y + FONT_SIZE / 2.0, &format_minutes(minutes)));
        minutes += 30;
    }
    group
}

fn render_column(
    grid: &GridData,
    column: &DayColumn,
    x: f32,
    height: f32,
    tile_fill: &str,
) -> svg_element::Group {
    let mut group = svg_element::Group::new()
        .add(
            svg_element::Line::new()
                .set("x1", x)
                .set("x2", x)
                .set("y1", HEADER_HEIGHT)
                .set("y2", height)
                .set("stroke", GRID_LINE),
        )
        .add(
            text_at(x + DAY_WIDTH / 2.0, HEADER_HEIGHT - 6.0, &column.header)
                .set("text-anchor", "middle")
                .set("font-weight", "bold"),
        );

    for tile in &column.tiles {
        group = group.add(render_tile(grid, tile, x, tile_fill));
    }
    group
}

fn render_tile(grid: &GridData, tile: &Tile, column_x: f32, tile_fill: &str) -> svg_element::Group {
    let lane_width = DAY_WIDTH / tile.overlap_count.max(1) as f32;
    let x = column_x + lane_width * tile.overlap_index as f32 + TILE_GAP / 2.0;
    let y = y_for(grid, tile.start_minutes);
    let tile_height = (tile.end_minutes - tile.start_minutes) as f32 * PIXELS_PER_MINUTE;

    let mut group = svg_element::Group::new().add(
        svg_element::Rectangle::new()
            .set("x", x)
            .set("y", y)
            .set("width", lane_width - TILE_GAP)
            .set("height", tile_height)
            .set("rx", 3)
            .set("fill", tile_fill)
            .set("stroke", "#4a6fa5"),
    );

    let mut text = svg_element::Text::new("")
        .set("x", x + 3.0)
        .set("y", y)
        .set("font-family", "sans-serif")
        .set("font-size", FONT_SIZE);
    for entry in &tile.entries {
        let line = if entry.sub_label.is_empty() {
            entry.label.clone()
        } else {
            format!("{} {}", entry.label, entry.sub_label)
        };
        text = text.add(
            svg_element::TSpan::new("")
                .set("x", x + 3.0)
                .set("dy", LINE_HEIGHT)
                .set("data-section", entry.section_id.to_string())
                .add(SvgText::new(line)),
        );
    }
    group = group.add(text);
    group
}

fn y_for(grid: &GridData, minutes: u32) -> f32 {
    // Out-of-window meetings are kept and drawn past the edge.
    HEADER_HEIGHT + (minutes as f32 - grid.first_row_minutes as f32) * PIXELS_PER_MINUTE
}

fn text_at(x: f32, y: f32, content: &str) -> svg_element::Text {
    svg_element::Text::new("")
        .set("x", x)
        .set("y", y)
        .set("font-family", "sans-serif")
        .set("font-size", FONT_SIZE)
        .add(SvgText::new(content))
}

#[cfg(test)]
mod tests {
    use coursegrid::{
        identifier::Id,
        layout::{Entry, FIRST_ROW_MINUTES, LAST_ROW_MINUTES},
        time::Weekday,
    };

    use super::*;

    fn sample_grid() -> GridData {
        let tile = |start, end, index, count, label: &str, sub: &str, id: &str| Tile {
            entries: vec![Entry::new(label, sub, Id::new(id))],
            start_minutes: start,
            end_minutes: end,
            overlap_index: index,
            overlap_count: count,
        };

        GridData {
            first_row_minutes: FIRST_ROW_MINUTES,
            last_row_minutes: LAST_ROW_MINUTES,
            day_columns: vec![
                DayColumn {
                    day: Weekday::Monday,
                    header: "Monday".to_string(),
                    tiles: vec![
                        tile(510, 600, 0, 2, "MATH 101 A01", "AO", "S1"),
                        tile(540, 630, 1, 2, "CHEM 110 B01", "", "S2"),
                    ],
                },
                DayColumn {
                    day: Weekday::Tuesday,
                    header: "Tuesday".to_string(),
                    tiles: Vec::new(),
                },
            ],
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample_grid(), "2025-2026 — Fall", "No filters active");

        let expected = "\
2025-2026 — Fall
Filters: No filters active

Monday
  08:30-10:00 [1/2] MATH 101 A01 (AO)
  09:00-10:30 [2/2] CHEM 110 B01

Tuesday
  (no meetings)
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_svg_contains_tiles() {
        let svg = render_svg(&sample_grid(), &StyleConfig::default(), "Fall", "None").unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("MATH 101 A01 AO"));
        assert!(svg.contains("CHEM 110 B01"));
        assert!(svg.contains(DEFAULT_TILE));
        assert!(svg.contains("Tuesday"));
    }

    #[test]
    fn test_render_svg_rejects_bad_color() {
        let style = StyleConfig::new(None, Some("nope".to_string()));
        let err = render_svg(&sample_grid(), &style, "Fall", "None").unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_render_empty_grid() {
        let svg = render_svg(&GridData::empty(), &StyleConfig::default(), "Fall", "None").unwrap();
        assert!(svg.contains("08:30"));
        assert_eq!(render_text(&GridData::empty(), "Fall", "x"), "Fall\nFilters: x\n");
    }
}
