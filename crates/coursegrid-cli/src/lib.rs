//! CLI logic for the Coursegrid schedule tool.
//!
//! Loads a catalog snapshot, drives a [`ScheduleGrid`] for one semester with
//! the filters given on the command line, and writes the laid-out week.

pub mod error_adapter;

mod args;
mod catalog;
mod config;
mod error;
mod render;

pub use args::{Args, OutputFormat};
pub use error::CliError;

use std::{
    fs,
    io::{self, Write},
};

use log::{info, warn};

use coursegrid::{
    GridError, ScheduleGrid,
    catalog::{Catalog, SemesterDisplay},
    identifier::Id,
};

/// Run the Coursegrid CLI application
///
/// # Errors
///
/// Returns `CliError` for:
/// - File I/O errors
/// - Configuration loading errors
/// - Catalog parse errors
/// - An unknown semester id, or a catalog with no semesters
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), CliError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing catalog"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.saturday {
        app_config.set_include_saturday(true);
    }

    let catalog = catalog::load_catalog(&args.input)?;
    let semester = select_semester(&catalog, args.semester.as_deref())?;

    let mut grid = ScheduleGrid::new(&catalog, &app_config);
    grid.set_semester(Some(semester.semester_id));

    for (dimension, raw_id) in args.filters() {
        let id = Id::new(raw_id);
        let offered = grid
            .filter()
            .options(dimension)
            .iter()
            .any(|option| option.id() == id);
        if !offered {
            warn!(dimension:% = dimension, id = raw_id; "Filter option not offered for semester, ignoring");
            continue;
        }
        grid.set_filter_option(dimension, id, true);
    }

    if let Some(message) = grid.last_error() {
        return Err(GridError::source_error(message).into());
    }

    let summary = grid.filter().active_summary();
    let rendered = match args.format {
        OutputFormat::Svg => render::render_svg(
            grid.grid_data(),
            app_config.style(),
            &semester.display_name,
            &summary,
        )?,
        OutputFormat::Text => {
            render::render_text(grid.grid_data(), &semester.display_name, &summary)
        }
    };

    if args.output == "-" {
        io::stdout().write_all(rendered.as_bytes())?;
    } else {
        fs::write(&args.output, rendered)?;
    }

    info!(
        output_file = args.output,
        tiles = grid.grid_data().tile_count();
        "Schedule grid exported successfully"
    );

    Ok(())
}

/// Picks the requested semester, or the first one in display order.
fn select_semester(catalog: &Catalog, requested: Option<&str>) -> Result<SemesterDisplay, CliError> {
    let mut displays = catalog.semester_displays();
    match requested {
        Some(raw_id) => displays
            .into_iter()
            .find(|display| display.semester_id == raw_id)
            .ok_or_else(|| CliError::UnknownSemester(raw_id.to_string())),
        None if displays.is_empty() => Err(CliError::NoSemesters),
        None => Ok(displays.swap_remove(0)),
    }
}
