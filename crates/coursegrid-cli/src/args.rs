//! Command-line argument definitions for the Coursegrid CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments control input/output paths, configuration file
//! selection, logging verbosity, semester choice and filter selections.

use clap::{Parser, ValueEnum};

use coursegrid::filter::Dimension;

/// Output formats for the rendered grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Weekly grid drawn as an SVG document
    Svg,
    /// Plain-text listing of tiles per day
    Text,
}

/// Command-line arguments for the Coursegrid tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the catalog snapshot (TOML)
    #[arg(help = "Path to the catalog file")]
    pub input: String,

    /// Path to the output file, or `-` for stdout
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Semester id to lay out; defaults to the first semester
    #[arg(short, long)]
    pub semester: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,

    /// Add a Saturday column regardless of configuration
    #[arg(long)]
    pub saturday: bool,

    /// Keep sections taught by this instructor id
    #[arg(long = "instructor", value_name = "ID")]
    pub instructors: Vec<String>,

    /// Keep meetings held in this room id
    #[arg(long = "room", value_name = "ID")]
    pub rooms: Vec<String>,

    /// Keep sections of this subject id
    #[arg(long = "subject", value_name = "ID")]
    pub subjects: Vec<String>,

    /// Keep sections on this campus id
    #[arg(long = "campus", value_name = "ID")]
    pub campuses: Vec<String>,

    /// Keep sections of this section type id
    #[arg(long = "section-type", value_name = "ID")]
    pub section_types: Vec<String>,

    /// Keep sections carrying this tag id (all given tags are required)
    #[arg(long = "tag", value_name = "ID")]
    pub tags: Vec<String>,

    /// Keep meetings of this meeting type id
    #[arg(long = "meeting-type", value_name = "ID")]
    pub meeting_types: Vec<String>,
}

impl Args {
    /// Every filter flag paired with its dimension, in dimension order.
    pub fn filters(&self) -> impl Iterator<Item = (Dimension, &str)> {
        [
            (Dimension::Instructor, &self.instructors),
            (Dimension::Room, &self.rooms),
            (Dimension::Subject, &self.subjects),
            (Dimension::Campus, &self.campuses),
            (Dimension::SectionType, &self.section_types),
            (Dimension::Tag, &self.tags),
            (Dimension::MeetingType, &self.meeting_types),
        ]
        .into_iter()
        .flat_map(|(dimension, ids)| ids.iter().map(move |id| (dimension, id.as_str())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filters() {
        let args = Args::parse_from([
            "coursegrid",
            "catalog.toml",
            "--tag",
            "online",
            "--instructor",
            "I1",
            "--tag",
            "evening",
            "--format",
            "text",
        ]);

        assert_eq!(args.format, OutputFormat::Text);
        assert_eq!(args.output, "out.svg");
        let filters: Vec<(Dimension, &str)> = args.filters().collect();
        assert_eq!(
            filters,
            [
                (Dimension::Instructor, "I1"),
                (Dimension::Tag, "online"),
                (Dimension::Tag, "evening"),
            ]
        );
    }

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["coursegrid", "catalog.toml"]);
        assert_eq!(args.format, OutputFormat::Svg);
        assert!(!args.saturday);
        assert!(args.semester.is_none());
        assert_eq!(args.filters().count(), 0);
    }
}
