//! Coursegrid - faceted filtering and weekly grid layout for course sections.
//!
//! The crate has two engines and a host that drives them:
//!
//! - [`filter::FilterEngine`] keeps per-dimension option lists and the
//!   user's selections.
//! - [`layout::GridLayoutEngine`] applies a selection snapshot to a
//!   semester's sections and lays the surviving meetings out as
//!   non-overlapping tiles.
//! - [`ScheduleGrid`] reads from a [`ScheduleSource`], runs both engines on
//!   every change and degrades to an empty grid when the source fails.
//!
//! # Examples
//!
//! ```rust
//! use coursegrid::{ScheduleGrid, config::AppConfig};
//! use coursegrid_core::{
//!     catalog::Catalog,
//!     identifier::Id,
//!     model::{Meeting, Section},
//! };
//!
//! let mut section = Section::new(Id::new("s1"), Id::new("fall"));
//! section.section_code = "A01".to_string();
//! section.schedule.push(Meeting::new(1, 510, 90));
//!
//! let catalog = Catalog {
//!     sections: vec![section],
//!     ..Catalog::default()
//! };
//!
//! let mut grid = ScheduleGrid::new(&catalog, &AppConfig::default());
//! grid.set_semester(Some(Id::new("fall")));
//!
//! assert!(grid.grid_data().has_data());
//! assert_eq!(grid.filter().active_summary(), "No filters active");
//! ```

pub mod config;
pub mod filter;
pub mod layout;
pub mod notify;

mod error;
mod grid;
mod source;

pub use coursegrid_core::{catalog, identifier, model, time};

pub use error::GridError;
pub use grid::{RELOAD_ERROR_MESSAGE, ScheduleGrid};
pub use source::ScheduleSource;
