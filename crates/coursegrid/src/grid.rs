//! The schedule grid host.
//!
//! [`ScheduleGrid`] ties a [`ScheduleSource`] to the filter and layout
//! engines. Every mutation that can change the picture (semester switch,
//! filter change, settings change) re-runs the whole pipeline
//! synchronously and then notifies grid listeners once.

use std::fmt;

use log::{debug, error, info};

use coursegrid_core::identifier::Id;

use crate::{
    GridError,
    config::AppConfig,
    filter::{Dimension, FilterEngine},
    layout::{GridData, GridLayoutEngine},
    notify::{ChangeNotifier, SubscriptionId},
    source::ScheduleSource,
};

/// Advisory shown after a reload fails.
pub const RELOAD_ERROR_MESSAGE: &str =
    "An error occurred loading the schedule grid. See logs for details.";

type EditHandler = Box<dyn FnMut(Id)>;

/// Holds the current semester, filter state and computed grid.
pub struct ScheduleGrid<S> {
    source: S,
    filter: FilterEngine,
    layout: GridLayoutEngine,
    semester: Option<Id>,
    grid_data: GridData,
    selected_section: Option<Id>,
    last_error: Option<String>,
    edit_handler: Option<EditHandler>,
    changed: ChangeNotifier,
}

impl<S: ScheduleSource> ScheduleGrid<S> {
    /// Creates a grid with no semester selected and an empty picture.
    pub fn new(source: S, config: &AppConfig) -> Self {
        Self {
            source,
            filter: FilterEngine::new(),
            layout: GridLayoutEngine::from_config(config.grid()),
            semester: None,
            grid_data: GridData::empty(),
            selected_section: None,
            last_error: None,
            edit_handler: None,
            changed: ChangeNotifier::new(),
        }
    }

    pub fn semester(&self) -> Option<Id> {
        self.semester
    }

    /// Switches semester. Filter selections are cleared so each semester
    /// starts unfiltered, and the grid reloads once.
    pub fn set_semester(&mut self, semester: Option<Id>) {
        info!(semester:? = semester.map(|id| id.to_string()); "Switching semester");
        self.semester = semester;
        self.filter.clear_all();
        self.reload();
    }

    /// Adds or removes the Saturday column and reloads.
    pub fn set_include_saturday(&mut self, include_saturday: bool) {
        self.layout = GridLayoutEngine::new(include_saturday);
        self.reload();
    }

    /// Re-runs the pipeline for the current semester.
    ///
    /// A source failure is logged, the grid is replaced by
    /// [`GridData::empty`], and [`ScheduleGrid::last_error`] carries an
    /// advisory until the next successful reload or a dismissal.
    pub fn reload(&mut self) {
        match self.reload_core() {
            Ok(grid_data) => {
                self.grid_data = grid_data;
                self.last_error = None;
            }
            Err(err) => {
                error!(err:err; "Schedule grid reload failed");
                self.grid_data = GridData::empty();
                self.last_error = Some(RELOAD_ERROR_MESSAGE.to_string());
            }
        }
        self.changed.notify();
    }

    fn reload_core(&mut self) -> Result<GridData, GridError> {
        let Some(semester) = self.semester else {
            debug!("No semester selected");
            return Ok(GridData::empty());
        };

        let sections = self.source.sections_for_semester(semester)?;
        let lookups = self.source.lookups()?;

        self.filter.populate_options(&sections, &lookups);
        let selections = self.filter.selections();

        Ok(self.layout.compute(&sections, &selections, &lookups))
    }

    pub fn filter(&self) -> &FilterEngine {
        &self.filter
    }

    /// Selects or deselects one filter option, reloading if it changed.
    pub fn set_filter_option(&mut self, dimension: Dimension, id: Id, selected: bool) -> bool {
        let changed = self.filter.set_selected(dimension, id, selected);
        if changed {
            self.reload();
        }
        changed
    }

    /// Flips one filter option and reloads. Returns the new state, or
    /// `None` if the option is not offered for the current semester.
    pub fn toggle_filter_option(&mut self, dimension: Dimension, id: Id) -> Option<bool> {
        let selected = self.filter.toggle(dimension, id)?;
        self.reload();
        Some(selected)
    }

    /// Clears every filter selection and reloads once.
    pub fn clear_filters(&mut self) {
        self.filter.clear_all();
        self.reload();
    }

    pub fn grid_data(&self) -> &GridData {
        &self.grid_data
    }

    pub fn select_section(&mut self, section_id: Id) {
        self.selected_section = Some(section_id);
    }

    pub fn selected_section(&self) -> Option<Id> {
        self.selected_section
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Installs the callback invoked by [`ScheduleGrid::request_edit`].
    pub fn set_edit_handler(&mut self, handler: impl FnMut(Id) + 'static) {
        self.edit_handler = Some(Box::new(handler));
    }

    /// Forwards an edit request for `section_id` to the edit handler.
    /// Returns `false` when no handler is installed.
    pub fn request_edit(&mut self, section_id: Id) -> bool {
        match self.edit_handler.as_mut() {
            Some(handler) => {
                handler(section_id);
                true
            }
            None => false,
        }
    }

    /// Registers a listener fired after every reload.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> SubscriptionId {
        self.changed.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.changed.unsubscribe(id)
    }
}

impl<S> fmt::Debug for ScheduleGrid<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScheduleGrid")
            .field("semester", &self.semester)
            .field("filter", &self.filter)
            .field("layout", &self.layout)
            .field("grid_data", &self.grid_data)
            .field("selected_section", &self.selected_section)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}
