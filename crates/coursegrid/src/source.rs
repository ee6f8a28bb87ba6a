//! Read access to the external schedule store.

use coursegrid_core::{
    catalog::{Catalog, Lookups},
    identifier::Id,
    model::Section,
};

use crate::GridError;

/// Supplies a semester's sections and the lookups needed to display them.
///
/// The grid only reads through this trait. Failures are returned to the
/// host, which degrades to an empty grid.
pub trait ScheduleSource {
    /// All sections of `semester_id`, in a stable order.
    fn sections_for_semester(&self, semester_id: Id) -> Result<Vec<Section>, GridError>;

    /// Id-to-entity maps for every dimension and for courses.
    fn lookups(&self) -> Result<Lookups, GridError>;
}

impl ScheduleSource for Catalog {
    fn sections_for_semester(&self, semester_id: Id) -> Result<Vec<Section>, GridError> {
        Ok(Catalog::sections_for_semester(self, semester_id))
    }

    fn lookups(&self) -> Result<Lookups, GridError> {
        Ok(Catalog::lookups(self))
    }
}

impl<S: ScheduleSource + ?Sized> ScheduleSource for &S {
    fn sections_for_semester(&self, semester_id: Id) -> Result<Vec<Section>, GridError> {
        (**self).sections_for_semester(semester_id)
    }

    fn lookups(&self) -> Result<Lookups, GridError> {
        (**self).lookups()
    }
}
