use crate::catalog::filter;
use crate::catalog::types::FilterCriteria;
use crate::models::Property;
use crate::store::{ListingStore, Storage};
use tracing::debug;

/// Filtered catalog kept in step with the store
///
/// Holds the buyer's criteria and the last result. `refresh` recomputes only
/// when the criteria changed or the store has moved to a new revision.
#[derive(Debug, Default)]
pub struct CatalogView {
    criteria: FilterCriteria,
    visible: Vec<Property>,
    seen_revision: Option<u64>,
    stale: bool,
}

impl CatalogView {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            criteria,
            visible: Vec::new(),
            seen_revision: None,
            stale: true,
        }
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        if criteria != self.criteria {
            self.criteria = criteria;
            self.stale = true;
        }
    }

    /// Back to the wide-open search panel
    pub fn reset(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    /// Bring the result up to date with `store`, returning whether it was
    /// recomputed
    pub fn refresh<S: Storage>(&mut self, store: &ListingStore<S>) -> bool {
        if !self.stale && self.seen_revision == Some(store.revision()) {
            return false;
        }

        self.visible = filter::apply(store.active(), &self.criteria)
            .into_iter()
            .cloned()
            .collect();
        self.seen_revision = Some(store.revision());
        self.stale = false;

        debug!(
            "Catalog recomputed at revision {}: {} of {} listings visible",
            store.revision(),
            self.visible.len(),
            store.active().len()
        );
        true
    }

    pub fn visible(&self) -> &[Property] {
        &self.visible
    }
}
