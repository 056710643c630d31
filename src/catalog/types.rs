use crate::models::{ListingError, PropertyType};
use std::str::FromStr;

/// Type selection in the search panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(PropertyType),
}

impl TypeFilter {
    pub fn matches(&self, property_type: PropertyType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(t) => *t == property_type,
        }
    }
}

impl FromStr for TypeFilter {
    type Err = ListingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(TypeFilter::All)
        } else {
            s.parse().map(TypeFilter::Only)
        }
    }
}

/// Search constraints a buyer picks in the catalog
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Matched case-insensitively against title and location
    pub search_query: String,
    /// Inclusive; zero means no lower bound
    pub min_price: u64,
    /// Inclusive; `None` or zero means unbounded
    pub max_price: Option<u64>,
    /// Inclusive lower bound on bedrooms
    pub min_rooms: f32,
    pub property_type: TypeFilter,
}
