use crate::catalog::types::FilterCriteria;
use crate::models::Property;

/// Listings from `active` that satisfy every criterion, in their original
/// order
pub fn apply<'a>(active: &'a [Property], criteria: &FilterCriteria) -> Vec<&'a Property> {
    let query = criteria.search_query.trim().to_lowercase();
    active
        .iter()
        .filter(|p| matches(p, criteria, &query))
        .collect()
}

/// `query` must already be trimmed and lowercased
fn matches(p: &Property, criteria: &FilterCriteria, query: &str) -> bool {
    let text_ok = query.is_empty()
        || p.title.to_lowercase().contains(query)
        || p.location.to_lowercase().contains(query);

    text_ok
        && criteria.property_type.matches(p.property_type)
        && p.bedrooms >= criteria.min_rooms
        && p.price >= criteria.min_price
        && criteria
            .max_price
            .filter(|&max| max > 0)
            .map_or(true, |max| p.price <= max)
}

/// Promoted listings for the home page, in catalog order
pub fn featured(active: &[Property]) -> Vec<&Property> {
    active.iter().filter(|p| p.is_featured()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::TypeFilter;
    use crate::models::{samples, PropertyType};

    fn two_listings() -> Vec<Property> {
        samples::default_listings().into_iter().take(2).collect()
    }

    fn ids<'a>(listings: &[&'a Property]) -> Vec<&'a str> {
        listings.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn min_rooms_keeps_only_the_penthouse() {
        let active = two_listings();
        let criteria = FilterCriteria {
            min_rooms: 6.0,
            ..Default::default()
        };
        let result = apply(&active, &criteria);
        assert_eq!(ids(&result), vec!["2"]);
        assert_eq!(result[0].property_type, PropertyType::Penthouse);
    }

    #[test]
    fn villa_filter_yields_nothing() {
        let active = two_listings();
        let criteria = FilterCriteria {
            property_type: TypeFilter::Only(PropertyType::Villa),
            ..Default::default()
        };
        assert!(apply(&active, &criteria).is_empty());
    }

    #[test]
    fn search_query_matches_title_only_where_present() {
        let active = two_listings();
        let criteria = FilterCriteria {
            search_query: "כרמי".to_string(),
            ..Default::default()
        };
        // Both listings sit in "כרמי גת" by location
        assert_eq!(ids(&apply(&active, &criteria)), vec!["1", "2"]);

        let mut distinct = two_listings();
        distinct[1].location = "קריית גת, מרכז".to_string();
        assert_eq!(ids(&apply(&distinct, &criteria)), vec!["1"]);
    }

    #[test]
    fn search_is_case_insensitive_and_checks_location() {
        let mut active = two_listings();
        active[0].title = "Sunny Garden Flat".to_string();
        active[1].location = "North GARDEN district".to_string();

        let criteria = FilterCriteria {
            search_query: "  garden ".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&active, &criteria)), vec!["1", "2"]);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let active = two_listings();
        let criteria = FilterCriteria {
            min_price: 2_450_000,
            max_price: Some(3_200_000),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&active, &criteria)), vec!["1", "2"]);

        let criteria = FilterCriteria {
            min_price: 2_450_001,
            max_price: Some(3_199_999),
            ..Default::default()
        };
        assert!(apply(&active, &criteria).is_empty());
    }

    #[test]
    fn zero_max_price_is_no_ceiling() {
        let active = two_listings();
        let criteria = FilterCriteria {
            max_price: Some(0),
            ..Default::default()
        };
        assert_eq!(ids(&apply(&active, &criteria)), vec!["1", "2"]);
    }

    #[test]
    fn criteria_are_combined_with_and() {
        let active = two_listings();
        // Type matches the penthouse, room count only matches the apartment
        let criteria = FilterCriteria {
            property_type: TypeFilter::Only(PropertyType::Penthouse),
            min_rooms: 7.0,
            ..Default::default()
        };
        assert!(apply(&active, &criteria).is_empty());

        let criteria = FilterCriteria {
            search_query: "פנטהאוז".to_string(),
            max_price: Some(3_000_000),
            ..Default::default()
        };
        assert!(apply(&active, &criteria).is_empty());
    }

    #[test]
    fn default_criteria_return_everything_in_order() {
        let mut active = samples::default_listings();
        active[3].price = 90_000_000;

        let once = apply(&active, &FilterCriteria::default());
        let twice = apply(&active, &FilterCriteria::default());
        assert_eq!(ids(&once), vec!["1", "2", "3", "4"]);
        assert_eq!(once, twice);
    }

    #[test]
    fn empty_catalog_gives_empty_result() {
        assert!(apply(&[], &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn featured_keeps_flagged_listings() {
        let active = samples::default_listings();
        assert_eq!(ids(&featured(&active)), vec!["1", "2"]);
    }
}
