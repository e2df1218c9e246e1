//! Search and filter predicates over an in-memory property list.
//!
//! Everything here is a pure function: the input list is only borrowed, the
//! result keeps input order, and no combination of inputs fails.

use crate::listings::types::FilterState;
use crate::models::Property;

/// Case-insensitive substring match against title, location or description.
/// A blank term matches every property.
pub fn matches_search(property: &Property, search_term: &str) -> bool {
    if search_term.trim().is_empty() {
        return true;
    }
    let needle = search_term.to_lowercase();
    [&property.title, &property.location, &property.description]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// All filter clauses AND-ed together
pub fn matches_filters(property: &Property, filters: &FilterState) -> bool {
    let min_price = filters.min_price.map_or(true, |min| property.price >= min);
    let max_price = filters.max_price.map_or(true, |max| property.price <= max);
    let kind = filters.kind.accepts(property.kind);
    let bedrooms = filters
        .min_bedrooms
        .map_or(true, |min| property.bedrooms >= min);

    min_price && max_price && kind && bedrooms
}

/// Properties passing both the search term and the filters, in input order
pub fn filter_properties<'a>(
    properties: &'a [Property],
    search_term: &str,
    filters: &FilterState,
) -> Vec<&'a Property> {
    properties
        .iter()
        .filter(|p| matches_search(p, search_term) && matches_filters(p, filters))
        .collect()
}

/// Linear lookup by identifier
pub fn find_property<'a>(properties: &'a [Property], id: &str) -> Option<&'a Property> {
    properties.iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::seed::sample_properties;
    use crate::listings::types::{FilterChange, TypeFilter};
    use crate::models::PropertyType;

    fn listing(id: &str, price: i64, kind: PropertyType, bedrooms: u32) -> Property {
        Property {
            id: id.to_string(),
            title: format!("Listing {}", id),
            description: String::new(),
            price,
            location: String::new(),
            kind,
            bedrooms,
            bathrooms: 1.0,
            area: 500,
            image: String::new(),
            featured: false,
        }
    }

    fn ids(result: &[&Property]) -> Vec<String> {
        result.iter().map(|p| p.id.clone()).collect()
    }

    #[test]
    fn min_price_scenario() {
        let properties = vec![
            listing("1", 900, PropertyType::Rent, 0),
            listing("2", 2_500_000, PropertyType::Sale, 5),
        ];
        let filters = FilterState {
            min_price: Some(1000),
            ..FilterState::default()
        };
        assert_eq!(ids(&filter_properties(&properties, "", &filters)), vec!["2"]);
    }

    #[test]
    fn unconstrained_is_identity() {
        let properties = sample_properties();
        let result = filter_properties(&properties, "", &FilterState::default());
        assert_eq!(result.len(), properties.len());
        assert!(result.iter().zip(&properties).all(|(a, b)| *a == b));
    }

    #[test]
    fn empty_list_yields_empty_result() {
        assert!(filter_properties(&[], "villa", &FilterState::default()).is_empty());
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let properties = sample_properties();
        let unfiltered = FilterState::default();
        // title
        assert_eq!(
            ids(&filter_properties(&properties, "WATERFRONT", &unfiltered)),
            vec!["2"]
        );
        // location
        assert_eq!(
            ids(&filter_properties(&properties, "illinois", &unfiltered)),
            vec!["4", "5"]
        );
        // description
        assert_eq!(
            ids(&filter_properties(&properties, "Exposed Brick", &unfiltered)),
            vec!["3"]
        );
    }

    #[test]
    fn blank_search_matches_everything() {
        let properties = sample_properties();
        let result = filter_properties(&properties, "   ", &FilterState::default());
        assert_eq!(result.len(), properties.len());
    }

    #[test]
    fn clauses_are_combined() {
        let properties = sample_properties();
        let filters = FilterState {
            min_price: Some(1000),
            max_price: Some(500_000),
            kind: TypeFilter::Sale,
            min_bedrooms: Some(4),
        };
        assert_eq!(ids(&filter_properties(&properties, "", &filters)), vec!["4"]);

        let rentals = FilterState::default().merged([FilterChange::Type(TypeFilter::Rent)]);
        assert_eq!(ids(&filter_properties(&properties, "", &rentals)), vec!["1", "3", "5"]);
    }

    #[test]
    fn bounds_are_inclusive() {
        let properties = vec![listing("a", 1500, PropertyType::Rent, 2)];
        let filters = FilterState {
            min_price: Some(1500),
            max_price: Some(1500),
            kind: TypeFilter::All,
            min_bedrooms: Some(2),
        };
        assert_eq!(filter_properties(&properties, "", &filters).len(), 1);
    }

    #[test]
    fn filtering_is_a_fixed_point() {
        let properties = sample_properties();
        let filters = FilterState {
            max_price: Some(400_000),
            ..FilterState::default()
        };
        let once: Vec<Property> = filter_properties(&properties, "a", &filters)
            .into_iter()
            .cloned()
            .collect();
        let twice = filter_properties(&once, "a", &filters);
        assert_eq!(ids(&twice), once.iter().map(|p| p.id.clone()).collect::<Vec<_>>());
    }

    #[test]
    fn raising_a_bound_never_grows_the_result() {
        let properties = sample_properties();
        let mut previous = usize::MAX;
        for min_price in [0, 1000, 2000, 100_000, 1_000_000, 10_000_000] {
            let filters = FilterState {
                min_price: Some(min_price),
                ..FilterState::default()
            };
            let count = filter_properties(&properties, "", &filters).len();
            assert!(count <= previous);
            previous = count;
        }

        let mut previous = usize::MAX;
        for min_bedrooms in 0..7 {
            let filters = FilterState {
                min_bedrooms: Some(min_bedrooms),
                ..FilterState::default()
            };
            let count = filter_properties(&properties, "", &filters).len();
            assert!(count <= previous);
            previous = count;
        }
    }

    #[test]
    fn input_is_left_untouched() {
        let properties = sample_properties();
        let before = properties.clone();
        let _ = filter_properties(&properties, "villa", &FilterState::default());
        assert_eq!(properties, before);
    }

    #[test]
    fn find_property_by_id() {
        let properties = sample_properties();
        assert_eq!(find_property(&properties, "3").map(|p| p.bedrooms), Some(0));
        assert!(find_property(&properties, "99").is_none());
    }
}
