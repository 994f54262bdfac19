//! Default city list
//!
//! The dashboard starts with these three cities, in this order. The first one
//! is selected at startup.

use super::City;

/// Seed cities as (name, latitude, longitude)
pub static DEFAULT_CITIES: [(&str, f64, f64); 3] = [
    ("Austin", 30.2672, -97.7431),
    ("Dallas", 32.7767, -96.7970),
    ("Houston", 29.7604, -95.3698),
];

/// Build the startup city list
///
/// # Example
///
/// ```
/// use weatherdash::data::default_cities;
///
/// let cities = default_cities();
/// assert_eq!(cities[0].name, "Austin");
/// ```
pub fn default_cities() -> Vec<City> {
    DEFAULT_CITIES
        .iter()
        .map(|(name, lat, lon)| City::new(*name, *lat, *lon))
        .collect()
}

/// Find a city in `cities` by its exact name
///
/// Matching is case sensitive, the same way duplicate detection works when a
/// city is added.
pub fn find_city<'a>(cities: &'a [City], name: &str) -> Option<&'a City> {
    cities.iter().find(|city| city.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cities_has_3_entries() {
        assert_eq!(default_cities().len(), 3);
    }

    #[test]
    fn test_default_cities_order() {
        let names: Vec<String> = default_cities().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Austin", "Dallas", "Houston"]);
    }

    #[test]
    fn test_specific_city_coordinates() {
        let test_cases = [
            ("Austin", 30.2672, -97.7431),
            ("Dallas", 32.7767, -96.7970),
            ("Houston", 29.7604, -95.3698),
        ];

        let cities = default_cities();
        for (name, expected_lat, expected_lon) in test_cases {
            let city = find_city(&cities, name).expect("default city missing");
            assert!(
                (city.lat - expected_lat).abs() < 0.0001,
                "City {} latitude mismatch: expected {}, got {}",
                name,
                expected_lat,
                city.lat
            );
            assert!(
                (city.lon - expected_lon).abs() < 0.0001,
                "City {} longitude mismatch: expected {}, got {}",
                name,
                expected_lon,
                city.lon
            );
        }
    }

    #[test]
    fn test_default_city_names_are_unique() {
        let mut names: Vec<String> = default_cities().into_iter().map(|c| c.name).collect();
        names.sort();
        let original_len = names.len();
        names.dedup();
        assert_eq!(names.len(), original_len, "City names are not unique");
    }

    #[test]
    fn test_find_city_is_case_sensitive() {
        let cities = default_cities();
        assert!(find_city(&cities, "Dallas").is_some());
        assert!(find_city(&cities, "dallas").is_none());
        assert!(find_city(&cities, "").is_none());
    }
}
