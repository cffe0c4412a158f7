//! Default catalog of drink types.
//!
//! The catalog is built once at startup and passed by reference to the
//! estimator; nothing here is global.

use crate::types::*;
use std::collections::HashSet;

/// Density of ethanol in g/mL
pub const ETHANOL_DENSITY: f64 = 0.789;

/// Allowed gap between a drink's stated grams and volume × ABV × density
const GRAMS_TOLERANCE: f64 = 0.5;

/// Builds the default catalog of the five built-in drink types
///
/// Grams per serving are stored as published values rather than recomputed,
/// so the whiskey entry rounds 9.47 g up to 9.5 g.
pub fn build_default_catalog() -> Catalog {
    let drinks = vec![
        DrinkType {
            id: "soju".into(),
            name: "Soju".into(),
            volume_ml: 360.0,
            abv_percent: 20.0,
            grams_per_serving: 56.8,
        },
        DrinkType {
            id: "beer".into(),
            name: "Beer".into(),
            volume_ml: 500.0,
            abv_percent: 4.5,
            grams_per_serving: 17.75,
        },
        DrinkType {
            id: "wine".into(),
            name: "Wine".into(),
            volume_ml: 150.0,
            abv_percent: 12.0,
            grams_per_serving: 14.2,
        },
        DrinkType {
            id: "makgeolli".into(),
            name: "Makgeolli (rice wine)".into(),
            volume_ml: 300.0,
            abv_percent: 6.0,
            grams_per_serving: 14.2,
        },
        DrinkType {
            id: "whiskey".into(),
            name: "Whiskey (spirits)".into(),
            volume_ml: 30.0,
            abv_percent: 40.0,
            grams_per_serving: 9.5,
        },
    ];

    Catalog::new(drinks)
}

/// Grams of ethanol implied by a serving's volume and strength
pub fn expected_grams(volume_ml: f64, abv_percent: f64) -> f64 {
    volume_ml * (abv_percent / 100.0) * ETHANOL_DENSITY
}

impl Catalog {
    /// Validate the catalog for consistency and completeness
    ///
    /// Returns a list of validation errors, or empty Vec if valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.drinks.is_empty() {
            errors.push("Catalog has no drinks".to_string());
        }

        let mut seen = HashSet::new();
        for drink in &self.drinks {
            if drink.id.is_empty() {
                errors.push("Drink has empty ID".to_string());
            } else if !seen.insert(drink.id.as_str()) {
                errors.push(format!("Duplicate drink ID '{}'", drink.id));
            }
            if drink.name.is_empty() {
                errors.push(format!("Drink '{}' has empty name", drink.id));
            }
            if !(drink.volume_ml > 0.0) {
                errors.push(format!(
                    "Drink '{}': volume {} mL must be positive",
                    drink.id, drink.volume_ml
                ));
            }
            if !(drink.abv_percent > 0.0 && drink.abv_percent <= 100.0) {
                errors.push(format!(
                    "Drink '{}': ABV {}% out of range",
                    drink.id, drink.abv_percent
                ));
            }
            if !(drink.grams_per_serving > 0.0) {
                errors.push(format!(
                    "Drink '{}': grams per serving {} must be positive",
                    drink.id, drink.grams_per_serving
                ));
                continue;
            }

            let expected = expected_grams(drink.volume_ml, drink.abv_percent);
            if (drink.grams_per_serving - expected).abs() > GRAMS_TOLERANCE {
                errors.push(format!(
                    "Drink '{}': {} g per serving disagrees with {:.2} g from volume and ABV",
                    drink.id, drink.grams_per_serving, expected
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_loads() {
        let catalog = build_default_catalog();
        assert_eq!(catalog.len(), 5);
        let ids: Vec<&str> = catalog.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["soju", "beer", "wine", "makgeolli", "whiskey"]);
    }

    #[test]
    fn test_default_catalog_validates() {
        let catalog = build_default_catalog();
        let errors = catalog.validate();
        assert!(
            errors.is_empty(),
            "Default catalog has validation errors: {:?}",
            errors
        );
    }

    #[test]
    fn test_soju_grams() {
        let catalog = build_default_catalog();
        let soju = catalog.get("soju").unwrap();
        assert_eq!(soju.grams_per_serving, 56.8);
        assert!((expected_grams(soju.volume_ml, soju.abv_percent) - 56.808).abs() < 0.001);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut catalog = build_default_catalog();
        let beer = catalog.get("beer").unwrap().clone();
        catalog.drinks.push(beer);

        let errors = catalog.validate();
        assert!(errors.iter().any(|e| e.contains("Duplicate drink ID 'beer'")));
    }

    #[test]
    fn test_inconsistent_grams_rejected() {
        let mut catalog = build_default_catalog();
        catalog.drinks[0].grams_per_serving = 80.0;

        let errors = catalog.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("soju"));
    }

    #[test]
    fn test_empty_catalog_rejected() {
        let catalog = Catalog::new(vec![]);
        assert_eq!(catalog.validate(), vec!["Catalog has no drinks".to_string()]);
    }
}
