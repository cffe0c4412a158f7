//! Form boundary: raw text fields in, validated domain values out.
//!
//! A presenter (CLI, web form, query string) collects the fields as text and
//! hands them over untouched. All parsing and range checks live here so every
//! presenter rejects the same inputs with the same messages.

use crate::{Catalog, Error, Gender, Intake, Result, Subject};
use serde::{Deserialize, Serialize};

/// Raw, unvalidated form submission
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormInput {
    pub gender: String,
    pub weight: String,
    pub hours: String,
    /// (drink id, count text) pairs; repeated ids are added together
    pub drinks: Vec<(String, String)>,
}

impl FormInput {
    /// Validate every field and build the estimator's inputs
    pub fn parse(&self, catalog: &Catalog) -> Result<(Subject, Intake)> {
        let gender = parse_gender(&self.gender)?;
        let weight_kg = parse_decimal("weight", &self.weight)?;
        if weight_kg <= 0.0 {
            return Err(Error::invalid("weight", "must be greater than zero"));
        }
        let hours_elapsed = parse_decimal("hours", &self.hours)?;
        if hours_elapsed < 0.0 {
            return Err(Error::invalid("hours", "must not be negative"));
        }

        let mut intake = Intake::new();
        for (id, text) in &self.drinks {
            let id = id.trim();
            if !catalog.contains(id) {
                return Err(Error::UnknownDrink(id.to_string()));
            }
            let count = parse_count(id, text)?;
            let total = intake
                .count(id)
                .checked_add(count)
                .ok_or_else(|| Error::invalid(id, "count is too large"))?;
            intake.set(id, total);
        }

        Ok((
            Subject {
                gender,
                weight_kg,
                hours_elapsed,
            },
            intake,
        ))
    }
}

/// Split an `id=count` argument into its two halves
pub fn parse_drink_arg(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((id, count)) if !id.trim().is_empty() => {
            Ok((id.trim().to_string(), count.trim().to_string()))
        }
        _ => Err(Error::invalid(
            "drink",
            format!("expected <id>=<count>, got '{}'", arg),
        )),
    }
}

/// Parse `male`/`female` (or `m`/`f`), case-insensitive
pub fn parse_gender(text: &str) -> Result<Gender> {
    match text.trim().to_lowercase().as_str() {
        "male" | "m" => Ok(Gender::Male),
        "female" | "f" => Ok(Gender::Female),
        "" => Err(Error::invalid("gender", "is required")),
        other => Err(Error::invalid(
            "gender",
            format!("'{}' is not one of male, female", other),
        )),
    }
}

fn parse_decimal(field: &str, text: &str) -> Result<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::invalid(field, "is required"));
    }
    let value: f64 = text
        .parse()
        .map_err(|_| Error::invalid(field, format!("'{}' is not a number", text)))?;
    if !value.is_finite() {
        return Err(Error::invalid(field, format!("'{}' is not a number", text)));
    }
    Ok(value)
}

fn parse_count(field: &str, text: &str) -> Result<u32> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    let value: i64 = text
        .parse()
        .map_err(|_| Error::invalid(field, format!("'{}' is not a whole number", text)))?;
    if value < 0 {
        return Err(Error::invalid(field, "count must not be negative"));
    }
    u32::try_from(value).map_err(|_| Error::invalid(field, "count is too large"))
}

/// Echo of a submission, used by presenters to refill their form
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FormState {
    pub gender: Gender,
    pub weight_kg: Option<f64>,
    pub hours_elapsed: Option<f64>,
    /// One entry per catalog drink, in catalog order
    pub counts: Vec<(String, u32)>,
}

impl FormState {
    /// State of a form nobody has submitted yet
    pub fn blank(catalog: &Catalog) -> Self {
        Self {
            gender: Gender::Male,
            weight_kg: None,
            hours_elapsed: None,
            counts: catalog.iter().map(|d| (d.id.clone(), 0)).collect(),
        }
    }

    /// Echo a validated submission
    pub fn from_submission(catalog: &Catalog, subject: &Subject, intake: &Intake) -> Self {
        Self {
            gender: subject.gender,
            weight_kg: Some(subject.weight_kg),
            hours_elapsed: Some(subject.hours_elapsed),
            counts: catalog
                .iter()
                .map(|d| (d.id.clone(), intake.count(&d.id)))
                .collect(),
        }
    }

    pub fn count(&self, id: &str) -> u32 {
        self.counts
            .iter()
            .find(|(drink, _)| drink == id)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}
