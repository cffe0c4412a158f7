//! Widmark estimation engine.
//!
//! The pipeline is:
//! 1. Sum grams of ethanol over the catalog
//! 2. Spread them over body water (`weight × 1000 × r`) to get the initial BAC
//! 3. Subtract linear elimination for the elapsed hours, floored at zero
//! 4. Classify the current BAC into a penalty tier

use crate::{
    BacResult, Catalog, DrinkLine, Error, Intake, PenaltyTier, Result, Subject, WidmarkModel,
};
use chrono::{DateTime, TimeDelta, Utc};

/// BAC (percent) at and above which driving is penalised
pub const SAFE_DRIVING_LIMIT: f64 = 0.03;

/// Estimate BAC for a subject and their intake
///
/// Fails with [`Error::InvalidInput`] for a non-positive weight, a negative
/// elapsed time or a weight too small to give a finite BAC, and with
/// [`Error::UnknownDrink`] when the intake names a drink the catalog does
/// not carry.
pub fn estimate(
    catalog: &Catalog,
    model: &WidmarkModel,
    subject: &Subject,
    intake: &Intake,
) -> Result<BacResult> {
    validate_subject(subject)?;
    validate_model(model)?;

    if let Some(unknown) = intake.ids().find(|id| !catalog.contains(id)) {
        return Err(Error::UnknownDrink(unknown.to_string()));
    }

    let breakdown = breakdown(catalog, intake);
    let total_alcohol_grams: f64 = breakdown.iter().map(|line| line.grams).sum();

    let distribution_ratio = model.ratio_for(subject.gender);
    let initial_bac_percent =
        initial_bac(total_alcohol_grams, subject.weight_kg, distribution_ratio);
    if !initial_bac_percent.is_finite() {
        return Err(Error::invalid(
            "weight",
            format!("{} kg is too small to estimate", subject.weight_kg),
        ));
    }
    let current_bac_percent = bac_at(initial_bac_percent, subject.hours_elapsed, model);
    let penalty_tier = classify(current_bac_percent);

    tracing::debug!(
        "Estimated {:.2} g ethanol, BAC {:.4}% -> {:.4}% after {}h ({})",
        total_alcohol_grams,
        initial_bac_percent,
        current_bac_percent,
        subject.hours_elapsed,
        penalty_tier
    );

    Ok(BacResult {
        total_alcohol_grams,
        distribution_ratio,
        initial_bac_percent,
        current_bac_percent,
        penalty_tier,
        breakdown,
    })
}

/// Reject subjects the formula cannot be applied to
pub fn validate_subject(subject: &Subject) -> Result<()> {
    if !subject.weight_kg.is_finite() || subject.weight_kg <= 0.0 {
        return Err(Error::invalid(
            "weight",
            format!("{} kg must be a positive number", subject.weight_kg),
        ));
    }
    if !subject.hours_elapsed.is_finite() || subject.hours_elapsed < 0.0 {
        return Err(Error::invalid(
            "hours",
            format!("{} h must be zero or more", subject.hours_elapsed),
        ));
    }
    Ok(())
}

fn validate_model(model: &WidmarkModel) -> Result<()> {
    if !(model.male_ratio > 0.0 && model.female_ratio > 0.0) {
        return Err(Error::Config(
            "distribution ratios must be positive".to_string(),
        ));
    }
    if !(model.elimination_rate > 0.0) {
        return Err(Error::Config(
            "elimination rate must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Per-drink grams, in catalog order
pub fn breakdown(catalog: &Catalog, intake: &Intake) -> Vec<DrinkLine> {
    catalog
        .iter()
        .map(|drink| {
            let count = intake.count(&drink.id);
            DrinkLine {
                id: drink.id.clone(),
                name: drink.name.clone(),
                volume_ml: drink.volume_ml,
                abv_percent: drink.abv_percent,
                count,
                grams: count as f64 * drink.grams_per_serving,
            }
        })
        .collect()
}

/// Widmark peak BAC in percent
pub fn initial_bac(total_alcohol_grams: f64, weight_kg: f64, ratio: f64) -> f64 {
    (total_alcohol_grams / (weight_kg * 1000.0 * ratio)) * 100.0
}

/// BAC after `hours` of elimination, never below zero
pub fn bac_at(initial_bac: f64, hours: f64, model: &WidmarkModel) -> f64 {
    (initial_bac - model.elimination_rate * hours).max(0.0)
}

/// Map a BAC reading onto its penalty tier (half-open brackets)
pub fn classify(bac_percent: f64) -> PenaltyTier {
    PenaltyTier::ALL
        .iter()
        .rev()
        .copied()
        .find(|tier| bac_percent >= tier.lower_bound())
        .unwrap_or(PenaltyTier::MayDrive)
}

/// Hours from the initial BAC until it falls to the safe-driving limit
///
/// Returns None when the initial BAC is already at or below the limit.
pub fn time_to_safe(initial_bac: f64, model: &WidmarkModel) -> Option<f64> {
    if initial_bac > SAFE_DRIVING_LIMIT {
        Some((initial_bac - SAFE_DRIVING_LIMIT) / model.elimination_rate)
    } else {
        None
    }
}

/// Hours the subject still has to wait, counted from their elapsed time
pub fn hours_until_safe(result: &BacResult, subject: &Subject, model: &WidmarkModel) -> f64 {
    time_to_safe(result.initial_bac_percent, model)
        .map(|t| (t - subject.hours_elapsed).max(0.0))
        .unwrap_or(0.0)
}

/// Wall-clock instant at which the subject drops below the limit
///
/// None when the wait runs past the calendar chrono can represent.
pub fn safe_at(now: DateTime<Utc>, hours_remaining: f64) -> Option<DateTime<Utc>> {
    let millis = (hours_remaining.max(0.0) * 3_600_000.0).round();
    if !millis.is_finite() || millis >= i64::MAX as f64 {
        return None;
    }
    now.checked_add_signed(TimeDelta::try_milliseconds(millis as i64)?)
}
