//! Core domain types for the BAC estimator.
//!
//! This module defines the fundamental types used throughout the system:
//! - Drink types and the catalog they live in
//! - The subject (gender, weight, elapsed time) and their intake
//! - Widmark model parameters
//! - Derived results: BAC values, penalty tiers and decay curves

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============================================================================
// Drink Types
// ============================================================================

/// A drink definition (e.g., "Soju, 360 mL at 20%")
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DrinkType {
    pub id: String,
    pub name: String,
    pub volume_ml: f64,
    pub abv_percent: f64,
    /// Grams of pure ethanol in one serving
    pub grams_per_serving: f64,
}

/// The immutable, ordered list of drink types an estimate is computed over
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Catalog {
    pub drinks: Vec<DrinkType>,
}

impl Catalog {
    pub fn new(drinks: Vec<DrinkType>) -> Self {
        Self { drinks }
    }

    /// Look up a drink by id
    pub fn get(&self, id: &str) -> Option<&DrinkType> {
        self.drinks.iter().find(|d| d.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrinkType> {
        self.drinks.iter()
    }

    pub fn len(&self) -> usize {
        self.drinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drinks.is_empty()
    }
}

// ============================================================================
// Subject and Intake
// ============================================================================

/// Biological sex used to pick the Widmark distribution ratio
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "male"),
            Gender::Female => write!(f, "female"),
        }
    }
}

/// The person an estimate is made for
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Subject {
    pub gender: Gender,
    pub weight_kg: f64,
    pub hours_elapsed: f64,
}

/// Servings consumed per drink id. Omitted ids count as zero.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct Intake {
    counts: BTreeMap<String, u32>,
}

impl Intake {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter, handy in tests and call sites with literal counts
    pub fn with(mut self, id: impl Into<String>, count: u32) -> Self {
        self.set(id, count);
        self
    }

    /// Set the count for a drink, replacing any previous value
    pub fn set(&mut self, id: impl Into<String>, count: u32) {
        self.counts.insert(id.into(), count);
    }

    /// Servings of a drink, 0 when not recorded
    pub fn count(&self, id: &str) -> u32 {
        self.counts.get(id).copied().unwrap_or(0)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.counts.keys().map(String::as_str)
    }

    pub fn total_servings(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.values().all(|&c| c == 0)
    }
}

// ============================================================================
// Model Parameters
// ============================================================================

/// Parameters of the Widmark model
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct WidmarkModel {
    pub male_ratio: f64,
    pub female_ratio: f64,
    /// BAC percentage points eliminated per hour
    pub elimination_rate: f64,
}

impl WidmarkModel {
    /// Distribution ratio `r` for a gender
    pub fn ratio_for(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Male => self.male_ratio,
            Gender::Female => self.female_ratio,
        }
    }
}

impl Default for WidmarkModel {
    fn default() -> Self {
        Self {
            male_ratio: 0.68,
            female_ratio: 0.55,
            elimination_rate: 0.015,
        }
    }
}

// ============================================================================
// Penalty Tiers
// ============================================================================

/// Legal consequence bracket for a BAC reading
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum PenaltyTier {
    MayDrive,
    Tier1,
    Tier2,
    Tier3,
}

impl PenaltyTier {
    /// All tiers, lowest first
    pub const ALL: [PenaltyTier; 4] = [
        PenaltyTier::MayDrive,
        PenaltyTier::Tier1,
        PenaltyTier::Tier2,
        PenaltyTier::Tier3,
    ];

    /// Inclusive lower BAC bound (percent) of this tier
    pub fn lower_bound(&self) -> f64 {
        match self {
            PenaltyTier::MayDrive => 0.0,
            PenaltyTier::Tier1 => 0.03,
            PenaltyTier::Tier2 => 0.08,
            PenaltyTier::Tier3 => 0.15,
        }
    }

    /// Maximum prison term in years
    pub fn imprisonment_years(&self) -> Option<u32> {
        match self {
            PenaltyTier::MayDrive => None,
            PenaltyTier::Tier1 => Some(1),
            PenaltyTier::Tier2 => Some(2),
            PenaltyTier::Tier3 => Some(3),
        }
    }

    /// Fine in Korean won
    pub fn fine_krw(&self) -> Option<u64> {
        match self {
            PenaltyTier::MayDrive => None,
            PenaltyTier::Tier1 => Some(2_000_000),
            PenaltyTier::Tier2 => Some(5_000_000),
            PenaltyTier::Tier3 => Some(10_000_000),
        }
    }

    /// Licence suspension in months
    pub fn suspension_months(&self) -> Option<u32> {
        match self {
            PenaltyTier::MayDrive => None,
            PenaltyTier::Tier1 => Some(6),
            PenaltyTier::Tier2 => Some(12),
            PenaltyTier::Tier3 => Some(24),
        }
    }

    /// Human-readable verdict
    pub fn label(&self) -> String {
        match (
            self.imprisonment_years(),
            self.fine_krw(),
            self.suspension_months(),
        ) {
            (Some(years), Some(fine), Some(months)) => format!(
                "Up to {} year{} imprisonment, {} KRW fine, {}-month licence suspension",
                years,
                if years == 1 { "" } else { "s" },
                group_thousands(fine),
                months
            ),
            _ => "You may drive.".to_string(),
        }
    }
}

impl fmt::Display for PenaltyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PenaltyTier::MayDrive => write!(f, "may drive"),
            PenaltyTier::Tier1 => write!(f, "tier 1"),
            PenaltyTier::Tier2 => write!(f, "tier 2"),
            PenaltyTier::Tier3 => write!(f, "tier 3"),
        }
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// Results
// ============================================================================

/// One line of the intake breakdown
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DrinkLine {
    pub id: String,
    pub name: String,
    pub volume_ml: f64,
    pub abv_percent: f64,
    pub count: u32,
    pub grams: f64,
}

/// Everything derived from one subject + intake
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BacResult {
    pub total_alcohol_grams: f64,
    pub distribution_ratio: f64,
    pub initial_bac_percent: f64,
    pub current_bac_percent: f64,
    pub penalty_tier: PenaltyTier,
    pub breakdown: Vec<DrinkLine>,
}

/// A single sample on the decay curve
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CurvePoint {
    pub hours: f64,
    pub bac_percent: f64,
}

/// Projected BAC over time, starting from the initial BAC
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DecayCurve {
    /// Hours until BAC drops to the safe-driving limit; None when already below it
    pub time_to_safe_hours: Option<f64>,
    pub window_hours: f64,
    pub points: Vec<CurvePoint>,
}
