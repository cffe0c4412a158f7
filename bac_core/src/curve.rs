//! Decay-curve sampling.
//!
//! The curve always starts at the initial BAC (t = 0) and runs until the
//! subject has been under the safe-driving limit for `padding_hours`.

use crate::engine::{bac_at, time_to_safe};
use crate::{CurvePoint, DecayCurve, WidmarkModel};
use serde::{Deserialize, Serialize};

/// Default number of samples on a curve
pub const DEFAULT_SAMPLES: usize = 100;

/// Default hours sampled past the safe-driving crossing
pub const DEFAULT_PADDING_HOURS: f64 = 1.0;

/// How densely and how far a curve is sampled
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct CurveSettings {
    pub samples: usize,
    pub padding_hours: f64,
}

impl Default for CurveSettings {
    fn default() -> Self {
        Self {
            samples: DEFAULT_SAMPLES,
            padding_hours: DEFAULT_PADDING_HOURS,
        }
    }
}

/// Sample projected BAC from the initial value until past the safe limit
///
/// Points are evenly spaced over `[0, window]` with both ends included.
pub fn decay_curve(initial_bac: f64, model: &WidmarkModel, settings: &CurveSettings) -> DecayCurve {
    let time_to_safe_hours = time_to_safe(initial_bac, model);
    let window_hours = time_to_safe_hours.unwrap_or(0.0) + settings.padding_hours;

    let step = if settings.samples > 1 {
        window_hours / (settings.samples - 1) as f64
    } else {
        0.0
    };

    let points = (0..settings.samples)
        .map(|i| {
            // Pin the last sample to the window end to avoid accumulated drift
            let hours = if i + 1 == settings.samples {
                window_hours
            } else {
                i as f64 * step
            };
            CurvePoint {
                hours,
                bac_percent: bac_at(initial_bac, hours, model),
            }
        })
        .collect();

    tracing::debug!(
        "Sampled {} curve points over {:.2}h (time to safe: {:?})",
        settings.samples,
        window_hours,
        time_to_safe_hours
    );

    DecayCurve {
        time_to_safe_hours,
        window_hours,
        points,
    }
}
