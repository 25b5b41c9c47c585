pub mod advice;
pub mod alert;
pub mod appearance;
pub mod data_sync;
pub mod decision;
pub mod score;

pub use advice::compute_activity_advice;
pub use alert::{compute_atmospheric_alert, compute_improvement_estimate};
pub use appearance::compute_theme;
pub use data_sync::SnapshotLoader;
pub use decision::compute_decision;
pub use score::compute_environmental_score;

use crate::models::{AirQualityRecord, DerivedSummary, DisplayMode, WeatherRecord};
use chrono::NaiveDateTime;

/// Runs every derivation over one snapshot. Pure; call again whenever the
/// snapshot or the display mode changes.
pub fn derive_summary(
    weather: Option<&WeatherRecord>,
    aqi: Option<&AirQualityRecord>,
    mode: DisplayMode,
    now: NaiveDateTime,
) -> DerivedSummary {
    DerivedSummary {
        score: compute_environmental_score(weather, aqi),
        advice: compute_activity_advice(weather, aqi),
        alert: compute_atmospheric_alert(weather, aqi),
        improvement: compute_improvement_estimate(aqi, now),
        decision: compute_decision(weather, aqi),
        theme: compute_theme(weather, aqi, mode),
    }
}
