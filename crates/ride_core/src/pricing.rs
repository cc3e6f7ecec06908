//! Simple pricing model for quoting trip fares.

/// Per-minute rate in currency units.
pub const PER_MINUTE_RATE: f64 = 0.5;

/// Quote a fare for a trip taking `minutes`, formatted to two decimals.
///
/// Formula: `fare = minutes * PER_MINUTE_RATE`
///
/// A fixed linear model: no base fare, no minimum fare, not configurable.
pub fn fare_for_minutes(minutes: f64) -> String {
    format!("{:.2}", minutes * PER_MINUTE_RATE)
}
