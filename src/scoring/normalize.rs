/// Bound `value` to `[low, high]`.
pub fn clamp(value: f64, low: f64, high: f64) -> f64 {
    low.max(high.min(value))
}

/// Map `value` linearly onto [0, 1] relative to `[min, max]`, clamped at both ends.
///
/// A degenerate range (`max <= min`) always yields 0.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max <= min {
        return 0.0;
    }
    clamp((value - min) / (max - min), 0.0, 1.0)
}

/// Round to two decimal places, ties to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
