//! Assertion utilities for testing.
//!
//! Helpers for checking the shapes the API promises and for comparing
//! floating-point temperatures.

use serde_json::Value;

/// Default epsilon for floating-point comparisons
pub const DEFAULT_EPSILON: f64 = 1e-9;

/// Assert that two floating-point values are approximately equal.
pub fn assert_approx_eq(actual: f64, expected: f64, epsilon: Option<f64>) {
    let epsilon = epsilon.unwrap_or(DEFAULT_EPSILON);
    let diff = (actual - expected).abs();

    assert!(
        diff <= epsilon,
        "Values not approximately equal: actual = {}, expected = {}, diff = {}, epsilon = {}",
        actual,
        expected,
        diff,
        epsilon
    );
}

/// Assert a `[min, max, avg]` stats array, all present.
pub fn assert_stats(actual: &Value, min: f64, max: f64, avg: f64) {
    let values = actual.as_array().expect("stats must be an array");
    assert_eq!(values.len(), 3, "stats must have three elements: {}", actual);

    for (value, expected) in values.iter().zip([min, max, avg]) {
        let value = value.as_f64().expect("stats element must be a number");
        assert_approx_eq(value, expected, None);
    }
    assert!(min <= avg && avg <= max);
}

/// Assert the interleaved `[date, tobs, ...]` layout and return the pairs.
pub fn assert_interleaved(actual: &Value) -> Vec<(String, f64)> {
    let values = actual.as_array().expect("tobs must be an array");
    assert_eq!(values.len() % 2, 0, "tobs must have an even length");

    values
        .chunks(2)
        .map(|pair| {
            let date = pair[0].as_str().expect("even index must be a date string");
            let tobs = pair[1].as_f64().expect("odd index must be a temperature");
            (date.to_string(), tobs)
        })
        .collect()
}
