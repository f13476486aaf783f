//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert an error response carries the JSON `{status, error}` body
pub fn assert_json_error(response: &TestResponse, expected: StatusCode) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["status"].as_u64(),
        Some(expected.as_u16() as u64),
        "Expected JSON status {}, got {:?}. Full response: {}",
        expected.as_u16(),
        json["status"],
        serde_json::to_string_pretty(&json).unwrap()
    );
    assert!(json["error"].is_string(), "Expected an error message");
}

/// Assert distances in a ranked list never decrease
pub fn assert_ranked_by_distance(items: &[serde_json::Value]) {
    let distances: Vec<f64> = items
        .iter()
        .map(|m| m["distance"].as_f64().expect("distance"))
        .collect();
    for pair in distances.windows(2) {
        assert!(
            pair[0] <= pair[1],
            "Results not sorted by distance: {distances:?}"
        );
    }
}

/// Assert a recipe's component shares are valid and sum to 100
pub fn assert_valid_recipe(recipe: &serde_json::Value, max_components: usize) {
    let components = recipe["components"].as_array().expect("components");
    assert!(
        (2..=max_components).contains(&components.len()),
        "Recipe has {} components: {recipe}",
        components.len()
    );
    let total: f64 = components
        .iter()
        .map(|c| {
            let pct = c["percentage"].as_f64().expect("percentage");
            assert!(pct > 0.0, "Non-positive share in {recipe}");
            pct
        })
        .sum();
    assert!((total - 100.0).abs() < 1e-6, "Shares sum to {total}: {recipe}");
}
