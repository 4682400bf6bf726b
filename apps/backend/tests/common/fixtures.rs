//! Request bodies for integration tests.

use serde_json::json;

/// Create a user register request body.
pub fn register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}

/// Create a card authoring request body.
pub fn create_card_request(question: &str, answer: &str) -> serde_json::Value {
    json!({ "question": question, "answer": answer })
}

/// Create a review submission body.
pub fn review_request(quality: i64) -> serde_json::Value {
    json!({ "quality": quality })
}

/// Create a stateless scheduling request body.
pub fn preview_request(
    card_id: Option<i64>,
    current_interval_days: i64,
    current_ease_factor: f64,
    quality: i64,
) -> serde_json::Value {
    json!({
        "card_id": card_id,
        "current_interval_days": current_interval_days,
        "current_ease_factor": current_ease_factor,
        "quality": quality
    })
}
