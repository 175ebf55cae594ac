use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::validation::WebhookJson;
use crate::AppState;

pub const RECEIVED_PREFIX: &str = "Received webhook payload: ";

/// Inbound body. Must be a JSON object with a string `text`; arrays are rejected.
#[derive(Deserialize, Debug)]
#[serde(try_from = "Map<String, Value>")]
pub struct WebhookPayload {
    pub text: String,
}

#[derive(Deserialize)]
struct PayloadObject {
    text: String,
}

impl TryFrom<Map<String, Value>> for WebhookPayload {
    type Error = serde_json::Error;

    fn try_from(object: Map<String, Value>) -> Result<Self, Self::Error> {
        let PayloadObject { text } = serde_json::from_value(Value::Object(object))?;
        Ok(Self { text })
    }
}

#[derive(Serialize, Debug, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum AckStatus {
    Success,
}

#[derive(Serialize, Debug, PartialEq, Eq)]
pub struct WebhookAck {
    pub status: AckStatus,
}

impl WebhookAck {
    pub fn success() -> Self {
        Self {
            status: AckStatus::Success,
        }
    }
}

pub async fn handler(
    State(state): State<AppState>,
    WebhookJson(payload): WebhookJson<WebhookPayload>,
) -> Json<WebhookAck> {
    let message = format!("{RECEIVED_PREFIX}{}", payload.text);

    tracing::info!("{}", message);
    state.console.emit(&message);

    Json(WebhookAck::success())
}
