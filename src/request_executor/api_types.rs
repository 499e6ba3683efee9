/// GIPHY error payload types for deserialization.
///
/// The API reports failures either as a top-level `message` or inside the
/// `meta` block that accompanies every response.
use serde::Deserialize;
use serde_json::Value;

/// Body returned alongside a non-success status code.
///
/// Fields are kept as raw JSON so that one mis-shaped field does not hide
/// the message carried by the other.
#[derive(Debug, Deserialize)]
pub(super) struct ApiErrorPayload {
    /// Plain error message (e.g. "Invalid authentication credentials")
    #[serde(default)]
    pub message: Option<Value>,
    /// Response metadata block, `msg` holds a human readable status message
    #[serde(default)]
    pub meta: Option<Value>,
}

impl ApiErrorPayload {
    /// Returns the first non-empty string among `message` and `meta.msg`
    fn text(&self) -> Option<String> {
        let message = self.message.as_ref().and_then(Value::as_str);
        let meta_msg = self
            .meta
            .as_ref()
            .and_then(|meta| meta.get("msg"))
            .and_then(Value::as_str);

        [message, meta_msg]
            .into_iter()
            .flatten()
            .find(|m| !m.trim().is_empty())
            .map(str::to_string)
    }
}

/// Extracts the most useful message text from an error response body.
///
/// Prefers the JSON `message` field, then `meta.msg`, then the raw body text.
/// Returns `None` for an empty body.
pub(super) fn error_message(body: &str) -> Option<String> {
    if let Ok(payload) = serde_json::from_str::<ApiErrorPayload>(body) {
        if let Some(message) = payload.text() {
            return Some(message);
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.starts_with('{') {
        None
    } else {
        Some(trimmed.to_string())
    }
}
