//! Turning reqwest outcomes into [`BackendError`]s.

use reqwest::Response;
use serde_json::Value;
use store::backend::BackendError;

/// Error body fields the backends put a human readable message in.
const MESSAGE_FIELDS: &[&str] = &["message", "error", "detail"];

/// Longest plain-text body quoted back to the user.
const MAX_PLAIN_MESSAGE: usize = 200;

pub fn transport_error(e: reqwest::Error) -> BackendError {
    tracing::warn!("Request failed before a response: {}", e);
    BackendError::Transport(e.to_string())
}

/// Pass 2xx responses through; read the body of anything else into an error.
pub async fn ensure_success(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let url = response.url().clone();
    let body = response.text().await.unwrap_or_default();
    let message = error_message(&body, status.canonical_reason());
    tracing::warn!(status = status.as_u16(), %url, "Request rejected: {}", message);
    Err(BackendError::Status {
        status: status.as_u16(),
        message,
    })
}

/// Best message for an error body: a JSON message field, a short plain body,
/// or the status reason.
pub fn error_message(body: &str, reason: Option<&str>) -> String {
    let json = serde_json::from_str::<Value>(body).ok();
    let from_json = json.as_ref().and_then(|v| {
        MESSAGE_FIELDS
            .iter()
            .find_map(|key| v.get(*key).and_then(Value::as_str))
            .filter(|m| !m.is_empty())
    });
    if let Some(message) = from_json {
        return message.to_string();
    }
    let plain = body.trim();
    let quotable = !plain.is_empty() && plain.len() <= MAX_PLAIN_MESSAGE && !plain.starts_with('<');
    if json.is_none() && quotable {
        return plain.to_string();
    }
    reason.unwrap_or("request failed").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_message_wins() {
        assert_eq!(
            error_message(r#"{"status":401,"message":"이메일 또는 비밀번호가 올바르지 않습니다"}"#, Some("Unauthorized")),
            "이메일 또는 비밀번호가 올바르지 않습니다"
        );
        assert_eq!(error_message(r#"{"detail":"model offline"}"#, None), "model offline");
    }

    #[test]
    fn test_plain_and_empty_bodies() {
        assert_eq!(error_message("already joined", Some("Conflict")), "already joined");
        assert_eq!(error_message("", Some("Not Found")), "Not Found");
        assert_eq!(error_message("<html>502</html>", Some("Bad Gateway")), "Bad Gateway");
        assert_eq!(error_message(r#"{"message":""}"#, None), "request failed");
    }
}
