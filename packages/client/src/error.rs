use serde::Deserialize;

use twinreg_model::Message;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// No usable endpoint or malformed base address. Raised before any
    /// network attempt.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Connection or timeout failure at the transport level.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success status with server-reported diagnostics.
    #[error("remote error (status {status}): {}", format_messages(.messages))]
    Remote { status: u16, messages: Vec<Message> },

    /// Payload did not decode to the expected shape.
    #[error("serialization error: {message}")]
    Serialization { message: String },

    #[error("not found: {what}")]
    NotFound { what: String },

    #[error("conflict: {what}")]
    Conflict { what: String },

    #[error("invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),
}

fn format_messages(messages: &[Message]) -> String {
    messages
        .iter()
        .map(Message::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Build a Remote error from a non-success response body.
    ///
    /// The body is expected to carry a diagnostics list; anything else is
    /// folded into a single error message so nothing is dropped.
    pub(crate) fn remote(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            #[serde(default)]
            messages: Vec<Message>,
        }

        let messages = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) if !parsed.messages.is_empty() => parsed.messages,
            _ => {
                let text = body.trim();
                if text.is_empty() {
                    Vec::new()
                } else {
                    vec![Message::error(text)]
                }
            }
        };
        Error::Remote { status, messages }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use twinreg_model::Severity;

    #[test]
    fn remote_parses_diagnostics_list() {
        let body = r#"{"messages": [{"severity": "error", "text": "submodel missing"}]}"#;
        let Error::Remote { status, messages } = Error::remote(422, body) else {
            panic!("expected Remote");
        };
        assert_eq!(status, 422);
        assert_eq!(messages[0].severity, Severity::Error);
        assert_eq!(messages[0].text, "submodel missing");
    }

    #[test]
    fn remote_falls_back_to_raw_body() {
        let Error::Remote { messages, .. } = Error::remote(500, "boom") else {
            panic!("expected Remote");
        };
        assert_eq!(messages[0].text, "boom");
    }

    #[test]
    fn remote_with_empty_body_keeps_status() {
        let err = Error::remote(503, "");
        assert!(err.to_string().contains("503"));
    }

    #[test]
    fn display_includes_diagnostics() {
        let err = Error::remote(400, r#"{"messages":[{"severity":"fatal","text":"no"}]}"#);
        assert!(err.to_string().contains("fatal: no"));
    }
}
