//! Error type shared by the animator core and the browser driver.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum AnimatorError {
    /// A config value was out of range or not finite.
    #[error("invalid config value for '{field}': {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("failed to parse animator config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("no global window available")]
    NoWindow,

    #[error("canvas does not provide a 2d context")]
    NoContext,

    /// The drawing backend rejected a call.
    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("failed to schedule animation frame: {0}")]
    Schedule(String),

    #[error("failed to update '{event}' listener: {reason}")]
    Listener { event: &'static str, reason: String },
}

impl AnimatorError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        AnimatorError::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }
}

impl From<AnimatorError> for JsValue {
    fn from(err: AnimatorError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

/// Renders a JS exception for inclusion in an `AnimatorError`.
pub(crate) fn describe_js(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_config_names_the_field() {
        let err = AnimatorError::invalid("link_distance", "must be positive");
        let msg = format!("{}", err);
        assert!(msg.contains("link_distance"), "missing field in: {}", msg);
        assert!(msg.contains("must be positive"), "missing reason in: {}", msg);
    }

    #[test]
    fn config_parse_wraps_serde_error() {
        let serde_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: AnimatorError = serde_err.into();
        assert!(matches!(err, AnimatorError::ConfigParse(_)));
        assert!(format!("{}", err).starts_with("failed to parse animator config"));
    }

    #[test]
    fn listener_error_includes_event() {
        let err = AnimatorError::Listener {
            event: "resize",
            reason: "denied".into(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("resize") && msg.contains("denied"), "got: {}", msg);
    }

    #[test]
    fn animator_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnimatorError>();
    }
}
