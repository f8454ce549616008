//! Test statuses as configured on the server.

use std::sync::Arc;

use serde_json::Value;

use crate::error::ApiError;
use crate::record::Fields;
use crate::transport::Transport;

/// A result status such as `passed` or `blocked`, including custom ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    id: u64,
    name: String,
    label: String,
    color_bright: u32,
    color_medium: u32,
    color_dark: u32,
    is_final: bool,
    is_system: bool,
    is_untested: bool,
}

impl Status {
    pub(crate) const ENTITY: &'static str = "status";

    pub fn from_json(_transport: Arc<dyn Transport>, value: &Value) -> Result<Self, ApiError> {
        let fields = Fields::from_value(Self::ENTITY, value)?;
        Ok(Self {
            id: fields.required("id")?,
            color_bright: fields.required("color_bright")?,
            color_dark: fields.required("color_dark")?,
            color_medium: fields.required("color_medium")?,
            is_final: fields.required("is_final")?,
            is_system: fields.required("is_system")?,
            is_untested: fields.required("is_untested")?,
            label: fields.required("label")?,
            name: fields.required("name")?,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// System name, e.g. `passed`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display label, e.g. `Passed`.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Colors are 24-bit RGB values.
    pub fn color_bright(&self) -> u32 {
        self.color_bright
    }

    pub fn color_medium(&self) -> u32 {
        self.color_medium
    }

    pub fn color_dark(&self) -> u32 {
        self.color_dark
    }

    pub fn is_final(&self) -> bool {
        self.is_final
    }

    pub fn is_system(&self) -> bool {
        self.is_system
    }

    pub fn is_untested(&self) -> bool {
        self.is_untested
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::{dummy_status, without, FakeTransport};

    #[test]
    fn parses_every_attribute() {
        let status = Status::from_json(FakeTransport::new(json!([])), &dummy_status(5)).unwrap();
        assert_eq!(status.id(), 5);
        assert_eq!(status.color_bright(), 12709313);
        assert_eq!(status.color_dark(), 6667107);
        assert_eq!(status.color_medium(), 9820525);
        assert!(status.is_final());
        assert!(status.is_system());
        assert!(!status.is_untested());
        assert_eq!(status.label(), "Passed");
        assert_eq!(status.name(), "passed");
    }

    #[test]
    fn empty_object_fails() {
        assert!(Status::from_json(FakeTransport::new(json!([])), &json!({})).is_err());
    }

    #[test]
    fn missing_flag_fails() {
        let data = without(dummy_status(5), "is_untested");
        let err = Status::from_json(FakeTransport::new(json!([])), &data).unwrap_err();
        assert!(matches!(err, ApiError::MissingField { entity: "status", .. }));
    }

    #[test]
    fn negative_color_is_invalid() {
        let mut data = dummy_status(5);
        data["color_dark"] = json!(-1);
        let err = Status::from_json(FakeTransport::new(json!([])), &data).unwrap_err();
        assert!(matches!(
            err,
            ApiError::InvalidField { entity: "status", ref key, .. } if key == "color_dark"
        ));
    }

    #[test]
    fn each_missing_key_is_reported() {
        let keys = [
            "id", "name", "label", "color_bright", "color_medium", "color_dark", "is_final",
            "is_system", "is_untested",
        ];
        for key in keys {
            let data = without(dummy_status(5), key);
            let err = Status::from_json(FakeTransport::new(json!([])), &data).unwrap_err();
            assert!(
                matches!(err, ApiError::MissingField { entity: "status", key: ref k } if k == key),
                "{key}: got {err:?}"
            );
        }
    }
}
