//! Field extraction shared by every record type.
//!
//! # Design
//! Records are built from a `serde_json::Map` by pulling named keys one at a
//! time. The first absent or mistyped key short-circuits construction through
//! `?`, so a record either has every field or does not exist. A present
//! `null` counts as present; nullable attributes are `Option<T>`.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::ApiError;
use crate::transport::Transport;

const CUSTOM_PREFIX: &str = "custom_";

/// Borrowed view over one JSON object, tagged with the entity it should
/// become so errors can say what failed to parse.
pub(crate) struct Fields<'a> {
    entity: &'static str,
    map: &'a Map<String, Value>,
}

impl<'a> Fields<'a> {
    pub(crate) fn from_value(entity: &'static str, value: &'a Value) -> Result<Self, ApiError> {
        match value {
            Value::Object(map) => Ok(Self { entity, map }),
            other => Err(ApiError::Deserialization(format!(
                "expected a JSON object for {entity} data, got {}",
                kind(other)
            ))),
        }
    }

    pub(crate) fn required<T: DeserializeOwned>(&self, key: &str) -> Result<T, ApiError> {
        let value = self.map.get(key).ok_or_else(|| ApiError::MissingField {
            entity: self.entity,
            key: key.to_string(),
        })?;
        T::deserialize(value).map_err(|e| ApiError::InvalidField {
            entity: self.entity,
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    /// Every `custom_*` key with the prefix stripped. A bare `custom_` key
    /// has no name left and is skipped.
    pub(crate) fn custom(&self) -> BTreeMap<String, Value> {
        self.map
            .iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(CUSTOM_PREFIX)
                    .filter(|name| !name.is_empty())
                    .map(|name| (name.to_string(), value.clone()))
            })
            .collect()
    }
}

/// Map every element of a JSON array through `parse`, keeping server order.
pub(crate) fn parse_list<T>(
    transport: &Arc<dyn Transport>,
    entity: &'static str,
    response: Value,
    parse: fn(Arc<dyn Transport>, &Value) -> Result<T, ApiError>,
) -> Result<Vec<T>, ApiError> {
    match response {
        Value::Array(items) => items
            .iter()
            .map(|item| parse(Arc::clone(transport), item))
            .collect(),
        other => Err(ApiError::Deserialization(format!(
            "expected a JSON array of {entity} data, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn required_reads_present_key() {
        let value = json!({"id": 3, "name": "alpha"});
        let fields = Fields::from_value("project", &value).unwrap();
        assert_eq!(fields.required::<u64>("id").unwrap(), 3);
        assert_eq!(fields.required::<String>("name").unwrap(), "alpha");
    }

    #[test]
    fn null_counts_as_present() {
        let value = json!({"milestone_id": null});
        let fields = Fields::from_value("run", &value).unwrap();
        assert_eq!(fields.required::<Option<u64>>("milestone_id").unwrap(), None);
    }

    #[test]
    fn absent_key_is_missing_field() {
        let value = json!({});
        let fields = Fields::from_value("suite", &value).unwrap();
        let err = fields.required::<Option<u64>>("milestone_id").unwrap_err();
        assert!(matches!(
            err,
            ApiError::MissingField { entity: "suite", ref key } if key == "milestone_id"
        ));
    }

    #[test]
    fn mistyped_key_is_invalid_field() {
        let value = json!({"id": "three"});
        let fields = Fields::from_value("case", &value).unwrap();
        let err = fields.required::<u64>("id").unwrap_err();
        assert!(matches!(err, ApiError::InvalidField { entity: "case", .. }));
    }

    #[test]
    fn non_object_is_rejected() {
        let value = json!([1, 2]);
        let err = Fields::from_value("status", &value).err().unwrap();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn custom_strips_prefix_and_ignores_other_keys() {
        let value = json!({
            "id": 1,
            "custom_steps": "press",
            "custom_status1_count": 0,
            "custom_": "nameless",
            "not_custom_x": 1,
        });
        let fields = Fields::from_value("test", &value).unwrap();
        let custom = fields.custom();
        assert_eq!(custom.len(), 2);
        assert_eq!(custom["steps"], json!("press"));
        assert_eq!(custom["status1_count"], json!(0));
    }
}
