//! Shapes returned by the values protocol.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use fluidinfo_client::{ApiResponse, Error, ErrorKind, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A protocol result together with the response it was built from.
#[derive(Debug, Clone)]
pub struct Reply<T> {
    /// The normalized response; its `data` still holds the raw JSON.
    pub response: ApiResponse,
    /// The reshaped result.
    pub data: T,
}

impl<T> Reply<T> {
    pub fn new(response: ApiResponse, data: T) -> Self {
        Self { response, data }
    }

    /// Discard the response and keep the reshaped result.
    pub fn into_data(self) -> T {
        self.data
    }
}

/// Descriptor of a tag value stored with its own MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpaqueValue {
    #[serde(rename = "value-type")]
    pub value_type: String,
    pub size: u64,
    /// Where the value itself can be fetched.
    #[serde(default)]
    pub url: String,
}

/// The value of one tag on one object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagValue {
    Opaque(OpaqueValue),
    Primitive(Value),
}

impl TagValue {
    /// Classify a tag entry as returned by the service.
    ///
    /// An object with a `value` key (even a null one) is a wrapped primitive.
    /// An object with a `value-type` key describes an opaque value, which
    /// gains `url`. Anything else that is not an object is already a bare
    /// primitive.
    pub(crate) fn from_entry(entry: Value, url: impl FnOnce() -> String) -> Result<Self> {
        match entry {
            Value::Object(mut fields) => {
                if let Some(value) = fields.remove("value") {
                    return Ok(TagValue::Primitive(value));
                }
                let mut opaque: OpaqueValue = serde_json::from_value(Value::Object(fields))?;
                opaque.url = url();
                Ok(TagValue::Opaque(opaque))
            }
            other => Ok(TagValue::Primitive(other)),
        }
    }

    /// The primitive value, if this is not an opaque value.
    pub fn as_primitive(&self) -> Option<&Value> {
        match self {
            TagValue::Primitive(value) => Some(value),
            TagValue::Opaque(_) => None,
        }
    }

    /// The opaque descriptor, if any.
    pub fn as_opaque(&self) -> Option<&OpaqueValue> {
        match self {
            TagValue::Opaque(opaque) => Some(opaque),
            TagValue::Primitive(_) => None,
        }
    }
}

/// Location of an opaque tag value.
pub(crate) fn opaque_value_url(base_url: &str, object_id: &str, tag: &str) -> String {
    format!("{}objects/{}/{}", base_url, object_id, tag)
}

/// One object matched by a query, flattened.
///
/// Serializes as `{"id": ..., "<tag/path>": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryObject {
    pub id: String,
    #[serde(flatten)]
    pub tags: BTreeMap<String, TagValue>,
}

impl QueryObject {
    /// The value of a tag on this object.
    pub fn get(&self, tag: &str) -> Option<&TagValue> {
        self.tags.get(tag)
    }
}

/// An object created by `create_object`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedObject {
    pub id: String,
    #[serde(rename = "fluiddb/about", default, skip_serializing_if = "Option::is_none")]
    pub about: Option<String>,
}

/// One entry of a recent-activity listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentActivity {
    pub username: String,
    pub tag: String,
    pub id: String,
    pub about: Option<String>,
    pub value: TagValue,
    #[serde(rename = "updated-at")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawActivity {
    username: String,
    tag: String,
    id: String,
    #[serde(default)]
    about: Option<String>,
    #[serde(default)]
    value: Value,
    #[serde(rename = "updated-at")]
    updated_at: String,
}

impl RawActivity {
    pub(crate) fn into_activity(self, base_url: &str) -> Result<RecentActivity> {
        let value = TagValue::from_entry(self.value, || {
            opaque_value_url(base_url, &self.id, &self.tag)
        })?;
        let updated_at = parse_timestamp(&self.updated_at)?;

        Ok(RecentActivity {
            username: self.username,
            tag: self.tag,
            id: self.id,
            about: self.about,
            value,
            updated_at,
        })
    }
}

/// Parse an RFC 3339 timestamp, or a naive ISO-8601 one taken as UTC.
pub(crate) fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            Error::with_source(
                ErrorKind::Json(format!("invalid updated-at timestamp {:?}", raw)),
                e,
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};
    use serde_json::json;

    #[test]
    fn test_wrapped_value_is_primitive() {
        let value = TagValue::from_entry(json!({"value": 7}), || unreachable!()).unwrap();
        assert_eq!(value, TagValue::Primitive(json!(7)));

        let value = TagValue::from_entry(json!({"value": null}), || unreachable!()).unwrap();
        assert_eq!(value.as_primitive(), Some(&Value::Null));
    }

    #[test]
    fn test_descriptor_is_opaque() {
        let value = TagValue::from_entry(
            json!({"value-type": "text/html", "size": 123}),
            || opaque_value_url("https://fluiddb.fluidinfo.com/", "abc", "ntoll/page"),
        )
        .unwrap();
        let opaque = value.as_opaque().unwrap();
        assert_eq!(opaque.value_type, "text/html");
        assert_eq!(opaque.size, 123);
        assert_eq!(opaque.url, "https://fluiddb.fluidinfo.com/objects/abc/ntoll/page");
    }

    #[test]
    fn test_bare_value_is_primitive() {
        let value = TagValue::from_entry(json!(["a", "b"]), || unreachable!()).unwrap();
        assert_eq!(value, TagValue::Primitive(json!(["a", "b"])));
    }

    #[test]
    fn test_unrecognized_object_is_an_error() {
        assert!(TagValue::from_entry(json!({"foo": "bar"}), String::new).is_err());
    }

    #[test]
    fn test_query_object_serializes_flat() {
        let mut tags = BTreeMap::new();
        tags.insert("ntoll/rating".to_string(), TagValue::Primitive(json!(7)));
        tags.insert(
            "ntoll/page".to_string(),
            TagValue::Opaque(OpaqueValue {
                value_type: "text/html".to_string(),
                size: 10,
                url: "https://localhost/objects/abc/ntoll/page".to_string(),
            }),
        );
        let object = QueryObject {
            id: "abc".to_string(),
            tags,
        };

        assert_eq!(
            serde_json::to_value(&object).unwrap(),
            json!({
                "id": "abc",
                "ntoll/rating": 7,
                "ntoll/page": {
                    "value-type": "text/html",
                    "size": 10,
                    "url": "https://localhost/objects/abc/ntoll/page"
                }
            })
        );
    }

    #[test]
    fn test_created_object_about_field() {
        let with_about = CreatedObject {
            id: "abc".to_string(),
            about: Some("paris".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&with_about).unwrap(),
            json!({"id": "abc", "fluiddb/about": "paris"})
        );

        let without = CreatedObject {
            id: "abc".to_string(),
            about: None,
        };
        assert_eq!(serde_json::to_value(&without).unwrap(), json!({"id": "abc"}));
    }

    #[test]
    fn test_parse_timestamps() {
        let parsed = parse_timestamp("2011-09-01T14:03:21.435Z").unwrap();
        assert_eq!(parsed.year(), 2011);
        assert_eq!(parsed.hour(), 14);

        let naive = parse_timestamp("2011-09-01T14:03:21.435172").unwrap();
        assert_eq!(naive.minute(), 3);
        assert_eq!(naive.second(), 21);

        let offset = parse_timestamp("2011-09-01T16:03:21+02:00").unwrap();
        assert_eq!(offset.hour(), 14);

        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Json(_)));
    }

    #[test]
    fn test_raw_activity_conversion() {
        let raw: RawActivity = serde_json::from_value(json!({
            "username": "ntoll",
            "tag": "ntoll/page",
            "id": "abc",
            "about": null,
            "value": {"value-type": "text/html", "size": 5},
            "updated-at": "2011-09-01T14:03:21.435172"
        }))
        .unwrap();

        let activity = raw.into_activity("https://localhost/").unwrap();
        assert_eq!(activity.about, None);
        assert_eq!(
            activity.value.as_opaque().unwrap().url,
            "https://localhost/objects/abc/ntoll/page"
        );
    }
}
