//! Primitive value classification and Content-Type resolution.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::request::{Payload, RequestMethod};
use crate::{JSON_CONTENT_TYPE, VALUE_CONTENT_TYPE};

/// Returns true if `value` can be stored as a primitive tag value.
///
/// Numbers, strings, booleans and `null` are primitive. An array is
/// primitive only when every element is a string, so the empty array is
/// primitive too. Objects and mixed arrays are not.
pub fn is_primitive(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => true,
        Value::Array(items) => items.iter().all(Value::is_string),
        Value::Object(_) => false,
    }
}

/// Returns true if the Content-Type denotes a JSON body.
///
/// Parameters such as `; charset=utf-8` are ignored and the comparison is
/// case-insensitive.
pub fn is_json_content_type(content_type: &str) -> bool {
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim();
    media_type.eq_ignore_ascii_case(JSON_CONTENT_TYPE)
        || media_type.eq_ignore_ascii_case(VALUE_CONTENT_TYPE)
}

/// Inputs to Content-Type resolution.
#[derive(Debug, Clone, Copy)]
pub struct ContentTypeQuery<'a> {
    pub method: RequestMethod,
    /// Encoded path relative to the base URL.
    pub path: &'a str,
    pub explicit: Option<&'a str>,
    pub body: Option<&'a Payload>,
}

/// Decide the Content-Type header for a request.
///
/// A PUT to `objects/…` or `about/…` writes a tag value: the explicit type
/// wins, a primitive JSON payload gets the tag-value MIME type, and anything
/// else is a `Value` error. Every other request with a payload is JSON.
/// Requests without a payload get no Content-Type.
pub fn detect_content_type(query: &ContentTypeQuery<'_>) -> Result<Option<String>> {
    if query.method == RequestMethod::Put && is_tag_value_path(query.path) {
        if let Some(explicit) = query.explicit {
            return Ok(Some(explicit.to_string()));
        }
        return match query.body {
            Some(Payload::Json(value)) if is_primitive(value) => {
                Ok(Some(VALUE_CONTENT_TYPE.to_string()))
            }
            _ => Err(Error::value("Must supply Content-Type")),
        };
    }

    if query.body.is_some() {
        return Ok(Some(JSON_CONTENT_TYPE.to_string()));
    }

    Ok(None)
}

fn is_tag_value_path(path: &str) -> bool {
    path.starts_with("objects/") || path.starts_with("about/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn put(path: &str, body: Option<&Payload>, explicit: Option<&str>) -> Result<Option<String>> {
        detect_content_type(&ContentTypeQuery {
            method: RequestMethod::Put,
            path,
            explicit,
            body,
        })
    }

    #[test]
    fn test_scalars_are_primitive() {
        for value in [json!(1), json!(1.1), json!(false), json!("hello"), json!(null)] {
            assert!(is_primitive(&value), "{value} should be primitive");
        }
    }

    #[test]
    fn test_string_arrays_are_primitive() {
        assert!(is_primitive(&json!(["a", "b", "c"])));
        assert!(is_primitive(&json!([])));
    }

    #[test]
    fn test_composites_are_not_primitive() {
        assert!(!is_primitive(&json!(["a", "b", 1])));
        assert!(!is_primitive(&json!([["a"]])));
        assert!(!is_primitive(&json!({"foo": "bar"})));
        assert!(!is_primitive(&json!({})));
    }

    #[test]
    fn test_primitive_put_to_objects_and_about() {
        let body = Payload::Json(json!(1.234));
        for path in ["objects/fakeObjectID/username/tag", "about/fakeAboutValue/username/tag"] {
            assert_eq!(
                put(path, Some(&body), None).unwrap().as_deref(),
                Some(VALUE_CONTENT_TYPE)
            );
        }
    }

    #[test]
    fn test_explicit_content_type_wins_for_tag_values() {
        let body = Payload::Text("<html><body><h1>Hello, world!</h1></body></html>".into());
        assert_eq!(
            put("objects/x/y/z", Some(&body), Some("text/html")).unwrap().as_deref(),
            Some("text/html")
        );
        assert_eq!(
            put("about/x/y/z", None, Some("text/html")).unwrap().as_deref(),
            Some("text/html")
        );
    }

    #[test]
    fn test_non_primitive_tag_value_needs_content_type() {
        let body = Payload::Json(json!({"foo": "bar"}));
        let err = put("objects/x/y/z", Some(&body), None).unwrap_err();
        assert!(err.is_value_error());

        let err = put("about/x/y/z", Some(&Payload::Text("raw".into())), None).unwrap_err();
        assert!(err.is_value_error());

        assert!(put("objects/x/y/z", None, None).unwrap_err().is_value_error());
    }

    #[test]
    fn test_other_payloads_default_to_json() {
        let body = Payload::Json(json!({"name": "foo", "description": "bar"}));
        let resolved = detect_content_type(&ContentTypeQuery {
            method: RequestMethod::Post,
            path: "namespaces/test",
            explicit: None,
            body: Some(&body),
        })
        .unwrap();
        assert_eq!(resolved.as_deref(), Some(JSON_CONTENT_TYPE));

        // A PUT elsewhere than a tag-value endpoint is plain JSON as well.
        assert_eq!(
            put("values", Some(&body), None).unwrap().as_deref(),
            Some(JSON_CONTENT_TYPE)
        );
    }

    #[test]
    fn test_no_payload_no_content_type() {
        let resolved = detect_content_type(&ContentTypeQuery {
            method: RequestMethod::Get,
            path: "namespaces/test",
            explicit: None,
            body: None,
        })
        .unwrap();
        assert_eq!(resolved, None);
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let body = Payload::Json(json!(["a", "b"]));
        let query = ContentTypeQuery {
            method: RequestMethod::Put,
            path: "objects/1/ntoll/tags",
            explicit: None,
            body: Some(&body),
        };
        let first = detect_content_type(&query).unwrap();
        let second = detect_content_type(&query).unwrap();
        assert_eq!(first, second);
        assert_eq!(is_primitive(&json!(["a"])), is_primitive(&json!(["a"])));
    }

    #[test]
    fn test_json_content_type_detection() {
        assert!(is_json_content_type("application/json"));
        assert!(is_json_content_type("application/json; charset=utf-8"));
        assert!(is_json_content_type("application/vnd.fluiddb.value+json"));
        assert!(is_json_content_type("Application/JSON"));
        assert!(!is_json_content_type("text/html"));
        assert!(!is_json_content_type(""));
    }
}
