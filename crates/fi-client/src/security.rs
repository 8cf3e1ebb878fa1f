//! Encoding utilities for building Fluidinfo requests safely.
//!
//! ## URL Encoding
//!
//! User-provided values in URLs MUST be encoded. About values and tag paths
//! routinely contain `/`, spaces and non-ASCII characters, so every path
//! segment is encoded on its own:
//!
//! ```rust
//! use fluidinfo_client::security::url;
//!
//! let path = url::encode_path(&["about", "än/- object", "namespace", "tag"]);
//! assert_eq!(path, "about/%C3%A4n%2F-%20object/namespace/tag");
//! ```
//!
//! ## Query Escaping
//!
//! About values embedded in a Fluidinfo query are double-quoted string
//! literals and MUST be escaped:
//!
//! ```rust
//! use fluidinfo_client::security::query;
//!
//! assert_eq!(query::about("say \"hi\""), r#"fluiddb/about="say \"hi\"""#);
//! ```

/// URL encoding for path segments and query arguments.
pub mod url {
    /// Percent-encode a single path segment or argument.
    ///
    /// Everything except ASCII alphanumerics and `-_.~` is encoded, including
    /// `/`, so a segment can never introduce an extra path level.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fluidinfo_client::security::url;
    ///
    /// assert_eq!(url::encode_segment("a/b c"), "a%2Fb%20c");
    /// ```
    #[must_use]
    pub fn encode_segment(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Encode each segment independently and join them with `/`.
    #[must_use]
    pub fn encode_path<S: AsRef<str>>(segments: &[S]) -> String {
        segments
            .iter()
            .map(|s| encode_segment(s.as_ref()))
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Build a `?`-prefixed query string from ordered pairs.
    ///
    /// Names and values are both percent-encoded. Returns an empty string
    /// when there are no pairs.
    ///
    /// # Example
    ///
    /// ```rust
    /// use fluidinfo_client::security::url;
    ///
    /// let pairs = vec![
    ///     ("tag".to_string(), "foo/bar".to_string()),
    ///     ("tag".to_string(), "baz/qux".to_string()),
    /// ];
    /// assert_eq!(url::encode_args(&pairs), "?tag=foo%2Fbar&tag=baz%2Fqux");
    /// ```
    #[must_use]
    pub fn encode_args(pairs: &[(String, String)]) -> String {
        if pairs.is_empty() {
            return String::new();
        }
        let joined = pairs
            .iter()
            .map(|(name, value)| format!("{}={}", encode_segment(name), encode_segment(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{}", joined)
    }
}

/// Escaping for the Fluidinfo query language.
pub mod query {
    /// Escape a value for use inside a double-quoted query string literal.
    ///
    /// Backslashes become `\\` and double quotes become `\"`.
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 8);
        for ch in value.chars() {
            match ch {
                '\\' => escaped.push_str("\\\\"),
                '"' => escaped.push_str("\\\""),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Query matching the object with the given about value.
    #[must_use]
    pub fn about(about: &str) -> String {
        format!("fluiddb/about=\"{}\"", escape_string(about))
    }

    /// Query matching the object with the given id.
    #[must_use]
    pub fn id(id: &str) -> String {
        format!("fluiddb/id=\"{}\"", escape_string(id))
    }
}
