use std::collections::BTreeMap;
use std::future::Future;

use fluidinfo_client::{ApiResponse, RequestOptions, Result, Transport};
use serde_json::{json, Map, Value};
use tracing::instrument;

use super::query::values_request;
use crate::options::{object_query, required, DeleteOptions, TagOptions, UpdateOptions};

/// Body of a `PUT /values` request with a single update specification.
///
/// Each value is wrapped as `{"value": v}`; a missing value becomes null.
pub(crate) fn update_body(query: &str, values: &BTreeMap<String, Option<Value>>) -> Value {
    let spec: Map<String, Value> = values
        .iter()
        .map(|(tag, value)| {
            let value = value.clone().unwrap_or(Value::Null);
            (tag.clone(), json!({ "value": value }))
        })
        .collect();

    json!({ "queries": [[query, spec]] })
}

impl<T: Transport> super::FluidinfoClient<T> {
    /// Set tag values on every object matching a query.
    ///
    /// Both `values` and `query` are required.
    #[instrument(skip(self, options))]
    pub fn update(
        &self,
        options: &UpdateOptions,
    ) -> Result<impl Future<Output = Result<ApiResponse>> + Send + 'static> {
        let values = required(options.values.as_ref(), "values")?;
        let query = required(options.query.as_deref(), "query")?;
        self.put_values(query, values)
    }

    /// Set tag values on the single object identified by about value or id.
    ///
    /// Exactly one of `about` and `id` must be given.
    #[instrument(skip(self, options))]
    pub fn tag(
        &self,
        options: &TagOptions,
    ) -> Result<impl Future<Output = Result<ApiResponse>> + Send + 'static> {
        let values = required(options.values.as_ref(), "values")?;
        let query = object_query(options.about.as_deref(), options.id.as_deref())?;
        self.put_values(&query, values)
    }

    /// Remove tag values from every object matching a query.
    ///
    /// Both `tags` and `query` are required.
    #[instrument(skip(self, options))]
    pub fn del(
        &self,
        options: &DeleteOptions,
    ) -> Result<impl Future<Output = Result<ApiResponse>> + Send + 'static> {
        let tags = required(options.tags.as_deref(), "tags")?;
        let query = required(options.query.as_deref(), "query")?;
        self.session.delete(&values_request(tags, query))
    }

    fn put_values(
        &self,
        query: &str,
        values: &BTreeMap<String, Option<Value>>,
    ) -> Result<impl Future<Output = Result<ApiResponse>> + Send + 'static> {
        let options = RequestOptions::path("values").json(update_body(query, values));
        self.session.put(&options)
    }
}
