use std::collections::BTreeMap;
use std::future::Future;

use fluidinfo_client::{ApiResponse, QueryArgs, RequestOptions, Result, Transport};
use serde::Deserialize;
use serde_json::Value;
use tracing::{instrument, Instrument};

use crate::options::{required, QueryOptions};
use crate::types::{opaque_value_url, QueryObject, Reply, TagValue};

/// Body of a `GET /values` response.
#[derive(Debug, Deserialize)]
struct ValuesBody {
    results: ValuesResults,
}

#[derive(Debug, Deserialize)]
struct ValuesResults {
    #[serde(default)]
    id: BTreeMap<String, BTreeMap<String, Value>>,
}

/// Request against the bulk values endpoint.
pub(crate) fn values_request(tags: &[String], query: &str) -> RequestOptions {
    RequestOptions::path("values").args(
        QueryArgs::new()
            .repeated("tag", tags)
            .arg("query", query),
    )
}

/// Reshape a values response into one flat object per matched id, ordered
/// by id.
pub(crate) fn flatten_results(base_url: &str, response: &ApiResponse) -> Result<Vec<QueryObject>> {
    let body: ValuesBody = response.json_as()?;

    body.results
        .id
        .into_iter()
        .map(|(id, entries)| {
            let tags = entries
                .into_iter()
                .map(|(tag, entry)| {
                    let value =
                        TagValue::from_entry(entry, || opaque_value_url(base_url, &id, &tag))?;
                    Ok((tag, value))
                })
                .collect::<Result<BTreeMap<_, _>>>()?;
            Ok(QueryObject { id, tags })
        })
        .collect()
}

impl<T: Transport> super::FluidinfoClient<T> {
    /// Read tag values from every object matching a query.
    ///
    /// Fails immediately with a `Value` error when `options.query` is
    /// missing. An absent `select` asks for every tag.
    ///
    /// # Security
    ///
    /// Escape user-provided strings embedded in the query with
    /// `fluidinfo_client::security::query::escape_string()`.
    #[instrument(skip(self, options))]
    pub fn query(
        &self,
        options: &QueryOptions,
    ) -> Result<impl Future<Output = Result<Reply<Vec<QueryObject>>>> + Send + 'static> {
        let query = required(options.query.as_deref(), "query")?;
        self.query_values(options.select.as_deref(), query)
    }

    pub(crate) fn query_values(
        &self,
        select: Option<&[String]>,
        query: &str,
    ) -> Result<impl Future<Output = Result<Reply<Vec<QueryObject>>>> + Send + 'static> {
        let call = self
            .session
            .get(&values_request(select.unwrap_or_default(), query))?;
        let base_url = self.session.base_url().to_string();

        Ok(async move {
            let response = call.await?;
            match flatten_results(&base_url, &response) {
                Ok(objects) => {
                    tracing::debug!(matches = objects.len(), "Query completed");
                    Ok(Reply::new(response, objects))
                }
                Err(e) => Err(e.with_response(response)),
            }
        }
        .in_current_span())
    }
}
