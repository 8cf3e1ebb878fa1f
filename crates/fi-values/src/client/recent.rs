use std::future::Future;

use fluidinfo_client::{Error, QueryArgs, RequestOptions, Result, Transport};
use tracing::{instrument, Instrument};

use crate::options::RecentOptions;
use crate::types::{RawActivity, RecentActivity, Reply};

/// Map the single selector in `options` to its recent-activity endpoint.
fn recent_request(options: &RecentOptions) -> Result<RequestOptions> {
    let selected = [
        options.about.is_some(),
        options.id.is_some(),
        options.query.is_some(),
        options.user.is_some(),
        options.users_query.is_some(),
    ]
    .into_iter()
    .filter(|set| *set)
    .count();
    if selected > 1 {
        return Err(Error::value(
            "Supply only one of 'about', 'id', 'query', 'user' or 'users_query'.",
        ));
    }

    if let Some(about) = options.about.as_deref() {
        return Ok(RequestOptions::segments(["recent", "about", about]));
    }
    if let Some(id) = options.id.as_deref() {
        return Ok(RequestOptions::segments(["recent", "objects", id]));
    }
    if let Some(query) = options.query.as_deref() {
        return Ok(RequestOptions::path("recent/objects").args(QueryArgs::new().arg("query", query)));
    }
    if let Some(user) = options.user.as_deref() {
        return Ok(RequestOptions::segments(["recent", "users", user]));
    }
    if let Some(query) = options.users_query.as_deref() {
        return Ok(RequestOptions::path("recent/users").args(QueryArgs::new().arg("query", query)));
    }

    Err(Error::value(
        "Supply one of 'about', 'id', 'query', 'user' or 'users_query'.",
    ))
}

impl<T: Transport> super::FluidinfoClient<T> {
    /// List recent tagging activity on objects or by users.
    ///
    /// Exactly one selector must be set. Timestamps are parsed and opaque
    /// values gain a URL, as in [`query`](Self::query).
    #[instrument(skip(self, options))]
    pub fn recent(
        &self,
        options: &RecentOptions,
    ) -> Result<impl Future<Output = Result<Reply<Vec<RecentActivity>>>> + Send + 'static> {
        let call = self.session.get(&recent_request(options)?)?;
        let base_url = self.session.base_url().to_string();

        Ok(async move {
            let response = call.await?;
            let activity = response
                .json_as::<Vec<RawActivity>>()
                .and_then(|raw| {
                    raw.into_iter()
                        .map(|entry| entry.into_activity(&base_url))
                        .collect::<Result<Vec<_>>>()
                });
            match activity {
                Ok(activity) => Ok(Reply::new(response, activity)),
                Err(e) => Err(e.with_response(response)),
            }
        }
        .in_current_span())
    }
}
