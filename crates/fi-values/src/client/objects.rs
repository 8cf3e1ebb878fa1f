use std::future::Future;

use fluidinfo_client::{Error, ErrorKind, RequestOptions, Result, Transport};
use serde::Deserialize;
use tracing::{instrument, Instrument};

use crate::options::{object_query, CreateObjectOptions, GetObjectOptions};
use crate::types::{CreatedObject, QueryObject, Reply};

#[derive(Debug, Deserialize)]
struct CreatedBody {
    id: String,
}

impl<T: Transport> super::FluidinfoClient<T> {
    /// Read the tags of the single object with the given about value or id.
    ///
    /// Resolves to `None` when nothing matches. More than one match is a
    /// `NotUnique` error carrying the response.
    #[instrument(skip(self, options))]
    pub fn get_object(
        &self,
        options: &GetObjectOptions,
    ) -> Result<impl Future<Output = Result<Reply<Option<QueryObject>>>> + Send + 'static> {
        let query = object_query(options.about.as_deref(), options.id.as_deref())?;
        let call = self.query_values(options.select.as_deref(), &query)?;

        Ok(async move {
            let Reply { response, data } = call.await?;
            let matches = data.len();
            let mut objects = data.into_iter();
            match (objects.next(), matches) {
                (None, _) => Ok(Reply::new(response, None)),
                (Some(object), 1) => Ok(Reply::new(response, Some(object))),
                (Some(_), matches) => {
                    Err(Error::new(ErrorKind::NotUnique { matches }).with_response(response))
                }
            }
        }
        .in_current_span())
    }

    /// Create a new object, optionally with an about value.
    ///
    /// The session must hold credentials; otherwise this fails immediately
    /// with an `Authorization` error.
    #[instrument(skip(self, options))]
    pub fn create_object(
        &self,
        options: &CreateObjectOptions,
    ) -> Result<impl Future<Output = Result<Reply<CreatedObject>>> + Send + 'static> {
        if !self.session.has_credentials() {
            return Err(Error::new(ErrorKind::Authorization(
                "You must be signed in to create a new object.".to_string(),
            )));
        }

        let request = match &options.about {
            Some(about) => RequestOptions::segments(["about", about.as_str()]),
            None => RequestOptions::path("objects"),
        };
        let call = self.session.post(&request)?;
        let about = options.about.clone();

        Ok(async move {
            let response = call.await?;
            match response.json_as::<CreatedBody>() {
                Ok(body) => {
                    tracing::debug!(id = %body.id, "Object created");
                    Ok(Reply::new(response, CreatedObject { id: body.id, about }))
                }
                Err(e) => Err(e.with_response(response)),
            }
        }
        .in_current_span())
    }
}
