//! Options for the values protocol operations.
//!
//! Every field is optional at the type level so that a missing required
//! option is reported as a `Value` error when the call is made, the same way
//! for every operation.

use std::collections::BTreeMap;

use fluidinfo_client::security::query as fql;
use fluidinfo_client::{Error, Result};
use serde_json::Value;

/// Options for [`query`](crate::FluidinfoClient::query).
#[derive(Debug, Clone, Default)]
pub struct QueryOptions {
    /// Tag paths to return; `None` returns every tag.
    pub select: Option<Vec<String>>,
    /// The Fluidinfo query selecting objects. Required.
    pub query: Option<String>,
}

impl QueryOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            select: None,
            query: Some(query.into()),
        }
    }

    pub fn select<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// Options for [`update`](crate::FluidinfoClient::update).
#[derive(Debug, Clone, Default)]
pub struct UpdateOptions {
    /// Tag path to value. A `None` value is written as JSON null. Required.
    pub values: Option<BTreeMap<String, Option<Value>>>,
    /// The Fluidinfo query selecting objects to update. Required.
    pub query: Option<String>,
}

impl UpdateOptions {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            values: None,
            query: Some(query.into()),
        }
    }

    /// Set one tag value.
    pub fn value(mut self, tag: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values
            .get_or_insert_with(BTreeMap::new)
            .insert(tag.into(), Some(value.into()));
        self
    }

    /// Add a tag with no value; it is written as null.
    pub fn without_value(mut self, tag: impl Into<String>) -> Self {
        self.values
            .get_or_insert_with(BTreeMap::new)
            .insert(tag.into(), None);
        self
    }
}

/// Options for [`tag`](crate::FluidinfoClient::tag).
#[derive(Debug, Clone, Default)]
pub struct TagOptions {
    /// Tag path to value. Required.
    pub values: Option<BTreeMap<String, Option<Value>>>,
    pub about: Option<String>,
    pub id: Option<String>,
}

impl TagOptions {
    pub fn about(about: impl Into<String>) -> Self {
        Self {
            about: Some(about.into()),
            ..Self::default()
        }
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn value(mut self, tag: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values
            .get_or_insert_with(BTreeMap::new)
            .insert(tag.into(), Some(value.into()));
        self
    }

    pub fn without_value(mut self, tag: impl Into<String>) -> Self {
        self.values
            .get_or_insert_with(BTreeMap::new)
            .insert(tag.into(), None);
        self
    }
}

/// Options for [`del`](crate::FluidinfoClient::del).
#[derive(Debug, Clone, Default)]
pub struct DeleteOptions {
    /// Tag paths whose values are removed. Required.
    pub tags: Option<Vec<String>>,
    /// The Fluidinfo query selecting objects. Required.
    pub query: Option<String>,
}

impl DeleteOptions {
    pub fn new<I, S>(tags: I, query: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tags: Some(tags.into_iter().map(Into::into).collect()),
            query: Some(query.into()),
        }
    }
}

/// Options for [`get_object`](crate::FluidinfoClient::get_object).
#[derive(Debug, Clone, Default)]
pub struct GetObjectOptions {
    /// Tag paths to return; `None` returns every tag.
    pub select: Option<Vec<String>>,
    pub about: Option<String>,
    pub id: Option<String>,
}

impl GetObjectOptions {
    pub fn about(about: impl Into<String>) -> Self {
        Self {
            about: Some(about.into()),
            ..Self::default()
        }
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn select<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select = Some(tags.into_iter().map(Into::into).collect());
        self
    }
}

/// Options for [`create_object`](crate::FluidinfoClient::create_object).
#[derive(Debug, Clone, Default)]
pub struct CreateObjectOptions {
    /// About value of the new object; `None` creates an anonymous object.
    pub about: Option<String>,
}

impl CreateObjectOptions {
    pub fn about(about: impl Into<String>) -> Self {
        Self {
            about: Some(about.into()),
        }
    }
}

/// Options for [`recent`](crate::FluidinfoClient::recent). Exactly one
/// selector must be set.
#[derive(Debug, Clone, Default)]
pub struct RecentOptions {
    /// Activity on the object with this about value.
    pub about: Option<String>,
    /// Activity on the object with this id.
    pub id: Option<String>,
    /// Activity on objects matching this query.
    pub query: Option<String>,
    /// Activity by this user.
    pub user: Option<String>,
    /// Activity by users matching this query.
    pub users_query: Option<String>,
}

impl RecentOptions {
    pub fn about(about: impl Into<String>) -> Self {
        Self {
            about: Some(about.into()),
            ..Self::default()
        }
    }

    pub fn id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
            ..Self::default()
        }
    }

    pub fn user(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            ..Self::default()
        }
    }

    pub fn users_query(query: impl Into<String>) -> Self {
        Self {
            users_query: Some(query.into()),
            ..Self::default()
        }
    }
}

/// The query selecting a single object by about value or id.
pub(crate) fn object_query(about: Option<&str>, id: Option<&str>) -> Result<String> {
    match (about, id) {
        (Some(about), None) => Ok(fql::about(about)),
        (None, Some(id)) => Ok(fql::id(id)),
        (Some(_), Some(_)) => Err(Error::value(
            "Supply either an 'about' or 'id' specification, not both.",
        )),
        (None, None) => Err(Error::value(
            "Supply either an 'about' or 'id' specification.",
        )),
    }
}

pub(crate) fn required<'a, T: ?Sized>(value: Option<&'a T>, name: &str) -> Result<&'a T> {
    value.ok_or_else(|| Error::value(format!("Missing {} option.", name)))
}
