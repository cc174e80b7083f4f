/// Locality resolution for authors and entries
///
/// Decides whether a reference handed out by the backend lives on this
/// node or on another federated node, and derives the route paths and API
/// identifiers used to address it.

pub mod resolver;
pub mod routes;

pub use resolver::LocalityResolver;
pub use routes::{AUTHOR_ROUTE_PREFIX, ENTRY_ROUTE_PREFIX};

use serde::{Deserialize, Serialize};

/// Author reference as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
    /// Bare identifier or fully qualified URL
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Opaque marker set when the backend knows the author's origin node
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node: Option<serde_json::Value>,

    /// Explicit override from the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_remote: Option<bool>,
}

impl AuthorRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// `url` when present, `id` otherwise
    pub fn address(&self) -> &str {
        self.url.as_deref().unwrap_or(&self.id)
    }

    /// True when the backend attached a non-null node marker
    pub fn has_node(&self) -> bool {
        matches!(&self.node, Some(node) if !node.is_null())
    }
}

/// Entry reference as returned by the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntryRef {
    /// Bare identifier or fully qualified URL
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<AuthorRef>,
}

impl EntryRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with_author(mut self, author: AuthorRef) -> Self {
        self.author = Some(author);
        self
    }

    /// `url` when present, `id` otherwise
    pub fn address(&self) -> &str {
        self.url.as_deref().unwrap_or(&self.id)
    }
}

/// Where a referenced entity is hosted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locality {
    Local,
    Remote,
}

impl Locality {
    pub fn is_remote(self) -> bool {
        self == Locality::Remote
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Locality::Local => "local",
            Locality::Remote => "remote",
        }
    }
}

impl From<bool> for Locality {
    fn from(remote: bool) -> Self {
        if remote {
            Locality::Remote
        } else {
            Locality::Local
        }
    }
}

/// A reference with its locality decided once, at the parse boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EntityRef {
    /// Hosted here, addressed by its bare identifier
    Local { id: String },
    /// Hosted on another node, addressed by its full URL
    Remote {
        url: String,
        #[serde(rename = "originHost")]
        origin_host: String,
    },
}

impl EntityRef {
    pub fn locality(&self) -> Locality {
        match self {
            EntityRef::Local { .. } => Locality::Local,
            EntityRef::Remote { .. } => Locality::Remote,
        }
    }

    /// The identifier or URL this reference is addressed by
    pub fn key(&self) -> &str {
        match self {
            EntityRef::Local { id } => id,
            EntityRef::Remote { url, .. } => url,
        }
    }
}
