/// Locality Resolver - classifies author and entry references as local or remote
use crate::{
    identifier::{extract_identifier, is_valid_identifier},
    links::{extract_host, is_absolute_url, normalize_url},
    locality::{AuthorRef, EntityRef, EntryRef, Locality},
    metrics,
};
use tracing::debug;

/// Stateless locality resolver bound to one backend base address.
///
/// The base address is passed in rather than read from ambient state, so
/// several resolvers for different simulated nodes can coexist.
#[derive(Debug, Clone)]
pub struct LocalityResolver {
    backend_base: String,
    backend_host: String,
}

impl LocalityResolver {
    /// Create a resolver for the backend at `backend_base`
    /// (e.g. `http://node-a.example:8000`)
    pub fn new(backend_base: impl Into<String>) -> Self {
        let backend_base = backend_base.into().trim_end_matches('/').to_string();
        let backend_host = extract_host(&backend_base);

        if backend_host.is_empty() {
            tracing::warn!(
                backend = %backend_base,
                "backend base address has no host; every absolute URL will classify as remote"
            );
        }

        Self {
            backend_base,
            backend_host,
        }
    }

    /// Backend base address without a trailing slash
    pub fn backend_base(&self) -> &str {
        &self.backend_base
    }

    /// Host (and non-default port) of the backend
    pub fn backend_host(&self) -> &str {
        &self.backend_host
    }

    /// `{backend}/api/`
    pub fn api_root(&self) -> String {
        normalize_url(&format!("{}/api", self.backend_base))
    }

    /// True when `host` names this backend
    pub fn is_backend_host(&self, host: &str) -> bool {
        host == self.backend_host
    }

    /// Decide whether an author is hosted on another node.
    ///
    /// Decision order, first match wins:
    /// 1. explicit `is_remote: true`
    /// 2. a non-null `node` marker
    /// 3. `url` (or `id`): a bare identifier is local, an absolute URL is
    ///    remote iff its host differs from the backend's, anything else is local
    pub fn is_remote_author(&self, author: &AuthorRef) -> bool {
        let (remote, signal) = self.classify_author_signal(author);

        debug!(
            author = %author.id,
            signal,
            locality = Locality::from(remote).as_str(),
            "classified author"
        );
        metrics::record_classification("author", Locality::from(remote).as_str());

        remote
    }

    fn classify_author_signal(&self, author: &AuthorRef) -> (bool, &'static str) {
        if author.is_remote == Some(true) {
            return (true, "explicit_flag");
        }

        if author.has_node() {
            return (true, "node_marker");
        }

        let address = author.address();
        if is_valid_identifier(address) {
            return (false, "bare_identifier");
        }

        if is_absolute_url(address) {
            return (self.is_foreign_url(address), "host_comparison");
        }

        (false, "default")
    }

    /// Decide whether an entry is hosted on another node.
    ///
    /// An entry is remote when its own address is an absolute URL on a
    /// different host, or when its author is remote. It is never treated as
    /// more local than its author. Counts as one entry classification, the
    /// author check is not recorded separately.
    pub fn is_remote_entry(&self, entry: &EntryRef) -> bool {
        let (remote, signal) = self.classify_entry_signal(entry);

        debug!(
            entry = %entry.id,
            signal,
            locality = Locality::from(remote).as_str(),
            "classified entry"
        );
        metrics::record_classification("entry", Locality::from(remote).as_str());

        remote
    }

    fn classify_entry_signal(&self, entry: &EntryRef) -> (bool, &'static str) {
        let address = entry.address();
        if is_absolute_url(address) && self.is_foreign_url(address) {
            return (true, "host_comparison");
        }

        match &entry.author {
            Some(author) => (self.classify_author_signal(author).0, "author"),
            None => (false, "default"),
        }
    }

    pub fn author_locality(&self, author: &AuthorRef) -> Locality {
        self.is_remote_author(author).into()
    }

    pub fn entry_locality(&self, entry: &EntryRef) -> Locality {
        self.is_remote_entry(entry).into()
    }

    /// Resolve an author into a [`EntityRef`] once, at the parse boundary
    pub fn classify_author(&self, author: &AuthorRef) -> EntityRef {
        if self.is_remote_author(author) {
            remote_ref(author.address())
        } else {
            EntityRef::Local {
                id: extract_identifier(&author.id),
            }
        }
    }

    /// Resolve an entry into a [`EntityRef`] once, at the parse boundary
    pub fn classify_entry(&self, entry: &EntryRef) -> EntityRef {
        if self.is_remote_entry(entry) {
            remote_ref(entry.address())
        } else {
            EntityRef::Local {
                id: extract_identifier(&entry.id),
            }
        }
    }

    /// Absolute URL whose host is not the backend's
    fn is_foreign_url(&self, url: &str) -> bool {
        !self.is_backend_host(&extract_host(url))
    }
}

fn remote_ref(address: &str) -> EntityRef {
    EntityRef::Remote {
        url: address.to_string(),
        origin_host: extract_host(address),
    }
}
