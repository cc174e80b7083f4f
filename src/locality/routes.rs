/// Route paths and API addresses for authors and entries
///
/// The builders on [`EntityRef`] work from a reference whose locality was
/// already decided; the [`LocalityResolver`] wrappers classify first and
/// then delegate, so each call classifies exactly once.
use crate::{
    links::{normalize_url, percent_encode},
    locality::{AuthorRef, EntityRef, EntryRef, LocalityResolver},
};

/// Client route prefix for author profiles
pub const AUTHOR_ROUTE_PREFIX: &str = "/authors";

/// Client route prefix for single entries
pub const ENTRY_ROUTE_PREFIX: &str = "/entries";

impl EntityRef {
    /// Single percent-encoded path segment: the full reference when remote,
    /// the bare identifier when local
    pub fn route_segment(&self) -> String {
        percent_encode(self.key())
    }

    /// Client route of this reference as an author profile
    pub fn author_route_path(&self) -> String {
        format!("{}/{}", AUTHOR_ROUTE_PREFIX, self.route_segment())
    }

    /// Client route of this reference as a single entry
    pub fn entry_route_path(&self) -> String {
        format!("{}/{}", ENTRY_ROUTE_PREFIX, self.route_segment())
    }

    /// Identifier to hand to the entry API.
    ///
    /// Remote entries keep their raw URL since the backend's remote-fetch
    /// endpoint expects an addressable URL.
    pub fn api_identifier(&self) -> &str {
        self.key()
    }
}

impl LocalityResolver {
    /// API URL of a classified author: the full reference when remote,
    /// `{backend}/api/authors/{id}/` when local
    pub fn author_api_url_for(&self, reference: &EntityRef) -> String {
        self.api_url_for("authors", reference)
    }

    /// API URL of a classified entry, see [`Self::author_api_url_for`]
    pub fn entry_api_url_for(&self, reference: &EntityRef) -> String {
        self.api_url_for("entries", reference)
    }

    /// Inbox URL of a classified author, where follows, likes, comments
    /// and entries are delivered
    pub fn inbox_api_url_for(&self, reference: &EntityRef) -> String {
        format!("{}inbox/", normalize_url(&self.author_api_url_for(reference)))
    }

    fn api_url_for(&self, collection: &str, reference: &EntityRef) -> String {
        match reference {
            EntityRef::Remote { url, .. } => url.clone(),
            EntityRef::Local { id } => format!("{}{}/{}/", self.api_root(), collection, id),
        }
    }

    /// Client route for an author profile.
    ///
    /// Remote authors are addressed by their percent-encoded full reference,
    /// local authors by their bare identifier. Either way the result is one
    /// path segment under [`AUTHOR_ROUTE_PREFIX`].
    pub fn author_route_path(&self, author: &AuthorRef) -> String {
        self.classify_author(author).author_route_path()
    }

    /// Client route for a single entry, see [`Self::author_route_path`]
    pub fn entry_route_path(&self, entry: &EntryRef) -> String {
        self.classify_entry(entry).entry_route_path()
    }

    /// Raw URL for remote entries, bare identifier for local ones
    pub fn entry_api_identifier(&self, entry: &EntryRef) -> String {
        self.classify_entry(entry).api_identifier().to_string()
    }

    pub fn author_api_url(&self, author: &AuthorRef) -> String {
        self.author_api_url_for(&self.classify_author(author))
    }

    pub fn entry_api_url(&self, entry: &EntryRef) -> String {
        self.entry_api_url_for(&self.classify_entry(entry))
    }

    pub fn inbox_api_url(&self, author: &AuthorRef) -> String {
        self.inbox_api_url_for(&self.classify_author(author))
    }
}
