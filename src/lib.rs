/// Locus Links - local/remote reference resolution for a federated social node
///
/// Given an author or entry reference handed out by the backend (a bare
/// identifier or a fully qualified URL), decides whether it lives on this
/// node or a federated one and derives the route path and API identifier
/// used to address it.

pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod identifier;
pub mod links;
pub mod locality;
pub mod metrics;
pub mod server;

pub use config::ServerConfig;
pub use context::AppContext;
pub use error::{LinkError, LinkResult, Resolution, ResolutionExt, Unresolved, UnresolvedReason};
pub use identifier::{extract_identifier, find_identifier, is_valid_identifier, try_extract_identifier};
pub use links::{extract_host, try_extract_host};
pub use locality::{AuthorRef, EntityRef, EntryRef, Locality, LocalityResolver};
