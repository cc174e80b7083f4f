/// End-to-end locality scenarios through the public library API
use locus_links::{
    extract_host, extract_identifier, is_valid_identifier, AuthorRef, EntryRef, LocalityResolver,
};

const AUTHOR_ID: &str = "c53452d6-f3eb-4616-8338-49288a3da001";
const AUTHOR_URL: &str =
    "http://node-a.example:8000/api/authors/c53452d6-f3eb-4616-8338-49288a3da001/";

#[test]
fn test_canonical_identifier_is_valid() {
    assert!(is_valid_identifier(AUTHOR_ID));
}

#[test]
fn test_author_on_configured_backend() {
    let resolver = LocalityResolver::new("http://node-a.example:8000");
    let author = AuthorRef::new(AUTHOR_URL);

    assert!(!resolver.is_remote_author(&author));
    assert_eq!(
        resolver.author_route_path(&author),
        "/authors/c53452d6-f3eb-4616-8338-49288a3da001"
    );
}

#[test]
fn test_author_on_other_backend() {
    let resolver = LocalityResolver::new("http://node-b.example:8000");
    let author = AuthorRef::new(AUTHOR_URL);

    assert!(resolver.is_remote_author(&author));
    assert_eq!(
        resolver.author_route_path(&author),
        "/authors/http%3A%2F%2Fnode-a.example%3A8000%2Fapi%2Fauthors%2Fc53452d6-f3eb-4616-8338-49288a3da001%2F"
    );
}

#[test]
fn test_backend_built_urls_are_local() {
    for base in ["http://node-a.example:8000", "https://social.example", "http://127.0.0.1:8000"] {
        let resolver = LocalityResolver::new(base);
        let author = AuthorRef::new(format!("{}/api/authors/{}/", base, AUTHOR_ID));
        assert!(!resolver.is_remote_author(&author), "base: {}", base);
    }
}

#[test]
fn test_explicit_remote_flag_wins() {
    let resolver = LocalityResolver::new("http://node-a.example:8000");
    let author: AuthorRef =
        serde_json::from_str(r#"{"id": "x", "is_remote": true, "node": null}"#).unwrap();
    assert!(resolver.is_remote_author(&author));
}

#[test]
fn test_entry_locality_follows_author() {
    let resolver = LocalityResolver::new("http://node-b.example:8000");
    let entry = EntryRef::new("e1").with_author(AuthorRef::new(AUTHOR_URL));
    assert!(resolver.is_remote_entry(&entry));
}

#[test]
fn test_malformed_url_host_is_empty() {
    assert_eq!(extract_host("not a url"), "");
}

#[test]
fn test_extract_identifier_idempotent() {
    for input in [AUTHOR_URL, "e1", "", "http://node-b.example/api/authors/111/", "//x//"] {
        let once = extract_identifier(input);
        assert_eq!(extract_identifier(&once), once);
    }
}
