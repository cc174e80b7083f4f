/// Opaque identifier validation and extraction
///
/// Locally minted authors and entries are addressed by a random
/// 8-4-4-4-12 hex identifier. Federated references arrive as full URLs
/// whose path carries that identifier somewhere, usually last.
use crate::{
    error::{Resolution, ResolutionExt, Unresolved, UnresolvedReason},
    metrics,
};
use uuid::{Uuid, Variant};

/// Length of the hyphenated identifier form
const HYPHENATED_LEN: usize = 36;

/// Offsets of the hyphens in the hyphenated form
const HYPHEN_OFFSETS: [usize; 4] = [8, 13, 18, 23];

/// Check whether a string is a canonical identifier.
///
/// Accepts only the hyphenated form, case-insensitive, with a version
/// nibble of 1-5 and the RFC 4122 variant (8, 9, a or b).
pub fn is_valid_identifier(candidate: &str) -> bool {
    // braced, urn and simple forms have other lengths
    if candidate.len() != HYPHENATED_LEN {
        return false;
    }

    let Ok(id) = Uuid::parse_str(candidate) else {
        return false;
    };

    matches!(id.get_version_num(), 1..=5) && id.get_variant() == Variant::RFC4122
}

/// Extract the identifier from a bare identifier or a slash-delimited path/URL.
///
/// Never fails: when no canonical identifier is present the last non-empty
/// segment is returned instead.
pub fn extract_identifier(reference: &str) -> String {
    try_extract_identifier(reference).or_fallback()
}

/// Strict variant of [`extract_identifier`].
///
/// `Ok` when the reference is (or contains) a canonical identifier,
/// `Err` carrying the best-effort guess otherwise.
pub fn try_extract_identifier(reference: &str) -> Resolution {
    if reference.is_empty() {
        return Err(Unresolved::new(reference, "", UnresolvedReason::Empty));
    }

    if !reference.contains('/') {
        if is_valid_identifier(reference) {
            return Ok(reference.to_string());
        }
        return Err(Unresolved::new(
            reference,
            reference,
            UnresolvedReason::NoCanonicalIdentifier,
        ));
    }

    let segments: Vec<&str> = reference.split('/').filter(|s| !s.is_empty()).collect();

    if let Some(id) = segments.iter().rev().find(|s| is_valid_identifier(s)) {
        return Ok((*id).to_string());
    }

    let fallback = segments.last().copied().unwrap_or_default();
    tracing::debug!(
        reference = %reference,
        fallback = %fallback,
        "no canonical identifier in reference, using last segment"
    );
    metrics::record_identifier_fallback("extract_identifier");

    Err(Unresolved::new(
        reference,
        fallback,
        UnresolvedReason::NoCanonicalIdentifier,
    ))
}

/// Find the last identifier-shaped substring anywhere in `text`.
///
/// Matches are taken left to right without overlap, and the last of them
/// wins. Unlike [`extract_identifier`] this does not rely on slash segments
/// and does not constrain the version or variant nibbles, so it also picks
/// identifiers out of query strings or concatenated paths.
pub fn find_identifier(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut found = None;
    let mut start = 0;

    while start + HYPHENATED_LEN <= bytes.len() {
        let window = &bytes[start..start + HYPHENATED_LEN];
        if has_identifier_shape(window) {
            found = Some(window);
            start += HYPHENATED_LEN;
        } else {
            start += 1;
        }
    }

    // the window is pure ASCII, so this cannot split a character
    found.map(|window| String::from_utf8_lossy(window).into_owned())
}

/// 8-4-4-4-12 hex digits separated by hyphens
fn has_identifier_shape(window: &[u8]) -> bool {
    window.iter().enumerate().all(|(i, b)| {
        if HYPHEN_OFFSETS.contains(&i) {
            *b == b'-'
        } else {
            b.is_ascii_hexdigit()
        }
    })
}
