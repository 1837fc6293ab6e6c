//! FILENAME: core/report-engine/src/district.rs
//! Display-key extraction from free-text site names.
//!
//! Site names are entered by branch offices and follow no fixed shape.
//! The identity column shows a short stable label instead: the leading
//! token of the name, or a fixed-length prefix when the name has no
//! internal whitespace.

/// Default prefix length for names without whitespace.
pub const DEFAULT_KEY_CHARS: usize = 4;

/// Derives the short display key for an entity name.
///
/// The name is trimmed first. If the trimmed name contains whitespace,
/// the key is the first whitespace-delimited token in full; otherwise
/// it is the first `max_chars` characters. Character counting respects
/// multi-byte text, so non-ASCII names truncate cleanly.
pub fn district_key(name: &str, max_chars: usize) -> String {
    let trimmed = name.trim();
    match trimmed.split_whitespace().next() {
        Some(token) if token.len() < trimmed.len() => token.to_string(),
        _ => trimmed.chars().take(max_chars).collect(),
    }
}
