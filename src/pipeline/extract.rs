//! Fault-tolerant field extractors over raw article JSON.
//!
//! Every accessor here is total: a missing key, a null, or a wrong-typed
//! intermediate node all degrade to the same "not found" outcome. Nothing in
//! this module can panic on JSON-compatible input.

use serde_json::Value;

/// Element types whose `content` contributes to the article body.
const TEXTUAL_ELEMENT_TYPES: &[&str] = &["text", "raw_html"];

/// Look up an object key, treating null and non-object parents as absent.
fn get<'a>(doc: &'a Value, key: &str) -> Option<&'a Value> {
    doc.as_object()?.get(key).filter(|value| !value.is_null())
}

/// Look up a string value, treating null and non-string values as absent.
fn get_str<'a>(doc: &'a Value, key: &str) -> Option<&'a str> {
    get(doc, key)?.as_str()
}

/// Extract the mandatory article identifier from `_id`.
///
/// Empty-after-trim counts as missing, matching the contract for all
/// mandatory string fields.
pub fn extract_id(doc: &Value) -> Option<String> {
    let id = get_str(doc, "_id")?.trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}

/// Concatenate the body text from `content_elements`.
///
/// Only elements whose `type` marks textual content contribute; null or
/// non-string `content` values are skipped. Returns an empty string when
/// nothing textual is present, leaving the emptiness decision to the
/// transformer.
pub fn extract_text(doc: &Value) -> String {
    let Some(elements) = get(doc, "content_elements").and_then(Value::as_array) else {
        return String::new();
    };

    let parts: Vec<&str> = elements
        .iter()
        .filter(|element| {
            get_str(element, "type")
                .map(|kind| TEXTUAL_ELEMENT_TYPES.contains(&kind))
                .unwrap_or(false)
        })
        .filter_map(|element| get_str(element, "content"))
        .collect();

    parts.join("\n")
}

/// Build the article's absolute URL.
///
/// Prefers `canonical_website` + `website_url`, using `website_url` alone
/// when it is already absolute, and falls back to `canonical_url`. Anything
/// that does not come out http(s)-prefixed is treated as unsalvageable.
pub fn extract_url(doc: &Value) -> Option<String> {
    let compound = build_compound_url(doc);
    compound
        .or_else(|| get_str(doc, "canonical_url").map(|url| url.trim().to_string()))
        .filter(|url| is_http_url(url))
}

fn build_compound_url(doc: &Value) -> Option<String> {
    let path = get_str(doc, "website_url")?.trim();
    if path.is_empty() {
        return None;
    }
    if is_http_url(path) {
        return Some(path.to_string());
    }

    let site = get_str(doc, "canonical_website")?.trim();
    if site.is_empty() {
        return None;
    }
    let separator = if path.starts_with('/') { "" } else { "/" };
    Some(format!("https://{site}{separator}{path}"))
}

fn is_http_url(candidate: &str) -> bool {
    candidate.starts_with("http://") || candidate.starts_with("https://")
}

/// Raw publish-date candidates in precedence order.
///
/// `publish_date` wins over `first_publish_date`, which wins over
/// `display_date`; the sanitizer decides which candidate actually parses.
pub fn extract_date_candidates(doc: &Value) -> Vec<&str> {
    ["publish_date", "first_publish_date", "display_date"]
        .iter()
        .filter_map(|key| get_str(doc, key))
        .collect()
}

/// Extract `taxonomy.tags`, preferring each entry's `slug` over `text`.
pub fn extract_tags(doc: &Value) -> Vec<String> {
    taxonomy_entries(doc, "tags", &["slug", "text"])
}

/// Extract `taxonomy.sections`, preferring each entry's `name` over `path`.
pub fn extract_sections(doc: &Value) -> Vec<String> {
    taxonomy_entries(doc, "sections", &["name", "path"])
}

/// Extract `taxonomy.categories` by each entry's `name`.
pub fn extract_categories(doc: &Value) -> Vec<String> {
    taxonomy_entries(doc, "categories", &["name"])
}

/// Pull string values out of one taxonomy list, tolerating any malformed
/// shape along the way. The first present key in `keys` wins per entry.
fn taxonomy_entries(doc: &Value, list: &str, keys: &[&str]) -> Vec<String> {
    let Some(entries) = get(doc, "taxonomy")
        .and_then(|taxonomy| get(taxonomy, list))
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            keys.iter()
                .filter_map(|key| get_str(entry, key))
                .map(str::trim)
                .find(|value| !value.is_empty())
                .map(str::to_string)
        })
        .collect()
}
