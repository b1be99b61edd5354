use regex::Regex;
use serde_json::{Map, Value};
use std::sync::OnceLock;
use tracing::{debug, info};

use crate::document::{Document, ITEMS_FIELD};
use crate::error::{Error, Result};

pub const KEY_FIELD: &str = "key";
pub const ENGLISH_FIELD: &str = "englishUsText";
pub const SIMPLIFIED_FIELD: &str = "chineseSText";
pub const TRADITIONAL_FIELD: &str = "chineseTText";

/// Key prefixes that mark an item as a song record.
pub const SONG_KEY_PREFIXES: [&str; 3] = ["song_", "song_sub_", "song_detail_"];

/// What one `augment` pass touched and filled.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AugmentReport {
    /// Keys of every song item, in document order, duplicates kept
    pub touched_keys: Vec<String>,
    pub simplified_filled: usize,
    pub traditional_filled: usize,
}

impl AugmentReport {
    pub fn total_filled(&self) -> usize {
        self.simplified_filled + self.traditional_filled
    }
}

fn strip_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"[《》「」『』"']"#).expect("static pattern"))
}

/// Removes title/quote brackets and ASCII quotes, then trims whitespace.
pub fn clean_text(text: &str) -> String {
    strip_pattern().replace_all(text, "").trim().to_string()
}

pub fn is_song_key(key: &str) -> bool {
    SONG_KEY_PREFIXES.iter().any(|prefix| key.starts_with(prefix))
}

fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
    }
}

fn str_field<'a>(item: &'a Map<String, Value>, field: &str) -> &'a str {
    item.get(field).and_then(Value::as_str).unwrap_or("")
}

/// Fills missing `chineseSText`/`chineseTText` of song items from the cleaned
/// `englishUsText`. The document is changed in place; existing non-empty
/// values are never overwritten.
///
/// Fails with `MalformedInput` before touching anything if the document has no
/// `items` array or any item is not an object.
pub fn augment(document: &mut Document) -> Result<AugmentReport> {
    let items = match document.root_mut() {
        Value::Object(root) => match root.get_mut(ITEMS_FIELD) {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(Error::malformed("`items` is not an array")),
            None => return Err(Error::malformed("missing `items`")),
        },
        _ => return Err(Error::malformed("document root is not an object")),
    };

    if let Some(index) = items.iter().position(|item| !item.is_object()) {
        return Err(Error::malformed(format!("item {} is not an object", index)));
    }

    let mut report = AugmentReport::default();

    for item in items.iter_mut().filter_map(Value::as_object_mut) {
        let key = str_field(item, KEY_FIELD).to_string();
        if !is_song_key(&key) {
            continue;
        }

        let mut cleaned: Option<String> = None;
        for (field, counter) in [
            (SIMPLIFIED_FIELD, &mut report.simplified_filled),
            (TRADITIONAL_FIELD, &mut report.traditional_filled),
        ] {
            if !is_falsy(item.get(field)) {
                continue;
            }
            let text = cleaned.get_or_insert_with(|| clean_text(str_field(item, ENGLISH_FIELD)));
            if text.is_empty() {
                continue;
            }
            item.insert(field.to_string(), Value::String(text.clone()));
            *counter += 1;
            debug!(key = %key, field, "filled");
        }

        report.touched_keys.push(key);
    }

    info!(
        touched = report.touched_keys.len(),
        simplified = report.simplified_filled,
        traditional = report.traditional_filled,
        "augment finished"
    );
    Ok(report)
}
