use serde_json::Value;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Error, Result};

pub const ITEMS_FIELD: &str = "items";

/// A parsed localization document. Map key order and number text are kept as
/// read so that writing it back only differs in the filled fields and
/// formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Value,
}

impl Document {
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    pub fn parse(text: &str) -> Result<Self> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let root: Value = serde_json::from_str(text)
            .map_err(|e| Error::malformed(format!("invalid JSON: {}", e)))?;
        Ok(Self::from_value(root))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        debug!(path = %path.display(), bytes = content.len(), "read document");
        Self::parse(&content)
    }

    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub(crate) fn root_mut(&mut self) -> &mut Value {
        &mut self.root
    }

    pub fn items(&self) -> Option<&Vec<Value>> {
        self.as_value().get(ITEMS_FIELD).and_then(Value::as_array)
    }

    /// Two-space indented JSON, `": "` after keys, non-ASCII written as-is,
    /// no trailing newline.
    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.root)
            .map_err(|e| Error::malformed(format!("cannot serialize document: {}", e)))
    }

    /// Writes through a temp file in the target directory, then renames it
    /// over `path`, so an interrupted save never leaves a truncated file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_json_string()?;
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        tmp.write_all(content.as_bytes())
            .map_err(|e| Error::io(tmp.path(), e))?;
        tmp.persist(path).map_err(|e| Error::io(path, e.error))?;

        debug!(path = %path.display(), bytes = content.len(), "wrote document");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_rejects_invalid_json() {
        let err = Document::parse("{\"items\": [").unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn parse_skips_utf8_bom() {
        let doc = Document::parse("\u{feff}{\"items\": []}").unwrap();
        assert_eq!(doc.items().map(Vec::len), Some(0));
    }

    #[test]
    fn output_format_matches_contract() {
        let doc = Document::parse(
            r#"{"items":[{"key":"song_001","englishUsText":"Test","chineseSText":"测试"}],"version":2}"#,
        )
        .unwrap();
        let expected = "{\n  \"items\": [\n    {\n      \"key\": \"song_001\",\n      \"englishUsText\": \"Test\",\n      \"chineseSText\": \"测试\"\n    }\n  ],\n  \"version\": 2\n}";
        assert_eq!(doc.to_json_string().unwrap(), expected);
    }

    #[test]
    fn key_order_survives_round_trip() {
        let text = r#"{"zeta":1,"items":[{"z":1,"key":"a","b":2}],"alpha":true}"#;
        let doc = Document::parse(text).unwrap();
        let reparsed = Document::parse(&doc.to_json_string().unwrap()).unwrap();
        let keys: Vec<&String> = reparsed.as_value().as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["zeta", "items", "alpha"]);
        let item_keys: Vec<&String> = reparsed.items().unwrap()[0]
            .as_object()
            .unwrap()
            .keys()
            .collect();
        assert_eq!(item_keys, vec!["z", "key", "b"]);
    }

    #[test]
    fn numbers_are_written_as_read() {
        let doc = Document::parse(
            r#"{"items":[{"key":"ui_1","hash":12345678901234567890123,"ratio":1.50,"count":7}]}"#,
        )
        .unwrap();
        let text = doc.to_json_string().unwrap();
        assert!(text.contains("\"hash\": 12345678901234567890123"));
        assert!(text.contains("\"ratio\": 1.50"));
        assert!(text.contains("\"count\": 7"));
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        let doc = Document::from_value(json!({"items": [{"key": "song_1", "chineseTText": "歌"}]}));

        doc.save(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"chineseTText\": \"歌\""));
        assert!(!written.ends_with('\n'));

        let loaded = Document::load(&path).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn save_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.txt");
        fs::write(&path, "old content that is much longer than the new one").unwrap();

        Document::from_value(json!({"items": []})).save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\n  \"items\": []\n}");
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
