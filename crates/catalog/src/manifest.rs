use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::date::CompactDate;

/// Default file name of the manifest, relative to the download page.
pub const MANIFEST_FILE_NAME: &str = "download-links.json";

/// One downloadable scenery archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadEntry {
    pub url: String,
    /// Suggested file name for the browser's save dialog.
    pub name: String,
    pub date: CompactDate,
    /// Archive size in bytes.
    pub size: u64,
}

/// Bucket name → download metadata, in document order.
///
/// Keys are kept verbatim; they are only decoded into coordinates when
/// rendering, so a single bad key does not invalidate the file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DownloadManifest {
    entries: Vec<(String, DownloadEntry)>,
    index: HashMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    Json(String),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Json(msg) => write!(f, "invalid download manifest: {msg}"),
        }
    }
}

impl std::error::Error for ManifestError {}

impl DownloadManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(raw: &str) -> Result<Self, ManifestError> {
        serde_json::from_str(raw).map_err(|e| ManifestError::Json(e.to_string()))
    }

    pub fn to_json_string_pretty(&self) -> Result<String, ManifestError> {
        serde_json::to_string_pretty(self).map_err(|e| ManifestError::Json(e.to_string()))
    }

    /// Inserts or replaces. A replaced key keeps its original position.
    pub fn insert(&mut self, bucket: impl Into<String>, entry: DownloadEntry) {
        let bucket = bucket.into();
        match self.index.get(&bucket) {
            Some(&i) => self.entries[i].1 = entry,
            None => {
                self.index.insert(bucket.clone(), self.entries.len());
                self.entries.push((bucket, entry));
            }
        }
    }

    pub fn get(&self, bucket: &str) -> Option<&DownloadEntry> {
        self.index.get(bucket).map(|&i| &self.entries[i].1)
    }

    pub fn contains(&self, bucket: &str) -> bool {
        self.index.contains_key(bucket)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DownloadEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn buckets(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for DownloadManifest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (bucket, entry) in &self.entries {
            map.serialize_entry(bucket, entry)?;
        }
        map.end()
    }
}

struct ManifestVisitor;

impl<'de> Visitor<'de> for ManifestVisitor {
    type Value = DownloadManifest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping bucket names to download entries")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut manifest = DownloadManifest::new();
        while let Some((bucket, entry)) = access.next_entry::<String, DownloadEntry>()? {
            manifest.insert(bucket, entry);
        }
        Ok(manifest)
    }
}

impl<'de> Deserialize<'de> for DownloadManifest {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(ManifestVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"{
        "w130n50": {"url": "https://example.org/w130n50.tar?dl=1", "name": "fgfs-americas-scenery-w130n50-20231201.tar", "date": "20231201", "size": 2048},
        "w080n40": {"url": "https://example.org/w080n40.tar?dl=1", "name": "fgfs-americas-scenery-w080n40-20240115.tar", "date": "20240115", "size": 1500000},
        "w100n30": {"url": "https://example.org/w100n30.tar?dl=1", "name": "fgfs-americas-scenery-w100n30-20240110.tar", "date": "20240110", "size": 1}
    }"#;

    #[test]
    fn preserves_document_order() {
        let manifest = DownloadManifest::from_json_str(SAMPLE).unwrap();
        let keys: Vec<&str> = manifest.buckets().collect();
        assert_eq!(keys, vec!["w130n50", "w080n40", "w100n30"]);
    }

    #[test]
    fn reserializes_in_the_same_order() {
        let manifest = DownloadManifest::from_json_str(SAMPLE).unwrap();
        let json = manifest.to_json_string_pretty().unwrap();
        let a = json.find("w130n50").unwrap();
        let b = json.find("w080n40").unwrap();
        let c = json.find("w100n30").unwrap();
        assert!(a < b && b < c);
        assert_eq!(DownloadManifest::from_json_str(&json).unwrap(), manifest);
    }

    #[test]
    fn parses_entry_fields() {
        let manifest = DownloadManifest::from_json_str(SAMPLE).unwrap();
        let entry = manifest.get("w080n40").unwrap();
        assert_eq!(entry.size, 1_500_000);
        assert_eq!(entry.date.iso(), "2024-01-15");
        assert_eq!(entry.name, "fgfs-americas-scenery-w080n40-20240115.tar");
        assert!(manifest.get("e000n00").is_none());
    }

    #[test]
    fn duplicate_key_replaces_in_place() {
        let raw = r#"{
            "a": {"url": "1", "name": "1", "date": "20240101", "size": 1},
            "b": {"url": "2", "name": "2", "date": "20240101", "size": 2},
            "a": {"url": "3", "name": "3", "date": "20240101", "size": 3}
        }"#;
        let manifest = DownloadManifest::from_json_str(raw).unwrap();
        let keys: Vec<&str> = manifest.buckets().collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(manifest.get("a").unwrap().url, "3");
    }

    #[test]
    fn keeps_keys_that_are_not_bucket_names() {
        let raw = r#"{"bogus": {"url": "u", "name": "n", "date": "20240101", "size": 0}}"#;
        let manifest = DownloadManifest::from_json_str(raw).unwrap();
        assert!(manifest.contains("bogus"));
    }

    #[test]
    fn rejects_invalid_json_and_bad_fields() {
        assert!(DownloadManifest::from_json_str("not json").is_err());
        assert!(DownloadManifest::from_json_str("[]").is_err());
        let bad_date = r#"{"w080n40": {"url": "u", "name": "n", "date": "2024-01-15", "size": 0}}"#;
        assert!(matches!(
            DownloadManifest::from_json_str(bad_date),
            Err(ManifestError::Json(_))
        ));
        let bad_size = r#"{"w080n40": {"url": "u", "name": "n", "date": "20240115", "size": -1}}"#;
        assert!(DownloadManifest::from_json_str(bad_size).is_err());
    }

    #[test]
    fn empty_object_is_empty_manifest() {
        let manifest = DownloadManifest::from_json_str("{}").unwrap();
        assert!(manifest.is_empty());
        assert_eq!(manifest.len(), 0);
    }
}
