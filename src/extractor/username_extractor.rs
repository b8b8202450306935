use crate::config::ExtractConfig;
use crate::error::{CheckerError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::btree_set::{self, BTreeSet};
use std::fmt;
use std::fs;
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Which of the two Instagram export layouts a document follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportShape {
    /// `followers_1.json`: a bare array of records.
    Followers,
    /// `following.json`: an object holding the record array under a named key.
    Following,
}

impl ExportShape {
    pub fn label(&self) -> &'static str {
        match self {
            ExportShape::Followers => "followers",
            ExportShape::Following => "following",
        }
    }
}

impl fmt::Display for ExportShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Case-sensitive set of usernames collected from one export document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsernameSet {
    names: BTreeSet<String>,
}

impl UsernameSet {
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn contains(&self, username: &str) -> bool {
        self.names.contains(username)
    }

    /// Usernames in ascending byte-wise order.
    pub fn iter(&self) -> btree_set::Iter<'_, String> {
        self.names.iter()
    }

    pub(crate) fn as_btree(&self) -> &BTreeSet<String> {
        &self.names
    }
}

impl<S: Into<String>> FromIterator<S> for UsernameSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a UsernameSet {
    type Item = &'a String;
    type IntoIter = btree_set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    pub records_seen: usize,
    pub records_skipped: usize,
    pub pairs_seen: usize,
    pub pairs_without_value: usize,
    pub usernames_collected: usize,
    pub unique_usernames: usize,
}

impl ExtractionStats {
    pub fn duplicates(&self) -> usize {
        self.usernames_collected.saturating_sub(self.unique_usernames)
    }

    pub fn display_summary(&self) -> String {
        format!(
            "{} records ({} skipped), {} entries ({} without a username), {} unique usernames ({} duplicates)",
            self.records_seen,
            self.records_skipped,
            self.pairs_seen,
            self.pairs_without_value,
            self.unique_usernames,
            self.duplicates()
        )
    }
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub usernames: UsernameSet,
    pub stats: ExtractionStats,
}

pub struct UsernameExtractor<'a> {
    keys: &'a ExtractConfig,
}

impl<'a> UsernameExtractor<'a> {
    pub fn new(keys: &'a ExtractConfig) -> Self {
        Self { keys }
    }

    pub fn load_file<P: AsRef<Path>>(&self, path: P, shape: ExportShape) -> Result<Extraction> {
        let path = path.as_ref();

        if !path.is_file() {
            return Err(CheckerError::InvalidPath {
                path: format!("{} is not a readable file", path.display()),
            });
        }

        let bytes = fs::read(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::PermissionDenied => CheckerError::Permission {
                path: path.display().to_string(),
            },
            _ => CheckerError::Io(e),
        })?;

        self.parse(&bytes, shape)
    }

    pub fn parse(&self, bytes: &[u8], shape: ExportShape) -> Result<Extraction> {
        // Exports re-saved by some Windows editors start with a UTF-8 byte order mark.
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let document: Value = serde_json::from_slice(bytes)
            .map_err(|e| CheckerError::malformed(shape.label(), format!("invalid JSON ({})", e)))?;

        self.extract(&document, shape)
    }

    pub fn extract(&self, document: &Value, shape: ExportShape) -> Result<Extraction> {
        let records = self.records(document, shape)?;

        let mut stats = ExtractionStats::default();
        let mut collected = Vec::new();

        for record in records {
            stats.records_seen += 1;

            let Some(pairs) = record.get(&self.keys.pairs_key).and_then(Value::as_array) else {
                stats.records_skipped += 1;
                continue;
            };

            for pair in pairs {
                stats.pairs_seen += 1;
                match pair.get(&self.keys.value_key).and_then(Value::as_str) {
                    Some(username) => collected.push(username),
                    None => stats.pairs_without_value += 1,
                }
            }
        }

        stats.usernames_collected = collected.len();
        let usernames: UsernameSet = collected.into_iter().collect();
        stats.unique_usernames = usernames.len();

        Ok(Extraction { usernames, stats })
    }

    fn records<'v>(&self, document: &'v Value, shape: ExportShape) -> Result<&'v [Value]> {
        match shape {
            ExportShape::Followers => document.as_array().map(Vec::as_slice).ok_or_else(|| {
                CheckerError::malformed(
                    shape.label(),
                    format!("expected a list of records, found {}", json_type(document)),
                )
            }),
            ExportShape::Following => {
                let object = document.as_object().ok_or_else(|| {
                    CheckerError::malformed(
                        shape.label(),
                        format!("expected an object, found {}", json_type(document)),
                    )
                })?;

                match object.get(&self.keys.following_key) {
                    None => Ok(<&[Value]>::default()),
                    Some(Value::Array(records)) => Ok(records.as_slice()),
                    Some(other) => Err(CheckerError::malformed(
                        shape.label(),
                        format!(
                            "expected \"{}\" to hold a list of records, found {}",
                            self.keys.following_key,
                            json_type(other)
                        ),
                    )),
                }
            }
        }
    }
}

/// Extracts usernames from an already parsed document using the default
/// Instagram field names.
pub fn extract_usernames(document: &Value, shape: ExportShape) -> Result<UsernameSet> {
    let keys = ExtractConfig::default();
    UsernameExtractor::new(&keys)
        .extract(document, shape)
        .map(|extraction| extraction.usernames)
}

pub fn parse_usernames(bytes: &[u8], shape: ExportShape) -> Result<UsernameSet> {
    let keys = ExtractConfig::default();
    UsernameExtractor::new(&keys)
        .parse(bytes, shape)
        .map(|extraction| extraction.usernames)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(values: &[&str]) -> Value {
        let pairs: Vec<Value> = values
            .iter()
            .map(|v| json!({ "href": format!("https://www.instagram.com/{}", v), "value": v, "timestamp": 1700000000 }))
            .collect();
        json!({ "title": "", "media_list_data": [], "string_list_data": pairs })
    }

    fn names(set: &UsernameSet) -> Vec<&str> {
        set.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_followers_shape() {
        let document = json!([record(&["alice"]), record(&["bob"]), record(&["alice"])]);
        let usernames = extract_usernames(&document, ExportShape::Followers).unwrap();
        assert_eq!(names(&usernames), vec!["alice", "bob"]);
    }

    #[test]
    fn test_following_shape() {
        let document = json!({ "relationships_following": [record(&["carol"]), record(&["bob"])] });
        let usernames = extract_usernames(&document, ExportShape::Following).unwrap();
        assert_eq!(names(&usernames), vec!["bob", "carol"]);
    }

    #[test]
    fn test_every_pair_in_a_record_is_collected() {
        let document = json!([record(&["first", "second", "third"])]);
        let usernames = extract_usernames(&document, ExportShape::Followers).unwrap();
        assert_eq!(usernames.len(), 3);
        assert!(usernames.contains("second"));
    }

    #[test]
    fn test_records_without_pairs_are_skipped() {
        let keys = ExtractConfig::default();
        let document = json!([
            { "title": "no pairs here" },
            { "string_list_data": [] },
            { "string_list_data": "not a list" },
            "not even an object",
            record(&["dave"]),
        ]);

        let extraction = UsernameExtractor::new(&keys)
            .extract(&document, ExportShape::Followers)
            .unwrap();

        assert_eq!(names(&extraction.usernames), vec!["dave"]);
        assert_eq!(extraction.stats.records_seen, 5);
        assert_eq!(extraction.stats.records_skipped, 3);
    }

    #[test]
    fn test_pairs_without_string_value_are_skipped() {
        let keys = ExtractConfig::default();
        let document = json!([{ "string_list_data": [
            { "href": "https://www.instagram.com/ghost" },
            { "value": 42 },
            { "value": "erin" },
        ] }]);

        let extraction = UsernameExtractor::new(&keys)
            .extract(&document, ExportShape::Followers)
            .unwrap();

        assert_eq!(names(&extraction.usernames), vec!["erin"]);
        assert_eq!(extraction.stats.pairs_seen, 3);
        assert_eq!(extraction.stats.pairs_without_value, 2);
    }

    #[test]
    fn test_missing_following_key_yields_empty_set() {
        let document = json!({ "something_else": [record(&["frank"])] });
        let usernames = extract_usernames(&document, ExportShape::Following).unwrap();
        assert!(usernames.is_empty());
    }

    #[test]
    fn test_wrong_container_types_are_malformed() {
        let as_list = json!([record(&["gina"])]);
        assert!(matches!(
            extract_usernames(&as_list, ExportShape::Following),
            Err(CheckerError::MalformedInput { .. })
        ));

        let as_object = json!({ "relationships_following": [] });
        assert!(matches!(
            extract_usernames(&as_object, ExportShape::Followers),
            Err(CheckerError::MalformedInput { .. })
        ));

        let bad_key = json!({ "relationships_following": { "not": "a list" } });
        assert!(matches!(
            extract_usernames(&bad_key, ExportShape::Following),
            Err(CheckerError::MalformedInput { .. })
        ));
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let err = parse_usernames(b"[{\"string_list_data\": [", ExportShape::Followers).unwrap_err();
        match err {
            CheckerError::MalformedInput { document, .. } => assert_eq!(document, "followers"),
            other => panic!("unexpected error: {:?}", other),
        }

        assert!(parse_usernames(b"<html></html>", ExportShape::Following).is_err());
    }

    #[test]
    fn test_byte_order_mark_is_ignored() {
        let usernames = parse_usernames(
            b"\xEF\xBB\xBF[{\"string_list_data\":[{\"value\":\"amy\"}]}]",
            ExportShape::Followers,
        )
        .unwrap();
        assert_eq!(names(&usernames), vec!["amy"]);

        let following = parse_usernames(b"\xEF\xBB\xBF{}", ExportShape::Following).unwrap();
        assert!(following.is_empty());
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        let document = json!([record(&["Alice", "alice"])]);
        let usernames = extract_usernames(&document, ExportShape::Followers).unwrap();
        assert_eq!(usernames.len(), 2);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let bytes = serde_json::to_vec(&json!([record(&["zed", "amy"]), record(&["amy"])])).unwrap();
        let first = parse_usernames(&bytes, ExportShape::Followers).unwrap();
        let second = parse_usernames(&bytes, ExportShape::Followers).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_custom_keys() {
        let keys = ExtractConfig {
            following_key: "following".to_string(),
            pairs_key: "entries".to_string(),
            value_key: "name".to_string(),
        };
        let document = json!({ "following": [{ "entries": [{ "name": "hal" }] }] });

        let extraction = UsernameExtractor::new(&keys)
            .extract(&document, ExportShape::Following)
            .unwrap();
        assert!(extraction.usernames.contains("hal"));
    }

    #[test]
    fn test_load_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("followers_1.json");
        fs::write(&path, serde_json::to_vec(&json!([record(&["ivy"])])).unwrap()).unwrap();

        let keys = ExtractConfig::default();
        let extractor = UsernameExtractor::new(&keys);
        let extraction = extractor.load_file(&path, ExportShape::Followers).unwrap();
        assert!(extraction.usernames.contains("ivy"));

        let missing = extractor.load_file(temp_dir.path().join("nope.json"), ExportShape::Followers);
        assert!(matches!(missing, Err(CheckerError::InvalidPath { .. })));
    }

    #[test]
    fn test_stats_summary() {
        let stats = ExtractionStats {
            records_seen: 3,
            records_skipped: 1,
            pairs_seen: 2,
            pairs_without_value: 0,
            usernames_collected: 2,
            unique_usernames: 1,
        };
        assert_eq!(stats.duplicates(), 1);
        assert!(stats.display_summary().contains("3 records (1 skipped)"));
    }

    #[test]
    fn test_duplicates_never_underflow() {
        let stats = ExtractionStats {
            usernames_collected: 1,
            unique_usernames: 4,
            ..ExtractionStats::default()
        };
        assert_eq!(stats.duplicates(), 0);
        assert!(stats.display_summary().contains("(0 duplicates)"));
    }
}
