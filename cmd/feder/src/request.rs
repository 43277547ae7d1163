//! Loading request documents and media URL lists.

use std::fs;
use std::io;
use std::path::Path;

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Error type for request loading.
#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to read file: {0}")]
    ReadFile(#[from] io::Error),
    #[error("failed to parse YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),
    #[error("failed to parse JSON: {0}")]
    ParseJson(#[from] serde_json::Error),
    #[error("failed to parse file (tried YAML and JSON)")]
    ParseFailed,
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Loads a YAML or JSON document from `path`.
pub fn load_document<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, RequestError> {
    let data = fs::read(path.as_ref())?;
    parse_document(&data, path.as_ref())
}

/// Parses by file extension; unknown extensions try YAML, then JSON.
pub fn parse_document<T: DeserializeOwned>(
    data: &[u8],
    path: impl AsRef<Path>,
) -> Result<T, RequestError> {
    match extension(path.as_ref()).as_deref() {
        Some("yaml") | Some("yml") => Ok(serde_yaml::from_slice(data)?),
        Some("json") => Ok(serde_json::from_slice(data)?),
        _ => {
            if let Ok(v) = serde_yaml::from_slice(data) {
                return Ok(v);
            }
            if let Ok(v) = serde_json::from_slice(data) {
                return Ok(v);
            }
            Err(RequestError::ParseFailed)
        }
    }
}

/// Loads media URLs from `path`.
///
/// `.yaml`, `.yml` and `.json` files hold a list of strings. Anything else
/// is read as one URL per line, skipping blank lines and `#` comments.
pub fn load_media_urls(path: impl AsRef<Path>) -> Result<Vec<String>, RequestError> {
    let path = path.as_ref();
    match extension(path).as_deref() {
        Some("yaml") | Some("yml") | Some("json") => load_document(path),
        _ => Ok(parse_url_lines(&fs::read_to_string(path)?)),
    }
}

fn parse_url_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use giztoy_feder::{Action, EmbedConfig};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_yaml_request() {
        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "index_file: a.index\nindex_source: hnswlib").unwrap();

        let cfg: EmbedConfig = load_document(file.path()).unwrap();
        assert_eq!(cfg.index_file, "a.index");
        assert_eq!(cfg.index_source, "hnswlib");
        assert_eq!(cfg.action, Action::Overview);
    }

    #[test]
    fn test_load_json_request() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(
            file,
            r#"{{"index_file": "b.index", "index_source": "faiss", "action": {{"type": "search_random_test_vector"}}}}"#
        )
        .unwrap();

        let cfg: EmbedConfig = load_document(file.path()).unwrap();
        assert_eq!(cfg.index_source, "faiss");
        assert_eq!(cfg.action, Action::SearchRandomTestVector);
    }

    #[test]
    fn test_parse_unknown_extension() {
        let cfg: EmbedConfig = parse_document(b"index_file: c.index", "request.txt").unwrap();
        assert_eq!(cfg.index_file, "c.index");
    }

    #[test]
    fn test_parse_invalid() {
        let result: Result<EmbedConfig, _> = parse_document(b"invalid data {{{{", "request.txt");
        assert!(matches!(result, Err(RequestError::ParseFailed)));
    }

    #[test]
    fn test_media_urls_lines() {
        let mut file = NamedTempFile::with_suffix(".txt").unwrap();
        writeln!(file, "# voc images\nhttps://x/0.jpg\n\n  https://x/1.jpg  \n").unwrap();

        let urls = load_media_urls(file.path()).unwrap();
        assert_eq!(urls, vec!["https://x/0.jpg", "https://x/1.jpg"]);
    }

    #[test]
    fn test_media_urls_json_list() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        writeln!(file, r#"["https://x/0.jpg", "https://x/#1.jpg"]"#).unwrap();

        let urls = load_media_urls(file.path()).unwrap();
        assert_eq!(urls, vec!["https://x/0.jpg", "https://x/#1.jpg"]);
    }
}
