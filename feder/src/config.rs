//! Serializable description of one embed.

use serde::{Deserialize, Serialize};

use crate::action::Action;
use crate::params::{SearchParams, ViewParams};

/// One visualization request, loadable from YAML or JSON.
///
/// ```yaml
/// index_file: https://example.com/hnswlib_hnsw_voc_17k_1f1dfd63a9.index
/// index_source: hnswlib
/// media_urls:
///   - https://example.com/voc/0.jpg
/// view_params:
///   width: 1000
///   mediaType: img
/// search_params:
///   k: 6
/// action:
///   type: search_by_id
///   id: 42
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmbedConfig {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub index_file: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub index_source: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub media_urls: Vec<String>,

    #[serde(default, skip_serializing_if = "ViewParams::is_empty")]
    pub view_params: ViewParams,

    #[serde(default, skip_serializing_if = "SearchParams::is_empty")]
    pub search_params: SearchParams,

    /// Library module URL; empty means [`crate::DEFAULT_LIBRARY_URL`].
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub library_url: String,

    #[serde(default)]
    pub action: Action,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
index_file: data/voc.index
index_source: hnswlib
media_urls:
  - a.jpg
  - b.jpg
view_params:
  width: 1000
search_params:
  k: 6
action:
  type: search_by_id
  id: 42
"#;
        let cfg: EmbedConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.index_file, "data/voc.index");
        assert_eq!(cfg.index_source, "hnswlib");
        assert_eq!(cfg.media_urls, vec!["a.jpg", "b.jpg"]);
        assert_eq!(cfg.view_params, ViewParams::new().width(1000));
        assert_eq!(cfg.search_params, SearchParams::new().k(6));
        assert!(cfg.library_url.is_empty());
        assert_eq!(cfg.action, Action::SearchById { id: 42 });
    }

    #[test]
    fn test_defaults() {
        let cfg: EmbedConfig =
            serde_json::from_str(r#"{"index_file": "x.index", "index_source": "faiss"}"#).unwrap();
        assert!(cfg.media_urls.is_empty());
        assert!(cfg.view_params.is_empty());
        assert!(cfg.search_params.is_empty());
        assert_eq!(cfg.action, Action::Overview);
    }
}
