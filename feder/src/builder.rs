use std::fmt;
use std::io;

use crate::action::Action;
use crate::config::EmbedConfig;
use crate::display::{DisplaySurface, EvcxrDisplay, write_evcxr};
use crate::error::Result;
use crate::id::{IdSource, RandomIdSource};
use crate::params::{SearchParams, ViewParams};
use crate::template::{self, InitScriptData, escape_attr, js_literal};

/// CDN location of the Feder ES module.
pub const DEFAULT_LIBRARY_URL: &str = "https://unpkg.com/@zilliz/feder";

/// Index produced by hnswlib.
pub const SOURCE_HNSWLIB: &str = "hnswlib";
/// Index produced by faiss.
pub const SOURCE_FAISS: &str = "faiss";

/// Builds the HTML document that embeds one Feder visualization.
///
/// The container id is fixed at construction; setters and action calls
/// only change what the generated script does.
pub struct EmbedBuilder {
    index_file: String,
    index_source: String,
    container_id: String,
    library_url: String,
    media_urls: Vec<String>,
    view_params: ViewParams,
    search_params: SearchParams,
    pending_action: String,
    display: Box<dyn DisplaySurface>,
}

impl EmbedBuilder {
    /// Creates a builder with a random container id.
    pub fn new(index_file: impl Into<String>, index_source: impl Into<String>) -> Self {
        Self::with_id_source(index_file, index_source, &RandomIdSource)
    }

    /// Creates a builder taking its container id from `ids`.
    pub fn with_id_source(
        index_file: impl Into<String>,
        index_source: impl Into<String>,
        ids: &dyn IdSource,
    ) -> Self {
        Self {
            index_file: index_file.into(),
            index_source: index_source.into(),
            container_id: ids.next_id(),
            library_url: DEFAULT_LIBRARY_URL.to_string(),
            media_urls: Vec::new(),
            view_params: ViewParams::default(),
            search_params: SearchParams::default(),
            pending_action: String::new(),
            display: Box::new(EvcxrDisplay::stdout()),
        }
    }

    /// Creates a builder from a config document.
    ///
    /// The config's action is not run; pass it to [`EmbedBuilder::apply`].
    pub fn from_config(cfg: &EmbedConfig, ids: &dyn IdSource) -> Self {
        let mut builder = Self::with_id_source(&cfg.index_file, &cfg.index_source, ids)
            .media_urls(cfg.media_urls.clone())
            .view_params(cfg.view_params.clone());
        if !cfg.library_url.is_empty() {
            builder = builder.library_url(&cfg.library_url);
        }
        builder.set_search_params(cfg.search_params.clone());
        builder
    }

    /// Media URLs looked up by row id; row `i` shows `urls[i]`.
    pub fn media_urls(mut self, urls: Vec<String>) -> Self {
        self.media_urls = urls;
        self
    }

    pub fn view_params(mut self, params: ViewParams) -> Self {
        self.view_params = params;
        self
    }

    /// Overrides the module URL, e.g. to point at a local dev build.
    pub fn library_url(mut self, url: impl Into<String>) -> Self {
        self.library_url = url.into();
        self
    }

    /// Sets where [`EmbedBuilder::render`] sends documents.
    pub fn display(mut self, display: impl DisplaySurface + 'static) -> Self {
        self.display = Box::new(display);
        self
    }

    /// Replaces the search params used by the next search action.
    pub fn set_search_params(&mut self, params: SearchParams) {
        self.search_params = params;
    }

    pub fn container_id(&self) -> &str {
        &self.container_id
    }

    pub fn index_file(&self) -> &str {
        &self.index_file
    }

    pub fn index_source(&self) -> &str {
        &self.index_source
    }

    pub fn search_params(&self) -> &SearchParams {
        &self.search_params
    }

    /// JS run after the viewer is constructed; empty until an action is called.
    pub fn pending_action(&self) -> &str {
        &self.pending_action
    }

    /// Shows the index overview.
    ///
    /// With `display` the document goes to the display surface and `None` is
    /// returned; otherwise the document is returned.
    pub fn overview(&mut self, display: bool) -> Result<Option<String>> {
        self.apply(Action::Overview, display)
    }

    /// Searches with the vector of row `target_id` using the current search params.
    pub fn search_by_id(&mut self, target_id: u64, display: bool) -> Result<Option<String>> {
        self.apply(Action::SearchById { id: target_id }, display)
    }

    /// Searches with a random test vector using the current search params.
    pub fn search_random_test_vector(&mut self, display: bool) -> Result<Option<String>> {
        self.apply(Action::SearchRandomTestVector, display)
    }

    /// Replaces the pending action, then displays or returns the document.
    pub fn apply(&mut self, action: Action, display: bool) -> Result<Option<String>> {
        self.pending_action = action.to_js(&self.search_params)?;
        tracing::debug!(container_id = %self.container_id, ?action, "set pending action");
        if display {
            self.render()?;
            Ok(None)
        } else {
            self.html().map(Some)
        }
    }

    pub fn container_markup(&self) -> String {
        format!("<div id=\"{}\" />", escape_attr(&self.container_id))
    }

    pub fn init_script(&self) -> Result<String> {
        template::render_init_script(&InitScriptData {
            library_url: js_literal(&self.library_url)?,
            media_urls: js_literal(&self.media_urls)?,
            file_path: js_literal(&self.index_file)?,
            source: js_literal(&self.index_source)?,
            dom_selector: js_literal(&format!("#{}", self.container_id))?,
            view_params: js_literal(&self.view_params)?,
        })
    }

    pub fn script(&self) -> Result<String> {
        Ok(format!("{}\n{}\n", self.init_script()?, self.pending_action))
    }

    pub fn html(&self) -> Result<String> {
        template::render_document(&self.container_markup(), &self.script()?)
    }

    /// Sends the document to the display surface.
    pub fn render(&self) -> Result<()> {
        let html = self.html()?;
        tracing::debug!(container_id = %self.container_id, bytes = html.len(), "render");
        self.display.render(&html)
    }

    /// Inline output hook picked up by evcxr when the builder ends a cell.
    pub fn evcxr_display(&self) {
        let result = self
            .html()
            .and_then(|html| Ok(write_evcxr(&mut io::stdout().lock(), &html)?));
        if let Err(e) = result {
            tracing::warn!(error = %e, "evcxr display failed");
        }
    }
}

impl fmt::Debug for EmbedBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmbedBuilder")
            .field("index_file", &self.index_file)
            .field("index_source", &self.index_source)
            .field("container_id", &self.container_id)
            .field("library_url", &self.library_url)
            .field("media_urls_len", &self.media_urls.len())
            .field("view_params", &self.view_params)
            .field("search_params", &self.search_params)
            .field("pending_action", &self.pending_action)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MemoryDisplay;
    use crate::id::SequentialIdSource;

    fn builder() -> EmbedBuilder {
        let ids = SequentialIdSource::starting_at(1);
        EmbedBuilder::with_id_source("voc.index", SOURCE_HNSWLIB, &ids)
    }

    #[test]
    fn test_container_markup() {
        assert_eq!(builder().container_markup(), r#"<div id="feder-container-1" />"#);
    }

    #[test]
    fn test_dom_selector_matches_container() {
        let b = EmbedBuilder::new("voc.index", SOURCE_HNSWLIB);
        let script = b.init_script().unwrap();
        let selector = format!("domSelector: \"#{}\"", b.container_id());
        assert!(script.contains(&selector), "{}", script);
        assert!(b.container_markup().contains(&format!("id=\"{}\"", b.container_id())));
    }

    #[test]
    fn test_pending_action_empty_until_action() {
        let b = builder();
        assert_eq!(b.pending_action(), "");
        let script = b.script().unwrap();
        assert!(!script.contains("feder.overview()"));
    }

    #[test]
    fn test_overview_returns_html() {
        let mut b = builder();
        let html = b.overview(false).unwrap().unwrap();
        assert_eq!(html.matches("feder.overview()").count(), 1);
        assert_eq!(b.pending_action(), "feder.overview()");
    }

    #[test]
    fn test_actions_replace_each_other() {
        let mut b = builder();
        let first = b.overview(false).unwrap().unwrap();
        assert!(first.contains("feder.overview()"));
        assert!(!first.contains("feder.searchById"));

        let second = b.search_by_id(42, false).unwrap().unwrap();
        assert_eq!(second.matches("feder.searchById(42)").count(), 1);
        assert!(!second.contains("feder.overview()"));
        assert_eq!(second.matches("feder.setSearchParams(").count(), 1);
    }

    #[test]
    fn test_search_params_precede_random_search() {
        let mut b = builder();
        b.set_search_params(SearchParams::new().k(10));
        let html = b.search_random_test_vector(false).unwrap().unwrap();
        assert!(html.contains("feder.setSearchParams({\"k\":10})\nfeder.searchRandomTestVector()"));
    }

    #[test]
    fn test_set_search_params_replaces() {
        let mut b = builder();
        b.set_search_params(SearchParams::new().k(10).ef(20));
        b.set_search_params(SearchParams::new().nprobe(4));
        assert_eq!(b.search_params(), &SearchParams::new().nprobe(4));
        let html = b.search_by_id(1, false).unwrap().unwrap();
        assert!(html.contains("feder.setSearchParams({\"nprobe\":4})"));
    }

    #[test]
    fn test_search_params_captured_at_action_time() {
        let mut b = builder();
        b.set_search_params(SearchParams::new().k(3));
        b.search_by_id(5, false).unwrap();
        b.set_search_params(SearchParams::new().k(9));
        assert!(b.pending_action().contains("{\"k\":3}"));
    }

    #[test]
    fn test_display_true_renders_to_surface() {
        let memory = MemoryDisplay::new();
        let mut b = builder().display(memory.clone());
        let out = b.search_by_id(7, true).unwrap();
        assert!(out.is_none());
        let docs = memory.documents();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].contains("feder.searchById(7)"));
        assert_eq!(docs[0], b.html().unwrap());
    }

    #[test]
    fn test_render_without_action() {
        let memory = MemoryDisplay::new();
        let b = builder().display(memory.clone());
        b.render().unwrap();
        assert_eq!(memory.documents().len(), 1);
    }

    #[test]
    fn test_view_params_spread() {
        let b = builder().view_params(ViewParams::new().width(1000).media_type("img"));
        let script = b.init_script().unwrap();
        assert!(script.contains(r#"...{"mediaType":"img","width":1000},"#), "{}", script);
        assert!(script.contains("        mediaCallback,\n"));
    }

    #[test]
    fn test_library_url_override() {
        let b = builder().library_url("http://localhost:12357/feder_esm.js");
        let script = b.init_script().unwrap();
        assert!(script.contains(r#"import { Viewer } from "http://localhost:12357/feder_esm.js""#));
    }

    #[test]
    fn test_from_config() {
        let cfg = EmbedConfig {
            index_file: "ivf.index".into(),
            index_source: SOURCE_FAISS.into(),
            media_urls: vec!["0.jpg".into()],
            search_params: SearchParams::new().nprobe(8),
            library_url: "http://localhost/feder.js".into(),
            action: Action::SearchRandomTestVector,
            ..Default::default()
        };
        let ids = SequentialIdSource::starting_at(100);
        let mut b = EmbedBuilder::from_config(&cfg, &ids);
        assert_eq!(b.container_id(), "feder-container-100");
        assert_eq!(b.index_source(), "faiss");
        let html = b.apply(cfg.action, false).unwrap().unwrap();
        assert!(html.contains(r#"source: "faiss","#));
        assert!(html.contains(r#"from "http://localhost/feder.js""#));
        assert!(html.contains("feder.setSearchParams({\"nprobe\":8})\nfeder.searchRandomTestVector()"));
    }

    #[test]
    fn test_from_config_default_library_url() {
        let cfg = EmbedConfig {
            index_file: "x".into(),
            index_source: "hnswlib".into(),
            ..Default::default()
        };
        let b = EmbedBuilder::from_config(&cfg, &RandomIdSource);
        assert!(b.init_script().unwrap().contains(DEFAULT_LIBRARY_URL));
    }

    #[test]
    fn test_debug_omits_urls() {
        let b = builder().media_urls(vec!["secret.jpg".into()]);
        let dbg = format!("{:?}", b);
        assert!(dbg.contains("media_urls_len: 1"));
        assert!(!dbg.contains("secret.jpg"));
    }
}
