//! Embed [Feder](https://github.com/zilliztech/feder) vector index
//! visualizations into notebooks and standalone HTML pages.
//!
//! The crate only generates HTML: a container `div` plus a module script
//! that imports Feder, builds a viewer bound to the container and runs one
//! action. Parsing the index and drawing it happen in the browser.
//!
//! # Usage
//!
//! ```
//! use giztoy_feder::{EmbedBuilder, SearchParams, ViewParams, SOURCE_HNSWLIB};
//!
//! let mut feder = EmbedBuilder::new("https://example.com/voc.index", SOURCE_HNSWLIB)
//!     .media_urls(vec!["https://example.com/0.jpg".into()])
//!     .view_params(ViewParams::new().width(1000).height(600).media_type("img"));
//!
//! feder.set_search_params(SearchParams::new().k(6));
//! let html = feder.search_by_id(0, false).unwrap().unwrap();
//! assert!(html.contains("feder.searchById(0)"));
//! ```
//!
//! In an evcxr notebook, ending a cell with the builder shows the view
//! inline; `overview(true)` and the other actions write to the configured
//! [`DisplaySurface`] instead.

mod action;
mod builder;
mod config;
mod display;
mod error;
mod id;
mod params;
pub mod template;

pub use action::Action;
pub use builder::{DEFAULT_LIBRARY_URL, EmbedBuilder, SOURCE_FAISS, SOURCE_HNSWLIB};
pub use config::EmbedConfig;
pub use display::{
    DisplaySurface, EvcxrDisplay, HTML_MIME, HtmlFileDisplay, MemoryDisplay, write_evcxr,
};
pub use error::{FederError, Result};
pub use id::{CONTAINER_PREFIX, IdSource, RandomIdSource, SequentialIdSource, UuidIdSource};
pub use params::{SearchParams, ViewParams};
