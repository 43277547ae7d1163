//! Viewer actions run after initialization.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::params::SearchParams;
use crate::template::js_literal;

/// What the generated script asks the viewer to do once constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Render the whole index structure.
    #[default]
    Overview,
    /// Search with the stored vector of row `id`.
    SearchById { id: u64 },
    /// Search with a random vector drawn from the index's test set.
    SearchRandomTestVector,
}

impl Action {
    /// Returns the JS statements invoking this action on the `feder` viewer.
    pub fn to_js(&self, search_params: &SearchParams) -> Result<String> {
        let js = match self {
            Action::Overview => "feder.overview()".to_string(),
            Action::SearchById { id } => format!(
                "feder.setSearchParams({})\nfeder.searchById({})",
                js_literal(search_params)?,
                id
            ),
            Action::SearchRandomTestVector => format!(
                "feder.setSearchParams({})\nfeder.searchRandomTestVector()",
                js_literal(search_params)?
            ),
        };
        Ok(js)
    }
}
