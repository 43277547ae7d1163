//! HTML and script templates for the embed document.

use minijinja::{Environment, context};
use serde::Serialize;

use crate::error::Result;

/// Init script: imports the library, wires the media lookup and builds the viewer.
///
/// Every placeholder receives an already encoded JS literal.
pub const INIT_SCRIPT_TEMPLATE: &str = r#"
import { Viewer } from {{ library_url }}

const mediaUrls = {{ media_urls }}
const mediaCallback = (rowId) => rowId in mediaUrls ? mediaUrls[rowId] : null

const feder = new Viewer({
    filePath: {{ file_path }},
    source: {{ source }},
    domSelector: {{ dom_selector }},
    viewParams: {
        ...{{ view_params }},
        mediaCallback,
    }
})
"#;

/// Standalone HTML page hosting one container and one module script.
pub const DOCUMENT_TEMPLATE: &str = r##"<!DOCTYPE html>
<html>

<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <meta name="theme-color" content="#ffffff" />
  <title>Feder</title>
</head>

<body style="background:#000">
  {{ container }}
</body>

<script type="module">
{{ script }}
</script>

</html>
"##;

/// Literal values interpolated into [`INIT_SCRIPT_TEMPLATE`].
#[derive(Debug, Clone, Serialize)]
pub struct InitScriptData {
    pub library_url: String,
    pub media_urls: String,
    pub file_path: String,
    pub source: String,
    pub dom_selector: String,
    pub view_params: String,
}

// Template names carry no extension so minijinja disables auto-escaping;
// values are escaped by `js_literal` and `escape_attr` instead.
fn environment() -> Result<Environment<'static>> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    env.add_template("init_script", INIT_SCRIPT_TEMPLATE)?;
    env.add_template("document", DOCUMENT_TEMPLATE)?;
    Ok(env)
}

/// Renders the init script for the given literals.
pub fn render_init_script(data: &InitScriptData) -> Result<String> {
    let env = environment()?;
    let tmpl = env.get_template("init_script")?;
    Ok(tmpl.render(data)?)
}

/// Renders the full HTML document around `container` markup and `script` source.
pub fn render_document(container: &str, script: &str) -> Result<String> {
    let env = environment()?;
    let tmpl = env.get_template("document")?;
    Ok(tmpl.render(context! { container, script })?)
}

/// Encodes `value` as a JSON literal that is safe inside an inline `<script>`.
///
/// `<`, `>` and `&` only ever occur inside JSON strings, where a `\uXXXX`
/// escape decodes to the same character, so the result stays valid JSON.
/// U+2028 and U+2029 are escaped for pre-ES2019 engines.
pub fn js_literal<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string(value)?;
    let mut out = String::with_capacity(json.len());
    for ch in json.chars() {
        match ch {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            c => out.push(c),
        }
    }
    Ok(out)
}

/// Escapes a value for a double-quoted HTML attribute.
pub fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}
