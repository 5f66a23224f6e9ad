//! Template rendering
//!
//! Templates are Handlebars documents rendered against [`TemplateData`]:
//!
//! ```text
//! instances:
//! {{#each Resources}}  - host: {{Host}}
//!     port: {{Port}}
//!     tags: ["cluster:{{Metadata.ClusterName}}", "env:{{Tags.env}}"]
//! {{/each}}
//! ```
//!
//! Rendering is strict: referencing a field that does not exist is an error
//! rather than an empty string. Output is not HTML-escaped.

use crate::error::TemplateError;
use ddconf_common::Resource;
use handlebars::Handlebars;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// Data exposed to a template
#[derive(Debug, Clone, Copy, Serialize)]
pub struct TemplateData<'a> {
    #[serde(rename = "Resources")]
    pub resources: &'a [Resource],
    /// Free-form values from the output's `data.static`
    #[serde(rename = "Static")]
    pub static_data: &'a Map<String, Value>,
}

/// Handlebars renderer with the helpers available to every template
#[derive(Clone)]
pub struct Renderer {
    handlebars: Handlebars<'static>,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(true);
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("json", Box::new(json_helper));
        Self { handlebars }
    }

    /// Read the template at `path` and render it.
    pub fn render_file(
        &self,
        path: &Path,
        data: &TemplateData<'_>,
    ) -> Result<String, TemplateError> {
        let source = std::fs::read_to_string(path).map_err(|source| TemplateError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        self.render_source(&path.display().to_string(), &source, data)
    }

    /// Parse `source` as a template named `name` and render it.
    pub fn render_source(
        &self,
        name: &str,
        source: &str,
        data: &TemplateData<'_>,
    ) -> Result<String, TemplateError> {
        let mut registry = self.handlebars.clone();
        registry
            .register_template_string(name, source)
            .map_err(|e| TemplateError::Parse {
                name: name.to_string(),
                source: Box::new(e),
            })?;

        registry.render(name, data).map_err(|e| TemplateError::Render {
            name: name.to_string(),
            source: Box::new(e),
        })
    }
}

/// `{{json value}}` writes `value` as compact JSON, which is also valid YAML
/// flow syntax.
fn json_helper(
    h: &handlebars::Helper,
    _: &Handlebars,
    _: &handlebars::Context,
    _: &mut handlebars::RenderContext,
    out: &mut dyn handlebars::Output,
) -> handlebars::HelperResult {
    if let Some(v) = h.param(0) {
        out.write(&v.value().to_string())?;
    }
    Ok(())
}
