//! Generation run orchestration
//!
//! Ties the pipeline together: load the config, discover every resource
//! definition through its provider, then render and write each output.
//! The first failure aborts the run.

use crate::config::{GenConfig, resolve_template_path};
use crate::renderer::{Renderer, TemplateData};
use crate::resources::ProviderRegistry;
use anyhow::{Context, Result};
use ddconf_common::Resource;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// What a generation run produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    /// `(resource name, node count)` in definition order
    pub resources: Vec<(String, usize)>,
    /// Files written, in output order
    pub outputs: Vec<PathBuf>,
}

/// Load the config at `config_path` and run it to completion.
pub async fn run(config_path: &Path, registry: &ProviderRegistry) -> Result<GenerationSummary> {
    info!(config = %config_path.display(), "Loading generation config");
    let config = GenConfig::load(config_path)
        .with_context(|| format!("invalid generation config {}", config_path.display()))?;

    let discovered = discover_all(&config, registry).await?;
    let outputs = render_outputs(&config, config_path, &discovered, &Renderer::new())?;

    let resources = config
        .resources
        .iter()
        .map(|r| {
            let count = discovered.get(&r.name).map_or(0, Vec::len);
            (r.name.clone(), count)
        })
        .collect();

    Ok(GenerationSummary { resources, outputs })
}

/// Discover every resource definition, in order, keyed by name.
pub async fn discover_all(
    config: &GenConfig,
    registry: &ProviderRegistry,
) -> Result<HashMap<String, Vec<Resource>>> {
    let mut discovered = HashMap::new();

    for definition in &config.resources {
        info!(
            name = %definition.name,
            resource_type = %definition.resource_type,
            region = %definition.region,
            "Discovering resources"
        );

        let provider = registry
            .get(&definition.resource_type)
            .with_context(|| format!("resource '{}'", definition.name))?;
        let provider_config = definition
            .provider_config()
            .with_context(|| format!("resource '{}'", definition.name))?;
        provider
            .validate_config(&provider_config)
            .with_context(|| format!("invalid config for resource '{}'", definition.name))?;

        let nodes = provider
            .discover(&provider_config)
            .await
            .with_context(|| format!("failed to discover resource '{}'", definition.name))?;

        info!(name = %definition.name, count = nodes.len(), "Discovered resources");
        discovered.insert(definition.name.clone(), nodes);
    }

    Ok(discovered)
}

/// Render each output and write it to disk.
pub fn render_outputs(
    config: &GenConfig,
    config_path: &Path,
    discovered: &HashMap<String, Vec<Resource>>,
    renderer: &Renderer,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::with_capacity(config.outputs.len());

    for output in &config.outputs {
        let Some(resources) = discovered.get(&output.data.resource_name) else {
            anyhow::bail!(
                "resource '{}' not found for output '{}'",
                output.data.resource_name,
                output.output_file.display()
            );
        };
        let template = resolve_template_path(config_path, &output.template);
        debug!(
            template = %template.display(),
            output_file = %output.output_file.display(),
            resources = resources.len(),
            "Rendering output"
        );

        let rendered = renderer
            .render_file(
                &template,
                &TemplateData {
                    resources: resources.as_slice(),
                    static_data: &output.data.static_data,
                },
            )
            .with_context(|| format!("failed to render {}", output.output_file.display()))?;

        write_output(&output.output_file, rendered.as_bytes())?;
        info!(output_file = %output.output_file.display(), "Wrote config file");
        written.push(output.output_file.clone());
    }

    Ok(written)
}

/// Write `contents` to `path`, creating parent directories as needed.
pub fn write_output(path: &Path, contents: &[u8]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    }
    std::fs::write(path, contents)
        .with_context(|| format!("failed to write output file {}", path.display()))
}
