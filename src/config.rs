//! Template manifest handling.
//! Loads the variables a template declares and resolves their values
//! without prompting: supplied values win, then defaults.

use crate::constants::CONFIG_FILES;
use crate::context::ContextMap;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::Path;

/// A single variable declared by a template.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Variable {
    /// Default value. String defaults are templates rendered against the
    /// variables declared before this one.
    #[serde(default)]
    pub default: Option<serde_json::Value>,

    /// Human readable description of the variable
    #[serde(default)]
    pub help: Option<String>,
}

/// Variables declared by a template, in declaration order.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct TemplateConfig {
    pub variables: IndexMap<String, Variable>,
}

impl TemplateConfig {
    /// Parses manifest content, trying JSON first and YAML second.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the content is neither valid JSON nor YAML
    pub fn parse(content: &str) -> Result<Self> {
        match serde_json::from_str(content) {
            Ok(config) => Ok(config),
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::ConfigError(format!("Invalid configuration format: {e}"))),
        }
    }
}

/// Loads the manifest from `template_root`, trying each of [`CONFIG_FILES`].
///
/// A template without a manifest declares no variables.
pub fn load_config<P: AsRef<Path>>(template_root: P) -> Result<TemplateConfig> {
    let template_root = template_root.as_ref();
    for file in CONFIG_FILES {
        let config_path = template_root.join(file);
        if config_path.is_file() {
            debug!("Loading configuration from {}", config_path.display());
            let content = std::fs::read_to_string(&config_path)?;
            return TemplateConfig::parse(&content);
        }
    }

    debug!("No configuration file found (tried: {})", CONFIG_FILES.join(", "));
    Ok(TemplateConfig::default())
}

/// Resolves the value of every declared variable.
///
/// # Arguments
/// * `engine` - Renderer used for string defaults
/// * `config` - Variables declared by the template
/// * `overrides` - Values supplied by the caller
///
/// # Returns
/// * `Result<serde_json::Value>` - JSON object used as the rendering context
///
/// # Errors
/// * `Error::MissingVariable` if a variable has no supplied value and no default
/// * `Error::MinijinjaError` if a default fails to render
pub fn resolve_answers(
    engine: &dyn TemplateRenderer,
    config: &TemplateConfig,
    overrides: &ContextMap,
) -> Result<serde_json::Value> {
    let mut answers = serde_json::Map::new();

    for (name, variable) in &config.variables {
        let value = match (overrides.get(name), &variable.default) {
            (Some(value), _) => value.clone(),
            (None, Some(serde_json::Value::String(template))) => {
                let current_context = serde_json::Value::Object(answers.clone());
                serde_json::Value::String(engine.render(template, &current_context)?)
            }
            (None, Some(value)) => value.clone(),
            (None, None) => return Err(Error::MissingVariable { name: name.clone() }),
        };
        debug!("Resolved '{name}' = {value}");
        answers.insert(name.clone(), value);
    }

    // Undeclared values are passed through as given.
    for (name, value) in overrides {
        if !answers.contains_key(name) {
            debug!("Passing through undeclared variable '{name}'");
            answers.insert(name.clone(), value.clone());
        }
    }

    Ok(serde_json::Value::Object(answers))
}
