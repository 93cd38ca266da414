//! String rendering for template paths, contents and defaults.
//! Backed by MiniJinja with a few case-conversion filters.
use crate::error::Result;
use cruet::Inflector;
use minijinja::{Environment, UndefinedBehavior};

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Renders a template string with the given context.
    ///
    /// # Arguments
    /// * `template` - Template string to render
    /// * `context` - Context variables for rendering
    ///
    /// # Returns
    /// * `Result<String>` - Rendered template string
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String>;
}

/// MiniJinja-based template rendering engine.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a new renderer with the case-conversion filters registered.
    ///
    /// Undefined variables are errors and trailing newlines of rendered
    /// files are kept.
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_keep_trailing_newline(true);
        env.add_filter("snake_case", |value: String| value.to_snake_case());
        env.add_filter("kebab_case", |value: String| value.to_kebab_case());
        env.add_filter("pascal_case", |value: String| value.to_pascal_case());
        env.add_filter("camel_case", |value: String| value.to_camel_case());
        env.add_filter("title_case", |value: String| value.to_title_case());
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        MiniJinjaRenderer::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    /// Renders a template string using MiniJinja.
    ///
    /// # Errors
    /// * `Error::MinijinjaError` if the template fails to parse or render
    fn render(&self, template: &str, context: &serde_json::Value) -> Result<String> {
        Ok(self.env.render_str(template, context)?)
    }
}

