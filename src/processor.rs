//! Per-entry template processing.
//! Decides, for each file or directory of a template, where it lands in
//! the output and whether its contents are rendered or copied.

use globset::GlobSet;
use log::debug;
use std::path::{Component, Path, PathBuf};

use crate::constants::TEMPLATE_SUFFIX;
use crate::error::{Error, Result};
use crate::renderer::TemplateRenderer;

/// What to do with a single template entry.
#[derive(Debug, PartialEq, Eq)]
pub enum FileOperation {
    CreateDir { target: PathBuf },
    Copy { target: PathBuf },
    Write { target: PathBuf, content: String },
}

impl FileOperation {
    pub fn target(&self) -> &Path {
        match self {
            FileOperation::CreateDir { target }
            | FileOperation::Copy { target }
            | FileOperation::Write { target, .. } => target,
        }
    }
}

/// Returns true for file names like `README.md.j2`.
pub fn is_jinja_template(filename: &str) -> bool {
    let parts: Vec<&str> = filename.split('.').collect();
    parts.len() > 2 && parts.last() == Some(&TEMPLATE_SUFFIX.trim_start_matches('.'))
}

/// Joins `rendered_path` onto `target_dir`, dropping the template suffix.
///
/// Returns the target path and whether the entry's contents must be rendered.
pub fn resolve_target_path<P: AsRef<Path>>(rendered_path: &str, target_dir: P) -> (PathBuf, bool) {
    let target_dir = target_dir.as_ref();
    let rendered = Path::new(rendered_path);

    match rendered.file_name().and_then(|n| n.to_str()) {
        Some(filename) if is_jinja_template(filename) => {
            let new_name = filename.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(filename);
            (target_dir.join(rendered.with_file_name(new_name)), true)
        }
        _ => (target_dir.join(rendered), false),
    }
}

/// Returns true when the last segment of `rendered_path` rendered to nothing,
/// e.g. `demo/` for `{{ name }}/{% if flag %}optional.txt{% endif %}`.
pub fn is_rendered_name_empty(rendered_path: &str) -> bool {
    rendered_path.rsplit('/').next().unwrap_or_default().trim().is_empty()
}

/// A rendered path is valid when it is relative, has no empty segments and
/// does not climb out of the output directory.
pub fn is_rendered_path_valid(rendered_path: &str) -> bool {
    if rendered_path.trim().is_empty() || rendered_path.contains("//") {
        return false;
    }
    Path::new(rendered_path).components().all(|c| matches!(c, Component::Normal(_)))
}

/// Turns template entries into file operations.
pub struct Processor<'a> {
    engine: &'a dyn TemplateRenderer,
    template_root: &'a Path,
    output_root: &'a Path,
    answers: &'a serde_json::Value,
    ignored_patterns: &'a GlobSet,
}

impl<'a> Processor<'a> {
    pub fn new(
        engine: &'a dyn TemplateRenderer,
        template_root: &'a Path,
        output_root: &'a Path,
        answers: &'a serde_json::Value,
        ignored_patterns: &'a GlobSet,
    ) -> Self {
        Self { engine, template_root, output_root, answers, ignored_patterns }
    }

    /// Renders a path relative to the template root.
    pub fn render_path(&self, relative_path: &str) -> Result<String> {
        self.engine.render(relative_path, self.answers)
    }

    /// Processes one template entry.
    ///
    /// # Returns
    /// * `Ok(None)` when the entry is ignored or its name renders to nothing
    /// * `Ok(Some(operation))` otherwise
    pub fn process<P: AsRef<Path>>(&self, template_entry: P) -> Result<Option<FileOperation>> {
        let template_entry = template_entry.as_ref();
        let relative_path = template_entry
            .strip_prefix(self.template_root)
            .map_err(|e| Error::TemplateError(e.to_string()))?;
        let relative_path = relative_path.to_str().ok_or_else(|| {
            Error::TemplateError(format!("non UTF-8 path: {}", template_entry.display()))
        })?;

        if relative_path.is_empty() {
            return Ok(None);
        }

        if self.ignored_patterns.is_match(relative_path) {
            debug!("Skipping '{relative_path}': matched ignore pattern");
            return Ok(None);
        }

        let rendered_path = self.render_path(relative_path)?;
        if is_rendered_name_empty(&rendered_path) {
            debug!("Skipping '{relative_path}': rendered name is empty");
            return Ok(None);
        }
        if !is_rendered_path_valid(&rendered_path) {
            return Err(Error::TemplateError(format!(
                "'{relative_path}' rendered to an invalid path '{rendered_path}'"
            )));
        }

        let (target, should_render) = resolve_target_path(&rendered_path, self.output_root);
        debug!("Processing '{relative_path}' -> '{}'", target.display());

        let operation = if template_entry.is_dir() {
            FileOperation::CreateDir { target }
        } else if should_render {
            let content = std::fs::read_to_string(template_entry)?;
            let content = self.engine.render(&content, self.answers)?;
            FileOperation::Write { target, content }
        } else {
            FileOperation::Copy { target }
        };

        Ok(Some(operation))
    }
}

