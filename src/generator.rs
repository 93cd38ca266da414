//! Project generation from a template directory.
//! This is the only place that writes to the filesystem.

use crate::config::{load_config, resolve_answers};
use crate::context::ContextMap;
use crate::error::{Error, Result};
use crate::ignore::parse_ignore_file;
use crate::processor::{FileOperation, Processor};
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Materializes a template into a new project directory.
pub trait Generator {
    /// Renders `template_root` under `output_dir` using `context`.
    ///
    /// Runs without any user interaction. Variables missing from `context`
    /// fall back to the template defaults.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - Path of the created project directory
    fn generate(
        &self,
        template_root: &Path,
        output_dir: &Path,
        context: &ContextMap,
    ) -> Result<PathBuf>;
}

/// [`Generator`] backed by a [`TemplateRenderer`].
pub struct TemplateGenerator<R: TemplateRenderer = MiniJinjaRenderer> {
    engine: R,
}

impl TemplateGenerator<MiniJinjaRenderer> {
    pub fn new() -> Self {
        Self { engine: MiniJinjaRenderer::new() }
    }
}

impl Default for TemplateGenerator<MiniJinjaRenderer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: TemplateRenderer> TemplateGenerator<R> {
    pub fn with_renderer(engine: R) -> Self {
        Self { engine }
    }
}

/// Finds the directory of the template that becomes the generated project.
///
/// It is the single top-level directory whose name is a template,
/// e.g. `{{ project_slug }}`.
pub fn find_project_dir<P: AsRef<Path>>(template_root: P) -> Result<PathBuf> {
    let template_root = template_root.as_ref();
    let mut found = Vec::new();
    for entry in fs::read_dir(template_root)? {
        let path = entry?.path();
        let is_templated = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name.contains("{{") && name.contains("}}"));
        if path.is_dir() && is_templated {
            found.push(path);
        }
    }

    match found.len() {
        1 => Ok(found.remove(0)),
        0 => Err(Error::TemplateError(format!(
            "no project directory found in '{}'",
            template_root.display()
        ))),
        _ => Err(Error::TemplateError(format!(
            "more than one project directory found in '{}'",
            template_root.display()
        ))),
    }
}

fn apply(operation: &FileOperation, source: &Path) -> Result<()> {
    match operation {
        FileOperation::CreateDir { target } => fs::create_dir_all(target)?,
        FileOperation::Copy { target } => {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(source, target)?;
        }
        FileOperation::Write { target, content } => {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(target, content)?;
        }
    }
    Ok(())
}

impl<R: TemplateRenderer> Generator for TemplateGenerator<R> {
    /// # Errors
    /// * `Error::TemplateDoesNotExistError` if `template_root` is missing
    /// * `Error::MissingVariable` if a required variable has no value
    /// * `Error::OutputDirectoryExistsError` if the project directory already exists
    /// * `Error::IoError` for filesystem failures; files written so far are left in place
    fn generate(
        &self,
        template_root: &Path,
        output_dir: &Path,
        context: &ContextMap,
    ) -> Result<PathBuf> {
        if !template_root.is_dir() {
            return Err(Error::TemplateDoesNotExistError {
                template_dir: template_root.display().to_string(),
            });
        }

        let config = load_config(template_root)?;
        let answers = resolve_answers(&self.engine, &config, context)?;
        let ignored_patterns = parse_ignore_file(template_root)?;
        let project_dir = find_project_dir(template_root)?;

        let processor =
            Processor::new(&self.engine, template_root, output_dir, &answers, &ignored_patterns);

        let project_name = project_dir
            .strip_prefix(template_root)
            .ok()
            .and_then(|p| p.to_str())
            .ok_or_else(|| Error::TemplateError("invalid project directory name".to_string()))?;
        let rendered_name = processor.render_path(project_name)?;
        if rendered_name.trim().is_empty() || rendered_name.contains(['/', '\\']) {
            return Err(Error::TemplateError(format!(
                "project directory '{project_name}' rendered to invalid name '{rendered_name}'"
            )));
        }

        let project_path = output_dir.join(&rendered_name);
        if project_path.exists() {
            return Err(Error::OutputDirectoryExistsError {
                output_dir: project_path.display().to_string(),
            });
        }

        info!("Generating project in {}", project_path.display());
        let mut walker = WalkDir::new(&project_dir).sort_by_file_name().into_iter();
        while let Some(dir_entry) = walker.next() {
            let entry = dir_entry.map_err(|e| Error::TemplateError(e.to_string()))?;
            match processor.process(entry.path())? {
                Some(operation) => {
                    apply(&operation, entry.path())?;
                    debug!("Created '{}'", operation.target().display());
                }
                // A skipped directory takes its whole subtree with it.
                None if entry.file_type().is_dir() => walker.skip_current_dir(),
                None => {}
            }
        }

        Ok(project_path)
    }
}
