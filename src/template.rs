//! Location of the bundled project template.

use crate::constants::TEMPLATE_DIR;
use crate::error::{Error, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// The read-only template directory shipped with the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRoot(PathBuf);

impl TemplateRoot {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self(path.into())
    }

    /// Locates the bundled template relative to the running executable.
    ///
    /// Looked up, in order:
    /// 1. `<exe dir>/templates/project_template`
    /// 2. `<exe dir>/../share/finscore/templates/project_template`
    /// 3. the crate's own `templates/project_template` (development builds)
    ///
    /// The caller's working directory is never consulted.
    pub fn locate() -> Result<Self> {
        let mut candidates = Vec::new();
        if let Some(exe_dir) =
            std::env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf))
        {
            candidates.push(exe_dir.join(TEMPLATE_DIR));
            candidates.push(exe_dir.join("../share/finscore").join(TEMPLATE_DIR));
        }
        candidates.push(Path::new(env!("CARGO_MANIFEST_DIR")).join(TEMPLATE_DIR));

        Self::first_existing(&candidates)
    }

    /// Returns the first candidate that is a directory.
    pub fn first_existing(candidates: &[PathBuf]) -> Result<Self> {
        for candidate in candidates {
            if candidate.is_dir() {
                debug!("Using template root {}", candidate.display());
                return Ok(Self(candidate.clone()));
            }
            debug!("Template root candidate {} not found", candidate.display());
        }

        Err(Error::TemplateDoesNotExistError {
            template_dir: candidates
                .last()
                .map(|c| c.display().to_string())
                .unwrap_or_else(|| TEMPLATE_DIR.to_string()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for TemplateRoot {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}
