//! Execution of the `new` subcommand.

use crate::cli::NewArgs;
use crate::context::parse_extra_context;
use crate::error::{Error, Result};
use crate::generator::Generator;
use crate::template::TemplateRoot;
use log::{debug, error};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

/// Result of a single invocation.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The project was created at the given path
    Created(PathBuf),
    /// The command stopped after reporting an error
    Aborted,
}

impl Outcome {
    /// Exit status of the process.
    ///
    /// Aborted commands exit with status 0 as well.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Created(_) | Outcome::Aborted => ExitCode::SUCCESS,
        }
    }
}

/// Creates a new project from the template returned by `locate_template`.
///
/// Every failure is reported on `out` and turned into [`Outcome::Aborted`];
/// nothing is returned as an error.
///
/// # Flow
/// 1. Parses `--extra-context`; an invalid value stops before any write
/// 2. Locates the template root
/// 3. Generates the project non-interactively
/// 4. Reports the result
pub fn run_new<W, F>(
    args: &NewArgs,
    locate_template: F,
    generator: &dyn Generator,
    out: &mut W,
) -> Outcome
where
    W: Write,
    F: FnOnce() -> Result<TemplateRoot>,
{
    let result = parse_extra_context(&args.extra_context).and_then(|context| {
        let template_root = locate_template()?;
        generator.generate(template_root.path(), &args.output_dir, &context)
    });

    match result {
        Ok(project_path) => {
            debug!("Project created at {}", project_path.display());
            report(
                out,
                &format!("Successfully created new project in {}", args.output_dir.display()),
            );
            Outcome::Created(project_path)
        }
        Err(e) if e.is_invalid_context() => {
            debug!("{e}");
            report(out, "Error: Invalid JSON string for --extra-context.");
            Outcome::Aborted
        }
        Err(e) => {
            report_error(out, &e);
            Outcome::Aborted
        }
    }
}

fn report_error<W: Write>(out: &mut W, err: &Error) {
    error!("{err}");
    report(out, &format!("An error occurred: {err}"));
}

fn report<W: Write>(out: &mut W, message: &str) {
    if let Err(e) = writeln!(out, "{message}") {
        error!("Failed to write output: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextMap;
    use std::cell::Cell;
    use std::path::Path;

    /// Records calls without touching the filesystem.
    struct RecordingGenerator {
        calls: Cell<usize>,
        fail: bool,
    }

    impl Generator for RecordingGenerator {
        fn generate(
            &self,
            _template_root: &Path,
            output_dir: &Path,
            _context: &ContextMap,
        ) -> Result<PathBuf> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                Err(Error::TemplateError("boom".to_string()))
            } else {
                Ok(output_dir.join("project"))
            }
        }
    }

    fn args(extra_context: &str) -> NewArgs {
        NewArgs { output_dir: PathBuf::from("out"), extra_context: extra_context.to_string() }
    }

    fn root() -> Result<TemplateRoot> {
        Ok(TemplateRoot::new("/template"))
    }

    #[test]
    fn test_invalid_context_skips_generation() {
        let generator = RecordingGenerator { calls: Cell::new(0), fail: false };
        let mut out = Vec::new();

        let located = Cell::new(false);
        let locate = || {
            located.set(true);
            root()
        };

        let outcome = run_new(&args("[1,2]"), locate, &generator, &mut out);

        assert_eq!(outcome, Outcome::Aborted);
        assert!(!located.get());
        assert_eq!(generator.calls.get(), 0);
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Invalid JSON string for --extra-context"));
    }

    #[test]
    fn test_success_message() {
        let generator = RecordingGenerator { calls: Cell::new(0), fail: false };
        let mut out = Vec::new();

        let outcome = run_new(&args("{}"), root, &generator, &mut out);

        assert_eq!(outcome, Outcome::Created(PathBuf::from("out/project")));
        assert_eq!(String::from_utf8(out).unwrap(), "Successfully created new project in out\n");
    }

    #[test]
    fn test_generator_failure_is_reported() {
        let generator = RecordingGenerator { calls: Cell::new(0), fail: true };
        let mut out = Vec::new();

        let outcome = run_new(&args("{}"), root, &generator, &mut out);

        assert_eq!(outcome, Outcome::Aborted);
        assert!(String::from_utf8(out).unwrap().starts_with("An error occurred: Template error: boom"));
    }

    #[test]
    fn test_missing_template_is_reported() {
        let generator = RecordingGenerator { calls: Cell::new(0), fail: false };
        let mut out = Vec::new();
        let missing = || {
            Err(Error::TemplateDoesNotExistError { template_dir: "/nowhere".to_string() })
        };

        let outcome = run_new(&args("{}"), missing, &generator, &mut out);

        assert_eq!(outcome, Outcome::Aborted);
        assert_eq!(generator.calls.get(), 0);
        assert!(String::from_utf8(out).unwrap().contains("/nowhere"));
    }
}
