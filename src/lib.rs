//! finscore creates new projects from its bundled project template.
//! Template variables can be overridden with a JSON object; everything
//! else comes from the defaults the template declares.

/// Command-line interface definitions
pub mod cli;

/// Execution of the `new` subcommand
pub mod command;

/// Template manifest loading and variable resolution
/// Supports JSON and YAML formats (template.json, template.yml, template.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Parsing of the `--extra-context` value
pub mod context;

/// Error types and handling
pub mod error;

/// Project generation from a template directory
pub mod generator;

/// File and directory ignore patterns
/// Processes .scaffoldignore files to exclude specific paths
pub mod ignore;

/// Logger setup
pub mod logger;

/// Per-entry template processing
pub mod processor;

/// String rendering with MiniJinja
pub mod renderer;

/// Location of the bundled template
pub mod template;
