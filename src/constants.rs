//! Common constants used throughout finscore.

/// Supported template manifest file names, in lookup order
pub const CONFIG_FILES: [&str; 3] = ["template.json", "template.yml", "template.yaml"];

/// Ignore file name inside a template
pub const IGNORE_FILE: &str = ".scaffoldignore";

/// Patterns that are never copied into a generated project
pub const DEFAULT_IGNORE_PATTERNS: [&str; 5] =
    [IGNORE_FILE, CONFIG_FILES[0], CONFIG_FILES[1], CONFIG_FILES[2], "**/.DS_Store"];

/// Location of the bundled template, relative to the installation directory
pub const TEMPLATE_DIR: &str = "templates/project_template";

/// Suffix that marks a file whose contents are rendered
pub const TEMPLATE_SUFFIX: &str = ".j2";
