use std::fs;
use std::path::{Path, PathBuf};

use finscore_cli::context::{parse_extra_context, ContextMap};
use finscore_cli::error::Error;
use finscore_cli::generator::{find_project_dir, Generator, TemplateGenerator};
use finscore_cli::renderer::MiniJinjaRenderer;
use finscore_cli::template::TemplateRoot;
use tempfile::TempDir;
use test_log::test;

fn bundled_template() -> PathBuf {
    TemplateRoot::locate().unwrap().path().to_path_buf()
}

fn generate(output_dir: &Path, context: &str) -> finscore_cli::error::Result<PathBuf> {
    let context = parse_extra_context(context).unwrap();
    TemplateGenerator::new().generate(&bundled_template(), output_dir, &context)
}

#[test]
fn test_default_context_matches_fixture() {
    let output = TempDir::new().unwrap();

    let project = generate(output.path(), "{}").unwrap();

    assert_eq!(project, output.path().join("my_new_project"));
    let entries: Vec<_> = fs::read_dir(output.path()).unwrap().collect();
    assert_eq!(entries.len(), 1);
    assert!(!dir_diff::is_different(&project, "tests/fixtures/default_project/my_new_project")
        .unwrap());
}

#[test]
fn test_custom_context() {
    let output = TempDir::new().unwrap();
    let context = r#"{"project_name": "Test Project", "author_name": "Test Author", "version": "2.0.0"}"#;

    let project = generate(output.path(), context).unwrap();

    assert_eq!(project, output.path().join("test_project"));
    let readme = fs::read_to_string(project.join("README.md")).unwrap();
    assert!(readme.contains("Test Project"));
    assert!(readme.contains("Test Author"));
    assert!(readme.contains("2.0.0"));

    let package: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(project.join("package.json")).unwrap()).unwrap();
    assert_eq!(package["name"], "test-project");
    assert_eq!(package["version"], "2.0.0");
}

#[test]
fn test_explicit_slug_wins() {
    let output = TempDir::new().unwrap();

    let project = generate(output.path(), r#"{"project_slug": "custom"}"#).unwrap();

    assert_eq!(project, output.path().join("custom"));
}

#[test]
fn test_output_dir_is_created() {
    let output = TempDir::new().unwrap();
    let nested = output.path().join("a/b");

    let project = generate(&nested, "{}").unwrap();

    assert!(project.join("README.md").is_file());
}

#[test]
fn test_second_run_fails_without_touching_files() {
    let output = TempDir::new().unwrap();
    let project = generate(output.path(), "{}").unwrap();
    fs::write(project.join("README.md"), "edited").unwrap();

    let err = generate(output.path(), "{}").unwrap_err();

    assert!(matches!(err, Error::OutputDirectoryExistsError { .. }));
    assert_eq!(fs::read_to_string(project.join("README.md")).unwrap(), "edited");
}

#[test]
fn test_missing_template_root() {
    let output = TempDir::new().unwrap();
    let err = TemplateGenerator::new()
        .generate(Path::new("/no/such/template"), output.path(), &ContextMap::new())
        .unwrap_err();

    assert!(matches!(err, Error::TemplateDoesNotExistError { .. }));
}

#[test]
fn test_required_variable_without_default() {
    let template = TempDir::new().unwrap();
    fs::write(template.path().join("template.json"), r#"{"name": {}}"#).unwrap();
    fs::create_dir(template.path().join("{{ name }}")).unwrap();
    let output = TempDir::new().unwrap();

    let err = TemplateGenerator::new()
        .generate(template.path(), output.path(), &ContextMap::new())
        .unwrap_err();

    assert!(matches!(err, Error::MissingVariable { ref name } if name == "name"));
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 0);
}

#[test]
fn test_yaml_manifest_and_ignore_file() {
    let template = TempDir::new().unwrap();
    fs::write(template.path().join("template.yaml"), "name:\n  default: demo\n").unwrap();
    fs::write(template.path().join(".scaffoldignore"), "**/*.log\n").unwrap();
    let project_dir = template.path().join("{{ name }}");
    fs::create_dir(&project_dir).unwrap();
    fs::write(project_dir.join("notes.txt.j2"), "{{ name }}").unwrap();
    fs::write(project_dir.join("debug.log"), "noise").unwrap();
    let output = TempDir::new().unwrap();

    let project = TemplateGenerator::with_renderer(MiniJinjaRenderer::new())
        .generate(template.path(), output.path(), &ContextMap::new())
        .unwrap();

    assert_eq!(fs::read_to_string(project.join("notes.txt")).unwrap(), "demo");
    assert!(!project.join("debug.log").exists());
}

#[test]
fn test_find_project_dir() {
    let template = TempDir::new().unwrap();
    assert!(find_project_dir(template.path()).is_err());

    fs::create_dir(template.path().join("static")).unwrap();
    fs::create_dir(template.path().join("{{ slug }}")).unwrap();
    assert_eq!(find_project_dir(template.path()).unwrap(), template.path().join("{{ slug }}"));

    fs::create_dir(template.path().join("{{ other }}")).unwrap();
    assert!(find_project_dir(template.path()).is_err());
}

#[test]
fn test_conditional_file_is_skipped() {
    let template = TempDir::new().unwrap();
    fs::write(template.path().join("template.yaml"), "name:\n  default: demo\nflag:\n  default: false\n")
        .unwrap();
    let project_dir = template.path().join("{{ name }}");
    fs::create_dir(&project_dir).unwrap();
    fs::write(project_dir.join("{% if flag %}optional.txt{% endif %}"), "x").unwrap();
    fs::write(project_dir.join("always.txt"), "y").unwrap();
    let output = TempDir::new().unwrap();

    let project = TemplateGenerator::new()
        .generate(template.path(), output.path(), &ContextMap::new())
        .unwrap();

    let names: Vec<_> =
        fs::read_dir(&project).unwrap().map(|e| e.unwrap().file_name()).collect();
    assert_eq!(names, ["always.txt"]);

    let output = TempDir::new().unwrap();
    let project = TemplateGenerator::new()
        .generate(template.path(), output.path(), &parse_extra_context(r#"{"flag": true}"#).unwrap())
        .unwrap();
    assert!(project.join("optional.txt").is_file());
}

#[test]
fn test_conditional_directory_drops_its_contents() {
    let template = TempDir::new().unwrap();
    fs::write(template.path().join("template.json"), r#"{"name": {"default": "demo"}, "docs": {"default": false}}"#)
        .unwrap();
    let docs_dir = template.path().join("{{ name }}/{% if docs %}docs{% endif %}");
    fs::create_dir_all(&docs_dir).unwrap();
    fs::write(docs_dir.join("index.md"), "docs").unwrap();
    let output = TempDir::new().unwrap();

    let project = TemplateGenerator::new()
        .generate(template.path(), output.path(), &ContextMap::new())
        .unwrap();

    assert_eq!(fs::read_dir(&project).unwrap().count(), 0);
}

#[test]
fn test_ignored_directory_drops_its_contents() {
    let template = TempDir::new().unwrap();
    fs::write(template.path().join("template.yaml"), "name:\n  default: demo\n").unwrap();
    fs::write(template.path().join(".scaffoldignore"), "**/node_modules\n").unwrap();
    let project_dir = template.path().join("{{ name }}");
    fs::create_dir_all(project_dir.join("node_modules/pkg")).unwrap();
    fs::write(project_dir.join("node_modules/pkg/index.js"), "module.exports = 1;").unwrap();
    fs::write(project_dir.join("index.js"), "require('pkg');").unwrap();
    let output = TempDir::new().unwrap();

    let project = TemplateGenerator::new()
        .generate(template.path(), output.path(), &ContextMap::new())
        .unwrap();

    assert!(project.join("index.js").is_file());
    assert!(!project.join("node_modules").exists());
}

#[test]
fn test_package_json_stays_valid_with_quotes() {
    let output = TempDir::new().unwrap();

    let project = generate(output.path(), r#"{"description": "say \"hi\"", "author_name": "A \\ B"}"#)
        .unwrap();

    let package: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(project.join("package.json")).unwrap()).unwrap();
    assert_eq!(package["description"], r#"say "hi""#);
    assert_eq!(package["author"], r"A \ B");
}
