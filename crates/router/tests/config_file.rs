use intent_catalog::Catalog;
use intent_router::{MatchMethod, RouterConfig, RouterError, SharedRouter};
use tempfile::TempDir;

const CATALOG: &str = r#"
[[tools]]
name = "skeleton"
description = "Extract code structure showing classes and functions"
keywords = ["structure", "outline"]
parameters = ["file_path"]

[[tools]]
name = "deps"
description = "Show dependency graph"
keywords = ["imports", "dependencies"]
parameters = ["file_path"]

[tool_aliases]
structure = "skeleton"
"#;

const CONFIG: &str = r#"
[weights]
tfidf = 0.5
keyword = 0.3
description = 0.1
name = 0.1

[thresholds]
resolve = 0.9
suggest = 0.4
typo_correction = 0.9
"#;

#[test]
fn router_builds_from_files_on_disk() {
    let temp = TempDir::new().expect("tempdir");
    let catalog_path = temp.path().join("catalog.toml");
    let config_path = temp.path().join("router.toml");
    std::fs::write(&catalog_path, CATALOG).expect("write catalog");
    std::fs::write(&config_path, CONFIG).expect("write config");

    let catalog = Catalog::load(&catalog_path).expect("catalog");
    let config = RouterConfig::load(&config_path).expect("config");
    assert_eq!(config.weights.tfidf, 0.5);
    assert_eq!(config.thresholds.typo_correction, Some(0.9));

    let shared = SharedRouter::build(catalog, config).expect("router");
    assert_eq!(shared.resolve("structure").method, MatchMethod::Alias);
    assert_eq!(shared.resolve("skelton").method, MatchMethod::Typo);
    assert_eq!(shared.snapshot().config().thresholds.resolve, 0.9);
}

#[test]
fn missing_config_file_is_an_io_error() {
    let temp = TempDir::new().expect("tempdir");
    let err = RouterConfig::load(temp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, RouterError::Io(_)), "unexpected error: {err}");
}

#[test]
fn malformed_config_file_is_a_parse_error() {
    let temp = TempDir::new().expect("tempdir");
    let path = temp.path().join("router.toml");
    std::fs::write(&path, "[weights\ntfidf = ").expect("write config");

    let err = RouterConfig::load(&path).unwrap_err();
    assert!(matches!(err, RouterError::ConfigParse(_)), "unexpected error: {err}");
}
