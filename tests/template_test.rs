use craft::error::Error;
use craft::store::MemoryStore;
use craft::template::TemplateComposer;

const BASE: &str = r#"{% block header %}package {{ package_name }}{% endblock %}
{% block body %}{% endblock %}"#;

const CHILD: &str = r#"{% extends "base.tmpl" %}
{% block body %}func Run() {}{% endblock %}"#;

fn store() -> MemoryStore {
    MemoryStore::new()
        .with("templates/base.tmpl", BASE)
        .with("templates/child.tmpl", CHILD)
        .with("templates/other.tmpl", "{% block body %}other{% endblock %}")
        .with("templates/macros.tmpl", "{% macro greet(n) %}hi {{ n }}{% endmacro %}")
        .with(
            "templates/uses_macros.tmpl",
            r#"{% import "macros.tmpl" as m %}{{ m.greet(project_name) }}"#,
        )
        .with("templates/broken.tmpl", "{% if %}")
        .with("templates/twice.tmpl", "{% block a %}{% endblock %}{% block a %}{% endblock %}")
}

#[test]
fn test_compose_layers_in_order() {
    let store = store();
    let composer = TemplateComposer::new(&store);

    let set = composer.compose("root.go", &["base.tmpl", "child.tmpl"]).unwrap();

    assert_eq!(set.name(), "root.go");
    assert_eq!(set.root(), "child.tmpl");
    assert_eq!(set.block_owner("body"), Some("child.tmpl"));
    assert_eq!(set.block_owner("header"), Some("base.tmpl"));
    assert_eq!(set.block_owner("missing"), None);
    assert_eq!(set.fragments().len(), 2);
}

#[test]
fn test_compose_is_order_sensitive() {
    let store = store();
    let composer = TemplateComposer::new(&store);

    match composer.compose("root.go", &["child.tmpl", "base.tmpl"]) {
        Err(Error::TemplateParseError { fragment, reason }) => {
            assert_eq!(fragment, "child.tmpl");
            assert!(reason.contains("base.tmpl"));
        }
        other => panic!("Expected TemplateParseError, got {:?}", other),
    }
}

#[test]
fn test_compose_rejects_unrelated_block_redeclaration() {
    let store = store();
    let composer = TemplateComposer::new(&store);

    match composer.compose("x", &["base.tmpl", "other.tmpl"]) {
        Err(Error::TemplateParseError { fragment, reason }) => {
            assert_eq!(fragment, "other.tmpl");
            assert!(reason.contains("body"));
        }
        other => panic!("Expected TemplateParseError, got {:?}", other),
    }
}

#[test]
fn test_compose_rejects_block_declared_twice_in_one_fragment() {
    let store = store();
    let composer = TemplateComposer::new(&store);

    assert!(matches!(
        composer.compose("x", &["twice.tmpl"]),
        Err(Error::TemplateParseError { .. })
    ));
}

#[test]
fn test_compose_rejects_duplicate_fragment() {
    let store = store();
    let composer = TemplateComposer::new(&store);

    assert!(matches!(
        composer.compose("x", &["base.tmpl", "base.tmpl"]),
        Err(Error::TemplateParseError { .. })
    ));
}

#[test]
fn test_compose_missing_fragment() {
    let store = store();
    let composer = TemplateComposer::new(&store);

    match composer.compose("x", &["base.tmpl", "nope.tmpl"]) {
        Err(Error::TemplateLoadError { fragment, .. }) => assert_eq!(fragment, "templates/nope.tmpl"),
        other => panic!("Expected TemplateLoadError, got {:?}", other),
    }
}

#[test]
fn test_compose_syntax_error() {
    let store = store();
    let composer = TemplateComposer::new(&store);

    match composer.compose("x", &["broken.tmpl"]) {
        Err(Error::TemplateParseError { fragment, .. }) => assert_eq!(fragment, "broken.tmpl"),
        other => panic!("Expected TemplateParseError, got {:?}", other),
    }
}

#[test]
fn test_compose_empty_set() {
    let store = store();
    let composer = TemplateComposer::new(&store);
    let fragments: [&str; 0] = [];

    match composer.compose("go.mod", &fragments) {
        Err(Error::EmptyTemplateSetError { name }) => assert_eq!(name, "go.mod"),
        other => panic!("Expected EmptyTemplateSetError, got {:?}", other),
    }
}

#[test]
fn test_compose_allows_imports_of_earlier_fragments() {
    let store = store();
    let composer = TemplateComposer::new(&store);

    assert!(composer.compose("x", &["macros.tmpl", "uses_macros.tmpl"]).is_ok());
    assert!(matches!(
        composer.compose("x", &["uses_macros.tmpl"]),
        Err(Error::TemplateParseError { .. })
    ));
}

#[test]
fn test_sets_do_not_share_fragments() {
    let store = store();
    let composer = TemplateComposer::new(&store);

    let first = composer.compose("a", &["base.tmpl", "child.tmpl"]).unwrap();
    let second = composer.compose("b", &["other.tmpl"]).unwrap();

    assert!(first.environment().get_template("other.tmpl").is_err());
    assert!(second.environment().get_template("child.tmpl").is_err());
}
