use conform::predicates::{is_int_gt, is_string};
use conform::{Value, compose, must_compile, schema, strict};
use serde_json::json;

fn value(json: serde_json::Value) -> Value {
    json.into()
}

fn pet() -> conform::Validator {
    must_compile(&schema!({
        "name" => is_string(),
        "legs" => is_int_gt(0),
    }))
}

fn dog() -> conform::Validator {
    must_compile(&schema!({ "barks" => true }))
}

#[test]
fn test_compose_merges_fields() {
    let validator = compose([pet(), dog()]);
    let results = validator.validate(&value(json!({"name": "rex", "legs": 4, "barks": true})));
    assert!(results.is_valid(), "{results}");
    assert_eq!(results.len(), 3);
}

#[test]
fn test_compose_single_is_equivalent() {
    let actual = value(json!({"name": "rex", "legs": 4}));
    assert_eq!(compose([pet()]).validate(&actual), pet().validate(&actual));
}

#[test]
fn test_compose_fails_when_any_part_fails() {
    let validator = compose([pet(), dog()]);
    let results = validator.validate(&value(json!({"name": "rex", "legs": 4, "barks": false})));
    assert!(!results.is_valid());
    assert_eq!(results.len(), 3);
    assert_eq!(results.errors().count(), 1);
}

#[test]
fn test_compose_keeps_failures_from_every_part() {
    let validator = compose([pet(), dog()]);
    let results = validator.validate(&value(json!({"name": 7, "legs": 4})));
    assert!(!results.is_valid());
    assert_eq!(results.len(), 3);
    let mut failing: Vec<String> = results.errors().map(|err| err.path.to_string()).collect();
    failing.sort();
    assert_eq!(failing, vec!["barks", "name"]);
    assert!(results.get("barks").unwrap()[0].is_key_missing());
}

#[test]
fn test_compose_overlapping_paths_keep_every_result() {
    let validator = compose([pet(), must_compile(&schema!({ "name" => "rex" }))]);
    let results = validator.validate(&value(json!({"name": "rex", "legs": 4})));
    assert!(results.is_valid());
    assert_eq!(results.get("name").unwrap().len(), 2);
}

#[test]
fn test_strict_composed_pets() {
    let validator = strict(compose([pet(), dog()]));
    assert!(
        validator
            .validate(&value(json!({"name": "rex", "legs": 4, "barks": true})))
            .is_valid()
    );

    let results = validator.validate(&value(
        json!({"name": "tom", "legs": 4, "barks": true, "meows": true}),
    ));
    assert!(!results.is_valid());
    assert!(results.get("meows").unwrap()[0].is_strict_failure());
}
