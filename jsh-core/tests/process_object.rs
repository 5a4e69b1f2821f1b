//! Document-level processing: type checks, unmarshalling, updates and idempotence

use jsh_core::config::ErrorsConfig;
use jsh_core::{apply_update, Action, ErrorKind, IdObject, Object, ProcessError, Relationships, Resource, Validator};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;

const TYPE: &str = "users";

#[derive(Resource, Deserialize, Default, Debug, Clone, PartialEq)]
#[serde(default)]
struct User {
    #[serde(skip)]
    #[jsh("one,create,update")]
    group: Option<IdObject>,
    #[jsh("create/required,update")]
    username: String,
    #[jsh("create,update")]
    email: String,
    #[jsh("create")]
    tags: Vec<String>,
    #[serde(skip)]
    version: u32,
}

fn request(attributes: serde_json::Value) -> Object {
    Object::new("1", TYPE).with_attributes(&attributes).unwrap()
}

#[test]
fn rejects_mismatched_type() {
    let mut user = User::default();
    let err = request(json!({"username": "bob"})).process_create("groups", &mut user).unwrap_err();
    assert!(matches!(err, ProcessError::Conflict { .. }));

    let errors = err.to_error_objects(&ErrorsConfig::default());
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].status, 409);
    assert!(user.username.is_empty());
}

#[test]
fn reports_undecodable_attributes() {
    let mut user = User::default();
    let err = request(json!({"username": 42})).process_create(TYPE, &mut user).unwrap_err();
    assert_eq!(err.status(), 400);

    let errors = err.to_error_objects(&ErrorsConfig::default());
    assert_eq!(errors[0].title.as_deref(), Some("For type 'users' unable to unmarshal"));
}

#[test]
fn unmarshal_into_fresh_model() {
    let user: User = request(json!({"username": "bob"})).unmarshal(TYPE).unwrap();
    assert_eq!(user.username, "bob");

    let empty: User = Object::new("1", TYPE).unmarshal(TYPE).unwrap();
    assert_eq!(empty, User::default());

    assert!(request(json!({})).unmarshal::<User>("badType").is_err());
}

#[test]
fn process_keeps_unsent_fields() {
    let mut user = User { email: "old@example.com".into(), version: 3, ..User::default() };
    let matched = request(json!({"username": "bob"})).process_create(TYPE, &mut user).unwrap();
    assert_eq!(matched, ["username", "email"]);
    assert_eq!(user.username, "bob");
    assert_eq!(user.email, "old@example.com");
    assert_eq!(user.version, 3);
}

#[test]
fn revalidation_is_idempotent() {
    let mut object = request(json!({"username": "bob", "tags": ["a", "b"]}));
    object.add_relationship_one("group", IdObject::new("groups", "admins"));

    let mut user = User::default();
    let first = object.process_create(TYPE, &mut user).unwrap();
    let second = object.process_create(TYPE, &mut user).unwrap();
    assert_eq!(first, ["group", "username", "tags", "tags/0", "tags/1"]);
    assert_eq!(first, second);
}

#[test]
fn update_moves_matched_fields() {
    let mut stored = User {
        group: Some(IdObject::new("groups", "old")),
        username: "bob".into(),
        email: "bob@example.com".into(),
        tags: vec!["keep".into()],
        version: 7,
    };

    let mut object = request(json!({"email": "robert@example.com"}));
    object.add_relationship_one("group", IdObject::new("groups", "new"));

    let mut patch = User::default();
    let matched = object.process_update(TYPE, &mut patch).unwrap();
    assert_eq!(matched, ["group", "email"]);

    let updated = apply_update(&mut stored, &mut patch, &matched);
    assert_eq!(updated, ["group", "email"]);
    assert_eq!(stored.email, "robert@example.com");
    assert_eq!(stored.group, Some(IdObject::new("groups", "new")));
    assert_eq!(stored.username, "bob");
    assert_eq!(stored.tags, ["keep"]);
    assert_eq!(stored.version, 7);
}

#[test]
fn update_covers_nested_paths_by_their_top_level_field() {
    #[derive(Resource, Deserialize, Default, Debug)]
    #[serde(default)]
    struct Address {
        #[jsh("update")]
        street: String,
        #[jsh("update")]
        city: String,
    }

    #[derive(Resource, Deserialize, Default, Debug)]
    #[serde(default)]
    struct Profile {
        #[jsh("update")]
        address: Address,
        #[jsh("update")]
        nickname: String,
    }

    let mut stored = Profile {
        address: Address { street: "Old Road".into(), city: "Paris".into() },
        nickname: "bob".into(),
    };
    let mut patch = Profile::default();
    let matched = request(json!({"address": {"street": "New Road"}})).process_update(TYPE, &mut patch).unwrap();
    assert_eq!(matched, ["address", "address/street"]);

    let updated = apply_update(&mut stored, &mut patch, &matched);
    assert_eq!(updated, ["address"]);
    assert_eq!(stored.address.street, "New Road");
    assert!(stored.address.city.is_empty());
    assert_eq!(stored.nickname, "bob");
}

#[test]
fn update_of_flattened_fields() {
    #[derive(Resource, Deserialize, Default, Debug)]
    #[serde(default)]
    struct Audit {
        #[jsh("update")]
        note: String,
    }

    #[derive(Resource, Deserialize, Default, Debug)]
    #[serde(default)]
    struct Record {
        #[jsh("update")]
        name: String,
        #[serde(flatten)]
        audit: Audit,
    }

    let mut stored = Record { name: "a".into(), audit: Audit { note: "old".into() } };
    let mut patch = Record::default();
    let matched = request(json!({"note": "new"})).process_update(TYPE, &mut patch).unwrap();
    assert_eq!(matched, ["note"]);

    let updated = apply_update(&mut stored, &mut patch, &matched);
    assert_eq!(updated, ["note"]);
    assert_eq!(stored.audit.note, "new");
    assert_eq!(stored.name, "a");
}

#[test]
fn non_string_map_keys_are_a_declaration_error() {
    #[derive(Resource, Deserialize, Default)]
    #[serde(default)]
    struct Model {
        #[jsh("create")]
        foo: HashMap<i32, i32>,
    }

    for attributes in [json!({"foo": {"1": 1, "2": 2}}), json!({"foo": {}}), json!({})] {
        let mut model = Model::default();
        let err = request(attributes).process_create(TYPE, &mut model).unwrap_err();
        let ProcessError::Validation(errors) = err else {
            panic!("expected validation errors, got {}", err);
        };
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Internal);
        assert_eq!(errors[0].path, "foo");
    }
}

#[test]
fn non_string_map_keys_behind_option_are_a_declaration_error() {
    #[derive(Resource, Deserialize, Default)]
    #[serde(default)]
    struct Model {
        #[jsh("update")]
        foo: Option<Box<HashMap<u8, String>>>,
    }

    let mut model = Model::default();
    let errors = Validator::new(Action::Update).validate(&mut model, b"{}", &Relationships::new()).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.has_internal());
}

#[test]
fn update_with_empty_list_clears_stored_list() {
    #[derive(Resource, Deserialize, Default, Debug)]
    #[serde(default)]
    struct Tagged {
        #[jsh("create,update")]
        tags: Vec<String>,
        #[jsh("create,update")]
        labels: HashMap<String, String>,
    }

    let mut stored = Tagged { tags: vec!["a".into()], labels: HashMap::from([("k".into(), "v".into())]) };
    let mut patch = Tagged::default();
    let matched = request(json!({"tags": [], "labels": {}})).process_update(TYPE, &mut patch).unwrap();
    assert_eq!(matched, ["tags", "labels"]);

    let updated = apply_update(&mut stored, &mut patch, &matched);
    assert_eq!(updated, ["tags", "labels"]);
    assert!(stored.tags.is_empty());
    assert!(stored.labels.is_empty());
}

#[test]
fn empty_list_satisfies_required() {
    #[derive(Resource, Deserialize, Default, Debug)]
    #[serde(default)]
    struct Tagged {
        #[jsh("create/required")]
        tags: Vec<String>,
    }

    let mut model = Tagged::default();
    let matched = request(json!({"tags": []})).process_create(TYPE, &mut model).unwrap();
    assert_eq!(matched, ["tags"]);

    let mut model = Tagged::default();
    let err = request(json!({})).process_create(TYPE, &mut model).unwrap_err();
    assert_eq!(err.status(), 422);
}

#[test]
fn rejects_non_struct_models() {
    let mut value = String::from("non-struct type");
    let errors = jsh_core::validate(&mut value, Action::Create, b"{}", &Relationships::new()).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.has_internal());

    let mut missing: Option<User> = None;
    let errors = jsh_core::validate(&mut missing, Action::Create, b"{}", &Relationships::new()).unwrap_err();
    assert_eq!(errors.len(), 1);

    let mut present = Some(User::default());
    let matched =
        jsh_core::validate(&mut present, Action::Create, br#"{"username":"bob"}"#, &Relationships::new());
    // username is required but still empty: the model was not decoded from the raw input
    assert_eq!(matched.unwrap_err()[0].kind, ErrorKind::MissingRequired);
}

#[test]
fn error_list_renders_every_error() {
    let mut user = User::default();
    let err = request(json!({"version": 2, "email": "x"})).process_create(TYPE, &mut user).unwrap_err();
    let ProcessError::Validation(errors) = &err else {
        panic!("expected validation errors, got {}", err);
    };
    assert_eq!(errors.len(), 2);
    let rendered = err.to_string();
    assert!(rendered.contains("Required attribute"));
    assert!(rendered.contains("Attribute does not exist"));
}
