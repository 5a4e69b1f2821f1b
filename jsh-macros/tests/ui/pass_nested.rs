use jsh_core::model::Patch;
use jsh_core::Resource;
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Resource, Deserialize, Default)]
#[serde(default)]
struct Address {
    #[jsh("create,update")]
    street: String,
}

#[derive(Resource, Deserialize, Default)]
#[serde(default)]
struct Meta {
    #[jsh("create")]
    source: Option<String>,
}

#[derive(Resource, Deserialize, Default)]
#[serde(default)]
struct Person {
    #[serde(rename = "fullName")]
    #[jsh("create/required")]
    name: String,
    #[jsh("create")]
    addresses: Vec<Address>,
    #[jsh("create")]
    labels: BTreeMap<String, Address>,
    #[serde(flatten)]
    meta: Meta,
    #[jsh("create")]
    r#type: String,
}

#[derive(Resource, Deserialize, Default)]
#[serde(default)]
struct Page<T> {
    #[jsh("create")]
    items: Vec<T>,
}

fn main() {
    let mut a = Person { name: "a".into(), ..Person::default() };
    let mut b = Person::default();
    b.take_field(&mut a, 0);
    assert_eq!(b.name, "a");

    let mut page: Page<Address> = Page { items: vec![Address::default()] };
    let errors = jsh_core::validate(&mut page, jsh_core::Action::Create, br#"{"items":[{}]}"#, &Default::default());
    assert!(errors.is_ok());
}
