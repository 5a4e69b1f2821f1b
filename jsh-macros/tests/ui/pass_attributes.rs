use jsh_core::model::Bindable;
use jsh_core::{IdObject, Resource};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Resource, Deserialize, Default)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
struct Article {
    #[jsh("create/required,update")]
    title: String,
    #[jsh("create,update")]
    body_text: String,
    #[serde(skip)]
    #[jsh("one,create/required")]
    author: Option<IdObject>,
    #[serde(skip)]
    #[jsh("many,create,update")]
    tags: HashMap<String, IdObject>,
    #[serde(skip)]
    revision: u64,
}

fn main() {
    let mut article = Article::default();
    assert!(article.is_absent());
    assert_eq!(article.schema().fields().len(), 4);
    assert_eq!(article.schema().fields()[1].name(), "bodyText");
    assert!(article.field_mut(3).is_some());
    assert!(article.field_mut(4).is_none());
    assert_eq!(article.revision, 0);
}
