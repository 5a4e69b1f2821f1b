//! Sample resources used by `jsh check`

use jsh_core::{IdObject, Resource};
use serde::Deserialize;
use std::collections::HashMap;

#[derive(Debug, Default, Deserialize, Resource)]
#[serde(default)]
pub struct User {
    #[serde(skip)]
    #[jsh("one,create,update")]
    pub group: Option<IdObject>,
    #[jsh("create/required,update")]
    pub username: String,
    #[jsh("create,update")]
    pub email: String,
    #[serde(rename = "displayName")]
    #[jsh("create,update")]
    pub display_name: String,
    #[jsh("create/required")]
    pub password: String,
}

#[derive(Debug, Default, Deserialize, Resource)]
#[serde(default)]
pub struct Section {
    #[jsh("create/required,update")]
    pub heading: String,
    #[jsh("create,update")]
    pub text: String,
}

#[derive(Debug, Default, Deserialize, Resource)]
#[serde(default)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[jsh("create/required,update")]
    pub title: String,
    #[jsh("create,update")]
    pub sections: Vec<Section>,
    #[jsh("create,update")]
    pub reading_minutes: u32,
    #[serde(skip)]
    #[jsh("one,create/required")]
    pub author: Option<IdObject>,
    #[serde(skip)]
    #[jsh("many,create,update")]
    pub tags: HashMap<String, IdObject>,
}
