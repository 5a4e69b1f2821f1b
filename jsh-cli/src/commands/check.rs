use anyhow::{bail, Context, Result};
use jsh_core::config::JshConfig;
use jsh_core::logging::init_logging;
use jsh_core::model::{Bindable, Patch};
use jsh_core::{Action, ErrorObject, Object, ProcessError};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::models::{Article, User};

/// Top-level request document
#[derive(Debug, Deserialize)]
struct Document {
    data: Object,
}

/// Outcome of checking a document
#[derive(Debug)]
pub enum Report {
    Matched(Vec<String>),
    Rejected(Vec<ErrorObject>),
}

impl Report {
    /// Print the report, returning whether the document was accepted
    pub fn print(self) -> bool {
        match self {
            Report::Matched(paths) => {
                for path in &paths {
                    println!("{}", path);
                }
                true
            }
            Report::Rejected(errors) => {
                match serde_json::to_string_pretty(&serde_json::json!({ "errors": errors })) {
                    Ok(json) => println!("{}", json),
                    Err(e) => eprintln!("Error: failed to render errors: {}", e),
                }
                false
            }
        }
    }
}

/// Check the document at `document` for `action`
pub fn run(action: Action, config_path: Option<&Path>, document: &Path) -> Result<Report> {
    let config = match config_path {
        Some(path) => JshConfig::load_from(path)?,
        None => JshConfig::load()?,
    };
    init_logging(&config.logging.to_logging_config()?)?;

    let body = fs::read(document).with_context(|| format!("Failed to read {}", document.display()))?;
    check(action, &config, &body)
}

pub fn check(action: Action, config: &JshConfig, body: &[u8]) -> Result<Report> {
    let document: Document = serde_json::from_slice(body).context("Failed to parse JSON:API document")?;
    let object = document.data;

    let outcome = match object.resource_type.as_str() {
        "users" => process::<User>(&object, action),
        "articles" => process::<Article>(&object, action),
        other => bail!("No sample model for resource type '{}' (expected users or articles)", other),
    };

    Ok(match outcome {
        Ok(matched) => Report::Matched(matched),
        Err(err) => {
            log::debug!("Document rejected: {}", err);
            Report::Rejected(err.to_error_objects(&config.errors))
        }
    })
}

fn process<T>(object: &Object, action: Action) -> Result<Vec<String>, ProcessError>
where
    T: Bindable + Patch + DeserializeOwned + Default,
{
    let mut model = T::default();
    match action {
        Action::Create => object.process_create(&object.resource_type, &mut model),
        Action::Update => object.process_update(&object.resource_type, &mut model),
    }
}
