//! Field tag decoding
//!
//! A field tag is the string carried by `#[jsh("...")]`. It is a comma-separated list of
//! directives, each optionally suffixed with `/required`:
//!
//! ```text
//! #[jsh("one,create/required,update")]
//! ```
//!
//! `one` and `many` mark relationship fields, `create` and `update` grant the
//! matching action. Any other well-formed directive is kept but has no effect.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

const DIRECTIVE_SEP: char = ',';
const OPTION_SEP: char = '/';
const OPTION_REQUIRED: &str = "required";
const DIRECTIVE_ONE: &str = "one";
const DIRECTIVE_MANY: &str = "many";

/// Punctuation accepted inside a directive name besides letters and digits.
const DIRECTIVE_PUNCTUATION: &str = "!#$%&()*+-./:<=>?@[]^_{|}~ ";

/// Action a resource object is processed for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Update,
}

impl Action {
    /// Directive name granting this action
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            other => Err(format!("unknown action '{}', expected create or update", other)),
        }
    }
}

/// Options attached to a single directive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TagOptions {
    pub required: bool,
}

/// Relationship kind selected by the `one` / `many` directives
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    #[default]
    None,
    One,
    Many,
}

impl Relation {
    pub fn is_relationship(&self) -> bool {
        !matches!(self, Relation::None)
    }
}

/// Decoded `#[jsh]` tag of a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldTag {
    relation: Relation,
    directives: BTreeMap<String, TagOptions>,
}

impl FieldTag {
    /// Decode a raw tag string. Malformed directives are dropped silently.
    pub fn parse(raw: &str) -> Self {
        let mut directives = BTreeMap::new();
        for segment in raw.split(DIRECTIVE_SEP) {
            let parts: Vec<&str> = segment.split(OPTION_SEP).collect();
            let name = parts[0];
            if !is_valid_directive(name) {
                continue;
            }
            let required = parts.len() == 2 && parts[1] == OPTION_REQUIRED;
            directives.insert(name.to_string(), TagOptions { required });
        }

        let relation = if directives.contains_key(DIRECTIVE_MANY) {
            Relation::Many
        } else if directives.contains_key(DIRECTIVE_ONE) {
            Relation::One
        } else {
            Relation::None
        };

        Self { relation, directives }
    }

    pub fn relation(&self) -> Relation {
        self.relation
    }

    /// Options declared for `action`, `None` when the action is not granted
    pub fn options(&self, action: Action) -> Option<TagOptions> {
        self.directives.get(action.as_str()).copied()
    }

    pub fn is_required(&self, action: Action) -> bool {
        self.options(action).is_some_and(|options| options.required)
    }

    pub fn directive(&self, name: &str) -> Option<TagOptions> {
        self.directives.get(name).copied()
    }

    pub fn directives(&self) -> impl Iterator<Item = (&str, TagOptions)> {
        self.directives.iter().map(|(name, options)| (name.as_str(), *options))
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }
}

/// A directive name is non-empty and made of letters, digits and a fixed set of
/// punctuation. Backslash and quotes are reserved.
pub fn is_valid_directive(name: &str) -> bool {
    if name.is_empty() {
        return false;
    }
    name.chars()
        .all(|c| is_letter(c) || c.is_ascii_digit() || DIRECTIVE_PUNCTUATION.contains(c))
}

// Letter numbers such as roman numerals are alphabetic but not letters.
fn is_letter(c: char) -> bool {
    c.is_alphabetic() && !c.is_numeric()
}
