use anyhow::Result;
use jsh_core::FieldTag;

/// Decode `raw` and render it as pretty JSON
pub fn run(raw: &str) -> Result<String> {
    let tag = FieldTag::parse(raw);
    if tag.is_empty() {
        log::warn!("Tag '{}' has no valid directives", raw);
    }
    Ok(serde_json::to_string_pretty(&tag)?)
}
