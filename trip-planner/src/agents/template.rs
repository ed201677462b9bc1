//! Instruction templates.
//!
//! `{key}` is replaced by the blackboard value for `key` and fails when the
//! key is absent. `{key?}` renders as empty text instead. Keys are
//! identifiers (`[A-Za-z_][A-Za-z0-9_]*`); any other text in braces is left alone.

use super::blackboard::Blackboard;
use super::error::PipelineError;
use regex::Regex;
use std::sync::OnceLock;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder_regex() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)(\?)?\}").expect("placeholder pattern is valid")
    })
}

/// A placeholder found in a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    pub key: String,
    pub optional: bool,
}

/// Placeholders in the order they appear
pub fn placeholders(template: &str) -> Vec<Placeholder> {
    placeholder_regex()
        .captures_iter(template)
        .map(|caps| Placeholder {
            key: caps[1].to_string(),
            optional: caps.get(2).is_some(),
        })
        .collect()
}

/// Substitute placeholders with the current blackboard contents
pub fn render(template: &str, blackboard: &Blackboard) -> Result<String, PipelineError> {
    let mut rendered = String::with_capacity(template.len());
    let mut last = 0;

    for caps in placeholder_regex().captures_iter(template) {
        let Some(whole) = caps.get(0) else { continue };
        let key = &caps[1];

        rendered.push_str(&template[last..whole.start()]);
        match blackboard.get(key) {
            Some(value) => rendered.push_str(value),
            None if caps.get(2).is_some() => {}
            None => {
                return Err(PipelineError::MissingKey {
                    key: key.to_string(),
                });
            }
        }
        last = whole.end();
    }

    rendered.push_str(&template[last..]);
    Ok(rendered)
}
