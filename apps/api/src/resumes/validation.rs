use std::collections::HashSet;

use crate::models::resume::ResumeDocument;
use crate::sections::key::BuiltinSection;

/// Stores the username trimmed, or not at all when blank.
pub fn normalize_username(doc: &mut ResumeDocument) {
    doc.personal_info.username = doc.username().map(str::to_string);
}

/// Checks a document submitted for saving. Returns one message per problem; empty means valid.
///
/// Layout and order are never checked here: reconciliation repairs them.
pub fn validate_document(doc: &ResumeDocument) -> Vec<String> {
    let mut problems = Vec::new();

    let mut seen = HashSet::new();
    for section in &doc.custom_sections {
        let id = section.id.as_str();
        if id.trim().is_empty() {
            problems.push("custom section id must not be empty".to_string());
        } else if BuiltinSection::parse(id).is_some() {
            problems.push(format!(
                "custom section id '{id}' collides with a built-in section"
            ));
        } else if !seen.insert(id) {
            problems.push(format!("custom section id '{id}' is used more than once"));
        }
    }

    if let Some(username) = doc.username() {
        if username.chars().any(|c| c.is_whitespace() || c == '/') {
            problems.push(format!(
                "username '{username}' must not contain whitespace or '/'"
            ));
        }
    }

    problems
}
