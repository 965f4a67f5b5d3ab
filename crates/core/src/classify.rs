//! Ticket classification helpers.
//!
//! Builds the prompt sent to the language model and turns its free-form
//! reply into a [`Classification`]. Everything here is pure; the network
//! call lives in `helpdesk-llm` and the orchestration in the API crate.

use serde_json::{Map, Value};

use crate::ticket::{VALID_CATEGORIES, VALID_PRIORITIES};

/// Outcome of classifying a ticket description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// The model answered. Either field may be absent if the model omitted it.
    Suggested {
        category: Option<String>,
        priority: Option<String>,
    },
    /// The model could not be reached or its answer could not be parsed.
    Unavailable { reason: String },
}

impl Classification {
    /// Interpret raw model output.
    ///
    /// Finds the first JSON object in `text` and reads its `category` and
    /// `priority` string fields. Missing or non-string fields become `None`.
    pub fn from_model_output(text: &str) -> Self {
        match extract_json_object(text) {
            Some(object) => Self::Suggested {
                category: string_field(&object, "category"),
                priority: string_field(&object, "priority"),
            },
            None => Self::Unavailable {
                reason: "model response contained no JSON object".to_string(),
            },
        }
    }

    /// Split into `(category, priority)`, mapping `Unavailable` to nulls.
    pub fn into_suggestion(self) -> (Option<String>, Option<String>) {
        match self {
            Self::Suggested { category, priority } => (category, priority),
            Self::Unavailable { .. } => (None, None),
        }
    }
}

fn string_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Build the classification prompt for a ticket description.
///
/// The description is embedded verbatim.
pub fn build_prompt(description: &str) -> String {
    format!(
        "You are a support ticket triage assistant.\n\
         Classify the support ticket below.\n\
         \n\
         Return ONLY valid JSON in exactly this format:\n\
         {{\"category\": \"<category>\", \"priority\": \"<priority>\"}}\n\
         \n\
         category must be one of: {categories}\n\
         priority must be one of: {priorities}\n\
         \n\
         Ticket description:\n\
         {description}",
        categories = VALID_CATEGORIES.join(", "),
        priorities = VALID_PRIORITIES.join(", "),
    )
}

/// Extract the first balanced top-level JSON object from `text`.
///
/// Surrounding prose and markdown fences are ignored. Braces inside string
/// literals do not affect nesting. Each balanced `{...}` span is tried in
/// turn until one parses strictly as an object; `None` if none does.
pub fn extract_json_object(text: &str) -> Option<Map<String, Value>> {
    let mut search_from = 0;
    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;
        let end = match balanced_object_end(&text[start..]) {
            Some(len) => start + len,
            None => return None,
        };
        if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(&text[start..end]) {
            return Some(object);
        }
        search_from = start + 1;
    }
    None
}

/// Byte length of the balanced object starting at `s[0] == '{'`.
fn balanced_object_end(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + c.len_utf8());
                }
            }
            _ => {}
        }
    }
    None
}
