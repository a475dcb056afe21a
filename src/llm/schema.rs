//! Declared output shapes for structured completions.
//!
//! A text-completion backend only returns text. An [`OutputSchema`] describes
//! the JSON object we expect back, renders the instructions that ask the model
//! for it, and checks the payload once it arrives.

use crate::utils::error::GuidelinesError;
use serde_json::{Map, Value};

/// A single string field of an output object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchemaField {
    pub name: &'static str,
    pub description: &'static str,
}

/// An object shape made of required string fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSchema {
    pub name: &'static str,
    pub fields: &'static [SchemaField],
}

impl OutputSchema {
    /// JSON Schema document for this shape.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|field| {
                (
                    field.name.to_string(),
                    serde_json::json!({
                        "type": "string",
                        "description": field.description,
                    }),
                )
            })
            .collect();
        let required: Vec<&str> = self.fields.iter().map(|f| f.name).collect();

        serde_json::json!({
            "title": self.name,
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Instructions appended to a rendered prompt so the model answers with
    /// a JSON object of this shape.
    pub fn instructions(&self) -> String {
        let schema = serde_json::to_string_pretty(&self.to_json_schema())
            .unwrap_or_else(|_| String::from("{}"));
        format!(
            "Output should be in JSON format and conform to the following schema:\n\n```\n{}\n```\n\nRespond with the JSON object only.",
            schema
        )
    }

    /// Parse `content` and check it against this shape.
    ///
    /// Extra keys are ignored. Every declared field must be present and be
    /// a string. The first candidate that validates wins; when none does,
    /// the first validation failure is reported.
    pub fn parse(&self, content: &str) -> Result<Value, GuidelinesError> {
        let mut first_error = None;
        for candidate in json_candidates(content) {
            match self.validate(&candidate) {
                Ok(()) => return Ok(candidate),
                Err(err) => {
                    first_error.get_or_insert(err);
                }
            }
        }
        Err(first_error.unwrap_or_else(|| {
            GuidelinesError::schema(format!("no JSON object found for {}", self.name))
        }))
    }

    pub fn validate(&self, value: &Value) -> Result<(), GuidelinesError> {
        let Some(object) = value.as_object() else {
            return Err(GuidelinesError::schema(format!(
                "expected an object for {}, got {}",
                self.name,
                json_type_name(value)
            )));
        };

        for field in self.fields {
            match object.get(field.name) {
                Some(Value::String(_)) => {}
                Some(other) => {
                    return Err(GuidelinesError::schema(format!(
                        "field `{}` must be a string, got {}",
                        field.name,
                        json_type_name(other)
                    )));
                }
                None => {
                    return Err(GuidelinesError::schema(format!(
                        "missing field `{}`",
                        field.name
                    )));
                }
            }
        }
        Ok(())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// JSON values a model response might carry, most likely first.
///
/// Models often wrap JSON in a Markdown code fence or add a sentence around
/// it, and that sentence can contain braces of its own. Candidates are the
/// whole trimmed reply, then the body of the first code fence, then a value
/// parsed at each `{` in turn.
pub fn json_candidates(content: &str) -> impl Iterator<Item = Value> + '_ {
    let whole = serde_json::from_str::<Value>(content.trim()).ok();
    let fenced =
        fenced_block(content).and_then(|body| serde_json::from_str::<Value>(body.trim()).ok());
    let embedded = content.match_indices('{').filter_map(move |(start, _)| {
        let rest = content.get(start..)?;
        serde_json::Deserializer::from_str(rest)
            .into_iter::<Value>()
            .next()?
            .ok()
    });

    whole.into_iter().chain(fenced).chain(embedded)
}

/// Body of the first ```` ``` ```` fence, without its language tag.
fn fenced_block(content: &str) -> Option<&str> {
    let open = content.find("```")?;
    let after = content.get(open + 3..)?;
    let body = after.get(after.find('\n')? + 1..)?;
    let close = body.find("```")?;
    body.get(..close)
}
