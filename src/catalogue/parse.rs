// Parsing of the skill-list contract from JSON.
//
// Two shapes are accepted:
//   flat:         { "<lesson>": ["skill", ...], "university_name": "...", ... }
//   institutions: { "<institution>": { <flat map> }, ... }
// optionally wrapped in a `{"skills": {...}}` envelope. Anything else is a
// MalformedInput naming the key where parsing stopped. Nothing is coerced.

use serde_json::{Map, Value};

use super::models::{Catalogue, Institution, Lesson};
use crate::error::AnalysisError;

/// Metadata keys that never name a lesson.
pub const RESERVED_KEYS: [&str; 2] = ["university_name", "university_country"];

const ENVELOPE_KEY: &str = "skills";

pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Parse either contract shape, detecting which one was supplied.
pub fn parse_contract(value: &Value) -> Result<Catalogue, AnalysisError> {
    let map = expect_object(value, "<root>")?;

    if let Some(inner) = unwrap_envelope(map) {
        return parse_contract(inner);
    }

    let mut saw_lesson = false;
    let mut saw_institution = false;
    for (key, v) in map.iter().filter(|(k, _)| !is_reserved_key(k)) {
        match v {
            Value::Array(_) => saw_lesson = true,
            Value::Object(_) => saw_institution = true,
            other => {
                return Err(AnalysisError::malformed(
                    key,
                    format!(
                        "expected an array of skills or an institution object, found {}",
                        kind(other)
                    ),
                ))
            }
        }
        if saw_lesson && saw_institution {
            return Err(AnalysisError::malformed(
                key,
                "mixes lesson entries and institution entries at the same level",
            ));
        }
    }

    if saw_institution {
        parse_institution_map(value)
    } else {
        parse_lesson_map(value).map(Catalogue::single)
    }
}

/// Parse the flat lesson → skills contract for a single institution.
pub fn parse_lesson_map(value: &Value) -> Result<Institution, AnalysisError> {
    let map = expect_object(value, "<root>")?;

    let mut institution = Institution {
        name: metadata(map, "university_name")?,
        country: metadata(map, "university_country")?,
        lessons: Vec::with_capacity(map.len()),
    };

    for (key, v) in map.iter().filter(|(k, _)| !is_reserved_key(k)) {
        institution.lessons.push(parse_lesson(key, v)?);
    }

    Ok(institution)
}

/// Parse the institution-scoped contract: institution → flat lesson map.
///
/// The outer key names the institution; an inner `university_name` is
/// ignored in its favour so lookups by key always work.
pub fn parse_institution_map(value: &Value) -> Result<Catalogue, AnalysisError> {
    let map = expect_object(value, "<root>")?;
    let mut catalogue = Catalogue::default();

    for (key, v) in map.iter().filter(|(k, _)| !is_reserved_key(k)) {
        if !v.is_object() {
            return Err(AnalysisError::malformed(
                key,
                format!("expected an institution object, found {}", kind(v)),
            ));
        }
        let mut institution = parse_lesson_map(v).map_err(|e| match e {
            AnalysisError::MalformedInput { key: inner, reason } => AnalysisError::MalformedInput {
                key: format!("{key} / {inner}"),
                reason,
            },
            other => other,
        })?;
        institution.name = Some(key.clone());
        catalogue.institutions.push(institution);
    }

    Ok(catalogue)
}

fn parse_lesson(name: &str, value: &Value) -> Result<Lesson, AnalysisError> {
    let items = value.as_array().ok_or_else(|| {
        AnalysisError::malformed(
            name,
            format!("expected an array of skills, found {}", kind(value)),
        )
    })?;

    let skills = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                AnalysisError::malformed(
                    name,
                    format!("skill #{} is {}, expected a string", i + 1, kind(item)),
                )
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Lesson {
        name: name.to_string(),
        skills,
    })
}

fn metadata(map: &Map<String, Value>, key: &str) -> Result<Option<String>, AnalysisError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(AnalysisError::malformed(
            key,
            format!("expected a string, found {}", kind(other)),
        )),
    }
}

fn unwrap_envelope(map: &Map<String, Value>) -> Option<&Value> {
    if map.len() != 1 {
        return None;
    }
    map.get(ENVELOPE_KEY).filter(|v| v.is_object())
}

fn expect_object<'a>(value: &'a Value, key: &str) -> Result<&'a Map<String, Value>, AnalysisError> {
    value.as_object().ok_or_else(|| {
        AnalysisError::malformed(
            key,
            format!("expected a JSON object, found {}", kind(value)),
        )
    })
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
