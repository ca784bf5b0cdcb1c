use fitsense_core::ParsedExercise;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum ParseError {
    #[error("LLM output is not valid JSON: {0}")]
    Malformed(String),
    #[error("LLM API error: {0}")]
    Upstream(String),
    #[error("unexpected LLM output format: {0}")]
    UnexpectedFormat(String),
    #[error("non-numeric value for exercise '{exercise}': {value}")]
    NonNumeric { exercise: String, value: String },
    #[error("LLM output contained no exercises")]
    Empty,
}

/// Parse `{"name": [sets, rep_min, rep_max], ...}` into exercise records.
///
/// Either every entry converts or the whole batch is rejected. Output
/// follows the key order of the object.
pub(crate) fn parse_workout(raw: &str) -> Result<Vec<ParsedExercise>, ParseError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| ParseError::Malformed(e.to_string()))?;

    let Value::Object(entries) = value else {
        return Err(ParseError::UnexpectedFormat(
            "top-level value is not an object".to_string(),
        ));
    };

    if let Some(error) = entries.get("error") {
        return Err(ParseError::Upstream(upstream_message(error)));
    }

    if entries.is_empty() {
        return Err(ParseError::Empty);
    }

    entries
        .iter()
        .map(|(name, value)| parse_entry(name, value))
        .collect()
}

fn upstream_message(error: &Value) -> String {
    match error {
        Value::Object(detail) => detail
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        Value::String(message) => Some(message.clone()),
        _ => None,
    }
    .unwrap_or_else(|| "Unknown LLM API error".to_string())
}

fn parse_entry(name: &str, value: &Value) -> Result<ParsedExercise, ParseError> {
    let quoted;
    let items = match value {
        Value::Array(items) => items,
        // models sometimes quote the list
        Value::String(text) => {
            quoted = serde_json::from_str::<Value>(text).ok();
            match &quoted {
                Some(Value::Array(items)) => items,
                _ => return Err(wrong_shape(name)),
            }
        }
        _ => return Err(wrong_shape(name)),
    };

    let [sets, rep_min, rep_max] = items.as_slice() else {
        return Err(wrong_shape(name));
    };

    Ok(ParsedExercise {
        exercise: name.to_string(),
        sets: to_integer(name, sets)?,
        rep_range: [to_integer(name, rep_min)?, to_integer(name, rep_max)?],
    })
}

fn wrong_shape(name: &str) -> ParseError {
    ParseError::UnexpectedFormat(format!(
        "expected [sets, rep_min, rep_max] for exercise '{name}'"
    ))
}

fn to_integer(name: &str, value: &Value) -> Result<i64, ParseError> {
    let converted = match value {
        Value::Number(number) if number.is_f64() => number
            .as_f64()
            .map(f64::trunc)
            .filter(|f| f.is_finite() && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            .map(|f| f as i64),
        // u64 values above i64::MAX fail here instead of saturating
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse::<i64>().ok(),
        _ => None,
    };

    converted.ok_or_else(|| ParseError::NonNumeric {
        exercise: name.to_string(),
        value: value.to_string(),
    })
}

/// Serialize parsed records for the `parsed_workout` column.
pub(crate) fn to_stored(exercises: &[ParsedExercise]) -> Result<String, serde_json::Error> {
    serde_json::to_string(exercises)
}

pub(crate) fn from_stored(stored: &str) -> Result<Vec<ParsedExercise>, serde_json::Error> {
    serde_json::from_str(stored)
}
