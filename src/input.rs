//! Parsing of command-line argument lists.
//!
//! Raw values arrive as one JSON array, one entry per parameter: a string
//! for scalar and object slots, an array of strings for vector slots.
//! Numbers and booleans are accepted and converted to their text form, so
//! `[100, true, ["1", 2]]` works as well as `["100", "true", ["1", "2"]]`.

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;

use sui_call_types::{parse_normalized_type, NormalizedType, RawInput};

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn raw_input(index: usize, value: &Value) -> Result<RawInput> {
    if let Some(text) = scalar_text(value) {
        return Ok(RawInput::Single(text));
    }
    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                scalar_text(item).ok_or_else(|| {
                    anyhow!(
                        "argument {} element {}: nested values are not supported",
                        index,
                        i
                    )
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(RawInput::Many),
        other => bail!("argument {}: unsupported value {}", index, other),
    }
}

/// Parse a JSON array of raw arguments.
pub fn parse_raw_inputs(json: &str) -> Result<Vec<RawInput>> {
    let value: Value = serde_json::from_str(json).context("Arguments must be a JSON array")?;
    let items = value
        .as_array()
        .ok_or_else(|| anyhow!("Arguments must be a JSON array, got {}", value))?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| raw_input(i, item))
        .collect()
}

/// Parse Move type strings such as `u64` or `&0x2::coin::Coin<0x2::sui::SUI>`.
pub fn parse_types(types: &[String]) -> Result<Vec<NormalizedType>> {
    types
        .iter()
        .map(|t| parse_normalized_type(t).ok_or_else(|| anyhow!("Invalid Move type: {}", t)))
        .collect()
}

/// Parse `--type-arg` values, widening struct addresses to the full form
/// that on-chain signatures and object types use.
pub fn parse_type_arguments(types: &[String]) -> Result<Vec<NormalizedType>> {
    Ok(parse_types(types)?
        .iter()
        .map(NormalizedType::with_long_addresses)
        .collect())
}
