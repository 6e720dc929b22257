//! `name=value` parameters given on the command line.

use crate::access::MapSource;
use crate::types::Value;

/// A named parameter from `-p name=value`.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub value: Value,
}

/// Parse `name=value`. The value goes through [`parse_value`].
pub fn parse_param(arg: &str) -> Result<Param, String> {
    let (name, raw) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected name=value, got '{}'", arg))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing parameter name in '{}'", arg));
    }
    Ok(Param {
        name: name.to_string(),
        value: parse_value(raw),
    })
}

/// Integers, floats, `true`/`false` and `null` are typed; anything else is text.
pub fn parse_value(raw: &str) -> Value {
    match raw {
        "null" => Value::Null,
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => {
            if let Ok(v) = raw.parse::<i32>() {
                Value::Int(v)
            } else if let Ok(v) = raw.parse::<i64>() {
                Value::BigInt(v)
            } else if let Some(v) = raw.parse::<f64>().ok().filter(|v| v.is_finite()) {
                Value::Double(v)
            } else {
                Value::Text(raw.to_string())
            }
        }
    }
}

/// Collect parameters into a bindable source. Later duplicates win.
pub fn to_source(params: &[Param]) -> MapSource {
    params.iter().fold(MapSource::new(), |source, param| {
        source.with(param.name.clone(), param.value.clone())
    })
}
