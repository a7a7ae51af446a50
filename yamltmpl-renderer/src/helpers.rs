//! Built-in template helpers.
//!
//! Helpers are plain functions from one JSON value to another, collected in
//! a fixed table that is handed to [`TemplateEngine`](crate::TemplateEngine)
//! at construction. [`PureHelper`] adapts a table entry to Handlebars, so a
//! helper works both inline (`{{toSnake name}}`) and as a subexpression
//! (`{{toPascal (toSnake name)}}`).

use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError as HbsRenderError,
    RenderErrorReason, ScopedJson,
};
use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use serde_json::Value;

/// A stateless value transform callable from a template.
pub type HelperFn = fn(&Value) -> Result<Value, String>;

/// A helper function and the name templates call it by.
#[derive(Debug, Clone, Copy)]
pub struct NamedHelper {
    pub name: &'static str,
    pub func: HelperFn,
}

/// The helpers every engine gets by default.
pub const BUILTIN_HELPERS: &[NamedHelper] = &[
    NamedHelper { name: "increments", func: increments },
    NamedHelper { name: "toSnake", func: to_snake },
    NamedHelper { name: "toCamel", func: to_camel },
    NamedHelper { name: "toPascal", func: to_pascal },
    NamedHelper { name: "toLowerCaseFirst", func: to_lower_case_first },
];

// ---------------------------------------------------------------------------
// Helper functions
// ---------------------------------------------------------------------------

/// Parse the leading integer of `value` and add one.
///
/// Strings are read like `parseInt`: leading whitespace is skipped and parsing
/// stops at the first non-digit, so `"12px"` gives 13. Floats are truncated.
pub fn increments(value: &Value) -> Result<Value, String> {
    let n = match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i,
            None => n
                .as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc() as i64)
                .ok_or_else(|| format!("`{n}` is not an integer"))?,
        },
        Value::String(s) => {
            parse_leading_int(s).ok_or_else(|| format!("`{s}` is not an integer"))?
        }
        other => return Err(format!("`{other}` is not an integer")),
    };
    n.checked_add(1)
        .map(Value::from)
        .ok_or_else(|| format!("`{n}` + 1 overflows"))
}

pub fn to_snake(value: &Value) -> Result<Value, String> {
    text_of(value).map(|s| Value::String(s.to_snake_case()))
}

pub fn to_camel(value: &Value) -> Result<Value, String> {
    text_of(value).map(|s| Value::String(s.to_lower_camel_case()))
}

pub fn to_pascal(value: &Value) -> Result<Value, String> {
    text_of(value).map(|s| Value::String(s.to_upper_camel_case()))
}

/// Lowercase the first character only; the rest is left as-is.
pub fn to_lower_case_first(value: &Value) -> Result<Value, String> {
    let text = text_of(value)?;
    let mut chars = text.chars();
    let lowered: String = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    };
    Ok(Value::String(lowered))
}

/// String form of a scalar helper argument. Missing/null reads as empty.
fn text_of(value: &Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Null => Ok(String::new()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Array(_) | Value::Object(_) => {
            Err(format!("expected a string, got `{value}`"))
        }
    }
}

fn parse_leading_int(s: &str) -> Option<i64> {
    let trimmed = s.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

// ---------------------------------------------------------------------------
// Handlebars adapter
// ---------------------------------------------------------------------------

/// Exposes a [`NamedHelper`] to Handlebars as a value-returning helper.
pub struct PureHelper(pub NamedHelper);

impl HelperDef for PureHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, HbsRenderError> {
        let arg = match h.param(0) {
            Some(param) => param.value().clone(),
            None => Value::Null,
        };
        (self.0.func)(&arg)
            .map(ScopedJson::Derived)
            .map_err(|msg| RenderErrorReason::Other(format!("{}: {msg}", self.0.name)).into())
    }
}

/// Register every helper of `table` on `registry`.
pub fn register_helpers(registry: &mut Handlebars<'_>, table: &[NamedHelper]) {
    for helper in table {
        registry.register_helper(helper.name, Box::new(PureHelper(*helper)));
    }
}
