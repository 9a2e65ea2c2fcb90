//! Typed attribute values and the read/write helpers behind every accessor.

use std::fmt;

use serde::Serialize;

use crate::base::{ReadContext, SedBase};
use crate::error::{SedIoError, SedOperationError};
use crate::errorlog::SedErrorCode;
use crate::syntax::is_valid_sid;
use crate::typecode::TypeCode;
use crate::xml::{XmlAttributes, XmlOutputStream};

/// Value of an attribute, used by the reflective accessors
/// (`get_attribute`, `set_attribute`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AttributeValue {
    String(String),
    Double(f64),
    Int(i32),
    Bool(bool),
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::String(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::String(value.to_string())
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Double(value)
    }
}

impl From<i32> for AttributeValue {
    fn from(value: i32) -> Self {
        AttributeValue::Int(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Bool(value)
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::String(value) => write!(f, "{value}"),
            AttributeValue::Double(value) => write!(f, "{}", format_double(*value)),
            AttributeValue::Int(value) => write!(f, "{value}"),
            AttributeValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

pub(crate) fn as_string(value: &AttributeValue) -> Result<&str, SedOperationError> {
    match value {
        AttributeValue::String(value) => Ok(value),
        _ => Err(SedOperationError::InvalidAttributeValue),
    }
}

pub(crate) fn as_sidref(value: &AttributeValue) -> Result<&str, SedOperationError> {
    as_string(value)
}

pub(crate) fn as_double(value: &AttributeValue) -> Result<f64, SedOperationError> {
    match value {
        AttributeValue::Double(value) => Ok(*value),
        AttributeValue::Int(value) => Ok(f64::from(*value)),
        _ => Err(SedOperationError::InvalidAttributeValue),
    }
}

pub(crate) fn as_int(value: &AttributeValue) -> Result<i32, SedOperationError> {
    match value {
        AttributeValue::Int(value) => Ok(*value),
        _ => Err(SedOperationError::InvalidAttributeValue),
    }
}

pub(crate) fn as_steps(value: &AttributeValue) -> Result<i32, SedOperationError> {
    as_int(value)
}

pub(crate) fn as_bool(value: &AttributeValue) -> Result<bool, SedOperationError> {
    match value {
        AttributeValue::Bool(value) => Ok(*value),
        _ => Err(SedOperationError::InvalidAttributeValue),
    }
}

/// Formats a double the way it is written to SED-ML files.
///
/// Integral values drop the fraction (`10`), very large or small values use
/// exponent notation, non-finite values use the XML Schema spellings.
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 {
            "INF".to_string()
        } else {
            "-INF".to_string()
        }
    } else if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value:?}")
    }
}

/// Parses an XML Schema double.
pub fn parse_double(text: &str) -> Option<f64> {
    match text.trim() {
        "INF" | "+INF" => Some(f64::INFINITY),
        "-INF" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        other => other.parse::<f64>().ok().filter(|value| value.is_finite()),
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

/// Where an attribute is being read, for diagnostics.
pub(crate) struct AttributeOrigin<'a> {
    pub element: &'a str,
    pub type_code: TypeCode,
    pub line: usize,
    pub column: usize,
}

impl AttributeOrigin<'_> {
    fn log_empty(&self, name: &str, ctx: &mut ReadContext<'_>) {
        ctx.log_error(
            SedErrorCode::NotSchemaConformant,
            &format!(
                "Attribute '{name}' on an <{}> must not be an empty string.",
                self.element
            ),
            self.line,
            self.column,
        );
    }

    fn log_type_mismatch(&self, name: &str, expected: &str, ctx: &mut ReadContext<'_>) {
        ctx.log_error(
            SedErrorCode::XmlAttributeTypeMismatch,
            &format!(
                "The {} attribute '{name}' on the <{}> element must be of type {expected}.",
                self.type_code.name(),
                self.element
            ),
            self.line,
            self.column,
        );
    }
}

pub(crate) fn read_string(
    attributes: &XmlAttributes,
    name: &str,
    slot: &mut Option<String>,
    ctx: &mut ReadContext<'_>,
    origin: &AttributeOrigin<'_>,
) {
    if let Some(value) = attributes.get(name) {
        if value.is_empty() {
            origin.log_empty(name, ctx);
            *slot = None;
        } else {
            *slot = Some(value.to_string());
        }
    }
}

pub(crate) fn read_sidref(
    attributes: &XmlAttributes,
    name: &str,
    slot: &mut Option<String>,
    ctx: &mut ReadContext<'_>,
    origin: &AttributeOrigin<'_>,
) {
    read_string(attributes, name, slot, ctx, origin);

    if let Some(value) = slot.as_deref() {
        if !is_valid_sid(value) {
            ctx.log_error(
                SedErrorCode::IdSyntaxRule,
                &format!(
                    "The {name} attribute on the <{}> is '{value}', which does not conform to the syntax.",
                    origin.element
                ),
                origin.line,
                origin.column,
            );
        }
    }
}

pub(crate) fn read_double(
    attributes: &XmlAttributes,
    name: &str,
    slot: &mut Option<f64>,
    ctx: &mut ReadContext<'_>,
    origin: &AttributeOrigin<'_>,
) {
    if let Some(value) = attributes.get(name) {
        match parse_double(value) {
            Some(parsed) => *slot = Some(parsed),
            None => origin.log_type_mismatch(name, "double", ctx),
        }
    }
}

pub(crate) fn read_int(
    attributes: &XmlAttributes,
    name: &str,
    slot: &mut Option<i32>,
    ctx: &mut ReadContext<'_>,
    origin: &AttributeOrigin<'_>,
) {
    if let Some(value) = attributes.get(name) {
        match value.trim().parse::<i32>() {
            Ok(parsed) => *slot = Some(parsed),
            Err(_) => origin.log_type_mismatch(name, "integer", ctx),
        }
    }
}

/// Reads a step count, falling back to its pre-Version 4 name `numberOfPoints`.
pub(crate) fn read_steps(
    attributes: &XmlAttributes,
    name: &str,
    slot: &mut Option<i32>,
    ctx: &mut ReadContext<'_>,
    origin: &AttributeOrigin<'_>,
) {
    read_int(attributes, name, slot, ctx, origin);
    if slot.is_none() {
        read_int(attributes, "numberOfPoints", slot, ctx, origin);
    }
}

/// Level 1 before Version 4 spells step counts `numberOfPoints`.
pub(crate) fn uses_points_spelling(base: &SedBase) -> bool {
    base.level() == 1 && base.version() < 4
}

pub(crate) fn steps_spelling<'a>(base: &SedBase, name: &'a str) -> &'a str {
    if uses_points_spelling(base) {
        "numberOfPoints"
    } else {
        name
    }
}

pub(crate) fn read_bool(
    attributes: &XmlAttributes,
    name: &str,
    slot: &mut Option<bool>,
    ctx: &mut ReadContext<'_>,
    origin: &AttributeOrigin<'_>,
) {
    if let Some(value) = attributes.get(name) {
        match parse_bool(value) {
            Some(parsed) => *slot = Some(parsed),
            None => origin.log_type_mismatch(name, "boolean", ctx),
        }
    }
}

pub(crate) fn write_string(
    stream: &mut XmlOutputStream,
    name: &str,
    slot: &Option<String>,
) -> Result<(), SedIoError> {
    if let Some(value) = slot {
        stream.write_attribute(name, value);
    }
    Ok(())
}

pub(crate) fn write_sidref(
    stream: &mut XmlOutputStream,
    name: &str,
    slot: &Option<String>,
) -> Result<(), SedIoError> {
    write_string(stream, name, slot)
}

pub(crate) fn write_double(
    stream: &mut XmlOutputStream,
    name: &str,
    slot: &Option<f64>,
) -> Result<(), SedIoError> {
    if let Some(value) = slot {
        stream.write_attribute(name, &format_double(*value));
    }
    Ok(())
}

pub(crate) fn write_int(
    stream: &mut XmlOutputStream,
    name: &str,
    slot: &Option<i32>,
) -> Result<(), SedIoError> {
    if let Some(value) = slot {
        stream.write_attribute(name, &value.to_string());
    }
    Ok(())
}

pub(crate) fn write_bool(
    stream: &mut XmlOutputStream,
    name: &str,
    slot: &Option<bool>,
) -> Result<(), SedIoError> {
    if let Some(value) = slot {
        stream.write_attribute(name, if *value { "true" } else { "false" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_double() {
        assert_eq!(format_double(10.0), "10");
        assert_eq!(format_double(-3.0), "-3");
        assert_eq!(format_double(0.1), "0.1");
        assert_eq!(format_double(1e-7), "1e-7");
        assert_eq!(format_double(f64::INFINITY), "INF");
        assert_eq!(format_double(f64::NAN), "NaN");
    }

    #[test]
    fn test_parse_double() {
        assert_eq!(parse_double(" 2.5 "), Some(2.5));
        assert_eq!(parse_double("1e3"), Some(1000.0));
        assert_eq!(parse_double("-INF"), Some(f64::NEG_INFINITY));
        assert!(parse_double("NaN").is_some_and(f64::is_nan));
        assert_eq!(parse_double("inf"), None);
        assert_eq!(parse_double("abc"), None);
    }

    #[test]
    fn test_reflective_conversions() {
        assert_eq!(as_double(&AttributeValue::Int(3)), Ok(3.0));
        assert_eq!(
            as_int(&AttributeValue::Double(3.0)),
            Err(SedOperationError::InvalidAttributeValue)
        );
        assert_eq!(as_string(&"x".into()), Ok("x"));
        assert_eq!(as_bool(&true.into()), Ok(true));
    }
}
