//! Typed field values and domain checks.
//!
//! A value is an integer, text, or calendar date; optional fields are
//! absent from the row entirely rather than carrying a sentinel.
//! `parse` turns a raw input cell into a typed value for its domain,
//! and `check` verifies that an already-typed value conforms, so the
//! single-entry and bulk paths agree on what is admissible.

use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::types::FieldDomain;

/// A typed field value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    Text(String),
    Date(NaiveDate),
}

impl Value {
    /// Returns the type name for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

fn username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9_]{1,40}$").unwrap())
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap())
}

fn personal_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z ]{1,40}$").unwrap())
}

fn position_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z_]{1,20}$").unwrap())
}

fn review_text_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^[0-9a-zA-Z_.,"'()!@$*=\-+&: ]*$"#).unwrap())
}

fn character_role_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9a-zA-Z' \-]{1,20}$").unwrap())
}

fn filename_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.\-]{1,60}\.(png|jpg|jpeg)$").unwrap())
}

/// Parses one raw input cell into a typed value for the given domain.
///
/// The error is the reason text, to be wrapped into a parse issue or a
/// domain violation by the caller.
pub fn parse(domain: FieldDomain, raw: &str) -> Result<Value, String> {
    let value = match domain {
        FieldDomain::Id | FieldDomain::Rating => {
            let n: i64 = raw
                .parse()
                .map_err(|_| format!("'{}' is not an integer", raw))?;
            Value::Int(n)
        }
        FieldDomain::Date => {
            let d = NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|_| format!("'{}' is not a YYYY-MM-DD date", raw))?;
            Value::Date(d)
        }
        _ => Value::Text(raw.to_string()),
    };
    check(domain, &value)?;
    Ok(value)
}

/// Verifies that a typed value conforms to the given domain.
pub fn check(domain: FieldDomain, value: &Value) -> Result<(), String> {
    match domain {
        FieldDomain::Id => {
            let n = expect_int(value)?;
            if n < 0 {
                return Err(format!("id {} is negative", n));
            }
        }
        FieldDomain::Rating => {
            let n = expect_int(value)?;
            if !(0..=5).contains(&n) {
                return Err(format!("rating {} outside 0..=5", n));
            }
        }
        FieldDomain::Date => {
            if value.as_date().is_none() {
                return Err(format!("expected date, got {}", value.type_name()));
            }
        }
        FieldDomain::Username => check_text(value, username_re(), "username")?,
        FieldDomain::Email => check_text(value, email_re(), "email address")?,
        FieldDomain::PersonalName => check_text(value, personal_name_re(), "name")?,
        FieldDomain::Position => check_text(value, position_re(), "position")?,
        FieldDomain::ReviewText => check_text(value, review_text_re(), "review text")?,
        FieldDomain::CharacterRole => check_text(value, character_role_re(), "character role")?,
        FieldDomain::Filename => check_text(value, filename_re(), "image filename")?,
        FieldDomain::Title => {
            let s = expect_text(value)?;
            if s.is_empty() || s.chars().count() > 40 {
                return Err("title must be 1 to 40 characters".into());
            }
        }
        FieldDomain::Opaque => {
            let s = expect_text(value)?;
            if s.is_empty() {
                return Err("value must not be empty".into());
            }
        }
    }
    Ok(())
}

fn expect_int(value: &Value) -> Result<i64, String> {
    value
        .as_int()
        .ok_or_else(|| format!("expected integer, got {}", value.type_name()))
}

fn expect_text<'a>(value: &'a Value) -> Result<&'a str, String> {
    value
        .as_text()
        .ok_or_else(|| format!("expected text, got {}", value.type_name()))
}

fn check_text(value: &Value, re: &Regex, what: &str) -> Result<(), String> {
    let s = expect_text(value)?;
    if !re.is_match(s) {
        return Err(format!("'{}' is not a valid {}", s, what));
    }
    Ok(())
}
