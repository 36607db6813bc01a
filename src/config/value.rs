//! Coercion of raw setting strings into the supported value types.
//!
//! The set of target types is closed: strings, characters, booleans,
//! integers, floating point numbers, and date/times.

use chrono::{DateTime, NaiveDate, NaiveDateTime, ParseError, Utc};
use thiserror::Error;

use super::error::CoercionError;

/// A type a raw setting string can be coerced into.
///
/// This trait is sealed; the implementations below are the only ones.
pub trait FromSetting: Sized + sealed::Sealed {
    /// Human-readable name of the target type, used in error messages.
    const TYPE_NAME: &'static str;

    /// Converts the raw string into `Self`.
    fn from_setting(raw: &str) -> Result<Self, CoercionError>;
}

mod sealed {
    pub trait Sealed {}
}

#[derive(Debug, Error)]
#[error("expected exactly one character, found {0}")]
struct CharLengthError(usize);

impl sealed::Sealed for String {}

impl FromSetting for String {
    const TYPE_NAME: &'static str = "string";

    fn from_setting(raw: &str) -> Result<Self, CoercionError> {
        Ok(raw.to_string())
    }
}

impl sealed::Sealed for char {}

impl FromSetting for char {
    const TYPE_NAME: &'static str = "char";

    fn from_setting(raw: &str) -> Result<Self, CoercionError> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(CharLengthError(raw.chars().count()).into()),
        }
    }
}

impl sealed::Sealed for bool {}

impl FromSetting for bool {
    const TYPE_NAME: &'static str = "bool";

    fn from_setting(raw: &str) -> Result<Self, CoercionError> {
        Ok(raw.trim().to_ascii_lowercase().parse::<bool>()?)
    }
}

macro_rules! impl_from_setting_parse {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl FromSetting for $ty {
                const TYPE_NAME: &'static str = $name;

                fn from_setting(raw: &str) -> Result<Self, CoercionError> {
                    Ok(raw.trim().parse::<$ty>()?)
                }
            }
        )*
    };
}

impl_from_setting_parse! {
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    usize => "usize",
    f32 => "f32",
    f64 => "f64",
}

/// Date/time layouts accepted in addition to RFC 3339, tried in order.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

fn parse_date_time(raw: &str) -> Result<NaiveDateTime, ParseError> {
    let raw = raw.trim();

    let mut last_err = match DateTime::parse_from_rfc3339(raw) {
        Ok(dt) => return Ok(dt.naive_utc()),
        Err(e) => e,
    };

    for format in DATE_TIME_FORMATS {
        match NaiveDateTime::parse_from_str(raw, format) {
            Ok(dt) => return Ok(dt),
            Err(e) => last_err = e,
        }
    }

    for format in DATE_FORMATS {
        match NaiveDate::parse_from_str(raw, format) {
            Ok(date) => return Ok(date.and_time(chrono::NaiveTime::MIN)),
            Err(e) => last_err = e,
        }
    }

    Err(last_err)
}

impl sealed::Sealed for NaiveDateTime {}

impl FromSetting for NaiveDateTime {
    const TYPE_NAME: &'static str = "date/time";

    fn from_setting(raw: &str) -> Result<Self, CoercionError> {
        Ok(parse_date_time(raw)?)
    }
}

impl sealed::Sealed for DateTime<Utc> {}

impl FromSetting for DateTime<Utc> {
    const TYPE_NAME: &'static str = "date/time";

    fn from_setting(raw: &str) -> Result<Self, CoercionError> {
        Ok(parse_date_time(raw)?.and_utc())
    }
}
