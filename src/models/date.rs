//! Wire date handling.
//!
//! FreshBooks sends dates as fixed-format strings: `YYYY-MM-DD` for
//! date-only fields and `YYYY-MM-DD HH:MM:SS` for timestamps. Values are
//! taken as the server's wall-clock time and kept as naive chrono types, so
//! nothing is shifted between decode and encode.
//!
//! Use the submodules with `#[serde(with = "...")]`. A string that does not
//! match the field's format decodes to `None`.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer};

/// Format of date-only fields.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of timestamp fields.
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A chrono type with a fixed FreshBooks wire format.
pub trait WireDate: Sized {
    /// The `strftime` format used on the wire.
    const FORMAT: &'static str;

    /// Parse a wire string, `None` if it does not match [`Self::FORMAT`].
    fn parse_wire(raw: &str) -> Option<Self>;

    /// Render in wire format.
    fn to_wire(&self) -> String;
}

impl WireDate for NaiveDate {
    const FORMAT: &'static str = DATE_FORMAT;

    fn parse_wire(raw: &str) -> Option<Self> {
        NaiveDate::parse_from_str(raw, Self::FORMAT).ok()
    }

    fn to_wire(&self) -> String {
        self.format(Self::FORMAT).to_string()
    }
}

impl WireDate for NaiveDateTime {
    const FORMAT: &'static str = DATE_TIME_FORMAT;

    fn parse_wire(raw: &str) -> Option<Self> {
        NaiveDateTime::parse_from_str(raw, Self::FORMAT).ok()
    }

    fn to_wire(&self) -> String {
        self.format(Self::FORMAT).to_string()
    }
}

fn serialize_optional<T: WireDate, S: Serializer>(
    value: &Option<T>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(date) => serializer.serialize_str(&date.to_wire()),
        None => serializer.serialize_none(),
    }
}

fn deserialize_optional<'de, T: WireDate, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<T>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(T::parse_wire))
}

fn serialize_nullable<T: WireDate, S: Serializer>(
    value: &Option<Option<T>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(Some(date)) => serializer.serialize_str(&date.to_wire()),
        _ => serializer.serialize_none(),
    }
}

// Only called when the key is present: `null` stays an explicit null, an
// unparseable string becomes absent.
fn deserialize_nullable<'de, T: WireDate, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Option<T>>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => Some(None),
        Some(s) => T::parse_wire(&s).map(Some),
    })
}

/// `Option<NaiveDate>` in `YYYY-MM-DD` form.
pub mod date_only {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serialize_optional(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDate>, D::Error> {
        deserialize_optional(deserializer)
    }
}

/// `Option<NaiveDateTime>` in `YYYY-MM-DD HH:MM:SS` form.
pub mod date_time {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<NaiveDateTime>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serialize_optional(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NaiveDateTime>, D::Error> {
        deserialize_optional(deserializer)
    }
}

/// Nullable `YYYY-MM-DD` field (`Option<Option<NaiveDate>>`).
pub mod nullable_date_only {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Option<NaiveDate>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serialize_nullable(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Option<NaiveDate>>, D::Error> {
        deserialize_nullable(deserializer)
    }
}

/// Nullable `YYYY-MM-DD HH:MM:SS` field (`Option<Option<NaiveDateTime>>`).
pub mod nullable_date_time {
    use super::*;

    pub fn serialize<S: Serializer>(
        value: &Option<Option<NaiveDateTime>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serialize_nullable(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Option<NaiveDateTime>>, D::Error> {
        deserialize_nullable(deserializer)
    }
}
