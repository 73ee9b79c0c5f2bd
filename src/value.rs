use std::fmt::{self, Display, Write as _};

use crate::parameter::{EncodedParameter, TypeTag};

/// Calendar date, following the rules of the Gregorian calendar. No time zone.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Ord, PartialOrd)]
pub struct Date {
    pub year: i16,
    /// January is `1`.
    pub month: u16,
    /// First day of the month is `1`.
    pub day: u16,
}

/// Time of day with second precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Ord, PartialOrd)]
pub struct Time {
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
}

/// Date combined with time of day, with microsecond precision.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Ord, PartialOrd)]
pub struct Timestamp {
    pub year: i16,
    pub month: u16,
    pub day: u16,
    pub hour: u16,
    pub minute: u16,
    pub second: u16,
    pub microsecond: u32,
}

impl Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.microsecond
        )
    }
}

/// Marks borrowed text as a character large object, so it is tagged [`TypeTag::Clob`] rather
/// than [`TypeTag::Text`] when bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clob<'a>(pub &'a str);

/// Closed sum over every value kind the binder can encode into one parameter.
///
/// Variable length kinds borrow their content rather than owning it. There is deliberately no
/// collection variant. Collections are flattened into a text scalar by the dedicated
/// collection binds, and a collection can therefore never appear as an element of another
/// collection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SqlValue<'a> {
    Int8(i8),
    UInt8(u8),
    Int16(i16),
    UInt16(u16),
    Int32(i32),
    UInt32(u32),
    Int64(i64),
    UInt64(u64),
    Bool(bool),
    Char(char),
    Float(f32),
    Double(f64),
    Text(&'a str),
    Blob(&'a [u8]),
    Clob(&'a str),
    Date(Date),
    Time(Time),
    Timestamp(Timestamp),
    /// A null value, carrying the tag the statement expects at its position.
    Null(TypeTag),
}

impl SqlValue<'_> {
    /// Tag identifying the variant.
    pub fn type_tag(&self) -> TypeTag {
        match self {
            SqlValue::Int8(_) => TypeTag::Int8,
            SqlValue::UInt8(_) => TypeTag::UInt8,
            SqlValue::Int16(_) => TypeTag::Int16,
            SqlValue::UInt16(_) => TypeTag::UInt16,
            SqlValue::Int32(_) => TypeTag::Int32,
            SqlValue::UInt32(_) => TypeTag::UInt32,
            SqlValue::Int64(_) => TypeTag::Int64,
            SqlValue::UInt64(_) => TypeTag::UInt64,
            SqlValue::Bool(_) => TypeTag::Bool,
            SqlValue::Char(_) => TypeTag::Char,
            SqlValue::Float(_) => TypeTag::Float,
            SqlValue::Double(_) => TypeTag::Double,
            SqlValue::Text(_) => TypeTag::Text,
            SqlValue::Blob(_) => TypeTag::Blob,
            SqlValue::Clob(_) => TypeTag::Clob,
            SqlValue::Date(_) => TypeTag::Date,
            SqlValue::Time(_) => TypeTag::Time,
            SqlValue::Timestamp(_) => TypeTag::Timestamp,
            SqlValue::Null(tag) => *tag,
        }
    }

    /// `true` for the [`SqlValue::Null`] variant.
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null(_))
    }

    /// Textual wire rendering of the value. This is the representation a text protocol backend
    /// receives, and the representation the collection flattener concatenates.
    pub(crate) fn render(&self) -> String {
        match self {
            SqlValue::Int8(value) => value.to_string(),
            SqlValue::UInt8(value) => value.to_string(),
            SqlValue::Int16(value) => value.to_string(),
            SqlValue::UInt16(value) => value.to_string(),
            SqlValue::Int32(value) => value.to_string(),
            SqlValue::UInt32(value) => value.to_string(),
            SqlValue::Int64(value) => value.to_string(),
            SqlValue::UInt64(value) => value.to_string(),
            SqlValue::Bool(value) => (if *value { "true" } else { "false" }).to_string(),
            SqlValue::Char(value) => value.to_string(),
            SqlValue::Float(value) => value.to_string(),
            SqlValue::Double(value) => value.to_string(),
            SqlValue::Text(text) | SqlValue::Clob(text) => (*text).to_string(),
            SqlValue::Blob(bytes) => {
                // Hex with `\x` prefix, the format text protocol backends accept for binary.
                let mut out = String::with_capacity(2 + bytes.len() * 2);
                out.push_str("\\x");
                for byte in *bytes {
                    // Writing into a `String` cannot fail.
                    let _ = write!(out, "{byte:02x}");
                }
                out
            }
            SqlValue::Date(date) => date.to_string(),
            SqlValue::Time(time) => time.to_string(),
            SqlValue::Timestamp(timestamp) => timestamp.to_string(),
            SqlValue::Null(_) => String::new(),
        }
    }

    /// Encodes the value into exactly one parameter.
    pub(crate) fn encode(&self) -> EncodedParameter {
        match self {
            SqlValue::Null(tag) => EncodedParameter::null(*tag),
            _ => EncodedParameter::scalar(self.type_tag(), self.render().into_bytes()),
        }
    }
}
