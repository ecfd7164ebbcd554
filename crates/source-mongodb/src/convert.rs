//! Per-field value conversion into BSON.
//!
//! Rows carry dates and datetimes as strings. MongoDB should store them as
//! BSON datetimes, so each field gets a converter chosen by its declared
//! type when the source is prepared.

use crate::error::MongoSourceError;
use bson::Bson;
use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use dict_source_core::{FieldType, Value};

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueConverter {
    /// `YYYY-MM-DD` → BSON datetime at UTC midnight.
    Date,
    /// `YYYY-MM-DD HH:MM:SS` in the local timezone → BSON datetime.
    DateTime,
    /// Numbers and strings stored as-is.
    Plain,
}

impl ValueConverter {
    pub fn for_type(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Date => ValueConverter::Date,
            FieldType::DateTime => ValueConverter::DateTime,
            _ => ValueConverter::Plain,
        }
    }

    pub fn convert(&self, value: &Value) -> Result<Bson, MongoSourceError> {
        match self {
            ValueConverter::Date => {
                let text = expect_str(value, "Date")?;
                let date = NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|source| {
                    MongoSourceError::InvalidTemporal {
                        expected: "Date",
                        value: text.to_string(),
                        source,
                    }
                })?;
                let utc = date.and_time(chrono::NaiveTime::MIN).and_utc();
                Ok(Bson::DateTime(bson::DateTime::from_chrono(utc)))
            }
            ValueConverter::DateTime => {
                let text = expect_str(value, "DateTime")?;
                let naive = NaiveDateTime::parse_from_str(text, DATETIME_FORMAT).map_err(
                    |source| MongoSourceError::InvalidTemporal {
                        expected: "DateTime",
                        value: text.to_string(),
                        source,
                    },
                )?;
                let local = Local
                    .from_local_datetime(&naive)
                    .earliest()
                    .ok_or_else(|| MongoSourceError::NonexistentLocalTime(text.to_string()))?;
                Ok(Bson::DateTime(bson::DateTime::from_chrono(local)))
            }
            ValueConverter::Plain => plain(value),
        }
    }
}

fn expect_str<'a>(value: &'a Value, expected: &'static str) -> Result<&'a str, MongoSourceError> {
    value.as_str().ok_or_else(|| MongoSourceError::NotAString {
        expected,
        value: value.to_string(),
    })
}

fn plain(value: &Value) -> Result<Bson, MongoSourceError> {
    Ok(match value {
        Value::UInt(v) => {
            Bson::Int64(i64::try_from(*v).map_err(|_| MongoSourceError::UnsignedOutOfRange(*v))?)
        }
        Value::Int(v) => Bson::Int64(*v),
        Value::Float(v) => Bson::Double(*v),
        Value::String(s) => Bson::String(s.clone()),
    })
}
