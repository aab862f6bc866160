//! Decimal-string serde for wide integers.
//!
//! Amounts routinely exceed 2^53, so they never cross a serialization
//! boundary as JSON numbers. Use with `#[serde(with = "decimal::unsigned")]`
//! or `#[serde(with = "decimal::signed")]`.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serializer};

fn serialize_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn deserialize_parsed<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: FromStr,
    T::Err: Display,
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<T>().map_err(serde::de::Error::custom)
}

/// `u128` as a base-10 string.
pub mod unsigned {
    use super::*;

    pub fn serialize<S: Serializer>(value: &u128, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_display(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u128, D::Error> {
        deserialize_parsed(deserializer)
    }
}

/// `i128` as a base-10 string with an optional leading `-`.
pub mod signed {
    use super::*;

    pub fn serialize<S: Serializer>(value: &i128, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_display(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i128, D::Error> {
        deserialize_parsed(deserializer)
    }
}
