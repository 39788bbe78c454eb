//! Serde helpers for SurrealDB RecordId
//!
//! Record ids travel as strings in the `"table:key"` format across the whole
//! stack (API, admin frontend, database bindings). These helpers serialize a
//! [`RecordId`] to that string form and deserialize from either the string
//! form or the SDK's native representation.

use serde::{Deserialize, Deserializer, Serializer, de};
use std::fmt;
use surrealdb::RecordId;

/// Parse `"table:key"` into a RecordId. A bare key is not valid here; the
/// table prefix is required because the string alone carries the table.
fn parse_record_from_string<E: de::Error>(s: &str) -> Result<RecordId, E> {
    match s.split_once(':') {
        Some((tb, key)) if !tb.is_empty() && !key.is_empty() => {
            Ok(RecordId::from_table_key(tb, key))
        }
        _ => Err(E::custom(format!("expected 'table:key' record id, got '{s}'"))),
    }
}

struct RecordIdVisitor;

impl<'de> de::Visitor<'de> for RecordIdVisitor {
    type Value = RecordId;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a record id or a string like 'table:key'")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        parse_record_from_string(v)
    }

    fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        parse_record_from_string(&v)
    }

    fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        // Native SDK representation
        RecordId::deserialize(de::value::MapAccessDeserializer::new(map))
    }

    fn visit_newtype_struct<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        RecordId::deserialize(deserializer)
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<RecordId, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(RecordIdVisitor)
}

pub fn serialize<S>(record: &RecordId, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&record.to_string())
}

/// `Option<RecordId>` support
pub mod option {
    use super::*;

    struct OptionRecordIdVisitor;

    impl<'de> de::Visitor<'de> for OptionRecordIdVisitor {
        type Value = Option<RecordId>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("null, a record id, or a string like 'table:key'")
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(RecordIdVisitor).map(Some)
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if v.is_empty() {
                Ok(None)
            } else {
                parse_record_from_string(v).map(Some)
            }
        }

        fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            self.visit_str(&v)
        }

        fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
        where
            A: de::MapAccess<'de>,
        {
            RecordId::deserialize(de::value::MapAccessDeserializer::new(map)).map(Some)
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<RecordId>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_option(OptionRecordIdVisitor)
    }

    pub fn serialize<S>(record: &Option<RecordId>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match record {
            Some(r) => serializer.serialize_some(&r.to_string()),
            None => serializer.serialize_none(),
        }
    }
}
