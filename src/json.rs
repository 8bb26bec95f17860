//! JSON interchange for dynamic values
//!
//! `Value` covers more ground than JSON, so serialization maps onto the
//! JSON data model: characters become one-character strings, bytes a byte
//! sequence, records a map of their fields. Deserialization reads the
//! self-describing subset back (null, bool, number, string, list, map);
//! round-tripping preserves equality exactly for values inside that subset.
//! A [`Struct`] serializes as its exported field-value tuple; rebuild one
//! with [`crate::structs::StructType::from_state`].

use std::fmt;

use serde::{
    de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor},
    ser::{Serialize, SerializeMap, Serializer},
};

use crate::{
    structs::Struct,
    symbols::Symbol,
    value::{Value, ValueMap},
};

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Boolean(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match n.to_i64() {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(n.to_f64()),
            },
            Value::Character(c) => serializer.serialize_char(*c),
            Value::String(s) => serializer.serialize_str(s),
            Value::Bytes(b) => serializer.serialize_bytes(b),
            Value::List(l) => serializer.collect_seq(l.read().iter()),
            Value::Map(m) => {
                let entries = m.read();
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (name, value) in entries.iter() {
                    map.serialize_entry(&*name.to_str(), value)?;
                }
                map.end()
            }
            Value::Struct(s) => {
                let record = s.read();
                let mut map = serializer.serialize_map(Some(record.len()))?;
                for (name, value) in record.iter() {
                    map.serialize_entry(&*name.to_str(), value)?;
                }
                map.end()
            }
        }
    }
}

/// The export tuple, field values in declaration order.
impl Serialize for Struct {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.values().iter())
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any JSON-shaped value")
    }

    fn visit_unit<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer)
    }

    fn visit_bool<E>(self, b: bool) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Boolean(b))
    }

    fn visit_i64<E>(self, i: i64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(i))
    }

    fn visit_u64<E>(self, u: u64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(u))
    }

    fn visit_f64<E>(self, f: f64) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(f))
    }

    fn visit_char<E>(self, c: char) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::Character(c))
    }

    fn visit_str<E>(self, s: &str) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(s))
    }

    fn visit_string<E>(self, s: String) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(s))
    }

    fn visit_bytes<E>(self, b: &[u8]) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(b))
    }

    fn visit_byte_buf<E>(self, b: Vec<u8>) -> Result<Value, E>
    where
        E: de::Error,
    {
        Ok(Value::from(b))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::list(items))
    }

    fn visit_map<A>(self, mut access: A) -> Result<Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = ValueMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, Value>()? {
            entries.insert(Symbol::intern(&key), value);
        }
        Ok(Value::map(entries))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ValueVisitor)
    }
}

impl Value {
    /// Direct conversion into the `serde_json` tree. Non-finite reals have
    /// no JSON spelling and become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Boolean(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => match n.to_i64() {
                Some(i) => serde_json::Value::from(i),
                None => serde_json::Number::from_f64(n.to_f64())
                    .map(serde_json::Value::Number)
                    .unwrap_or(serde_json::Value::Null),
            },
            Value::Character(c) => serde_json::Value::String(c.to_string()),
            Value::String(s) => serde_json::Value::String(s.to_string()),
            Value::Bytes(b) => {
                serde_json::Value::Array(b.iter().map(|&byte| byte.into()).collect())
            }
            Value::List(l) => {
                serde_json::Value::Array(l.read().iter().map(Value::to_json).collect())
            }
            Value::Map(m) => serde_json::Value::Object(
                m.read()
                    .iter()
                    .map(|(name, value)| (name.to_str().to_string(), value.to_json()))
                    .collect(),
            ),
            Value::Struct(s) => serde_json::Value::Object(
                s.read()
                    .iter()
                    .map(|(name, value)| (name.to_str().to_string(), value.to_json()))
                    .collect(),
            ),
        }
    }

    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Boolean(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::from(i)
                } else if let Some(u) = n.as_u64() {
                    Value::from(u)
                } else {
                    Value::from(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::from(s.as_str()),
            serde_json::Value::Array(items) => {
                Value::list(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(entries) => Value::map(
                entries
                    .iter()
                    .map(|(key, value)| (Symbol::intern(key), Value::from_json(value)))
                    .collect(),
            ),
        }
    }
}
