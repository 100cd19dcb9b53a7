use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A platform object id.
///
/// The platform serializes ids either as plain strings or as Mongo-style
/// `{"$oid": "..."}` wrappers depending on the endpoint; both collapse to the
/// inner string here and serialize back out as a plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identifier {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Plain(String),
            Number(i64),
            Wrapped {
                #[serde(rename = "$oid")]
                oid: String,
            },
        }

        match RawId::deserialize(deserializer)? {
            RawId::Plain(s) => Ok(Self(s)),
            RawId::Number(n) => Ok(Self(n.to_string())),
            RawId::Wrapped { oid } => Ok(Self(oid)),
        }
    }
}
