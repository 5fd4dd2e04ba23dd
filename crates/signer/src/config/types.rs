//! Configuration-related types.
//!
//! Implements serializing and deserializing with upper-bound and
//! non-emptiness verification.

use core::fmt::{Display, Error as FmtError, Formatter};
use core::str::FromStr;

use serde::de::{Error as DeserializeError, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::Error;

/// The chain's network identifier, e.g. `oro_1336-1`.
///
/// Opaque to the pipeline, but the chain verifies signatures against it,
/// so an empty value is rejected up front.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ChainId(String);

impl ChainId {
    pub fn new(id: String) -> Result<Self, Error> {
        if id.is_empty() {
            return Err(Error::empty_chain_id());
        }

        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ChainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ChainId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl Serialize for ChainId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ChainId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let id = String::deserialize(deserializer)?;

        if id.is_empty() {
            return Err(D::Error::invalid_value(
                Unexpected::Str(&id),
                &"a non-empty chain identifier",
            ));
        }

        Ok(ChainId(id))
    }
}

/// The transaction memo string, bounded to the chain's accepted length.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Memo(String);

impl Memo {
    pub const MAX_LEN: usize = 256;

    pub fn new(memo: String) -> Result<Self, Error> {
        if memo.len() > Self::MAX_LEN {
            return Err(Error::memo_too_long(memo.len()));
        }

        Ok(Self(memo))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Memo {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Memo {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Memo {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let memo = String::deserialize(deserializer)?;

        if memo.len() > Self::MAX_LEN {
            return Err(D::Error::invalid_length(
                memo.len(),
                &format!("a memo of at most {} characters", Self::MAX_LEN).as_str(),
            ));
        }

        Ok(Memo(memo))
    }
}
