//! Strongly-typed entry identifier
//!
//! A newtype over a random UUID so entry ids cannot be confused with
//! arbitrary strings or other UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Prefix used when displaying an entry id
pub const ENTRY_ID_PREFIX: &str = "ent-";

/// Unique, stable identifier of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(Uuid);

impl EntryId {
    /// Create a new random ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create an ID from an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Lowercase hex form without hyphens, used for prefix lookups
    pub fn simple_hex(&self) -> String {
        self.0.simple().to_string()
    }

    /// Parse an ID from a full UUID string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", ENTRY_ID_PREFIX, &self.simple_hex()[..8])
    }
}

impl From<Uuid> for EntryId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for EntryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(uuid) = Uuid::parse_str(s) {
            return Ok(Self(uuid));
        }
        let s = s.strip_prefix(ENTRY_ID_PREFIX).unwrap_or(s);
        Ok(Self(Uuid::parse_str(s)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_id_creation() {
        let id = EntryId::new();
        assert!(!id.as_uuid().is_nil());
    }

    #[test]
    fn test_id_display() {
        let id = EntryId::new();
        let display = format!("{}", id);
        assert!(display.starts_with("ent-"));
        assert_eq!(display.len(), 12);
        assert!(id.simple_hex().starts_with(&display[4..]));
    }

    #[test]
    fn test_ids_are_unique() {
        let id1 = EntryId::new();
        let id2 = id1;
        assert_eq!(id1, id2);
        assert_ne!(id1, EntryId::new());
    }

    #[test]
    fn test_id_serialization() {
        let id = EntryId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_id_parse_with_and_without_prefix() {
        let uuid_str = "550e8400-e29b-41d4-a716-446655440000";
        let id = EntryId::parse(uuid_str).unwrap();
        assert_eq!(id.as_uuid().to_string(), uuid_str);

        let prefixed: EntryId = format!("ent-{}", uuid_str).parse().unwrap();
        assert_eq!(prefixed, id);

        assert!("nonexistent".parse::<EntryId>().is_err());
    }
}
