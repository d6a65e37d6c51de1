//! Read models and serde wiring for [`FlagSet`].
//!
//! The external representation of a flag set is the ordered map of every
//! registered name to its boolean state. Key order always matches registration
//! order, and every registered name appears exactly once whether set or clear.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::set::FlagSet;

// --- Read models ---

impl FlagSet {
    /// Returns the names whose flag is currently set, in registration order.
    ///
    /// # Example
    /// ```rust
    /// use flagrack::prelude::*;
    ///
    /// # fn main() -> Result<(), FlagSetError> {
    /// let mut flags = FlagSet::with_names(["cat", "dog", "bat"])?;
    /// flags.set(["bat", "cat"])?;
    ///
    /// assert_eq!(flags.active_names(), ["cat", "bat"]);
    /// # Ok(())
    /// # }
    /// ```
    #[must_use]
    pub fn active_names(&self) -> Vec<&str> {
        self.registry
            .iter()
            .filter(|&(_, &bit)| self.state & bit != 0)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Returns every registered name mapped to its current boolean state, in
    /// registration order.
    ///
    /// This is the full external representation of the set, covering clear flags
    /// as well as set ones. Serializing a [`FlagSet`] emits exactly this map.
    #[must_use]
    pub fn snapshot(&self) -> IndexMap<&str, bool> {
        self.registry
            .iter()
            .map(|(name, &bit)| (name.as_str(), self.state & bit != 0))
            .collect()
    }
}

// --- Serde ---

impl Serialize for FlagSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.registry.len()))?;
        for (name, &bit) in &self.registry {
            map.serialize_entry(name, &(self.state & bit != 0))?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FlagSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StateVisitor;

        impl<'de> Visitor<'de> for StateVisitor {
            type Value = FlagSet;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a map of flag names to booleans")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut flags = FlagSet::new();
                while let Some((name, active)) = access.next_entry::<String, bool>()? {
                    flags.register(name.as_str()).map_err(de::Error::custom)?;
                    if active {
                        flags.set(name.as_str()).map_err(de::Error::custom)?;
                    }
                }
                Ok(flags)
            }
        }

        deserializer.deserialize_map(StateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use crate::FlagSet;

    #[test]
    fn test_serialized_document_follows_registration_order() {
        let mut flags = FlagSet::new();
        flags.register(["cat", "dog", "bat"]).unwrap();
        flags.set(["cat", "bat"]).unwrap();

        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, r#"{"cat":true,"dog":false,"bat":true}"#);
    }

    #[test]
    fn test_deserialization_rebuilds_the_registry() {
        let flags: FlagSet =
            serde_json::from_str(r#"{"cat":true,"dog":false,"bat":true}"#).unwrap();

        assert_eq!(flags.bit_of("cat"), Some(1));
        assert_eq!(flags.bit_of("dog"), Some(2));
        assert_eq!(flags.bit_of("bat"), Some(4));
        assert_eq!(flags.mask(), 0b101);
    }

    #[test]
    fn test_roundtrip_preserves_registry_and_state() {
        let mut flags = FlagSet::new();
        flags.register(["cat", "dog", "bat"]).unwrap();
        flags.set("dog").unwrap();

        let json = serde_json::to_string(&flags).unwrap();
        let restored: FlagSet = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, flags);
    }

    #[test]
    fn test_snapshot_serializes_like_the_set() {
        let mut flags = FlagSet::new();
        flags.register(["cat", "dog"]).unwrap();
        flags.set("cat").unwrap();

        let direct = serde_json::to_string(&flags).unwrap();
        let via_snapshot = serde_json::to_string(&flags.snapshot()).unwrap();

        assert_eq!(direct, via_snapshot);
    }

    #[test]
    fn test_deserialization_rejects_oversized_documents() {
        let entries: Vec<String> = (0..=32).map(|i| format!(r#""flag{i}":false"#)).collect();
        let doc = format!("{{{}}}", entries.join(","));

        let result: Result<FlagSet, _> = serde_json::from_str(&doc);
        assert!(result.is_err(), "a 33-key document must not deserialize");
    }
}
