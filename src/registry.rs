//! Logical to physical index name mapping.
//!
//! Callers address indexes by a logical name; the indexer executable and the
//! search daemon only understand physical names. The registry is built once
//! from configuration and never mutated afterwards. Unknown logical names are
//! dropped during resolution rather than reported.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Ordered, immutable mapping from logical index name to physical index name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexRegistry {
    entries: Vec<(String, String)>,
}

/// The outcome of resolving a list of logical names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Physical names in input order, unknown labels omitted.
    pub names: Vec<String>,
    /// The last logical label visited, resolved or not.
    pub last_label: Option<String>,
}

impl Resolution {
    /// True when nothing resolved.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Physical names joined the way the daemon expects them.
    pub fn joined(&self) -> String {
        self.names.join(" ")
    }
}

impl IndexRegistry {
    /// Build a registry from `(logical, physical)` pairs.
    ///
    /// A repeated logical name replaces the earlier physical name but keeps
    /// its original position.
    pub fn new<I, L, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (L, P)>,
        L: Into<String>,
        P: Into<String>,
    {
        let mut registry = IndexRegistry::default();
        for (logical, physical) in entries {
            registry.insert(logical.into(), physical.into());
        }
        registry
    }

    fn insert(&mut self, logical: String, physical: String) {
        match self.entries.iter_mut().find(|(l, _)| *l == logical) {
            Some(entry) => entry.1 = physical,
            None => self.entries.push((logical, physical)),
        }
    }

    /// Look up the physical name for a logical name.
    pub fn resolve(&self, logical: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(l, _)| l == logical)
            .map(|(_, p)| p.as_str())
    }

    /// Resolve every label independently, skipping the unknown ones.
    pub fn resolve_all<I, S>(&self, labels: I) -> Resolution
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut resolution = Resolution::default();
        for label in labels {
            let label = label.as_ref();
            match self.resolve(label) {
                Some(physical) => resolution.names.push(physical.to_string()),
                None => log::warn!("Skipping unknown index \"{label}\""),
            }
            resolution.last_label = Some(label.to_string());
        }
        resolution
    }

    /// Whether `name` is one of the configured index identifiers.
    ///
    /// Membership is tested against the physical names.
    pub fn contains_physical(&self, name: &str) -> bool {
        self.entries.iter().any(|(_, p)| p == name)
    }

    /// Whether `name` is a configured logical name.
    pub fn contains_logical(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// All logical names in configuration order.
    pub fn logical_names(&self) -> Vec<String> {
        self.entries.iter().map(|(l, _)| l.clone()).collect()
    }

    /// Iterate over `(logical, physical)` pairs in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(l, p)| (l.as_str(), p.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for IndexRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (logical, physical) in &self.entries {
            map.serialize_entry(logical, physical)?;
        }
        map.end()
    }
}

struct RegistryVisitor;

impl<'de> Visitor<'de> for RegistryVisitor {
    type Value = IndexRegistry;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map of logical index names to physical index names")
    }

    fn visit_map<M: MapAccess<'de>>(self, mut access: M) -> Result<Self::Value, M::Error> {
        let mut registry = IndexRegistry::default();
        while let Some((logical, physical)) = access.next_entry::<String, String>()? {
            registry.insert(logical, physical);
        }
        Ok(registry)
    }
}

// Deserialized through a visitor so that file order survives.
impl<'de> Deserialize<'de> for IndexRegistry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(RegistryVisitor)
    }
}
