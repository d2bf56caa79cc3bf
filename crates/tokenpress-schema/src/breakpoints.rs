use serde::de::Deserializer;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// The breakpoint token that means "every width". It never appears inside a
/// style key; keys without a breakpoint segment implicitly belong to it.
pub const DEFAULT_BREAKPOINT: &str = "bp:all";

/// The fixed ordered table of breakpoint tokens to minimum pixel widths.
///
/// Serialized as a `token -> px` map; entries are kept sorted by width so
/// iteration order is stable regardless of input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakpointTable {
    entries: Vec<(String, u32)>,
}

impl BreakpointTable {
    pub fn min_width(&self, token: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(name, _)| name == token)
            .map(|(_, px)| *px)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, px)| (name.as_str(), *px))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        let entries = [
            (DEFAULT_BREAKPOINT, 0),
            ("bp:sm:1", 320),
            ("bp:sm:2", 480),
            ("bp:md:1", 640),
            ("bp:md:2", 832),
            ("bp:lg:1", 1024),
            ("bp:lg:2", 1312),
            ("bp:xl:1", 1600),
            ("bp:xl:2", 1952),
            ("bp:xxl:1", 2176),
            ("bp:xxl:2", 2432),
        ]
        .into_iter()
        .map(|(name, px)| (name.to_string(), px))
        .collect();
        Self { entries }
    }
}

impl Serialize for BreakpointTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, px) in &self.entries {
            map.serialize_entry(name, px)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for BreakpointTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, u32>::deserialize(deserializer)?;
        let mut entries: Vec<(String, u32)> = raw.into_iter().collect();
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        Ok(Self { entries })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_has_eleven_tokens() {
        let table = BreakpointTable::default();
        assert_eq!(table.len(), 11);
        assert_eq!(table.min_width(DEFAULT_BREAKPOINT), Some(0));
        assert_eq!(table.min_width("bp:lg:2"), Some(1312));
        assert_eq!(table.min_width("bp:xxl:2"), Some(2432));
        assert_eq!(table.min_width("bp:huge"), None);
    }

    #[test]
    fn test_deserialized_table_is_width_ordered() {
        let table: BreakpointTable =
            serde_json::from_str(r#"{"bp:b": 800, "bp:a": 400, "bp:all": 0}"#).unwrap();
        let order: Vec<_> = table.iter().map(|(name, _)| name.to_string()).collect();
        assert_eq!(order, ["bp:all", "bp:a", "bp:b"]);
    }
}
