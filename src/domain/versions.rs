use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name under which the analysis service reports its own version
pub const BATFISH_COMPONENT: &str = "Batfish";

/// Component name to version string, as reported by the service.
///
/// Keys are unique and iterate in sorted order. The key set is whatever the
/// service reported at query time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentVersions(BTreeMap<String, String>);

impl ComponentVersions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Version of a component, if reported
    pub fn get(&self, component: &str) -> Option<&str> {
        self.0.get(component).map(String::as_str)
    }

    pub fn contains(&self, component: &str) -> bool {
        self.0.contains_key(component)
    }

    /// Version of the analysis service itself
    pub fn batfish(&self) -> Option<&str> {
        self.get(BATFISH_COMPONENT)
    }

    pub fn insert(&mut self, component: impl Into<String>, version: impl Into<String>) -> Option<String> {
        self.0.insert(component.into(), version.into())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl From<BTreeMap<String, String>> for ComponentVersions {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ComponentVersions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<'a> IntoIterator for &'a ComponentVersions {
    type Item = (&'a String, &'a String);
    type IntoIter = std::collections::btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl std::fmt::Display for ComponentVersions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (component, version)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", component, version)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_from_service_payload() {
        let versions: ComponentVersions =
            serde_json::from_str(r#"{"Batfish": "2023.12.16.1270", "Pybatfish": "2023.12.16.1270"}"#)
                .unwrap();

        assert_eq!(versions.len(), 2);
        assert!(versions.contains("Batfish"));
        assert_eq!(versions.batfish(), Some("2023.12.16.1270"));
    }

    #[test]
    fn test_non_string_values_rejected() {
        let result = serde_json::from_str::<ComponentVersions>(r#"{"Batfish": 1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_sorted_iteration_and_display() {
        let versions: ComponentVersions =
            vec![("Z3", "4.8.1"), ("Batfish", "1.0")].into_iter().collect();

        let names: Vec<&str> = versions.components().collect();
        assert_eq!(names, vec!["Batfish", "Z3"]);
        assert_eq!(versions.to_string(), "Batfish: 1.0\nZ3: 4.8.1");
    }

    #[test]
    fn test_duplicate_key_keeps_last() {
        let mut versions = ComponentVersions::new();
        versions.insert("Batfish", "1");
        let previous = versions.insert("Batfish", "2");
        assert_eq!(previous.as_deref(), Some("1"));
        assert_eq!(versions.len(), 1);
    }
}
