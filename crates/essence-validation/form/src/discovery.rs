// File: form/src/discovery.rs
// Purpose: Ordered set of required field names, built once per attach

use crate::collaborators::FieldCandidate;

/// Names of the tracked fields in document order, without duplicates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackedFields {
    names: Vec<String>,
}

impl TrackedFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep every required, named candidate; the first occurrence of a name wins
    pub fn discover<I>(candidates: I) -> Self
    where
        I: IntoIterator<Item = FieldCandidate>,
    {
        let mut tracked = Self::new();
        for candidate in candidates {
            if !candidate.required {
                continue;
            }
            match candidate.name {
                Some(name) if !name.is_empty() => {
                    tracked.insert(name);
                }
                _ => tracing::debug!("skipping required field without a name"),
            }
        }
        tracked
    }

    /// Append a name; returns false if it was already tracked
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.contains(&name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(|n| n.as_str())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use essence_validation_core::FieldType;

    fn candidate(name: Option<&str>, required: bool) -> FieldCandidate {
        FieldCandidate {
            name: name.map(str::to_string),
            field_type: FieldType::Text,
            required,
        }
    }

    #[test]
    fn test_only_required_fields_are_tracked() {
        let tracked = TrackedFields::discover(vec![
            candidate(Some("name"), true),
            candidate(Some("nickname"), false),
            candidate(Some("email"), true),
        ]);
        assert_eq!(tracked.iter().collect::<Vec<_>>(), vec!["name", "email"]);
        assert!(!tracked.contains("nickname"));
    }

    #[test]
    fn test_duplicate_names_collapse() {
        let tracked = TrackedFields::discover(vec![
            candidate(Some("choice"), true),
            candidate(Some("other"), true),
            candidate(Some("choice"), true),
        ]);
        assert_eq!(tracked.len(), 2);
        assert_eq!(tracked.iter().collect::<Vec<_>>(), vec!["choice", "other"]);
    }

    #[test]
    fn test_unnamed_fields_are_skipped() {
        let tracked = TrackedFields::discover(vec![candidate(None, true), candidate(Some(""), true)]);
        assert!(tracked.is_empty());
    }

    #[test]
    fn test_insert_reports_duplicates() {
        let mut tracked = TrackedFields::new();
        assert!(tracked.insert("a"));
        assert!(!tracked.insert("a"));
    }
}
