//! Field paths: the keys of the validation error map.
//!
//! `fullName`, `experience`, `experience.0.company`. Entry paths use the
//! zero-based position at validation time, never the entry identifier.
//! The editor looks errors up with the same strings, so both sides must
//! build them through `FieldPath`.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::models::resume::{EntryField, EntryKind, TextField};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    Text(TextField),
    Section(EntryKind),
    Entry {
        kind: EntryKind,
        index: usize,
        field: EntryField,
    },
}

impl FieldPath {
    pub fn entry(kind: EntryKind, index: usize, field: EntryField) -> Self {
        FieldPath::Entry { kind, index, field }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Text(field) => f.write_str(field.as_str()),
            FieldPath::Section(kind) => f.write_str(kind.as_str()),
            FieldPath::Entry { kind, index, field } => {
                write!(f, "{}.{}.{}", kind.as_str(), index, field.as_str())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a valid field path")]
pub struct InvalidFieldPath(pub String);

impl FromStr for FieldPath {
    type Err = InvalidFieldPath;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidFieldPath(s.to_string());
        let mut parts = s.split('.');
        let head = parts.next().ok_or_else(invalid)?;

        match (parts.next(), parts.next(), parts.next()) {
            (None, _, _) => TextField::parse(head)
                .map(FieldPath::Text)
                .or_else(|| EntryKind::parse(head).map(FieldPath::Section))
                .ok_or_else(invalid),
            (Some(index), Some(field), None) => {
                let kind = EntryKind::parse(head).ok_or_else(invalid)?;
                // Reject "+1", "01" and friends so every path has one spelling.
                if index.is_empty()
                    || !index.bytes().all(|b| b.is_ascii_digit())
                    || (index.len() > 1 && index.starts_with('0'))
                {
                    return Err(invalid());
                }
                let index = index.parse::<usize>().map_err(|_| invalid())?;
                let field = EntryField::parse(field).ok_or_else(invalid)?;
                if !kind.accepts(field) {
                    return Err(invalid());
                }
                Ok(FieldPath::Entry { kind, index, field })
            }
            _ => Err(invalid()),
        }
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_formats() {
        assert_eq!(FieldPath::Text(TextField::FullName).to_string(), "fullName");
        assert_eq!(
            FieldPath::Section(EntryKind::Education).to_string(),
            "education"
        );
        assert_eq!(
            FieldPath::entry(EntryKind::Experience, 0, EntryField::Description).to_string(),
            "experience.0.description"
        );
        assert_eq!(
            FieldPath::entry(EntryKind::Education, 12, EntryField::EndDate).to_string(),
            "education.12.endDate"
        );
    }

    #[test]
    fn test_parse_accepts_what_display_produces() {
        for path in [
            FieldPath::Text(TextField::Skills),
            FieldPath::Section(EntryKind::Experience),
            FieldPath::entry(EntryKind::Experience, 3, EntryField::StartDate),
        ] {
            assert_eq!(path.to_string().parse::<FieldPath>(), Ok(path));
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for bad in [
            "",
            "name",
            "experience.",
            "experience.x.role",
            "experience.01.role",
            "experience.-1.role",
            "experience.0",
            "experience.0.school",
            "education.0.description",
            "projects.0.name",
            "experience.0.role.extra",
        ] {
            assert!(bad.parse::<FieldPath>().is_err(), "accepted {bad:?}");
        }
    }
}
