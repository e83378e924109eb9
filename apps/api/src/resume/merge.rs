//! Merge of untrusted JSON over the empty document.
//!
//! Stored state and imported backups may be partial, older, or hand-edited.
//! Whatever arrives, the result is a total `ResumeDocument`: absent, `null`
//! or mistyped text falls back to `""`, absent sections to empty, and every
//! entry ends up with an identifier unique within its section.

use std::collections::HashSet;

use serde_json::{Map, Value};

use crate::models::resume::{
    new_entry_id, EducationEntry, EntryField, EntryKind, ExperienceEntry, ResumeDocument,
    TextField,
};

/// Merges `value` over the default document. `None` when `value` is not a JSON object.
pub fn merge_over_default(value: &Value) -> Option<ResumeDocument> {
    let object = value.as_object()?;
    let mut doc = ResumeDocument::default();

    for field in TextField::ALL {
        if let Some(text) = text_at(object, field.as_str()) {
            doc = doc.with_field(field, text);
        }
    }

    doc.experience = merge_section(object, EntryKind::Experience, merge_experience);
    doc.education = merge_section(object, EntryKind::Education, merge_education);
    Some(doc)
}

fn text_at(object: &Map<String, Value>, key: &str) -> Option<String> {
    object.get(key).and_then(Value::as_str).map(str::to_string)
}

fn merge_section<T, F>(object: &Map<String, Value>, kind: EntryKind, merge_entry: F) -> Vec<T>
where
    F: Fn(&Map<String, Value>, String) -> T,
{
    let Some(items) = object.get(kind.as_str()).and_then(Value::as_array) else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| {
            let id = match text_at(entry, "id") {
                Some(id) if !id.is_empty() && !seen.contains(&id) => id,
                _ => fresh_id(&seen),
            };
            seen.insert(id.clone());
            merge_entry(entry, id)
        })
        .collect()
}

fn fresh_id(seen: &HashSet<String>) -> String {
    loop {
        let id = new_entry_id();
        if !seen.contains(&id) {
            return id;
        }
    }
}

fn merge_experience(entry: &Map<String, Value>, id: String) -> ExperienceEntry {
    let get = |field: EntryField| text_at(entry, field.as_str()).unwrap_or_default();
    ExperienceEntry {
        id,
        company: get(EntryField::Company),
        role: get(EntryField::Role),
        start_date: get(EntryField::StartDate),
        end_date: get(EntryField::EndDate),
        description: get(EntryField::Description),
    }
}

fn merge_education(entry: &Map<String, Value>, id: String) -> EducationEntry {
    let get = |field: EntryField| text_at(entry, field.as_str()).unwrap_or_default();
    EducationEntry {
        id,
        school: get(EntryField::School),
        degree: get(EntryField::Degree),
        start_date: get(EntryField::StartDate),
        end_date: get(EntryField::EndDate),
    }
}
