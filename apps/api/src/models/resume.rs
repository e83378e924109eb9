use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The single live résumé. Always total: unset text is `""`, unset sections are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub linkedin: String,
    pub summary: String,
    /// Comma-separated keywords, kept as free text for quick editing.
    pub skills: String,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExperienceEntry {
    pub id: String,
    pub company: String,
    pub role: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
    pub id: String,
    pub school: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
}

/// Top-level text fields of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TextField {
    FullName,
    Email,
    Phone,
    Linkedin,
    Summary,
    Skills,
}

impl TextField {
    pub const ALL: [TextField; 6] = [
        TextField::FullName,
        TextField::Email,
        TextField::Phone,
        TextField::Linkedin,
        TextField::Summary,
        TextField::Skills,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TextField::FullName => "fullName",
            TextField::Email => "email",
            TextField::Phone => "phone",
            TextField::Linkedin => "linkedin",
            TextField::Summary => "summary",
            TextField::Skills => "skills",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

/// The two repeated sections of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryKind {
    Experience,
    Education,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Experience => "experience",
            EntryKind::Education => "education",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "experience" => Some(EntryKind::Experience),
            "education" => Some(EntryKind::Education),
            _ => None,
        }
    }

    /// Fields an entry of this kind carries, in display order (identifier excluded).
    pub fn fields(&self) -> &'static [EntryField] {
        match self {
            EntryKind::Experience => &[
                EntryField::Company,
                EntryField::Role,
                EntryField::StartDate,
                EntryField::EndDate,
                EntryField::Description,
            ],
            EntryKind::Education => &[
                EntryField::School,
                EntryField::Degree,
                EntryField::StartDate,
                EntryField::EndDate,
            ],
        }
    }

    pub fn accepts(&self, field: EntryField) -> bool {
        self.fields().contains(&field)
    }
}

/// Editable fields across both entry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EntryField {
    Company,
    Role,
    Description,
    School,
    Degree,
    StartDate,
    EndDate,
}

impl EntryField {
    const ALL: [EntryField; 7] = [
        EntryField::Company,
        EntryField::Role,
        EntryField::Description,
        EntryField::School,
        EntryField::Degree,
        EntryField::StartDate,
        EntryField::EndDate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryField::Company => "company",
            EntryField::Role => "role",
            EntryField::Description => "description",
            EntryField::School => "school",
            EntryField::Degree => "degree",
            EntryField::StartDate => "startDate",
            EntryField::EndDate => "endDate",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

/// Fresh collision-resistant entry identifier.
pub fn new_entry_id() -> String {
    Uuid::new_v4().to_string()
}

impl ExperienceEntry {
    pub fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn set(&mut self, field: EntryField, value: String) -> bool {
        let slot = match field {
            EntryField::Company => &mut self.company,
            EntryField::Role => &mut self.role,
            EntryField::StartDate => &mut self.start_date,
            EntryField::EndDate => &mut self.end_date,
            EntryField::Description => &mut self.description,
            EntryField::School | EntryField::Degree => return false,
        };
        *slot = value;
        true
    }
}

impl EducationEntry {
    pub fn blank(id: String) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    fn set(&mut self, field: EntryField, value: String) -> bool {
        let slot = match field {
            EntryField::School => &mut self.school,
            EntryField::Degree => &mut self.degree,
            EntryField::StartDate => &mut self.start_date,
            EntryField::EndDate => &mut self.end_date,
            EntryField::Company | EntryField::Role | EntryField::Description => return false,
        };
        *slot = value;
        true
    }
}

// Value-producing edits. None of these touch `self`; the store swaps in the result.
impl ResumeDocument {
    pub fn field(&self, field: TextField) -> &str {
        match field {
            TextField::FullName => &self.full_name,
            TextField::Email => &self.email,
            TextField::Phone => &self.phone,
            TextField::Linkedin => &self.linkedin,
            TextField::Summary => &self.summary,
            TextField::Skills => &self.skills,
        }
    }

    pub fn with_field(&self, field: TextField, value: impl Into<String>) -> Self {
        let mut next = self.clone();
        let slot = match field {
            TextField::FullName => &mut next.full_name,
            TextField::Email => &mut next.email,
            TextField::Phone => &mut next.phone,
            TextField::Linkedin => &mut next.linkedin,
            TextField::Summary => &mut next.summary,
            TextField::Skills => &mut next.skills,
        };
        *slot = value.into();
        next
    }

    pub fn entry_ids(&self, kind: EntryKind) -> Vec<&str> {
        match kind {
            EntryKind::Experience => self.experience.iter().map(|e| e.id.as_str()).collect(),
            EntryKind::Education => self.education.iter().map(|e| e.id.as_str()).collect(),
        }
    }

    pub fn entry_count(&self, kind: EntryKind) -> usize {
        match kind {
            EntryKind::Experience => self.experience.len(),
            EntryKind::Education => self.education.len(),
        }
    }

    /// Appends a blank entry with identifier `id`.
    pub fn with_new_entry(&self, kind: EntryKind, id: String) -> Self {
        let mut next = self.clone();
        match kind {
            EntryKind::Experience => next.experience.push(ExperienceEntry::blank(id)),
            EntryKind::Education => next.education.push(EducationEntry::blank(id)),
        }
        next
    }

    /// Returns `None` when no entry has `id` or `field` does not belong to `kind`.
    pub fn with_entry_field(
        &self,
        kind: EntryKind,
        id: &str,
        field: EntryField,
        value: impl Into<String>,
    ) -> Option<Self> {
        if !kind.accepts(field) {
            return None;
        }
        let mut next = self.clone();
        let value = value.into();
        let updated = match kind {
            EntryKind::Experience => next
                .experience
                .iter_mut()
                .find(|e| e.id == id)
                .map(|e| e.set(field, value)),
            EntryKind::Education => next
                .education
                .iter_mut()
                .find(|e| e.id == id)
                .map(|e| e.set(field, value)),
        };
        matches!(updated, Some(true)).then_some(next)
    }

    /// Returns `None` when no entry has `id`.
    pub fn without_entry(&self, kind: EntryKind, id: &str) -> Option<Self> {
        let mut next = self.clone();
        let before = next.entry_count(kind);
        match kind {
            EntryKind::Experience => next.experience.retain(|e| e.id != id),
            EntryKind::Education => next.education.retain(|e| e.id != id),
        }
        (next.entry_count(kind) != before).then_some(next)
    }
}
