//! ATS validation: checks a document against the formatting rules recruiter
//! systems need before a résumé is worth exporting.
//!
//! Pure and total: the same document always yields the same error map, and
//! the document is never modified. Only export/print actions call this; the
//! editor never validates on keystrokes.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Serialize, Serializer};
use url::Url;

use crate::models::resume::{
    EducationEntry, EntryField, EntryKind, ExperienceEntry, ResumeDocument, TextField,
};
use crate::resume::paths::FieldPath;

const MIN_FULL_NAME: usize = 3;
const MIN_PHONE: usize = 8;
const MIN_SUMMARY: usize = 50;
const MIN_SKILLS: usize = 5;
const MIN_DESCRIPTION: usize = 10;

/// Whether empty repeated sections block export. Both default to `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationPolicy {
    pub require_experience: bool,
    pub require_education: bool,
}

impl ValidationPolicy {
    fn requires(&self, kind: EntryKind) -> bool {
        match kind {
            EntryKind::Experience => self.require_experience,
            EntryKind::Education => self.require_education,
        }
    }
}

/// Field path → ordered messages. The first message is the one the editor shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorMap(BTreeMap<FieldPath, Vec<String>>);

impl ErrorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: FieldPath, message: impl Into<String>) {
        self.0.entry(path).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, path: &FieldPath) -> Option<&[String]> {
        self.0.get(path).map(Vec::as_slice)
    }

    /// The message the editor shows next to `path`.
    pub fn first(&self, path: &FieldPath) -> Option<&str> {
        self.get(path).and_then(|m| m.first()).map(String::as_str)
    }
}

#[cfg(test)]
impl ErrorMap {
    /// Lookup by path string. Malformed paths simply have no errors.
    pub fn first_for(&self, path: &str) -> Option<&str> {
        path.parse::<FieldPath>().ok().and_then(|p| self.first(&p))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.first_for(path).is_some()
    }
}

impl Serialize for ErrorMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "errors", rename_all = "snake_case")]
pub enum ValidationResult {
    Valid,
    Invalid(ErrorMap),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    pub fn errors(&self) -> Option<&ErrorMap> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(errors) => Some(errors),
        }
    }
}

pub fn validate(document: &ResumeDocument, policy: &ValidationPolicy) -> ValidationResult {
    let mut errors = ErrorMap::new();

    let text = FieldPath::Text;

    if char_len(&document.full_name) < MIN_FULL_NAME {
        errors.push(text(TextField::FullName), "Full name is required");
    }
    if !is_valid_email(&document.email) {
        errors.push(text(TextField::Email), "Invalid email");
    }
    if char_len(&document.phone) < MIN_PHONE {
        errors.push(text(TextField::Phone), "Phone number is required");
    }
    if !document.linkedin.is_empty() && !is_absolute_url(&document.linkedin) {
        errors.push(text(TextField::Linkedin), "Invalid LinkedIn URL");
    }
    if char_len(&document.summary) < MIN_SUMMARY {
        errors.push(
            text(TextField::Summary),
            format!("Write a summary of at least {MIN_SUMMARY} characters"),
        );
    }
    if char_len(&document.skills) < MIN_SKILLS {
        errors.push(text(TextField::Skills), "List at least a few skills/keywords");
    }

    for (index, entry) in document.experience.iter().enumerate() {
        validate_experience(index, entry, &mut errors);
    }
    for (index, entry) in document.education.iter().enumerate() {
        validate_education(index, entry, &mut errors);
    }

    for kind in [EntryKind::Experience, EntryKind::Education] {
        if policy.requires(kind) && document.entry_count(kind) == 0 {
            errors.push(
                FieldPath::Section(kind),
                format!("Add at least one {} entry", kind.as_str()),
            );
        }
    }

    if errors.is_empty() {
        ValidationResult::Valid
    } else {
        ValidationResult::Invalid(errors)
    }
}

fn validate_experience(index: usize, entry: &ExperienceEntry, errors: &mut ErrorMap) {
    let at = |field| FieldPath::entry(EntryKind::Experience, index, field);

    if entry.company.is_empty() {
        errors.push(at(EntryField::Company), "Company name is required");
    }
    if entry.role.is_empty() {
        errors.push(at(EntryField::Role), "Role is required");
    }
    if entry.start_date.is_empty() {
        errors.push(at(EntryField::StartDate), "Start date is required");
    }
    if entry.end_date.is_empty() {
        errors.push(at(EntryField::EndDate), "End date is required (or 'Present')");
    }
    if char_len(&entry.description) < MIN_DESCRIPTION {
        errors.push(
            at(EntryField::Description),
            format!("Describe your responsibilities (at least {MIN_DESCRIPTION} characters)"),
        );
    }
}

fn validate_education(index: usize, entry: &EducationEntry, errors: &mut ErrorMap) {
    let at = |field| FieldPath::entry(EntryKind::Education, index, field);

    if entry.school.is_empty() {
        errors.push(at(EntryField::School), "Institution is required");
    }
    if entry.degree.is_empty() {
        errors.push(at(EntryField::Degree), "Degree/course is required");
    }
    if entry.start_date.is_empty() {
        errors.push(at(EntryField::StartDate), "Start date is required");
    }
    if entry.end_date.is_empty() {
        errors.push(at(EntryField::EndDate), "End date is required");
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .expect("email pattern is valid")
});

/// Email address shape: no leading dot, no `..`, dotted domain with a 2+ letter TLD.
pub fn is_valid_email(email: &str) -> bool {
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

/// Absolute URL as a browser's URL parser accepts it.
pub fn is_absolute_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_document() -> ResumeDocument {
        ResumeDocument {
            full_name: "Jane Q Doe".into(),
            email: "jane@x.com".into(),
            phone: "12345678".into(),
            linkedin: String::new(),
            summary: "Backend engineer with ten years of experience building distributed systems."
                .into(),
            skills: "Go, SQL, Linux".into(),
            experience: vec![],
            education: vec![],
        }
    }

    fn policy() -> ValidationPolicy {
        ValidationPolicy::default()
    }

    #[test]
    fn test_minimal_document_is_valid() {
        assert_eq!(validate(&valid_document(), &policy()), ValidationResult::Valid);
    }

    #[test]
    fn test_empty_document_reports_core_fields() {
        let result = validate(&ResumeDocument::default(), &policy());
        let errors = result.errors().expect("empty document must be invalid");
        for key in ["fullName", "email", "phone", "summary", "skills"] {
            assert!(errors.contains(key), "missing error for {key}");
        }
        assert!(!errors.contains("linkedin"));
    }

    #[test]
    fn test_experience_missing_description_keyed_by_index() {
        let mut doc = valid_document();
        doc.experience.push(ExperienceEntry {
            id: "x1".into(),
            company: "Acme".into(),
            role: "Eng".into(),
            start_date: "2020".into(),
            end_date: "2021".into(),
            description: String::new(),
        });
        let result = validate(&doc, &policy());
        let errors = result.errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.first_for("experience.0.description"),
            Some("Describe your responsibilities (at least 10 characters)")
        );
    }

    #[test]
    fn test_entry_paths_use_position_not_id() {
        let mut doc = valid_document();
        doc.education.push(EducationEntry {
            id: "first".into(),
            school: "MIT".into(),
            degree: "BSc".into(),
            start_date: "2010".into(),
            end_date: "2014".into(),
        });
        doc.education.push(EducationEntry::blank("second".into()));
        let result = validate(&doc, &policy());
        let errors = result.errors().unwrap();
        for field in ["school", "degree", "startDate", "endDate"] {
            assert!(errors.contains(&format!("education.1.{field}")));
            assert!(!errors.contains(&format!("education.0.{field}")));
        }
    }

    #[test]
    fn test_short_values_fail_min_lengths() {
        let mut doc = valid_document();
        doc.full_name = "Jo".into();
        doc.phone = "1234567".into();
        doc.summary = "x".repeat(49);
        doc.skills = "Go".into();
        let result = validate(&doc, &policy());
        let errors = result.errors().unwrap();
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        let mut doc = valid_document();
        doc.full_name = "Zoë".into();
        assert!(validate(&doc, &policy()).is_valid());
        doc.full_name = "李明".into();
        assert!(!validate(&doc, &policy()).is_valid());
    }

    #[test]
    fn test_linkedin_empty_or_absolute_url() {
        let mut doc = valid_document();
        doc.linkedin = "https://www.linkedin.com/in/jane".into();
        assert!(validate(&doc, &policy()).is_valid());
        doc.linkedin = "linkedin.com/in/jane".into();
        let result = validate(&doc, &policy());
        assert_eq!(
            result.errors().unwrap().first_for("linkedin"),
            Some("Invalid LinkedIn URL")
        );
    }

    #[test]
    fn test_email_shapes() {
        for ok in ["jane@x.com", "j.doe+cv@mail.example.org", "o'neil@x.io"] {
            assert!(is_valid_email(ok), "{ok}");
        }
        for bad in [
            "",
            "jane",
            "jane@",
            "@x.com",
            "jane@x",
            "jane@x.c",
            ".jane@x.com",
            "ja..ne@x.com",
            "jane.@x.com",
            "jane doe@x.com",
            "jane@-x.com",
        ] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn test_url_shapes() {
        for ok in [
            "https://linkedin.com/in/jane",
            "http://localhost:8080/",
            "https://user@example.com",
            "mailto:jane@x.com",
            "file:///tmp/cv",
            "http://[::1]/",
            "https:/linkedin.com/in/jane",
            " https://linkedin.com/in/jane",
        ] {
            assert!(is_absolute_url(ok), "{ok}");
        }
        for bad in [
            "linkedin.com/in/jane",
            "https://",
            "https://linked in.com",
            "https://linkedin.com:99999/in/jane",
            "https://exa<mple.com/in/jane",
            "://x.com",
            "1http://x.com",
        ] {
            assert!(!is_absolute_url(bad), "{bad}");
        }
    }

    #[test]
    fn test_empty_sections_policy() {
        let doc = valid_document();
        assert!(validate(&doc, &policy()).is_valid());

        let strict = ValidationPolicy {
            require_experience: false,
            require_education: true,
        };
        let result = validate(&doc, &strict);
        let errors = result.errors().unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.first_for("education"), Some("Add at least one education entry"));
    }

    #[test]
    fn test_validation_is_deterministic_and_pure() {
        let mut doc = ResumeDocument::default();
        doc.experience.push(ExperienceEntry::blank("a".into()));
        let snapshot = doc.clone();
        let first = validate(&doc, &policy());
        let second = validate(&doc, &policy());
        assert_eq!(first, second);
        assert_eq!(doc, snapshot);
    }

    #[test]
    fn test_result_serializes_paths_as_strings() {
        let mut doc = valid_document();
        doc.experience.push(ExperienceEntry::blank("a".into()));
        let json = serde_json::to_value(validate(&doc, &policy())).unwrap();
        assert_eq!(json["status"], "invalid");
        assert_eq!(json["errors"]["experience.0.company"][0], "Company name is required");

        let json = serde_json::to_value(ValidationResult::Valid).unwrap();
        assert_eq!(json["status"], "valid");
    }
}
