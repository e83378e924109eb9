//! Editor form: every editable field with its current value and, when the
//! last validation flagged it, the first error message. Input names are the
//! same field paths the error map is keyed by.

use crate::models::resume::{EntryField, EntryKind, ResumeDocument, TextField};
use crate::render::escape_html;
use crate::resume::paths::FieldPath;
use crate::resume::validation::ErrorMap;

fn label(path: &FieldPath) -> &'static str {
    match path {
        FieldPath::Text(TextField::FullName) => "Full name",
        FieldPath::Text(TextField::Email) => "Email",
        FieldPath::Text(TextField::Phone) => "Phone",
        FieldPath::Text(TextField::Linkedin) => "LinkedIn (URL)",
        FieldPath::Text(TextField::Summary) => "Professional summary",
        FieldPath::Text(TextField::Skills) => "Skills / keywords",
        FieldPath::Section(_) => "",
        FieldPath::Entry { field, .. } => match field {
            EntryField::Company => "Company",
            EntryField::Role => "Role",
            EntryField::Description => "Description",
            EntryField::School => "Institution",
            EntryField::Degree => "Degree / course",
            EntryField::StartDate => "Start",
            EntryField::EndDate => "End",
        },
    }
}

fn is_multiline(path: &FieldPath) -> bool {
    matches!(
        path,
        FieldPath::Text(TextField::Summary | TextField::Skills)
            | FieldPath::Entry {
                field: EntryField::Description,
                ..
            }
    )
}

fn field_html(out: &mut String, path: FieldPath, value: &str, errors: &ErrorMap) {
    let name = path.to_string();
    let error = errors.first(&path);
    let class = if error.is_some() { " class=\"invalid\"" } else { "" };

    out.push_str(&format!("<label for=\"{name}\">{}</label>", label(&path)));
    if is_multiline(&path) {
        out.push_str(&format!(
            "<textarea id=\"{name}\" name=\"{name}\"{class}>{}</textarea>",
            escape_html(value)
        ));
    } else {
        out.push_str(&format!(
            "<input id=\"{name}\" name=\"{name}\" value=\"{}\"{class}>",
            escape_html(value)
        ));
    }
    if let Some(message) = error {
        out.push_str(&format!("<span class=\"error\">{}</span>", escape_html(message)));
    }
    out.push('\n');
}

fn entry_value<'a>(document: &'a ResumeDocument, kind: EntryKind, index: usize, field: EntryField) -> &'a str {
    match kind {
        EntryKind::Experience => {
            let e = &document.experience[index];
            match field {
                EntryField::Company => &e.company,
                EntryField::Role => &e.role,
                EntryField::StartDate => &e.start_date,
                EntryField::EndDate => &e.end_date,
                EntryField::Description => &e.description,
                EntryField::School | EntryField::Degree => "",
            }
        }
        EntryKind::Education => {
            let e = &document.education[index];
            match field {
                EntryField::School => &e.school,
                EntryField::Degree => &e.degree,
                EntryField::StartDate => &e.start_date,
                EntryField::EndDate => &e.end_date,
                EntryField::Company | EntryField::Role | EntryField::Description => "",
            }
        }
    }
}

/// HTML fragment of the editor form.
pub fn render_editor(document: &ResumeDocument, errors: &ErrorMap) -> String {
    let mut out = String::with_capacity(4096);

    out.push_str("<form class=\"editor\">\n<fieldset>\n<legend>Personal details</legend>\n");
    for field in TextField::ALL {
        field_html(&mut out, FieldPath::Text(field), document.field(field), errors);
    }
    out.push_str("</fieldset>\n");

    let ids = [
        (EntryKind::Experience, document.entry_ids(EntryKind::Experience)),
        (EntryKind::Education, document.entry_ids(EntryKind::Education)),
    ];
    for (kind, ids) in ids {
        out.push_str(&format!("<fieldset data-section=\"{}\">\n", kind.as_str()));
        out.push_str(&format!("<legend>{}</legend>\n", section_legend(kind)));
        if let Some(message) = errors.first(&FieldPath::Section(kind)) {
            out.push_str(&format!("<span class=\"error\">{}</span>\n", escape_html(message)));
        }
        for (index, id) in ids.iter().enumerate() {
            out.push_str(&format!("<div class=\"entry\" data-id=\"{}\">\n", escape_html(id)));
            for &field in kind.fields() {
                let value = entry_value(document, kind, index, field);
                field_html(&mut out, FieldPath::entry(kind, index, field), value, errors);
            }
            out.push_str("</div>\n");
        }
        out.push_str("</fieldset>\n");
    }

    out.push_str("</form>\n");
    out
}

fn section_legend(kind: EntryKind) -> &'static str {
    match kind {
        EntryKind::Experience => "Professional experience",
        EntryKind::Education => "Education",
    }
}
