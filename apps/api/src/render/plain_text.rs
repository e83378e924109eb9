//! Plain-text export view: one linear column, the shape ATS parsers read best.

use crate::models::resume::ResumeDocument;
use crate::render::{
    contact_items, date_range, display_name, EDUCATION_TITLE, EXPERIENCE_TITLE, SKILLS_TITLE,
    SUMMARY_TITLE,
};

pub fn render_plain_text(document: &ResumeDocument) -> String {
    let mut blocks: Vec<String> = Vec::new();

    let mut header = display_name(document, false).to_uppercase();
    let contacts = contact_items(document, true);
    if !contacts.is_empty() {
        if !header.is_empty() {
            header.push('\n');
        }
        header.push_str(&contacts.join(" | "));
    }
    if !header.is_empty() {
        blocks.push(header);
    }

    if !document.summary.is_empty() {
        blocks.push(section(SUMMARY_TITLE, document.summary.trim_end().to_string()));
    }

    if !document.experience.is_empty() {
        let body = document
            .experience
            .iter()
            .map(|exp| {
                let mut lines = vec![
                    format!("{} ({})", exp.role, date_range(&exp.start_date, &exp.end_date)),
                    exp.company.clone(),
                ];
                if !exp.description.is_empty() {
                    lines.push(exp.description.trim_end().to_string());
                }
                lines.join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        blocks.push(section(EXPERIENCE_TITLE, body));
    }

    if !document.education.is_empty() {
        let body = document
            .education
            .iter()
            .map(|edu| {
                format!(
                    "{} ({})\n{}",
                    edu.school,
                    date_range(&edu.start_date, &edu.end_date),
                    edu.degree
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n");
        blocks.push(section(EDUCATION_TITLE, body));
    }

    if !document.skills.is_empty() {
        blocks.push(section(SKILLS_TITLE, document.skills.clone()));
    }

    let mut out = blocks.join("\n\n");
    out.push('\n');
    out
}

fn section(title: &str, body: String) -> String {
    let title = title.to_uppercase();
    let rule = "-".repeat(title.chars().count());
    format!("{title}\n{rule}\n{body}")
}
