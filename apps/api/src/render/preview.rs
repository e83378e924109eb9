use crate::models::resume::ResumeDocument;
use crate::render::{
    contact_items, date_range, display_name, escape_html, EDUCATION_TITLE, EXPERIENCE_TITLE,
    SKILLS_TITLE, SUMMARY_TITLE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HtmlMode {
    /// Live preview next to the editor: placeholder name, full links.
    Preview,
    /// Print/export view: exactly what goes on paper.
    Print,
}

const STYLE: &str = "body{font-family:Helvetica,Arial,sans-serif;color:#111827;margin:0}\
main{max-width:210mm;margin:0 auto;padding:20mm;line-height:1.4}\
header{border-bottom:2px solid #1f2937;padding-bottom:1rem;margin-bottom:1.5rem}\
h1{text-transform:uppercase;letter-spacing:1px;margin:0 0 .5rem}\
h2{font-size:1.1rem;text-transform:uppercase;border-bottom:1px solid #d1d5db;margin:1.5rem 0 .75rem}\
h3{margin:0;font-size:1rem}.row{display:flex;justify-content:space-between;align-items:baseline}\
.dates{color:#4b5563;font-size:.875rem;white-space:nowrap}.org{font-style:italic;font-weight:600}\
.text{white-space:pre-line;font-size:.9rem}@media print{main{padding:0}}";

/// Standalone HTML page for the document. All user text is escaped.
pub fn render_html(document: &ResumeDocument, mode: HtmlMode) -> String {
    let preview = mode == HtmlMode::Preview;
    let mut out = String::with_capacity(4096);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str(&format!(
        "<title>{}</title>\n<style>{STYLE}</style>\n</head>\n<body>\n<main>\n",
        escape_html(display_name(document, true))
    ));

    out.push_str("<header>\n");
    out.push_str(&format!("<h1>{}</h1>\n", escape_html(display_name(document, preview))));
    let contacts = contact_items(document, !preview);
    if !contacts.is_empty() {
        let joined = contacts
            .iter()
            .map(|c| format!("<span>{}</span>", escape_html(c)))
            .collect::<Vec<_>>()
            .join(" | ");
        out.push_str(&format!("<div class=\"contact\">{joined}</div>\n"));
    }
    out.push_str("</header>\n");

    if !document.summary.is_empty() {
        out.push_str(&format!(
            "<section>\n<h2>{SUMMARY_TITLE}</h2>\n<p class=\"text\">{}</p>\n</section>\n",
            escape_html(&document.summary)
        ));
    }

    if !document.experience.is_empty() {
        out.push_str(&format!("<section>\n<h2>{EXPERIENCE_TITLE}</h2>\n"));
        for exp in &document.experience {
            out.push_str(&format!(
                "<article>\n<div class=\"row\"><h3>{}</h3><span class=\"dates\">{}</span></div>\n\
                 <div class=\"org\">{}</div>\n<p class=\"text\">{}</p>\n</article>\n",
                escape_html(&exp.role),
                escape_html(&date_range(&exp.start_date, &exp.end_date)),
                escape_html(&exp.company),
                escape_html(&exp.description)
            ));
        }
        out.push_str("</section>\n");
    }

    if !document.education.is_empty() {
        out.push_str(&format!("<section>\n<h2>{EDUCATION_TITLE}</h2>\n"));
        for edu in &document.education {
            out.push_str(&format!(
                "<article>\n<div class=\"row\"><h3>{}</h3><span class=\"dates\">{}</span></div>\n\
                 <div>{}</div>\n</article>\n",
                escape_html(&edu.school),
                escape_html(&date_range(&edu.start_date, &edu.end_date)),
                escape_html(&edu.degree)
            ));
        }
        out.push_str("</section>\n");
    }

    if !document.skills.is_empty() {
        out.push_str(&format!(
            "<section>\n<h2>{SKILLS_TITLE}</h2>\n<p>{}</p>\n</section>\n",
            escape_html(&document.skills)
        ));
    }

    out.push_str("</main>\n</body>\n</html>\n");
    out
}
