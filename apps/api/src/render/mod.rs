// Read-only projections of the live document: the editor form, the on-screen
// preview and the print/export view. None holds state; all render from the store.

pub mod editor;
pub mod plain_text;
pub mod preview;

use crate::models::resume::ResumeDocument;

pub use editor::render_editor;
pub use plain_text::render_plain_text;
pub use preview::{render_html, HtmlMode};

const NAME_PLACEHOLDER: &str = "Your Name";

/// Section headings in render order.
pub const SUMMARY_TITLE: &str = "Professional Summary";
pub const EXPERIENCE_TITLE: &str = "Professional Experience";
pub const EDUCATION_TITLE: &str = "Education";
pub const SKILLS_TITLE: &str = "Skills";

/// Header line: the name, or a placeholder while editing.
pub fn display_name(document: &ResumeDocument, placeholder: bool) -> &str {
    if document.full_name.is_empty() && placeholder {
        NAME_PLACEHOLDER
    } else {
        &document.full_name
    }
}

/// Non-empty contact items in `email | phone | linkedin` order.
pub fn contact_items(document: &ResumeDocument, compact_links: bool) -> Vec<String> {
    let linkedin = if compact_links {
        compact_url(&document.linkedin)
    } else {
        document.linkedin.clone()
    };
    [document.email.clone(), document.phone.clone(), linkedin]
        .into_iter()
        .filter(|item| !item.is_empty())
        .collect()
}

/// `https://www.linkedin.com/in/jane/` → `linkedin.com/in/jane`.
pub fn compact_url(url: &str) -> String {
    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let rest = rest.strip_prefix("www.").unwrap_or(rest);
    rest.strip_suffix('/').unwrap_or(rest).to_string()
}

/// `start - end`, as typed.
pub fn date_range(start: &str, end: &str) -> String {
    format!("{start} - {end}")
}

/// Escapes text for element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
