use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::resume::{EntryField, EntryKind, ResumeDocument, TextField};
use crate::render::{render_editor, render_html, render_plain_text, HtmlMode};
use crate::resume::merge::merge_over_default;
use crate::resume::store::DocumentStore;
use crate::resume::transfer::{
    export_file_name, export_json, parse_import, preview_import, ImportPreview,
};
use crate::resume::validation::{validate, ErrorMap, ValidationResult};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResumeResponse {
    pub document: ResumeDocument,
    pub errors: ErrorMap,
    pub ready: bool,
}

impl From<&DocumentStore> for ResumeResponse {
    fn from(store: &DocumentStore) -> Self {
        Self {
            document: store.document().clone(),
            errors: store.errors().clone(),
            ready: store.is_ready(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FieldUpdate {
    pub value: String,
}

#[derive(Debug, Deserialize)]
pub struct EntryUpdate {
    pub field: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct EntryCreated {
    pub id: String,
    pub document: ResumeDocument,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConfirmQuery {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrintFormat {
    #[default]
    Html,
    Text,
}

#[derive(Debug, Default, Deserialize)]
pub struct PrintQuery {
    #[serde(default)]
    pub format: PrintFormat,
}

fn parse_section(section: &str) -> Result<EntryKind, AppError> {
    EntryKind::parse(section).ok_or_else(|| AppError::NotFound(format!("Unknown section '{section}'")))
}

/// GET /api/v1/resume
pub async fn handle_get_resume(State(state): State<AppState>) -> Json<ResumeResponse> {
    Json(ResumeResponse::from(&*state.store()))
}

/// PUT /api/v1/resume
pub async fn handle_replace(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Json<ResumeResponse>, AppError> {
    let document = merge_over_default(&body)
        .ok_or_else(|| AppError::BadRequest("Resume body must be a JSON object".to_string()))?;
    let mut store = state.store();
    store.replace(document);
    Ok(Json(ResumeResponse::from(&*store)))
}

/// PATCH /api/v1/resume/fields/:field
pub async fn handle_update_field(
    State(state): State<AppState>,
    Path(field): Path<String>,
    Json(req): Json<FieldUpdate>,
) -> Result<Json<ResumeResponse>, AppError> {
    let field = TextField::parse(&field)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown field '{field}'")))?;
    let mut store = state.store();
    store.update_field(field, req.value);
    Ok(Json(ResumeResponse::from(&*store)))
}

/// POST /api/v1/resume/:section/entries
pub async fn handle_add_entry(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<(StatusCode, Json<EntryCreated>), AppError> {
    let kind = parse_section(&section)?;
    let mut store = state.store();
    let id = store.add_entry(kind);
    Ok((
        StatusCode::CREATED,
        Json(EntryCreated {
            id,
            document: store.document().clone(),
        }),
    ))
}

/// PATCH /api/v1/resume/:section/entries/:id
pub async fn handle_update_entry(
    State(state): State<AppState>,
    Path((section, id)): Path<(String, String)>,
    Json(req): Json<EntryUpdate>,
) -> Result<Json<ResumeResponse>, AppError> {
    let kind = parse_section(&section)?;
    let field = EntryField::parse(&req.field)
        .filter(|f| kind.accepts(*f))
        .ok_or_else(|| {
            AppError::BadRequest(format!("Unknown {} field '{}'", kind.as_str(), req.field))
        })?;

    let mut store = state.store();
    if !store.update_entry(kind, &id, field, req.value) {
        return Err(AppError::NotFound(format!("No {} entry {id}", kind.as_str())));
    }
    Ok(Json(ResumeResponse::from(&*store)))
}

/// DELETE /api/v1/resume/:section/entries/:id
pub async fn handle_remove_entry(
    State(state): State<AppState>,
    Path((section, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let kind = parse_section(&section)?;
    if !state.store().remove_entry(kind, &id) {
        return Err(AppError::NotFound(format!("No {} entry {id}", kind.as_str())));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/resume/reset?confirm=true
pub async fn handle_reset(
    State(state): State<AppState>,
    Query(params): Query<ConfirmQuery>,
) -> Result<Json<ResumeResponse>, AppError> {
    if !params.confirm {
        return Err(AppError::ConfirmationRequired(
            "Resetting erases all current data; repeat with confirm=true".to_string(),
        ));
    }
    let mut store = state.store();
    store.reset();
    Ok(Json(ResumeResponse::from(&*store)))
}

/// POST /api/v1/resume/validate
pub async fn handle_validate(State(state): State<AppState>) -> Json<ValidationResult> {
    let mut store = state.store();
    let result = validate(store.document(), &state.policy);
    match result.errors() {
        None => store.clear_errors(),
        Some(errors) => store.set_errors(errors.clone()),
    }
    debug!("Validation run: valid={}", result.is_valid());
    Json(result)
}

/// DELETE /api/v1/resume/errors
pub async fn handle_clear_errors(State(state): State<AppState>) -> StatusCode {
    state.store().clear_errors();
    StatusCode::NO_CONTENT
}

/// GET /api/v1/resume/export
pub async fn handle_export(State(state): State<AppState>) -> Result<Response, AppError> {
    let document = state.store().document().clone();
    let body = export_json(&document).map_err(|e| AppError::Internal(e.into()))?;
    let file_name = export_file_name(&document, "json");
    Ok(attachment(body, "application/json", &file_name, "attachment"))
}

/// POST /api/v1/resume/import
pub async fn handle_import_preview(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ImportPreview>, AppError> {
    Ok(Json(preview_import(&body, &state.policy)?))
}

/// POST /api/v1/resume/import/confirm
pub async fn handle_import_confirm(
    State(state): State<AppState>,
    body: String,
) -> Result<Json<ResumeResponse>, AppError> {
    let document = parse_import(&body)?;
    let mut store = state.store();
    store.replace(document);
    store.clear_errors();
    info!(
        "Imported backup ({} experience, {} education entries)",
        store.document().experience.len(),
        store.document().education.len()
    );
    Ok(Json(ResumeResponse::from(&*store)))
}

/// GET /api/v1/resume/editor
pub async fn handle_editor(State(state): State<AppState>) -> Html<String> {
    let store = state.store();
    Html(render_editor(store.document(), store.errors()))
}

/// GET /api/v1/resume/preview
pub async fn handle_preview(State(state): State<AppState>) -> Html<String> {
    Html(render_html(state.store().document(), HtmlMode::Preview))
}

/// POST /api/v1/resume/print?format=html|text
/// Refuses to render until the document validates; the failures become the editor's error map.
pub async fn handle_print(
    State(state): State<AppState>,
    Query(params): Query<PrintQuery>,
) -> Result<Response, AppError> {
    let mut store = state.store();
    let result = validate(store.document(), &state.policy);
    if let ValidationResult::Invalid(errors) = result {
        store.set_errors(errors.clone());
        return Err(AppError::Validation(errors));
    }
    store.clear_errors();

    let document = store.document();
    let response = match params.format {
        PrintFormat::Html => attachment(
            render_html(document, HtmlMode::Print),
            "text/html; charset=utf-8",
            &export_file_name(document, "html"),
            "inline",
        ),
        PrintFormat::Text => attachment(
            render_plain_text(document),
            "text/plain; charset=utf-8",
            &export_file_name(document, "txt"),
            "inline",
        ),
    };
    Ok(response)
}

fn attachment(body: String, content_type: &'static str, file_name: &str, disposition: &str) -> Response {
    let mut response = body.into_response();
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    if let Ok(value) = HeaderValue::from_str(&content_disposition(disposition, file_name)) {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }
    response
}

/// ASCII `filename` fallback plus an RFC 5987 `filename*` for non-ASCII names.
fn content_disposition(disposition: &str, file_name: &str) -> String {
    let ascii: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    if ascii == file_name {
        return format!("{disposition}; filename=\"{file_name}\"");
    }

    let mut encoded = String::with_capacity(file_name.len() * 3);
    for byte in file_name.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'-' | b'_' | b'~') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    format!("{disposition}; filename=\"{ascii}\"; filename*=UTF-8''{encoded}")
}
