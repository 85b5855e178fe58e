use axum::{
    body::Bytes,
    extract::{FromRequest, Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{Html, IntoResponse, Response},
};

use crate::errors::WikiError;
use crate::services::{decode_path, parse_page_path, parse_static_path, LinkService};
use crate::types::{AppState, Operation, Page, Title, View};
use crate::utils::{content_type_for, form_value};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Route every request by its first path segment.
///
/// `/view`, `/edit` and `/save` paths go through the title validator before
/// any handler runs, `/static` paths through the asset validator, and
/// everything else is sent to the front page.
pub async fn handle_request(
    State(state): State<AppState>,
    request: Request,
) -> Result<Response, WikiError> {
    log::info!("Handling {} {}", request.method(), request.uri().path());
    let path = decode_path(request.uri().path())?;

    let first_segment = path.trim_start_matches('/').split('/').next().unwrap_or("");
    match first_segment {
        "view" | "edit" | "save" => {
            let (operation, title) = parse_page_path(&path)?;
            let method = request.method().clone();
            let reads = method == Method::GET || method == Method::HEAD;
            match operation {
                Operation::View if reads => view_page(&state, title),
                Operation::Edit if reads => edit_page(&state, title),
                Operation::Save if method == Method::POST => save_page(&state, title, request).await,
                _ => {
                    log::warn!("{} not allowed for {}", method, operation.as_str());
                    Err(WikiError::MethodNotAllowed)
                }
            }
        }
        "static" => serve_static(&state, &path),
        _ => Ok(handle_root()),
    }
}

/// Redirect to the front page
pub fn handle_root() -> Response {
    redirect(&Operation::View.path_for(&Title::front_page()))
}

fn view_page(state: &AppState, title: Title) -> Result<Response, WikiError> {
    let page = match state.store.load(&title) {
        Ok(page) => page,
        Err(WikiError::NotFound) => {
            log::info!("Page {} does not exist, redirecting to edit", title);
            return Ok(redirect(&Operation::Edit.path_for(&title)));
        }
        Err(e) => return Err(e),
    };
    let body = LinkService::new().render_body(&page.body);
    render(state, View::View, &Page::new(title, body))
}

fn edit_page(state: &AppState, title: Title) -> Result<Response, WikiError> {
    let page = match state.store.load(&title) {
        Ok(page) => page,
        Err(WikiError::NotFound) => {
            log::debug!("Page {} does not exist, editing blank page", title);
            Page::empty(title)
        }
        Err(e) => return Err(e),
    };
    render(state, View::Edit, &page)
}

async fn save_page(state: &AppState, title: Title, request: Request) -> Result<Response, WikiError> {
    if !is_form(request.headers()) {
        log::warn!("Rejected save for {}: not a urlencoded form", title);
        return Err(WikiError::UnsupportedMediaType);
    }
    let form = Bytes::from_request(request, state).await.map_err(|rejection| {
        log::warn!("Rejected save body for {}: {}", title, rejection);
        WikiError::from(rejection)
    })?;
    // Decoded straight to bytes; the stored body is exactly what was submitted
    let body = form_value(&form, "body").unwrap_or_default();
    let page = Page::new(title, body);
    if let Err(e) = state.store.save(&page) {
        log::error!("Failed to save page {}: {}", page.title, e);
        return Err(e);
    }
    Ok(redirect(&Operation::View.path_for(&page.title)))
}

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(FORM_CONTENT_TYPE))
}

fn serve_static(state: &AppState, path: &str) -> Result<Response, WikiError> {
    let asset = parse_static_path(path)?;
    let file = state.static_dir.join(asset.file_name());
    let bytes = std::fs::read(&file).map_err(|e| {
        log::warn!("Static asset {:?} unavailable: {}", file, e);
        WikiError::NotFound
    })?;
    Ok(([(header::CONTENT_TYPE, content_type_for(&asset.extension))], bytes).into_response())
}

fn render(state: &AppState, view: View, page: &Page) -> Result<Response, WikiError> {
    let html = state.renderer.render(view, page).map_err(|e| {
        log::error!("Failed to render {} for {}: {}", view.template_name(), page.title, e);
        e
    })?;
    Ok(Html(html).into_response())
}

fn redirect(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
