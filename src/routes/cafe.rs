//! Cafe route handlers.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::app::{
    cafe_create, cafe_delete, cafe_get, cafe_list, cafe_update, CafeForm, FormErrors, NAME_TAKEN,
};
use crate::error::AppError;
use crate::routes::csrf::{ensure_client, TokenScope};
use crate::routes::view::{self, FormMode};
use crate::routes::AppState;

const LIST_PATH: &str = "/cafes";

/// Body of the per-row delete form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteForm {
    pub csrf_token: String,
}

fn found(location: &'static str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

/// Render the add/edit form with a token bound to this client, setting the
/// client cookie when the request did not carry one.
fn render_form(
    state: &AppState,
    jar: CookieJar,
    mode: FormMode,
    form: &CafeForm,
    errors: &FormErrors,
) -> Response {
    let (jar, client) = ensure_client(jar);
    let token = state.token(TokenScope::Cafe, &client);
    (jar, Html(view::form_page(mode, form, errors, &token))).into_response()
}

pub async fn home() -> Html<String> {
    Html(view::index_page())
}

pub async fn add_form(State(state): State<AppState>, jar: CookieJar) -> Response {
    render_form(&state, jar, FormMode::Add, &CafeForm::default(), &FormErrors::default())
}

pub async fn add_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<CafeForm>,
) -> Result<Response, AppError> {
    state.verify(TokenScope::Cafe, &jar, &form.csrf_token)?;

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => return Ok(render_form(&state, jar, FormMode::Add, &form, &errors)),
    };

    match state.with_store(move |pool| cafe_create(pool, fields)).await {
        Ok(_) => Ok(found(LIST_PATH)),
        Err(AppError::Conflict(_)) => {
            let mut errors = FormErrors::default();
            errors.add("name", NAME_TAKEN);
            Ok(render_form(&state, jar, FormMode::Add, &form, &errors))
        }
        Err(e) => Err(e),
    }
}

pub async fn list(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let cafes = state.with_store(cafe_list).await?;
    let (jar, client) = ensure_client(jar);
    let token = state.token(TokenScope::Delete, &client);
    Ok((jar, Html(view::cafes_page(&cafes, &token))).into_response())
}

pub async fn delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    Form(form): Form<DeleteForm>,
) -> Result<Response, AppError> {
    state.verify(TokenScope::Delete, &jar, &form.csrf_token)?;
    state.with_store(move |pool| cafe_delete(pool, id)).await?;
    Ok(found(LIST_PATH))
}

pub async fn edit_form(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let cafe = state.with_store(move |pool| cafe_get(pool, id)).await?;
    let form = CafeForm::from_cafe(&cafe);
    Ok(render_form(&state, jar, FormMode::Edit(id), &form, &FormErrors::default()))
}

pub async fn edit_submit(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    Form(form): Form<CafeForm>,
) -> Result<Response, AppError> {
    // Missing ids are a 404 before anything else is looked at.
    state.with_store(move |pool| cafe_get(pool, id)).await?;
    state.verify(TokenScope::Cafe, &jar, &form.csrf_token)?;

    let mode = FormMode::Edit(id);
    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(errors) => return Ok(render_form(&state, jar, mode, &form, &errors)),
    };

    match state.with_store(move |pool| cafe_update(pool, id, fields)).await {
        Ok(_) => Ok(found(LIST_PATH)),
        Err(AppError::Conflict(_)) => {
            let mut errors = FormErrors::default();
            errors.add("name", NAME_TAKEN);
            Ok(render_form(&state, jar, mode, &form, &errors))
        }
        Err(e) => Err(e),
    }
}

pub async fn health() -> impl IntoResponse {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

pub async fn not_found() -> AppError {
    AppError::NotFound("route".into())
}
