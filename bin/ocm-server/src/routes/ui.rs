//! HTML front end: the public gallery and the session-cookie admin panel.
//!
//! Mutating forms post to `/ui/*` and answer with a redirect, so a browser
//! refresh never resubmits.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::{get, post};
use axum::{Form, Router};
use minijinja::context;
use ocm_types::{Category, CategoryFilter, DEFAULT_DOWNLOAD_URL, NewMaterial, filter_materials};
use strum::IntoEnumIterator;
use tracing::{debug, info};

use super::admin::describe::draft_description;
use super::v1::materials::category_labels;
use crate::entities::StoreError;
use crate::error::ServerError;
use crate::middleware::auth::{SESSION_COOKIE, is_admin, session_token};
use crate::schemas::admin::session::LoginRequest;
use crate::schemas::v1::materials::MaterialQuery;
use crate::state::AppState;

const TITLE_REQUIRED_NOTICE: &str = "Enter a title first.";

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(gallery))
        .route("/manage", get(manage))
        .route("/ui/login", post(login))
        .route("/ui/logout", post(logout))
        .route("/ui/materials", post(create))
        .route("/ui/materials/{id}/delete", post(delete))
        .route("/ui/materials/{id}/download", post(download))
        .route("/ui/describe", post(describe))
}

fn render_login(state: &AppState, error: Option<&str>) -> Result<String, ServerError> {
    Ok(state.views.render("login.html", context! { error })?)
}

async fn render_admin(
    state: &AppState,
    form: &NewMaterial,
    notice: Option<&str>,
) -> Result<String, ServerError> {
    let materials = state.materials.load().await?;
    let all_categories: Vec<String> = Category::iter().map(|c| c.to_string()).collect();
    Ok(state.views.render(
        "admin.html",
        context! { materials, all_categories, form, notice },
    )?)
}

async fn gallery(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MaterialQuery>,
) -> Result<Html<String>, ServerError> {
    let filter = query
        .category
        .as_deref()
        .unwrap_or_default()
        .parse::<CategoryFilter>()
        .unwrap_or_else(|e| {
            debug!(error = %e, "ignoring category filter");
            CategoryFilter::All
        });
    let q = query.q.unwrap_or_default();

    let all = state.materials.load().await?;
    let materials = filter_materials(&all, &q, filter);

    let html = state.views.render(
        "gallery.html",
        context! {
            materials,
            categories => category_labels(&all),
            selected => filter.to_string(),
            q,
            total => all.len(),
        },
    )?;
    Ok(Html(html))
}

async fn manage(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Html<String>, ServerError> {
    if !is_admin(&state, &headers) {
        return render_login(&state, None).map(Html);
    }
    render_admin(&state, &NewMaterial::default(), None)
        .await
        .map(Html)
}

async fn login(
    State(state): State<Arc<AppState>>,
    Form(req): Form<LoginRequest>,
) -> Result<Response, ServerError> {
    match state.gate.login(&req.username, &req.password) {
        Ok(token) => {
            let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
            Ok(([(header::SET_COOKIE, cookie)], Redirect::to("/manage")).into_response())
        }
        Err(e) => {
            let html = render_login(&state, Some(&e.to_string()))?;
            Ok((StatusCode::UNAUTHORIZED, Html(html)).into_response())
        }
    }
}

async fn logout(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.gate.logout(token);
    }
    let cookie = format!("{SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    ([(header::SET_COOKIE, cookie)], Redirect::to("/")).into_response()
}

async fn create(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(form): Form<NewMaterial>,
) -> Result<Response, ServerError> {
    if !is_admin(&state, &headers) {
        return Ok(Redirect::to("/manage").into_response());
    }
    if let Err(e) = form.validate() {
        let html = render_admin(&state, &form, Some(&e.to_string())).await?;
        return Ok((StatusCode::BAD_REQUEST, Html(html)).into_response());
    }

    let record = form.clone().into_record((state.clock)());
    match state.materials.insert(record).await {
        Ok(_) => {
            info!(title = %form.title, "material published");
            Ok(Redirect::to("/").into_response())
        }
        Err(StoreError::DuplicateId(id)) => {
            let notice = format!("A material with id {id} already exists, please submit again.");
            let html = render_admin(&state, &form, Some(&notice)).await?;
            Ok((StatusCode::CONFLICT, Html(html)).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

async fn delete(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Redirect, ServerError> {
    if is_admin(&state, &headers) {
        state.materials.delete(&id).await?;
    }
    Ok(Redirect::to("/manage"))
}

async fn download(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Redirect, ServerError> {
    let record = state
        .materials
        .increment_downloads(&id)
        .await?
        .into_iter()
        .find(|m| m.id == id)
        .ok_or_else(|| ServerError::NotFound(format!("material '{id}' not found")))?;

    match record.download_url.trim() {
        "" | DEFAULT_DOWNLOAD_URL => Ok(Redirect::to("/")),
        url => Ok(Redirect::to(url)),
    }
}

/// Fill the description field of the admin form and show it again.
async fn describe(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Form(mut form): Form<NewMaterial>,
) -> Result<Response, ServerError> {
    if !is_admin(&state, &headers) {
        return Ok(Redirect::to("/manage").into_response());
    }

    let title = form.title.trim().to_owned();
    let notice = if title.is_empty() {
        Some(TITLE_REQUIRED_NOTICE)
    } else {
        let drafted = draft_description(state.describer.as_ref(), &title, form.category).await;
        form.description = drafted.description;
        None
    };

    let html = render_admin(&state, &form, notice).await?;
    Ok(Html(html).into_response())
}
