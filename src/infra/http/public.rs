use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, RawQuery, State},
    http::{
        HeaderValue, StatusCode,
        header::{CONTENT_LOCATION, LOCATION},
    },
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use tracing::debug;

use crate::application::{
    blog::BlogService,
    error::HttpError,
    url_state::{LISTING_PATH, listing_url},
};

use super::middleware::{log_responses, set_request_context};

#[derive(Clone)]
pub struct HttpState {
    pub blog: Arc<BlogService>,
}

pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/blog", get(blog_index))
        .route("/blog/tags", get(tag_index))
        .route("/blog/{slug}", get(post_detail))
        .route("/_health", get(health))
        .fallback(fallback)
        .with_state(state)
        .layer(middleware::from_fn(log_responses))
        .layer(middleware::from_fn(set_request_context))
}

async fn blog_index(
    State(state): State<HttpState>,
    RawQuery(query): RawQuery,
) -> Result<Response, HttpError> {
    let listing = state.blog.browse(query.as_deref().unwrap_or(""))?;

    let location = HeaderValue::from_str(&listing_url(&listing.query)).map_err(|err| {
        HttpError::from_error(
            "infra::http::public::blog_index",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            &err,
        )
    })?;

    let mut response = Json(listing).into_response();
    response.headers_mut().insert(CONTENT_LOCATION, location);
    Ok(response)
}

async fn tag_index(State(state): State<HttpState>) -> Result<Response, HttpError> {
    let groups = state.blog.tag_groups()?;
    Ok(Json(groups).into_response())
}

async fn post_detail(
    State(state): State<HttpState>,
    Path(slug): Path<String>,
) -> Result<Response, HttpError> {
    match state.blog.get_by_slug(&slug)? {
        Some(post) => Ok(Json(post).into_response()),
        None => {
            debug!(
                target = "folio::http::public",
                slug = %slug,
                "post not found, redirecting to listing"
            );
            Ok((StatusCode::FOUND, [(LOCATION, LISTING_PATH)]).into_response())
        }
    }
}

async fn health() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn fallback() -> HttpError {
    HttpError::new(
        "infra::http::public::fallback",
        StatusCode::NOT_FOUND,
        "Not found",
        "no route matched",
    )
}
