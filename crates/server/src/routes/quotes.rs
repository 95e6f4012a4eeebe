use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use service::{NewQuote, NextQuote, Quote};

use crate::errors::ApiError;
use crate::state::AppState;

/// Cookie carrying the position of the next quote to serve.
pub const CURSOR_COOKIE: &str = "quoteIndex";
const CURSOR_MAX_AGE_DAYS: i64 = 30;

pub async fn list_quotes(State(state): State<AppState>) -> Json<Vec<Quote>> {
    Json(state.store.list().await)
}

pub async fn random_quote(State(state): State<AppState>) -> Result<Json<Quote>, ApiError> {
    Ok(Json(state.store.random().await?))
}

pub async fn quote_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Quote>, ApiError> {
    Ok(Json(state.store.get_by_id(&id).await?))
}

/// Serve the quote at the cookie's position and hand back the following one.
pub async fn next_quote(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<NextQuote>), ApiError> {
    let start = cursor_from(&jar);
    let next = state.store.next_in_cycle(start).await?;
    let cookie = Cookie::build((CURSOR_COOKIE, next.next_index.to_string()))
        .path("/")
        .max_age(time::Duration::days(CURSOR_MAX_AGE_DAYS))
        .http_only(false)
        .secure(false);
    Ok((jar.add(cookie), Json(next)))
}

/// Non-negative integer from the cursor cookie; anything else means "start over".
fn cursor_from(jar: &CookieJar) -> Option<usize> {
    jar.get(CURSOR_COOKIE)
        .and_then(|c| c.value().trim().parse::<usize>().ok())
}

pub async fn create_quote(
    State(state): State<AppState>,
    payload: Result<Json<NewQuote>, JsonRejection>,
) -> Result<(StatusCode, Json<Quote>), ApiError> {
    let Json(input) = payload?;
    let created = state.store.append(input.quote).await;
    Ok((StatusCode::CREATED, Json(created)))
}
