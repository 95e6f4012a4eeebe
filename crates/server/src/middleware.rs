use std::net::{IpAddr, SocketAddr};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::Method;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{debug, info_span, Instrument};

use crate::errors::ApiError;
use crate::state::AppState;

/// Middleware: reject every POST while the service runs read-only.
pub async fn read_only_guard(State(state): State<AppState>, req: Request, next: Next) -> Response {
    if state.read_only && req.method() == Method::POST {
        debug!(path = %req.uri().path(), "POST rejected in read-only mode");
        return ApiError::ReadOnly.into_response();
    }
    next.run(req).await
}

/// Middleware: resolve the client address and attach it to the request span.
///
/// `X-Forwarded-For` is only honoured when the TCP peer is a trusted proxy.
pub async fn client_ip(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let forwarded = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|v| v.to_str().ok());

    let Some(ip) = peer.map(|p| resolve_client_ip(p, forwarded, &state.trusted_proxies)) else {
        return next.run(req).await;
    };
    next.run(req).instrument(info_span!("client", client_ip = %ip)).await
}

/// Right-most untrusted hop of `X-Forwarded-For` when `peer` is trusted,
/// otherwise `peer` itself.
pub fn resolve_client_ip(peer: IpAddr, forwarded_for: Option<&str>, trusted: &[IpAddr]) -> IpAddr {
    if !trusted.contains(&peer) {
        return peer;
    }
    let Some(header) = forwarded_for else {
        return peer;
    };
    let hops: Vec<IpAddr> = header
        .split(',')
        .filter_map(|h| h.trim().parse::<IpAddr>().ok())
        .collect();
    hops.iter()
        .rev()
        .find(|ip| !trusted.contains(ip))
        .or_else(|| hops.first())
        .copied()
        .unwrap_or(peer)
}
