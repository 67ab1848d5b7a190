//! HTTP surface: JSON and RSS routes for each news source.
//!
//! | Route | Response |
//! |-------|----------|
//! | `GET /{source}/scrape` | JSON array of article records |
//! | `GET /{source}/rss` | RSS 2.0 document |
//!
//! `{source}` is `finance` (alias `money`) or `global`; anything else is 404.
//! Every request scrapes live. Upstream failures show up as an empty array or
//! an empty channel, never as an error status.
//!
//! Unless remote access is enabled, requests from non-loopback peers are
//! rejected with 403 before any scraping happens.

use crate::models::ArticleRecord;
use crate::outputs::rss::{RSS_CONTENT_TYPE, render_feed};
use crate::scrapers::scrape_news;
use crate::sites::{SiteConfig, Source};
use axum::extract::{ConnectInfo, Path, Request, State};
use axum::http::{StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use reqwest::Client;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, instrument, warn};

/// Shared, read-only state for all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: Client,
    /// Article fetches in flight per request; `1` is sequential.
    pub concurrency: usize,
    pub allow_remote: bool,
    pub finance: SiteConfig,
    pub global: SiteConfig,
}

impl AppState {
    pub fn new(client: Client, concurrency: usize, allow_remote: bool) -> Self {
        Self {
            client,
            concurrency,
            allow_remote,
            finance: Source::Finance.site(),
            global: Source::Global.site(),
        }
    }

    pub fn site(&self, source: Source) -> &SiteConfig {
        match source {
            Source::Finance => &self.finance,
            Source::Global => &self.global,
        }
    }
}

/// Whether a peer may use the service.
pub fn peer_allowed(peer: &SocketAddr, allow_remote: bool) -> bool {
    allow_remote || peer.ip().is_loopback()
}

async fn local_only(
    State(state): State<Arc<AppState>>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if !peer_allowed(&peer, state.allow_remote) {
        warn!(%peer, path = %request.uri().path(), "Rejected non-local request");
        return StatusCode::FORBIDDEN.into_response();
    }
    next.run(request).await
}

#[instrument(level = "info", skip(state))]
async fn scrape(
    State(state): State<Arc<AppState>>,
    Path(source): Path<String>,
) -> Result<Json<Vec<ArticleRecord>>, StatusCode> {
    let source: Source = source.parse().map_err(|_| StatusCode::NOT_FOUND)?;
    let records = scrape_news(&state.client, state.site(source), state.concurrency).await;
    info!(%source, count = records.len(), "Serving scrape results");
    Ok(Json(records))
}

#[instrument(level = "info", skip(state))]
async fn rss(State(state): State<Arc<AppState>>, Path(source): Path<String>) -> Response {
    let Ok(source) = source.parse::<Source>() else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let site = state.site(source);
    let records = scrape_news(&state.client, site, state.concurrency).await;

    match render_feed(&site.channel, &records, Utc::now()) {
        Ok(xml) => {
            info!(%source, count = records.len(), bytes = xml.len(), "Serving RSS feed");
            ([(header::CONTENT_TYPE, RSS_CONTENT_TYPE)], xml).into_response()
        }
        Err(e) => {
            error!(%source, error = %e, "Failed to render RSS feed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Build the router with the access guard applied to every route.
pub fn router(state: AppState) -> Router {
    let state = Arc::new(state);
    Router::new()
        .route("/{source}/scrape", get(scrape))
        .route("/{source}/rss", get(rss))
        .layer(middleware::from_fn_with_state(state.clone(), local_only))
        .with_state(state)
}

/// Serve until the listener fails.
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app).await
}
