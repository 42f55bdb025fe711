//! HTTP server and page handlers
//!
//! Everything here is a thin presenter: handlers ask the cache for the
//! current posts and render whatever comes back. Only invalid or unknown
//! post names surface to the client, and never as a server fault.

use anyhow::Result;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tera::Context;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::cache::{LookupError, PostCache};
use crate::config::SiteConfig;
use crate::source::GithubClient;
use crate::templates::TemplateRenderer;

/// Shared server state
pub struct AppState {
    pub config: SiteConfig,
    pub cache: PostCache<GithubClient>,
    pub templates: TemplateRenderer,
}

/// Start the site server
pub async fn start(state: AppState, ip: &str, port: u16) -> Result<()> {
    let app = router(Arc::new(state));

    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    tracing::info!("server running at http://{}:{}", ip, port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/services", get(services))
        .route("/projects", get(projects))
        .route("/contact", get(contact))
        .route("/insights", get(insights_index))
        .route("/insights/:filename", get(insight_detail))
        .route_service("/robots.txt", ServeFile::new("static/robots.txt"))
        .route_service("/sitemap.xml", ServeFile::new("static/sitemap.xml"))
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn home(State(state): State<Arc<AppState>>) -> Response {
    render_page(&state, "home.html")
}

async fn about(State(state): State<Arc<AppState>>) -> Response {
    render_page(&state, "about.html")
}

async fn services(State(state): State<Arc<AppState>>) -> Response {
    render_page(&state, "services.html")
}

async fn projects(State(state): State<Arc<AppState>>) -> Response {
    render_page(&state, "projects.html")
}

async fn contact(State(state): State<Arc<AppState>>) -> Response {
    render_page(&state, "contact.html")
}

/// Insights index: current snapshot, newest first
async fn insights_index(State(state): State<Arc<AppState>>) -> Response {
    let posts = state.cache.snapshot().await;

    let mut context = base_context(&state);
    context.insert("posts", &posts);
    render(&state, "insights.html", &context, StatusCode::OK)
}

/// Single insight view
async fn insight_detail(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Response {
    match state.cache.get(&filename).await {
        Ok(post) => {
            let mut context = base_context(&state);
            context.insert("post", &post);
            render(&state, "insight.html", &context, StatusCode::OK)
        }
        Err(LookupError::InvalidKey) => {
            (StatusCode::BAD_REQUEST, "invalid post name").into_response()
        }
        Err(LookupError::NotFound) => {
            let context = base_context(&state);
            render(&state, "not_found.html", &context, StatusCode::NOT_FOUND)
        }
    }
}

fn base_context(state: &AppState) -> Context {
    let mut context = Context::new();
    context.insert("site", &state.config);
    context
}

fn render_page(state: &AppState, template: &str) -> Response {
    let context = base_context(state);
    render(state, template, &context, StatusCode::OK)
}

fn render(state: &AppState, template: &str, context: &Context, status: StatusCode) -> Response {
    match state.templates.render(template, context) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(template, "template rendering failed: {}", err);
            (StatusCode::INTERNAL_SERVER_ERROR, "template error").into_response()
        }
    }
}
