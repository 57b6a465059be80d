//! Development server rendering every page on request

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::ContentPipeline;
use crate::feed::Tab;
use crate::generator::{is_safe_segment, slug_conflict, Site};
use crate::source::ContentSource;
use crate::Garden;

/// Server state shared by every request; read-only
pub struct ServerState {
    garden: Garden,
    source: Box<dyn ContentSource>,
    pipeline: ContentPipeline,
}

impl ServerState {
    pub fn new(garden: Garden, source: Box<dyn ContentSource>) -> Self {
        let pipeline = garden.pipeline();
        Self {
            garden,
            source,
            pipeline,
        }
    }
}

/// Which page a request asks for
enum PageRequest {
    Feed(Tab),
    Post(String),
    Topic(String),
}

#[derive(Debug, Deserialize)]
struct FeedQuery {
    tab: Option<String>,
}

/// Build the router; static files come from the site's static directory
pub fn router(state: Arc<ServerState>) -> Router {
    let assets = ServeDir::new(&state.garden.static_dir);

    Router::new()
        .route("/", get(feed_handler))
        .route("/topics", get(topics_handler))
        .route("/topics/", get(topics_handler))
        .route("/topics/:name", get(topic_handler))
        .route("/:slug", get(post_handler))
        .route("/:slug/", get(post_handler))
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the development server
pub async fn start(garden: &Garden, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(ServerState::new(garden.clone(), garden.content_source()));
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Pages are rendered on every request. Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn feed_handler(
    State(state): State<Arc<ServerState>>,
    Query(query): Query<FeedQuery>,
) -> Response {
    let tab = match query.tab.as_deref().map(str::parse::<Tab>).transpose() {
        Ok(tab) => tab.unwrap_or_default(),
        Err(message) => return (StatusCode::BAD_REQUEST, message).into_response(),
    };
    render(state, PageRequest::Feed(tab)).await
}

async fn topics_handler(State(state): State<Arc<ServerState>>) -> Response {
    render(state, PageRequest::Feed(Tab::Topics)).await
}

async fn topic_handler(
    State(state): State<Arc<ServerState>>,
    Path(name): Path<String>,
) -> Response {
    render(state, PageRequest::Topic(name)).await
}

async fn post_handler(
    State(state): State<Arc<ServerState>>,
    Path(slug): Path<String>,
    request: Request<Body>,
) -> Response {
    // Same precedence as the generator: static entries such as
    // /favicon.ico own their path, anything else may be a post
    match slug_conflict(&state.garden.static_dir, &slug) {
        Some(_) if is_safe_segment(&slug) => serve_static(&state, request).await,
        Some(_) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        None => render(state, PageRequest::Post(slug)).await,
    }
}

async fn serve_static(state: &ServerState, request: Request<Body>) -> Response {
    let mut service = ServeDir::new(&state.garden.static_dir);
    match service.try_call(request).await {
        Ok(response) => response.into_response(),
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response(),
    }
}

/// Fetch and render off the async runtime; sources read files
async fn render(state: Arc<ServerState>, request: PageRequest) -> Response {
    let result = tokio::task::spawn_blocking(move || render_page(&state, request)).await;

    match result {
        Ok(Ok(Some(html))) => Html(html).into_response(),
        Ok(Ok(None)) => (StatusCode::NOT_FOUND, "Not found").into_response(),
        Ok(Err(e)) => {
            tracing::error!("Render failed: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
        Err(e) => {
            tracing::error!("Render task failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}

fn render_page(state: &ServerState, request: PageRequest) -> Result<Option<String>> {
    let posts = state.source.fetch_posts()?;
    let site = Site::new(&state.garden.config, &posts);

    Ok(match request {
        PageRequest::Feed(tab) => Some(site.feed_page(tab)),
        PageRequest::Post(slug) => site.post_page(&state.pipeline, &slug),
        PageRequest::Topic(name) => site.topic_page(&name),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::content::Post;
    use crate::source::MemorySource;
    use axum::body::to_bytes;
    use chrono::Utc;
    use tower::ServiceExt;

    fn test_router_in(dir: &std::path::Path) -> Router {
        let garden = Garden::with_config(dir, SiteConfig::default());
        let posts = vec![
            Post::new("1", "Alpha", Utc::now())
                .with_tags(["Rust"])
                .with_content("See [[Beta|the second]]"),
            Post::new("2", "Beta", Utc::now()).with_content("# Beta"),
            Post::new("3", "Release", Utc::now())
                .with_slug("v1.0")
                .with_content("First release"),
            Post::new("4", "Robots", Utc::now())
                .with_slug("robots.txt")
                .with_content("Not the robots file"),
        ];
        let state = ServerState::new(garden, Box::new(MemorySource::new(posts)));
        router(Arc::new(state))
    }

    fn test_router() -> Router {
        test_router_in(&std::env::temp_dir().join("garden-rs-server-test"))
    }

    async fn fetch_from(app: Router, uri: &str) -> (StatusCode, String) {
        let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let body = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }

    async fn fetch(uri: &str) -> (StatusCode, String) {
        fetch_from(test_router(), uri).await
    }

    #[tokio::test]
    async fn post_page_resolves_links() {
        let (status, body) = fetch("/alpha").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(
            r#"<a href="/beta" class="wiki-link" data-slug="beta">the second</a>"#
        ));
    }

    #[tokio::test]
    async fn unknown_post_returns_404() {
        let (status, _) = fetch("/ghost").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn feed_tabs() {
        let (status, body) = fetch("/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("blog-card"));

        let (status, body) = fetch("/?tab=topics").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("topic-card"));

        let (status, _) = fetch("/?tab=archive").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_static_file_returns_404() {
        let (status, _) = fetch("/favicon.ico").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn dotted_slug_renders_post() {
        let (status, body) = fetch("/v1.0").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("First release"));
    }

    #[tokio::test]
    async fn static_file_wins_over_post() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("static")).unwrap();
        std::fs::write(dir.path().join("static").join("robots.txt"), "User-agent: *").unwrap();

        let (status, body) = fetch_from(test_router_in(dir.path()), "/robots.txt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "User-agent: *");

        let (status, body) = fetch_from(test_router_in(dir.path()), "/v1.0").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("First release"));
    }

    #[tokio::test]
    async fn topic_page() {
        let (status, body) = fetch("/topics/rust").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains(r#"href="/alpha""#));

        let (status, _) = fetch("/topics/go").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
