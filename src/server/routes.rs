// src/server/routes.rs
// =============================================================================
// HTTP endpoints.
//
//   GET /          combined script for every configured wiki page
//   GET /bash      same as /
//   GET /fetch     one page: ?type=github&owner=..&repo=..&page=Home
//   anything else  404
//   non-GET        405 (checked before routing)
//
// Every response is text/plain with a permissive CORS header.
// =============================================================================

use super::AppState;
use crate::config::parse_wiki_pages;
use crate::pipeline::{aggregate, single};
use axum::extract::{Query, Request, State};
use axum::http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CACHE_CONTROL, CONTENT_TYPE};
use axum::http::{Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, warn};

pub const MISSING_PARAMS: &str = "Missing required parameters: owner and repo";

// Query string of /fetch. Empty values count as missing.
#[derive(Debug, Deserialize)]
pub struct FetchQuery {
    #[serde(rename = "type")]
    provider: Option<String>,
    owner: Option<String>,
    repo: Option<String>,
    page: Option<String>,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(bash))
        .route("/bash", get(bash))
        .route("/fetch", get(fetch))
        .fallback(not_found)
        .layer(middleware::from_fn(require_get))
        .with_state(state)
}

async fn bash(State(state): State<Arc<AppState>>) -> Response {
    let configs = match parse_wiki_pages(&state.wiki_pages) {
        Ok(configs) => configs,
        Err(e) => {
            error!("{}", e);
            return text_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    // Page failures are already inline in the text, so this is always a 200
    let report = aggregate::run(&state.fetcher, &configs, &state.exclude_prefixes).await;
    text_response(StatusCode::OK, report.text)
}

async fn fetch(State(state): State<Arc<AppState>>, Query(query): Query<FetchQuery>) -> Response {
    let (Some(owner), Some(repo)) = (non_empty(query.owner), non_empty(query.repo)) else {
        return text_response(StatusCode::BAD_REQUEST, MISSING_PARAMS);
    };
    let provider = non_empty(query.provider).unwrap_or_else(|| "github".to_string());
    let page = non_empty(query.page).unwrap_or_else(|| "Home".to_string());

    match single::run(
        &state.fetcher,
        &provider,
        &owner,
        &repo,
        &page,
        &state.exclude_prefixes,
    )
    .await
    {
        Ok(text) => text_response(StatusCode::OK, text),
        Err(e) => {
            warn!("Fetching {}/{}/{} failed: {}", owner, repo, page, e);
            text_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

async fn not_found() -> Response {
    text_response(StatusCode::NOT_FOUND, "Not Found")
}

async fn require_get(request: Request, next: Next) -> Response {
    if request.method() != Method::GET {
        return text_response(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
    }
    next.run(request).await
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// Plain-text response with our standard headers.
// Only successful responses may be cached.
fn text_response(status: StatusCode, body: impl Into<String>) -> Response {
    let cache = if status.is_success() {
        "public, max-age=300"
    } else {
        "no-store"
    };

    (
        status,
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8"),
            (CACHE_CONTROL, cache),
            (ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
        ],
        body.into(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wiki::{WikiFetcher, WikiHosts};
    use axum::body::{to_bytes, Body};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(base: &str, wiki_pages: &str, exclude_prefixes: &[&str]) -> Router {
        let fetcher = WikiFetcher::new(WikiHosts::from_base(base).unwrap(), None).unwrap();
        router(Arc::new(AppState {
            fetcher,
            wiki_pages: wiki_pages.to_string(),
            exclude_prefixes: exclude_prefixes.iter().map(|p| p.to_string()).collect(),
        }))
    }

    async fn send(app: Router, method: Method, uri: &str) -> (StatusCode, Response) {
        let request = axum::http::Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        (response.status(), response)
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_bash_with_empty_config() {
        let (status, response) = send(app("http://127.0.0.1:9", "[]", &[]), Method::GET, "/").await;
        assert_eq!(status, StatusCode::OK);
        let headers = response.headers();
        assert_eq!(headers[CONTENT_TYPE], "text/plain; charset=utf-8");
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(headers[CACHE_CONTROL], "public, max-age=300");
        assert_eq!(body_text(response).await, "");
    }

    #[tokio::test]
    async fn test_bash_with_malformed_config() {
        let (status, response) =
            send(app("http://127.0.0.1:9", "not json", &[]), Method::GET, "/bash").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body_text(response)
            .await
            .starts_with("Invalid wiki page configuration"));
    }

    #[tokio::test]
    async fn test_bash_aggregates_pages() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/group/proj/-/wikis/Install.md"))
            .respond_with(
                ResponseTemplate::new(200).set_body_string("```bash\nsudo make install\nmake\n```"),
            )
            .mount(&server)
            .await;

        let pages = r#"[{"type": "gitlab", "owner": "group", "repo": "proj", "pages": ["Install"]}]"#;
        let (status, response) =
            send(app(&server.uri(), pages, &["sudo"]), Method::GET, "/bash").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body_text(response).await,
            "# === Source: group/proj/Install ===\nmake\n"
        );
    }

    #[tokio::test]
    async fn test_fetch_requires_owner_and_repo() {
        let app = app("http://127.0.0.1:9", "[]", &[]);

        let (status, response) = send(app.clone(), Method::GET, "/fetch?owner=user").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body_text(response).await, MISSING_PARAMS);

        let (status, _) = send(app, Method::GET, "/fetch?owner=&repo=r").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fetch_defaults_to_github_home() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/user/repo/Home.md"))
            .respond_with(ResponseTemplate::new(200).set_body_string("```sh\necho home\n```"))
            .expect(1)
            .mount(&server)
            .await;

        let (status, response) = send(
            app(&server.uri(), "[]", &[]),
            Method::GET,
            "/fetch?owner=user&repo=repo",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body_text(response).await, "echo home");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_500() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let (status, response) = send(
            app(&server.uri(), "[]", &[]),
            Method::GET,
            "/fetch?type=gitlab&owner=user&repo=repo&page=Nope",
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[CACHE_CONTROL], "no-store");
        assert_eq!(body_text(response).await, "Failed to fetch: 404 Not Found");
    }

    #[tokio::test]
    async fn test_unknown_path_is_404() {
        let (status, _) = send(app("http://127.0.0.1:9", "[]", &[]), Method::GET, "/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_non_get_is_405() {
        let app = app("http://127.0.0.1:9", "[]", &[]);

        let (status, _) = send(app.clone(), Method::POST, "/bash").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

        let (status, _) = send(app, Method::DELETE, "/nope").await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }
}
