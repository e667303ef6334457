//! Local development server.
//!
//! The hosting provider will not run its routing locally without
//! production credentials, so this server copies the behaviour of the
//! deployed rewrite rules over the public output directory:
//!
//! 1. paths under the app prefix (`/pipescore`) serve the compiled editor
//!    shell (`/pipescore.html`)
//! 2. `/` serves `/index.html`
//! 3. extension-less paths get `.html` appended (`/about` loads
//!    `/about.html`, as the clean URLs setting does in production)
//! 4. anything else is served as-is
//!
//! Rules are an ordered list, first match wins. Every response carries a
//! cache-disabling header so edits show up on plain reload.
//!
//! Each request is handled independently on its own task; there is no
//! cross-request state.

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::header::{ALLOW, CACHE_CONTROL, CONTENT_TYPE, HeaderValue};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Method, Request, Response, StatusCode};
use hyper_util::rt::TokioIo;
use maud::{DOCTYPE, Markup, html};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServeConfig;

const NO_CACHE: &str = "no-cache, must-revalidate";

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// One path-rewrite rule. Evaluated in order; the first rule that matches
/// decides the served path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rule {
    /// Every path under `prefix` maps to one fixed file.
    Prefix { prefix: String, target: String },
    /// An exact path maps to a fixed file.
    Exact { path: String, target: String },
    /// Paths whose final segment has no `.` get `.html` appended.
    AppendHtml,
}

/// The rule set mirroring the production hosting config.
pub fn routing_rules(config: &ServeConfig) -> Vec<Rule> {
    vec![
        Rule::Prefix {
            prefix: config.app_prefix.clone(),
            target: config.app_file.clone(),
        },
        Rule::Exact {
            path: "/".to_string(),
            target: "/index.html".to_string(),
        },
        Rule::AppendHtml,
    ]
}

/// Apply the first matching rule to a request path.
pub fn rewrite(rules: &[Rule], path: &str) -> String {
    for rule in rules {
        match rule {
            Rule::Prefix { prefix, target } => {
                if path.starts_with(prefix.as_str()) {
                    return target.clone();
                }
            }
            Rule::Exact { path: exact, target } => {
                if path == exact {
                    return target.clone();
                }
            }
            Rule::AppendHtml => {
                let last_segment = path.rsplit('/').next().unwrap_or("");
                if !last_segment.contains('.') {
                    return format!("{path}.html");
                }
            }
        }
    }
    path.to_string()
}

/// Map a rewritten request path to a file under the server root.
///
/// Only plain path segments are accepted; a `..` (or any other special
/// component) gets `None`, so requests cannot escape the root.
fn resolve(root: &Path, path: &str) -> Option<PathBuf> {
    let relative = Path::new(path.trim_start_matches('/'));
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

/// Serve `root` on the local port. Blocks until the process is killed.
pub fn serve(root: PathBuf, config: &ServeConfig, port: u16) -> Result<(), ServeError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(root, routing_rules(config), port))
}

async fn run(root: PathBuf, rules: Vec<Rule>, port: u16) -> Result<(), ServeError> {
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = TcpListener::bind(addr).await?;
    println!("Serving on http://{addr}");

    let root = Arc::new(root);
    let rules = Arc::new(rules);

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let root = root.clone();
        let rules = rules.clone();

        tokio::task::spawn(async move {
            let service =
                service_fn(move |req| handle(req, root.clone(), rules.clone()));
            if let Err(err) = http1::Builder::new().serve_connection(io, service).await {
                eprintln!("Connection error: {err}");
            }
        });
    }
}

async fn handle(
    req: Request<Incoming>,
    root: Arc<PathBuf>,
    rules: Arc<Vec<Rule>>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    if req.method() != Method::GET {
        let mut res = response(
            StatusCode::METHOD_NOT_ALLOWED,
            "text/plain",
            Bytes::from_static(b"method not allowed"),
        );
        res.headers_mut().insert(ALLOW, HeaderValue::from_static("GET"));
        return Ok(res);
    }

    let rewritten = rewrite(&rules, req.uri().path());
    let Some(file) = resolve(&root, &rewritten) else {
        return Ok(not_found(&root).await);
    };

    match tokio::fs::read(&file).await {
        Ok(data) => {
            let mime = mime_guess::from_path(&file).first_or_octet_stream();
            Ok(response(StatusCode::OK, mime.as_ref(), Bytes::from(data)))
        }
        Err(_) => Ok(not_found(&root).await),
    }
}

/// Serve the site's own 404 page when the build produced one, otherwise a
/// minimal inline page.
async fn not_found(root: &Path) -> Response<Full<Bytes>> {
    let body = match tokio::fs::read(root.join("404.html")).await {
        Ok(data) => Bytes::from(data),
        Err(_) => Bytes::from(fallback_not_found().into_string()),
    };
    response(StatusCode::NOT_FOUND, "text/html", body)
}

fn fallback_not_found() -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                title { "404" }
            }
            body {
                h1 { "404" }
                p { "Nothing at this path in the output directory. Run a build first." }
            }
        }
    }
}

fn response(status: StatusCode, mime: &str, body: Bytes) -> Response<Full<Bytes>> {
    let mut res = Response::new(Full::new(body));
    *res.status_mut() = status;
    let content_type = HeaderValue::from_str(mime)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    res.headers_mut().insert(CONTENT_TYPE, content_type);
    res.headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static(NO_CACHE));
    res
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServeConfig;

    fn rules() -> Vec<Rule> {
        routing_rules(&ServeConfig::default())
    }

    #[test]
    fn root_serves_index() {
        assert_eq!(rewrite(&rules(), "/"), "/index.html");
    }

    #[test]
    fn app_prefix_serves_the_editor_shell() {
        assert_eq!(rewrite(&rules(), "/pipescore"), "/pipescore.html");
        assert_eq!(rewrite(&rules(), "/pipescore/abc123"), "/pipescore.html");
    }

    #[test]
    fn extensionless_paths_get_html_appended() {
        assert_eq!(rewrite(&rules(), "/about"), "/about.html");
        assert_eq!(rewrite(&rules(), "/help/contact"), "/help/contact.html");
    }

    #[test]
    fn paths_with_extensions_pass_through() {
        assert_eq!(rewrite(&rules(), "/styles/app.css"), "/styles/app.css");
        assert_eq!(rewrite(&rules(), "/images/icons/plus.svg"), "/images/icons/plus.svg");
    }

    #[test]
    fn first_match_wins() {
        // /pipescore.css is under the app prefix, so the prefix rule takes
        // it before the pass-through would.
        assert_eq!(rewrite(&rules(), "/pipescore.css"), "/pipescore.html");
    }

    #[test]
    fn resolve_stays_under_root() {
        let root = Path::new("/srv/public");
        assert_eq!(
            resolve(root, "/index.html"),
            Some(root.join("index.html"))
        );
        assert_eq!(resolve(root, "/../etc/passwd"), None);
        assert_eq!(resolve(root, "/a/../../b.html"), None);
    }

    #[test]
    fn fallback_page_names_the_fix() {
        let page = fallback_not_found().into_string();
        assert!(page.contains("404"));
        assert!(page.contains("Run a build"));
    }

    #[test]
    fn responses_disable_caching() {
        let res = response(StatusCode::OK, "text/html", Bytes::from_static(b"x"));
        assert_eq!(
            res.headers().get(CACHE_CONTROL).and_then(|v| v.to_str().ok()),
            Some(NO_CACHE)
        );
        assert_eq!(
            res.headers().get(CONTENT_TYPE).and_then(|v| v.to_str().ok()),
            Some("text/html")
        );
    }
}
