use crate::args::{Scheme, ServerArgs};
use crate::error::ServerError;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info};

pub const TSV_CONTENT_TYPE: &str = "text/tab-separated-values";

#[derive(Clone)]
struct AppState {
    data_path: Arc<PathBuf>,
}

impl AppState {
    async fn read(&self) -> Result<String, ServerError> {
        tokio::fs::read_to_string(self.data_path.as_path())
            .await
            .map_err(|source| ServerError::ReadData {
                path: self.data_path.to_path_buf(),
                source,
            })
    }
}

pub fn router(data_path: impl Into<PathBuf>) -> Router {
    let state = AppState {
        data_path: Arc::new(data_path.into()),
    };
    Router::new()
        .route("/", get(serve_all).post(serve_requested))
        .with_state(state)
}

fn tsv_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, TSV_CONTENT_TYPE)], body).into_response()
}

async fn serve_all(State(state): State<AppState>) -> Result<Response, ServerError> {
    let data = state.read().await?;
    debug!("GET: {} bytes", data.len());
    Ok(tsv_response(data))
}

async fn serve_requested(
    State(state): State<AppState>,
    body: String,
) -> Result<Response, ServerError> {
    let data = state.read().await?;
    let filtered = filter_lines(&data, &body);
    debug!("POST: {} of {} bytes", filtered.len(), data.len());
    Ok(tsv_response(filtered))
}

/// Keep the lines of `data` whose first column is one of the ids in
/// `requested`. Each kept line ends with a newline.
pub fn filter_lines(data: &str, requested: &str) -> String {
    let ids: HashSet<&str> = requested.split_whitespace().collect();
    let mut out = String::new();
    for line in data.lines() {
        let key = line.split('\t').next().unwrap_or_default();
        if ids.contains(key) {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

/// Bind and serve until the process is killed.
pub async fn serve(args: ServerArgs) -> Result<(), ServerError> {
    let addr = tokio::net::lookup_host((args.host.as_str(), args.port))
        .await?
        .next()
        .ok_or_else(|| ServerError::Resolve(format!("{}:{}", args.host, args.port)))?;
    let app = router(args.data_path.clone());

    info!(
        "Serving {} over {} on {}",
        args.data_path.display(),
        args.scheme,
        addr
    );

    match args.scheme {
        Scheme::Http => {
            let listener = TcpListener::bind(addr).await?;
            axum::serve(listener, app).await?;
        }
        Scheme::Https => {
            let pem = args
                .cert_path
                .as_ref()
                .ok_or(ServerError::MissingCertificate)?;
            // Fails only when a provider is already installed.
            let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
            let config = RustlsConfig::from_pem_file(pem, pem).await?;
            axum_server::bind_rustls(addr, config)
                .serve(app.into_make_service())
                .await?;
        }
    }
    Ok(())
}
