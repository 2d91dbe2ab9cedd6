//! Development server implementation.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, State,
    },
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use vitrine_content::ContentStore;
use vitrine_site::{substitute_placeholders, BuildConfig, SiteBuilder};

use crate::reload::{reload_client_script, ReloadHub, ReloadMessage};
use crate::watcher::{FileWatcher, WatchEvent};

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Build configuration for the site being served
    pub build: BuildConfig,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            port: 8000,
            host: "127.0.0.1".to_string(),
            open: true,
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind to {0}: {1}")]
    Bind(SocketAddr, String),

    #[error("File watch error: {0}")]
    Watch(String),

    #[error("Build error: {0}")]
    Build(String),
}

/// Shared server state.
struct ServerState {
    build: BuildConfig,
    store: Option<ContentStore>,
    hub: ReloadHub,
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Build the site, then serve it with rebuild-on-change.
    ///
    /// The initial build is fail-fast like any other build. Rebuilds
    /// triggered by file changes log failures and keep serving the last
    /// good output.
    pub async fn start(self) -> Result<(), ServerError> {
        let mut build = self.config.build.clone();
        build.reload_script = Some("/__reload.js".to_string());

        let result = SiteBuilder::new(build.clone())
            .build()
            .await
            .map_err(|e| ServerError::Build(e.to_string()))?;
        tracing::info!("Built {} pages", result.pages);

        let store = ContentStore::load(&build.content_dir)
            .map_err(|e| ServerError::Build(e.to_string()))?;

        let addr: SocketAddr = format!("{}:{}", self.config.host, self.config.port)
            .parse()
            .map_err(|e| ServerError::Bind(([127, 0, 0, 1], self.config.port).into(), format!("{}", e)))?;

        let state = Arc::new(RwLock::new(ServerState {
            build: build.clone(),
            store: Some(store),
            hub: ReloadHub::new(),
        }));

        // Watch content and assets for changes
        let watch_paths = vec![build.content_dir.clone(), build.assets_dir.clone()];
        let (watcher, mut rx) =
            FileWatcher::new(&watch_paths).map_err(|e| ServerError::Watch(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = Router::new()
            .route("/embed/{slug}", get(embed_handler))
            .route("/embed/{slug}/", get(embed_handler))
            .route("/__reload", get(ws_handler))
            .route("/__reload.js", get(reload_script_handler))
            .nest_service("/html-files", ServeDir::new(&build.assets_dir))
            .fallback_service(ServeDir::new(&build.output_dir))
            .with_state(state);

        tracing::info!("Starting dev server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            let _ = open::that(&url);
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Bind(addr, e.to_string()))?;

        Ok(())
    }
}

/// Handle a file watch event: rebuild and tell clients to reload.
async fn handle_watch_event(state: &Arc<RwLock<ServerState>>, event: WatchEvent) {
    match &event {
        WatchEvent::ContentModified(path) => {
            tracing::info!("Content modified: {}", path.display());
        }
        WatchEvent::AssetModified(path) => {
            tracing::info!("Asset modified: {}", path.display());
        }
        WatchEvent::Created(path) | WatchEvent::Deleted(path) | WatchEvent::Modified(path) => {
            tracing::info!("Changed: {}", path.display());
        }
    }

    let build = {
        let state = state.read().await;
        state.build.clone()
    };

    match SiteBuilder::new(build.clone()).build().await {
        Ok(result) => {
            tracing::info!("Rebuilt {} pages", result.pages);

            let store = ContentStore::load(&build.content_dir).ok();

            let mut state = state.write().await;
            state.store = store;
            state.hub.send(ReloadMessage::Reload);
        }
        Err(e) => {
            // Keep serving the previous output
            tracing::warn!("Rebuild failed: {}", e);
        }
    }
}

/// Serve a processed embed document for an entry.
///
/// Reads the raw asset and applies placeholder substitution per request, so
/// asset edits show up on the next page view. Errors stay inside this one
/// response.
async fn embed_handler(
    Path(slug): Path<String>,
    State(state): State<Arc<RwLock<ServerState>>>,
) -> impl IntoResponse {
    let (asset_path, publish_date) = {
        let state = state.read().await;

        let Some(entry) = state.store.as_ref().and_then(|s| s.get(&slug)).cloned() else {
            return Html(embed_error_page(&format!("Unknown entry: {}", slug)));
        };

        let Some(file) = entry.asset_file else {
            return Html(embed_error_page("No HTML file specified"));
        };

        (state.build.assets_dir.join(file), entry.publish_date)
    };

    match tokio::fs::read_to_string(&asset_path).await {
        Ok(raw) => Html(substitute_placeholders(&raw, publish_date)),
        Err(e) => {
            tracing::warn!("Failed to load {}: {}", asset_path.display(), e);
            Html(embed_error_page(&format!(
                "Failed to load HTML file: {}",
                asset_path.display()
            )))
        }
    }
}

/// Minimal standalone error document shown inside a single embed iframe.
fn embed_error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Embed unavailable</title>
  <style>
    body {{ font-family: system-ui, sans-serif; display: flex; align-items: center;
           justify-content: center; min-height: 100vh; margin: 0; background: #fef2f2; }}
    .panel {{ color: #b91c1c; text-align: center; padding: 2rem; }}
  </style>
</head>
<body>
  <div class="panel"><p><strong>Error:</strong> {}</p></div>
</body>
</html>"#,
        message
    )
}

/// Handler for the reload WebSocket endpoint.
async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<RwLock<ServerState>>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: Arc<RwLock<ServerState>>) {
    let mut rx = {
        let state = state.read().await;
        state.hub.subscribe()
    };

    let Ok(msg) = serde_json::to_string(&ReloadMessage::Connected) else {
        return;
    };
    if socket.send(Message::Text(msg.into())).await.is_err() {
        return;
    }

    while let Ok(reload_msg) = rx.recv().await {
        let Ok(json) = serde_json::to_string(&reload_msg) else {
            continue;
        };
        if socket.send(Message::Text(json.into())).await.is_err() {
            break;
        }
    }
}

/// Handler for the reload client script.
async fn reload_script_handler() -> impl IntoResponse {
    let script = reload_client_script("/__reload");
    ([("content-type", "application/javascript")], script)
}
