//! Development server for vitrine sites.
//!
//! Serves the built site, mounts the raw HTML-asset directory, processes
//! embed documents per request, and pushes live-reload messages to connected
//! browsers when content changes.

pub mod reload;
pub mod server;
pub mod watcher;

pub use reload::{reload_client_script, ReloadHub, ReloadMessage};
pub use server::{DevServer, DevServerConfig, ServerError};
pub use watcher::{FileWatcher, WatchEvent};
