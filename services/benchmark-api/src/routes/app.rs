//! Frontend bundle serving.
//!
//! Existing assets are served as files; every other path gets the SPA entry
//! document so client-side routing works on reload.

use std::path::Path;
use tower_http::services::{ServeDir, ServeFile};

/// SPA entry document inside the bundle directory.
pub const INDEX_FILE: &str = "index.html";

/// Service serving `static_dir` with `index.html` as fallback.
pub fn spa_service(static_dir: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join(INDEX_FILE)))
}
