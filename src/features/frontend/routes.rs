use std::path::Path;

use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

/// Top-level pages: (route, file name)
const PAGES: [(&str, &str); 4] = [
    ("/", "index.html"),
    ("/index.html", "index.html"),
    ("/detector.html", "detector.html"),
    ("/sw.js", "sw.js"),
];

/// Folders served recursively under a route of the same name
const ASSET_DIRS: [&str; 3] = ["assets", "GeoJSON", "Logo"];

/// Create routes for the static frontend rooted at `dir`
///
/// Pages and folders missing from `dir` are skipped and answer 404.
pub fn routes(dir: &Path) -> Router {
    let mut router = Router::new();

    for (route, file) in PAGES {
        let path = dir.join(file);
        if path.is_file() {
            router = router.route_service(route, ServeFile::new(path));
        }
    }

    for name in ASSET_DIRS {
        let path = dir.join(name);
        if path.is_dir() {
            router = router.nest_service(&format!("/{}", name), ServeDir::new(path));
        }
    }

    router
}
