//! Landing page assets
//!
//! The page itself is plain HTML/CSS/JS shipped next to the binary; only
//! the files below are exposed, each at a fixed public path.

use crate::state::AppState;
use axum::Router;
use std::path::Path;
use tower_http::services::ServeFile;

/// Public path and file name under the assets directory
const ASSETS: &[(&str, &str)] = &[
    ("/", "index.html"),
    ("/index.html", "index.html"),
    ("/styles.css", "styles.css"),
    ("/script.js", "script.js"),
];

/// Routes serving the landing page from `dir`
pub fn asset_routes(dir: &Path) -> Router<AppState> {
    ASSETS
        .iter()
        .fold(Router::new(), |router, (route, file)| {
            router.route_service(route, ServeFile::new(dir.join(file)))
        })
}
