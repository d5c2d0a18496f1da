pub mod cards;
pub mod check;
pub mod ritual;
pub mod show;

use std::path::Path;

use arcana_core::Catalog;
use tracing::debug;

const LOG_TARGET: &str = "arcana::cli";

/// Load and validate a catalog, turning failures into a message for the user.
fn load_catalog(path: &Path) -> Result<Catalog, String> {
    debug!(target: LOG_TARGET, path = %path.display(), "loading catalog");
    Catalog::load(path).map_err(|e| format!("failed to load catalog: {e}"))
}

/// Shorten text for a table cell.
fn preview(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{cut}...")
    } else {
        text.to_string()
    }
}
