//! Subcommand implementations.

/// The `check` subcommand.
pub mod check;
/// The `play` subcommand.
pub mod play;
/// The `tables` subcommand.
pub mod tables;

use std::path::Path;

use lc_data::DataSet;

/// Load a content directory, mapping fatal errors to a printable message.
fn load(dir: &Path) -> Result<DataSet, String> {
    lc_data::load_dir(dir).map_err(|e| e.to_string())
}
