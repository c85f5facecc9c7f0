use std::path::{Path, PathBuf};

use eyre::ContextCompat;

/// Returns the root of the workspace this harness is built in.
///
/// The harness lives at `<root>/lib/e2e`, so the root is two levels up from
/// its manifest.
pub(crate) fn get_workspace_root() -> eyre::Result<PathBuf> {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .ancestors()
        .nth(2)
        .map(Path::to_path_buf)
        .context("harness manifest should live two levels below the root")
}

/// Directory holding the workspace's Stylus programs.
pub(crate) fn get_programs_dir() -> eyre::Result<PathBuf> {
    Ok(get_workspace_root()?.join("programs"))
}
