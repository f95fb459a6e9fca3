//! Asset system (CPU-side) for the scene's three external fetches: the
//! glTF model, the HDR environment map, and the particle sprite.
//!
//! Everything in this module is plain CPU decoding that returns owned data;
//! GPU upload happens in `gfx`. Loaders return `anyhow::Result` and never
//! log themselves; the policy for a failed load (warn and leave the
//! element absent) belongs to the caller.

pub mod env;
pub mod gltf;
pub mod texture;

pub use env::EnvironmentCpu;
pub use gltf::CpuMesh;
pub use texture::SpriteCpu;

use std::path::{Path, PathBuf};

/// Resolve a repo-relative asset path. Assets are looked up next to the
/// manifest during development and relative to the working directory
/// otherwise.
pub fn asset_path(rel: impl AsRef<Path>) -> PathBuf {
    let dev = Path::new(env!("CARGO_MANIFEST_DIR")).join(rel.as_ref());
    if dev.exists() {
        dev
    } else {
        rel.as_ref().to_path_buf()
    }
}
