//! Immersive-display capability probe.
//!
//! Best-effort and strictly advisory: the scene asks once, off-thread,
//! whether an OpenXR runtime is installed, and only a positive answer has
//! any visible effect (an affordance marker in the window title). A
//! negative or undetermined answer is silent: no error, no UI.
//!
//! No session is created here; presence of a runtime manifest is the
//! capability signal, mirroring how the display layer treats a missing
//! asset: absent means the feature simply does not appear.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, channel};
use std::thread;

/// Conventional locations of the active OpenXR runtime manifest, checked
/// after the `XR_RUNTIME_JSON` override.
const RUNTIME_MANIFESTS: &[&str] = &[
    "/usr/local/share/openxr/1/active_runtime.json",
    "/usr/share/openxr/1/active_runtime.json",
];

/// Start the probe; the receiver yields exactly one boolean. Callers poll
/// with `try_recv` from the frame loop.
pub fn probe() -> Receiver<bool> {
    let (tx, rx) = channel();
    thread::spawn(move || {
        let supported = runtime_present(
            std::env::var("XR_RUNTIME_JSON").ok().map(PathBuf::from),
            RUNTIME_MANIFESTS.iter().copied().map(PathBuf::from),
        );
        if supported {
            log::info!("immersive display: OpenXR runtime manifest found");
        } else {
            log::debug!("immersive display: no runtime manifest, affordance omitted");
        }
        let _ = tx.send(supported);
    });
    rx
}

fn runtime_present(
    override_path: Option<PathBuf>,
    conventional: impl IntoIterator<Item = PathBuf>,
) -> bool {
    if let Some(p) = override_path {
        return p.exists();
    }
    conventional.into_iter().any(|p| Path::new(&p).exists())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_path_wins_even_when_missing() {
        // An explicit override that points nowhere means "not supported",
        // regardless of what the conventional paths would say.
        let missing = PathBuf::from("/definitely/not/here.json");
        let existing = std::env::temp_dir();
        assert!(!runtime_present(Some(missing), [existing]));
    }

    #[test]
    fn conventional_paths_are_consulted_without_override() {
        let existing = std::env::temp_dir();
        assert!(runtime_present(None, [existing]));
        assert!(!runtime_present(
            None,
            [PathBuf::from("/definitely/not/here.json")]
        ));
    }
}
