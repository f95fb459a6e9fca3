//! Background asset loading.
//!
//! Each of the three fetches (environment map, sprite, model) runs on its
//! own detached thread and reports back exactly once with an owned
//! `Result`. The renderer drains the shared channel non-blockingly at the
//! top of every frame, so all scene mutation stays on the event-loop
//! thread and the first frames render before any asset has arrived.
//!
//! There is no retry and no cancellation: a failed load is logged by the
//! consumer and the corresponding visual element stays absent.

use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

use crate::assets::{self, CpuMesh, EnvironmentCpu, SpriteCpu};
use crate::config::SceneConfig;

/// One completed load. The payload is the decode result; failures carry
/// the full error chain for the consumer to log.
pub enum AssetEvent {
    Environment(anyhow::Result<EnvironmentCpu>),
    Sprite(anyhow::Result<SpriteCpu>),
    Model(anyhow::Result<CpuMesh>),
}

impl AssetEvent {
    pub fn kind(&self) -> &'static str {
        match self {
            AssetEvent::Environment(_) => "environment",
            AssetEvent::Sprite(_) => "sprite",
            AssetEvent::Model(_) => "model",
        }
    }
}

/// Handle to the in-flight loads; dropping it detaches them (late sends go
/// nowhere, which is fine at teardown).
pub struct AssetLoader {
    rx: Receiver<AssetEvent>,
}

impl AssetLoader {
    /// Kick off all three loads for the configured paths.
    pub fn spawn(cfg: &SceneConfig) -> Self {
        let (tx, rx) = channel();

        let env_path = assets::asset_path(&cfg.environment_path);
        spawn_one(tx.clone(), move || {
            AssetEvent::Environment(assets::env::load_environment(&env_path))
        });

        let sprite_path = assets::asset_path(&cfg.sprite_path);
        spawn_one(tx.clone(), move || {
            AssetEvent::Sprite(assets::texture::load_sprite(&sprite_path))
        });

        let model_path = assets::asset_path(&cfg.model_path);
        spawn_one(tx, move || {
            AssetEvent::Model(assets::gltf::load_gltf_mesh(&model_path))
        });

        Self { rx }
    }

    /// Collect every event that has arrived since the last call, without
    /// blocking.
    pub fn drain(&self) -> Vec<AssetEvent> {
        let mut out = Vec::new();
        while let Ok(ev) = self.rx.try_recv() {
            out.push(ev);
        }
        out
    }
}

fn spawn_one(tx: Sender<AssetEvent>, load: impl FnOnce() -> AssetEvent + Send + 'static) {
    thread::spawn(move || {
        // A closed receiver just means the scene shut down mid-load.
        let _ = tx.send(load());
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_three_loads_report_back() {
        // Default paths do not exist in a bare checkout; the contract under
        // test is that every load reports exactly once, success or not.
        let loader = AssetLoader::spawn(&SceneConfig::default());
        let mut seen = Vec::new();
        let deadline = std::time::Instant::now() + std::time::Duration::from_secs(10);
        while seen.len() < 3 && std::time::Instant::now() < deadline {
            seen.extend(loader.drain().into_iter().map(|e| e.kind()));
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        seen.sort_unstable();
        assert_eq!(seen, vec!["environment", "model", "sprite"]);
    }
}
