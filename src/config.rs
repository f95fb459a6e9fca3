//! Scene configuration.
//!
//! Every tunable the scene exposes lives in one serde struct with the
//! original scene's constants as defaults. A `data/scene.json` next to the
//! manifest overrides them when present; a missing file is the normal case
//! and just means defaults.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

fn data_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Number of points in the ember field.
    pub particle_count: usize,
    /// Half-extent of the initial scatter per axis.
    pub initial_spread: f32,
    /// Half-extent used when repositioning around the model.
    pub reposition_spread: f32,
    /// Extra x-axis clearance kept from the exclusion volume's center.
    pub exclusion_margin: f32,
    /// Scalar growth applied to the model's bounding box before exclusion.
    pub volume_expand: f32,
    /// Seed for the deterministic field generation.
    pub seed: u64,
    pub model_scale: f32,
    pub model_offset: [f32; 3],
    pub camera_radius: f32,
    pub camera_height: f32,
    /// Orbit rate in radians per second.
    pub orbit_speed: f32,
    pub environment_path: String,
    pub sprite_path: String,
    pub model_path: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            particle_count: 5000,
            initial_spread: 150.0,
            reposition_spread: 100.0,
            exclusion_margin: 10.0,
            volume_expand: 1.5,
            seed: 42,
            model_scale: 5.0,
            model_offset: [0.0, -6.5, 0.0],
            camera_radius: 10.0,
            camera_height: 1.0,
            orbit_speed: 0.15,
            environment_path: "assets/textures/moonlit_golf_4k.hdr".into(),
            sprite_path: "assets/textures/fire.png".into(),
            model_path: "assets/models/shrine.gltf".into(),
        }
    }
}

impl SceneConfig {
    pub fn model_matrix(&self) -> glam::Mat4 {
        glam::Mat4::from_scale_rotation_translation(
            glam::Vec3::splat(self.model_scale),
            glam::Quat::IDENTITY,
            glam::Vec3::from_array(self.model_offset),
        )
    }
}

/// Parse a config from JSON text.
pub fn parse(text: &str) -> Result<SceneConfig> {
    serde_json::from_str(text).context("parse scene config json")
}

/// Load `data/scene.json` if present, defaults otherwise. Malformed JSON is
/// an error; a missing file is not.
pub fn load() -> Result<SceneConfig> {
    let path = data_root().join("scene.json");
    match fs::read_to_string(&path) {
        Ok(text) => {
            let cfg = parse(&text).with_context(|| format!("read config: {}", path.display()))?;
            log::info!("scene config loaded from {}", path.display());
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("no {}; using default scene config", path.display());
            Ok(SceneConfig::default())
        }
        Err(e) => Err(e).with_context(|| format!("read config: {}", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_scene_constants() {
        let c = SceneConfig::default();
        assert_eq!(c.particle_count, 5000);
        assert_eq!(c.initial_spread, 150.0);
        assert_eq!(c.reposition_spread, 100.0);
        assert_eq!(c.exclusion_margin, 10.0);
        assert_eq!(c.model_offset, [0.0, -6.5, 0.0]);
    }

    #[test]
    fn partial_json_overrides_only_named_fields() {
        let c = parse(r#"{ "particle_count": 1200, "seed": 7 }"#).expect("parse");
        assert_eq!(c.particle_count, 1200);
        assert_eq!(c.seed, 7);
        assert_eq!(c.initial_spread, 150.0);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert!(parse(r#"{ "particle_cout": 10 }"#).is_err());
    }

    #[test]
    fn model_matrix_applies_scale_then_offset() {
        let c = SceneConfig::default();
        let p = c.model_matrix().transform_point3(glam::vec3(1.0, 0.0, 0.0));
        assert_eq!(p, glam::vec3(5.0, -6.5, 0.0));
    }
}
