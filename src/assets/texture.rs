//! Particle sprite decoding.
//!
//! The embers are textured quads; the sprite supplies their shape and soft
//! edge. When the file is missing the scene falls back to a procedural
//! radial disc so the field still renders; the sprite is cosmetic, not
//! load-bearing.

use anyhow::{Context, Result};
use std::path::Path;

/// Decoded RGBA8 sprite.
pub struct SpriteCpu {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl SpriteCpu {
    /// Width over height. The rendered particle size is scaled by this so
    /// non-square sprites keep their proportions.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

/// Load a sprite image (PNG or JPEG) as RGBA8.
pub fn load_sprite(path: &Path) -> Result<SpriteCpu> {
    let img = image::open(path)
        .with_context(|| format!("decode sprite: {}", path.display()))?
        .to_rgba8();
    let (width, height) = img.dimensions();
    Ok(SpriteCpu {
        width,
        height,
        pixels: img.into_raw(),
    })
}

/// Procedural soft disc used when no sprite file is available: alpha falls
/// off quadratically from the center, color stays white so the per-point
/// vertex color shows through unchanged.
pub fn radial_fallback(size: u32) -> SpriteCpu {
    let size = size.max(2);
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    let half = (size as f32 - 1.0) * 0.5;
    for y in 0..size {
        for x in 0..size {
            let dx = (x as f32 - half) / half;
            let dy = (y as f32 - half) / half;
            let d = (dx * dx + dy * dy).sqrt().min(1.0);
            let falloff = (1.0 - d) * (1.0 - d);
            let a = (falloff * 255.0).round() as u8;
            pixels.extend_from_slice(&[255, 255, 255, a]);
        }
    }
    SpriteCpu {
        width: size,
        height: size,
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radial_fallback_shape() {
        let s = radial_fallback(32);
        assert_eq!(s.pixels.len(), 32 * 32 * 4);
        assert!((s.aspect() - 1.0).abs() < f32::EPSILON);
        // Center opaque-ish, corner transparent.
        let center = ((16 * 32 + 16) * 4 + 3) as usize;
        assert!(s.pixels[center] > 200);
        assert_eq!(s.pixels[3], 0);
    }

    #[test]
    fn aspect_of_wide_sprite() {
        let s = SpriteCpu {
            width: 128,
            height: 64,
            pixels: vec![],
        };
        assert!((s.aspect() - 2.0).abs() < f32::EPSILON);
    }
}
