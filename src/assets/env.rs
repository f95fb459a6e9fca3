//! HDR environment map decoding.
//!
//! The environment is a Radiance `.hdr` equirectangular panorama. Two
//! things come out of the decode:
//! - an `Rgba8UnormSrgb`-ready image (Reinhard tone map + gamma encode)
//!   that the background pass samples by view direction, and
//! - the linear average radiance, which lit geometry uses as an ambient
//!   tint so the model picks up the panorama's overall color cast.
//!
//! Doing the tone map on the CPU keeps the GPU side a plain filterable
//! rgba8 texture on every backend; the panorama is decorative, not an IBL
//! source, so the precision loss is acceptable.

use anyhow::{Context, Result, bail};
use std::path::Path;

/// Decoded environment ready for upload.
pub struct EnvironmentCpu {
    pub width: u32,
    pub height: u32,
    /// Tone-mapped, gamma-encoded RGBA8 rows, top-to-bottom.
    pub pixels: Vec<u8>,
    /// Linear average radiance of the source image.
    pub average: [f32; 3],
}

/// Load and tone-map an equirectangular `.hdr` panorama.
pub fn load_environment(path: &Path) -> Result<EnvironmentCpu> {
    let img = image::open(path)
        .with_context(|| format!("decode environment map: {}", path.display()))?
        .into_rgb32f();
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        bail!("environment map has zero extent: {}", path.display());
    }

    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    let mut sum = [0.0f64; 3];
    for p in img.pixels() {
        for (i, &c) in p.0.iter().enumerate() {
            let c = c.max(0.0);
            sum[i] += f64::from(c);
            pixels.push(encode_channel(c));
        }
        pixels.push(255);
    }
    let n = f64::from(width) * f64::from(height);
    let average = [
        (sum[0] / n) as f32,
        (sum[1] / n) as f32,
        (sum[2] / n) as f32,
    ];
    Ok(EnvironmentCpu {
        width,
        height,
        pixels,
        average,
    })
}

/// Reinhard tone map followed by sRGB gamma encode, to one byte.
fn encode_channel(linear: f32) -> u8 {
    let mapped = linear / (1.0 + linear);
    let enc = mapped.powf(1.0 / 2.2);
    (enc * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_channel_is_monotonic_and_bounded() {
        assert_eq!(encode_channel(0.0), 0);
        let mut prev = 0u8;
        for step in 1..200 {
            let v = encode_channel(step as f32 * 0.25);
            assert!(v >= prev);
            prev = v;
        }
        // Very bright inputs saturate below white but never overflow.
        assert!(encode_channel(1.0e6) <= 255);
    }

    #[test]
    fn missing_environment_is_an_error() {
        assert!(load_environment(Path::new("no/such/env.hdr")).is_err());
    }
}
