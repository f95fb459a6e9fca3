//! Ember field: CPU-side particle placement and flicker.
//!
//! This is the one piece of the scene that is real logic rather than GPU
//! plumbing, so it lives apart from `gfx` as a pure module: every function
//! here is deterministic given its RNG and inputs, which keeps the
//! repositioning testable without a device or a window.
//!
//! Layout
//! - `ParticleField`: two parallel flat buffers (positions, colors),
//!   indexed `i*3 + {0,1,2}`. Both always have length `count * 3`.
//! - `generate`: initial uniform scatter with fire-hued HSL colors.
//! - `reposition`: bounded rejection sampling that clears points out of an
//!   axis-aligned exclusion volume around the loaded model.
//! - `flicker_*`: the per-frame material oscillation scalars.

use glam::{Mat4, Vec3, vec3};
use rand::Rng;

/// Attempt cap for the rejection loop in [`reposition`]. The sampling
/// condition is satisfiable for any volume smaller than the spread, but an
/// oversized volume would otherwise spin forever; after this many draws the
/// best candidate seen is accepted instead.
pub const REPOSITION_ATTEMPTS: usize = 32;

/// Fixed-count point cloud with per-point RGB color.
///
/// Positions and colors are kept as flat `f32` buffers in the exact shape
/// the GPU consumes, rather than as a `Vec` of structs; the renderer
/// interleaves them into instances at upload time.
pub struct ParticleField {
    pub positions: Vec<f32>,
    pub colors: Vec<f32>,
}

impl ParticleField {
    /// Number of points in the field.
    pub fn len(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of point `i`.
    pub fn position(&self, i: usize) -> Vec3 {
        vec3(
            self.positions[i * 3],
            self.positions[i * 3 + 1],
            self.positions[i * 3 + 2],
        )
    }
}

/// Generate `count` points uniformly in `[-spread, spread]` per axis, with
/// colors drawn from the fire band: hue in [0°, 60°], full saturation,
/// lightness in [0, 0.5).
pub fn generate<R: Rng>(count: usize, spread: f32, rng: &mut R) -> ParticleField {
    let mut positions = Vec::with_capacity(count * 3);
    let mut colors = Vec::with_capacity(count * 3);
    for _ in 0..count {
        positions.push(rng.random_range(-spread..=spread));
        positions.push(rng.random_range(-spread..=spread));
        positions.push(rng.random_range(-spread..=spread));

        let hue_deg = rng.random::<f32>() * 60.0;
        let lightness = rng.random::<f32>() * 0.5;
        let rgb = hsl_to_rgb(hue_deg / 360.0, 1.0, lightness);
        colors.extend_from_slice(&rgb);
    }
    ParticleField { positions, colors }
}

/// Standard six-segment HSL to RGB conversion. `h` is wrapped into [0, 1];
/// `s` and `l` are expected in [0, 1]. Returns channels in [0, 1].
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    if s == 0.0 {
        return [l, l, l]; // achromatic
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_rgb(p, q, h + 1.0 / 3.0),
        hue_to_rgb(p, q, h),
        hue_to_rgb(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_rgb(p: f32, q: f32, t: f32) -> f32 {
    let mut t = t;
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Axis-aligned bounding box used as the exclusion volume.
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Smallest box containing all `points`. Returns `None` for an empty
    /// iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        let mut any = false;
        for p in points {
            min = min.min(p);
            max = max.max(p);
            any = true;
        }
        any.then_some(Self { min, max })
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn half_size(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Grow the box by `margin` on every face.
    pub fn expanded(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec3::splat(margin),
            max: self.max + Vec3::splat(margin),
        }
    }

    /// Inclusive containment test.
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// World-space box of this box's eight corners under `model`.
    pub fn transformed(&self, model: Mat4) -> Self {
        let (lo, hi) = (self.min, self.max);
        let corners = [
            vec3(lo.x, lo.y, lo.z),
            vec3(hi.x, lo.y, lo.z),
            vec3(lo.x, hi.y, lo.z),
            vec3(hi.x, hi.y, lo.z),
            vec3(lo.x, lo.y, hi.z),
            vec3(hi.x, lo.y, hi.z),
            vec3(lo.x, hi.y, hi.z),
            vec3(hi.x, hi.y, hi.z),
        ];
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for c in corners {
            let w = model.transform_point3(c);
            min = min.min(w);
            max = max.max(w);
        }
        Self { min, max }
    }
}

/// Whether `p` is acceptably placed relative to the exclusion `volume`.
///
/// The acceptance condition is the literal disjunction the scene was built
/// with: either the point keeps `half_size.x + margin` clearance from the
/// volume's center on the x axis, or it lies outside the volume entirely.
/// The first clause implies the second for any point it accepts, so the
/// net effect is "outside the volume". The redundancy is kept on purpose
/// and asserted by the tests below rather than simplified away.
pub fn is_clear(p: Vec3, volume: &Aabb, margin: f32) -> bool {
    let x_clear = (p.x - volume.center().x).abs() >= volume.half_size().x + margin;
    x_clear || !volume.contains(p)
}

/// Resample every point of `field` uniformly in `[-spread, spread]` per
/// axis until it satisfies [`is_clear`] against `volume`.
///
/// Each point gets at most [`REPOSITION_ATTEMPTS`] draws; if none clears
/// (possible only when the volume dwarfs the spread), the candidate with
/// the largest x-axis clearance is kept and one warning is logged for the
/// whole pass. Colors are untouched.
pub fn reposition<R: Rng>(
    field: &mut ParticleField,
    volume: &Aabb,
    spread: f32,
    margin: f32,
    rng: &mut R,
) {
    let count = field.len();
    let mut fallbacks = 0usize;
    for i in 0..count {
        let mut best = Vec3::ZERO;
        let mut best_clearance = f32::NEG_INFINITY;
        let mut placed = None;
        for _ in 0..REPOSITION_ATTEMPTS {
            let p = vec3(
                rng.random_range(-spread..=spread),
                rng.random_range(-spread..=spread),
                rng.random_range(-spread..=spread),
            );
            if is_clear(p, volume, margin) {
                placed = Some(p);
                break;
            }
            let clearance = (p.x - volume.center().x).abs() - (volume.half_size().x + margin);
            if clearance > best_clearance {
                best_clearance = clearance;
                best = p;
            }
        }
        let p = placed.unwrap_or_else(|| {
            fallbacks += 1;
            best
        });
        field.positions[i * 3] = p.x;
        field.positions[i * 3 + 1] = p.y;
        field.positions[i * 3 + 2] = p.z;
    }
    if fallbacks > 0 {
        log::warn!(
            "reposition: {fallbacks}/{count} points exhausted {REPOSITION_ATTEMPTS} draws; kept best candidates"
        );
    }
}

/// Particle size at `t_ms` milliseconds: `2 + 0.2*sin(t_ms * 0.005)`.
/// Periodic with period 2*pi/0.005 (~1256.6 ms); range [1.8, 2.2].
pub fn flicker_size(t_ms: f32) -> f32 {
    2.0 + 0.2 * (t_ms * 0.005).sin()
}

/// Fresh opacity draw: `0.85 + 0.3*(0.5 - u)` for `u` uniform in [0, 1).
/// The arithmetic range is (0.70, 1.00]; callers clamp at the GPU boundary
/// if they need [0, 1].
pub fn flicker_opacity<R: Rng>(rng: &mut R) -> f32 {
    0.85 + 0.3 * (0.5 - rng.random::<f32>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rgb_u8(rgb: [f32; 3]) -> [u8; 3] {
        [
            (rgb[0] * 255.0).round() as u8,
            (rgb[1] * 255.0).round() as u8,
            (rgb[2] * 255.0).round() as u8,
        ]
    }

    #[test]
    fn hsl_primaries() {
        assert_eq!(rgb_u8(hsl_to_rgb(0.0, 1.0, 0.5)), [255, 0, 0]);
        assert_eq!(rgb_u8(hsl_to_rgb(60.0 / 360.0, 1.0, 0.5)), [255, 255, 0]);
    }

    #[test]
    fn hsl_achromatic() {
        for l in [0.0f32, 0.25, 0.5, 0.9, 1.0] {
            let rgb = hsl_to_rgb(0.37, 0.0, l);
            assert_eq!(rgb, [l, l, l]);
        }
    }

    #[test]
    fn generate_shapes_and_ranges() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let f = generate(512, 150.0, &mut rng);
        assert_eq!(f.len(), 512);
        assert_eq!(f.positions.len(), 512 * 3);
        assert_eq!(f.colors.len(), 512 * 3);
        for &x in &f.positions {
            assert!((-150.0..=150.0).contains(&x), "position {x} out of spread");
        }
        for &c in &f.colors {
            assert!((0.0..=1.0).contains(&c), "color channel {c} out of range");
        }
    }

    #[test]
    fn generate_is_deterministic_for_seed() {
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        let fa = generate(64, 150.0, &mut a);
        let fb = generate(64, 150.0, &mut b);
        assert_eq!(fa.positions, fb.positions);
        assert_eq!(fa.colors, fb.colors);
    }

    #[test]
    fn aabb_contains_is_inclusive() {
        let b = Aabb {
            min: vec3(-1.0, -1.0, -1.0),
            max: vec3(1.0, 1.0, 1.0),
        };
        assert!(b.contains(vec3(1.0, 0.0, -1.0)));
        assert!(!b.contains(vec3(1.0001, 0.0, 0.0)));
    }

    #[test]
    fn aabb_transform_covers_scaled_offset_box() {
        let b = Aabb {
            min: vec3(-1.0, -2.0, -3.0),
            max: vec3(1.0, 2.0, 3.0),
        };
        let m = Mat4::from_scale_rotation_translation(
            Vec3::splat(5.0),
            glam::Quat::IDENTITY,
            vec3(0.0, -6.5, 0.0),
        );
        let w = b.transformed(m);
        assert_eq!(w.min, vec3(-5.0, -16.5, -15.0));
        assert_eq!(w.max, vec3(5.0, 3.5, 15.0));
    }

    #[test]
    fn is_clear_matches_the_literal_disjunction() {
        let volume = Aabb {
            min: vec3(-2.5, -9.0, -2.5),
            max: vec3(2.5, -4.0, 2.5),
        };
        let margin = 10.0;
        // Far on x: accepted by the first clause.
        assert!(is_clear(vec3(13.0, -6.5, 0.0), &volume, margin));
        // Inside the x tunnel but outside the box on y: accepted by the
        // second clause even though the first rejects it.
        assert!(is_clear(vec3(0.0, 40.0, 0.0), &volume, margin));
        // Inside the volume: rejected by both clauses.
        assert!(!is_clear(vec3(0.0, -6.5, 0.0), &volume, margin));
    }

    #[test]
    fn reposition_clears_the_volume() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut f = generate(1000, 150.0, &mut rng);
        let colors_before = f.colors.clone();
        let volume = Aabb {
            min: vec3(-2.5, -9.0, -2.5),
            max: vec3(2.5, -4.0, 2.5),
        };
        reposition(&mut f, &volume, 100.0, 10.0, &mut rng);
        assert_eq!(f.positions.len(), 1000 * 3);
        assert_eq!(f.colors, colors_before);
        for i in 0..f.len() {
            assert!(
                is_clear(f.position(i), &volume, 10.0),
                "point {i} at {:?} violates the acceptance condition",
                f.position(i)
            );
        }
    }

    #[test]
    fn flicker_size_range_and_period() {
        let period_ms = std::f32::consts::TAU / 0.005;
        for step in 0..2000 {
            let t = step as f32 * 1.7;
            let s = flicker_size(t);
            assert!((1.8..=2.2).contains(&s), "size {s} out of range at {t}");
            let s2 = flicker_size(t + period_ms);
            assert!((s - s2).abs() < 1e-3, "size not periodic: {s} vs {s2}");
        }
    }

    #[test]
    fn flicker_opacity_stays_in_documented_envelope() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..10_000 {
            let o = flicker_opacity(&mut rng);
            // Documented envelope; the arithmetic range (0.70, 1.00] is a
            // strict subset of it.
            assert!((0.55..=1.15).contains(&o), "opacity {o} out of envelope");
            assert!(o > 0.70 - 1e-6 && o <= 1.0 + 1e-6);
        }
    }
}
