//! The scene's lighting rig.
//!
//! Two stages, matching the scene's lifecycle: a startup rig that lights
//! the particle field and background immediately, and a supplemental rig
//! added once the model arrives to bring out its geometry. All lights are
//! packed into one fixed-size uniform array the shader walks per fragment.

use glam::{Vec3, vec3};

use crate::gfx::types::{LightRaw, LightsUniform, MAX_LIGHTS};

#[derive(Clone, Copy, Debug)]
pub enum Light {
    Ambient {
        color: Vec3,
        intensity: f32,
    },
    /// `toward` is the normalized direction from surfaces toward the light.
    Directional {
        toward: Vec3,
        color: Vec3,
        intensity: f32,
    },
    Point {
        position: Vec3,
        color: Vec3,
        intensity: f32,
        range: f32,
    },
}

pub struct LightRig {
    lights: Vec<Light>,
}

impl LightRig {
    /// The rig installed before any asset arrives: one white ambient, one
    /// directional from (1,1,0), and two white points near the origin.
    pub fn startup() -> Self {
        let white = Vec3::ONE;
        Self {
            lights: vec![
                Light::Ambient {
                    color: white,
                    intensity: 1.0,
                },
                Light::Directional {
                    toward: vec3(1.0, 1.0, 0.0).normalize(),
                    color: white,
                    intensity: 1.0,
                },
                Light::Point {
                    position: vec3(1.0, 2.0, 2.0),
                    color: white,
                    intensity: 1.0,
                    range: 100.0,
                },
                Light::Point {
                    position: vec3(-2.0, 4.0, 4.0),
                    color: white,
                    intensity: 1.0,
                    range: 100.0,
                },
            ],
        }
    }

    /// Supplemental lights added when the model lands: another ambient, a
    /// directional from above-front, and a half-intensity fill from ten
    /// units in front of the model anchor.
    pub fn add_model_rig(&mut self, anchor: Vec3) {
        let white = Vec3::ONE;
        self.lights.push(Light::Ambient {
            color: white,
            intensity: 1.0,
        });
        self.lights.push(Light::Directional {
            toward: vec3(0.0, 2.0, 2.0).normalize(),
            color: white,
            intensity: 1.0,
        });
        let front = anchor + vec3(0.0, 0.0, 10.0);
        self.lights.push(Light::Directional {
            toward: front.normalize_or_zero(),
            color: white,
            intensity: 0.5,
        });
    }

    pub fn len(&self) -> usize {
        self.lights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Pack into the shader uniform. Lights beyond [`MAX_LIGHTS`] are
    /// dropped; the full scene rig fits with one slot spare.
    pub fn to_uniform(&self) -> LightsUniform {
        let mut out = LightsUniform {
            count_pad: [0.0; 4],
            lights: [LightRaw {
                pos_kind: [0.0; 4],
                color_intensity: [0.0; 4],
                dir_range: [0.0; 4],
            }; MAX_LIGHTS],
        };
        let n = self.lights.len().min(MAX_LIGHTS);
        out.count_pad[0] = n as f32;
        for (slot, light) in self.lights.iter().take(MAX_LIGHTS).enumerate() {
            out.lights[slot] = match *light {
                Light::Ambient { color, intensity } => LightRaw {
                    pos_kind: [0.0, 0.0, 0.0, 0.0],
                    color_intensity: [color.x, color.y, color.z, intensity],
                    dir_range: [0.0; 4],
                },
                Light::Directional {
                    toward,
                    color,
                    intensity,
                } => LightRaw {
                    pos_kind: [0.0, 0.0, 0.0, 1.0],
                    color_intensity: [color.x, color.y, color.z, intensity],
                    dir_range: [toward.x, toward.y, toward.z, 0.0],
                },
                Light::Point {
                    position,
                    color,
                    intensity,
                    range,
                } => LightRaw {
                    pos_kind: [position.x, position.y, position.z, 2.0],
                    color_intensity: [color.x, color.y, color.z, intensity],
                    dir_range: [0.0, 0.0, 0.0, range],
                },
            };
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_rig_shape() {
        let rig = LightRig::startup();
        assert_eq!(rig.len(), 4);
        let u = rig.to_uniform();
        assert_eq!(u.count_pad[0], 4.0);
        // ambient, directional, point, point
        assert_eq!(u.lights[0].pos_kind[3], 0.0);
        assert_eq!(u.lights[1].pos_kind[3], 1.0);
        assert_eq!(u.lights[2].pos_kind[3], 2.0);
        assert_eq!(u.lights[2].dir_range[3], 100.0);
    }

    #[test]
    fn full_rig_fits_the_uniform() {
        let mut rig = LightRig::startup();
        rig.add_model_rig(vec3(0.0, -6.5, 0.0));
        assert_eq!(rig.len(), 7);
        let u = rig.to_uniform();
        assert_eq!(u.count_pad[0], 7.0);
        // The front fill is half intensity.
        assert_eq!(u.lights[6].color_intensity[3], 0.5);
    }
}
