//! Scene assembly without a GPU: the same steps the renderer takes when
//! the model arrives (place, bound, expand, reposition, extend the rig),
//! run against a synthetic mesh.

use emberfield::config::SceneConfig;
use emberfield::field::{self, Aabb};
use emberfield::gfx::lights::LightRig;
use glam::{Vec3, vec3};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// A unit-cube "model" centered at the origin, as its vertex positions.
fn cube_points() -> Vec<Vec3> {
    let mut v = Vec::new();
    for x in [-0.5, 0.5] {
        for y in [-0.5, 0.5] {
            for z in [-0.5, 0.5] {
                v.push(vec3(x, y, z));
            }
        }
    }
    v
}

#[test]
fn model_arrival_pipeline_places_and_clears() {
    let cfg = SceneConfig::default();

    // Bound the synthetic model and place it like the renderer does.
    let local = Aabb::from_points(cube_points()).expect("non-empty mesh");
    let world = local.transformed(cfg.model_matrix());
    // Unit cube, scale 5, offset (0, -6.5, 0).
    assert_eq!(world.min, vec3(-2.5, -9.0, -2.5));
    assert_eq!(world.max, vec3(2.5, -4.0, 2.5));

    let volume = world.expanded(cfg.volume_expand);
    assert_eq!(volume.min, vec3(-4.0, -10.5, -4.0));
    assert_eq!(volume.max, vec3(4.0, -2.5, 4.0));

    // Generate, then clear the field out of the placed volume.
    let mut rng = ChaCha8Rng::seed_from_u64(cfg.seed);
    let mut f = field::generate(cfg.particle_count, cfg.initial_spread, &mut rng);
    field::reposition(
        &mut f,
        &volume,
        cfg.reposition_spread,
        cfg.exclusion_margin,
        &mut rng,
    );
    for i in 0..f.len() {
        assert!(field::is_clear(f.position(i), &volume, cfg.exclusion_margin));
        assert!(!volume.contains(f.position(i)));
    }
}

#[test]
fn light_rig_grows_once_on_model_arrival() {
    let cfg = SceneConfig::default();
    let mut rig = LightRig::startup();
    assert_eq!(rig.len(), 4);
    rig.add_model_rig(Vec3::from_array(cfg.model_offset));
    assert_eq!(rig.len(), 7);
    let uniform = rig.to_uniform();
    assert_eq!(uniform.count_pad[0], 7.0);
}
