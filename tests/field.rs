//! End-to-end particle field scenario: generate the full-size field, then
//! reposition it against the shrine's exclusion volume and check the
//! placement guarantees the scene relies on.

use emberfield::field::{self, Aabb};
use glam::vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// The placed model's volume: center (0, -6.5, 0), half-size 2.5 per axis.
fn shrine_volume() -> Aabb {
    Aabb {
        min: vec3(-2.5, -9.0, -2.5),
        max: vec3(2.5, -4.0, 2.5),
    }
}

#[test]
fn full_field_clears_the_shrine_volume() {
    let mut rng = ChaCha8Rng::seed_from_u64(2024);
    let mut f = field::generate(5000, 300.0, &mut rng);
    assert_eq!(f.positions.len(), 5000 * 3);
    assert_eq!(f.colors.len(), 5000 * 3);

    let volume = shrine_volume();
    let margin = 10.0;
    field::reposition(&mut f, &volume, 100.0, margin, &mut rng);

    let half_x = volume.half_size().x; // 2.5
    for i in 0..f.len() {
        let p = f.position(i);
        // The literal acceptance condition the placement uses: either at
        // least half_x + margin (= 12.5) of x-clearance from the volume's
        // center, or outside the volume entirely.
        assert!(
            field::is_clear(p, &volume, margin),
            "point {i} at {p:?} violates the acceptance condition"
        );
        // Numeric consequence of that disjunction: a point closer than
        // 12.5 on x that also sits inside the volume's y/z extent can only
        // have been accepted by the second clause, which then forces it
        // outside the volume's x extent. So no point is inside the box.
        let in_yz = p.y >= volume.min.y
            && p.y <= volume.max.y
            && p.z >= volume.min.z
            && p.z <= volume.max.z;
        if p.x.abs() < half_x + margin && in_yz {
            assert!(
                p.x.abs() > half_x,
                "point {i} at {p:?} ended up inside the exclusion volume"
            );
        }
    }
}

#[test]
fn repositioning_is_reproducible_for_a_seed() {
    let run = || {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let mut f = field::generate(500, 300.0, &mut rng);
        field::reposition(&mut f, &shrine_volume(), 100.0, 10.0, &mut rng);
        f
    };
    let a = run();
    let b = run();
    assert_eq!(a.positions, b.positions);
    assert_eq!(a.colors, b.colors);
}

#[test]
fn reposition_confines_points_to_the_sampling_spread() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut f = field::generate(1000, 300.0, &mut rng);
    field::reposition(&mut f, &shrine_volume(), 100.0, 10.0, &mut rng);
    for &c in &f.positions {
        assert!(
            (-100.0..=100.0).contains(&c),
            "coordinate {c} escaped the reposition spread"
        );
    }
}
