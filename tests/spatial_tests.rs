// Statistical checks on the two spatial generators.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::{
    random_point_in_sphere, tree_point, tree_radius_at, SCATTER_RADIUS, SPIRAL_STEP, TREE_HEIGHT,
    TREE_JITTER,
};

#[test]
fn tree_point_height_is_exact_and_jitter_bounded() {
    let mut rng = StdRng::seed_from_u64(1);
    let total = 400;
    for i in 0..=200 {
        let t = i as f32 / 200.0;
        let p = tree_point(t, total, &mut rng);
        assert_eq!(p.y, -TREE_HEIGHT / 2.0 + t * TREE_HEIGHT);

        let angle = t * total as f32 * SPIRAL_STEP;
        let r = tree_radius_at(t);
        assert!((p.x - angle.cos() * r).abs() <= TREE_JITTER / 2.0 + 1e-5);
        assert!((p.z - angle.sin() * r).abs() <= TREE_JITTER / 2.0 + 1e-5);
    }
}

#[test]
fn apex_collapses_to_the_axis() {
    let mut rng = StdRng::seed_from_u64(2);
    let p = tree_point(1.0, 100, &mut rng);
    assert_eq!(p.y, TREE_HEIGHT / 2.0);
    assert!(p.x.abs() <= TREE_JITTER / 2.0 && p.z.abs() <= TREE_JITTER / 2.0);
}

#[test]
fn sphere_samples_stay_inside_radius() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..10_000 {
        let p = random_point_in_sphere(SCATTER_RADIUS, &mut rng);
        assert!(p.length() <= SCATTER_RADIUS * (1.0 + 1e-4));
    }
}

#[test]
fn sphere_samples_fill_the_volume_uniformly() {
    // For a uniform ball, (|p| / R)^3 is uniform on [0, 1].
    let mut rng = StdRng::seed_from_u64(4);
    let n = 10_000;
    let mut bins = [0usize; 5];
    for _ in 0..n {
        let p = random_point_in_sphere(10.0, &mut rng);
        let u = (p.length() / 10.0).powi(3).min(0.999_999);
        bins[(u * 5.0) as usize] += 1;
    }
    let expected = n as f32 / 5.0;
    for count in bins {
        assert!((count as f32 - expected).abs() < expected * 0.1, "bins {bins:?}");
    }
}

#[test]
fn sphere_samples_have_no_preferred_direction() {
    let mut rng = StdRng::seed_from_u64(5);
    let n = 10_000;
    let mean = (0..n)
        .map(|_| random_point_in_sphere(1.0, &mut rng))
        .fold(glam::Vec3::ZERO, |acc, p| acc + p)
        / n as f32;
    assert!(mean.length() < 0.03, "mean {mean:?}");
}
