// End-to-end ornament cluster behavior driven through frame inputs.

use rand::rngs::StdRng;
use rand::SeedableRng;
use tree_core::{
    apex_taper, GeometryKind, Mode, OrnamentCluster, OrnamentConfig, ParticleGroup, SteppedClock,
    APEX_TIP_T, APEX_TIP_TAPER, FLOAT_AMP_ASSEMBLED, GRADIENT_NOISE,
};

fn gradient_spheres(count: usize, seed: u64) -> OrnamentCluster {
    let mut rng = StdRng::seed_from_u64(seed);
    OrnamentCluster::new(
        OrnamentConfig {
            label: "gradient",
            count,
            scale_range: [0.3, 0.9],
            size_gradient: true,
            ..OrnamentConfig::default()
        },
        &mut rng,
    )
}

#[test]
fn assembled_cluster_settles_on_tree_positions() {
    let mut cluster = gradient_spheres(100, 11);
    let mut clock = SteppedClock::new(1.0 / 60.0);
    let mut frames = 0;
    while cluster.progress() <= 0.999 {
        let frame = clock.tick(Mode::Assembled);
        cluster.update(&frame);
        frames += 1;
        assert!(frames < 2000, "never converged");
    }

    // residual motion is the assembled bob only
    let tolerance = FLOAT_AMP_ASSEMBLED * 1.2 + 1e-3;
    for (i, p) in cluster.particles().iter().enumerate() {
        let Some(t) = cluster.transform_of(i) else {
            panic!("missing transform {i}");
        };
        assert!(t.position.distance(p.tree) <= tolerance, "particle {i} off by {}", t.position.distance(p.tree));
        assert!(t.scale.x >= 0.3 * 0.5 * APEX_TIP_TAPER - 1e-4);
        assert!(t.scale.x <= 0.9 + 0.6 * 0.3 * 0.5 + 1e-3);
    }
}

#[test]
fn scattered_cluster_stays_near_scatter_positions() {
    let mut cluster = gradient_spheres(60, 12);
    let mut clock = SteppedClock::new(1.0 / 60.0);
    for _ in 0..120 {
        cluster.update(&clock.tick(Mode::Scattered));
    }
    assert_eq!(cluster.progress(), 0.0);
    for (i, p) in cluster.particles().iter().enumerate() {
        let Some(t) = cluster.transform_of(i) else {
            panic!("missing transform {i}");
        };
        // scattered bob is at most 4 vertically and 2 sideways
        assert!(t.position.distance(p.scatter) <= 4.5);
    }
}

#[test]
fn accent_split_partitions_every_particle_once() {
    let cluster = gradient_spheres(400, 13);
    assert_eq!(cluster.opaque().len() + cluster.accent().len(), 400);
    let accents = cluster.particles().iter().filter(|p| p.accent).count();
    assert_eq!(accents, cluster.accent().len());
    // roughly 15% go to the crystal batch
    assert!(accents > 20 && accents < 110, "accents {accents}");
}

#[test]
fn boxes_never_produce_accents() {
    let mut rng = StdRng::seed_from_u64(14);
    let boxes = OrnamentCluster::new(
        OrnamentConfig {
            count: 300,
            geometry: GeometryKind::Box,
            ..OrnamentConfig::default()
        },
        &mut rng,
    );
    assert!(boxes.accent().is_empty());
    assert_eq!(boxes.opaque().len(), 300);
}

#[test]
fn apex_particles_are_tapered() {
    assert_eq!(apex_taper(0.95, 1.0), APEX_TIP_TAPER);
    assert_eq!(apex_taper(0.5, 1.0), 1.0);
    assert_eq!(apex_taper(0.92, 1.0), 1.0);
}

#[test]
fn apex_particles_in_a_gradient_cluster_are_tapered() {
    let cluster = gradient_spheres(500, 16);
    let [min, max] = [0.3_f32, 0.9_f32];
    let spread = max - min;
    let noise_bound = 0.5 * spread * GRADIENT_NOISE;

    let mut apex = 0;
    for (i, p) in cluster.particles().iter().enumerate() {
        let t = p.height;
        let untapered_max = max - t * spread + noise_bound;
        if t > APEX_TIP_T {
            apex += 1;
            assert!(
                p.base_scale <= APEX_TIP_TAPER * untapered_max + 1e-5,
                "particle {i} at {t} not tapered: {}",
                p.base_scale
            );
            assert!(p.base_scale >= APEX_TIP_TAPER * min * 0.5 - 1e-5);
        } else {
            assert!(p.base_scale <= untapered_max + 1e-5, "particle {i} at {t}: {}", p.base_scale);
        }
    }
    assert!(apex > 0, "no particles reached the apex");
}

#[test]
fn batch_colors_follow_construction_order() {
    let cluster = gradient_spheres(80, 15);
    let opaque: Vec<_> = cluster
        .particles()
        .iter()
        .filter(|p| !p.accent)
        .map(|p| p.color)
        .collect();
    assert_eq!(cluster.opaque().colors, opaque);
}
