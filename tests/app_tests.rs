// Shell state without a window: mode toggling, wish gating and the title line.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tree_app::wish::{WishRequest, LOADING_TEXT};
use tree_app::{Action, App, WishBackend, WishError, WishService};
use tree_core::{Mode, ParticleGroup, RecordingSink, Scene, SceneConfig, SteppedClock};

struct Echo;

impl WishBackend for Echo {
    fn generate(&self, _api_key: &str, _request: &WishRequest<'_>) -> Result<String, WishError> {
        std::thread::sleep(std::time::Duration::from_millis(50));
        Ok("Timeless gold.".into())
    }
}

fn small_app() -> App<Echo> {
    let mut config = SceneConfig::default();
    for o in &mut config.ornaments {
        o.count = 12;
    }
    config.fairy_light_count = 8;
    config.foliage_count = 16;
    config.sparkles.count = 10;
    let mut rng = StdRng::seed_from_u64(99);
    let scene = Scene::with_config(config, &mut rng);
    App::new(scene, Arc::new(WishService::new(Some("k".into()), Echo)))
}

#[test]
fn wish_is_ignored_until_assembled() {
    let mut app = small_app();
    assert_eq!(app.mode(), Mode::Scattered);
    assert!(app.apply(Action::RequestWish));
    assert!(!app.wish().is_loading());
    assert!(!app.title().contains("[W]"));
    assert!(app.title().contains("Assemble Tree"));

    assert!(app.apply(Action::ToggleMode));
    assert_eq!(app.mode(), Mode::Assembled);
    assert!(app.title().contains("Scatter Magic"));
    assert!(app.title().contains("[W]"));

    app.apply(Action::RequestWish);
    assert!(app.wish().is_loading());
    assert!(app.title().contains(LOADING_TEXT));
}

#[test]
fn wish_text_arrives_through_frame_updates() {
    let mut app = small_app();
    app.apply(Action::ToggleMode);
    app.apply(Action::RequestWish);
    let mut clock = SteppedClock::new(1.0 / 60.0);
    let deadline = std::time::Instant::now() + std::time::Duration::from_secs(5);
    while app.wish().is_loading() {
        app.update(&clock.tick(app.mode()));
        assert!(std::time::Instant::now() < deadline);
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    assert_eq!(app.wish().text(), Some("Timeless gold."));
    assert!(app.title().contains("\"Timeless gold.\""));
}

#[test]
fn quit_stops_the_loop() {
    let mut app = small_app();
    assert!(!app.apply(Action::Quit));
}

#[test]
fn frames_drive_every_group_toward_the_tree() {
    let mut app = small_app();
    app.apply(Action::ToggleMode);
    let mut clock = SteppedClock::new(1.0 / 60.0);
    for _ in 0..120 {
        app.update(&clock.tick(app.mode()));
    }
    for group in app.scene().groups() {
        assert!(group.progress() > 0.8, "{} at {}", group.label(), group.progress());
    }
    assert!(app.scene().rotation_y() > 0.0);

    let mut sink = RecordingSink::default();
    app.scene().emit(&mut sink);
    assert_eq!(sink.frames, 1);
    assert!(sink.instance_batches.iter().any(|(label, _)| label == "star"));
    assert_eq!(sink.point_clouds.len(), 2);
}
