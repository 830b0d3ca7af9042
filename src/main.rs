use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tree_app::{app, App, WishService};
use tree_core::Scene;

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut rng = StdRng::from_entropy();
    let scene = Scene::new(&mut rng);
    let wish_service = Arc::new(WishService::from_env());

    app::run(App::new(scene, wish_service))
}
