use flappy_evo::simulation::evolution::Engine;
use flappy_evo::simulation::params::Params;
use macroquad::prelude::*;

mod graphics;

const MAX_TICKS_PER_FRAME: usize = 64;

fn window_conf() -> Conf {
    Conf {
        window_title: "Flappy Evo".to_owned(),
        window_width: 1000,
        window_height: 600,
        ..Default::default()
    }
}

/// Usage: `flappy-evo [params.json] [seed]`
fn build_engine() -> Result<Engine, flappy_evo::simulation::error::SimError> {
    let args: Vec<String> = std::env::args().collect();

    let params = match args.get(1) {
        Some(path) => Params::from_json_file(path)?,
        None => Params::default(),
    };

    match args.get(2).and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => Engine::new(params, seed),
        None => Engine::from_entropy(params),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let mut engine = match build_engine() {
        Ok(engine) => engine,
        Err(err) => {
            log::error!("failed to start simulation: {err}");
            return;
        }
    };
    let mut ticks_per_frame: usize = 1;

    log::info!("Starting neuroevolution simulation");

    loop {
        if is_key_pressed(KeyCode::Space) {
            engine.nudge_all();
        }
        if is_key_pressed(KeyCode::P) {
            match engine.dump_best_genome() {
                Ok(Some(json)) => log::info!("best genome:\n{json}"),
                Ok(None) => log::info!("no generation harvested yet"),
                Err(err) => log::error!("could not dump genome: {err}"),
            }
        }
        if is_key_pressed(KeyCode::Enter) {
            engine.toggle_running();
        }
        if is_key_pressed(KeyCode::Up) {
            ticks_per_frame = (ticks_per_frame * 2).min(MAX_TICKS_PER_FRAME);
        }
        if is_key_pressed(KeyCode::Down) {
            ticks_per_frame = (ticks_per_frame / 2).max(1);
        }

        if engine.is_running() {
            if let Err(err) = engine.step_n(ticks_per_frame) {
                log::error!("simulation stopped: {err}");
                return;
            }
        }

        clear_background(Color::from_rgba(17, 17, 24, 255));

        graphics::draw_obstacles(&engine);
        graphics::draw_agents(&engine);
        graphics::draw_hud(&engine, ticks_per_frame);

        next_frame().await
    }
}
