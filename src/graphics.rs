use flappy_evo::simulation::evolution::Engine;
use flappy_evo::simulation::params::Params;
use macroquad::prelude::*;

const WALL_FILL: Color = Color::new(0.13, 0.13, 0.2, 1.0);
const HUD_FONT_SIZE: f32 = 20.0;

/// Maps playfield coordinates onto the current window.
struct Viewport {
    scale_x: f32,
    scale_y: f32,
}

impl Viewport {
    fn new(params: &Params) -> Self {
        Self {
            scale_x: screen_width() / params.width,
            scale_y: screen_height() / params.height,
        }
    }

    fn x(&self, x: f32) -> f32 {
        x * self.scale_x
    }

    fn y(&self, y: f32) -> f32 {
        y * self.scale_y
    }

    fn len(&self, len: f32) -> f32 {
        len * self.scale_x.min(self.scale_y)
    }
}

pub fn draw_agents(engine: &Engine) {
    let view = Viewport::new(engine.params());

    engine
        .population()
        .iter()
        .filter(|agent| agent.is_alive())
        .for_each(|agent| {
            let hue = f32::from(agent.hue) / 360.0;
            let x = view.x(agent.x);
            let y = view.y(agent.y);
            let r = view.len(agent.radius);

            draw_circle(x, y, r, macroquad::color::hsl_to_rgb(hue, 0.5, 0.25));
            draw_circle_lines(x, y, r, 3.0, macroquad::color::hsl_to_rgb(hue, 0.5, 0.5));
        });
}

pub fn draw_obstacles(engine: &Engine) {
    let params = engine.params();
    let view = Viewport::new(params);
    let half_width = params.obstacle_width * 0.5;

    for obstacle in engine.track().iter() {
        let left = view.x(obstacle.x - half_width);
        let width = view.x(params.obstacle_width);
        let top_height = view.y(obstacle.gap_top());
        let bottom_y = view.y(obstacle.gap_bottom());
        let bottom_height = screen_height() - bottom_y;

        draw_rectangle(left, 0.0, width, top_height, WALL_FILL);
        draw_rectangle_lines(left, 0.0, width, top_height, 2.0, PINK);
        draw_rectangle(left, bottom_y, width, bottom_height, WALL_FILL);
        draw_rectangle_lines(left, bottom_y, width, bottom_height, 2.0, PINK);

        // gap center marker
        let cx = view.x(obstacle.x);
        let cy = view.y(obstacle.gap_y);
        draw_line(cx - 4.0, cy - 4.0, cx + 4.0, cy + 4.0, 2.0, PINK);
        draw_line(cx - 4.0, cy + 4.0, cx + 4.0, cy - 4.0, 2.0, PINK);
    }
}

pub fn draw_hud(engine: &Engine, ticks_per_frame: usize) {
    let stats = engine.stats();

    let mut lines = vec![
        format!("Alive: {}", stats.alive),
        format!("Score: {}", stats.score),
    ];
    if let Some(best_ever) = stats.best_ever {
        lines.push(format!("Best Ever: {best_ever:.1}"));
    }
    if let Some(last_best) = stats.last_best {
        lines.push(format!("Gen {} Best: {last_best:.1}", stats.generation));
    }
    if ticks_per_frame > 1 {
        lines.push(format!("Speed: {ticks_per_frame}x"));
    }
    if !engine.is_running() {
        lines.push("Paused (Enter to resume)".to_owned());
    }

    for (i, line) in lines.iter().enumerate() {
        draw_text(line, 10.0, 24.0 + i as f32 * 20.0, HUD_FONT_SIZE, WHITE);
    }
}
