use std::sync::OnceLock;

use macroquad::prelude::*;
use tracing::{debug, error, info, warn};

use torus_life::{
    Automaton, CellsView, FrameHandle, FrameHost, FrameOutcome, FrameQueue, Initial,
    InputAdapter, LifeConfig, Pointer, RenderLoop, ScheduleError, SurfaceGeometry, logging,
    presets, rendering,
};

const MARGIN: f32 = 10.0;
const STATUS_HEIGHT: f32 = 30.0;

/// Settings read once, after the subscriber is up so parse warnings are kept.
fn config() -> &'static LifeConfig {
    static CONFIG: OnceLock<LifeConfig> = OnceLock::new();
    CONFIG.get_or_init(|| {
        logging::init_tracing();
        LifeConfig::from_env()
    })
}

fn window_conf() -> Conf {
    let (pw, ph) = config().surface_pixels().unwrap_or_default();
    Conf {
        window_title: "Game of Life".to_owned(),
        window_width: (pw as f32 + 2.0 * MARGIN) as i32,
        window_height: (ph as f32 + 2.0 * MARGIN + STATUS_HEIGHT) as i32,
        window_resizable: false,
        ..Default::default()
    }
}

/// Frames fire once per macroquad frame; redraws repaint a cached texture.
struct MacroquadHost {
    queue: FrameQueue,
    cell_size: u32,
    image: Image,
    texture: Texture2D,
}

impl MacroquadHost {
    fn new(image: Image, cell_size: u32) -> Self {
        let texture = Texture2D::from_image(&image);
        texture.set_filter(FilterMode::Nearest);
        Self {
            queue: FrameQueue::new(),
            cell_size,
            image,
            texture,
        }
    }
}

impl FrameHost for MacroquadHost {
    fn request_frame(&mut self) -> Result<FrameHandle, ScheduleError> {
        self.queue.request()
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.queue.cancel(handle);
    }

    fn redraw(&mut self, cells: CellsView<'_>) {
        rendering::paint_cells(cells, self.cell_size, &mut self.image);
        self.texture.update(&self.image);
    }
}

fn random_start() -> Initial {
    Initial::Random {
        seed: ::rand::random(),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config();
    info!(?config, "starting");
    info!("space play/pause, n step, r random, c clear, g glider, click toggles a cell");

    let automaton = match Automaton::new(config.width, config.height, config.initial()) {
        Ok(automaton) => automaton,
        Err(err) => {
            error!(%err, "cannot build grid");
            return;
        }
    };
    let Some(image) = rendering::blank_surface(config.width, config.height, config.cell_size)
    else {
        error!(
            width = config.width,
            height = config.height,
            "grid too large to display"
        );
        return;
    };

    let host = MacroquadHost::new(image, config.cell_size);
    let mut render_loop = if config.start_paused {
        RenderLoop::paused(automaton, host)
    } else {
        RenderLoop::new(automaton, host)
    };
    render_loop.redraw();

    let Some((pw, ph)) = config.surface_pixels() else {
        error!(?config, "grid too large to display");
        return;
    };
    let adapter = InputAdapter::new(config.cell_size);
    let surface = SurfaceGeometry::unscaled(MARGIN as f64, MARGIN as f64, pw, ph);

    loop {
        if let Some(handle) = render_loop.host_mut().queue.take_due() {
            match render_loop.on_frame(handle) {
                FrameOutcome::Failed(err) => error!(%err, "simulation halted"),
                FrameOutcome::Stopped(err) => warn!(%err, "loop stopped"),
                FrameOutcome::Rendered { .. } | FrameOutcome::Stale => {}
            }
        }

        if is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            if let Some((row, col)) =
                render_loop.toggle_at(&adapter, Pointer::new(x as f64, y as f64), &surface)
            {
                debug!(row, col, "toggled from pointer");
            }
        }

        if is_key_pressed(KeyCode::Space) {
            if let Err(err) = render_loop.toggle_running() {
                warn!(%err, "cannot resume");
            }
        }
        if is_key_pressed(KeyCode::N) {
            if let Err(err) = render_loop.step() {
                error!(%err, "step failed");
            }
        }

        let reset = if is_key_pressed(KeyCode::R) {
            Some(random_start())
        } else if is_key_pressed(KeyCode::C) {
            Some(Initial::Dead)
        } else if is_key_pressed(KeyCode::G) {
            Some(presets::glider().centred(config.width, config.height))
        } else {
            None
        };
        if let Some(initial) = reset {
            if let Err(err) = render_loop.reset(initial) {
                error!(%err, "reset failed");
            }
        }

        clear_background(DARKGRAY);
        draw_texture(&render_loop.host().texture, MARGIN, MARGIN, WHITE);

        let automaton = render_loop.automaton();
        let status = format!(
            "gen {} | alive {} | {} | {} fps",
            automaton.generation(),
            rendering::format_number(automaton.population()),
            if render_loop.is_running() { "running" } else { "paused" },
            get_fps(),
        );
        rendering::draw_status(&status, MARGIN, ph as f32 + MARGIN + STATUS_HEIGHT * 0.7);

        next_frame().await;
    }
}
