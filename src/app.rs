use crate::config::Args;
use crate::draw;
use crate::driver::Driver;
use crate::game::{Dir, Game, GameState};
use crate::high_score::{HighScoreStore, JsonFileStore};
use crate::input::{KEY_BINDINGS, SwipeTracker};
use crate::layout::Layout;
use crate::screen::Screen;
use crate::timer::FrameTimer;
use anyhow::Context;
use pixels::{Pixels, SurfaceTexture};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{error, info};
use winit::dpi::LogicalSize;
use winit::event::{Event, TouchPhase, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;
use winit_input_helper::WinitInputHelper;

/// Everything the window shows and reacts to, minus the window itself.
pub struct App<R = SmallRng> {
    driver: Driver<FrameTimer, R>,
    screen: Screen,
    layout: Layout,
    swipe: SwipeTracker,
}

impl<R: Rng> App<R> {
    pub fn new(game: Game<R>, store: Box<dyn HighScoreStore>, cell: u32) -> Self {
        let layout = Layout::new(game.grid_size(), cell);
        let driver = Driver::new(game, FrameTimer::default(), store);
        let mut screen = Screen::default();
        driver.present(&mut screen);
        Self {
            driver,
            screen,
            layout,
            swipe: SwipeTracker::default(),
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn driver(&self) -> &Driver<FrameTimer, R> {
        &self.driver
    }

    pub fn steer(&mut self, dir: Dir) {
        self.driver.push_intent(dir);
    }

    pub fn start(&mut self) {
        self.driver.start(&mut self.screen);
    }

    pub fn reset(&mut self) {
        self.driver.reset(&mut self.screen);
    }

    /// The single on-screen button: start when idle, reset after a game over.
    fn button(&mut self) {
        match self.driver.state() {
            GameState::Idle => self.start(),
            GameState::GameOver => self.reset(),
            GameState::Running => {}
        }
    }

    /// Pointer or touch down, in frame pixels.
    pub fn press(&mut self, x: u32, y: u32) {
        if self.screen.button_label().is_some() && self.layout.button.contains(x, y) {
            self.button();
        } else if let Some(dir) = self.layout.pad_hit(x, y) {
            self.steer(dir);
        } else if self.layout.canvas.contains(x, y) {
            self.swipe.begin(x as f32, y as f32);
        }
    }

    /// Pointer or touch up, in frame pixels.
    pub fn release(&mut self, x: u32, y: u32) {
        if let Some(dir) = self.swipe.end(x as f32, y as f32) {
            self.steer(dir);
        }
    }

    /// Fires the tick timer if it is due. Returns whether a tick ran.
    pub fn update(&mut self, now: Instant) -> bool {
        if !self.driver.scheduler_mut().poll(now) {
            return false;
        }
        self.driver.on_timer(&mut self.screen).is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.driver.scheduler().deadline()
    }

    pub fn take_redraw(&mut self) -> bool {
        self.screen.take_dirty()
    }

    pub fn draw(&self, frame: &mut [u8]) {
        draw::draw_screen(frame, &self.layout, &self.screen);
    }

    pub fn shutdown(&mut self) {
        self.swipe.cancel();
        self.driver.shutdown();
    }
}

pub fn run(args: Args) -> anyhow::Result<()> {
    let rng = match args.seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_entropy(),
    };
    let game = Game::new_with_rng(args.grid_size, rng)?;
    let store = JsonFileStore::new(args.high_score_path());
    info!(path = %store.path().display(), grid = args.grid_size, "starting");
    let mut app = App::new(game, Box::new(store), args.cell_size);
    let (width, height) = (app.layout().width, app.layout().height);

    let event_loop = EventLoop::new();
    let mut input = WinitInputHelper::new();
    let window = WindowBuilder::new()
        .with_title("Snake")
        .with_inner_size(LogicalSize::new(width, height))
        .with_resizable(false)
        .build(&event_loop)
        .context("failed to create window")?;

    let mut pixels = {
        let size = window.inner_size();
        let surface = SurfaceTexture::new(size.width, size.height, &window);
        Pixels::new(width, height, surface).context("failed to create pixel surface")?
    };

    event_loop.run(move |event, _, control_flow| {
        if let Event::RedrawRequested(_) = event {
            app.draw(pixels.frame_mut());
            if let Err(err) = pixels.render() {
                error!(%err, "render failed");
                app.shutdown();
                *control_flow = ControlFlow::Exit;
                return;
            }
        }

        if let Event::WindowEvent {
            event: WindowEvent::Touch(touch),
            ..
        } = &event
        {
            let at = (touch.location.x as f32, touch.location.y as f32);
            if let Ok((x, y)) = pixels.window_pos_to_pixel(at) {
                match touch.phase {
                    TouchPhase::Started => app.press(x as u32, y as u32),
                    TouchPhase::Ended => app.release(x as u32, y as u32),
                    TouchPhase::Moved | TouchPhase::Cancelled => {}
                }
            }
        }

        if input.update(&event) {
            if input.key_pressed(VirtualKeyCode::Escape) || input.close_requested() || input.destroyed() {
                app.shutdown();
                *control_flow = ControlFlow::Exit;
                return;
            }

            for (key, dir) in KEY_BINDINGS {
                if input.key_pressed(key) {
                    app.steer(dir);
                }
            }
            if input.key_pressed(VirtualKeyCode::Space) || input.key_pressed(VirtualKeyCode::Return) {
                app.start();
            }
            if input.key_pressed(VirtualKeyCode::R) {
                app.reset();
            }

            if let Some(pos) = input.mouse() {
                if let Ok((x, y)) = pixels.window_pos_to_pixel(pos) {
                    if input.mouse_pressed(0) {
                        app.press(x as u32, y as u32);
                    }
                    if input.mouse_released(0) {
                        app.release(x as u32, y as u32);
                    }
                }
            }

            app.update(Instant::now());
            if app.take_redraw() {
                window.request_redraw();
            }
        }

        *control_flow = match app.deadline() {
            Some(at) => ControlFlow::WaitUntil(at),
            None => ControlFlow::Wait,
        };
    });
}
