//! The scene: owns the game state and its textures, paints every tick and
//! runs the tick/input loop.
//!
//! One logic task owns everything, so there is nothing to lock. Input events
//! and ticks are multiplexed with `tokio::select!`, which picks randomly
//! between ready branches; neither source has priority.

use std::io;
use std::mem;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, MissedTickBehavior};

use crate::error::GameError;
use crate::input::InputEvent;
use crate::settings::Settings;
use crate::shell::{Canvas, Flip, TITLE_COLOR};
use crate::sim::{GameEvent, GameState, TickInput, tick};

pub const GAME_OVER_TEXT: &str = "Game Over";

pub struct Scene<C: Canvas> {
    canvas: C,
    state: GameState,
    font: C::Font,
    background: C::Texture,
    bird_frames: Vec<C::Texture>,
    pipe: C::Texture,
    game_over: C::Texture,
    /// Input collected since the last tick
    input: TickInput,
    tick_period: Duration,
}

impl<C: Canvas> Scene<C> {
    /// Load every asset and set up a fresh game
    pub fn new(mut canvas: C, settings: &Settings) -> Result<Self, GameError> {
        let assets = &settings.assets;

        let background = load_image(&mut canvas, &assets.background)?;
        if assets.bird_frames.is_empty() {
            return Err(GameError::LoadImage {
                path: Default::default(),
                source: io::Error::new(io::ErrorKind::InvalidInput, "no bird frames configured"),
            });
        }
        let bird_frames = assets
            .bird_frames
            .iter()
            .map(|path| load_image(&mut canvas, path))
            .collect::<Result<Vec<_>, _>>()?;
        let pipe = load_image(&mut canvas, &assets.pipe)?;
        let font = canvas
            .load_font(&assets.font, assets.font_size)
            .map_err(|source| GameError::LoadFont {
                path: assets.font.clone(),
                source,
            })?;
        let game_over = render_text(&mut canvas, &font, GAME_OVER_TEXT)?;

        let seed = settings.resolve_seed();
        log::info!(
            "Scene ready: {} bird frames, seed {}",
            bird_frames.len(),
            seed
        );

        Ok(Self {
            canvas,
            state: GameState::new(seed, settings.rules()),
            font,
            background,
            bird_frames,
            pipe,
            game_over,
            input: TickInput::default(),
            tick_period: settings.tick_period(),
        })
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Advance the game one tick with the input collected so far
    pub fn update(&mut self) -> Option<GameEvent> {
        let input = mem::take(&mut self.input);
        tick(&mut self.state, &input)
    }

    /// Reset bird and pipes immediately
    pub fn restart(&mut self) {
        self.input = TickInput::default();
        self.state.restart();
    }

    /// Apply one input event. Returns true when the game should end.
    pub fn handle_event(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::Quit => return true,
            InputEvent::KeyPress => {
                // Dropped, not queued, while the bird is dead
                if !self.state.is_game_over() {
                    self.input.jump = true;
                }
            }
            InputEvent::WindowChange | InputEvent::PointerMove => {
                log::trace!("Ignoring {:?}", event);
            }
            InputEvent::Unknown(kind) => {
                log::debug!("Unknown event: {}", kind);
            }
        }
        false
    }

    /// Draw the current frame: "Game Over" while paused, otherwise the world
    pub fn paint(&mut self) -> Result<(), GameError> {
        self.canvas.clear().map_err(GameError::draw("frame"))?;

        if self.state.is_game_over() {
            self.canvas
                .draw(&self.game_over, None, Flip::None)
                .map_err(GameError::draw("game over text"))?;
        } else {
            self.canvas
                .draw(&self.background, None, Flip::None)
                .map_err(GameError::draw("background"))?;

            let bird = &self.state.bird;
            if let Some(frame) = self.bird_frames.get(bird.frame_index(self.bird_frames.len())) {
                self.canvas
                    .draw(frame, Some(bird.dest_rect()), Flip::None)
                    .map_err(GameError::draw("bird"))?;
            }

            for pipe in self.state.pipes.pipes() {
                let (rect, flip) = pipe.dest_rect();
                self.canvas
                    .draw(&self.pipe, Some(rect), flip)
                    .map_err(GameError::draw("pipe"))?;
            }
        }

        self.canvas.present().map_err(GameError::draw("frame"))
    }

    /// Show a full-screen title in the game font
    pub fn show_title(&mut self, text: &str) -> Result<(), GameError> {
        let title = render_text(&mut self.canvas, &self.font, text)?;
        self.canvas.clear().map_err(GameError::draw("title"))?;
        self.canvas
            .draw(&title, None, Flip::None)
            .map_err(GameError::draw("title"))?;
        self.canvas.present().map_err(GameError::draw("title"))
    }
}

impl<C> Scene<C>
where
    C: Canvas + Send + 'static,
{
    /// Run the game on its own task.
    ///
    /// The returned channel yields at most one fatal draw error and closes
    /// when the loop ends (quit, input closed, or draw failure).
    pub fn run(self, events: mpsc::UnboundedReceiver<InputEvent>) -> mpsc::Receiver<GameError> {
        let (errc, errors) = mpsc::channel(1);
        tokio::spawn(self.run_loop(events, errc));
        errors
    }

    async fn run_loop(
        mut self,
        mut events: mpsc::UnboundedReceiver<InputEvent>,
        errc: mpsc::Sender<GameError>,
    ) {
        let mut ticker = time::interval(self.tick_period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => {
                        if self.handle_event(event) {
                            log::info!("Quit requested");
                            break;
                        }
                    }
                    None => {
                        log::info!("Input closed, stopping");
                        break;
                    }
                },
                _ = ticker.tick() => {
                    if let Some(GameEvent::Died) = self.update() {
                        log::info!("Game over after {} ticks", self.state.time_ticks);
                    }
                    if let Err(e) = self.paint() {
                        log::error!("{}", e);
                        // The receiver may already be gone; nothing else to do
                        let _ = errc.send(e).await;
                        break;
                    }
                }
            }
        }
    }
}

fn load_image<C: Canvas>(canvas: &mut C, path: &std::path::Path) -> Result<C::Texture, GameError> {
    canvas
        .load_image(path)
        .map_err(|source| GameError::LoadImage {
            path: path.to_path_buf(),
            source,
        })
}

fn render_text<C: Canvas>(canvas: &mut C, font: &C::Font, text: &str) -> Result<C::Texture, GameError> {
    canvas
        .render_text(font, text, TITLE_COLOR)
        .map_err(|source| GameError::RenderText {
            text: text.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::shell::headless::{Call, HeadlessCanvas};
    use crate::sim::{GameMode, Pipe};
    use std::sync::{Arc, Mutex};

    fn settings() -> Settings {
        Settings {
            seed: Some(7),
            ..Settings::default()
        }
    }

    fn scene(canvas: HeadlessCanvas) -> Scene<HeadlessCanvas> {
        Scene::new(canvas, &settings()).unwrap()
    }

    fn draws(log: &Arc<Mutex<Vec<Call>>>) -> Vec<String> {
        log.lock()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                Call::Draw { texture, .. } => Some(texture.clone()),
                _ => None,
            })
            .collect()
    }

    fn presents(log: &Arc<Mutex<Vec<Call>>>) -> usize {
        log.lock()
            .unwrap()
            .iter()
            .filter(|call| **call == Call::Present)
            .count()
    }

    #[test]
    fn test_missing_asset_aborts_launch() {
        let canvas = HeadlessCanvas::new().with_missing("res/sprites/pipe.sprite");
        match Scene::new(canvas, &settings()) {
            Err(GameError::LoadImage { path, .. }) => {
                assert_eq!(path, std::path::PathBuf::from("res/sprites/pipe.sprite"));
            }
            other => panic!("expected LoadImage error, got {:?}", other.err()),
        }

        let canvas = HeadlessCanvas::new().with_missing("res/fonts/flappy.font");
        assert!(matches!(
            Scene::new(canvas, &settings()),
            Err(GameError::LoadFont { .. })
        ));
    }

    #[test]
    fn test_paint_order() {
        let canvas = HeadlessCanvas::new();
        let log = canvas.log();
        let mut scene = scene(canvas);
        scene.update();
        scene.paint().unwrap();

        let calls = log.lock().unwrap().clone();
        assert_eq!(calls.first(), Some(&Call::Clear));
        assert_eq!(calls.last(), Some(&Call::Present));
        assert_eq!(
            draws(&log),
            vec![
                "res/sprites/background.sprite".to_string(),
                "res/sprites/bird_frame_1.sprite".to_string(),
                "res/sprites/pipe.sprite".to_string(),
            ]
        );
    }

    #[test]
    fn test_pipe_drawn_with_flip() {
        let canvas = HeadlessCanvas::new();
        let log = canvas.log();
        let mut scene = scene(canvas);
        scene.state.pipes.push(Pipe {
            x: 400.0,
            h: 120.0,
            w: PIPE_WIDTH,
            inverted: true,
        });
        scene.paint().unwrap();

        let calls = log.lock().unwrap().clone();
        assert!(calls.contains(&Call::Draw {
            texture: "res/sprites/pipe.sprite".to_string(),
            dest: Some(crate::shell::Rect::new(
                glam::Vec2::new(400.0, 0.0),
                glam::Vec2::new(PIPE_WIDTH, 120.0)
            )),
            flip: Flip::Vertical,
        }));
    }

    #[test]
    fn test_animation_frame_advances() {
        let canvas = HeadlessCanvas::new();
        let log = canvas.log();
        let mut scene = scene(canvas);
        for _ in 0..10 {
            scene.state.bird.update();
        }
        scene.paint().unwrap();
        assert!(draws(&log).contains(&"res/sprites/bird_frame_2.sprite".to_string()));
    }

    #[test]
    fn test_game_over_paints_text_only() {
        let canvas = HeadlessCanvas::new();
        let log = canvas.log();
        let mut scene = scene(canvas);
        scene.state.bird.y = 0.5;
        scene.state.bird.speed = 1.0;
        assert_eq!(scene.update(), Some(GameEvent::Died));

        scene.paint().unwrap();
        assert_eq!(draws(&log), vec![format!("text:{}", GAME_OVER_TEXT)]);
    }

    #[test]
    fn test_events() {
        let mut scene = scene(HeadlessCanvas::new());
        assert!(!scene.handle_event(InputEvent::WindowChange));
        assert!(!scene.handle_event(InputEvent::PointerMove));
        assert!(!scene.handle_event(InputEvent::Unknown("paste")));
        assert!(!scene.input.jump);

        assert!(!scene.handle_event(InputEvent::KeyPress));
        let y = scene.state.bird.y;
        scene.update();
        assert_eq!(scene.state.bird.y, y + JUMP_SPEED);
        assert!(!scene.input.jump);

        assert!(scene.handle_event(InputEvent::Quit));
    }

    #[test]
    fn test_jump_dropped_while_dead() {
        let mut scene = scene(HeadlessCanvas::new());
        scene.state.bird.y = 0.5;
        scene.state.bird.speed = 1.0;
        scene.update();
        assert!(scene.state.is_game_over());

        scene.handle_event(InputEvent::KeyPress);
        assert!(!scene.input.jump);
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut scene = scene(HeadlessCanvas::new());
        for _ in 0..50 {
            scene.update();
        }
        scene.handle_event(InputEvent::KeyPress);
        scene.restart();
        scene.restart();

        let state = scene.state();
        assert_eq!(state.mode, GameMode::Playing);
        assert_eq!(state.bird.y, BIRD_SPAWN_Y);
        assert_eq!(state.bird.speed, 0.0);
        assert!(!state.bird.is_dead());
        assert!(state.pipes.is_empty());
        assert!(!scene.input.jump);
    }

    #[test]
    fn test_show_title() {
        let canvas = HeadlessCanvas::new();
        let log = canvas.log();
        let mut scene = scene(canvas);
        scene.show_title("Flappy Gopher").unwrap();
        assert_eq!(draws(&log), vec!["text:Flappy Gopher".to_string()]);
        assert_eq!(presents(&log), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit_ends_loop_and_closes_channel() {
        let canvas = HeadlessCanvas::new();
        let log = canvas.log();
        let scene = scene(canvas);

        let (tx, rx) = mpsc::unbounded_channel();
        tx.send(InputEvent::Quit).unwrap();
        let mut errors = scene.run(rx);

        // Closed without reporting an error
        assert!(errors.recv().await.is_none());
        let painted = presents(&log);

        time::sleep(Duration::from_millis(500)).await;
        assert_eq!(presents(&log), painted);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_drive_update_and_paint() {
        let canvas = HeadlessCanvas::new();
        let log = canvas.log();
        let scene = scene(canvas);

        let (tx, rx) = mpsc::unbounded_channel();
        let mut errors = scene.run(rx);

        // Non-game events never stop the loop
        tx.send(InputEvent::PointerMove).unwrap();
        tx.send(InputEvent::Unknown("mouse scroll")).unwrap();
        time::sleep(Duration::from_millis(1000)).await;
        assert!(presents(&log) >= 90);
        assert!(draws(&log).contains(&"res/sprites/pipe.sprite".to_string()));

        tx.send(InputEvent::Quit).unwrap();
        assert!(errors.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_key_press_lifts_bird_on_next_tick() {
        let canvas = HeadlessCanvas::new();
        let log = canvas.log();
        let scene = scene(canvas);

        // Screen-space top of the bird in every painted frame
        let bird_tops = |log: &Arc<Mutex<Vec<Call>>>| -> Vec<f32> {
            log.lock()
                .unwrap()
                .iter()
                .filter_map(|call| match call {
                    Call::Draw {
                        texture,
                        dest: Some(rect),
                        ..
                    } if texture.contains("bird_frame") => Some(rect.pos.y),
                    _ => None,
                })
                .collect()
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let mut errors = scene.run(rx);

        // Falling: y grows downward on screen
        time::sleep(Duration::from_millis(55)).await;
        let falling = bird_tops(&log);
        assert!(falling.len() >= 5);
        assert!(falling.windows(2).all(|w| w[1] >= w[0]));

        tx.send(InputEvent::KeyPress).unwrap();
        time::sleep(Duration::from_millis(10)).await;
        let tops = bird_tops(&log);
        assert!(tops.len() > falling.len());
        let before = falling[falling.len() - 1];
        let after = tops[falling.len()];
        assert!((before - after - JUMP_SPEED).abs() < 1e-3);

        tx.send(InputEvent::Quit).unwrap();
        assert!(errors.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_closed_ends_loop() {
        let scene = scene(HeadlessCanvas::new());
        let (tx, rx) = mpsc::unbounded_channel::<InputEvent>();
        let mut errors = scene.run(rx);
        drop(tx);
        assert!(errors.recv().await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_draw_failure_is_reported_once() {
        let canvas = HeadlessCanvas::new().failing_after(0);
        let log = canvas.log();
        let scene = scene(canvas);

        let (_tx, rx) = mpsc::unbounded_channel();
        let mut errors = scene.run(rx);

        match errors.recv().await {
            Some(GameError::Draw { what, .. }) => assert_eq!(what, "background"),
            other => panic!("expected draw error, got {:?}", other),
        }
        assert!(errors.recv().await.is_none());
        // Failed frame was never presented
        assert_eq!(presents(&log), 0);
    }
}
