//! Session lifecycle and timing loop.
//!
//! [`SessionController`] owns the [`Session`] record and drives every state
//! change from two inputs: clicks on the target and ticks of the game timer.
//! All browser effects go through the collaborator traits below so the whole
//! state machine runs natively under test.
//!
//! ```text
//! NotStarted --start()--> Running --last damage state--> Ended(Win)
//!     ^                      \----time limit reached---> Ended(Lose)
//!     \------------------reinitialize()-----------------------/
//! ```

use crate::best_time::{BestTime, ScoreStore};
use crate::config::GameConfig;
use crate::damage::DamageImageSet;
use crate::error::GameError;

// --- Collaborators -----------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Start,
    Game,
}

/// Where the game is drawn. Text arguments arrive pre-formatted.
pub trait DisplaySurface {
    fn show_image(&mut self, src: &str);
    fn set_score(&mut self, score: u32);
    fn set_timer(&mut self, text: &str);
    fn set_best_time(&mut self, text: &str);
    fn set_result(&mut self, text: &str);
    fn set_restart_visible(&mut self, visible: bool);
    fn set_instructions_visible(&mut self, visible: bool);
    fn set_screen(&mut self, screen: Screen);
    /// Kick off (or restart) the transient screen shake.
    fn shake(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Track {
    StartLoop,
    GameplayLoop,
    Win,
    Lose,
}

/// Audio is best effort: implementations swallow playback failures.
pub trait FeedbackPlayer {
    fn play(&mut self, track: Track);
    fn pause(&mut self, track: Track);
    fn rewind(&mut self, track: Track);
    /// Play one impact sound chosen uniformly at random, from the start.
    fn play_impact(&mut self);
}

/// Schedules the repeating game-timer task.
pub trait Ticker {
    type Handle;
    fn every(&mut self, period_ms: u32) -> Result<Self::Handle, GameError>;
    fn cancel(&mut self, handle: Self::Handle);
}

// --- State -------------------------------------------------------------------

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Running,
    Ended(Outcome),
}

/// Per-playthrough counters. Elapsed time is kept in whole ticks so the
/// time-limit comparison is exact.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub damage_count: u32,
    pub score: u32,
    pub ticks: u32,
    pub is_over: bool,
    pub is_timer_running: bool,
}

impl Session {
    pub fn elapsed_ms(&self, tick_ms: u32) -> u64 {
        self.ticks as u64 * tick_ms as u64
    }

    pub fn elapsed_seconds(&self, tick_ms: u32) -> f64 {
        self.elapsed_ms(tick_ms) as f64 / 1000.0
    }
}

pub fn format_timer(seconds: f64) -> String {
    format!("{seconds:.1}")
}

// --- Controller --------------------------------------------------------------

pub struct SessionController<D, F, S, T>
where
    D: DisplaySurface,
    F: FeedbackPlayer,
    S: ScoreStore,
    T: Ticker,
{
    config: GameConfig,
    images: DamageImageSet,
    session: Session,
    phase: Phase,
    best: BestTime,
    timer: Option<T::Handle>,
    display: D,
    feedback: F,
    store: S,
    ticker: T,
}

impl<D, F, S, T> SessionController<D, F, S, T>
where
    D: DisplaySurface,
    F: FeedbackPlayer,
    S: ScoreStore,
    T: Ticker,
{
    /// Build a controller and put the title screen up.
    pub fn new(
        config: GameConfig,
        display: D,
        feedback: F,
        store: S,
        ticker: T,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let images = DamageImageSet::new(config.damage_images.clone(), config.hits_per_stage);
        let best = BestTime::load(&store, &config.best_time_key);
        let mut ctl = Self {
            config,
            images,
            session: Session::default(),
            phase: Phase::NotStarted,
            best,
            timer: None,
            display,
            feedback,
            store,
            ticker,
        };
        ctl.show_title();
        Ok(ctl)
    }

    fn show_title(&mut self) {
        self.display.set_best_time(&self.best.display());
        self.display.set_screen(Screen::Start);
        self.feedback.play(Track::StartLoop);
    }

    pub fn start(&mut self) {
        self.cancel_timer();
        self.session = Session::default();
        self.phase = Phase::Running;

        self.display.set_screen(Screen::Game);
        self.feedback.pause(Track::StartLoop);
        self.feedback.rewind(Track::GameplayLoop);
        self.feedback.play(Track::GameplayLoop);

        if let Some(first) = self.images.image(0) {
            self.display.show_image(first);
        }
        self.display.set_score(0);
        self.display.set_timer(&format_timer(0.0));
        self.display.set_result("");
        self.display.set_restart_visible(false);
        self.display.set_instructions_visible(true);
        log::info!("session started");
    }

    pub fn on_click(&mut self) {
        if self.phase != Phase::Running || self.session.is_over {
            return;
        }

        if !self.session.is_timer_running {
            match self.ticker.every(self.config.tick_ms) {
                Ok(handle) => {
                    self.timer = Some(handle);
                    self.session.is_timer_running = true;
                }
                Err(e) => log::warn!("could not start game timer: {e}"),
            }
            self.display.set_instructions_visible(false);
        }

        self.session.damage_count += 1;
        self.session.score += self.config.points_per_click;
        self.display.set_score(self.session.score);

        self.feedback.play_impact();

        let damage = self.session.damage_count;
        if let Some(src) = self.images.image(self.images.index_for(damage)) {
            self.display.show_image(src);
        }
        self.display.shake();

        if self.images.is_destroyed(damage) {
            self.end_session(Outcome::Win);
        }
    }

    pub fn on_tick(&mut self) {
        if !self.session.is_timer_running || self.session.is_over {
            return;
        }
        self.session.ticks += 1;
        let elapsed = self.elapsed_seconds();
        self.display.set_timer(&format_timer(elapsed));

        if self.session.elapsed_ms(self.config.tick_ms) >= self.config.time_limit_ms as u64 {
            self.end_session(Outcome::Lose);
        }
    }

    /// Idempotent: only the first call after a start has any effect.
    pub fn end_session(&mut self, outcome: Outcome) {
        if self.session.is_over || self.phase != Phase::Running {
            return;
        }
        self.session.is_over = true;
        self.phase = Phase::Ended(outcome);
        self.cancel_timer();

        self.display.set_restart_visible(true);
        self.feedback.pause(Track::GameplayLoop);

        let elapsed = self.elapsed_seconds();
        match outcome {
            Outcome::Win => {
                self.feedback.rewind(Track::Win);
                self.feedback.play(Track::Win);
                self.display.show_image(&self.config.win_image);
                self.display
                    .set_result(&format!("You smashed it in {elapsed:.2}s!"));

                if self.best.record(elapsed) {
                    self.store.set(&self.config.best_time_key, elapsed);
                    log::info!("new best time {elapsed:.2}s");
                }
                self.display.set_best_time(&self.best.display());
                log::info!("session won after {elapsed:.1}s");
            }
            Outcome::Lose => {
                self.feedback.rewind(Track::Lose);
                self.feedback.play(Track::Lose);
                self.display.show_image(&self.config.lose_image);
                self.display.set_result("Time's up!");
                log::info!("session lost with {} hits", self.session.damage_count);
            }
        }
    }

    /// Fresh session, best time re-read from the store, back to the title
    /// screen.
    pub fn reinitialize(&mut self) {
        self.cancel_timer();
        self.session = Session::default();
        self.phase = Phase::NotStarted;
        self.best = BestTime::load(&self.store, &self.config.best_time_key);

        for track in [Track::GameplayLoop, Track::Win, Track::Lose] {
            self.feedback.pause(track);
        }
        self.display.set_restart_visible(false);
        self.display.set_result("");
        self.feedback.rewind(Track::StartLoop);
        self.show_title();
        log::info!("game reinitialized");
    }

    /// Cancel the timer and silence every track before the controller is
    /// dropped or replaced.
    pub fn shutdown(&mut self) {
        self.cancel_timer();
        for track in [Track::StartLoop, Track::GameplayLoop, Track::Win, Track::Lose] {
            self.feedback.pause(track);
        }
    }

    fn cancel_timer(&mut self) {
        if let Some(handle) = self.timer.take() {
            self.ticker.cancel(handle);
        }
        self.session.is_timer_running = false;
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.session.elapsed_seconds(self.config.tick_ms)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn best_time(&self) -> Option<f64> {
        self.best.get()
    }

    pub fn current_image_index(&self) -> usize {
        self.images.index_for(self.session.damage_count)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }
}
