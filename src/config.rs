//! Gameplay constants, asset paths and DOM element ids.
//!
//! Everything tunable lives in [`GameConfig`]. The `Default` impl reproduces
//! the shipped game; with the `serde_json` feature a page can override any
//! subset of fields by passing JSON to `start_game_with_config`.

use crate::error::GameError;

/// DOM element ids the browser display binds to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ElementIds {
    pub start_screen: String,
    pub start_button: String,
    pub game_screen: String,
    /// Clickable area; also the element that shakes.
    pub game_area: String,
    pub target_image: String,
    pub timer: String,
    pub score: String,
    pub best: String,
    pub result: String,
    pub restart: String,
    /// Optional "click to start" overlay. Pages may omit it.
    pub instructions: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            start_screen: "start-screen".into(),
            start_button: "start-button".into(),
            game_screen: "game-screen".into(),
            game_area: "game".into(),
            target_image: "computer".into(),
            timer: "timer".into(),
            score: "score".into(),
            best: "best".into(),
            result: "result".into(),
            restart: "restart".into(),
            instructions: "click-instruction".into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SoundPaths {
    pub start_loop: String,
    pub gameplay_loop: String,
    pub win: String,
    pub lose: String,
    pub impacts: Vec<String>,
}

impl Default for SoundPaths {
    fn default() -> Self {
        Self {
            start_loop: "sounds/start.mp3".into(),
            gameplay_loop: "sounds/gameplay.mp3".into(),
            win: "sounds/win.mp3".into(),
            lose: "sounds/lose.mp3".into(),
            impacts: (1..=5).map(|i| format!("sounds/punch{i}.mp3")).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Damage states in order; the last one ends the game as a win.
    pub damage_images: Vec<String>,
    pub win_image: String,
    pub lose_image: String,
    pub cursor_image: String,
    pub hits_per_stage: u32,
    pub points_per_click: u32,
    pub tick_ms: u32,
    pub time_limit_ms: u32,
    pub shake_intensity_px: f64,
    pub shake_duration_ms: f64,
    pub shake_frame_ms: u32,
    pub best_time_key: String,
    pub sounds: SoundPaths,
    pub elements: ElementIds,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            damage_images: (0..=5).map(|i| format!("images/pc{i}.jpg")).collect(),
            win_image: "images/winscreen.jpg".into(),
            lose_image: "images/losescreen.jpg".into(),
            cursor_image: "images/cursor.cur".into(),
            hits_per_stage: 3,
            points_per_click: 10,
            tick_ms: 100,
            time_limit_ms: 10_000,
            shake_intensity_px: 10.0,
            shake_duration_ms: 100.0,
            shake_frame_ms: 16,
            best_time_key: "bestTime".into(),
            sounds: SoundPaths::default(),
            elements: ElementIds::default(),
        }
    }
}

impl GameConfig {
    /// Rejects configs the session controller cannot run with.
    pub fn validate(&self) -> Result<(), GameError> {
        if self.damage_images.is_empty() {
            return Err(GameError::InvalidConfig("no damage images".into()));
        }
        if self.hits_per_stage == 0 {
            return Err(GameError::InvalidConfig("hits_per_stage must be > 0".into()));
        }
        if self.tick_ms == 0 {
            return Err(GameError::InvalidConfig("tick_ms must be > 0".into()));
        }
        if self.time_limit_ms == 0 {
            return Err(GameError::InvalidConfig("time_limit_ms must be > 0".into()));
        }
        if !(self.shake_duration_ms.is_finite() && self.shake_duration_ms >= 0.0) {
            return Err(GameError::InvalidConfig(
                "shake_duration_ms must be a finite, non-negative number".into(),
            ));
        }
        if !(self.shake_intensity_px.is_finite() && self.shake_intensity_px >= 0.0) {
            return Err(GameError::InvalidConfig(
                "shake_intensity_px must be a finite, non-negative number".into(),
            ));
        }
        if self.shake_frame_ms == 0 {
            return Err(GameError::InvalidConfig("shake_frame_ms must be > 0".into()));
        }
        Ok(())
    }

    /// Parse a (possibly partial) JSON config; absent fields keep their defaults.
    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let cfg: GameConfig =
            serde_json::from_str(json).map_err(|e| GameError::InvalidConfig(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }
}
