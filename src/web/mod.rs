//! Browser bindings: DOM display, HTML audio, `localStorage` and
//! `setInterval`, wired to a thread-local [`SessionController`].
//!
//! Every JS callback (button clicks, game-timer ticks) re-enters Rust through
//! [`with_game`], which borrows the single controller for the duration of the
//! callback. The browser event loop never runs two callbacks at once, so the
//! borrow cannot be contended in practice; if it ever is, the event is dropped
//! and logged rather than panicking.

mod audio;
mod display;
mod storage;
mod ticker;

pub use audio::AudioFeedback;
pub use display::DomDisplay;
pub use storage::WebStore;
pub use ticker::{IntervalHandle, IntervalTicker};

use std::cell::RefCell;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, window};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::session::SessionController;

pub type WebController = SessionController<DomDisplay, AudioFeedback, WebStore, IntervalTicker>;

thread_local! {
    static GAME: RefCell<Option<WebController>> = const { RefCell::new(None) };
    static LISTENERS: RefCell<Vec<ClickBinding>> = const { RefCell::new(Vec::new()) };
}

type ClickHandler = Closure<dyn FnMut(web_sys::MouseEvent)>;

/// A click listener we attached and can detach again on the next boot.
struct ClickBinding {
    target: Element,
    closure: ClickHandler,
}

impl ClickBinding {
    fn detach(&self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback("click", self.closure.as_ref().unchecked_ref())
        {
            log::debug!("could not detach click listener: {e:?}");
        }
    }
}

pub(crate) fn with_game<F>(f: F)
where
    F: FnOnce(&mut WebController),
{
    GAME.with(|cell| match cell.try_borrow_mut() {
        Ok(mut slot) => {
            if let Some(game) = slot.as_mut() {
                f(game);
            }
        }
        Err(_) => log::warn!("game state busy; event dropped"),
    });
}

/// Look up DOM elements, construct audio, load the best time and show the
/// title screen. Every element is resolved before anything is installed, so a
/// failed boot leaves the previous game (if any) untouched. Calling it again
/// shuts the old controller down and rebinds click listeners to the new ids.
pub fn boot(config: GameConfig) -> Result<(), GameError> {
    config.validate()?;
    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;

    let ids = &config.elements;
    let start_button = lookup(&doc, &ids.start_button)?;
    let game_area = lookup(&doc, &ids.game_area)?;
    let restart = lookup(&doc, &ids.restart)?;
    let cursor = config.cursor_image.clone();

    let display = DomDisplay::new(&doc, &config)?;
    let feedback = AudioFeedback::new(&config.sounds)?;
    let store = WebStore::open(&win);
    let ticker = IntervalTicker::new(win.clone());

    // Fails only on validation, which runs before any side effect.
    let mut controller = SessionController::new(config, display, feedback, store, ticker)?;

    let targets: [(Element, fn(&mut WebController)); 3] = [
        (start_button, |g| g.start()),
        (game_area, |g| g.on_click()),
        (restart, |g| g.reinitialize()),
    ];
    let mut bindings = Vec::with_capacity(targets.len());
    for (target, handler) in targets {
        match bind_click(target, handler) {
            Ok(binding) => bindings.push(binding),
            Err(e) => {
                for binding in &bindings {
                    binding.detach();
                }
                controller.shutdown();
                return Err(e);
            }
        }
    }

    if let Some(mut old) = GAME.with(|cell| cell.borrow_mut().take()) {
        old.shutdown();
        log::info!("replacing running game");
    }
    LISTENERS.with(|cell| {
        let mut bound = cell.borrow_mut();
        for old in bound.drain(..) {
            old.detach();
        }
        bound.extend(bindings);
    });
    GAME.with(|cell| *cell.borrow_mut() = Some(controller));
    set_cursor(&doc, &cursor);
    log::info!("game booted");
    Ok(())
}

/// True once `boot` has installed a controller.
pub fn is_booted() -> bool {
    GAME.with(|cell| cell.try_borrow().map(|g| g.is_some()).unwrap_or(true))
}

fn lookup(doc: &Document, id: &str) -> Result<Element, GameError> {
    doc.get_element_by_id(id)
        .ok_or_else(|| GameError::MissingElement(id.to_string()))
}

// Attach a listener; on failure the closure is dropped and nothing stays bound.
fn bind_click(
    target: Element,
    handler: fn(&mut WebController),
) -> Result<ClickBinding, GameError> {
    let closure: ClickHandler = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
        with_game(handler);
    }) as Box<dyn FnMut(_)>);
    target.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    Ok(ClickBinding { target, closure })
}

fn set_cursor(doc: &Document, cursor: &str) {
    if let Some(body) = doc.body() {
        let value = format!("url('{cursor}'), auto");
        if body.style().set_property("cursor", &value).is_err() {
            log::debug!("could not set custom cursor");
        }
    }
}

pub(crate) fn now_ms() -> f64 {
    window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or(0.0)
}
