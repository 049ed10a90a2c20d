use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

use super::with_game;
use crate::error::GameError;
use crate::session::Ticker;

pub struct IntervalHandle {
    id: i32,
    closure: Closure<dyn FnMut()>,
}

/// Game timer on `setInterval`. Each tick re-enters the controller.
pub struct IntervalTicker {
    window: Window,
    // Cancellation usually happens from inside the tick that ends the game, so
    // the cancelled closure is parked here instead of dropped mid-call.
    retired: Option<Closure<dyn FnMut()>>,
}

impl IntervalTicker {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            retired: None,
        }
    }
}

impl Ticker for IntervalTicker {
    type Handle = IntervalHandle;

    fn every(&mut self, period_ms: u32) -> Result<IntervalHandle, GameError> {
        let closure = Closure::wrap(Box::new(move || {
            with_game(|game| game.on_tick());
        }) as Box<dyn FnMut()>);
        let id = self.window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            period_ms as i32,
        )?;
        Ok(IntervalHandle { id, closure })
    }

    fn cancel(&mut self, handle: IntervalHandle) {
        self.window.clear_interval_with_handle(handle.id);
        self.retired = Some(handle.closure);
    }
}
