// DOM-backed display surface plus the interval that animates screen shake.
use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement, window};

use super::now_ms;
use crate::config::{ElementIds, GameConfig};
use crate::error::GameError;
use crate::rng::random_unit;
use crate::session::{DisplaySurface, Screen};
use crate::shake::{ShakeEffect, ShakeFrame};

pub struct DomDisplay {
    doc: Document,
    ids: ElementIds,
    start_screen: HtmlElement,
    game_screen: HtmlElement,
    target: HtmlImageElement,
    timer: Element,
    score: Element,
    best: Element,
    result: Element,
    restart: HtmlElement,
    shake: ShakeRunner,
}

impl DomDisplay {
    pub fn new(doc: &Document, config: &GameConfig) -> Result<Self, GameError> {
        let ids = &config.elements;
        let game_area = html_element(doc, &ids.game_area)?;
        Ok(Self {
            doc: doc.clone(),
            ids: ids.clone(),
            start_screen: html_element(doc, &ids.start_screen)?,
            game_screen: html_element(doc, &ids.game_screen)?,
            target: element(doc, &ids.target_image)?
                .dyn_into::<HtmlImageElement>()
                .map_err(|_| GameError::Js(format!("#{} is not an <img>", ids.target_image)))?,
            timer: element(doc, &ids.timer)?,
            score: element(doc, &ids.score)?,
            best: element(doc, &ids.best)?,
            result: element(doc, &ids.result)?,
            restart: html_element(doc, &ids.restart)?,
            shake: ShakeRunner::new(
                game_area,
                ShakeEffect::new(0.0, config.shake_duration_ms, config.shake_intensity_px),
                config.shake_frame_ms,
            ),
        })
    }
}

impl DisplaySurface for DomDisplay {
    fn show_image(&mut self, src: &str) {
        self.target.set_src(src);
    }

    fn set_score(&mut self, score: u32) {
        self.score.set_text_content(Some(&score.to_string()));
    }

    fn set_timer(&mut self, text: &str) {
        self.timer.set_text_content(Some(text));
    }

    fn set_best_time(&mut self, text: &str) {
        self.best.set_text_content(Some(text));
    }

    fn set_result(&mut self, text: &str) {
        self.result.set_text_content(Some(text));
    }

    fn set_restart_visible(&mut self, visible: bool) {
        set_display(&self.restart, if visible { "inline-block" } else { "none" });
    }

    fn set_instructions_visible(&mut self, visible: bool) {
        // optional overlay; pages without it are fine
        if let Some(el) = self
            .doc
            .get_element_by_id(&self.ids.instructions)
            .and_then(|e| e.dyn_into::<HtmlElement>().ok())
        {
            set_display(&el, if visible { "block" } else { "none" });
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        match screen {
            Screen::Start => {
                set_display(&self.game_screen, "none");
                set_display(&self.start_screen, "");
            }
            Screen::Game => {
                set_display(&self.start_screen, "none");
                set_display(&self.game_screen, "flex");
            }
        }
    }

    fn shake(&mut self) {
        self.shake.start();
    }
}

struct ShakeState {
    effect: ShakeEffect,
    interval: Option<i32>,
    area: HtmlElement,
}

/// Owns one long-lived interval callback; `start` (re)arms it and the
/// callback clears its own interval once the effect is done.
struct ShakeRunner {
    state: Rc<RefCell<ShakeState>>,
    tick: Closure<dyn FnMut()>,
    frame_ms: i32,
}

impl ShakeRunner {
    fn new(area: HtmlElement, effect: ShakeEffect, frame_ms: u32) -> Self {
        let state = Rc::new(RefCell::new(ShakeState {
            effect,
            interval: None,
            area,
        }));
        let tick_state = state.clone();
        let tick = Closure::wrap(Box::new(move || {
            let mut st = tick_state.borrow_mut();
            let frame = st.effect.frame(now_ms(), random_unit(), random_unit());
            set_transform(&st.area, &frame.css_transform());
            if frame == ShakeFrame::Done {
                if let (Some(id), Some(w)) = (st.interval.take(), window()) {
                    w.clear_interval_with_handle(id);
                }
            }
        }) as Box<dyn FnMut()>);
        Self {
            state,
            tick,
            frame_ms: frame_ms.max(1) as i32,
        }
    }

    fn start(&mut self) {
        let mut st = self.state.borrow_mut();
        st.effect.restart(now_ms());
        if st.interval.is_some() {
            return;
        }
        let Some(w) = window() else { return };
        match w.set_interval_with_callback_and_timeout_and_arguments_0(
            self.tick.as_ref().unchecked_ref(),
            self.frame_ms,
        ) {
            Ok(id) => st.interval = Some(id),
            Err(e) => log::debug!("shake interval refused: {e:?}"),
        }
    }
}

impl Drop for ShakeRunner {
    fn drop(&mut self) {
        if let (Some(id), Some(w)) = (self.state.borrow_mut().interval.take(), window()) {
            w.clear_interval_with_handle(id);
        }
    }
}

fn element(doc: &Document, id: &str) -> Result<Element, GameError> {
    doc.get_element_by_id(id)
        .ok_or_else(|| GameError::MissingElement(id.to_string()))
}

fn html_element(doc: &Document, id: &str) -> Result<HtmlElement, GameError> {
    element(doc, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| GameError::Js(format!("#{id} is not an HTML element")))
}

fn set_display(el: &HtmlElement, value: &str) {
    if let Err(e) = el.style().set_property("display", value) {
        log::debug!("display update failed: {e:?}");
    }
}

fn set_transform(el: &HtmlElement, value: &str) {
    if let Err(e) = el.style().set_property("transform", value) {
        log::debug!("transform update failed: {e:?}");
    }
}
