// HTML audio feedback. Every failure here is logged and swallowed: browsers
// reject `play()` until the first user gesture, and sound is never critical.
use std::collections::HashMap;

use wasm_bindgen::prelude::*;
use web_sys::HtmlAudioElement;

use crate::config::SoundPaths;
use crate::error::GameError;
use crate::rng::random_index;
use crate::session::{FeedbackPlayer, Track};

thread_local! {
    // Shared by every AudioFeedback and never dropped: a pending `play()` can
    // reject after its player is gone (pause during load, replaced game).
    static ON_REJECT: Closure<dyn FnMut(JsValue)> = Closure::wrap(Box::new(|err: JsValue| {
        log::debug!("audio playback rejected: {err:?}");
    }) as Box<dyn FnMut(JsValue)>);
}

pub struct AudioFeedback {
    tracks: HashMap<Track, HtmlAudioElement>,
    impacts: Vec<HtmlAudioElement>,
}

impl AudioFeedback {
    pub fn new(sounds: &SoundPaths) -> Result<Self, GameError> {
        let mut tracks = HashMap::new();
        tracks.insert(Track::StartLoop, audio(&sounds.start_loop, true)?);
        tracks.insert(Track::GameplayLoop, audio(&sounds.gameplay_loop, true)?);
        tracks.insert(Track::Win, audio(&sounds.win, false)?);
        tracks.insert(Track::Lose, audio(&sounds.lose, false)?);
        let impacts = sounds
            .impacts
            .iter()
            .map(|src| audio(src, false))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tracks, impacts })
    }

    fn start(&self, el: &HtmlAudioElement) {
        match el.play() {
            Ok(promise) => {
                ON_REJECT.with(|on_reject| {
                    let _ = promise.catch(on_reject);
                });
            }
            Err(e) => log::warn!("audio play failed: {e:?}"),
        }
    }
}

impl FeedbackPlayer for AudioFeedback {
    fn play(&mut self, track: Track) {
        if let Some(el) = self.tracks.get(&track) {
            self.start(el);
        }
    }

    fn pause(&mut self, track: Track) {
        if let Some(el) = self.tracks.get(&track) {
            if let Err(e) = el.pause() {
                log::debug!("audio pause failed: {e:?}");
            }
        }
    }

    fn rewind(&mut self, track: Track) {
        if let Some(el) = self.tracks.get(&track) {
            el.set_current_time(0.0);
        }
    }

    fn play_impact(&mut self) {
        if self.impacts.is_empty() {
            return;
        }
        let el = &self.impacts[random_index(self.impacts.len())];
        // rewind so rapid clicks retrigger the same sample
        el.set_current_time(0.0);
        self.start(el);
    }
}

fn audio(src: &str, looping: bool) -> Result<HtmlAudioElement, GameError> {
    let el = HtmlAudioElement::new_with_src(src)?;
    el.set_loop(looping);
    Ok(el)
}
