// Browser-only checks; run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use pc_smash::web::{self, AudioFeedback, DomDisplay, WebStore};
use pc_smash::{DisplaySurface, FeedbackPlayer, GameConfig, GameError, ScoreStore, Track};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use wasm_bindgen_test::*;
use web_sys::{Document, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

const ROOT_ID: &str = "pc-smash-page";

fn doc() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

// Replace any previous page with a fresh set of game elements, leaving out
// the ids listed in `skip`.
fn mount_page(config: &GameConfig, skip: &[&str]) {
    let doc = doc();
    if let Some(old) = doc.get_element_by_id(ROOT_ID) {
        old.remove();
    }
    let root = doc.create_element("div").unwrap();
    root.set_id(ROOT_ID);
    let ids = &config.elements;
    let parts = [
        (&ids.start_screen, "div"),
        (&ids.start_button, "button"),
        (&ids.game_screen, "div"),
        (&ids.game_area, "div"),
        (&ids.target_image, "img"),
        (&ids.timer, "span"),
        (&ids.score, "span"),
        (&ids.best, "span"),
        (&ids.result, "span"),
        (&ids.restart, "button"),
        (&ids.instructions, "div"),
    ];
    for (id, tag) in parts {
        if skip.contains(&id.as_str()) {
            continue;
        }
        let el = doc.create_element(tag).unwrap();
        el.set_id(id);
        root.append_child(&el).unwrap();
    }
    doc.body().unwrap().append_child(&root).unwrap();
}

fn html(id: &str) -> HtmlElement {
    doc().get_element_by_id(id).unwrap().dyn_into().unwrap()
}

fn text(id: &str) -> String {
    html(id).text_content().unwrap_or_default()
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn local_storage_round_trips_best_time() {
    let win = web_sys::window().unwrap();
    let mut store = WebStore::open(&win);
    store.set("pcSmashTestBest", 6.3);
    assert_eq!(store.get("pcSmashTestBest"), Some(6.3));
}

#[wasm_bindgen_test]
fn unparsable_local_value_reads_as_unset() {
    let win = web_sys::window().unwrap();
    let storage = win.local_storage().unwrap().unwrap();
    storage.set_item("pcSmashTestJunk", "fast!").unwrap();
    let store = WebStore::open(&win);
    assert_eq!(store.get("pcSmashTestJunk"), None);
}

#[wasm_bindgen_test]
fn boot_with_missing_start_button_installs_nothing() {
    let config = GameConfig::default();
    mount_page(&config, &["start-button"]);

    let err = web::boot(config).unwrap_err();
    assert_eq!(err, GameError::MissingElement("start-button".into()));
    // the title screen was never drawn
    assert_eq!(text("best"), "");
    assert_eq!(html("start-screen").style().get_property_value("display").unwrap(), "");
}

#[wasm_bindgen_test]
fn second_boot_rebinds_clicks_to_new_ids() {
    let first = GameConfig::default();
    mount_page(&first, &[]);
    web::boot(first).unwrap();

    let mut second = GameConfig::default();
    second.elements.start_button = "go".into();
    mount_page(&second, &[]);
    web::boot(second).unwrap();
    assert!(web::is_booted());

    html("go").click();
    assert_eq!(html("game-screen").style().get_property_value("display").unwrap(), "flex");
}

#[wasm_bindgen_test]
async fn shake_resets_transform_and_stops() {
    let config = GameConfig::default();
    mount_page(&config, &[]);
    let mut display = DomDisplay::new(&doc(), &config).unwrap();

    display.shake();
    sleep(150).await;
    let transform = html("game").style().get_property_value("transform").unwrap();
    assert_eq!(transform, "translate(0px, 0px)");

    // no further frames once the shake is over
    html("game").style().set_property("transform", "none").unwrap();
    sleep(60).await;
    assert_eq!(html("game").style().get_property_value("transform").unwrap(), "none");
}

#[wasm_bindgen_test]
async fn game_timer_stops_when_session_ends() {
    let config = GameConfig::default();
    mount_page(&config, &[]);
    web::boot(config).unwrap();

    html("start-button").click();
    html("game").click();
    sleep(350).await;
    assert_ne!(text("timer"), "0.0");

    for _ in 0..14 {
        html("game").click();
    }
    assert!(!text("result").is_empty(), "fifteen hits win the default game");
    let frozen = text("timer");
    sleep(300).await;
    assert_eq!(text("timer"), frozen);
}

#[wasm_bindgen_test]
async fn dropped_audio_survives_late_play_rejection() {
    let mut audio = AudioFeedback::new(&GameConfig::default().sounds).unwrap();
    audio.play(Track::StartLoop);
    audio.pause(Track::StartLoop);
    audio.play_impact();
    drop(audio);
    // rejected play() promises settle after the player is gone
    sleep(100).await;
}
