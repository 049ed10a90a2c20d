use web_sys::{Storage, Window};

use crate::best_time::{MemoryStore, ScoreStore, parse_stored};

/// `localStorage` when the browser grants it, otherwise an in-memory map so
/// the game still runs (the best time just won't survive a reload).
pub enum WebStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl WebStore {
    pub fn open(win: &Window) -> Self {
        match win.local_storage() {
            Ok(Some(storage)) => WebStore::Local(storage),
            _ => {
                log::warn!("localStorage unavailable; best time will not persist");
                WebStore::Memory(MemoryStore::new())
            }
        }
    }
}

impl ScoreStore for WebStore {
    fn get(&self, key: &str) -> Option<f64> {
        match self {
            WebStore::Local(storage) => storage
                .get_item(key)
                .ok()
                .flatten()
                .and_then(|raw| parse_stored(&raw)),
            WebStore::Memory(mem) => mem.get(key),
        }
    }

    fn set(&mut self, key: &str, value: f64) {
        match self {
            WebStore::Local(storage) => {
                if let Err(e) = storage.set_item(key, &value.to_string()) {
                    log::warn!("could not persist {key}: {e:?}");
                }
            }
            WebStore::Memory(mem) => mem.set(key, value),
        }
    }
}
