//! Best (lowest) winning time and the store it is persisted in.

use std::collections::HashMap;

/// Key/value persistence for the best time. Implementations must treat a
/// missing or unreadable value as `None`.
pub trait ScoreStore {
    fn get(&self, key: &str) -> Option<f64>;
    fn set(&mut self, key: &str, value: f64);
}

/// In-process store; used natively and as a fallback when the browser denies
/// access to `localStorage`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw string, as a browser store would hold it.
    pub fn with_raw(mut self, key: &str, raw: &str) -> Self {
        self.values.insert(key.to_string(), raw.to_string());
        self
    }

    pub fn raw(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

impl ScoreStore for MemoryStore {
    fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(|raw| parse_stored(raw))
    }

    fn set(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Parse a persisted best time. Garbage, negatives and non-finite values read
/// as "no best time yet".
pub fn parse_stored(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
}

/// Best-time text: two decimals plus unit suffix, `"0s"` while unset.
pub fn format_best(best: Option<f64>) -> String {
    match best {
        Some(secs) => format!("{secs:.2}s"),
        None => "0s".to_string(),
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BestTime(Option<f64>);

impl BestTime {
    pub fn load(store: &dyn ScoreStore, key: &str) -> Self {
        BestTime(store.get(key))
    }

    pub fn get(&self) -> Option<f64> {
        self.0
    }

    /// Record a winning time. Returns true if it strictly beat the previous
    /// best (or there was none).
    pub fn record(&mut self, elapsed: f64) -> bool {
        match self.0 {
            Some(best) if elapsed >= best => false,
            _ => {
                self.0 = Some(elapsed);
                true
            }
        }
    }

    pub fn display(&self) -> String {
        format_best(self.0)
    }
}
