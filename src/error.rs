//! Error type shared by the browser glue and config loading.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum GameError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("required element #{0} not found")]
    MissingElement(String),
    #[error("invalid game config: {0}")]
    InvalidConfig(String),
    #[error("javascript error: {0}")]
    Js(String),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            GameError::MissingElement("computer".into()).to_string(),
            "required element #computer not found"
        );
        assert_eq!(
            GameError::InvalidConfig("no damage images".into()).to_string(),
            "invalid game config: no damage images"
        );
    }
}
