use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("{name} must be a finite, non-negative number (got {value})")]
    Negative { name: &'static str, value: f64 },
    #[error("size range is inverted: min {min} > max {max}")]
    InvertedSizeRange { min: f64, max: f64 },
}

/// Failures while wiring the field into a page. A missing container is not one of
/// these; that case leaves the field inert.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("2d canvas context unavailable")]
    NoContext,
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("DOM call failed: {0}")]
    Js(String),
}

impl From<JsValue> for FieldError {
    fn from(value: JsValue) -> Self {
        FieldError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

impl From<FieldError> for JsValue {
    fn from(err: FieldError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
