//! Pseudorandom noise core for sound synthesis.
//!
//! Seedable integer generators ([`noise`]), exact conversion of their output
//! to float samples ([`convert`]) and to bounded integers ([`range`]), plus a
//! small offline renderer ([`dsp`]) and WASM bindings.

pub mod config;
pub mod convert;
pub mod dsp;
pub mod error;
pub mod noise;
pub mod range;

pub use config::NoiseConfig;
pub use convert::Interval;
pub use error::NoiseError;
pub use noise::{Generator, GeneratorKind, NoiseSource};
pub use range::{BoundedRange, Reduction};

use wasm_bindgen::prelude::*;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the synth-noise version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: names of the available generators, in JSON spelling.
#[wasm_bindgen]
pub fn generator_kinds() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&GeneratorKind::ALL)
        .map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: render noise described by a JSON config to a WAV byte array.
#[wasm_bindgen]
pub fn render_noise_wav(config_json: &str) -> Result<Vec<u8>, JsValue> {
    let config = NoiseConfig::from_json(config_json).map_err(to_js_error)?;
    dsp::renderer::render_wav(&config).map_err(to_js_error)
}

/// WASM-exposed: render noise to mono f32 samples.
/// Takes the config as a plain JS object for AudioWorklet use.
#[wasm_bindgen]
pub fn render_noise_samples(config: JsValue) -> Result<Vec<f32>, JsValue> {
    let config: NoiseConfig = serde_wasm_bindgen::from_value(config)
        .map_err(|e| JsValue::from_str(&format!("{e}")))?;
    dsp::renderer::render_samples(&config).map_err(to_js_error)
}

fn to_js_error(e: NoiseError) -> JsValue {
    JsValue::from_str(&format!("{e}"))
}
