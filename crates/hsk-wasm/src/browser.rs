//! Browser WASM bindings using wasm-bindgen
//!
//! Thin `#[wasm_bindgen]` exports over [`crate::bridge`]. JavaScript numbers
//! arrive as `f64`; every result is a JSON string.

use wasm_bindgen::prelude::*;

use crate::bridge;

/// Route Rust panics to console.error instead of "RuntimeError: unreachable".
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub fn version() -> String {
    bridge::version()
}

// ============================================================================
// Setup
// ============================================================================

#[wasm_bindgen]
pub fn load_vocabulary(words_json: &str) -> String {
    bridge::load_vocabulary(words_json)
}

#[wasm_bindgen]
pub fn import_progress(progress_json: &str) -> String {
    bridge::import_progress(progress_json)
}

#[wasm_bindgen]
pub fn export_progress() -> String {
    bridge::export_progress()
}

// ============================================================================
// Practice
// ============================================================================

#[wasm_bindgen]
pub fn start_session(config_json: &str, now_ms: f64) -> String {
    bridge::start_session(config_json, now_ms)
}

#[wasm_bindgen]
pub fn change_level(level: u8, now_ms: f64) -> String {
    bridge::change_level(level, now_ms)
}

#[wasm_bindgen]
pub fn state() -> String {
    bridge::state()
}

#[wasm_bindgen]
pub fn reveal() -> String {
    bridge::reveal()
}

#[wasm_bindgen]
pub fn grade(grade: &str, now_ms: f64) -> String {
    bridge::grade(grade, now_ms)
}

#[wasm_bindgen]
pub fn advance() -> String {
    bridge::advance()
}

#[wasm_bindgen]
pub fn restart_session() -> String {
    bridge::restart_session()
}

#[wasm_bindgen]
pub fn stats() -> String {
    bridge::stats()
}

#[wasm_bindgen]
pub fn reset_stats() -> String {
    bridge::reset_stats()
}

#[wasm_bindgen]
pub fn drain_events() -> String {
    bridge::drain_events()
}

// ============================================================================
// Quiz
// ============================================================================

#[wasm_bindgen]
pub fn quiz_question(choices: u32) -> String {
    bridge::quiz_question(choices)
}

#[wasm_bindgen]
pub fn quiz_answer(index: u32, now_ms: f64) -> String {
    bridge::quiz_answer(index, now_ms)
}
