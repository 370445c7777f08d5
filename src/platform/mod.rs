//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Time
//! - Storage (LocalStorage on web)
//! - Drawing (canvas 2D context on web)

#[cfg(target_arch = "wasm32")]
pub mod canvas;
#[cfg(target_arch = "wasm32")]
pub mod storage;

#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

/// Current wall-clock time as a Unix timestamp in milliseconds
#[cfg(target_arch = "wasm32")]
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}

/// Current wall-clock time as a Unix timestamp in milliseconds
#[cfg(not(target_arch = "wasm32"))]
pub fn now_ms() -> f64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs_f64() * 1000.0)
        .unwrap_or(0.0)
}
