//! The orrery application: window, input and the per-frame
//! simulate, draw and capture loop.

pub mod error;
pub mod input;
pub mod platform;
pub mod window;

pub use error::AppError;
pub use window::{AppState, run};
