//! Frame capture: raw RGB frames, the ASCII PPM codec and numbered capture
//! files on disk.

pub mod error;
pub mod frame;
pub mod ppm;
pub mod session;

pub use error::{CaptureError, PpmError};
pub use frame::{CapturedFrame, PixelLayout, RowOrder};
pub use ppm::{read_ppm, write_ppm};
pub use session::CaptureSession;
