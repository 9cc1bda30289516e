//! Numbered capture files on disk.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::error::CaptureError;
use crate::frame::CapturedFrame;
use crate::ppm::write_ppm;

/// Writes captured frames as `<prefix><ordinal>.ppm` under one directory.
///
/// The ordinal starts at 0 for each session and advances on every save
/// attempt, so a failed capture never has its name reused. With numbering
/// disabled every capture overwrites `<prefix>.ppm`.
#[derive(Debug)]
pub struct CaptureSession {
    output_dir: PathBuf,
    prefix: String,
    numbered: bool,
    counter: u64,
}

impl CaptureSession {
    pub fn new(output_dir: impl Into<PathBuf>, prefix: impl Into<String>, numbered: bool) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefix: prefix.into(),
            numbered,
            counter: 0,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Number of save attempts so far.
    pub fn count(&self) -> u64 {
        self.counter
    }

    /// Path the next [`save`](Self::save) will write to.
    pub fn next_path(&self) -> PathBuf {
        let name = if self.numbered {
            format!("{}{}.ppm", self.prefix, self.counter)
        } else {
            format!("{}.ppm", self.prefix)
        };
        self.output_dir.join(name)
    }

    /// Encode `frame` to the next file and return its path.
    pub fn save(&mut self, frame: &CapturedFrame) -> Result<PathBuf, CaptureError> {
        let path = self.next_path();
        let ordinal = self.counter;
        self.counter += 1;

        if frame.is_empty() {
            return Err(CaptureError::EmptyFrame {
                width: frame.width(),
                height: frame.height(),
            });
        }

        log::info!("Capture Window {ordinal}");

        let file = File::create(&path).map_err(|source| CaptureError::Create {
            path: path.clone(),
            source,
        })?;
        write_ppm(frame, BufWriter::new(file)).map_err(|source| CaptureError::Write {
            path: path.clone(),
            source,
        })?;

        log::debug!(
            "Wrote {}x{} capture to {}",
            frame.width(),
            frame.height(),
            path.display()
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ppm::read_ppm;

    #[test]
    fn test_paths_increment_from_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = CaptureSession::new(dir.path(), "solarSystem", true);
        let frame = CapturedFrame::solid(2, 2, [1, 2, 3]).unwrap();

        let first = session.save(&frame).unwrap();
        let second = session.save(&frame).unwrap();
        assert_eq!(first, dir.path().join("solarSystem0.ppm"));
        assert_eq!(second, dir.path().join("solarSystem1.ppm"));
        assert!(first.exists() && second.exists());
        assert_eq!(session.count(), 2);
    }

    #[test]
    fn test_saved_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = CaptureSession::new(dir.path(), "shot", true);
        let frame = CapturedFrame::solid(5, 4, [76, 102, 127]).unwrap();

        let path = session.save(&frame).unwrap();
        let decoded = read_ppm(File::open(path).unwrap()).unwrap();
        assert_eq!(decoded, frame);
    }

    #[test]
    fn test_unnumbered_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = CaptureSession::new(dir.path(), "solarSystem", false);

        session.save(&CapturedFrame::solid(1, 1, [1, 1, 1]).unwrap()).unwrap();
        let path = session.save(&CapturedFrame::solid(1, 1, [9, 9, 9]).unwrap()).unwrap();
        assert_eq!(path, dir.path().join("solarSystem.ppm"));

        let decoded = read_ppm(File::open(&path).unwrap()).unwrap();
        assert_eq!(decoded.pixel(0, 0), Some([9, 9, 9]));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_missing_directory_is_an_error_and_counter_advances() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");
        let mut session = CaptureSession::new(&missing, "shot", true);

        let err = session
            .save(&CapturedFrame::solid(1, 1, [0, 0, 0]).unwrap())
            .unwrap_err();
        assert!(matches!(err, CaptureError::Create { .. }));
        assert_eq!(session.next_path(), missing.join("shot1.ppm"));
    }

    #[test]
    fn test_empty_frame_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = CaptureSession::new(dir.path(), "shot", true);
        let err = session
            .save(&CapturedFrame::solid(0, 3, [0, 0, 0]).unwrap())
            .unwrap_err();
        assert!(matches!(err, CaptureError::EmptyFrame { width: 0, height: 3 }));
        assert!(!dir.path().join("shot0.ppm").exists());
    }
}
