//! ASCII PPM (`P3`) encoding and decoding.
//!
//! Output layout: `P3\n<width> <height>\n255\n`, then one text line per
//! scanline, top row first. Every pixel is written as `R G B ` with a
//! trailing space.

use std::io::{Read, Write};

use crate::error::PpmError;
use crate::frame::{CapturedFrame, RowOrder};

/// Encode `frame` as ASCII PPM.
pub fn write_ppm<W: Write>(frame: &CapturedFrame, mut writer: W) -> Result<(), PpmError> {
    write!(writer, "P3\n{} {}\n255\n", frame.width(), frame.height())?;
    for row in frame.rows_top_down() {
        for px in row.chunks_exact(3) {
            write!(writer, "{} {} {} ", px[0], px[1], px[2])?;
        }
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

/// Decode an ASCII PPM into a top-down frame.
///
/// Accepts any whitespace between tokens and `#` comments, but only a max
/// value of 255.
pub fn read_ppm<R: Read>(mut reader: R) -> Result<CapturedFrame, PpmError> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;

    let mut tokens = text
        .lines()
        .map(|line| line.split('#').next().unwrap_or(""))
        .flat_map(str::split_whitespace);

    let magic = tokens.next().unwrap_or_default();
    if magic != "P3" {
        return Err(PpmError::BadMagic(magic.to_string()));
    }

    let width = parse_number(tokens.next(), "width")?;
    let height = parse_number(tokens.next(), "height")?;
    let max = parse_number(tokens.next(), "max value")?;
    if max != 255 {
        return Err(PpmError::UnsupportedMaxValue(max));
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or(PpmError::TooLarge { width, height })?;
    // Every sample takes at least two bytes of text, so the input bounds the
    // allocation regardless of what the header claims.
    let mut rgb = Vec::with_capacity(expected.min(text.len() / 2));
    for token in tokens {
        let sample: u8 = token.parse().map_err(|_| PpmError::Malformed {
            what: "sample",
            token: Some(token.to_string()),
        })?;
        rgb.push(sample);
    }

    CapturedFrame::new(width, height, rgb, RowOrder::TopDown)
}

fn parse_number(token: Option<&str>, what: &'static str) -> Result<u32, PpmError> {
    let token = token.ok_or(PpmError::Malformed { what, token: None })?;
    token.parse().map_err(|_| PpmError::Malformed {
        what,
        token: Some(token.to_string()),
    })
}
