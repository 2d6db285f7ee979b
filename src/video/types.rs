use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{codecs::jpeg::JpegEncoder, ColorType, ImageBuffer, Rgb, RgbImage};

use crate::error::Result;

/// A single video frame passed between pipeline stages
///
/// This is a thin wrapper around an RGB image buffer. Sources produce
/// frames, processors take them by value and hand back the (possibly
/// modified) frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    buffer: RgbImage,
}

impl Frame {
    /// Create a new frame from an RGB image buffer
    pub fn new(buffer: RgbImage) -> Self {
        Self { buffer }
    }

    /// Create a new frame with the given dimensions filled with black
    pub fn new_black(width: u32, height: u32) -> Self {
        Self {
            buffer: ImageBuffer::new(width, height),
        }
    }

    /// Create a new frame with the given dimensions filled with the specified color
    pub fn new_filled(width: u32, height: u32, color: [u8; 3]) -> Self {
        let buffer = ImageBuffer::from_pixel(width, height, Rgb(color));
        Self { buffer }
    }

    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Get a pixel at the given coordinates (returns RGB array)
    pub fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.buffer.get_pixel(x, y).0
    }

    /// Set a pixel at the given coordinates
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 3]) {
        self.buffer.put_pixel(x, y, Rgb(color));
    }

    /// Paint a solid rectangle whose origin may lie outside the frame.
    ///
    /// Only the part overlapping the frame is drawn; a rectangle entirely
    /// off-frame is a no-op.
    pub fn fill_rect(&mut self, x: i64, y: i64, width: u32, height: u32, color: [u8; 3]) {
        let x0 = x.max(0);
        let y0 = y.max(0);
        let x1 = (x + i64::from(width)).min(i64::from(self.width()));
        let y1 = (y + i64::from(height)).min(i64::from(self.height()));
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let pixel = Rgb(color);
        for py in y0..y1 {
            for px in x0..x1 {
                self.buffer.put_pixel(px as u32, py as u32, pixel);
            }
        }
    }

    /// Get the underlying image buffer
    pub fn as_image(&self) -> &RgbImage {
        &self.buffer
    }

    /// Get a mutable reference to the underlying image buffer
    pub fn as_image_mut(&mut self) -> &mut RgbImage {
        &mut self.buffer
    }

    /// Create a frame from raw RGB bytes
    pub fn from_rgb_bytes(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        ImageBuffer::from_raw(width, height, data).map(|buffer| Self { buffer })
    }

    /// Encode the frame as a JPEG file
    ///
    /// `quality` is clamped to 1..=100.
    pub fn save_jpeg<P: AsRef<Path>>(&self, path: P, quality: u8) -> Result<()> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        {
            let mut encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
            encoder.encode(
                self.buffer.as_raw(),
                self.width(),
                self.height(),
                ColorType::Rgb8,
            )?;
        }
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_fill_rect_clips_to_bounds() {
        let mut frame = Frame::new_filled(10, 4, [0, 0, 0]);
        frame.fill_rect(-3, 0, 5, 4, [9, 9, 9]);

        assert_eq!(frame.get_pixel(0, 0), [9, 9, 9]);
        assert_eq!(frame.get_pixel(1, 3), [9, 9, 9]);
        assert_eq!(frame.get_pixel(2, 0), [0, 0, 0]);

        frame.fill_rect(8, 1, 5, 1, [7, 7, 7]);
        assert_eq!(frame.get_pixel(9, 1), [7, 7, 7]);
        assert_eq!(frame.get_pixel(9, 0), [0, 0, 0]);
    }

    #[test]
    fn test_fill_rect_fully_outside_is_noop() {
        let mut frame = Frame::new_filled(4, 4, [1, 2, 3]);
        let before = frame.clone();

        frame.fill_rect(-10, 0, 5, 4, [255, 0, 0]);
        frame.fill_rect(4, 0, 5, 4, [255, 0, 0]);
        frame.fill_rect(0, 0, 0, 4, [255, 0, 0]);

        assert_eq!(frame, before);
    }

    #[test]
    fn test_from_rgb_bytes_checks_length() {
        assert!(Frame::from_rgb_bytes(2, 2, vec![0; 12]).is_some());
        assert!(Frame::from_rgb_bytes(2, 2, vec![0; 11]).is_none());
    }

    #[test]
    fn test_save_jpeg() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("frame.jpg");

        Frame::new_filled(32, 16, [200, 50, 50]).save_jpeg(&path, 80).unwrap();

        let decoded = image::open(&path).unwrap();
        assert_eq!(decoded.width(), 32);
        assert_eq!(decoded.height(), 16);
    }
}
