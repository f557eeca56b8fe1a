use std::io::Write;

use super::super::{PixelBuffer, Sample};
use super::ImageWriter;
use crate::Error;

/// Writes the display bytes of an image without any header.
pub struct RawImageWriter<'a, W: Write, T> {
    writer: W,
    image: &'a PixelBuffer<T>,
    target_name: String,
}

impl<'a, W: Write, T: Sample> RawImageWriter<'a, W, T> {
    pub fn new(writer: W, image: &'a PixelBuffer<T>, target_name: impl Into<String>) -> Self {
        Self {
            writer,
            image,
            target_name: target_name.into(),
        }
    }
}

impl<W: Write, T: Sample> ImageWriter for RawImageWriter<'_, W, T> {
    fn write_image(&mut self) -> crate::Result<()> {
        let bytes = T::display_bytes(self.image.samples());
        self.writer
            .write_all(&bytes)
            .and_then(|_| self.writer.flush())
            .map_err(|e| Error::FailedToWriteImageData(self.target_name.clone(), e))
    }
}
