use std::io::Read;

use super::super::format::from_decoded_bytes;
use super::super::{Geometry, PixelBuffer};
use super::ImageReader;
use crate::Error;

/// Reads headerless, interleaved 8-bit frames whose geometry is known up front.
pub struct RawImageReader<T: Read> {
    reader: T,
    geometry: Geometry,
    source_name: String,
}

impl<T: Read> RawImageReader<T> {
    pub fn new(reader: T, geometry: Geometry, source_name: impl Into<String>) -> Self {
        Self {
            reader,
            geometry,
            source_name: source_name.into(),
        }
    }
}

impl<T: Read> ImageReader<u8> for RawImageReader<T> {
    fn read_image(&mut self) -> crate::Result<PixelBuffer<u8>> {
        let mut bytes = Vec::new();
        self.reader
            .read_to_end(&mut bytes)
            .map_err(|e| Error::FailedToReadImageData(self.source_name.clone(), e))?;
        from_decoded_bytes(
            bytes,
            self.geometry.width,
            self.geometry.height,
            self.geometry.channels,
        )
    }
}
