use super::{PixelBuffer, Sample};

pub mod raw;

pub trait ImageReader<T: Sample> {
    fn read_image(&mut self) -> crate::Result<PixelBuffer<T>>;
}
