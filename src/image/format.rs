use crate::Result;

use super::{PixelBuffer, Sample};

/// Builds an integer buffer from decoder output.
///
/// Fails with [`crate::Error::DecodeMismatch`] when `bytes` does not hold exactly
/// `width * height * channels` samples.
pub fn from_decoded_bytes(
    bytes: Vec<u8>,
    width: u32,
    height: u32,
    channels: u8,
) -> Result<PixelBuffer<u8>> {
    PixelBuffer::from_samples(width, height, channels, bytes)
}

pub fn to_float(buffer: &PixelBuffer<u8>) -> PixelBuffer<f32> {
    buffer.map_samples(|sample| sample as f32 / 255.0)
}

/// Scales by 255, clamps to `[0, 255]` and rounds to the nearest integer.
pub fn to_integer8(buffer: &PixelBuffer<f32>) -> PixelBuffer<u8> {
    buffer.map_samples(|sample| u8::from_accumulator(sample * 255.0))
}

/// Row-major, channel-interleaved bytes for display or encoding.
pub fn to_display_bytes<T: Sample>(buffer: &PixelBuffer<T>) -> Vec<u8> {
    T::display_bytes(buffer.samples()).into_owned()
}

#[cfg(test)]
mod test {
    use crate::error::Error;
    use crate::image::PixelBuffer;

    use super::{from_decoded_bytes, to_display_bytes, to_float, to_integer8};

    #[test]
    fn decode_matching_geometry() {
        let bytes: Vec<u8> = (0..40).collect();
        let buffer = from_decoded_bytes(bytes, 5, 2, 4).unwrap();
        assert_eq!(buffer.width(), 5);
        assert_eq!(buffer.height(), 2);
        assert_eq!(buffer.get(4, 1, 3).unwrap(), 39);
    }

    #[test]
    fn decode_mismatching_geometry() {
        let bytes: Vec<u8> = (0..40).collect();
        if let Err(Error::DecodeMismatch { expected, actual }) = from_decoded_bytes(bytes, 5, 2, 5) {
            assert_eq!((expected, actual), (50, 40));
            return;
        }
        panic!("Mismatch between byte count and geometry was not detected");
    }

    #[test]
    fn decode_zero_width() {
        let result = from_decoded_bytes(Vec::new(), 0, 2, 3);
        assert!(matches!(result, Err(Error::InvalidDimension { .. })));
    }

    #[test]
    fn decode_zero_dimension_with_bytes() {
        for (width, height, channels) in [(0, 2, 4), (5, 0, 4), (5, 2, 0)] {
            let result = from_decoded_bytes(vec![0_u8; 40], width, height, channels);
            assert!(
                matches!(result, Err(Error::InvalidDimension { .. })),
                "{}x{}x{} was not rejected as invalid dimension",
                width,
                height,
                channels
            );
        }
    }

    #[test]
    fn float_conversion_scales_to_unit_range() {
        let buffer = from_decoded_bytes(vec![0, 51, 255], 3, 1, 1).unwrap();
        let float = to_float(&buffer);
        assert_eq!(float.samples(), &[0.0, 0.2, 1.0]);
        assert_eq!(float.geometry(), buffer.geometry());
    }

    #[test]
    fn every_integer_value_survives_round_trip() {
        let bytes: Vec<u8> = (0..=255).collect();
        let buffer = from_decoded_bytes(bytes, 16, 16, 1).unwrap();
        let round_trip = to_integer8(&to_float(&buffer));
        assert_eq!(round_trip, buffer);
        assert_eq!(round_trip.get(0, 8, 0).unwrap(), 128);
    }

    #[test]
    fn integer_conversion_clamps_and_rounds() {
        let buffer = PixelBuffer::from_samples(5, 1, 1, vec![-0.5_f32, 0.0, 0.5, 1.0, 3.0]).unwrap();
        let integer = to_integer8(&buffer);
        assert_eq!(integer.samples(), &[0, 0, 128, 255, 255]);
    }

    #[test]
    fn display_bytes_of_integer_buffer_are_verbatim() {
        let bytes = vec![1, 2, 3, 4, 5, 6, 7, 8];
        let buffer = from_decoded_bytes(bytes.clone(), 2, 1, 4).unwrap();
        assert_eq!(to_display_bytes(&buffer), bytes);
    }

    #[test]
    fn display_bytes_of_float_buffer_are_converted() {
        let buffer = PixelBuffer::from_samples(2, 1, 2, vec![0.0_f32, 1.0, 0.5, 2.0]).unwrap();
        assert_eq!(to_display_bytes(&buffer), vec![0, 255, 128, 255]);
    }
}
