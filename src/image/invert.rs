use super::channel::ChannelSelection;
use super::{PixelBuffer, Sample};

/// Replaces every selected sample `v` with `MAX - v`, in place.
///
/// Unselected channels, commonly alpha, are left untouched. Applying the same
/// selection twice restores the original values.
pub fn invert<T: Sample>(buffer: &mut PixelBuffer<T>, selection: ChannelSelection) {
    let channels = buffer.channels() as usize;
    let selected: Vec<usize> = selection
        .channel_indices(buffer.channels())
        .map(usize::from)
        .collect();
    if selected.is_empty() || buffer.is_empty() {
        log::debug!(
            "Nothing to invert in {} buffer with selection {:?}",
            buffer.geometry(),
            selection
        );
        return;
    }
    for pixel in buffer.samples_mut().chunks_exact_mut(channels) {
        for &channel in &selected {
            pixel[channel] = pixel[channel].inverted();
        }
    }
}

/// Inverts the color channels and keeps alpha.
pub fn invert_color<T: Sample>(buffer: &mut PixelBuffer<T>) {
    invert(buffer, ChannelSelection::COLOR)
}

#[cfg(test)]
mod test {
    use crate::image::channel::ChannelSelection;
    use crate::image::PixelBuffer;

    use super::{invert, invert_color};

    #[rustfmt::skip]
    const RGBA_SAMPLES: [u8; 16] = [
         10,  20,  30, 200,
          0, 255, 128,  64,
         99,   1,   2,   0,
        255, 255, 255, 255,
    ];

    fn rgba_buffer() -> PixelBuffer<u8> {
        PixelBuffer::from_samples(2, 2, 4, Vec::from(RGBA_SAMPLES)).unwrap()
    }

    fn assert_eq_with_deviation(actual: f32, expected: f32, deviation: f32, index: usize) {
        assert!(
            (actual - expected).abs() <= deviation,
            "Value {} at index {} differs from {} by more than {}",
            actual,
            index,
            expected,
            deviation
        );
    }

    #[test]
    fn invert_integer_color_channels() {
        let mut buffer = rgba_buffer();
        invert_color(&mut buffer);
        assert_eq!(buffer.pixel(0, 0).unwrap(), &[245, 235, 225, 200]);
        assert_eq!(buffer.pixel(1, 0).unwrap(), &[255, 0, 127, 64]);
    }

    #[test]
    fn invert_keeps_alpha() {
        let mut buffer = rgba_buffer();
        invert(&mut buffer, ChannelSelection::default());
        for (index, pixel) in buffer.samples().chunks_exact(4).enumerate() {
            assert_eq!(
                pixel[3],
                RGBA_SAMPLES[index * 4 + 3],
                "Alpha of pixel {} changed",
                index
            );
        }
    }

    #[test]
    fn invert_with_alpha_when_requested() {
        let mut buffer = rgba_buffer();
        invert(&mut buffer, ChannelSelection::all());
        assert_eq!(buffer.pixel(0, 0).unwrap(), &[245, 235, 225, 55]);
    }

    #[test]
    fn invert_twice_restores_integer_buffer() {
        let mut buffer = rgba_buffer();
        invert_color(&mut buffer);
        invert_color(&mut buffer);
        assert_eq!(buffer, rgba_buffer());
    }

    #[test]
    fn invert_twice_restores_float_buffer() {
        let original: Vec<f32> = (0..27).map(|value| value as f32 / 26.0).collect();
        let mut buffer = PixelBuffer::from_samples(3, 3, 3, original.clone()).unwrap();
        invert_color(&mut buffer);
        assert_eq_with_deviation(buffer.get(0, 0, 0).unwrap(), 1.0, 1e-6, 0);
        invert_color(&mut buffer);
        for (index, (&actual, &expected)) in buffer.samples().iter().zip(&original).enumerate() {
            assert_eq_with_deviation(actual, expected, 1e-6, index);
        }
    }

    #[test]
    fn invert_single_channel() {
        let mut buffer = PixelBuffer::from_samples(3, 1, 1, vec![0_u8, 100, 255]).unwrap();
        invert_color(&mut buffer);
        assert_eq!(buffer.samples(), &[255, 155, 0]);
    }

    #[test]
    fn invert_with_empty_selection_is_noop() {
        let mut buffer = rgba_buffer();
        invert(&mut buffer, ChannelSelection::empty());
        assert_eq!(buffer, rgba_buffer());
    }
}
