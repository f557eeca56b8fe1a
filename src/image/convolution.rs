//! Valid-only 2-D linear filtering.
//!
//! The output only covers positions where the kernel fully overlaps the input,
//! so a `kh x kw` kernel removes `kh / 2` rows and `kw / 2` columns on every
//! side. Weights are applied as given; a kernel that should preserve
//! brightness must be normalized by the caller, see [`Kernel::normalized`].

use crate::error::Error;
use crate::Result;

use super::channel::{alpha_channel, color_channels};
use super::{PixelBuffer, Sample};

/// Largest side length accepted by the square kernel presets.
pub const MAX_PRESET_SIZE: u32 = 255;

/// Row-major grid of filter weights with odd dimensions.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    height: u32,
    width: u32,
    weights: Vec<f32>,
}

impl Kernel {
    pub fn new(height: u32, width: u32, weights: Vec<f32>) -> Result<Self> {
        if height % 2 == 0 || width % 2 == 0 {
            return Err(Error::InvalidKernelDimension { height, width });
        }
        let expected = height as usize * width as usize;
        if weights.len() != expected {
            return Err(Error::KernelWeightCountMismatch {
                expected,
                actual: weights.len(),
            });
        }
        Ok(Self {
            height,
            width,
            weights,
        })
    }

    pub fn identity() -> Self {
        Self {
            height: 1,
            width: 1,
            weights: vec![1.0],
        }
    }

    fn check_preset_size(size: u32) -> Result<()> {
        if size % 2 == 0 {
            return Err(Error::InvalidKernelDimension {
                height: size,
                width: size,
            });
        }
        if size > MAX_PRESET_SIZE {
            return Err(Error::InvalidKernelParameter("size"));
        }
        Ok(())
    }

    /// Square averaging kernel, already normalized.
    pub fn box_blur(size: u32) -> Result<Self> {
        Self::check_preset_size(size)?;
        let count = size as usize * size as usize;
        let weight = 1.0 / count as f32;
        Self::new(size, size, vec![weight; count])
    }

    /// Square Gaussian kernel, already normalized.
    pub fn gaussian(size: u32, sigma: f32) -> Result<Self> {
        if !(sigma > 0.0 && sigma.is_finite()) {
            return Err(Error::InvalidKernelParameter("sigma"));
        }
        Self::check_preset_size(size)?;
        let half = (size / 2) as i64;
        let sigma2 = 2.0 * sigma * sigma;
        let mut weights = Vec::with_capacity(size as usize * size as usize);
        for y in -half..=half {
            for x in -half..=half {
                let distance = (x * x + y * y) as f32;
                weights.push((-distance / sigma2).exp());
            }
        }
        Self::new(size, size, weights).map(|kernel| kernel.normalized())
    }

    #[rustfmt::skip]
    pub fn sharpen(amount: f32) -> Self {
        let center = 1.0 + 4.0 * amount;
        Self {
            height: 3,
            width: 3,
            weights: vec![
                0.0, -amount, 0.0,
                -amount, center, -amount,
                0.0, -amount, 0.0,
            ],
        }
    }

    #[rustfmt::skip]
    pub fn edge_detect() -> Self {
        Self {
            height: 3,
            width: 3,
            weights: vec![
                0.0, -1.0, 0.0,
                -1.0, 4.0, -1.0,
                0.0, -1.0, 0.0,
            ],
        }
    }

    #[rustfmt::skip]
    pub fn emboss() -> Self {
        Self {
            height: 3,
            width: 3,
            weights: vec![
                -2.0, -1.0, 0.0,
                -1.0, 1.0, 1.0,
                0.0, 1.0, 2.0,
            ],
        }
    }

    /// Weights divided by their sum. Kernels summing to zero are returned unchanged.
    pub fn normalized(&self) -> Self {
        let sum: f32 = self.weights.iter().sum();
        if sum == 0.0 {
            return self.clone();
        }
        Self {
            height: self.height,
            width: self.width,
            weights: self.weights.iter().map(|weight| weight / sum).collect(),
        }
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Position of the center cell as `(offset_y, offset_x)`.
    pub fn offset(&self) -> (u32, u32) {
        (self.height / 2, self.width / 2)
    }
}

/// Filters the color channels of `buffer` with `kernel` into a new, smaller buffer.
///
/// The alpha channel of a four channel buffer is copied from the input region
/// under the kernel center. Integer samples are accumulated as `f32`, then
/// clamped and rounded.
pub fn convolve<T: Sample>(buffer: &PixelBuffer<T>, kernel: &Kernel) -> Result<PixelBuffer<T>> {
    if kernel.height() > buffer.height() || kernel.width() > buffer.width() {
        return Err(Error::KernelTooLarge {
            kernel_height: kernel.height(),
            kernel_width: kernel.width(),
            height: buffer.height(),
            width: buffer.width(),
        });
    }
    let (offset_y, offset_x) = kernel.offset();
    let output_height = buffer.height() - 2 * offset_y;
    let output_width = buffer.width() - 2 * offset_x;
    log::trace!(
        "Convolving {} buffer with {}x{} kernel into {}x{}",
        buffer.geometry(),
        kernel.width(),
        kernel.height(),
        output_width,
        output_height
    );

    let mut output = PixelBuffer::<T>::new(output_width, output_height, buffer.channels())?;
    let channels = buffer.channels() as usize;
    let input_stride = buffer.row_stride();
    let output_stride = output.row_stride();
    let (offset_y, offset_x) = (offset_y as usize, offset_x as usize);
    let (kernel_height, kernel_width) = (kernel.height() as usize, kernel.width() as usize);
    let filtered = color_channels(buffer.channels());
    let alpha = alpha_channel(buffer.channels()).map(usize::from);
    let input = buffer.samples();
    let weights = kernel.weights();
    let samples = output.samples_mut();

    for oy in 0..output_height as usize {
        for ox in 0..output_width as usize {
            let output_index = oy * output_stride + ox * channels;
            for channel in filtered.clone().map(usize::from) {
                let mut accumulator = 0.0_f32;
                for ky in 0..kernel_height {
                    let row_start = (oy + ky) * input_stride;
                    for kx in 0..kernel_width {
                        let sample = input[row_start + (ox + kx) * channels + channel];
                        accumulator += sample.to_accumulator() * weights[ky * kernel_width + kx];
                    }
                }
                samples[output_index + channel] = T::from_accumulator(accumulator);
            }
            if let Some(alpha) = alpha {
                let input_index = (oy + offset_y) * input_stride + (ox + offset_x) * channels;
                samples[output_index + alpha] = input[input_index + alpha];
            }
        }
    }
    Ok(output)
}
