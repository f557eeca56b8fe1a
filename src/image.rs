use std::borrow::Cow;
use std::fmt::{self, Display};

use crate::error::Error;
use crate::Result;

use channel::ChannelRole;

pub mod channel;
pub mod convolution;
pub mod format;
pub mod invert;
pub mod reader;
pub mod texture;
pub mod writer;

pub const MAX_CHANNELS: u8 = 4;

const DISPLAY_PRECISION: usize = 4;

/// Numeric encoding of the samples of a [`PixelBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Representation {
    /// 8-bit integer samples in the range 0 to 255
    Integer8,
    /// floating point samples, conventionally in the range 0.0 to 1.0
    Float,
}

/// A single scalar component of a pixel.
///
/// Implemented for `u8` ([`Representation::Integer8`]) and `f32`
/// ([`Representation::Float`]).
pub trait Sample: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    const REPRESENTATION: Representation;
    const MAX: Self;

    /// `MAX - self`
    fn inverted(self) -> Self;

    /// Value used as a summand while accumulating a filter response.
    fn to_accumulator(self) -> f32;

    /// Converts an accumulated filter response back to a sample.
    fn from_accumulator(value: f32) -> Self;

    /// Value scaled into the normalized range 0.0 to 1.0.
    fn to_normalized(self) -> f32;

    /// Interleaved 8-bit view of `samples`, borrowed when no conversion is necessary.
    fn display_bytes(samples: &[Self]) -> Cow<'_, [u8]>;
}

impl Sample for u8 {
    const REPRESENTATION: Representation = Representation::Integer8;
    const MAX: Self = u8::MAX;

    fn inverted(self) -> Self {
        Self::MAX - self
    }

    fn to_accumulator(self) -> f32 {
        self as f32
    }

    fn from_accumulator(value: f32) -> Self {
        value.clamp(0.0, 255.0).round() as u8
    }

    fn to_normalized(self) -> f32 {
        self as f32 / 255.0
    }

    fn display_bytes(samples: &[Self]) -> Cow<'_, [u8]> {
        Cow::Borrowed(samples)
    }
}

impl Sample for f32 {
    const REPRESENTATION: Representation = Representation::Float;
    const MAX: Self = 1.0;

    fn inverted(self) -> Self {
        Self::MAX - self
    }

    fn to_accumulator(self) -> f32 {
        self
    }

    fn from_accumulator(value: f32) -> Self {
        value
    }

    fn to_normalized(self) -> f32 {
        self
    }

    fn display_bytes(samples: &[Self]) -> Cow<'_, [u8]> {
        Cow::Owned(
            samples
                .iter()
                .map(|&sample| u8::from_accumulator(sample * 255.0))
                .collect(),
        )
    }
}

/// Width, height and channel count of an interleaved raster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

impl Geometry {
    pub fn new(width: u32, height: u32, channels: u8) -> Self {
        Self {
            width,
            height,
            channels,
        }
    }

    /// `width * height * channels`, or `None` if it does not fit into `usize`.
    pub fn sample_count(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.channels as usize)
    }

    fn validate(&self) -> Result<usize> {
        let invalid = Error::InvalidDimension {
            width: self.width,
            height: self.height,
            channels: self.channels,
        };
        if self.width == 0 || self.height == 0 || self.channels == 0 {
            return Err(invalid);
        }
        if self.channels > MAX_CHANNELS {
            return Err(invalid);
        }
        self.sample_count().ok_or(invalid)
    }
}

impl Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.channels)
    }
}

/// Row-major, channel-interleaved raster image.
///
/// The number of samples always equals `width * height * channels`. The shape
/// never changes after construction; transforms either mutate sample values or
/// produce a new buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct PixelBuffer<T> {
    width: u32,
    height: u32,
    channels: u8,
    samples: Vec<T>,
}

impl<T: Sample> PixelBuffer<T> {
    /// Allocates a zero-initialized buffer.
    pub fn new(width: u32, height: u32, channels: u8) -> Result<Self> {
        let sample_count = Geometry::new(width, height, channels).validate()?;
        Ok(Self {
            width,
            height,
            channels,
            samples: vec![T::default(); sample_count],
        })
    }

    /// Takes ownership of `samples` laid out row-major and channel-interleaved.
    ///
    /// Zero dimensions are [`Error::InvalidDimension`]. Otherwise the length is
    /// checked before the channel limit, so samples that do not match the
    /// declared shape are reported as [`Error::DecodeMismatch`].
    pub fn from_samples(width: u32, height: u32, channels: u8, samples: Vec<T>) -> Result<Self> {
        let geometry = Geometry::new(width, height, channels);
        if width == 0 || height == 0 || channels == 0 {
            return Err(Error::InvalidDimension {
                width,
                height,
                channels,
            });
        }
        if let Some(expected) = geometry.sample_count() {
            if samples.len() != expected {
                return Err(Error::DecodeMismatch {
                    expected,
                    actual: samples.len(),
                });
            }
        }
        geometry.validate()?;
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn channels(&self) -> u8 {
        self.channels
    }

    pub fn geometry(&self) -> Geometry {
        Geometry::new(self.width, self.height, self.channels)
    }

    pub fn representation(&self) -> Representation {
        T::REPRESENTATION
    }

    /// Number of samples in one row.
    pub fn row_stride(&self) -> usize {
        self.width as usize * self.channels as usize
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn get(&self, x: u32, y: u32, channel: u8) -> Result<T> {
        let index = self.index(x, y, channel)?;
        Ok(self.samples[index])
    }

    pub fn set(&mut self, x: u32, y: u32, channel: u8, value: T) -> Result<()> {
        let index = self.index(x, y, channel)?;
        self.samples[index] = value;
        Ok(())
    }

    /// All channels of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Result<&[T]> {
        let start = self.index(x, y, 0)?;
        Ok(&self.samples[start..start + self.channels as usize])
    }

    /// Read-only view of the interleaved samples.
    pub fn samples(&self) -> &[T] {
        &self.samples
    }

    pub fn into_samples(self) -> Vec<T> {
        self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [T] {
        &mut self.samples
    }

    /// Same shape, every sample mapped through `f`.
    pub(crate) fn map_samples<U, F>(&self, f: F) -> PixelBuffer<U>
    where
        U: Sample,
        F: Fn(T) -> U,
    {
        PixelBuffer {
            width: self.width,
            height: self.height,
            channels: self.channels,
            samples: self.samples.iter().copied().map(f).collect(),
        }
    }

    fn index(&self, x: u32, y: u32, channel: u8) -> Result<usize> {
        if x >= self.width || y >= self.height || channel >= self.channels {
            return Err(Error::OutOfRange { x, y, channel });
        }
        Ok(y as usize * self.row_stride() + x as usize * self.channels as usize + channel as usize)
    }

    fn channel_plane(&self, channel: u8) -> impl Iterator<Item = T> + '_ {
        self.samples
            .iter()
            .skip(channel as usize)
            .step_by(self.channels as usize)
            .copied()
    }
}

fn channel_name(channel: u8) -> String {
    match ChannelRole::of(channel) {
        Some(ChannelRole::Color0) => "Red".to_owned(),
        Some(ChannelRole::Color1) => "Green".to_owned(),
        Some(ChannelRole::Color2) => "Blue".to_owned(),
        Some(ChannelRole::Alpha) => "Alpha".to_owned(),
        None => format!("Channel {}", channel),
    }
}

fn format_normalized(value: f32) -> String {
    let formatted = format!("{:.*}", DISPLAY_PRECISION, value);
    match formatted.strip_prefix("0.") {
        Some(fraction) => format!(".{}", fraction),
        None => formatted,
    }
}

impl<T: Sample> Display for PixelBuffer<T> {
    /// Dumps every channel plane as normalized values, one image row per line.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for channel in 0..self.channels {
            writeln!(f, "{}", channel_name(channel))?;
            for (index, sample) in self.channel_plane(channel).enumerate() {
                write!(f, "{}", format_normalized(sample.to_normalized()))?;
                if (index + 1) % self.width as usize == 0 {
                    writeln!(f)?;
                } else {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
