use std::fmt::Display;

#[derive(Debug)]
pub enum Error {
    InvalidDimension {
        width: u32,
        height: u32,
        channels: u8,
    },
    OutOfRange {
        x: u32,
        y: u32,
        channel: u8,
    },
    DecodeMismatch {
        expected: usize,
        actual: usize,
    },
    KernelTooLarge {
        kernel_height: u32,
        kernel_width: u32,
        height: u32,
        width: u32,
    },
    InvalidKernelDimension {
        height: u32,
        width: u32,
    },
    KernelWeightCountMismatch {
        expected: usize,
        actual: usize,
    },
    InvalidKernelParameter(&'static str),
    InvalidOperation(String),
    UnableToOpenInputFileForReading(String, std::io::Error),
    UnableToOpenOutputFileForWriting(String, std::io::Error),
    FailedToReadImageData(String, std::io::Error),
    FailedToWriteImageData(String, std::io::Error),
    TextureAlreadyUploaded,
    NoTextureToDelete,
    TextureUploadFailed(String),
    WorkerTerminated,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDimension {
                width,
                height,
                channels,
            } => {
                write!(
                    f,
                    "Invalid image dimension {}x{} with {} channels. Width and height must be positive, channels must be in range 1 to 4.",
                    width, height, channels
                )
            }
            Self::OutOfRange { x, y, channel } => {
                write!(
                    f,
                    "Sample access at x = {}, y = {}, channel = {} is out of range",
                    x, y, channel
                )
            }
            Self::DecodeMismatch { expected, actual } => {
                write!(
                    f,
                    "Decoded data has {} samples, but the declared geometry requires {}",
                    actual, expected
                )
            }
            Self::KernelTooLarge {
                kernel_height,
                kernel_width,
                height,
                width,
            } => {
                write!(
                    f,
                    "Kernel of size {}x{} does not fit into image of size {}x{}",
                    kernel_width, kernel_height, width, height
                )
            }
            Self::InvalidKernelDimension { height, width } => {
                write!(
                    f,
                    "Kernel dimensions must be odd and positive, but got {}x{}",
                    width, height
                )
            }
            Self::KernelWeightCountMismatch { expected, actual } => {
                write!(
                    f,
                    "Kernel requires {} weights, but {} were provided",
                    expected, actual
                )
            }
            Self::InvalidKernelParameter(parameter) => {
                write!(f, "Invalid kernel parameter '{}'", parameter)
            }
            Self::InvalidOperation(operation) => {
                write!(f, "Unknown or malformed operation '{}'", operation)
            }
            Self::UnableToOpenInputFileForReading(path, error) => {
                write!(
                    f,
                    "Unable to open input file '{}' for reading: {}",
                    path, error
                )
            }
            Self::UnableToOpenOutputFileForWriting(path, error) => {
                write!(
                    f,
                    "Unable to open output file '{}' for writing: {}",
                    path, error
                )
            }
            Self::FailedToReadImageData(path, error) => {
                write!(f, "Failed to read image data from '{}': {}", path, error)
            }
            Self::FailedToWriteImageData(path, error) => {
                write!(f, "Failed to write image data to '{}': {}", path, error)
            }
            Self::TextureAlreadyUploaded => write!(f, "Texture was already uploaded"),
            Self::NoTextureToDelete => write!(f, "No texture to delete"),
            Self::TextureUploadFailed(reason) => {
                write!(f, "Texture upload failed: {}", reason)
            }
            Self::WorkerTerminated => {
                write!(f, "Worker terminated before reporting a result")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::UnableToOpenInputFileForReading(_, error)
            | Self::UnableToOpenOutputFileForWriting(_, error)
            | Self::FailedToReadImageData(_, error)
            | Self::FailedToWriteImageData(_, error) => Some(error),
            _ => None,
        }
    }
}
