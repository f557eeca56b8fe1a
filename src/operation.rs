use std::str::FromStr;

use crate::error::Error;
use crate::image::channel::ChannelSelection;
use crate::image::convolution::{convolve, Kernel};
use crate::image::invert::invert;
use crate::image::{PixelBuffer, Sample};
use crate::Result;

const PARAMETER_SEPARATOR: char = ':';
const KERNEL_SIZE_SEPARATOR: char = 'x';
const WEIGHT_SEPARATOR: char = ',';

/// A single step of a processing chain.
#[derive(Clone, Debug, PartialEq)]
pub enum Operation {
    Invert,
    InvertWithAlpha,
    Filter(Kernel),
}

impl Operation {
    pub fn apply<T: Sample>(&self, mut buffer: PixelBuffer<T>) -> Result<PixelBuffer<T>> {
        match self {
            Self::Invert => {
                invert(&mut buffer, ChannelSelection::COLOR);
                Ok(buffer)
            }
            Self::InvertWithAlpha => {
                invert(&mut buffer, ChannelSelection::all());
                Ok(buffer)
            }
            Self::Filter(kernel) => convolve(&buffer, kernel),
        }
    }
}

pub fn apply_operations<T: Sample>(
    buffer: PixelBuffer<T>,
    operations: &[Operation],
) -> Result<PixelBuffer<T>> {
    operations
        .iter()
        .try_fold(buffer, |buffer, operation| operation.apply(buffer))
}

fn parse_parameter<P: FromStr>(value: Option<&str>, operation: &str) -> Result<P> {
    value
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| Error::InvalidOperation(operation.to_owned()))
}

fn parse_kernel_literal(size: Option<&str>, weights: Option<&str>, operation: &str) -> Result<Kernel> {
    let invalid = || Error::InvalidOperation(operation.to_owned());
    let (height, width) = size
        .and_then(|size| size.split_once(KERNEL_SIZE_SEPARATOR))
        .ok_or_else(invalid)?;
    let height = parse_parameter(Some(height), operation)?;
    let width = parse_parameter(Some(width), operation)?;
    let weights = weights
        .ok_or_else(invalid)?
        .split(WEIGHT_SEPARATOR)
        .map(|weight| parse_parameter(Some(weight.trim()), operation))
        .collect::<Result<Vec<f32>>>()?;
    Kernel::new(height, width, weights)
}

impl FromStr for Operation {
    type Err = Error;

    /// Accepts `invert`, `invert-alpha`, `identity`, `box:SIZE`,
    /// `gaussian:SIZE:SIGMA`, `sharpen:AMOUNT`, `edge`, `emboss` and
    /// `kernel:HEIGHTxWIDTH:W0,W1,...`.
    fn from_str(s: &str) -> Result<Self> {
        let mut parts = s.split(PARAMETER_SEPARATOR);
        let name = parts.next().unwrap_or_default();
        let first = parts.next();
        let second = parts.next();
        if parts.next().is_some() {
            return Err(Error::InvalidOperation(s.to_owned()));
        }
        let expects = |parameter_count: usize| {
            let given = first.iter().chain(second.iter()).count();
            if given == parameter_count {
                Ok(())
            } else {
                Err(Error::InvalidOperation(s.to_owned()))
            }
        };
        match name {
            "invert" => expects(0).map(|_| Self::Invert),
            "invert-alpha" => expects(0).map(|_| Self::InvertWithAlpha),
            "identity" => expects(0).map(|_| Self::Filter(Kernel::identity())),
            "edge" => expects(0).map(|_| Self::Filter(Kernel::edge_detect())),
            "emboss" => expects(0).map(|_| Self::Filter(Kernel::emboss())),
            "sharpen" => {
                expects(1)?;
                Ok(Self::Filter(Kernel::sharpen(parse_parameter(first, s)?)))
            }
            "box" => {
                expects(1)?;
                Ok(Self::Filter(Kernel::box_blur(parse_parameter(first, s)?)?))
            }
            "gaussian" => {
                expects(2)?;
                let size = parse_parameter(first, s)?;
                let sigma = parse_parameter(second, s)?;
                Ok(Self::Filter(Kernel::gaussian(size, sigma)?))
            }
            "kernel" => {
                expects(2)?;
                Ok(Self::Filter(parse_kernel_literal(first, second, s)?))
            }
            _ => Err(Error::InvalidOperation(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::error::Error;
    use crate::image::convolution::Kernel;
    use crate::image::PixelBuffer;

    use super::{apply_operations, Operation};

    #[test]
    fn parse_simple_operations() {
        assert_eq!("invert".parse::<Operation>().unwrap(), Operation::Invert);
        assert_eq!(
            "invert-alpha".parse::<Operation>().unwrap(),
            Operation::InvertWithAlpha
        );
        assert_eq!(
            "edge".parse::<Operation>().unwrap(),
            Operation::Filter(Kernel::edge_detect())
        );
    }

    #[test]
    fn parse_parameterized_operations() {
        assert_eq!(
            "box:5".parse::<Operation>().unwrap(),
            Operation::Filter(Kernel::box_blur(5).unwrap())
        );
        assert_eq!(
            "gaussian:3:0.8".parse::<Operation>().unwrap(),
            Operation::Filter(Kernel::gaussian(3, 0.8).unwrap())
        );
        assert_eq!(
            "sharpen:1.5".parse::<Operation>().unwrap(),
            Operation::Filter(Kernel::sharpen(1.5))
        );
    }

    #[test]
    fn parse_kernel_literal() {
        let operation: Operation = "kernel:1x3:0.25, 0.5, 0.25".parse().unwrap();
        assert_eq!(
            operation,
            Operation::Filter(Kernel::new(1, 3, vec![0.25, 0.5, 0.25]).unwrap())
        );
    }

    #[test]
    fn reject_even_kernel_literal() {
        let result = "kernel:4x1:1,1,1,1".parse::<Operation>();
        assert!(matches!(
            result,
            Err(Error::InvalidKernelDimension {
                height: 4,
                width: 1
            })
        ));
        assert!("box:4".parse::<Operation>().is_err());
    }

    #[test]
    fn reject_oversized_preset_without_allocating() {
        for operation in ["box:4294967295", "gaussian:4294967295:1.0", "box:65535"] {
            assert!(
                matches!(
                    operation.parse::<Operation>(),
                    Err(Error::InvalidKernelParameter("size"))
                ),
                "'{}' must be rejected",
                operation
            );
        }
    }

    #[test]
    fn reject_malformed_operations() {
        for operation in ["", "blur", "box", "box:x", "invert:1", "gaussian:3", "kernel:3:1"] {
            assert!(
                operation.parse::<Operation>().is_err(),
                "'{}' must be rejected",
                operation
            );
        }
    }

    #[test]
    fn apply_chain_in_order() {
        let buffer = PixelBuffer::from_samples(5, 5, 4, vec![90_u8; 100]).unwrap();
        let operations = vec![
            Operation::Invert,
            Operation::Filter(Kernel::box_blur(3).unwrap()),
        ];
        let output = apply_operations(buffer, &operations).unwrap();
        assert_eq!((output.width(), output.height()), (3, 3));
        for pixel in output.samples().chunks_exact(4) {
            assert_eq!(pixel, &[165, 165, 165, 90]);
        }
    }

    #[test]
    fn chain_stops_at_first_failure() {
        let buffer = PixelBuffer::from_samples(2, 2, 1, vec![0_u8; 4]).unwrap();
        let operations = vec![
            Operation::Filter(Kernel::box_blur(3).unwrap()),
            Operation::Invert,
        ];
        assert!(matches!(
            apply_operations(buffer, &operations),
            Err(Error::KernelTooLarge { .. })
        ));
    }
}
