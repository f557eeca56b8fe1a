use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
    sync::Arc,
};

pub use batch::{BatchJob, BatchReport};
pub use cli::CLIParser;
pub use error::Error;
use image::{
    format::{to_float, to_integer8},
    reader::{raw::RawImageReader, ImageReader},
    writer::{raw::RawImageWriter, ImageWriter},
    Geometry,
};
use operation::{apply_operations, Operation};

mod batch;
mod cli;
mod error;
pub mod image;
mod logger;
pub mod operation;

pub type Result<T> = std::result::Result<T, error::Error>;

pub struct Arguments {
    input_files: Vec<PathBuf>,
    output_dir: PathBuf,
    width: u32,
    height: u32,
    channels: u8,
    operations: Vec<Operation>,
    use_float: bool,
    number_of_threads: usize,
}

/// Everything needed to turn one raw input frame into one raw output frame.
#[derive(Clone, Debug)]
pub struct ProcessingOptions {
    pub geometry: Geometry,
    pub operations: Vec<Operation>,
    /// run the operations on normalized floating point samples
    pub use_float: bool,
}

impl From<&Arguments> for ProcessingOptions {
    fn from(value: &Arguments) -> Self {
        Self {
            geometry: Geometry::new(value.width, value.height, value.channels),
            operations: value.operations.clone(),
            use_float: value.use_float,
        }
    }
}

fn path_name(file_path: &Path) -> String {
    file_path.to_string_lossy().into_owned()
}

fn open_input_file(file_path: &Path) -> Result<File> {
    File::open(file_path)
        .map_err(|e| Error::UnableToOpenInputFileForReading(path_name(file_path), e))
}

fn open_output_file(file_path: &Path) -> Result<File> {
    OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(file_path)
        .map_err(|e| Error::UnableToOpenOutputFileForWriting(path_name(file_path), e))
}

/// Reads one raw frame, applies the operation chain and writes the result.
///
/// Returns the geometry of the written frame, which is smaller than the input
/// whenever a filter larger than 1x1 was applied.
pub fn process_raw_image(
    input_file_path: &Path,
    output_file_path: &Path,
    options: &ProcessingOptions,
) -> Result<Geometry> {
    let input_file = open_input_file(input_file_path)?;
    let mut reader = RawImageReader::new(
        BufReader::new(&input_file),
        options.geometry,
        path_name(input_file_path),
    );
    let image = reader.read_image()?;
    let output_image = if options.use_float {
        to_integer8(&apply_operations(to_float(&image), &options.operations)?)
    } else {
        apply_operations(image, &options.operations)?
    };
    let output_file = open_output_file(output_file_path)?;
    let mut writer = RawImageWriter::new(
        BufWriter::new(&output_file),
        &output_image,
        path_name(output_file_path),
    );
    writer.write_image()?;
    Ok(output_image.geometry())
}

fn output_file_path(input_file_path: &Path, output_dir: &Path) -> PathBuf {
    let file_name = input_file_path
        .file_name()
        .map(|name| name.to_owned())
        .unwrap_or_else(|| "output.raw".into());
    output_dir.join(file_name)
}

/// Processes every input file of `arguments` into the output directory.
pub fn process_raw_images(arguments: &Arguments) -> Vec<BatchReport> {
    let jobs = arguments
        .input_files
        .iter()
        .map(|input_file| BatchJob {
            input_file: input_file.clone(),
            output_file: output_file_path(input_file, &arguments.output_dir),
        })
        .collect();
    let options = Arc::new(ProcessingOptions::from(arguments));
    log::info!(
        "Processing {} frame(s) of {} with {} operation(s) on {} thread(s)",
        arguments.input_files.len(),
        options.geometry,
        options.operations.len(),
        arguments.number_of_threads
    );
    batch::run_batch(jobs, options, arguments.number_of_threads)
}
