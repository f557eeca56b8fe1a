use crate::operation::Operation;
use crate::Arguments;
use clap::{
    arg, crate_authors, crate_description, crate_name, crate_version, value_parser, Arg,
    ArgAction, ArgMatches, Command,
};
use std::ffi::OsString;
use std::path::PathBuf;
use std::{io, thread};

pub struct CLIParser {
    command: Command,
}

impl CLIParser {
    pub fn new() -> Self {
        let command = Self::create_base_command();
        let command = Self::register_arguments(command);
        CLIParser { command }
    }

    pub fn parse<I, T>(&mut self, itr: I) -> Arguments
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self
            .command
            .try_get_matches_from_mut(itr)
            .unwrap_or_else(|e| e.exit());
        Self::extract_arguments(&matches)
    }

    fn register_arguments(command: Command) -> Command {
        let command = Self::register_input_files_argument(command);
        let command = Self::register_output_dir_argument(command);
        let command = Self::register_width_argument(command);
        let command = Self::register_height_argument(command);
        let command = Self::register_channels_argument(command);
        let command = Self::register_operation_argument(command);
        let command = Self::register_float_argument(command);
        Self::register_threads_argument(command)
    }

    fn register_input_files_argument(command: Command) -> Command {
        command.arg(Self::create_input_files_argument())
    }

    fn register_output_dir_argument(command: Command) -> Command {
        command.arg(Self::create_output_dir_argument())
    }

    fn register_width_argument(command: Command) -> Command {
        command.arg(Self::create_width_argument())
    }

    fn register_height_argument(command: Command) -> Command {
        command.arg(Self::create_height_argument())
    }

    fn register_channels_argument(command: Command) -> Command {
        command.arg(Self::create_channels_argument())
    }

    fn register_operation_argument(command: Command) -> Command {
        command.arg(Self::create_operation_argument())
    }

    fn register_float_argument(command: Command) -> Command {
        command.arg(Self::create_float_argument())
    }

    fn register_threads_argument(command: Command) -> Command {
        command.arg(Self::create_threads_argument())
    }

    fn create_base_command() -> Command {
        Command::new(crate_name!())
            .version(crate_version!())
            .author(crate_authors!())
            .about(crate_description!())
    }

    fn create_input_files_argument() -> Arg {
        Arg::new("input_files")
            .help("Paths to raw, interleaved 8-bit input frames")
            .value_parser(value_parser!(PathBuf))
            .num_args(1..)
            .required(true)
    }

    fn create_output_dir_argument() -> Arg {
        arg!(output_dir: -o --output_dir <DIR> "Directory receiving the processed frames")
            .value_parser(value_parser!(PathBuf))
            .required(true)
    }

    fn create_width_argument() -> Arg {
        arg!(--width <WIDTH> "Width of the input frames in pixels")
            .value_parser(value_parser!(u32))
            .required(true)
    }

    fn create_height_argument() -> Arg {
        arg!(--height <HEIGHT> "Height of the input frames in pixels")
            .value_parser(value_parser!(u32))
            .required(true)
    }

    fn create_channels_argument() -> Arg {
        arg!(-c --channels <CHANNELS> "Interleaved channels per pixel")
            .default_value("4")
            .value_parser(value_parser!(u8).range(1..=4))
    }

    fn create_operation_argument() -> Arg {
        arg!(-x --operation <OPERATION> "Operation to apply, may be repeated: invert, invert-alpha, identity, box:SIZE, gaussian:SIZE:SIGMA, sharpen:AMOUNT, edge, emboss, kernel:HxW:W0,W1,...")
            .action(ArgAction::Append)
            .required(false)
            .value_parser(value_parser!(Operation))
    }

    fn create_float_argument() -> Arg {
        arg!(--float "Apply operations to normalized floating point samples")
            .action(ArgAction::SetTrue)
    }

    fn create_threads_argument() -> Arg {
        arg!(-t --threads <THREADS> "Number of Threads")
            .default_value(get_number_of_threads().unwrap_or(1).to_string())
            .required(false)
            .value_parser(value_parser!(usize))
    }

    fn extract_arguments(matches: &ArgMatches) -> Arguments {
        Arguments {
            input_files: Self::extract_input_files_argument(matches),
            output_dir: Self::extract_output_dir_argument(matches),
            width: Self::extract_width_argument(matches),
            height: Self::extract_height_argument(matches),
            channels: Self::extract_channels_argument(matches),
            operations: Self::extract_operation_argument(matches),
            use_float: Self::extract_float_argument(matches),
            number_of_threads: Self::extract_threads_argument(matches),
        }
    }

    fn extract_input_files_argument(matches: &ArgMatches) -> Vec<PathBuf> {
        matches
            .get_many::<PathBuf>("input_files")
            .expect("Required argument input_files not provided")
            .cloned()
            .collect()
    }

    fn extract_output_dir_argument(matches: &ArgMatches) -> PathBuf {
        matches
            .get_one::<PathBuf>("output_dir")
            .expect("Required argument output_dir not provided")
            .clone()
    }

    fn extract_width_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("width")
            .expect("Required argument width not provided")
            .to_owned()
    }

    fn extract_height_argument(matches: &ArgMatches) -> u32 {
        matches
            .get_one::<u32>("height")
            .expect("Required argument height not provided")
            .to_owned()
    }

    fn extract_channels_argument(matches: &ArgMatches) -> u8 {
        matches
            .get_one::<u8>("channels")
            .expect("Channels must be provided, but was unset.")
            .to_owned()
    }

    fn extract_operation_argument(matches: &ArgMatches) -> Vec<Operation> {
        matches
            .get_many::<Operation>("operation")
            .map(|operations| operations.cloned().collect())
            .unwrap_or_default()
    }

    fn extract_float_argument(matches: &ArgMatches) -> bool {
        matches.get_flag("float")
    }

    fn extract_threads_argument(matches: &ArgMatches) -> usize {
        matches
            .get_one::<usize>("threads")
            .expect("Required argument threads not provided")
            .to_owned()
    }
}

impl Default for CLIParser {
    fn default() -> Self {
        Self::new()
    }
}

fn get_number_of_threads() -> io::Result<usize> {
    Ok(thread::available_parallelism()?.get())
}
