use std::path::PathBuf;
use std::sync::{mpsc, Arc};

use threadpool::ThreadPool;

use crate::error::Error;
use crate::image::Geometry;
use crate::{process_raw_image, ProcessingOptions, Result};

/// Input and output path of one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchJob {
    pub input_file: PathBuf,
    pub output_file: PathBuf,
}

/// Outcome of one [`BatchJob`]. On success it carries the output geometry.
#[derive(Debug)]
pub struct BatchReport {
    pub job: BatchJob,
    pub result: Result<Geometry>,
}

/// Processes every job on its own worker. Each worker exclusively owns the
/// frame it decodes; nothing is shared except the read-only options.
///
/// Reports are returned in job order.
pub fn run_batch(
    jobs: Vec<BatchJob>,
    options: Arc<ProcessingOptions>,
    number_of_threads: usize,
) -> Vec<BatchReport> {
    let threadpool = ThreadPool::new(number_of_threads.max(1));
    let (sender, receiver) = mpsc::channel();
    for (index, job) in jobs.iter().cloned().enumerate() {
        let sender = sender.clone();
        let options = Arc::clone(&options);
        threadpool.execute(move || {
            let result = process_raw_image(&job.input_file, &job.output_file, &options);
            match &result {
                Ok(geometry) => log::info!(
                    "Processed {} into {} ({})",
                    job.input_file.display(),
                    job.output_file.display(),
                    geometry
                ),
                Err(e) => log::error!("Processing of {} failed: {}", job.input_file.display(), e),
            }
            // the receiver outlives every worker
            let _ = sender.send((index, result));
        });
    }
    drop(sender);

    let mut results: Vec<Option<Result<Geometry>>> = jobs.iter().map(|_| None).collect();
    for (index, result) in receiver.iter() {
        results[index] = Some(result);
    }
    jobs.into_iter()
        .zip(results)
        .map(|(job, result)| BatchReport {
            job,
            result: result.unwrap_or(Err(Error::WorkerTerminated)),
        })
        .collect()
}
