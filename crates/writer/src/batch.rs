//! Parallel conversion of independent documents.
//!
//! Every input gets its own translator state, so documents never share
//! anything but the (read-only) parser and options.

use crate::convert::convert_with;
use crate::renderer::gfm::Options;
use rayon::prelude::*;
use rst2gfm_core::{DocumentParser, Rst2GfmError};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// A single document to convert.
#[derive(Debug, Clone)]
pub struct BatchInput {
    /// Document identifier (typically the file path).
    pub id: String,
    /// Document source.
    pub source: String,
}

/// Outcome for one document in a batch.
#[derive(Debug)]
pub struct BatchResult {
    /// Identifier matching the input.
    pub id: String,
    /// Markdown on success, the conversion error otherwise.
    pub result: Result<String, Rst2GfmError>,
}

/// Statistics for a batch run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatchStats {
    /// Total number of documents processed.
    pub total: usize,
    /// Number of successful conversions.
    pub succeeded: usize,
    /// Number of failed conversions.
    pub failed: usize,
    /// Wall-clock processing time in milliseconds.
    pub processing_time_ms: f64,
}

/// Options for batch processing.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum number of worker threads. Defaults to rayon's global pool.
    pub max_threads: Option<usize>,
    /// Whether to keep going after a failed document. Defaults to true.
    pub continue_on_error: bool,
    /// Translator options shared by every document.
    pub options: Options,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_threads: None,
            continue_on_error: true,
            options: Options::default(),
        }
    }
}

/// Results of a batch run, in input order.
#[derive(Debug)]
pub struct BatchProcessingResult {
    /// One result per processed input.
    pub results: Vec<BatchResult>,
    /// Aggregate statistics.
    pub stats: BatchStats,
}

/// Converts many documents, in parallel unless stopping on first error.
///
/// With `continue_on_error` disabled, documents are processed in order and
/// the run stops after the first failure; later inputs are not reported.
pub fn convert_batch<P>(
    parser: &P,
    inputs: Vec<BatchInput>,
    batch_options: &BatchOptions,
) -> BatchProcessingResult
where
    P: DocumentParser + Sync + ?Sized,
{
    let start = Instant::now();

    // Configure thread pool if max_threads is specified
    let pool = batch_options.max_threads.and_then(|max_threads| {
        rayon::ThreadPoolBuilder::new()
            .num_threads(max_threads)
            .build()
            .map_err(|e| log::warn!("falling back to the global thread pool: {}", e))
            .ok()
    });

    let total = inputs.len();
    let succeeded = AtomicUsize::new(0);
    let failed = AtomicUsize::new(0);

    let process_input = |input: BatchInput| -> BatchResult {
        let result = convert_with(parser, &input.source, &batch_options.options);
        match &result {
            Ok(_) => {
                succeeded.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                log::debug!("conversion of `{}` failed: {}", input.id, e);
                failed.fetch_add(1, Ordering::Relaxed);
            }
        }
        BatchResult {
            id: input.id,
            result,
        }
    };

    let results: Vec<BatchResult> = if batch_options.continue_on_error {
        match &pool {
            Some(pool) => pool.install(|| inputs.into_par_iter().map(process_input).collect()),
            None => inputs.into_par_iter().map(process_input).collect(),
        }
    } else {
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let result = process_input(input);
            let had_error = result.result.is_err();
            results.push(result);
            if had_error {
                break;
            }
        }
        results
    };

    BatchProcessingResult {
        stats: BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        },
        results,
    }
}
