//! Parallel batch validation using Rayon
//!
//! Validates and normalizes line-oriented subnet input with:
//! - A configurable thread pool
//! - Per-line error reporting
//! - Progress updates on stderr

use anyhow::Result;
use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use ipval_subnet::Subnet;

/// Outcome of validating a single input line
#[derive(Debug, Clone)]
pub struct BatchResult {
    pub input: String,
    pub result: Result<Subnet, String>,
}

/// Batch processor with parallel execution
pub struct BatchProcessor {
    thread_pool: rayon::ThreadPool,
}

impl BatchProcessor {
    /// Create a new batch processor
    ///
    /// # Arguments
    ///
    /// * `num_threads` - Number of threads (default: CPU cores * 2)
    pub fn new(num_threads: Option<usize>) -> Result<Self> {
        let num_threads = num_threads.unwrap_or_else(|| num_cpus::get() * 2);

        let thread_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()?;

        Ok(Self { thread_pool })
    }

    /// Validate a batch of subnet strings in parallel
    ///
    /// Results come back in input order.
    pub fn process_lines(&self, lines: Vec<String>) -> Vec<BatchResult> {
        let total = lines.len();
        let processed = Arc::new(AtomicUsize::new(0));

        self.thread_pool.install(|| {
            lines
                .into_par_iter()
                .map(|line| {
                    let result = Subnet::parse(&line).map_err(|e| e.to_string());

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % 1000 == 0 || count == total {
                        eprintln!("Processed {}/{} lines", count, total);
                    }

                    BatchResult {
                        input: line,
                        result,
                    }
                })
                .collect()
        })
    }

    /// Get thread pool size
    pub fn thread_count(&self) -> usize {
        self.thread_pool.current_num_threads()
    }
}
