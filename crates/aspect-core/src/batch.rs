//! Batch operations over many images or many fingerprints.
//!
//! A failing item never stops the batch: its error is logged with the
//! offending identifier, recorded in the report, and processing moves on.
//! Reports keep items in input order and expose an aggregate status that
//! accounts for every item, not only the last one.
//!
//! The only failure that aborts a batch is an undecodable reference
//! fingerprint in [`compare_fingerprints`], since nothing can be compared
//! against it.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::logging::{log_hash_format_error, log_load_error};
use crate::processing::{fingerprint_from_file, Fingerprint, TransformTable};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Result of hashing a single image
#[derive(Debug)]
pub struct ComputeOutcome {
    /// Identifier the image was loaded from
    pub path: PathBuf,
    /// Fingerprint, or why it could not be computed
    pub result: Result<Fingerprint>,
}

/// Results of a compute batch, in input order
#[derive(Debug, Default)]
pub struct ComputeReport {
    outcomes: Vec<ComputeOutcome>,
}

impl ComputeReport {
    pub fn outcomes(&self) -> &[ComputeOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<ComputeOutcome> {
        self.outcomes
    }

    /// Successfully hashed images
    pub fn fingerprints(&self) -> impl Iterator<Item = (&Path, &Fingerprint)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|fp| (o.path.as_path(), fp)))
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// True when every image was hashed
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Hash every image, in parallel, keeping input order in the report
pub fn compute_fingerprints<P>(paths: &[P], config: &Config) -> Result<ComputeReport>
where
    P: AsRef<Path> + Sync,
{
    // Build the lookup table once before the workers race for it
    TransformTable::init();

    let start_time = Instant::now();
    let mode = config.downsample_mode;

    let progress_bar = if config.show_progress {
        let bar = ProgressBar::new(paths.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("[{eta}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
        {
            bar.set_style(style.progress_chars("##-"));
        }
        bar.set_message("Computing fingerprints...");
        bar
    } else {
        ProgressBar::hidden()
    };

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.effective_threads())
        .build()
        .map_err(|e| Error::Configuration(format!("Failed to build thread pool: {}", e)))?;

    let outcomes: Vec<ComputeOutcome> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let path = path.as_ref();
                let result = fingerprint_from_file(path, mode);
                match &result {
                    Ok(fp) => debug!("{} -> {}", path.display(), fp),
                    Err(e) => log_load_error(path, e),
                }
                progress_bar.inc(1);

                ComputeOutcome {
                    path: path.to_path_buf(),
                    result,
                }
            })
            .collect()
    });

    let report = ComputeReport { outcomes };
    progress_bar.finish_and_clear();
    info!(
        "Hashed {} of {} images in {:.2?}",
        report.succeeded(),
        paths.len(),
        start_time.elapsed()
    );

    Ok(report)
}

/// Result of comparing one candidate against the reference
#[derive(Debug)]
pub struct CompareOutcome {
    /// Candidate fingerprint text as given
    pub candidate: String,
    /// Similarity in [0, 1], or why the candidate could not be decoded
    pub result: Result<f64>,
}

/// Results of a compare batch, in input order
#[derive(Debug)]
pub struct CompareReport {
    reference: Fingerprint,
    outcomes: Vec<CompareOutcome>,
}

impl CompareReport {
    pub fn reference(&self) -> &Fingerprint {
        &self.reference
    }

    pub fn outcomes(&self) -> &[CompareOutcome] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<CompareOutcome> {
        self.outcomes
    }

    /// Candidates scoring at or above `threshold`
    pub fn matches(&self, threshold: f64) -> impl Iterator<Item = &CompareOutcome> {
        self.outcomes
            .iter()
            .filter(move |o| matches!(o.result, Ok(score) if score >= threshold))
    }

    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    /// True when every candidate was decoded
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

/// Score every candidate fingerprint against a reference.
///
/// Fails only when the reference itself cannot be decoded.
pub fn compare_fingerprints<S: AsRef<str>>(reference: &str, candidates: &[S]) -> Result<CompareReport> {
    let reference_fp = Fingerprint::from_hex(reference).map_err(|e| {
        log_hash_format_error(reference, &e);
        e
    })?;

    let outcomes = candidates
        .iter()
        .map(|candidate| {
            let candidate = candidate.as_ref();
            let result = Fingerprint::from_hex(candidate).map(|fp| reference_fp.similarity(&fp));
            if let Err(e) = &result {
                log_hash_format_error(candidate, e);
            }

            CompareOutcome {
                candidate: candidate.to_string(),
                result,
            }
        })
        .collect();

    Ok(CompareReport {
        reference: reference_fp,
        outcomes,
    })
}
