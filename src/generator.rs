//! Fixture generation pipeline

use crate::config::{FixtureConfig, FixtureSpec};
use crate::error::{FixtureError, Result};
use crate::npy::write_sample;
use crate::sample::{RandomSampleGenerator, SampleArray, SampleGenerator};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Result of a generation run
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub output_dir: PathBuf,
    pub files: Vec<PathBuf>,
    pub total_size: u64,
    pub generation_time: Duration,
    pub export_time: Duration,
}

impl GenerationResult {
    pub fn num_fixtures(&self) -> usize {
        self.files.len()
    }

    /// Print a summary of the generation
    pub fn print_summary(&self) {
        println!("✅ Generation Complete!");
        println!("  📁 Output: {}", self.output_dir.display());
        println!("  📊 Fixtures: {}", self.num_fixtures());
        println!("  💾 Size: {:.1} KB", self.total_size as f64 / 1e3);
        println!("  ⏱️  Generation: {:.3}s", self.generation_time.as_secs_f64());
        println!("  ⏱️  Export: {:.3}s", self.export_time.as_secs_f64());
    }
}

/// Generates one `.npy` file per (element type, shape) pair
pub struct FixtureGenerator {
    config: FixtureConfig,
    seed: Option<u64>,
    progress_bar: Option<ProgressBar>,
}

impl FixtureGenerator {
    pub fn new(config: FixtureConfig) -> Self {
        Self {
            config,
            seed: None,
            progress_bar: None,
        }
    }

    /// Make the run reproducible; fixture `idx` is drawn with `seed + idx`
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enable progress bar
    pub fn with_progress(mut self) -> Self {
        self.progress_bar = Some(ProgressBar::new(0));
        self
    }

    pub fn config(&self) -> &FixtureConfig {
        &self.config
    }

    /// Generate into the configured output folder
    pub fn run(&self) -> Result<GenerationResult> {
        self.generate(&self.config.output_dir)
    }

    /// Generate every fixture into `output_dir`, overwriting existing files
    pub fn generate(&self, output_dir: impl AsRef<Path>) -> Result<GenerationResult> {
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir).map_err(|e| {
            FixtureError::with_context(format!("creating {}", output_dir.display()), e)
        })?;

        let fixtures = self.config.fixtures();
        info!(
            count = fixtures.len(),
            output = %output_dir.display(),
            "generating fixtures"
        );

        let generation_start = Instant::now();
        let samples = self.generate_samples(&fixtures)?;
        let generation_time = generation_start.elapsed();

        let export_start = Instant::now();
        let files = self.export_samples(output_dir, &fixtures, &samples)?;
        let export_time = export_start.elapsed();

        let total_size = Self::calculate_total_size(&files)?;

        info!(
            count = files.len(),
            bytes = total_size,
            "wrote fixtures in {:.3}s",
            (generation_time + export_time).as_secs_f64()
        );

        Ok(GenerationResult {
            output_dir: output_dir.to_path_buf(),
            files,
            total_size,
            generation_time,
            export_time,
        })
    }

    /// Synthesize all sample arrays in parallel
    fn generate_samples(&self, fixtures: &[FixtureSpec]) -> Result<Vec<SampleArray>> {
        if let Some(pb) = &self.progress_bar {
            pb.set_length(fixtures.len() as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .map_err(|e| FixtureError::with_context("progress bar template", e))?
                .progress_chars("#>-");
            pb.set_style(style);
        }

        let progress_bar = self.progress_bar.clone();
        let samples: Result<Vec<_>> = fixtures
            .par_iter()
            .enumerate()
            .map(|(idx, spec)| {
                let seed = self.seed.map(|s| s.wrapping_add(idx as u64));
                let mut generator = RandomSampleGenerator::new(seed);
                let sample = generator.generate(spec)?;

                if let Some(pb) = &progress_bar {
                    pb.inc(1);
                    pb.set_message(spec.file_name());
                }

                Ok(sample)
            })
            .collect();

        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message("samples ready");
        }

        samples
    }

    fn export_samples(
        &self,
        output_dir: &Path,
        fixtures: &[FixtureSpec],
        samples: &[SampleArray],
    ) -> Result<Vec<PathBuf>> {
        fixtures
            .iter()
            .zip(samples)
            .map(|(spec, sample)| {
                let path = output_dir.join(spec.file_name());
                write_sample(&path, sample)?;
                debug!(
                    path = %path.display(),
                    data_bytes = spec.size_bytes(),
                    "wrote fixture"
                );
                Ok(path)
            })
            .collect()
    }

    fn calculate_total_size(files: &[PathBuf]) -> Result<u64> {
        let mut total = 0;
        for file in files {
            total += fs::metadata(file)?.len();
        }
        Ok(total)
    }
}
