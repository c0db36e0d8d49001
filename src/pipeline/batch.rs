//! Batch analysis.
//!
//! Each item is analysed independently. A failing item becomes an error
//! marker at its own index; the rest of the batch still runs. Output order
//! always matches input order, whether items run sequentially or on a
//! worker pool.

use std::time::Instant;

use rayon::prelude::*;

use crate::error::{AnalysisError, Result};
use crate::models::content::{ContentItem, ContentType};
use crate::models::result::{BatchEntry, BatchItemError, BatchResult};
use crate::pipeline::context::BatchContext;
use crate::pipeline::extraction::{TextExtractor, UploadedFile};
use crate::pipeline::orchestrator::Analyzer;

/// Execution options for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOptions {
    /// Worker count; `0` or `1` runs sequentially.
    pub workers: usize,
}

impl BatchOptions {
    pub fn sequential() -> Self {
        Self { workers: 1 }
    }

    pub fn with_workers(workers: usize) -> Self {
        Self { workers }
    }
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            workers: crate::config::DEFAULT_BATCH_WORKERS,
        }
    }
}

/// Run `f` over `inputs`, returning results in input order.
fn run_indexed<T, R, F>(inputs: &[T], workers: usize, batch_id: &str, f: F) -> Vec<R>
where
    T: Sync,
    R: Send,
    F: Fn(usize, &T) -> R + Sync + Send,
{
    if workers <= 1 || inputs.len() <= 1 {
        return inputs.iter().enumerate().map(|(i, x)| f(i, x)).collect();
    }

    match rayon::ThreadPoolBuilder::new().num_threads(workers).build() {
        // Indexed collect writes each result at its input position
        Ok(pool) => pool.install(|| inputs.par_iter().enumerate().map(|(i, x)| f(i, x)).collect()),
        Err(e) => {
            log::warn!(
                "[batch={}] WORKER_POOL_UNAVAILABLE workers={} error={} fallback=sequential",
                batch_id,
                workers,
                e
            );
            inputs.iter().enumerate().map(|(i, x)| f(i, x)).collect()
        }
    }
}

fn error_filename(err: &AnalysisError) -> Option<String> {
    match err {
        AnalysisError::Extraction { filename, .. } => Some(filename.clone()),
        _ => None,
    }
}

impl Analyzer {
    /// Batch options sized from the configured `batch_workers`.
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions::with_workers(self.config().batch_workers)
    }

    /// Analyse a batch of items.
    ///
    /// Inputs that already failed upstream (typically text extraction) are
    /// passed as `Err` and reported at their index.
    pub fn analyze_batch(&self, items: &[Result<ContentItem>], options: &BatchOptions) -> BatchResult {
        self.run_batch(items, options, |input| match input {
            Ok(item) => (item.filename.clone(), Ok(item.clone())),
            Err(e) => (error_filename(e), Err(e.clone())),
        })
    }

    /// Analyse already-extracted items.
    pub fn analyze_items(&self, items: &[ContentItem], options: &BatchOptions) -> BatchResult {
        self.run_batch(items, options, |item| (item.filename.clone(), Ok(item.clone())))
    }

    /// Extract and analyse uploaded files, in upload order.
    pub fn analyze_uploads(
        &self,
        files: &[UploadedFile],
        content_type: ContentType,
        extractor: &dyn TextExtractor,
        options: &BatchOptions,
    ) -> BatchResult {
        self.run_batch(files, options, |file| {
            let item = extractor
                .extract(file)
                .map(|text| ContentItem::new(text, content_type).with_filename(file.filename.clone()))
                .map_err(|e| AnalysisError::extraction(&file.filename, &e));
            (Some(file.filename.clone()), item)
        })
    }

    fn run_batch<T, P>(&self, inputs: &[T], options: &BatchOptions, prepare: P) -> BatchResult
    where
        T: Sync,
        P: Fn(&T) -> (Option<String>, Result<ContentItem>) + Sync + Send,
    {
        let start = Instant::now();
        let batch = BatchContext::new();

        log::info!(
            "[batch={}] BATCH_RECEIVED items={} workers={}",
            batch.batch_id,
            inputs.len(),
            options.workers
        );

        let entries = run_indexed(inputs, options.workers, &batch.batch_id, |index, input| {
            let rctx = batch.request_context();
            let (filename, prepared) = prepare(input);
            let outcome = prepared.and_then(|item| self.analyze_with_context(&item, &rctx));

            match outcome {
                Ok(result) => BatchEntry::Analysis(Box::new(result)),
                Err(e) => {
                    log::warn!(
                        "{} BATCH_ITEM_FAILED index={} filename={:?} error={}",
                        rctx.log_context(),
                        index,
                        filename,
                        e
                    );
                    BatchEntry::Error(BatchItemError::new(index, filename, &e))
                }
            }
        });

        let failed = entries.iter().filter(|e| e.is_error()).count();
        let succeeded = entries.len() - failed;
        let processing_time = start.elapsed().as_secs_f64() * 1000.0;

        log::info!(
            "[batch={}] BATCH_COMPLETE received={} succeeded={} failed={} duration_ms={:.2}",
            batch.batch_id,
            entries.len(),
            succeeded,
            failed,
            processing_time
        );

        BatchResult {
            batch_id: batch.batch_id,
            entries,
            succeeded,
            failed,
            processing_time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::pipeline::extraction::PlainTextExtractor;

    #[test]
    fn test_run_indexed_preserves_order() {
        let inputs: Vec<usize> = (0..64).collect();
        let out = run_indexed(&inputs, 8, "batch-test", |i, x| (i, x * 2));
        for (pos, (i, doubled)) in out.iter().enumerate() {
            assert_eq!(*i, pos);
            assert_eq!(*doubled, pos * 2);
        }
    }

    #[test]
    fn test_batch_options_follow_config() {
        let config = AnalysisConfig {
            batch_workers: 7,
            ..AnalysisConfig::default()
        };
        let analyzer = Analyzer::new(config).unwrap();
        assert_eq!(analyzer.batch_options(), BatchOptions::with_workers(7));
        assert_eq!(Analyzer::default().batch_options(), BatchOptions::default());
    }

    #[test]
    fn test_empty_batch() {
        let analyzer = Analyzer::default();
        let result = analyzer.analyze_items(&[], &BatchOptions::default());
        assert!(result.is_empty());
        assert_eq!(result.succeeded, 0);
        assert_eq!(result.failed, 0);
    }

    #[test]
    fn test_invalid_item_isolated() {
        let analyzer = Analyzer::default();
        let items = vec![
            ContentItem::new("Hurry, last chance!", ContentType::General),
            ContentItem::new("   ", ContentType::General).with_filename("blank.txt"),
            ContentItem::new("A calm product update.", ContentType::General),
        ];
        let result = analyzer.analyze_items(&items, &BatchOptions::sequential());

        assert_eq!(result.len(), 3);
        assert_eq!(result.succeeded, 2);
        assert_eq!(result.failed, 1);
        let err = result.entries[1].error().unwrap();
        assert_eq!(err.index, 1);
        assert_eq!(err.error, "invalid_input");
        assert_eq!(err.filename.as_deref(), Some("blank.txt"));
    }

    #[test]
    fn test_uploads_with_unsupported_file() {
        let analyzer = Analyzer::default();
        let files = vec![
            UploadedFile::new("a.txt", "Act now!"),
            UploadedFile::new("b.pdf", vec![0x25, 0x50]),
            UploadedFile::new("c.txt", "Plain notes for the team."),
        ];
        let result = analyzer.analyze_uploads(
            &files,
            ContentType::Document,
            &PlainTextExtractor,
            &BatchOptions::with_workers(2),
        );

        assert_eq!(result.len(), 3);
        assert_eq!(result.entries[0].analysis().unwrap().metadata.filename.as_deref(), Some("a.txt"));
        let err = result.entries[1].error().unwrap();
        assert_eq!(err.error, "extraction_failed");
        assert_eq!(err.filename.as_deref(), Some("b.pdf"));
        assert!(result.entries[2].analysis().is_some());
    }
}
