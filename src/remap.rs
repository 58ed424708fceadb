// ─── Remapping Contract ───
// Seam between this backend and the bytecode remapping engine. The backend's
// only obligation across it is a MappingEntry whose required CSV tables
// exist; everything else belongs to the engine.

use std::path::Path;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::RemapResult;
use crate::mappings::MappingEntry;

/// Receives non-fatal diagnostics raised during a remap run.
pub trait ErrorSink: Send + Sync {
    fn report(&self, message: &str);
}

/// Receives coarse progress for long operations.
pub trait ProgressSink: Send + Sync {
    fn start(&self, max: usize, label: &str);
    fn set(&self, value: usize);
    fn finish(&self);
}

/// Transforms an input archive into an output archive using a resolved
/// mapping directory.
#[async_trait]
pub trait Remapper: Send + Sync {
    async fn remap(
        &self,
        input: &Path,
        output: &Path,
        mappings: &MappingEntry,
        errors: &dyn ErrorSink,
        progress: &dyn ProgressSink,
    ) -> RemapResult<()>;
}

/// Sink that drops everything; for headless runs and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardSink;

impl ErrorSink for DiscardSink {
    fn report(&self, _message: &str) {}
}

impl ProgressSink for DiscardSink {
    fn start(&self, _max: usize, _label: &str) {}
    fn set(&self, _value: usize) {}
    fn finish(&self) {}
}

/// Sink that forwards diagnostics and progress to the tracing subscriber.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl ErrorSink for TracingSink {
    fn report(&self, message: &str) {
        warn!("{}", message);
    }
}

impl ProgressSink for TracingSink {
    fn start(&self, max: usize, label: &str) {
        debug!("{} (0/{})", label, max);
    }

    fn set(&self, _value: usize) {}

    fn finish(&self) {
        debug!("done");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mappings::MappingSource;
    use std::sync::Mutex;

    struct RecordingRemapper {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Remapper for RecordingRemapper {
        async fn remap(
            &self,
            _input: &Path,
            _output: &Path,
            mappings: &MappingEntry,
            errors: &dyn ErrorSink,
            progress: &dyn ProgressSink,
        ) -> RemapResult<()> {
            progress.start(1, "remapping");
            errors.report("one warning");
            progress.finish();
            self.seen.lock().unwrap().push(mappings.name.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn contract_passes_the_resolved_entry_through() {
        let engine = RecordingRemapper {
            seen: Mutex::new(Vec::new()),
        };
        let entry = MappingEntry {
            name: "1.12.2-stable_39".to_string(),
            directory: std::env::temp_dir(),
            source: MappingSource::Downloaded,
        };

        engine
            .remap(
                Path::new("in.jar"),
                Path::new("out.jar"),
                &entry,
                &DiscardSink,
                &DiscardSink,
            )
            .await
            .unwrap();

        assert_eq!(engine.seen.lock().unwrap().as_slice(), ["1.12.2-stable_39"]);
    }
}
