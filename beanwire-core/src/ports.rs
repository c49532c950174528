//! Port traits abstracting all I/O away from the pipeline.

use beanwire_types::model::ClassBatch;
use camino::{Utf8Path, Utf8PathBuf};

/// One parsed batch and where it came from.
#[derive(Debug, Clone)]
pub struct LoadedBatch {
    pub path: Utf8PathBuf,
    pub batch: ClassBatch,
}

/// Source of class models.
pub trait ClassSource {
    fn load_batches(&self) -> anyhow::Result<Vec<LoadedBatch>>;
}

/// File-system write operations.
pub trait WritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()>;
    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()>;
}
