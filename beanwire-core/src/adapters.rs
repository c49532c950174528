//! Default filesystem-backed port implementations.

use crate::ports::{ClassSource, LoadedBatch, WritePort};
use anyhow::Context;
use beanwire_types::model::ClassBatch;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use tracing::debug;

/// Loads class batches from JSON files.
///
/// Each input is either a batch file or a directory whose `*.json` files are batches.
#[derive(Debug, Clone)]
pub struct FsClassSource {
    pub inputs: Vec<Utf8PathBuf>,
}

impl FsClassSource {
    pub fn new(inputs: Vec<Utf8PathBuf>) -> Self {
        Self { inputs }
    }

    fn batch_paths(&self) -> anyhow::Result<Vec<Utf8PathBuf>> {
        let mut out = Vec::new();
        for input in &self.inputs {
            if !input.is_dir() {
                out.push(input.clone());
                continue;
            }
            let pattern = input.join("*.json");
            debug!(pattern = %pattern, "scanning for class batches");
            let mut found = Vec::new();
            for entry in glob(pattern.as_str()).with_context(|| format!("glob {}", pattern))? {
                let path = entry.map_err(|e| anyhow::anyhow!("glob error: {e}"))?;
                let path = Utf8PathBuf::from_path_buf(path)
                    .map_err(|p| anyhow::anyhow!("non-utf8 path: {}", p.display()))?;
                found.push(path);
            }
            // Deterministic order matters.
            found.sort();
            out.extend(found);
        }
        Ok(out)
    }
}

impl ClassSource for FsClassSource {
    fn load_batches(&self) -> anyhow::Result<Vec<LoadedBatch>> {
        let mut out = Vec::new();
        for path in self.batch_paths()? {
            let text = fs::read_to_string(&path).with_context(|| format!("read {}", path))?;
            let batch: ClassBatch =
                serde_json::from_str(&text).with_context(|| format!("parse {}", path))?;
            debug!(path = %path, classes = batch.classes.len(), "loaded class batch");
            out.push(LoadedBatch { path, batch });
        }
        Ok(out)
    }
}

/// In-memory class source for embedding and testing. Batches are sorted by path.
#[derive(Debug, Clone)]
pub struct InMemoryClassSource {
    batches: Vec<LoadedBatch>,
}

impl InMemoryClassSource {
    pub fn new(mut batches: Vec<LoadedBatch>) -> Self {
        batches.sort_by(|a, b| a.path.cmp(&b.path));
        Self { batches }
    }

    /// A single batch under a placeholder path.
    pub fn single(batch: ClassBatch) -> Self {
        Self::new(vec![LoadedBatch {
            path: Utf8PathBuf::from("<memory>"),
            batch,
        }])
    }
}

impl ClassSource for InMemoryClassSource {
    fn load_batches(&self) -> anyhow::Result<Vec<LoadedBatch>> {
        Ok(self.batches.clone())
    }
}

/// Filesystem write operations.
#[derive(Debug, Clone, Default)]
pub struct FsWritePort;

impl WritePort for FsWritePort {
    fn write_file(&self, path: &Utf8Path, contents: &[u8]) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create parent dir for {}", path))?;
        }
        fs::write(path, contents).with_context(|| format!("write {}", path))
    }

    fn create_dir_all(&self, path: &Utf8Path) -> anyhow::Result<()> {
        fs::create_dir_all(path).with_context(|| format!("create_dir_all {}", path))
    }
}
