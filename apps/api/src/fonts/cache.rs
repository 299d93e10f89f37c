//! Process-lifetime cache of the base font program.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use bytes::Bytes;
use tokio::sync::OnceCell;
use tracing::info;

use crate::errors::ExportError;

/// Lazily loads the base font once and hands out cheap clones of it.
///
/// The file is assumed immutable for the lifetime of the process, so there is
/// no invalidation. Concurrent first callers wait on a single read. A failed
/// read leaves the cache empty and the next caller tries again.
#[derive(Debug)]
pub struct FontCache {
    path: PathBuf,
    font: OnceCell<Bytes>,
    reads: AtomicUsize,
}

impl FontCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FontCache {
            path: path.into(),
            font: OnceCell::new(),
            reads: AtomicUsize::new(0),
        }
    }

    /// Returns the full base font, reading it from disk on first use.
    pub async fn base_font(&self) -> Result<Bytes, ExportError> {
        let font = self
            .font
            .get_or_try_init(|| async {
                self.reads.fetch_add(1, Ordering::Relaxed);
                let started = Instant::now();
                let data = tokio::fs::read(&self.path)
                    .await
                    .map_err(|source| ExportError::Io {
                        path: self.path.clone(),
                        source,
                    })?;
                info!(
                    "Loaded base font {} ({} bytes) in {:?}",
                    self.path.display(),
                    data.len(),
                    started.elapsed()
                );
                Ok::<_, ExportError>(Bytes::from(data))
            })
            .await?;
        Ok(font.clone())
    }

    pub fn is_loaded(&self) -> bool {
        self.font.initialized()
    }

    /// Number of times the font file has been read from disk.
    #[cfg(test)]
    pub fn disk_reads(&self) -> usize {
        self.reads.load(Ordering::Relaxed)
    }
}
