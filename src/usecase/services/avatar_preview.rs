use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::{Context, Result};

static NEXT_PREVIEW: AtomicU64 = AtomicU64::new(0);

/// Local copy of a picked image, shown before it is uploaded. The backing file
/// is removed when the handle is dropped.
#[derive(Debug)]
pub struct PreviewHandle {
    path: PathBuf,
}

impl PreviewHandle {
    pub fn create(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<Self> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create preview dir: {}", dir.display()))?;
        let extension = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("img");
        let seq = NEXT_PREVIEW.fetch_add(1, Ordering::Relaxed);
        let path = dir.join(format!("preview-{}-{seq}.{extension}", std::process::id()));
        std::fs::write(&path, bytes)
            .with_context(|| format!("failed to write preview: {}", path.display()))?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_file(&self.path) {
            tracing::debug!(path = %self.path.display(), error = %err, "preview already gone");
        }
    }
}

#[derive(Debug, Default)]
pub struct PreviewSlot {
    current: Option<PreviewHandle>,
}

impl PreviewSlot {
    pub fn replace(&mut self, handle: PreviewHandle) {
        self.current = Some(handle);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Path> {
        self.current.as_ref().map(PreviewHandle::path)
    }
}
