//! Process-wide artifact cache.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use super::{load_artifacts, ArtifactError, ArtifactPaths, LoadedArtifacts};

/// Holds the one set of artifacts for the process lifetime.
///
/// The cache is keyed by nothing: once populated, later calls return the same
/// artifacts whatever paths they pass. A failed load leaves the cache empty.
pub struct ArtifactCache {
    slot: OnceLock<Arc<LoadedArtifacts>>,
    init: Mutex<()>,
    loads: AtomicUsize,
}

static GLOBAL: ArtifactCache = ArtifactCache::new();

impl ArtifactCache {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
            init: Mutex::new(()),
            loads: AtomicUsize::new(0),
        }
    }

    /// The process-wide instance.
    #[must_use]
    pub fn global() -> &'static ArtifactCache {
        &GLOBAL
    }

    /// Cached artifacts, if already loaded.
    #[must_use]
    pub fn get(&self) -> Option<Arc<LoadedArtifacts>> {
        self.slot.get().cloned()
    }

    /// Return the cached artifacts, loading them on first use.
    ///
    /// Concurrent first callers serialize on the init guard so the files are read once.
    ///
    /// # Errors
    /// Returns `ArtifactError` if loading fails; nothing is cached in that case.
    pub fn get_or_load(
        &self,
        paths: &ArtifactPaths,
    ) -> Result<Arc<LoadedArtifacts>, ArtifactError> {
        if let Some(loaded) = self.slot.get() {
            return Ok(loaded.clone());
        }

        // The guard holds no data; poisoning carries no meaning here.
        let _guard = self.init.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(loaded) = self.slot.get() {
            return Ok(loaded.clone());
        }

        let loaded = Arc::new(load_artifacts(paths)?);
        self.loads.fetch_add(1, Ordering::Relaxed);
        let _ = self.slot.set(loaded.clone());
        Ok(loaded)
    }

    /// How many times artifacts were read from disk (0 or 1).
    #[must_use]
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::Relaxed)
    }
}

impl Default for ArtifactCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{INPUT_SCALER_FILE, MODEL_FILE, OUTPUT_SCALER_FILE};
    use super::*;
    use std::path::Path;
    use tempfile::tempdir;

    fn write_all(dir: &Path) {
        std::fs::write(
            dir.join(MODEL_FILE),
            r#"{"layers": [{"kernel": [[1.0]], "bias": [0.0]}]}"#,
        )
        .expect("write model");
        std::fs::write(
            dir.join(INPUT_SCALER_FILE),
            r#"{"kind": "standard", "mean": [0.0], "scale": [1.0]}"#,
        )
        .expect("write sc_X");
        std::fs::write(
            dir.join(OUTPUT_SCALER_FILE),
            r#"{"kind": "standard", "mean": [0.0], "scale": [1.0]}"#,
        )
        .expect("write sc_y");
    }

    #[test]
    fn test_loads_once() {
        let dir = tempdir().expect("tempdir");
        write_all(dir.path());
        let paths = ArtifactPaths::in_dir(dir.path());
        let cache = ArtifactCache::new();

        let first = cache.get_or_load(&paths).expect("Should load");
        // Files are gone; the cache must not go back to disk.
        std::fs::remove_file(&paths.model).expect("remove");
        let second = cache.get_or_load(&paths).expect("Should hit cache");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.load_count(), 1);
    }

    #[test]
    fn test_failed_load_not_cached() {
        let dir = tempdir().expect("tempdir");
        let paths = ArtifactPaths::in_dir(dir.path());
        let cache = ArtifactCache::new();

        assert!(cache.get_or_load(&paths).is_err());
        assert!(cache.get().is_none());

        write_all(dir.path());
        assert!(cache.get_or_load(&paths).is_ok());
        assert_eq!(cache.load_count(), 1);
    }

    #[test]
    fn test_concurrent_first_access_loads_once() {
        let dir = tempdir().expect("tempdir");
        write_all(dir.path());
        let paths = ArtifactPaths::in_dir(dir.path());
        let cache = Arc::new(ArtifactCache::new());

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                let paths = paths.clone();
                std::thread::spawn(move || cache.get_or_load(&paths).expect("Should load"))
            })
            .collect();

        let results: Vec<_> = handles
            .into_iter()
            .map(|h| h.join().expect("thread"))
            .collect();
        for r in &results[1..] {
            assert!(Arc::ptr_eq(&results[0], r));
        }
        assert_eq!(cache.load_count(), 1);
    }
}
