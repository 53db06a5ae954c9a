use crate::config::StoreConfig;
use crate::store::fs::FileSystemStore;
use std::path::PathBuf;
use tempfile::TempDir;

pub struct TestEnv {
    // We keep _temp_dir to ensure the directory is not dropped until the test is done
    pub _temp_dir: TempDir,
    pub store: FileSystemStore,
    pub root: PathBuf,
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEnv {
    pub fn new() -> Self {
        Self::with_config(|config| config)
    }

    pub fn with_config(adjust: impl FnOnce(StoreConfig) -> StoreConfig) -> Self {
        let temp_dir = tempfile::tempdir().expect("failed to create temp dir");
        let root = temp_dir.path().join("pages");
        let store = FileSystemStore::open(&adjust(StoreConfig::new(&root)))
            .expect("failed to open store");
        Self {
            _temp_dir: temp_dir,
            store,
            root,
        }
    }
}
