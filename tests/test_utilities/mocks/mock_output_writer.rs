use driverpack_catalog::prelude::*;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Mock OutputWriter keeping every document in memory
#[derive(Default, Clone)]
pub struct MockOutputWriter {
    pub files: Arc<Mutex<BTreeMap<String, String>>>,
    fail_on: Option<String>,
}

impl MockOutputWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the write of `file_name`
    pub fn failing_on(file_name: &str) -> Self {
        Self {
            files: Arc::default(),
            fail_on: Some(file_name.to_string()),
        }
    }

    pub fn file(&self, file_name: &str) -> Option<String> {
        self.files.lock().unwrap().get(file_name).cloned()
    }

    pub fn file_names(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }
}

impl OutputWriter for MockOutputWriter {
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        if self.fail_on.as_deref() == Some(file_name) {
            anyhow::bail!("disk full while writing {}", file_name);
        }
        self.files
            .lock()
            .unwrap()
            .insert(file_name.to_string(), content.to_string());
        Ok(PathBuf::from("out").join(file_name))
    }
}
