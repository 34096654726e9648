//! Typed TOML loading for files under the workspace root.

use std::fs;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::runtime::error::{XtaskError, XtaskResult};

/// Reads and deserializes one TOML file relative to the workspace root.
#[derive(Clone, Debug)]
pub struct ConfigLoader<T> {
    path: PathBuf,
    marker: PhantomData<fn() -> T>,
}

impl<T: DeserializeOwned> ConfigLoader<T> {
    /// Points at `root/relative`.
    pub fn new(root: &Path, relative: impl AsRef<Path>) -> Self {
        Self {
            path: root.join(relative),
            marker: PhantomData,
        }
    }

    /// Absolute path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the file. A missing file and a parse failure are both configuration errors.
    pub fn load(&self) -> XtaskResult<T> {
        let text = fs::read_to_string(&self.path).map_err(|err| {
            XtaskError::config(format!("cannot read config: {err}")).with_path(&self.path)
        })?;
        toml::from_str(&text).map_err(|err| {
            XtaskError::config(format!("invalid config: {}", err.message())).with_path(&self.path)
        })
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Fresh directory under the system temp dir for config fixtures.
    pub(crate) fn scratch_dir(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos())
            .unwrap_or_default();
        let dir = std::env::temp_dir().join(format!(
            "xtask-{label}-{}-{nanos}-{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        ));
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::test_support::scratch_dir;
    use super::*;
    use crate::runtime::error::ErrorCategory;

    #[derive(Debug, Deserialize, Eq, PartialEq)]
    struct Sample {
        name: String,
        #[serde(default)]
        retries: u32,
    }

    #[test]
    fn loads_typed_values() {
        let root = scratch_dir("config-load");
        fs::write(root.join("sample.toml"), "name = \"grid\"\nretries = 2\n").expect("write");
        let loaded = ConfigLoader::<Sample>::new(&root, "sample.toml")
            .load()
            .expect("load");
        assert_eq!(
            loaded,
            Sample {
                name: "grid".into(),
                retries: 2
            }
        );
    }

    #[test]
    fn missing_and_malformed_files_are_config_errors() {
        let root = scratch_dir("config-errors");
        let missing = ConfigLoader::<Sample>::new(&root, "absent.toml")
            .load()
            .expect_err("missing");
        assert_eq!(missing.category(), ErrorCategory::Config);

        fs::write(root.join("bad.toml"), "retries = \"many\"\n").expect("write");
        let malformed = ConfigLoader::<Sample>::new(&root, "bad.toml")
            .load()
            .expect_err("malformed");
        assert_eq!(malformed.category(), ErrorCategory::Config);
        assert!(malformed.to_string().contains("bad.toml"));
    }
}
