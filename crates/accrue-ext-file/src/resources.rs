//! Resource lookup within a market data directory layout.

use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use accrue_core::{AccrueError, AccrueResult};

/// Location of a single market data resource.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceLocator {
    path: PathBuf,
}

impl ResourceLocator {
    /// Creates a locator for a file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file name, e.g. `usd-libor-3m.csv`.
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }

    /// Returns true if the file has the given extension (case-insensitive).
    pub fn has_extension(&self, extension: &str) -> bool {
        self.path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension))
    }

    /// Reads the whole resource as UTF-8.
    pub fn read_to_string(&self) -> AccrueResult<String> {
        fs::read_to_string(&self.path)
            .map_err(|e| AccrueError::resource_access(self.to_string(), e.to_string()))
    }
}

impl fmt::Display for ResourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

/// Finds market data resources grouped into named subdirectories.
pub trait MarketDataResources {
    /// Returns every resource directly inside `subdirectory`.
    fn all_resources(&self, subdirectory: &str) -> AccrueResult<BTreeSet<ResourceLocator>>;

    /// Returns the named resource in `subdirectory`, or `None` if absent.
    fn resource(&self, subdirectory: &str, name: &str) -> AccrueResult<Option<ResourceLocator>>;

    /// Returns true if `subdirectory` exists.
    fn subdirectory_exists(&self, subdirectory: &str) -> bool;
}

/// Market data resources stored under a root directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryResources {
    root: PathBuf,
}

impl DirectoryResources {
    /// Creates resources rooted at `root`.
    ///
    /// # Errors
    ///
    /// Returns `AccrueError::ResourceAccess` if `root` is not a directory.
    pub fn new(root: impl AsRef<Path>) -> AccrueResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(AccrueError::resource_access(
                root.display().to_string(),
                "root is not a directory",
            ));
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Returns the root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn subdirectory_path(&self, subdirectory: &str) -> PathBuf {
        self.root.join(subdirectory.trim_start_matches(['/', '\\']))
    }
}

impl MarketDataResources for DirectoryResources {
    fn all_resources(&self, subdirectory: &str) -> AccrueResult<BTreeSet<ResourceLocator>> {
        let dir = self.subdirectory_path(subdirectory);
        let location = dir.display().to_string();
        let entries =
            fs::read_dir(&dir).map_err(|e| AccrueError::resource_access(&location, e.to_string()))?;

        let mut found = BTreeSet::new();
        for entry in entries {
            let entry = entry.map_err(|e| AccrueError::resource_access(&location, e.to_string()))?;
            let path = entry.path();
            if path.is_file() {
                found.insert(ResourceLocator::new(path));
            }
        }
        Ok(found)
    }

    fn resource(&self, subdirectory: &str, name: &str) -> AccrueResult<Option<ResourceLocator>> {
        let path = self.subdirectory_path(subdirectory).join(name);
        match fs::metadata(&path) {
            Ok(meta) if meta.is_file() => Ok(Some(ResourceLocator::new(path))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AccrueError::resource_access(
                path.display().to_string(),
                e.to_string(),
            )),
        }
    }

    fn subdirectory_exists(&self, subdirectory: &str) -> bool {
        self.subdirectory_path(subdirectory).is_dir()
    }
}
