use std::path::{Path, PathBuf};

/// Where to find the GitOps tree being audited.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory containing the `gitops/` tree.
    pub repo_root: PathBuf,
}

impl Config {
    pub fn new<P: Into<PathBuf>>(repo_root: P) -> Self {
        Self {
            repo_root: repo_root.into(),
        }
    }

    /// Directory holding the platform application descriptors.
    pub fn platform_dir(&self) -> PathBuf {
        self.repo_root
            .join("gitops/clusters/starbase/applications/platform")
    }

    /// Resolve a descriptor's `spec.source.path` to a filesystem location.
    /// Descriptors sometimes carry a redundant leading `gitops/` segment.
    pub fn resolve_source_path(&self, path: &str) -> PathBuf {
        let trimmed = path.strip_prefix("gitops/").unwrap_or(path);
        self.repo_root.join("gitops").join(trimmed)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(Path::new("."))
    }
}
