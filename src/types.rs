use std::cmp::Ordering;

/// Sentinel meaning "latest version could not be determined".
pub const UNKNOWN: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Helm,
    Docker,
}

/// One row of the report: an application, its pinned version, and the
/// latest version the matching registry reported.
#[derive(Debug, Clone)]
pub struct AppRecord {
    pub name: String,
    pub current: String,
    pub latest: String,
    pub kind: SourceKind,
}

impl AppRecord {
    pub fn up_to_date(&self) -> bool {
        // Exact string equality only; "v1.2.0" and "1.2.0" are different.
        self.current == self.latest
    }
}

impl PartialOrd for AppRecord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for AppRecord {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl PartialEq for AppRecord {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for AppRecord {}
