//! Application descriptor scanning.
//!
//! Descriptors are ArgoCD-style `Application` documents named
//! `<name>-application.yaml`. A descriptor is either Helm-sourced (a `chart`
//! key under `spec.source`) or Git-path-sourced (a `path` key pointing into
//! the repository at a directory of rendered manifests). Files that are
//! unreadable, malformed, or match neither shape are skipped without
//! diagnostics.

use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, Default, Deserialize)]
pub struct Descriptor {
    #[serde(default)]
    pub spec: DescriptorSpec,
}

#[derive(Debug, Default, Deserialize)]
pub struct DescriptorSpec {
    #[serde(default)]
    pub source: DescriptorSource,
}

#[derive(Debug, Default, Deserialize)]
pub struct DescriptorSource {
    pub chart: Option<String>,
    pub path: Option<String>,
    #[serde(rename = "repoURL")]
    pub repo_url: Option<String>,
    #[serde(rename = "targetRevision")]
    pub target_revision: Option<String>,
}

/// Classified version source of one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppSource {
    Chart {
        repo_url: String,
        chart: String,
        revision: String,
    },
    GitPath {
        path: String,
    },
}

fn image_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"image:\s+([^:\s]+):(\S+)").expect("valid regex"))
}

/// Descriptor files in a directory, in sorted filename order.
pub fn descriptor_files(dir: &Path) -> Vec<PathBuf> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.ends_with("-application.yaml"))
        })
        .collect();
    files.sort();
    files
}

/// Parse and classify one descriptor file. Returns the application name
/// (file stem without the `-application` suffix) and its version source, or
/// `None` for anything unreadable, malformed, or incomplete.
pub fn classify(file: &Path) -> Option<(String, AppSource)> {
    let contents = fs::read_to_string(file).ok()?;
    let descriptor: Descriptor = serde_yaml::from_str(&contents).ok()?;

    let stem = file.file_stem()?.to_str()?;
    let name = stem.strip_suffix("-application").unwrap_or(stem).to_string();

    let source = descriptor.spec.source;
    if let Some(chart) = source.chart {
        let repo_url = source.repo_url.unwrap_or_default();
        let revision = source.target_revision.unwrap_or_default();
        if repo_url.is_empty() || chart.is_empty() || revision.is_empty() {
            return None;
        }
        return Some((
            name,
            AppSource::Chart {
                repo_url,
                chart,
                revision,
            },
        ));
    }

    if let Some(path) = source.path {
        if path.is_empty() {
            return None;
        }
        return Some((name, AppSource::GitPath { path }));
    }

    None
}

/// First `image: <repo>:<tag>` reference found in the `.yaml` files under a
/// directory. The tree is walked in lexicographic path order so "first match
/// wins" is deterministic.
pub fn extract_image(dir: &Path) -> Option<(String, String)> {
    for file in yaml_files(dir) {
        let Ok(contents) = fs::read_to_string(&file) else {
            continue;
        };
        if let Some(caps) = image_pattern().captures(&contents) {
            return Some((caps[1].to_string(), caps[2].to_string()));
        }
    }
    None
}

fn yaml_files(dir: &Path) -> Vec<PathBuf> {
    let mut out = Vec::new();
    collect_yaml_files(dir, &mut out);
    out
}

fn collect_yaml_files(dir: &Path, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    let mut paths: Vec<PathBuf> = entries.flatten().map(|entry| entry.path()).collect();
    paths.sort();
    for path in paths {
        if path.is_dir() {
            collect_yaml_files(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "yaml") {
            out.push(path);
        }
    }
}
