//! Helm chart lookups, both against a remote chart repository and against
//! the releases installed in the live cluster.
//!
//! Everything shells out to the `helm` binary. Per-call failures never
//! propagate: any process error, non-zero exit, or parse miss collapses to
//! the `unknown` sentinel.

use crate::types::UNKNOWN;
use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use serde::Deserialize;

/// Scratch repository alias registered for the duration of a single lookup.
const SCRATCH_REPO: &str = "temp-check-repo";

#[derive(Debug, Clone)]
pub struct CmdOutput {
    pub success: bool,
    pub stdout: String,
}

/// Process execution seam. Production uses [`SystemRunner`]; tests mock this
/// to script `helm` behavior without a binary or a cluster.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> Result<CmdOutput>;
}

pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CmdOutput> {
        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await?;
        Ok(CmdOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

/// One entry of `helm list -o json`. Extra fields are ignored.
#[derive(Debug, Deserialize)]
struct Release {
    name: String,
    chart: String,
}

pub struct HelmClient<R: CommandRunner> {
    runner: R,
}

impl HelmClient<SystemRunner> {
    pub fn new() -> Self {
        Self::with_runner(SystemRunner)
    }
}

impl Default for HelmClient<SystemRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CommandRunner> HelmClient<R> {
    pub fn with_runner(runner: R) -> Self {
        Self { runner }
    }

    async fn helm(&self, args: &[&str]) -> Result<CmdOutput> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        self.runner.run("helm", &args).await
    }

    /// True if the `helm` binary is present and answers `helm version`.
    pub async fn available(&self) -> bool {
        matches!(self.helm(&["version"]).await, Ok(out) if out.success)
    }

    /// Latest published version of a chart, or `"unknown"`.
    ///
    /// Registers the scratch alias, refreshes its index, reads the chart
    /// metadata, then removes the alias. Add and remove are tolerant of the
    /// alias already existing or having partially failed; the cleanup runs
    /// unconditionally.
    pub async fn latest_chart_version(&self, repo_url: &str, chart: &str) -> String {
        self.try_latest_chart_version(repo_url, chart)
            .await
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    async fn try_latest_chart_version(&self, repo_url: &str, chart: &str) -> Option<String> {
        let _ = self.helm(&["repo", "add", SCRATCH_REPO, repo_url]).await;
        let _ = self.helm(&["repo", "update", SCRATCH_REPO]).await;

        let show = self
            .helm(&["show", "chart", &format!("{SCRATCH_REPO}/{chart}")])
            .await;

        let _ = self.helm(&["repo", "remove", SCRATCH_REPO]).await;

        let output = show.ok().filter(|out| out.success)?;
        output
            .stdout
            .lines()
            .find_map(|line| line.strip_prefix("version:"))
            .map(|v| v.trim().to_string())
    }

    /// Chart version of a release installed in the cluster, or `"unknown"`.
    ///
    /// `helm list` reports the chart as `<chart>-X.Y.Z`; the version is the
    /// suffix after the chart name.
    pub async fn installed_release_version(
        &self,
        namespace: &str,
        release: &str,
        chart: &str,
    ) -> String {
        self.try_installed_release_version(namespace, release, chart)
            .await
            .unwrap_or_else(|| UNKNOWN.to_string())
    }

    async fn try_installed_release_version(
        &self,
        namespace: &str,
        release: &str,
        chart: &str,
    ) -> Option<String> {
        let output = self
            .helm(&["list", "-n", namespace, "-o", "json"])
            .await
            .ok()
            .filter(|out| out.success)?;

        let releases: Vec<Release> = serde_json::from_str(&output.stdout).ok()?;
        let found = releases.into_iter().find(|r| r.name == release)?;

        let version = found.chart.strip_prefix(&format!("{chart}-"))?;
        let shape = Regex::new(r"^\d+\.\d+\.\d+$").ok()?;
        shape.is_match(version).then(|| version.to_string())
    }
}
