//! The single-shot audit pass.

use crate::config::Config;
use crate::docker::RegistryClient;
use crate::helm::{CommandRunner, HelmClient, SystemRunner};
use crate::manifest::{self, AppSource};
use crate::report;
use crate::types::{AppRecord, SourceKind};
use anyhow::Result;

const ARGOCD_HELM_REPO: &str = "https://argoproj.github.io/argo-helm";
const ARGOCD_CHART: &str = "argo-cd";
const ARGOCD_NAMESPACE: &str = "argocd";
const ARGOCD_RELEASE: &str = "argocd";

pub struct VersionChecker<R: CommandRunner> {
    config: Config,
    helm: HelmClient<R>,
    registry: RegistryClient,
}

impl VersionChecker<SystemRunner> {
    pub fn new(config: Config) -> Self {
        Self::with_clients(config, HelmClient::new(), RegistryClient::new())
    }
}

impl<R: CommandRunner> VersionChecker<R> {
    pub fn with_clients(config: Config, helm: HelmClient<R>, registry: RegistryClient) -> Self {
        Self {
            config,
            helm,
            registry,
        }
    }

    pub async fn check_all(&self) -> Result<()> {
        println!("Checking platform app versions...");
        println!();

        for line in report::header() {
            println!("{line}");
        }

        // ArgoCD itself is not declared as a platform descriptor; it is read
        // straight off the cluster and compared against its upstream chart.
        let argocd_current = self
            .helm
            .installed_release_version(ARGOCD_NAMESPACE, ARGOCD_RELEASE, ARGOCD_CHART)
            .await;
        let argocd_latest = self
            .helm
            .latest_chart_version(ARGOCD_HELM_REPO, ARGOCD_CHART)
            .await;
        println!(
            "{}",
            report::format_preliminary_row("argocd", &argocd_current, &argocd_latest)
        );

        let mut records = self.collect_records().await;
        records.sort();
        for record in &records {
            println!("{}", report::format_record(record));
        }

        println!();
        println!("{}", report::legend());
        Ok(())
    }

    /// One record per classifiable descriptor, each latest-version lookup
    /// awaited in sequence. Unclassifiable descriptors contribute nothing.
    pub async fn collect_records(&self) -> Vec<AppRecord> {
        let mut records = Vec::new();
        for file in manifest::descriptor_files(&self.config.platform_dir()) {
            let Some((name, source)) = manifest::classify(&file) else {
                continue;
            };
            match source {
                AppSource::Chart {
                    repo_url,
                    chart,
                    revision,
                } => {
                    let latest = self.helm.latest_chart_version(&repo_url, &chart).await;
                    records.push(AppRecord {
                        name,
                        current: revision,
                        latest,
                        kind: SourceKind::Helm,
                    });
                }
                AppSource::GitPath { path } => {
                    let manifest_dir = self.config.resolve_source_path(&path);
                    if !manifest_dir.exists() {
                        continue;
                    }
                    let Some((image, current)) = manifest::extract_image(&manifest_dir) else {
                        continue;
                    };
                    let latest = self.registry.latest_tag(&image).await;
                    records.push(AppRecord {
                        name,
                        current,
                        latest,
                        kind: SourceKind::Docker,
                    });
                }
            }
        }
        records
    }
}
