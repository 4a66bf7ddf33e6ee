use clap::Parser;
use std::path::PathBuf;
use vercheck::{config::Config, helm::HelmClient, runner::VersionChecker};

#[derive(Parser)]
#[command(name = "vercheck")]
#[command(about = "Audit pinned GitOps application versions against upstream registries")]
struct Cli {
    /// Repository root containing the gitops/ tree
    #[arg(long, value_name = "DIR", default_value = ".")]
    repo_root: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !HelmClient::new().available().await {
        println!("Error: helm is not installed.");
        println!("Install with: https://helm.sh/docs/intro/install/");
        println!("Or: brew install helm");
        std::process::exit(1);
    }

    let checker = VersionChecker::new(Config::new(cli.repo_root));
    checker.check_all().await?;
    Ok(())
}
