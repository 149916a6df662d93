use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use scene_bridge_core::config::timeout_from_millis;
use scene_bridge_core::lint::{has_errors, lint, Finding};
use scene_bridge_core::{run_script, scenarios, RunReport, SceneConfig, Script};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Drive a remote scene service with a command script, one acknowledged
/// command at a time.
#[derive(Debug, Parser)]
#[command(name = "scene-script", version)]
struct Cli {
    /// Script file: `.json`, or one wire command per line.
    #[arg(required_unless_present = "scenario")]
    script: Option<PathBuf>,

    /// Run a built-in scenario instead of a file.
    #[arg(long, conflicts_with = "script")]
    scenario: Option<String>,

    /// Service endpoint. Defaults to `SCENE_ENDPOINT`, then tcp://localhost:5555.
    #[arg(long)]
    endpoint: Option<String>,

    /// Maximum wait for each reply in milliseconds; 0 waits forever.
    /// Defaults to `SCENE_TIMEOUT_MS`.
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Lint the script and exit without connecting.
    #[arg(long)]
    check: bool,

    /// Refuse to run a script with lint errors.
    #[arg(long)]
    strict: bool,

    /// Print the encoded script and exit.
    #[arg(long)]
    print: bool,

    /// Print the run report as JSON.
    #[arg(long)]
    json: bool,
}

impl Cli {
    /// Flags override the environment.
    fn config(&self) -> SceneConfig {
        let mut config = SceneConfig::from_env();
        if let Some(endpoint) = &self.endpoint {
            config.endpoint = endpoint.clone();
        }
        if let Some(ms) = self.timeout_ms {
            config.timeout = timeout_from_millis(ms);
        }
        config
    }

    async fn load_script(&self) -> Result<Script> {
        if let Some(name) = &self.scenario {
            return scenarios::by_name(name).ok_or_else(|| {
                anyhow!(
                    "unknown scenario '{}', expected one of: {}",
                    name,
                    scenarios::NAMES.join(", ")
                )
            });
        }
        match &self.script {
            Some(path) => Script::load(path)
                .await
                .with_context(|| format!("failed to load {}", path.display())),
            None => bail!("pass a script path or --scenario"),
        }
    }
}

fn report_findings(findings: &[Finding]) {
    for finding in findings {
        tracing::warn!("{}", finding);
    }
}

fn print_report(report: &RunReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        for tx in &report.transactions {
            println!("#{} {} -> {}", tx.index, tx.wire, tx.reply);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let script = cli.load_script().await?;

    if cli.print {
        print!("{}", script.to_wire_lines()?);
        return Ok(());
    }

    let findings = lint(&script.commands);
    if cli.check {
        for finding in &findings {
            println!("{finding}");
        }
        if has_errors(&findings) {
            bail!("script '{}' has lint errors", script.name);
        }
        println!("script '{}': {} commands, {} findings", script.name, script.len(), findings.len());
        return Ok(());
    }

    report_findings(&findings);
    if cli.strict && has_errors(&findings) {
        bail!("script '{}' has lint errors, refusing to run", script.name);
    }

    let config = cli.config();
    tracing::info!("Running script '{}' against {}", script.name, config.endpoint);

    let report = run_script(config, &script.commands)
        .await
        .with_context(|| format!("script '{}' failed", script.name))?;

    print_report(&report, cli.json)
}
