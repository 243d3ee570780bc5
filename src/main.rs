use anyhow::Result;
use assetlint::asset::{AssetAccessor, AssetPath, Catalog, FsAccessor};
use assetlint::cli::{Cli, Commands};
use assetlint::config::{Config, CONFIG_FILE};
use assetlint::engine::{LogProgress, Scanner};
use assetlint::ruleset::{ConfigStore, RuleSetStore};

use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("ASSETLINT_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            std::process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Check {
            paths,
            project,
            catalog,
            rule_set,
            format,
            config,
            fail_on,
            jobs,
        } => {
            let project_root = project.canonicalize().unwrap_or(project);
            let cfg = Config::load(config.as_deref(), &project_root)?;

            let accessor: Box<dyn AssetAccessor> = match catalog {
                Some(path) => Box::new(Catalog::load_file(&path)?),
                None => Box::new(FsAccessor::open(
                    &cfg.content_dir(&project_root),
                    &cfg.mount,
                    &cfg.classes,
                    &cfg.ignore,
                )?),
            };

            let store = ConfigStore::new(&cfg);
            let rule_set = match rule_set {
                Some(id) => store.load_rule_set(&id)?,
                None => store.load_default_rule_set()?,
            };

            let paths = if paths.is_empty() {
                accessor.roots()
            } else {
                paths
            };
            let paths = paths
                .into_iter()
                .map(AssetPath::new)
                .collect::<Result<Vec<_>, _>>()?;

            let outcome = Scanner::new(accessor.as_ref())
                .with_progress(&LogProgress)
                .with_jobs(jobs)
                .scan(&paths, &rule_set)?;

            let output_format = format.unwrap_or(cfg.format);
            assetlint::cli::output::render(&outcome, output_format);

            Ok(i32::from(outcome.has_severity_at_least(fail_on)))
        }
        Commands::Init => {
            let path = std::env::current_dir()?.join(CONFIG_FILE);
            if path.exists() {
                eprintln!("{CONFIG_FILE} already exists");
                return Ok(1);
            }
            std::fs::write(&path, Config::default_toml())?;
            println!("Created {CONFIG_FILE}");
            Ok(0)
        }
        Commands::Explain { rule: None } => {
            println!("{}", assetlint::cli::explain::list_rules());
            Ok(0)
        }
        Commands::Explain { rule: Some(rule) } => {
            use assetlint::cli::explain::{explain, list_rules};
            match explain(&rule) {
                Some(text) => {
                    println!("{text}");
                    Ok(0)
                }
                None => {
                    eprintln!("Unknown rule: {rule}\n");
                    eprintln!("{}", list_rules());
                    Ok(1)
                }
            }
        }
        Commands::RuleSets { project, config } => {
            let project_root = project.canonicalize().unwrap_or(project);
            let cfg = Config::load(config.as_deref(), &project_root)?;
            let store = ConfigStore::new(&cfg);

            for id in store.rule_set_ids() {
                let rule_set = store.load_rule_set(&id)?;
                let marker = if id == cfg.default_rule_set {
                    " (default)"
                } else {
                    ""
                };
                println!("{id}{marker}");
                for entry in rule_set.entries() {
                    let state = if entry.is_enabled() { "" } else { " disabled" };
                    println!(
                        "  {:<20} {}{state}",
                        entry.id(),
                        entry.effective_severity()
                    );
                }
            }
            Ok(0)
        }
    }
}
