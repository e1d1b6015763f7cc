// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use the_loom::config::{load_configuration, load_configuration_file, EngineConfiguration};
use the_loom::engine::Engine;
use the_loom::module::{Contribution, ModuleRegistry};

#[derive(Parser)]
#[command(name = "the-loom", version, about = "Module loader and service wiring engine")]
struct Cli {
    /// Configuration file. Defaults to config.<ENV>.yaml or config.yaml.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Inspect the engine configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Inspect registered modules
    Modules {
        #[command(subcommand)]
        action: ModulesAction,
    },
    /// Load modules and print what they contribute
    Load {
        /// Module to load; repeatable. Defaults to every enabled module.
        #[arg(long = "module", short = 'm')]
        modules: Vec<String>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Parse, template and validate the configuration and module graph
    Validate,
    /// Print the resolved configuration
    Render,
}

#[derive(Subcommand)]
enum ModulesAction {
    /// List registered modules and their dependencies
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = ModuleRegistry::with_builtin();

    match cli.command {
        Command::Config {
            action: ConfigAction::Validate,
        } => {
            let configuration = configuration(cli.config.as_deref()).await?;
            let engine = Engine::new(configuration, registry);
            let order = engine.plan(None).context("module graph is invalid")?;
            println!("Configuration is valid. Load order: {}", order.join(" -> "));
        }
        Command::Config {
            action: ConfigAction::Render,
        } => {
            let configuration = configuration(cli.config.as_deref()).await?;
            print!("{}", configuration.render()?);
        }
        Command::Modules {
            action: ModulesAction::List,
        } => {
            for descriptor in registry.iter() {
                let deps = descriptor.dependencies();
                let services: Vec<&str> = deps.services.iter().map(|k| k.as_str()).collect();
                println!("{}", descriptor.name());
                println!("  modules:  {}", list_or_none(&deps.modules));
                println!("  services: {}", list_or_none(&services));
            }
        }
        Command::Load { modules } => {
            let configuration = configuration(cli.config.as_deref()).await?;
            let mut engine = Engine::new(configuration, registry);
            let requested = if modules.is_empty() { None } else { Some(modules) };
            engine.load(requested).await.context("engine load failed")?;

            println!("Loaded: {}", engine.load_order().join(" -> "));
            for name in engine.load_order() {
                let Some(module) = engine.module(name) else {
                    continue;
                };
                let contributions = module.contributions();
                println!("{}", name);
                print_contributions("agents", &contributions.agents);
                print_contributions("workflows", &contributions.workflows);
                print_contributions("integrations", &contributions.integrations);
                print_contributions("pipelines", &contributions.pipelines);
                print_contributions("orchestrations", &contributions.orchestrations);
                for ontology in &contributions.ontologies {
                    println!("  ontology: {}", ontology.name);
                }
            }
            engine.unload().await?;
        }
    }

    Ok(())
}

async fn configuration(path: Option<&std::path::Path>) -> Result<EngineConfiguration> {
    let configuration = match path {
        Some(path) => load_configuration_file(path)
            .await
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => load_configuration(None).await?,
    };
    Ok(configuration)
}

fn list_or_none<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(", ")
    }
}

fn print_contributions(label: &str, items: &[Contribution]) {
    for item in items {
        println!("  {}: {} ({})", label, item.name, item.description);
    }
}
