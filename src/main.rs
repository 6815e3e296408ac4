use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use synthetic_events::{EventCatalog, Environment, Window};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: synthetic-events [--catalog <file.yaml>] [--environment <modern|jsdom|legacy|file.yaml>]";

struct Options {
    catalog: Option<PathBuf>,
    environment: Environment,
}

fn main() -> Result<()> {
    let subscriber_result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .try_init();
    if subscriber_result.is_err() {
        // tracing was already initialised; continue silently
    }

    let options = parse_args(std::env::args().skip(1))?;
    let catalog = EventCatalog::load(options.catalog.clone()).with_context(|| match &options.catalog {
        Some(path) => format!("failed to load event catalog from {}", path.display()),
        None => "failed to load built-in event catalog".to_string(),
    })?;

    let window = Window::new(options.environment);
    let builder = window.event_builder();
    tracing::info!(
        environment = %window.environment().name,
        strategy = %builder.strategy(),
        "inspecting event catalog"
    );

    println!(
        "{:<20} {:<18} {:<18} {}",
        "type", "catalog class", "constructed as", "default init"
    );
    for (key, spec) in catalog.iter() {
        let init = serde_json::to_string(spec.default_init()).context("serialize default init")?;
        println!(
            "{:<20} {:<18} {:<18} {}",
            key.event_type(),
            spec.class(),
            builder.resolve_class(&window, spec),
            init
        );
    }
    for (alias, key) in catalog.aliases() {
        println!("alias {alias} -> {key}");
    }

    Ok(())
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options> {
    let mut catalog = std::env::var("SYNTHETIC_EVENTS_CATALOG").ok().map(PathBuf::from);
    let mut environment = Environment::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--catalog" => {
                let path = args.next().ok_or_else(|| anyhow!("--catalog needs a path\n{USAGE}"))?;
                catalog = Some(PathBuf::from(path));
            }
            "--environment" => {
                let name = args
                    .next()
                    .ok_or_else(|| anyhow!("--environment needs a value\n{USAGE}"))?;
                environment = load_environment(&name)?;
            }
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unexpected argument '{other}'\n{USAGE}"),
        }
    }

    Ok(Options {
        catalog,
        environment,
    })
}

fn load_environment(name: &str) -> Result<Environment> {
    if let Some(environment) = Environment::preset(name) {
        return Ok(environment);
    }
    let contents = fs::read_to_string(name)
        .with_context(|| format!("'{name}' is neither a preset nor a readable environment file"))?;
    serde_yaml::from_str(&contents).with_context(|| format!("failed to parse environment file {name}"))
}
