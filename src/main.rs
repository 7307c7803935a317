//! smeltsim - a deterministic furnace simulation core
//!
//! Headless demo driver: loads a smelting catalog, runs one furnace
//! for a configured number of ticks, and logs lit/unlit transitions.

mod config;

use anyhow::{bail, Context, Result};
use config::DemoConfig;
use smeltsim_assets::{CatalogBundle, CatalogDocument};
use smeltsim_core::{ItemStack, SimTick};
use smeltsim_sim::{Furnace, FurnaceVariant, Port, TickSignal, SLOT_UPGRADES};
use std::{env, path::Path};
use tracing::{info, warn};

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting smeltsim v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1))?;
    let mut cfg = match &cli.config_path {
        Some(path) => DemoConfig::load_from_path(Path::new(path)),
        None => DemoConfig::load(),
    };
    if let Some(ticks) = cli.ticks {
        cfg.ticks = ticks;
    }
    if let Some(variant) = &cli.variant {
        cfg.variant = variant.clone();
    }
    if cli.electric {
        cfg.electric = true;
    }
    if let Some(path) = &cli.catalog_path {
        cfg.catalog_path = path.clone();
    }

    let bundle = load_catalog(Path::new(&cfg.catalog_path))?;
    run_demo(&cfg, &bundle)
}

/// Load the catalog from disk, falling back to the built-in table.
fn load_catalog(path: &Path) -> Result<CatalogBundle> {
    match CatalogDocument::load_file(path) {
        Ok(doc) => match doc.build() {
            Ok(bundle) => {
                info!(
                    recipes = bundle.recipes.len(),
                    "Loaded smelting catalog from {}",
                    path.display()
                );
                return Ok(bundle);
            }
            Err(err) => warn!("Catalog {} rejected: {err}. Using built-in", path.display()),
        },
        Err(err) => warn!(
            "Could not load catalog {}: {err}. Using built-in",
            path.display()
        ),
    }
    builtin_catalog()
}

fn builtin_catalog() -> Result<CatalogBundle> {
    const BUILTIN: &str = include_str!("../config/smelting.json");
    let doc = CatalogDocument::parse_str(BUILTIN).context("built-in catalog failed to parse")?;
    doc.build().context("built-in catalog failed to build")
}

fn run_demo(cfg: &DemoConfig, bundle: &CatalogBundle) -> Result<()> {
    let variant = match cfg.variant.as_str() {
        "iron" => FurnaceVariant::IRON,
        "zenith" => FurnaceVariant::ZENITH,
        other => bail!("unknown furnace variant '{other}' (expected 'iron' or 'zenith')"),
    };

    let ore = bundle
        .item_id("iron_ore")
        .context("catalog is missing 'iron_ore'")?;
    let coal = bundle
        .item_id("coal")
        .context("catalog is missing 'coal'")?;

    let mut furnace = Furnace::new(variant);
    furnace.insert_via(Port::Above, ItemStack::new(ore, cfg.ore_count));
    furnace.insert_via(Port::Side, ItemStack::new(coal, cfg.coal_count));

    if cfg.electric {
        let kit = bundle
            .item_id("electric_kit")
            .context("catalog is missing 'electric_kit'")?;
        furnace
            .slots_mut()
            .set(SLOT_UPGRADES[0], Some(ItemStack::new(kit, 1)));
        while furnace.energy_mut().insert(u32::MAX) > 0 {}
        info!(
            stored = furnace.energy().stored(),
            "Electric upgrade installed, buffer charged"
        );
    }

    info!(
        variant = variant.name,
        ticks = cfg.ticks,
        ore = cfg.ore_count,
        coal = cfg.coal_count,
        "Running furnace"
    );

    let mut tick = SimTick::ZERO;
    for _ in 0..cfg.ticks {
        let signal = furnace.tick(&bundle.recipes, &bundle.upgrades);
        if signal.contains(TickSignal::BECAME_LIT) {
            info!(tick = tick.0, "furnace became lit");
        }
        if signal.contains(TickSignal::BECAME_UNLIT) {
            info!(tick = tick.0, "furnace became unlit");
        }
        tick = tick.advance(1);
    }

    let smelted = furnace.extract_via(Port::Below, u8::MAX);
    info!(
        output = smelted.as_ref().map_or(0, |s| s.count),
        input_left = furnace.peek_via(Port::Above).map_or(0, |s| s.count),
        fuel_left = furnace.peek_via(Port::Side).map_or(0, |s| s.count),
        energy = furnace.energy().stored(),
        comparator = furnace.comparator_signal(),
        "Simulation finished"
    );
    Ok(())
}

/// Hand-rolled CLI options (no external argument parser needed).
#[derive(Debug, Default)]
struct CliOptions {
    config_path: Option<String>,
    catalog_path: Option<String>,
    variant: Option<String>,
    ticks: Option<u64>,
    electric: bool,
}

impl CliOptions {
    fn parse(args: impl Iterator<Item = String>) -> Result<Self> {
        let mut options = CliOptions::default();
        let mut args = args.peekable();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => options.config_path = Some(expect_value(&mut args, "--config")?),
                "--catalog" => options.catalog_path = Some(expect_value(&mut args, "--catalog")?),
                "--variant" => options.variant = Some(expect_value(&mut args, "--variant")?),
                "--ticks" => {
                    let value = expect_value(&mut args, "--ticks")?;
                    options.ticks = Some(
                        value
                            .parse()
                            .with_context(|| format!("invalid --ticks value '{value}'"))?,
                    );
                }
                "--electric" => options.electric = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown argument '{other}' (try --help)"),
            }
        }
        Ok(options)
    }
}

fn expect_value(
    args: &mut std::iter::Peekable<impl Iterator<Item = String>>,
    flag: &str,
) -> Result<String> {
    args.next()
        .with_context(|| format!("{flag} requires a value"))
}

fn print_usage() {
    println!("smeltsim - deterministic furnace simulation demo");
    println!();
    println!("USAGE: smeltsim [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  --config <PATH>   Demo config TOML (default config/demo.toml)");
    println!("  --catalog <PATH>  Smelting catalog JSON (default config/smelting.json)");
    println!("  --variant <NAME>  Furnace variant: iron | zenith");
    println!("  --ticks <N>       Ticks to simulate");
    println!("  --electric        Install the electric upgrade and pre-charge energy");
    println!("  -h, --help        Show this help");
}
