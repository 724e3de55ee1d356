use angler_assets::AssetStore;
use angler_game::{AnglerConfig, Game};
use angler_kernel::Session;
use angler_render::RecordingRenderer;
use angler_tools::SessionInspector;
use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "angler-cli", about = "Headless driver for the angler game")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Generate a layout and list obstacles and fish
    Layout {
        /// RNG seed for the layout
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// JSON config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Run frames headlessly with scripted key presses
    Simulate {
        #[arg(short, long, default_value = "42")]
        seed: u64,
        /// Number of frames at 60 Hz
        #[arg(short, long, default_value = "600")]
        frames: u64,
        /// Key presses as `frame:key`, e.g. `0:Enter 1:ArrowUp`
        #[arg(long, num_args = 0..)]
        script: Vec<String>,
        /// Frames before streamed assets finish loading
        #[arg(long, default_value = "0")]
        asset_delay: u64,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AnglerConfig> {
    match path {
        Some(path) => AnglerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(AnglerConfig::default()),
    }
}

/// Parse `frame:key` entries into per-frame key lists.
fn parse_script(entries: &[String]) -> anyhow::Result<BTreeMap<u64, Vec<String>>> {
    let mut script: BTreeMap<u64, Vec<String>> = BTreeMap::new();
    for entry in entries {
        let Some((frame, key)) = entry.split_once(':') else {
            bail!("script entry {entry:?} is not `frame:key`");
        };
        let frame: u64 = frame
            .parse()
            .with_context(|| format!("bad frame number in {entry:?}"))?;
        if key.is_empty() {
            bail!("script entry {entry:?} has no key");
        }
        script.entry(frame).or_default().push(key.to_string());
    }
    Ok(script)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("angler-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("kernel: {}", angler_kernel::crate_info());
            println!("input: {}", angler_input::crate_info());
            println!("assets: {}", angler_assets::crate_info());
            println!("render: {}", angler_render::crate_info());
            println!("game: {}", angler_game::crate_info());
            println!("tools: {}", angler_tools::crate_info());
        }
        Commands::Layout { seed, config } => {
            let config = load_config(config.as_ref())?;
            let session = Session::new(config.game, seed)?;
            println!("Layout: seed={seed}");
            for obstacle in SessionInspector::list_obstacles(&session) {
                println!("  {obstacle}");
            }
            for fish in SessionInspector::list_fish(&session) {
                println!("  {fish}");
            }
        }
        Commands::Simulate {
            seed,
            frames,
            script,
            asset_delay,
            config,
        } => {
            let config = load_config(config.as_ref())?;
            let script = parse_script(&script)?;
            let assets = if asset_delay == 0 {
                AssetStore::all_ready()
            } else {
                AssetStore::all_loading()
            };
            let mut game = Game::new(config, seed, assets)?;
            let mut renderer = RecordingRenderer::default();
            let dt = 1.0 / 60.0;

            println!("Simulate: seed={seed}, frames={frames}");
            let mut skipped = 0;
            for frame in 0..frames {
                if asset_delay > 0 && frame == asset_delay {
                    game.assets_mut().finish_loading();
                    tracing::info!(frame, "assets ready");
                }
                for key in script.get(&frame).into_iter().flatten() {
                    if game.handle_key(key).is_none() {
                        tracing::warn!(frame, key = %key, "unbound key");
                    }
                }

                renderer.clear();
                let t = (frame + 1) as f64 * dt;
                let report = game.frame(t, dt, &mut renderer)?;
                skipped += report.stats.skipped;
                for event in &report.events {
                    println!("  [{frame:>5}] {event:?}");
                }
            }

            println!("Skipped draws while loading: {skipped}");
            println!("{}", SessionInspector::summary(game.session()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_groups_keys_by_frame() {
        let entries = vec![
            "0:Enter".to_string(),
            "5:ArrowUp".to_string(),
            "5:ArrowLeft".to_string(),
        ];
        let script = parse_script(&entries).unwrap();
        assert_eq!(script[&0], vec!["Enter"]);
        assert_eq!(script[&5], vec!["ArrowUp", "ArrowLeft"]);
    }

    #[test]
    fn script_rejects_malformed_entries() {
        assert!(parse_script(&["Enter".to_string()]).is_err());
        assert!(parse_script(&["x:Enter".to_string()]).is_err());
        assert!(parse_script(&["3:".to_string()]).is_err());
    }

    #[test]
    fn cli_parses_simulate() {
        let cli = Cli::try_parse_from([
            "angler-cli",
            "simulate",
            "--frames",
            "10",
            "--script",
            "0:Enter",
            "1:ArrowUp",
        ])
        .unwrap();
        match cli.command {
            Commands::Simulate { frames, script, .. } => {
                assert_eq!(frames, 10);
                assert_eq!(script.len(), 2);
            }
            _ => panic!("expected simulate"),
        }
    }
}
