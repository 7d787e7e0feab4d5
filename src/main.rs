use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::style;
use jantaku::dora::indicator_to_dora;
use jantaku::tile::{parse_tiles, tiles_to_string};
use jantaku::vision::TemplateSet;
use jantaku::{Config, DiscardSelector, GameState, TableReader, Tile};
use std::path::{Path, PathBuf};
use tracing_subscriber::filter::LevelFilter;

#[derive(Parser)]
#[command(name = "jantaku", version, about = "Read a mahjong table from a screenshot and suggest a discard")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recognize hand and dora indicators in a screenshot
    Analyze {
        #[arg(long)]
        screenshot: PathBuf,
        /// Directory of tile images named by tile token, e.g. man1.png
        #[arg(long)]
        templates: PathBuf,
        #[arg(long)]
        config: Option<PathBuf>,
        /// Write the full analysis as json
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Score the discards of a hand given in compact notation
    Discard {
        /// e.g. "2234m 567p 9s 555z 12z"
        #[arg(long)]
        hand: String,
        /// Revealed dora indicators
        #[arg(long)]
        dora: Option<String>,
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print the dora designated by an indicator token
    Dora {
        #[arg(long)]
        indicator: String,
    },
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path).with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(Config::default()),
    }
}

fn highlight(discard: Option<Tile>) -> String {
    match discard {
        Some(tile) => format!("discard {}", style(tile).green().bold()),
        None => format!("{}", style("no discard").yellow()),
    }
}

fn analyze(screenshot: &Path, templates: &Path, config: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let templates =
        TemplateSet::load_dir(templates).with_context(|| format!("failed to load templates from {}", templates.display()))?;
    let reader = TableReader::new(templates, &config)?;
    let image = image::open(screenshot)
        .with_context(|| format!("failed to open screenshot {}", screenshot.display()))?
        .into_luma8();

    let analysis = reader.read(&image)?;
    println!("{}", analysis.state.to_log_string());
    for candidate in &analysis.candidates {
        println!("{}", candidate.to_candidate_string());
    }
    println!("{}", highlight(analysis.discard));

    if let Some(out) = out {
        let writer = std::io::BufWriter::new(
            std::fs::File::create(out).with_context(|| format!("failed to create {}", out.display()))?,
        );
        serde_json::to_writer_pretty(writer, &analysis)?;
        log::info!("wrote analysis to {}", out.display());
    }
    Ok(())
}

fn discard(hand: &str, dora: Option<&str>, config: Option<&Path>) -> Result<()> {
    let config = load_config(config)?;
    let tiles = parse_tiles(hand).with_context(|| format!("invalid hand {hand:?}"))?;
    let mut state = GameState::new();
    if let Some(dora) = dora {
        for indicator in parse_tiles(dora).with_context(|| format!("invalid dora indicators {dora:?}"))? {
            state.add_dora_indicator(indicator)?;
        }
    }

    let selector = DiscardSelector::new(config.discard);
    let candidates = selector.evaluate(&tiles, state.doras());
    println!("{} | dora: {}", tiles_to_string(&tiles), tiles_to_string(state.doras()));
    for candidate in &candidates {
        println!("{}", candidate.to_candidate_string());
    }
    println!("{}", highlight(jantaku::discard::pick(&candidates)));
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { LevelFilter::DEBUG } else { LevelFilter::INFO })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Analyze {
            screenshot,
            templates,
            config,
            out,
        } => analyze(&screenshot, &templates, config.as_deref(), out.as_deref()),
        Commands::Discard { hand, dora, config } => discard(&hand, dora.as_deref(), config.as_deref()),
        Commands::Dora { indicator } => {
            let indicator: Tile = indicator.parse()?;
            println!("{indicator} -> {}", indicator_to_dora(indicator));
            Ok(())
        }
    }
}
