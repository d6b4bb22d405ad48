use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use blue_app::config::AppConfig;
use blue_app::game_loop::{self, LoopOptions};
use blue_app::input::{Idle, InputSource, RandomInput};
use blue_app::script::InputScript;
use blue_demos::assets::SpriteSheet;
use blue_demos::sega3d::{ObjectFlags, PolygonData};
use blue_demos::{CoinsDemo, Demo, Sega3dDemo, ZoomSpriteDemo};

#[derive(Parser)]
#[command(name = "blue-demo", version, about = "Run a BLUE demo headless or in real time")]
struct Cli {
    /// Demo to run
    #[arg(value_enum)]
    demo: DemoKind,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    frames: u64,

    /// JSON input script
    #[arg(short, long, conflicts_with = "random")]
    script: Option<PathBuf>,

    /// Mash buttons from the configured seed
    #[arg(long)]
    random: bool,

    /// Directory holding ZOOM.TEX and ZOOM.PAL
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Built-in model name or model JSON file for the 3D demo
    #[arg(short, long)]
    model: Option<String>,

    /// JSON runner configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write per-frame summaries (with draw lists) as JSON
    #[arg(short, long)]
    dump: Option<PathBuf>,

    /// Hold the tick rate instead of running as fast as possible
    #[arg(long)]
    realtime: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DemoKind {
    ZoomSprite,
    Sega3d,
    Coins,
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .finish()
        .init();
}

fn load_model(name: &str) -> Result<PolygonData> {
    if let Some(model) = PolygonData::builtin(name) {
        return Ok(model);
    }
    PolygonData::load(Path::new(name)).with_context(|| format!("loading model {name}"))
}

fn build_demo(cli: &Cli, config: &AppConfig) -> Result<Box<dyn Demo>> {
    let demo: Box<dyn Demo> = match cli.demo {
        DemoKind::ZoomSprite => {
            let sheet = match &cli.assets {
                Some(dir) => SpriteSheet::load(dir)
                    .with_context(|| format!("loading sprite assets from {}", dir.display()))?,
                None => SpriteSheet::generated(),
            };
            Box::new(ZoomSpriteDemo::new(sheet))
        }
        DemoKind::Sega3d => {
            let model = load_model(cli.model.as_deref().unwrap_or(&config.model))?;
            let flags = if config.wireframe {
                ObjectFlags::WIREFRAME
            } else {
                ObjectFlags::empty()
            };
            Box::new(Sega3dDemo::new(model, flags)?.with_rotation(config.rotate_model))
        }
        DemoKind::Coins => Box::new(CoinsDemo::new(config.seed)?),
    };
    Ok(demo)
}

fn build_input(cli: &Cli, config: &AppConfig) -> Result<Box<dyn InputSource>> {
    if let Some(path) = &cli.script {
        let script = InputScript::load(path)?;
        info!(steps = script.steps().len(), frames = script.len_frames(), "input script loaded");
        return Ok(Box::new(script));
    }
    if cli.random {
        return Ok(Box::new(RandomInput::new(config.seed)));
    }
    Ok(Box::new(Idle))
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let mut demo = build_demo(&cli, &config)?;
    let mut input = build_input(&cli, &config)?;
    let options = LoopOptions {
        frames: cli.frames,
        tick_rate: config.tick_rate,
        realtime: cli.realtime,
        record: cli.dump.is_some(),
    };

    info!(demo = demo.name(), frames = options.frames, realtime = options.realtime, "starting");
    let report = game_loop::run(demo.as_mut(), input.as_mut(), &options)
        .with_context(|| format!("running {}", demo.name()))?;

    if let Some(last) = &report.last {
        info!(frame = last.frame, "{}", last.debug_text);
    }

    if let Some(path) = &cli.dump {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report.summaries)
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), frames = report.summaries.len(), "summaries written");
    }

    Ok(())
}
