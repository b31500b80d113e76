//! `inkglyph` CLI: render recorded freehand strokes as a glyph SVG.

mod counter;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use inkglyph_core::{
    parse_strokes, BarPanel, Config, Counter, MemoryCounter, Session, Stroke,
};
use inkglyph_svg::render_form_to_string;

use crate::counter::FileCounter;

#[derive(Parser)]
#[command(version, about = "Turn freehand strokes into a constrained glyph")]
struct Cli {
    /// Stroke file: a JSON array of strokes, each an array of
    /// `{"x", "y", "t", "pressure"?}` samples
    file: PathBuf,

    /// Output directory for SVG files
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Also write one SVG per preview frame while the strokes are replayed
    #[arg(long)]
    replay: bool,

    /// Samples delivered between two preview frames
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u32).range(1..))]
    every: u32,

    /// Print the parameter panel after the final frame
    #[arg(long)]
    panel: bool,

    /// File holding the visit counter, advanced once per written glyph
    #[arg(long, value_name = "FILE")]
    counter: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            Config::from_json_str(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => Config::default(),
    };

    let text = fs::read_to_string(&cli.file)
        .with_context(|| format!("reading strokes {}", cli.file.display()))?;
    let strokes =
        parse_strokes(&text).with_context(|| format!("decoding {}", cli.file.display()))?;

    fs::create_dir_all(&cli.output)
        .with_context(|| format!("creating output directory {}", cli.output.display()))?;

    match &cli.counter {
        Some(path) => draw(&cli, config, &strokes, FileCounter::new(path)),
        None => draw(&cli, config, &strokes, MemoryCounter::default()),
    }
}

/// Replay the strokes through a session and write the resulting SVGs.
fn draw<C: Counter>(cli: &Cli, config: Config, strokes: &[Stroke], counter: C) -> Result<()> {
    let stem = cli
        .file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("glyph");
    let mut session = Session::new(config, counter, BarPanel::new());
    let mut previews = 0usize;
    let mut delivered = 0u32;

    for stroke in strokes {
        session.pointer_down();
        for sample in stroke.samples() {
            session.pointer_move(*sample);
            delivered += 1;
            if delivered % cli.every != 0 {
                continue;
            }
            if let Some(frame) = session.tick() {
                if cli.replay {
                    previews += 1;
                    let svg =
                        render_form_to_string(&frame.form, &frame.disclosure, &config.render);
                    write_svg(&cli.output, &format!("{stem}_{previews:03}.svg"), &svg)?;
                }
            }
        }
        session.pointer_up();
    }

    let Some(frame) = session.frame().copied() else {
        anyhow::bail!("no frame was produced from {}", cli.file.display());
    };
    let svg = render_form_to_string(&frame.form, &frame.disclosure, &config.render);
    write_svg(&cli.output, &format!("{stem}.svg"), &svg)?;
    info!(
        "{} strokes, {} preview frames, {} pipeline runs",
        strokes.len(),
        previews,
        session.runs()
    );

    if cli.panel {
        print!("{}", session.panel().to_text());
    }

    if cli.counter.is_some() {
        match session.reset() {
            Some(total) => println!("glyph #{total}"),
            None => warn!("glyph written but the counter could not be advanced"),
        }
    }
    Ok(())
}

fn write_svg(dir: &Path, name: &str, svg: &str) -> Result<()> {
    let path = dir.join(name);
    fs::write(&path, svg).with_context(|| format!("writing {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(())
}
