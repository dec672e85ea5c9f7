mod match_collector;
mod reference_matcher;

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Parser;
use glyph_canvas::{GlyphSession, Point, SessionConfig};
use serde_derive::Deserialize;
use tracing::{debug, info, warn};

use reference_matcher::ReferenceMatcher;

#[derive(Parser)]
#[command(name = "cli_demo", about = "Replay recorded handwriting through a glyph session")]
struct Cli {
    /// Recorded inputs, one JSON object per line
    #[arg(short, long, default_value = "data/inputs.jsonl")]
    inputs: PathBuf,

    /// Reference glyphs (JSON array)
    #[arg(short, long, default_value = "data/references.json")]
    references: PathBuf,

    /// Session configuration (JSON); defaults apply if omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Maximum number of candidates per lookup
    #[arg(short, long, default_value = "8")]
    limit: usize,

    /// Normalize every drawing before matching
    #[arg(long)]
    normalize: bool,

    /// Print the exported glyph of every input as JSON
    #[arg(long)]
    dump_glyph: bool,
}

#[derive(Deserialize)]
struct Action {
    action: String,
    points: Vec<Vec<f64>>,
}

#[derive(Deserialize)]
struct Input {
    char: char,
    actions: Vec<Action>,
}

fn read_inputs(path: &Path) -> Result<Vec<Input>, Box<dyn std::error::Error>> {
    let mut res: Vec<Input> = Vec::new();
    let file = File::open(path)?;
    for line in BufReader::new(file).lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        res.push(serde_json::from_str(&line)?);
    }
    Ok(res)
}

fn replay(session: &mut GlyphSession<ReferenceMatcher>, input: &Input) {
    session.clear_all();
    for action in &input.actions {
        if action.action != "stroke" {
            warn!("skipping unknown action '{}'", action.action);
            continue;
        }
        let mut points = action.points.iter().filter(|pt| pt.len() >= 2);
        if let Some(pt) = points.next() {
            session.pointer_down(Point::new(pt[0], pt[1]));
        }
        for pt in points {
            session.pointer_move(Point::new(pt[0], pt[1]));
        }
        session.pointer_up(Instant::now());
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("glyph_canvas=info".parse()?)
                .add_directive("cli_demo=info".parse()?),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => SessionConfig::from_json(&fs::read_to_string(path)?)?,
        None => SessionConfig::default(),
    };
    let matcher = ReferenceMatcher::load(&cli.references, cli.limit, config.canonical_size)?;
    info!("Loaded {} reference glyphs.", matcher.reference_count());

    let inputs = read_inputs(&cli.inputs)?;
    info!("Loaded {} inputs.", inputs.len());

    let mut session = GlyphSession::new(config, matcher)?;
    // The demo decides when to match
    session.set_auto_match_delay(-1);

    let start = Instant::now();
    let mut guessed = 0;
    for input in &inputs {
        replay(&mut session, input);
        let res = if cli.normalize {
            session.normalize_and_rematch()
        } else {
            session.trigger_match()
        };
        for event in session.take_events() {
            debug!("{:?}", event);
        }
        if let Err(err) = res {
            println!("{}: no candidates ({})", input.char, err);
            continue;
        }
        let ranked: Vec<String> = session
            .candidates()
            .iter()
            .map(|c| format!("{} {:.3}", c.character, c.score))
            .collect();
        if session.candidate_at(0).map(|c| c.character) == Some(input.char) {
            guessed += 1;
        }
        println!("{}: {}", input.char, ranked.join(", "));
        if cli.dump_glyph {
            println!("{}", serde_json::to_string(&session.export_glyph())?);
        }
    }

    println!(
        "Guessed {} of {} inputs in {:?}.",
        guessed,
        inputs.len(),
        start.elapsed()
    );
    Ok(())
}
