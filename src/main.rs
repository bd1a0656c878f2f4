mod tui;

use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use crossterm::cursor::{Hide, Show};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use door_maze::config::{DOOR_PROBABILITY, MAX_DEGREE, MIN_DEGREE};
use door_maze::{seeded_rng, Difficulty, GenConfig, Session, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "maze")]
#[command(about = "Find the exit of a randomly generated door maze", long_about = None)]
struct Args {
    /// Preset grid size (easy 4x4, normal 6x6, hard 9x9)
    #[arg(long, value_enum, default_value_t = Difficulty::Normal)]
    difficulty: Difficulty,

    /// Override the preset row count
    #[arg(long)]
    rows: Option<usize>,

    /// Override the preset column count
    #[arg(long)]
    cols: Option<usize>,

    /// Random seed; a fresh one is drawn when omitted
    #[arg(long, env = "MAZE_SEED")]
    seed: Option<u64>,

    /// Chance of opening each door before degree correction
    #[arg(long, default_value_t = DOOR_PROBABILITY)]
    door_probability: f64,

    #[arg(long, default_value_t = MIN_DEGREE)]
    min_degree: usize,

    #[arg(long, default_value_t = MAX_DEGREE)]
    max_degree: usize,

    /// Write logs here (filtered by RUST_LOG, default info)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print one maze as text and exit
    #[arg(long, default_value_t = false)]
    print: bool,
}

impl Args {
    fn settings(&self) -> Settings {
        let mut settings = Settings::for_difficulty(self.difficulty);
        settings.rows = self.rows.unwrap_or(settings.rows);
        settings.cols = self.cols.unwrap_or(settings.cols);
        settings.seed = self.seed;
        settings.gen = GenConfig {
            door_probability: self.door_probability,
            min_degree: self.min_degree,
            max_degree: self.max_degree,
            ..settings.gen
        };
        settings
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let settings = args.settings();
    let mut rng = seeded_rng(settings.seed);
    let session = Session::new(settings, &mut rng)?;

    if args.print {
        print!("{}", tui::render_text(&session));
        return Ok(());
    }

    let mut stdout = io::stdout();
    terminal::enable_raw_mode()?;
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(Hide)?;

    let result = tui::run(&mut stdout, session, &mut rng);

    stdout.execute(Show)?;
    stdout.execute(LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;
    result
}

// The interactive screen owns the terminal, so logs only go to stderr in
// --print mode.
fn init_logging(args: &Args) -> io::Result<()> {
    let filter = || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(Mutex::new(file))
            .with_ansi(false)
            .init();
    } else if args.print {
        tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}
