mod animations;
mod app;
mod render;
mod theme;

use app::App;
use clap::{Parser, ValueEnum};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use crossword_core::{Generator, PuzzleSize, VocabularyData, VocabularyError, WordClue};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use theme::{Theme, ThemeName};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Crossword puzzles built from classical-roots vocabulary
#[derive(Parser, Debug)]
#[command(name = "crossword", version, about)]
struct Cli {
    /// Vocabulary JSON file (defaults to the user's data dir, then the bundled table)
    #[arg(long, value_name = "PATH")]
    vocab: Option<PathBuf>,

    /// Book to draw words from
    #[arg(long, default_value = "book-4")]
    book: String,

    /// Lesson numbers to include, comma separated (default: all)
    #[arg(long, value_delimiter = ',', value_name = "N,N")]
    lessons: Vec<u32>,

    /// Puzzle size
    #[arg(long, value_enum, default_value_t = SizeArg::Medium)]
    size: SizeArg,

    /// Seed for reproducible puzzles
    #[arg(long)]
    seed: Option<u64>,

    /// Color theme
    #[arg(long, value_enum, default_value_t = ThemeName::Dark)]
    theme: ThemeName,

    /// Write logs here (the terminal is busy drawing the puzzle)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SizeArg {
    Small,
    Medium,
    Large,
}

impl From<SizeArg> for PuzzleSize {
    fn from(size: SizeArg) -> Self {
        match size {
            SizeArg::Small => PuzzleSize::Small,
            SizeArg::Medium => PuzzleSize::Medium,
            SizeArg::Large => PuzzleSize::Large,
        }
    }
}

fn main() -> io::Result<ExitCode> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let (pool, source) = match load_pool(&cli) {
        Ok(loaded) => loaded,
        Err(err) => {
            error!(error = %err, "could not load word pool");
            eprintln!("Error: {}", err);
            return Ok(ExitCode::FAILURE);
        }
    };

    let generator = match cli.seed {
        Some(seed) => Generator::with_seed(seed),
        None => Generator::new(),
    };
    let mut app = match App::new(pool, generator, cli.size.into(), Theme::named(cli.theme), source) {
        Ok(app) => app,
        Err(err) => {
            error!(error = %err, "could not build the first puzzle");
            eprintln!("Error: {}", err);
            return Ok(ExitCode::FAILURE);
        }
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let result = run_app(&mut stdout, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, DisableMouseCapture)?;

    if let Err(e) = result {
        error!(error = %e, "terminal loop failed");
        eprintln!("Error: {}", e);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

fn init_logging(path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .try_init();
    info!("Starting crossword TUI");
    Ok(())
}

/// Vocabulary file in the user's data dir, if one has been installed
fn default_vocab_path() -> Option<PathBuf> {
    dirs::data_local_dir()
        .map(|dir| dir.join("crossword").join("vocabulary.json"))
        .filter(|path| path.exists())
}

/// Load the word pool and a label describing where it came from
fn load_pool(cli: &Cli) -> Result<(Vec<WordClue>, String), Box<dyn std::error::Error>> {
    let path = cli.vocab.clone().or_else(default_vocab_path);
    let data = match &path {
        Some(path) => {
            info!(path = %path.display(), "loading vocabulary");
            let json = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            VocabularyData::from_json(&json)?
        }
        None => VocabularyData::bundled()?,
    };

    let book = data.book(&cli.book).map_err(|err| {
        let known: Vec<_> = data.book_ids().collect();
        warn!(book = %cli.book, "unknown book");
        format!("{} (available: {})", err, known.join(", "))
    })?;
    let pool = book.word_clues(&cli.lessons);
    if pool.is_empty() {
        return Err(VocabularyError::NoWords.into());
    }

    let lessons = if cli.lessons.is_empty() {
        "all lessons".to_string()
    } else {
        let numbers: Vec<String> = cli.lessons.iter().map(u32::to_string).collect();
        format!("lessons {}", numbers.join(","))
    };
    Ok((pool, format!("{}, {}", book.title, lessons)))
}

fn run_app(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        let tick_rate = app.get_tick_rate();

        render::render(stdout, app)?;
        stdout.flush()?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout.min(Duration::from_millis(33)))? {
            match event::read()? {
                Event::Key(key) => {
                    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                        break;
                    }

                    match app.handle_key(key) {
                        app::AppAction::Continue => {}
                        app::AppAction::Quit => break,
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.tick();
            last_tick = Instant::now();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("crossword").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_cli_defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.book, "book-4");
        assert!(cli.lessons.is_empty());
        assert_eq!(PuzzleSize::from(cli.size), PuzzleSize::Medium);
        assert_eq!(cli.theme, ThemeName::Dark);
    }

    #[test]
    fn test_cli_lessons_and_theme() {
        let cli = parse(&["--lessons", "1,2,5", "--theme", "high-contrast", "--size", "large"]);
        assert_eq!(cli.lessons, vec![1, 2, 5]);
        assert_eq!(cli.theme, ThemeName::HighContrast);
        assert_eq!(PuzzleSize::from(cli.size), PuzzleSize::Large);
    }

    #[test]
    fn test_load_pool_from_bundled_table() {
        let cli = parse(&["--book", "book-6", "--lessons", "1,2"]);
        // Only fall back to the bundled table when nothing is installed
        if default_vocab_path().is_none() {
            let (pool, source) = load_pool(&cli).unwrap();
            assert_eq!(pool.len(), 10);
            assert_eq!(source, "Book 6, lessons 1,2");
        }
    }

    #[test]
    fn test_load_pool_unknown_book() {
        let cli = parse(&["--book", "book-z"]);
        if default_vocab_path().is_none() {
            let err = load_pool(&cli).unwrap_err().to_string();
            assert!(err.contains("book-z"));
            assert!(err.contains("book-4"));
        }
    }
}
