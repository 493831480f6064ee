use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use klack::{
    app::App,
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    logging,
    runtime::{AppEventSource, CrosstermEventSource, FixedTicker, Runner, Ticker},
    timer::SAMPLE_INTERVAL,
    typing_policy::CommitPolicy,
    typing_test::TypingTest,
    word_supply::ShuffledSupply,
    EngineError,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};
use tracing::{info, Level};

const TICK_RATE_MS: u64 = 100;

/// minimal typing speed test for the terminal
#[derive(Parser, Debug, Clone)]
#[clap(version, about)]
pub struct Cli {
    /// number of words to type before the test ends
    #[clap(short = 'w', long = "words")]
    number_of_words: Option<usize>,

    /// run a timed test of this many seconds instead of a word count
    #[clap(short = 's', long = "secs")]
    number_of_secs: Option<u64>,

    /// mix symbol tokens into the word list
    #[clap(long)]
    symbols: bool,

    /// how a mistyped word is committed
    #[clap(long, value_enum)]
    policy: Option<CommitPolicy>,

    /// shorthand for `--policy strict-advance`
    #[clap(long, conflicts_with = "policy")]
    strict: bool,

    /// remaining-word count that triggers a refill in timed tests
    #[clap(long)]
    low_water_mark: Option<usize>,

    /// number of words fetched per refill
    #[clap(long)]
    batch_size: Option<usize>,

    /// settings file to read instead of the default location
    #[clap(long)]
    config: Option<PathBuf>,

    /// log verbosity (error, warn, info, debug, trace)
    #[clap(long, default_value_t = Level::INFO)]
    log_level: Level,

    /// log file to append to
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn config_store(&self) -> FileConfigStore {
        match &self.config {
            Some(path) => FileConfigStore::with_path(path),
            None => FileConfigStore::new(),
        }
    }

    /// Lay command line values over the stored settings.
    fn merge(&self, mut cfg: Config) -> Config {
        if let Some(words) = self.number_of_words {
            cfg.number_of_words = words;
            cfg.number_of_secs = None;
        }
        if let Some(secs) = self.number_of_secs {
            cfg.number_of_secs = Some(secs);
        }
        if self.symbols {
            cfg.symbols = true;
        }
        if let Some(policy) = self.policy {
            cfg.policy = policy;
        }
        if self.strict {
            cfg.policy = CommitPolicy::StrictAdvance;
        }
        if let Some(lwm) = self.low_water_mark {
            cfg.low_water_mark = lwm;
        }
        if let Some(batch) = self.batch_size {
            cfg.batch_size = batch;
        }
        cfg
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let cfg = cli.merge(cli.config_store().load());
    let test_config = match cfg.to_test_config() {
        Ok(tc) => tc,
        Err(EngineError::InvalidConfig(msg)) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::ValueValidation, msg).exit();
        }
        Err(e) => return Err(e.into()),
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let log_path = cli.log_file.clone().unwrap_or_else(AppDirs::log_path);
    logging::init(&log_path, cli.log_level)?;
    info!(?test_config, "starting");

    let supply = ShuffledSupply::embedded()?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );
    let mut app = App::new(
        TypingTest::new(test_config, Box::new(supply)),
        runner.sender(),
        SAMPLE_INTERVAL,
    );
    let res = start_tui(&mut terminal, &mut app, &runner);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn start_tui<B: Backend, E: AppEventSource, T: Ticker>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &Runner<E, T>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| f.render_widget(&*app, f.area()))?;

        // a timeout is just a chance to redraw the countdown
        if let Some(event) = runner.step() {
            app.handle_event(event);
        }
        if app.should_quit() {
            return Ok(());
        }
    }
}
