mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::{Path, PathBuf},
    sync::Once,
};
use tracing::{debug, error, info};
use tracing_appender::non_blocking::WorkerGuard;
use wpm::{
    app_dirs::{AppDirs, LOG_FILE_NAME},
    config::{Config, ConfigStore, FileConfigStore},
    language::{available_languages, WordList},
    layout::fit_budget,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    word_generator::{WordGenConfig, WordGenerator},
    Drill, KeyInput, TextError,
};

/// terminal typing-speed exerciser
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Type a sequence of random words as fast as you can. Mistakes are highlighted as you go and words per minute are shown live."
)]
pub struct Cli {
    /// number of words to use in test
    #[clap(short = 'w', long)]
    number_of_words: Option<usize>,

    /// language to pull words from
    #[clap(short = 'l', long)]
    language: Option<String>,

    /// column budget used to wrap the text
    #[clap(long)]
    width: Option<usize>,

    /// JSON file mapping language names to word lists
    #[clap(long)]
    words_file: Option<PathBuf>,

    /// custom prompt to use
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// where to write the diagnostics log
    #[clap(long)]
    log_file: Option<PathBuf>,

    /// store the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,

    /// print the available languages (those of --words-file if given) and exit
    #[clap(long)]
    list_languages: bool,
}

impl Cli {
    /// Overlay command line flags on the stored configuration
    fn apply(&self, config: Config) -> Config {
        Config {
            number_of_words: self.number_of_words.unwrap_or(config.number_of_words),
            language: self.language.clone().unwrap_or(config.language),
            width: self.width.unwrap_or(config.width),
            words_file: self.words_file.clone().or(config.words_file),
        }
    }
}

fn to_word_gen_config(config: &Config, custom_prompt: Option<String>) -> WordGenConfig {
    WordGenConfig {
        number_of_words: config.number_of_words,
        language: config.language.clone(),
        words_file: config.words_file.clone(),
        custom_prompt,
    }
}

#[derive(Debug)]
pub struct App {
    pub drill: Drill,
    pub generator: WordGenerator,
    /// Configured column budget
    pub width: usize,
    /// Last known terminal width
    pub terminal_width: u16,
    /// Glyph budget handed to the layout; only recomputed on resize or new text
    display_width: usize,
}

impl App {
    pub fn new(config: &Config, prompt: Option<String>) -> Result<Self, Box<dyn Error>> {
        let generator = WordGenerator::new(to_word_gen_config(config, prompt));
        let drill = Drill::new(generator.generate_prompt()?)?;

        let mut app = Self {
            drill,
            generator,
            width: config.width,
            terminal_width: u16::MAX,
            display_width: config.width,
        };
        app.refresh_layout();
        Ok(app)
    }

    pub fn display_width(&self) -> usize {
        self.display_width
    }

    pub fn set_terminal_width(&mut self, width: u16) {
        self.terminal_width = width;
        self.refresh_layout();
    }

    /// Pick the largest budget whose rows fit the configured width and the terminal
    fn refresh_layout(&mut self) {
        let usable = self
            .terminal_width
            .saturating_sub(ui::HORIZONTAL_MARGIN * 2) as usize;
        let columns = self.width.min(usable);
        self.display_width = fit_budget(self.drill.state().store().iter(), columns);
        debug!(target: "layout", columns, budget = self.display_width, "layout budget");
    }

    /// Start over on the same words
    pub fn restart(&mut self) -> Result<(), Box<dyn Error>> {
        let words = self.drill.state().store().to_strings();
        self.drill.reset(words)?;
        Ok(())
    }

    /// Start over on freshly generated words
    pub fn new_text(&mut self) -> Result<(), Box<dyn Error>> {
        let words = self.generator.generate_prompt()?;
        self.drill.reset(words)?;
        self.refresh_layout();
        Ok(())
    }
}

/// Languages offered by a words file, or the embedded ones without one
fn language_names(words_file: Option<&Path>) -> Result<Vec<String>, TextError> {
    match words_file {
        Some(path) => Ok(WordList::from_path(path)?.languages()),
        None => Ok(available_languages()),
    }
}

fn init_logging(path: &Path) -> Option<WorkerGuard> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let dir = dir.unwrap_or_else(|| Path::new("."));
    if std::fs::create_dir_all(dir).is_err() {
        return None;
    }
    let file_name = path
        .file_name()
        .map(|f| f.to_os_string())
        .unwrap_or_else(|| LOG_FILE_NAME.into());

    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    let filter = tracing_subscriber::EnvFilter::try_from_env("WPM_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            let _ = disable_raw_mode();
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            error!(target: "runtime.panic", %info, "panic");
            default_panic(info);
        }));
    });
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.list_languages {
        for name in language_names(cli.words_file.as_deref())? {
            println!("{name}");
        }
        return Ok(());
    }

    let log_path = cli.log_file.clone().unwrap_or_else(AppDirs::log_path);
    let _log_guard = init_logging(&log_path);

    let store = FileConfigStore::new();
    let config = cli.apply(store.load());
    if cli.save_config {
        store.save(&config)?;
        info!(target: "config", path = %store.path().display(), "saved config");
    }
    info!(target: "runtime", ?config, "starting");

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    // Practice text failures are fatal before the terminal is touched
    let mut app = App::new(&config, cli.prompt.clone())?;

    install_panic_hook();
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    if let Err(ref err) = result {
        error!(target: "runtime", %err, "exited with error");
    }
    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    app.set_terminal_width(terminal.size()?.width);
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step() {
            AppEvent::Tick => app.drill.on_tick(),
            AppEvent::Resize(width, _) => app.set_terminal_width(width),
            AppEvent::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc | KeyCode::Enter => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Left => app.restart()?,
                    KeyCode::Right => app.new_text()?,
                    _ => {
                        if let Some(input) = KeyInput::from_key_event(&key) {
                            app.drill.submit_event(input);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn test_config() -> Config {
        Config {
            number_of_words: 10,
            ..Config::default()
        }
    }

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::parse_from(["wpm"]);

        assert_eq!(cli.number_of_words, None);
        assert_eq!(cli.language, None);
        assert_eq!(cli.width, None);
        assert_eq!(cli.prompt, None);
        assert!(!cli.save_config);
        assert!(!cli.list_languages);
    }

    #[test]
    fn test_cli_number_of_words() {
        let cli = Cli::parse_from(["wpm", "-w", "25"]);
        assert_eq!(cli.number_of_words, Some(25));

        let cli = Cli::parse_from(["wpm", "--number-of-words", "50"]);
        assert_eq!(cli.number_of_words, Some(50));
    }

    #[test]
    fn test_cli_language_and_files() {
        let cli = Cli::parse_from([
            "wpm",
            "-l",
            "russian",
            "--words-file",
            "words.json",
            "--log-file",
            "/tmp/wpm.log",
        ]);

        assert_eq!(cli.language.as_deref(), Some("russian"));
        assert_eq!(cli.words_file, Some(PathBuf::from("words.json")));
        assert_eq!(cli.log_file, Some(PathBuf::from("/tmp/wpm.log")));
    }

    #[test]
    fn test_cli_overrides_config() {
        let cli = Cli::parse_from(["wpm", "--width", "40", "-w", "5"]);
        let config = cli.apply(Config::default());

        assert_eq!(config.width, 40);
        assert_eq!(config.number_of_words, 5);
        assert_eq!(config.language, "english");
    }

    #[test]
    fn test_cli_keeps_config_when_unset() {
        let stored = Config {
            number_of_words: 33,
            language: "russian".into(),
            width: 55,
            words_file: Some(PathBuf::from("w.json")),
        };
        let config = Cli::parse_from(["wpm"]).apply(stored.clone());

        assert_eq!(config, stored);
    }

    #[test]
    fn test_app_new_with_words() {
        let app = App::new(&test_config(), None).unwrap();

        assert_eq!(app.drill.state().store().len(), 10);
        assert!(!app.drill.is_complete());
        assert_eq!(app.width, 70);
    }

    #[test]
    fn test_app_new_with_custom_prompt() {
        let app = App::new(&test_config(), Some("custom test prompt".to_string())).unwrap();

        assert_eq!(
            app.drill.state().store().to_strings(),
            vec!["custom", "test", "prompt"]
        );
    }

    #[test]
    fn test_app_new_fails_on_empty_prompt() {
        assert!(App::new(&test_config(), Some("   ".to_string())).is_err());
    }

    #[test]
    fn test_app_new_fails_on_unknown_language() {
        let config = Config {
            language: "klingon".into(),
            ..test_config()
        };
        assert!(App::new(&config, None).is_err());
    }

    #[test]
    fn test_app_restart_keeps_words() {
        let mut app = App::new(&test_config(), Some("ab cd".to_string())).unwrap();
        for c in "ab ".chars() {
            app.drill.submit_event(KeyInput::from_key_event(&crossterm::event::KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::NONE,
            ))
            .unwrap());
        }
        assert_eq!(app.drill.state().current_word_index(), 1);

        app.restart().unwrap();

        assert_eq!(app.drill.state().current_word_index(), 0);
        assert_eq!(app.drill.state().store().to_strings(), vec!["ab", "cd"]);
    }

    #[test]
    fn test_app_new_text_regenerates() {
        let mut app = App::new(&test_config(), None).unwrap();
        app.drill.submit_event(KeyInput::PrintableChar('x'));

        app.new_text().unwrap();

        assert_eq!(app.drill.state().store().len(), 10);
        assert_eq!(app.drill.state().word().pos(), 0);
    }

    #[test]
    fn test_language_names_from_words_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("words.json");
        std::fs::write(&path, r#"{"pt": ["casa"], "en": ["sky"]}"#).unwrap();

        assert_eq!(language_names(Some(&path)).unwrap(), vec!["en", "pt"]);
        assert!(language_names(None).unwrap().contains(&"english".to_string()));
        assert!(language_names(Some(Path::new("/no/such/words.json"))).is_err());
    }

    #[test]
    fn test_display_width_bounded_by_terminal() {
        let mut app = App::new(&test_config(), Some("a b".to_string())).unwrap();

        app.set_terminal_width(200);
        assert_eq!(app.display_width(), 70);

        app.set_terminal_width(50);
        assert_eq!(app.display_width(), 50 - (ui::HORIZONTAL_MARGIN * 2) as usize);

        app.set_terminal_width(4);
        assert_eq!(app.display_width(), 0);
    }
}
