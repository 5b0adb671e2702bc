mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser, ValueEnum};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use pagenav::{
    config::{ConfigStore, FileConfigStore, NavConfig, NavOptions},
    document::{Document, DocumentSpec},
    error::NavError,
    nav::InPageNav,
    runtime::{CrosstermEventSource, NavEvent, NavEventSource, Runner},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

const TICK_RATE_MS: u64 = 100;

/// scroll a sample page in the terminal and watch the nav track it
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Interactive demo of the in-page navigation widget: scroll through a page with the arrow keys or mouse wheel and watch the nav highlight the section in view and dock once it scrolls past its natural position."
)]
pub struct Cli {
    /// heading level to index within the content container
    #[clap(short = 'l', long, value_enum, default_value_t = HeadingLevel::H2)]
    headings_level: HeadingLevel,

    /// selector overriding --headings-level (tag, #id, .class, or compound)
    #[clap(long)]
    headings_selector: Option<String>,

    /// selector for the container to scan for headings
    #[clap(long)]
    headings_container: Option<String>,

    /// class applied to the nav item for the section in view
    #[clap(long)]
    active_class: Option<String>,

    /// class-name root used to match a heading id to its nav item
    #[clap(long)]
    nav_item_class_root: Option<String>,

    /// JSON page description to load instead of the built-in sample
    #[clap(short = 'd', long)]
    document: Option<PathBuf>,

    /// start from previously saved options
    #[clap(long)]
    use_saved: bool,

    /// persist the resolved options for future runs
    #[clap(long)]
    save_config: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, ValueEnum, strum_macros::Display)]
#[strum(serialize_all = "lowercase")]
pub enum HeadingLevel {
    H1,
    H2,
    H3,
    H4,
    H5,
    H6,
}

impl HeadingLevel {
    fn as_selector(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl Cli {
    /// Convert CLI arguments to widget options. `--headings-selector`
    /// wins over `--headings-level`.
    fn nav_options(&self) -> NavOptions {
        NavOptions {
            headings_selector: self
                .headings_selector
                .clone()
                .or_else(|| Some(self.headings_level.as_selector())),
            headings_container: self.headings_container.clone(),
            active_nav_item_class: self.active_class.clone(),
            nav_item_selector_root: self.nav_item_class_root.clone(),
        }
    }
}

pub struct App {
    pub spec: DocumentSpec,
    pub doc: Document,
    pub nav: InPageNav,
    pub scroll_top: f64,
    pub view_height: u16,
}

impl App {
    pub fn new(spec: DocumentSpec, config: NavConfig) -> Result<Self, NavError> {
        let (mut doc, host) = spec.build();
        let nav = InPageNav::new(&mut doc, host, Some(NavOptions::from(config)))?;
        Ok(Self {
            spec,
            doc,
            nav,
            scroll_top: 0.0,
            view_height: 24,
        })
    }

    /// Rows available to the document pane (header and status line carved
    /// off). Doubles as the viewport height fed to the tracker.
    pub fn pane_height(&self) -> f64 {
        self.view_height.saturating_sub(2) as f64
    }

    pub fn max_scroll(&self) -> f64 {
        (self.spec.total_height() - self.pane_height()).max(0.0)
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.scroll_to(self.scroll_top + delta);
    }

    pub fn scroll_to(&mut self, position: f64) {
        self.scroll_top = position.clamp(0.0, self.max_scroll());
        let viewport = self.pane_height();
        self.nav.handle_scroll(&mut self.doc, self.scroll_top, viewport);
    }

    pub fn resize(&mut self, _width: u16, height: u16) -> Result<(), NavError> {
        self.view_height = height;
        self.scroll_top = self.scroll_top.clamp(0.0, self.max_scroll());
        let viewport = self.pane_height();
        self.nav
            .handle_resize(&mut self.doc, self.scroll_top, viewport)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let store = FileConfigStore::new();
    let base = if cli.use_saved {
        store.load()
    } else {
        NavConfig::default()
    };
    let config = base.with(cli.nav_options());
    if cli.save_config {
        store.save(&config)?;
    }

    let spec: DocumentSpec = match &cli.document {
        Some(path) => serde_json::from_slice(&fs::read(path)?)?,
        None => DocumentSpec::sample(),
    };

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = App::new(spec, config)?;

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let size = terminal.size()?;
    app.resize(size.width, size.height)?;

    let res = run_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn run_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let events = CrosstermEventSource::new();
    let mut runner = Runner::new(events, Duration::from_millis(TICK_RATE_MS));
    run_loop(terminal, app, &mut runner)
}

fn run_loop<B: Backend, E: NavEventSource>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runner: &mut Runner<E>,
) -> Result<(), Box<dyn Error>> {
    loop {
        terminal.draw(|f| ui::draw(app, f))?;

        match runner.step() {
            NavEvent::Tick => {}
            NavEvent::Scroll(delta) => app.scroll_by(delta),
            NavEvent::Resize(w, h) => app.resize(w, h)?,
            NavEvent::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                KeyCode::PageDown => app.scroll_by(app.pane_height()),
                KeyCode::PageUp => {
                    let page = app.pane_height();
                    app.scroll_by(-page);
                }
                KeyCode::Home | KeyCode::Char('g') => app.scroll_to(0.0),
                KeyCode::End | KeyCode::Char('G') => {
                    let bottom = app.max_scroll();
                    app.scroll_to(bottom);
                }
                _ => {}
            },
        }
    }
    Ok(())
}
