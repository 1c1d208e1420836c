//! # life
//!
//! A terminal driver for the `life_engine` simulation core, using `ratatui`
//! for the interface and `crossterm` for terminal manipulation.
//!
//! The driver owns the timer: while the engine is running it calls
//! [`Engine::step`] once per [`Engine::step_interval`].
//!
//! ## Controls
//!
//! * Space: Play/Pause the simulation
//! * Enter / n: Step forward one generation (when paused)
//! * c: Clear the grid
//! * r: Reseed the grid at random
//! * + / -: Change the step interval
//! * Arrows: Move the cursor, t: Toggle the cell under it
//! * 1-5: Place a pattern at the cursor
//! * Left click: Toggle the clicked cell
//! * q: Quit

use clap::{Parser, ValueEnum};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use life_engine::{
    Engine, EngineConfig, Pattern, Seeding, DEFAULT_GRID_COUNT, DEFAULT_STEP_INTERVAL_MS,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::{
    error::Error,
    fs::File,
    io,
    path::PathBuf,
    time::{Duration, Instant},
};
use sysinfo::{System, SystemExt};

/// Amount the +/- keys change the step interval by.
const INTERVAL_STEP_MS: u64 = 50;
/// The +/- keys never go below this.
const MIN_INTERVAL_MS: u64 = 50;
/// Upper bound on input polling so key presses stay responsive at slow cadences.
const MAX_POLL: Duration = Duration::from_millis(50);

/// Command-line arguments for the terminal driver.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Number of cells per side of the square grid (at least 3).
    #[arg(short, long, value_name = "CELLS", default_value_t = DEFAULT_GRID_COUNT)]
    size: usize,
    /// Milliseconds between generations while running.
    #[arg(short, long = "interval-ms", value_name = "MILLISECONDS", default_value_t = DEFAULT_STEP_INTERVAL_MS)]
    interval_ms: u64,
    /// Seed for the random number generator, for reproducible grids.
    #[arg(long)]
    seed: Option<u64>,
    /// Start from an empty grid instead of a random one.
    #[arg(long)]
    empty: bool,
    /// Pattern to place at the centre of the grid on startup.
    #[arg(short, long, value_enum)]
    pattern: Option<PatternArg>,
    /// Write log output to this file instead of stderr.
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PatternArg {
    Block,
    Blinker,
    Toad,
    Glider,
    Lwss,
}

impl From<PatternArg> for Pattern {
    fn from(arg: PatternArg) -> Self {
        match arg {
            PatternArg::Block => Pattern::Block,
            PatternArg::Blinker => Pattern::Blinker,
            PatternArg::Toad => Pattern::Toad,
            PatternArg::Glider => Pattern::Glider,
            PatternArg::Lwss => Pattern::LightweightSpaceship,
        }
    }
}

/// Driver state wrapped around the engine.
struct App {
    engine: Engine,
    /// Cell under the keyboard cursor as `(row, col)`
    cursor: (usize, usize),
    /// Screen area the grid was last drawn into, for mouse hit-testing
    grid_area: Rect,
    /// Last rejected action, shown in the status panel
    message: Option<String>,
    /// System information for resource monitoring
    sys: System,
}

impl App {
    fn new(engine: Engine) -> App {
        let centre = engine.grid_size() / 2;
        App {
            engine,
            cursor: (centre, centre),
            grid_area: Rect::default(),
            message: None,
            sys: System::new_all(),
        }
    }

    /// Advances one generation and refreshes the memory reading.
    fn step(&mut self) {
        self.engine.step();
        self.sys.refresh_memory();
    }

    fn move_cursor(&mut self, d_row: isize, d_col: isize) {
        let last = self.engine.grid_size() - 1;
        let (row, col) = self.cursor;
        self.cursor = (
            row.saturating_add_signed(d_row).min(last),
            col.saturating_add_signed(d_col).min(last),
        );
    }

    fn toggle_at_cursor(&mut self) {
        let (row, col) = self.cursor;
        let result = self.engine.toggle_cell(row, col);
        self.report(result);
    }

    fn place_at_cursor(&mut self, pattern: Pattern) {
        let (row, col) = self.cursor;
        let result = self.engine.place_pattern(pattern, row, col);
        self.report(result);
    }

    fn change_interval(&mut self, faster: bool) {
        let current = self.engine.step_interval_ms();
        let next = if faster {
            current.saturating_sub(INTERVAL_STEP_MS).max(MIN_INTERVAL_MS)
        } else {
            current.saturating_add(INTERVAL_STEP_MS)
        };
        let result = self.engine.set_step_interval(next);
        self.report(result);
    }

    /// Maps a terminal position inside the grid panel to a cell.
    fn cell_at(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        let inner_x = column.checked_sub(self.grid_area.x + 1)? as usize;
        let inner_y = row.checked_sub(self.grid_area.y + 1)? as usize;
        let size = self.engine.grid_size();
        (inner_x < size && inner_y < size).then_some((inner_y, inner_x))
    }

    fn click(&mut self, column: u16, row: u16) {
        if let Some(cell) = self.cell_at(column, row) {
            self.cursor = cell;
            self.toggle_at_cursor();
        }
    }

    fn report(&mut self, result: life_engine::Result<()>) {
        self.message = result.err().map(|err| {
            log::warn!("{err}");
            err.to_string()
        });
    }

    /// Applies a key press. Returns false when the driver should exit.
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return true;
        }
        match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Char(' ') => self.engine.toggle_running(),
            KeyCode::Enter | KeyCode::Char('n') => {
                if !self.engine.is_running() {
                    self.step();
                }
            }
            KeyCode::Char('c') => self.engine.clear(),
            KeyCode::Char('r') => self.engine.reset(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.change_interval(false),
            KeyCode::Char('-') => self.change_interval(true),
            KeyCode::Up => self.move_cursor(-1, 0),
            KeyCode::Down => self.move_cursor(1, 0),
            KeyCode::Left => self.move_cursor(0, -1),
            KeyCode::Right => self.move_cursor(0, 1),
            KeyCode::Char('t') => self.toggle_at_cursor(),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.place_at_cursor(Pattern::ALL[index]);
            }
            _ => {}
        }
        true
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
            self.click(mouse.column, mouse.row);
        }
    }
}

/// Draws the game grid, highlighting the cursor cell.
fn draw_grid(f: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Game of Life [Space: Play/Pause | Enter: Step | c: Clear | r: Reseed | q: Quit]");

    let cursor_style = Style::default().bg(Color::DarkGray);
    let lines: Vec<Line> = app
        .engine
        .grid()
        .rows()
        .enumerate()
        .map(|(r, row)| {
            let spans: Vec<Span> = row
                .iter()
                .enumerate()
                .map(|(c, cell)| {
                    let glyph = if cell.is_alive() { "█" } else { " " };
                    if (r, c) == app.cursor {
                        Span::styled(glyph, cursor_style)
                    } else {
                        Span::raw(glyph)
                    }
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .style(Style::default().fg(Color::White))
        .block(block);

    f.render_widget(paragraph, area);
}

/// Draws the statistics panel.
fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let stats = app.engine.stats();
    let memory_used = app.sys.used_memory() / 1024; // Convert to KB
    let memory_total = app.sys.total_memory() / 1024;
    let patterns: String = Pattern::ALL
        .iter()
        .enumerate()
        .map(|(i, p)| format!("{}:{} ", i + 1, p.name()))
        .collect();

    let stats_text = format!(
        "Statistics:\n\
        Generation: {}\n\
        Current Population: {}\n\
        Born Last Step: {}\n\
        Died Last Step: {}\n\
        Cells Created: {}\n\
        Cells Destroyed: {}\n\
        Grid: {}x{}\n\
        Interval: {} ms\n\
        Cursor: ({}, {})\n\
        Memory Usage: {}KB/{:.2}MB\n\
        Status: {}\n\n\
        Arrows: Move | t: Toggle\n\
        +/-: Interval\n\
        Patterns: {}\n",
        stats.generation,
        stats.population,
        stats.births,
        stats.deaths,
        stats.total_births,
        stats.total_deaths,
        app.engine.grid_size(),
        app.engine.grid_size(),
        app.engine.step_interval_ms(),
        app.cursor.0,
        app.cursor.1,
        memory_used,
        memory_total as f64 / 1024.0,
        if app.engine.is_running() { "Running" } else { "Paused" },
        patterns,
    );

    let mut lines: Vec<Line> = stats_text.lines().map(Line::from).collect();
    if let Some(message) = &app.message {
        lines.push(Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )));
    }

    let stats_widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Statistics"))
        .wrap(Wrap { trim: true });

    f.render_widget(stats_widget, area);
}

/// Draws frames, polls input and steps the engine on its interval until the
/// user quits.
fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(75), Constraint::Percentage(25)].as_ref())
                .split(f.size());

            app.grid_area = chunks[0];
            draw_grid(f, app, chunks[0]);
            draw_stats(f, app, chunks[1]);
        })?;

        // re-read every frame so interval changes apply to the next tick
        let tick_rate = app.engine.step_interval();
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0))
            .min(MAX_POLL);

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if !app.handle_key(key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if app.engine.is_running() {
                app.step();
            }
            last_tick = Instant::now();
        }
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> io::Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    if let Some(path) = log_file {
        builder.target(env_logger::Target::Pipe(Box::new(File::create(path)?)));
    }
    builder.init();
    Ok(())
}

/// Builds the engine, then runs the terminal interface.
///
/// # Errors
///
/// Returns an error if the configuration is rejected (before the terminal
/// is touched) or if terminal manipulation fails.
fn main() -> Result<(), Box<dyn Error>> {
    let args = CliArgs::parse();
    init_logging(args.log_file.as_ref())?;

    let config = EngineConfig {
        grid_count: args.size,
        seeding: if args.empty || args.pattern.is_some() {
            Seeding::Empty
        } else {
            Seeding::Random
        },
        step_interval_ms: args.interval_ms,
        seed: args.seed,
    };
    let mut engine = config.build()?;
    if let Some(pattern) = args.pattern {
        let pattern = Pattern::from(pattern);
        let (height, width) = pattern.extent();
        let size = engine.grid_size();
        engine.place_pattern(
            pattern,
            size.saturating_sub(height) / 2,
            size.saturating_sub(width) / 2,
        )?;
    }
    let mut app = App::new(engine);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    log::info!(
        "exited after {} generations",
        app.engine.generation_count()
    );
    result.map_err(Into::into)
}
