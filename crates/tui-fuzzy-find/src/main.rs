//! Fuzzy find-in-page TUI demo
//!
//! A read-only pager built with crossterm and ratatui, with live fuzzy search powered by
//! `fuzzy-find-core`.
//!
//! # Usage
//!
//! ```bash
//! cargo run -p tui-fuzzy-find -- <file_path>
//! ```
//!
//! # Environment
//!
//! - `FUZZY_FIND_CONFIG=<path>`: TOML finder configuration (cap, debounce, colors, box placement)
//! - `FUZZY_FIND_LOG=<path>`: write logs to this file (filter via `RUST_LOG`, default `debug`)
//!
//! # Keys
//!
//! - Ctrl+F: open the search box (refocus if already open)
//! - Typing / Backspace: edit the query; matches update after a short pause
//! - Enter / Shift+Enter: next / previous match (Down / Up also work in the box)
//! - Esc: close the search box and remove highlights
//! - Arrows, PageUp/PageDown, Home/End: scroll
//! - Ctrl+Q / Ctrl+X (or q outside the search box): quit

use crossterm::{
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
        supports_keyboard_enhancement,
    },
};
use fuzzy_find_core::{
    Document, Emphasis, FinderConfig, Fragment, HighlightConfig, RegionId, RepositoryError,
    ScanSummary, ScrollAlign, ScrollIntoView, SearchBoxConfig, SearchController, SearchKey,
    SearchPhase, SearchSurface, SegmentId, SegmentRepository,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use std::{
    env, fs,
    io::{self, stdout},
    path::PathBuf,
    process,
    str::FromStr,
    time::{Duration, Instant},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const IDLE_POLL: Duration = Duration::from_millis(100);

/// A [`Document`] plus the scroll request the controller made last.
///
/// The document does the structural work; this wrapper only turns `scroll_into_view` into a
/// pending viewport adjustment for the renderer.
struct Page {
    document: Document,
    pending_scroll: Option<(RegionId, ScrollIntoView)>,
}

impl SegmentRepository for Page {
    fn text_segments(&self) -> Vec<SegmentId> {
        self.document.text_segments()
    }

    fn segment_text(&self, segment: SegmentId) -> Result<&str, RepositoryError> {
        self.document.segment_text(segment)
    }

    fn replace_segment(
        &mut self,
        segment: SegmentId,
        fragments: Vec<Fragment>,
    ) -> Result<Vec<RegionId>, RepositoryError> {
        self.document.replace_segment(segment, fragments)
    }

    fn revert_marks(&mut self) -> usize {
        self.pending_scroll = None;
        self.document.revert_marks()
    }
}

impl SearchSurface for Page {
    fn create_search_box(&mut self, placement: &SearchBoxConfig) {
        self.document.create_search_box(placement);
    }

    fn has_search_box(&self) -> bool {
        self.document.has_search_box()
    }

    fn focus_search_box(&mut self) {
        self.document.focus_search_box();
    }

    fn remove_search_box(&mut self) {
        self.document.remove_search_box();
    }

    fn set_emphasis(&mut self, region: RegionId, emphasis: Emphasis) {
        self.document.set_emphasis(region, emphasis);
    }

    fn scroll_into_view(&mut self, region: RegionId, scroll: ScrollIntoView) {
        self.document.scroll_into_view(region, scroll);
        self.pending_scroll = Some((region, scroll));
    }
}

/// Resolved highlight colors.
struct Palette {
    inactive: Color,
    active: Color,
}

impl Palette {
    fn from_config(config: &HighlightConfig) -> Self {
        Self {
            inactive: parse_color(&config.inactive, Color::Yellow),
            active: parse_color(&config.active, Color::Rgb(0xff, 0xa5, 0x00)),
        }
    }

    fn style(&self, emphasis: Emphasis) -> Style {
        let bg = match emphasis {
            Emphasis::Inactive => self.inactive,
            Emphasis::Active => self.active,
        };
        Style::default().bg(bg).fg(Color::Black)
    }
}

fn parse_color(value: &str, fallback: Color) -> Color {
    Color::from_str(value).unwrap_or_else(|_| {
        log::warn!("unrecognized color {:?}, using {:?}", value, fallback);
        fallback
    })
}

/// Application state
struct App {
    /// Document and pending scroll request
    page: Page,
    /// Find-in-page controller
    finder: SearchController,
    /// File being shown
    file_path: PathBuf,
    /// Text of the search box
    query: String,
    /// First visible line
    scroll_top: usize,
    /// Visible line count of the last frame
    viewport_height: usize,
    /// Highlight colors
    palette: Palette,
    /// Status line text
    status_message: String,
    /// Whether to exit the main loop
    should_quit: bool,
}

impl App {
    fn new(file_path: PathBuf, config: FinderConfig) -> io::Result<Self> {
        let content = fs::read_to_string(&file_path)?;
        let document = Document::from_text(&content);
        log::info!(
            "loaded {} ({} blocks)",
            file_path.display(),
            document.block_count()
        );

        Ok(Self {
            page: Page {
                document,
                pending_scroll: None,
            },
            palette: Palette::from_config(&config.highlight),
            finder: SearchController::new(config),
            file_path,
            query: String::new(),
            scroll_top: 0,
            viewport_height: 0,
            status_message: "Ctrl+F to search".to_string(),
            should_quit: false,
        })
    }

    fn search_box_open(&self) -> bool {
        self.finder.phase() == SearchPhase::Editing
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q') | KeyCode::Char('x')) => {
                self.should_quit = true;
                return;
            }
            (KeyModifiers::CONTROL, KeyCode::Char('f')) => {
                if !self.search_box_open() {
                    self.query.clear();
                }
                self.finder.open(&mut self.page);
                return;
            }
            _ => {}
        }

        if self.search_box_open() {
            self.handle_search_key(key);
        } else {
            self.handle_pager_key(key);
        }
        self.apply_pending_scroll();
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        match key.code {
            KeyCode::Esc => {
                self.finder.handle_key(&mut self.page, SearchKey::Escape);
                self.query.clear();
                self.status_message = "Search closed".to_string();
            }
            KeyCode::Enter => {
                self.finder
                    .handle_key(&mut self.page, SearchKey::Enter { shift });
            }
            KeyCode::Down => {
                self.finder
                    .handle_key(&mut self.page, SearchKey::Enter { shift: false });
            }
            KeyCode::Up => {
                self.finder
                    .handle_key(&mut self.page, SearchKey::Enter { shift: true });
            }
            KeyCode::Backspace => {
                if self.query.pop().is_some() {
                    self.finder.on_input(&self.query, Instant::now());
                }
            }
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.query.push(ch);
                self.finder.on_input(&self.query, Instant::now());
            }
            _ => {}
        }
    }

    fn handle_pager_key(&mut self, key: KeyEvent) {
        let page = self.viewport_height.max(1);
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(1),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.scroll_by(page as isize),
            KeyCode::PageUp => self.scroll_by(-(page as isize)),
            KeyCode::Home => self.scroll_top = 0,
            KeyCode::End => self.scroll_top = self.max_scroll_top(),
            _ => {}
        }
    }

    fn line_count(&self) -> usize {
        self.page.document.render_lines().len()
    }

    fn max_scroll_top(&self) -> usize {
        self.line_count().saturating_sub(self.viewport_height.max(1))
    }

    fn scroll_by(&mut self, delta: isize) {
        let target = self.scroll_top.saturating_add_signed(delta);
        self.scroll_top = target.min(self.max_scroll_top());
    }

    /// Run a due scan, if any.
    fn tick(&mut self) {
        if let Some(summary) = self.finder.poll(&mut self.page, Instant::now()) {
            self.status_message = describe_scan(&summary);
            self.apply_pending_scroll();
        }
    }

    fn apply_pending_scroll(&mut self) {
        let Some((region, scroll)) = self.page.pending_scroll.take() else {
            return;
        };
        let Some(line) = self.page.document.line_of_region(region) else {
            return;
        };
        let height = self.viewport_height.max(1);
        // The terminal cannot animate; only alignment is honored.
        let top = match scroll.align {
            ScrollAlign::Start => line,
            ScrollAlign::Center => line.saturating_sub(height / 2),
            ScrollAlign::End => line.saturating_sub(height.saturating_sub(1)),
        };
        self.scroll_top = top.min(self.max_scroll_top());
    }

    /// Event-loop timeout: wake up in time for a pending scan.
    fn poll_timeout(&self) -> Duration {
        self.finder
            .time_until_scan(Instant::now())
            .map_or(IDLE_POLL, |remaining| remaining.min(IDLE_POLL))
    }

    fn render(&mut self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(1), Constraint::Length(1)])
            .split(frame.area());

        let page_area = chunks[0];
        self.viewport_height = page_area.height.saturating_sub(2) as usize;
        self.scroll_top = self.scroll_top.min(self.max_scroll_top());

        self.render_page(frame, page_area);
        self.render_status_line(frame, chunks[1]);
        if self.page.document.has_search_box() {
            self.render_search_box(frame, page_area);
        }
    }

    fn render_page(&self, frame: &mut Frame, area: Rect) {
        let lines: Vec<Line> = self
            .page
            .document
            .render_lines()
            .into_iter()
            .skip(self.scroll_top)
            .take(self.viewport_height)
            .map(|line| {
                Line::from(
                    line.runs
                        .into_iter()
                        .map(|run| match run.emphasis {
                            Some(emphasis) => Span::styled(run.text, self.palette.style(emphasis)),
                            None => Span::raw(run.text),
                        })
                        .collect::<Vec<_>>(),
                )
            })
            .collect();

        let title = format!(" {} ", self.file_path.display());
        let paragraph =
            Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
    }

    fn render_search_box(&self, frame: &mut Frame, area: Rect) {
        let Some(search_box) = self.page.document.search_box() else {
            return;
        };
        let placement = search_box.placement;
        let width = placement.width.clamp(3, area.width.max(3)).min(area.width);
        let height = 3.min(area.height);
        let x = area
            .right()
            .saturating_sub(placement.margin_right)
            .saturating_sub(width)
            .max(area.left());
        let y = (area.top() + placement.margin_top).min(area.bottom().saturating_sub(height));
        let rect = Rect::new(x, y, width, height);

        let counter = match (self.finder.current_index(), self.finder.match_count()) {
            (_, 0) if self.finder.last_query().is_empty() => String::new(),
            (_, 0) => " 0/0 ".to_string(),
            (Some(i), n) => format!(" {}/{} ", i + 1, n),
            (None, n) => format!(" -/{} ", n),
        };

        let inner_width = width.saturating_sub(2) as usize;
        let visible = tail_fitting(&self.query, inner_width.saturating_sub(1));
        let style = if search_box.focused {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        let input = Paragraph::new(visible).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Find ")
                .title_bottom(Line::from(counter).right_aligned()),
        );

        frame.render_widget(Clear, rect);
        frame.render_widget(input, rect);
        if search_box.focused && height == 3 {
            let cursor_x = rect.x + 1 + visible.width() as u16;
            frame.set_cursor_position((cursor_x.min(rect.right().saturating_sub(2)), rect.y + 1));
        }
    }

    fn render_status_line(&self, frame: &mut Frame, area: Rect) {
        let position = format!(
            "line {}/{}",
            (self.scroll_top + 1).min(self.line_count().max(1)),
            self.line_count()
        );
        let status = format!("{} | {}", position, self.status_message);
        let status_line = Paragraph::new(status).style(
            Style::default()
                .bg(Color::DarkGray)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
        frame.render_widget(status_line, area);
    }
}

fn describe_scan(summary: &ScanSummary) -> String {
    if summary.query.is_empty() {
        return "Type to search".to_string();
    }
    let capped = if summary.truncated { "+" } else { "" };
    format!(
        "{:?}: {}{} matches",
        summary.query, summary.match_count, capped
    )
}

/// Longest suffix of `text` whose display width fits in `max_width` cells.
fn tail_fitting(text: &str, max_width: usize) -> &str {
    let mut width = 0;
    let mut start = text.len();
    for (offset, ch) in text.char_indices().rev() {
        let w = ch.width().unwrap_or(0);
        if width + w > max_width {
            break;
        }
        width += w;
        start = offset;
    }
    &text[start..]
}

fn init_logging() {
    let Ok(path) = env::var("FUZZY_FIND_LOG") else {
        return;
    };
    match fs::File::create(&path) {
        Ok(file) => {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or("debug"),
            )
            .target(env_logger::Target::Pipe(Box::new(file)))
            .try_init();
        }
        Err(err) => eprintln!("cannot open log file {}: {}", path, err),
    }
}

fn load_config() -> FinderConfig {
    let Ok(path) = env::var("FUZZY_FIND_CONFIG") else {
        return FinderConfig::default();
    };
    FinderConfig::load(&path).unwrap_or_else(|err| {
        log::warn!("ignoring config {}: {}", path, err);
        eprintln!("ignoring config {}: {}", path, err);
        FinderConfig::default()
    })
}

fn main() -> io::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("usage: {} <file_path>", args[0]);
        process::exit(1);
    }

    init_logging();
    let config = load_config();
    let mut app = App::new(PathBuf::from(&args[1]), config)?;

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    // Needed to tell Shift+Enter apart from Enter.
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES)
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app);

    if enhanced {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("error: {}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| app.render(f))?;

        if app.should_quit {
            break;
        }

        if event::poll(app.poll_timeout())? {
            match event::read()? {
                Event::Key(key) => app.handle_key_event(key),
                Event::Resize(_, _) => {}
                _ => {}
            }
        }

        app.tick();
    }

    Ok(())
}
