//! Algoviz - Terminal User Interface
//!
//! A TUI for step-by-step sorting and searching playback using ratatui.
//! App logic lives in `algoviz::tui::app`; traces come from an algorithm
//! engine reachable over HTTP (pass its base URL as the first argument,
//! default `http://127.0.0.1:5000`).

#![forbid(unsafe_code)]

use algoviz::config::VizConfig;
use algoviz::provider::HttpTraceProvider;
use algoviz::tui::app::VizApp;

fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(tracing::Level::WARN)
        .init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());

    let config = VizConfig::default();
    let app = VizApp::new(config, HttpTraceProvider::new(base_url));
    tui::run(app)
}

mod tui {
    use crossterm::{
        event::{self, Event, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::{
        backend::CrosstermBackend,
        layout::{Constraint, Direction, Layout, Rect},
        style::{Color, Modifier, Style},
        text::{Line, Span},
        widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
        Frame, Terminal,
    };
    use std::io;
    use std::time::Duration;

    use algoviz::engine::highlight::{HighlightKind, HighlightPolicy};
    use algoviz::engine::playback::Phase;
    use algoviz::provider::TraceProvider;
    use algoviz::tui::app::{ViewMode, VizApp};

    /// Frame budget between input polls.
    const FRAME_BUDGET: Duration = Duration::from_millis(33);

    /// Run the TUI application.
    pub fn run<P: TraceProvider>(mut app: VizApp<P>) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        loop {
            terminal.draw(|f| ui(f, &app))?;

            let timeout = app.poll_timeout(FRAME_BUDGET);
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }

            if app.should_quit {
                break;
            }

            app.update();
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn ui<P: TraceProvider>(f: &mut Frame, app: &VizApp<P>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(f.area());

        render_title(f, chunks[0], app);
        render_bars(f, chunks[1], app);
        render_status(f, chunks[2], app);
        render_help(f, chunks[3], app);
    }

    fn phase_label<P: TraceProvider>(app: &VizApp<P>) -> (&'static str, Color) {
        if app.session.search().is_active() {
            return ("[SEARCHING]", Color::Cyan);
        }
        match app.session.sort().phase() {
            Phase::Running => ("[RUNNING]", Color::Green),
            Phase::Paused => ("[PAUSED]", Color::Yellow),
            Phase::Idle => ("[IDLE]", Color::DarkGray),
        }
    }

    fn render_title<P: TraceProvider>(f: &mut Frame, area: Rect, app: &VizApp<P>) {
        let (label, color) = phase_label(app);
        let stats = app.session.stats();

        let title = Paragraph::new(vec![Line::from(vec![
            Span::styled(
                " ALGOVIZ ",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(label, Style::default().fg(color)),
            Span::raw(" | "),
            Span::styled(
                format!(
                    "comparisons: {}  swaps: {}  accesses: {}",
                    stats.comparisons, stats.swaps, stats.accesses
                ),
                Style::default().fg(Color::White),
            ),
        ])])
        .block(Block::default().borders(Borders::ALL));

        f.render_widget(title, area);
    }

    fn highlight_style(kind: Option<HighlightKind>) -> Style {
        let color = match kind {
            Some(HighlightKind::Sorted) => Color::Green,
            Some(HighlightKind::Swapping) => Color::Red,
            Some(HighlightKind::Comparing) => Color::Yellow,
            Some(HighlightKind::Searching) => Color::Cyan,
            Some(HighlightKind::Pivot) => Color::Magenta,
            Some(HighlightKind::Found) => Color::LightGreen,
            None => Color::Gray,
        };
        Style::default().fg(color)
    }

    fn render_bars<P: TraceProvider>(f: &mut Frame, area: Rect, app: &VizApp<P>) {
        let frame = app.frame();
        let policy = match app.mode {
            ViewMode::Sort => HighlightPolicy::sort(),
            ViewMode::Search => HighlightPolicy::search(),
        };

        let bars: Vec<Bar> = frame
            .values
            .iter()
            .enumerate()
            .map(|(index, &value)| {
                let kind = policy.resolve(&frame.highlights, index);
                Bar::default()
                    .value(u64::from(value))
                    .style(highlight_style(kind))
                    .text_value(String::new())
            })
            .collect();

        let chart = BarChart::default()
            .block(Block::default().borders(Borders::ALL).title(" bars "))
            .data(BarGroup::default().bars(&bars))
            .bar_width(1)
            .bar_gap(1);

        f.render_widget(chart, area);
    }

    fn render_status<P: TraceProvider>(f: &mut Frame, area: Rect, app: &VizApp<P>) {
        let config = app.session.config();
        let status = Paragraph::new(Line::from(vec![
            Span::styled(
                app.frame().status.clone(),
                Style::default().fg(Color::White),
            ),
            Span::raw("  |  "),
            Span::styled(
                format!(
                    "algorithm: {}  size: {}  speed: {}ms  target: {}",
                    config.algorithm, config.size, config.speed_ms, app.target_input
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL).title(" status "));

        f.render_widget(status, area);
    }

    fn render_help<P: TraceProvider>(f: &mut Frame, area: Rect, _app: &VizApp<P>) {
        let help = Paragraph::new(Line::from(Span::styled(
            " g generate | s sort | space pause/resume | r reset | a algorithm | [ ] size | - + speed | digits+enter search | q quit ",
            Style::default().fg(Color::DarkGray),
        )))
        .block(Block::default().borders(Borders::ALL));

        f.render_widget(help, area);
    }
}
