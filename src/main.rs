use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Bar, BarChart, BarGroup, Block, Borders, Clear, Paragraph};

use wc_winners::config::DashboardConfig;
use wc_winners::dataset::shared_dataset;
use wc_winners::export::export_dashboard;
use wc_winners::state::{DashboardState, Delta, Derived, apply_delta};
use wc_winners::views::{
    CountryCount, CountrySummary, TimelinePoint, ViewId, ViewPayload, YearSummary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Countries,
    Years,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatsTab {
    Winners,
    RunnerUps,
    Timeline,
    Map,
}

struct App {
    state: DashboardState,
    config: DashboardConfig,
    focus: Focus,
    tab: StatsTab,
    help_overlay: bool,
    should_quit: bool,
    country_summary: CountrySummary,
    year_summary: YearSummary,
    win_map: Vec<CountryCount>,
    win_ranking: Vec<CountryCount>,
    runner_up_ranking: Vec<CountryCount>,
    timeline: Vec<TimelinePoint>,
}

impl App {
    fn new(state: DashboardState, config: DashboardConfig) -> Self {
        let mut app = Self {
            country_summary: state.country_summary().clone(),
            year_summary: state.year_summary().clone(),
            win_map: Vec::new(),
            win_ranking: Vec::new(),
            runner_up_ranking: Vec::new(),
            timeline: Vec::new(),
            state,
            config,
            focus: Focus::Countries,
            tab: StatsTab::Winners,
            help_overlay: false,
            should_quit: false,
        };
        // Selection-independent views never change after startup.
        let fixed: Vec<ViewPayload> = ViewId::ALL
            .iter()
            .filter(|view| view.is_static())
            .map(|view| app.state.payload(*view))
            .collect();
        app.absorb(fixed);
        app
    }

    fn absorb(&mut self, payloads: Vec<ViewPayload>) {
        for payload in payloads {
            match payload {
                ViewPayload::CountrySummary(summary) => self.country_summary = summary,
                ViewPayload::YearSummary(summary) => self.year_summary = summary,
                ViewPayload::WinMap(rows) => self.win_map = rows,
                ViewPayload::WinRanking(rows) => self.win_ranking = rows,
                ViewPayload::RunnerUpRanking(rows) => self.runner_up_ranking = rows,
                ViewPayload::WinTimeline(points) => self.timeline = points,
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Countries => Focus::Years,
                    Focus::Years => Focus::Countries,
                }
            }
            KeyCode::Char('j') | KeyCode::Down => self.step(1),
            KeyCode::Char('k') | KeyCode::Up => self.step(-1),
            KeyCode::Char('1') => self.tab = StatsTab::Winners,
            KeyCode::Char('2') => self.tab = StatsTab::RunnerUps,
            KeyCode::Char('3') => self.tab = StatsTab::Timeline,
            KeyCode::Char('4') => self.tab = StatsTab::Map,
            KeyCode::Char('e') | KeyCode::Char('E') => self.export(),
            KeyCode::Char('?') => self.help_overlay = !self.help_overlay,
            _ => {}
        }
    }

    fn step(&mut self, offset: isize) {
        let delta = match self.focus {
            Focus::Countries => {
                let winners = self.state.dataset().winners();
                let current = winners
                    .iter()
                    .position(|c| c == self.state.selection().country())
                    .unwrap_or(0);
                let next = wrap_index(current, offset, winners.len());
                winners.get(next).cloned().map(Delta::SelectCountry)
            }
            Focus::Years => {
                let years = self.state.dataset().years();
                let current = years
                    .iter()
                    .position(|y| *y == self.state.selection().year())
                    .unwrap_or(0);
                let next = wrap_index(current, offset, years.len());
                years.get(next).copied().map(Delta::SelectYear)
            }
        };
        let Some(delta) = delta else {
            return;
        };
        if let Ok(payloads) = apply_delta(&mut self.state, delta) {
            self.absorb(payloads);
        }
    }

    fn export(&mut self) {
        let path = self.config.export_path.clone();
        match export_dashboard(&path, &self.state) {
            Ok(report) => self.state.push_log(format!(
                "[INFO] Exported {} finals, {} winners, {} runner-ups to {}",
                report.finals,
                report.winners,
                report.runner_ups,
                path.display()
            )),
            Err(err) => self.state.push_log(format!("[WARN] Export failed: {err:#}")),
        }
    }
}

fn wrap_index(current: usize, offset: isize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    let total = total as isize;
    ((current as isize + offset).rem_euclid(total)) as usize
}

fn main() -> Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");

    let config = DashboardConfig::from_env();
    let dataset = shared_dataset().context("build tournament dataset")?;
    let derived = std::sync::Arc::new(Derived::new(dataset));
    let state = DashboardState::with_config(derived, &config).context("initial selection")?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(state, config);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    let tick_rate = app.config.tick_rate;
    let mut last_tick = Instant::now();

    loop {
        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(12),
            Constraint::Min(8),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(app))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let selectors = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_country_panel(frame, selectors[0], app);
    render_year_panel(frame, selectors[1], app);

    match app.tab {
        StatsTab::Winners => render_ranking(
            frame,
            chunks[2],
            ViewId::WinRanking.label(),
            &app.win_ranking,
            Color::Magenta,
        ),
        StatsTab::RunnerUps => render_ranking(
            frame,
            chunks[2],
            ViewId::RunnerUpRanking.label(),
            &app.runner_up_ranking,
            Color::Green,
        ),
        StatsTab::Timeline => render_timeline(frame, chunks[2], &app.timeline),
        StatsTab::Map => render_win_map(frame, chunks[2], &app.win_map),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[3]);

    let footer = Paragraph::new(
        "Tab Focus | j/k/↑/↓ Move | 1 Winners | 2 Runner-ups | 3 Timeline | 4 Map | e Export | ? Help | q Quit",
    );
    frame.render_widget(footer, chunks[4]);

    if app.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(app: &App) -> String {
    let span = match (app.timeline.first(), app.timeline.last()) {
        (Some(first), Some(last)) => format!("{}-{}", first.year, last.year),
        _ => "-".to_string(),
    };
    let focus = match app.focus {
        Focus::Countries => "COUNTRY",
        Focus::Years => "YEAR",
    };
    format!("FIFA WORLD CUP WINNERS | {span} | Focus: {focus}")
}

fn render_country_panel(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel_block(ViewId::CountrySummary.label(), app.focus == Focus::Countries);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(inner);

    let winners = app.state.dataset().winners();
    let selected = winners
        .iter()
        .position(|c| c == app.state.selection().country())
        .unwrap_or(0);
    let items: Vec<String> = winners.to_vec();
    frame.render_widget(Paragraph::new(list_text(&items, selected, rows[0].height)), rows[0]);

    let summary = &app.country_summary;
    let text = format!("{}\n{}", summary.headline(), summary.years_line());
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
        rows[1],
    );
}

fn render_year_panel(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel_block(ViewId::YearSummary.label(), app.focus == Focus::Years);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(8), Constraint::Min(10)])
        .split(inner);

    let years = app.state.dataset().years();
    let selected = years
        .iter()
        .position(|y| *y == app.state.selection().year())
        .unwrap_or(0);
    let items: Vec<String> = years.iter().map(|y| y.to_string()).collect();
    frame.render_widget(Paragraph::new(list_text(&items, selected, cols[0].height)), cols[0]);

    let text = app.year_summary.lines().join("\n");
    frame.render_widget(
        Paragraph::new(text).style(Style::default().fg(Color::Yellow)),
        cols[1],
    );
}

fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(style)
}

fn list_text(items: &[String], selected: usize, height: u16) -> String {
    let (start, end) = visible_range(selected, items.len(), height as usize);
    items[start..end]
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let prefix = if start + i == selected { "> " } else { "  " };
            format!("{prefix}{item}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_ranking(frame: &mut Frame, area: Rect, title: &str, rows: &[CountryCount], color: Color) {
    let bars: Vec<Bar> = rows
        .iter()
        .map(|row| {
            Bar::default()
                .value(u64::from(row.count))
                .label(Line::from(row.country.clone()))
                .style(Style::default().fg(color))
        })
        .collect();
    let max = rows.iter().map(|r| u64::from(r.count)).max().unwrap_or(1);
    let chart = BarChart::default()
        .block(Block::default().title(title).borders(Borders::ALL))
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(1)
        .max(max);
    frame.render_widget(chart, area);
}

fn render_timeline(frame: &mut Frame, area: Rect, points: &[TimelinePoint]) {
    let lines = points
        .iter()
        .map(|p| {
            format!(
                "{}  {:<10} {:<11} {:<15} host {}",
                p.year, p.winner, p.score, p.runner_up, p.host
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let timeline = Paragraph::new(lines).block(
        Block::default()
            .title(ViewId::WinTimeline.label())
            .borders(Borders::ALL),
    );
    frame.render_widget(timeline, area);
}

fn render_win_map(frame: &mut Frame, area: Rect, rows: &[CountryCount]) {
    let lines = rows
        .iter()
        .map(|row| {
            format!(
                "{:<10} {} {}",
                row.country,
                "█".repeat(row.count as usize),
                row.count
            )
        })
        .collect::<Vec<_>>()
        .join("\n");
    let map = Paragraph::new(lines)
        .block(Block::default().title(ViewId::WinMap.label()).borders(Borders::ALL));
    frame.render_widget(map, area);
}

fn console_text(state: &DashboardState) -> String {
    if state.logs.is_empty() {
        return "No messages yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 || visible == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "World Cup Winners - Help",
        "",
        "Selection:",
        "  Tab          Switch country/year list",
        "  j/k or ↑/↓   Move selection",
        "",
        "Statistics:",
        "  1            Winners ranking",
        "  2            Runner-ups ranking",
        "  3            Win timeline",
        "  4            Wins by country",
        "",
        "  e            Export workbook",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text).block(Block::default().title("Help").borders(Borders::ALL));
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
