//! Interactive TUI running one audit at a time

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use super::CliEnv;
use crate::catalog::Catalog;
use crate::models::{AuditReport, MaturityLevel, Question, Severity};
use crate::reporters::{self, ExportStamp, OutputFormat};
use crate::session::{AuditFlow, AuditState};

struct App<'a> {
    flow: AuditFlow<'a>,
    list_state: ListState,
    tick: Duration,
    export_dir: PathBuf,
    reference_prefix: String,
    organization: Option<String>,
    status: Option<String>,
}

impl<'a> App<'a> {
    pub fn new(catalog: &'a Catalog, env: &CliEnv, export_dir: &Path) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            flow: AuditFlow::new(catalog).with_analysis_steps(env.config.analysis.steps),
            list_state,
            tick: Duration::from_millis(env.config.analysis.tick_ms.max(1)),
            export_dir: export_dir.to_path_buf(),
            reference_prefix: env.config.export.reference_prefix.clone(),
            organization: env.config.export.organization.clone(),
            status: None,
        }
    }

    fn is_analyzing(&self) -> bool {
        matches!(self.flow.state(), AuditState::Analyzing { .. })
    }

    /// Number of rows in the list of the current view
    fn list_len(&self) -> usize {
        match self.flow.state() {
            AuditState::ModuleSelection => self.flow.catalog().list_modules().len(),
            AuditState::Questioning { .. } => {
                self.flow.current_question().map_or(0, |q| q.options.len())
            }
            AuditState::Analyzing { .. } => 0,
            AuditState::Report { report, .. } => report.risks.len(),
        }
    }

    fn next(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous(&mut self) {
        let len = self.list_len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn reset_selection(&mut self) {
        self.list_state.select(if self.list_len() > 0 { Some(0) } else { None });
    }

    fn select_module(&mut self, id: &str) -> Result<()> {
        self.flow.select_module(id)?;
        self.status = None;
        self.reset_selection();
        Ok(())
    }

    fn answer_index(&mut self, index: usize) -> Result<()> {
        let Some(question) = self.flow.current_question() else {
            return Ok(());
        };
        let Some(option) = question.options.get(index) else {
            return Ok(());
        };
        self.flow.answer(&option.id)?;
        self.reset_selection();
        Ok(())
    }

    fn restart(&mut self) {
        self.flow.restart();
        self.status = None;
        self.reset_selection();
    }

    /// One step of the analysis counter
    fn on_tick(&mut self) -> Result<()> {
        if self.is_analyzing() {
            self.flow.tick_analysis()?;
            if !self.is_analyzing() {
                self.reset_selection();
            }
        }
        Ok(())
    }

    /// Write the report as Markdown into the export directory
    fn export(&self) -> Result<PathBuf> {
        let report = self.flow.report().context("No report to export")?;
        let stamp = ExportStamp::generate(&self.reference_prefix)
            .with_organization(self.organization.clone());
        let markdown = reporters::render(report, &stamp, OutputFormat::Markdown)?;
        let path = self.export_dir.join(format!(
            "{}.{}",
            stamp.reference,
            reporters::file_extension(OutputFormat::Markdown)
        ));
        std::fs::write(&path, markdown)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        debug!("Exported report to {}", path.display());
        Ok(path)
    }

    /// Apply a key press. Returns `true` when the user quits.
    fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        if code == KeyCode::Char('q') {
            return Ok(true);
        }

        match self.flow.state() {
            AuditState::ModuleSelection => match code {
                KeyCode::Esc => return Ok(true),
                KeyCode::Down | KeyCode::Char('j') => self.next(),
                KeyCode::Up | KeyCode::Char('k') => self.previous(),
                KeyCode::Enter => {
                    let modules = self.flow.catalog().list_modules();
                    if let Some(module) = self.list_state.selected().and_then(|i| modules.get(i)) {
                        self.select_module(&module.id)?;
                    }
                }
                _ => {}
            },
            AuditState::Questioning { .. } => match code {
                KeyCode::Esc | KeyCode::Char('r') => self.restart(),
                KeyCode::Down | KeyCode::Char('j') => self.next(),
                KeyCode::Up | KeyCode::Char('k') => self.previous(),
                KeyCode::Enter => {
                    if let Some(i) = self.list_state.selected() {
                        self.answer_index(i)?;
                    }
                }
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    self.answer_index(index)?;
                }
                _ => {}
            },
            AuditState::Analyzing { .. } => match code {
                KeyCode::Esc | KeyCode::Char('r') => self.restart(),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.flow.finish_analysis()?;
                    self.reset_selection();
                }
                _ => {}
            },
            AuditState::Report { .. } => match code {
                KeyCode::Esc | KeyCode::Char('r') => self.restart(),
                KeyCode::Down | KeyCode::Char('j') => self.next(),
                KeyCode::Up | KeyCode::Char('k') => self.previous(),
                KeyCode::Char('e') => {
                    self.status = Some(match self.export() {
                        Ok(path) => format!("Exported to {}", path.display()),
                        Err(e) => format!("Export failed: {e:#}"),
                    });
                }
                _ => {}
            },
        }
        Ok(false)
    }
}

pub fn run(env: &CliEnv, module: Option<&str>, export_dir: &Path) -> Result<()> {
    let mut app = App::new(&env.catalog, env, export_dir);
    // Reject an unknown module before the terminal switches screens
    if let Some(id) = module {
        app.select_module(id)?;
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        // While analyzing, a quiet interval is one tick of the counter
        if app.is_analyzing() && !event::poll(app.tick)? {
            app.on_tick()?;
            continue;
        }

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && app.handle_key(key.code)? {
                return Ok(());
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    let header_text = match app.flow.current_module() {
        Some(module) => format!(" infraudit | {} | {}", module.title, module.standard),
        None => " infraudit | Select an audit module".to_string(),
    };
    let header = Paragraph::new(header_text)
        .style(Style::default().fg(Color::Cyan).bold())
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, chunks[0]);

    let help = match app.flow.state() {
        AuditState::ModuleSelection => " j/k:Navigate  Enter:Start  q:Quit",
        AuditState::Questioning { .. } => " j/k:Navigate  Enter/1-9:Answer  r/Esc:Restart  q:Quit",
        AuditState::Analyzing { .. } => " Enter:Skip  r/Esc:Restart  q:Quit",
        AuditState::Report { .. } => " j/k:Risks  e:Export Markdown  r/Esc:Restart  q:Quit",
    };

    let flow = &app.flow;
    let list_state = &mut app.list_state;
    match flow.state() {
        AuditState::ModuleSelection => render_modules(f, chunks[1], flow.catalog(), list_state),
        AuditState::Questioning { .. } => {
            if let (Some(question), Some(progress)) = (flow.current_question(), flow.progress()) {
                render_question(f, chunks[1], question, progress, list_state);
            }
        }
        AuditState::Analyzing { progress, .. } => {
            render_analyzing(f, chunks[1], progress.percent(), progress.step(), progress.total())
        }
        AuditState::Report { report, .. } => render_report(f, chunks[1], report, list_state),
    }

    let footer_text = match &app.status {
        Some(status) => format!("{help}  | {status}"),
        None => help.to_string(),
    };
    let footer = Paragraph::new(footer_text).style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, chunks[2]);
}

fn render_modules(f: &mut Frame, area: Rect, catalog: &Catalog, list_state: &mut ListState) {
    let items: Vec<ListItem> = catalog
        .list_modules()
        .iter()
        .map(|module| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{:<16}", module.id), Style::default().fg(Color::Cyan).bold()),
                    Span::raw(&module.title),
                    Span::styled(
                        format!("  ({} questions)", module.questions.len()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(Span::styled(
                    format!("{:<16}{}", "", module.standard),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Audit modules "))
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, list_state);
}

fn render_question(
    f: &mut Frame,
    area: Rect,
    question: &Question,
    (answered, total): (usize, usize),
    list_state: &mut ListState,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(area);

    let ratio = if total == 0 { 0.0 } else { answered as f64 / total as f64 };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Progress "))
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(format!("Question {} of {}", answered + 1, total));
    f.render_widget(gauge, chunks[0]);

    let mut text = vec![Line::from(Span::styled(&question.text, Style::default().bold()))];
    if let Some(note) = &question.note {
        text.push(Line::from(Span::styled(note, Style::default().fg(Color::DarkGray).italic())));
    }
    let prompt = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(format!(" {} ", question.category)))
        .wrap(Wrap { trim: true });
    f.render_widget(prompt, chunks[1]);

    let items: Vec<ListItem> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::raw(&option.label),
            ]))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Answers "))
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[2], list_state);
}

fn render_analyzing(f: &mut Frame, area: Rect, percent: u32, step: u32, total: u32) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" Analyzing answers "))
        .gauge_style(Style::default().fg(Color::Green))
        .percent(percent.min(100) as u16)
        .label(format!("{percent}% ({step}/{total})"));
    f.render_widget(gauge, chunks[1]);
}

fn render_report(f: &mut Frame, area: Rect, report: &AuditReport, list_state: &mut ListState) {
    let category_rows = report.categories.len() as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(category_rows),
            Constraint::Min(0),
        ])
        .split(area);

    let summary = vec![
        Line::from(vec![
            Span::styled("Score: ", Style::default().bold()),
            Span::styled(
                format!("{}/100", report.global_score),
                Style::default().fg(percentage_color(report.global_score)).bold(),
            ),
            Span::styled("   Maturity: ", Style::default().bold()),
            Span::styled(
                format!("{} ({}/5)", report.maturity, report.maturity.ordinal()),
                Style::default().fg(maturity_color(report.maturity)).bold(),
            ),
            Span::styled(
                format!("   {}/{} points", report.total_score, report.total_max),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
        Line::from(Span::styled(
            report.maturity.description(),
            Style::default().fg(Color::DarkGray).italic(),
        )),
    ];
    let summary = Paragraph::new(summary).block(Block::default().borders(Borders::ALL).title(" Result "));
    f.render_widget(summary, chunks[0]);

    let width = report
        .categories
        .iter()
        .map(|c| c.category.chars().count())
        .max()
        .unwrap_or(0);
    let category_lines: Vec<Line> = report
        .categories
        .iter()
        .map(|c| {
            let filled = (c.percentage.min(100) as usize * 20 + 50) / 100;
            Line::from(vec![
                Span::raw(format!("{:<width$}  ", c.category)),
                Span::styled("█".repeat(filled), Style::default().fg(percentage_color(c.percentage))),
                Span::styled("░".repeat(20 - filled), Style::default().fg(Color::DarkGray)),
                Span::raw(format!(" {:>3}%", c.percentage)),
            ])
        })
        .collect();
    let categories = Paragraph::new(category_lines)
        .block(Block::default().borders(Borders::ALL).title(" Categories "));
    f.render_widget(categories, chunks[1]);

    if report.risks.is_empty() {
        let empty = Paragraph::new("No risks identified.")
            .block(Block::default().borders(Borders::ALL).title(" Risks "));
        f.render_widget(empty, chunks[2]);
        return;
    }

    let items: Vec<ListItem> = report
        .risks
        .iter()
        .enumerate()
        .map(|(i, ranked)| {
            let severity = ranked.severity();
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{:>3} ", i + 1), Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        format!("[{}] ", severity_char(severity)),
                        Style::default().fg(severity_color(severity)).bold(),
                    ),
                    Span::raw(&ranked.risk.description),
                    Span::styled(format!("  {}", ranked.category), Style::default().fg(Color::DarkGray)),
                ]),
                Line::from(Span::styled(
                    format!(
                        "      {} -> {}",
                        ranked.risk.recommendation.term, ranked.risk.recommendation.action
                    ),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Risks ({}) ", report.risk_summary.total)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, chunks[2], list_state);
}

fn severity_char(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "C",
        Severity::Major => "M",
        Severity::Moderate => "m",
        Severity::Low => "L",
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical => Color::Red,
        Severity::Major => Color::LightRed,
        Severity::Moderate => Color::Yellow,
        Severity::Low => Color::Blue,
    }
}

fn maturity_color(maturity: MaturityLevel) -> Color {
    match maturity {
        MaturityLevel::Optimized | MaturityLevel::Managed => Color::Green,
        MaturityLevel::Defined => Color::Yellow,
        MaturityLevel::Reproducible | MaturityLevel::Initial => Color::Red,
    }
}

fn percentage_color(percentage: u32) -> Color {
    if percentage >= 70 {
        Color::Green
    } else if percentage >= 50 {
        Color::Yellow
    } else {
        Color::Red
    }
}
