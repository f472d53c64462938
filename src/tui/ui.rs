//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::features::focus::{format_mmss, SessionSnapshot, Stage};
use crate::tui::app::{App, Screen};
use crate::tui::event::help_text;

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App<'_>) {
    match app.screen {
        Screen::Picker => render_picker(frame, app),
        Screen::Timer => render_timer(frame, app),
    }
}

const fn stage_color(stage: Stage) -> Color {
    match stage {
        Stage::Idle => Color::White,
        Stage::Work => Color::Red,
        Stage::ShortBreak => Color::Green,
        Stage::LongBreak => Color::Blue,
    }
}

fn render_picker(frame: &mut Frame<'_>, app: &App<'_>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // List
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let title = format!(" Pick a task to focus on ({} open) ", app.tasks.len());
    let header = Paragraph::new(title)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem<'_>> = if app.tasks.is_empty() {
        vec![ListItem::new(Span::styled(
            "No open tasks. Add one with: chronos task add \"...\"",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        app.tasks
            .iter()
            .map(|task| {
                ListItem::new(Line::from(vec![
                    Span::styled(
                        format!("#{:<4} ", task.id),
                        Style::default().fg(Color::DarkGray),
                    ),
                    Span::raw(task.title.as_str()),
                ]))
            })
            .collect()
    };

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !app.tasks.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, chunks[1], &mut state);

    render_status_bar(frame, app, chunks[2]);
}

fn render_timer(frame: &mut Frame<'_>, app: &App<'_>) {
    let snapshot = app.engine.snapshot();
    let color = stage_color(snapshot.stage);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Task header
            Constraint::Min(5),    // Countdown
            Constraint::Length(3), // Progress gauge
            Constraint::Length(1), // Pomodoro count
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let task_title = snapshot
        .task
        .as_ref()
        .map_or("(no task)", |t| t.title.as_str());
    let header = Paragraph::new(format!(" {task_title} "))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", snapshot.stage))
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(header, chunks[0]);

    render_countdown(frame, app, &snapshot, chunks[1]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(color))
        .ratio(snapshot.progress.clamp(0.0, 1.0));
    frame.render_widget(gauge, chunks[2]);

    let every = snapshot.settings.pomodoros_per_long_break.get();
    let in_cycle = snapshot.pomodoros_completed % every;
    let count = Paragraph::new(format!(
        " Pomodoros: {}  |  cycle {in_cycle}/{every}  |  this run: {}",
        snapshot.pomodoros_completed,
        app.total_pomodoros()
    ))
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(count, chunks[3]);

    render_status_bar(frame, app, chunks[4]);
}

fn render_countdown(frame: &mut Frame<'_>, app: &App<'_>, snapshot: &SessionSnapshot, area: Rect) {
    let state = if app.stage_finished {
        "finished"
    } else if snapshot.is_active {
        "running"
    } else {
        "paused"
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format_mmss(snapshot.time_left),
            Style::default()
                .fg(stage_color(snapshot.stage))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(state, Style::default().fg(Color::DarkGray))),
    ];

    let countdown = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(countdown, area);
}

fn render_status_bar(frame: &mut Frame<'_>, app: &App<'_>, area: Rect) {
    let status_text = app
        .status
        .as_deref()
        .unwrap_or_else(|| help_text(app.screen));

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(status, area);
}
