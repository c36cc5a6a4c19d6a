use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use ratatui::Frame;
use taskboard_core::{Tab, Task};

use super::app::{BoardApp, FormField, FormState, Mode};

const FETCH_ERROR_MESSAGE: &str = "Something went wrong while fetching tasks";
const NO_TASKS_MESSAGE: &str = "No tasks found";

pub fn draw(f: &mut Frame<'_>, app: &BoardApp) {
    let size = f.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(size);

    draw_header(f, chunks[0], app);
    draw_tabs(f, chunks[1], app);
    draw_list(f, chunks[2], app);
    draw_footer(f, chunks[3], app);

    if app.mode == Mode::Form {
        if let Some(form) = app.form.as_ref() {
            draw_form(f, size, form);
        }
    }
}

fn draw_header(f: &mut Frame<'_>, area: Rect, app: &BoardApp) {
    let count = app.board.tasks(app.selected_tab).len();
    let state = if app.is_loading() {
        Span::styled("fetching", Style::default().fg(Color::Yellow))
    } else if app.fetch_error.is_some() {
        Span::styled("error", Style::default().fg(Color::Red))
    } else {
        Span::styled("idle", Style::default().fg(Color::Green))
    };
    let line = Line::from(vec![
        Span::styled("Taskboard", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  q: "),
        Span::styled(app.query_value(), Style::default().fg(Color::Gray)),
        Span::raw("  loaded: "),
        Span::styled(count.to_string(), Style::default().fg(Color::Gray)),
        Span::raw("  "),
        state,
    ]);
    let header = Paragraph::new(line).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, area);
}

fn draw_tabs(f: &mut Frame<'_>, area: Rect, app: &BoardApp) {
    let titles: Vec<Line> = Tab::ALL.iter().map(|tab| Line::from(tab.label())).collect();
    let tabs = Tabs::new(titles)
        .select(app.selected_tab.index())
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));
    f.render_widget(tabs, area);
}

fn draw_list(f: &mut Frame<'_>, area: Rect, app: &BoardApp) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        " {} ",
        app.selected_tab.label()
    ));
    let inner_height = area.height.saturating_sub(2) as usize;

    if app.show_error() {
        let widget = Paragraph::new(FETCH_ERROR_MESSAGE)
            .style(Style::default().fg(Color::Red))
            .block(block);
        f.render_widget(widget, area);
        return;
    }
    if app.show_no_tasks() {
        let widget = Paragraph::new(NO_TASKS_MESSAGE)
            .style(Style::default().fg(Color::Gray))
            .block(block);
        f.render_widget(widget, area);
        return;
    }

    let tasks = app.board.tasks(app.selected_tab);
    let mut lines: Vec<Line> = Vec::with_capacity(inner_height);

    // Keep the selection inside the visible window.
    let rows_budget = inner_height.saturating_sub(1).max(1);
    let offset = app.selected_row.saturating_sub(rows_budget.saturating_sub(1));

    for (idx, task) in tasks.iter().enumerate().skip(offset).take(rows_budget) {
        lines.push(task_line(task, idx == app.selected_row));
    }
    lines.push(sentinel_line(app));

    let widget = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn task_line(task: &Task, selected: bool) -> Line<'_> {
    let marker = if selected { "> " } else { "  " };
    let assignee = task.assignee.as_deref().unwrap_or("-");
    let ends_on = task
        .ends_on
        .map(|d| d.to_string())
        .unwrap_or_else(|| "-".to_string());
    let base = if selected {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Line::from(vec![
        Span::styled(marker, base),
        Span::styled(format!("{:<20} ", task.id), base.fg(Color::DarkGray)),
        Span::styled(format!("{:<40} ", task.title), base),
        Span::styled(format!("{:<14} ", assignee), base.fg(Color::Gray)),
        Span::styled(ends_on, base.fg(Color::Gray)),
    ])
}

/// The bottom sentinel row of the list: shows fetch progress, or the end
/// of the tab's results.
fn sentinel_line(app: &BoardApp) -> Line<'_> {
    if app.is_loading() {
        return Line::from(Span::styled(
            "  Loading...",
            Style::default().fg(Color::Yellow),
        ));
    }
    if let Some(err) = app.fetch_error.as_deref() {
        return Line::from(Span::styled(
            format!("  {FETCH_ERROR_MESSAGE}: {err}"),
            Style::default().fg(Color::Red),
        ));
    }
    if !app.board.can_load_more(app.selected_tab) {
        return Line::from(Span::styled(
            "  -- end of results --",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(Span::styled(
        "  j to load more",
        Style::default().fg(Color::DarkGray),
    ))
}

fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &BoardApp) {
    let hint = match app.mode {
        Mode::List => "q:quit  Tab/h/l:tabs  j/k:move  a:assign  r:refresh",
        Mode::Form => "Tab:next field  arrows:status  Enter:submit  Esc:cancel",
    };
    let mut spans = vec![
        Span::styled("> ", Style::default().fg(Color::Cyan)),
        Span::styled(hint, Style::default().fg(Color::Gray)),
    ];
    if let Some(msg) = app.footer_msg.as_deref() {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    }
    let footer =
        Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}

fn draw_form(f: &mut Frame<'_>, area: Rect, form: &FormState) {
    let popup = centered_rect(60, 9, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Assign task {} ", form.task_id))
        .border_style(Style::default().fg(Color::Cyan));

    let lines = vec![
        field_line("Assignee", &form.assignee, form.focus == FormField::Assignee),
        field_line(
            "Status",
            form.status().label(),
            form.focus == FormField::Status,
        ),
        field_line("Ends on", &form.ends_on, form.focus == FormField::EndsOn),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: Assign Task",
            Style::default().fg(Color::Gray),
        )),
    ];

    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);
    f.render_widget(widget, popup);
}

fn field_line<'a>(label: &'a str, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(format!("{label:>9}: "), label_style),
        Span::raw(value),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ])
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
