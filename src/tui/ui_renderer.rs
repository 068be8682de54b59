use super::app_logic::{Dispatch, TuiApp};
use crate::session::Phase;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};

fn draw_help_block<D: Dispatch>(f: &mut Frame, app: &TuiApp<D>, area: Rect) {
    let help_text_lines_content = vec![
        Line::from("y: Yes | n: No | c: Completely | a: Ask"),
        Line::from("Arrows/jk: Nav | Enter: Choose highlighted | q/Esc: Quit"),
    ];
    let title = format!(
        "gut: {} ({} pending)",
        app.session.source().display(),
        app.session.pending_jobs()
    );
    let help_paragraph =
        Paragraph::new(help_text_lines_content).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(help_paragraph, area);
}

fn draw_message_block(f: &mut Frame, area: Rect, message: String, style: Style) {
    let paragraph = Paragraph::new(message)
        .style(style)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn draw_prompt_block<D: Dispatch>(f: &mut Frame, app: &TuiApp<D>, area: Rect, busy: bool) {
    let Some(prompt) = app.session.prompt() else {
        let message = format!("Reading {} …", app.session.source().display());
        draw_message_block(f, area, message, Style::default());
        return;
    };

    let list_items: Vec<ListItem> = app
        .items()
        .iter()
        .map(|item| ListItem::new(item.label))
        .collect();

    let list_title = if busy {
        format!("{} (working…)", prompt.title)
    } else {
        prompt.title
    };

    let list_widget = List::new(list_items)
        .block(Block::default().borders(Borders::ALL).title(list_title))
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state = ListState::default();
    list_state.select(Some(app.current_selection_idx));
    f.render_stateful_widget(list_widget, area, &mut list_state);
}

pub(super) fn ui_frame<D: Dispatch>(frame: &mut Frame, app: &TuiApp<D>) {
    let help_lines = 2;
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(help_lines + 2), Constraint::Min(0)])
        .split(frame.area());

    draw_help_block(frame, app, main_chunks[0]);

    let body = main_chunks[1];
    match app.session.phase() {
        Phase::Failed(err) => draw_message_block(
            frame,
            body,
            format!("Something went wrong, press q to quit: {err}"),
            Style::default().fg(Color::Red),
        ),
        Phase::Done => draw_message_block(
            frame,
            body,
            "All done, press q to quit!".to_string(),
            Style::default().fg(Color::Green),
        ),
        Phase::Waiting => draw_prompt_block(frame, app, body, true),
        Phase::Deciding => draw_prompt_block(frame, app, body, false),
    }
}
