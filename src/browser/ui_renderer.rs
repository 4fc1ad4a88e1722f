use super::app_logic::BrowserApp;
use super::collaborators::{button_columns, px_to_columns};
use crate::toolbar::{
    CANCEL_SELECTION_BUTTON_ID, CANCEL_SELECTION_BUTTON_WRAPPER_ID, ElementKind,
    FILES_SELECTED_LABEL_ID,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

const NAVIGATION_ITEMS: [(&str, &str); 3] = [
    ("▣", "My files"),
    ("◷", "Recent"),
    ("⏏", "Removable"),
];

fn draw_toolbar(f: &mut Frame, app: &BrowserApp, area: Rect) {
    let block = Block::default().borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let toolbar = app.controller.toolbar();
    let elements = toolbar.elements();
    let selecting = app.ui_state.is_selecting();

    let spacer_columns = elements
        .iter()
        .find(|e| e.id == CANCEL_SELECTION_BUTTON_WRAPPER_ID)
        .and_then(|e| e.width_px)
        .map(px_to_columns)
        .unwrap_or(0);
    let buttons: Vec<_> = elements
        .iter()
        .filter(|e| e.kind.is_button() && !e.hidden && e.id != CANCEL_SELECTION_BUTTON_ID)
        .collect();

    let mut constraints = vec![Constraint::Length(spacer_columns), Constraint::Min(0)];
    constraints.extend(buttons.iter().map(|b| Constraint::Length(button_columns(&b.text))));
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(inner);

    if selecting {
        let cancel = elements
            .iter()
            .find(|e| e.id == CANCEL_SELECTION_BUTTON_ID)
            .map(|e| e.text.clone())
            .unwrap_or_default();
        f.render_widget(Paragraph::new(format!(" {cancel}")), chunks[0]);
        let label = elements
            .iter()
            .find(|e| e.id == FILES_SELECTED_LABEL_ID)
            .map(|e| e.text.clone())
            .unwrap_or_default();
        f.render_widget(
            Paragraph::new(label).style(Style::default().add_modifier(Modifier::BOLD)),
            chunks[1],
        );
    } else {
        f.render_widget(Paragraph::new(app.breadcrumb.displayed()), chunks[1]);
    }

    for (button, chunk) in buttons.iter().zip(chunks.iter().skip(2)) {
        let style = if button.focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let text = match button.kind {
            ElementKind::ComboButton => format!("[{}]", button.text),
            _ => format!(" {} ", button.text),
        };
        f.render_widget(Paragraph::new(text).style(style), *chunk);
    }
}

fn draw_navigation(f: &mut Frame, app: &BrowserApp, area: Rect) {
    let expanded = app.navigation.is_expanded();
    let items: Vec<ListItem> = NAVIGATION_ITEMS
        .iter()
        .map(|(icon, name)| {
            if expanded {
                ListItem::new(format!("{icon} {name}"))
            } else {
                ListItem::new(icon.to_string())
            }
        })
        .collect();
    f.render_widget(
        List::new(items).block(Block::default().borders(Borders::RIGHT)),
        area,
    );
}

fn draw_file_list(f: &mut Frame, app: &mut BrowserApp, area: Rect) {
    app.list_viewport_height = area.height.saturating_sub(2) as usize;
    app.ensure_cursor_visible();

    let entries = app.model.visible_entries();
    let end = (app.scroll_offset + app.list_viewport_height).min(entries.len());
    let window = entries.get(app.scroll_offset..end).unwrap_or(&[]);

    let list_items: Vec<ListItem> = window
        .iter()
        .map(|entry| {
            let selected = app.model.is_selected(&entry.full_path);
            let marker = if app.list_style.show_checkboxes {
                if selected { "[x] " } else { "[ ] " }
            } else if selected {
                "● "
            } else {
                "  "
            };
            let name = entry.full_path.rsplit('/').next().unwrap_or("");
            let suffix = if entry.is_dir { "/" } else { "" };
            let lock = if entry.read_only { " 🔒" } else { "" };
            let item = ListItem::new(format!("{marker}{name}{suffix}{lock}"));
            if selected {
                item.style(Style::default().fg(Color::Cyan))
            } else {
                item
            }
        })
        .collect();

    let title_style = if app.ui_state.is_selecting() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let list_widget = List::new(list_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.model.current_dir())
                .title_style(title_style),
        )
        .highlight_style(
            Style::default()
                .add_modifier(Modifier::BOLD)
                .bg(Color::DarkGray),
        )
        .highlight_symbol("❯ ");

    let mut list_state = ListState::default();
    let cursor = app.model.cursor();
    if cursor >= app.scroll_offset && cursor < end {
        list_state.select(Some(cursor - app.scroll_offset));
    }
    f.render_stateful_widget(list_widget, area, &mut list_state);
}

fn draw_help_line(f: &mut Frame, app: &BrowserApp, area: Rect) {
    let help = format!(
        "Space: Sel | Enter/Bksp: Open/Up | v: Checkboxes | x/Esc: Cancel | D/Del: Delete | n: Nav | q: Quit  ({} selected)",
        app.selected_count()
    );
    f.render_widget(Paragraph::new(help), area);
}

pub(super) fn ui_frame(frame: &mut Frame, app: &mut BrowserApp) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(app.navigation.columns()),
            Constraint::Min(0),
        ])
        .split(rows[1]);

    draw_toolbar(frame, app, rows[0]);
    draw_navigation(frame, app, body[0]);
    draw_file_list(frame, app, body[1]);
    draw_help_line(frame, app, rows[2]);
}
