//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`. It only
//! reads from `App`; key handling lives in `runtime::event_loop`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::App;
use crate::catalog::{FormField, RecordCard};
use crate::config::UiSettings;
use crate::store::KeyValueStore;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("a", "add");
    map.insert("e/enter", "edit");
    map.insert("d", "delete");
    map.insert("/", "search");
    map.insert("s/S", "sort");
    map.insert("q", "quit");
    map
});

/// Render the controls help text for the current mode.
fn controls_text<S: KeyValueStore>(app: &App<S>) -> String {
    if app.is_form_open() {
        return "[tab/shift-tab] next/prev field | [enter] save | [esc] cancel".to_string();
    }
    if app.pending_delete.is_some() {
        return "[y] delete | [n/esc] keep".to_string();
    }
    if app.search_mode {
        return "type to filter | [enter] keep filter | [esc] clear filter".to_string();
    }

    // Keep the rendered order stable and human-friendly.
    let order = ["j/k", "gg/G", "a", "e/enter", "d", "/", "s/S", "q"];
    order
        .iter()
        .filter_map(|k| CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v)))
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Build the status line: counts, spend, sort and search.
fn status_text<S: KeyValueStore>(app: &App<S>) -> String {
    let stats = app.stats();
    let mut parts: Vec<String> = vec![
        format!(" RECORDS: {}", stats.count),
        format!("SPENT: {}", app.total_spent_text()),
        format!("SORT: {}", app.sort().label()),
    ];

    let q = app.search_query();
    if app.search_mode || !q.trim().is_empty() {
        let mut search_part = String::from("SEARCH:");
        if !q.is_empty() {
            search_part.push(' ');
            search_part.push_str(q);
        }
        if app.search_mode {
            search_part.push('_');
        }
        parts.push(search_part);
        parts.push(format!("Showing {}", app.view().len()));
    }

    if let Some(msg) = &app.status {
        parts.push(msg.clone());
    }

    parts.join(" • ")
}

/// Compute a centered rectangle with given size constrained to `r`.
fn centered_rect_sized(mut width: u16, mut height: u16, r: Rect) -> Rect {
    // Keep the popup smaller and avoid covering the entire UI.
    width = width.min(r.width.saturating_sub(2)).max(10);
    height = height.min(r.height.saturating_sub(2)).max(5);

    let x = r.x + (r.width.saturating_sub(width) / 2);
    let y = r.y + (r.height.saturating_sub(height) / 2);
    Rect {
        x,
        y,
        width,
        height,
    }
}

/// Turn a card into a multi-line list item.
fn card_item(card: &RecordCard) -> ListItem<'static> {
    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            card.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(card.byline.clone()),
    ];

    let details = card
        .details
        .iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<String>>()
        .join(" • ");
    lines.push(Line::from(Span::styled(
        details,
        Style::default().add_modifier(Modifier::DIM),
    )));

    if let Some(notes) = &card.notes {
        lines.push(Line::from(Span::styled(
            notes.clone(),
            Style::default().add_modifier(Modifier::ITALIC),
        )));
    }
    lines.push(Line::default());

    ListItem::new(Text::from(lines))
}

fn padded_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .padding(Padding {
            left: 1,
            right: 0,
            top: 0,
            bottom: 0,
        })
}

/// Render the entire UI into the provided `frame` using `app` state and settings.
pub fn draw<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" platter ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Status box
    let status_par = Paragraph::new(status_text(app))
        .block(padded_block(" summary "))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_par, chunks[1]);

    // Main list, or the placeholder when there is nothing to show.
    let cards = app.cards(&ui_settings.date_format);
    if cards.is_empty() {
        let placeholder = Paragraph::new(ui_settings.empty_text.as_str())
            .alignment(Alignment::Center)
            .italic()
            .block(Block::default().borders(Borders::ALL).title(" records "))
            .wrap(Wrap { trim: true });
        frame.render_widget(placeholder, chunks[2]);
    } else {
        let items: Vec<ListItem> = cards.iter().map(card_item).collect();
        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" records "))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");
        let mut state = ListState::default();
        state.select(Some(app.selected.min(cards.len() - 1)));
        frame.render_stateful_widget(list, chunks[2], &mut state);
    }

    if let Some(form) = app.form() {
        let title = if app.editing_id().is_some() {
            " edit record "
        } else {
            " add new record "
        };
        let popup_area = centered_rect_sized(64, FormField::ALL.len() as u16 + 2, chunks[2]);
        frame.render_widget(Clear, popup_area);

        let lines: Vec<Line> = FormField::ALL
            .iter()
            .map(|&field| {
                let focused = field == app.form_focus;
                let marker = if focused { "> " } else { "  " };
                let cursor = if focused { "_" } else { "" };
                let line = Line::from(format!(
                    "{marker}{:<10} {}{cursor}",
                    format!("{}:", field.label()),
                    form.get(field)
                ));
                if focused { line.bold() } else { line }
            })
            .collect();

        let form_par = Paragraph::new(lines)
            .block(padded_block(title))
            .wrap(Wrap { trim: false });
        frame.render_widget(form_par, popup_area);
    } else if let Some(id) = &app.pending_delete {
        let popup_area = centered_rect_sized(56, 5, chunks[2]);
        frame.render_widget(Clear, popup_area);

        let what = app
            .records()
            .iter()
            .find(|r| &r.id == id)
            .map(|r| format!("\"{}\" by {}", r.album, r.artist))
            .unwrap_or_else(|| "this record".to_string());
        let confirm = Paragraph::new(format!(
            "Are you sure you want to delete {what}?\n[y] yes  [n] no"
        ))
        .block(padded_block(" delete record "))
        .wrap(Wrap { trim: true });
        frame.render_widget(confirm, popup_area);
    }

    let footer = Paragraph::new(controls_text(app))
        .block(padded_block(" controls "))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RecordForm;
    use crate::config::CatalogSettings;
    use crate::store::{MemoryStore, RECORDS_KEY};
    use ratatui::{Terminal, backend::TestBackend};

    fn app_with_one() -> App<MemoryStore> {
        let mut app = App::new(MemoryStore::new(), RECORDS_KEY, CatalogSettings::default());
        app.initialize();
        app.start_add();
        app.save(RecordForm {
            artist: "Miles Davis".into(),
            album: "Kind of Blue".into(),
            price: "24.99".into(),
            ..RecordForm::default()
        })
        .unwrap();
        app
    }

    fn render(app: &App<MemoryStore>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| draw(f, app, &UiSettings::default()))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>())
            .collect::<Vec<String>>()
            .join("\n")
    }

    #[test]
    fn status_text_reports_count_spend_and_search() {
        let mut app = app_with_one();
        let s = status_text(&app);
        assert!(s.contains("RECORDS: 1"));
        assert!(s.contains("SPENT: $24.99"));
        assert!(s.contains("SORT: Date added (newest first)"));
        assert!(!s.contains("SEARCH"));

        app.enter_search_mode();
        app.push_search_char('x');
        let s = status_text(&app);
        assert!(s.contains("SEARCH: x_"));
        assert!(s.contains("Showing 0"));
    }

    #[test]
    fn controls_text_follows_mode() {
        let mut app = app_with_one();
        assert!(controls_text(&app).contains("[a] add"));
        app.request_delete_selected();
        assert!(controls_text(&app).starts_with("[y] delete"));
        app.pending_delete = None;
        app.start_add();
        assert!(controls_text(&app).contains("[enter] save"));
    }

    #[test]
    fn draw_shows_cards_or_placeholder() {
        let mut app = app_with_one();
        let screen = render(&app);
        assert!(screen.contains("Kind of Blue"));
        assert!(screen.contains("by Miles Davis"));
        assert!(screen.contains("Price: $24.99"));

        app.set_search("nothing matches this");
        let screen = render(&app);
        assert!(screen.contains("No records yet"));
        assert!(!screen.contains("Kind of Blue"));
    }

    #[test]
    fn draw_shows_form_popup() {
        let mut app = app_with_one();
        let id = app.view()[0].id.clone();
        app.start_edit(&id).unwrap();
        let screen = render(&app);
        assert!(screen.contains("edit record"));
        assert!(screen.contains("> Artist:"));
    }

    #[test]
    fn centered_rect_stays_within_bounds() {
        let area = Rect::new(0, 0, 40, 10);
        let r = centered_rect_sized(80, 20, area);
        assert!(r.width <= 38 && r.height <= 8);
        assert!(r.x + r.width <= area.width);
    }
}
