//! UI rendering for the `ViewApp`.

use super::app::{FocusPanel, ViewApp};
use super::events::{Event, EventHandler, handle_key_event};
use super::theme::{FooterHints, Styles, colors, mode_badge, render_footer_hints};
use super::viewmodel::OverlayKind;
use super::widgets::{MIN_HEIGHT, MIN_WIDTH, centered_rect, terminal_fits, truncate_str};
use crate::app::{StatusLevel, messages};
use crate::filter::ProductLookup;
use crate::model::Product;
use crate::reports::{EMPTY_CELL, detail_rows, product_allergens};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState as WidgetListState, Paragraph},
};
use std::io::{self, stdout};
use std::time::Duration;

/// Run the `ViewApp` TUI until the user quits.
pub fn run_view_tui(app: &mut ViewApp, tick_rate: Duration) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app, tick_rate);

    // Restore the terminal even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut ViewApp,
    tick_rate: Duration,
) -> io::Result<()> {
    let events = EventHandler::new(tick_rate);
    loop {
        terminal.draw(|frame| render(frame, app))?;

        match events.next()? {
            Event::Key(key) => handle_key_event(app, key),
            Event::Resize(_, _) => {}
            Event::Tick => app.tick += 1,
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Main render function.
pub fn render(frame: &mut Frame, app: &mut ViewApp) {
    let area = frame.area();

    if !terminal_fits(area.width, area.height) {
        let warning = Paragraph::new(format!(
            "Terminal zu klein: mindestens {MIN_WIDTH}×{MIN_HEIGHT}"
        ))
        .alignment(Alignment::Center)
        .style(Style::default().fg(colors().warning));
        frame.render_widget(warning, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(6),    // Panels
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Footer
        ])
        .split(area);

    render_header(frame, chunks[0], app);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[1]);
    render_allergens(frame, panels[0], app);
    render_products(frame, panels[1], app);

    render_status_bar(frame, chunks[2], app);
    render_footer(frame, chunks[3], app);

    match app.overlay.current() {
        Some(OverlayKind::Help) => render_help_overlay(frame, area),
        Some(OverlayKind::Lookup) => render_lookup_overlay(frame, area, app),
        None => {}
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &ViewApp) {
    let state = app.state();
    let line = Line::from(vec![
        Span::styled(" Allergen-Katalog ", Styles::header_title()),
        Span::styled("│ ", Style::default().fg(colors().muted)),
        Span::styled(
            format!(
                "{} Produkte, {} Allergene ",
                state.catalog().product_count(),
                state.index().len()
            ),
            Styles::text_muted(),
        ),
        Span::styled("│ Modus: ", Style::default().fg(colors().muted)),
        mode_badge(app.mode_filter.display_name()),
    ]);
    let header = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Styles::border()),
    );
    frame.render_widget(header, area);
}

fn panel_block(title: &str, focused: bool) -> Block<'_> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(if focused {
            Styles::border_focused()
        } else {
            Styles::border()
        })
}

fn render_allergens(frame: &mut Frame, area: Rect, app: &ViewApp) {
    let state = app.state();
    let focused = app.focus == FocusPanel::Allergens;
    let title = format!("Allergene ({}/{})", state.selection.len(), state.index().len());
    let block = panel_block(&title, focused);

    if state.index().is_empty() {
        let empty = Paragraph::new(messages::NO_ALLERGENS)
            .style(Styles::text_muted())
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(8) as usize;
    let items: Vec<ListItem> = state
        .index()
        .iter()
        .map(|label| {
            let checked = state.selection.contains(label);
            let (mark, style) = if checked {
                ("[x] ", Style::default().fg(colors().checked).bold())
            } else {
                ("[ ] ", Style::default().fg(colors().text))
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(truncate_str(label, width), style),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused {
            Styles::selected()
        } else {
            Style::default()
        });
    let mut list_state = WidgetListState::default().with_selected(Some(app.allergen_list.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

fn render_products(frame: &mut Frame, area: Rect, app: &ViewApp) {
    let focused = app.focus == FocusPanel::Products;
    let products = app.visible_products();
    let title = format!(
        "Produkte ({}/{})",
        products.len(),
        app.state().catalog().product_count()
    );
    let block = panel_block(&title, focused);

    if products.is_empty() {
        let empty = Paragraph::new(messages::NO_PRODUCTS)
            .style(Style::default().fg(colors().warning))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let items: Vec<ListItem> = products
        .iter()
        .map(|product| {
            let detail = match (app.is_expanded(product), app.show_raw) {
                (false, _) => Detail::Closed,
                (true, false) => Detail::Table,
                (true, true) => Detail::TableWithJson,
            };
            product_item(product, detail, width)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(if focused {
            Styles::selected()
        } else {
            Style::default()
        });
    let mut list_state = WidgetListState::default().with_selected(Some(app.product_list.selected));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// How much of a product is shown below its summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Detail {
    Closed,
    Table,
    TableWithJson,
}

fn product_item(product: &Product, detail: Detail, width: usize) -> ListItem<'static> {
    let expanded = detail != Detail::Closed;
    let allergens = product_allergens(product);
    let (summary, summary_style) = if allergens.is_empty() {
        (EMPTY_CELL.to_string(), Style::default().fg(colors().allergen_free))
    } else {
        (allergens.join(", "), Style::default().fg(colors().allergen))
    };

    let mut lines = vec![Line::from(vec![
        Span::styled(
            if expanded { "▾ " } else { "▸ " },
            Style::default().fg(colors().accent),
        ),
        Span::styled(product.name.clone(), Style::default().fg(colors().text).bold()),
        Span::styled(format!(" ({}) ", product.id), Styles::text_muted()),
        Span::styled(summary, summary_style),
    ])];

    if expanded {
        let rows = detail_rows(product);
        let column = (width.saturating_sub(10) / 3).max(6);
        lines.push(Line::styled(
            format!(
                "    {:<column$} │ {:<column$} │ Allergene",
                "Komponente", "Zutat"
            ),
            Styles::text_muted(),
        ));
        if rows.is_empty() {
            lines.push(Line::styled(format!("    {EMPTY_CELL}"), Styles::text_muted()));
        }
        for [component, ingredient, allergens] in rows {
            let style = if allergens == EMPTY_CELL {
                Styles::text_muted()
            } else {
                Style::default().fg(colors().allergen)
            };
            lines.push(Line::from(vec![
                Span::raw(format!(
                    "    {} │ {} │ ",
                    pad(&truncate_str(&component, column), column),
                    pad(&truncate_str(&ingredient, column), column)
                )),
                Span::styled(allergens, style),
            ]));
        }
    }

    if detail == Detail::TableWithJson {
        lines.push(Line::styled(
            "    Rohdaten (JSON)",
            Style::default().fg(colors().accent),
        ));
        match serde_json::to_string_pretty(product) {
            Ok(json) => lines.extend(
                json.lines()
                    .map(|line| Line::styled(format!("    {line}"), Styles::text_muted())),
            ),
            Err(e) => lines.push(Line::styled(format!("    {e}"), Styles::text_muted())),
        }
    }

    ListItem::new(lines)
}

/// Pad to a display width.
fn pad(text: &str, width: usize) -> String {
    let used = unicode_width::UnicodeWidthStr::width(text);
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

fn render_status_bar(frame: &mut Frame, area: Rect, app: &mut ViewApp) {
    let lookup_line = lookup_spans(&app.state().lookup());
    let status = &mut app.state_mut().status;
    let level = status.level();

    let spans = match status.message() {
        Some(message) => {
            let (icon, color) = match level {
                StatusLevel::Info => ("ℹ ", colors().success),
                StatusLevel::Warning => ("⚠ ", colors().warning),
                StatusLevel::Error => ("✖ ", colors().error),
            };
            vec![
                Span::styled(format!(" {icon}"), Style::default().fg(color)),
                Span::styled(message.to_string(), Style::default().fg(color).bold()),
            ]
        }
        None => lookup_line,
    };

    frame.render_widget(
        Paragraph::new(Line::from(spans)).style(Styles::status_bar()),
        area,
    );
}

fn lookup_spans(result: &ProductLookup<'_>) -> Vec<Span<'static>> {
    match result {
        ProductLookup::NoQuery => Vec::new(),
        ProductLookup::NotFound => vec![Span::styled(
            format!(" {}", messages::NO_PRODUCTS),
            Style::default().fg(colors().warning),
        )],
        ProductLookup::Found { product, allergens } => {
            let found = if allergens.is_empty() {
                messages::NONE.to_string()
            } else {
                allergens.join(", ")
            };
            vec![
                Span::styled(format!(" {}: ", product.name), Styles::text_muted()),
                Span::styled(
                    format!("{} ", messages::FOUND_ALLERGENS),
                    Style::default().fg(colors().text),
                ),
                Span::styled(found, Style::default().fg(colors().allergen).bold()),
            ]
        }
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &ViewApp) {
    let hints = FooterHints::for_panel(app.focus.name());
    let footer = Paragraph::new(Line::from(render_footer_hints(&hints)))
        .alignment(Alignment::Center)
        .style(Styles::text_muted());
    frame.render_widget(footer, area);
}

fn help_line(key: &'static str, description: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {key:<14} "), Style::default().fg(colors().accent)),
        Span::styled(description, Style::default().fg(colors().text)),
    ])
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::styled(
            "━━━ Allergen-Katalog ━━━",
            Style::default().fg(colors().accent).bold(),
        ),
        Line::from(""),
        help_line("Tab / ←→", "Bereich wechseln"),
        help_line("↑/↓ oder j/k", "Auswahl bewegen"),
        help_line("PgUp/PgDown", "Seite hoch/runter"),
        help_line("Leertaste", "Allergen an-/abwählen"),
        help_line("Enter", "Produktdetails ein-/ausklappen"),
        help_line("J", "Rohdaten (JSON) ein-/ausblenden"),
        help_line("m", "Modus wechseln (geeignet / enthält)"),
        help_line("/", "Produkt nach Name oder ID suchen"),
        help_line("r", "Daten neu laden"),
        help_line("C", "Lokale Daten löschen"),
        help_line("T", "Farbschema wechseln"),
        help_line("?", "Hilfe ein-/ausblenden"),
        help_line("q / Esc", "Beenden"),
        Line::from(""),
        Line::styled("Beliebige Taste schließt die Hilfe", Styles::text_muted()),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .title(" Hilfe ")
            .title_style(Style::default().fg(colors().accent).bold())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(colors().accent)),
    );
    frame.render_widget(help, popup_area);
}

fn render_lookup_overlay(frame: &mut Frame, area: Rect, app: &ViewApp) {
    let popup_area = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup_area);

    let input = if app.lookup.query.is_empty() {
        Span::styled(messages::SEARCH_PLACEHOLDER, Styles::text_muted())
    } else {
        Span::styled(
            app.lookup.query.clone(),
            Style::default().fg(colors().text).bold(),
        )
    };
    let mut lines = vec![
        Line::from(vec![
            Span::styled("> ", Style::default().fg(colors().accent)),
            input,
            Span::styled("▏", Style::default().fg(colors().accent)),
        ]),
        Line::from(""),
    ];
    let result = lookup_spans(&app.state().lookup());
    if !result.is_empty() {
        lines.push(Line::from(result));
    }

    let popup = Paragraph::new(lines).block(
        Block::default()
            .title(" Suche ")
            .borders(Borders::ALL)
            .border_style(Styles::border_focused()),
    );
    frame.render_widget(popup, popup_area);
}
