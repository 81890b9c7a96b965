//! TUI rendering for slurp using ratatui.
//!
//! Pure view layer: reads the engine's state and paints it, never mutates
//! it. Overlays stack in a fixed order with the busy overlay on top, so a
//! visible indicator is never painted over by the page beneath it.

mod input;
mod theme;

pub use input::handle_events;
pub use theme::{Glyphs, Palette, Theme, styles};

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use slurp_engine::{App, PreviewBody, PreviewPane, Row};
use slurp_types::FileEntry;

/// Narrower terminals drop the modified column.
const MODIFIED_COLUMN_MIN_WIDTH: u16 = 64;
const SIZE_COLUMN_WIDTH: usize = 10;
const MODIFIED_COLUMN_WIDTH: usize = 19;

/// Main draw function. Call once per frame after ticking the app.
pub fn draw(frame: &mut Frame, app: &App, theme: &Theme) {
    let palette = &theme.palette;
    let glyphs = &theme.glyphs;

    let bg_block = Block::default().style(Style::default().bg(palette.bg_dark));
    frame.render_widget(bg_block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(1),    // Listing
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    draw_title_bar(frame, app, chunks[0], theme);
    draw_listing(frame, app, chunks[1], theme);
    draw_status_bar(frame, app, chunks[2], theme);

    if let Some(pane) = &app.view().preview {
        draw_preview(frame, pane, frame.area(), theme);
    }

    if let Some(confirm) = &app.view().confirm {
        draw_confirm(frame, &confirm.name, confirm.is_dir, frame.area(), theme);
    }

    // Last, so nothing paints over it while it is visible.
    if app.view().indicator.is_visible() {
        let tick = app.view().indicator.overlay().map_or(0, |o| o.frame());
        draw_busy_overlay(frame, tick, frame.area(), palette, glyphs);
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let palette = &theme.palette;
    let mut spans = vec![
        Span::styled(" slurp ", styles::title(palette)),
        Span::styled("│ ", Style::default().fg(palette.bg_border)),
        Span::styled(
            app.page().path().to_string(),
            Style::default().fg(palette.text_secondary),
        ),
    ];
    if app.is_busy() {
        spans.push(Span::styled(
            "  working",
            Style::default().fg(palette.text_muted),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_listing(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let palette = &theme.palette;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.bg_border))
        .style(Style::default().bg(palette.bg_panel));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let page = app.page();
    if page.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            " This folder is empty",
            Style::default().fg(palette.text_muted),
        )));
        frame.render_widget(empty, inner);
        return;
    }

    let show_modified = area.width >= MODIFIED_COLUMN_MIN_WIDTH;
    let visible = inner.height as usize;
    let offset = listing_offset(page.selected(), visible);

    let mut lines: Vec<Line> = Vec::with_capacity(visible);
    for (index, row) in page.rows().iter().enumerate().skip(offset).take(visible) {
        let is_selected = index == page.selected();
        lines.push(listing_line(
            row,
            is_selected,
            inner.width as usize,
            show_modified,
            theme,
        ));
    }
    frame.render_widget(Paragraph::new(lines), inner);
}

/// First visible row index: scroll just far enough to keep the selection
/// on screen.
fn listing_offset(selected: usize, visible: usize) -> usize {
    if visible == 0 {
        return selected;
    }
    selected.saturating_sub(visible - 1)
}

fn listing_line(
    row: &Row,
    is_selected: bool,
    width: usize,
    show_modified: bool,
    theme: &Theme,
) -> Line<'static> {
    let palette = &theme.palette;
    let glyphs = &theme.glyphs;

    let pointer = if is_selected { glyphs.selected } else { " " };
    let base_style = if is_selected {
        styles::selected_row(palette)
    } else {
        Style::default().fg(palette.text_primary)
    };

    let (icon, name, name_style, size_col, modified_col) = match row {
        Row::Parent(_) => (
            glyphs.parent,
            "..".to_string(),
            if is_selected {
                base_style
            } else {
                styles::directory_name(palette)
            },
            String::new(),
            String::new(),
        ),
        Row::Entry(entry) => entry_columns(entry, is_selected, base_style, theme),
    };

    // pointer(1) + space + icon(2) then name fills what the fixed columns
    // leave over.
    let mut fixed = 4 + SIZE_COLUMN_WIDTH + 2;
    if show_modified {
        fixed += MODIFIED_COLUMN_WIDTH + 2;
    }
    let name_width = width.saturating_sub(fixed).max(8);

    let mut spans = vec![
        Span::styled(format!("{pointer} "), base_style),
        Span::styled(format!("{icon:<2}"), base_style),
        Span::styled(pad_to_width(&name, name_width), name_style),
        Span::styled(
            format!("  {size_col:>SIZE_COLUMN_WIDTH$}"),
            if is_selected {
                base_style
            } else {
                Style::default().fg(palette.text_secondary)
            },
        ),
    ];
    if show_modified {
        spans.push(Span::styled(
            format!("  {modified_col:>MODIFIED_COLUMN_WIDTH$}"),
            if is_selected {
                base_style
            } else {
                Style::default().fg(palette.text_muted)
            },
        ));
    }
    Line::from(spans)
}

fn entry_columns(
    entry: &FileEntry,
    is_selected: bool,
    base_style: Style,
    theme: &Theme,
) -> (&'static str, String, Style, String, String) {
    let palette = &theme.palette;
    let glyphs = &theme.glyphs;
    if entry.is_dir {
        (
            glyphs.directory,
            entry.name.clone(),
            if is_selected {
                base_style
            } else {
                styles::directory_name(palette)
            },
            String::new(),
            entry.modified_display.clone(),
        )
    } else {
        (
            glyphs.for_kind(entry.kind),
            entry.name.clone(),
            base_style,
            entry.size_display.clone(),
            entry.modified_display.clone(),
        )
    }
}

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect, theme: &Theme) {
    let palette = &theme.palette;
    let glyphs = &theme.glyphs;

    if let Some((text, is_error)) = app.view().status() {
        let (prefix, color) = if is_error {
            ("Error: ", palette.error)
        } else {
            ("", palette.success)
        };
        let status = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(format!("{prefix}{text}"), Style::default().fg(color)),
        ]));
        frame.render_widget(status, area);
        return;
    }

    if app.is_busy() {
        let status = Paragraph::new(Line::from(vec![
            Span::raw(" "),
            Span::styled(
                format!("{} Working...", glyphs.spinner_frame(app.tick_count())),
                Style::default().fg(palette.primary),
            ),
        ]));
        frame.render_widget(status, area);
        return;
    }

    let hints = Line::from(vec![
        Span::raw(" "),
        Span::styled("↑↓", styles::key_highlight(palette)),
        Span::styled(" move  ", styles::key_hint(palette)),
        Span::styled("Enter", styles::key_highlight(palette)),
        Span::styled(" open  ", styles::key_hint(palette)),
        Span::styled("d", styles::key_highlight(palette)),
        Span::styled(" delete  ", styles::key_hint(palette)),
        Span::styled("b", styles::key_highlight(palette)),
        Span::styled(" back  ", styles::key_hint(palette)),
        Span::styled("r", styles::key_highlight(palette)),
        Span::styled(" refresh  ", styles::key_hint(palette)),
        Span::styled("q", styles::key_highlight(palette)),
        Span::styled(" quit", styles::key_hint(palette)),
    ]);
    frame.render_widget(Paragraph::new(hints), area);
}

fn draw_preview(frame: &mut Frame, pane: &PreviewPane, viewport: Rect, theme: &Theme) {
    let palette = &theme.palette;

    let width = (u32::from(viewport.width) * 4 / 5) as u16;
    let height = (u32::from(viewport.height) * 4 / 5) as u16;
    let rect = centered_rect(viewport, width.max(24), height.max(8));
    frame.render_widget(Clear, rect);

    let title = truncate_with_ellipsis(pane.title(), rect.width.saturating_sub(4) as usize);
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.bg_panel))
        .padding(Padding::uniform(1))
        .title(Line::from(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )))
        .title_bottom(
            Line::from(vec![
                Span::styled("↑↓", styles::key_highlight(palette)),
                Span::styled(" scroll  ", styles::key_hint(palette)),
                Span::styled("Esc", styles::key_highlight(palette)),
                Span::styled(" close ", styles::key_hint(palette)),
            ])
            .alignment(Alignment::Right),
        );

    let body = match pane.body() {
        PreviewBody::Text { content, truncated } => {
            if *truncated {
                block = block.title_bottom(Line::from(Span::styled(
                    " truncated ",
                    Style::default().fg(palette.warning),
                )));
            }
            Paragraph::new(
                content
                    .lines()
                    .map(|line| {
                        Line::from(Span::styled(
                            line.to_string(),
                            Style::default().fg(palette.text_primary),
                        ))
                    })
                    .collect::<Vec<_>>(),
            )
            .scroll((pane.scroll() as u16, 0))
        }
        PreviewBody::InfoCard { kind, size_display } => Paragraph::new(vec![
            Line::from(vec![
                Span::styled("Type  ", Style::default().fg(palette.text_muted)),
                Span::styled(kind.label(), Style::default().fg(palette.text_primary)),
            ]),
            Line::from(vec![
                Span::styled("Size  ", Style::default().fg(palette.text_muted)),
                Span::styled(
                    size_display.clone(),
                    Style::default().fg(palette.text_primary),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                "No terminal rendering for this type.",
                Style::default().fg(palette.text_muted),
            )),
        ]),
    };

    frame.render_widget(body.block(block), rect);
}

fn draw_confirm(frame: &mut Frame, name: &str, is_dir: bool, viewport: Rect, theme: &Theme) {
    let palette = &theme.palette;

    let rect = centered_rect(viewport, 46.min(viewport.width.saturating_sub(2)), 7);
    frame.render_widget(Clear, rect);

    let target = truncate_with_ellipsis(name, rect.width.saturating_sub(14) as usize);
    let detail = if is_dir {
        "The folder and everything in it will go."
    } else {
        "The file will be removed from the vault."
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("Delete ", Style::default().fg(palette.text_primary)),
            Span::styled(
                target,
                Style::default()
                    .fg(palette.error)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("?", Style::default().fg(palette.text_primary)),
        ]),
        Line::from(Span::styled(detail, Style::default().fg(palette.text_muted))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", styles::key_highlight(palette)),
            Span::styled(" delete  ", styles::key_hint(palette)),
            Span::styled("Esc", styles::key_highlight(palette)),
            Span::styled(" keep", styles::key_hint(palette)),
        ]),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.error))
        .style(Style::default().bg(palette.bg_panel))
        .padding(Padding::horizontal(1))
        .title(Line::from(Span::styled(
            " Confirm ",
            Style::default()
                .fg(palette.text_primary)
                .add_modifier(Modifier::BOLD),
        )));

    frame.render_widget(Paragraph::new(lines).block(block), rect);
}

fn draw_busy_overlay(
    frame: &mut Frame,
    tick: usize,
    viewport: Rect,
    palette: &Palette,
    glyphs: &Glyphs,
) {
    let rect = centered_rect(viewport, 20.min(viewport.width), 3);
    frame.render_widget(Clear, rect);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.primary))
        .style(Style::default().bg(palette.bg_panel));
    let spinner = Paragraph::new(Line::from(vec![
        Span::styled(
            glyphs.spinner_frame(tick),
            Style::default().fg(palette.primary),
        ),
        Span::styled(" Working...", Style::default().fg(palette.text_secondary)),
    ]))
    .alignment(Alignment::Center)
    .block(block);
    frame.render_widget(spinner, rect);
}

/// Center a fixed-size rectangle in the viewport, clamped to fit.
fn centered_rect(viewport: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(viewport.width);
    let height = height.min(viewport.height);
    Rect {
        x: viewport.x + (viewport.width - width) / 2,
        y: viewport.y + (viewport.height - height) / 2,
        width,
        height,
    }
}

/// Pad with spaces or truncate with `…` to an exact display width.
fn pad_to_width(text: &str, width: usize) -> String {
    let current = text.width();
    if current <= width {
        let mut out = String::with_capacity(text.len() + width - current);
        out.push_str(text);
        out.push_str(&" ".repeat(width - current));
        return out;
    }
    let truncated = truncate_with_ellipsis(text, width);
    let pad = width.saturating_sub(truncated.width());
    format!("{truncated}{}", " ".repeat(pad))
}

fn truncate_with_ellipsis(raw: &str, max: usize) -> String {
    if raw.width() <= max {
        return raw.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in raw.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max.saturating_sub(1) {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
