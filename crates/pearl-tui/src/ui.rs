use pearl_core::{Block as MarkupBlock, DisplayContent, DisplayMarkup, Inline, Role};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::view::ChatView;

const BULLET: &str = "  • ";

/// Convert rendered reply markup into styled terminal lines
pub fn markup_lines(markup: &DisplayMarkup) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for block in markup.blocks() {
        match block {
            MarkupBlock::Line(inlines) => lines.push(Line::from(inline_spans(inlines))),
            MarkupBlock::List(items) => {
                for item in items {
                    let mut spans = vec![Span::styled(BULLET, Style::default().fg(Color::Yellow))];
                    spans.extend(inline_spans(item));
                    lines.push(Line::from(spans));
                }
            }
        }
    }

    lines
}

fn inline_spans(inlines: &[Inline]) -> Vec<Span<'static>> {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(text) => Span::raw(text.clone()),
            Inline::Strong(text) => {
                Span::styled(text.clone(), Style::default().add_modifier(Modifier::BOLD))
            }
        })
        .collect()
}

/// Plain text is drawn literally, one terminal line per source line
fn plain_lines(text: &str) -> Vec<Line<'static>> {
    text.lines().map(|line| Line::from(line.to_string())).collect()
}

fn chat_lines(view: &ChatView) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = Vec::new();

    for msg in &view.messages {
        let label = match msg.role {
            Role::User => Span::styled(
                "You:",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Role::Assistant => Span::styled(
                "PEARL:",
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
        };
        lines.push(Line::from(label));

        match &msg.content {
            DisplayContent::Plain(text) => lines.extend(plain_lines(text)),
            DisplayContent::Markup(markup) => lines.extend(markup_lines(markup)),
        }
        lines.push(Line::default());
    }

    if view.pending {
        lines.push(Line::from(Span::styled(
            "PEARL:",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )));
        // Animated ellipsis: cycles through ".", "..", "..."
        let dots = ".".repeat((view.animation_frame as usize) + 1);
        lines.push(Line::from(Span::styled(
            format!("Thinking{}", dots),
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )));
    }

    lines
}

/// Number of terminal rows `lines` occupy when wrapped to `width`
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = width.max(1) as usize;
    lines
        .iter()
        .map(|line| (line.width().max(1)).div_ceil(width) as u16)
        .fold(0u16, u16::saturating_add)
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, chat, input, footer
    let [header_area, chat_area, input_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);
    render_chat(&mut app.view, frame, chat_area);
    render_input(&app.view, frame, input_area);
    render_footer(&app.view, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" PEARL ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("model: {}", app.model()),
            Style::default().fg(Color::White),
        ),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_chat(view: &mut ChatView, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Chat ");

    let lines = if view.messages.is_empty() && !view.pending {
        vec![Line::from(Span::styled(
            "Ask a health question. PEARL does not diagnose; always consult a doctor.",
            Style::default().fg(Color::DarkGray),
        ))]
    } else {
        chat_lines(view)
    };

    // Inner size minus borders
    let inner_height = area.height.saturating_sub(2);
    let inner_width = area.width.saturating_sub(2);
    view.max_scroll = wrapped_height(&lines, inner_width).saturating_sub(inner_height);
    if view.follow_tail {
        view.scroll = view.max_scroll;
    } else {
        view.scroll = view.scroll.min(view.max_scroll);
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((view.scroll, 0));

    frame.render_widget(chat, area);
}

fn render_input(view: &ChatView, frame: &mut Frame, area: Rect) {
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Ask ");

    // Horizontal scrolling keeps the cursor visible
    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll_offset = if inner_width == 0 || view.cursor < inner_width {
        0
    } else {
        view.cursor - inner_width + 1
    };

    let visible_text: String = view
        .input
        .chars()
        .skip(scroll_offset)
        .take(inner_width)
        .collect();

    let input = Paragraph::new(visible_text)
        .style(Style::default().fg(Color::Cyan))
        .block(input_block);

    frame.render_widget(input, area);

    let cursor_x = (view.cursor - scroll_offset) as u16;
    frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
}

fn render_footer(view: &ChatView, frame: &mut Frame, area: Rect) {
    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let mut hints = vec![
        Span::styled(" Enter ", key_style),
        Span::styled(" send ", label_style),
    ];
    if view.pending {
        hints.extend([
            Span::styled(" Esc ", key_style),
            Span::styled(" cancel ", label_style),
        ]);
    }
    hints.extend([
        Span::styled(" PgUp/PgDn ", key_style),
        Span::styled(" scroll ", label_style),
        Span::styled(" Ctrl-C ", key_style),
        Span::styled(" quit ", label_style),
    ]);

    frame.render_widget(Paragraph::new(Line::from(hints)), area);
}
