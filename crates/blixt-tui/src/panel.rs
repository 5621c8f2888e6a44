//! The text side of the slideshow: step card, legend, and navigation bar.

use blixt_core::Phase;
use blixt_core::step::{FUN_FACT, STEP_COUNT};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

/// Slideshow heading.
pub const HEADING: &str = "Hur blir en blixt till?";

/// Label of the narration control.
pub fn narration_label(busy: bool) -> &'static str {
    if busy { "Läser upp..." } else { "Lyssna" }
}

/// Lines of the step card.
pub fn step_card_lines(phase: Phase, narrating: bool) -> Vec<Line<'static>> {
    let step = phase.step();
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", phase.to_string().to_uppercase()),
                Style::default().fg(Color::Black).bg(Color::Yellow).bold(),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", narration_label(narrating)),
                Style::default().fg(Color::LightBlue),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(step.title, Style::default().fg(Color::White).bold())),
        Line::from(""),
        Line::from(Span::styled(step.description, Style::default().bold())),
        Line::from(""),
    ];

    for paragraph in step.paragraphs() {
        lines.push(Line::from(Span::styled(paragraph, Style::default().fg(Color::Gray))));
        lines.push(Line::from(""));
    }

    if phase.is_final() {
        lines.push(Line::from(Span::styled(
            FUN_FACT,
            Style::default().fg(Color::LightRed),
        )));
    }
    lines
}

/// Lines of the symbol legend.
pub fn legend_lines() -> Vec<Line<'static>> {
    vec![Line::from(vec![
        Span::styled("● ", Style::default().fg(Color::LightBlue)),
        Span::raw("Positiv (+) Ispartikel   "),
        Span::styled("● ", Style::default().fg(Color::Yellow)),
        Span::raw("Negativ (-) Hagelkorn"),
    ])]
}

/// Previous / progress / next line under the scene.
pub fn nav_line(phase: Phase) -> Line<'static> {
    let enabled = Style::default().fg(Color::White);
    let disabled = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled(
        "← Föregående  ",
        if phase.is_first() { disabled } else { enabled },
    )];
    for i in 0..STEP_COUNT {
        let (mark, style) = if i == phase.index() {
            ("━━━ ", Style::default().fg(Color::Yellow))
        } else {
            ("━━ ", disabled)
        };
        spans.push(Span::styled(mark, style));
    }
    spans.push(Span::styled(
        " Nästa steg →",
        if phase.is_final() {
            disabled
        } else {
            Style::default().fg(Color::Yellow).bold()
        },
    ));
    Line::from(spans)
}

/// Draw the step card and legend into `area`.
pub fn draw_panel(frame: &mut Frame, area: Rect, phase: Phase, narrating: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(area);

    let card = Paragraph::new(step_card_lines(phase, narrating))
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(card, chunks[0]);

    let legend = Paragraph::new(legend_lines()).block(
        Block::default()
            .title(" Symbolförklaring ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(legend, chunks[1]);
}
