//! Layout helpers and popups.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Create a centered rectangle as a percentage of the given area.
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Lines of the keyboard help.
pub fn help_lines() -> Vec<Line<'static>> {
    vec![
        Line::from("Kortkommandon").style(Style::default().bold()),
        Line::from(""),
        Line::from("  ← / h       Föregående steg"),
        Line::from("  → / l       Nästa steg"),
        Line::from("  1-5         Gå till steg"),
        Line::from("  Space / n   Lyssna på steget"),
        Line::from(""),
        Line::from("  ?           Visa / dölj hjälpen"),
        Line::from("  q / Ctrl+C  Avsluta"),
    ]
}

/// Draw the help popup overlay.
pub fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(50, 50, frame.area());

    let popup = Paragraph::new(help_lines())
        .block(
            Block::default()
                .title(" Hjälp ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_is_inside_and_centered() {
        let outer = Rect::new(0, 0, 100, 40);
        let inner = centered_rect(50, 50, outer);
        assert_eq!(inner.width, 50);
        assert_eq!(inner.height, 20);
        assert_eq!(inner.x, 25);
        assert_eq!(inner.y, 10);
    }

    #[test]
    fn help_lists_every_key() {
        let text: String = help_lines()
            .iter()
            .flat_map(|l| l.spans.iter().map(|s| s.content.to_string()))
            .collect();
        for key in ["←", "→", "1-5", "Space", "?", "Ctrl+C"] {
            assert!(text.contains(key), "missing {key}");
        }
    }
}
