//! The storm scene, drawn on a braille canvas.
//!
//! Shapes are laid out in scene coordinates: 800 x 600 with y growing
//! downward and the ground at y = 500. The canvas has y growing upward, so
//! every point goes through [`to_canvas`] before it is drawn.

use blixt_core::geometry::{CANVAS_HEIGHT, CANVAS_WIDTH, GROUND_Y};
use blixt_core::{Phase, Point};
use blixt_simulation::{Charge, Storm, StrikeCategory};
use ratatui::prelude::*;
use ratatui::symbols::Marker;
use ratatui::widgets::canvas::{Canvas, Circle, Context, Line as CanvasLine};
use ratatui::widgets::{Block, Borders};

/// Cloud outline as quadratic curves: (start, control, end).
const CLOUD_CURVES: [(Point, Point, Point); 8] = [
    (Point::new(250.0, 250.0), Point::new(200.0, 250.0), Point::new(200.0, 200.0)),
    (Point::new(200.0, 200.0), Point::new(200.0, 150.0), Point::new(250.0, 150.0)),
    (Point::new(250.0, 150.0), Point::new(250.0, 100.0), Point::new(350.0, 100.0)),
    (Point::new(350.0, 100.0), Point::new(450.0, 100.0), Point::new(450.0, 150.0)),
    (Point::new(450.0, 150.0), Point::new(550.0, 150.0), Point::new(550.0, 200.0)),
    (Point::new(550.0, 200.0), Point::new(550.0, 250.0), Point::new(500.0, 250.0)),
    (Point::new(500.0, 250.0), Point::new(500.0, 300.0), Point::new(350.0, 300.0)),
    (Point::new(350.0, 300.0), Point::new(250.0, 300.0), Point::new(250.0, 250.0)),
];

const FREEZING_Y: f64 = 275.0;
const SCALE_X: f64 = 750.0;

const TREE: [Point; 4] = [
    Point::new(600.0, 500.0),
    Point::new(630.0, 500.0),
    Point::new(615.0, 430.0),
    Point::new(600.0, 500.0),
];

const HOUSE_WALLS: [Point; 5] = [
    Point::new(150.0, 500.0),
    Point::new(150.0, 450.0),
    Point::new(190.0, 450.0),
    Point::new(190.0, 500.0),
    Point::new(150.0, 500.0),
];

const HOUSE_ROOF: [Point; 4] = [
    Point::new(140.0, 450.0),
    Point::new(200.0, 450.0),
    Point::new(170.0, 420.0),
    Point::new(140.0, 450.0),
];

const HOUSE_DOOR: [Point; 4] = [
    Point::new(160.0, 500.0),
    Point::new(160.0, 475.0),
    Point::new(180.0, 475.0),
    Point::new(180.0, 500.0),
];

const SCALE_LABELS: [(f64, &str); 3] = [
    (60.0, "12 km (-50°C)"),
    (275.0, "5 km (-15°C)"),
    (490.0, "Mark (+25°C)"),
];

const GROUND_CHARGES: [Point; 3] = [
    Point::new(610.0, 470.0),
    Point::new(165.0, 440.0),
    Point::new(400.0, 490.0),
];

/// Scene point to canvas coordinates.
pub fn to_canvas(p: Point) -> (f64, f64) {
    (p.x, CANVAS_HEIGHT - p.y)
}

/// Sample a quadratic curve at `n + 1` evenly spaced parameters.
pub fn quad_curve(start: Point, control: Point, end: Point, n: usize) -> Vec<Point> {
    let n = n.max(1);
    (0..=n)
        .map(|i| {
            let t = i as f64 / n as f64;
            let a = start.lerp(control, t);
            let b = control.lerp(end, t);
            a.lerp(b, t)
        })
        .collect()
}

/// The closed cloud outline as a polyline.
pub fn cloud_outline() -> Vec<Point> {
    let mut points = Vec::new();
    for (start, control, end) in CLOUD_CURVES {
        let curve = quad_curve(start, control, end, 12);
        let skip = usize::from(!points.is_empty());
        points.extend(curve.into_iter().skip(skip));
    }
    points
}

/// Split a segment into dashes of `dash` length separated by `gap`.
pub fn dashed(from: Point, to: Point, dash: f64, gap: f64) -> Vec<(Point, Point)> {
    let length = ((to.x - from.x).powi(2) + (to.y - from.y).powi(2)).sqrt();
    if length == 0.0 || dash <= 0.0 {
        return vec![(from, to)];
    }
    let mut dashes = Vec::new();
    let mut at = 0.0;
    while at < length {
        let end = (at + dash).min(length);
        dashes.push((from.lerp(to, at / length), from.lerp(to, end / length)));
        at = end + gap.max(0.0);
    }
    dashes
}

/// Background tint standing in for the white flash of a strike.
pub fn flash_color(category: StrikeCategory) -> Color {
    let opacity = category.flash_opacity();
    if opacity >= 0.15 {
        Color::Gray
    } else if opacity >= 0.1 {
        Color::DarkGray
    } else {
        Color::Rgb(40, 48, 64)
    }
}

/// Colour of a particle's marker.
pub fn particle_color(charge: Charge, charged: bool) -> Color {
    match (charged, charge) {
        (false, _) => Color::Gray,
        (true, Charge::Positive) => Color::LightBlue,
        (true, Charge::Negative) => Color::Yellow,
    }
}

fn polyline(ctx: &mut Context<'_>, points: &[Point], color: Color) {
    for pair in points.windows(2) {
        segment(ctx, pair[0], pair[1], color);
    }
}

fn segment(ctx: &mut Context<'_>, from: Point, to: Point, color: Color) {
    let (x1, y1) = to_canvas(from);
    let (x2, y2) = to_canvas(to);
    ctx.draw(&CanvasLine::new(x1, y1, x2, y2, color));
}

fn text(ctx: &mut Context<'_>, at: Point, content: &str, style: Style) {
    let (x, y) = to_canvas(at);
    ctx.print(x, y, Span::styled(content.to_string(), style));
}

/// Draw the whole scene for the storm's current state.
pub fn draw_scene(frame: &mut Frame, area: Rect, storm: &Storm) {
    let phase = storm.phase();
    let striking = storm.strike();
    let background = striking.map_or(Color::Reset, |s| flash_color(s.category));

    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {phase} ")),
        )
        .marker(Marker::Braille)
        .background_color(background)
        .x_bounds([0.0, CANVAS_WIDTH])
        .y_bounds([0.0, CANVAS_HEIGHT])
        .paint(|ctx| {
            draw_landscape(ctx, phase);
            ctx.layer();
            draw_cloud(ctx, phase);
            ctx.layer();
            draw_particles(ctx, storm);
            if let Some(strike) = striking {
                ctx.layer();
                for (from, to) in strike.bolt.segments() {
                    segment(ctx, from, to, Color::White);
                }
            }
            if phase.is_final()
                && let Some(label) = storm.strike_label()
            {
                text(
                    ctx,
                    Point::new(24.0, 40.0),
                    &label.to_uppercase(),
                    Style::default().fg(Color::Yellow).bold(),
                );
            }
        });

    frame.render_widget(canvas, area);
}

fn draw_landscape(ctx: &mut Context<'_>, phase: Phase) {
    // Height scale
    for (from, to) in dashed(Point::new(SCALE_X, 50.0), Point::new(SCALE_X, GROUND_Y), 4.0, 4.0) {
        segment(ctx, from, to, Color::DarkGray);
    }
    for (y, label) in SCALE_LABELS {
        text(ctx, Point::new(620.0, y), label, Style::default().fg(Color::Gray));
    }

    // Ground and the gentle hill on it
    segment(ctx, Point::new(0.0, GROUND_Y), Point::new(CANVAS_WIDTH, GROUND_Y), Color::Green);
    let hill = quad_curve(
        Point::new(0.0, GROUND_Y),
        Point::new(400.0, 480.0),
        Point::new(CANVAS_WIDTH, GROUND_Y),
        16,
    );
    polyline(ctx, &hill, Color::Green);

    polyline(ctx, &TREE, Color::LightGreen);
    polyline(ctx, &HOUSE_WALLS, Color::Gray);
    polyline(ctx, &HOUSE_ROOF, Color::Red);
    polyline(ctx, &HOUSE_DOOR, Color::DarkGray);

    if phase.shows_updraft() {
        for x in [380.0, 420.0] {
            segment(ctx, Point::new(x, 450.0), Point::new(x, 350.0), Color::LightBlue);
            segment(ctx, Point::new(x - 5.0, 365.0), Point::new(x, 350.0), Color::LightBlue);
            segment(ctx, Point::new(x + 5.0, 365.0), Point::new(x, 350.0), Color::LightBlue);
        }
        text(
            ctx,
            Point::new(330.0, 475.0),
            "VARMA UPPVINDAR",
            Style::default().fg(Color::LightBlue).bold(),
        );
    }

    if phase.is_charged() {
        for at in GROUND_CHARGES {
            text(ctx, at, "+", Style::default().fg(Color::LightBlue).bold());
        }
    }
}

fn draw_cloud(ctx: &mut Context<'_>, phase: Phase) {
    let color = if phase.is_charged() {
        Color::DarkGray
    } else {
        Color::Gray
    };
    polyline(ctx, &cloud_outline(), color);

    if phase.shows_freezing_line() {
        for (from, to) in dashed(
            Point::new(200.0, FREEZING_Y),
            Point::new(600.0, FREEZING_Y),
            5.0,
            5.0,
        ) {
            segment(ctx, from, to, Color::Blue);
        }
        text(
            ctx,
            Point::new(210.0, 270.0),
            "FRYSGRÄNS (0°C)",
            Style::default().fg(Color::Blue),
        );
    }
}

fn draw_particles(ctx: &mut Context<'_>, storm: &Storm) {
    let charged = storm.phase().motion().shows_charge();
    for p in storm.particles().particles() {
        let color = particle_color(p.charge, charged);
        let (x, y) = to_canvas(p.position);
        if charged {
            ctx.print(
                x,
                y,
                Span::styled(p.charge.symbol().to_string(), Style::default().fg(color).bold()),
            );
        } else {
            ctx.draw(&Circle {
                x,
                y,
                radius: p.kind.radius(),
                color,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canvas_flips_y() {
        assert_eq!(to_canvas(Point::new(10.0, 0.0)), (10.0, 600.0));
        assert_eq!(to_canvas(Point::new(10.0, GROUND_Y)), (10.0, 100.0));
    }

    #[test]
    fn quad_curve_hits_endpoints() {
        let pts = quad_curve(
            Point::new(0.0, 0.0),
            Point::new(50.0, 100.0),
            Point::new(100.0, 0.0),
            4,
        );
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[0], Point::new(0.0, 0.0));
        assert_eq!(pts[4], Point::new(100.0, 0.0));
        // Midpoint of a symmetric curve sits halfway to the control point.
        assert_eq!(pts[2], Point::new(50.0, 50.0));
    }

    #[test]
    fn cloud_outline_is_closed_and_inside_cloud_box() {
        let outline = cloud_outline();
        assert_eq!(outline.first(), outline.last());
        for p in &outline {
            assert!((200.0..=550.0).contains(&p.x), "{p}");
            assert!((100.0..=300.0).contains(&p.y), "{p}");
        }
    }

    #[test]
    fn dashes_cover_the_segment() {
        let dashes = dashed(Point::new(0.0, 0.0), Point::new(0.0, 20.0), 4.0, 4.0);
        assert_eq!(dashes.len(), 3);
        assert_eq!(dashes[0], (Point::new(0.0, 0.0), Point::new(0.0, 4.0)));
        assert_eq!(dashes[2], (Point::new(0.0, 16.0), Point::new(0.0, 20.0)));
    }

    #[test]
    fn degenerate_dash_is_the_segment() {
        let p = Point::new(5.0, 5.0);
        assert_eq!(dashed(p, p, 4.0, 4.0), vec![(p, p)]);
    }

    #[test]
    fn ground_strikes_flash_brightest() {
        assert_eq!(flash_color(StrikeCategory::GroundTree), Color::Gray);
        assert_eq!(flash_color(StrikeCategory::Internal), Color::DarkGray);
        assert_ne!(flash_color(StrikeCategory::Air), Color::Gray);
    }

    #[test]
    fn particles_are_neutral_until_charged() {
        assert_eq!(particle_color(Charge::Positive, false), Color::Gray);
        assert_eq!(particle_color(Charge::Positive, true), Color::LightBlue);
        assert_eq!(particle_color(Charge::Negative, true), Color::Yellow);
    }
}
