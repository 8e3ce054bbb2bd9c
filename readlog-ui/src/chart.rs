//! Rating trend chart rendered as inline SVG

use std::fmt::Write;

use readlog_common::stats::RatingTrend;

use crate::api::ui::escape_html;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 40.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 20.0;
const MARGIN_BOTTOM: f64 = 40.0;
const MAX_RATING: f64 = 10.0;

fn plot_width() -> f64 {
    WIDTH - MARGIN_LEFT - MARGIN_RIGHT
}

fn plot_height() -> f64 {
    HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
}

fn y_for(rating: f64) -> f64 {
    MARGIN_TOP + plot_height() * (1.0 - rating / MAX_RATING)
}

/// Horizontal position of each point
///
/// Linear in calendar days between the first and last point. When every
/// point falls on the same day they are spread evenly instead.
fn x_positions(trend: &RatingTrend) -> Vec<f64> {
    let points = &trend.points;
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Vec::new();
    };

    let span_days = (last.date - first.date).num_days();
    if span_days > 0 {
        points
            .iter()
            .map(|p| {
                let offset = (p.date - first.date).num_days() as f64;
                MARGIN_LEFT + plot_width() * offset / span_days as f64
            })
            .collect()
    } else if points.len() == 1 {
        vec![MARGIN_LEFT + plot_width() / 2.0]
    } else {
        let step = plot_width() / (points.len() - 1) as f64;
        (0..points.len())
            .map(|i| MARGIN_LEFT + step * i as f64)
            .collect()
    }
}

/// Render the trend as a standalone `<svg>` element
pub fn render_trend_svg(trend: &RatingTrend) -> String {
    let mut svg = String::new();
    let _ = write!(
        svg,
        r#"<svg class="trend-chart" viewBox="0 0 {w} {h}" width="{w}" height="{h}" role="img" aria-label="Rating trend">"#,
        w = WIDTH,
        h = HEIGHT
    );

    // Gridlines and y labels at 0, 2, ..., 10
    for rating in (0..=10).step_by(2) {
        let y = y_for(rating as f64);
        let _ = write!(
            svg,
            r#"<line class="grid" x1="{x1:.1}" y1="{y:.1}" x2="{x2:.1}" y2="{y:.1}"/><text class="axis-label" x="{lx:.1}" y="{ly:.1}" text-anchor="end">{rating}</text>"#,
            x1 = MARGIN_LEFT,
            x2 = WIDTH - MARGIN_RIGHT,
            lx = MARGIN_LEFT - 8.0,
            ly = y + 4.0,
        );
    }

    let xs = x_positions(trend);
    let coords: Vec<(f64, f64)> = xs
        .iter()
        .zip(&trend.points)
        .map(|(x, p)| (*x, y_for(p.rating as f64)))
        .collect();

    if coords.len() > 1 {
        let path = coords
            .iter()
            .map(|(x, y)| format!("{:.1},{:.1}", x, y))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(svg, r#"<polyline class="trend-line" fill="none" points="{}"/>"#, path);
    }

    for ((x, y), point) in coords.iter().zip(&trend.points) {
        let _ = write!(
            svg,
            r#"<circle class="trend-point" cx="{x:.1}" cy="{y:.1}" r="4"><title>{}: {}/10</title></circle>"#,
            escape_html(&point.date.to_string()),
            point.rating,
        );
    }

    // First and last date under the x axis
    let label_y = HEIGHT - MARGIN_BOTTOM + 20.0;
    if let (Some(first), Some(first_x)) = (trend.points.first(), xs.first()) {
        let _ = write!(
            svg,
            r#"<text class="axis-label" x="{first_x:.1}" y="{label_y:.1}" text-anchor="start">{}</text>"#,
            first.date
        );
    }
    if trend.points.len() > 1 {
        if let (Some(last), Some(last_x)) = (trend.points.last(), xs.last()) {
            let _ = write!(
                svg,
                r#"<text class="axis-label" x="{last_x:.1}" y="{label_y:.1}" text-anchor="end">{}</text>"#,
                last.date
            );
        }
    }

    svg.push_str("</svg>");
    svg
}
