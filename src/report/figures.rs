//! SVG figure rendering
//!
//! Self-contained SVG markup for the three report figures: the
//! prestige scatter with its fitted line, the network-education
//! histogram, and the mobility-rate bar chart. No plotting dependency;
//! the figures are assembled the same way the tables are.

use crate::stats::descriptive::GroupedRate;

const WIDTH: f64 = 640.0;
const HEIGHT: f64 = 420.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 50.0;

struct Frame {
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl Frame {
    fn x(&self, value: f64) -> f64 {
        let span = (self.x_max - self.x_min).max(f64::EPSILON);
        MARGIN_LEFT + (value - self.x_min) / span * (WIDTH - MARGIN_LEFT - MARGIN_RIGHT)
    }

    fn y(&self, value: f64) -> f64 {
        let span = (self.y_max - self.y_min).max(f64::EPSILON);
        HEIGHT - MARGIN_BOTTOM
            - (value - self.y_min) / span * (HEIGHT - MARGIN_TOP - MARGIN_BOTTOM)
    }
}

/// Escape text content for XML
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn svg_open() -> String {
    format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{WIDTH}\" height=\"{HEIGHT}\" \
         viewBox=\"0 0 {WIDTH} {HEIGHT}\" font-family=\"sans-serif\" font-size=\"12\">\n"
    )
}

fn title_and_axes(title: &str, x_label: &str, y_label: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"20\" text-anchor=\"middle\" font-size=\"15\">{}</text>\n",
        WIDTH / 2.0,
        escape(title)
    ));
    // Axis lines
    out.push_str(&format!(
        "  <line x1=\"{MARGIN_LEFT}\" y1=\"{MARGIN_TOP}\" x2=\"{MARGIN_LEFT}\" y2=\"{:.1}\" \
         stroke=\"black\"/>\n",
        HEIGHT - MARGIN_BOTTOM
    ));
    out.push_str(&format!(
        "  <line x1=\"{MARGIN_LEFT}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" stroke=\"black\"/>\n",
        HEIGHT - MARGIN_BOTTOM,
        WIDTH - MARGIN_RIGHT,
        HEIGHT - MARGIN_BOTTOM
    ));
    out.push_str(&format!(
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
        (MARGIN_LEFT + WIDTH - MARGIN_RIGHT) / 2.0,
        HEIGHT - 12.0,
        escape(x_label)
    ));
    out.push_str(&format!(
        "  <text x=\"16\" y=\"{:.1}\" text-anchor=\"middle\" \
         transform=\"rotate(-90 16 {:.1})\">{}</text>\n",
        (MARGIN_TOP + HEIGHT - MARGIN_BOTTOM) / 2.0,
        (MARGIN_TOP + HEIGHT - MARGIN_BOTTOM) / 2.0,
        escape(y_label)
    ));
    out
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values {
        min = min.min(v);
        max = max.max(v);
    }
    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }
    if min == max {
        // Degenerate span: pad so the frame stays drawable
        return (min - 0.5, max + 0.5);
    }
    (min, max)
}

/// Scatter of (x, y) points with a fitted regression line
#[must_use]
pub fn scatter_with_fit(
    points: &[(f64, f64)],
    intercept: f64,
    slope: f64,
    title: &str,
    x_label: &str,
    y_label: &str,
) -> String {
    let (x_min, x_max) = bounds(points.iter().map(|p| p.0));
    let (y_min, y_max) = bounds(points.iter().map(|p| p.1));
    let frame = Frame {
        x_min,
        x_max,
        y_min,
        y_max,
    };

    let mut out = svg_open();
    out.push_str(&title_and_axes(title, x_label, y_label));

    for &(x, y) in points {
        out.push_str(&format!(
            "  <circle cx=\"{:.1}\" cy=\"{:.1}\" r=\"2.5\" fill=\"steelblue\" \
             fill-opacity=\"0.5\"/>\n",
            frame.x(x),
            frame.y(y)
        ));
    }

    // Fitted line clipped to the observed y-range
    let line_y = |x: f64| (intercept + slope * x).clamp(y_min, y_max);
    out.push_str(&format!(
        "  <line x1=\"{:.1}\" y1=\"{:.1}\" x2=\"{:.1}\" y2=\"{:.1}\" \
         stroke=\"firebrick\" stroke-width=\"2\"/>\n",
        frame.x(x_min),
        frame.y(line_y(x_min)),
        frame.x(x_max),
        frame.y(line_y(x_max))
    ));

    out.push_str("</svg>\n");
    out
}

/// Histogram over equal-width bins
#[must_use]
pub fn histogram(values: &[f64], bins: usize, title: &str, x_label: &str) -> String {
    let bins = bins.max(1);
    let (min, max) = bounds(values.iter().copied());
    let bin_width = (max - min) / bins as f64;

    let mut counts = vec![0usize; bins];
    for &v in values {
        let mut bin = ((v - min) / bin_width) as usize;
        if bin >= bins {
            bin = bins - 1;
        }
        counts[bin] += 1;
    }

    let max_count = counts.iter().copied().max().unwrap_or(0).max(1);
    let frame = Frame {
        x_min: min,
        x_max: max,
        y_min: 0.0,
        y_max: max_count as f64,
    };

    let mut out = svg_open();
    out.push_str(&title_and_axes(title, x_label, "Respondents"));

    for (i, &count) in counts.iter().enumerate() {
        let x0 = frame.x(min + i as f64 * bin_width);
        let x1 = frame.x(min + (i + 1) as f64 * bin_width);
        let y = frame.y(count as f64);
        out.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" \
             fill=\"steelblue\" stroke=\"white\"/>\n",
            x0,
            y,
            (x1 - x0).max(0.0),
            (HEIGHT - MARGIN_BOTTOM - y).max(0.0)
        ));
    }

    out.push_str("</svg>\n");
    out
}

/// Bar chart of outcome rates per band
#[must_use]
pub fn rate_bars(rates: &[GroupedRate], title: &str, x_label: &str, y_label: &str) -> String {
    let frame = Frame {
        x_min: 0.0,
        x_max: rates.len().max(1) as f64,
        y_min: 0.0,
        y_max: 1.0,
    };

    let mut out = svg_open();
    out.push_str(&title_and_axes(title, x_label, y_label));

    for (i, rate) in rates.iter().enumerate() {
        let x0 = frame.x(i as f64 + 0.15);
        let x1 = frame.x(i as f64 + 0.85);
        let y = frame.y(rate.rate);
        out.push_str(&format!(
            "  <rect x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" \
             fill=\"seagreen\"/>\n",
            x0,
            y,
            (x1 - x0).max(0.0),
            (HEIGHT - MARGIN_BOTTOM - y).max(0.0)
        ));
        out.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{} (n={})</text>\n",
            frame.x(i as f64 + 0.5),
            HEIGHT - MARGIN_BOTTOM + 16.0,
            escape(&rate.label),
            rate.n
        ));
        out.push_str(&format!(
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{:.0}%</text>\n",
            frame.x(i as f64 + 0.5),
            y - 6.0,
            rate.rate * 100.0
        ));
    }

    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scatter_is_well_formed() {
        let svg = scatter_with_fit(
            &[(1.0, 2.0), (2.0, 4.0), (3.0, 5.0)],
            0.5,
            1.5,
            "Prestige",
            "Father",
            "Respondent",
        );

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>\n"));
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("firebrick"));
    }

    #[test]
    fn test_histogram_bins_cover_all_values() {
        let values: Vec<f64> = (0..100).map(f64::from).collect();
        let svg = histogram(&values, 10, "Education", "Years");

        assert_eq!(svg.matches("<rect").count(), 10);
    }

    #[test]
    fn test_histogram_degenerate_values() {
        let svg = histogram(&[5.0, 5.0, 5.0], 4, "Education", "Years");
        assert!(svg.contains("<rect"));
    }

    #[test]
    fn test_rate_bars_label_groups() {
        let rates = vec![
            GroupedRate {
                label: "<12".to_string(),
                n: 40,
                rate: 0.35,
            },
            GroupedRate {
                label: "16+".to_string(),
                n: 25,
                rate: 0.6,
            },
        ];
        let svg = rate_bars(&rates, "Mobility", "Network education", "Upwardly mobile");

        assert!(svg.contains("&lt;12"));
        assert!(svg.contains("(n=40)"));
        assert!(svg.contains("60%"));
    }
}
