//! SVG chart generation for the HTML report.
//!
//! Each chart is a standalone `<svg>` string sized by [`ChartStyle`].
//! Charts with no data render a placeholder message instead of axes.

use crate::analysis::{
    AgentPerformance, AgentQuality, MonthlyVolume, SatisfactionHeatmap, WeekdayDistribution,
};

const MARGIN_LEFT: f64 = 80.0;
const MARGIN_RIGHT: f64 = 24.0;
const MARGIN_TOP: f64 = 24.0;
const MARGIN_BOTTOM: f64 = 72.0;

const GRID_COLOR: &str = "#31333f";
const LINE_COLOR: &str = "#00b4d8";
const MARKER_COLOR: &str = "#90e0ef";

/// Plotly's default qualitative palette.
const PALETTE: [&str; 10] = [
    "#636efa", "#ef553b", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692", "#b6e880",
    "#ff97ff", "#fecb52",
];

/// Sequential teal scale, light to dark.
const TEAL: [(u8, u8, u8); 7] = [
    (209, 238, 234),
    (168, 219, 217),
    (133, 196, 201),
    (104, 171, 184),
    (79, 144, 166),
    (59, 115, 143),
    (42, 86, 116),
];

/// Diverging red-yellow-green scale, low to high.
const RD_YL_GN: [(u8, u8, u8); 11] = [
    (165, 0, 38),
    (215, 48, 39),
    (244, 109, 67),
    (253, 174, 97),
    (254, 224, 139),
    (255, 255, 191),
    (217, 239, 139),
    (166, 217, 106),
    (102, 189, 99),
    (26, 152, 80),
    (0, 104, 55),
];

/// Canvas size and colours shared by every chart.
#[derive(Debug, Clone)]
pub struct ChartStyle {
    pub width: u32,
    pub height: u32,
    pub background: String,
    pub foreground: String,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self::from(&crate::config::ReportConfig::default())
    }
}

impl From<&crate::config::ReportConfig> for ChartStyle {
    fn from(config: &crate::config::ReportConfig) -> Self {
        Self {
            width: config.chart_width.max(320),
            height: config.chart_height.max(200),
            background: config.background.clone(),
            foreground: config.foreground.clone(),
        }
    }
}

impl ChartStyle {
    fn plot_width(&self) -> f64 {
        f64::from(self.width) - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn plot_height(&self) -> f64 {
        f64::from(self.height) - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn plot_bottom(&self) -> f64 {
        MARGIN_TOP + self.plot_height()
    }
}

/// Mean QA score per agent as vertical bars, best first.
pub fn agent_quality_svg(ranking: &[AgentQuality], style: &ChartStyle) -> String {
    if ranking.is_empty() {
        return empty_svg(style);
    }

    let y_max = 100.0;
    let slot = style.plot_width() / ranking.len() as f64;
    let bar_width = slot * 0.7;
    let (v_min, v_max) = min_max(ranking.iter().map(|a| a.qa_score));

    let mut body = y_axis(style, 0.0, y_max, 5);
    for (i, agent) in ranking.iter().enumerate() {
        let x = MARGIN_LEFT + i as f64 * slot + (slot - bar_width) / 2.0;
        let bar_height = (agent.qa_score / y_max).clamp(0.0, 1.0) * style.plot_height();
        let y = style.plot_bottom() - bar_height;
        let color = color_scale(&TEAL, normalize(agent.qa_score, v_min, v_max));

        body.push_str(&format!(
            r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"><title>{}: {:.1}</title></rect>"##,
            x,
            y,
            bar_width,
            bar_height,
            color,
            escape_xml(&agent.agent_name),
            agent.qa_score
        ));
        body.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="{}">{:.1}</text>"##,
            x + bar_width / 2.0,
            y - 4.0,
            style.foreground,
            agent.qa_score
        ));
        body.push_str(&x_label(style, x + bar_width / 2.0, &agent.agent_name));
    }

    frame(style, &body, "Agent", "QA Score")
}

/// Mean QA (x) against mean error rate (y), one bubble per agent sized by calls.
pub fn error_vs_quality_svg(points: &[AgentPerformance], style: &ChartStyle) -> String {
    if points.is_empty() {
        return empty_svg(style);
    }

    let (x_min, x_max) = padded_range(points.iter().map(|p| p.qa_score));
    let (y_min, y_max) = padded_range(points.iter().map(|p| p.error_rate));
    let max_calls = points.iter().map(|p| p.calls).max().unwrap_or(1).max(1) as f64;

    let mut body = y_axis(style, y_min, y_max, 5);
    body.push_str(&x_axis_numeric(style, x_min, x_max, 5));

    for (i, point) in points.iter().enumerate() {
        let cx = MARGIN_LEFT + normalize(point.qa_score, x_min, x_max) * style.plot_width();
        let cy = style.plot_bottom() - normalize(point.error_rate, y_min, y_max) * style.plot_height();
        let r = 6.0 + 18.0 * (point.calls as f64 / max_calls).sqrt();
        let color = PALETTE[i % PALETTE.len()];

        body.push_str(&format!(
            r##"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" fill-opacity="0.75" stroke="{}" stroke-width="1"><title>{}: QA {:.1}, error {:.1}%, {} calls</title></circle>"##,
            cx,
            cy,
            r,
            color,
            color,
            escape_xml(&point.agent_name),
            point.qa_score,
            point.error_rate,
            point.calls
        ));
        body.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="11" fill="{}">{}</text>"##,
            cx,
            cy - r - 4.0,
            style.foreground,
            escape_xml(&point.agent_name)
        ));
    }

    frame(style, &body, "QA Score", "Error Rate (%)")
}

/// Total calls per month as a line with markers.
pub fn monthly_volume_svg(volume: &[MonthlyVolume], style: &ChartStyle) -> String {
    if volume.is_empty() {
        return empty_svg(style);
    }

    let peak = volume.iter().map(|m| m.calls).max().unwrap_or(0) as f64;
    let y_max = nice_ceiling(peak * 1.1);
    let slot = style.plot_width() / volume.len() as f64;

    let points: Vec<(f64, f64)> = volume
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let x = MARGIN_LEFT + (i as f64 + 0.5) * slot;
            let y = style.plot_bottom() - normalize(m.calls as f64, 0.0, y_max) * style.plot_height();
            (x, y)
        })
        .collect();

    let mut body = y_axis(style, 0.0, y_max, 5);
    let path = points
        .iter()
        .map(|(x, y)| format!("{:.1},{:.1}", x, y))
        .collect::<Vec<_>>()
        .join(" ");
    body.push_str(&format!(
        r##"<polyline points="{}" fill="none" stroke="{}" stroke-width="2.5"/>"##,
        path, LINE_COLOR
    ));

    for ((x, y), month) in points.iter().zip(volume) {
        body.push_str(&format!(
            r##"<circle cx="{:.1}" cy="{:.1}" r="4.5" fill="{}"><title>{}: {} calls</title></circle>"##,
            x, y, MARKER_COLOR, month.label, month.calls
        ));
        body.push_str(&x_label(style, *x, &month.label));
    }

    frame(style, &body, "Month", "Total Calls")
}

/// Shift x category grid coloured by mean satisfaction.
pub fn satisfaction_heatmap_svg(heatmap: &SatisfactionHeatmap, style: &ChartStyle) -> String {
    if heatmap.is_empty() {
        return empty_svg(style);
    }

    let (v_min, v_max) = min_max(heatmap.cells.iter().flatten().flatten().copied());
    let cell_width = style.plot_width() / heatmap.categories.len() as f64;
    let cell_height = style.plot_height() / heatmap.shifts.len() as f64;

    let mut body = String::new();
    for (row, shift) in heatmap.shifts.iter().enumerate() {
        let y = MARGIN_TOP + row as f64 * cell_height;
        body.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="end" dominant-baseline="middle" font-size="11" fill="{}">{}</text>"##,
            MARGIN_LEFT - 8.0,
            y + cell_height / 2.0,
            style.foreground,
            shift
        ));

        for (col, value) in heatmap.cells[row].iter().enumerate() {
            let x = MARGIN_LEFT + col as f64 * cell_width;
            match value {
                Some(v) => {
                    let rgb = interpolate(&RD_YL_GN, normalize(*v, v_min, v_max));
                    let text_color = if luminance(rgb) > 0.55 { "#111111" } else { "#ffffff" };
                    body.push_str(&format!(
                        r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" stroke="{}" stroke-width="1"/>"##,
                        x, y, cell_width, cell_height, to_hex(rgb), style.background
                    ));
                    body.push_str(&format!(
                        r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" dominant-baseline="middle" font-size="12" fill="{}">{:.1}</text>"##,
                        x + cell_width / 2.0,
                        y + cell_height / 2.0,
                        text_color,
                        v
                    ));
                }
                None => {
                    body.push_str(&format!(
                        r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="none" stroke="{}" stroke-width="1"/>"##,
                        x, y, cell_width, cell_height, GRID_COLOR
                    ));
                }
            }
        }
    }

    for (col, category) in heatmap.categories.iter().enumerate() {
        let x = MARGIN_LEFT + (col as f64 + 0.5) * cell_width;
        body.push_str(&x_label(style, x, category.label()));
    }

    body.push_str(&format!(
        r##"<text x="{:.1}" y="14" text-anchor="end" font-size="10" fill="{}">scale {:.1} to {:.1}</text>"##,
        f64::from(style.width) - MARGIN_RIGHT,
        style.foreground,
        v_min,
        v_max
    ));

    frame(style, &body, "Category", "Shift")
}

/// QA score box plot per weekday.
pub fn weekday_box_svg(distribution: &[WeekdayDistribution], style: &ChartStyle) -> String {
    if distribution.is_empty() {
        return empty_svg(style);
    }

    let lowest = distribution
        .iter()
        .map(|d| d.stats.min)
        .fold(f64::INFINITY, f64::min);
    let highest = distribution
        .iter()
        .map(|d| d.stats.max)
        .fold(f64::NEG_INFINITY, f64::max);
    let y_min = ((lowest - 5.0) / 10.0).floor().max(0.0) * 10.0;
    let y_max = (((highest + 5.0) / 10.0).ceil() * 10.0).min(100.0).max(y_min + 10.0);

    let slot = style.plot_width() / distribution.len() as f64;
    let box_width = slot * 0.5;
    let to_y = |v: f64| style.plot_bottom() - normalize(v, y_min, y_max) * style.plot_height();

    let mut body = y_axis(style, y_min, y_max, 6);
    for (i, day) in distribution.iter().enumerate() {
        let s = &day.stats;
        let center = MARGIN_LEFT + (i as f64 + 0.5) * slot;
        let left = center - box_width / 2.0;
        let color = PALETTE[i % PALETTE.len()];

        // Whiskers and caps.
        for (from, to) in [(s.q3, s.upper_whisker), (s.q1, s.lower_whisker)] {
            body.push_str(&format!(
                r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1.5"/>"##,
                center,
                to_y(from),
                center,
                to_y(to),
                color
            ));
            body.push_str(&format!(
                r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1.5"/>"##,
                center - box_width / 4.0,
                to_y(to),
                center + box_width / 4.0,
                to_y(to),
                color
            ));
        }

        body.push_str(&format!(
            r##"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}" fill-opacity="0.45" stroke="{}" stroke-width="1.5"><title>{}: n={}, median {:.1}, IQR {:.1} to {:.1}</title></rect>"##,
            left,
            to_y(s.q3),
            box_width,
            (to_y(s.q1) - to_y(s.q3)).max(1.0),
            color,
            color,
            day.weekday,
            s.count,
            s.median,
            s.q1,
            s.q3
        ));
        body.push_str(&format!(
            r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="2"/>"##,
            left,
            to_y(s.median),
            left + box_width,
            to_y(s.median),
            color
        ));

        for outlier in &s.outliers {
            body.push_str(&format!(
                r##"<circle cx="{:.1}" cy="{:.1}" r="3" fill="none" stroke="{}"/>"##,
                center,
                to_y(*outlier),
                color
            ));
        }

        body.push_str(&x_label(style, center, day.weekday));
    }

    frame(style, &body, "Day", "QA Score")
}

/// Wrap a chart body with the background, axes, and axis titles.
fn frame(style: &ChartStyle, body: &str, x_title: &str, y_title: &str) -> String {
    let width = f64::from(style.width);
    let height = f64::from(style.height);
    let mid_y = MARGIN_TOP + style.plot_height() / 2.0;

    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">
  <rect width="100%" height="100%" fill="{bg}"/>
  <line x1="{x0}" y1="{yb:.1}" x2="{xr:.1}" y2="{yb:.1}" stroke="{fg}" stroke-opacity="0.4"/>
  <line x1="{x0}" y1="{y0}" x2="{x0}" y2="{yb:.1}" stroke="{fg}" stroke-opacity="0.4"/>
  {body}
  <text x="{xm:.1}" y="{xt:.1}" text-anchor="middle" font-size="12" fill="{fg}">{x_title}</text>
  <text x="14" y="{my:.1}" text-anchor="middle" font-size="12" fill="{fg}" transform="rotate(-90, 14, {my:.1})">{y_title}</text>
</svg>"##,
        w = style.width,
        h = style.height,
        bg = style.background,
        fg = style.foreground,
        x0 = MARGIN_LEFT,
        y0 = MARGIN_TOP,
        xr = width - MARGIN_RIGHT,
        yb = style.plot_bottom(),
        xm = MARGIN_LEFT + style.plot_width() / 2.0,
        xt = height - 8.0,
        my = mid_y,
        body = body,
        x_title = x_title,
        y_title = y_title,
    )
}

/// Placeholder shown when the filters leave nothing to plot.
fn empty_svg(style: &ChartStyle) -> String {
    format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">
  <rect width="100%" height="100%" fill="{bg}"/>
  <text x="{cx:.1}" y="{cy:.1}" text-anchor="middle" font-size="14" fill="{fg}">No records match the current filters</text>
</svg>"##,
        w = style.width,
        h = style.height,
        bg = style.background,
        fg = style.foreground,
        cx = f64::from(style.width) / 2.0,
        cy = f64::from(style.height) / 2.0,
    )
}

/// Horizontal grid lines with value labels.
fn y_axis(style: &ChartStyle, min: f64, max: f64, ticks: usize) -> String {
    let mut out = String::new();
    for i in 0..=ticks {
        let value = min + (max - min) * i as f64 / ticks as f64;
        let y = style.plot_bottom() - style.plot_height() * i as f64 / ticks as f64;
        out.push_str(&format!(
            r##"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1"/>"##,
            MARGIN_LEFT,
            y,
            MARGIN_LEFT + style.plot_width(),
            y,
            GRID_COLOR
        ));
        out.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="end" dominant-baseline="middle" font-size="10" fill="{}">{}</text>"##,
            MARGIN_LEFT - 6.0,
            y,
            style.foreground,
            tick_label(value)
        ));
    }
    out
}

/// Tick labels along the x axis for a numeric scale.
fn x_axis_numeric(style: &ChartStyle, min: f64, max: f64, ticks: usize) -> String {
    let mut out = String::new();
    for i in 0..=ticks {
        let value = min + (max - min) * i as f64 / ticks as f64;
        let x = MARGIN_LEFT + style.plot_width() * i as f64 / ticks as f64;
        out.push_str(&format!(
            r##"<text x="{:.1}" y="{:.1}" text-anchor="middle" font-size="10" fill="{}">{}</text>"##,
            x,
            style.plot_bottom() + 16.0,
            style.foreground,
            tick_label(value)
        ));
    }
    out
}

/// Category label under the x axis, slanted to fit long names.
fn x_label(style: &ChartStyle, x: f64, label: &str) -> String {
    let y = style.plot_bottom() + 14.0;
    format!(
        r##"<text x="{:.1}" y="{:.1}" text-anchor="end" font-size="11" fill="{}" transform="rotate(-30, {:.1}, {:.1})">{}</text>"##,
        x,
        y,
        style.foreground,
        x,
        y,
        escape_xml(label)
    )
}

fn tick_label(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}

fn min_max<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    })
}

/// Data range widened by 15% on each side (at least one unit).
fn padded_range<I: Iterator<Item = f64>>(values: I) -> (f64, f64) {
    let (lo, hi) = min_max(values);
    let pad = ((hi - lo) * 0.15).max(1.0);
    (lo - pad, hi + pad)
}

/// Position of `v` within `[min, max]` as `0..=1`; `1.0` for a degenerate range.
fn normalize(v: f64, min: f64, max: f64) -> f64 {
    if !(max > min) {
        return 1.0;
    }
    ((v - min) / (max - min)).clamp(0.0, 1.0)
}

/// Round up to 1, 2, 2.5 or 5 times a power of ten.
pub(crate) fn nice_ceiling(value: f64) -> f64 {
    if value <= 0.0 {
        return 1.0;
    }
    let magnitude = 10f64.powf(value.log10().floor());
    let fraction = value / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 2.5 {
        2.5
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn interpolate(stops: &[(u8, u8, u8)], t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let scaled = t * (stops.len() - 1) as f64;
    let i = (scaled.floor() as usize).min(stops.len() - 2);
    let f = scaled - i as f64;
    let (a, b) = (stops[i], stops[i + 1]);
    let mix = |x: u8, y: u8| (f64::from(x) + (f64::from(y) - f64::from(x)) * f).round() as u8;
    (mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

fn to_hex((r, g, b): (u8, u8, u8)) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn color_scale(stops: &[(u8, u8, u8)], t: f64) -> String {
    to_hex(interpolate(stops, t))
}

/// Relative luminance in `0..=1`.
fn luminance((r, g, b): (u8, u8, u8)) -> f64 {
    (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0
}

/// Escape text for inclusion in SVG/HTML.
pub fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::stats::BoxStats;
    use crate::models::{CallCategory, Shift};

    fn quality(name: &str, score: f64) -> AgentQuality {
        AgentQuality {
            agent_id: name.to_uppercase(),
            agent_name: name.to_string(),
            qa_score: score,
        }
    }

    #[test]
    fn test_agent_quality_svg() {
        let style = ChartStyle::default();
        let svg = agent_quality_svg(&[quality("Ana", 81.3), quality("Bo", 70.0)], &style);

        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert_eq!(svg.matches("<rect x=").count(), 2);
        assert!(svg.contains(">81.3</text>"));
        assert!(svg.contains("#0e1117"));
    }

    #[test]
    fn test_empty_charts_show_placeholder() {
        let style = ChartStyle::default();
        let heatmap = SatisfactionHeatmap {
            shifts: vec![],
            categories: vec![],
            cells: vec![],
        };
        for svg in [
            agent_quality_svg(&[], &style),
            error_vs_quality_svg(&[], &style),
            monthly_volume_svg(&[], &style),
            satisfaction_heatmap_svg(&heatmap, &style),
            weekday_box_svg(&[], &style),
        ] {
            assert!(svg.contains("No records match the current filters"));
        }
    }

    #[test]
    fn test_scatter_escapes_names() {
        let points = vec![AgentPerformance {
            agent_id: "X1".to_string(),
            agent_name: "O'Neil <Lead>".to_string(),
            qa_score: 75.0,
            error_rate: 12.0,
            calls: 100,
        }];
        let svg = error_vs_quality_svg(&points, &ChartStyle::default());
        assert!(svg.contains("O&#39;Neil &lt;Lead&gt;"));
        assert!(!svg.contains("<Lead>"));
    }

    #[test]
    fn test_monthly_volume_svg_has_marker_per_month() {
        let volume = vec![
            MonthlyVolume { year: 2024, month: 1, label: "Jan".to_string(), calls: 400 },
            MonthlyVolume { year: 2024, month: 2, label: "Feb".to_string(), calls: 520 },
            MonthlyVolume { year: 2024, month: 3, label: "Mar".to_string(), calls: 480 },
        ];
        let svg = monthly_volume_svg(&volume, &ChartStyle::default());
        assert_eq!(svg.matches("<circle").count(), 3);
        assert!(svg.contains("<polyline"));
    }

    #[test]
    fn test_heatmap_svg_marks_missing_cells() {
        let heatmap = SatisfactionHeatmap {
            shifts: vec![Shift::Morning, Shift::Night],
            categories: vec![CallCategory::Renewal],
            cells: vec![vec![Some(7.5)], vec![None]],
        };
        let svg = satisfaction_heatmap_svg(&heatmap, &ChartStyle::default());
        assert!(svg.contains(">7.5</text>"));
        assert!(svg.contains(r#"fill="none""#));
        assert!(svg.contains(">Night</text>"));
    }

    #[test]
    fn test_weekday_box_svg() {
        let distribution = vec![WeekdayDistribution {
            weekday: "Mon",
            stats: BoxStats::from_values(&[50.0, 60.0, 61.0, 62.0, 63.0, 64.0, 100.0]).unwrap(),
        }];
        let svg = weekday_box_svg(&distribution, &ChartStyle::default());
        // Two outliers drawn as hollow circles.
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("n=7"));
    }

    #[test]
    fn test_nice_ceiling() {
        assert_eq!(nice_ceiling(0.0), 1.0);
        assert_eq!(nice_ceiling(87.0), 100.0);
        assert_eq!(nice_ceiling(1300.0), 2000.0);
        assert_eq!(nice_ceiling(2200.0), 2500.0);
        assert_eq!(nice_ceiling(4100.0), 5000.0);
    }

    #[test]
    fn test_interpolate_endpoints() {
        assert_eq!(interpolate(&RD_YL_GN, 0.0), (165, 0, 38));
        assert_eq!(interpolate(&RD_YL_GN, 1.0), (0, 104, 55));
        assert_eq!(color_scale(&TEAL, 0.0), "#d1eeea");
    }
}
