//! Chart widgets for computed report panels
//!
//! Everything here draws into a ratatui [`Buffer`], so the same code backs
//! the interactive dashboard and the plain-text printer.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Chart, Dataset, Gauge, GraphType, LegendPosition,
        Paragraph, Widget, Wrap,
    },
};

use crate::pipeline::{BoxSummary, Histogram};
use crate::report::{
    format_rate, BoxPanel, BoxPlot, HistogramPanel, OverallPanel, Panel, RatePanel,
};

/// Bar values are percentages scaled by this factor (hundredths of a percent)
const RATE_SCALE: f64 = 100.0;
const RATE_SCALE_MAX: u64 = 100 * 100;

/// Minimum width of one box plot before side-by-side plots are stacked
const MIN_BOX_PLOT_WIDTH: u16 = 40;

/// Draw a panel into `area`
pub fn render_panel(panel: &Panel, area: Rect, buf: &mut Buffer) {
    match panel {
        Panel::Overall(p) => render_overall(p, area, buf),
        Panel::Rate(p) => render_rate(p, area, buf),
        Panel::Histogram(p) => render_histogram(p, area, buf),
        Panel::Boxes(p) => render_boxes(p, area, buf),
    }
}

/// Height a panel wants when printed at `width` columns
pub fn preferred_height(panel: &Panel, width: u16) -> u16 {
    match panel {
        Panel::Overall(p) => {
            if p.stats.has_unknown() {
                8
            } else {
                7
            }
        }
        Panel::Rate(p) => {
            if p.spec.long_labels {
                let groups = u16::try_from(p.groups.len()).unwrap_or(u16::MAX);
                groups.saturating_mul(2).saturating_add(3).max(8)
            } else {
                18
            }
        }
        Panel::Histogram(_) => 20,
        Panel::Boxes(p) => {
            let heights = p.plots.iter().map(box_plot_height);
            if stack_box_plots(p.plots.len(), width) {
                heights.fold(0u16, u16::saturating_add)
            } else {
                heights.max().unwrap_or(6)
            }
        }
    }
}

fn render_overall(panel: &OverallPanel, area: Rect, buf: &mut Buffer) {
    let block = Block::bordered().title(Line::from(panel.heading).bold());
    let inner = block.inner(area);
    block.render(area, buf);

    let [text_area, gauge_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

    let stats = &panel.stats;
    let mut lines = vec![
        Line::from(vec![
            Span::raw("Attrition Rate: "),
            Span::styled(format_rate(panel.rate), Style::default().fg(Color::Yellow).bold()),
        ]),
        Line::from(vec![Span::styled(
            format!(
                "{} employees: {} left, {} stayed",
                panel.rows, stats.yes, stats.no
            ),
            Style::default().fg(Color::Gray),
        )]),
    ];
    if stats.has_unknown() {
        let values: Vec<&str> = stats.unknown_values.iter().map(String::as_str).collect();
        lines.push(Line::from(Span::styled(
            format!(
                "{} row(s) with unrecognised Attrition values treated as missing: {}",
                stats.unknown,
                values.join(", ")
            ),
            Style::default().fg(Color::Yellow),
        )));
    }
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(text_area, buf);

    if let Some(rate) = panel.rate {
        Gauge::default()
            .gauge_style(Style::default().fg(Color::Red).bg(Color::DarkGray))
            .ratio((rate / 100.0).clamp(0.0, 1.0))
            .label(format!("{rate:.2}%"))
            .render(gauge_area, buf);
    }
}

fn render_rate(panel: &RatePanel, area: Rect, buf: &mut Buffer) {
    let spec = &panel.spec;
    let block = Block::bordered()
        .title(Line::from(spec.title).bold().centered())
        .title_bottom(axis_caption(spec.x_label, panel.y_label));

    let colors = spec.palette.colors(panel.groups.len());
    let bars: Vec<Bar> = panel
        .groups
        .iter()
        .zip(colors)
        .filter_map(|(group, color)| {
            let rate = group.rate?;
            Some(
                Bar::default()
                    .value((rate * RATE_SCALE).round() as u64)
                    .text_value(format!("{rate:.1}%"))
                    .label(Line::from(group.key.clone()))
                    .style(Style::default().fg(color))
                    .value_style(Style::default().fg(Color::Black).bg(color).bold()),
            )
        })
        .collect();

    if bars.is_empty() {
        Paragraph::new("No attrition data for any group")
            .block(block)
            .render(area, buf);
        return;
    }

    let mut chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .max(RATE_SCALE_MAX)
        .bar_gap(1);

    if spec.long_labels {
        chart = chart.direction(Direction::Horizontal).bar_width(1);
    } else {
        let n = bars.len() as u16;
        let inner_width = area.width.saturating_sub(2);
        let width = (inner_width.saturating_sub(n) / n.max(1)).clamp(3, 24);
        chart = chart.bar_width(width);
    }

    chart.render(area, buf);
}

fn render_histogram(panel: &HistogramPanel, area: Rect, buf: &mut Buffer) {
    let outlines: Vec<Vec<(f64, f64)>> = panel
        .series
        .iter()
        .map(|s| step_outline(&s.histogram))
        .collect();

    let (lo, hi) = panel
        .series
        .iter()
        .map(|s| s.histogram.range())
        .reduce(|(a, b), (c, d)| (a.min(c), b.max(d)))
        .unwrap_or((0.0, 1.0));

    let y_top = panel
        .series
        .iter()
        .flat_map(|s| {
            std::iter::once(s.histogram.max_count() as f64).chain(s.kde.iter().map(|(_, y)| *y))
        })
        .fold(1.0_f64, f64::max)
        * 1.1;

    let mut datasets = Vec::with_capacity(panel.series.len() * 2);
    for (series, outline) in panel.series.iter().zip(&outlines) {
        let mut bars = Dataset::default()
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(series.color))
            .data(outline);
        if let Some(label) = series.label {
            bars = bars.name(label);
        }
        datasets.push(bars);

        if !series.kde.is_empty() {
            datasets.push(
                Dataset::default()
                    .marker(Marker::Braille)
                    .graph_type(GraphType::Line)
                    .style(Style::default().fg(series.color).add_modifier(Modifier::BOLD))
                    .data(&series.kde),
            );
        }
    }

    Chart::new(datasets)
        .block(Block::bordered().title(Line::from(panel.title).bold().centered()))
        .x_axis(
            Axis::default()
                .title(panel.x_label)
                .style(Style::default().fg(Color::Gray))
                .bounds([lo, hi])
                .labels(axis_labels(lo, hi)),
        )
        .y_axis(
            Axis::default()
                .title(panel.y_label)
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, y_top])
                .labels(axis_labels(0.0, y_top)),
        )
        .legend_position(Some(LegendPosition::TopRight))
        .hidden_legend_constraints((Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)))
        .render(area, buf);
}

fn render_boxes(panel: &BoxPanel, area: Rect, buf: &mut Buffer) {
    let n = panel.plots.len();
    if n == 0 {
        return;
    }

    let direction = if stack_box_plots(n, area.width) {
        Direction::Vertical
    } else {
        Direction::Horizontal
    };
    let areas = Layout::default()
        .direction(direction)
        .constraints(vec![Constraint::Ratio(1, n as u32); n])
        .split(area);

    for (plot, plot_area) in panel.plots.iter().zip(areas.iter()) {
        BoxPlotView { plot }.render(*plot_area, buf);
    }
}

fn stack_box_plots(n: usize, width: u16) -> bool {
    n > 1 && width < MIN_BOX_PLOT_WIDTH * n as u16
}

fn box_plot_height(plot: &BoxPlot) -> u16 {
    let boxes = u16::try_from(plot.boxes.len()).unwrap_or(u16::MAX);
    boxes.saturating_mul(2).saturating_add(4)
}

/// Horizontal box-and-whisker plot, one row per category
struct BoxPlotView<'a> {
    plot: &'a BoxPlot,
}

impl Widget for BoxPlotView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let plot = self.plot;
        let block = Block::bordered()
            .title(Line::from(plot.title).bold().centered())
            .title_bottom(axis_caption(plot.y_label, plot.x_label));
        let inner = block.inner(area);
        block.render(area, buf);

        if plot.boxes.is_empty() {
            Paragraph::new("No data").render(inner, buf);
            return;
        }

        let labels: Vec<String> = plot
            .boxes
            .iter()
            .map(|b| format!("{} (n={})", b.category, b.summary.count))
            .collect();
        let label_width = labels
            .iter()
            .map(|l| l.chars().count())
            .max()
            .unwrap_or(1)
            .min(u16::MAX as usize) as u16;
        if inner.width < label_width + 8 || inner.height < 2 {
            return;
        }

        let plot_x = inner.x + label_width + 1;
        let plot_width = inner.width - label_width - 1;
        let axis_y = inner.bottom() - 1;

        let (mut lo, mut hi) = plot
            .boxes
            .iter()
            .map(|b| (b.summary.min, b.summary.max))
            .reduce(|(a, b), (c, d)| (a.min(c), b.max(d)))
            .unwrap_or((0.0, 1.0));
        if hi <= lo {
            lo -= 0.5;
            hi += 0.5;
        }

        let rows = axis_y - inner.y;
        let spacing = if rows >= plot.boxes.len() as u16 * 2 { 2 } else { 1 };
        let colors = plot.palette.colors(plot.boxes.len());
        let dim = Style::default().fg(Color::DarkGray);

        for (i, ((cat_box, label), color)) in plot.boxes.iter().zip(&labels).zip(colors).enumerate() {
            let y = inner.y + i as u16 * spacing;
            if y >= axis_y {
                break;
            }
            buf.set_string(
                inner.x,
                y,
                format!("{:>width$}", label, width = label_width as usize),
                Style::default().fg(Color::Gray),
            );
            buf.set_string(plot_x - 1, y, "│", dim);
            draw_box(buf, plot_x, y, plot_width, (lo, hi), &cat_box.summary, color);
        }

        buf.set_string(plot_x - 1, axis_y, "└", dim);
        buf.set_string(plot_x, axis_y, "─".repeat(plot_width as usize), dim);
        for (i, tick) in axis_labels(lo, hi).into_iter().enumerate() {
            let text = tick.content.to_string();
            let len = text.chars().count() as u16;
            let x = match i {
                0 => plot_x,
                1 => plot_x + (plot_width / 2).saturating_sub(len / 2),
                _ => plot_x + plot_width.saturating_sub(len),
            };
            buf.set_string(x, axis_y, text, Style::default().fg(Color::Gray));
        }
    }
}

fn draw_box(
    buf: &mut Buffer,
    x0: u16,
    y: u16,
    width: u16,
    (lo, hi): (f64, f64),
    summary: &BoxSummary,
    color: Color,
) {
    let last = width.saturating_sub(1);
    let pos = |v: f64| -> u16 {
        let t = ((v - lo) / (hi - lo)).clamp(0.0, 1.0);
        x0 + (t * last as f64).round() as u16
    };

    let whisker = Style::default().fg(Color::Gray);
    let (wl, q1, median, q3, wh) = (
        pos(summary.whisker_low),
        pos(summary.q1),
        pos(summary.median),
        pos(summary.q3),
        pos(summary.whisker_high),
    );

    for x in wl..=wh {
        buf.set_string(x, y, "─", whisker);
    }
    buf.set_string(wl, y, "├", whisker);
    buf.set_string(wh, y, "┤", whisker);
    for x in q1..=q3 {
        buf.set_string(x, y, "█", Style::default().fg(color));
    }
    buf.set_string(
        median,
        y,
        "┃",
        Style::default().fg(Color::White).bg(color).bold(),
    );

    if summary.min < summary.whisker_low {
        buf.set_string(pos(summary.min), y, "•", whisker);
    }
    if summary.max > summary.whisker_high {
        buf.set_string(pos(summary.max), y, "•", whisker);
    }
}

/// Outline of a histogram as a step line through the bin tops
fn step_outline(histogram: &Histogram) -> Vec<(f64, f64)> {
    let mut points = Vec::with_capacity(histogram.bins() * 2 + 2);
    let edges = &histogram.edges;
    points.push((edges[0], 0.0));
    for (i, &count) in histogram.counts.iter().enumerate() {
        points.push((edges[i], count as f64));
        points.push((edges[i + 1], count as f64));
    }
    points.push((edges[edges.len() - 1], 0.0));
    points
}

fn axis_labels(lo: f64, hi: f64) -> Vec<Span<'static>> {
    [lo, (lo + hi) / 2.0, hi]
        .into_iter()
        .map(|v| Span::raw(format_tick(v)))
        .collect()
}

fn format_tick(v: f64) -> String {
    if v.abs() >= 100.0 || v.fract() == 0.0 {
        format!("{v:.0}")
    } else {
        format!("{v:.1}")
    }
}

fn axis_caption(x_label: &str, y_label: &str) -> Line<'static> {
    Line::from(format!("{x_label} · {y_label}")).centered().dim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::plain::buffer_to_text;
    use crate::report::{BlockSpec, RatePanel, REPORT_BLOCKS};
    use crate::pipeline::GroupRate;

    fn rate_panel(long_labels: bool) -> RatePanel {
        let BlockSpec::Rate(mut spec) = REPORT_BLOCKS[1] else {
            panic!("Expected department rate block");
        };
        spec.long_labels = long_labels;
        RatePanel {
            spec,
            y_label: "Attrition Rate (%)",
            groups: vec![
                GroupRate {
                    key: "Sales".to_string(),
                    rows: 2,
                    known: 2,
                    rate: Some(50.0),
                },
                GroupRate {
                    key: "HR".to_string(),
                    rows: 1,
                    known: 1,
                    rate: Some(0.0),
                },
                GroupRate {
                    key: "Unknown".to_string(),
                    rows: 1,
                    known: 0,
                    rate: None,
                },
            ],
        }
    }

    fn render(panel: &Panel, width: u16) -> String {
        let area = Rect::new(0, 0, width, preferred_height(panel, width));
        let mut buf = Buffer::empty(area);
        render_panel(panel, area, &mut buf);
        buffer_to_text(&buf)
    }

    #[test]
    fn test_rate_chart_shows_title_and_values() {
        let text = render(&Panel::Rate(rate_panel(true)), 80);
        assert!(text.contains("Attrition Rate by Department"));
        assert!(text.contains("Sales"));
        assert!(text.contains("50.0%"));
        assert!(!text.contains("Unknown"), "groups without a rate are not drawn");
    }

    #[test]
    fn test_rate_chart_vertical_layout() {
        let text = render(&Panel::Rate(rate_panel(false)), 80);
        assert!(text.contains("50.0%"));
    }

    #[test]
    fn test_step_outline_shape() {
        let hist = Histogram::new(&[0.0, 1.0, 1.0], 2);
        let points = step_outline(&hist);
        assert_eq!(points.len(), 6);
        assert_eq!(points[0], (0.0, 0.0));
        assert_eq!(points[1], (0.0, 1.0));
        assert_eq!(points[4], (1.0, 2.0));
        assert_eq!(points[5], (1.0, 0.0));
    }

    #[test]
    fn test_format_tick() {
        assert_eq!(format_tick(0.0), "0");
        assert_eq!(format_tick(0.5), "0.5");
        assert_eq!(format_tick(19999.4), "19999");
    }

    fn box_panel(categories: &[&str]) -> Panel {
        let summary = BoxSummary::from_values(&[0.0, 0.0, 1.0, 1.0]).unwrap();
        Panel::Boxes(BoxPanel {
            heading: "Work-Life Balance vs. Attrition",
            plots: vec![BoxPlot {
                title: "Work-Life Balance vs. Attrition",
                x_label: "Work-Life Balance",
                y_label: "Attrition",
                palette: crate::report::Palette::Coolwarm,
                boxes: categories
                    .iter()
                    .map(|c| crate::pipeline::CategoryBox {
                        category: c.to_string(),
                        summary,
                    })
                    .collect(),
            }],
        })
    }

    #[test]
    fn test_preferred_height_many_groups() {
        let mut panel = rate_panel(true);
        let group = panel.groups[0].clone();
        panel.groups = vec![group; 40_000];
        assert_eq!(preferred_height(&Panel::Rate(panel), 80), u16::MAX);

        let keys: Vec<String> = (0..40_000).map(|i| i.to_string()).collect();
        let keys: Vec<&str> = keys.iter().map(String::as_str).collect();
        assert_eq!(preferred_height(&box_panel(&keys), 80), u16::MAX);
    }

    #[test]
    fn test_box_labels_measured_in_chars() {
        let text = render(&box_panel(&["Überstunden", "HR"]), 60);
        let line = text
            .lines()
            .find(|line| line.contains("Überstunden (n=4)"))
            .unwrap();
        // Widest label starts right after the border and touches the axis
        let label: String = line.chars().skip(1).take(17).collect();
        assert_eq!(label, "Überstunden (n=4)");
        assert_eq!(line.chars().nth(18), Some('│'));
    }

    #[test]
    fn test_stack_box_plots() {
        assert!(!stack_box_plots(1, 20));
        assert!(stack_box_plots(3, 100));
        assert!(!stack_box_plots(3, 150));
    }
}
