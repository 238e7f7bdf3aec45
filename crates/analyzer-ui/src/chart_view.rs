//! Per-user chart pages for the Chat Analyzer TUI.
//!
//! Workout pages draw a presence timeline (every workout day at the same
//! height). Weight pages draw the weekly mean over week-start dates as line
//! segments with point markers.

use analyzer_core::models::{WeightEntry, WorkoutEntry};
use analyzer_core::time_utils::{axis_to_date, date_to_axis};
use analyzer_data::weights::weight_series_by_user;
use analyzer_data::workouts::workout_days_by_user;
use chrono::NaiveDate;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::components::Header;
use crate::themes::Theme;

/// Height of every workout marker.
const WORKOUT_LEVEL: f64 = 1.0;

// ── ChartPage ─────────────────────────────────────────────────────────────────

/// One chart for one user.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPage {
    Workouts {
        user: String,
        dates: Vec<NaiveDate>,
    },
    Weights {
        user: String,
        points: Vec<(NaiveDate, f64)>,
    },
}

impl ChartPage {
    /// All workout pages (users in order of first workout) followed by all
    /// weight pages (users in table order).
    pub fn build_pages(workouts: &[WorkoutEntry], weights: &[WeightEntry]) -> Vec<ChartPage> {
        let workout_pages = workout_days_by_user(workouts)
            .into_iter()
            .map(|(user, dates)| ChartPage::Workouts { user, dates });
        let weight_pages = weight_series_by_user(weights)
            .into_iter()
            .filter(|(_, points)| !points.is_empty())
            .map(|(user, points)| ChartPage::Weights { user, points });
        workout_pages.chain(weight_pages).collect()
    }

    pub fn user(&self) -> &str {
        match self {
            ChartPage::Workouts { user, .. } | ChartPage::Weights { user, .. } => user,
        }
    }

    pub fn title(&self) -> String {
        match self {
            ChartPage::Workouts { user, .. } => format!(" Workout Days for {} ", user),
            ChartPage::Weights { user, .. } => format!(" Average Weekly Weight for {} ", user),
        }
    }

    /// Chart coordinates: x is the date axis value, y the plotted value.
    pub fn points(&self) -> Vec<(f64, f64)> {
        match self {
            ChartPage::Workouts { dates, .. } => dates
                .iter()
                .map(|d| (date_to_axis(*d), WORKOUT_LEVEL))
                .collect(),
            ChartPage::Weights { points, .. } => points
                .iter()
                .map(|(d, w)| (date_to_axis(*d), *w))
                .collect(),
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render page `index` (0-based) of `total` into `area`.
pub fn render_chart_page(
    frame: &mut Frame,
    area: Rect,
    page: &ChartPage,
    index: usize,
    total: usize,
    theme: &Theme,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
        ])
        .split(area);

    let header = Header::new(page.user(), index + 1, total, theme);
    frame.render_widget(Paragraph::new(Text::from(header.to_lines())), chunks[0]);

    let points = page.points();
    let x_bounds = padded_bounds(points.iter().map(|p| p.0), 1.0);
    let x_axis = Axis::default()
        .title(Span::styled(x_axis_title(page), theme.label))
        .style(theme.chart_axis)
        .bounds(x_bounds)
        .labels(date_labels(x_bounds));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.chart_border)
        .title(Span::styled(page.title(), theme.chart_title));

    match page {
        ChartPage::Workouts { .. } => {
            let dataset = Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(theme.workout_marker)
                .data(&points);
            // Constant-height timeline; the y axis carries no labels.
            let y_axis = Axis::default()
                .style(theme.chart_axis)
                .bounds([0.0, 2.0 * WORKOUT_LEVEL]);
            let chart = Chart::new(vec![dataset])
                .block(block)
                .x_axis(x_axis)
                .y_axis(y_axis);
            frame.render_widget(chart, chunks[1]);
        }
        ChartPage::Weights { .. } => {
            let y_bounds = padded_bounds(points.iter().map(|p| p.1), 1.0);
            let line = Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(theme.weight_line)
                .data(&points);
            let markers = Dataset::default()
                .marker(Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(theme.weight_point)
                .data(&points);
            let y_axis = Axis::default()
                .title(Span::styled("Weight", theme.label))
                .style(theme.chart_axis)
                .bounds(y_bounds)
                .labels(value_labels(y_bounds));
            let chart = Chart::new(vec![line, markers])
                .block(block)
                .x_axis(x_axis)
                .y_axis(y_axis);
            frame.render_widget(chart, chunks[1]);
        }
    }

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "←/p previous · →/n/space next · q quit",
            theme.dim,
        ))),
        chunks[2],
    );
}

/// Placeholder shown when there is nothing to chart.
pub fn render_no_data(frame: &mut Frame, area: Rect, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("No workouts or weights found", theme.warning)),
        Line::from(""),
        Line::from(Span::styled(
            "Check the chat file, workout marker and weight pattern.",
            theme.dim,
        )),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text)).style(theme.text).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Chat Analyzer "),
        ),
        area,
    );
}

// ── Axis helpers ──────────────────────────────────────────────────────────────

fn x_axis_title(page: &ChartPage) -> &'static str {
    match page {
        ChartPage::Workouts { .. } => "Date",
        ChartPage::Weights { .. } => "Week Starting",
    }
}

/// `[min - pad, max + pad]` over `values`; `[0, 1]` when there are none.
fn padded_bounds(values: impl Iterator<Item = f64>, pad: f64) -> [f64; 2] {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min.is_finite() && max.is_finite() {
        [min - pad, max + pad]
    } else {
        [0.0, 1.0]
    }
}

/// Start, middle and end dates of the x range.
fn date_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    [bounds[0], mid, bounds[1]]
        .iter()
        .map(|v| {
            axis_to_date(*v)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default()
        })
        .collect()
}

fn value_labels(bounds: [f64; 2]) -> Vec<String> {
    let mid = (bounds[0] + bounds[1]) / 2.0;
    vec![
        format!("{:.1}", bounds[0]),
        format!("{:.1}", mid),
        format!("{:.1}", bounds[1]),
    ]
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn workout(user: &str, date: NaiveDate) -> WorkoutEntry {
        WorkoutEntry {
            user: user.to_string(),
            date,
            timestamp: date.and_hms_opt(7, 0, 0).unwrap(),
            message: "✅".to_string(),
        }
    }

    fn weight(user: &str, iso_year: i32, iso_week: u32, value: f64) -> WeightEntry {
        WeightEntry {
            user: user.to_string(),
            iso_year,
            iso_week,
            weight: value,
            samples: 1,
        }
    }

    fn rendered_text(page: &ChartPage) -> String {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_chart_page(frame, area, page, 0, 2, &theme);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    // ── build_pages ───────────────────────────────────────────────────────────

    #[test]
    fn test_build_pages_orders_workouts_then_weights() {
        let workouts = vec![
            workout("Sam", day(2024, 3, 4)),
            workout("Alex", day(2024, 3, 4)),
            workout("Sam", day(2024, 3, 6)),
        ];
        let weights = vec![weight("Alex", 2024, 10, 70.0), weight("Sam", 2024, 10, 90.0)];

        let pages = ChartPage::build_pages(&workouts, &weights);
        let summary: Vec<(bool, &str)> = pages
            .iter()
            .map(|p| (matches!(p, ChartPage::Workouts { .. }), p.user()))
            .collect();
        assert_eq!(
            summary,
            vec![(true, "Sam"), (true, "Alex"), (false, "Alex"), (false, "Sam")]
        );
    }

    #[test]
    fn test_build_pages_empty() {
        assert!(ChartPage::build_pages(&[], &[]).is_empty());
    }

    #[test]
    fn test_workout_points_share_one_height() {
        let page = ChartPage::Workouts {
            user: "Sam".to_string(),
            dates: vec![day(2024, 3, 4), day(2024, 3, 9)],
        };
        let points = page.points();
        assert_eq!(points.len(), 2);
        assert!(points.iter().all(|(_, y)| *y == WORKOUT_LEVEL));
        assert_eq!(points[1].0 - points[0].0, 5.0);
    }

    #[test]
    fn test_weight_points_follow_series() {
        let page = ChartPage::Weights {
            user: "Sam".to_string(),
            points: vec![(day(2024, 12, 30), 81.0), (day(2025, 1, 6), 80.2)],
        };
        let points = page.points();
        assert_eq!(points[0].1, 81.0);
        assert_eq!(points[1].0 - points[0].0, 7.0);
    }

    // ── Axis helpers ──────────────────────────────────────────────────────────

    #[test]
    fn test_padded_bounds() {
        assert_eq!(padded_bounds([3.0, 1.0, 2.0].into_iter(), 1.0), [0.0, 4.0]);
        assert_eq!(padded_bounds([5.0].into_iter(), 1.0), [4.0, 6.0]);
        assert_eq!(padded_bounds(std::iter::empty(), 1.0), [0.0, 1.0]);
    }

    #[test]
    fn test_date_labels_span_range() {
        let lo = date_to_axis(day(2024, 3, 1));
        let labels = date_labels([lo, lo + 10.0]);
        assert_eq!(labels, vec!["2024-03-01", "2024-03-06", "2024-03-11"]);
    }

    // ── Render ────────────────────────────────────────────────────────────────

    #[test]
    fn test_render_workout_page_shows_title_and_header() {
        let page = ChartPage::Workouts {
            user: "Sam".to_string(),
            dates: vec![day(2024, 3, 4), day(2024, 3, 6)],
        };
        let text = rendered_text(&page);
        assert!(text.contains("Workout Days for Sam"));
        assert!(text.contains("chart 1/2"));
    }

    #[test]
    fn test_render_weight_page_single_point_does_not_panic() {
        let page = ChartPage::Weights {
            user: "Alex".to_string(),
            points: vec![(day(2025, 1, 6), 82.5)],
        };
        let text = rendered_text(&page);
        assert!(text.contains("Average Weekly Weight for Alex"));
    }

    #[test]
    fn test_render_no_data_uses_text_style() {
        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::light();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_no_data(frame, area, &theme);
            })
            .unwrap();

        // First row inside the border is an empty line.
        let cell = &terminal.backend().buffer()[(1, 1)];
        assert_eq!(cell.fg, ratatui::style::Color::Black);
    }
}
