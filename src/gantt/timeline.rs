use std::ops::RangeInclusive;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::Task;

/// Pixels per day at zoom 1.0.
pub const BASE_PIXELS_PER_DAY: f32 = 30.0;
pub const MIN_ZOOM: f32 = 0.3;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 1.2;

/// Days of lead-in before the earliest start.
pub const LEAD_IN_DAYS: i64 = 7;
/// Days of trailing space after the latest due date.
pub const TRAILING_DAYS: i64 = 30;

/// Most ticks a single header pass will produce.
pub const MAX_HEADER_TICKS: usize = 2_000;

/// `date` moved by `days`, saturating at the representable calendar range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let step = Days::new(days.unsigned_abs());
    if days >= 0 {
        date.checked_add_days(step).unwrap_or(NaiveDate::MAX)
    } else {
        date.checked_sub_days(step).unwrap_or(NaiveDate::MIN)
    }
}

/// Header granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    Day,
    #[default]
    Week,
}

/// Zoom factor applied to [`BASE_PIXELS_PER_DAY`], always within
/// `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom(f32);

impl Default for Zoom {
    fn default() -> Self {
        Zoom(1.0)
    }
}

impl Zoom {
    /// Out-of-range and non-finite requests are clamped, never rejected.
    pub fn new(factor: f32) -> Self {
        if factor.is_nan() {
            return Zoom::default();
        }
        Zoom(factor.clamp(MIN_ZOOM, MAX_ZOOM))
    }

    pub fn factor(self) -> f32 {
        self.0
    }

    pub fn zoom_in(&mut self) {
        *self = Zoom::new(self.0 * ZOOM_STEP);
    }

    pub fn zoom_out(&mut self) {
        *self = Zoom::new(self.0 / ZOOM_STEP);
    }

    pub fn day_width(self) -> f32 {
        BASE_PIXELS_PER_DAY * self.0
    }
}

/// The visible date range of the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TimelineWindow {
    /// Window covering every task plus the lead-in and trailing buffers.
    ///
    /// The explicit bounds default to `today` when absent, so the current
    /// date is always inside the window.
    pub fn compute(
        tasks: &[Task],
        explicit_start: Option<NaiveDate>,
        explicit_end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Self {
        let anchor_start = explicit_start.unwrap_or(today);
        let anchor_end = explicit_end.unwrap_or(today);

        let start = tasks
            .iter()
            .filter_map(|t| t.start_date)
            .fold(anchor_start, NaiveDate::min);
        let end = tasks
            .iter()
            .filter_map(|t| t.due_date)
            .fold(anchor_end, NaiveDate::max);

        Self {
            start: add_days(start, -LEAD_IN_DAYS),
            end: add_days(end, TRAILING_DAYS),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

/// Shared date axis: a window and a day width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineAxis {
    pub window: TimelineWindow,
    /// Pixels per day (already scaled by zoom).
    pub day_width: f32,
}

impl TimelineAxis {
    pub fn new(window: TimelineWindow, zoom: Zoom) -> Self {
        Self {
            window,
            day_width: zoom.day_width(),
        }
    }

    /// Convert a date to an x-pixel offset from the window start.
    pub fn date_to_x(&self, date: NaiveDate) -> f32 {
        let days = (date - self.window.start).num_days() as f32;
        days * self.day_width
    }

    /// Convert an x-pixel offset back to the nearest date.
    pub fn x_to_date(&self, x: f32) -> NaiveDate {
        add_days(self.window.start, self.days_for_delta(x))
    }

    /// Whole days represented by a horizontal pixel delta.
    pub fn days_for_delta(&self, delta_x: f32) -> i64 {
        (delta_x / self.day_width).round() as i64
    }

    /// Total width in pixels for the window.
    pub fn total_width(&self) -> f32 {
        self.date_to_x(self.window.end)
    }

    /// X position of the "today" marker, if today is inside the window.
    pub fn today_marker(&self, today: NaiveDate) -> Option<f32> {
        self.window
            .contains(today)
            .then(|| self.date_to_x(today))
    }
}

/// A labelled vertical grid line in the timeline header.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderTick {
    pub date: NaiveDate,
    pub x: f32,
    pub label: String,
    /// Month caption shown above the tick, when it starts a new month.
    pub month_label: Option<String>,
    pub is_weekend: bool,
}

/// Grid ticks for the header at day or week granularity, limited to the
/// pixel range `visible` (plus one day either side) and to
/// [`MAX_HEADER_TICKS`].
pub fn header_ticks(
    axis: &TimelineAxis,
    mode: ViewMode,
    visible: RangeInclusive<f32>,
) -> Vec<HeaderTick> {
    let first = axis
        .x_to_date(*visible.start() - axis.day_width)
        .max(axis.window.start);
    let last = axis
        .x_to_date(*visible.end() + axis.day_width)
        .min(axis.window.end);

    let (mut date, step) = match mode {
        ViewMode::Day => (first, 1),
        ViewMode::Week => {
            let back = i64::from(first.weekday().num_days_from_monday());
            (add_days(first, -back), 7)
        }
    };

    let mut ticks = Vec::new();
    while date <= last && ticks.len() < MAX_HEADER_TICKS {
        let tick = match mode {
            ViewMode::Day => HeaderTick {
                date,
                x: axis.date_to_x(date),
                label: date.format("%d").to_string(),
                month_label: (date.day() == 1).then(|| date.format("%b %Y").to_string()),
                is_weekend: date.weekday().num_days_from_monday() >= 5,
            },
            ViewMode::Week => HeaderTick {
                date,
                x: axis.date_to_x(date),
                label: date.format("W%V").to_string(),
                month_label: (date.day() <= 7).then(|| date.format("%b %Y").to_string()),
                is_weekend: false,
            },
        };
        ticks.push(tick);

        let next = add_days(date, step);
        if next == date {
            break;
        }
        date = next;
    }

    ticks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Weekday};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_window_buffers_around_tasks() {
        let tasks = vec![
            Task::with_id("a", "A").dated(date(2024, 1, 1), date(2024, 1, 3)),
            Task::with_id("b", "B").dated(date(2024, 1, 3), date(2024, 1, 5)),
        ];
        let window = TimelineWindow::compute(&tasks, None, None, date(2024, 1, 2));
        assert_eq!(window.start, date(2023, 12, 25));
        assert_eq!(window.end, date(2024, 2, 4));
    }

    #[test]
    fn test_window_includes_today_and_explicit_bounds() {
        let tasks = vec![Task::with_id("a", "A").dated(date(2024, 5, 10), date(2024, 5, 12))];
        let window = TimelineWindow::compute(&tasks, None, None, date(2024, 6, 1));
        assert_eq!(window.end, date(2024, 7, 1));

        let window = TimelineWindow::compute(
            &tasks,
            Some(date(2024, 4, 1)),
            Some(date(2024, 5, 11)),
            date(2024, 5, 11),
        );
        assert_eq!(window.start, date(2024, 3, 25));
        assert_eq!(window.end, date(2024, 6, 11));
    }

    #[test]
    fn test_window_for_empty_tasks_centres_on_today() {
        let today = date(2024, 2, 29);
        let window = TimelineWindow::compute(&[], None, None, today);
        assert_eq!(window.start, today - Duration::days(LEAD_IN_DAYS));
        assert_eq!(window.end, today + Duration::days(TRAILING_DAYS));
        assert_eq!(window.days(), LEAD_IN_DAYS + TRAILING_DAYS);
    }

    #[test]
    fn test_zoom_is_clamped() {
        assert_eq!(Zoom::new(10.0).factor(), MAX_ZOOM);
        assert_eq!(Zoom::new(0.01).factor(), MIN_ZOOM);
        assert_eq!(Zoom::new(f32::NAN).factor(), 1.0);

        let mut zoom = Zoom::default();
        for _ in 0..50 {
            zoom.zoom_in();
        }
        assert_eq!(zoom.factor(), MAX_ZOOM);
        for _ in 0..50 {
            zoom.zoom_out();
        }
        assert_eq!(zoom.factor(), MIN_ZOOM);
    }

    #[test]
    fn test_zoom_step_is_multiplicative() {
        let mut zoom = Zoom::default();
        zoom.zoom_in();
        assert!((zoom.factor() - ZOOM_STEP).abs() < f32::EPSILON);
        assert!((zoom.day_width() - BASE_PIXELS_PER_DAY * ZOOM_STEP).abs() < 1e-4);
    }

    #[test]
    fn test_date_x_round_trip() {
        let window = TimelineWindow {
            start: date(2024, 1, 1),
            end: date(2024, 3, 1),
        };
        let axis = TimelineAxis::new(window, Zoom::default());
        assert_eq!(axis.date_to_x(date(2024, 1, 11)), 300.0);
        assert_eq!(axis.x_to_date(310.0), date(2024, 1, 11));
        assert_eq!(axis.days_for_delta(-44.0), -1);
    }

    #[test]
    fn test_today_marker_only_inside_window() {
        let window = TimelineWindow {
            start: date(2024, 1, 1),
            end: date(2024, 1, 31),
        };
        let axis = TimelineAxis::new(window, Zoom::default());
        assert_eq!(axis.today_marker(date(2024, 1, 2)), Some(30.0));
        assert_eq!(axis.today_marker(date(2024, 1, 31)), Some(900.0));
        assert_eq!(axis.today_marker(date(2024, 2, 1)), None);
        assert_eq!(axis.today_marker(date(2023, 12, 31)), None);
    }

    #[test]
    fn test_day_ticks_mark_month_starts() {
        let window = TimelineWindow {
            start: date(2024, 1, 30),
            end: date(2024, 2, 2),
        };
        let axis = TimelineAxis::new(window, Zoom::default());
        let ticks = header_ticks(&axis, ViewMode::Day, 0.0..=axis.total_width());
        assert_eq!(ticks.len(), 4);
        assert_eq!(ticks[2].date, date(2024, 2, 1));
        assert_eq!(ticks[2].month_label.as_deref(), Some("Feb 2024"));
        assert!(ticks[0].month_label.is_none());
        assert_eq!(ticks[1].x, 30.0);
    }

    #[test]
    fn test_week_ticks_align_to_monday() {
        let window = TimelineWindow {
            start: date(2024, 1, 3),
            end: date(2024, 1, 20),
        };
        let axis = TimelineAxis::new(window, Zoom::default());
        let ticks = header_ticks(&axis, ViewMode::Week, 0.0..=axis.total_width());
        assert!(ticks.iter().all(|t| t.date.weekday() == Weekday::Mon));
        assert_eq!(ticks[0].date, date(2024, 1, 1));
        assert_eq!(ticks[0].x, -60.0);
        assert_eq!(ticks[0].label, "W01");
        assert_eq!(ticks.len(), 3);
    }

    #[test]
    fn test_window_saturates_at_calendar_limits() {
        let late = NaiveDate::MAX - Duration::days(3);
        let early = NaiveDate::MIN + Duration::days(2);
        let tasks = vec![Task::with_id("a", "A").dated(early, late)];
        let window = TimelineWindow::compute(&tasks, None, None, date(2024, 1, 1));
        assert_eq!(window.start, NaiveDate::MIN);
        assert_eq!(window.end, NaiveDate::MAX);
    }

    #[test]
    fn test_add_days_saturates() {
        assert_eq!(add_days(date(2024, 1, 30), 2), date(2024, 2, 1));
        assert_eq!(add_days(date(2024, 1, 1), -1), date(2023, 12, 31));
        assert_eq!(add_days(NaiveDate::MAX, 1), NaiveDate::MAX);
        assert_eq!(add_days(NaiveDate::MIN, -1), NaiveDate::MIN);
        assert_eq!(add_days(date(2024, 1, 1), i64::MAX), NaiveDate::MAX);
        assert_eq!(add_days(date(2024, 1, 1), i64::MIN), NaiveDate::MIN);
    }

    #[test]
    fn test_ticks_cover_only_the_visible_range() {
        let window = TimelineWindow {
            start: date(2024, 1, 1),
            end: date(2024, 12, 31),
        };
        let axis = TimelineAxis::new(window, Zoom::default());
        let ticks = header_ticks(&axis, ViewMode::Day, 300.0..=600.0);
        assert_eq!(ticks.first().map(|t| t.date), Some(date(2024, 1, 10)));
        assert_eq!(ticks.last().map(|t| t.date), Some(date(2024, 1, 22)));
    }

    #[test]
    fn test_ticks_are_bounded_for_huge_windows() {
        let window = TimelineWindow {
            start: NaiveDate::MIN,
            end: NaiveDate::MAX,
        };
        let axis = TimelineAxis::new(window, Zoom::new(MIN_ZOOM));
        let ticks = header_ticks(&axis, ViewMode::Day, 0.0..=f32::MAX);
        assert_eq!(ticks.len(), MAX_HEADER_TICKS);

        let tail = header_ticks(&axis, ViewMode::Week, f32::MAX..=f32::MAX);
        assert!(tail.len() <= 2);
    }
}
