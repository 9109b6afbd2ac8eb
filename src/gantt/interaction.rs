//! Chart view state and the pointer-driven drag state machine.
//!
//! `ChartState` is owned by the caller and passed into the renderer every
//! frame. Task data is never touched here: a finished drag is reported as a
//! [`ChartEvent::DragCommitted`] for the caller to apply or ignore.

use chrono::NaiveDate;

use super::layout::PositionedNode;
use super::timeline::{add_days, TimelineAxis, ViewMode, Zoom};

/// An in-flight drag of one bar.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub task_id: String,
    pub origin_x: f32,
    pub original_start: NaiveDate,
    pub original_end: NaiveDate,
    /// Candidate shift in whole days, for preview only.
    pub day_offset: i64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

/// Pointer input relevant to the chart, in chart coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum PointerEvent {
    /// Pointer pressed on the bar of `task_id`.
    Down { task_id: String, x: f32 },
    Move { x: f32 },
    Up,
    /// Pointer left the drag surface.
    Leave,
    /// Click on empty chart space.
    BackgroundClick,
}

/// Outcomes the chart reports to its owner.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    TaskClicked(String),
    DragCommitted {
        task_id: String,
        day_offset: i64,
        new_start: NaiveDate,
        new_end: NaiveDate,
    },
}

/// View state of the Gantt chart.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartState {
    pub drag: DragState,
    pub selected: Option<String>,
    pub zoom: Zoom,
    pub view_mode: ViewMode,
    /// Requested horizontal scroll offset, consumed by the renderer.
    pub scroll_to: Option<f32>,
}

impl ChartState {
    pub fn new(zoom: Zoom, view_mode: ViewMode) -> Self {
        Self {
            zoom,
            view_mode,
            ..Default::default()
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    /// Day offset currently previewed for `task_id`, zero if it is not being
    /// dragged.
    pub fn preview_offset(&self, task_id: &str) -> i64 {
        match &self.drag {
            DragState::Dragging(session) if session.task_id == task_id => session.day_offset,
            _ => 0,
        }
    }

    /// Feed one pointer event through the state machine.
    ///
    /// `can_drag` gates whether a pointer-down may start a drag; when it is
    /// false the press only selects the bar.
    pub fn handle(
        &mut self,
        event: PointerEvent,
        nodes: &[PositionedNode],
        axis: &TimelineAxis,
        can_drag: bool,
    ) -> Option<ChartEvent> {
        match (std::mem::take(&mut self.drag), event) {
            (DragState::Idle, PointerEvent::Down { task_id, x }) => {
                let node = nodes.iter().find(|n| n.task_id == task_id)?;
                self.selected = Some(task_id.clone());
                if can_drag {
                    self.drag = DragState::Dragging(DragSession {
                        task_id,
                        origin_x: x,
                        original_start: node.start,
                        original_end: node.end,
                        day_offset: 0,
                    });
                    None
                } else {
                    Some(ChartEvent::TaskClicked(task_id))
                }
            }
            (DragState::Dragging(mut session), PointerEvent::Move { x }) => {
                session.day_offset = axis.days_for_delta(x - session.origin_x);
                self.drag = DragState::Dragging(session);
                None
            }
            (DragState::Dragging(session), PointerEvent::Up) => {
                if session.day_offset == 0 {
                    return Some(ChartEvent::TaskClicked(session.task_id));
                }
                tracing::debug!(
                    task = %session.task_id,
                    days = session.day_offset,
                    "drag committed"
                );
                Some(ChartEvent::DragCommitted {
                    task_id: session.task_id,
                    day_offset: session.day_offset,
                    new_start: add_days(session.original_start, session.day_offset),
                    new_end: add_days(session.original_end, session.day_offset),
                })
            }
            (DragState::Dragging(_), PointerEvent::Leave) => None,
            (_, PointerEvent::BackgroundClick) => {
                self.selected = None;
                None
            }
            (state, _) => {
                self.drag = state;
                None
            }
        }
    }

    pub fn zoom_in(&mut self) {
        self.zoom.zoom_in();
    }

    pub fn zoom_out(&mut self) {
        self.zoom.zoom_out();
    }

    /// Request a scroll that centres today in a viewport `viewport_width`
    /// pixels wide. Does nothing if today is outside the window.
    pub fn scroll_to_today(&mut self, axis: &TimelineAxis, today: NaiveDate, viewport_width: f32) {
        if let Some(x) = axis.today_marker(today) {
            self.scroll_to = Some((x - viewport_width / 2.0).max(0.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gantt::layout::layout;
    use crate::gantt::timeline::TimelineWindow;
    use crate::gantt::tree::build_tree;
    use crate::model::Task;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn fixture() -> (Vec<PositionedNode>, TimelineAxis) {
        let tasks = vec![
            Task::with_id("a", "Excavation").dated(date(2024, 1, 2), date(2024, 1, 5)),
            Task::with_id("b", "Footings").dated(date(2024, 1, 5), date(2024, 1, 9)),
        ];
        let axis = TimelineAxis::new(
            TimelineWindow {
                start: date(2024, 1, 1),
                end: date(2024, 2, 1),
            },
            Zoom::default(),
        );
        (layout(&build_tree(&tasks), &axis), axis)
    }

    fn down(id: &str, x: f32) -> PointerEvent {
        PointerEvent::Down {
            task_id: id.to_string(),
            x,
        }
    }

    #[test]
    fn test_drag_commits_shifted_dates() {
        let (nodes, axis) = fixture();
        let mut state = ChartState::default();

        assert_eq!(state.handle(down("a", 40.0), &nodes, &axis, true), None);
        assert!(state.is_dragging());
        assert_eq!(state.selected.as_deref(), Some("a"));

        assert_eq!(state.handle(PointerEvent::Move { x: 100.0 }, &nodes, &axis, true), None);
        assert_eq!(state.preview_offset("a"), 2);
        assert_eq!(state.preview_offset("b"), 0);

        let event = state.handle(PointerEvent::Up, &nodes, &axis, true);
        assert_eq!(
            event,
            Some(ChartEvent::DragCommitted {
                task_id: "a".into(),
                day_offset: 2,
                new_start: date(2024, 1, 4),
                new_end: date(2024, 1, 7),
            })
        );
        assert_eq!(state.drag, DragState::Idle);
        assert_eq!(state.selected.as_deref(), Some("a"));
    }

    #[test]
    fn test_press_without_movement_is_a_click() {
        let (nodes, axis) = fixture();
        let mut state = ChartState::default();
        state.handle(down("b", 150.0), &nodes, &axis, true);
        state.handle(PointerEvent::Move { x: 160.0 }, &nodes, &axis, true);
        let event = state.handle(PointerEvent::Up, &nodes, &axis, true);
        assert_eq!(event, Some(ChartEvent::TaskClicked("b".into())));
        assert!(!state.is_dragging());
    }

    #[test]
    fn test_leave_cancels_drag() {
        let (nodes, axis) = fixture();
        let mut state = ChartState::default();
        state.handle(down("a", 40.0), &nodes, &axis, true);
        state.handle(PointerEvent::Move { x: 400.0 }, &nodes, &axis, true);
        assert_eq!(state.handle(PointerEvent::Leave, &nodes, &axis, true), None);
        assert_eq!(state.drag, DragState::Idle);
        assert_eq!(state.handle(PointerEvent::Up, &nodes, &axis, true), None);
    }

    #[test]
    fn test_read_only_press_selects_without_dragging() {
        let (nodes, axis) = fixture();
        let mut state = ChartState::default();
        let event = state.handle(down("b", 150.0), &nodes, &axis, false);
        assert_eq!(event, Some(ChartEvent::TaskClicked("b".into())));
        assert!(!state.is_dragging());
        assert_eq!(state.selected.as_deref(), Some("b"));
    }

    #[test]
    fn test_events_in_idle_are_ignored() {
        let (nodes, axis) = fixture();
        let mut state = ChartState::default();
        assert_eq!(state.handle(PointerEvent::Move { x: 10.0 }, &nodes, &axis, true), None);
        assert_eq!(state.handle(PointerEvent::Up, &nodes, &axis, true), None);
        assert_eq!(state.handle(down("nope", 0.0), &nodes, &axis, true), None);
        assert_eq!(state, ChartState::default());
    }

    #[test]
    fn test_second_press_while_dragging_is_ignored() {
        let (nodes, axis) = fixture();
        let mut state = ChartState::default();
        state.handle(down("a", 40.0), &nodes, &axis, true);
        state.handle(down("b", 150.0), &nodes, &axis, true);
        match &state.drag {
            DragState::Dragging(session) => assert_eq!(session.task_id, "a"),
            DragState::Idle => panic!("drag was dropped"),
        }
    }

    #[test]
    fn test_background_click_clears_selection() {
        let (nodes, axis) = fixture();
        let mut state = ChartState::default();
        state.handle(down("a", 40.0), &nodes, &axis, false);
        state.handle(PointerEvent::BackgroundClick, &nodes, &axis, false);
        assert!(state.selected.is_none());
    }

    #[test]
    fn test_zoom_and_scroll_leave_tasks_alone() {
        let (nodes, axis) = fixture();
        let before = nodes.clone();
        let mut state = ChartState::default();
        state.zoom_in();
        state.zoom_out();
        state.scroll_to_today(&axis, date(2024, 1, 21), 200.0);
        assert_eq!(state.scroll_to, Some(500.0));
        state.scroll_to = None;
        state.scroll_to_today(&axis, date(2025, 1, 1), 200.0);
        assert_eq!(state.scroll_to, None);
        assert_eq!(nodes, before);
    }

    #[test]
    fn test_drag_past_last_representable_day_saturates() {
        let last = NaiveDate::MAX;
        let tasks = vec![Task::with_id("late", "Handover").dated(last - Duration::days(1), last)];
        let axis = TimelineAxis::new(
            TimelineWindow {
                start: last - Duration::days(10),
                end: last,
            },
            Zoom::default(),
        );
        let nodes = layout(&build_tree(&tasks), &axis);
        let mut state = ChartState::default();

        state.handle(down("late", 270.0), &nodes, &axis, true);
        state.handle(PointerEvent::Move { x: 570.0 }, &nodes, &axis, true);
        let event = state.handle(PointerEvent::Up, &nodes, &axis, true);
        assert_eq!(
            event,
            Some(ChartEvent::DragCommitted {
                task_id: "late".into(),
                day_offset: 10,
                new_start: last,
                new_end: last,
            })
        );
    }
}
