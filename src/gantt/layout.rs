use std::collections::HashMap;

use chrono::NaiveDate;

use super::timeline::{add_days, TimelineAxis};
use super::tree::GanttNode;
use crate::model::{Dependency, TaskPriority, TaskStatus};

/// Height of one chart row in pixels.
pub const ROW_HEIGHT: f32 = 32.0;
/// Bars never get narrower than this.
pub const MIN_BAR_WIDTH: f32 = 6.0;
/// Horizontal run of a connector before it turns.
pub const CONNECTOR_ELBOW: f32 = 10.0;

/// A task mapped onto the chart.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub task_id: String,
    pub title: String,
    pub level: usize,
    pub row: usize,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    /// Width of the completed portion of the bar.
    pub progress_width: f32,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub completion: u8,
    pub has_children: bool,
}

impl PositionedNode {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn center_y(&self) -> f32 {
        self.y + ROW_HEIGHT / 2.0
    }
}

/// Effective (start, end) of a task on the given axis.
///
/// Missing start falls back to the window start; missing due date gives a
/// one-day duration.
pub fn effective_span(
    start: Option<NaiveDate>,
    due: Option<NaiveDate>,
    axis: &TimelineAxis,
) -> (NaiveDate, NaiveDate) {
    let start = start.unwrap_or(axis.window.start);
    let end = due.unwrap_or_else(|| add_days(start, 1));
    (start, end)
}

/// Place every node on the axis. Rows come from the pre-order walk.
pub fn layout(nodes: &[GanttNode<'_>], axis: &TimelineAxis) -> Vec<PositionedNode> {
    nodes
        .iter()
        .map(|node| {
            let task = node.task;
            let (start, end) = effective_span(task.start_date, task.due_date, axis);
            let x = axis.date_to_x(start);
            let span_days = (end - start).num_days() as f32;
            let width = (span_days * axis.day_width).max(MIN_BAR_WIDTH);
            let completion = task.completion();

            PositionedNode {
                task_id: task.id.clone(),
                title: task.title.clone(),
                level: node.level,
                row: node.row,
                x,
                y: node.row as f32 * ROW_HEIGHT,
                width,
                progress_width: width * completion as f32 / 100.0,
                start,
                end,
                status: task.status,
                priority: task.priority,
                completion,
                has_children: !node.children.is_empty(),
            }
        })
        .collect()
}

/// A 2D point in chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Orthogonal path from the end of `from` to the start of `to`:
/// right, then down or up, then right.
pub fn connector_path(from: &PositionedNode, to: &PositionedNode) -> [Point; 4] {
    let from_y = from.center_y();
    let to_y = to.center_y();
    let elbow_x = from.right() + CONNECTOR_ELBOW;
    [
        Point::new(from.right(), from_y),
        Point::new(elbow_x, from_y),
        Point::new(elbow_x, to_y),
        Point::new(to.x, to_y),
    ]
}

/// A routed dependency connector.
#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub predecessor_id: String,
    pub successor_id: String,
    pub points: [Point; 4],
}

/// Route every dependency whose two ends are both laid out. Links to unknown
/// tasks are skipped.
pub fn route_connectors(nodes: &[PositionedNode], dependencies: &[Dependency]) -> Vec<Connector> {
    let mut by_id: HashMap<&str, &PositionedNode> = HashMap::with_capacity(nodes.len());
    for node in nodes {
        by_id.entry(node.task_id.as_str()).or_insert(node);
    }

    dependencies
        .iter()
        .filter_map(|dep| {
            let from = by_id.get(dep.predecessor_id.as_str())?;
            let to = by_id.get(dep.successor_id.as_str())?;
            Some(Connector {
                predecessor_id: dep.predecessor_id.clone(),
                successor_id: dep.successor_id.clone(),
                points: connector_path(from, to),
            })
        })
        .collect()
}
