//! Gantt core: hierarchy, date axis, bar layout and the drag state machine.
//!
//! Everything here is a pure function of its inputs; the egui renderer in
//! `ui::gantt_chart` consumes the results.

pub mod interaction;
pub mod layout;
pub mod timeline;
pub mod tree;

pub use interaction::{ChartEvent, ChartState, DragSession, DragState, PointerEvent};
pub use layout::{layout, route_connectors, Connector, Point, PositionedNode, ROW_HEIGHT};
pub use timeline::{
    header_ticks, HeaderTick, TimelineAxis, TimelineWindow, ViewMode, Zoom, MAX_HEADER_TICKS,
};
pub use tree::{build_tree, GanttNode, TaskTree};

use chrono::NaiveDate;

use crate::model::Project;

/// Everything the chart needs for one frame.
#[derive(Debug, Clone)]
pub struct ChartLayout {
    pub axis: TimelineAxis,
    pub nodes: Vec<PositionedNode>,
    pub connectors: Vec<Connector>,
    pub today_x: Option<f32>,
}

impl ChartLayout {
    /// Run the whole pipeline: tree, window, bars, connectors.
    pub fn compute(project: &Project, zoom: Zoom, today: NaiveDate) -> Self {
        let window =
            TimelineWindow::compute(&project.tasks, project.start_date, project.end_date, today);
        let axis = TimelineAxis::new(window, zoom);
        let nodes = layout(&build_tree(&project.tasks), &axis);
        let connectors = route_connectors(&nodes, &project.dependencies);
        Self {
            today_x: axis.today_marker(today),
            axis,
            nodes,
            connectors,
        }
    }

    pub fn content_height(&self) -> f32 {
        self.nodes.len() as f32 * ROW_HEIGHT
    }
}
