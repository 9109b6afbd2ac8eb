use crate::gantt::{
    header_ticks, ChartEvent, ChartLayout, ChartState, Connector, HeaderTick, PointerEvent,
    PositionedNode, ViewMode, ROW_HEIGHT,
};
use crate::ui::theme;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const BAR_INSET: f32 = theme::BAR_INSET;

/// What happened in the chart this frame.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    pub events: Vec<ChartEvent>,
}

/// Render the Gantt chart area (central panel).
///
/// `can_edit` arms dragging; without it bars can only be selected.
pub fn show_gantt_chart(
    chart: &ChartLayout,
    state: &mut ChartState,
    can_edit: bool,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();
    let available = ui.available_size();
    let chart_width = chart.axis.total_width().max(available.x);
    let chart_height = HEADER_HEIGHT + chart.content_height() + 40.0;

    // Ctrl + wheel zooms
    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta);
        if scroll_delta.y > 0.0 {
            state.zoom_in();
        } else if scroll_delta.y < 0.0 {
            state.zoom_out();
        }
    }

    let mut scroll = egui::ScrollArea::both().auto_shrink([false, false]);
    if let Some(x) = state.scroll_to.take() {
        scroll = scroll.horizontal_scroll_offset(x);
    }

    scroll.show(ui, |ui| {
        let (response, painter) = ui.allocate_painter(
            Vec2::new(chart_width, chart_height.max(available.y)),
            Sense::click(),
        );
        let origin = response.rect.min;
        let rows_origin = origin + Vec2::new(0.0, HEADER_HEIGHT);
        let mut consumed_click = false;

        painter.rect_filled(response.rect, 0.0, theme::BG_DARK);

        let clip = ui.clip_rect();
        let ticks = header_ticks(
            &chart.axis,
            state.view_mode,
            (clip.min.x - origin.x)..=(clip.max.x - origin.x),
        );

        draw_rows(&painter, rows_origin, chart.nodes.len(), chart_width);
        draw_grid(&painter, origin, chart, &ticks, response.rect.bottom());

        for connector in &chart.connectors {
            draw_connector(&painter, rows_origin, connector);
        }

        for node in &chart.nodes {
            let offset_px = state.preview_offset(&node.task_id) as f32 * chart.axis.day_width;
            let is_selected = state.selected.as_deref() == Some(node.task_id.as_str());

            if offset_px != 0.0 {
                let ghost = bar_rect(rows_origin, node, 0.0);
                painter.rect_filled(ghost, Rounding::same(theme::BAR_ROUNDING), theme::DRAG_GHOST);
            }
            let rect = draw_task_bar(&painter, rows_origin, node, offset_px, is_selected);

            let bar_response = ui.interact(
                rect,
                ui.make_persistent_id(("task-bar", &node.task_id)),
                Sense::click_and_drag(),
            );

            if bar_response.drag_started() {
                let x = bar_response
                    .interact_pointer_pos()
                    .map(|p| p.x - origin.x)
                    .unwrap_or(node.x);
                let down = PointerEvent::Down {
                    task_id: node.task_id.clone(),
                    x,
                };
                interaction
                    .events
                    .extend(state.handle(down, &chart.nodes, &chart.axis, can_edit));
                consumed_click = true;
            } else if bar_response.clicked() {
                let down = PointerEvent::Down {
                    task_id: node.task_id.clone(),
                    x: node.x,
                };
                interaction
                    .events
                    .extend(state.handle(down, &chart.nodes, &chart.axis, can_edit));
                interaction
                    .events
                    .extend(state.handle(PointerEvent::Up, &chart.nodes, &chart.axis, can_edit));
                consumed_click = true;
            }

            if bar_response.hovered() {
                if can_edit {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                }
                egui::show_tooltip_at_pointer(
                    ui.ctx(),
                    ui.layer_id(),
                    egui::Id::new(("task-tip", &node.task_id)),
                    |ui| {
                        ui.strong(&node.title);
                        ui.label(format!(
                            "{} → {}",
                            node.start.format("%d/%m/%Y"),
                            node.end.format("%d/%m/%Y"),
                        ));
                        ui.label(format!(
                            "{} · {} priority · {}%",
                            node.status.label(),
                            node.priority.label(),
                            node.completion
                        ));
                    },
                );
            }
        }

        if state.is_dragging() {
            ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
            let (pointer, down, released) = ui.input(|i| {
                (i.pointer.hover_pos(), i.pointer.primary_down(), i.pointer.primary_released())
            });
            let event = match pointer {
                Some(pos) if !response.rect.contains(pos) => PointerEvent::Leave,
                None => PointerEvent::Leave,
                Some(_) if released || !down => PointerEvent::Up,
                Some(pos) => PointerEvent::Move { x: pos.x - origin.x },
            };
            interaction
                .events
                .extend(state.handle(event, &chart.nodes, &chart.axis, can_edit));
        }

        if let Some(today_x) = chart.today_x {
            draw_today_line(&painter, origin, today_x, response.rect.bottom());
        }

        draw_timeline_header(&painter, origin, chart, &ticks, state.view_mode, chart_width);

        // Empty click on background clears selection
        if response.clicked() && !consumed_click {
            state.handle(PointerEvent::BackgroundClick, &chart.nodes, &chart.axis, can_edit);
        }
    });

    interaction
}

fn bar_rect(rows_origin: Pos2, node: &PositionedNode, offset_px: f32) -> Rect {
    Rect::from_min_size(
        Pos2::new(rows_origin.x + node.x + offset_px, rows_origin.y + node.y + BAR_INSET),
        Vec2::new(node.width, ROW_HEIGHT - BAR_INSET * 2.0),
    )
}

fn draw_rows(painter: &egui::Painter, rows_origin: Pos2, count: usize, width: f32) {
    for i in 0..count {
        let y = rows_origin.y + i as f32 * ROW_HEIGHT;
        let row_bg = if i % 2 == 0 { theme::BG_PANEL } else { theme::BG_DARK };
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(rows_origin.x, y), Vec2::new(width, ROW_HEIGHT)),
            0.0,
            row_bg,
        );
        painter.line_segment(
            [
                Pos2::new(rows_origin.x, y + ROW_HEIGHT),
                Pos2::new(rows_origin.x + width, y + ROW_HEIGHT),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_grid(
    painter: &egui::Painter,
    origin: Pos2,
    chart: &ChartLayout,
    ticks: &[HeaderTick],
    bottom: f32,
) {
    let day_width = chart.axis.day_width;
    for tick in ticks {
        let x = origin.x + tick.x;
        if tick.is_weekend {
            painter.rect_filled(
                Rect::from_min_max(
                    Pos2::new(x, origin.y + HEADER_HEIGHT),
                    Pos2::new(x + day_width, bottom),
                ),
                0.0,
                theme::WEEKEND_FILL,
            );
        }
        painter.line_segment(
            [Pos2::new(x, origin.y + HEADER_HEIGHT), Pos2::new(x, bottom)],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }
}

fn draw_timeline_header(
    painter: &egui::Painter,
    origin: Pos2,
    chart: &ChartLayout,
    ticks: &[HeaderTick],
    mode: ViewMode,
    width: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    // Day numbers get cramped when zoomed out
    let show_labels = mode == ViewMode::Week || chart.axis.day_width >= 18.0;

    for tick in ticks {
        let x = origin.x + tick.x;
        if show_labels {
            let color = if tick.is_weekend { theme::TEXT_DIM } else { theme::TEXT_SECONDARY };
            painter.text(
                Pos2::new(x + 3.0, origin.y + 30.0),
                egui::Align2::LEFT_CENTER,
                &tick.label,
                theme::font_sub(),
                color,
            );
        }
        if let Some(month) = &tick.month_label {
            painter.text(
                Pos2::new(x + 3.0, origin.y + 12.0),
                egui::Align2::LEFT_CENTER,
                month,
                theme::font_header(),
                theme::TEXT_PRIMARY,
            );
        }
    }
}

fn draw_today_line(painter: &egui::Painter, origin: Pos2, today_x: f32, bottom: f32) {
    let x = origin.x + today_x;
    painter.line_segment(
        [Pos2::new(x, origin.y + HEADER_HEIGHT), Pos2::new(x, bottom)],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        egui::Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}

fn draw_connector(painter: &egui::Painter, rows_origin: Pos2, connector: &Connector) {
    let points: Vec<Pos2> = connector
        .points
        .iter()
        .map(|p| Pos2::new(rows_origin.x + p.x, rows_origin.y + p.y))
        .collect();
    let stroke = Stroke::new(1.2, theme::CONNECTOR);
    painter.add(egui::Shape::line(points.clone(), stroke));

    if let Some(&tip) = points.last() {
        let size = 4.0;
        painter.add(egui::Shape::convex_polygon(
            vec![
                tip,
                Pos2::new(tip.x - size * 1.5, tip.y - size),
                Pos2::new(tip.x - size * 1.5, tip.y + size),
            ],
            theme::CONNECTOR,
            Stroke::NONE,
        ));
    }
}

fn draw_task_bar(
    painter: &egui::Painter,
    rows_origin: Pos2,
    node: &PositionedNode,
    offset_px: f32,
    is_selected: bool,
) -> Rect {
    let rect = bar_rect(rows_origin, node, offset_px);
    let rounding = Rounding::same(theme::BAR_ROUNDING);
    let fill = theme::status_color(node.status);

    painter.rect_filled(
        rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(35),
    );
    painter.rect_filled(rect, rounding, fill);

    // Summary tasks get a darker cap so they read as group headers
    if node.has_children {
        let cap = Rect::from_min_size(rect.min, Vec2::new(rect.width(), 4.0));
        painter.rect_filled(cap, rounding, Color32::from_black_alpha(60));
    }

    if node.progress_width > 0.0 {
        let progress_rect =
            Rect::from_min_size(rect.min, Vec2::new(node.progress_width, rect.height()));
        painter.rect_filled(progress_rect, rounding, theme::PROGRESS_OVERLAY);
    }

    let priority = theme::priority_stroke(node.priority);
    if priority != Stroke::NONE {
        painter.rect_stroke(rect, rounding, priority);
    }

    if is_selected {
        painter.rect_stroke(
            rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if rect.width() > 30.0 {
        let galley =
            painter.layout_no_wrap(node.title.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let text_y = rect.top() + (rect.height() - galley.size().y) / 2.0;
        painter
            .with_clip_rect(rect)
            .galley(Pos2::new(rect.left() + 6.0, text_y), galley, Color32::TRANSPARENT);
    } else {
        painter.text(
            Pos2::new(rect.right() + 6.0, rect.center().y),
            egui::Align2::LEFT_CENTER,
            &node.title,
            theme::font_bar(),
            theme::TEXT_SECONDARY,
        );
    }

    rect
}
