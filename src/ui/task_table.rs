use crate::gantt::PositionedNode;
use crate::ui::theme;
use egui::{Color32, RichText, Ui};

/// Actions that the task table can request.
pub enum TaskTableAction {
    None,
    Select(String),
}

/// Render the left-side task list in chart row order, indented by level.
pub fn show_task_table(
    nodes: &[PositionedNode],
    selected_task: Option<&str>,
    ui: &mut Ui,
) -> TaskTableAction {
    let mut action = TaskTableAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new("Tasks").strong().size(15.0).color(theme::TEXT_PRIMARY));
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", nodes.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);
    ui.separator();

    ui.horizontal(|ui| {
        ui.label(RichText::new("TASK").size(9.0).color(theme::TEXT_DIM).strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(RichText::new("DONE").size(9.0).color(theme::TEXT_DIM).strong());
            ui.add_space(28.0);
            ui.label(RichText::new("DUE").size(9.0).color(theme::TEXT_DIM).strong());
        });
    });

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, node) in nodes.iter().enumerate() {
                let is_selected = selected_task == Some(node.task_id.as_str());
                let row_bg = if is_selected {
                    theme::BG_SELECTED
                } else if i % 2 == 0 {
                    theme::BG_PANEL
                } else {
                    theme::BG_DARK
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    ..Default::default()
                };

                let frame_resp = frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;
                        ui.add_space(node.level as f32 * theme::INDENT_PER_LEVEL);

                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        let dot_color = theme::status_color(node.status);
                        ui.painter().circle_filled(dot_rect.center(), 3.0, dot_color);

                        let mut title = RichText::new(&node.title).size(12.0).color(if is_selected {
                            Color32::WHITE
                        } else {
                            theme::TEXT_PRIMARY
                        });
                        if node.has_children {
                            title = title.strong();
                        }
                        ui.add(egui::Label::new(title).truncate())
                            .on_hover_text(format!("{} priority", node.priority.label()));

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.spacing_mut().item_spacing.x = 4.0;
                            let pbar = egui::ProgressBar::new(node.completion as f32 / 100.0)
                                .desired_width(48.0)
                                .fill(theme::status_color(node.status))
                                .rounding(egui::Rounding::same(3.0));
                            ui.add(pbar);
                            ui.label(
                                RichText::new(node.end.format("%m/%d").to_string())
                                    .size(10.0)
                                    .color(theme::priority_color(node.priority)),
                            );
                        });
                    });
                });

                let row_click = ui.interact(
                    frame_resp.response.rect,
                    egui::Id::new(("task-row", &node.task_id)),
                    egui::Sense::click(),
                );
                if row_click.clicked() {
                    action = TaskTableAction::Select(node.task_id.clone());
                }

                ui.add_space(1.0);
            }
        });

    action
}
