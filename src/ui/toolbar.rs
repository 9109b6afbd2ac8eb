use crate::app::SiteGanttApp;
use crate::gantt::{ChartLayout, ViewMode};
use crate::rbac::{Permission, Role, Route};
use chrono::NaiveDate;
use egui::{menu, RichText, Ui};
use egui_phosphor::regular as icons;

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut SiteGanttApp, layout: &ChartLayout, today: NaiveDate, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button("  File  ", |ui| {
            let can_open = app.can(Permission::ProjectView);
            if ui
                .add_enabled(can_open, egui::Button::new(format!("{} Open...", icons::FOLDER_OPEN)))
                .clicked()
            {
                app.open_project();
                ui.close_menu();
            }
            let can_save = app.can(Permission::ProjectEdit);
            let save_button = egui::Button::new(format!("{} Save As...", icons::FLOPPY_DISK));
            if ui.add_enabled(can_save, save_button).clicked()
            {
                app.save_project_as();
                ui.close_menu();
            }
        });

        ui.menu_button("  View  ", |ui| {
            for route in [Route::Dashboard, Route::Schedule] {
                let enabled = app.access.can_access(route);
                let label = egui::SelectableLabel::new(app.route == route, route.label());
                if ui.add_enabled(enabled, label).clicked()
                {
                    app.navigate(route);
                    ui.close_menu();
                }
            }
            ui.separator();
            ui.label(RichText::new("Timeline Scale").small().weak());
            if ui.radio_value(&mut app.chart.view_mode, ViewMode::Day, "Days").clicked() {
                ui.close_menu();
            }
            if ui.radio_value(&mut app.chart.view_mode, ViewMode::Week, "Weeks").clicked() {
                ui.close_menu();
            }
        });

        ui.menu_button("  Role  ", |ui| {
            let current = app.access.role();
            for role in Role::ALL {
                if ui.radio(current == Some(role), role.label()).clicked() {
                    app.set_role(role.as_str());
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button(format!("{} Permissions...", icons::LOCK_KEY)).clicked() {
                app.show_permissions = true;
                ui.close_menu();
            }
        });

        ui.menu_button("  Help  ", |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();

        let on_schedule = app.route == Route::Schedule;
        if ui
            .add_enabled(on_schedule, egui::Button::new(icons::MAGNIFYING_GLASS_MINUS).frame(false))
            .on_hover_text("Zoom out (Ctrl+Scroll)")
            .clicked()
        {
            app.chart.zoom_out();
        }
        if ui
            .add_enabled(on_schedule, egui::Button::new(icons::MAGNIFYING_GLASS_PLUS).frame(false))
            .on_hover_text("Zoom in (Ctrl+Scroll)")
            .clicked()
        {
            app.chart.zoom_in();
        }
        let today_button =
            egui::Button::new(format!("{} Today", icons::CALENDAR_CHECK)).frame(false);
        if ui.add_enabled(on_schedule, today_button).clicked()
        {
            let width = ui.ctx().screen_rect().width() - crate::ui::theme::SIDE_PANEL_WIDTH;
            app.chart.scroll_to_today(&layout.axis, today, width.max(0.0));
        }

        // Right-aligned project name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let modified = if app.file_path.is_some() { "" } else { " (unsaved)" };
            ui.label(
                RichText::new(format!("{}{}", app.project.name, modified))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
