use std::collections::BTreeMap;

use crate::app::SiteGanttApp;
use crate::model::TaskStatus;
use crate::rbac::{Permission, PermissionDomain, Role, Route};
use crate::ui::theme;
use egui::{Context, RichText, Ui, Window};

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut SiteGanttApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([300.0, 160.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("SiteGantt").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Construction scheduling with role-based access,");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Render the current role's capabilities: level, manageable roles,
/// reachable screens and permissions grouped by domain.
pub fn show_permissions_dialog(app: &mut SiteGanttApp, ctx: &Context) {
    let mut open = app.show_permissions;
    let access = &app.access;
    Window::new(RichText::new("Role & Permissions").strong().size(14.0))
        .open(&mut open)
        .resizable(true)
        .collapsible(false)
        .default_size([420.0, 480.0])
        .show(ctx, |ui| {
            let title = access.role().map_or("Unknown role", |r| r.label());
            ui.label(RichText::new(title).strong().size(13.0));
            ui.label(
                RichText::new(format!("'{}' · level {}", access.role_name(), access.level()))
                    .color(theme::TEXT_SECONDARY),
            );
            ui.add_space(6.0);

            let managed: Vec<&str> = Role::ALL
                .into_iter()
                .filter(|r| access.can_manage(*r))
                .map(Role::label)
                .collect();
            ui.label(RichText::new("Can manage").color(theme::TEXT_DIM).small());
            ui.label(if managed.is_empty() { "—".to_string() } else { managed.join(", ") });
            ui.add_space(4.0);

            let routes: Vec<&str> = access
                .accessible_routes()
                .into_iter()
                .map(Route::label)
                .collect();
            ui.label(RichText::new("Screens").color(theme::TEXT_DIM).small());
            ui.label(routes.join(", "));
            ui.separator();

            let mut by_domain: BTreeMap<PermissionDomain, Vec<Permission>> = BTreeMap::new();
            for &perm in Permission::ALL {
                if access.has_permission(perm) {
                    by_domain.entry(perm.domain()).or_default().push(perm);
                }
            }

            egui::ScrollArea::vertical().show(ui, |ui| {
                if by_domain.is_empty() {
                    ui.label(RichText::new("No permissions").color(theme::TEXT_DIM));
                }
                for (domain, perms) in &by_domain {
                    ui.label(RichText::new(domain.label()).strong());
                    ui.horizontal_wrapped(|ui| {
                        for perm in perms {
                            ui.label(
                                RichText::new(perm.as_str())
                                    .monospace()
                                    .size(10.5)
                                    .color(theme::TEXT_SECONDARY),
                            );
                        }
                    });
                    ui.add_space(4.0);
                }
            });
        });
    app.show_permissions = open && !ctx.input(|i| i.key_pressed(egui::Key::Escape));
}

/// Project summary shown on the dashboard route.
pub fn show_dashboard(app: &mut SiteGanttApp, ui: &mut Ui) {
    egui::Frame::default()
        .inner_margin(egui::Margin::same(16.0))
        .show(ui, |ui| {
            ui.heading(RichText::new(&app.project.name).strong());
            ui.add_space(8.0);

            if !app.access.can_access(Route::Schedule) {
                ui.label(
                    RichText::new("Your role has no access to the project schedule.")
                        .color(theme::TEXT_SECONDARY),
                );
                return;
            }

            let tasks = &app.project.tasks;
            egui::Grid::new("status_counts")
                .num_columns(2)
                .spacing([24.0, 6.0])
                .show(ui, |ui| {
                    for status in TaskStatus::ALL {
                        let count = tasks.iter().filter(|t| t.status == status).count();
                        ui.label(RichText::new(status.label()).color(theme::status_color(status)));
                        ui.label(count.to_string());
                        ui.end_row();
                    }
                });

            if !tasks.is_empty() {
                let total: u32 = tasks.iter().map(|t| t.completion() as u32).sum();
                let average = total as f32 / tasks.len() as f32 / 100.0;
                ui.add_space(8.0);
                ui.add(
                    egui::ProgressBar::new(average)
                        .desired_width(240.0)
                        .fill(theme::ACCENT)
                        .text(format!("{:.0}% complete", average * 100.0)),
                );
            }

            ui.add_space(12.0);
            if ui.button("Open schedule").clicked() {
                app.navigate(Route::Schedule);
            }
        });
}
