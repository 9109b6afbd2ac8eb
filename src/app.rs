use std::path::{Path, PathBuf};

use chrono::{Duration, NaiveDate};

use crate::config::AppSettings;
use crate::gantt::{ChartEvent, ChartLayout, ChartState};
use crate::model::{Dependency, Project, Task, TaskPriority, TaskStatus};
use crate::rbac::{AccessContext, Permission, Route};
use crate::ui;

/// Main application state.
pub struct SiteGanttApp {
    pub project: Project,
    pub settings: AppSettings,
    pub access: AccessContext,
    pub chart: ChartState,
    pub route: Route,
    pub file_path: Option<PathBuf>,

    // Dialog state
    pub show_about: bool,
    pub show_permissions: bool,

    // Status message
    pub status_message: String,
}

impl SiteGanttApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let mut app = Self::with_settings(AppSettings::load(), chrono::Local::now().date_naive());
        if let Some(path) = app.settings.last_project.clone() {
            app.load_from_path(&path);
        }
        app
    }

    /// Build the app state without a window, starting from the sample project.
    pub fn with_settings(settings: AppSettings, today: NaiveDate) -> Self {
        let access = AccessContext::from_role_name(&settings.role);
        let route = if access.can_access(Route::Schedule) {
            Route::Schedule
        } else {
            Route::Dashboard
        };
        Self {
            project: sample_project(today),
            chart: ChartState::new(settings.zoom(), settings.view_mode),
            access,
            route,
            settings,
            file_path: None,
            show_about: false,
            show_permissions: false,
            status_message: "Ready".to_string(),
        }
    }

    // --- Access ---

    pub fn can(&self, permission: Permission) -> bool {
        self.access.has_permission(permission)
    }

    /// Switch the active role. Routes the role can no longer reach fall
    /// back to the dashboard.
    pub fn set_role(&mut self, role_name: &str) {
        self.access = AccessContext::from_role_name(role_name);
        self.settings.role = role_name.to_string();
        if !self.access.can_access(self.route) {
            self.route = Route::Dashboard;
        }
        if !self.can(Permission::TaskEdit) {
            self.chart.drag = Default::default();
        }
        self.persist_settings();
        self.status_message = match self.access.role() {
            Some(role) => format!("Signed in as {}", role.label()),
            None => format!("Unknown role '{}': access denied", role_name),
        };
    }

    pub fn navigate(&mut self, route: Route) {
        if self.access.can_access(route) {
            self.route = route;
        } else {
            tracing::warn!(route = route.label(), role = self.access.role_name(), "route denied");
            self.status_message = format!("{} is not available to your role", route.label());
        }
    }

    // --- Chart events ---

    /// Apply an event reported by the chart. Committed drags become an
    /// optimistic local date change when the role may edit tasks.
    pub fn apply_chart_event(&mut self, event: ChartEvent) {
        match event {
            ChartEvent::TaskClicked(id) => {
                if let Some(task) = self.project.task(&id) {
                    self.status_message = format!("Selected '{}'", task.title);
                }
            }
            ChartEvent::DragCommitted { task_id, day_offset, new_start, new_end } => {
                if !self.can(Permission::TaskEdit) {
                    tracing::warn!(task = %task_id, "drag rejected, role lacks task:edit");
                    self.status_message = "Your role cannot reschedule tasks".to_string();
                    return;
                }
                let Some(task) = self.project.task_mut(&task_id) else {
                    return;
                };
                task.start_date = Some(new_start);
                task.due_date = Some(new_end);
                tracing::info!(task = %task_id, days = day_offset, "task rescheduled");
                self.status_message = format!(
                    "Moved '{}' by {} day(s) ({} → {})",
                    task.title,
                    day_offset,
                    new_start.format("%Y-%m-%d"),
                    new_end.format("%Y-%m-%d")
                );
            }
        }
    }

    // --- File operations ---

    pub fn open_project(&mut self) {
        if !self.can(Permission::ProjectView) {
            self.status_message = "Your role cannot open projects".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Gantt Project", &["gantt.json", "json"])
            .pick_file()
        {
            self.load_from_path(&path);
        }
    }

    pub fn load_from_path(&mut self, path: &Path) {
        match crate::io::load_project(path) {
            Ok(project) => {
                self.project = project;
                self.file_path = Some(path.to_path_buf());
                self.chart.selected = None;
                self.chart.drag = Default::default();
                self.settings.last_project = Some(path.to_path_buf());
                self.persist_settings();
                self.status_message = format!("Loaded '{}'", self.project.name);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load project");
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    pub fn save_project_as(&mut self) {
        if !self.can(Permission::ProjectEdit) {
            self.status_message = "Your role cannot save projects".to_string();
            return;
        }
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Gantt Project", &["gantt.json", "json"])
            .set_file_name(format!("{}.gantt.json", self.project.name))
            .save_file()
        {
            match crate::io::save_project(&self.project, &path) {
                Ok(()) => {
                    self.file_path = Some(path.clone());
                    self.settings.last_project = Some(path);
                    self.persist_settings();
                    self.status_message = "Project saved".to_string();
                }
                Err(e) => self.status_message = format!("Error saving: {}", e),
            }
        }
    }

    fn persist_settings(&mut self) {
        self.settings.zoom = self.chart.zoom.factor();
        self.settings.view_mode = self.chart.view_mode;
        if let Err(e) = self.settings.save() {
            tracing::warn!(error = %e, "could not save settings");
        }
    }
}

/// A small residential build used when no project file is open.
fn sample_project(today: NaiveDate) -> Project {
    let d = |offset: i64| today + Duration::days(offset);
    let mut project = Project::new("Maple Street Duplex");

    let mut tasks = vec![
        Task::with_id("site", "Site preparation").dated(d(-12), d(2)),
        Task::with_id("survey", "Survey & staking").dated(d(-12), d(-9)).child_of("site"),
        Task::with_id("clear", "Clearing & grading").dated(d(-9), d(-3)).child_of("site"),
        Task::with_id("utilities", "Temporary utilities").dated(d(-3), d(2)).child_of("site"),
        Task::with_id("foundation", "Foundation").dated(d(2), d(20)),
        Task::with_id("excavate", "Excavate footings").dated(d(2), d(6)).child_of("foundation"),
        Task::with_id("rebar", "Rebar & formwork").dated(d(6), d(12)).child_of("foundation"),
        Task::with_id("pour", "Pour footings").dated(d(12), d(14)).child_of("foundation"),
        Task::with_id("inspect", "Foundation inspection")
            .dated(d(18), d(18))
            .child_of("foundation"),
        Task::with_id("framing", "Framing").dated(d(20), d(45)),
        Task::with_id("walls", "Wall framing").dated(d(20), d(34)).child_of("framing"),
        Task::with_id("roof", "Roof trusses").dated(d(34), d(45)).child_of("framing"),
        Task::with_id("permits", "Electrical permit review"),
    ];

    let statuses = [
        ("site", TaskStatus::InProgress, 70),
        ("survey", TaskStatus::Completed, 100),
        ("clear", TaskStatus::Completed, 100),
        ("utilities", TaskStatus::InProgress, 40),
        ("rebar", TaskStatus::NotStarted, 0),
        ("permits", TaskStatus::OnHold, 10),
    ];
    for (id, status, completion) in statuses {
        if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
            task.status = status;
            task.completion_percentage = completion;
        }
    }
    for id in ["pour", "inspect"] {
        if let Some(task) = tasks.iter_mut().find(|t| t.id == id) {
            task.priority = TaskPriority::Critical;
        }
    }
    if let Some(task) = tasks.iter_mut().find(|t| t.id == "roof") {
        task.priority = TaskPriority::High;
    }

    project.tasks = tasks;
    project.dependencies = vec![
        Dependency::new("survey", "clear"),
        Dependency::new("clear", "excavate"),
        Dependency::new("excavate", "rebar"),
        Dependency::new("rebar", "pour"),
        Dependency::new("pour", "inspect"),
        Dependency::new("inspect", "walls"),
        Dependency::new("walls", "roof"),
    ];
    project
}

impl eframe::App for SiteGanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);

        let today = chrono::Local::now().date_naive();
        let zoom_before = self.chart.zoom;
        let view_before = self.chart.view_mode;

        // Relayout from scratch every frame; it is a pure function of the data.
        let layout = ChartLayout::compute(&self.project, self.chart.zoom, today);

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, &layout, today, ui);
        });

        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Zoom: {:.0}%",
                                self.chart.zoom.factor() * 100.0
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                        ui.label(egui::RichText::new(" · ").size(10.5).color(ui::theme::TEXT_DIM));
                        let role = self
                            .access
                            .role()
                            .map_or("No access", |r| r.label());
                        ui.label(egui::RichText::new(role).size(10.5).color(ui::theme::TEXT_DIM));
                    });
                });
            });

        if self.access.can_access(Route::Tasks) {
            let mut action = ui::task_table::TaskTableAction::None;
            egui::SidePanel::left("task_panel")
                .default_width(ui::theme::SIDE_PANEL_WIDTH)
                .resizable(true)
                .frame(
                    egui::Frame::default()
                        .fill(ui::theme::BG_PANEL)
                        .inner_margin(egui::Margin::same(8.0))
                        .stroke(egui::Stroke::new(1.0, ui::theme::BORDER_SUBTLE)),
                )
                .show(ctx, |ui| {
                    action = ui::task_table::show_task_table(
                        &layout.nodes,
                        self.chart.selected.as_deref(),
                        ui,
                    );
                });
            if let ui::task_table::TaskTableAction::Select(id) = action {
                self.chart.selected = Some(id.clone());
                self.apply_chart_event(ChartEvent::TaskClicked(id));
            }
        }

        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(chart_frame).show(ctx, |ui| match self.route {
            Route::Schedule if self.access.can_access(Route::Schedule) => {
                let can_edit = self.can(Permission::TaskEdit);
                let interaction =
                    ui::gantt_chart::show_gantt_chart(&layout, &mut self.chart, can_edit, ui);
                for event in interaction.events {
                    self.apply_chart_event(event);
                }
            }
            _ => ui::dialogs::show_dashboard(self, ui),
        });

        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_permissions {
            ui::dialogs::show_permissions_dialog(self, ctx);
        }

        if self.chart.zoom != zoom_before || self.chart.view_mode != view_before {
            self.persist_settings();
        }
    }
}
