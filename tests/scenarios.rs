use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use sitegantt::gantt::{
    build_tree, header_ticks, layout, ChartLayout, TimelineAxis, TimelineWindow, ViewMode, Zoom,
    MAX_HEADER_TICKS,
};
use sitegantt::model::{Project, Task};
use sitegantt::rbac::{can_manage_role, has_permission, role_level, Permission, Role};

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn two_level_tasks() -> Vec<Task> {
    vec![
        Task::with_id("A", "Groundworks").dated(date("2024-01-01"), date("2024-01-03")),
        Task::with_id("B", "Drainage")
            .dated(date("2024-01-03"), date("2024-01-05"))
            .child_of("A"),
    ]
}

#[test]
fn parent_and_child_are_laid_out_on_a_30px_axis() {
    let tasks = two_level_tasks();
    let nodes = build_tree(&tasks);
    let levels: Vec<(&str, usize)> = nodes.iter().map(|n| (n.task.id.as_str(), n.level)).collect();
    assert_eq!(levels, vec![("A", 0), ("B", 1)]);

    let window = TimelineWindow::compute(&tasks, None, None, date("2024-01-02"));
    assert_eq!(window.start, date("2023-12-25"));

    let axis = TimelineAxis::new(window, Zoom::default());
    assert_eq!(axis.day_width, 30.0);

    let laid = layout(&nodes, &axis);
    assert_eq!(laid[0].x, 7.0 * 30.0);
    assert_eq!(laid[0].width, 2.0 * 30.0);
    assert_eq!(laid[1].x, 9.0 * 30.0);
    assert_eq!(laid[1].width, 2.0 * 30.0);
    assert_eq!(laid[1].level, 1);
}

#[test]
fn chart_pipeline_is_deterministic() {
    let mut project = Project::new("Depot");
    project.tasks = two_level_tasks();
    let today = date("2024-01-02");
    let first = ChartLayout::compute(&project, Zoom::new(1.44), today);
    let second = ChartLayout::compute(&project, Zoom::new(1.44), today);
    assert_eq!(first.nodes, second.nodes);
    assert_eq!(first.connectors, second.connectors);
    assert_eq!(first.today_x, second.today_x);
}

#[test]
fn explicit_project_bounds_widen_the_window() {
    let mut project = Project::new("Depot");
    project.tasks = two_level_tasks();
    project.start_date = Some(date("2023-11-01"));
    let chart = ChartLayout::compute(&project, Zoom::default(), date("2024-01-02"));
    assert_eq!(chart.axis.window.start, date("2023-10-25"));
    assert_eq!(chart.nodes[0].x, 68.0 * 30.0);
}

#[test]
fn worker_cannot_create_projects_but_admin_can() {
    assert!(!has_permission(Some(Role::Worker), Permission::ProjectCreate));
    assert!(has_permission(Some(Role::CompanyAdmin), Permission::ProjectCreate));
}

#[test]
fn foreman_manages_workers_only() {
    assert!(can_manage_role(Some(Role::Foreman), Role::Worker));
    assert!(!can_manage_role(Some(Role::Foreman), Role::ProjectManager));
    assert!(role_level(Some(Role::Foreman)) > role_level(Some(Role::Worker)));
}

#[test]
fn permission_strings_parse_from_session_data() {
    let granted: Vec<Permission> =
        serde_json::from_str(r#"["project:view", "task:edit"]"#).unwrap();
    assert_eq!(granted, vec![Permission::ProjectView, Permission::TaskEdit]);
    let role: Role = serde_json::from_str(r#""project_manager""#).unwrap();
    assert_eq!(role, Role::ProjectManager);
}

#[test]
fn project_file_with_far_future_due_date_still_lays_out() {
    let far = NaiveDate::MAX - chrono::Duration::days(10);
    let json = format!(
        r#"{{
            "name": "Long lease",
            "tasks": [
                {{ "id": "a", "title": "Lease", "start_date": "2024-01-01", "due_date": {} }}
            ]
        }}"#,
        serde_json::to_string(&far).unwrap()
    );
    let project: Project = serde_json::from_str(&json).unwrap();

    let chart = ChartLayout::compute(&project, Zoom::default(), date("2024-06-01"));
    assert_eq!(chart.axis.window.end, NaiveDate::MAX);
    assert_eq!(chart.nodes.len(), 1);
    assert!(chart.nodes[0].width.is_finite());

    let ticks = header_ticks(&chart.axis, ViewMode::Day, 0.0..=chart.axis.total_width());
    assert_eq!(ticks.len(), MAX_HEADER_TICKS);
}
