use super::permission::Permission;

/// Screens of the app shell, each gated by a list of permissions of which
/// any one grants access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Dashboard,
    Schedule,
    Tasks,
    Budget,
    Team,
    Contractors,
    Documents,
    TimeTracking,
    Reports,
    Settings,
    Admin,
}

impl Route {
    pub const ALL: [Route; 11] = [
        Route::Dashboard,
        Route::Schedule,
        Route::Tasks,
        Route::Budget,
        Route::Team,
        Route::Contractors,
        Route::Documents,
        Route::TimeTracking,
        Route::Reports,
        Route::Settings,
        Route::Admin,
    ];

    pub fn required_permissions(self) -> &'static [Permission] {
        use Permission::*;
        match self {
            Route::Dashboard => &[],
            Route::Schedule => &[ProjectView, TaskView],
            Route::Tasks => &[TaskView],
            Route::Budget => &[BudgetView, BudgetEdit],
            Route::Team => &[TeamView, TeamManage],
            Route::Contractors => &[ContractorView, ContractorManage],
            Route::Documents => &[DocumentView],
            Route::TimeTracking => &[TimeLog, TimeView],
            Route::Reports => &[ReportView],
            Route::Settings => &[SettingsView, SettingsManage],
            Route::Admin => &[AdminUsers, AdminRoles],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Dashboard => "Dashboard",
            Route::Schedule => "Schedule",
            Route::Tasks => "Tasks",
            Route::Budget => "Budget",
            Route::Team => "Team",
            Route::Contractors => "Contractors",
            Route::Documents => "Documents",
            Route::TimeTracking => "Time Tracking",
            Route::Reports => "Reports",
            Route::Settings => "Settings",
            Route::Admin => "Admin",
        }
    }
}
