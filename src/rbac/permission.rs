use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Capability area a permission belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PermissionDomain {
    Project,
    Task,
    Budget,
    Team,
    Contractor,
    Document,
    Time,
    Report,
    Settings,
    Admin,
}

impl PermissionDomain {
    pub fn label(self) -> &'static str {
        match self {
            PermissionDomain::Project => "Projects",
            PermissionDomain::Task => "Tasks",
            PermissionDomain::Budget => "Budget",
            PermissionDomain::Team => "Team",
            PermissionDomain::Contractor => "Contractors",
            PermissionDomain::Document => "Documents",
            PermissionDomain::Time => "Time tracking",
            PermissionDomain::Report => "Reports",
            PermissionDomain::Settings => "Settings",
            PermissionDomain::Admin => "Administration",
        }
    }
}

macro_rules! permissions {
    ($($variant:ident => $name:literal, $domain:ident;)+) => {
        /// Fine-grained capability, written `domain:action` on the wire.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum Permission {
            $(
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl Permission {
            pub const ALL: &'static [Permission] = &[$(Permission::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $(Permission::$variant => $name,)+
                }
            }

            pub fn domain(self) -> PermissionDomain {
                match self {
                    $(Permission::$variant => PermissionDomain::$domain,)+
                }
            }
        }

        impl FromStr for Permission {
            type Err = UnknownPermission;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($name => Ok(Permission::$variant),)+
                    other => Err(UnknownPermission(other.to_string())),
                }
            }
        }
    };
}

permissions! {
    ProjectView => "project:view", Project;
    ProjectCreate => "project:create", Project;
    ProjectEdit => "project:edit", Project;
    ProjectDelete => "project:delete", Project;

    TaskView => "task:view", Task;
    TaskCreate => "task:create", Task;
    TaskEdit => "task:edit", Task;
    TaskDelete => "task:delete", Task;
    TaskAssign => "task:assign", Task;
    TaskUpdateStatus => "task:update_status", Task;

    BudgetView => "budget:view", Budget;
    BudgetEdit => "budget:edit", Budget;
    BudgetApprove => "budget:approve", Budget;

    TeamView => "team:view", Team;
    TeamManage => "team:manage", Team;

    ContractorView => "contractor:view", Contractor;
    ContractorManage => "contractor:manage", Contractor;

    DocumentView => "document:view", Document;
    DocumentUpload => "document:upload", Document;
    DocumentDelete => "document:delete", Document;

    TimeLog => "time:log", Time;
    TimeView => "time:view", Time;
    TimeApprove => "time:approve", Time;

    ReportView => "report:view", Report;
    ReportCreate => "report:create", Report;
    ReportExport => "report:export", Report;

    SettingsView => "settings:view", Settings;
    SettingsManage => "settings:manage", Settings;

    AdminUsers => "admin:users", Admin;
    AdminRoles => "admin:roles", Admin;
    AdminAudit => "admin:audit", Admin;
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A permission string that names no known capability.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown permission: {0}")]
pub struct UnknownPermission(pub String);
