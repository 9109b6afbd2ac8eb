use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::permission::Permission;

/// User classification used for permission lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    CompanyAdmin,
    ProjectManager,
    Foreman,
    Worker,
    Client,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::CompanyAdmin,
        Role::ProjectManager,
        Role::Foreman,
        Role::Worker,
        Role::Client,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::CompanyAdmin => "company_admin",
            Role::ProjectManager => "project_manager",
            Role::Foreman => "foreman",
            Role::Worker => "worker",
            Role::Client => "client",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::CompanyAdmin => "Company Admin",
            Role::ProjectManager => "Project Manager",
            Role::Foreman => "Foreman",
            Role::Worker => "Worker",
            Role::Client => "Client",
        }
    }

    /// Permissions granted to this role.
    #[rustfmt::skip]
    pub fn permissions(self) -> &'static [Permission] {
        use Permission::*;
        match self {
            Role::CompanyAdmin => Permission::ALL,
            Role::ProjectManager => &[
                ProjectView, ProjectCreate, ProjectEdit,
                TaskView, TaskCreate, TaskEdit, TaskDelete, TaskAssign, TaskUpdateStatus,
                BudgetView, BudgetEdit,
                TeamView, TeamManage,
                ContractorView, ContractorManage,
                DocumentView, DocumentUpload, DocumentDelete,
                TimeLog, TimeView, TimeApprove,
                ReportView, ReportCreate, ReportExport,
                SettingsView,
            ],
            Role::Foreman => &[
                ProjectView,
                TaskView, TaskCreate, TaskEdit, TaskAssign, TaskUpdateStatus,
                TeamView,
                ContractorView,
                DocumentView, DocumentUpload,
                TimeLog, TimeView, TimeApprove,
                ReportView,
            ],
            Role::Worker => &[
                ProjectView,
                TaskView, TaskUpdateStatus,
                DocumentView, DocumentUpload,
                TimeLog, TimeView,
            ],
            Role::Client => &[
                ProjectView,
                TaskView,
                BudgetView,
                DocumentView,
                ReportView,
            ],
        }
    }

    /// Rank in the hierarchy; higher outranks lower.
    pub fn level(self) -> u32 {
        match self {
            Role::CompanyAdmin => 100,
            Role::ProjectManager => 80,
            Role::Foreman => 60,
            Role::Worker => 40,
            Role::Client => 20,
        }
    }

    /// Roles this role may assign and manage. Always strictly lower level.
    pub fn manageable_roles(self) -> &'static [Role] {
        match self {
            Role::CompanyAdmin => &[
                Role::ProjectManager,
                Role::Foreman,
                Role::Worker,
                Role::Client,
            ],
            Role::ProjectManager => &[Role::Foreman, Role::Worker, Role::Client],
            Role::Foreman => &[Role::Worker],
            Role::Worker | Role::Client => &[],
        }
    }

    pub fn permission_set(self) -> BTreeSet<Permission> {
        self.permissions().iter().copied().collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// A role name with no entry in the role tables.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);
