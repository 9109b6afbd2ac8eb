//! Permission queries over the static role tables.
//!
//! Every function takes `Option<Role>`: `None` stands for a role name that
//! did not resolve and is treated as holding nothing (fail-closed).

use super::permission::Permission;
use super::role::{Role, UnknownRole};
use super::route::Route;

pub fn has_permission(role: Option<Role>, permission: Permission) -> bool {
    role.is_some_and(|r| r.permissions().contains(&permission))
}

/// True if any listed permission is held. An empty list yields false.
pub fn has_any(role: Option<Role>, permissions: &[Permission]) -> bool {
    permissions.iter().any(|&p| has_permission(role, p))
}

/// True if every listed permission is held. An empty list yields true.
pub fn has_all(role: Option<Role>, permissions: &[Permission]) -> bool {
    permissions.iter().all(|&p| has_permission(role, p))
}

/// Empty requirements mean a public route; otherwise any one suffices.
pub fn can_access_route(role: Option<Role>, required: &[Permission]) -> bool {
    required.is_empty() || has_any(role, required)
}

pub fn can_manage_role(acting: Option<Role>, target: Role) -> bool {
    acting.is_some_and(|r| r.manageable_roles().contains(&target))
}

/// Hierarchy level, 0 for an unresolved role.
pub fn role_level(role: Option<Role>) -> u32 {
    role.map_or(0, Role::level)
}

/// The current user's role as seen by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessContext {
    role_name: String,
    role: Option<Role>,
}

impl AccessContext {
    pub fn new(role: Role) -> Self {
        Self {
            role_name: role.as_str().to_string(),
            role: Some(role),
        }
    }

    /// Resolve a role name from the session. Unknown names give a context
    /// with no permissions.
    pub fn from_role_name(name: &str) -> Self {
        let role = match name.parse::<Role>() {
            Ok(role) => Some(role),
            Err(UnknownRole(name)) => {
                tracing::warn!(role = %name, "unknown role, denying all permissions");
                None
            }
        };
        Self {
            role_name: name.to_string(),
            role,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.role
    }

    pub fn role_name(&self) -> &str {
        &self.role_name
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        has_permission(self.role, permission)
    }

    pub fn has_any(&self, permissions: &[Permission]) -> bool {
        has_any(self.role, permissions)
    }

    pub fn has_all(&self, permissions: &[Permission]) -> bool {
        has_all(self.role, permissions)
    }

    pub fn can_access(&self, route: Route) -> bool {
        can_access_route(self.role, route.required_permissions())
    }

    pub fn can_manage(&self, target: Role) -> bool {
        can_manage_role(self.role, target)
    }

    pub fn level(&self) -> u32 {
        role_level(self.role)
    }

    /// Routes visible to this role, in menu order.
    pub fn accessible_routes(&self) -> Vec<Route> {
        Route::ALL.into_iter().filter(|r| self.can_access(*r)).collect()
    }
}
