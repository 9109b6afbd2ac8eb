//! Role-based access control.
//!
//! Static role → permission and role → hierarchy tables plus pure query
//! functions. Nothing here knows about the UI.

pub mod evaluator;
pub mod permission;
pub mod role;
pub mod route;

pub use evaluator::{
    can_access_route, can_manage_role, has_all, has_any, has_permission, role_level, AccessContext,
};
pub use permission::{Permission, PermissionDomain, UnknownPermission};
pub use role::{Role, UnknownRole};
pub use route::Route;
