//! Construction scheduling: a Gantt layout engine and a role-based access
//! model, with an egui front end.
//!
//! The [`gantt`] and [`rbac`] modules are pure and UI-free; [`app`] and
//! [`ui`] wire them into an eframe application.

pub mod app;
pub mod config;
pub mod error;
pub mod gantt;
pub mod io;
pub mod model;
pub mod rbac;
pub mod ui;

pub use error::{Result, SiteGanttError};
