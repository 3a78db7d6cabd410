//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod company;
pub mod event;
pub mod hazard;
pub mod incident;
pub mod notification;
pub mod role;
pub mod session;
pub mod status;
pub mod training;
pub mod user;
pub mod work_plan;
