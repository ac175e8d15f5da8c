//! Foundation types for the school portal.
//!
//! Error enum, role/session records, and the data-model records the JSON
//! resources deserialize into. This crate has no portal logic and no
//! platform dependencies.

pub mod error;
pub mod model;

pub use error::{PortalError, Result};
pub use model::{
    Announcement, LiveBroadcast, NewsItem, ReportCard, Role, Schedules, Session, UserDirectory,
    UserProfile, UserRecord,
};
