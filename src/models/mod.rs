//! Data models
//!
//! This module contains all data structures used throughout the fitcoach
//! backend. Models represent:
//! - Stored entities (User, Session, Consultation, ProgressEntry)
//! - The static coaching package catalog
//! - Input types consumed by the store layer

mod consultation;
mod package;
mod progress;
mod session;
mod user;

pub use consultation::{Consultation, ConsultationStatus, NewConsultation};
pub use package::{package_catalog, Package};
pub use progress::{NewProgressEntry, ProgressEntry};
pub use session::Session;
pub use user::{NewUser, User};
