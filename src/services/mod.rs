//! Services layer - Business logic
//!
//! This module contains all business logic services for the fitcoach
//! backend. Services are responsible for:
//! - Implementing business rules
//! - Coordinating between the HTTP layer and the stores
//! - Handling validation and error cases

pub mod consultation;
pub mod password;
pub mod progress;
pub mod user;

pub use consultation::{ConsultationService, ConsultationServiceError};
pub use password::{hash_password, verify_password};
pub use progress::{ProgressService, ProgressServiceError};
pub use user::{LoginInput, RegisterInput, UserService, UserServiceError};
