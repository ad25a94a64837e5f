pub mod password;
pub use password::PasswordHasher;

pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, LoginResult};
pub use auth_service_impl::InMemoryAuthService;

pub mod investigation_service;
pub mod investigation_service_impl;
pub use investigation_service::{InvestigationError, InvestigationList, InvestigationService};
pub use investigation_service_impl::InMemoryInvestigationService;

pub mod intel;
pub use intel::{IntelError, IntelService};
