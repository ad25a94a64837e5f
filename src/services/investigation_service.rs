//! Domain service for investigations and their findings.
//!
//! Investigations are owned by the user who created them. Admins can reach
//! every record; other users only see their own, and anything else looks
//! like it does not exist.

use thiserror::Error;

use crate::models::investigation::{
    Finding, Investigation, InvestigationStatistics, InvestigationUpdate, NewFinding,
    NewInvestigation,
};
use crate::models::user::User;

/// Errors specific to investigation operations.
#[derive(Debug, Error)]
pub enum InvestigationError {
    #[error("Investigation {0} not found")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Listing result for the caller's investigations.
#[derive(Debug, Clone)]
pub struct InvestigationList {
    pub investigations: Vec<Investigation>,
    pub statistics: InvestigationStatistics,
}

/// Domain service trait for investigations.
#[async_trait::async_trait]
pub trait InvestigationService: Send + Sync {
    /// # Errors
    ///
    /// Returns [`InvestigationError::Validation`] when the name is missing or too long.
    async fn create(
        &self,
        owner: &User,
        input: NewInvestigation,
    ) -> Result<Investigation, InvestigationError>;

    async fn list(&self, user: &User) -> InvestigationList;

    async fn get(&self, user: &User, id: &str) -> Result<Investigation, InvestigationError>;

    /// # Errors
    ///
    /// Returns [`InvestigationError::Validation`] for an out-of-range progress
    /// or an empty name.
    async fn update(
        &self,
        user: &User,
        id: &str,
        update: InvestigationUpdate,
    ) -> Result<Investigation, InvestigationError>;

    async fn delete(&self, user: &User, id: &str) -> Result<(), InvestigationError>;

    /// Appends a finding at the end of the investigation's ordered list.
    async fn add_finding(
        &self,
        user: &User,
        id: &str,
        input: NewFinding,
    ) -> Result<Finding, InvestigationError>;

    async fn count(&self) -> usize;
}
