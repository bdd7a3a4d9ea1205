//! API endpoint paths and wire types.

use serde::{Deserialize, Serialize};

// ============================================================================
// Endpoint Paths
// ============================================================================

/// Token issuance (login).
pub const TOKEN: &str = "/token/";

pub const TEACHERS: &str = "/teachers/";

pub const STUDENTS: &str = "/students/";

pub const EXAMS: &str = "/exams/exams/";

/// Exams assigned to the authenticated student.
pub const ASSIGNED_EXAMS: &str = "/exams/assigned/";

/// Collections that can be listed through the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Teachers,
    Students,
    Exams,
    AssignedExams,
}

impl Resource {
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Teachers => TEACHERS,
            Resource::Students => STUDENTS,
            Resource::Exams => EXAMS,
            Resource::AssignedExams => ASSIGNED_EXAMS,
        }
    }
}

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request body for token issuance. Not `Debug`: it carries the secret.
#[derive(Serialize)]
pub(crate) struct TokenRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response from token issuance.
#[derive(Deserialize)]
pub(crate) struct TokenResponse {
    pub access: String,
    pub refresh: String,
    pub role: String,
}

/// Error body returned by the API.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub detail: Option<String>,
}
