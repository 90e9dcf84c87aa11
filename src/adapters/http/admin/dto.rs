//! HTTP DTOs for admin endpoints.

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityParams {
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperatorListParams {
    #[serde(default)]
    pub pending_only: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApprovalRequest {
    pub approved: bool,
}
