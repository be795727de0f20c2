#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the infrastructure dashboard server.
//!
//! Entities are returned in their model shapes. The types here cover the
//! envelopes and composite views that have no model counterpart.

use chrono::{DateTime, Utc};
use cmc_infra_analytics_models::{CrewAvailability, DashboardKpis, LabelCount, WardRisk};
use cmc_infra_models::{Crew, Incident, MockDataset, WorkOrder};
use serde::{Deserialize, Serialize};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// When the served dataset was generated.
    pub generated_at: DateTime<Utc>,
    /// Entity counts of the served dataset.
    pub counts: DatasetCounts,
}

/// Number of entities of each kind in a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetCounts {
    /// Assets.
    pub assets: usize,
    /// Work orders.
    pub work_orders: usize,
    /// Complaints.
    pub complaints: usize,
    /// Incidents.
    pub incidents: usize,
    /// Crews.
    pub crews: usize,
    /// Wards.
    pub wards: usize,
}

impl From<&MockDataset> for DatasetCounts {
    fn from(data: &MockDataset) -> Self {
        Self {
            assets: data.assets.len(),
            work_orders: data.work_orders.len(),
            complaints: data.complaints.len(),
            incidents: data.incidents.len(),
            crews: data.crews.len(),
            wards: data.wards.len(),
        }
    }
}

/// Error body returned with every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    pub error: String,
}

impl ApiError {
    /// Wraps any displayable error.
    pub fn new(error: impl std::fmt::Display) -> Self {
        Self {
            error: error.to_string(),
        }
    }
}

/// Everything the dashboard page renders, in one response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Instant the time-dependent figures were evaluated at.
    pub as_of: DateTime<Utc>,
    /// Headline KPIs.
    pub kpis: DashboardKpis,
    /// Work-order counts per asset type.
    pub work_orders_by_asset_type: Vec<LabelCount>,
    /// Complaint counts per category bucket.
    pub complaints_by_category: Vec<LabelCount>,
    /// Ward heat grid.
    pub ward_risk: Vec<WardRisk>,
    /// Newest incidents.
    pub recent_incidents: Vec<Incident>,
    /// Crews on duty.
    pub active_crews: Vec<Crew>,
    /// Crew counts by availability.
    pub crew_availability: CrewAvailability,
    /// Work orders breached or at risk, most overdue first.
    pub sla_attention: Vec<WorkOrder>,
}

/// Query parameters for endpoints that return a short capped list.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitQuery {
    /// Maximum number of items.
    pub limit: Option<usize>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_body_has_single_error_field() {
        let body = serde_json::to_value(ApiError::new("Unknown asset 'x'")).unwrap();
        assert_eq!(body, serde_json::json!({ "error": "Unknown asset 'x'" }));
    }

    #[test]
    fn counts_serialize_camel_case() {
        let counts = DatasetCounts {
            work_orders: 3,
            ..DatasetCounts::default()
        };
        let body = serde_json::to_value(counts).unwrap();
        assert_eq!(body["workOrders"], 3);
        assert_eq!(body["assets"], 0);
    }
}
