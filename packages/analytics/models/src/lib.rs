#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Filter, pagination, and aggregate result types for infrastructure
//! analytics.
//!
//! Filters deserialize straight from query strings, so every field is
//! optional and uses the same wire names as the entities it filters.

use cmc_infra_models::{
    AssetType, Availability, ComplaintCategory, IncidentType, RiskLevel, Sentiment, Severity,
    Shift, SlaStatus, Status,
};
use serde::{Deserialize, Serialize};

/// Default page size when none is requested.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Largest page size a caller may request.
pub const MAX_PAGE_LIMIT: usize = 1000;

/// Pagination window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Maximum number of items to return.
    pub limit: Option<usize>,
    /// Number of matching items to skip.
    pub offset: Option<usize>,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: Some(DEFAULT_PAGE_LIMIT),
            offset: Some(0),
        }
    }
}

/// One page of matching items plus the total match count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paged<T> {
    /// Number of items matching the filter, before pagination.
    pub total: usize,
    /// Offset the page starts at.
    pub offset: usize,
    /// Items in this page.
    pub items: Vec<T>,
}

/// Asset list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFilter {
    /// Only this asset type.
    #[serde(rename = "type")]
    pub asset_type: Option<AssetType>,
    /// Only this ward.
    pub ward: Option<String>,
    /// Only this risk level.
    pub risk_level: Option<RiskLevel>,
    /// Case-insensitive match on ID, name, or segment.
    pub search: Option<String>,
}

/// Work-order list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderFilter {
    /// Only this status.
    pub status: Option<Status>,
    /// Only this severity.
    pub severity: Option<Severity>,
    /// Only this SLA status, evaluated at query time.
    pub sla_status: Option<SlaStatus>,
    /// Only work on this asset type.
    pub asset_type: Option<AssetType>,
    /// Only work on this asset.
    pub asset_id: Option<String>,
    /// Case-insensitive match on ID, title, or assigned crew.
    pub search: Option<String>,
}

/// Complaint list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintFilter {
    /// Only this status.
    pub status: Option<Status>,
    /// Only this priority.
    pub priority: Option<Severity>,
    /// Only this category.
    pub category: Option<ComplaintCategory>,
    /// Only this sentiment.
    pub sentiment: Option<Sentiment>,
    /// Only this ward.
    pub ward: Option<String>,
    /// Case-insensitive match on ID, citizen name, or location.
    pub search: Option<String>,
}

/// Incident list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentFilter {
    /// Only this incident type.
    #[serde(rename = "type")]
    pub incident_type: Option<IncidentType>,
    /// Only this status.
    pub status: Option<Status>,
    /// Only this severity.
    pub severity: Option<Severity>,
    /// Only this ward.
    pub ward: Option<String>,
}

/// Crew list filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewFilter {
    /// Only this availability.
    pub availability: Option<Availability>,
    /// Only this shift.
    pub shift: Option<Shift>,
    /// Case-insensitive match on ID, name, or team lead.
    pub search: Option<String>,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardKpis {
    /// Work orders that are open or in progress.
    pub open_work_orders: usize,
    /// Work orders whose SLA deadline has passed.
    pub sla_breaches: usize,
    /// Incidents that are open or in progress.
    pub active_incidents: usize,
    /// Complaints lodged on the current UTC day.
    pub complaints_today: usize,
    /// Assets with critical or high risk.
    pub assets_at_risk: usize,
}

/// A labelled count for chart series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelCount {
    /// Series label.
    pub label: String,
    /// Count.
    pub count: usize,
}

/// Risk grade of one ward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardRisk {
    /// Ward name.
    pub ward: String,
    /// Grade derived from the ward's critical and high-risk asset counts.
    pub risk: Severity,
    /// Critical-risk assets in the ward.
    pub critical_assets: usize,
    /// High-risk assets in the ward.
    pub high_assets: usize,
}

/// Items split into the three kanban columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBoard<T> {
    /// Open items.
    pub open: Vec<T>,
    /// In-progress items.
    pub in_progress: Vec<T>,
    /// Resolved or closed items.
    pub done: Vec<T>,
}

impl<T> Default for StatusBoard<T> {
    fn default() -> Self {
        Self {
            open: Vec::new(),
            in_progress: Vec::new(),
            done: Vec::new(),
        }
    }
}

impl<T> StatusBoard<T> {
    /// Total number of items on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.open.len() + self.in_progress.len() + self.done.len()
    }

    /// Whether the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Crew counts by availability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewAvailability {
    /// Free for dispatch.
    pub available: usize,
    /// Out on a job.
    pub on_duty: usize,
    /// Not working.
    pub off_duty: usize,
}

/// An asset inside an incident's impact radius.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactedAsset {
    /// Asset ID.
    pub asset_id: String,
    /// Asset type.
    pub asset_type: AssetType,
    /// Asset name.
    pub name: String,
    /// Asset risk level.
    pub risk_level: RiskLevel,
    /// Great-circle distance from the incident, in metres.
    pub distance_meters: f64,
}

/// Assets affected by one incident, nearest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentImpact {
    /// Incident ID.
    pub incident_id: String,
    /// Impact radius in metres.
    pub impact_radius: u32,
    /// Affected assets.
    pub assets: Vec<ImpactedAsset>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_use_entity_wire_names() {
        let filter: AssetFilter =
            serde_json::from_str(r#"{"type":"streetlight","riskLevel":"high"}"#).unwrap();
        assert_eq!(filter.asset_type, Some(AssetType::Streetlight));
        assert_eq!(filter.risk_level, Some(Severity::High));
        assert_eq!(filter.ward, None);

        let filter: WorkOrderFilter = serde_json::from_str(r#"{"slaStatus":"at_risk"}"#).unwrap();
        assert_eq!(filter.sla_status, Some(SlaStatus::AtRisk));
    }

    #[test]
    fn board_len_counts_all_columns() {
        let board = StatusBoard {
            open: vec![1, 2],
            in_progress: vec![3],
            done: vec![],
        };
        assert_eq!(board.len(), 3);
        assert!(!board.is_empty());
        assert!(StatusBoard::<u8>::default().is_empty());
    }
}
