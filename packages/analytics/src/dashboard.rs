//! Dashboard aggregates: headline KPIs, chart series, the ward heat grid,
//! and the recent-activity panels.

use chrono::{DateTime, Utc};
use cmc_infra_analytics_models::{DashboardKpis, LabelCount, WardRisk};
use cmc_infra_models::{
    AssetType, Availability, ComplaintCategory, Crew, Incident, MockDataset, Severity,
};

/// Number of wards shown on the heat grid.
pub const WARD_GRID_SIZE: usize = 12;

/// Number of rows in the recent-incidents and crew-board panels.
pub const PANEL_SIZE: usize = 5;

/// Computes the headline KPIs as observed at `now`.
#[must_use]
pub fn dashboard_kpis(data: &MockDataset, now: DateTime<Utc>) -> DashboardKpis {
    let today = now.date_naive();
    DashboardKpis {
        open_work_orders: data
            .work_orders
            .iter()
            .filter(|wo| wo.status.is_active())
            .count(),
        sla_breaches: data
            .work_orders
            .iter()
            .filter(|wo| wo.is_breached_at(now))
            .count(),
        active_incidents: data
            .incidents
            .iter()
            .filter(|i| i.status.is_active())
            .count(),
        complaints_today: data
            .complaints
            .iter()
            .filter(|c| c.created_at.date_naive() == today)
            .count(),
        assets_at_risk: data
            .assets
            .iter()
            .filter(|a| a.risk_level >= Severity::High)
            .count(),
    }
}

/// Work-order counts per asset type, in [`AssetType::all`] order.
#[must_use]
pub fn work_orders_by_asset_type(data: &MockDataset) -> Vec<LabelCount> {
    AssetType::all()
        .iter()
        .map(|t| LabelCount {
            label: t.chart_label().to_string(),
            count: data
                .work_orders
                .iter()
                .filter(|wo| wo.asset_type == *t)
                .count(),
        })
        .collect()
}

/// Complaint counts per dashboard bucket: Road, Drain, Light, Waste, Other.
#[must_use]
pub fn complaints_by_category(data: &MockDataset) -> Vec<LabelCount> {
    let mut buckets: Vec<LabelCount> = Vec::new();
    for category in ComplaintCategory::all() {
        let label = category.chart_label();
        if !buckets.iter().any(|b| b.label == label) {
            buckets.push(LabelCount {
                label: label.to_string(),
                count: 0,
            });
        }
    }
    for complaint in &data.complaints {
        let label = complaint.category.chart_label();
        if let Some(bucket) = buckets.iter_mut().find(|b| b.label == label) {
            bucket.count += 1;
        }
    }
    buckets
}

/// Grades a ward from its critical and high-risk asset counts.
///
/// More than 5 critical assets is critical; otherwise more than 10 high
/// assets is high, more than 5 is medium, and anything less is low.
#[must_use]
pub const fn grade_ward(critical_assets: usize, high_assets: usize) -> Severity {
    if critical_assets > 5 {
        Severity::Critical
    } else if high_assets > 10 {
        Severity::High
    } else if high_assets > 5 {
        Severity::Medium
    } else {
        Severity::Low
    }
}

/// Risk grades for the first `limit` distinct wards, in the order the
/// wards first appear in the asset list.
#[must_use]
pub fn ward_risk_overview(data: &MockDataset, limit: usize) -> Vec<WardRisk> {
    let mut wards: Vec<&str> = Vec::new();
    for asset in &data.assets {
        if wards.len() == limit {
            break;
        }
        if !wards.contains(&asset.ward.as_str()) {
            wards.push(&asset.ward);
        }
    }

    wards
        .into_iter()
        .map(|ward| {
            let in_ward = data.assets.iter().filter(|a| a.ward == ward);
            let (critical_assets, high_assets) =
                in_ward.fold((0, 0), |(c, h), a| match a.risk_level {
                    Severity::Critical => (c + 1, h),
                    Severity::High => (c, h + 1),
                    Severity::Medium | Severity::Low => (c, h),
                });
            WardRisk {
                ward: ward.to_string(),
                risk: grade_ward(critical_assets, high_assets),
                critical_assets,
                high_assets,
            }
        })
        .collect()
}

/// The `limit` most recently reported incidents, newest first.
#[must_use]
pub fn recent_incidents(data: &MockDataset, limit: usize) -> Vec<Incident> {
    let mut incidents: Vec<&Incident> = data.incidents.iter().collect();
    incidents.sort_by(|a, b| b.reported_at.cmp(&a.reported_at));
    incidents.into_iter().take(limit).cloned().collect()
}

/// Up to `limit` crews currently on duty.
#[must_use]
pub fn active_crews(data: &MockDataset, limit: usize) -> Vec<Crew> {
    data.crews
        .iter()
        .filter(|c| c.availability == Availability::OnDuty)
        .take(limit)
        .cloned()
        .collect()
}
