//! Transient list filters and pagination for the table views.

use chrono::{DateTime, Utc};
use cmc_infra_analytics_models::{
    AssetFilter, ComplaintFilter, CrewFilter, DEFAULT_PAGE_LIMIT, IncidentFilter, MAX_PAGE_LIMIT,
    Page, Paged, WorkOrderFilter,
};
use cmc_infra_models::{Asset, Complaint, Crew, Incident, MockDataset, WorkOrder};

use crate::AnalyticsError;

/// Case-insensitive substring match of `needle` against any of `fields`.
/// An absent or blank needle matches everything.
fn matches_search(needle: Option<&str>, fields: &[&str]) -> bool {
    let Some(needle) = needle.map(str::trim).filter(|n| !n.is_empty()) else {
        return true;
    };
    let needle = needle.to_lowercase();
    fields.iter().any(|f| f.to_lowercase().contains(&needle))
}

fn opt_eq<T: PartialEq>(wanted: Option<&T>, actual: &T) -> bool {
    wanted.is_none_or(|w| w == actual)
}

fn ward_eq(wanted: Option<&str>, actual: &str) -> bool {
    wanted.is_none_or(|w| w.eq_ignore_ascii_case(actual))
}

/// Resolves a requested list limit, defaulting to [`DEFAULT_PAGE_LIMIT`].
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidFilter`] if the limit is zero or
/// exceeds [`MAX_PAGE_LIMIT`].
pub fn validate_limit(limit: Option<usize>) -> Result<usize, AnalyticsError> {
    let limit = limit.unwrap_or(DEFAULT_PAGE_LIMIT);
    if limit == 0 || limit > MAX_PAGE_LIMIT {
        return Err(AnalyticsError::InvalidFilter {
            message: format!("limit must be between 1 and {MAX_PAGE_LIMIT}, got {limit}"),
        });
    }
    Ok(limit)
}

/// Slices `items` to the requested page.
///
/// # Errors
///
/// Returns [`AnalyticsError::InvalidFilter`] if the limit is out of range
/// (see [`validate_limit`]).
pub fn paginate<T: Clone>(items: &[&T], page: Page) -> Result<Paged<T>, AnalyticsError> {
    let limit = validate_limit(page.limit)?;
    let offset = page.offset.unwrap_or(0);
    Ok(Paged {
        total: items.len(),
        offset,
        items: items
            .iter()
            .skip(offset)
            .take(limit)
            .map(|item| (*item).clone())
            .collect(),
    })
}

/// Assets matching `filter`.
#[must_use]
pub fn filter_assets<'a>(data: &'a MockDataset, filter: &AssetFilter) -> Vec<&'a Asset> {
    data.assets
        .iter()
        .filter(|a| opt_eq(filter.asset_type.as_ref(), &a.asset_type))
        .filter(|a| ward_eq(filter.ward.as_deref(), &a.ward))
        .filter(|a| opt_eq(filter.risk_level.as_ref(), &a.risk_level))
        .filter(|a| {
            matches_search(
                filter.search.as_deref(),
                &[a.id.as_str(), a.name.as_str(), a.segment.as_str()],
            )
        })
        .collect()
}

/// Work orders matching `filter`; SLA status is evaluated at `now`.
#[must_use]
pub fn filter_work_orders<'a>(
    data: &'a MockDataset,
    filter: &WorkOrderFilter,
    now: DateTime<Utc>,
) -> Vec<&'a WorkOrder> {
    data.work_orders
        .iter()
        .filter(|wo| opt_eq(filter.status.as_ref(), &wo.status))
        .filter(|wo| opt_eq(filter.severity.as_ref(), &wo.severity))
        .filter(|wo| opt_eq(filter.sla_status.as_ref(), &wo.sla_status_at(now)))
        .filter(|wo| opt_eq(filter.asset_type.as_ref(), &wo.asset_type))
        .filter(|wo| opt_eq(filter.asset_id.as_ref(), &wo.asset_id))
        .filter(|wo| {
            matches_search(
                filter.search.as_deref(),
                &[
                    wo.id.as_str(),
                    wo.title.as_str(),
                    wo.assigned_crew.as_deref().unwrap_or_default(),
                ],
            )
        })
        .collect()
}

/// Complaints matching `filter`.
#[must_use]
pub fn filter_complaints<'a>(
    data: &'a MockDataset,
    filter: &ComplaintFilter,
) -> Vec<&'a Complaint> {
    data.complaints
        .iter()
        .filter(|c| opt_eq(filter.status.as_ref(), &c.status))
        .filter(|c| opt_eq(filter.priority.as_ref(), &c.priority))
        .filter(|c| opt_eq(filter.category.as_ref(), &c.category))
        .filter(|c| opt_eq(filter.sentiment.as_ref(), &c.sentiment))
        .filter(|c| ward_eq(filter.ward.as_deref(), &c.ward))
        .filter(|c| {
            matches_search(
                filter.search.as_deref(),
                &[c.id.as_str(), c.citizen_name.as_str(), c.location.as_str()],
            )
        })
        .collect()
}

/// Incidents matching `filter`.
#[must_use]
pub fn filter_incidents<'a>(
    data: &'a MockDataset,
    filter: &IncidentFilter,
) -> Vec<&'a Incident> {
    data.incidents
        .iter()
        .filter(|i| opt_eq(filter.incident_type.as_ref(), &i.incident_type))
        .filter(|i| opt_eq(filter.status.as_ref(), &i.status))
        .filter(|i| opt_eq(filter.severity.as_ref(), &i.severity))
        .filter(|i| ward_eq(filter.ward.as_deref(), &i.ward))
        .collect()
}

/// Crews matching `filter`.
#[must_use]
pub fn filter_crews<'a>(data: &'a MockDataset, filter: &CrewFilter) -> Vec<&'a Crew> {
    data.crews
        .iter()
        .filter(|c| opt_eq(filter.availability.as_ref(), &c.availability))
        .filter(|c| opt_eq(filter.shift.as_ref(), &c.shift))
        .filter(|c| {
            matches_search(
                filter.search.as_deref(),
                &[c.id.as_str(), c.name.as_str(), c.team_lead.as_str()],
            )
        })
        .collect()
}

/// Work orders raised against `asset_id`.
///
/// # Errors
///
/// Returns [`AnalyticsError::NotFound`] if no such asset exists.
pub fn work_orders_for_asset<'a>(
    data: &'a MockDataset,
    asset_id: &str,
) -> Result<Vec<&'a WorkOrder>, AnalyticsError> {
    if data.asset(asset_id).is_none() {
        return Err(AnalyticsError::NotFound {
            kind: "asset",
            id: asset_id.to_string(),
        });
    }
    Ok(data
        .work_orders
        .iter()
        .filter(|wo| wo.asset_id == asset_id)
        .collect())
}

#[cfg(test)]
mod tests {
    use cmc_infra_models::{AssetType, Availability, Severity, Status};

    use super::*;
    use crate::test_support::{dataset, now};

    #[test]
    fn empty_filter_matches_everything() {
        let data = dataset();
        assert_eq!(
            filter_assets(&data, &AssetFilter::default()).len(),
            data.assets.len()
        );
        assert_eq!(
            filter_work_orders(&data, &WorkOrderFilter::default(), now()).len(),
            data.work_orders.len()
        );
        assert_eq!(
            filter_crews(&data, &CrewFilter::default()).len(),
            data.crews.len()
        );
    }

    #[test]
    fn asset_filters_combine() {
        let data = dataset();
        let filter = AssetFilter {
            asset_type: Some(AssetType::Road),
            risk_level: Some(Severity::Critical),
            ..AssetFilter::default()
        };
        let hits = filter_assets(&data, &filter);
        assert!(
            hits.iter()
                .all(|a| a.asset_type == AssetType::Road && a.risk_level == Severity::Critical)
        );
        let expected = data
            .assets
            .iter()
            .filter(|a| a.asset_type == AssetType::Road && a.condition_score < 40)
            .count();
        assert_eq!(hits.len(), expected);
    }

    #[test]
    fn search_is_case_insensitive() {
        let data = dataset();
        let filter = AssetFilter {
            search: Some("DRAIN-0000".to_string()),
            ..AssetFilter::default()
        };
        let hits = filter_assets(&data, &filter);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|a| a.asset_type == AssetType::Drain));
    }

    #[test]
    fn ward_filter_ignores_case() {
        let data = dataset();
        let ward = data.complaints[0].ward.to_uppercase();
        let filter = ComplaintFilter {
            ward: Some(ward),
            status: Some(data.complaints[0].status),
            ..ComplaintFilter::default()
        };
        let hits = filter_complaints(&data, &filter);
        assert!(hits.iter().any(|c| c.id == data.complaints[0].id));
    }

    #[test]
    fn open_work_orders_have_no_crew() {
        let data = dataset();
        let filter = WorkOrderFilter {
            status: Some(Status::Open),
            ..WorkOrderFilter::default()
        };
        assert!(
            filter_work_orders(&data, &filter, now())
                .iter()
                .all(|wo| wo.assigned_crew.is_none())
        );
    }

    #[test]
    fn crew_filter_by_availability() {
        let data = dataset();
        let filter = CrewFilter {
            availability: Some(Availability::Available),
            ..CrewFilter::default()
        };
        assert!(
            filter_crews(&data, &filter)
                .iter()
                .all(|c| c.availability == Availability::Available)
        );
    }

    #[test]
    fn incidents_filter_by_ward() {
        let data = dataset();
        let ward = data.incidents[0].ward.clone();
        let filter = IncidentFilter {
            ward: Some(ward.clone()),
            ..IncidentFilter::default()
        };
        let hits = filter_incidents(&data, &filter);
        assert!(!hits.is_empty());
        assert!(hits.iter().all(|i| i.ward == ward));
    }

    #[test]
    fn pagination_windows_and_limits() {
        let data = dataset();
        let all = filter_assets(&data, &AssetFilter::default());
        let page = paginate(
            &all,
            Page {
                limit: Some(10),
                offset: Some(205),
            },
        )
        .unwrap();
        assert_eq!(page.total, data.assets.len());
        assert_eq!(page.items.len(), 5);
        assert_eq!(page.items[0].id, data.assets[205].id);

        let err = paginate(
            &all,
            Page {
                limit: Some(0),
                offset: None,
            },
        )
        .unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidFilter { .. }));
    }

    #[test]
    fn limits_default_and_reject_out_of_range() {
        assert_eq!(validate_limit(None).unwrap(), DEFAULT_PAGE_LIMIT);
        assert_eq!(validate_limit(Some(MAX_PAGE_LIMIT)).unwrap(), MAX_PAGE_LIMIT);
        assert!(validate_limit(Some(0)).is_err());
        assert!(validate_limit(Some(MAX_PAGE_LIMIT + 1)).is_err());
    }

    #[test]
    fn work_orders_for_known_and_unknown_assets() {
        let data = dataset();
        let asset_id = data.work_orders[0].asset_id.clone();
        let orders = work_orders_for_asset(&data, &asset_id).unwrap();
        assert!(orders.iter().any(|wo| wo.id == data.work_orders[0].id));
        assert!(orders.iter().all(|wo| wo.asset_id == asset_id));

        let err = work_orders_for_asset(&data, "road-999999").unwrap_err();
        assert!(matches!(err, AnalyticsError::NotFound { kind: "asset", .. }));
    }
}
