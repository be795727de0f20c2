//! Status boards for the work-order and complaint pages, the SLA
//! attention list, and crew availability.

use chrono::{DateTime, Utc};
use cmc_infra_analytics_models::{CrewAvailability, StatusBoard};
use cmc_infra_models::{Availability, Complaint, MockDataset, Status, WorkOrder};

fn board<'a, T: Clone + 'a>(
    items: impl IntoIterator<Item = &'a T>,
    status_of: impl Fn(&T) -> Status,
) -> StatusBoard<T> {
    let mut board = StatusBoard::default();
    for item in items {
        match status_of(item) {
            Status::Open => board.open.push(item.clone()),
            Status::InProgress => board.in_progress.push(item.clone()),
            Status::Resolved | Status::Closed => board.done.push(item.clone()),
        }
    }
    board
}

/// Splits work orders into open, in-progress, and done columns, with SLA
/// status re-derived at `now`.
#[must_use]
pub fn work_order_board(data: &MockDataset, now: DateTime<Utc>) -> StatusBoard<WorkOrder> {
    let mut board = board(&data.work_orders, |wo| wo.status);
    for wo in board
        .open
        .iter_mut()
        .chain(&mut board.in_progress)
        .chain(&mut board.done)
    {
        wo.sla_status = wo.sla_status_at(now);
    }
    board
}

/// Splits complaints into open, in-progress, and done columns.
#[must_use]
pub fn complaint_board(data: &MockDataset) -> StatusBoard<Complaint> {
    board(&data.complaints, |c| c.status)
}

/// Work orders whose SLA is breached or at risk at `now`, most overdue
/// first, capped at `limit`. Returned orders carry their status at `now`.
#[must_use]
pub fn sla_attention(data: &MockDataset, now: DateTime<Utc>, limit: usize) -> Vec<WorkOrder> {
    let mut flagged: Vec<&WorkOrder> = data
        .work_orders
        .iter()
        .filter(|wo| wo.sla_status_at(now).needs_attention())
        .collect();
    flagged.sort_by_key(|wo| wo.sla_deadline);
    flagged
        .into_iter()
        .take(limit)
        .map(|wo| WorkOrder {
            sla_status: wo.sla_status_at(now),
            ..wo.clone()
        })
        .collect()
}

/// Counts crews by availability.
#[must_use]
pub fn crew_availability(data: &MockDataset) -> CrewAvailability {
    data.crews
        .iter()
        .fold(CrewAvailability::default(), |mut acc, crew| {
            match crew.availability {
                Availability::Available => acc.available += 1,
                Availability::OnDuty => acc.on_duty += 1,
                Availability::OffDuty => acc.off_duty += 1,
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use cmc_infra_models::SlaStatus;

    use super::*;
    use crate::test_support::{dataset, now};

    #[test]
    fn boards_partition_every_item() {
        let data = dataset();
        let wo = work_order_board(&data, now());
        assert_eq!(wo.len(), data.work_orders.len());
        assert!(wo.open.iter().all(|w| w.status == Status::Open));
        assert!(wo.in_progress.iter().all(|w| w.status == Status::InProgress));
        assert!(wo.done.iter().all(|w| w.status.is_done()));

        let complaints = complaint_board(&data);
        assert_eq!(complaints.len(), data.complaints.len());
    }

    #[test]
    fn sla_attention_lists_breached_and_at_risk() {
        let data = dataset();
        let flagged = sla_attention(&data, now(), usize::MAX);
        let expected = data
            .work_orders
            .iter()
            .filter(|wo| matches!(wo.sla_status, SlaStatus::Breached | SlaStatus::AtRisk))
            .count();
        assert_eq!(flagged.len(), expected);
        assert!(flagged.windows(2).all(|w| w[0].sla_deadline <= w[1].sla_deadline));
        assert!(sla_attention(&data, now(), 3).len() <= 3);
    }

    #[test]
    fn work_order_board_reports_status_at_now() {
        let data = dataset();
        let later = now() + chrono::Duration::days(30);
        let board = work_order_board(&data, later);
        assert_eq!(board.len(), data.work_orders.len());
        assert!(
            board
                .open
                .iter()
                .chain(&board.in_progress)
                .chain(&board.done)
                .all(|wo| wo.sla_status == SlaStatus::Breached)
        );
    }

    #[test]
    fn sla_attention_reports_status_at_now() {
        let data = dataset();
        let later = now() + chrono::Duration::days(30);
        let flagged = sla_attention(&data, later, usize::MAX);
        assert_eq!(flagged.len(), data.work_orders.len());
        assert!(flagged.iter().all(|wo| wo.sla_status == SlaStatus::Breached));
    }

    #[test]
    fn crew_availability_sums_to_crew_count() {
        let data = dataset();
        let counts = crew_availability(&data);
        assert_eq!(
            counts.available + counts.on_duty + counts.off_duty,
            data.crews.len()
        );
    }
}
