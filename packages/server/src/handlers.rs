//! HTTP handler functions for the dashboard API.

use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use cmc_infra_analytics::{AnalyticsError, boards, dashboard, filter, impact};
use cmc_infra_analytics_models::{
    AssetFilter, ComplaintFilter, CrewFilter, IncidentFilter, Page, WorkOrderFilter,
};
use cmc_infra_models::WorkOrder;
use cmc_infra_server_models::{ApiError, ApiHealth, DashboardSummary, DatasetCounts, LimitQuery};
use cmc_infra_settings::PreferencesPatch;

use crate::AppState;

/// Maps analytics failures onto status codes.
fn analytics_error(e: &AnalyticsError) -> HttpResponse {
    match e {
        AnalyticsError::NotFound { .. } => HttpResponse::NotFound().json(ApiError::new(e)),
        AnalyticsError::InvalidFilter { .. } => HttpResponse::BadRequest().json(ApiError::new(e)),
    }
}

fn settings_unavailable(e: impl std::fmt::Display) -> HttpResponse {
    log::error!("Settings store failure: {e}");
    HttpResponse::InternalServerError().json(ApiError::new("Failed to access settings"))
}

/// Re-derives stored SLA status at the request's reference instant.
fn with_live_sla(mut orders: Vec<WorkOrder>, now: DateTime<Utc>) -> Vec<WorkOrder> {
    for wo in &mut orders {
        wo.sla_status = wo.sla_status_at(now);
    }
    orders
}

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
        generated_at: state.generated_at,
        counts: DatasetCounts::from(state.dataset.as_ref()),
    })
}

/// `GET /api/wards`
pub async fn wards(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.dataset.wards)
}

/// `GET /api/dashboard`
///
/// Everything the dashboard page shows, evaluated at one instant.
pub async fn dashboard_summary(state: web::Data<AppState>) -> HttpResponse {
    let data = state.dataset.as_ref();
    let now = state.now();
    HttpResponse::Ok().json(DashboardSummary {
        as_of: now,
        kpis: dashboard::dashboard_kpis(data, now),
        work_orders_by_asset_type: dashboard::work_orders_by_asset_type(data),
        complaints_by_category: dashboard::complaints_by_category(data),
        ward_risk: dashboard::ward_risk_overview(data, dashboard::WARD_GRID_SIZE),
        recent_incidents: dashboard::recent_incidents(data, dashboard::PANEL_SIZE),
        active_crews: dashboard::active_crews(data, dashboard::PANEL_SIZE),
        crew_availability: boards::crew_availability(data),
        sla_attention: boards::sla_attention(data, now, dashboard::PANEL_SIZE),
    })
}

/// `GET /api/assets`
pub async fn assets(
    state: web::Data<AppState>,
    params: web::Query<AssetFilter>,
    page: web::Query<Page>,
) -> HttpResponse {
    let hits = filter::filter_assets(&state.dataset, &params);
    match filter::paginate(&hits, *page) {
        Ok(paged) => HttpResponse::Ok().json(paged),
        Err(e) => analytics_error(&e),
    }
}

/// `GET /api/assets/{id}`
pub async fn asset(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    match state.dataset.asset(&id) {
        Some(asset) => HttpResponse::Ok().json(asset),
        None => analytics_error(&AnalyticsError::NotFound { kind: "asset", id }),
    }
}

/// `GET /api/assets/{id}/work-orders`
pub async fn asset_work_orders(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    match filter::work_orders_for_asset(&state.dataset, &path) {
        Ok(orders) => {
            let orders = orders.into_iter().cloned().collect();
            HttpResponse::Ok().json(with_live_sla(orders, state.now()))
        }
        Err(e) => analytics_error(&e),
    }
}

/// `GET /api/work-orders`
///
/// `slaStatus` filtering and the returned SLA status both use the current
/// reference instant, not the generation instant.
pub async fn work_orders(
    state: web::Data<AppState>,
    params: web::Query<WorkOrderFilter>,
    page: web::Query<Page>,
) -> HttpResponse {
    let now = state.now();
    let hits = filter::filter_work_orders(&state.dataset, &params, now);
    match filter::paginate(&hits, *page) {
        Ok(mut paged) => {
            paged.items = with_live_sla(paged.items, now);
            HttpResponse::Ok().json(paged)
        }
        Err(e) => analytics_error(&e),
    }
}

/// `GET /api/work-orders/{id}`
pub async fn work_order(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    match state.dataset.work_order(&id) {
        Some(wo) => HttpResponse::Ok().json(WorkOrder {
            sla_status: wo.sla_status_at(state.now()),
            ..wo.clone()
        }),
        None => analytics_error(&AnalyticsError::NotFound {
            kind: "work order",
            id,
        }),
    }
}

/// `GET /api/work-orders/board`
pub async fn work_order_board(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(boards::work_order_board(&state.dataset, state.now()))
}

/// `GET /api/work-orders/sla-attention`
pub async fn sla_attention(
    state: web::Data<AppState>,
    params: web::Query<LimitQuery>,
) -> HttpResponse {
    match filter::validate_limit(params.limit) {
        Ok(limit) => {
            HttpResponse::Ok().json(boards::sla_attention(&state.dataset, state.now(), limit))
        }
        Err(e) => analytics_error(&e),
    }
}

/// `GET /api/complaints`
pub async fn complaints(
    state: web::Data<AppState>,
    params: web::Query<ComplaintFilter>,
    page: web::Query<Page>,
) -> HttpResponse {
    let hits = filter::filter_complaints(&state.dataset, &params);
    match filter::paginate(&hits, *page) {
        Ok(paged) => HttpResponse::Ok().json(paged),
        Err(e) => analytics_error(&e),
    }
}

/// `GET /api/complaints/board`
pub async fn complaint_board(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(boards::complaint_board(&state.dataset))
}

/// `GET /api/incidents`
pub async fn incidents(
    state: web::Data<AppState>,
    params: web::Query<IncidentFilter>,
    page: web::Query<Page>,
) -> HttpResponse {
    let hits = filter::filter_incidents(&state.dataset, &params);
    match filter::paginate(&hits, *page) {
        Ok(paged) => HttpResponse::Ok().json(paged),
        Err(e) => analytics_error(&e),
    }
}

/// `GET /api/incidents/{id}/impact`
pub async fn incident_impact(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    match impact::incident_impact(&state.dataset, &path) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => analytics_error(&e),
    }
}

/// `GET /api/crews`
pub async fn crews(
    state: web::Data<AppState>,
    params: web::Query<CrewFilter>,
    page: web::Query<Page>,
) -> HttpResponse {
    let hits = filter::filter_crews(&state.dataset, &params);
    match filter::paginate(&hits, *page) {
        Ok(paged) => HttpResponse::Ok().json(paged),
        Err(e) => analytics_error(&e),
    }
}

/// `GET /api/crews/{id}`
pub async fn crew(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    match state.dataset.crew(&id) {
        Some(crew) => HttpResponse::Ok().json(crew),
        None => analytics_error(&AnalyticsError::NotFound { kind: "crew", id }),
    }
}

/// `GET /api/settings`
pub async fn get_settings(state: web::Data<AppState>) -> HttpResponse {
    match state.settings.lock() {
        Ok(store) => HttpResponse::Ok().json(store.get()),
        Err(e) => settings_unavailable(e),
    }
}

/// `PUT /api/settings`
///
/// Accepts a partial update; omitted fields keep their current values.
pub async fn put_settings(
    state: web::Data<AppState>,
    body: web::Json<PreferencesPatch>,
) -> HttpResponse {
    let mut store = match state.settings.lock() {
        Ok(store) => store,
        Err(e) => return settings_unavailable(e),
    };
    match store.update(body.into_inner()) {
        Ok(prefs) => {
            log::info!("Updated preferences: {prefs:?}");
            HttpResponse::Ok().json(prefs)
        }
        Err(e) => settings_unavailable(e),
    }
}
