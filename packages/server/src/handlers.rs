//! HTTP handler functions for the fire map API.

use std::sync::Arc;

use actix_web::{HttpResponse, web};
use fire_map_analytics::breakdown::{
    coverage_totals, incident_hectares_correlation, municipality_impact, top_causes,
};
use fire_map_analytics::filter::apply_filters;
use fire_map_analytics::pipeline::aggregate_by_municipality;
use fire_map_analytics_models::FilterParams;
use fire_map_fire_models::CoverageGroup;
use fire_map_server_models::{
    AggregateQueryParams, ApiAggregateResponse, ApiCausesResponse, ApiCorrelationResponse,
    ApiCoverageResponse, ApiHealth,
};
use fire_map_source::clean::clean_rows;
use fire_map_source::{FetchOptions, IncidentSource as _, SourceError};
use fire_map_source_models::{CleanReport, IncidentRecord};

use crate::AppState;

/// Number of causes returned by the causes endpoint.
const TOP_CAUSES_LIMIT: usize = 10;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/aggregates`
///
/// The map feature payload: per-municipality aggregates plus KPI
/// summary. Returns 503 when the coordinate lookup failed to load —
/// map features are down, the non-geographic endpoints still work.
pub async fn aggregates(
    state: web::Data<AppState>,
    params: web::Query<AggregateQueryParams>,
) -> HttpResponse {
    let Some(lookup) = &state.lookup else {
        return HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "error": "coordinate lookup unavailable; map features are disabled"
        }));
    };

    match fetch_filtered(&state, &params).await {
        Ok((records, clean)) => match aggregate_by_municipality(&records, lookup, clean) {
            Ok(report) => HttpResponse::Ok().json(ApiAggregateResponse::from_report(report)),
            Err(e) => {
                log::error!("Aggregation failed: {e}");
                HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": "failed to aggregate incidents"
                }))
            }
        },
        Err(e) => {
            log::warn!("Fetch failed, serving empty aggregate state: {e}");
            HttpResponse::Ok().json(ApiAggregateResponse::empty_with_notice(format!(
                "data source unavailable: {e}"
            )))
        }
    }
}

/// `GET /api/causes`
///
/// Top fire causes across the filtered set, matched or not.
pub async fn causes(
    state: web::Data<AppState>,
    params: web::Query<AggregateQueryParams>,
) -> HttpResponse {
    match fetch_filtered(&state, &params).await {
        Ok((records, _)) => HttpResponse::Ok().json(ApiCausesResponse {
            causes: top_causes(&records, TOP_CAUSES_LIMIT),
            notice: None,
        }),
        Err(e) => {
            log::warn!("Fetch failed, serving empty causes: {e}");
            HttpResponse::Ok().json(ApiCausesResponse {
                causes: Vec::new(),
                notice: Some(format!("data source unavailable: {e}")),
            })
        }
    }
}

/// `GET /api/coverage`
///
/// Affected area per vegetation coverage group.
pub async fn coverage(
    state: web::Data<AppState>,
    params: web::Query<AggregateQueryParams>,
) -> HttpResponse {
    match fetch_filtered(&state, &params).await {
        Ok((records, _)) => HttpResponse::Ok().json(ApiCoverageResponse {
            coverage: coverage_totals(&records),
            notice: None,
        }),
        Err(e) => {
            log::warn!("Fetch failed, serving empty coverage totals: {e}");
            HttpResponse::Ok().json(ApiCoverageResponse {
                coverage: Vec::new(),
                notice: Some(format!("data source unavailable: {e}")),
            })
        }
    }
}

/// `GET /api/correlation`
///
/// Incident-count vs affected-hectares correlation across
/// municipalities, with the per-municipality impact rows behind it.
pub async fn correlation(
    state: web::Data<AppState>,
    params: web::Query<AggregateQueryParams>,
) -> HttpResponse {
    match fetch_filtered(&state, &params).await {
        Ok((records, _)) => {
            let impacts = municipality_impact(&records);
            HttpResponse::Ok().json(ApiCorrelationResponse {
                correlation: incident_hectares_correlation(&impacts),
                impacts,
                notice: None,
            })
        }
        Err(e) => {
            log::warn!("Fetch failed, serving empty correlation: {e}");
            HttpResponse::Ok().json(ApiCorrelationResponse {
                correlation: None,
                impacts: Vec::new(),
                notice: Some(format!("data source unavailable: {e}")),
            })
        }
    }
}

/// Fetches (or reuses) the cleaned incident set for the query, then
/// applies the in-memory coverage filter.
///
/// Department and date filters are pushed down to the source query and
/// form the cache key; the coverage filter can only be evaluated after
/// cleaning, so it is applied locally on every request.
async fn fetch_filtered(
    state: &web::Data<AppState>,
    params: &AggregateQueryParams,
) -> Result<(Vec<IncidentRecord>, CleanReport), SourceError> {
    let options = FetchOptions {
        department: params.department.clone(),
        date_from: params.from,
        date_to: params.to,
        limit: params.limit,
    };

    let cached = state
        .cache
        .lock()
        .expect("fetch cache mutex poisoned")
        .get(&options);

    let (records, clean) = if let Some(hit) = cached {
        log::debug!("Fetch cache hit for {options:?}");
        hit
    } else {
        let rows = state.definition.fetch_rows(&options).await?;
        let (cleaned, report) = clean_rows(&rows, &state.definition.fields);
        let records = Arc::new(cleaned);
        state
            .cache
            .lock()
            .expect("fetch cache mutex poisoned")
            .store(options, Arc::clone(&records), report);
        (records, report)
    };

    let coverage_group = params
        .coverage
        .as_deref()
        .and_then(|raw| raw.trim().to_uppercase().parse::<CoverageGroup>().ok());

    let filter = FilterParams {
        coverage: coverage_group,
        ..FilterParams::default()
    };
    Ok((apply_filters(&records, &filter), clean))
}
