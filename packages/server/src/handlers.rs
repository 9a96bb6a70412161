//! HTTP handler functions for the ward AQI API.

use std::sync::Arc;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::header::{ContentDisposition, ContentType, DispositionParam, DispositionType};
use actix_web::{HttpRequest, HttpResponse, web};
use chrono::Utc;
use ward_aqi_analytics::detail::{self, DEFAULT_ACTIONS_PER_GROUP};
use ward_aqi_analytics::report;
use ward_aqi_aqi_models::{AqiCategory, Pollutant};
use ward_aqi_dataset::registry;
use ward_aqi_dataset_models::{PollutionLevel, Suggestion};
use ward_aqi_server_models::{
    ActionsQueryParams, ApiActions, ApiCityStats, ApiDataFile, ApiError, ApiHealth,
    ApiLegendEntry, ApiPrediction, ApiWardDetail, ApiWardMarker, SubmitSuggestionRequest,
};
use ward_aqi_suggestions::{SuggestionCategory, SuggestionError, parse_category};

use crate::AppState;

/// Number of sources listed in the ward detail summary.
const TOP_SOURCES: usize = 3;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/legend`
///
/// Returns the five AQI categories with their ranges and colors.
pub async fn legend() -> HttpResponse {
    let entries: Vec<ApiLegendEntry> = AqiCategory::all()
        .iter()
        .copied()
        .map(ApiLegendEntry::from)
        .collect();
    HttpResponse::Ok().json(entries)
}

/// `GET /api/stats`
pub async fn stats(state: web::Data<AppState>) -> HttpResponse {
    let dataset = &state.dataset;
    HttpResponse::Ok().json(ApiCityStats {
        stats: ward_aqi_analytics::city_stats(dataset),
        distribution: ward_aqi_analytics::category_distribution(
            dataset.pollution_levels().map(|(_, level)| level.aqi),
        ),
    })
}

/// `GET /api/wards`
///
/// Map markers for every ward with a current pollution level.
pub async fn wards(state: web::Data<AppState>) -> HttpResponse {
    let markers: Vec<ApiWardMarker> = state
        .dataset
        .pollution_levels()
        .map(ApiWardMarker::from)
        .collect();
    HttpResponse::Ok().json(markers)
}

/// `GET /api/wards/{id}`
pub async fn ward_detail(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    let dataset = &state.dataset;
    let Some(ward) = dataset.ward(&id) else {
        return ward_not_found(&id);
    };

    let level = dataset.pollution_level(&id);
    let category = level.map(PollutionLevel::classified_category);

    HttpResponse::Ok().json(ApiWardDetail {
        ward: ward.clone(),
        level: level.cloned(),
        category,
        category_label: category.map(|c| c.label().to_string()),
        summary: level.map(|level| detail::summary_sentence(ward, level)),
        pollutants: level.map(detail::pollutant_breakdown).unwrap_or_default(),
        top_sources: detail::top_sources(dataset.pollution_sources(&id), TOP_SOURCES),
    })
}

/// `GET /api/wards/{id}/sources`
///
/// All sources by descending contribution. Empty when the ward has none.
pub async fn ward_sources(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    if state.dataset.ward(&id).is_none() {
        return ward_not_found(&id);
    }
    HttpResponse::Ok().json(detail::sorted_sources(state.dataset.pollution_sources(&id)))
}

/// `GET /api/wards/{id}/trends`
pub async fn ward_trends(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    if state.dataset.ward(&id).is_none() {
        return ward_not_found(&id);
    }
    state.dataset.trends(&id).map_or_else(
        || not_found(format!("No historical trends for ward {id}")),
        |trends| HttpResponse::Ok().json(trends),
    )
}

/// `GET /api/wards/{id}/prediction`
pub async fn ward_prediction(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    if state.dataset.ward(&id).is_none() {
        return ward_not_found(&id);
    }
    state.dataset.prediction(&id).map_or_else(
        || not_found(format!("No prediction for ward {id}")),
        |prediction| HttpResponse::Ok().json(ApiPrediction::from(prediction)),
    )
}

/// `GET /api/wards/{id}/actions`
///
/// Citizen actions for the ward's dominant pollutant, capped per group.
pub async fn ward_actions(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<ActionsQueryParams>,
) -> HttpResponse {
    let id = path.into_inner();
    let dataset = &state.dataset;
    if dataset.ward(&id).is_none() {
        return ward_not_found(&id);
    }
    let Some(level) = dataset.pollution_level(&id) else {
        return not_found(format!("No pollution level for ward {id}"));
    };

    let pollutant = level.dominant_pollutant;
    dataset.citizen_actions(pollutant).map_or_else(
        || not_found(format!("No citizen actions for {pollutant}")),
        |actions| {
            HttpResponse::Ok().json(ApiActions {
                pollutant,
                actions: detail::top_actions(
                    actions,
                    params.limit.unwrap_or(DEFAULT_ACTIONS_PER_GROUP),
                ),
            })
        },
    )
}

/// `GET /api/wards/{id}/policies`
pub async fn ward_policies(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    if state.dataset.ward(&id).is_none() {
        return ward_not_found(&id);
    }
    HttpResponse::Ok().json(state.dataset.policies(&id))
}

/// `GET /api/wards/{id}/suggestions`
///
/// Suggestions submitted for the ward, most recent first.
pub async fn list_suggestions(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    if state.dataset.ward(&id).is_none() {
        return ward_not_found(&id);
    }

    let Ok(store) = state.suggestions.lock() else {
        log::error!("Suggestion store mutex poisoned");
        return internal_error("Failed to read suggestions");
    };
    let entries = store.list(&id);
    drop(store);

    let body: Vec<&Suggestion> = entries.iter().map(Arc::as_ref).collect();
    HttpResponse::Ok().json(body)
}

/// `GET /api/suggestions/categories`
///
/// Category labels accepted by the suggestion form.
pub async fn suggestion_categories() -> HttpResponse {
    HttpResponse::Ok().json(SuggestionCategory::all())
}

/// `POST /api/wards/{id}/suggestions`
///
/// Records a suggestion. Responds `400` when the category or description
/// is missing or invalid.
pub async fn submit_suggestion(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<SubmitSuggestionRequest>,
) -> HttpResponse {
    let id = path.into_inner();
    let Some(ward) = state.dataset.ward(&id) else {
        return ward_not_found(&id);
    };

    let category = match parse_category(body.category.as_deref()) {
        Ok(category) => category,
        Err(e) => return bad_suggestion(&e),
    };
    let description = body.description.as_deref().unwrap_or_default();

    let Ok(mut store) = state.suggestions.lock() else {
        log::error!("Suggestion store mutex poisoned");
        return internal_error("Failed to record suggestion");
    };
    let result = store.submit(ward, category, description, Utc::now());
    drop(store);

    match result {
        Ok(suggestion) => HttpResponse::Created().json(suggestion.as_ref()),
        Err(e) => bad_suggestion(&e),
    }
}

/// `GET /api/wards/{id}/report`
///
/// Plain-text report stub, served as a file download.
pub async fn ward_report(state: web::Data<AppState>, path: web::Path<String>) -> HttpResponse {
    let id = path.into_inner();
    let dataset = &state.dataset;
    let Some(ward) = dataset.ward(&id) else {
        return ward_not_found(&id);
    };

    let text = report::render_report(
        ward,
        dataset.pollution_level(&id),
        dataset.pollution_sources(&id),
        Utc::now().date_naive(),
    );

    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(report::report_file_name(
                &ward.name,
            ))],
        })
        .body(text)
}

/// `GET /api/actions/{pollutant}`
///
/// Accepts either the display name (`PM2.5`) or the field key (`pm25`).
/// All actions are returned unless `limit` is given.
pub async fn pollutant_actions(
    state: web::Data<AppState>,
    path: web::Path<String>,
    params: web::Query<ActionsQueryParams>,
) -> HttpResponse {
    let raw = path.into_inner();
    let Some(pollutant) = parse_pollutant(&raw) else {
        return not_found(format!("Unknown pollutant: {raw}"));
    };

    state.dataset.citizen_actions(pollutant).map_or_else(
        || not_found(format!("No citizen actions for {pollutant}")),
        |actions| {
            HttpResponse::Ok().json(ApiActions {
                pollutant,
                actions: params.limit.map_or_else(
                    || actions.clone(),
                    |limit| detail::top_actions(actions, limit),
                ),
            })
        },
    )
}

/// `GET /api/data`
///
/// Lists the bundled dataset files available for download.
pub async fn data_files() -> HttpResponse {
    let files: Vec<ApiDataFile> = registry::DATA_FILES
        .iter()
        .map(|file| ApiDataFile {
            name: file.name.to_string(),
            description: file.description.to_string(),
        })
        .collect();
    HttpResponse::Ok().json(files)
}

/// `GET /api/data/{file}`
///
/// Raw JSON of a bundled dataset file.
pub async fn data_file(path: web::Path<String>) -> HttpResponse {
    let name = path.into_inner();
    registry::embedded(&name).map_or_else(
        || not_found(format!("Unknown data file: {name}")),
        |contents| {
            HttpResponse::Ok()
                .content_type(ContentType::json())
                .body(contents)
        },
    )
}

fn parse_pollutant(raw: &str) -> Option<Pollutant> {
    raw.parse().ok().or_else(|| {
        Pollutant::all()
            .iter()
            .copied()
            .find(|p| p.key().eq_ignore_ascii_case(raw))
    })
}

/// Maps a rejected JSON body to the `{"error": ..}` shape used by every
/// other failure.
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON body: {err}");
    let response =
        HttpResponse::BadRequest().json(ApiError::new(format!("Invalid JSON body: {err}")));
    InternalError::from_response(err, response).into()
}

fn not_found(message: String) -> HttpResponse {
    HttpResponse::NotFound().json(ApiError::new(message))
}

fn ward_not_found(id: &str) -> HttpResponse {
    not_found(format!("Ward not found: {id}"))
}

fn bad_suggestion(e: &SuggestionError) -> HttpResponse {
    log::debug!("Rejected suggestion: {e}");
    HttpResponse::BadRequest().json(ApiError::new(e.to_string()))
}

fn internal_error(message: &str) -> HttpResponse {
    HttpResponse::InternalServerError().json(ApiError::new(message))
}
