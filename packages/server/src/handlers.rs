//! HTTP handler functions for the house price API.

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use house_price_geography::GeoError;
use house_price_housing_models::HousingInput;
use house_price_prediction::{PredictError, predict_price};
use house_price_server_models::{
    ApiHealth, ApiInputBounds, ApiPrediction, ApiRegion, MapQueryParams, PredictRequest,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/regions`
///
/// Lists the counties in selector order.
pub async fn regions(state: web::Data<AppState>) -> HttpResponse {
    match state.artifacts.regions() {
        Ok(regions) => {
            let api_regions: Vec<ApiRegion> = regions
                .iter()
                .map(|region| ApiRegion {
                    name: region.name.clone(),
                    longitude: region.centroid.longitude,
                    latitude: region.centroid.latitude,
                    ocean_proximity: region.aggregates.ocean_proximity,
                })
                .collect();
            HttpResponse::Ok().json(api_regions)
        }
        Err(e) => error_response("Failed to load regions", &e),
    }
}

/// `GET /api/map`
///
/// Returns every county polygon with the selected county highlighted.
pub async fn map(state: web::Data<AppState>, params: web::Query<MapQueryParams>) -> HttpResponse {
    let result = state.artifacts.regions().and_then(|regions| {
        let selected = match params.region.as_deref() {
            Some(name) => name.to_string(),
            None => regions
                .names()
                .first()
                .map(ToString::to_string)
                .unwrap_or_default(),
        };
        Ok(regions.map_view(&selected)?)
    });

    match result {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(e) => error_response("Failed to build map", &e),
    }
}

/// `POST /api/predict`
///
/// Predicts the price for a county and the user's inputs.
pub async fn predict(
    state: web::Data<AppState>,
    body: web::Json<PredictRequest>,
) -> HttpResponse {
    let PredictRequest {
        region,
        housing_median_age,
        median_income,
    } = body.into_inner();

    let result = HousingInput::new(housing_median_age, median_income)
        .map_err(PredictError::from)
        .and_then(|input| predict_price(&state.artifacts, &region, input));

    match result {
        Ok((features, prediction)) => HttpResponse::Ok().json(ApiPrediction {
            region,
            features,
            price: prediction.raw,
            rounded_price: prediction.rounded,
            display: prediction.display,
        }),
        Err(e) => error_response("Failed to predict price", &e),
    }
}

/// `GET /api/dataset`
///
/// Summarizes the historical housing dataset.
pub async fn dataset(state: web::Data<AppState>) -> HttpResponse {
    match state.artifacts.dataset() {
        Ok(dataset) => HttpResponse::Ok().json(dataset.summary()),
        Err(e) => error_response("Failed to load housing dataset", &e),
    }
}

/// `GET /api/input-bounds`
pub async fn input_bounds() -> HttpResponse {
    HttpResponse::Ok().json(ApiInputBounds::default())
}

/// Rejects request bodies that do not deserialize, e.g. an age outside
/// `u8` or a missing field, with the same JSON error shape as bad inputs.
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::error!("Invalid request body: {err}");
    let response = HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() }));
    InternalError::from_response(err, response).into()
}

/// Maps a [`PredictError`] to a JSON error response.
///
/// Unknown counties are `404`, bad inputs `400`, anything else `500`.
fn error_response(context: &str, e: &PredictError) -> HttpResponse {
    log::error!("{context}: {e}");

    match e {
        PredictError::RegionNotFound { .. } | PredictError::Geo(GeoError::RegionNotFound { .. }) => {
            HttpResponse::NotFound().json(serde_json::json!({ "error": e.to_string() }))
        }
        PredictError::Input(_) => {
            HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }))
        }
        _ => HttpResponse::InternalServerError().json(serde_json::json!({ "error": context })),
    }
}
