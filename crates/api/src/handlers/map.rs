//! Map overlay assembly: registered devices joined with their latest
//! measurement, plus the city/district lookup endpoints that drive the map
//! filters.

use std::collections::HashMap;

use aqsense_core::error::CoreError;
use aqsense_core::types::Timestamp;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use aqsense_db::models::measurement::Measurement;
use aqsense_db::repositories::{DeviceRepo, MeasurementRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Placeholder status for a registered device that has never reported.
/// Deliberately outside the OK/WARN/HIGH alert set.
const STATUS_NO_DATA: &str = "NO_DATA";

/// Optional region filters for the map points endpoint.
#[derive(Debug, Deserialize)]
pub struct MapQuery {
    pub city: Option<String>,
    pub district: Option<String>,
}

/// Query parameter for the district lookup.
#[derive(Debug, Deserialize)]
pub struct CityQuery {
    pub city: String,
}

/// One marker on the map: device placement plus its latest reading, if any.
#[derive(Debug, Serialize)]
pub struct MapPoint {
    pub device_id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    pub city: String,
    pub district: String,
    pub tvoc_ppb: Option<f64>,
    pub eco2_ppm: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub score: Option<f64>,
    pub status: String,
    pub last_update: Option<Timestamp>,
}

#[derive(Debug, Serialize)]
pub struct MapPointsResponse {
    pub points: Vec<MapPoint>,
}

#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    pub cities: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct DistrictsResponse {
    pub city: String,
    pub districts: Vec<String>,
}

/// GET /map/points?city=&district=
///
/// Latest-per-device lookup happens in one `DISTINCT ON` query rather than a
/// per-device round trip.
pub async fn map_points(
    State(state): State<AppState>,
    Query(query): Query<MapQuery>,
) -> AppResult<Json<MapPointsResponse>> {
    let devices = match (query.city.as_deref(), query.district.as_deref()) {
        (Some(city), Some(district)) => {
            DeviceRepo::list_by_district(&state.pool, city, district).await?
        }
        (Some(city), None) => DeviceRepo::list_by_city(&state.pool, city).await?,
        _ => DeviceRepo::list_all(&state.pool).await?,
    };

    let mut latest_by_device: HashMap<String, Measurement> =
        MeasurementRepo::latest_per_device(&state.pool)
            .await?
            .into_iter()
            .map(|m| (m.device_id.clone(), m))
            .collect();

    let points = devices
        .into_iter()
        .map(|device| {
            let latest = latest_by_device.remove(&device.device_id);
            match latest {
                Some(m) => MapPoint {
                    device_id: device.device_id,
                    name: device.name,
                    lat: device.lat,
                    lon: device.lon,
                    city: device.city,
                    district: device.district,
                    tvoc_ppb: m.tvoc_ppb,
                    eco2_ppm: m.eco2_ppm,
                    temperature: m.temp_c,
                    humidity: m.hum_rh,
                    pressure: m.pressure_hpa,
                    score: Some(m.score),
                    status: m.status,
                    last_update: Some(m.ts),
                },
                None => MapPoint {
                    device_id: device.device_id,
                    name: device.name,
                    lat: device.lat,
                    lon: device.lon,
                    city: device.city,
                    district: device.district,
                    tvoc_ppb: None,
                    eco2_ppm: None,
                    temperature: None,
                    humidity: None,
                    pressure: None,
                    score: None,
                    status: STATUS_NO_DATA.to_string(),
                    last_update: None,
                },
            }
        })
        .collect();

    Ok(Json(MapPointsResponse { points }))
}

/// GET /locations/cities
pub async fn cities(State(state): State<AppState>) -> AppResult<Json<CitiesResponse>> {
    let cities = DeviceRepo::list_cities(&state.pool).await?;
    Ok(Json(CitiesResponse { cities }))
}

/// GET /locations/districts?city=
///
/// A city with no registered devices is a 404, matching the map client's
/// expectation that the city list is the source of valid inputs.
pub async fn districts(
    State(state): State<AppState>,
    Query(query): Query<CityQuery>,
) -> AppResult<Json<DistrictsResponse>> {
    let districts = DeviceRepo::list_districts(&state.pool, &query.city).await?;
    if districts.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "districts for city",
            id: query.city,
        }));
    }
    Ok(Json(DistrictsResponse {
        city: query.city,
        districts,
    }))
}
