use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::location::{AuthorizationState, HeadingReading, LocationReading, PlatformCommand};
use crate::metadata::GpsMetadata;

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

#[derive(Debug)]
pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

// ─── POST /api/authorization ─────────────────────────────────────

#[derive(Deserialize)]
pub struct AuthorizationBody {
    pub state: AuthorizationState,
}

pub async fn authorization(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AuthorizationBody>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = body?;
    state.source.on_authorization_changed(body.state);
    info!("POST /api/authorization -> {}", body.state);
    Ok(StatusCode::NO_CONTENT)
}

// ─── POST /api/locations ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct LocationsBody {
    pub readings: Vec<LocationReading>,
}

pub async fn locations(
    State(state): State<Arc<AppState>>,
    body: Result<Json<LocationsBody>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let Json(body) = body?;
    state.source.on_location_updated(&body.readings);
    info!("POST /api/locations -> {} reading(s)", body.readings.len());
    Ok(StatusCode::NO_CONTENT)
}

// ─── GET /api/metadata ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct MetadataQuery {
    /// True heading in degrees, if the caller has one.
    pub heading: Option<f64>,
}

pub async fn metadata(
    State(state): State<Arc<AppState>>,
    params: Result<Query<MetadataQuery>, QueryRejection>,
) -> Result<Json<GpsMetadata>, ApiError> {
    let start = Instant::now();
    let Query(params) = params?;
    if let Some(h) = params.heading.filter(|h| !h.is_finite()) {
        return Err(api_error(StatusCode::BAD_REQUEST, format!("Invalid heading '{}'", h)));
    }

    let heading = params.heading.map(|true_heading| HeadingReading { true_heading });
    let md = state.source.build_gps_metadata(heading);

    info!(
        "GET /api/metadata -> {} tag(s) ({:.1}ms)",
        md.len(),
        start.elapsed().as_secs_f64() * 1000.0,
    );
    Ok(Json(md))
}

// ─── GET /api/status ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct StatusResponse {
    pub authorization: Option<AuthorizationState>,
    pub authorized: bool,
    pub last_reading: Option<LocationReading>,
    pub clock_zone: String,
    pub commands: Vec<PlatformCommand>,
}

pub async fn status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let snapshot = state.source.snapshot();
    Json(StatusResponse {
        authorization: snapshot.authorization,
        authorized: snapshot.authorization.is_some_and(AuthorizationState::is_authorized),
        last_reading: snapshot.last_reading,
        clock_zone: state.source.clock_zone().to_string(),
        commands: state.source.platform().commands(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{LocationSource, RecordingPlatform, SourceOptions};
    use crate::metadata::{ClockZone, GpsTag, GpsValue};
    use chrono::{TimeZone, Utc};

    fn app_state() -> Arc<AppState> {
        Arc::new(AppState {
            source: LocationSource::new(
                RecordingPlatform::new(),
                SourceOptions { clock_zone: ClockZone::Named(chrono_tz::UTC), ..Default::default() },
            ),
        })
    }

    fn reading(lat: f64) -> LocationReading {
        LocationReading {
            latitude: lat,
            longitude: -74.006,
            altitude: 10.0,
            horizontal_accuracy: 3.0,
            timestamp: Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap(),
        }
    }

    async fn authorize(state: &Arc<AppState>, auth: AuthorizationState) {
        let status = authorization(State(state.clone()), Ok(Json(AuthorizationBody { state: auth })))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    async fn get_metadata(state: &Arc<AppState>, heading: Option<f64>) -> GpsMetadata {
        let Json(md) = metadata(State(state.clone()), Ok(Query(MetadataQuery { heading })))
            .await
            .unwrap();
        md
    }

    #[tokio::test]
    async fn test_metadata_after_authorization_and_fix() {
        let state = app_state();
        authorize(&state, AuthorizationState::AuthorizedWhenInUse).await;
        locations(State(state.clone()), Ok(Json(LocationsBody { readings: vec![reading(40.7128)] })))
            .await
            .unwrap();

        let md = get_metadata(&state, Some(45.0)).await;
        assert_eq!(md.get(GpsTag::LongitudeRef).and_then(GpsValue::as_str), Some("W"));
        assert_eq!(md.get(GpsTag::ImgDirection).and_then(GpsValue::as_f64), Some(45.0));
    }

    #[tokio::test]
    async fn test_metadata_empty_when_denied() {
        let state = app_state();
        locations(State(state.clone()), Ok(Json(LocationsBody { readings: vec![reading(1.0)] })))
            .await
            .unwrap();
        authorize(&state, AuthorizationState::Denied).await;
        assert!(get_metadata(&state, None).await.is_empty());
    }

    #[tokio::test]
    async fn test_status_reports_commands() {
        let state = app_state();
        authorize(&state, AuthorizationState::NotDetermined).await;
        authorize(&state, AuthorizationState::AuthorizedAlways).await;

        let Json(resp) = status(State(state.clone())).await;
        assert!(resp.authorized);
        assert_eq!(resp.clock_zone, "UTC");
        assert!(resp.last_reading.is_none());
        assert_eq!(
            resp.commands[1..],
            [PlatformCommand::RequestAuthorization, PlatformCommand::StartUpdatingLocation]
        );
    }

    #[tokio::test]
    async fn test_non_finite_heading_rejected() {
        let state = app_state();
        authorize(&state, AuthorizationState::AuthorizedAlways).await;
        locations(State(state.clone()), Ok(Json(LocationsBody { readings: vec![reading(1.0)] })))
            .await
            .unwrap();

        for heading in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = metadata(State(state.clone()), Ok(Query(MetadataQuery { heading: Some(heading) })))
                .await
                .unwrap_err();
            assert_eq!(err.0, StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_error_body_status() {
        let resp = ApiError(StatusCode::BAD_REQUEST, "bad".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
