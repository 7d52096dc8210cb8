//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::{
    infrastructure::dto::{AuthResponse, RoomDto, RoomRequest, RoomSearch, RoomStateDto},
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// `GetRooms`: stream the matching rooms as newline-delimited JSON
///
/// Rooms are serialized one at a time as the body is polled.
pub async fn get_rooms(
    State(state): State<Arc<AppState>>,
    Json(query): Json<RoomSearch>,
) -> impl IntoResponse {
    let rooms = state.get_rooms_usecase.execute(query.substring);

    let lines = futures_util::stream::iter(rooms.map(|room| {
        let mut line = serde_json::to_vec(&RoomDto::from(room))?;
        line.push(b'\n');
        Ok::<_, serde_json::Error>(line)
    }));

    (
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        Body::from_stream(lines),
    )
}

/// `Login`: reserve the user in the room. The HTTP status mirrors `AuthResponse.status`.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RoomRequest>,
) -> (StatusCode, Json<AuthResponse>) {
    let response = match state
        .login_usecase
        .execute(request.name.clone(), request.user_name.clone())
        .await
    {
        Ok(_) => AuthResponse::logged_in(),
        Err(e) => {
            tracing::warn!(
                "Login of '{}' to '{}' rejected: {}",
                request.user_name,
                request.name,
                e
            );
            AuthResponse::from(&e)
        }
    };

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response))
}

/// `Logout`: accepted and ignored
pub async fn logout(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RoomRequest>,
) -> (StatusCode, Json<AuthResponse>) {
    let message = state
        .logout_usecase
        .execute(&request.name, &request.user_name);
    (
        StatusCode::OK,
        Json(AuthResponse::new(AuthResponse::OK, message)),
    )
}

/// Debug endpoint to get the registry state of every room (for testing purposes)
pub async fn debug_rooms(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<RoomStateDto>>, StatusCode> {
    match state.get_room_state_usecase.execute().await {
        Ok(snapshots) => Ok(Json(
            snapshots.into_iter().map(RoomStateDto::from).collect(),
        )),
        Err(e) => {
            tracing::error!("Failed to get room state: {}", e);
            Err(StatusCode::SERVICE_UNAVAILABLE)
        }
    }
}
