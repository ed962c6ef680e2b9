//! SSE notification stream.
//!
//! GET /notifications/stream?token=JWT
//!
//! EventSource can't send custom headers, so the JWT may be passed as a
//! `?token=` query param; the Authorization header works too. Each connection
//! is registered with the connection registry for the authenticated user and
//! unregistered when the client goes away.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::HeaderMap,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};

use crate::common::{ApiError, UserId};
use crate::kernel::BaseConnectionRegistry;
use crate::server::app::AxumAppState;

#[derive(Deserialize)]
pub struct StreamQuery {
    /// JWT token for authentication
    token: Option<String>,
}

/// Unregisters the connection when the response stream is dropped.
struct ConnectionGuard {
    registry: Arc<dyn BaseConnectionRegistry>,
    user_id: UserId,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        let registry = self.registry.clone();
        let user_id = self.user_id;
        tokio::spawn(async move {
            registry.unregister(user_id).await;
            tracing::debug!(user_id = %user_id, "Notification stream closed");
        });
    }
}

/// SSE stream handler.
///
/// Sends `connected` first, then one event per notification (named by its
/// `type` field), and a `lagged` event when the client fell behind.
pub async fn notification_stream_handler(
    Extension(state): Extension<AxumAppState>,
    Query(query): Query<StreamQuery>,
    headers: HeaderMap,
) -> Result<Sse<impl futures::Stream<Item = Result<Event, Infallible>>>, ApiError> {
    let token = query
        .token
        .or_else(|| extract_bearer_token(&headers))
        .ok_or(ApiError::Unauthenticated)?;

    let claims = state
        .deps
        .jwt_service
        .verify_token(&token)
        .map_err(|_| ApiError::Unauthenticated)?;

    let registry = state.deps.connections.clone();
    let rx = registry.register(claims.user_id).await;
    tracing::debug!(user_id = %claims.user_id, "Notification stream opened");

    let guard = ConnectionGuard {
        registry,
        user_id: claims.user_id,
    };

    let connected =
        stream::once(async { Ok::<_, Infallible>(Event::default().event("connected").data("ok")) });

    let events = BroadcastStream::new(rx).filter_map(|result| async {
        match result {
            Ok(value) => {
                let event_name = value
                    .get("type")
                    .and_then(|t| t.as_str())
                    .unwrap_or("message");
                Event::default()
                    .event(event_name)
                    .json_data(&value)
                    .ok()
                    .map(Ok)
            }
            Err(BroadcastStreamRecvError::Lagged(n)) => Event::default()
                .event("lagged")
                .json_data(serde_json::json!({ "missed": n }))
                .ok()
                .map(Ok),
        }
    });

    let stream = connected.chain(events).map(move |event| {
        let _connection = &guard;
        event
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

/// Extract Bearer token from Authorization header.
fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let auth = headers.get("authorization")?.to_str().ok()?;
    auth.strip_prefix("Bearer ").map(|t| t.to_string())
}
