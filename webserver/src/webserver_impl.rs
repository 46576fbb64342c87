//! Main webserver implementation
//!
//! The `WebServer` wires an order store into the axum router. The store is a
//! generic parameter so tests can swap in a mock or the in-memory backend.

use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    routing::get,
};
use chrono::Utc;
use serde_json::{Value, json};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use shared::logging;

use crate::config::ServerConfig;
use crate::error::{WebServerError, WebServerResult};
use crate::state::WebServerState;
use crate::traits::{OrderStore, take_recent};
use crate::types::{DateQuery, OrderSubmission, OrdersResponse, SubmitOrderResponse};

/// Main webserver struct with the order store injected
pub struct WebServer<S> {
    state: Arc<WebServerState>,
    store: Arc<S>,
}

impl<S> Clone for WebServer<S> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> WebServer<S>
where
    S: OrderStore + 'static,
{
    /// Create a new webserver owning `store`
    pub fn new(config: ServerConfig, store: S) -> Self {
        Self::with_shared_store(config, Arc::new(store))
    }

    /// Create a webserver over a store the caller keeps a handle to
    pub fn with_shared_store(config: ServerConfig, store: Arc<S>) -> Self {
        Self {
            state: Arc::new(WebServerState::new(config)),
            store,
        }
    }

    /// Build the Axum router with all routes
    pub fn build_router(&self) -> Router {
        Router::new()
            .route("/orders", get(get_orders_handler::<S>).post(submit_order_handler::<S>))
            .route("/health", get(health_check::<S>))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CorsLayer::permissive())
                    .into_inner(),
            )
            .with_state(self.clone())
    }

    /// Bind the configured address and serve until Ctrl+C
    pub async fn run(&self) -> WebServerResult<()> {
        let bind_addr = self.state.config.bind_addr;
        let listener = TcpListener::bind(bind_addr)
            .await
            .map_err(|e| WebServerError::ServerStartup(format!("Failed to bind to {}: {}", bind_addr, e)))?;

        tracing::info!("🌐 Order service listening on http://{}", bind_addr);
        tracing::info!("🍕 Orders API available at http://{}/orders?date=YYYY-MM-DD", bind_addr);

        self.serve(listener, shutdown_signal()).await
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(&self, listener: TcpListener, shutdown: F) -> WebServerResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.build_router())
            .with_graceful_shutdown(shutdown)
            .await
            .map_err(|e| WebServerError::ServerStartup(e.to_string()))
    }

    /// Get server state for external access
    pub fn state(&self) -> &Arc<WebServerState> {
        &self.state
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown("Received Ctrl+C signal"),
        Err(err) => logging::log_error("Signal handling", &err),
    }
}

// HTTP Handlers

/// Record a new order - POST /orders?date=YYYY-MM-DD
async fn submit_order_handler<S>(
    State(webserver): State<WebServer<S>>,
    Query(query): Query<DateQuery>,
    body: Result<Json<OrderSubmission>, JsonRejection>,
) -> WebServerResult<Json<SubmitOrderResponse>>
where
    S: OrderStore + 'static,
{
    let Json(submission) =
        body.map_err(|e| WebServerError::invalid_request(format!("Invalid JSON body: {}", e.body_text())))?;

    let draft = submission.into_draft(query.date.as_deref())?;
    let id = webserver
        .store
        .insert_order(draft.clone())
        .await
        .map_err(|e| WebServerError::store_write(&e))?;

    let order = draft.into_order(id);
    tracing::info!(
        order_id = %order.id,
        date = %order.date,
        user_id = %order.user_id,
        "✅ Order submitted for {}",
        order.student_name
    );

    Ok(Json(SubmitOrderResponse::new(order)))
}

/// Recent orders plus running totals - GET /orders?date=YYYY-MM-DD
async fn get_orders_handler<S>(
    State(webserver): State<WebServer<S>>,
    Query(query): Query<DateQuery>,
) -> WebServerResult<Json<OrdersResponse>>
where
    S: OrderStore + 'static,
{
    let date = query.require_date()?;

    // One snapshot feeds both the totals and the displayed list
    let all_orders = webserver
        .store
        .find_orders_by_date(&date)
        .await
        .map_err(|e| WebServerError::store_read(&e))?;

    let summary = webserver.state.engine.summarize(&all_orders);
    if summary.skipped_orders > 0 {
        logging::log_warning(
            "Tally",
            &format!(
                "{} order(s) for {} left out of totals: pizza_slices is not a type-to-count mapping",
                summary.skipped_orders, date
            ),
        );
    }

    tracing::debug!(
        date = %date,
        orders = all_orders.len(),
        juice_boxes = summary.total_juice_boxes,
        "📊 Tallied orders"
    );

    let recent_orders = take_recent(all_orders, webserver.state.config.display_limit);

    Ok(Json(OrdersResponse::new(recent_orders, summary)))
}

/// Health check endpoint
async fn health_check<S>(State(webserver): State<WebServer<S>>) -> Json<Value>
where
    S: OrderStore + 'static,
{
    Json(json!({
        "status": "healthy",
        "store": webserver.store.backend_name(),
        "timestamp": Utc::now().timestamp(),
        "uptime_seconds": webserver.state.get_uptime_seconds()
    }))
}
