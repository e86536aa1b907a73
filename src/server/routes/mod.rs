//! API routes for the flash-card server

pub mod auth;
pub mod cards;
pub mod documents;
pub mod upload;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, patch, post},
    Router,
};

use crate::server::state::AppState;

/// Build all API routes
pub fn api_routes(max_upload_size: usize) -> Router<AppState> {
    Router::new()
        // Upload - with larger body limit for file uploads
        .route(
            "/upload",
            post(upload::upload_document).layer(DefaultBodyLimit::max(max_upload_size)),
        )
        // Document management
        .route("/documents", post(documents::create_document))
        .route("/documents", get(documents::list_documents))
        .route("/documents/:id", get(documents::get_document))
        .route("/documents/:id", patch(documents::update_document))
        .route("/documents/:id", delete(documents::delete_document))
        // Flash card management
        .route("/documents/:id/cards", post(cards::create_card))
        .route("/documents/:id/cards", get(cards::list_cards))
        .route("/cards/:id", get(cards::get_card))
        .route("/cards/:id", patch(cards::update_card))
        .route("/cards/:id", delete(cards::delete_card))
        // Identity
        .route("/auth/register", post(auth::register))
        .route("/auth/me", get(auth::me))
        // Info
        .route("/info", get(info))
}

/// API info endpoint
async fn info() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "name": "studydeck",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Turns uploaded study documents into AI-generated flash cards",
        "endpoints": {
            "POST /api/upload": "Upload a document and generate flash cards",
            "POST /api/documents": "Create a document directly",
            "GET /api/documents": "List your documents",
            "GET /api/documents/:id": "Get a document with its flash cards",
            "PATCH /api/documents/:id": "Update a document's title or summary",
            "DELETE /api/documents/:id": "Delete a document and all its flash cards",
            "POST /api/documents/:id/cards": "Add a flash card to a document",
            "GET /api/documents/:id/cards": "List a document's flash cards",
            "GET /api/cards/:id": "Get a flash card",
            "PATCH /api/cards/:id": "Update a flash card",
            "DELETE /api/cards/:id": "Delete a flash card",
            "POST /api/auth/register": "Register and receive a bearer token",
            "GET /api/auth/me": "Get the authenticated user"
        }
    }))
}
