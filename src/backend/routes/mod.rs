//! Route Configuration Module
//!
//! - **`router`** - Main router creation: API routes, health probe, JSON 404
//!   fallback, request tracing
//! - **`api_routes`** - Every `/api` endpoint
//!
//! # Routes
//!
//! ## Authentication
//!
//! - `POST /api/auth/login` - Login, sets the `auth-token` cookie
//! - `POST /api/auth/logout` - Clears the cookie
//! - `GET /api/auth/me` - Current user
//!
//! ## Board resources
//!
//! - `GET|POST /api/cards/{id}/checklist`
//! - `PUT|DELETE /api/checklist/{id}`
//! - `GET|POST /api/cards/{id}/comments`
//! - `PUT|DELETE /api/comments/{id}`
//! - `DELETE /api/cards/{id}`
//!
//! ## Operations
//!
//! - `POST /api/sync` - Mirror the primary store into Supabase (Bearer token)
//! - `GET /health` - Liveness probe

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
