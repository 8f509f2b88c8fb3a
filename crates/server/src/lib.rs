//! HTTP API for symptom-to-disease prediction.
//!
//! Wraps a single shared [`predictor::DiseasePredictor`] and adds a
//! specialist recommendation to every answer.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - Service information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe, 503 until a model is available
//! - `POST /predict` - `{"symptoms": ["fever", "cough"]}` to disease,
//!   specialist, confidence and the top three candidates
//!
//! Errors share one body shape: `{"error": {"code": "...", "message": "..."}}`.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod specialist;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server, warm_up};
pub use specialist::recommend_specialist;
pub use state::ServerState;
