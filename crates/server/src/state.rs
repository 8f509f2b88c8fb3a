use crate::config::ServerConfig;
use predictor::DiseasePredictor;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Predictor shared across requests
    pub predictor: Arc<DiseasePredictor>,
}

impl ServerState {
    /// Create state with a fresh, uninitialized predictor.
    pub fn new(config: ServerConfig) -> Self {
        let predictor = Arc::new(DiseasePredictor::new(config.predictor_config()));
        Self::with_predictor(config, predictor)
    }

    pub fn with_predictor(config: ServerConfig, predictor: Arc<DiseasePredictor>) -> Self {
        Self {
            config: Arc::new(config),
            predictor,
        }
    }
}
