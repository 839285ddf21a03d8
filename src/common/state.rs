use crate::config::Config;
use crate::routes::geodata::aggregator::GeoDataAggregator;
use crate::routes::geodata::clients::build_http_client;
use crate::routes::prediction::invoker::PredictionInvoker;

/// Shared per-process handles. Nothing request-specific lives here.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub aggregator: GeoDataAggregator,
    pub predictor: PredictionInvoker,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, reqwest::Error> {
        let http = build_http_client(&config)?;
        let aggregator = GeoDataAggregator::from_config(&config, http);
        let predictor = PredictionInvoker::from_config(&config);
        Ok(Self::with_parts(config, aggregator, predictor))
    }

    pub fn with_parts(
        config: Config,
        aggregator: GeoDataAggregator,
        predictor: PredictionInvoker,
    ) -> Self {
        Self {
            config,
            aggregator,
            predictor,
        }
    }
}
