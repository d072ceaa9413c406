use crate::config::AppConfig;
use crate::nutrition::predictor::NutrientPredictor;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub predictor: Arc<NutrientPredictor>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let predictor = Arc::new(NutrientPredictor::with_cache_capacity(config.cache_capacity));

        tracing::info!(
            foods = predictor.table().len(),
            cache_capacity = config.cache_capacity,
            ai_enabled = config.ai_enabled,
            "nutrient predictor ready"
        );

        Ok(Self::from_parts(config, predictor))
    }

    pub fn from_parts(config: Arc<AppConfig>, predictor: Arc<NutrientPredictor>) -> Self {
        Self { config, predictor }
    }

    #[cfg(test)]
    pub fn fake() -> Self {
        use crate::nutrition::{estimator::FixedVariation, table::ReferenceTable};

        let config = Arc::new(AppConfig::default());
        let predictor = Arc::new(NutrientPredictor::new(
            ReferenceTable::builtin(),
            Box::new(FixedVariation(1.0)),
            16,
        ));
        Self::from_parts(config, predictor)
    }
}
