use std::sync::Arc;

use crate::config::Config;
use crate::services::{ExplanationService, ImageService};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub images: ImageService,
    pub explanations: ExplanationService,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let images = ImageService::new(config.apod.clone());
        let explanations = ExplanationService::new(config.explain.clone());

        Self {
            config: Arc::new(config),
            images,
            explanations,
        }
    }
}
