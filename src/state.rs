use std::sync::Arc;

use crate::{
    classifier::SoilClassifier,
    config::Config,
    services::{Assistant, WeatherProvider},
    store::Store,
};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<Config>,
    pub classifier: Arc<SoilClassifier>,
    pub weather: Arc<dyn WeatherProvider>,
    pub assistant: Arc<dyn Assistant>,
}
