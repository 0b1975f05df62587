use std::sync::Arc;

use crate::{config::Config, store::TestStore};
use axum::extract::FromRef;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TestStore>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<dyn TestStore> {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
