use std::sync::Arc;

use workout_storage::repository::{
    AthleteRepository, CategoryRepository, TrainingCenterRepository,
};

/// Repositories shared by every request handler
#[derive(Clone)]
pub struct AppState {
    pub categories: Arc<dyn CategoryRepository>,
    pub training_centers: Arc<dyn TrainingCenterRepository>,
    pub athletes: Arc<dyn AthleteRepository>,
}

impl AppState {
    pub fn new<S>(store: S) -> Self
    where
        S: CategoryRepository + TrainingCenterRepository + AthleteRepository + 'static,
    {
        let store = Arc::new(store);
        Self {
            categories: store.clone(),
            training_centers: store.clone(),
            athletes: store,
        }
    }
}
