use std::sync::Arc;

use crate::services::ReservationService;
use crate::store::Store;

/// Shared handles injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub reservations: ReservationService,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self {
            reservations: ReservationService::new(Arc::clone(&store)),
            store,
        }
    }
}
