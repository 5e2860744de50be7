use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tnea_predictor::counseling::guidance::InMemoryReviewStore;
use tnea_predictor::counseling::offerings::InMemoryOfferingStore;
use tnea_predictor::counseling::CounselingService;
use tnea_predictor::error::AppError;
use tnea_predictor::import::{load_directory, Dataset};
use tracing::{info, warn};

pub(crate) type ApiService = CounselingService<InMemoryOfferingStore, InMemoryReviewStore>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_service(dataset: Dataset) -> ApiService {
    let Dataset {
        offerings,
        guidance,
        ..
    } = dataset;
    let store = InMemoryOfferingStore::new(offerings);
    if store.is_empty() {
        warn!("offering store is empty, predictions will return no colleges");
    }
    info!(offerings = store.len(), "offering store built");
    CounselingService::new(
        Arc::new(store),
        Arc::new(InMemoryReviewStore::default()),
        guidance,
    )
}

pub(crate) fn load_service(directory: &Path) -> Result<ApiService, AppError> {
    Ok(build_service(load_directory(directory)?))
}
