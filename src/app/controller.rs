use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;

use crate::adapters::{ReqwestTransport, TomlConfigStore};
use crate::app::params::IdentifyParams;
use crate::domain::{
    interpret_catalog, interpret_prediction, AppConfig, AtomicIdentifyState, CatalogResult,
    DomainError, IdentifyState, PredictionRequest, PredictionResult, RequestBuilder,
};
use crate::infrastructure::init_logging;
use crate::ports::{ConfigStore, Transport};

/// Application controller: owns settings, the transport and the identify
/// state, and runs the two exchanges.
pub struct AppController {
    config: RwLock<AppConfig>,
    config_store: Arc<dyn ConfigStore>,
    transport: Arc<dyn Transport>,
    identify_state: AtomicIdentifyState,
    _log_guard: Option<WorkerGuard>,
}

impl AppController {
    /// Initialize the application controller.
    /// This sets up configuration, logging, and the HTTP transport.
    pub fn new() -> Result<Self, DomainError> {
        let config_store = Arc::new(TomlConfigStore::new()?);
        let config = config_store.load()?;

        let log_guard = init_logging(
            &config_store.logs_dir(),
            &config.logging.level,
            config.logging.file_logging,
        )?;

        info!("BreedLens starting up");

        let transport = Arc::new(ReqwestTransport::new()?);
        Ok(Self::assemble(config, config_store, transport, log_guard))
    }

    /// Build a controller from explicit collaborators. Logging is left to
    /// the caller.
    pub fn from_parts(
        config_store: Arc<dyn ConfigStore>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, DomainError> {
        let config = config_store.load()?;
        Ok(Self::assemble(config, config_store, transport, None))
    }

    fn assemble(
        config: AppConfig,
        config_store: Arc<dyn ConfigStore>,
        transport: Arc<dyn Transport>,
        log_guard: Option<WorkerGuard>,
    ) -> Self {
        info!(api = %config.api.base_url, "AppController initialized");

        Self {
            config: RwLock::new(config),
            config_store,
            transport,
            identify_state: AtomicIdentifyState::default(),
            _log_guard: log_guard,
        }
    }

    fn request_builder(&self) -> RequestBuilder {
        RequestBuilder::from_config(&self.config.read().api)
    }

    /// Submit one image for identification.
    ///
    /// Errors only when the action is refused: empty image, or another
    /// identify action still in flight. Every exchange that is actually sent
    /// yields `Ok`, with failures carried inside the result.
    pub async fn identify(
        &self,
        image: Vec<u8>,
        params: &IdentifyParams,
    ) -> Result<PredictionResult, DomainError> {
        let request =
            PredictionRequest::new(image, params.threshold, params.top_k, params.language)?;
        let _in_flight = self
            .identify_state
            .begin()
            .ok_or(DomainError::RequestInFlight)?;

        let outbound = self.request_builder().predict(request);
        info!(
            url = %outbound.url,
            threshold = params.threshold,
            top_k = params.top_k,
            language = %params.language,
            "Identifying breed"
        );

        let outcome = self.transport.send(outbound).await;
        let result = interpret_prediction(outcome);

        info!(state = ?result.state(), suggestion = ?result.suggestion(), "Identify finished");
        Ok(result)
    }

    /// Fetch the breed catalog. Always yields a result.
    pub async fn list_breeds(&self) -> CatalogResult {
        let outbound = self.request_builder().catalog();
        info!(url = %outbound.url, "Listing breeds");
        interpret_catalog(self.transport.send(outbound).await)
    }

    pub fn identify_state(&self) -> IdentifyState {
        self.identify_state.load()
    }

    /// Identify parameters from the stored defaults.
    pub fn default_params(&self) -> IdentifyParams {
        IdentifyParams::from(&self.config.read().prediction)
    }

    /// Get the current configuration.
    pub fn config(&self) -> AppConfig {
        self.config.read().clone()
    }

    /// Persist and apply a new configuration. Takes effect for the next
    /// exchange.
    pub fn update_config(&self, config: AppConfig) -> Result<(), DomainError> {
        self.config_store.save(&config)?;
        *self.config.write() = config;

        info!("Configuration updated");
        Ok(())
    }

    /// Override the backend URL for this session without persisting it.
    pub fn set_api_url(&self, base_url: impl Into<String>) {
        let base_url = base_url.into();
        info!(api = %base_url, "Backend URL overridden");
        self.config.write().api.base_url = base_url;
    }

    pub fn data_dir(&self) -> String {
        self.config_store.data_dir().to_string_lossy().to_string()
    }

    pub fn logs_dir(&self) -> String {
        self.config_store.logs_dir().to_string_lossy().to_string()
    }

    pub fn config_path(&self) -> String {
        self.config_store.config_path().to_string_lossy().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use tokio::sync::Notify;

    use crate::domain::request::RequestBody;
    use crate::domain::{
        ErrorKind, HttpResponse, OutboundRequest, ResultState, TransportFailure, TransportOutcome,
    };

    /// Replies with a canned outcome and records what it was sent.
    struct FakeTransport {
        outcome: TransportOutcome,
        sent: Mutex<Vec<OutboundRequest>>,
    }

    impl FakeTransport {
        fn new(outcome: TransportOutcome) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                sent: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl Transport for FakeTransport {
        async fn send(&self, request: OutboundRequest) -> TransportOutcome {
            self.sent.lock().push(request);
            self.outcome.clone()
        }
    }

    /// Holds every request until released.
    struct GatedTransport {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl Transport for GatedTransport {
        async fn send(&self, _request: OutboundRequest) -> TransportOutcome {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(HttpResponse::new(200, r#"{"suggestion":"Gir"}"#))
        }
    }

    fn temp_store(name: &str) -> (Arc<TomlConfigStore>, PathBuf) {
        let dir = env::temp_dir().join(name);
        let _ = fs::remove_dir_all(&dir);
        (Arc::new(TomlConfigStore::at(dir.clone()).unwrap()), dir)
    }

    #[tokio::test]
    async fn test_identify_round_trip() {
        let (store, dir) = temp_store("breedlens_controller_identify");
        let transport = FakeTransport::new(Ok(HttpResponse::new(
            200,
            r#"{"suggestion":"Gir","topk":[{"breed":"Gir","confidence":92.3}]}"#,
        )));
        let controller = AppController::from_parts(store, transport.clone()).unwrap();

        let params = IdentifyParams::default();
        let result = controller.identify(vec![1, 2, 3], &params).await.unwrap();
        assert_eq!(result.suggestion(), Some("Gir"));
        assert_eq!(controller.identify_state(), IdentifyState::Idle);

        let sent = transport.sent.lock();
        assert_eq!(sent.len(), 1);
        assert!(sent[0].url.ends_with("/predict"));
        match &sent[0].body {
            RequestBody::Multipart(form) => {
                assert_eq!(form.text("threshold"), Some("0.6"));
                assert_eq!(form.text("topk"), Some("3"));
                assert_eq!(form.text("lang"), Some("en"));
            }
            RequestBody::Empty => panic!("predict must carry a multipart body"),
        }

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_empty_image_sends_nothing() {
        let (store, dir) = temp_store("breedlens_controller_empty");
        let transport = FakeTransport::new(Ok(HttpResponse::new(200, "{}")));
        let controller = AppController::from_parts(store, transport.clone()).unwrap();

        let result = controller.identify(Vec::new(), &IdentifyParams::default()).await;
        assert!(matches!(result, Err(DomainError::EmptyImage)));
        assert!(transport.sent.lock().is_empty());
        assert_eq!(controller.identify_state(), IdentifyState::Idle);

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_transport_failure_is_a_result_not_an_error() {
        let (store, dir) = temp_store("breedlens_controller_failure");
        let transport = FakeTransport::new(Err(TransportFailure::timeout("timed out")));
        let controller = AppController::from_parts(store, transport).unwrap();

        let result = controller.identify(vec![9], &IdentifyParams::default()).await.unwrap();
        assert_eq!(result.state(), ResultState::Failed(ErrorKind::NetworkFailure));
        assert_eq!(controller.identify_state(), IdentifyState::Idle);

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_overlapping_identify_is_refused() {
        let (store, dir) = temp_store("breedlens_controller_overlap");
        let transport = Arc::new(GatedTransport {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let controller = Arc::new(AppController::from_parts(store, transport.clone()).unwrap());

        let first = {
            let controller = Arc::clone(&controller);
            tokio::spawn(async move {
                controller
                    .identify(vec![1], &IdentifyParams::default())
                    .await
            })
        };
        transport.entered.notified().await;
        assert_eq!(controller.identify_state(), IdentifyState::Requesting);

        let second = controller.identify(vec![2], &IdentifyParams::default()).await;
        assert!(matches!(second, Err(DomainError::RequestInFlight)));

        transport.release.notify_one();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first.suggestion(), Some("Gir"));
        assert_eq!(controller.identify_state(), IdentifyState::Idle);

        let _ = fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_list_breeds_uses_current_url() {
        let (store, dir) = temp_store("breedlens_controller_breeds");
        let transport = FakeTransport::new(Ok(HttpResponse::new(200, r#"{"gir":"Gir"}"#)));
        let controller = AppController::from_parts(store, transport.clone()).unwrap();
        controller.set_api_url("http://127.0.0.1:9000");

        let result = controller.list_breeds().await;
        assert_eq!(result.catalog().unwrap().names().collect::<Vec<_>>(), vec!["Gir"]);
        assert_eq!(transport.sent.lock()[0].url, "http://127.0.0.1:9000/breeds");

        let _ = fs::remove_dir_all(&dir);
    }

    /// In-memory store that counts loads.
    struct CountingStore {
        loads: Mutex<u32>,
    }

    impl ConfigStore for CountingStore {
        fn load(&self) -> Result<AppConfig, DomainError> {
            *self.loads.lock() += 1;
            Ok(AppConfig::new())
        }

        fn save(&self, _config: &AppConfig) -> Result<(), DomainError> {
            Ok(())
        }

        fn config_path(&self) -> PathBuf {
            PathBuf::from("config.toml")
        }

        fn data_dir(&self) -> PathBuf {
            PathBuf::from(".")
        }

        fn logs_dir(&self) -> PathBuf {
            PathBuf::from("logs")
        }
    }

    #[test]
    fn test_settings_are_read_once() {
        let store = Arc::new(CountingStore {
            loads: Mutex::new(0),
        });
        let transport = FakeTransport::new(Ok(HttpResponse::new(200, "{}")));
        let controller = AppController::from_parts(store.clone(), transport).unwrap();

        assert_eq!(*store.loads.lock(), 1);
        assert_eq!(controller.config_path(), "config.toml");
    }

    #[tokio::test]
    async fn test_update_config_persists() {
        let (store, dir) = temp_store("breedlens_controller_config");
        let transport = FakeTransport::new(Ok(HttpResponse::new(200, "{}")));
        let controller = AppController::from_parts(store.clone(), transport).unwrap();

        let mut config = controller.config();
        config.prediction.top_k = 5;
        controller.update_config(config).unwrap();

        assert_eq!(controller.default_params().top_k, 5);
        assert_eq!(store.load().unwrap().prediction.top_k, 5);

        let _ = fs::remove_dir_all(&dir);
    }
}
