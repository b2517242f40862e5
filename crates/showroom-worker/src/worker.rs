use std::cell::Cell;
use std::sync::mpsc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info};

use showroom_decode::{decode_scene, MeshRecord};

use crate::error::WorkerError;
use crate::fetch;
use crate::request::LoadRequest;
use crate::response::WorkerResponse;

/// Tuning for the decode worker.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Upper bound on one asset fetch, connect included.
    pub fetch_timeout: Duration,
    /// Threads backing the worker's runtime.
    pub worker_threads: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: Duration::from_secs(30),
            worker_threads: 2,
        }
    }
}

/// A non-blocking handle to one in-flight decode. Each handle owns its own
/// channel, so there is nothing to correlate: whatever arrives here belongs
/// to the request that created it.
pub struct PendingDecode {
    receiver: mpsc::Receiver<WorkerResponse>,
    spent: Cell<bool>,
}

impl PendingDecode {
    /// Non-blocking poll. Returns `None` while the pipeline is still running,
    /// and the single response once — a synthesized failure if the task died
    /// without answering (e.g. the worker was dropped mid-fetch).
    pub fn try_recv(&self) -> Option<WorkerResponse> {
        if self.spent.get() {
            return None;
        }
        match self.receiver.try_recv() {
            Ok(response) => {
                self.spent.set(true);
                Some(response)
            }
            Err(mpsc::TryRecvError::Empty) => None,
            Err(mpsc::TryRecvError::Disconnected) => {
                self.spent.set(true);
                Some(dropped_task_failure())
            }
        }
    }

    /// Block until the response arrives. Every submitted request produces
    /// exactly one response, so this cannot wait forever on a finished task.
    pub fn wait(self) -> WorkerResponse {
        if self.spent.get() {
            return dropped_task_failure();
        }
        self.receiver.recv().unwrap_or_else(|_| dropped_task_failure())
    }
}

fn dropped_task_failure() -> WorkerResponse {
    WorkerResponse::Failure {
        error: "decode task dropped before responding".into(),
    }
}

/// Owns the background runtime and HTTP client; holds no state per request
/// and nothing across requests.
pub struct DecodeWorker {
    runtime: tokio::runtime::Runtime,
    client: Client,
}

impl DecodeWorker {
    pub fn new(config: WorkerConfig) -> Result<Self, WorkerError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(config.worker_threads)
            .enable_all()
            .build()
            .map_err(|e| WorkerError::Runtime(e.to_string()))?;

        let client = Client::builder().timeout(config.fetch_timeout).build()?;

        info!(
            "Decode worker started ({} threads, {:?} fetch timeout)",
            config.worker_threads, config.fetch_timeout
        );
        Ok(Self { runtime, client })
    }

    /// Start fetching and decoding one asset. The returned handle receives
    /// the single response; dropping it discards the response without
    /// disturbing the pipeline.
    pub fn submit(&self, request: LoadRequest) -> PendingDecode {
        let (sender, receiver) = mpsc::channel();
        let client = self.client.clone();
        self.runtime.spawn(async move {
            let url = request.url.clone();
            let response = WorkerResponse::from(fetch_and_decode(&client, &request).await);
            if sender.send(response).is_err() {
                debug!("Response for '{url}' dropped by caller");
            }
        });
        PendingDecode {
            receiver,
            spent: Cell::new(false),
        }
    }
}

/// The full pipeline for callers that already run inside a runtime: fetch
/// the bytes, then parse and flatten on the blocking pool so the CPU-bound
/// part never stalls the async executor.
pub async fn fetch_and_decode(
    client: &Client,
    request: &LoadRequest,
) -> Result<Vec<MeshRecord>, WorkerError> {
    if let Some(path) = &request.decoder_path {
        debug!("Decoder path '{path}' accepted; compressed geometry is not wired up");
    }

    let bytes = fetch::fetch_bytes(client, &request.url).await?;
    let records = tokio::task::spawn_blocking(move || decode_scene(&bytes))
        .await
        .map_err(|e| WorkerError::TaskFailed(e.to_string()))??;

    info!("Decoded {} meshes from '{}'", records.len(), request.url);
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_asset_yields_exactly_one_failure() {
        let worker = DecodeWorker::new(WorkerConfig::default()).unwrap();
        let pending = worker.submit(LoadRequest::new("/nonexistent/showroom/car.glb"));

        let response = pending.wait();
        match response {
            WorkerResponse::Failure { error } => assert!(!error.is_empty()),
            other => panic!("expected failure, got: {other:?}"),
        }
    }

    #[test]
    fn malformed_asset_yields_failure_not_panic() {
        let path = std::env::temp_dir().join(format!(
            "showroom-malformed-{}.glb",
            std::process::id()
        ));
        std::fs::write(&path, b"not a gltf payload").unwrap();

        let worker = DecodeWorker::new(WorkerConfig::default()).unwrap();
        let response = worker
            .submit(LoadRequest::new(path.to_string_lossy().into_owned()))
            .wait();
        std::fs::remove_file(&path).ok();

        assert!(!response.is_success());
    }

    #[test]
    fn try_recv_is_none_until_delivery() {
        let worker = DecodeWorker::new(WorkerConfig::default()).unwrap();
        let pending = worker.submit(LoadRequest::new("/nonexistent/showroom/car.glb"));

        // Poll until the single response lands, then the channel is spent.
        let mut response = None;
        for _ in 0..500 {
            if let Some(r) = pending.try_recv() {
                response = Some(r);
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        let response = response.expect("no response within five seconds");
        assert!(!response.is_success());
        assert!(pending.try_recv().is_none());
    }

    #[test]
    fn dropped_worker_still_delivers_one_failure() {
        // A listener that never accepts keeps the fetch stalled.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/car.glb", listener.local_addr().unwrap());

        let worker = DecodeWorker::new(WorkerConfig::default()).unwrap();
        let pending = worker.submit(LoadRequest::new(url));
        std::thread::sleep(Duration::from_millis(50));
        drop(worker);

        let mut response = None;
        for _ in 0..500 {
            if let Some(r) = pending.try_recv() {
                response = Some(r);
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        let response = response.expect("no response after the worker was dropped");
        assert!(!response.is_success());
        // The channel is spent after the single delivery.
        assert!(pending.try_recv().is_none());
    }

    #[test]
    fn concurrent_requests_answer_on_their_own_channels() {
        let worker = DecodeWorker::new(WorkerConfig::default()).unwrap();
        let first = worker.submit(LoadRequest::new("/nonexistent/a.glb"));
        let second = worker.submit(LoadRequest::new("/nonexistent/b.glb"));

        match (first.wait(), second.wait()) {
            (WorkerResponse::Failure { error: a }, WorkerResponse::Failure { error: b }) => {
                assert!(a.contains("a.glb"));
                assert!(b.contains("b.glb"));
            }
            other => panic!("expected two failures, got: {other:?}"),
        }
    }
}
