//! Background execution of station requests
//!
//! The view is driven by an immediate-mode UI that must never block, so
//! requests run as tasks on a tokio runtime and their outcomes come back over
//! a channel the UI drains once per frame.

use crate::data::{request::StationResponse, service::StationApi};
use crate::ui::map_view::PendingRequest;
use crate::Result;
use crossbeam_channel::{Receiver, Sender};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;

/// A finished request, ready for [`crate::MapView::complete`]
#[derive(Debug)]
pub struct Completion {
    pub pending: PendingRequest,
    pub result: Result<StationResponse>,
}

/// Spawns requests on tokio and collects their results
pub struct RequestRunner {
    handle: Handle,
    api: Arc<dyn StationApi>,
    tx: Sender<Completion>,
    rx: Receiver<Completion>,
}

impl RequestRunner {
    pub fn new(handle: Handle, api: Arc<dyn StationApi>) -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { handle, api, tx, rx }
    }

    /// Uses the runtime the caller is running inside
    pub fn current(api: Arc<dyn StationApi>) -> Result<Self> {
        let handle = Handle::try_current()
            .map_err(|e| crate::Error::Config(format!("no tokio runtime: {}", e)))?;
        Ok(Self::new(handle, api))
    }

    pub fn submit(&self, pending: PendingRequest) {
        let api = self.api.clone();
        let tx = self.tx.clone();
        log::debug!("spawning {}", pending.request);
        self.handle.spawn(async move {
            let result = pending.request.execute(api.as_ref()).await;
            if tx.send(Completion { pending, result }).is_err() {
                log::warn!("request finished after its runner was dropped");
            }
        });
    }

    /// Completions that arrived since the last call, without blocking
    pub fn poll(&self) -> Vec<Completion> {
        self.rx.try_iter().collect()
    }

    /// Blocks until one completion arrives or `timeout` passes
    pub fn wait(&self, timeout: Duration) -> Option<Completion> {
        self.rx.recv_timeout(timeout).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::AppConfig;
    use crate::data::station::{DtoStation, Station, StationId};
    use crate::ui::map_view::MapView;
    use crate::ViewState;
    use async_trait::async_trait;
    use serde_json::Value;

    struct OneStation;

    #[async_trait]
    impl StationApi for OneStation {
        async fn list(&self) -> Result<Vec<Station>> {
            Ok(vec![Station {
                id: StationId::new("7"),
                ubication: "Cumbre".to_string(),
                latitude: 1.0,
                longitude: 2.0,
                temperature: 5.0,
                client: None,
            }])
        }

        async fn create(&self, _dto: &DtoStation) -> Result<Value> {
            Ok(Value::Null)
        }

        async fn update_by_id(&self, _id: &StationId, _dto: &DtoStation) -> Result<Value> {
            Ok(Value::Null)
        }

        async fn delete_by_id(&self, _id: &StationId) -> Result<Value> {
            Ok(Value::Null)
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_runner_delivers_completions() {
        let runner = RequestRunner::current(Arc::new(OneStation)).unwrap();
        let mut view = MapView::new(AppConfig::default());
        runner.submit(view.begin_load());

        let completion = tokio::task::spawn_blocking(move || {
            let completion = runner.wait(Duration::from_secs(5));
            (runner, completion)
        })
        .await
        .unwrap();
        let (runner, completion) = completion;
        let completion = completion.expect("list should complete");

        assert!(view.complete(&completion.pending, completion.result).is_none());
        assert_eq!(view.state(), &ViewState::Idle);
        assert_eq!(view.stations().len(), 1);
        assert!(runner.poll().is_empty());
    }
}
