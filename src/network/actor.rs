//! Network actor - runs HTTP requests in the Tokio runtime

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::highlight::ResponseFormatter;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::RequestExecutor;

/// Network actor that processes HTTP request commands
pub struct NetworkActor {
    executor: RequestExecutor,
    formatter: Arc<ResponseFormatter>,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    active_requests: JoinSet<u64>,
    cancel_handles: HashMap<u64, oneshot::Sender<()>>,
}

impl NetworkActor {
    pub fn new(
        executor: RequestExecutor,
        formatter: Arc<ResponseFormatter>,
        response_tx: mpsc::UnboundedSender<NetworkResponse>,
    ) -> Self {
        NetworkActor {
            executor,
            formatter,
            response_tx,
            active_requests: JoinSet::new(),
            cancel_handles: HashMap::new(),
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::ExecuteRequest { id, method, url, body }) => {
                            let (cancel_tx, mut cancel_rx) = oneshot::channel();
                            self.cancel_handles.insert(id, cancel_tx);

                            let executor = self.executor.clone();
                            let formatter = Arc::clone(&self.formatter);
                            let response_tx = self.response_tx.clone();

                            self.active_requests.spawn(async move {
                                tracing::info!(id, %url, %method, "Executing request");
                                tokio::select! {
                                    biased;

                                    _ = &mut cancel_rx => {
                                        tracing::info!(id, "Request abandoned");
                                    }
                                    result = executor.perform(&formatter, method.as_str(), &url, &body) => {
                                        let response = match result {
                                            Ok(exchange) => {
                                                tracing::info!(id, status = %exchange.status, time_ms = exchange.time_ms, "Request completed");
                                                NetworkResponse::Success {
                                                    id,
                                                    status: exchange.status,
                                                    display: exchange.display,
                                                    format_warning: exchange.format_error.map(|e| e.to_string()),
                                                    time_ms: exchange.time_ms,
                                                }
                                            }
                                            Err(e) => {
                                                tracing::warn!(id, error = %e, "Request failed");
                                                NetworkResponse::Error {
                                                    id,
                                                    validation: e.is_validation(),
                                                    message: e.to_string(),
                                                }
                                            }
                                        };
                                        let _ = response_tx.send(response);
                                    }
                                }
                                id
                            });
                        }

                        Some(NetworkCommand::CancelRequest(id)) => {
                            if let Some(cancel_tx) = self.cancel_handles.remove(&id) {
                                tracing::info!(id, "Cancelling request");
                                let _ = cancel_tx.send(());
                                let _ = self.response_tx.send(NetworkResponse::Cancelled { id });
                            }
                        }

                        Some(NetworkCommand::Shutdown) => {
                            for (_, cancel_tx) in self.cancel_handles.drain() {
                                let _ = cancel_tx.send(());
                            }
                            break;
                        }

                        None => break,
                    }
                }

                // Drop cancel handles of finished requests
                Some(joined) = self.active_requests.join_next() => {
                    if let Ok(id) = joined {
                        self.cancel_handles.remove(&id);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExecuteError;
    use crate::models::{HttpMethod, RawResponse};
    use crate::network::client::{ClientConfig, Transport};
    use async_trait::async_trait;
    use std::time::Duration;

    /// Answers after a delay with a fixed JSON body
    struct SlowTransport {
        delay: Duration,
    }

    #[async_trait]
    impl Transport for SlowTransport {
        async fn send(&self, _request: reqwest::Request) -> Result<RawResponse, ExecuteError> {
            tokio::time::sleep(self.delay).await;
            Ok(RawResponse {
                body: br#"{"ok":true}"#.to_vec(),
                status: "200 OK".into(),
                content_type: "application/json".into(),
            })
        }
    }

    fn spawn_actor(delay: Duration) -> (
        mpsc::UnboundedSender<NetworkCommand>,
        mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        let executor = RequestExecutor::with_transport(
            Arc::new(SlowTransport { delay }),
            ClientConfig::default(),
        );
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let actor = NetworkActor::new(executor, Arc::new(ResponseFormatter::default()), resp_tx);
        tokio::spawn(actor.run(cmd_rx));
        (cmd_tx, resp_rx)
    }

    fn get(id: u64) -> NetworkCommand {
        NetworkCommand::ExecuteRequest {
            id,
            method: HttpMethod::GET,
            url: "http://localhost/".into(),
            body: String::new(),
        }
    }

    #[tokio::test]
    async fn test_success_is_formatted() {
        let (cmd_tx, mut resp_rx) = spawn_actor(Duration::from_millis(1));
        cmd_tx.send(get(1)).unwrap();

        match resp_rx.recv().await.unwrap() {
            NetworkResponse::Success { id, status, display, format_warning, .. } => {
                assert_eq!(id, 1);
                assert_eq!(status, "200 OK");
                assert_eq!(crate::highlight::strip_markup(&display), "{\n  \"ok\": true\n}");
                assert!(format_warning.is_none());
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_validation_error_is_reported() {
        let (cmd_tx, mut resp_rx) = spawn_actor(Duration::from_millis(1));
        cmd_tx
            .send(NetworkCommand::ExecuteRequest {
                id: 7,
                method: HttpMethod::POST,
                url: "http://localhost/".into(),
                body: "{bad json".into(),
            })
            .unwrap();

        match resp_rx.recv().await.unwrap() {
            NetworkResponse::Error { id, validation, .. } => {
                assert_eq!(id, 7);
                assert!(validation);
            }
            other => panic!("unexpected response: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_cancelled_request_sends_no_result() {
        let (cmd_tx, mut resp_rx) = spawn_actor(Duration::from_millis(300));
        cmd_tx.send(get(1)).unwrap();
        cmd_tx.send(NetworkCommand::CancelRequest(1)).unwrap();
        cmd_tx.send(get(2)).unwrap();

        let first = resp_rx.recv().await.unwrap();
        assert!(matches!(first, NetworkResponse::Cancelled { id: 1 }));
        let second = resp_rx.recv().await.unwrap();
        assert_eq!(second.id(), 2);

        cmd_tx.send(NetworkCommand::Shutdown).unwrap();
    }
}
