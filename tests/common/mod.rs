#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;

use toggleboard::server::{self, AppState};
use toggleboard::store::memory::MemoryStore;
use toggleboard::store::ToggleStore;

pub struct TestServer {
    pub addr: SocketAddr,
    pub state: Arc<AppState>,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

pub async fn start_test_server() -> TestServer {
    start_test_server_with(Arc::new(MemoryStore::new())).await
}

pub async fn start_test_server_with(store: Arc<dyn ToggleStore>) -> TestServer {
    let state = Arc::new(AppState::new(store));
    let router = server::build_router(Arc::clone(&state), 1_048_576);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    TestServer {
        addr,
        state,
        shutdown: Some(shutdown_tx),
    }
}
