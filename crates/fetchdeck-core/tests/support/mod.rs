use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use parking_lot::Mutex;
use url::Url;

use fetchdeck_core::{Alert, AlertSink, ApiClient, Session};

/// Sink that records every notification for assertions.
#[derive(Default)]
pub struct RecordingSink {
    alerts: Mutex<Vec<Alert>>,
    unauthorized: AtomicUsize,
}

impl RecordingSink {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().clone()
    }

    pub fn unauthorized_count(&self) -> usize {
        self.unauthorized.load(Ordering::SeqCst)
    }
}

impl AlertSink for RecordingSink {
    fn notify(&self, alert: Alert) {
        self.alerts.lock().push(alert);
    }

    fn unauthorized(&self) {
        self.unauthorized.fetch_add(1, Ordering::SeqCst);
    }
}

pub fn client_for(base_url: &str, sink: Arc<RecordingSink>) -> ApiClient {
    // A host-level proxy must never intercept requests to the mock server.
    static DISABLE_PROXY: Once = Once::new();
    DISABLE_PROXY.call_once(|| unsafe {
        std::env::set_var("FETCHDECK_DISABLE_SYSTEM_PROXY", "1");
    });

    ApiClient::new(
        Url::parse(base_url).expect("valid base url"),
        Session::with_token("test-token"),
        sink,
    )
}
