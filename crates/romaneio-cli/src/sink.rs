//! Web-session dispatch sink.
//!
//! Messages go out as GET requests against a messaging web endpoint,
//! `?phone=<digits>&text=<urlencoded>`. One HTTP client is acquired on
//! first use and reused for the rest of the run, the way an operator
//! keeps a single messaging tab open.

use reqwest::blocking::Client;
use std::time::Duration;
use tracing::debug;

use romaneio_core::dispatch::build_send_url;
use romaneio_core::error::DispatchError;
use romaneio_core::DispatchSink;

pub struct WebSession {
    endpoint: String,
    client: Option<Client>,
}

impl WebSession {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: None,
        }
    }

    fn acquire_or_reuse(&mut self) -> Result<&Client, DispatchError> {
        if self.client.is_none() {
            let client = Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .map_err(|e| DispatchError::Transport(e.to_string()))?;
            debug!("dispatch session acquired");
            self.client = Some(client);
        }
        self.client.as_ref().ok_or(DispatchError::NoSession)
    }

    /// Drop the session; the next send acquires a fresh one.
    pub fn close(&mut self) {
        self.client = None;
    }
}

impl DispatchSink for WebSession {
    fn send(&mut self, phone: &str, message: &str) -> Result<(), DispatchError> {
        let url = build_send_url(&self.endpoint, phone, message);
        let client = self.acquire_or_reuse()?;
        let result = client.get(&url).send().and_then(|r| r.error_for_status());
        if let Err(err) = result {
            // stale handle; the next send reacquires
            self.client = None;
            return Err(DispatchError::Transport(err.to_string()));
        }
        Ok(())
    }
}
