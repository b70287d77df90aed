//! Delivery of a finished checklist to the spreadsheet endpoint.
//!
//! The endpoint is a spreadsheet web app whose responses are not inspected:
//! the only signal is whether the request went out without a transport
//! error. A request the endpoint rejects looks the same as one it accepts.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{info, warn};

use crate::domain::{Catalog, SubmissionPayload, SubmitError, SubmitResult, WizardRecord};
use crate::infrastructure::config::EndpointConfig;

/// Sends a JSON body to a URL.
///
/// Implementations report only whether the request was dispatched.
pub trait Transport {
    fn post_json(&self, url: &str, body: String) -> Result<(), String>;
}

/// Blocking HTTP transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// # Errors
    ///
    /// Fails if the TLS backend cannot be initialized.
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn post_json(&self, url: &str, body: String) -> Result<(), String> {
        // The response is dropped unread; status and body are not part of the contract.
        self.client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .map(drop)
            .map_err(|e| e.to_string())
    }
}

/// Local time rendered the way the spreadsheet expects it.
pub fn local_timestamp() -> String {
    chrono::Local::now().format("%d/%m/%Y, %H:%M:%S").to_string()
}

pub struct Submitter<T: Transport = HttpTransport> {
    endpoint: String,
    catalog: Catalog,
    transport: T,
}

impl Submitter<HttpTransport> {
    /// Builds a submitter posting over HTTP with the configured timeout.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn from_config(config: &EndpointConfig, catalog: Catalog) -> reqwest::Result<Self> {
        Ok(Self::new(config.url.clone(), catalog, HttpTransport::new(config.timeout())?))
    }
}

impl<T: Transport> Submitter<T> {
    pub fn new(endpoint: impl Into<String>, catalog: Catalog, transport: T) -> Self {
        Self {
            endpoint: endpoint.into(),
            catalog,
            transport,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.endpoint.is_empty()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Posts `record` stamped with the current local time.
    pub fn submit(&self, record: &WizardRecord) -> SubmitResult<()> {
        self.submit_at(record, local_timestamp())
    }

    /// Posts `record` with an explicit timestamp.
    ///
    /// Exactly one request is made, and none at all when no endpoint is
    /// configured.
    pub fn submit_at(&self, record: &WizardRecord, timestamp: String) -> SubmitResult<()> {
        if !self.is_configured() {
            warn!("submission refused: endpoint URL is not configured");
            return Err(SubmitError::EndpointNotConfigured);
        }

        let payload = SubmissionPayload::build(&self.catalog, record, timestamp);
        let body = serde_json::to_string(&payload)?;

        match self.transport.post_json(&self.endpoint, body) {
            Ok(()) => {
                info!(
                    plate = %record.vehicle_plate,
                    items = payload.items.len(),
                    "checklist dispatched"
                );
                Ok(())
            }
            Err(detail) => {
                warn!(error = %detail, "checklist dispatch failed");
                Err(SubmitError::communication(detail))
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingTransport;
    use super::*;
    use crate::domain::ItemStatus;

    const URL: &str = "https://script.example.com/macros/s/abc/exec";

    #[test]
    fn test_missing_endpoint_never_dispatches() {
        let catalog = Catalog::default();
        let submitter = Submitter::new("", catalog, RecordingTransport::default());
        let result = submitter.submit(&catalog.new_record());
        assert!(matches!(result, Err(SubmitError::EndpointNotConfigured)));
        assert_eq!(submitter.transport().request_count(), 0);
    }

    #[test]
    fn test_dispatch_posts_one_request_to_endpoint() {
        let catalog = Catalog::default();
        let submitter = Submitter::new(URL, catalog, RecordingTransport::default());
        let mut record = catalog.new_record();
        record.set_vehicle_plate("QRS-0001");
        record.set_operator_name("Ana");
        record.set_status("tesoura", ItemStatus::NonConforming);

        submitter.submit_at(&record, "18/10/2026, 06:00:00".to_string()).unwrap();

        let requests = submitter.transport().requests.borrow();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, URL);
        let body: serde_json::Value = serde_json::from_str(&requests[0].1).unwrap();
        assert_eq!(body["timestamp"], "18/10/2026, 06:00:00");
        assert_eq!(body["placa"], "QRS-0001");
        assert_eq!(body["items"][16]["status"], "NC");
    }

    #[test]
    fn test_transport_failure_is_a_communication_error() {
        let catalog = Catalog::default();
        let submitter = Submitter::new(URL, catalog, RecordingTransport::failing("connection refused"));
        let record = catalog.new_record();
        let before = record.clone();

        let result = submitter.submit(&record);

        assert!(matches!(result, Err(SubmitError::Communication { .. })));
        assert_eq!(submitter.transport().request_count(), 1);
        assert_eq!(record, before);
    }

    #[test]
    fn test_local_timestamp_shape() {
        let stamp = local_timestamp();
        // dd/mm/yyyy, HH:MM:SS
        assert_eq!(stamp.len(), 20);
        assert_eq!(&stamp[2..3], "/");
        assert_eq!(&stamp[5..6], "/");
        assert_eq!(&stamp[10..12], ", ");
    }

    #[test]
    fn test_http_transport_reports_unreachable_host() {
        let transport = HttpTransport::new(Duration::from_secs(2)).unwrap();
        // Port 9 on localhost is the discard port and is closed on test machines.
        let result = transport.post_json("http://127.0.0.1:9/", "{}".to_string());
        assert!(result.is_err());
    }
}
