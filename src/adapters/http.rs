//! HTTP JSON adapter.
//!
//! Implements [`HttpPort`].  A status code is reported whenever the
//! server answered; the body is parsed only for 2xx and an unparseable
//! body comes back as `body: None` rather than an error, so the poller
//! can tell "bad JSON" apart from "no answer".
//!
//! - **`target_os = "espidf"`**: `EspHttpConnection` wrapped in the
//!   `embedded_svc` blocking client, one connection per request.
//! - **all other targets**: canned responses keyed by URL.

use log::debug;
#[cfg(target_os = "espidf")]
use log::warn;

use crate::app::ports::{HttpPort, HttpResponse};
use crate::error::FetchError;

#[cfg(target_os = "espidf")]
use embedded_svc::http::client::Client;
#[cfg(target_os = "espidf")]
use embedded_svc::io::Read;
#[cfg(target_os = "espidf")]
use esp_idf_svc::http::client::{Configuration, EspHttpConnection};

/// Largest body accepted; a One Call response with alerts is ~15 KiB.
const MAX_BODY: usize = 48 * 1024;

/// Per-request socket timeout.
pub const REQUEST_TIMEOUT_MS: u32 = 10_000;

fn parse_body(status: u16, bytes: &[u8]) -> HttpResponse {
    if !(200..=299).contains(&status) {
        return HttpResponse::status_only(status);
    }
    match serde_json::from_slice(bytes) {
        Ok(body) => HttpResponse {
            status,
            body: Some(body),
        },
        Err(e) => {
            debug!("HTTP: body is not JSON ({}); {} bytes", e, bytes.len());
            HttpResponse::status_only(status)
        }
    }
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF client
// ───────────────────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
#[derive(Debug, Default)]
pub struct EspHttpAdapter;

#[cfg(target_os = "espidf")]
impl EspHttpAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[cfg(target_os = "espidf")]
impl HttpPort for EspHttpAdapter {
    fn get_json(&mut self, url: &str) -> Result<HttpResponse, FetchError> {
        let connection = EspHttpConnection::new(&Configuration {
            use_global_ca_store: true,
            crt_bundle_attach: Some(esp_idf_svc::sys::esp_crt_bundle_attach),
            timeout: Some(core::time::Duration::from_millis(u64::from(REQUEST_TIMEOUT_MS))),
            ..Default::default()
        })
        .map_err(|e| {
            warn!("HTTP: connection setup failed — {}", e);
            FetchError::ConnectFailed
        })?;
        let mut client = Client::wrap(connection);

        let request = client.get(url).map_err(|_| FetchError::ConnectFailed)?;
        let mut response = request.submit().map_err(|e| {
            warn!("HTTP: request failed — {}", e);
            FetchError::ConnectFailed
        })?;
        let status = response.status();

        let mut body = Vec::new();
        let mut buf = [0_u8; 256];
        loop {
            let size = response.read(&mut buf).map_err(|_| FetchError::ReadFailed)?;
            if size == 0 {
                break;
            }
            if body.len() + size > MAX_BODY {
                warn!("HTTP: body over {} bytes, dropped", MAX_BODY);
                return Ok(HttpResponse::status_only(status));
            }
            body.extend_from_slice(&buf[..size]);
        }
        debug!("HTTP: {} -> {} ({} bytes)", url, status, body.len());
        Ok(parse_body(status, &body))
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

/// One scripted answer.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Clone)]
pub enum CannedReply {
    /// Status plus raw body text, run through the same parsing as the device.
    Body(u16, String),
    Fail(FetchError),
}

/// Serves canned replies by exact URL; unknown URLs are unavailable.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SimulatedHttp {
    replies: std::collections::HashMap<String, CannedReply>,
    requests: Vec<String>,
}

#[cfg(not(target_os = "espidf"))]
impl SimulatedHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reply(&mut self, url: impl Into<String>, reply: CannedReply) {
        self.replies.insert(url.into(), reply);
    }

    /// Every URL requested, oldest first.
    pub fn requests(&self) -> &[String] {
        &self.requests
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.iter().filter(|u| *u == url).count()
    }
}

#[cfg(not(target_os = "espidf"))]
impl HttpPort for SimulatedHttp {
    fn get_json(&mut self, url: &str) -> Result<HttpResponse, FetchError> {
        self.requests.push(url.to_owned());
        match self.replies.get(url) {
            Some(CannedReply::Body(status, text)) => {
                if text.len() > MAX_BODY {
                    return Ok(HttpResponse::status_only(*status));
                }
                Ok(parse_body(*status, text.as_bytes()))
            }
            Some(CannedReply::Fail(e)) => Err(e.clone()),
            None => Err(FetchError::Unavailable),
        }
    }
}
