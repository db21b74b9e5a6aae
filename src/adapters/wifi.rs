//! WiFi station-mode adapter.
//!
//! Implements [`ConnectivityPort`].  The service makes one association
//! attempt per cycle while down, so the adapter itself never retries or
//! backs off: the 10 s cycle is the backoff.
//!
//! ## cfg gating
//!
//! - **`target_os = "espidf"`**: blocking ESP-IDF WiFi via `esp_idf_svc::wifi`.
//! - **all other targets**: simulation with a switchable access point.

use log::{info, warn};

use crate::app::ports::{ConnectivityError, ConnectivityPort};

#[cfg(target_os = "espidf")]
use esp_idf_svc::wifi::{BlockingWifi, ClientConfiguration, Configuration, EspWifi};

// ───────────────────────────────────────────────────────────────
// Validation
// ───────────────────────────────────────────────────────────────

/// 1-32 printable ASCII bytes.
fn ssid_ok(ssid: &str) -> bool {
    (1..=32).contains(&ssid.len()) && ssid.bytes().all(|b| b.is_ascii_graphic() || b == b' ')
}

/// Empty for an open network, otherwise a WPA2 passphrase of 8-64 bytes.
fn password_ok(password: &str) -> bool {
    password.is_empty() || (8..=64).contains(&password.len())
}

// ───────────────────────────────────────────────────────────────
// WiFi adapter
// ───────────────────────────────────────────────────────────────

pub struct WifiAdapter {
    ssid: heapless::String<32>,
    password: heapless::String<64>,
    attempts: u32,
    #[cfg(target_os = "espidf")]
    wifi: BlockingWifi<EspWifi<'static>>,
    /// Simulation: whether the access point is reachable.
    #[cfg(not(target_os = "espidf"))]
    ap_available: bool,
    #[cfg(not(target_os = "espidf"))]
    associated: bool,
}

impl WifiAdapter {
    #[cfg(target_os = "espidf")]
    pub fn new(wifi: BlockingWifi<EspWifi<'static>>) -> Self {
        Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            attempts: 0,
            wifi,
        }
    }

    #[cfg(not(target_os = "espidf"))]
    pub fn new() -> Self {
        Self {
            ssid: heapless::String::new(),
            password: heapless::String::new(),
            attempts: 0,
            ap_available: true,
            associated: false,
        }
    }

    pub fn set_credentials(&mut self, ssid: &str, password: &str) -> Result<(), ConnectivityError> {
        if !ssid_ok(ssid) {
            return Err(ConnectivityError::InvalidSsid);
        }
        if !password_ok(password) {
            return Err(ConnectivityError::InvalidPassword);
        }
        self.ssid = heapless::String::try_from(ssid).map_err(|_| ConnectivityError::InvalidSsid)?;
        self.password =
            heapless::String::try_from(password).map_err(|_| ConnectivityError::InvalidPassword)?;
        info!("WiFi: credentials set (SSID='{}')", self.ssid);
        Ok(())
    }

    /// Association attempts since construction.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    // ── Platform-specific ─────────────────────────────────────

    #[cfg(target_os = "espidf")]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        let config = Configuration::Client(ClientConfiguration {
            ssid: self
                .ssid
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidSsid)?,
            password: self
                .password
                .as_str()
                .try_into()
                .map_err(|_| ConnectivityError::InvalidPassword)?,
            ..Default::default()
        });
        let fail = |e: esp_idf_svc::sys::EspError| {
            warn!("WiFi(espidf): {}", e);
            ConnectivityError::ConnectionFailed
        };
        self.wifi.set_configuration(&config).map_err(fail)?;
        if !self.wifi.is_started().map_err(fail)? {
            self.wifi.start().map_err(fail)?;
        }
        self.wifi.connect().map_err(fail)?;
        self.wifi.wait_netif_up().map_err(fail)?;
        Ok(())
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_connect(&mut self) -> Result<(), ConnectivityError> {
        if !self.ap_available {
            return Err(ConnectivityError::ConnectionFailed);
        }
        self.associated = true;
        Ok(())
    }

    #[cfg(target_os = "espidf")]
    fn platform_is_connected(&self) -> bool {
        self.wifi.is_connected().unwrap_or(false)
    }

    #[cfg(not(target_os = "espidf"))]
    fn platform_is_connected(&self) -> bool {
        self.associated && self.ap_available
    }

    /// Simulation: take the access point up or down.  Taking it down
    /// drops an existing association.
    #[cfg(not(target_os = "espidf"))]
    pub fn set_ap_available(&mut self, available: bool) {
        self.ap_available = available;
        if !available {
            self.associated = false;
        }
    }
}

#[cfg(not(target_os = "espidf"))]
impl Default for WifiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

// ───────────────────────────────────────────────────────────────
// ConnectivityPort
// ───────────────────────────────────────────────────────────────

impl ConnectivityPort for WifiAdapter {
    fn connect(&mut self) -> Result<(), ConnectivityError> {
        if self.ssid.is_empty() {
            return Err(ConnectivityError::NoCredentials);
        }
        if self.platform_is_connected() {
            return Err(ConnectivityError::AlreadyConnected);
        }

        self.attempts = self.attempts.wrapping_add(1);
        info!("WiFi: connecting to '{}' (attempt {})", self.ssid, self.attempts);
        match self.platform_connect() {
            Ok(()) => {
                info!("WiFi: connected");
                Ok(())
            }
            Err(e) => {
                warn!("WiFi: connection failed — {}", e);
                Err(e)
            }
        }
    }

    fn is_connected(&self) -> bool {
        self.platform_is_connected()
    }
}

// ───────────────────────────────────────────────────────────────
// Tests
// ───────────────────────────────────────────────────────────────

#[cfg(all(test, not(target_os = "espidf")))]
mod tests {
    use super::*;

    #[test]
    fn credential_rules() {
        let mut a = WifiAdapter::new();
        assert_eq!(a.set_credentials("", "weatherpass"), Err(ConnectivityError::InvalidSsid));
        assert_eq!(a.set_credentials("Bad\tNet", "weatherpass"), Err(ConnectivityError::InvalidSsid));
        assert_eq!(a.set_credentials("Attic", "1234567"), Err(ConnectivityError::InvalidPassword));
        assert!(a.set_credentials("Coffee Shop", "").is_ok(), "open network");
        assert!(a.set_credentials(&"x".repeat(32), &"p".repeat(64)).is_ok());
    }

    #[test]
    fn connect_without_credentials_fails() {
        let mut a = WifiAdapter::new();
        assert_eq!(a.connect(), Err(ConnectivityError::NoCredentials));
        assert_eq!(a.attempts(), 0);
    }

    #[test]
    fn double_connect_fails() {
        let mut a = WifiAdapter::new();
        a.set_credentials("Net", "password1").unwrap();
        a.connect().unwrap();
        assert!(a.is_connected());
        assert_eq!(a.connect(), Err(ConnectivityError::AlreadyConnected));
    }

    #[test]
    fn outage_drops_and_blocks_association() {
        let mut a = WifiAdapter::new();
        a.set_credentials("Net", "password1").unwrap();
        a.connect().unwrap();

        a.set_ap_available(false);
        assert!(!a.is_connected());
        assert_eq!(a.connect(), Err(ConnectivityError::ConnectionFailed));

        a.set_ap_available(true);
        a.connect().unwrap();
        assert!(a.is_connected());
        assert_eq!(a.attempts(), 3);
    }
}
