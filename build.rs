fn main() {
    // Credentials and location are baked in at build time on device.
    for var in ["WIFI_SSID", "WIFI_PASS", "OWM_API_KEY", "LATITUDE", "LONGITUDE"] {
        println!("cargo:rerun-if-env-changed={var}");
    }

    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
