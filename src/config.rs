use std::path::PathBuf;
use std::time::Duration;

/// Application-level constants
pub const APP_NAME: &str = "Renova Dashboard";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Object key under which the workbook lives in the blob store.
pub const DATA_KEY: &str = "hospital_data.xlsx";

/// Upload size cap for `/api/upload-excel` (10 MB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Get the application data directory (`~/RenovaDashboard/` by default).
pub fn app_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os("RENOVA_DATA_DIR") {
        return PathBuf::from(dir);
    }
    let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join("RenovaDashboard")
}

/// Root directory for the filesystem blob store (remote-source tier).
pub fn blob_dir() -> PathBuf {
    app_data_dir().join("storage")
}

/// Local workbook fallback path (second ingestion tier).
pub fn local_data_path() -> PathBuf {
    std::env::var_os("RENOVA_DATA_FILE")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./public/data/hospital_data.xlsx"))
}

/// Directory served as static dashboard assets.
pub fn public_dir() -> PathBuf {
    std::env::var_os("RENOVA_PUBLIC_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("./public"))
}

/// HTTP bind port.
pub fn port() -> u16 {
    std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3000)
}

/// Interval between background data refreshes (10 minutes).
pub fn reload_interval() -> Duration {
    let secs = std::env::var("RENOVA_RELOAD_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(600);
    Duration::from_secs(secs)
}

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    "info,tower_http=warn".to_string()
}
