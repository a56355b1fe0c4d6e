//! # Weather Provider Document Loading
//!
//! The platform weather service exports its latest query as a JSON
//! document; this module reads it, with a small TTL'd file cache so the
//! widgets can refresh without waking the provider every time.
//!
//! ## Caching Strategy
//! - **Location**: `/tmp` (cleared on reboot, no permanent storage used)
//! - **TTL**: 30 minutes, checked against file modification time
//! - **Failure policy**: cache write failures are non-fatal; a corrupt or
//!   stale cache falls through to the provider document
//!
//! The renderers never call into this module. Callers load a
//! [`WeatherInfo`] and pass it (or its entries) in read-only.

use crate::WeatherInfo;
use std::path::Path;
use std::{fs, io, time::SystemTime};
use thiserror::Error;

/// Errors from loading the provider document.
#[derive(Error, Debug)]
pub enum WeatherError {
    /// Provider document or cache file could not be read
    #[error("weather provider IO: {0}")]
    Io(#[from] io::Error),

    /// Document exists but is not a valid forecast payload
    #[error("weather payload parse: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the platform weather service drops its export.
pub const DEFAULT_PROVIDER_PATH: &str = "/tmp/weather_provider.json";

/// Cache file location; `/tmp` keeps it off permanent storage.
const CACHE: &str = "/tmp/clock_widgets_weather_cache.json";

/// Cache time-to-live in seconds (30 minutes).
const TTL: u64 = 1800;

/// Load the current forecast, cache-first.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use clock_widget_lib::weather_data;
///
/// let info = weather_data::load(Path::new("/tmp/weather_provider.json"))
///     .unwrap_or_else(|err| {
///         log::warn!("weather load failed: {err}");
///         weather_data::placeholder()
///     });
/// assert!(!info.temp_units.is_empty());
/// ```
pub fn load(provider_path: &Path) -> Result<WeatherInfo, WeatherError> {
    if let Ok(info) = load_cache() {
        log::debug!("weather data served from cache");
        return Ok(info);
    }

    let info = read_document(provider_path)?;
    log::info!(
        "weather data loaded from provider: {} ({} day forecast)",
        info.city,
        info.forecasts.len()
    );

    // Save for future requests (ignore cache write failures)
    let _ = save_cache(&info);

    Ok(info)
}

/// Parse a forecast document at `path`.
pub fn read_document(path: &Path) -> Result<WeatherInfo, WeatherError> {
    let data = fs::read(path)?;
    Ok(serde_json::from_slice(&data)?)
}

/// Synthetic forecast used when no provider document exists, so preview
/// mode always has something to draw.
pub fn placeholder() -> WeatherInfo {
    WeatherInfo {
        condition_code: 28,
        temp: "21".to_string(),
        temp_units: "°C".to_string(),
        timestamp: 0,
        city: "Portland".to_string(),
        wind_speed: "8".to_string(),
        wind_units: "km/h".to_string(),
        wind_direction: "NW".to_string(),
        humidity: "52%".to_string(),
        forecasts: (0..5)
            .map(|day| crate::ForecastEntry {
                condition_code: [28, 30, 11, 32, 26][day as usize],
                low: format!("{}", 12 + day),
                high: format!("{}", 21 + day),
            })
            .collect(),
    }
}

/// Load the cached forecast if it is still fresh.
fn load_cache() -> Result<WeatherInfo, io::Error> {
    let meta = fs::metadata(CACHE)?;

    let age = SystemTime::now()
        .duration_since(meta.modified()?)
        .map_err(|_| io::Error::other("time error"))?
        .as_secs();
    if age > TTL {
        return Err(io::Error::other("stale"));
    }

    let data = fs::read(CACHE)?;
    let info = serde_json::from_slice(&data)?;
    Ok(info)
}

/// Persist the forecast for future requests.
fn save_cache(info: &WeatherInfo) -> Result<(), io::Error> {
    let data = serde_json::to_vec(info)?;
    fs::write(CACHE, data)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn document_roundtrip() {
        let file = NamedTempFile::new().unwrap();
        let info = placeholder();
        fs::write(file.path(), serde_json::to_vec(&info).unwrap()).unwrap();

        let loaded = read_document(file.path()).unwrap();
        assert_eq!(loaded.city, info.city);
        assert_eq!(loaded.forecasts.len(), info.forecasts.len());
        assert_eq!(loaded.forecasts[0].low, "12");
    }

    #[test]
    fn missing_document_is_io_error() {
        let err = read_document(Path::new("/nonexistent/weather.json")).unwrap_err();
        assert!(matches!(err, WeatherError::Io(_)));
    }

    #[test]
    fn malformed_document_is_parse_error() {
        let file = NamedTempFile::new().unwrap();
        fs::write(file.path(), b"{\"not\": \"a forecast\"}").unwrap();
        let err = read_document(file.path()).unwrap_err();
        assert!(matches!(err, WeatherError::Parse(_)));
    }

    #[test]
    fn placeholder_has_a_full_strip() {
        let info = placeholder();
        assert_eq!(info.forecasts.len(), 5);
        assert!(info.forecasts.iter().all(|f| !f.low.is_empty()));
    }
}
