//! End-to-end fetch cycles against a mock Open-Meteo server.

use statecast_weather::{
    catalog, AppState, Event, FetchStatus, ForecastFetcher, ForecastProvider, DEFAULT_REGION,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 48 hourly rows over two days, like a trimmed Open-Meteo answer.
fn forecast_body(base_temp: f64) -> serde_json::Value {
    let time: Vec<String> = (0..48)
        .map(|h| format!("2024-06-{:02}T{:02}:00", 1 + h / 24, h % 24))
        .collect();
    let temps: Vec<f64> = (0..48).map(|h| base_temp + (h % 24) as f64 * 0.5).collect();

    serde_json::json!({
        "latitude": 0.0,
        "longitude": 0.0,
        "current_units": { "temperature_2m": "°C", "wind_speed_10m": "km/h" },
        "current": { "time": "2024-06-02T12:00", "interval": 900, "temperature_2m": base_temp, "wind_speed_10m": 9.0 },
        "hourly": {
            "time": time,
            "temperature_2m": temps,
            "relative_humidity_2m": vec![70; 48],
            "wind_speed_10m": vec![9.0; 48]
        }
    })
}

async fn mount_success(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(forecast_body(25.0)))
        .mount(server)
        .await;
}

fn provider(server: &MockServer) -> ForecastProvider {
    ForecastProvider::new(&format!("{}/v1/forecast", server.uri()), 10).unwrap()
}

#[tokio::test]
async fn test_full_catalog_cycle() {
    let server = MockServer::start().await;
    mount_success(&server).await;

    let fetcher = ForecastFetcher::new(provider(&server));
    let regions = catalog::regions();
    let result = fetcher.fetch_all(&regions).await;

    let state = AppState::new(DEFAULT_REGION).apply(Event::FetchCompleted(result));
    assert_eq!(state.status(), &FetchStatus::Ready);
    assert_eq!(state.datasets().len(), regions.len());
    for (dataset, region) in state.datasets().iter().zip(&regions) {
        assert_eq!(dataset.region.name, region.name);
    }

    let selected = state.selection();
    assert_eq!(selected.len(), 1);
    assert_eq!(selected[0].region.name, "Tamil Nadu");

    let daily = selected[0].daily();
    assert_eq!(daily.len(), 2);
    // 25.0 + mean(0.0, 0.5, .., 11.5) = 25.0 + 5.75
    assert_eq!(daily[0].mean_temperature, 30.8);
    assert_eq!(daily[0].mean_humidity, 70.0);
}

#[tokio::test]
async fn test_one_failing_region_fails_the_batch() {
    let server = MockServer::start().await;

    // Kerala's coordinates get a server error; everyone else succeeds.
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "10.8505"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_success(&server).await;

    let fetcher = ForecastFetcher::new(provider(&server));
    let result = fetcher.fetch_all(&catalog::regions()).await;

    let err = result.clone().unwrap_err();
    assert_eq!(err.region, "Kerala");

    let state = AppState::new(DEFAULT_REGION).apply(Event::FetchCompleted(result));
    assert!(matches!(state.status(), FetchStatus::Failed(e) if e.region == "Kerala"));
    assert!(state.datasets().is_empty());
    assert!(state.selection().is_empty());
}

#[tokio::test]
async fn test_malformed_body_fails_the_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "15.2993"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .with_priority(1)
        .mount(&server)
        .await;
    mount_success(&server).await;

    let fetcher = ForecastFetcher::new(provider(&server));
    let err = fetcher.fetch_all(&catalog::regions()).await.unwrap_err();

    assert_eq!(err.region, "Goa");
    assert!(err.to_string().starts_with("Goa: Parse error"));
}

#[tokio::test]
async fn test_unreachable_server_fails_the_batch() {
    let server = MockServer::start().await;
    let base = format!("{}/v1/forecast", server.uri());
    drop(server);

    let fetcher = ForecastFetcher::new(ForecastProvider::new(&base, 10).unwrap());
    let result = fetcher.fetch_all(&catalog::regions()[..3]).await;

    assert!(result.is_err());
}
