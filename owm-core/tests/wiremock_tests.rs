//! Client and geolocator behavior against a mock HTTP server.

use owm_core::{
    Config, Coordinates, Geolocator, IpApiGeolocator, OpenWeatherClient, UnitMatch, WeatherError,
    WeatherProvider,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn philadelphia_current() -> serde_json::Value {
    serde_json::json!({
        "coord": { "lon": -75.16, "lat": 39.95 },
        "weather": [
            { "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }
        ],
        "main": {
            "temp": 72.0,
            "feels_like": 71.2,
            "temp_min": 68.0,
            "temp_max": 75.0,
            "pressure": 1016,
            "humidity": 40
        },
        "wind": { "speed": 5.75, "deg": 250 },
        "dt": 1_700_000_000,
        "id": 4_560_349,
        "name": "Philadelphia",
        "cod": 200
    })
}

fn two_entry_forecast() -> serde_json::Value {
    serde_json::json!({
        "cod": "200",
        "cnt": 2,
        "list": [
            {
                "dt": 1_700_006_400,
                "main": { "temp": 10.1, "temp_min": 9.0, "temp_max": 11.0, "pressure": 1012, "humidity": 70 },
                "weather": [ { "id": 500, "main": "Rain", "description": "light rain", "icon": "10n" } ],
                "dt_txt": "2023-11-15 00:00:00"
            },
            {
                "dt": 1_700_017_200,
                "main": { "temp": 8.4, "temp_min": 8.0, "temp_max": 9.2, "pressure": 1013, "humidity": 75 },
                "weather": [ { "id": 804, "main": "Clouds", "description": "overcast clouds", "icon": "04n" } ],
                "dt_txt": "2023-11-15 03:00:00"
            }
        ],
        "city": { "id": 2_964_574, "name": "Dublin", "country": "IE", "coord": { "lat": 53.34, "lon": -6.26 } }
    })
}

fn test_config(mock_server: &MockServer) -> Config {
    Config {
        base_url: format!("{}/data/2.5", mock_server.uri()),
        geolocation_url: format!("{}/json", mock_server.uri()),
        timeout_secs: 5,
        ..Config::default()
    }
}

fn create_test_client(mock_server: &MockServer) -> OpenWeatherClient {
    OpenWeatherClient::new("TEST_KEY".into(), &test_config(mock_server))
        .expect("Failed to create client")
}

#[tokio::test]
async fn current_by_name_sends_query_and_decodes() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("q", "Philadelphia"))
        .and(query_param("units", "imperial"))
        .and(query_param("lang", "en"))
        .and(query_param("appid", "TEST_KEY"))
        .respond_with(ResponseTemplate::new(200).set_body_json(philadelphia_current()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let weather = client.current_by_name("Philadelphia", "f", "en").await.unwrap();

    assert_eq!(weather.name, "Philadelphia");
    assert_eq!(weather.weather[0].description, "clear sky");
    assert_eq!(weather.main.temp, 72.0);
    assert_eq!(weather.main.temp_max, 75.0);
    assert_eq!(weather.main.temp_min, 68.0);
    assert_eq!(weather.main.humidity, 40.0);
    assert_eq!(weather.unit, "f");
}

#[tokio::test]
async fn current_by_coordinates_sends_lat_lon() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("lat", "39.95"))
        .and(query_param("lon", "-75.16"))
        .and(query_param("units", "metric"))
        .respond_with(ResponseTemplate::new(200).set_body_json(philadelphia_current()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let coords = Coordinates { lat: 39.95, lon: -75.16 };
    let weather = client.current_by_coordinates(coords, "C", "en").await.unwrap();

    assert_eq!(weather.coord, coords);
    assert_eq!(weather.unit, "c");
}

#[tokio::test]
async fn current_by_id_sends_id() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .and(query_param("id", "4560349"))
        .and(query_param("units", "standard"))
        .and(query_param("lang", "fi"))
        .respond_with(ResponseTemplate::new(200).set_body_json(philadelphia_current()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let weather = client.current_by_id(4_560_349, "k", "fi").await.unwrap();

    assert_eq!(weather.id, 4_560_349);
}

#[tokio::test]
async fn forecast_keeps_entry_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "Dublin"))
        .and(query_param("cnt", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(two_entry_forecast()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let forecast = client.forecast("Dublin", "c", "en", 5).await.unwrap();

    assert_eq!(forecast.city.name, "Dublin");
    assert_eq!(forecast.list.len(), 2);
    assert_eq!(forecast.list[0].dt_txt, "2023-11-15 00:00:00");
    assert_eq!(forecast.list[1].weather[0].description, "overcast clouds");
    assert_eq!(forecast.unit, "c");
}

#[tokio::test]
async fn non_success_status_is_reported_before_decoding() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/weather"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_string(r#"{"cod":401,"message":"Invalid API key."}"#),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.current_by_name("Philadelphia", "f", "en").await.unwrap_err();

    match err {
        WeatherError::UnexpectedStatus { status, body, .. } => {
            assert_eq!(status.as_u16(), 401);
            assert!(body.contains("Invalid API key"));
        }
        other => panic!("expected UnexpectedStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.forecast("Dublin", "c", "en", 5).await.unwrap_err();

    assert!(matches!(err, WeatherError::Decode { .. }), "got {err:?}");
}

#[tokio::test]
async fn unsupported_unit_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(philadelphia_current()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server);
    let err = client.current_by_name("Philadelphia", "x", "en").await.unwrap_err();

    assert!(matches!(err, WeatherError::UnsupportedUnit(_)));
}

#[tokio::test]
async fn exact_unit_match_is_configurable() {
    let mock_server = MockServer::start().await;

    let cfg = Config { unit_match: UnitMatch::Exact, ..test_config(&mock_server) };
    let client = OpenWeatherClient::new("TEST_KEY".into(), &cfg).unwrap();

    let err = client.current_by_name("Philadelphia", "fahrenheit", "en").await.unwrap_err();
    assert!(matches!(err, WeatherError::UnsupportedUnit(_)));
}

#[tokio::test]
async fn geolocator_decodes_location() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "country": "Ireland",
            "countryCode": "IE",
            "city": "Dublin",
            "lat": 53.34,
            "lon": -6.26,
            "query": "203.0.113.7"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let geo = IpApiGeolocator::new(&test_config(&mock_server)).unwrap();
    let loc = geo.locate().await.unwrap();

    assert_eq!(loc.city, "Dublin");
    assert_eq!(loc.country_code, "IE");
}

#[tokio::test]
async fn geolocator_fail_status_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "fail",
            "message": "private range",
            "query": "10.0.0.1"
        })))
        .mount(&mock_server)
        .await;

    let geo = IpApiGeolocator::new(&test_config(&mock_server)).unwrap();
    let err = geo.locate().await.unwrap_err();

    assert!(matches!(err, WeatherError::GeolocationFailed(ref m) if m == "private range"));
}

#[tokio::test]
async fn transport_errors_do_not_expose_the_api_key() {
    // nothing listens on the discard port
    let cfg = Config {
        base_url: "http://127.0.0.1:9/data/2.5".into(),
        timeout_secs: 2,
        connect_timeout_secs: 2,
        ..Config::default()
    };
    let client = OpenWeatherClient::new("SECRET123".into(), &cfg).unwrap();

    let err = client.current_by_name("Philadelphia", "f", "en").await.unwrap_err();
    assert!(matches!(err, WeatherError::Transport { .. }), "got {err:?}");

    let mut chain = Vec::new();
    let mut current: Option<&dyn std::error::Error> = Some(&err);
    while let Some(e) = current {
        chain.push(e.to_string());
        current = e.source();
    }
    let rendered = chain.join(": ");

    assert!(!rendered.contains("SECRET123"), "{rendered}");
    assert!(!format!("{err:?}").contains("SECRET123"));
    assert_eq!(chain.iter().filter(|line| line.contains("could not be completed")).count(), 1);
}
