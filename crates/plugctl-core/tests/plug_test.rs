#![allow(clippy::unwrap_used)]
// Integration tests for `Plug` against wiremock devices.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use plugctl_core::{
    CoreError, Credentials, Generation, OutputFormat, Plug, PlugConfig, RelayState, RenderOptions,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup(generation: Generation) -> (MockServer, Plug) {
    let server = MockServer::start().await;
    let config = PlugConfig::new(&server.uri(), generation).unwrap();
    let plug = Plug::new(&config).unwrap();
    (server, plug)
}

async fn mount_json(server: &MockServer, at: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn gen2_status() -> Value {
    json!({
        "sys": {
            "mac": "E4B063D1A2B3",
            "unixtime": 1_700_000_000,
            "uptime": 86_400,
            "ram_size": 262_144,
            "ram_free": 131_072,
            "fs_size": 458_752,
            "fs_free": 180_224,
            "available_updates": {}
        },
        "wifi": { "sta_ip": "192.168.1.30", "status": "got ip", "ssid": "home", "rssi": -58 },
        "switch:0": {
            "id": 0,
            "source": "http",
            "output": true,
            "apower": 2.42,
            "voltage": 231.4,
            "current": 0.021,
            "freq": 50.0,
            "aenergy": { "total": 1234.5, "by_minute": [30.1, 29.8, 31.0], "minute_ts": 1_700_000_000 },
            "temperature": { "tC": 41.2, "tF": 106.2 }
        }
    })
}

async fn render_energy(plug: &Plug, options: &RenderOptions) -> (Result<(), CoreError>, String) {
    let mut sink = Vec::new();
    let result = plug.render_energy(&mut sink, options).await;
    (result, String::from_utf8(sink).unwrap())
}

// ── Construction ────────────────────────────────────────────────────

#[test]
fn test_generation_is_fixed_at_construction() {
    for generation in [Generation::Gen1, Generation::Gen2] {
        let config = PlugConfig::new("10.0.0.5", generation).unwrap();
        assert_eq!(Plug::new(&config).unwrap().generation(), generation);
    }
}

#[test]
fn test_address_without_host_is_a_configuration_error() {
    for raw in ["", "http://", "http://:8080"] {
        let result = PlugConfig::new(raw, Generation::Gen1);
        assert!(
            matches!(result, Err(CoreError::Configuration { .. })),
            "expected Configuration error for {raw:?}, got {result:?}"
        );
    }
}

// ── Control ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_gen1_turn_on() {
    let (server, plug) = setup(Generation::Gen1).await;

    Mock::given(method("GET"))
        .and(path("/relay/0"))
        .and(query_param("turn", "on"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ison": true })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(plug.turn_on().await.unwrap(), RelayState::On);
}

#[tokio::test]
async fn test_gen1_turn_on_echoing_off_is_a_postcondition_failure() {
    let (server, plug) = setup(Generation::Gen1).await;
    mount_json(&server, "/relay/0", json!({ "ison": false })).await;

    let err = plug.turn_on().await.unwrap_err();

    assert!(matches!(
        err,
        CoreError::Postcondition {
            expected: RelayState::On,
            reported: RelayState::Off
        }
    ));
    assert_eq!(err.to_string(), "relay is not on");
}

#[tokio::test]
async fn test_gen2_turn_on_echoing_output_false_is_a_postcondition_failure() {
    let (server, plug) = setup(Generation::Gen2).await;
    mount_json(&server, "/relay/0", json!({ "output": false })).await;

    let err = plug.turn_on().await.unwrap_err();
    assert!(matches!(err, CoreError::Postcondition { .. }));
}

#[tokio::test]
async fn test_gen2_turn_off_echoing_on_is_a_postcondition_failure() {
    let (server, plug) = setup(Generation::Gen2).await;

    Mock::given(method("GET"))
        .and(path("/relay/0"))
        .and(query_param("turn", "off"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ison": true })))
        .mount(&server)
        .await;

    let err = plug.turn_off().await.unwrap_err();
    assert_eq!(err.to_string(), "relay is on");
}

#[tokio::test]
async fn test_gen2_turn_off() {
    let (server, plug) = setup(Generation::Gen2).await;
    mount_json(&server, "/relay/0", json!({ "ison": false, "source": "http" })).await;

    assert_eq!(plug.turn_off().await.unwrap(), RelayState::Off);
}

// ── Energy ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_gen1_energy_text() {
    let (server, plug) = setup(Generation::Gen1).await;
    mount_json(&server, "/status", json!({ "meters": [{ "power": 2.45, "total": 615 }] })).await;

    let (result, out) = render_energy(&plug, &RenderOptions::default()).await;

    result.unwrap();
    assert!(out.contains("Power: 2.45 Watt"), "{out}");
    assert!(out.contains("Total Consumption: 0.01 kWh"), "{out}");
}

#[tokio::test]
async fn test_gen1_energy_json_scales_total() {
    let (server, plug) = setup(Generation::Gen1).await;
    mount_json(
        &server,
        "/status",
        json!({
            "relays": [{ "ison": true }],
            "meters": [{ "power": 61.3, "total": 1_234_567 }]
        }),
    )
    .await;

    let (result, out) = render_energy(&plug, &RenderOptions::new(OutputFormat::Json)).await;
    result.unwrap();

    let value: Value = serde_json::from_str(&out).unwrap();
    let total = value["power_total_kwh"].as_f64().unwrap();
    assert!((total - 1_234_567.0 / 60_000.0).abs() < 1e-9, "{total}");
    assert_eq!(value["is_on"], json!(1));
    assert_eq!(value["power_watt"], json!(61.3));
}

#[tokio::test]
async fn test_gen1_energy_without_meter_writes_nothing() {
    let (server, plug) = setup(Generation::Gen1).await;
    mount_json(&server, "/status", json!({ "relays": [{ "ison": true }] })).await;

    let (result, out) = render_energy(&plug, &RenderOptions::new(OutputFormat::Json)).await;

    let err = result.unwrap_err();
    assert!(matches!(err, CoreError::Precondition { .. }));
    assert_eq!(err.to_string(), "no meter information received");
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_gen2_energy_metrics() {
    let (server, plug) = setup(Generation::Gen2).await;
    mount_json(&server, "/rpc/Shelly.GetStatus", gen2_status()).await;

    let options = RenderOptions::new(OutputFormat::Metrics).with_label("location", "office");
    let (result, out) = render_energy(&plug, &options).await;
    result.unwrap();

    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(
        value,
        json!({
            "labels": { "location": "office" },
            "metrics": {
                "current_power_watt": 2.42,
                "current_power_volt": 231.4,
                "current_power_ampere": 0.021,
                "current_power_frequency": 50.0,
                "internal_celsius": 41.2,
                "total_energy_kwh": 1.2345,
                "relay_on": 1
            }
        })
    );
}

#[tokio::test]
async fn test_gen1_energy_metrics_reports_today_energy() {
    let (server, plug) = setup(Generation::Gen1).await;
    mount_json(
        &server,
        "/status",
        json!({
            "relays": [{ "ison": true }],
            "meters": [{ "power": 2.45, "total": 615 }]
        }),
    )
    .await;

    let options = RenderOptions::new(OutputFormat::Metrics).with_label("location", "office");
    let (result, out) = render_energy(&plug, &options).await;
    result.unwrap();

    let value: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["labels"], json!({ "location": "office" }));

    let metrics = value["metrics"].as_object().unwrap();
    let mut keys: Vec<&str> = metrics.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(keys, ["current_power_watt", "relay_on", "today_energy_kwh"]);
    assert_eq!(metrics["current_power_watt"], json!(2.45));
    assert_eq!(metrics["relay_on"], json!(1));
    let today = metrics["today_energy_kwh"].as_f64().unwrap();
    assert!((today - 615.0 / 60_000.0).abs() < 1e-9, "{today}");
}

#[tokio::test]
async fn test_gen2_energy_without_switch_writes_nothing() {
    let (server, plug) = setup(Generation::Gen2).await;
    mount_json(&server, "/rpc/Shelly.GetStatus", json!({ "sys": { "uptime": 10 } })).await;

    for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::Metrics] {
        let (result, out) = render_energy(&plug, &RenderOptions::new(format)).await;
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "no switch information received");
        assert!(out.is_empty(), "{format}: {out}");
    }
}

#[tokio::test]
async fn test_gen1_client_against_gen2_device_fails_cleanly() {
    let (server, plug) = setup(Generation::Gen1).await;
    mount_json(&server, "/status", json!({ "meters": { "switch:0": {} } })).await;

    let err = plug.energy().await.unwrap_err();
    assert!(matches!(err, CoreError::Decode { .. }), "{err:?}");
}

// ── Info ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_gen2_info_text() {
    let (server, plug) = setup(Generation::Gen2).await;
    mount_json(
        &server,
        "/shelly",
        json!({ "id": "shellyplusplugs-e4b063d1a2b3", "model": "SNPL-00112EU", "gen": 2, "ver": "1.4.4" }),
    )
    .await;
    mount_json(&server, "/rpc/Shelly.GetStatus", gen2_status()).await;

    let mut sink = Vec::new();
    plug.render_info(&mut sink, &RenderOptions::default())
        .await
        .unwrap();
    let out = String::from_utf8(sink).unwrap();

    let host = plug.address().to_string();
    assert!(out.starts_with(&format!("Shelly device information for {host}\n")));
    assert!(out.contains("         Device Type: SNPL-00112EU\n"), "{out}");
    assert!(out.contains("              Uptime: 1day\n"), "{out}");
    assert!(out.contains("          Has Update: false\n"), "{out}");
    assert!(!out.contains("Latest Available"), "{out}");
    assert!(out.contains("        Power Status: On\n"), "{out}");
    assert!(out.contains("       Internal Temp: 41.20 C\n"), "{out}");
    assert!(!out.contains("MQTT"), "{out}");
}

#[tokio::test]
async fn test_gen2_info_disconnected_radio_without_timer() {
    let (server, plug) = setup(Generation::Gen2).await;
    mount_json(&server, "/shelly", json!({ "model": "SNPL-00112EU", "gen": 2 })).await;
    let mut status = gen2_status();
    status["wifi"] = json!({ "sta_ip": null, "status": "disconnected", "ssid": null, "rssi": null });
    mount_json(&server, "/rpc/Shelly.GetStatus", status).await;

    let mut sink = Vec::new();
    plug.render_info(&mut sink, &RenderOptions::default())
        .await
        .unwrap();
    let out = String::from_utf8(sink).unwrap();

    assert!(out.contains("       WiFi Strength: n/a\n"), "{out}");
    assert!(out.contains("        Power Status: On\n"), "{out}");
    assert!(!out.contains("Timer"), "{out}");
}

#[tokio::test]
async fn test_gen2_info_with_running_timer() {
    let (server, plug) = setup(Generation::Gen2).await;
    mount_json(&server, "/shelly", json!({ "model": "SNPL-00112EU", "gen": 2 })).await;
    let mut status = gen2_status();
    status["switch:0"]["timer_started_at"] = json!(1_700_000_000);
    status["switch:0"]["timer_duration"] = json!(60.0);
    mount_json(&server, "/rpc/Shelly.GetStatus", status).await;

    let mut sink = Vec::new();
    plug.render_info(&mut sink, &RenderOptions::default())
        .await
        .unwrap();
    let out = String::from_utf8(sink).unwrap();

    assert!(out.contains("               Timer: true\n"), "{out}");
    assert!(out.contains("            Duration: 1m\n"), "{out}");
}

#[tokio::test]
async fn test_gen2_info_without_switch_omits_relay_and_meter() {
    let (server, plug) = setup(Generation::Gen2).await;
    mount_json(&server, "/shelly", json!({ "model": "SNSN-0024X", "gen": 2 })).await;
    mount_json(
        &server,
        "/rpc/Shelly.GetStatus",
        json!({ "sys": { "unixtime": null, "available_updates": { "stable": { "version": "1.5.0" } } } }),
    )
    .await;

    let mut sink = Vec::new();
    plug.render_info(&mut sink, &RenderOptions::default())
        .await
        .unwrap();
    let out = String::from_utf8(sink).unwrap();

    assert!(out.contains("                Time: not synced\n"), "{out}");
    assert!(out.contains("    Latest Available: 1.5.0\n"), "{out}");
    assert!(!out.contains("Relay Information"), "{out}");
    assert!(!out.contains("Meter Information"), "{out}");
}

#[tokio::test]
async fn test_info_metrics_is_rejected_without_requests() {
    let (server, plug) = setup(Generation::Gen1).await;

    let mut sink = Vec::new();
    let err = plug
        .render_info(&mut sink, &RenderOptions::new(OutputFormat::Metrics))
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::Unsupported { .. }));
    assert!(sink.is_empty());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_info_fails_fast_when_identity_fetch_fails() {
    let (server, plug) = setup(Generation::Gen1).await;

    Mock::given(method("GET"))
        .and(path("/shelly"))
        .respond_with(ResponseTemplate::new(401).set_body_string("401 Unauthorized"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let mut sink = Vec::new();
    let err = plug
        .render_info(&mut sink, &RenderOptions::default())
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(err.to_string().ends_with("/shelly: 401 Unauthorized"), "{err}");
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_info_json_gen1() {
    let (server, plug) = setup(Generation::Gen1).await;
    mount_json(&server, "/shelly", json!({ "type": "SHPLG-S", "fw": "v1.14.0" })).await;
    mount_json(
        &server,
        "/status",
        json!({
            "mac": "A4CF12F3A1B2",
            "wifi_sta": { "connected": true, "ssid": "home", "ip": "10.0.0.5", "rssi": -61 },
            "cloud": { "enabled": true, "connected": false },
            "relays": [{ "ison": true, "has_timer": true, "timer_duration": 60, "timer_remaining": 42 }],
            "meters": [{ "power": 2.45, "total": 615 }]
        }),
    )
    .await;

    let mut sink = Vec::new();
    plug.render_info(&mut sink, &RenderOptions::new(OutputFormat::Json))
        .await
        .unwrap();
    let value: Value = serde_json::from_slice(&sink).unwrap();

    assert_eq!(value["identity"]["model"], json!("SHPLG-S"));
    assert_eq!(value["network"]["cloud"], json!({ "enabled": true, "connected": false }));
    assert_eq!(value["relay"]["timer"]["remaining_secs"], json!(42));
    assert_eq!(value["meter"]["power_watt"], json!(2.45));
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_credentials_flow_through_to_requests() {
    let server = MockServer::start().await;
    let mut config = PlugConfig::new(&server.uri(), Generation::Gen2).unwrap();
    config.address = config.address.with_credentials(Credentials::new(
        "admin",
        SecretString::from("secret".to_owned()),
    ));
    let plug = Plug::new(&config).unwrap();

    Mock::given(method("GET"))
        .and(path("/rpc/Shelly.GetStatus"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gen2_status()))
        .expect(1)
        .mount(&server)
        .await;

    plug.energy().await.unwrap();
}
