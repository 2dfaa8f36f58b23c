#![allow(clippy::unwrap_used)]
// End-to-end failover runs against a wiremock device and webhook.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::{Value, json};
use url::Url;
use wiremock::matchers::{body_json, body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use peplink_core::{
    ActionOutcome, CoreError, DeviceConfig, FailoverConfig, NotifierConfig, NotifyOutcome,
    PassiveWanSet, RunOptions, TlsVerification, WanHealth, run_cycle,
};

// ── Helpers ─────────────────────────────────────────────────────────

const API_PATH: &str = "/cgi-bin/MANGA/api.cgi";
const HOOK_PATH: &str = "/hook";

fn config(server: &MockServer, with_webhook: bool) -> FailoverConfig {
    let base = Url::parse(&server.uri()).unwrap();
    FailoverConfig {
        device: DeviceConfig {
            url: base.clone(),
            username: "admin".into(),
            password: SecretString::from("secret".to_owned()),
            tls: TlsVerification::DangerAcceptInvalid,
            timeout: Duration::from_secs(5),
        },
        notifier: with_webhook.then(|| NotifierConfig::new(base.join(HOOK_PATH).unwrap())),
        passive_wans: PassiveWanSet::new(["Wi-Fi WAN on 2.4 GHz"]),
    }
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_string_contains("func=login"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Set-Cookie", "bauth=tok123; Path=/")
                .set_body_json(json!({ "stat": "ok", "hash": "h4sh" })),
        )
        .mount(server)
        .await;
}

async fn mount_identity(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("func", "status.system.info"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "ok",
            "response": {
                "device": {
                    "model": "Balance 380",
                    "name": "BPL-380",
                    "firmwareVersion": "8.3.0",
                    "serialNumber": "1111-2222-3333"
                }
            }
        })))
        .mount(server)
        .await;
}

async fn mount_wans(server: &MockServer, response: Value) {
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("func", "status.wan.connection"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .mount(server)
        .await;
}

fn three_wans(wan2_enabled: bool) -> Value {
    json!({
        "stat": "ok",
        "response": {
            "order": [1, 2, 3],
            "1": { "name": "WAN1", "enable": true, "message": "Connected", "ip": "203.0.113.7" },
            "2": { "name": "WAN2", "enable": wan2_enabled, "message": "Error" },
            "3": { "name": "Wi-Fi WAN on 2.4 GHz", "enable": false, "message": "Error" }
        }
    })
}

async fn mount_priority(server: &MockServer, reply: Value, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_json(json!({
            "func": "config.wan.connection.priority",
            "instantActive": true,
            "list": [{ "connId": 2, "enable": false }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn mount_webhook(server: &MockServer, status: u16, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path(HOOK_PATH))
        .respond_with(ResponseTemplate::new(status))
        .expect(expected_calls)
        .mount(server)
        .await;
}

// ── Scenarios ───────────────────────────────────────────────────────

#[tokio::test]
async fn failed_wan_is_disabled_and_notified() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server).await;
    mount_wans(&server, three_wans(true)).await;
    mount_priority(&server, json!({ "stat": "ok" }), 1).await;
    mount_webhook(&server, 200, 1).await;

    let report = run_cycle(&config(&server, true), RunOptions::default())
        .await
        .unwrap();

    assert_eq!(report.identity.model_name, "Balance 380");
    assert_eq!(
        report.wans.iter().map(|w| w.health).collect::<Vec<_>>(),
        vec![WanHealth::Healthy, WanHealth::Unhealthy, WanHealth::Exempt]
    );
    assert_eq!(report.actions.len(), 1);
    assert_eq!(report.actions[0].wan_name, "WAN2");
    assert_eq!(
        report.actions[0].outcome,
        ActionOutcome::Applied {
            notification: Some(NotifyOutcome::Sent)
        }
    );
    assert_eq!(report.failed_actions(), 0);
}

#[tokio::test]
async fn already_disabled_wan_makes_no_writes() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server).await;
    mount_wans(&server, three_wans(false)).await;
    mount_priority(&server, json!({ "stat": "ok" }), 0).await;
    mount_webhook(&server, 200, 0).await;

    let report = run_cycle(&config(&server, true), RunOptions::default())
        .await
        .unwrap();

    assert_eq!(report.actions.len(), 1);
    assert!(matches!(
        report.actions[0].outcome,
        ActionOutcome::Skipped { .. }
    ));
}

#[tokio::test]
async fn rejected_write_is_recorded_without_notification() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server).await;
    mount_wans(&server, three_wans(true)).await;
    mount_priority(
        &server,
        json!({ "stat": "fail", "code": 400, "message": "Invalid" }),
        1,
    )
    .await;
    mount_webhook(&server, 200, 0).await;

    let report = run_cycle(&config(&server, true), RunOptions::default())
        .await
        .unwrap();

    assert_eq!(report.failed_actions(), 1);
    assert!(report.actions[0].outcome.is_failure());
}

#[tokio::test]
async fn http_error_on_write_fails_only_that_wan() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server).await;
    mount_wans(
        &server,
        json!({
            "stat": "ok",
            "response": {
                "2": { "name": "WAN2", "enable": true, "message": "Error" },
                "4": { "name": "Cellular", "enable": true, "message": "No Signal" }
            }
        }),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_json(json!({
            "func": "config.wan.connection.priority",
            "instantActive": true,
            "list": [{ "connId": 2, "enable": false }]
        })))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .and(body_json(json!({
            "func": "config.wan.connection.priority",
            "instantActive": true,
            "list": [{ "connId": 4, "enable": false }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stat": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_webhook(&server, 200, 1).await;

    let report = run_cycle(&config(&server, true), RunOptions::default())
        .await
        .unwrap();

    assert_eq!(report.actions.len(), 2);
    assert!(matches!(
        report.actions[0].outcome,
        ActionOutcome::Failed { ref reason } if reason.contains("500")
    ));
    assert_eq!(
        report.actions[1].outcome,
        ActionOutcome::Applied {
            notification: Some(NotifyOutcome::Sent)
        }
    );
    assert_eq!(report.failed_actions(), 1);
}

#[tokio::test]
async fn webhook_failure_does_not_fail_the_run() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server).await;
    mount_wans(&server, three_wans(true)).await;
    mount_priority(&server, json!({ "stat": "ok" }), 1).await;
    mount_webhook(&server, 500, 1).await;

    let report = run_cycle(&config(&server, true), RunOptions::default())
        .await
        .unwrap();

    assert!(matches!(
        report.actions[0].outcome,
        ActionOutcome::Applied {
            notification: Some(NotifyOutcome::Failed { .. })
        }
    ));
}

#[tokio::test]
async fn dry_run_plans_without_writing() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server).await;
    mount_wans(&server, three_wans(true)).await;
    mount_priority(&server, json!({ "stat": "ok" }), 0).await;
    mount_webhook(&server, 200, 0).await;

    let report = run_cycle(&config(&server, true), RunOptions { dry_run: true })
        .await
        .unwrap();

    assert!(report.dry_run);
    assert_eq!(report.actions[0].outcome, ActionOutcome::Planned);
}

#[tokio::test]
async fn no_webhook_configured_is_reported() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server).await;
    mount_wans(&server, three_wans(true)).await;
    mount_priority(&server, json!({ "stat": "ok" }), 1).await;

    let report = run_cycle(&config(&server, false), RunOptions::default())
        .await
        .unwrap();

    assert_eq!(
        report.actions[0].outcome,
        ActionOutcome::Applied {
            notification: Some(NotifyOutcome::NotConfigured)
        }
    );
}

#[tokio::test]
async fn unreadable_wan_status_is_treated_as_no_wans() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    mount_identity(&server).await;
    Mock::given(method("GET"))
        .and(path(API_PATH))
        .and(query_param("func", "status.wan.connection"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let report = run_cycle(&config(&server, true), RunOptions::default())
        .await
        .unwrap();

    assert!(report.wans.is_empty());
    assert!(report.all_connected());
}

#[tokio::test]
async fn rejected_login_aborts_the_run() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(API_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stat": "fail",
            "code": 401,
            "message": "Invalid username or password"
        })))
        .mount(&server)
        .await;

    let err = run_cycle(&config(&server, true), RunOptions::default())
        .await
        .unwrap_err();

    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    assert!(err.is_fatal());
}

#[tokio::test]
async fn unreachable_device_aborts_the_run() {
    let server = MockServer::start().await;
    let mut cfg = config(&server, false);
    drop(server);
    cfg.device.url = Url::parse("http://127.0.0.1:9").unwrap();

    let err = run_cycle(&cfg, RunOptions::default()).await.unwrap_err();

    assert!(err.is_fatal(), "expected fatal error, got: {err:?}");
}
