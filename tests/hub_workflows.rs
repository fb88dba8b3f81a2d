//! Integration tests for hub request composition.
//!
//! These tests drive a full hub through the recording mocks and check how
//! component contributions end up on the executed request.

use hubbub::components::{CallbackComponent, TopicComponent};
use hubbub::{Hub, HubConfig, HubError, OptionSet, ParameterSet, Phase, StatusCode};
use hubbub_http::{HttpHandleConfig, HttpRequestFactory};
use hubbub_testing::{EventLog, HubEvent, MockRequestFactory, RecordingComponent};
use std::error::Error as _;
use std::io;
use std::sync::{Arc, Mutex};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Collects formatted log output so tests can assert on emitted events
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let writer = self.clone();
        tracing_subscriber::fmt()
            .with_max_level(LevelFilter::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish()
    }

    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Option merging
// =============================================================================

#[tokio::test]
async fn test_options_provided_to_components() {
    init_tracing();
    let factory = MockRequestFactory::new();
    let a = RecordingComponent::new("a")
        .with_defaults(OptionSet::from([("opt", "def"), ("opt2", "def2")]));
    let b = RecordingComponent::new("b")
        .with_defaults(OptionSet::from([("option", "default"), ("option2", "default2")]));

    let hub = Hub::builder("http://test.url.com", factory.clone())
        .component(a.clone())
        .component(b.clone())
        .build();

    hub.make_request(
        "test",
        &OptionSet::from([("opt2", "nonDef"), ("option", "nonDefault")]),
    )
    .await
    .unwrap();

    let expected_a = OptionSet::from([("opt", "def"), ("opt2", "nonDef")]);
    let expected_b = OptionSet::from([("option", "nonDefault"), ("option2", "default2")]);

    assert_eq!(a.parameter_options(), vec![expected_a.clone()]);
    assert_eq!(a.modify_options(), vec![expected_a]);
    assert_eq!(b.parameter_options(), vec![expected_b.clone()]);
    assert_eq!(b.modify_options(), vec![expected_b]);
    assert_eq!(factory.created_urls(), vec!["http://test.url.com"]);
}

#[tokio::test]
async fn test_defaults_used_when_caller_omits_option() {
    let a = RecordingComponent::new("a").with_defaults(OptionSet::from([("opt", "def")]));
    let hub = Hub::builder("http://test.url.com", MockRequestFactory::new())
        .component(a.clone())
        .build();

    hub.make_request("test", &OptionSet::new()).await.unwrap();

    assert_eq!(a.parameter_options(), vec![OptionSet::from([("opt", "def")])]);
}

#[tokio::test]
async fn test_components_never_see_foreign_defaults() {
    let a = RecordingComponent::new("a").with_defaults(OptionSet::from([("a_only", "1")]));
    let b = RecordingComponent::new("b").with_defaults(OptionSet::from([("b_only", "2")]));
    let c = RecordingComponent::new("c");

    let hub = Hub::builder("http://test.url.com", MockRequestFactory::new())
        .component(a.clone())
        .component(b.clone())
        .component(c.clone())
        .build();

    // "stray" is unknown to every component and must not show up anywhere.
    hub.make_request("test", &OptionSet::from([("stray", "x")]))
        .await
        .unwrap();

    assert_eq!(a.parameter_options()[0], OptionSet::from([("a_only", "1")]));
    assert_eq!(b.parameter_options()[0], OptionSet::from([("b_only", "2")]));
    assert!(c.parameter_options()[0].is_empty());
}

// =============================================================================
// Parameter aggregation
// =============================================================================

#[tokio::test]
async fn test_component_post_fields_used() {
    let factory = MockRequestFactory::new();
    let hub = Hub::builder("http://test.url.com", factory.clone())
        .component(
            RecordingComponent::new("a")
                .with_parameters(ParameterSet::from([("first", "First value")])),
        )
        .component(RecordingComponent::new("b").with_parameters(ParameterSet::from([
            ("second", "Second value"),
            ("third", "Third value"),
        ])))
        .build();

    hub.make_request("test", &OptionSet::new()).await.unwrap();

    let sent = factory.last_executed().unwrap();
    let body = &sent.body_fields;
    assert_eq!(body.len(), 4);
    assert_eq!(body.get("first"), Some("First value"));
    assert_eq!(body.get("second"), Some("Second value"));
    assert_eq!(body.get("third"), Some("Third value"));
    assert_eq!(body.get("hub.mode"), Some("test"));
}

#[tokio::test]
async fn test_colliding_parameters_last_component_wins() {
    let logs = CapturedLogs::default();
    let _guard = logs.subscriber().set_default();
    let factory = MockRequestFactory::new();
    let hub = Hub::builder("http://test.url.com", factory.clone())
        .component(
            RecordingComponent::new("early")
                .with_parameters(ParameterSet::from([("shared", "early")])),
        )
        .component(
            RecordingComponent::new("late")
                .with_parameters(ParameterSet::from([("shared", "late"), ("hub.mode", "hijack")])),
        )
        .build();

    hub.make_request("subscribe", &OptionSet::new()).await.unwrap();

    let body = factory.last_executed().unwrap().body_fields;
    assert_eq!(body.get("shared"), Some("late"));
    assert_eq!(body.get("hub.mode"), Some("subscribe"));

    let output = logs.contents();
    assert!(output.contains("Parameter contributed by more than one component"));
    assert!(output.contains("parameter=shared"));
    assert!(output.contains("previous=early"));
    assert!(output.contains("component=late"));
    assert!(output.contains("Component contributed a reserved parameter"));
    assert!(output.contains("parameter=hub.mode"));
}

#[tokio::test]
async fn test_disjoint_parameters_log_no_warning() {
    let logs = CapturedLogs::default();
    let _guard = logs.subscriber().set_default();
    let hub = Hub::builder("http://test.url.com", MockRequestFactory::new())
        .component(RecordingComponent::new("a").with_parameters(ParameterSet::from([("a", "1")])))
        .component(RecordingComponent::new("b").with_parameters(ParameterSet::from([("b", "2")])))
        .build();

    hub.make_request("test", &OptionSet::new()).await.unwrap();

    assert!(!logs.contents().contains("WARN"));
}

// =============================================================================
// Call order and execution
// =============================================================================

#[tokio::test]
async fn test_call_order_is_stable() {
    let log = EventLog::new();
    let factory = MockRequestFactory::new().with_log(log.clone());
    let hub = Hub::builder("http://test.url.com", factory.clone())
        .component(RecordingComponent::new("a").with_log(log.clone()))
        .component(RecordingComponent::new("b").with_log(log.clone()))
        .build();

    let expected = vec![
        "create",
        "a.options",
        "b.options",
        "a.parameters",
        "b.parameters",
        "a.modify_request",
        "b.modify_request",
        "execute",
    ];

    hub.make_request("test", &OptionSet::new()).await.unwrap();
    assert_eq!(log.labels(), expected);

    log.clear();
    hub.make_request("test", &OptionSet::new()).await.unwrap();
    assert_eq!(log.labels(), expected);

    assert!(log.events().iter().all(|event| match event {
        HubEvent::Options { operation, .. }
        | HubEvent::Parameters { operation, .. }
        | HubEvent::ModifyRequest { operation, .. } => operation == "test",
        _ => true,
    }));
}

#[tokio::test]
async fn test_single_execution_after_mutations() {
    let factory = MockRequestFactory::new().respond_with(StatusCode::NO_CONTENT);
    let hub = Hub::builder("http://test.url.com", factory.clone())
        .component(RecordingComponent::new("a").with_header("X-First", "a"))
        .component(RecordingComponent::new("b").with_header("X-Second", "b"))
        .build();

    let response = hub.make_request("publish", &OptionSet::new()).await.unwrap();
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(factory.execute_count(), 1);

    let sent = factory.last_executed().unwrap();
    assert_eq!(sent.header("x-first"), Some("a"));
    assert_eq!(sent.header("x-second"), Some("b"));

    hub.make_request("publish", &OptionSet::new()).await.unwrap();
    assert_eq!(factory.execute_count(), 2);
    assert_eq!(factory.executed()[0], factory.executed()[1]);
}

#[tokio::test]
async fn test_later_mutation_overrides_earlier() {
    let factory = MockRequestFactory::new();
    let hub = Hub::builder("http://test.url.com", factory.clone())
        .component(RecordingComponent::new("a").with_header("User-Agent", "first"))
        .component(RecordingComponent::new("b").with_header("User-Agent", "second"))
        .build();

    hub.make_request("test", &OptionSet::new()).await.unwrap();

    assert_eq!(
        factory.last_executed().unwrap().header("user-agent"),
        Some("second")
    );
}

// =============================================================================
// Failures
// =============================================================================

#[tokio::test]
async fn test_component_failure_aborts_before_execution() {
    for phase in [Phase::Options, Phase::Parameters, Phase::ModifyRequest] {
        let log = EventLog::new();
        let factory = MockRequestFactory::new().with_log(log.clone());
        let hub = Hub::builder("http://test.url.com", factory.clone())
            .component(RecordingComponent::new("broken").failing_in(phase).with_log(log.clone()))
            .component(RecordingComponent::new("after").with_log(log.clone()))
            .build();

        let err = hub.make_request("test", &OptionSet::new()).await.unwrap_err();

        match err {
            HubError::Component {
                component,
                phase: failed,
                ..
            } => {
                assert_eq!(component, "broken");
                assert_eq!(failed, phase);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(factory.execute_count(), 0);
        assert!(!log.labels().contains(&"execute".to_string()));
        assert!(!log.labels().contains(&format!("after.{}", phase)));
    }
}

#[tokio::test]
async fn test_builtin_component_failure_is_annotated() {
    let factory = MockRequestFactory::new();
    let hub = Hub::builder("http://test.url.com", factory.clone())
        .component(TopicComponent::new())
        .component(CallbackComponent::per_request())
        .build();

    let err = hub
        .subscribe("http://blog.example.com/feed", OptionSet::new())
        .await
        .unwrap_err();

    match &err {
        HubError::Component {
            component, phase, ..
        } => {
            assert_eq!(component, "callback");
            assert_eq!(*phase, Phase::Parameters);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(matches!(err.cause(), HubError::MissingOption(key) if key == "callback"));
    assert!(err.source().is_some());
    assert_eq!(factory.execute_count(), 0);
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    let factory = MockRequestFactory::new().fail_transport("connection refused");
    let hub = Hub::builder("http://test.url.com", factory.clone()).build();

    let err = hub.make_request("publish", &OptionSet::new()).await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(
        err.source().map(|s| s.to_string()),
        Some("connection refused".to_string())
    );
    assert_eq!(factory.execute_count(), 1);
}

// =============================================================================
// Standard components and configuration
// =============================================================================

#[tokio::test]
async fn test_configured_hub_subscribe() {
    let factory = MockRequestFactory::new();
    let config = HubConfig::builder("https://pubsubhubbub.example.com/")
        .callback("https://me.example.com/push")
        .lease_seconds(86400)
        .secret("s3cret")
        .user_agent("hubbub-tests")
        .build();
    let hub = config.build_hub(factory.clone()).unwrap();

    hub.subscribe("https://blog.example.com/feed", OptionSet::new())
        .await
        .unwrap();

    let sent = factory.last_executed().unwrap();
    assert_eq!(sent.url, "https://pubsubhubbub.example.com/");
    assert_eq!(sent.header("user-agent"), Some("hubbub-tests"));
    assert_eq!(
        sent.body_fields,
        ParameterSet::from([
            ("hub.callback", "https://me.example.com/push"),
            ("hub.lease_seconds", "86400"),
            ("hub.mode", "subscribe"),
            ("hub.secret", "s3cret"),
            ("hub.topic", "https://blog.example.com/feed"),
            ("hub.verify", "sync"),
        ])
    );
}

#[tokio::test]
async fn test_configured_hub_publish_sends_only_topic() {
    let factory = MockRequestFactory::new();
    let hub = HubConfig::builder("https://pubsubhubbub.example.com/")
        .callback("https://me.example.com/push")
        .lease_seconds(86400)
        .build()
        .build_hub(factory.clone())
        .unwrap();

    hub.publish("https://blog.example.com/feed", OptionSet::new())
        .await
        .unwrap();

    assert_eq!(
        factory.last_executed().unwrap().body_fields,
        ParameterSet::from([
            ("hub.mode", "publish"),
            ("hub.url", "https://blog.example.com/feed"),
        ])
    );
}

#[tokio::test]
async fn test_caller_overrides_standard_defaults() {
    let factory = MockRequestFactory::new();
    let hub = Hub::builder("https://hub.example.com/", factory.clone())
        .component(TopicComponent::new())
        .component(CallbackComponent::new("https://me.example.com/default"))
        .build();

    hub.unsubscribe(
        "https://blog.example.com/feed",
        OptionSet::from([("callback", "https://me.example.com/other")]),
    )
    .await
    .unwrap();

    let body = factory.last_executed().unwrap().body_fields;
    assert_eq!(body.get("hub.callback"), Some("https://me.example.com/other"));
    assert_eq!(body.get("hub.mode"), Some("unsubscribe"));
}

#[tokio::test]
async fn test_hub_shared_across_tasks() {
    let factory = MockRequestFactory::new();
    let hub = Arc::new(
        Hub::builder("http://test.url.com", factory.clone())
            .component(RecordingComponent::new("a"))
            .build(),
    );

    let mut tasks = Vec::new();
    for i in 0..4 {
        let hub = hub.clone();
        tasks.push(tokio::spawn(async move {
            hub.make_request(&format!("op{}", i), &OptionSet::new()).await
        }));
    }
    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(factory.execute_count(), 4);
}

#[tokio::test]
async fn test_configured_hub_over_http() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/hub"))
        .and(header("user-agent", "hubbub-tests"))
        .and(header("authorization", "Basic dXNlcjpwYXNz"))
        .and(body_string_contains("hub.mode=unsubscribe"))
        .and(body_string_contains("hub.verify=async"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let config = HubConfig::from_vars(
        "HUBBUB",
        [
            ("HUBBUB_URL", format!("{}/hub", server.uri())),
            ("HUBBUB_CALLBACK", "http://me.example.com/push".to_string()),
            ("HUBBUB_VERIFY", "async".to_string()),
            ("HUBBUB_USER_AGENT", "hubbub-tests".to_string()),
            ("HUBBUB_USERNAME", "user".to_string()),
            ("HUBBUB_PASSWORD", "pass".to_string()),
        ],
    )
    .unwrap();
    let factory = HttpRequestFactory::new(HttpHandleConfig::default()).unwrap();
    let hub = config.build_hub(factory).unwrap();

    let response = hub
        .unsubscribe("http://blog.example.com/feed", OptionSet::new())
        .await
        .unwrap();

    assert_eq!(response.status, StatusCode::NO_CONTENT);
}
