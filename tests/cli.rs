use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn push_fails_without_credential() {
    let logs = tempdir().expect("temp log dir");

    let mut cmd = Command::cargo_bin("daylog").expect("Binary exists");
    cmd.arg("push")
        .arg("--dir")
        .arg(logs.path())
        .env_remove("GITHUB_PAT_TEAM_HUB");

    // The credential precondition fails before any file or network access.
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("GITHUB_PAT_TEAM_HUB"));
}

#[test]
fn push_fails_when_no_log_file_exists() {
    let logs = tempdir().expect("temp log dir");

    let mut cmd = Command::cargo_bin("daylog").expect("Binary exists");
    cmd.arg("push")
        .arg("--dir")
        .arg(logs.path())
        .arg("--date")
        .arg("2025-03-05")
        .env("GITHUB_PAT_TEAM_HUB", "ghp_dummy_token_for_tests");

    // File resolution fails before any network call; the message names the
    // expected dated path.
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no local log file found"))
        .stderr(predicate::str::contains("2025.03.05.md"));
}

#[test]
fn push_prints_member_banner() {
    let logs = tempdir().expect("temp log dir");

    let mut cmd = Command::cargo_bin("daylog").expect("Binary exists");
    cmd.arg("push")
        .arg("--dir")
        .arg(logs.path())
        .env_remove("MEMBER_ID")
        .env_remove("TEAM_DIR")
        .env("GITHUB_PAT_TEAM_HUB", "ghp_dummy_token_for_tests");

    // Identity and team are reported for operator visibility even when the
    // run fails later (empty log dir here).
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("金倩如"))
        .stdout(predicate::str::contains("中国团队 china-team"));
}

use std::sync::{Arc, Mutex};
use tracing_subscriber::prelude::*; // needed for .with()
use tracing_subscriber::{layer::Context, Layer, Registry};

/// Custom Layer to collect emitted event messages.
struct EventCollector {
    events: Arc<Mutex<Vec<String>>>,
}

impl<S> Layer<S> for EventCollector
where
    S: tracing::Subscriber,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        use std::fmt::Write as FmtWrite;
        let mut msg = String::new();
        let _ = write!(&mut msg, "{:?}", event);
        self.events.lock().unwrap().push(msg);
    }
}

#[tokio::test]
async fn emits_trace_initialised_event() {
    let events = Arc::new(Mutex::new(Vec::new()));
    let collector = EventCollector {
        events: events.clone(),
    };
    let subscriber = Registry::default().with(collector);
    let _guard = tracing::subscriber::set_default(subscriber);

    use daylog::cli::{run, Cli, Commands};

    // An empty log directory makes run() fail before any network access;
    // the trace event must be emitted regardless.
    let logs = tempdir().expect("temp log dir");
    let cli = Cli {
        command: Commands::Push {
            dir: Some(logs.path().to_path_buf()),
            date: None,
        },
    };

    let _ = run(cli).await;

    let event_msgs = events.lock().unwrap();
    assert!(
        event_msgs.iter().any(|msg| msg.contains("trace_initialised")),
        "Expected a 'trace_initialised' trace event, got: {:?}",
        event_msgs
    );
}
