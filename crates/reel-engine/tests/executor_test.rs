use async_trait::async_trait;
use reel_engine::artifact::{ArtifactError, ArtifactWriter};
use reel_engine::backend::{Backend, BackendError, NavigationResult};
use reel_engine::codegen::{Framework, Language};
use reel_engine::config::ReelConfig;
use reel_engine::executor::{CommandExecutor, ExecutorError, NO_ACTIONS_MESSAGE};
use reel_engine::{Action, ActionKind};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

#[derive(Debug, Default)]
struct MockBackend {
    pub calls: Vec<String>,
    pub missing: Vec<String>,
    pub closed: bool,
    pub launches: usize,
}

impl MockBackend {
    fn with_missing(selector: &str) -> Self {
        Self {
            missing: vec![selector.to_string()],
            ..Default::default()
        }
    }

    fn touch(&mut self, call: String, selector: &str) -> Result<(), BackendError> {
        if self.missing.iter().any(|s| s == selector) {
            return Err(BackendError::ElementNotFound {
                selector: selector.to_string(),
            });
        }
        self.calls.push(call);
        Ok(())
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn launch(&mut self) -> Result<(), BackendError> {
        self.closed = false;
        self.launches += 1;
        Ok(())
    }
    async fn close(&mut self) -> Result<(), BackendError> {
        self.closed = true;
        Ok(())
    }
    async fn is_ready(&self) -> bool {
        !self.closed
    }
    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BackendError> {
        self.calls.push(format!("navigate {}", url));
        Ok(NavigationResult {
            url: url.to_string(),
        })
    }
    async fn click(&mut self, selector: &str) -> Result<(), BackendError> {
        self.touch(format!("click {}", selector), selector)
    }
    async fn fill(&mut self, selector: &str, value: &str) -> Result<(), BackendError> {
        self.touch(format!("fill {} {}", selector, value), selector)
    }
    async fn type_text(
        &mut self,
        selector: &str,
        text: &str,
        delay_ms: Option<u64>,
    ) -> Result<(), BackendError> {
        self.touch(format!("type {} {} {:?}", selector, text, delay_ms), selector)
    }
    async fn press_key(&mut self, key: &str) -> Result<(), BackendError> {
        self.calls.push(format!("press {}", key));
        Ok(())
    }
    async fn screenshot(&mut self) -> Result<Vec<u8>, BackendError> {
        Ok(vec![1, 2, 3])
    }
    async fn set_checked(&mut self, selector: &str, checked: bool) -> Result<(), BackendError> {
        self.touch(format!("checked {} {}", selector, checked), selector)
    }
}

#[derive(Debug, Clone, Default)]
struct MockWriter {
    writes: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl MockWriter {
    fn names(&self) -> Vec<String> {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

impl ArtifactWriter for MockWriter {
    fn write(&self, name: &str, contents: &[u8]) -> Result<PathBuf, ArtifactError> {
        self.writes
            .lock()
            .unwrap()
            .push((name.to_string(), contents.to_vec()));
        Ok(PathBuf::from("/out").join(name))
    }
}

fn executor() -> (CommandExecutor, MockWriter) {
    let writer = MockWriter::default();
    let executor = CommandExecutor::with_writer(&ReelConfig::default(), Box::new(writer.clone()));
    (executor, writer)
}

async fn run(executor: &mut CommandExecutor, backend: &mut MockBackend, lines: &[&str]) {
    for line in lines {
        executor
            .execute_line(backend, line)
            .await
            .unwrap_or_else(|e| panic!("'{}' failed: {}", line, e));
    }
}

#[tokio::test]
async fn test_record_and_generate_playwright_typescript() {
    let (mut executor, writer) = executor();
    let mut backend = MockBackend::default();

    run(
        &mut executor,
        &mut backend,
        &[
            "record start s1",
            "goto https://a.test",
            "click #go",
            "record stop",
        ],
    )
    .await;

    let result = executor
        .execute_line(&mut backend, "generate playwright typescript out")
        .await
        .unwrap();
    assert!(result.success);

    let artifact = result.generated.expect("artifact");
    assert_eq!(artifact.path, PathBuf::from("/out/out"));
    assert!(artifact.skipped.is_empty());
    assert!(result.output.contains("/out/out"));
    assert!(result.output.ends_with(&artifact.code));

    let goto = artifact
        .code
        .find("await page.goto('https://a.test/');")
        .expect("goto statement");
    let click = artifact
        .code
        .find("await page.click('#go');")
        .expect("click statement");
    assert!(goto < click);
    assert!(artifact.code.contains("test('s1'"));
    assert_eq!(writer.names(), vec!["out".to_string()]);
}

#[tokio::test]
async fn test_generate_uses_default_file_name_and_config_target() {
    let mut config = ReelConfig::default();
    config.codegen.framework = Framework::Selenium;
    config.codegen.language = Language::Python;
    let writer = MockWriter::default();
    let mut executor = CommandExecutor::with_writer(&config, Box::new(writer.clone()));
    let mut backend = MockBackend::default();

    run(
        &mut executor,
        &mut backend,
        &["record start \"Login Flow\"", "goto a.test", "generate"],
    )
    .await;

    assert_eq!(writer.names(), vec!["test_Login_Flow.py".to_string()]);
}

#[tokio::test]
async fn test_generate_reports_skipped_actions() {
    let (mut executor, _writer) = executor();
    let mut backend = MockBackend::default();
    run(
        &mut executor,
        &mut backend,
        &["record start s", "check #tos", "click #go"],
    )
    .await;

    let result = executor
        .generate(Some(Framework::Puppeteer), Some(Language::JavaScript), None)
        .unwrap();
    let artifact = result.generated.unwrap();
    assert_eq!(artifact.skipped, vec![ActionKind::Check]);
    assert!(result.output.contains("Skipped 1 actions"));
    assert!(!artifact.code.contains("#tos"));
}

#[tokio::test]
async fn test_generate_without_actions_writes_nothing() {
    let (mut executor, writer) = executor();
    let mut backend = MockBackend::default();

    let result = executor
        .execute_line(&mut backend, "generate")
        .await
        .unwrap();
    assert!(result.success);
    assert_eq!(result.output, NO_ACTIONS_MESSAGE);
    assert!(result.generated.is_none());

    run(&mut executor, &mut backend, &["record start empty", "generate"]).await;
    assert_eq!(writer.count(), 0);
}

#[tokio::test]
async fn test_second_start_discards_first_log() {
    let (mut executor, _writer) = executor();
    let mut backend = MockBackend::default();
    run(
        &mut executor,
        &mut backend,
        &[
            "record start first",
            "click #a",
            "click #b",
            "record start second",
            "click #c",
        ],
    )
    .await;

    let (name, log) = executor.session().snapshot();
    assert_eq!(name, "second");
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].action.selector(), Some("#c"));
}

#[tokio::test]
async fn test_failed_primitive_is_not_recorded() {
    let (mut executor, _writer) = executor();
    let mut backend = MockBackend::with_missing("#gone");
    run(&mut executor, &mut backend, &["record start s", "click #a"]).await;

    let err = executor
        .execute_line(&mut backend, "click #gone")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ExecutorError::Backend(BackendError::ElementNotFound { .. })
    ));

    let (_, log) = executor.session().snapshot();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].action.selector(), Some("#a"));
}

#[tokio::test]
async fn test_unsupported_primitive_is_not_recorded() {
    let (mut executor, _writer) = executor();
    let mut backend = MockBackend::default();
    run(&mut executor, &mut backend, &["record start s"]).await;

    let err = executor
        .execute_line(&mut backend, "hover #menu")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ExecutorError::Backend(BackendError::NotSupported(_))
    ));
    assert!(executor.session().is_empty());
}

#[tokio::test]
async fn test_primitives_run_without_recording() {
    let (mut executor, _writer) = executor();
    let mut backend = MockBackend::default();
    run(
        &mut executor,
        &mut backend,
        &["goto a.test", "type #q rust --delay 20"],
    )
    .await;

    assert_eq!(
        backend.calls,
        vec![
            "navigate https://a.test/".to_string(),
            "type #q rust Some(20)".to_string()
        ]
    );
    assert!(executor.session().is_empty());
}

#[tokio::test]
async fn test_recorded_payloads() {
    let (mut executor, writer) = executor();
    let mut backend = MockBackend::default();
    run(
        &mut executor,
        &mut backend,
        &[
            "record start s",
            "fill #email user@test.com",
            "type #q rust --delay 20",
            "press Enter",
            "uncheck #news",
            "screenshot",
        ],
    )
    .await;

    let (_, log) = executor.session().snapshot();
    let actions: Vec<Action> = log.into_iter().map(|r| r.action).collect();
    assert_eq!(
        actions,
        vec![
            Action::Fill {
                selector: "#email".into(),
                value: "user@test.com".into()
            },
            Action::Type {
                selector: "#q".into(),
                value: "rust".into(),
                delay: Some(20)
            },
            Action::Press {
                key: "Enter".into()
            },
            Action::Uncheck {
                selector: "#news".into()
            },
            Action::Screenshot {
                value: "screenshot.png".into()
            },
        ]
    );
    assert_eq!(writer.names(), vec!["screenshot.png".to_string()]);
}

#[tokio::test]
async fn test_close_resets_session() {
    let (mut executor, _writer) = executor();
    let mut backend = MockBackend::default();
    run(
        &mut executor,
        &mut backend,
        &["record start s", "click #a", "close"],
    )
    .await;

    assert!(backend.closed);
    assert!(!executor.session().is_active());
    assert!(executor.session().is_empty());
}

#[tokio::test]
async fn test_primitive_after_close_relaunches_browser() {
    let (mut executor, _writer) = executor();
    let mut backend = MockBackend::default();
    run(
        &mut executor,
        &mut backend,
        &["record start s", "click #a", "close"],
    )
    .await;
    assert_eq!(backend.launches, 0);

    run(
        &mut executor,
        &mut backend,
        &["record start again", "click #b"],
    )
    .await;

    assert_eq!(backend.launches, 1);
    assert!(!backend.closed);
    assert_eq!(backend.calls, vec!["click #a", "click #b"]);
    let (_, log) = executor.session().snapshot();
    let actions: Vec<Action> = log.into_iter().map(|r| r.action).collect();
    assert_eq!(
        actions,
        vec![Action::Click {
            selector: "#b".into()
        }]
    );
}

#[tokio::test]
async fn test_status_and_stop_messages() {
    let (mut executor, _writer) = executor();
    let mut backend = MockBackend::default();

    assert_eq!(executor.status(), "Not recording");
    assert_eq!(executor.stop_recording(), "No recording in progress");

    run(&mut executor, &mut backend, &["record start demo", "click #a"]).await;
    assert_eq!(executor.status(), "Recording 'demo': 1 actions");

    let stop = executor
        .execute_line(&mut backend, "record stop")
        .await
        .unwrap();
    assert!(stop.output.contains("1 actions captured"));
    assert_eq!(
        executor.status(),
        "Not recording. Last session 'demo' has 1 actions"
    );
}

#[tokio::test]
async fn test_empty_recording_name_rejected() {
    let (mut executor, _writer) = executor();
    let mut backend = MockBackend::default();
    let err = executor
        .execute_line(&mut backend, "record start \"  \"")
        .await
        .unwrap_err();
    assert!(matches!(err, ExecutorError::Session(_)));
    assert!(!executor.session().is_active());
}
