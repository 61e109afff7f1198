//! Pipeline orchestration: read, validate, translate, write back, notify.

use crate::models::TargetLang;
use crate::services::{Clipboard, Notifier, Translate, TranslateError};

/// Marker every rendered failure starts with; success text never does.
const ERROR_PREFIX: &str = "Error: ";

/// Ellipsis appended when a notification body exceeds the display budget.
const TRUNCATION_MARKER: &str = "...";

/// Behavior switches resolved from the CLI flags and configuration.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Language to translate into.
    pub target: TargetLang,
    /// Show notifications (off with --silent).
    pub notifications: bool,
    /// Write the translation back to the clipboard (off with --no-copy).
    pub copy_back: bool,
    /// Notification display budget in characters.
    pub max_notify_chars: usize,
}

/// Final result of one pipeline run, rendered for presentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The translated text.
    Success(String),
    /// A human-readable error, already carrying the failure marker.
    Failure(String),
}

impl Outcome {
    /// The text printed to stdout.
    pub fn text(&self) -> &str {
        match self {
            Outcome::Success(text) | Outcome::Failure(text) => text,
        }
    }

    /// The process exit code this outcome maps to.
    pub fn exit_code(&self) -> i32 {
        match self {
            Outcome::Success(_) => 0,
            Outcome::Failure(_) => 1,
        }
    }
}

/// The pipeline orchestrator.
///
/// Owns one accessor, one sink and one client, and drives them through a
/// single linear run. Collaborators come in as trait objects so tests can
/// substitute fakes.
pub struct App {
    clipboard: Box<dyn Clipboard>,
    notifier: Box<dyn Notifier>,
    translator: Box<dyn Translate>,
    options: RunOptions,
}

impl App {
    /// Assemble the pipeline from its three collaborators.
    pub fn new(
        clipboard: Box<dyn Clipboard>,
        notifier: Box<dyn Notifier>,
        translator: Box<dyn Translate>,
        options: RunOptions,
    ) -> Self {
        Self {
            clipboard,
            notifier,
            translator,
            options,
        }
    }

    /// Run one clipboard snapshot through the pipeline.
    ///
    /// The caller prints the outcome text and exits with its code; printing
    /// stays out of here so the sequence is observable in tests.
    pub async fn run(&self) -> Outcome {
        let text = self.clipboard.read();

        // An empty clipboard never reaches the network.
        if text.is_empty() {
            let rendered = render_error(&TranslateError::EmptyInput);
            self.notify(&rendered);
            return Outcome::Failure(rendered);
        }

        match self.translator.translate(&text, self.options.target).await {
            Ok(translated) => {
                if self.options.copy_back {
                    self.clipboard.write(&translated);
                }
                self.notify(&translated);
                Outcome::Success(translated)
            }
            Err(err) => {
                let rendered = render_error(&err);
                self.notify(&rendered);
                Outcome::Failure(rendered)
            }
        }
    }

    /// Best-effort notification, truncated to the display budget.
    fn notify(&self, body: &str) {
        if self.options.notifications {
            self.notifier
                .notify(&truncate(body, self.options.max_notify_chars));
        }
    }
}

/// Render a client error for stdout and the notification sink.
fn render_error(err: &TranslateError) -> String {
    format!("{}{}", ERROR_PREFIX, err)
}

/// Cut `text` at `budget` characters, marking the cut with an ellipsis.
fn truncate(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(budget).collect();
    cut.push_str(TRUNCATION_MARKER);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    /// In-memory clipboard recording every write.
    #[derive(Clone, Default)]
    struct FakeClipboard {
        content: Arc<Mutex<String>>,
    }

    impl FakeClipboard {
        fn with_content(text: &str) -> Self {
            Self {
                content: Arc::new(Mutex::new(text.to_string())),
            }
        }

        fn content(&self) -> String {
            self.content.lock().unwrap().clone()
        }
    }

    impl Clipboard for FakeClipboard {
        fn read(&self) -> String {
            self.content()
        }

        fn write(&self, text: &str) {
            *self.content.lock().unwrap() = text.to_string();
        }
    }

    /// Sink recording every body it was asked to display.
    #[derive(Clone, Default)]
    struct FakeNotifier {
        shown: Arc<Mutex<Vec<String>>>,
    }

    impl FakeNotifier {
        fn shown(&self) -> Vec<String> {
            self.shown.lock().unwrap().clone()
        }
    }

    impl Notifier for FakeNotifier {
        fn notify(&self, body: &str) {
            self.shown.lock().unwrap().push(body.to_string());
        }
    }

    /// Deterministic client returning a canned outcome and counting calls.
    #[derive(Clone)]
    struct StubTranslator {
        result: Result<String, TranslateError>,
        calls: Arc<AtomicUsize>,
    }

    impl StubTranslator {
        fn ok(text: &str) -> Self {
            Self {
                result: Ok(text.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn err(err: TranslateError) -> Self {
            Self {
                result: Err(err),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Translate for StubTranslator {
        async fn translate(
            &self,
            _text: &str,
            _target: TargetLang,
        ) -> Result<String, TranslateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }
    }

    fn options() -> RunOptions {
        RunOptions {
            target: TargetLang::En,
            notifications: true,
            copy_back: true,
            max_notify_chars: 100,
        }
    }

    fn app(
        clipboard: &FakeClipboard,
        notifier: &FakeNotifier,
        translator: &StubTranslator,
        options: RunOptions,
    ) -> App {
        App::new(
            Box::new(clipboard.clone()),
            Box::new(notifier.clone()),
            Box::new(translator.clone()),
            options,
        )
    }

    #[tokio::test]
    async fn test_success_writes_back_and_notifies() {
        let clipboard = FakeClipboard::with_content("Hello");
        let notifier = FakeNotifier::default();
        let translator = StubTranslator::ok("Hallo");
        let app = app(&clipboard, &notifier, &translator, options());

        let outcome = app.run().await;

        assert_eq!(outcome, Outcome::Success("Hallo".to_string()));
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(clipboard.content(), "Hallo");
        assert_eq!(notifier.shown(), vec!["Hallo".to_string()]);
        assert_eq!(translator.calls(), 1);
    }

    #[tokio::test]
    async fn test_run_is_deterministic() {
        let clipboard = FakeClipboard::with_content("Hello");
        let notifier = FakeNotifier::default();
        let translator = StubTranslator::ok("Hello");
        let app = app(&clipboard, &notifier, &translator, options());

        let first = app.run().await;
        let second = app.run().await;

        assert_eq!(first, second);
        assert_eq!(first.exit_code(), second.exit_code());
    }

    #[tokio::test]
    async fn test_empty_clipboard_skips_translation() {
        let clipboard = FakeClipboard::default();
        let notifier = FakeNotifier::default();
        let translator = StubTranslator::ok("unused");
        let app = app(&clipboard, &notifier, &translator, options());

        let outcome = app.run().await;

        assert_eq!(
            outcome,
            Outcome::Failure("Error: clipboard is empty".to_string())
        );
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(translator.calls(), 0);
        assert_eq!(notifier.shown(), vec!["Error: clipboard is empty".to_string()]);
    }

    #[tokio::test]
    async fn test_no_copy_leaves_clipboard_untouched() {
        let clipboard = FakeClipboard::with_content("Hello");
        let notifier = FakeNotifier::default();
        let translator = StubTranslator::ok("Hallo");
        let mut opts = options();
        opts.copy_back = false;
        let app = app(&clipboard, &notifier, &translator, opts);

        let outcome = app.run().await;

        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(clipboard.content(), "Hello");
    }

    #[tokio::test]
    async fn test_silent_never_notifies() {
        let clipboard = FakeClipboard::with_content("Hello");
        let notifier = FakeNotifier::default();
        let translator = StubTranslator::err(TranslateError::RateLimited);
        let mut opts = options();
        opts.notifications = false;
        let app = app(&clipboard, &notifier, &translator, opts);

        let outcome = app.run().await;

        assert_eq!(outcome.exit_code(), 1);
        assert!(notifier.shown().is_empty());
    }

    #[tokio::test]
    async fn test_failures_render_distinguishably() {
        let clipboard = FakeClipboard::with_content("Hi");
        let notifier = FakeNotifier::default();

        let rate_limited = StubTranslator::err(TranslateError::RateLimited);
        let outcome = app(&clipboard, &notifier, &rate_limited, options())
            .run()
            .await;
        assert_eq!(
            outcome,
            Outcome::Failure("Error: too many requests, try again later".to_string())
        );

        let forbidden = StubTranslator::err(TranslateError::AuthOrQuota);
        let outcome = app(&clipboard, &notifier, &forbidden, options())
            .run()
            .await;
        assert_eq!(
            outcome,
            Outcome::Failure("Error: API key invalid or quota exceeded".to_string())
        );

        let missing = StubTranslator::err(TranslateError::MissingCredential);
        let outcome = app(&clipboard, &notifier, &missing, options()).run().await;
        assert_eq!(outcome.exit_code(), 1);
        assert!(outcome.text().starts_with("Error: DEEPL_API_KEY"));
    }

    #[tokio::test]
    async fn test_long_result_notification_is_truncated() {
        let clipboard = FakeClipboard::with_content("Hello");
        let notifier = FakeNotifier::default();
        let translator = StubTranslator::ok(&"x".repeat(150));
        let app = app(&clipboard, &notifier, &translator, options());

        let outcome = app.run().await;

        // stdout and clipboard get the full text, only the toast is cut.
        assert_eq!(outcome.text().chars().count(), 150);
        assert_eq!(clipboard.content().chars().count(), 150);
        let shown = notifier.shown();
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0], format!("{}...", "x".repeat(100)));
    }

    #[test]
    fn test_truncate_at_boundary() {
        assert_eq!(truncate("short", 100), "short");
        assert_eq!(truncate(&"a".repeat(100), 100), "a".repeat(100));
        assert_eq!(truncate(&"a".repeat(101), 100), format!("{}...", "a".repeat(100)));
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        let text = "你".repeat(101);
        assert_eq!(truncate(&text, 100), format!("{}...", "你".repeat(100)));
    }
}
