//! Translator orchestrator
//! 翻译编排器
//!
//! 状态机 (`ut-core`) 只做决定,本模块负责让决定发生:把用户输入、定时器到期和
//! 网络完成转换成状态机事件,再把状态机返回的动作逐一执行。
//!
//! # Architecture / 架构
//!
//! ```text
//! facade calls          timer expiry        network completion
//!      │                     │                      │
//!      └──────────┬──────────┴──────────────────────┘
//!                 ▼
//!        TranslatorOrchestrator ──▶ TranslatorStateMachine (pure)
//!                 │                          │
//!                 │◀── actions ──────────────┘
//!                 ▼
//!   timers / HTTP / clipboard / speech / event fan-out
//! ```
//!
//! All pacing decisions (which keystroke survives, which response applies)
//! live in the state machine. The orchestrator never compares generations or
//! tokens itself; it only carries them back and forth.
//! 所有节奏决策 (哪次击键胜出、哪个响应生效) 都在状态机里。
//! 编排器自己从不比较代数或令牌,只负责来回传递。

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::sync::{mpsc, Mutex};
use tokio::task::AbortHandle;
use tracing::{debug, error, info_span, warn, Instrument};

use super::{TranslatorDomainEvent, TranslatorEventPort, TranslatorFacade};
use crate::models::TranslatorSnapshot;
use crate::usecases::load_catalog::LoadCatalog;
use ut_core::ids::RequestToken;
use ut_core::language::LanguageId;
use ut_core::ports::{
    ClockPort, LanguageCatalogPort, SpeechSynthesisPort, SystemClipboardPort,
    TranslationServicePort,
};
use ut_core::settings::Settings;
use ut_core::{TextField, TranslatorAction, TranslatorEvent, TranslatorPolicy, TranslatorStateMachine};

/// Message attached to every copy confirmation.
const COPY_CONFIRMATION: &str = "Copied to clipboard!";

/// Capacity of each subscriber's event channel.
const EVENT_CHANNEL_SIZE: usize = 100;

/// Orchestrator tuning derived from [`Settings`].
/// 来自设置的编排器参数。
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// 静默窗口时长(毫秒),至少为 1
    pub debounce_window_ms: u64,
}

impl TranslatorConfig {
    pub fn from_settings(settings: &Settings) -> Self {
        let window_ms = settings
            .translator
            .debounce_window
            .as_millis()
            .min(u64::MAX as u128) as u64;
        Self {
            debounce_window_ms: window_ms.max(1),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Drives one translation session.
/// 驱动单个翻译会话。
///
/// Cloning is cheap and every clone shares the same session: the state
/// machine, the debounce timer slot and the subscriber list all sit behind
/// `Arc`s. Spawned timer and request tasks each hold a clone.
#[derive(Clone)]
pub struct TranslatorOrchestrator {
    /// 状态机 (所有决策都在这里)
    machine: Arc<Mutex<TranslatorStateMachine>>,
    catalog: Arc<dyn LanguageCatalogPort>,
    translation: Arc<dyn TranslationServicePort>,
    clipboard: Arc<dyn SystemClipboardPort>,
    speech: Arc<dyn SpeechSynthesisPort>,
    clock: Arc<dyn ClockPort>,
    /// 防抖定时器句柄; 新窗口启动时取消并替换旧窗口
    debounce_timer: Arc<Mutex<Option<AbortHandle>>>,
    /// 事件订阅者列表
    event_senders: Arc<Mutex<Vec<mpsc::Sender<TranslatorDomainEvent>>>>,
}

impl TranslatorOrchestrator {
    pub fn new(
        config: TranslatorConfig,
        catalog: Arc<dyn LanguageCatalogPort>,
        translation: Arc<dyn TranslationServicePort>,
        clipboard: Arc<dyn SystemClipboardPort>,
        speech: Arc<dyn SpeechSynthesisPort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let policy = TranslatorPolicy {
            debounce_window_ms: config.debounce_window_ms,
        };
        Self {
            machine: Arc::new(Mutex::new(TranslatorStateMachine::with_policy(policy))),
            catalog,
            translation,
            clipboard,
            speech,
            clock,
            debounce_timer: Arc::new(Mutex::new(None)),
            event_senders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Load the language catalog and initialize the selection.
    /// 加载语言目录并初始化语言选择。
    ///
    /// Catalog failures do not surface here; they degrade the session to an
    /// empty catalog and notify subscribers.
    pub async fn start(&self) -> Result<()> {
        let span = info_span!("translator.start");
        async {
            let event = LoadCatalog::new(Arc::clone(&self.catalog)).execute().await;
            self.dispatch(event).await
        }
        .instrument(span)
        .await
    }

    /// Replace the draft text. Called once per keystroke.
    pub async fn edit_draft(&self, text: String) -> Result<()> {
        self.dispatch(TranslatorEvent::DraftEdited { text }).await
    }

    pub async fn select_source(&self, id: LanguageId) -> Result<()> {
        self.dispatch(TranslatorEvent::SourceSelected { id }).await
    }

    pub async fn select_target(&self, id: LanguageId) -> Result<()> {
        self.dispatch(TranslatorEvent::TargetSelected { id }).await
    }

    /// Exchange languages and texts in one step.
    pub async fn swap(&self) -> Result<()> {
        let span = info_span!("translator.swap");
        self.dispatch(TranslatorEvent::SwapRequested)
            .instrument(span)
            .await
    }

    /// Copy a field to the system clipboard. Returns after the write landed
    /// and the confirmation went out.
    pub async fn copy(&self, field: TextField) -> Result<()> {
        let span = info_span!("translator.copy", field = ?field);
        self.dispatch(TranslatorEvent::CopyRequested { field })
            .instrument(span)
            .await
    }

    /// Speak a field aloud. Playback runs in the background.
    pub async fn speak(&self, field: TextField) -> Result<()> {
        let span = info_span!("translator.speak", field = ?field);
        self.dispatch(TranslatorEvent::SpeakRequested { field })
            .instrument(span)
            .await
    }

    /// Current view of the translator for rendering.
    pub async fn snapshot(&self) -> TranslatorSnapshot {
        let machine = self.machine.lock().await;
        TranslatorSnapshot {
            state: machine.state(),
            languages: machine.catalog().languages().to_vec(),
            source: machine.selection().map(|pair| pair.source().clone()),
            target: machine.selection().map(|pair| pair.target().clone()),
            draft: machine.draft().to_string(),
            result: machine.result().to_string(),
        }
    }

    /// 将事件送入状态机,然后执行产生的动作
    ///
    /// Boxed with an explicit `Send` bound: the timer task spawned by
    /// `arm_quiescence_timer` awaits `dispatch` again, and the resulting
    /// cycle prevents the compiler from inferring `Send` for the opaque
    /// futures involved.
    fn dispatch<'a>(
        &'a self,
        event: TranslatorEvent,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
        Box::pin(async move {
            let actions = {
                let mut machine = self.machine.lock().await;
                let (_state, actions) = machine.handle_event(event, self.clock.now());
                actions
            };
            self.execute_actions(actions).await
        })
    }

    /// 依次执行动作队列
    ///
    /// 复制完成会在队列内直接折返状态机,避免 dispatch 的异步递归。
    async fn execute_actions(&self, actions: Vec<TranslatorAction>) -> Result<()> {
        let mut queue = VecDeque::from(actions);
        while let Some(action) = queue.pop_front() {
            match action {
                TranslatorAction::StartQuiescence {
                    generation,
                    window_ms,
                } => {
                    self.arm_quiescence_timer(generation, window_ms).await;
                }
                TranslatorAction::IssueTranslation {
                    token,
                    text,
                    source,
                    target,
                } => {
                    self.spawn_translation(token, text, source, target);
                }
                TranslatorAction::CopyToClipboard { field, text } => {
                    // 确认提示不能先于剪贴板落地
                    self.clipboard
                        .set_text(text)
                        .await
                        .context("clipboard write failed")?;
                    let actions = {
                        let mut machine = self.machine.lock().await;
                        let (_state, actions) = machine
                            .handle_event(TranslatorEvent::CopyCompleted { field }, self.clock.now());
                        actions
                    };
                    queue.extend(actions);
                }
                TranslatorAction::Speak { text, language_tag } => {
                    // 朗读不等待播放完成,失败只记录
                    let speech = Arc::clone(&self.speech);
                    tokio::spawn(async move {
                        if let Err(err) = speech.speak(text, language_tag).await {
                            warn!(error = ?err, "speech dispatch failed");
                        }
                    });
                }
                TranslatorAction::EmitCatalogReady { languages } => {
                    self.emit(TranslatorDomainEvent::CatalogReady { languages })
                        .await;
                }
                TranslatorAction::EmitCatalogUnavailable { error } => {
                    self.emit(TranslatorDomainEvent::CatalogUnavailable { error })
                        .await;
                }
                TranslatorAction::EmitSelectionChanged { source, target } => {
                    self.emit(TranslatorDomainEvent::SelectionChanged { source, target })
                        .await;
                }
                TranslatorAction::EmitResultUpdated { token, text } => {
                    self.emit(TranslatorDomainEvent::ResultUpdated { token, text })
                        .await;
                }
                TranslatorAction::EmitTranslationFailed { token, error } => {
                    self.emit(TranslatorDomainEvent::TranslationFailed { token, error })
                        .await;
                }
                TranslatorAction::EmitSwapped {
                    draft,
                    result,
                    source,
                    target,
                } => {
                    self.emit(TranslatorDomainEvent::Swapped {
                        draft,
                        result,
                        source,
                        target,
                    })
                    .await;
                }
                TranslatorAction::EmitCopyConfirmed {
                    notification_id,
                    field,
                } => {
                    self.emit(TranslatorDomainEvent::CopyConfirmed {
                        notification_id,
                        field,
                        message: COPY_CONFIRMATION.to_string(),
                    })
                    .await;
                }
                TranslatorAction::TraceAttempt { token, phase } => {
                    debug!(token = ?token.map(|t| t.value()), phase = ?phase, "attempt phase");
                }
                TranslatorAction::LogTransition {
                    old_state,
                    event,
                    new_state,
                } => {
                    debug!(from = %old_state, to = %new_state, event = %event, "translator transition");
                }
                TranslatorAction::NoOp => {}
            }
        }
        Ok(())
    }

    /// 启动静默窗口; 旧窗口先取消
    ///
    /// 取消与到期之间的竞态由状态机的代数检查兜底: 迟到的到期事件代数不匹配,
    /// 落入 NoOp。
    async fn arm_quiescence_timer(&self, generation: u64, window_ms: u64) {
        let mut slot = self.debounce_timer.lock().await;
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        let orchestrator = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(window_ms)).await;
            if let Err(err) = orchestrator
                .dispatch(TranslatorEvent::QuiescenceElapsed { generation })
                .await
            {
                error!(generation, error = ?err, "quiescence handling failed");
            }
        });
        *slot = Some(handle.abort_handle());
    }

    /// 在后台执行一次翻译请求,完成后把结果折返状态机
    fn spawn_translation(
        &self,
        token: RequestToken,
        text: String,
        source: LanguageId,
        target: LanguageId,
    ) {
        let orchestrator = self.clone();
        let span = info_span!("translator.request", token = %token, source = %source, target = %target);
        tokio::spawn(
            async move {
                let outcome = orchestrator
                    .translation
                    .translate(&text, &source, &target)
                    .await;
                let event = match outcome {
                    Ok(translated) => TranslatorEvent::TranslationSucceeded { token, translated },
                    Err(err) => TranslatorEvent::TranslationFailed {
                        token,
                        error: err.to_string(),
                    },
                };
                if let Err(err) = orchestrator.dispatch(event).await {
                    error!(token = %token, error = ?err, "translation completion handling failed");
                }
            }
            .instrument(span),
        );
    }

    /// 将事件发送给所有订阅者; 掉线的接收端跳过
    async fn emit(&self, event: TranslatorDomainEvent) {
        let senders = self.event_senders.lock().await.clone();
        for sender in senders {
            if sender.send(event.clone()).await.is_err() {
                debug!("translator event receiver dropped, skipping");
            }
        }
    }
}

#[async_trait]
impl TranslatorFacade for TranslatorOrchestrator {
    async fn start(&self) -> Result<()> {
        self.start().await
    }

    async fn edit_draft(&self, text: String) -> Result<()> {
        self.edit_draft(text).await
    }

    async fn select_source(&self, id: LanguageId) -> Result<()> {
        self.select_source(id).await
    }

    async fn select_target(&self, id: LanguageId) -> Result<()> {
        self.select_target(id).await
    }

    async fn swap(&self) -> Result<()> {
        self.swap().await
    }

    async fn copy(&self, field: TextField) -> Result<()> {
        self.copy(field).await
    }

    async fn speak(&self, field: TextField) -> Result<()> {
        self.speak(field).await
    }

    async fn snapshot(&self) -> Result<TranslatorSnapshot> {
        Ok(self.snapshot().await)
    }
}

#[async_trait]
impl TranslatorEventPort for TranslatorOrchestrator {
    async fn subscribe(&self) -> Result<mpsc::Receiver<TranslatorDomainEvent>> {
        let (sender, receiver) = mpsc::channel(EVENT_CHANNEL_SIZE);
        self.event_senders.lock().await.push(sender);
        Ok(receiver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex as StdMutex;

    use tokio::time::{advance, timeout};
    use ut_core::language::Language;
    use ut_core::ports::ServiceError;
    use ut_core::TranslatorState;
    use ut_infra::SystemClock;

    struct ScriptedCatalog {
        languages: Vec<Language>,
    }

    #[async_trait]
    impl LanguageCatalogPort for ScriptedCatalog {
        async fn fetch_languages(&self) -> Result<Vec<Language>, ServiceError> {
            Ok(self.languages.clone())
        }
    }

    struct FailingCatalog;

    #[async_trait]
    impl LanguageCatalogPort for FailingCatalog {
        async fn fetch_languages(&self) -> Result<Vec<Language>, ServiceError> {
            Err(ServiceError::Network("catalog offline".to_string()))
        }
    }

    /// Replies immediately with a fixed text, recording every request.
    struct StubTranslation {
        reply: String,
        calls: AtomicUsize,
        requests: StdMutex<Vec<(String, String, String)>>,
    }

    impl StubTranslation {
        fn new(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                calls: AtomicUsize::new(0),
                requests: StdMutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn requests(&self) -> Vec<(String, String, String)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TranslationServicePort for StubTranslation {
        async fn translate(
            &self,
            text: &str,
            source: &LanguageId,
            target: &LanguageId,
        ) -> Result<String, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push((
                text.to_string(),
                source.as_str().to_string(),
                target.as_str().to_string(),
            ));
            Ok(self.reply.clone())
        }
    }

    /// Pops one scripted outcome per call.
    struct SequencedTranslation {
        replies: StdMutex<VecDeque<Result<String, ServiceError>>>,
        calls: AtomicUsize,
    }

    impl SequencedTranslation {
        fn new(replies: Vec<Result<String, ServiceError>>) -> Self {
            Self {
                replies: StdMutex::new(replies.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationServicePort for SequencedTranslation {
        async fn translate(
            &self,
            _text: &str,
            _source: &LanguageId,
            _target: &LanguageId,
        ) -> Result<String, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ServiceError::Network("no scripted reply".to_string())))
        }
    }

    /// Echoes the request back after a fixed delay.
    struct DelayedEchoTranslation {
        delay: Duration,
        calls: AtomicUsize,
    }

    impl DelayedEchoTranslation {
        fn new(delay: Duration) -> Self {
            Self {
                delay,
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TranslationServicePort for DelayedEchoTranslation {
        async fn translate(
            &self,
            text: &str,
            _source: &LanguageId,
            _target: &LanguageId,
        ) -> Result<String, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            Ok(format!("{}-translated", text))
        }
    }

    #[derive(Default)]
    struct RecordingClipboard {
        writes: StdMutex<Vec<String>>,
    }

    impl RecordingClipboard {
        fn writes(&self) -> Vec<String> {
            self.writes.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SystemClipboardPort for RecordingClipboard {
        async fn set_text(&self, text: String) -> Result<()> {
            self.writes.lock().unwrap().push(text);
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingSpeech {
        spoken: StdMutex<Vec<(String, Option<String>)>>,
    }

    impl RecordingSpeech {
        fn spoken(&self) -> Vec<(String, Option<String>)> {
            self.spoken.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SpeechSynthesisPort for RecordingSpeech {
        async fn speak(&self, text: String, language: Option<LanguageId>) -> Result<()> {
            self.spoken
                .lock()
                .unwrap()
                .push((text, language.map(|id| id.into_inner())));
            Ok(())
        }
    }

    fn sample_languages() -> Vec<Language> {
        vec![
            Language::new("en", "English"),
            Language::new("de", "German"),
            Language::new("fr", "French"),
        ]
    }

    struct Harness {
        orchestrator: TranslatorOrchestrator,
        translation: Arc<StubTranslation>,
        clipboard: Arc<RecordingClipboard>,
        speech: Arc<RecordingSpeech>,
    }

    fn harness() -> Harness {
        let translation = Arc::new(StubTranslation::new("bonjour"));
        let clipboard = Arc::new(RecordingClipboard::default());
        let speech = Arc::new(RecordingSpeech::default());
        let orchestrator = TranslatorOrchestrator::new(
            TranslatorConfig::default(),
            Arc::new(ScriptedCatalog {
                languages: sample_languages(),
            }),
            Arc::clone(&translation) as Arc<dyn TranslationServicePort>,
            Arc::clone(&clipboard) as Arc<dyn SystemClipboardPort>,
            Arc::clone(&speech) as Arc<dyn SpeechSynthesisPort>,
            Arc::new(SystemClock),
        );
        Harness {
            orchestrator,
            translation,
            clipboard,
            speech,
        }
    }

    fn orchestrator_with_translation(
        translation: Arc<dyn TranslationServicePort>,
    ) -> TranslatorOrchestrator {
        TranslatorOrchestrator::new(
            TranslatorConfig::default(),
            Arc::new(ScriptedCatalog {
                languages: sample_languages(),
            }),
            translation,
            Arc::new(RecordingClipboard::default()),
            Arc::new(RecordingSpeech::default()),
            Arc::new(SystemClock),
        )
    }

    async fn next_event(rx: &mut mpsc::Receiver<TranslatorDomainEvent>) -> TranslatorDomainEvent {
        timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("event within deadline")
            .expect("event stream open")
    }

    async fn wait_for<F>(
        rx: &mut mpsc::Receiver<TranslatorDomainEvent>,
        matches: F,
    ) -> TranslatorDomainEvent
    where
        F: Fn(&TranslatorDomainEvent) -> bool,
    {
        loop {
            let event = next_event(rx).await;
            if matches(&event) {
                return event;
            }
        }
    }

    #[tokio::test]
    async fn test_start_publishes_catalog_and_initial_selection() {
        let h = harness();
        let mut rx = h.orchestrator.subscribe().await.unwrap();

        h.orchestrator.start().await.unwrap();

        match next_event(&mut rx).await {
            TranslatorDomainEvent::CatalogReady { languages } => {
                assert_eq!(languages.len(), 3);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        match next_event(&mut rx).await {
            TranslatorDomainEvent::SelectionChanged { source, target } => {
                assert_eq!(source.id.as_str(), "en");
                assert_eq!(target.id.as_str(), "fr");
            }
            other => panic!("unexpected event: {:?}", other),
        }

        let snapshot = h.orchestrator.snapshot().await;
        assert_eq!(snapshot.state, TranslatorState::Ready);
        assert_eq!(snapshot.source.unwrap().id.as_str(), "en");
        assert_eq!(snapshot.target.unwrap().id.as_str(), "fr");
    }

    #[tokio::test]
    async fn test_catalog_failure_degrades_to_empty_session() {
        let translation = Arc::new(StubTranslation::new("unused"));
        let orchestrator = TranslatorOrchestrator::new(
            TranslatorConfig::default(),
            Arc::new(FailingCatalog),
            Arc::clone(&translation) as Arc<dyn TranslationServicePort>,
            Arc::new(RecordingClipboard::default()),
            Arc::new(RecordingSpeech::default()),
            Arc::new(SystemClock),
        );
        let mut rx = orchestrator.subscribe().await.unwrap();

        orchestrator.start().await.unwrap();

        match next_event(&mut rx).await {
            TranslatorDomainEvent::CatalogUnavailable { error } => {
                assert!(error.contains("catalog offline"));
            }
            other => panic!("unexpected event: {:?}", other),
        }

        let snapshot = orchestrator.snapshot().await;
        assert_eq!(snapshot.state, TranslatorState::CatalogEmpty);
        assert!(snapshot.languages.is_empty());
        assert!(snapshot.source.is_none());

        // Typing still updates the draft but never schedules a request.
        orchestrator.edit_draft("hello".to_string()).await.unwrap();
        let snapshot = orchestrator.snapshot().await;
        assert_eq!(snapshot.draft, "hello");
        assert_eq!(translation.calls(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keystroke_burst_coalesces_into_one_request() {
        let h = harness();
        let mut rx = h.orchestrator.subscribe().await.unwrap();
        h.orchestrator.start().await.unwrap();

        h.orchestrator.edit_draft("h".to_string()).await.unwrap();
        advance(Duration::from_millis(100)).await;
        h.orchestrator.edit_draft("he".to_string()).await.unwrap();
        advance(Duration::from_millis(100)).await;
        h.orchestrator.edit_draft("hello".to_string()).await.unwrap();

        let event = wait_for(&mut rx, |event| {
            matches!(event, TranslatorDomainEvent::ResultUpdated { .. })
        })
        .await;
        match event {
            TranslatorDomainEvent::ResultUpdated { text, .. } => assert_eq!(text, "bonjour"),
            _ => unreachable!(),
        }

        assert_eq!(h.translation.calls(), 1);
        assert_eq!(
            h.translation.requests(),
            vec![("hello".to_string(), "en".to_string(), "fr".to_string())]
        );

        let snapshot = h.orchestrator.snapshot().await;
        assert_eq!(snapshot.result, "bonjour");
        assert_eq!(snapshot.draft, "hello");
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_translation_keeps_previous_result() {
        let translation = Arc::new(SequencedTranslation::new(vec![
            Ok("bonjour".to_string()),
            Err(ServiceError::Network("connection reset".to_string())),
        ]));
        let orchestrator =
            orchestrator_with_translation(Arc::clone(&translation) as Arc<dyn TranslationServicePort>);
        let mut rx = orchestrator.subscribe().await.unwrap();
        orchestrator.start().await.unwrap();

        orchestrator.edit_draft("hello".to_string()).await.unwrap();
        wait_for(&mut rx, |event| {
            matches!(event, TranslatorDomainEvent::ResultUpdated { .. })
        })
        .await;

        orchestrator.edit_draft("hello again".to_string()).await.unwrap();
        let event = wait_for(&mut rx, |event| {
            matches!(event, TranslatorDomainEvent::TranslationFailed { .. })
        })
        .await;
        match event {
            TranslatorDomainEvent::TranslationFailed { error, .. } => {
                assert!(error.contains("connection reset"));
            }
            _ => unreachable!(),
        }

        let snapshot = orchestrator.snapshot().await;
        assert_eq!(snapshot.result, "bonjour");
        assert_eq!(translation.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_response_of_superseded_attempt_is_discarded() {
        let translation = Arc::new(DelayedEchoTranslation::new(Duration::from_millis(500)));
        let orchestrator =
            orchestrator_with_translation(Arc::clone(&translation) as Arc<dyn TranslationServicePort>);
        let mut rx = orchestrator.subscribe().await.unwrap();
        orchestrator.start().await.unwrap();

        // First attempt goes in flight once its window elapses inside the
        // advance below; its response is still pending when the second
        // attempt is scheduled.
        orchestrator.edit_draft("one".to_string()).await.unwrap();
        advance(Duration::from_millis(400)).await;
        tokio::task::yield_now().await;

        // The second attempt mints a newer token, so the first response
        // arrives retired and is discarded without touching the result.
        orchestrator.edit_draft("two".to_string()).await.unwrap();

        let event = wait_for(&mut rx, |event| {
            matches!(event, TranslatorDomainEvent::ResultUpdated { .. })
        })
        .await;
        match event {
            TranslatorDomainEvent::ResultUpdated { text, .. } => {
                assert_eq!(text, "two-translated");
            }
            _ => unreachable!(),
        }

        let snapshot = orchestrator.snapshot().await;
        assert_eq!(snapshot.result, "two-translated");
        assert_eq!(translation.calls(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_confirms_after_clipboard_write() {
        let h = harness();
        let mut rx = h.orchestrator.subscribe().await.unwrap();
        h.orchestrator.start().await.unwrap();
        h.orchestrator.edit_draft("hello".to_string()).await.unwrap();

        h.orchestrator.copy(TextField::Draft).await.unwrap();
        assert_eq!(h.clipboard.writes(), vec!["hello".to_string()]);

        let first = wait_for(&mut rx, |event| {
            matches!(event, TranslatorDomainEvent::CopyConfirmed { .. })
        })
        .await;
        h.orchestrator.copy(TextField::Draft).await.unwrap();
        let second = wait_for(&mut rx, |event| {
            matches!(event, TranslatorDomainEvent::CopyConfirmed { .. })
        })
        .await;

        match (first, second) {
            (
                TranslatorDomainEvent::CopyConfirmed {
                    notification_id: first_id,
                    field: first_field,
                    message,
                },
                TranslatorDomainEvent::CopyConfirmed {
                    notification_id: second_id,
                    ..
                },
            ) => {
                assert_eq!(first_field, TextField::Draft);
                assert_eq!(message, COPY_CONFIRMATION);
                assert_ne!(first_id, second_id);
            }
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_copying_empty_result_is_valid() {
        let h = harness();
        let mut rx = h.orchestrator.subscribe().await.unwrap();
        h.orchestrator.start().await.unwrap();

        h.orchestrator.copy(TextField::Result).await.unwrap();

        assert_eq!(h.clipboard.writes(), vec![String::new()]);
        let event = wait_for(&mut rx, |event| {
            matches!(event, TranslatorDomainEvent::CopyConfirmed { .. })
        })
        .await;
        match event {
            TranslatorDomainEvent::CopyConfirmed { field, .. } => {
                assert_eq!(field, TextField::Result);
            }
            _ => unreachable!(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_speak_carries_target_language_tag() {
        let h = harness();
        h.orchestrator.start().await.unwrap();
        h.orchestrator.edit_draft("hello".to_string()).await.unwrap();

        h.orchestrator.speak(TextField::Draft).await.unwrap();
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        assert_eq!(
            h.speech.spoken(),
            vec![("hello".to_string(), Some("fr".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_speak_before_catalog_uses_default_voice() {
        let h = harness();
        h.orchestrator.edit_draft("hola".to_string()).await.unwrap();

        h.orchestrator.speak(TextField::Draft).await.unwrap();
        tokio::task::yield_now().await;
        tokio::task::yield_now().await;

        assert_eq!(h.speech.spoken(), vec![("hola".to_string(), None)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_swap_exchanges_languages_and_texts() {
        let h = harness();
        let mut rx = h.orchestrator.subscribe().await.unwrap();
        h.orchestrator.start().await.unwrap();

        h.orchestrator.edit_draft("hello".to_string()).await.unwrap();
        wait_for(&mut rx, |event| {
            matches!(event, TranslatorDomainEvent::ResultUpdated { .. })
        })
        .await;

        h.orchestrator.swap().await.unwrap();

        let event = wait_for(&mut rx, |event| {
            matches!(event, TranslatorDomainEvent::Swapped { .. })
        })
        .await;
        match event {
            TranslatorDomainEvent::Swapped {
                draft,
                result,
                source,
                target,
            } => {
                assert_eq!(draft, "bonjour");
                assert_eq!(result, "hello");
                assert_eq!(source.id.as_str(), "fr");
                assert_eq!(target.id.as_str(), "en");
            }
            _ => unreachable!(),
        }

        let snapshot = h.orchestrator.snapshot().await;
        assert_eq!(snapshot.draft, "bonjour");
        assert_eq!(snapshot.result, "hello");
        // Swapping is not a keystroke; no new request was scheduled.
        assert_eq!(h.translation.calls(), 1);
    }

    #[tokio::test]
    async fn test_unknown_language_selection_is_ignored() {
        let h = harness();
        h.orchestrator.start().await.unwrap();

        h.orchestrator
            .select_source(LanguageId::from("xx"))
            .await
            .unwrap();

        let snapshot = h.orchestrator.snapshot().await;
        assert_eq!(snapshot.source.unwrap().id.as_str(), "en");
        assert_eq!(snapshot.target.unwrap().id.as_str(), "fr");
    }

    #[tokio::test]
    async fn test_selecting_target_emits_selection_changed() {
        let h = harness();
        let mut rx = h.orchestrator.subscribe().await.unwrap();
        h.orchestrator.start().await.unwrap();

        h.orchestrator
            .select_target(LanguageId::from("de"))
            .await
            .unwrap();

        let event = wait_for(&mut rx, |event| {
            matches!(
                event,
                TranslatorDomainEvent::SelectionChanged { target, .. } if target.id.as_str() == "de"
            )
        })
        .await;
        match event {
            TranslatorDomainEvent::SelectionChanged { source, .. } => {
                assert_eq!(source.id.as_str(), "en");
            }
            _ => unreachable!(),
        }
    }

    #[tokio::test]
    async fn test_every_subscriber_receives_events() {
        let h = harness();
        let mut first = h.orchestrator.subscribe().await.unwrap();
        let mut second = h.orchestrator.subscribe().await.unwrap();

        h.orchestrator.start().await.unwrap();

        for rx in [&mut first, &mut second] {
            match next_event(rx).await {
                TranslatorDomainEvent::CatalogReady { languages } => {
                    assert_eq!(languages.len(), 3);
                }
                other => panic!("unexpected event: {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_config_clamps_zero_window() {
        let mut settings = Settings::default();
        settings.translator.debounce_window = Duration::from_millis(0);
        let config = TranslatorConfig::from_settings(&settings);
        assert_eq!(config.debounce_window_ms, 1);
    }

    #[tokio::test]
    async fn test_config_defaults_match_settings() {
        let config = TranslatorConfig::default();
        assert_eq!(config.debounce_window_ms, 300);
    }
}
