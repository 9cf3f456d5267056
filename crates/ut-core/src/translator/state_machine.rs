//! Translation interaction state machine
//!
//! 这个模块实现了翻译交互的显式状态机,用于保证呈现层永远不会显示过期或乱序的翻译结果。
//!
//! # Design Principles / 设计原则
//!
//! - **显式状态**: 目录加载、选择初始化、防抖窗口、在途请求都有明确表示
//! - **审计友好**: 每次状态转换都记录旧状态、事件和新状态,每次尝试的阶段变化都有踪迹
//! - **单一顺序纪律**: 请求令牌是唯一的排序机制,完成顺序上"最后请求获胜"
//! - **可测试**: 纯函数式状态转换 `(state, event) -> (new_state, actions[])`
//!
//! # Architecture / 架构
//!
//! ```text
//! TranslatorStateMachine (ut-core)
//!   ├── State: 会话所处阶段 (目录加载中 / 目录为空 / 可交互)
//!   ├── Event: 触发状态转换的事件 (击键 / 选择 / 静默窗口到期 / 响应)
//!   └── Action: 状态转换产生的动作 (发起请求 / 启动窗口 / 派发副作用)
//!
//! Orchestrator (ut-app)
//!   ├── 接收用户 / 定时器 / 网络输入
//!   ├── 转换为 TranslatorEvent
//!   ├── 调用状态机获取 actions
//!   └── 执行 actions (HTTP 请求 / 防抖定时器 / 剪贴板 / 语音)
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::mem;

use crate::ids::{NotificationId, RequestToken};
use crate::language::{Language, LanguageCatalog, LanguageId, LanguagePair};
use crate::settings::model::TranslatorSettings;
use crate::translator::attempt::{AttemptPhase, PendingTranslation, TranslationAttempt};

/// 翻译会话所处的阶段
///
/// The session-level state. Per-attempt lifecycle lives in
/// [`AttemptPhase`]; this enum only tracks whether translation is
/// available at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslatorState {
    /// 目录请求尚未返回
    LoadingCatalog,

    /// 目录为空 (加载失败或服务没有语言); 本会话内翻译不可用
    CatalogEmpty,

    /// 目录已加载,选择已初始化,可以交互
    Ready,
}

/// Which of the two text boxes an intent refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextField {
    Draft,
    Result,
}

/// 触发状态转换的事件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslatorEvent {
    /// 语言目录加载完成 (可能为空)
    CatalogLoaded { languages: Vec<Language> },

    /// 语言目录加载失败 (网络 / 状态码 / 解析)
    CatalogLoadFailed { error: String },

    /// 用户修改了草稿文本 (每次击键)
    DraftEdited { text: String },

    /// 用户选择了源语言
    SourceSelected { id: LanguageId },

    /// 用户选择了目标语言
    TargetSelected { id: LanguageId },

    /// 用户请求交换语言与文本
    SwapRequested,

    /// 防抖静默窗口到期
    QuiescenceElapsed { generation: u64 },

    /// 翻译请求成功返回
    TranslationSucceeded {
        token: RequestToken,
        translated: String,
    },

    /// 翻译请求失败 (网络 / 状态码 / 解析)
    TranslationFailed { token: RequestToken, error: String },

    /// 用户请求复制某个文本框
    CopyRequested { field: TextField },

    /// 剪贴板写入完成
    CopyCompleted { field: TextField },

    /// 用户请求朗读某个文本框
    SpeakRequested { field: TextField },
}

/// 状态转换产生的动作
///
/// 这些动作由 orchestrator 执行,实现状态机的副作用。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TranslatorAction {
    /// 启动 (或替换) 防抖静默窗口
    StartQuiescence { generation: u64, window_ms: u64 },

    /// 发起一次翻译请求
    IssueTranslation {
        token: RequestToken,
        text: String,
        source: LanguageId,
        target: LanguageId,
    },

    /// 写入系统剪贴板
    CopyToClipboard { field: TextField, text: String },

    /// 朗读文本 (fire-and-forget); 未选择语言时用平台默认语音
    Speak {
        text: String,
        language_tag: Option<LanguageId>,
    },

    /// 通知订阅者: 目录就绪
    EmitCatalogReady { languages: Vec<Language> },

    /// 通知订阅者: 目录不可用
    EmitCatalogUnavailable { error: String },

    /// 通知订阅者: 选择变化
    EmitSelectionChanged { source: Language, target: Language },

    /// 通知订阅者: 结果已更新
    EmitResultUpdated { token: RequestToken, text: String },

    /// 通知订阅者: 翻译尝试失败 (结果未变化)
    EmitTranslationFailed { token: RequestToken, error: String },

    /// 通知订阅者: 语言与文本已一并交换
    EmitSwapped {
        draft: String,
        result: String,
        source: Language,
        target: Language,
    },

    /// 通知订阅者: 复制已确认
    EmitCopyConfirmed {
        notification_id: NotificationId,
        field: TextField,
    },

    /// 记录一次尝试的阶段变化 (用于审计)
    TraceAttempt {
        token: Option<RequestToken>,
        phase: AttemptPhase,
    },

    /// 记录状态转换日志 (用于审计)
    LogTransition {
        old_state: String,
        event: String,
        new_state: String,
    },

    /// 无操作 (用于某些事件不需要动作的场景)
    NoOp,
}

/// 翻译策略配置
#[derive(Debug, Clone)]
pub struct TranslatorPolicy {
    /// 静默窗口时长(毫秒)
    pub debounce_window_ms: u64,
}

impl Default for TranslatorPolicy {
    fn default() -> Self {
        let defaults = TranslatorSettings::default();
        Self {
            debounce_window_ms: defaults.debounce_window.as_millis().min(u64::MAX as u128) as u64,
        }
    }
}

/// 翻译交互状态机
///
/// 维护目录、选择、草稿与结果,并根据事件产生状态转换和动作。
///
/// # Example / 示例
///
/// ```ignore
/// let mut sm = TranslatorStateMachine::new();
/// let (state, actions) = sm.handle_event(
///     TranslatorEvent::CatalogLoaded {
///         languages: vec![Language::new("en", "English")],
///     },
///     Utc::now(),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TranslatorStateMachine {
    /// 当前状态
    state: TranslatorState,
    /// 交互上下文 (目录、选择、文本、令牌)
    context: TranslatorContext,
    /// 翻译策略
    policy: TranslatorPolicy,
}

/// 翻译交互的上下文信息
#[derive(Debug, Clone, Default)]
struct TranslatorContext {
    /// 语言目录 (每会话最多填充一次)
    catalog: LanguageCatalog,
    /// 当前选择; 目录为空前保持未设置
    selection: Option<LanguagePair>,
    /// 草稿文本
    draft: String,
    /// 最近接受的翻译结果
    result: String,
    /// 防抖代数 (每次击键递增)
    debounce_generation: u64,
    /// 已铸造令牌的计数器
    next_token: u64,
    /// 等待静默窗口的尝试
    pending: Option<PendingTranslation>,
    /// 在途尝试; 其令牌是唯一可被应用的"活令牌"
    live: Option<TranslationAttempt>,
}

impl TranslatorStateMachine {
    /// 创建新的状态机实例
    pub fn new() -> Self {
        Self::with_policy(TranslatorPolicy::default())
    }

    /// 创建新的状态机实例并注入策略
    pub fn with_policy(policy: TranslatorPolicy) -> Self {
        Self {
            state: TranslatorState::LoadingCatalog,
            context: TranslatorContext::default(),
            policy,
        }
    }

    /// 获取当前状态
    pub fn state(&self) -> TranslatorState {
        self.state
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.context.catalog
    }

    pub fn selection(&self) -> Option<&LanguagePair> {
        self.context.selection.as_ref()
    }

    pub fn draft(&self) -> &str {
        &self.context.draft
    }

    pub fn result(&self) -> &str {
        &self.context.result
    }

    /// 等待静默窗口的尝试 (若有)
    pub fn pending(&self) -> Option<&PendingTranslation> {
        self.context.pending.as_ref()
    }

    /// 在途尝试 (若有)
    pub fn live_attempt(&self) -> Option<&TranslationAttempt> {
        self.context.live.as_ref()
    }

    /// 处理事件并返回新状态和动作列表
    ///
    /// 这是状态机的核心方法,实现了纯函数式状态转换。
    pub fn handle_event(
        &mut self,
        event: TranslatorEvent,
        now: DateTime<Utc>,
    ) -> (TranslatorState, Vec<TranslatorAction>) {
        let old_state = self.state;
        let event_debug = format!("{:?}", event);

        let mut actions = self.transition(event, now);

        // 记录状态转换 (用于审计)
        actions.push(TranslatorAction::LogTransition {
            old_state: format!("{:?}", old_state),
            event: event_debug,
            new_state: format!("{:?}", self.state),
        });

        (self.state, actions)
    }

    fn transition(&mut self, event: TranslatorEvent, now: DateTime<Utc>) -> Vec<TranslatorAction> {
        match (self.state, event) {
            // 复制与朗读在任何阶段都可派发 (复制空文本也有效)
            (_, TranslatorEvent::CopyRequested { field }) => self.dispatch_copy(field),
            (_, TranslatorEvent::CopyCompleted { field }) => self.confirm_copy(field),
            (_, TranslatorEvent::SpeakRequested { field }) => self.dispatch_speech(field),

            (TranslatorState::LoadingCatalog, TranslatorEvent::CatalogLoaded { languages }) => {
                self.install_catalog(languages)
            }
            (TranslatorState::LoadingCatalog, TranslatorEvent::CatalogLoadFailed { error }) => {
                self.degrade_catalog(error)
            }

            // 目录未就绪时击键只回显,不调度尝试
            (
                TranslatorState::LoadingCatalog | TranslatorState::CatalogEmpty,
                TranslatorEvent::DraftEdited { text },
            ) => {
                self.context.draft = text;
                vec![TranslatorAction::NoOp]
            }

            (TranslatorState::Ready, TranslatorEvent::DraftEdited { text }) => {
                self.schedule_attempt(text)
            }
            (TranslatorState::Ready, TranslatorEvent::QuiescenceElapsed { generation }) => {
                self.execute_pending(generation, now)
            }
            (TranslatorState::Ready, TranslatorEvent::TranslationSucceeded { token, translated }) => {
                self.apply_response(token, translated)
            }
            (TranslatorState::Ready, TranslatorEvent::TranslationFailed { token, error }) => {
                self.fail_attempt(token, error)
            }
            (TranslatorState::Ready, TranslatorEvent::SourceSelected { id }) => {
                self.select_end(id, SelectionEnd::Source)
            }
            (TranslatorState::Ready, TranslatorEvent::TargetSelected { id }) => {
                self.select_end(id, SelectionEnd::Target)
            }
            (TranslatorState::Ready, TranslatorEvent::SwapRequested) => self.swap(),

            // 其余组合: 目录只填充一次,未就绪时交换/选择/到期都无效
            (_state, _event) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(state = ?_state, event = ?_event, "event ignored in current state");
                vec![TranslatorAction::NoOp]
            }
        }
    }

    fn install_catalog(&mut self, languages: Vec<Language>) -> Vec<TranslatorAction> {
        self.context.catalog = LanguageCatalog::new(languages);
        let mut actions = vec![TranslatorAction::EmitCatalogReady {
            languages: self.context.catalog.languages().to_vec(),
        }];

        if let Some(pair) = LanguagePair::from_catalog(&self.context.catalog) {
            self.state = TranslatorState::Ready;
            actions.push(TranslatorAction::EmitSelectionChanged {
                source: pair.source().clone(),
                target: pair.target().clone(),
            });
            self.context.selection = Some(pair);
        } else {
            self.state = TranslatorState::CatalogEmpty;
        }

        actions
    }

    fn degrade_catalog(&mut self, error: String) -> Vec<TranslatorAction> {
        self.state = TranslatorState::CatalogEmpty;
        vec![TranslatorAction::EmitCatalogUnavailable { error }]
    }

    /// 击键: 立即更新草稿,取消旧窗口,调度新的尝试
    fn schedule_attempt(&mut self, text: String) -> Vec<TranslatorAction> {
        self.context.draft = text;

        let mut actions = Vec::new();
        if self.context.pending.take().is_some() {
            actions.push(TranslatorAction::TraceAttempt {
                token: None,
                phase: AttemptPhase::Cancelled,
            });
        }

        self.context.debounce_generation += 1;
        let generation = self.context.debounce_generation;
        self.context.pending = Some(PendingTranslation::debounced(generation));

        actions.push(TranslatorAction::TraceAttempt {
            token: None,
            phase: AttemptPhase::Scheduled,
        });
        actions.push(TranslatorAction::StartQuiescence {
            generation,
            window_ms: self.policy.debounce_window_ms,
        });
        actions
    }

    /// 窗口到期: 代数匹配才执行; 铸造令牌并捕获执行时刻的草稿与选择
    fn execute_pending(&mut self, generation: u64, now: DateTime<Utc>) -> Vec<TranslatorAction> {
        match &self.context.pending {
            Some(pending) if pending.generation == generation => {}
            // 被取消窗口的迟到到期事件
            _ => return vec![TranslatorAction::NoOp],
        }
        self.context.pending = None;

        let Some(pair) = self.context.selection.as_ref() else {
            return vec![TranslatorAction::NoOp];
        };

        self.context.next_token += 1;
        let token = RequestToken::new(self.context.next_token);
        let attempt = TranslationAttempt::inflight(
            token,
            self.context.draft.clone(),
            pair.source().id.clone(),
            pair.target().id.clone(),
            now,
        );

        let issue = TranslatorAction::IssueTranslation {
            token,
            text: attempt.text.clone(),
            source: attempt.source.clone(),
            target: attempt.target.clone(),
        };
        self.context.live = Some(attempt);

        vec![
            TranslatorAction::TraceAttempt {
                token: Some(token),
                phase: AttemptPhase::Inflight,
            },
            issue,
        ]
    }

    /// 响应到达: 令牌仍为活令牌才应用,否则静默丢弃
    fn apply_response(&mut self, token: RequestToken, translated: String) -> Vec<TranslatorAction> {
        let is_live = self
            .context
            .live
            .as_ref()
            .is_some_and(|attempt| attempt.token == token);
        if !is_live {
            return vec![TranslatorAction::TraceAttempt {
                token: Some(token),
                phase: AttemptPhase::Discarded,
            }];
        }

        self.context.live = None;
        self.context.result = translated.clone();

        vec![
            TranslatorAction::TraceAttempt {
                token: Some(token),
                phase: AttemptPhase::Applied,
            },
            TranslatorAction::EmitResultUpdated {
                token,
                text: translated,
            },
        ]
    }

    /// 失败: 退役活令牌,结果不变; 已被替代的尝试的失败保持静默
    fn fail_attempt(&mut self, token: RequestToken, error: String) -> Vec<TranslatorAction> {
        let is_live = self
            .context
            .live
            .as_ref()
            .is_some_and(|attempt| attempt.token == token);
        if !is_live {
            return vec![TranslatorAction::TraceAttempt {
                token: Some(token),
                phase: AttemptPhase::Discarded,
            }];
        }

        self.context.live = None;
        vec![
            TranslatorAction::TraceAttempt {
                token: Some(token),
                phase: AttemptPhase::Failed,
            },
            TranslatorAction::EmitTranslationFailed { token, error },
        ]
    }

    fn select_end(&mut self, id: LanguageId, end: SelectionEnd) -> Vec<TranslatorAction> {
        // 目录变化后迟到的选择事件必须是无害的空操作
        let Some(language) = self.context.catalog.get(&id).cloned() else {
            return vec![TranslatorAction::NoOp];
        };
        let Some(pair) = self.context.selection.as_ref() else {
            return vec![TranslatorAction::NoOp];
        };

        let updated = match end {
            SelectionEnd::Source => pair.with_source(language),
            SelectionEnd::Target => pair.with_target(language),
        };
        let actions = vec![TranslatorAction::EmitSelectionChanged {
            source: updated.source().clone(),
            target: updated.target().clone(),
        }];
        self.context.selection = Some(updated);
        actions
    }

    /// 交换: 语言对与草稿/结果在同一次转换里一并交换,并退役活令牌,
    /// 使交换前发出的在途尝试无法覆盖交换后的状态
    fn swap(&mut self) -> Vec<TranslatorAction> {
        let Some(pair) = self.context.selection.as_ref() else {
            return vec![TranslatorAction::NoOp];
        };

        let swapped = pair.swapped();
        self.context.selection = Some(swapped.clone());
        mem::swap(&mut self.context.draft, &mut self.context.result);
        self.context.live = None;

        vec![TranslatorAction::EmitSwapped {
            draft: self.context.draft.clone(),
            result: self.context.result.clone(),
            source: swapped.source().clone(),
            target: swapped.target().clone(),
        }]
    }

    fn dispatch_copy(&self, field: TextField) -> Vec<TranslatorAction> {
        vec![TranslatorAction::CopyToClipboard {
            field,
            text: self.field_text(field).to_string(),
        }]
    }

    fn confirm_copy(&self, field: TextField) -> Vec<TranslatorAction> {
        vec![TranslatorAction::EmitCopyConfirmed {
            notification_id: NotificationId::generate(),
            field,
        }]
    }

    fn dispatch_speech(&self, field: TextField) -> Vec<TranslatorAction> {
        let language_tag = self
            .context
            .selection
            .as_ref()
            .map(|pair| pair.target().id.clone());
        vec![TranslatorAction::Speak {
            text: self.field_text(field).to_string(),
            language_tag,
        }]
    }

    fn field_text(&self, field: TextField) -> &str {
        match field {
            TextField::Draft => &self.context.draft,
            TextField::Result => &self.context.result,
        }
    }
}

impl Default for TranslatorStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

enum SelectionEnd {
    Source,
    Target,
}
