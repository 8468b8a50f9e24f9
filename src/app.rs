//! Conversation controller and message store.
//!
//! `App` owns the ordered turn list and the single busy/idle flag that
//! serializes backend round trips. Submission is split into an explicit
//! two-phase transition: `on_submit` guards and records the user turn, then
//! exactly one of `on_reply`/`on_backend_failure` closes the round trip.
//! Providers and rendering live elsewhere; this module never performs I/O.

use crate::report::classify;

/// Fixed greeting seeded as the first assistant turn of every conversation.
pub const GREETING: &str = "أهلاً بك. أنا مساعدك الصحي الذكي، وأنا هنا لأستمع إليك وأساعدك في فهم ما تشعر به. سلامتك هي أولويتنا. من فضلك، ما هي المشكلة الصحية أو الأعراض التي تشغل بالك حالياً؟";

/// Fixed reply shown when the backend round trip fails.
pub const FALLBACK_REPLY: &str = "أعتذر منك، حدث خطأ تقني غير متوقع. يهمنا أن تكون بخير، يرجى المحاولة مرة أخرى.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Idle,
    AwaitingResponse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
    System,
}

/// One message in the conversation, immutable once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub text: String,
    pub is_report: bool,
}

impl Turn {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
            is_report: false,
        }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>, is_report: bool) -> Self {
        Self {
            speaker: Speaker::Assistant,
            text: text.into(),
            is_report,
        }
    }

    #[must_use]
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::System,
            text: text.into(),
            is_report: false,
        }
    }
}

/// Conversation controller for one session.
///
/// There is no partial reset: "new conversation" discards the whole `App`
/// (together with its provider) and constructs a fresh pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    mode: Mode,
    conversation: Vec<Turn>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            conversation: vec![Turn::assistant(GREETING, false)],
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns true exactly while one backend round trip is outstanding.
    pub fn is_busy(&self) -> bool {
        self.mode == Mode::AwaitingResponse
    }

    /// Returns the conversation turns in display order.
    pub fn conversation(&self) -> &[Turn] {
        &self.conversation
    }

    /// Starts one round trip: records the user turn and enters the busy state.
    ///
    /// Returns the text to hand to the provider, or `None` (with no state
    /// change at all) when the input is blank or a round trip is already
    /// outstanding. Re-entrant submissions are rejected, never queued.
    pub fn on_submit(&mut self, input: &str) -> Option<String> {
        if input.trim().is_empty() || self.is_busy() {
            return None;
        }

        self.conversation.push(Turn::user(input));
        self.mode = Mode::AwaitingResponse;
        Some(input.to_string())
    }

    /// Completes the outstanding round trip with the raw assistant reply.
    pub fn on_reply(&mut self, raw: &str) {
        if !self.is_busy() {
            return;
        }

        let classification = classify(raw);
        self.conversation
            .push(Turn::assistant(classification.text, classification.is_report));
        self.mode = Mode::Idle;
    }

    /// Completes the outstanding round trip after a backend failure.
    ///
    /// The error itself never reaches the conversation; the user sees only
    /// the fixed fallback turn, and the busy flag always clears.
    pub fn on_backend_failure(&mut self) {
        if !self.is_busy() {
            return;
        }

        self.conversation.push(Turn::assistant(FALLBACK_REPLY, false));
        self.mode = Mode::Idle;
    }

    /// Appends a local notice turn without touching control state.
    ///
    /// System turns never reach the backend; they exist for command feedback.
    pub fn push_system(&mut self, text: impl Into<String>) {
        self.conversation.push(Turn::system(text));
    }
}
