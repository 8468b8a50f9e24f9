//! Deterministic mock implementation of the shared `chat_provider` contract.
//!
//! This crate contains no transport logic and is intended for local
//! development runs and contract-level integration testing.

use chat_provider::{BackendFailure, ChatProvider, ProviderProfile};

/// Stable provider identifier used for explicit startup selection.
pub const MOCK_PROVIDER_ID: &str = "mock";

const REPORT_MARKER: &str = "---التقرير الطبي التقديري---";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScriptedOutcome {
    Reply(String),
    Failure(String),
}

/// Deterministic mock provider used by `tabibi` tests and offline runs.
///
/// Replies are served in script order; once the script is exhausted the last
/// entry repeats, so long interactive sessions stay predictable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockProvider {
    script: Vec<ScriptedOutcome>,
    cursor: usize,
}

impl MockProvider {
    /// Creates a mock provider that replies with the given texts in order.
    #[must_use]
    pub fn new(replies: Vec<String>) -> Self {
        Self::from_script(replies.into_iter().map(ScriptedOutcome::Reply).collect())
    }

    /// Creates a mock provider whose every call fails with the given message.
    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_script(vec![ScriptedOutcome::Failure(message.into())])
    }

    /// Creates a mock provider from explicit per-call outcomes.
    #[must_use]
    pub fn with_outcomes(outcomes: Vec<Result<String, String>>) -> Self {
        Self::from_script(
            outcomes
                .into_iter()
                .map(|outcome| match outcome {
                    Ok(reply) => ScriptedOutcome::Reply(reply),
                    Err(message) => ScriptedOutcome::Failure(message),
                })
                .collect(),
        )
    }

    fn from_script(script: Vec<ScriptedOutcome>) -> Self {
        let script = sanitize_script(script);
        Self { script, cursor: 0 }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new(vec![
            "أهلاً بك، أنا أستمع إليك. منذ متى بدأت هذه الأعراض، وهل تزداد سوءاً مع الوقت؟"
                .to_string(),
            "شكراً لمشاركتك هذه التفاصيل. هل تعاني من حرارة مرتفعة أو غثيان أو أي أعراض أخرى مرافقة؟"
                .to_string(),
            format!(
                "{REPORT_MARKER}\nملخص الأعراض: صداع متواصل منذ يومين مع إجهاد عام.\nالاحتمالات المبدئية: صداع توتري أو قلة نوم.\nمستوى الخطورة: منخفضة.\nنصائح العناية: الراحة، شرب السوائل، وتخفيف وقت الشاشات.\nمتى تراجع الطبيب: إذا اشتد الألم فجأة أو استمر أكثر من أسبوع."
            ),
            "أتمنى لك الشفاء العاجل. إن ظهرت أعراض جديدة فأنا هنا للمساعدة في أي وقت.".to_string(),
        ])
    }
}

impl ChatProvider for MockProvider {
    fn profile(&self) -> ProviderProfile {
        ProviderProfile {
            provider_id: MOCK_PROVIDER_ID.to_string(),
            model_id: "mock".to_string(),
        }
    }

    fn send(&mut self, user_text: &str) -> Result<String, BackendFailure> {
        let _ = user_text;

        let index = self.cursor.min(self.script.len() - 1);
        self.cursor += 1;

        match &self.script[index] {
            ScriptedOutcome::Reply(reply) => Ok(reply.clone()),
            ScriptedOutcome::Failure(message) => Err(BackendFailure::new(message.clone())),
        }
    }
}

fn sanitize_script(script: Vec<ScriptedOutcome>) -> Vec<ScriptedOutcome> {
    let mut sanitized: Vec<ScriptedOutcome> = script
        .into_iter()
        .filter(|outcome| match outcome {
            ScriptedOutcome::Reply(reply) => !reply.trim().is_empty(),
            ScriptedOutcome::Failure(_) => true,
        })
        .collect();

    if sanitized.is_empty() {
        sanitized.push(ScriptedOutcome::Reply(
            "هذه محادثة تجريبية. أخبرني بما تشعر به وسأتابع معك خطوة بخطوة.".to_string(),
        ));
    }

    sanitized
}
