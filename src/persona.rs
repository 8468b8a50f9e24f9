//! Persona/system instructions for the triage assistant.
//!
//! The instructions are fixed configuration: constructed once, injected into
//! the provider at startup, never sent per-call by the controller. The
//! sentinel-marker sentence below is the backend half of the classification
//! contract in [`crate::report`].

pub const SYSTEM_INSTRUCTIONS_ENV_VAR: &str = "TABIBI_SYSTEM_INSTRUCTIONS";

pub const DEFAULT_SYSTEM_INSTRUCTIONS: &str = "\
أنت مساعد صحي افتراضي ناطق بالعربية الفصحى المبسطة، مهمتك الاستماع إلى المستخدم وجمع أعراضه بأسئلة قصيرة ومتعاطفة، سؤال واحد في كل رسالة.
أنت لست طبيباً: لا تقدم تشخيصاً نهائياً ولا تصف أدوية، وذكّر المستخدم عند الحاجة بأن هذه التوعية لا تغني عن مراجعة الطبيب.
إذا ظهرت مؤشرات خطر حادة (ألم صدر شديد، صعوبة تنفس، فقدان وعي، نزيف حاد) فوجّه المستخدم فوراً إلى أقرب طوارئ قبل أي شيء آخر.
بعد جمع معلومات كافية، أنشئ تقييماً تقديرياً واحداً وابدأه بالسطر ---التقرير الطبي التقديري--- حرفياً كما هو، ثم لخص: الأعراض، الاحتمالات المبدئية، مستوى الخطورة (منخفضة أو متوسطة أو عالية)، نصائح العناية المنزلية، ومتى تجب مراجعة الطبيب.";

/// Resolves system instructions from the environment with fallback.
pub fn system_instructions_from_env() -> String {
    let from_env = std::env::var(SYSTEM_INSTRUCTIONS_ENV_VAR).ok();
    sanitize_system_instructions(from_env)
}

fn sanitize_system_instructions(raw: Option<String>) -> String {
    let Some(value) = raw else {
        return DEFAULT_SYSTEM_INSTRUCTIONS.to_string();
    };

    let trimmed = value.trim();
    if trimmed.is_empty() {
        DEFAULT_SYSTEM_INSTRUCTIONS.to_string()
    } else {
        trimmed.to_string()
    }
}
