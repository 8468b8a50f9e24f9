//! Terminal presentation of the conversation.
//!
//! Rendering is a pure function of `(conversation snapshot, busy flag)`:
//! this module formats strings and nothing else. The terminal emulator owns
//! scrolling, wrapping, and right-to-left shaping of the Arabic text.

use crate::app::{Speaker, Turn};

pub const APP_TITLE: &str = "طبيبي الذكي";
pub const APP_TAGLINE: &str = "نحن معك الآن";
pub const SAFETY_BANNER: &str = "تنبيه: هذا المساعد للتوعية والإرشاد فقط. في حالات الطوارئ الحادة، يرجى التوجه لأقرب مستشفى فوراً.";
pub const INPUT_HINT: &str = "تحدث معي عما تشعر به... (اكتب ‎/help لعرض الأوامر)";

pub const REPORT_HEADING: &str = "التقرير الطبي التقديري";
pub const REPORT_FOOTNOTE: &str = "هذا التقرير تم توليده بواسطة ذكاء اصطناعي ولا يمثل تشخيصاً طبياً معتمداً.";

const USER_LABEL: &str = "أنت";
const ASSISTANT_LABEL: &str = "المساعد";
const TYPING_INDICATOR: &str = "المساعد يكتب...";

const REPORT_RULE_WIDTH: usize = 42;

fn ansi_wrap(text: &str, prefix: &str, suffix: &str) -> String {
    format!("{prefix}{text}{suffix}")
}

fn dim(text: &str) -> String {
    ansi_wrap(text, "\x1b[2m", "\x1b[22m")
}

fn bold(text: &str) -> String {
    ansi_wrap(text, "\x1b[1m", "\x1b[22m")
}

fn blue(text: &str) -> String {
    ansi_wrap(text, "\x1b[34m", "\x1b[39m")
}

fn cyan(text: &str) -> String {
    ansi_wrap(text, "\x1b[36m", "\x1b[39m")
}

fn italic(text: &str) -> String {
    ansi_wrap(text, "\x1b[3m", "\x1b[23m")
}

/// Startup banner: title, liveness tagline, and the fixed safety notice.
pub fn render_banner() -> String {
    format!(
        "{}\n{}\n{}\n",
        bold(&blue(APP_TITLE)),
        dim(APP_TAGLINE),
        dim(SAFETY_BANNER)
    )
}

/// Input hint rendered above the prompt on an idle conversation.
pub fn render_input_hint() -> String {
    dim(INPUT_HINT)
}

/// Busy indicator rendered while one round trip is outstanding.
pub fn render_busy_indicator() -> String {
    dim(TYPING_INDICATOR)
}

/// Formats one turn for terminal output.
pub fn render_turn(turn: &Turn) -> String {
    match turn.speaker {
        Speaker::User => format!("{} {}", bold(&blue(&format!("{USER_LABEL}:"))), turn.text),
        Speaker::Assistant if turn.is_report => render_report(&turn.text),
        Speaker::Assistant => format!("{} {}", bold(&format!("{ASSISTANT_LABEL}:")), turn.text),
        Speaker::System => dim(&turn.text),
    }
}

/// Framed rendering for report turns.
///
/// An empty body still renders the frame: the heading and footnote are the
/// signal, the body is whatever the backend produced.
fn render_report(body: &str) -> String {
    let rule = dim(&"─".repeat(REPORT_RULE_WIDTH));
    let heading = bold(&cyan(REPORT_HEADING));
    let footnote = dim(&italic(REPORT_FOOTNOTE));

    if body.is_empty() {
        format!("{rule}\n{heading}\n{rule}\n{footnote}\n{rule}")
    } else {
        format!("{rule}\n{heading}\n{rule}\n{body}\n{rule}\n{footnote}\n{rule}")
    }
}

#[cfg(test)]
mod tests {
    use crate::app::Turn;

    use super::*;

    #[test]
    fn banner_carries_title_tagline_and_safety_notice() {
        let banner = render_banner();

        assert!(banner.contains(APP_TITLE));
        assert!(banner.contains(APP_TAGLINE));
        assert!(banner.contains(SAFETY_BANNER));
    }

    #[test]
    fn user_turns_are_labeled_with_their_verbatim_text() {
        let rendered = render_turn(&Turn::user("أشعر بألم في رأسي"));

        assert!(rendered.contains("أنت:"));
        assert!(rendered.contains("أشعر بألم في رأسي"));
        assert!(!rendered.contains(REPORT_HEADING));
    }

    #[test]
    fn plain_assistant_turns_do_not_render_the_report_frame() {
        let rendered = render_turn(&Turn::assistant("خذ قسطاً من الراحة", false));

        assert!(rendered.contains("المساعد:"));
        assert!(rendered.contains("خذ قسطاً من الراحة"));
        assert!(!rendered.contains(REPORT_HEADING));
        assert!(!rendered.contains(REPORT_FOOTNOTE));
    }

    #[test]
    fn report_turns_render_heading_body_and_footnote() {
        let rendered = render_turn(&Turn::assistant("ملخص الأعراض: صداع.", true));

        assert!(rendered.contains(REPORT_HEADING));
        assert!(rendered.contains("ملخص الأعراض: صداع."));
        assert!(rendered.contains(REPORT_FOOTNOTE));
    }

    #[test]
    fn empty_bodied_report_still_renders_the_frame() {
        let rendered = render_turn(&Turn::assistant("", true));

        assert!(rendered.contains(REPORT_HEADING));
        assert!(rendered.contains(REPORT_FOOTNOTE));
    }

    #[test]
    fn system_turns_render_dimmed_without_labels() {
        let rendered = render_turn(&Turn::system("تم بدء محادثة جديدة"));

        assert!(rendered.contains("تم بدء محادثة جديدة"));
        assert!(!rendered.contains("أنت:"));
        assert!(!rendered.contains("المساعد:"));
    }
}
