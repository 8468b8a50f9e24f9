use chat_provider::ChatProvider;
use chat_provider_mock::MockProvider;
use tabibi::app::{App, Mode, Speaker, Turn, FALLBACK_REPLY, GREETING};
use tabibi::report::REPORT_MARKER;

/// Drives one submission the way the binary's main loop does: begin the
/// round trip, block on the provider, close it with the matching transition.
fn drive(app: &mut App, provider: &mut dyn ChatProvider, input: &str) {
    if let Some(prompt) = app.on_submit(input) {
        match provider.send(&prompt) {
            Ok(reply) => app.on_reply(&reply),
            Err(_failure) => app.on_backend_failure(),
        }
    }
}

#[test]
fn scripted_conversation_reaches_a_classified_report_turn() {
    let mut provider = MockProvider::new(vec![
        "منذ متى بدأ الصداع؟".to_string(),
        format!("{REPORT_MARKER}\nملخص الأعراض: صداع نصفي.\nمستوى الخطورة: منخفضة."),
    ]);
    let mut app = App::new();

    drive(&mut app, &mut provider, "أعاني من صداع");
    drive(&mut app, &mut provider, "منذ يومين تقريباً");

    let turns = app.conversation();
    assert_eq!(turns.len(), 5);
    assert_eq!(turns[0], Turn::assistant(GREETING, false));
    assert_eq!(turns[1], Turn::user("أعاني من صداع"));
    assert_eq!(turns[2], Turn::assistant("منذ متى بدأ الصداع؟", false));
    assert_eq!(turns[3], Turn::user("منذ يومين تقريباً"));

    let report = &turns[4];
    assert_eq!(report.speaker, Speaker::Assistant);
    assert!(report.is_report);
    assert!(!report.text.contains(REPORT_MARKER));
    assert!(report.text.contains("ملخص الأعراض"));
    assert_eq!(app.mode(), Mode::Idle);
}

#[test]
fn provider_failure_becomes_the_fixed_fallback_turn() {
    let mut provider = MockProvider::failing("scripted outage");
    let mut app = App::new();

    drive(&mut app, &mut provider, "هل هذا خطير؟");

    assert_eq!(
        app.conversation().last(),
        Some(&Turn::assistant(FALLBACK_REPLY, false))
    );
    assert_eq!(app.mode(), Mode::Idle);
}

#[test]
fn conversation_recovers_after_a_failed_round_trip() {
    let mut provider = MockProvider::with_outcomes(vec![
        Err("انقطاع مؤقت".to_string()),
        Ok("أهلاً، كيف أستطيع مساعدتك؟".to_string()),
    ]);
    let mut app = App::new();

    drive(&mut app, &mut provider, "مرحبا");
    drive(&mut app, &mut provider, "ما زلت أنتظر");

    let turns = app.conversation();
    assert_eq!(turns[2], Turn::assistant(FALLBACK_REPLY, false));
    assert_eq!(
        turns.last(),
        Some(&Turn::assistant("أهلاً، كيف أستطيع مساعدتك؟", false))
    );
    assert_eq!(app.mode(), Mode::Idle);
}

#[test]
fn default_mock_script_walks_intake_to_report() {
    let mut provider = MockProvider::default();
    let mut app = App::new();

    for input in ["أشعر بصداع", "منذ يومين", "لا توجد أعراض أخرى"] {
        drive(&mut app, &mut provider, input);
    }

    assert!(app
        .conversation()
        .iter()
        .any(|turn| turn.is_report && turn.speaker == Speaker::Assistant));
    assert_eq!(app.mode(), Mode::Idle);
}

#[test]
fn new_conversation_gets_a_fresh_provider_and_greeting() {
    let mut provider = MockProvider::new(vec!["الرد الأول".to_string()]);
    let mut app = App::new();
    drive(&mut app, &mut provider, "مرحبا");
    assert_eq!(app.conversation().len(), 3);

    // The /new action rebuilds the (controller, provider) pair wholesale.
    let mut provider = MockProvider::new(vec!["الرد الأول".to_string()]);
    let mut app = App::new();

    assert_eq!(app.conversation(), &[Turn::assistant(GREETING, false)]);
    drive(&mut app, &mut provider, "مرحبا من جديد");
    assert_eq!(
        app.conversation().last(),
        Some(&Turn::assistant("الرد الأول", false))
    );
}
