use std::io::{self, BufRead, Write};

use chat_provider::ChatProvider;
use tabibi::app::App;
use tabibi::commands::{parse_slash_command, SlashCommand, HELP_TEXT};
use tabibi::persona::system_instructions_from_env;
use tabibi::providers::provider_from_env;
use tabibi::ui;

const DEBUG_ENV_VAR: &str = "TABIBI_DEBUG";

fn main() -> io::Result<()> {
    let instructions = system_instructions_from_env();
    let mut provider = provider_from_env(&instructions).map_err(io::Error::other)?;
    let mut app = App::new();
    let mut rendered = 0usize;

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    write!(stdout, "{}", ui::render_banner())?;
    render_new_turns(&mut stdout, &app, &mut rendered)?;
    writeln!(stdout, "{}", ui::render_input_hint())?;
    stdout.flush()?;

    for line in stdin.lock().lines() {
        let line = line?;

        if let Some(command) = parse_slash_command(&line) {
            match command {
                SlashCommand::Help => app.push_system(HELP_TEXT.to_string()),
                SlashCommand::New => {
                    // Full reset: conversation, session state, and busy flag
                    // are all discarded; nothing survives into the new pair.
                    provider = provider_from_env(&instructions).map_err(io::Error::other)?;
                    app = App::new();
                    rendered = 0;
                    writeln!(stdout)?;
                    write!(stdout, "{}", ui::render_banner())?;
                }
                SlashCommand::Quit => break,
                SlashCommand::Unknown(command) => {
                    app.push_system(format!("أمر غير معروف: {command}"));
                }
            }
        } else if let Some(prompt) = app.on_submit(&line) {
            render_new_turns(&mut stdout, &app, &mut rendered)?;
            writeln!(stdout, "{}", ui::render_busy_indicator())?;
            stdout.flush()?;

            match provider.send(&prompt) {
                Ok(reply) => app.on_reply(&reply),
                Err(failure) => {
                    if debug_enabled() {
                        eprintln!("backend failure: {failure}");
                    }
                    app.on_backend_failure();
                }
            }
        }

        render_new_turns(&mut stdout, &app, &mut rendered)?;
    }

    Ok(())
}

fn render_new_turns(
    stdout: &mut impl Write,
    app: &App,
    rendered: &mut usize,
) -> io::Result<()> {
    for turn in &app.conversation()[*rendered..] {
        writeln!(stdout, "{}", ui::render_turn(turn))?;
    }
    *rendered = app.conversation().len();
    stdout.flush()
}

fn debug_enabled() -> bool {
    std::env::var(DEBUG_ENV_VAR)
        .map(|value| value == "1")
        .unwrap_or(false)
}
