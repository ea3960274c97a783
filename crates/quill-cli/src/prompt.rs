//! Line-oriented prompts over any reader/writer pair.

use std::io::{self, BufRead, Write};

use quill_model::Field;
use quill_store::SessionError;
use quill_wizard::{FormOrchestrator, Transition};

use crate::views::{render_auth_errors, render_step};

/// Typed at a field prompt to go back one step.
pub const BACK: &str = ":back";
/// Typed at a field prompt to abandon the editor.
pub const QUIT: &str = ":quit";
/// Typed at a field prompt to clear the field.
pub const CLEAR: &str = ":clear";

/// How many times a sign-in form is asked before giving up.
pub const MAX_FORM_ATTEMPTS: usize = 3;

/// How an interactive wizard run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardOutcome {
    /// The last step validated; the caller should submit.
    Finished,
    Cancelled,
}

enum Answer {
    Value(String),
    Keep,
    Back,
    Quit,
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line. `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask for a value. End of input yields an empty string.
    pub fn ask(&mut self, label: &str) -> io::Result<String> {
        write!(self.output, "{label}: ")?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    /// Ask a yes/no question. Anything but `y`/`yes` is a no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        write!(self.output, "{question} [y/N]: ")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default();
        Ok(matches!(
            answer.trim().to_ascii_lowercase().as_str(),
            "y" | "yes"
        ))
    }

    /// Run `submit` until it is accepted, fails in a way retyping cannot fix,
    /// or [`MAX_FORM_ATTEMPTS`] are used up. Fixable failures are shown
    /// before asking again.
    pub fn resubmit_until_accepted<T>(
        &mut self,
        mut submit: impl FnMut(&mut Self) -> io::Result<Result<T, SessionError>>,
    ) -> io::Result<Result<T, SessionError>> {
        let mut attempt = 1;
        loop {
            match submit(self)? {
                Err(err) if err.is_recoverable() && attempt < MAX_FORM_ATTEMPTS => {
                    if let SessionError::InvalidForm(errors) = &err {
                        write!(self.output, "{}", render_auth_errors(errors))?;
                    }
                    writeln!(self.output, "{}", err.user_message())?;
                    attempt += 1;
                }
                outcome => return Ok(outcome),
            }
        }
    }

    fn ask_field(&mut self, field: Field, current: &str) -> io::Result<Answer> {
        if current.is_empty() {
            write!(self.output, "  {}: ", field.label())?;
        } else {
            write!(self.output, "  {} [{}]: ", field.label(), current)?;
        }
        self.output.flush()?;

        let Some(line) = self.read_line()? else {
            return Ok(Answer::Quit);
        };
        Ok(match line.trim() {
            "" => Answer::Keep,
            BACK => Answer::Back,
            QUIT => Answer::Quit,
            CLEAR => Answer::Value(String::new()),
            _ => Answer::Value(line),
        })
    }

    /// Walk the wizard step by step until the last step validates.
    ///
    /// Pressing enter keeps the value shown in brackets. A blocked step is
    /// shown again with its messages.
    pub fn run_wizard(&mut self, form: &mut FormOrchestrator) -> io::Result<WizardOutcome> {
        loop {
            writeln!(self.output)?;
            write!(self.output, "{}", render_step(form))?;

            let fields = form.current_view().fields();
            let mut moved_back = false;
            for &field in fields {
                let current = form.draft().get(field).to_string();
                match self.ask_field(field, &current)? {
                    Answer::Value(value) => {
                        if let Err(err) = form.input(field, &value) {
                            writeln!(self.output, "  {err}")?;
                        }
                    }
                    Answer::Keep => {}
                    Answer::Back => {
                        form.previous();
                        moved_back = true;
                        break;
                    }
                    Answer::Quit => return Ok(WizardOutcome::Cancelled),
                }
            }
            if moved_back {
                continue;
            }

            if let Transition::Completed { .. } = form.next() {
                return Ok(WizardOutcome::Finished);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::rc::Rc;

    use quill_model::User;
    use quill_persistence::MemoryStorage;
    use quill_store::SessionStore;
    use quill_validate::LoginForm;

    fn run(script: &str, form: &mut FormOrchestrator) -> (WizardOutcome, String) {
        let mut out = Vec::new();
        let outcome = {
            let mut prompter = Prompter::new(Cursor::new(script.as_bytes()), &mut out);
            prompter.run_wizard(form).unwrap()
        };
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn walks_all_steps() {
        let mut form = FormOrchestrator::blog();
        let script = "Hello World\nTech-News\nA description long enough\nrust, go\n\n";

        let (outcome, _) = run(script, &mut form);

        assert_eq!(outcome, WizardOutcome::Finished);
        assert_eq!(form.draft().tags, "rust, go");
        assert_eq!(form.draft().author_name, "");
    }

    #[test]
    fn blocked_step_is_asked_again() {
        let mut form = FormOrchestrator::blog();
        // "Hi" is too short; the step repeats with the category kept.
        let script = "Hi\nNews\nHello World\n\nA description long enough\n\n\n";

        let (outcome, output) = run(script, &mut form);

        assert_eq!(outcome, WizardOutcome::Finished);
        assert!(output.contains("Title must be between 3 and 100 characters"));
        assert_eq!(form.draft().title, "Hello World");
        assert_eq!(form.draft().category, "News");
    }

    #[test]
    fn back_returns_to_previous_step() {
        let mut form = FormOrchestrator::blog();
        let script = "Hello World\nNews\n:back\n\nTech\nA description long enough\n\n\n";

        let (outcome, _) = run(script, &mut form);

        assert_eq!(outcome, WizardOutcome::Finished);
        assert_eq!(form.draft().category, "Tech");
    }

    #[test]
    fn end_of_input_cancels() {
        let mut form = FormOrchestrator::blog();
        let (outcome, _) = run("Hello World\n", &mut form);
        assert_eq!(outcome, WizardOutcome::Cancelled);
    }

    fn demo_sessions() -> SessionStore {
        SessionStore::new(Rc::new(MemoryStorage::new()))
    }

    fn login_attempt<R: BufRead, W: Write>(
        prompter: &mut Prompter<R, W>,
        sessions: &SessionStore,
    ) -> io::Result<Result<User, SessionError>> {
        let form = LoginForm {
            email: prompter.ask("Email")?,
            password: prompter.ask("Password")?,
        };
        Ok(sessions.login(&form))
    }

    #[test]
    fn wrong_password_is_asked_again() {
        let sessions = demo_sessions();
        let mut out = Vec::new();
        let script = "demo@example.com\nwrong-pass\ndemo@example.com\ndemo123\n";
        let user = {
            let mut prompter = Prompter::new(Cursor::new(script.as_bytes()), &mut out);
            prompter
                .resubmit_until_accepted(|p| login_attempt(p, &sessions))
                .unwrap()
                .unwrap()
        };

        assert_eq!(user.email, "demo@example.com");
        let output = String::from_utf8(out).unwrap();
        assert!(output.contains("Invalid email or password"));
    }

    #[test]
    fn attempts_run_out() {
        let sessions = demo_sessions();
        let script = "demo@example.com\nnope-1\n".repeat(MAX_FORM_ATTEMPTS + 1);
        let mut prompter = Prompter::new(Cursor::new(script.into_bytes()), Vec::new());

        let outcome = prompter
            .resubmit_until_accepted(|p| login_attempt(p, &sessions))
            .unwrap();

        assert!(matches!(outcome, Err(SessionError::InvalidCredentials)));
        assert!(!sessions.is_authenticated());
    }

    #[test]
    fn confirm_defaults_to_no() {
        let mut out = Vec::new();
        let mut prompter = Prompter::new(Cursor::new(b"\nyes\n".as_slice()), &mut out);
        assert!(!prompter.confirm("Delete?").unwrap());
        assert!(prompter.confirm("Delete?").unwrap());
    }
}
