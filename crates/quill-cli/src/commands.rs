//! Command handlers.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow, bail};
use tracing::{debug, info, warn};

use quill_cli::editor::{EditorError, EditorSession};
use quill_cli::logging::redact_value;
use quill_cli::prompt::{Prompter, WizardOutcome};
use quill_cli::settings::Settings;
use quill_cli::views::{
    format_date, render_auth_errors, render_dashboard, render_detail, render_user,
};
use quill_model::{PostId, PostRecord, User};
use quill_persistence::{FileStorage, Storage};
use quill_store::{CollectionStore, DemoApiClient, SessionError, SessionStore};
use quill_validate::{LoginForm, RegisterForm};

use crate::cli::{Cli, Command, DeleteArgs, EditArgs, LoginArgs, PostFields, RegisterArgs};

/// Stores and settings for one invocation.
struct App {
    settings: Settings,
    settings_path: PathBuf,
    data_dir: PathBuf,
    sessions: Rc<SessionStore>,
    posts: CollectionStore,
}

impl App {
    fn open(cli: &Cli) -> Result<Self> {
        let settings_path = cli.settings.clone().unwrap_or_else(Settings::config_path);
        let settings = Settings::load_from(&settings_path);
        let data_dir = settings.data_dir(cli.data_dir.as_deref());
        debug!(data_dir = %data_dir.display(), "Opening data directory");

        let storage: Rc<dyn Storage> = Rc::new(
            FileStorage::open(&data_dir)
                .map_err(|e| anyhow!(e.user_message()))
                .context("Failed to open the data directory")?,
        );
        let sessions = Rc::new(SessionStore::new(storage.clone()));
        sessions
            .restore()
            .map_err(|e| anyhow!(e.user_message()))?;

        let mut posts = CollectionStore::new(sessions.clone(), storage);
        if settings.remote.enabled && !cli.offline {
            match DemoApiClient::new(settings.remote.to_config()) {
                Ok(client) => posts = posts.with_remote(Box::new(client)),
                Err(err) => warn!(error = %err, "Remote posts disabled"),
            }
        }

        Ok(Self {
            settings,
            settings_path,
            data_dir,
            sessions,
            posts,
        })
    }

    fn require_user(&self) -> Result<User> {
        self.sessions
            .current()
            .ok_or_else(|| anyhow!("Not signed in. Run `quill login` first."))
    }

    fn date_format(&self) -> &str {
        &self.settings.display.date_format
    }

    /// Reload posts and find `id` among them.
    fn find_post(&mut self, id: &str) -> Result<PostRecord> {
        let id = PostId::new(id)?;
        self.posts
            .fetch()
            .map_err(|e| anyhow!(e.user_message()))?;
        self.posts
            .lookup(&id)
            .cloned()
            .ok_or_else(|| anyhow!("Post not found: {id}"))
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    let mut app = App::open(cli)?;
    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());

    match &cli.command {
        Command::Register(args) => run_register(&app, args, &mut prompter),
        Command::Login(args) => run_login(&app, args, &mut prompter),
        Command::Logout => run_logout(&app),
        Command::Whoami => run_whoami(&app),
        Command::List => run_list(&mut app),
        Command::Show(post) => run_show(&mut app, &post.id),
        Command::New(fields) => run_new(&mut app, fields, &mut prompter),
        Command::Edit(args) => run_edit(&mut app, args, &mut prompter),
        Command::Delete(args) => run_delete(&mut app, args, &mut prompter),
        Command::Config => run_config(&app),
    }
}

fn report_session_error(error: SessionError) -> anyhow::Error {
    if let SessionError::InvalidForm(errors) = &error {
        eprint!("{}", render_auth_errors(errors));
    }
    anyhow!(error.user_message())
}

fn register_form<R: BufRead, W: Write>(
    args: &RegisterArgs,
    prompter: &mut Prompter<R, W>,
) -> io::Result<RegisterForm> {
    let name = match &args.name {
        Some(name) => name.clone(),
        None => prompter.ask("Name")?,
    };
    let email = match &args.email {
        Some(email) => email.clone(),
        None => prompter.ask("Email")?,
    };
    let (password, confirm_password) = match &args.password {
        Some(password) => (password.clone(), password.clone()),
        None => (prompter.ask("Password")?, prompter.ask("Confirm password")?),
    };
    Ok(RegisterForm {
        name,
        email,
        password,
        confirm_password,
    })
}

fn run_register<R: BufRead, W: Write>(
    app: &App,
    args: &RegisterArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let interactive = args.name.is_none() || args.email.is_none() || args.password.is_none();
    let outcome = if interactive {
        prompter.resubmit_until_accepted(|p| Ok(app.sessions.register(&register_form(args, p)?)))?
    } else {
        app.sessions.register(&register_form(args, prompter)?)
    };
    let user = outcome.map_err(report_session_error)?;
    println!("Welcome, {}!", user.name);
    Ok(())
}

fn login_form<R: BufRead, W: Write>(
    args: &LoginArgs,
    prompter: &mut Prompter<R, W>,
) -> io::Result<LoginForm> {
    let email = match &args.email {
        Some(email) => email.clone(),
        None => prompter.ask("Email")?,
    };
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompter.ask("Password")?,
    };
    Ok(LoginForm { email, password })
}

/// Prompted credentials are asked again after a fixable failure; credentials
/// given as flags fail straight away.
fn run_login<R: BufRead, W: Write>(
    app: &App,
    args: &LoginArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    let interactive = args.email.is_none() || args.password.is_none();
    let outcome = if interactive {
        prompter.resubmit_until_accepted(|p| Ok(app.sessions.login(&login_form(args, p)?)))?
    } else {
        app.sessions.login(&login_form(args, prompter)?)
    };
    let user = outcome.map_err(report_session_error)?;
    println!("Signed in as {}", render_user(&user));
    Ok(())
}

fn run_logout(app: &App) -> Result<()> {
    app.sessions
        .logout()
        .map_err(|e| anyhow!(e.user_message()))?;
    println!("Signed out.");
    Ok(())
}

fn run_whoami(app: &App) -> Result<()> {
    match app.sessions.session() {
        Some(session) => println!(
            "{} since {}",
            render_user(&session.user),
            format_date(&session.started_at, app.date_format())
        ),
        None => println!("Not signed in."),
    }
    Ok(())
}

fn run_list(app: &mut App) -> Result<()> {
    let user = app.require_user()?;
    let posts = app
        .posts
        .fetch()
        .map_err(|e| anyhow!(e.user_message()))?;
    print!("{}", render_dashboard(&user, posts, &app.settings.display.date_format));
    Ok(())
}

fn run_show(app: &mut App, id: &str) -> Result<()> {
    app.require_user()?;
    let post = app.find_post(id)?;
    print!("{}", render_detail(&post, app.date_format()));
    Ok(())
}

fn run_new<R: BufRead, W: Write>(
    app: &mut App,
    fields: &PostFields,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    app.require_user()?;
    let session = EditorSession::create();
    let Some(post) = drive_editor(app, session, fields, prompter)? else {
        return Ok(());
    };
    println!("Created post {}", post.id);
    Ok(())
}

fn run_edit<R: BufRead, W: Write>(
    app: &mut App,
    args: &EditArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    app.require_user()?;
    let existing = app.find_post(&args.post.id)?;
    let session = EditorSession::edit(&existing);
    let Some(post) = drive_editor(app, session, &args.fields, prompter)? else {
        return Ok(());
    };
    println!("Updated post {}", post.id);
    Ok(())
}

/// Run the editor until it saves or the user gives up.
///
/// With field flags the values are applied in one go and a failed submit is
/// an error. Without them the user is walked through the steps, and a failed
/// submit sends them back to the first invalid step.
fn drive_editor<R: BufRead, W: Write>(
    app: &mut App,
    mut session: EditorSession,
    fields: &PostFields,
    prompter: &mut Prompter<R, W>,
) -> Result<Option<PostRecord>> {
    let patch = fields.to_patch();
    let scripted = !patch.is_empty();
    if scripted {
        session.fill(&patch)?;
    }

    loop {
        if !scripted {
            let form = session.form_mut()?;
            if prompter.run_wizard(form)? == WizardOutcome::Cancelled {
                println!("Cancelled; nothing was saved.");
                return Ok(None);
            }
        }

        match session.submit(&mut app.posts) {
            Ok(post) => {
                info!(post_id = %post.id, title = redact_value(&post.title), "Saved post");
                return Ok(Some(post));
            }
            Err(EditorError::Invalid {
                first_invalid_step,
                errors,
            }) => {
                eprintln!("Please fill all required fields correctly (step {first_invalid_step}):");
                for (field, message) in errors.iter() {
                    eprintln!("  {}: {message}", field.label());
                }
                if scripted {
                    bail!("Post was not saved");
                }
            }
            Err(EditorError::Store(err)) => {
                let mut error = anyhow!(err.user_message());
                if let Some(hint) = err.suggestion() {
                    error = error.context(hint);
                }
                return Err(error);
            }
            Err(other) => return Err(other.into()),
        }
    }
}

fn run_delete<R: BufRead, W: Write>(
    app: &mut App,
    args: &DeleteArgs,
    prompter: &mut Prompter<R, W>,
) -> Result<()> {
    app.require_user()?;
    let post = app.find_post(&args.post.id)?;

    if !args.yes {
        let question = format!("Are you sure you want to delete \"{}\"?", post.title);
        if !prompter.confirm(&question)? {
            println!("Kept post {}.", post.id);
            return Ok(());
        }
    }

    app.posts
        .delete(&post.id)
        .map_err(|e| anyhow!(e.user_message()))?;
    println!("Deleted post {}.", post.id);
    Ok(())
}

fn run_config(app: &App) -> Result<()> {
    println!("Settings file: {}", app.settings_path.display());
    println!("Data directory: {}", app.data_dir.display());
    println!();
    let rendered =
        toml::to_string_pretty(&app.settings).context("Failed to render settings")?;
    print!("{rendered}");
    Ok(())
}
