//! Geoflip CLI - account actions against the Geoflip API
//!
//! # Account Commands
//!
//! ```bash
//! geoflip signup --first-name Ada --last-name Lovelace --email ada@example.com \
//!     --password ... --confirm-password ... --accept-terms
//! geoflip login ada@example.com --password ...   # Sign in, session saved to .geoflip/
//! geoflip forgot-password ada@example.com        # Email a reset code
//! geoflip reset-password --email ... --password ... --confirm-password ... --code 123456
//! geoflip verify 123456                          # Confirm the email address
//! geoflip resend-code                            # New verification code
//! geoflip refresh                                # Refresh the access token
//! geoflip logout
//! geoflip whoami
//! ```
//!
//! # Session Commands
//!
//! ```bash
//! geoflip exports --add "Parcels,GeoJSON,task-1" --remove 0
//! ```

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use geoflip_client::actions::LOGIN_ROUTE;
use geoflip_client::auth::{self, HOME_ROUTE};
use geoflip_client::config::parse_timeout;
use geoflip_client::session::DEFAULT_SESSION_FILE;
use geoflip_client::{
    ClientConfig, FileSessionStore, ForgotPasswordForm, FormSubmitter, FormView, LoginForm, Notification,
    ReqwestTransport, ResendVerificationForm, ResetPasswordForm, Session, SignupForm, VerifyForm,
};

type CmdResult = Result<bool, Box<dyn Error>>;

#[derive(Parser)]
#[command(name = "geoflip")]
#[command(about = "Geoflip account actions from the terminal", long_about = None)]
struct Cli {
    /// API base URL (overrides GEOFLIP_API_URL)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Session file
    #[arg(long, global = true, default_value = DEFAULT_SESSION_FILE)]
    session_file: PathBuf,

    /// Ignore a submission while another one is still running
    #[arg(long, global = true)]
    guard_in_flight: bool,

    /// Request timeout in seconds (overrides GEOFLIP_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Signup {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "GEOFLIP_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        /// Agree to the terms of service and privacy policy
        #[arg(long)]
        accept_terms: bool,
    },

    /// Sign in with email and password
    Login {
        email: String,

        #[arg(long, env = "GEOFLIP_PASSWORD", hide_env_values = true)]
        password: String,

        /// Do not keep the session after this command
        #[arg(long)]
        no_remember: bool,
    },

    /// Email a password-reset code
    ForgotPassword { email: String },

    /// Set a new password with the emailed code
    ResetPassword {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        /// One-time code from the reset email
        #[arg(long)]
        code: String,
    },

    /// Confirm the email address with the emailed code
    Verify { code: String },

    /// Send a new verification code
    ResendCode,

    /// Refresh the access token
    Refresh,

    /// End the session
    Logout,

    /// Show the logged-in user
    Whoami,

    /// Edit a scratch export list and print it
    Exports {
        /// Job to append, as NAME,FORMAT,TASK_ID
        #[arg(long)]
        add: Vec<String>,

        /// Index to remove, applied after the adds
        #[arg(long)]
        remove: Vec<usize>,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before clap and the logger read the environment
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn run(cli: Cli) -> CmdResult {
    let store = FileSessionStore::new(&cli.session_file);

    let config = build_config(&cli)?;
    log::debug!("Using API at {}", config.api_url());
    let submitter = FormSubmitter::new(ReqwestTransport::new(config.timeout)?, config);
    let session = Session::restore(&store);
    let view = TerminalView;

    match cli.command {
        Commands::Signup {
            first_name,
            last_name,
            email,
            password,
            confirm_password,
            accept_terms,
        } => {
            let form = SignupForm {
                first_name,
                last_name,
                email,
                password,
                confirm_password,
                accept_terms,
            };
            Ok(submitter.submit(&form, None, &view).await.is_success())
        }

        Commands::Login {
            email,
            password,
            no_remember,
        } => {
            let form = LoginForm { email, password };
            let result = auth::login(&submitter, &form, &session, &view).await;
            if result.is_success() && !no_remember {
                session.persist(&store)?;
                eprintln!("💾 Session saved to: {}", store.path().display());
            }
            Ok(result.is_success())
        }

        Commands::ForgotPassword { email } => {
            let form = ForgotPasswordForm { email };
            Ok(submitter.submit(&form, None, &view).await.is_success())
        }

        Commands::ResetPassword {
            email,
            password,
            confirm_password,
            code,
        } => {
            let form = ResetPasswordForm {
                email,
                password,
                confirm_password,
                code,
            };
            Ok(submitter.submit(&form, None, &view).await.is_success())
        }

        Commands::Verify { code } => {
            let token = session.token();
            let result = auth::verify(&submitter, &VerifyForm { code }, token.as_deref(), &session, &view).await;
            if result.is_success() {
                session.persist(&store)?;
            }
            Ok(result.is_success())
        }

        Commands::ResendCode => {
            let token = session.token();
            Ok(submitter
                .submit(&ResendVerificationForm, token.as_deref(), &view)
                .await
                .is_success())
        }

        Commands::Refresh => {
            let Some(token) = session.token() else {
                return Ok(not_logged_in());
            };
            let result = auth::refresh_token(&submitter, &token, &session).await;
            if result.is_success() {
                session.persist(&store)?;
                eprintln!("🔄 Token refreshed");
            } else {
                eprintln!("❌ {}", result.message);
            }
            Ok(result.is_success())
        }

        Commands::Logout => {
            let Some(token) = session.token() else {
                return Ok(not_logged_in());
            };
            let result = auth::logout(&submitter, &token, &session, &view).await;
            session.persist(&store)?;
            Ok(result.is_success())
        }

        Commands::Whoami => cmd_whoami(&session),

        Commands::Exports { add, remove } => cmd_exports(&add, &remove),
    }
}

/// Environment first, then command-line overrides.
fn build_config(cli: &Cli) -> Result<ClientConfig, Box<dyn Error>> {
    let mut config = ClientConfig::from_env()?;

    if let Some(url) = &cli.api_url {
        config = ClientConfig::new(url.as_str())?
            .with_guard_in_flight(config.guard_in_flight)
            .with_timeout(config.timeout);
    }
    if cli.guard_in_flight {
        config.guard_in_flight = true;
    }
    if let Some(secs) = &cli.timeout_secs {
        config.timeout = parse_timeout(secs)?;
    }

    Ok(config)
}

fn not_logged_in() -> bool {
    eprintln!("🔒 Not logged in.");
    eprintln!("   Use 'geoflip login <email>' first.");
    false
}

fn cmd_whoami(session: &Session) -> CmdResult {
    let state = session.auth_state();
    let Some(user) = state.user.as_ref().filter(|_| state.is_authenticated) else {
        return Ok(not_logged_in());
    };

    eprintln!("👤 {}", user.email);
    eprintln!("   Verified: {}", if user.is_verified { "yes" } else { "no" });
    if let Some(expiry) = state.expiry {
        eprintln!("   Token expires: {}", expiry.to_rfc3339());
    }

    println!("{}", serde_json::to_string_pretty(user)?);
    Ok(true)
}

fn cmd_exports(add: &[String], remove: &[usize]) -> CmdResult {
    let session = Session::start();

    for spec in add {
        let parts: Vec<&str> = spec.splitn(3, ',').map(str::trim).collect();
        let [name, format, task_id] = parts.as_slice() else {
            return Err(format!("Invalid export '{}': expected NAME,FORMAT,TASK_ID", spec).into());
        };
        session.add_export(*name, *format, *task_id);
    }
    for &index in remove {
        let job = session.remove_export(index)?;
        eprintln!("🗑️  Removed: {} ({})", job.name, job.task_id);
    }

    let jobs = session.exports();
    eprintln!("📦 {} export jobs", jobs.len());
    println!("{}", serde_json::to_string_pretty(&jobs)?);
    Ok(true)
}

// =============================================================================
// Terminal view
// =============================================================================

/// Prints pipeline feedback to stderr.
struct TerminalView;

impl FormView for TerminalView {
    fn set_loading(&self, loading: bool) {
        if loading {
            eprintln!("⏳ Contacting Geoflip...");
        }
    }

    fn notify(&self, notification: Notification) {
        eprintln!("{} {}", notification.severity.emoji(), notification.message);
    }

    fn navigate(&self, route: &str) {
        let hint = match route {
            LOGIN_ROUTE => "geoflip login <email>",
            HOME_ROUTE => "geoflip whoami",
            _ => return,
        };
        eprintln!("➡️  Next: {}", hint);
    }
}
