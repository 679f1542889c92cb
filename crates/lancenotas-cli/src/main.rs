use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod app;
mod commands;
mod logging;

use app::App;

#[derive(Parser)]
#[command(name = "lancenotas")]
#[command(about = "Lancenotas - turmas e sessão do professor", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the session, roster and account files
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the login endpoint
    Serve {
        /// Address to listen on (overrides config)
        #[arg(long)]
        bind: Option<String>,
    },
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Check credentials against the locally stored accounts instead of the server
        #[arg(long)]
        offline: bool,
    },
    /// Forget the current session
    Logout,
    /// Show the logged-in professor
    Whoami,
    /// Manage turmas
    Turmas {
        #[command(subcommand)]
        action: TurmasAction,
    },
    /// Manage professor accounts
    Professor {
        #[command(subcommand)]
        action: ProfessorAction,
    },
}

#[derive(Subcommand)]
enum ProfessorAction {
    /// Create a professor account
    Create {
        /// Nome do professor
        #[arg(long)]
        nome: String,
        /// Email do professor
        #[arg(long)]
        email: String,
        /// Senha em texto (será hasheada)
        #[arg(long)]
        senha: String,
        #[arg(long)]
        escola: Option<String>,
    },
}

#[derive(Subcommand)]
enum TurmasAction {
    /// List turmas, optionally filtered by name or subject
    List {
        #[arg(long, short)]
        query: Option<String>,
    },
    /// Show one turma
    Show { id: String },
    /// Create a turma
    Create {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        disciplina: Option<String>,
        #[arg(long)]
        ano_serie: Option<String>,
    },
    /// Delete a turma
    Delete { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let app = App::load(cli.config, cli.data_dir)?;
    logging::init(&app.config().logging.level, cli.verbose);
    tracing::debug!(data_dir = %app.data_dir().display(), "Using data directory");

    match cli.command {
        Commands::Serve { bind } => commands::serve::run(&app, bind).await?,
        Commands::Login {
            email,
            password,
            offline,
        } => commands::auth::login(&app, &email, &password, offline).await?,
        Commands::Logout => commands::auth::logout(&app)?,
        Commands::Whoami => commands::auth::whoami(&app)?,
        Commands::Turmas { action } => match action {
            TurmasAction::List { query } => commands::turmas::list(&app, query.as_deref())?,
            TurmasAction::Show { id } => commands::turmas::show(&app, &id)?,
            TurmasAction::Create {
                nome,
                disciplina,
                ano_serie,
            } => commands::turmas::create(&app, nome, disciplina, ano_serie)?,
            TurmasAction::Delete { id } => commands::turmas::delete(&app, &id)?,
        },
        Commands::Professor { action } => match action {
            ProfessorAction::Create {
                nome,
                email,
                senha,
                escola,
            } => commands::professor::create(&app, nome, email, senha, escola)?,
        },
    }

    Ok(())
}
