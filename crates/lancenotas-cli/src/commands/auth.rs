use anyhow::{Result, anyhow};
use colored::Colorize;

use lancenotas_core::auth::{MSG_LOGIN_OK, MSG_LOGOUT_OK};
use lancenotas_core::professor::Professor;

use crate::app::App;

pub async fn login(app: &App, email: &str, password: &str, offline: bool) -> Result<()> {
    let session = app.session(app.verifier(offline)?);

    match session.login(email, password).await {
        Ok(professor) => {
            println!("{}", format!("✅ {}", MSG_LOGIN_OK).green());
            print_professor(&professor);
            Ok(())
        }
        Err(e) if e.is_authentication() || e.is_unavailable() => {
            Err(anyhow!(e.user_message()))
        }
        Err(e) => Err(e.into()),
    }
}

pub fn logout(app: &App) -> Result<()> {
    app.restored_session().logout()?;
    println!("{}", format!("👋 {}", MSG_LOGOUT_OK).green());
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    match app.restored_session().current() {
        Some(professor) => print_professor(&professor),
        None => println!("{}", "Nenhuma sessão ativa.".yellow()),
    }
    Ok(())
}

fn print_professor(professor: &Professor) {
    println!("  {} {}", "Professor:".bold(), professor.nome);
    println!("  {} {}", "Email:".bold(), professor.email);
    if let Some(escola) = &professor.escola {
        println!("  {} {}", "Escola:".bold(), escola);
    }
}
