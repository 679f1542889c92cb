use anyhow::{Result, anyhow};
use colored::Colorize;

use lancenotas_core::auth::NewProfessor;

use crate::app::App;

pub fn create(
    app: &App,
    nome: String,
    email: String,
    senha: String,
    escola: Option<String>,
) -> Result<()> {
    let new = NewProfessor {
        nome,
        email,
        password: senha,
        escola,
    };

    match app.accounts().create_professor(new) {
        Ok(professor) => {
            println!(
                "{}",
                format!("✅ Professor criado: {} (id={})", professor.email, professor.id).green()
            );
            Ok(())
        }
        Err(e) if e.is_validation() => Err(anyhow!(e.user_message())),
        Err(e) => Err(e.into()),
    }
}
