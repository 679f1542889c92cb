use anyhow::{Context, Result, anyhow, bail};
use colored::Colorize;

use lancenotas_core::professor::Professor;
use lancenotas_core::turma::{Turma, TurmaDraft};

use crate::app::App;

/// Roster commands run only for a logged-in professor.
fn require_professor(app: &App) -> Result<Professor> {
    app.restored_session()
        .current()
        .ok_or_else(|| anyhow!("Nenhuma sessão ativa. Use `lancenotas login` primeiro."))
}

pub fn list(app: &App, query: Option<&str>) -> Result<()> {
    require_professor(app)?;
    let roster = app.roster();
    let turmas = roster.load_all().context("Failed to load turmas")?;
    let shown = roster.filter(query.unwrap_or(""), &turmas);

    if shown.is_empty() {
        println!("{}", "Nenhuma turma encontrada.".yellow());
        return Ok(());
    }

    for turma in &shown {
        println!(
            "{}  {}  {}",
            turma.id.dimmed(),
            turma.nome.bold(),
            format!(
                "{} alunos · {} atividades",
                turma.alunos_count, turma.atividades_count
            )
            .cyan()
        );
    }
    Ok(())
}

pub fn show(app: &App, id: &str) -> Result<()> {
    require_professor(app)?;
    let Some(turma) = app.roster().get(id)? else {
        bail!("Turma '{}' não encontrada", id);
    };
    print_turma(&turma);
    Ok(())
}

pub fn create(
    app: &App,
    nome: String,
    disciplina: Option<String>,
    ano_serie: Option<String>,
) -> Result<()> {
    let professor = require_professor(app)?;

    let mut draft = TurmaDraft::new(nome).with_professor_id(professor.id);
    if let Some(disciplina) = disciplina {
        draft = draft.with_disciplina(disciplina);
    }
    if let Some(ano_serie) = ano_serie {
        draft = draft.with_ano_serie(ano_serie);
    }

    let turma = app.roster().create(draft).map_err(|e| {
        if e.is_validation() {
            anyhow!(e.user_message())
        } else {
            anyhow::Error::new(e).context("Failed to create turma")
        }
    })?;

    println!("{}", format!("✅ Turma criada: {}", turma.nome).green());
    print_turma(&turma);
    Ok(())
}

pub fn delete(app: &App, id: &str) -> Result<()> {
    require_professor(app)?;
    app.roster().delete(id).context("Failed to delete turma")?;
    println!("{}", format!("🗑️  Turma {} removida", id).green());
    Ok(())
}

fn print_turma(turma: &Turma) {
    println!("  {} {}", "ID:".bold(), turma.id);
    println!("  {} {}", "Nome:".bold(), turma.nome);
    if let Some(disciplina) = &turma.disciplina {
        println!("  {} {}", "Disciplina:".bold(), disciplina);
    }
    if let Some(ano_serie) = &turma.ano_serie {
        println!("  {} {}", "Ano/Série:".bold(), ano_serie);
    }
    println!("  {} {}º", "Trimestre:".bold(), turma.trimestre_atual);
    println!("  {} {}", "Alunos:".bold(), turma.alunos_count);
    println!("  {} {}", "Atividades:".bold(), turma.atividades_count);
    println!("  {} {}", "Criada em:".bold(), turma.created_at);
}
