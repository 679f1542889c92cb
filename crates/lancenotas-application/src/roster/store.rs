use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info};

use lancenotas_core::error::Result;
use lancenotas_core::kv::{KeyValueStore, ROSTER_KEY};
use lancenotas_core::turma::{
    DEFAULT_TRIMESTRE, Turma, TurmaDraft, TurmaIdGenerator, filter_turmas, seed_turmas,
};
use lancenotas_infrastructure::StoreCodec;

/// Durable CRUD over the turma collection.
///
/// The whole collection is one persisted value. Mutations persist a new copy
/// first and only then replace the in-memory collection, so a failed write
/// leaves both unchanged.
///
/// Callers check the session before using the store; the store does not.
pub struct RosterStore {
    /// Last collection read from or written to the store
    turmas: Mutex<Option<Vec<Turma>>>,
    ids: TurmaIdGenerator,
    store: Arc<dyn KeyValueStore>,
    codec: StoreCodec,
}

impl RosterStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            turmas: Mutex::new(None),
            ids: TurmaIdGenerator::new(),
            store,
            codec: StoreCodec::new(),
        }
    }

    /// Reads the collection, seeding two demo turmas when none is persisted.
    ///
    /// # Errors
    ///
    /// `CorruptStore` when the persisted value cannot be decoded. The value is
    /// left untouched.
    pub fn load_all(&self) -> Result<Vec<Turma>> {
        let mut cached = self.turmas.lock();
        let turmas = self.read_or_seed()?;
        *cached = Some(turmas.clone());
        Ok(turmas)
    }

    /// Appends a new turma built from `draft` and persists the collection.
    pub fn create(&self, draft: TurmaDraft) -> Result<Turma> {
        let draft = draft.validated()?;

        let mut cached = self.turmas.lock();
        let mut next = match cached.as_ref() {
            Some(turmas) => turmas.clone(),
            None => self.read_or_seed()?,
        };

        let now = now_rfc3339();
        let turma = Turma {
            id: self.ids.next_id(&next),
            professor_id: draft.professor_id,
            nome: draft.nome,
            disciplina: draft.disciplina,
            ano_serie: draft.ano_serie,
            trimestre_atual: DEFAULT_TRIMESTRE,
            alunos_count: 0,
            atividades_count: 0,
            created_at: now.clone(),
            updated_at: now,
        };
        next.push(turma.clone());

        self.persist(&next)?;
        *cached = Some(next);

        info!(turma_id = %turma.id, nome = %turma.nome, "Created turma");
        Ok(turma)
    }

    /// Removes the turma with `id`. Unknown ids are a no-op.
    pub fn delete(&self, id: &str) -> Result<()> {
        let mut cached = self.turmas.lock();
        let current = match cached.as_ref() {
            Some(turmas) => turmas.clone(),
            None => self.read_or_seed()?,
        };

        if !current.iter().any(|t| t.id == id) {
            debug!(turma_id = %id, "Delete of unknown turma ignored");
            *cached = Some(current);
            return Ok(());
        }

        let next: Vec<Turma> = current.into_iter().filter(|t| t.id != id).collect();
        self.persist(&next)?;
        *cached = Some(next);

        info!(turma_id = %id, "Deleted turma");
        Ok(())
    }

    /// Case-insensitive match on `nome` or `disciplina`, keeping order.
    pub fn filter(&self, query: &str, turmas: &[Turma]) -> Vec<Turma> {
        filter_turmas(query, turmas)
    }

    pub fn get(&self, id: &str) -> Result<Option<Turma>> {
        let mut cached = self.turmas.lock();
        if cached.is_none() {
            *cached = Some(self.read_or_seed()?);
        }
        Ok(cached
            .as_ref()
            .and_then(|turmas| turmas.iter().find(|t| t.id == id).cloned()))
    }

    fn read_or_seed(&self) -> Result<Vec<Turma>> {
        match self.store.get(ROSTER_KEY)? {
            Some(bytes) => self.codec.decode_roster(&bytes),
            None => {
                let seeded = seed_turmas(&now_rfc3339());
                self.persist(&seeded)?;
                info!(count = seeded.len(), "Seeded demo roster");
                Ok(seeded)
            }
        }
    }

    fn persist(&self, turmas: &[Turma]) -> Result<()> {
        let bytes = self.codec.encode_roster(turmas)?;
        self.store.set(ROSTER_KEY, &bytes)
    }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
