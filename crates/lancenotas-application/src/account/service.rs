use std::sync::Arc;

use parking_lot::Mutex;
use tracing::info;

use lancenotas_core::auth::{NewProfessor, UserDirectory};
use lancenotas_core::error::Result;
use lancenotas_core::kv::{ACCOUNTS_KEY, KeyValueStore};
use lancenotas_core::professor::Professor;
use lancenotas_infrastructure::StoreCodec;

/// Reads and extends the accounts `/api/login` checks against.
///
/// The accounts are one persisted value. When none is persisted the demo
/// account is written as the seed.
pub struct AccountService {
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
    store: Arc<dyn KeyValueStore>,
    codec: StoreCodec,
}

impl AccountService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            write_lock: Mutex::new(()),
            store,
            codec: StoreCodec::new(),
        }
    }

    /// Loads every account into a [`UserDirectory`].
    ///
    /// # Errors
    ///
    /// `CorruptStore` when the persisted value cannot be decoded. The value is
    /// left untouched.
    pub fn load_directory(&self) -> Result<UserDirectory> {
        match self.store.get(ACCOUNTS_KEY)? {
            Some(bytes) => Ok(UserDirectory::from_accounts(
                self.codec.decode_accounts(&bytes)?,
            )),
            None => {
                let _guard = self.write_lock.lock();
                let seeded = UserDirectory::with_demo_account()?;
                self.persist(&seeded)?;
                info!("Seeded demo account");
                Ok(seeded)
            }
        }
    }

    /// Registers a professor and persists the accounts.
    ///
    /// # Errors
    ///
    /// `Validation` when a field is blank or the email is taken. Nothing is
    /// written in that case.
    pub fn create_professor(&self, new: NewProfessor) -> Result<Professor> {
        let _guard = self.write_lock.lock();
        let mut directory = match self.store.get(ACCOUNTS_KEY)? {
            Some(bytes) => UserDirectory::from_accounts(self.codec.decode_accounts(&bytes)?),
            None => UserDirectory::with_demo_account()?,
        };

        let professor = directory.register(new)?;
        self.persist(&directory)?;

        info!(professor_id = %professor.id, email = %professor.email, "Created professor");
        Ok(professor)
    }

    fn persist(&self, directory: &UserDirectory) -> Result<()> {
        let bytes = self.codec.encode_accounts(&directory.to_accounts())?;
        self.store.set(ACCOUNTS_KEY, &bytes)
    }
}
