//! Login account persistence.

mod service;

pub use service::AccountService;
