pub mod auth;
pub mod professor;
pub mod serve;
pub mod turmas;
