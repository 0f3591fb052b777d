pub mod vagas_repo;
pub use vagas_repo::{PgVagasRepositorio, VagasRepositorio};

#[cfg(test)]
pub mod mem_repo;
