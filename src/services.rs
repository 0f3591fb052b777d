pub mod geracao_service;
pub use geracao_service::GeracaoService;
pub mod horarios;
pub mod vagas_service;
pub use vagas_service::VagasService;
