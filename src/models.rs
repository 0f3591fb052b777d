pub mod vagas;
