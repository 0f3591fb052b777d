// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::vagas::gerar_vagas_extras,
        handlers::vagas::fechar_e_candidatar,
    ),
    components(
        schemas(
            // --- Vagas ---
            models::vagas::TipoVaga,
            models::vagas::StatusVaga,
            models::vagas::StatusCandidatura,
            models::vagas::Turno,
            models::vagas::Vaga,
            models::vagas::VagaCriada,
            models::vagas::ContratoVigente,
            models::vagas::Motoboy,
            models::vagas::Candidatura,

            // --- Payloads ---
            models::vagas::GerarVagasExtrasPayload,
            handlers::vagas::GerarVagasExtrasResponse,
            handlers::vagas::FecharECandidatarResponse,
        )
    ),
    tags(
        (name = "Vagas", description = "Geração e encerramento de vagas de motoboys")
    )
)]
pub struct ApiDoc;
