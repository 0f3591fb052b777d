//src/main.rs

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::AppState;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // O mesmo binário atende o agendador: `motopro-backend gerar-vagas-fixas`
    // roda a geração diária de vagas e sai, no lugar de subir o servidor.
    match std::env::args().nth(1).as_deref() {
        Some("gerar-vagas-fixas") => gerar_vagas_fixas(&app_state).await,
        Some(comando) => {
            eprintln!("Comando desconhecido: {comando}");
            std::process::exit(2);
        }
        None => servir(app_state).await,
    }
}

/// Comando agendado de geração de vagas fixas. "Hoje" vem do relógio local e
/// o progresso sai linha a linha em stdout; falha de um contrato não
/// interrompe a execução.
async fn gerar_vagas_fixas(app_state: &AppState) {
    let hoje = chrono::Local::now().date_naive();

    match app_state.geracao_service.executar(hoje).await {
        Ok(relatorio) => {
            for linha in &relatorio.linhas {
                println!("{linha}");
            }
            tracing::info!(
                "Geração concluída: {} vaga(s) criada(s).",
                relatorio.vagas_criadas_total()
            );
        }
        Err(erro) => {
            eprintln!("Falha na geração de vagas fixas: {erro}");
            std::process::exit(1);
        }
    }
}

async fn servir(app_state: AppState) {
    // Rotas do desktop (mesmos caminhos que o cliente Electron já usa)
    let vagas_routes = Router::new()
        .route(
            "/motoboy-vaga/gerar-vagas-extras/",
            post(handlers::vagas::gerar_vagas_extras),
        )
        .route(
            "/vagas/{vaga_id}/fechar-e-candidatar/",
            post(handlers::vagas::fechar_e_candidatar),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/v1/desktop", vagas_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
