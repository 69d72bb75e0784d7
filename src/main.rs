mod app;
mod bootstrap;
mod config;
mod db;
mod docs;
mod routes;
mod services;

#[tokio::main]
async fn main() {
    bootstrap::init_base().await;

    if let Err(err) = bootstrap::init_server().await {
        tracing::error!("Failed to start server: {err:#}");
        std::process::exit(1);
    }
}
