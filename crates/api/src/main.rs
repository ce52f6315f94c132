use std::sync::Arc;

use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    visio_observability::init();

    let services = Arc::new(visio_api::app::services::build_services());

    if std::env::var_os("VISIO_SEED").is_some() {
        if let Err(e) = visio_infra::seed_demo_data(
            &services.products,
            &services.customers,
            &services.employees,
        ) {
            tracing::warn!(error = %e, "failed to seed demo data");
        }
    }

    let app = visio_api::app::build_app(services);

    let addr = std::env::var("VISIO_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr().context("no local address")?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
