use anyhow::{Context, Result};
use env_logger::Env;
use grompt::Settings;
use grompt_web::{create_router, AppState};
use log::info;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env()?;
    let listener = TcpListener::bind(settings.web_addr.as_str())
        .await
        .with_context(|| format!("failed to bind {}", settings.web_addr))?;
    info!("grompt-web listening on http://{}", listener.local_addr()?);

    let app = create_router(AppState::new(settings));
    axum::serve(listener, app).await?;
    Ok(())
}
