use anyhow::Context;
use dashgate::{app, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    app::init_tracing();

    let state = AppState::init().await.context("initialise application state")?;
    app::serve(app::build_app(state)).await
}
