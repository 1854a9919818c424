use dashgate::{
    app, db,
    seed::{self, SeedOutcome, SeedSettings},
    users::repo::PgUserStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    app::init_tracing();

    let settings = SeedSettings::from_env()?;
    let pool = db::connect(&settings.database_url).await?;
    db::migrate(&pool).await?;
    let users = PgUserStore::new(pool);

    match seed::ensure_admin(
        &users,
        &settings.email,
        &settings.password,
        seed::DEFAULT_ADMIN_NAME,
    )
    .await?
    {
        SeedOutcome::Created(user) => println!("created admin {} ({})", user.email, user.id),
        SeedOutcome::AlreadyExists => println!("admin {} already exists", settings.email),
    }
    Ok(())
}
