use rocket_db_pools::{Database, sqlx};

#[derive(Database)]
#[database("agency_db")]
pub struct AgencyDb(sqlx::PgPool);

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Apply embedded migrations. Called from an ignite fairing at startup and
/// from the test database factory.
pub async fn run_migrations(pool: &sqlx::PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}
