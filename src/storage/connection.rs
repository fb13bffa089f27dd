use crate::storage::entity::inventory_item;
use log::info;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema};
use std::time::Duration;

/// Opens a short-lived connection to the inventory backend. On sqlite the table is
/// created when missing.
///
/// Every store call opens its own connection, so the pool is kept at a single connection.
pub async fn establish_connection(
    db_url: &str,
    timeout: Duration,
) -> Result<DatabaseConnection, DbErr> {
    let mut opt = ConnectOptions::new(db_url.to_owned());
    opt.max_connections(1)
        .min_connections(1)
        .connect_timeout(timeout)
        .acquire_timeout(timeout)
        .sqlx_logging(true)
        .sqlx_logging_level(log::LevelFilter::Debug);

    let db = Database::connect(opt).await?;
    let builder = db.get_database_backend();

    // sqlite is the embedded/test backend and gets its schema here; a networked
    // backend is expected to already have the table.
    if builder == sea_orm::DatabaseBackend::Sqlite {
        db.execute(sea_orm::Statement::from_string(
            builder,
            "PRAGMA journal_mode=WAL;".to_string(),
        ))
        .await?;

        let schema = Schema::new(builder);
        let stmt = builder.build(
            schema
                .create_table_from_entity(inventory_item::Entity)
                .if_not_exists(),
        );
        db.execute(stmt).await?;
    }

    info!("inventory backend connected ({:?})", builder);

    Ok(db)
}
