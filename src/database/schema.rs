use sqlx::SqlitePool;

const SQL_CREATE_PARTICIPANTS: &str = r#"
CREATE TABLE IF NOT EXISTS participants (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    full_name TEXT,
    birth_date TEXT,
    gender TEXT,
    email TEXT,
    phone TEXT
)
"#;

pub async fn init_schema(pool: &SqlitePool) -> sqlx::Result<()> {
    sqlx::query(SQL_CREATE_PARTICIPANTS).execute(pool).await?;
    tracing::debug!("participants schema ready");
    Ok(())
}
