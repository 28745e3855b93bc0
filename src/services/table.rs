use crate::api::{AppError, AppResult};
use crate::db::{NewTable, Table, TableRepository};

pub async fn create_table<R>(repo: &R, table: NewTable) -> AppResult<Table>
where
    R: TableRepository + ?Sized,
{
    let created = repo.create_table(table).await.ok_or(AppError::TableNotCreated)?;
    tracing::info!(table_id = created.id, name = %created.name, "Table created");
    Ok(created)
}

/// Lista todas las mesas
///
/// Una lista vacía se trata como "no encontrado".
pub async fn list_tables<R>(repo: &R) -> AppResult<Vec<Table>>
where
    R: TableRepository + ?Sized,
{
    let tables = repo.list_tables().await?;
    if tables.is_empty() {
        return Err(AppError::NotFound("Tables not found".to_string()));
    }
    Ok(tables)
}

pub async fn get_table<R>(repo: &R, id: i32) -> AppResult<Table>
where
    R: TableRepository + ?Sized,
{
    repo.get_table(id)
        .await?
        .ok_or_else(|| AppError::not_found_id("Table", id))
}

/// Borra una mesa sin reservas
///
/// # Errores
/// - `NotFoundWithId`: la mesa no existe (o ya se borró)
/// - `Conflict`: la mesa todavía tiene reservas
pub async fn delete_table<R>(repo: &R, id: i32) -> AppResult<()>
where
    R: TableRepository + ?Sized,
{
    if !repo.delete_table(id).await? {
        return Err(AppError::not_found_id("Table", id));
    }
    tracing::info!(table_id = id, "Table deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;

    fn t1() -> NewTable {
        NewTable {
            name: "T1".to_string(),
            seats: 4,
            location: "Main Hall".to_string(),
        }
    }

    #[tokio::test]
    async fn empty_listing_is_not_found() {
        let store = MemoryStore::new();
        let err = list_tables(&store).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn created_table_round_trips() {
        let store = MemoryStore::new();
        let created = create_table(&store, t1()).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(get_table(&store, created.id).await.unwrap(), created);
        assert_eq!(list_tables(&store).await.unwrap(), vec![created]);
    }

    #[tokio::test]
    async fn second_delete_reports_not_found() {
        let store = MemoryStore::new();
        let created = create_table(&store, t1()).await.unwrap();

        delete_table(&store, created.id).await.unwrap();
        let err = delete_table(&store, created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFoundWithId { .. }));
    }

    #[tokio::test]
    async fn store_refusal_is_reported_as_not_created() {
        use crate::services::testing::RefusingStore;
        use actix_web::{http::StatusCode, ResponseError};

        let err = create_table(&RefusingStore, t1()).await.unwrap_err();

        assert!(matches!(err, AppError::TableNotCreated));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Table not created");
    }
}
