use sqlx::SqlitePool;
use tracing::info;

use crate::models::application::{ApplicationInput, ApplicationRow};

pub async fn list_applications(pool: &SqlitePool) -> Result<Vec<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications ORDER BY id")
        .fetch_all(pool)
        .await
}

pub async fn get_application(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<ApplicationRow>, sqlx::Error> {
    sqlx::query_as::<_, ApplicationRow>("SELECT * FROM applications WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn insert_application(
    pool: &SqlitePool,
    input: ApplicationInput,
) -> Result<ApplicationRow, sqlx::Error> {
    let id = sqlx::query(
        r#"
        INSERT INTO applications (company, position, job_link, status, applied_date, notes)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&input.company)
    .bind(&input.position)
    .bind(&input.job_link)
    .bind(&input.status)
    .bind(input.applied_date)
    .bind(&input.notes)
    .execute(pool)
    .await?
    .last_insert_rowid();

    info!(id, company = %input.company, "Application created");
    Ok(ApplicationRow::from_input(id, input))
}

/// Full-replace update. Returns `None` when no row has this id.
pub async fn update_application(
    pool: &SqlitePool,
    id: i64,
    input: ApplicationInput,
) -> Result<Option<ApplicationRow>, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE applications
        SET company = ?, position = ?, job_link = ?, status = ?, applied_date = ?, notes = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.company)
    .bind(&input.position)
    .bind(&input.job_link)
    .bind(&input.status)
    .bind(input.applied_date)
    .bind(&input.notes)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }
    Ok(Some(ApplicationRow::from_input(id, input)))
}

/// Returns whether a row was actually removed.
pub async fn delete_application(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM applications WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::db::test_pool;

    fn input(company: &str) -> ApplicationInput {
        ApplicationInput {
            company: company.to_string(),
            position: "Backend Engineer".to_string(),
            job_link: Some("https://jobs.example.com/42".to_string()),
            status: Some("Applied".to_string()),
            applied_date: NaiveDate::from_ymd_opt(2024, 5, 1),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let pool = test_pool().await;
        let first = insert_application(&pool, input("Acme")).await.unwrap();
        let second = insert_application(&pool, input("Globex")).await.unwrap();
        assert!(second.id > first.id);
        assert_eq!(first.company, "Acme");
    }

    #[tokio::test]
    async fn test_list_returns_rows_in_id_order() {
        let pool = test_pool().await;
        insert_application(&pool, input("Acme")).await.unwrap();
        insert_application(&pool, input("Globex")).await.unwrap();

        let rows = list_applications(&pool).await.unwrap();
        let companies: Vec<_> = rows.iter().map(|r| r.company.as_str()).collect();
        assert_eq!(companies, vec!["Acme", "Globex"]);
        assert_eq!(rows[0].applied_date, NaiveDate::from_ymd_opt(2024, 5, 1));
    }

    #[tokio::test]
    async fn test_get_round_trips_all_fields() {
        let pool = test_pool().await;
        let created = insert_application(&pool, input("Acme")).await.unwrap();
        let fetched = get_application(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_update_replaces_every_field() {
        let pool = test_pool().await;
        let created = insert_application(&pool, input("Acme")).await.unwrap();

        let replacement = ApplicationInput {
            company: "Acme Corp".to_string(),
            position: "Staff Engineer".to_string(),
            job_link: None,
            status: Some("Interviewing".to_string()),
            applied_date: None,
            notes: Some("Phone screen on Monday".to_string()),
        };
        let updated = update_application(&pool, created.id, replacement)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.id, created.id);

        let fetched = get_application(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(fetched, updated);
        assert!(fetched.job_link.is_none());
        assert!(fetched.applied_date.is_none());
    }

    #[tokio::test]
    async fn test_update_missing_id_returns_none() {
        let pool = test_pool().await;
        let result = update_application(&pool, 999, input("Acme")).await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_removes_row_once() {
        let pool = test_pool().await;
        let created = insert_application(&pool, input("Acme")).await.unwrap();

        assert!(delete_application(&pool, created.id).await.unwrap());
        assert!(!delete_application(&pool, created.id).await.unwrap());
        assert!(get_application(&pool, created.id).await.unwrap().is_none());
    }
}
