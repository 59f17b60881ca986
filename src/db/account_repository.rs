use sqlx::{Pool, Postgres};

use crate::db::models::{ApplicantRow, UserRow};

/// Read-only access to the account tables the job board depends on
pub struct AccountRepository;

impl AccountRepository {
    pub async fn find_user(pool: &Pool<Postgres>, id: i32) -> Result<Option<UserRow>, sqlx::Error> {
        sqlx::query_as::<_, UserRow>(
            "SELECT id, full_name, is_applicant, is_company FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Applicant profile owned by the given user, if one exists
    pub async fn applicant_for_user(
        pool: &Pool<Postgres>,
        user_id: i32,
    ) -> Result<Option<ApplicantRow>, sqlx::Error> {
        sqlx::query_as::<_, ApplicantRow>("SELECT id FROM applicants WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }
}
