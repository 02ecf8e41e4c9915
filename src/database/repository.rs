use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::manager::DatabaseError;
use crate::models::{Match, MatchDetails, MatchPatch};

/// Storage operations behind the match endpoints. Each call is a single autocommit statement.
#[async_trait]
pub trait MatchRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Match>, DatabaseError>;

    async fn find(&self, id: i32) -> Result<Option<Match>, DatabaseError>;

    /// Insert with every counter at zero and return the stored row.
    async fn create(&self, details: &MatchDetails) -> Result<Match, DatabaseError>;

    /// Overwrite the descriptive fields only. `None` when no row has this id.
    async fn replace(
        &self,
        id: i32,
        details: &MatchDetails,
    ) -> Result<Option<Match>, DatabaseError>;

    /// `false` when no row has this id.
    async fn delete(&self, id: i32) -> Result<bool, DatabaseError>;

    /// `false` when no row has this id.
    async fn apply_patch(&self, id: i32, patch: MatchPatch) -> Result<bool, DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError>;
}

const SELECT_ALL: &str = r#"
    SELECT id, home_team, away_team, match_date,
           home_goals, away_goals, yellowcards, redcards, extratime
    FROM matches
"#;

const SELECT_ONE: &str = r#"
    SELECT id, home_team, away_team, match_date,
           home_goals, away_goals, yellowcards, redcards, extratime
    FROM matches
    WHERE id = $1
"#;

const INSERT: &str = r#"
    INSERT INTO matches (home_team, away_team, match_date,
                         home_goals, away_goals, yellowcards, redcards, extratime)
    VALUES ($1, $2, $3, 0, 0, 0, 0, 0)
    RETURNING id, home_team, away_team, match_date,
              home_goals, away_goals, yellowcards, redcards, extratime
"#;

const UPDATE_DETAILS: &str = r#"
    UPDATE matches
    SET home_team = $1, away_team = $2, match_date = $3
    WHERE id = $4
    RETURNING id, home_team, away_team, match_date,
              home_goals, away_goals, yellowcards, redcards, extratime
"#;

const DELETE: &str = "DELETE FROM matches WHERE id = $1";

pub struct PgMatchRepository {
    pool: PgPool,
}

impl PgMatchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchRepository for PgMatchRepository {
    async fn list(&self) -> Result<Vec<Match>, DatabaseError> {
        let rows = sqlx::query_as::<_, Match>(SELECT_ALL)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find(&self, id: i32) -> Result<Option<Match>, DatabaseError> {
        let row = sqlx::query_as::<_, Match>(SELECT_ONE)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, details: &MatchDetails) -> Result<Match, DatabaseError> {
        let row = sqlx::query_as::<_, Match>(INSERT)
            .bind(&details.home_team)
            .bind(&details.away_team)
            .bind(&details.match_date)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn replace(
        &self,
        id: i32,
        details: &MatchDetails,
    ) -> Result<Option<Match>, DatabaseError> {
        let row = sqlx::query_as::<_, Match>(UPDATE_DETAILS)
            .bind(&details.home_team)
            .bind(&details.away_team)
            .bind(&details.match_date)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> Result<bool, DatabaseError> {
        let result = sqlx::query(DELETE).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn apply_patch(&self, id: i32, patch: MatchPatch) -> Result<bool, DatabaseError> {
        let result = match patch {
            MatchPatch::Goals { home, away } => {
                sqlx::query("UPDATE matches SET home_goals = $1, away_goals = $2 WHERE id = $3")
                    .bind(home)
                    .bind(away)
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
            MatchPatch::YellowCards(n) => {
                sqlx::query("UPDATE matches SET yellowcards = $1 WHERE id = $2")
                    .bind(n)
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
            MatchPatch::RedCards(n) => {
                sqlx::query("UPDATE matches SET redcards = $1 WHERE id = $2")
                    .bind(n)
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
            MatchPatch::ExtraTime(n) => {
                sqlx::query("UPDATE matches SET extratime = $1 WHERE id = $2")
                    .bind(n)
                    .bind(id)
                    .execute(&self.pool)
                    .await?
            }
        };
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
