/**
 * PostgreSQL Store
 *
 * `sqlx` implementation of the repository traits. Enum columns are stored as
 * TEXT and mapped by hand so an unexpected value surfaces as
 * `StoreError::CorruptRow` instead of a decode panic.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;

use crate::backend::store::{
    CardRepository, ChecklistRepository, CommentRepository, SnapshotRepository, StoreError,
    StoreResult, UserRepository,
};
use crate::shared::kanban::{
    assemble_boards, Board, BoardGraph, Card, ChecklistItem, ChecklistItemChanges, Column,
    Comment, CommentAuthor, CommentWithAuthor, Priority, Role, Team, TeamWithMembers, Urgency,
    User,
};

const USER_COLUMNS: &str = "id, email, name, password_hash, role, sector, branch, phone, \
     bpm_username, can_open_tickets_for_others, created_at, updated_at";

const ITEM_COLUMNS: &str = "id, card_id, title, completed, position, created_at, updated_at";

const COMMENT_WITH_AUTHOR: &str = "c.id, c.card_id, c.author_id, c.content, c.parent_id, \
     c.created_at, c.updated_at, u.name AS author_name, u.email AS author_email";

/// PostgreSQL-backed repositories
#[derive(Clone, Debug)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Open a connection pool
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply the migrations under `migrations/`
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    /// Close the pool; called on shutdown
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn user_from_row(row: &PgRow) -> StoreResult<User> {
    let role: String = row.try_get("role")?;
    Ok(User {
        id: row.try_get("id")?,
        email: row.try_get("email")?,
        name: row.try_get("name")?,
        password_hash: row.try_get("password_hash")?,
        role: Role::parse(&role)
            .ok_or_else(|| StoreError::corrupt("users", format!("unknown role {}", role)))?,
        sector: row.try_get("sector")?,
        branch: row.try_get("branch")?,
        phone: row.try_get("phone")?,
        bpm_username: row.try_get("bpm_username")?,
        can_open_tickets_for_others: row.try_get("can_open_tickets_for_others")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn item_from_row(row: &PgRow) -> StoreResult<ChecklistItem> {
    Ok(ChecklistItem {
        id: row.try_get("id")?,
        card_id: row.try_get("card_id")?,
        title: row.try_get("title")?,
        completed: row.try_get("completed")?,
        position: row.try_get("position")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn comment_from_row(row: &PgRow) -> StoreResult<Comment> {
    Ok(Comment {
        id: row.try_get("id")?,
        card_id: row.try_get("card_id")?,
        author_id: row.try_get("author_id")?,
        content: row.try_get("content")?,
        parent_id: row.try_get("parent_id")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn comment_with_author_from_row(row: &PgRow) -> StoreResult<CommentWithAuthor> {
    let comment = comment_from_row(row)?;
    let author = CommentAuthor {
        id: comment.author_id.clone(),
        name: row.try_get("author_name")?,
        email: row.try_get("author_email")?,
    };
    Ok(CommentWithAuthor { comment, author })
}

fn card_from_row(row: &PgRow) -> StoreResult<Card> {
    let priority: String = row.try_get("priority")?;
    let urgency: String = row.try_get("urgency")?;
    Ok(Card {
        id: row.try_get("id")?,
        column_id: row.try_get("column_id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        position: row.try_get("position")?,
        creator_id: row.try_get("creator_id")?,
        assignee_id: row.try_get("assignee_id")?,
        priority: Priority::parse(&priority)
            .ok_or_else(|| StoreError::corrupt("cards", format!("unknown priority {}", priority)))?,
        urgency: Urgency::parse(&urgency)
            .ok_or_else(|| StoreError::corrupt("cards", format!("unknown urgency {}", urgency)))?,
        high_impact: row.try_get("high_impact")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl UserRepository for PostgresStore {
    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS))
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<User>> {
        let row = sqlx::query(&format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(user_from_row).transpose()
    }
}

#[async_trait]
impl CardRepository for PostgresStore {
    async fn card_exists(&self, card_id: &str) -> StoreResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM cards WHERE id = $1)")
            .bind(card_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn delete_card_cascade(&self, card_id: &str) -> StoreResult<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM checklist_items WHERE card_id = $1")
            .bind(card_id)
            .execute(&mut *tx)
            .await?;

        // Replies before their parents
        sqlx::query("DELETE FROM comments WHERE card_id = $1 AND parent_id IS NOT NULL")
            .bind(card_id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM comments WHERE card_id = $1")
            .bind(card_id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(card_id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }
}

#[async_trait]
impl ChecklistRepository for PostgresStore {
    async fn list_items(&self, card_id: &str) -> StoreResult<Vec<ChecklistItem>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM checklist_items WHERE card_id = $1 ORDER BY position ASC, created_at ASC",
            ITEM_COLUMNS
        ))
        .bind(card_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(item_from_row).collect()
    }

    async fn max_position(&self, card_id: &str) -> StoreResult<Option<i32>> {
        let max: Option<i32> =
            sqlx::query_scalar("SELECT MAX(position) FROM checklist_items WHERE card_id = $1")
                .bind(card_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(max)
    }

    async fn insert_item(&self, item: &ChecklistItem) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO checklist_items (id, card_id, title, completed, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&item.id)
        .bind(&item.card_id)
        .bind(&item.title)
        .bind(item.completed)
        .bind(item.position)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_item(
        &self,
        id: &str,
        changes: &ChecklistItemChanges,
    ) -> StoreResult<Option<ChecklistItem>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE checklist_items
            SET title = COALESCE($2, title), completed = COALESCE($3, completed), updated_at = $4
            WHERE id = $1
            RETURNING {}
            "#,
            ITEM_COLUMNS
        ))
        .bind(id)
        .bind(changes.title.as_deref())
        .bind(changes.completed)
        .bind(changes.updated_at)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(item_from_row).transpose()
    }

    async fn delete_item(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM checklist_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl CommentRepository for PostgresStore {
    async fn list_for_card(&self, card_id: &str) -> StoreResult<Vec<CommentWithAuthor>> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM comments c JOIN users u ON u.id = c.author_id \
             WHERE c.card_id = $1 ORDER BY c.created_at ASC, c.id ASC",
            COMMENT_WITH_AUTHOR
        ))
        .bind(card_id)
        .fetch_all(&self.pool)
        .await?;
        rows.iter().map(comment_with_author_from_row).collect()
    }

    async fn find(&self, id: &str) -> StoreResult<Option<Comment>> {
        let row = sqlx::query(
            "SELECT id, card_id, author_id, content, parent_id, created_at, updated_at \
             FROM comments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(comment_from_row).transpose()
    }

    async fn find_with_author(&self, id: &str) -> StoreResult<Option<CommentWithAuthor>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM comments c JOIN users u ON u.id = c.author_id WHERE c.id = $1",
            COMMENT_WITH_AUTHOR
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(comment_with_author_from_row).transpose()
    }

    async fn insert(&self, comment: &Comment) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO comments (id, card_id, author_id, content, parent_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(&comment.id)
        .bind(&comment.card_id)
        .bind(&comment.author_id)
        .bind(&comment.content)
        .bind(comment.parent_id.as_deref())
        .bind(comment.created_at)
        .bind(comment.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn update_content(
        &self,
        id: &str,
        content: &str,
        updated_at: DateTime<Utc>,
    ) -> StoreResult<Option<CommentWithAuthor>> {
        let row = sqlx::query(&format!(
            r#"
            WITH c AS (
                UPDATE comments SET content = $2, updated_at = $3
                WHERE id = $1
                RETURNING id, card_id, author_id, content, parent_id, created_at, updated_at
            )
            SELECT {} FROM c JOIN users u ON u.id = c.author_id
            "#,
            COMMENT_WITH_AUTHOR
        ))
        .bind(id)
        .bind(content)
        .bind(updated_at)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(comment_with_author_from_row).transpose()
    }

    async fn count_replies(&self, parent_id: &str) -> StoreResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE parent_id = $1")
            .bind(parent_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    async fn delete_replies(&self, parent_id: &str) -> StoreResult<u64> {
        let result = sqlx::query("DELETE FROM comments WHERE parent_id = $1")
            .bind(parent_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, id: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SnapshotRepository for PostgresStore {
    async fn load_users(&self) -> StoreResult<Vec<User>> {
        let rows = sqlx::query(&format!("SELECT {} FROM users ORDER BY created_at, id", USER_COLUMNS))
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(user_from_row).collect()
    }

    async fn load_teams(&self) -> StoreResult<Vec<TeamWithMembers>> {
        let team_rows = sqlx::query(
            "SELECT id, name, description, parent_id, created_at, updated_at FROM teams ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        let member_rows = sqlx::query("SELECT team_id, user_id FROM team_members ORDER BY team_id, user_id")
            .fetch_all(&self.pool)
            .await?;

        let mut teams = team_rows
            .iter()
            .map(|row| -> StoreResult<TeamWithMembers> {
                Ok(TeamWithMembers {
                    team: Team {
                        id: row.try_get("id")?,
                        name: row.try_get("name")?,
                        description: row.try_get("description")?,
                        parent_id: row.try_get("parent_id")?,
                        created_at: row.try_get("created_at")?,
                        updated_at: row.try_get("updated_at")?,
                    },
                    member_ids: Vec::new(),
                })
            })
            .collect::<StoreResult<Vec<_>>>()?;

        let memberships = member_rows
            .iter()
            .map(|row| -> StoreResult<(String, String)> {
                Ok((row.try_get("team_id")?, row.try_get("user_id")?))
            })
            .collect::<StoreResult<Vec<_>>>()?;
        attach_members(&mut teams, memberships);

        Ok(teams)
    }

    async fn load_boards(&self) -> StoreResult<Vec<BoardGraph>> {
        let boards = sqlx::query("SELECT id, team_id, name, created_at, updated_at FROM boards ORDER BY id")
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(|row| -> StoreResult<Board> {
                Ok(Board {
                    id: row.try_get("id")?,
                    team_id: row.try_get("team_id")?,
                    name: row.try_get("name")?,
                    created_at: row.try_get("created_at")?,
                    updated_at: row.try_get("updated_at")?,
                })
            })
            .collect::<StoreResult<Vec<_>>>()?;

        let columns = sqlx::query(
            "SELECT id, board_id, title, position, created_at, updated_at FROM board_columns",
        )
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(|row| -> StoreResult<Column> {
            Ok(Column {
                id: row.try_get("id")?,
                board_id: row.try_get("board_id")?,
                title: row.try_get("title")?,
                position: row.try_get("position")?,
                created_at: row.try_get("created_at")?,
                updated_at: row.try_get("updated_at")?,
            })
        })
        .collect::<StoreResult<Vec<_>>>()?;

        let cards = sqlx::query(
            "SELECT id, column_id, title, description, position, creator_id, assignee_id, \
             priority, urgency, high_impact, created_at, updated_at FROM cards",
        )
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(card_from_row)
        .collect::<StoreResult<Vec<_>>>()?;

        let items = sqlx::query(&format!("SELECT {} FROM checklist_items", ITEM_COLUMNS))
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(item_from_row)
            .collect::<StoreResult<Vec<_>>>()?;

        Ok(assemble_boards(boards, columns, cards, items))
    }
}

/// Distribute `(team_id, user_id)` pairs onto their teams. Pairs naming an
/// unknown team are dropped.
fn attach_members(teams: &mut [TeamWithMembers], memberships: Vec<(String, String)>) {
    let index: HashMap<String, usize> = teams
        .iter()
        .enumerate()
        .map(|(i, t)| (t.team.id.clone(), i))
        .collect();

    for (team_id, user_id) in memberships {
        if let Some(&i) = index.get(&team_id) {
            teams[i].member_ids.push(user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: &str) -> TeamWithMembers {
        TeamWithMembers {
            team: Team {
                id: id.to_string(),
                name: id.to_uppercase(),
                description: None,
                parent_id: None,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            member_ids: Vec::new(),
        }
    }

    fn pair(team_id: &str, user_id: &str) -> (String, String) {
        (team_id.to_string(), user_id.to_string())
    }

    #[test]
    fn test_attach_members_groups_by_team() {
        let mut teams = vec![team("t-a"), team("t-b"), team("t-c")];
        attach_members(
            &mut teams,
            vec![pair("t-a", "u-1"), pair("t-c", "u-1"), pair("t-a", "u-2"), pair("t-x", "u-3")],
        );

        assert_eq!(teams[0].member_ids, vec!["u-1", "u-2"]);
        assert!(teams[1].member_ids.is_empty());
        assert_eq!(teams[2].member_ids, vec!["u-1"]);
    }
}
