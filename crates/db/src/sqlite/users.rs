//! SQLite-Implementierung des UserRepository

use async_trait::async_trait;
use chrono::Utc;
use sqlx::Row as _;

use kurswerk_core::{RoleId, UserId};

use crate::error::{DbError, DbResult};
use crate::models::{BenutzerMitRollen, BenutzerRecord, BenutzerSuche, NeuerBenutzer, RolleRecord};
use crate::repository::UserRepository;
use crate::sqlite::pool::SqliteDb;

const BENUTZER_SPALTEN: &str =
    "id, user_name, email, password_hash, name, description, avatar, sex, created_at";

#[async_trait]
impl UserRepository for SqliteDb {
    async fn get_by(&self, suche: BenutzerSuche<'_>) -> DbResult<Option<BenutzerRecord>> {
        // Spaltenname stammt aus einer festen Liste, Wert wird gebunden
        let sql = format!(
            "SELECT {BENUTZER_SPALTEN} FROM users WHERE {} = ? ORDER BY id LIMIT 1",
            suche.spalte()
        );
        let q = sqlx::query(&sql);
        let q = match suche {
            BenutzerSuche::Id(id) => q.bind(id.inner()),
            BenutzerSuche::Username(wert) | BenutzerSuche::Email(wert) => q.bind(wert),
        };

        let row = q.fetch_optional(&self.pool).await?;
        row.map(|r| row_to_benutzer(&r)).transpose()
    }

    async fn get_with_roles(&self, suche: BenutzerSuche<'_>) -> DbResult<Option<BenutzerMitRollen>> {
        let Some(benutzer) = self.get_by(suche).await? else {
            return Ok(None);
        };

        let rows = sqlx::query(
            "SELECT r.id, r.name
             FROM user_roles ur
             JOIN roles r ON r.id = ur.role_id
             WHERE ur.user_id = ?
             ORDER BY ur.position",
        )
        .bind(benutzer.id.inner())
        .fetch_all(&self.pool)
        .await?;

        let rollen = rows
            .iter()
            .map(|r| -> DbResult<RolleRecord> {
                Ok(RolleRecord {
                    id: RoleId(r.try_get("id")?),
                    name: r.try_get("name")?,
                })
            })
            .collect::<DbResult<Vec<_>>>()?;

        Ok(Some(BenutzerMitRollen { benutzer, rollen }))
    }

    async fn create(&self, data: NeuerBenutzer<'_>) -> DbResult<BenutzerRecord> {
        let now = Utc::now();

        let ergebnis = sqlx::query(
            "INSERT INTO users (user_name, email, password_hash, created_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(data.username)
        .bind(data.email)
        .bind(data.password_hash)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let eindeutig = e
                .as_database_error()
                .is_some_and(|d| d.is_unique_violation());
            if eindeutig {
                DbError::Eindeutigkeit(format!("Benutzername '{}' bereits vergeben", data.username))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        Ok(BenutzerRecord {
            id: UserId(ergebnis.last_insert_rowid()),
            username: data.username.to_string(),
            email: data.email.to_string(),
            password_hash: data.password_hash.to_string(),
            name: String::new(),
            description: String::new(),
            avatar: String::new(),
            sex: 0,
            created_at: now,
        })
    }

    async fn assign_roles(&self, user_id: UserId, rollen: &[RoleId]) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        // Neue Rollen werden hinter bestehenden einsortiert
        let naechste: i64 = sqlx::query(
            "SELECT COALESCE(MAX(position) + 1, 0) AS naechste FROM user_roles WHERE user_id = ?",
        )
        .bind(user_id.inner())
        .fetch_one(&mut *tx)
        .await?
        .try_get("naechste")?;

        for (offset, rolle) in (0_i64..).zip(rollen) {
            sqlx::query(
                "INSERT OR IGNORE INTO user_roles (user_id, role_id, position) VALUES (?, ?, ?)",
            )
            .bind(user_id.inner())
            .bind(rolle.inner())
            .bind(naechste + offset)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    async fn delete(&self, user_id: UserId) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id.inner())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn row_to_benutzer(row: &sqlx::sqlite::SqliteRow) -> DbResult<BenutzerRecord> {
    let created_at_str: String = row.try_get("created_at")?;
    let created_at = chrono::DateTime::parse_from_rfc3339(&created_at_str)
        .map_err(|e| DbError::intern(format!("Ungueltige created_at '{created_at_str}': {e}")))?
        .with_timezone(&Utc);

    Ok(BenutzerRecord {
        id: UserId(row.try_get("id")?),
        username: row.try_get("user_name")?,
        email: row.try_get("email")?,
        password_hash: row.try_get("password_hash")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        avatar: row.try_get("avatar")?,
        sex: row.try_get("sex")?,
        created_at,
    })
}
