//! SQLite-Implementierung des RoleRepository

use std::collections::BTreeSet;

use async_trait::async_trait;
use sqlx::Row as _;

use kurswerk_core::{PermissionId, RoleId};

use crate::error::DbResult;
use crate::models::RolleRecord;
use crate::repository::RoleRepository;
use crate::sqlite::pool::SqliteDb;

#[async_trait]
impl RoleRepository for SqliteDb {
    async fn permissions_for_role(&self, role_id: RoleId) -> DbResult<BTreeSet<PermissionId>> {
        let rows = sqlx::query("SELECT permission FROM role_permissions WHERE role_id = ?")
            .bind(role_id.inner())
            .fetch_all(&self.pool)
            .await?;

        rows.iter()
            .map(|r| -> DbResult<PermissionId> { Ok(PermissionId(r.try_get("permission")?)) })
            .collect()
    }

    async fn get_role(&self, role_id: RoleId) -> DbResult<Option<RolleRecord>> {
        let row = sqlx::query("SELECT id, name FROM roles WHERE id = ?")
            .bind(role_id.inner())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| -> DbResult<RolleRecord> {
            Ok(RolleRecord {
                id: RoleId(r.try_get("id")?),
                name: r.try_get("name")?,
            })
        })
        .transpose()
    }

    async fn upsert_role(&self, rolle: &RolleRecord) -> DbResult<()> {
        sqlx::query(
            "INSERT INTO roles (id, name) VALUES (?, ?)
             ON CONFLICT(id) DO UPDATE SET name = excluded.name",
        )
        .bind(rolle.id.inner())
        .bind(&rolle.name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn grant_permissions(&self, role_id: RoleId, permissions: &[PermissionId]) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;
        for perm in permissions {
            sqlx::query("INSERT OR IGNORE INTO role_permissions (role_id, permission) VALUES (?, ?)")
                .bind(role_id.inner())
                .bind(perm.0)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
