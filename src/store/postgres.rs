//! PostgreSQL implementation of [`LedgerStore`].
//!
//! Queries target the tables, views and functions created by the
//! migrations in `migrations/`.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    db::DbPool,
    models::{
        account::{Account, AccountBalance, NewAccount},
        category::{Category, NewCategory},
        movement::{Movement, MovementAmount, MovementDetail, NewMovement},
        profile::Principal,
        report::DateWindow,
    },
    store::{LedgerStore, StoreResult},
};

/// Store backed by a sqlx Postgres pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LedgerStore for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn find_principal(&self, key_hash: &str) -> StoreResult<Option<Principal>> {
        sqlx::query_as::<_, Principal>(
            r#"
            SELECT p.id, p.email, p.nombre_completo, p.rol
            FROM api_keys k
            JOIN profiles p ON p.id = k.profile_id
            WHERE k.key_hash = $1 AND k.is_active = true AND p.activo = true
            "#,
        )
        .bind(key_hash)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_accounts(&self, include_inactive: bool) -> StoreResult<Vec<Account>> {
        sqlx::query_as::<_, Account>(
            "SELECT * FROM cuentas WHERE ($1 OR activa = true) ORDER BY nombre",
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_account(&self, id: Uuid) -> StoreResult<Option<Account>> {
        sqlx::query_as::<_, Account>("SELECT * FROM cuentas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_account_balances(&self) -> StoreResult<Vec<AccountBalance>> {
        sqlx::query_as::<_, AccountBalance>(
            r#"
            SELECT id, nombre, tipo, activa, saldo, created_at
            FROM vista_saldos_cuentas
            WHERE activa = true
            ORDER BY nombre
            "#,
        )
        .fetch_all(&self.pool)
        .await
    }

    async fn insert_account(&self, account: &NewAccount, created_by: Uuid) -> StoreResult<Account> {
        sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO cuentas (nombre, tipo, descripcion, activa, created_by)
            VALUES ($1, $2, $3, true, $4)
            RETURNING *
            "#,
        )
        .bind(&account.name)
        .bind(account.kind)
        .bind(&account.description)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_account(
        &self,
        id: Uuid,
        account: &NewAccount,
    ) -> StoreResult<Option<Account>> {
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE cuentas
            SET nombre = $1,
                tipo = $2,
                descripcion = $3,
                updated_at = NOW()
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(&account.name)
        .bind(account.kind)
        .bind(&account.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn toggle_account_active(&self, id: Uuid) -> StoreResult<Option<Account>> {
        // Single statement, so two concurrent toggles serialize on the row lock
        sqlx::query_as::<_, Account>(
            r#"
            UPDATE cuentas
            SET activa = NOT activa,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn list_categories(&self, include_inactive: bool) -> StoreResult<Vec<Category>> {
        sqlx::query_as::<_, Category>(
            "SELECT * FROM categorias WHERE ($1 OR activa = true) ORDER BY nombre",
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await
    }

    async fn get_category(&self, id: Uuid) -> StoreResult<Option<Category>> {
        sqlx::query_as::<_, Category>("SELECT * FROM categorias WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn insert_category(
        &self,
        category: &NewCategory,
        created_by: Uuid,
    ) -> StoreResult<Category> {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categorias (nombre, tipo, parent_id, descripcion, activa, created_by)
            VALUES ($1, $2, $3, $4, true, $5)
            RETURNING *
            "#,
        )
        .bind(&category.name)
        .bind(category.kind)
        .bind(category.parent_id)
        .bind(&category.description)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn update_category(
        &self,
        id: Uuid,
        category: &NewCategory,
    ) -> StoreResult<Option<Category>> {
        sqlx::query_as::<_, Category>(
            r#"
            UPDATE categorias
            SET nombre = $1,
                tipo = $2,
                parent_id = $3,
                descripcion = $4,
                updated_at = NOW()
            WHERE id = $5
            RETURNING *
            "#,
        )
        .bind(&category.name)
        .bind(category.kind)
        .bind(category.parent_id)
        .bind(&category.description)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
    }

    async fn count_active_movements_in_category(&self, id: Uuid) -> StoreResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM movimientos WHERE categoria_id = $1 AND anulado = false",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
    }

    async fn deactivate_category(&self, id: Uuid) -> StoreResult<bool> {
        let updated = sqlx::query(
            "UPDATE categorias SET activa = false, updated_at = NOW() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn insert_movement(
        &self,
        movement: &NewMovement,
        created_by: Uuid,
    ) -> StoreResult<Movement> {
        sqlx::query_as::<_, Movement>(
            r#"
            INSERT INTO movimientos (
                tipo,
                monto,
                fecha,
                descripcion,
                cuenta_origen_id,
                cuenta_destino_id,
                categoria_id,
                created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(movement.kind)
        .bind(movement.amount)
        .bind(movement.date)
        .bind(&movement.description)
        .bind(movement.origin_account_id)
        .bind(movement.destination_account_id)
        .bind(movement.category_id)
        .bind(created_by)
        .fetch_one(&self.pool)
        .await
    }

    async fn get_movement(&self, id: Uuid) -> StoreResult<Option<Movement>> {
        sqlx::query_as::<_, Movement>("SELECT * FROM movimientos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    async fn list_movement_details(
        &self,
        include_voided: bool,
        limit: i64,
    ) -> StoreResult<Vec<MovementDetail>> {
        sqlx::query_as::<_, MovementDetail>(
            r#"
            SELECT *
            FROM vista_movimientos_completos
            WHERE ($1 OR anulado = false)
            ORDER BY fecha DESC, created_at DESC
            LIMIT $2
            "#,
        )
        .bind(include_voided)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
    }

    async fn movement_amounts(
        &self,
        window: Option<DateWindow>,
    ) -> StoreResult<Vec<MovementAmount>> {
        sqlx::query_as::<_, MovementAmount>(
            r#"
            SELECT fecha::text AS fecha, tipo, monto
            FROM movimientos
            WHERE anulado = false
              AND ($1::date IS NULL OR fecha >= $1::date)
              AND ($2::date IS NULL OR fecha <= $2::date)
            "#,
        )
        .bind(window.map(|w| w.start))
        .bind(window.map(|w| w.end))
        .fetch_all(&self.pool)
        .await
    }

    async fn total_balance(&self) -> StoreResult<Decimal> {
        let total: Option<Decimal> = sqlx::query_scalar("SELECT calcular_saldo_total()")
            .fetch_one(&self.pool)
            .await?;

        Ok(total.unwrap_or(Decimal::ZERO))
    }

    async fn void_movement(&self, id: Uuid, reason: &str) -> StoreResult<bool> {
        sqlx::query_scalar("SELECT anular_movimiento($1, $2)")
            .bind(id)
            .bind(reason)
            .fetch_one(&self.pool)
            .await
    }
}
