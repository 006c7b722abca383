//! Circulation workflow: guarded status transitions for book instances
//! and the reservation-to-loan handoff.
//!
//! Every operation runs in a transaction and locks the instance row with
//! `FOR UPDATE` before checking the transition guard, so concurrent
//! requests against the same copy serialize on the database row. The
//! guards themselves are the pure predicates on
//! [`biblios_entity::instance::InstanceStatus`].

use chrono::NaiveDate;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use biblios_core::error::{AppError, ErrorKind};
use biblios_core::result::AppResult;
use biblios_entity::instance::{BookInstance, InstanceStatus};
use biblios_entity::reservation::Reservation;

/// Rejection message for deleting a copy that is reserved or loaned.
pub const INSTANCE_DELETE_GUARD: &str =
    "Only available or books for maintenance are allowed to be deleted.";

/// Repository owning the book-instance status workflow.
#[derive(Debug, Clone)]
pub struct CirculationRepository {
    pool: PgPool,
}

impl CirculationRepository {
    /// Create a new circulation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Place a reservation: `Available -> Reserved` plus a reservation row,
    /// atomically.
    pub async fn reserve(&self, user_id: Uuid, instance_id: Uuid) -> AppResult<Reservation> {
        let mut tx = self.begin().await?;

        let instance = Self::lock_instance(&mut tx, instance_id).await?;
        if !instance.status.can_reserve() {
            return Err(AppError::conflict("Only available copies can be reserved."));
        }

        let reservation = sqlx::query_as::<_, Reservation>(
            "INSERT INTO reservations (user_id, instance_id, reserved_on) \
             VALUES ($1, $2, CURRENT_DATE) \
             RETURNING *",
        )
        .bind(user_id)
        .bind(instance_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("reservations_instance_id_key") =>
            {
                AppError::conflict("This copy is already reserved")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create reservation", e),
        })?;

        Self::set_status(&mut tx, instance_id, InstanceStatus::Reserved).await?;

        Self::commit(tx).await?;
        Ok(reservation)
    }

    /// Issue a reservation: `Reserved -> Loaned`, deleting the reservation
    /// and recording the borrower and due date, atomically.
    pub async fn issue(&self, reservation_id: Uuid, due: NaiveDate) -> AppResult<BookInstance> {
        let mut tx = self.begin().await?;

        let reservation = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE id = $1 FOR UPDATE",
        )
        .bind(reservation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to load reservation", e))?
        .ok_or_else(|| AppError::not_found(format!("Reservation {reservation_id} not found")))?;

        let instance = Self::lock_instance(&mut tx, reservation.instance_id).await?;
        if !instance.status.can_issue() {
            return Err(AppError::conflict("Only reserved copies can be issued."));
        }

        sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(reservation_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete reservation", e)
            })?;

        let instance = sqlx::query_as::<_, BookInstance>(
            "UPDATE book_instances SET status = 'loaned', borrower_id = $2, \
                                       available_by = $3, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(reservation.instance_id)
        .bind(reservation.user_id)
        .bind(due)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to issue copy", e))?;

        Self::commit(tx).await?;
        Ok(instance)
    }

    /// Cancel a reservation: the copy goes back on the shelf.
    pub async fn cancel(&self, reservation_id: Uuid) -> AppResult<()> {
        let mut tx = self.begin().await?;

        let reservation = sqlx::query_as::<_, Reservation>(
            "DELETE FROM reservations WHERE id = $1 RETURNING *",
        )
        .bind(reservation_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to delete reservation", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Reservation {reservation_id} not found")))?;

        sqlx::query(
            "UPDATE book_instances SET status = 'available', updated_at = NOW() \
             WHERE id = $1 AND status = 'reserved'",
        )
        .bind(reservation.instance_id)
        .execute(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to release copy", e))?;

        Self::commit(tx).await
    }

    /// Return a loaned copy: `Loaned -> Available`, clearing the borrower.
    pub async fn return_copy(&self, instance_id: Uuid) -> AppResult<BookInstance> {
        let mut tx = self.begin().await?;

        let instance = Self::lock_instance(&mut tx, instance_id).await?;
        if !instance.status.can_return() {
            return Err(AppError::conflict("Only loaned copies can be returned."));
        }

        let instance = sqlx::query_as::<_, BookInstance>(
            "UPDATE book_instances SET status = 'available', borrower_id = NULL, \
                                       available_by = NULL, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(instance_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to return copy", e))?;

        Self::commit(tx).await?;
        Ok(instance)
    }

    /// Pull a copy for maintenance. Rejected while a reservation holds the
    /// copy; pulling a loaned copy clears the borrower.
    pub async fn send_to_maintenance(&self, instance_id: Uuid) -> AppResult<BookInstance> {
        let mut tx = self.begin().await?;

        let instance = Self::lock_instance(&mut tx, instance_id).await?;
        if !instance.status.can_enter_maintenance() {
            return Err(AppError::conflict(
                "Reserved copies cannot be sent to maintenance; cancel the reservation first.",
            ));
        }

        let instance = sqlx::query_as::<_, BookInstance>(
            "UPDATE book_instances SET status = 'maintenance', borrower_id = NULL, \
                                       available_by = NULL, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(instance_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to send copy to maintenance", e)
        })?;

        Self::commit(tx).await?;
        Ok(instance)
    }

    /// Put a copy back on the shelf: `Maintenance -> Available`.
    pub async fn activate(&self, instance_id: Uuid) -> AppResult<BookInstance> {
        let mut tx = self.begin().await?;

        let instance = Self::lock_instance(&mut tx, instance_id).await?;
        if !instance.status.can_activate() {
            return Err(AppError::conflict(
                "Only copies under maintenance can be put back on the shelf.",
            ));
        }

        let instance = sqlx::query_as::<_, BookInstance>(
            "UPDATE book_instances SET status = 'available', updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(instance_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to activate copy", e))?;

        Self::commit(tx).await?;
        Ok(instance)
    }

    /// Delete a copy. Permitted only while the copy is available or under
    /// maintenance and no reservation references it.
    pub async fn delete_instance(&self, instance_id: Uuid) -> AppResult<()> {
        let mut tx = self.begin().await?;

        let instance = Self::lock_instance(&mut tx, instance_id).await?;
        if !instance.status.is_deletable() {
            return Err(AppError::conflict(INSTANCE_DELETE_GUARD));
        }

        let active: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM reservations WHERE instance_id = $1")
                .bind(instance_id)
                .fetch_one(&mut *tx)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count reservations", e)
                })?;
        if active > 0 {
            return Err(AppError::conflict(
                "This copy is referenced by an active reservation and cannot be deleted.",
            ));
        }

        sqlx::query("DELETE FROM book_instances WHERE id = $1")
            .bind(instance_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete book instance", e)
            })?;

        Self::commit(tx).await
    }

    async fn begin(&self) -> AppResult<Transaction<'static, Postgres>> {
        self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })
    }

    async fn commit(tx: Transaction<'static, Postgres>) -> AppResult<()> {
        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit transaction", e)
        })
    }

    async fn set_status(
        tx: &mut Transaction<'static, Postgres>,
        instance_id: Uuid,
        status: InstanceStatus,
    ) -> AppResult<()> {
        sqlx::query("UPDATE book_instances SET status = $2, updated_at = NOW() WHERE id = $1")
            .bind(instance_id)
            .bind(status)
            .execute(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to update copy status", e)
            })?;
        Ok(())
    }

    /// Load and row-lock an instance inside the current transaction.
    async fn lock_instance(
        tx: &mut Transaction<'static, Postgres>,
        instance_id: Uuid,
    ) -> AppResult<BookInstance> {
        sqlx::query_as::<_, BookInstance>("SELECT * FROM book_instances WHERE id = $1 FOR UPDATE")
            .bind(instance_id)
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load book instance", e)
            })?
            .ok_or_else(|| AppError::not_found(format!("Book instance {instance_id} not found")))
    }
}
