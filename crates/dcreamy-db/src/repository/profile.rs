//! # Profile Repository
//!
//! Profiles and staff management. Authentication happens in the external
//! auth provider; this repository stores the profile row attached to each
//! provider-issued user id and the invite codes an owner hands out to
//! bring staff onto the shop.
//!
//! ## Staff Onboarding
//! ```text
//! owner: create_invite ──► code on a slip of paper ──► new staff signs up
//! staff: redeem_invite(code) ──► profile.shop_id set, role = staff
//! owner: detach_staff ──► profile.shop_id cleared ("kick")
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use dcreamy_core::{Profile, StaffInvite, UserRole};

/// What happened when a staff member presented an invite code.
///
/// Only genuinely broken states surface as [`DbError`]; a bad code is an
/// expected outcome the caller renders to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RedeemOutcome {
    /// Code accepted; the profile now works at this shop.
    Redeemed { shop_id: String },
    /// No invite with this code exists.
    UnknownCode,
    /// The invite expired before it was presented.
    Expired,
    /// Someone already redeemed this invite.
    AlreadyUsed,
}

/// Repository for profile and staff-invite rows.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    /// Creates a new ProfileRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProfileRepository { pool }
    }

    /// Inserts a new profile (id comes from the auth provider).
    pub async fn insert(&self, profile: &Profile) -> DbResult<()> {
        debug!(id = %profile.id, "Inserting profile");

        sqlx::query(
            r#"
            INSERT INTO profiles (
                id, full_name, phone, avatar_url, role, shop_id,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.full_name)
        .bind(&profile.phone)
        .bind(&profile.avatar_url)
        .bind(profile.role)
        .bind(&profile.shop_id)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a profile by the auth provider's user id.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Profile>> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, full_name, phone, avatar_url, role, shop_id,
                   created_at, updated_at
            FROM profiles
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }

    /// Updates the editable profile fields.
    pub async fn update(&self, profile: &Profile) -> DbResult<()> {
        debug!(id = %profile.id, "Updating profile");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                full_name = ?2,
                phone = ?3,
                avatar_url = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&profile.id)
        .bind(&profile.full_name)
        .bind(&profile.phone)
        .bind(&profile.avatar_url)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Profile", &profile.id));
        }

        Ok(())
    }

    /// Lists the staff accounts working at a shop (owner excluded).
    pub async fn list_staff(&self, shop_id: &str) -> DbResult<Vec<Profile>> {
        let staff = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, full_name, phone, avatar_url, role, shop_id,
                   created_at, updated_at
            FROM profiles
            WHERE shop_id = ?1 AND role = 'staff'
            ORDER BY created_at
            "#,
        )
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(staff)
    }

    /// Assigns a profile to a shop with the given role.
    pub async fn assign_to_shop(
        &self,
        profile_id: &str,
        shop_id: &str,
        role: UserRole,
    ) -> DbResult<()> {
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                shop_id = ?2,
                role = ?3,
                updated_at = ?4
            WHERE id = ?1
            "#,
        )
        .bind(profile_id)
        .bind(shop_id)
        .bind(role)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Profile", profile_id));
        }

        Ok(())
    }

    /// Removes a staff member from their shop ("kick"). The profile row
    /// survives; only the assignment is cleared.
    pub async fn detach_staff(&self, profile_id: &str) -> DbResult<()> {
        info!(id = %profile_id, "Detaching staff from shop");

        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                shop_id = NULL,
                updated_at = ?2
            WHERE id = ?1 AND role = 'staff'
            "#,
        )
        .bind(profile_id)
        .bind(now)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Staff profile", profile_id));
        }

        Ok(())
    }

    // -------------------------------------------------------------------------
    // Staff invites
    // -------------------------------------------------------------------------

    /// Creates a single-use invite code for a shop.
    pub async fn create_invite(
        &self,
        shop_id: &str,
        invite_code: &str,
        expires_at: chrono::DateTime<Utc>,
    ) -> DbResult<StaffInvite> {
        let invite = StaffInvite {
            id: Uuid::new_v4().to_string(),
            shop_id: shop_id.to_string(),
            invite_code: invite_code.to_string(),
            expires_at,
            used_by: None,
            created_at: Utc::now(),
        };

        debug!(shop_id = %shop_id, code = %invite_code, "Creating staff invite");

        sqlx::query(
            r#"
            INSERT INTO staff_invites (
                id, shop_id, invite_code, expires_at, used_by, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&invite.id)
        .bind(&invite.shop_id)
        .bind(&invite.invite_code)
        .bind(invite.expires_at)
        .bind(&invite.used_by)
        .bind(invite.created_at)
        .execute(&self.pool)
        .await?;

        Ok(invite)
    }

    /// Looks up an invite by its code.
    pub async fn get_invite_by_code(&self, code: &str) -> DbResult<Option<StaffInvite>> {
        let invite = sqlx::query_as::<_, StaffInvite>(
            r#"
            SELECT id, shop_id, invite_code, expires_at, used_by, created_at
            FROM staff_invites
            WHERE invite_code = ?1
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(invite)
    }

    /// Redeems an invite code for a profile.
    ///
    /// Marks the invite used and assigns the profile to the invite's shop
    /// as staff. The mark is a conditional update on `used_by IS NULL`, so
    /// two staff racing on the same code cannot both win.
    pub async fn redeem_invite(&self, code: &str, profile_id: &str) -> DbResult<RedeemOutcome> {
        let invite = match self.get_invite_by_code(code).await? {
            Some(invite) => invite,
            None => return Ok(RedeemOutcome::UnknownCode),
        };

        if invite.is_used() {
            return Ok(RedeemOutcome::AlreadyUsed);
        }

        if invite.is_expired(Utc::now()) {
            return Ok(RedeemOutcome::Expired);
        }

        let result = sqlx::query(
            r#"
            UPDATE staff_invites SET used_by = ?2
            WHERE id = ?1 AND used_by IS NULL
            "#,
        )
        .bind(&invite.id)
        .bind(profile_id)
        .execute(&self.pool)
        .await?;

        // Lost the race to another redemption between read and write
        if result.rows_affected() == 0 {
            return Ok(RedeemOutcome::AlreadyUsed);
        }

        self.assign_to_shop(profile_id, &invite.shop_id, UserRole::Staff)
            .await?;

        info!(code = %code, profile_id = %profile_id, shop_id = %invite.shop_id, "Invite redeemed");

        Ok(RedeemOutcome::Redeemed {
            shop_id: invite.shop_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{sample_profile, sample_shop, test_database};
    use chrono::Duration;

    #[tokio::test]
    async fn test_profile_roundtrip_and_update() {
        let db = test_database().await;
        let (_, owner) = sample_shop(&db).await;

        let mut fetched = db.profiles().get_by_id(&owner.id).await.unwrap().unwrap();
        assert!(fetched.is_owner());

        fetched.full_name = Some("Bu Rina".to_string());
        db.profiles().update(&fetched).await.unwrap();

        let again = db.profiles().get_by_id(&owner.id).await.unwrap().unwrap();
        assert_eq!(again.full_name.as_deref(), Some("Bu Rina"));
    }

    #[tokio::test]
    async fn test_invite_redeem_assigns_staff() {
        let db = test_database().await;
        let (shop, _) = sample_shop(&db).await;
        let staff = sample_profile(&db, UserRole::Staff, None).await;

        db.profiles()
            .create_invite(&shop.id, "DCRMY1", Utc::now() + Duration::hours(24))
            .await
            .unwrap();

        let outcome = db.profiles().redeem_invite("DCRMY1", &staff.id).await.unwrap();
        assert_eq!(
            outcome,
            RedeemOutcome::Redeemed {
                shop_id: shop.id.clone()
            }
        );

        let assigned = db.profiles().get_by_id(&staff.id).await.unwrap().unwrap();
        assert_eq!(assigned.shop_id.as_deref(), Some(shop.id.as_str()));

        let listed = db.profiles().list_staff(&shop.id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, staff.id);
    }

    #[tokio::test]
    async fn test_invite_is_single_use() {
        let db = test_database().await;
        let (shop, _) = sample_shop(&db).await;
        let first = sample_profile(&db, UserRole::Staff, None).await;
        let second = sample_profile(&db, UserRole::Staff, None).await;

        db.profiles()
            .create_invite(&shop.id, "DCRMY2", Utc::now() + Duration::hours(24))
            .await
            .unwrap();

        db.profiles().redeem_invite("DCRMY2", &first.id).await.unwrap();
        let outcome = db.profiles().redeem_invite("DCRMY2", &second.id).await.unwrap();
        assert_eq!(outcome, RedeemOutcome::AlreadyUsed);
    }

    #[tokio::test]
    async fn test_expired_and_unknown_invites() {
        let db = test_database().await;
        let (shop, _) = sample_shop(&db).await;
        let staff = sample_profile(&db, UserRole::Staff, None).await;

        db.profiles()
            .create_invite(&shop.id, "OLDONE", Utc::now() - Duration::hours(1))
            .await
            .unwrap();

        let outcome = db.profiles().redeem_invite("OLDONE", &staff.id).await.unwrap();
        assert_eq!(outcome, RedeemOutcome::Expired);

        let outcome = db.profiles().redeem_invite("NOSUCH", &staff.id).await.unwrap();
        assert_eq!(outcome, RedeemOutcome::UnknownCode);
    }

    #[tokio::test]
    async fn test_detach_staff_clears_assignment() {
        let db = test_database().await;
        let (shop, owner) = sample_shop(&db).await;
        let staff = sample_profile(&db, UserRole::Staff, Some(shop.id.clone())).await;

        db.profiles().detach_staff(&staff.id).await.unwrap();
        let detached = db.profiles().get_by_id(&staff.id).await.unwrap().unwrap();
        assert!(detached.shop_id.is_none());

        // The owner cannot be kicked through the staff path
        let err = db.profiles().detach_staff(&owner.id).await.unwrap_err();
        assert!(matches!(err, crate::DbError::NotFound { .. }));
    }
}
