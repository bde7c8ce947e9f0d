//! XP ledger: character initialisation and XP awards.

use fitquest_core::error::CoreError;
use fitquest_core::rpg::xp::XpAward;
use fitquest_core::types::DbId;
use fitquest_db::models::character::Character;
use fitquest_db::models::xp_log::CreateXpLogEntry;
use fitquest_db::repositories::{CharacterRepo, XpLogRepo};
use sqlx::{PgConnection, PgPool};

use super::EngineResult;

/// A single XP grant as it will appear in the ledger.
#[derive(Debug, Clone, Copy)]
pub struct XpGrant<'a> {
    pub amount: i32,
    pub source: &'a str,
    pub reference_id: Option<&'a str>,
    pub note: Option<&'a str>,
}

/// Create the user's character if it does not exist yet, returning the
/// current row either way. Never overwrites an existing character.
pub async fn initialize_character(pool: &PgPool, user_id: DbId) -> EngineResult<Character> {
    let mut conn = pool.acquire().await?;
    initialize_character_inner(&mut conn, user_id).await
}

pub async fn initialize_character_inner(
    conn: &mut PgConnection,
    user_id: DbId,
) -> EngineResult<Character> {
    if let Some(created) = CharacterRepo::create_if_missing(&mut *conn, user_id).await? {
        tracing::info!(user_id, "Character initialized");
        return Ok(created);
    }

    CharacterRepo::find_by_user(&mut *conn, user_id)
        .await?
        .ok_or_else(|| {
            CoreError::Internal(format!("Character for user {user_id} vanished after insert"))
                .into()
        })
}

/// Award XP in its own transaction. See [`award_xp_inner`].
pub async fn award_xp(pool: &PgPool, user_id: DbId, grant: XpGrant<'_>) -> EngineResult<XpAward> {
    let mut tx = pool.begin().await?;
    let award = award_xp_inner(&mut tx, user_id, grant).await?;
    tx.commit().await?;
    Ok(award)
}

/// Add XP to a character, recompute its level, and append a ledger entry.
///
/// Fails with `Character not found` when the user has no character. No
/// deduplication happens here: `reference_id` is recorded, not enforced.
pub async fn award_xp_inner(
    conn: &mut PgConnection,
    user_id: DbId,
    grant: XpGrant<'_>,
) -> EngineResult<XpAward> {
    let character = CharacterRepo::find_by_user_for_update(&mut *conn, user_id)
        .await?
        .ok_or_else(|| CoreError::character_not_found(user_id))?;

    let award = XpAward::compute(character.xp, grant.amount);

    CharacterRepo::set_xp(&mut *conn, user_id, award.new_xp, award.new_level).await?;

    XpLogRepo::create(
        &mut *conn,
        &CreateXpLogEntry {
            user_id,
            amount: grant.amount,
            source: grant.source.to_string(),
            reference_id: grant.reference_id.map(str::to_string),
            note: grant.note.map(str::to_string),
        },
    )
    .await?;

    tracing::info!(
        user_id,
        amount = grant.amount,
        source = grant.source,
        new_xp = award.new_xp,
        new_level = award.new_level,
        "XP awarded",
    );
    if award.did_level_up {
        tracing::info!(
            user_id,
            old_level = award.old_level,
            new_level = award.new_level,
            unlocks = award.unlocks.len(),
            "Character leveled up",
        );
    }

    Ok(award)
}
