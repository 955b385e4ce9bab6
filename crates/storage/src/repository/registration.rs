use sqlx::PgPool;

use crate::error::Result;
use crate::models::{NewRegistration, RecalculationRow, RegistrationDetailRow};
use crate::services::classification::DerivedFlags;
use crate::services::recalculation::RecalculationScope;

const DETAIL_COLUMNS: &str = "\
    r.id, r.registration_date, r.is_pair, \
    r.athlete1_last_name, r.athlete1_first_name, r.athlete1_birth_date, \
    r.athlete1_club_id, r.athlete1_nationality, r.athlete1_gender, \
    r.athlete1_email, r.athlete1_phone, r.athlete1_photo, r.athlete1_photo_type, \
    r.athlete2_last_name, r.athlete2_first_name, r.athlete2_birth_date, \
    r.athlete2_club_id, r.athlete2_nationality, r.athlete2_gender, \
    r.athlete2_email, r.athlete2_phone, r.athlete2_photo, r.athlete2_photo_type, \
    r.locale, r.etranger, r.mosaique, r.mixte, \
    c1.name AS athlete1_club_name, c2.name AS athlete2_club_name";

const RECALC_COLUMNS: &str = "\
    r.id, r.is_pair, \
    r.athlete1_nationality, r.athlete1_gender, r.athlete1_birth_date, \
    r.athlete2_nationality, r.athlete2_gender, r.athlete2_birth_date, \
    c1.name AS athlete1_club_name, c2.name AS athlete2_club_name";

const CLUB_JOINS: &str = "\
    LEFT JOIN clubs c1 ON r.athlete1_club_id = c1.id \
    LEFT JOIN clubs c2 ON r.athlete2_club_id = c2.id";

pub struct RegistrationRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert one registration row; returns the new id.
    pub async fn insert(&self, new: &NewRegistration) -> Result<i64> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO registrations (
                is_pair,
                athlete1_last_name, athlete1_first_name, athlete1_birth_date,
                athlete1_club_id, athlete1_nationality, athlete1_gender,
                athlete1_email, athlete1_phone, athlete1_photo, athlete1_photo_type,
                athlete2_last_name, athlete2_first_name, athlete2_birth_date,
                athlete2_club_id, athlete2_nationality, athlete2_gender,
                athlete2_email, athlete2_phone, athlete2_photo, athlete2_photo_type,
                locale, etranger, mosaique, mixte
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13,
                $14, $15, $16, $17, $18, $19, $20, $21, $22, $23, $24, $25
            )
            RETURNING id
            "#,
        )
        .bind(new.is_pair)
        .bind(&new.athlete1_last_name)
        .bind(&new.athlete1_first_name)
        .bind(new.athlete1_birth_date)
        .bind(new.athlete1_club_id)
        .bind(&new.athlete1_nationality)
        .bind(&new.athlete1_gender)
        .bind(&new.athlete1_email)
        .bind(&new.athlete1_phone)
        .bind(&new.athlete1_photo)
        .bind(&new.athlete1_photo_type)
        .bind(&new.athlete2_last_name)
        .bind(&new.athlete2_first_name)
        .bind(new.athlete2_birth_date)
        .bind(new.athlete2_club_id)
        .bind(&new.athlete2_nationality)
        .bind(&new.athlete2_gender)
        .bind(&new.athlete2_email)
        .bind(&new.athlete2_phone)
        .bind(&new.athlete2_photo)
        .bind(&new.athlete2_photo_type)
        .bind(&new.locale)
        .bind(new.etranger)
        .bind(new.mosaique)
        .bind(new.mixte)
        .fetch_one(self.pool)
        .await?;

        Ok(id)
    }

    /// Advisory duplicate check: does this email appear in either athlete
    /// slot of any stored registration? Case-insensitive.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM registrations
                WHERE LOWER(athlete1_email) = $1 OR LOWER(athlete2_email) = $1
            )
            "#,
        )
        .bind(email.to_lowercase())
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// Advisory duplicate check on phone numbers, comparing with spaces,
    /// hyphens and parentheses stripped on both sides.
    pub async fn phone_exists(&self, phone: &str) -> Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM registrations
                WHERE translate(athlete1_phone, ' -()', '') = $1
                   OR translate(athlete2_phone, ' -()', '') = $1
            )
            "#,
        )
        .bind(normalize_phone(phone))
        .fetch_one(self.pool)
        .await?;

        Ok(exists)
    }

    /// All registrations with club names joined in, newest first.
    pub async fn list_detailed(&self) -> Result<Vec<RegistrationDetailRow>> {
        let sql = format!(
            "SELECT {DETAIL_COLUMNS} FROM registrations r {CLUB_JOINS} \
             ORDER BY r.registration_date DESC"
        );

        let rows = sqlx::query_as::<_, RegistrationDetailRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn rows_for_recalculation(
        &self,
        scope: RecalculationScope,
    ) -> Result<Vec<RecalculationRow>> {
        let filter = match scope {
            RecalculationScope::Selective => {
                " WHERE r.etranger IS NULL OR r.mosaique IS NULL OR r.mixte IS NULL"
            }
            RecalculationScope::Full => "",
        };

        let sql = format!("SELECT {RECALC_COLUMNS} FROM registrations r {CLUB_JOINS}{filter}");

        let rows = sqlx::query_as::<_, RecalculationRow>(&sql)
            .fetch_all(self.pool)
            .await?;

        Ok(rows)
    }

    pub async fn update_derived_flags(&self, id: i64, flags: &DerivedFlags) -> Result<()> {
        sqlx::query(
            "UPDATE registrations SET etranger = $2, mosaique = $3, mixte = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(flags.etranger)
        .bind(flags.mosaique)
        .bind(flags.mixte)
        .execute(self.pool)
        .await?;

        Ok(())
    }
}

/// Comparison key for phone numbers: spaces, hyphens and parentheses removed.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '(' | ')'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::normalize_phone;

    #[test]
    fn normalize_phone_strips_separators() {
        assert_eq!(normalize_phone("+216 97-475 (628)"), "+21697475628");
        assert_eq!(normalize_phone("+21697475628"), "+21697475628");
        assert_eq!(
            normalize_phone("+216 97-475 (628)"),
            normalize_phone("+21697475628")
        );
    }

    #[test]
    fn normalize_phone_keeps_other_characters() {
        assert_eq!(normalize_phone("00.216.97"), "00.216.97");
    }
}
