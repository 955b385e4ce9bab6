use chrono::{NaiveDate, NaiveDateTime};
use sqlx::FromRow;

use crate::services::classification::AthleteProfile;

/// Insert payload for one entrant slot (single athlete or pair), with club
/// references already resolved and derived flags already computed.
/// Athlete2 columns are non-null iff `is_pair`.
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub is_pair: bool,

    pub athlete1_last_name: String,
    pub athlete1_first_name: String,
    pub athlete1_birth_date: NaiveDate,
    pub athlete1_club_id: Option<i64>,
    pub athlete1_nationality: String,
    pub athlete1_gender: String,
    pub athlete1_email: String,
    pub athlete1_phone: String,
    pub athlete1_photo: Option<Vec<u8>>,
    pub athlete1_photo_type: Option<String>,

    pub athlete2_last_name: Option<String>,
    pub athlete2_first_name: Option<String>,
    pub athlete2_birth_date: Option<NaiveDate>,
    pub athlete2_club_id: Option<i64>,
    pub athlete2_nationality: Option<String>,
    pub athlete2_gender: Option<String>,
    pub athlete2_email: Option<String>,
    pub athlete2_phone: Option<String>,
    pub athlete2_photo: Option<Vec<u8>>,
    pub athlete2_photo_type: Option<String>,

    pub locale: String,

    pub etranger: bool,
    pub mosaique: bool,
    pub mixte: bool,
}

/// Registration joined with both club names for the admin listing.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationDetailRow {
    pub id: i64,
    pub registration_date: NaiveDateTime,
    pub is_pair: bool,

    pub athlete1_last_name: String,
    pub athlete1_first_name: String,
    pub athlete1_birth_date: NaiveDate,
    pub athlete1_club_id: Option<i64>,
    pub athlete1_nationality: String,
    pub athlete1_gender: String,
    pub athlete1_email: String,
    pub athlete1_phone: String,
    pub athlete1_photo: Option<Vec<u8>>,
    pub athlete1_photo_type: Option<String>,

    pub athlete2_last_name: Option<String>,
    pub athlete2_first_name: Option<String>,
    pub athlete2_birth_date: Option<NaiveDate>,
    pub athlete2_club_id: Option<i64>,
    pub athlete2_nationality: Option<String>,
    pub athlete2_gender: Option<String>,
    pub athlete2_email: Option<String>,
    pub athlete2_phone: Option<String>,
    pub athlete2_photo: Option<Vec<u8>>,
    pub athlete2_photo_type: Option<String>,

    pub locale: String,

    pub etranger: Option<bool>,
    pub mosaique: Option<bool>,
    pub mixte: Option<bool>,

    pub athlete1_club_name: Option<String>,
    pub athlete2_club_name: Option<String>,
}

/// Minimal view of a registration for reclassification: the athlete facts
/// the classifier needs plus the joined club names.
#[derive(Debug, Clone, FromRow)]
pub struct RecalculationRow {
    pub id: i64,
    pub is_pair: bool,
    pub athlete1_nationality: Option<String>,
    pub athlete1_gender: Option<String>,
    pub athlete1_birth_date: Option<NaiveDate>,
    pub athlete2_nationality: Option<String>,
    pub athlete2_gender: Option<String>,
    pub athlete2_birth_date: Option<NaiveDate>,
    pub athlete1_club_name: Option<String>,
    pub athlete2_club_name: Option<String>,
}

impl RecalculationRow {
    pub fn athlete1_profile(&self) -> AthleteProfile {
        AthleteProfile {
            nationality: self.athlete1_nationality.clone(),
            gender: self.athlete1_gender.clone(),
            birth_date: self.athlete1_birth_date,
        }
    }

    pub fn athlete2_profile(&self) -> Option<AthleteProfile> {
        if !self.is_pair {
            return None;
        }

        Some(AthleteProfile {
            nationality: self.athlete2_nationality.clone(),
            gender: self.athlete2_gender.clone(),
            birth_date: self.athlete2_birth_date,
        })
    }
}
