use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{OPEN_CLUB_NAME, RegistrationDetailRow};
use crate::services::classification::AthleteProfile;

/// A club reference as submitted by the frontend: either a stored club id
/// or the literal "Open" sentinel for unaffiliated entrants.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ClubRef {
    Id(i64),
    Name(String),
}

impl ClubRef {
    pub fn is_open_sentinel(&self) -> bool {
        matches!(self, ClubRef::Name(name) if name == OPEN_CLUB_NAME)
    }
}

/// One athlete in a registration payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AthleteInput {
    #[validate(custom(function = "validate_not_blank"))]
    pub last_name: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub first_name: String,

    pub birth_date: NaiveDate,

    #[validate(custom(function = "validate_not_blank"))]
    pub nationality: String,

    #[validate(custom(function = "validate_gender"))]
    pub gender: String,

    #[validate(email(message = "Valid email is required"))]
    pub email: String,

    #[validate(custom(function = "validate_not_blank"))]
    pub phone: String,

    pub club_id: Option<ClubRef>,
}

impl AthleteInput {
    pub fn profile(&self) -> AthleteProfile {
        AthleteProfile {
            nationality: Some(self.nationality.clone()),
            gender: Some(self.gender.clone()),
            birth_date: Some(self.birth_date),
        }
    }
}

/// Registration submission. Photos arrive as base64 data URIs.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegistrationRequest {
    pub athlete1: AthleteInput,

    pub is_pair: bool,

    pub athlete2: Option<AthleteInput>,

    pub locale: Option<String>,

    pub athlete1_photo: Option<String>,
    pub athlete1_photo_type: Option<String>,
    pub athlete2_photo: Option<String>,
    pub athlete2_photo_type: Option<String>,
}

impl CreateRegistrationRequest {
    /// Effective locale: French unless the caller says otherwise.
    pub fn locale_or_default(&self) -> &str {
        self.locale.as_deref().unwrap_or("fr")
    }

    /// Athlete2 only counts when the entry is a pair; a stray athlete2 on a
    /// single entry is dropped, keeping the stored iff-invariant.
    pub fn partner(&self) -> Option<&AthleteInput> {
        if self.is_pair {
            self.athlete2.as_ref()
        } else {
            None
        }
    }
}

/// Hand-written so that athlete2's constraints apply only to pair entries.
/// A stray athlete2 object on a single entry is left unvalidated here and
/// dropped by [`CreateRegistrationRequest::partner`].
impl Validate for CreateRegistrationRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut result = ValidationErrors::merge(Ok(()), "athlete1", self.athlete1.validate());

        if self.is_pair {
            match self.athlete2.as_ref() {
                Some(partner) => {
                    result = ValidationErrors::merge(result, "athlete2", partner.validate());
                }
                None => {
                    let mut error = ValidationError::new("athlete2_required");
                    error.message = Some("athlete2 is required for pair registrations".into());

                    let mut errors = result.err().unwrap_or_else(ValidationErrors::new);
                    errors.add("__all__", error);
                    result = Err(errors);
                }
            }
        }

        result
    }
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("Field is required".into());
        return Err(error);
    }

    Ok(())
}

fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    const VALID_GENDERS: &[&str] = &["male", "female"];

    if VALID_GENDERS.contains(&gender) {
        Ok(())
    } else {
        let mut error = ValidationError::new("invalid_gender");
        error.message = Some("Gender must be male or female".into());
        Err(error)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationCreatedResponse {
    pub success: bool,
    pub registration_id: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ExistsResponse {
    pub exists: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecalculationResponse {
    pub success: bool,
    pub message: String,
    pub updated_count: u64,
}

/// Admin listing row. Field names mirror the joined columns; photos are
/// re-encoded as data URIs for direct display.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminRegistrationResponse {
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
    pub athlete1_photo: Option<String>,

    pub athlete2_last_name: Option<String>,
    pub athlete2_first_name: Option<String>,
    pub athlete2_birth_date: Option<NaiveDate>,
    pub athlete2_club_id: Option<i64>,
    pub athlete2_nationality: Option<String>,
    pub athlete2_gender: Option<String>,
    pub athlete2_email: Option<String>,
    pub athlete2_phone: Option<String>,
    pub athlete2_photo: Option<String>,

    pub locale: String,
    pub etranger: Option<bool>,
    pub mosaique: Option<bool>,
    pub mixte: Option<bool>,

    pub athlete1_club_name: Option<String>,
    pub athlete2_club_name: Option<String>,
}

impl From<RegistrationDetailRow> for AdminRegistrationResponse {
    fn from(row: RegistrationDetailRow) -> Self {
        let athlete1_photo = row
            .athlete1_photo
            .as_deref()
            .map(|bytes| photo_data_uri(bytes, row.athlete1_photo_type.as_deref()));
        let athlete2_photo = row
            .athlete2_photo
            .as_deref()
            .map(|bytes| photo_data_uri(bytes, row.athlete2_photo_type.as_deref()));

        Self {
            id: row.id,
            registration_date: row.registration_date,
            is_pair: row.is_pair,
            athlete1_last_name: row.athlete1_last_name,
            athlete1_first_name: row.athlete1_first_name,
            athlete1_birth_date: row.athlete1_birth_date,
            athlete1_club_id: row.athlete1_club_id,
            athlete1_nationality: row.athlete1_nationality,
            athlete1_gender: row.athlete1_gender,
            athlete1_email: row.athlete1_email,
            athlete1_phone: row.athlete1_phone,
            athlete1_photo,
            athlete2_last_name: row.athlete2_last_name,
            athlete2_first_name: row.athlete2_first_name,
            athlete2_birth_date: row.athlete2_birth_date,
            athlete2_club_id: row.athlete2_club_id,
            athlete2_nationality: row.athlete2_nationality,
            athlete2_gender: row.athlete2_gender,
            athlete2_email: row.athlete2_email,
            athlete2_phone: row.athlete2_phone,
            athlete2_photo,
            locale: row.locale,
            etranger: row.etranger,
            mosaique: row.mosaique,
            mixte: row.mixte,
            athlete1_club_name: row.athlete1_club_name,
            athlete2_club_name: row.athlete2_club_name,
        }
    }
}

/// Decode an uploaded photo. Accepts a raw base64 payload or a
/// `data:<mime>;base64,` URI, whose prefix is stripped first.
pub fn decode_photo(data: &str) -> Result<Vec<u8>, base64::DecodeError> {
    let payload = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };

    BASE64.decode(payload)
}

pub fn photo_data_uri(bytes: &[u8], mime_type: Option<&str>) -> String {
    format!(
        "data:{};base64,{}",
        mime_type.unwrap_or("image/jpeg"),
        BASE64.encode(bytes)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn athlete() -> AthleteInput {
        AthleteInput {
            last_name: "Ben Salah".to_string(),
            first_name: "Amine".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1995, 3, 12).unwrap(),
            nationality: "Tunisia".to_string(),
            gender: "male".to_string(),
            email: "amine@example.com".to_string(),
            phone: "+216 97 475 628".to_string(),
            club_id: None,
        }
    }

    fn request(is_pair: bool, athlete2: Option<AthleteInput>) -> CreateRegistrationRequest {
        CreateRegistrationRequest {
            athlete1: athlete(),
            is_pair,
            athlete2,
            locale: None,
            athlete1_photo: None,
            athlete1_photo_type: None,
            athlete2_photo: None,
            athlete2_photo_type: None,
        }
    }

    #[test]
    fn single_registration_validates() {
        assert!(request(false, None).validate().is_ok());
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut req = request(false, None);
        req.athlete1.last_name = "   ".to_string();

        let errors = req.validate().unwrap_err();
        assert!(errors.errors().contains_key("athlete1"));
    }

    #[test]
    fn invalid_gender_is_rejected() {
        let mut req = request(false, None);
        req.athlete1.gender = "other".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn pair_without_athlete2_is_rejected() {
        let errors = request(true, None).validate().unwrap_err();
        // Cross-field failures land under the synthetic __all__ key.
        assert!(errors.errors().contains_key("__all__"));
    }

    #[test]
    fn stray_invalid_athlete2_is_accepted_on_single_entries() {
        let mut stray = athlete();
        stray.email = "not-an-email".to_string();
        stray.gender = "other".to_string();

        // Not a pair: athlete2's constraints do not apply, whatever the
        // frontend happened to send along.
        let req = request(false, Some(stray));
        assert!(req.validate().is_ok());
        assert!(req.partner().is_none());
    }

    #[test]
    fn pair_with_invalid_partner_email_is_rejected() {
        let mut partner = athlete();
        partner.email = "not-an-email".to_string();

        let errors = request(true, Some(partner)).validate().unwrap_err();
        assert!(errors.errors().contains_key("athlete2"));
    }

    #[test]
    fn athlete2_is_ignored_on_single_entries() {
        let req = request(false, Some(athlete()));
        assert!(req.partner().is_none());
        assert!(request(true, Some(athlete())).partner().is_some());
    }

    #[test]
    fn locale_defaults_to_french() {
        assert_eq!(request(false, None).locale_or_default(), "fr");

        let mut req = request(false, None);
        req.locale = Some("en".to_string());
        assert_eq!(req.locale_or_default(), "en");
    }

    #[test]
    fn decode_photo_strips_data_uri_prefix() {
        let bytes = b"fake image bytes";
        let uri = format!("data:image/png;base64,{}", BASE64.encode(bytes));

        assert_eq!(decode_photo(&uri).unwrap(), bytes);
        assert_eq!(decode_photo(&BASE64.encode(bytes)).unwrap(), bytes);
        assert!(decode_photo("not base64 at all!").is_err());
    }

    #[test]
    fn photo_data_uri_falls_back_to_jpeg() {
        let uri = photo_data_uri(b"x", None);
        assert!(uri.starts_with("data:image/jpeg;base64,"));

        let uri = photo_data_uri(b"x", Some("image/png"));
        assert!(uri.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn open_sentinel_detection() {
        assert!(ClubRef::Name("Open".to_string()).is_open_sentinel());
        assert!(!ClubRef::Name("CPSS".to_string()).is_open_sentinel());
        assert!(!ClubRef::Id(3).is_open_sentinel());
    }
}
