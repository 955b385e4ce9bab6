use sqlx::PgPool;
use storage::{
    dto::registration::{AthleteInput, ClubRef, CreateRegistrationRequest, decode_photo},
    models::NewRegistration,
    repository::{club::ClubRepository, registration::RegistrationRepository},
    services::classification::classify,
};

use crate::error::{WebError, WebResult};

/// Validated submission workflow: resolve club references, look up club
/// names, classify, then insert. Steps run in data-dependency order; the
/// insert itself is a single atomic statement.
pub async fn submit_registration(
    pool: &PgPool,
    req: &CreateRegistrationRequest,
) -> WebResult<i64> {
    let clubs = ClubRepository::new(pool);
    let partner = req.partner();

    let athlete1_club_id = resolve_club(&clubs, req.athlete1.club_id.as_ref()).await?;
    let athlete2_club_id = match partner {
        Some(athlete) => resolve_club(&clubs, athlete.club_id.as_ref()).await?,
        None => None,
    };

    let athlete1_club_name = club_name(&clubs, athlete1_club_id).await?;
    let athlete2_club_name = club_name(&clubs, athlete2_club_id).await?;

    let athlete1_profile = req.athlete1.profile();
    let athlete2_profile = partner.map(AthleteInput::profile);

    let flags = classify(
        &athlete1_profile,
        athlete2_profile.as_ref(),
        athlete1_club_name.as_deref(),
        athlete2_club_name.as_deref(),
        req.is_pair,
    );

    let athlete1_photo = decode_optional_photo(req.athlete1_photo.as_deref())?;
    let athlete2_photo = match partner {
        Some(_) => decode_optional_photo(req.athlete2_photo.as_deref())?,
        None => None,
    };

    let new = NewRegistration {
        is_pair: req.is_pair,

        athlete1_last_name: req.athlete1.last_name.trim().to_string(),
        athlete1_first_name: req.athlete1.first_name.trim().to_string(),
        athlete1_birth_date: req.athlete1.birth_date,
        athlete1_club_id,
        athlete1_nationality: req.athlete1.nationality.trim().to_string(),
        athlete1_gender: req.athlete1.gender.clone(),
        athlete1_email: req.athlete1.email.clone(),
        athlete1_phone: req.athlete1.phone.trim().to_string(),
        athlete1_photo,
        athlete1_photo_type: req.athlete1_photo_type.clone(),

        athlete2_last_name: partner.map(|a| a.last_name.trim().to_string()),
        athlete2_first_name: partner.map(|a| a.first_name.trim().to_string()),
        athlete2_birth_date: partner.map(|a| a.birth_date),
        athlete2_club_id,
        athlete2_nationality: partner.map(|a| a.nationality.trim().to_string()),
        athlete2_gender: partner.map(|a| a.gender.clone()),
        athlete2_email: partner.map(|a| a.email.clone()),
        athlete2_phone: partner.map(|a| a.phone.trim().to_string()),
        athlete2_photo,
        athlete2_photo_type: partner.and_then(|_| req.athlete2_photo_type.clone()),

        locale: req.locale_or_default().to_string(),

        etranger: flags.etranger,
        mosaique: flags.mosaique,
        mixte: flags.mixte,
    };

    let id = RegistrationRepository::new(pool).insert(&new).await?;

    Ok(id)
}

pub async fn email_exists(pool: &PgPool, email: &str) -> WebResult<bool> {
    let exists = RegistrationRepository::new(pool)
        .email_exists(email)
        .await?;
    Ok(exists)
}

pub async fn phone_exists(pool: &PgPool, phone: &str) -> WebResult<bool> {
    let exists = RegistrationRepository::new(pool)
        .phone_exists(phone)
        .await?;
    Ok(exists)
}

/// Map a submitted club reference to a stored club id. Ids pass through
/// unchecked; the "Open" sentinel is created lazily on first use.
async fn resolve_club(
    clubs: &ClubRepository<'_>,
    club_ref: Option<&ClubRef>,
) -> WebResult<Option<i64>> {
    match club_ref {
        None => Ok(None),
        Some(ClubRef::Id(id)) => Ok(Some(*id)),
        Some(reference @ ClubRef::Name(name)) => {
            if reference.is_open_sentinel() {
                Ok(Some(clubs.resolve_open().await?))
            } else {
                Err(WebError::BadRequest(format!(
                    "Unknown club reference: {name}"
                )))
            }
        }
    }
}

async fn club_name(clubs: &ClubRepository<'_>, id: Option<i64>) -> WebResult<Option<String>> {
    match id {
        Some(id) => Ok(clubs.name_of(id).await?),
        None => Ok(None),
    }
}

fn decode_optional_photo(photo: Option<&str>) -> WebResult<Option<Vec<u8>>> {
    photo
        .map(|data| {
            decode_photo(data)
                .map_err(|_| WebError::BadRequest("Invalid photo encoding".to_string()))
        })
        .transpose()
}
