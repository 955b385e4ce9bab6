use chrono::{Datelike, NaiveDate};

use crate::models::OPEN_CLUB_NAME;

/// Competition start date, the reference point for age brackets.
pub const COMPETITION_YEAR: i32 = 2026;

/// Entrants aged 20 or less on the competition date count as "young".
pub const YOUNG_AGE_LIMIT: i32 = 20;

const TUNISIAN_ALIASES: &[&str] = &["tunisia", "tunisie", "tn", "tunisian"];

/// Athlete facts the classifier operates on. Fields are optional because
/// legacy rows may be reclassified with incomplete data.
#[derive(Debug, Clone, Default)]
pub struct AthleteProfile {
    pub nationality: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<NaiveDate>,
}

/// The three derived category flags, computed together at submission time
/// and recomputed by the batch workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DerivedFlags {
    pub etranger: bool,
    pub mosaique: bool,
    pub mixte: bool,
}

pub fn competition_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(COMPETITION_YEAR, 5, 1).expect("valid competition date")
}

pub fn is_tunisian(nationality: Option<&str>) -> bool {
    match nationality {
        Some(nat) => TUNISIAN_ALIASES.contains(&nat.trim().to_lowercase().as_str()),
        None => false,
    }
}

/// Whole years on the competition date, decremented when the birthday has
/// not yet passed that year.
pub fn age_on_competition(birth_date: Option<NaiveDate>) -> Option<i32> {
    let birth = birth_date?;
    let reference = competition_date();

    let mut age = reference.year() - birth.year();
    if reference.month() < birth.month()
        || (reference.month() == birth.month() && reference.day() < birth.day())
    {
        age -= 1;
    }

    Some(age)
}

/// Etranger: a single entrant is foreign iff not Tunisian; a pair is foreign
/// iff neither athlete is Tunisian.
pub fn etranger(
    athlete1_nationality: Option<&str>,
    athlete2_nationality: Option<&str>,
    is_pair: bool,
) -> bool {
    let athlete1_is_tunisian = is_tunisian(athlete1_nationality);

    if !is_pair {
        return !athlete1_is_tunisian;
    }

    !athlete1_is_tunisian && !is_tunisian(athlete2_nationality)
}

/// Mosaique: eligibility for the mixed competition bracket.
///
/// Singles always qualify. Pairs qualify when the genders are mixed or both
/// female, when the age brackets differ (young is <= 20), when both are
/// young, or when two adults have different nationalities. The only pair
/// that fails with complete data is two same-nationality adult men.
pub fn mosaique(
    athlete1: &AthleteProfile,
    athlete2: Option<&AthleteProfile>,
    is_pair: bool,
) -> bool {
    if !is_pair {
        return true;
    }

    let Some(athlete2) = athlete2 else {
        return false;
    };

    let gender1 = athlete1.gender.as_deref();
    let gender2 = athlete2.gender.as_deref();

    match (gender1, gender2) {
        (Some("male"), Some("female")) | (Some("female"), Some("male")) => return true,
        (Some("female"), Some("female")) => return true,
        _ => {}
    }

    let (Some(age1), Some(age2)) = (
        age_on_competition(athlete1.birth_date),
        age_on_competition(athlete2.birth_date),
    ) else {
        return false;
    };

    let young1 = age1 <= YOUNG_AGE_LIMIT;
    let young2 = age2 <= YOUNG_AGE_LIMIT;

    if young1 != young2 {
        return true;
    }

    if young1 && young2 {
        return true;
    }

    // Both adults: different nationalities qualify.
    let nat1 = athlete1.nationality.as_deref().unwrap_or("").to_lowercase();
    let nat2 = athlete2.nationality.as_deref().unwrap_or("").to_lowercase();

    nat1 != nat2
}

/// Mixte: the pair's club affiliations count as different for ranking.
///
/// Both in the Open club is not mixte; exactly one in Open is; otherwise the
/// normalized club names must differ.
pub fn mixte(club1_name: Option<&str>, club2_name: Option<&str>, is_pair: bool) -> bool {
    if !is_pair {
        return false;
    }

    let club1 = club1_name.unwrap_or("").trim().to_lowercase();
    let club2 = club2_name.unwrap_or("").trim().to_lowercase();

    let open = OPEN_CLUB_NAME.to_lowercase();
    let is_open1 = club1 == open;
    let is_open2 = club2 == open;

    if is_open1 && is_open2 {
        return false;
    }

    if is_open1 != is_open2 {
        return true;
    }

    club1 != club2
}

/// Compute all three flags for one registration.
pub fn classify(
    athlete1: &AthleteProfile,
    athlete2: Option<&AthleteProfile>,
    club1_name: Option<&str>,
    club2_name: Option<&str>,
    is_pair: bool,
) -> DerivedFlags {
    DerivedFlags {
        etranger: etranger(
            athlete1.nationality.as_deref(),
            athlete2.and_then(|a| a.nationality.as_deref()),
            is_pair,
        ),
        mosaique: mosaique(athlete1, athlete2, is_pair),
        mixte: mixte(club1_name, club2_name, is_pair),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(nationality: &str, gender: &str, birth_year: i32) -> AthleteProfile {
        AthleteProfile {
            nationality: Some(nationality.to_string()),
            gender: Some(gender.to_string()),
            birth_date: NaiveDate::from_ymd_opt(birth_year, 6, 15),
        }
    }

    #[test]
    fn tunisian_aliases_are_case_and_whitespace_insensitive() {
        assert!(is_tunisian(Some("Tunisia")));
        assert!(is_tunisian(Some("TUNISIE")));
        assert!(is_tunisian(Some("  tn  ")));
        assert!(is_tunisian(Some("Tunisian")));
        assert!(!is_tunisian(Some("France")));
        assert!(!is_tunisian(Some("")));
        assert!(!is_tunisian(None));
    }

    #[test]
    fn age_uses_birthday_cutoff_on_competition_date() {
        // Born 2006-05-01: turns 20 exactly on the competition date.
        let on_the_day = NaiveDate::from_ymd_opt(2006, 5, 1);
        assert_eq!(age_on_competition(on_the_day), Some(20));

        // Born 2006-05-02: birthday not yet reached, still 19.
        let day_after = NaiveDate::from_ymd_opt(2006, 5, 2);
        assert_eq!(age_on_competition(day_after), Some(19));

        // Born 2006-04-30: already 20.
        let day_before = NaiveDate::from_ymd_opt(2006, 4, 30);
        assert_eq!(age_on_competition(day_before), Some(20));

        assert_eq!(age_on_competition(None), None);
    }

    #[test]
    fn etranger_single_follows_nationality() {
        assert!(etranger(Some("France"), None, false));
        assert!(!etranger(Some("Tunisie"), None, false));
        assert!(etranger(None, None, false));
    }

    #[test]
    fn etranger_pair_requires_both_foreign() {
        assert!(!etranger(Some("Tunisia"), Some("France"), true));
        assert!(!etranger(Some("France"), Some("tn"), true));
        assert!(etranger(Some("France"), Some("Italy"), true));
        assert!(!etranger(Some("Tunisia"), Some("Tunisie"), true));
    }

    #[test]
    fn mosaique_single_is_always_true() {
        let athlete = profile("France", "male", 1990);
        assert!(mosaique(&athlete, None, false));

        let blank = AthleteProfile::default();
        assert!(mosaique(&blank, None, false));
    }

    #[test]
    fn mosaique_mixed_genders_win_before_everything_else() {
        let a = profile("France", "male", 2001);
        let b = profile("France", "female", 2001);
        assert!(mosaique(&a, Some(&b), true));
        assert!(mosaique(&b, Some(&a), true));
    }

    #[test]
    fn mosaique_two_females_qualify() {
        let a = profile("France", "female", 2001);
        let b = profile("France", "female", 2001);
        assert!(mosaique(&a, Some(&b), true));
    }

    #[test]
    fn mosaique_missing_birth_date_disqualifies_male_pairs() {
        let a = profile("France", "male", 2001);
        let mut b = profile("Italy", "male", 2001);
        b.birth_date = None;
        assert!(!mosaique(&a, Some(&b), true));
    }

    #[test]
    fn mosaique_young_and_adult_qualify() {
        let young = profile("France", "male", 2007); // 18 on competition day
        let adult = profile("France", "male", 1996); // 29
        assert!(mosaique(&young, Some(&adult), true));
        assert!(mosaique(&adult, Some(&young), true));
    }

    #[test]
    fn mosaique_two_young_qualify() {
        let a = profile("France", "male", 2008);
        let b = profile("France", "male", 2007);
        assert!(mosaique(&a, Some(&b), true));
    }

    #[test]
    fn mosaique_two_adults_need_different_nationalities() {
        let a = profile("France", "male", 2001); // 24
        let same = profile("france", "male", 2001);
        let other = profile("Italy", "male", 2001);

        assert!(!mosaique(&a, Some(&same), true));
        assert!(mosaique(&a, Some(&other), true));
    }

    #[test]
    fn mixte_single_is_always_false() {
        assert!(!mixte(Some("ClubA"), None, false));
        assert!(!mixte(None, None, false));
    }

    #[test]
    fn mixte_pair_rules() {
        assert!(!mixte(Some("Open"), Some("Open"), true));
        assert!(mixte(Some("Open"), Some("ClubA"), true));
        assert!(mixte(Some("ClubA"), Some("Open"), true));
        assert!(!mixte(Some("ClubA"), Some("ClubA"), true));
        assert!(mixte(Some("ClubA"), Some("ClubB"), true));
    }

    #[test]
    fn mixte_normalizes_names_before_comparing() {
        assert!(!mixte(Some(" open "), Some("OPEN"), true));
        assert!(!mixte(Some("Club A "), Some(" club a"), true));
    }

    #[test]
    fn classify_combines_all_three_flags() {
        let a1 = profile("Tunisia", "male", 1996);
        let a2 = profile("France", "female", 1996);

        let flags = classify(&a1, Some(&a2), Some("CPSS"), Some("Open"), true);
        assert!(!flags.etranger); // one Tunisian in the pair
        assert!(flags.mosaique); // mixed genders
        assert!(flags.mixte); // exactly one Open affiliation
    }

    #[test]
    fn classify_same_inputs_same_flags() {
        let a1 = profile("France", "male", 2001);
        let a2 = profile("France", "male", 2001);

        let first = classify(&a1, Some(&a2), Some("ClubA"), Some("ClubA"), true);
        let second = classify(&a1, Some(&a2), Some("ClubA"), Some("ClubA"), true);
        assert_eq!(first, second);
        assert!(!first.mosaique);
        assert!(!first.mixte);
    }
}
