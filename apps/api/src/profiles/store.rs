use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{ProfileRow, Role};

/// Fields written by a profile upsert.
pub struct ProfileFields<'a> {
    pub full_name: &'a str,
    pub headline: Option<&'a str>,
    pub city: &'a str,
    pub skills: &'a [String],
    pub years_experience: Option<i32>,
    pub phone: Option<&'a str>,
    pub consent: bool,
    pub role: Role,
}

pub async fn find_by_auth_uid(
    pool: &PgPool,
    auth_uid: &str,
) -> Result<Option<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE auth_uid = $1")
        .bind(auth_uid)
        .fetch_optional(pool)
        .await
}

/// Inserts or replaces the profile owned by `auth_uid`. One profile per identity.
pub async fn upsert(
    pool: &PgPool,
    auth_uid: &str,
    fields: ProfileFields<'_>,
) -> Result<ProfileRow, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO profiles
            (auth_uid, full_name, headline, city, skills, years_experience, phone, consent, role)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (auth_uid) DO UPDATE SET
            full_name = EXCLUDED.full_name,
            headline = EXCLUDED.headline,
            city = EXCLUDED.city,
            skills = EXCLUDED.skills,
            years_experience = EXCLUDED.years_experience,
            phone = EXCLUDED.phone,
            consent = EXCLUDED.consent,
            role = EXCLUDED.role,
            updated_at = now()
        RETURNING *
        "#,
    )
    .bind(auth_uid)
    .bind(fields.full_name)
    .bind(fields.headline)
    .bind(fields.city)
    .bind(fields.skills)
    .bind(fields.years_experience)
    .bind(fields.phone)
    .bind(fields.consent)
    .bind(fields.role.as_str())
    .fetch_one(pool)
    .await
}

pub async fn set_avatar_path(
    pool: &PgPool,
    profile_id: Uuid,
    avatar_path: &str,
) -> Result<ProfileRow, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        "UPDATE profiles SET avatar_path = $1, updated_at = now() WHERE id = $2 RETURNING *",
    )
    .bind(avatar_path)
    .bind(profile_id)
    .fetch_one(pool)
    .await
}

/// Candidate profiles in a stable order (oldest first), the input order for ranking.
///
/// Matches `Role::parse_lenient`: blank or unknown role tags count as candidates.
pub async fn list_candidates(pool: &PgPool) -> Result<Vec<ProfileRow>, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        SELECT * FROM profiles
        WHERE NOT (lower(btrim(role)) = ANY($1))
        ORDER BY created_at, id
        "#,
    )
    .bind(non_candidate_tags())
    .fetch_all(pool)
    .await
}

fn non_candidate_tags() -> Vec<String> {
    Role::NON_CANDIDATE
        .iter()
        .map(|role| role.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excluded_tags_are_exactly_the_non_candidate_roles() {
        let tags = non_candidate_tags();
        assert_eq!(tags, vec!["employer", "admin", "superadmin"]);
        for tag in ["", "candidate", "Candidate", "recruiter"] {
            assert!(!tags.contains(&tag.trim().to_ascii_lowercase()));
            assert_eq!(Role::parse_lenient(tag), Role::Candidate);
        }
        for tag in &tags {
            assert_ne!(Role::parse_lenient(tag), Role::Candidate);
        }
    }
}
