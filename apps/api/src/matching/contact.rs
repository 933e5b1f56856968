use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::models::profile::ProfileRow;

const WHATSAPP_BASE: &str = "https://wa.me";

/// Characters left bare by JavaScript's `encodeURIComponent`; spaces become `%20`, never `+`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// WhatsApp deep link inviting the candidate to a job.
/// Only offered when the candidate consented to contact and has a usable phone.
pub fn whatsapp_link(profile: &ProfileRow, job_title: &str) -> Option<String> {
    if !profile.consent {
        return None;
    }
    let digits: String = profile
        .phone
        .as_deref()?
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return None;
    }

    let text = format!(
        "Hi {}, we have a job opening: {}. If interested, reply here.",
        profile.full_name, job_title
    );
    Some(format!(
        "{WHATSAPP_BASE}/{digits}?text={}",
        utf8_percent_encode(&text, URI_COMPONENT)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn profile(phone: Option<&str>, consent: bool) -> ProfileRow {
        ProfileRow {
            id: Uuid::new_v4(),
            auth_uid: "uid".to_string(),
            full_name: "Asha".to_string(),
            headline: None,
            city: "Pune".to_string(),
            skills: vec![],
            years_experience: None,
            phone: phone.map(str::to_string),
            consent,
            role: "candidate".to_string(),
            avatar_path: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_link_strips_non_digits_from_phone() {
        let link = whatsapp_link(&profile(Some("+91 98-7654 3210"), true), "Electrician").unwrap();
        assert!(link.starts_with("https://wa.me/919876543210?text="), "got {link}");
        assert!(link.contains("Asha"));
        assert!(link.contains("Electrician"));
        assert!(!link.contains(' '));
        assert!(link.contains("%20"), "got {link}");
        assert!(!link.contains('+'), "got {link}");
    }

    #[test]
    fn test_message_is_uri_component_encoded() {
        let mut candidate = profile(Some("9876543210"), true);
        candidate.full_name = "Asha Rao".to_string();
        let link = whatsapp_link(&candidate, "Senior Electrician (Night) & Helper").unwrap();
        assert_eq!(
            link,
            "https://wa.me/9876543210?text=Hi%20Asha%20Rao%2C%20we%20have%20a%20job%20opening%3A%20\
             Senior%20Electrician%20(Night)%20%26%20Helper.%20If%20interested%2C%20reply%20here."
        );
    }

    #[test]
    fn test_no_link_without_consent() {
        assert_eq!(whatsapp_link(&profile(Some("9876543210"), false), "Job"), None);
    }

    #[test]
    fn test_no_link_without_phone_digits() {
        assert_eq!(whatsapp_link(&profile(None, true), "Job"), None);
        assert_eq!(whatsapp_link(&profile(Some("n/a"), true), "Job"), None);
    }
}
