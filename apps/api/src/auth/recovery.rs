use reqwest::Url;

use crate::errors::AppError;

pub const MIN_PASSWORD_CHARS: usize = 6;

/// Pulls the recovery access token out of a password-reset link.
///
/// The query string wins; some providers put the token in the `#` fragment
/// instead, so that is checked second.
pub fn extract_recovery_token(link: &str) -> Option<String> {
    let url = Url::parse(link).ok()?;
    if let Some(token) = access_token_param(&url) {
        return Some(token);
    }

    let fragment = url.fragment()?.trim_start_matches('#');
    let mut as_query = url.clone();
    as_query.set_fragment(None);
    as_query.set_query(Some(fragment));
    access_token_param(&as_query)
}

fn access_token_param(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, value)| key == "access_token" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

pub fn validate_new_password(password: &str) -> Result<(), AppError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_CHARS} characters."
        )));
    }
    Ok(())
}
