//! Password reset links

/// Query value of `type` that marks a reset link
const RECOVERY_TYPE: &str = "recovery";

/// A password-reset request carried in the reset page's query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordResetLink {
    pub token: String,
}

impl PasswordResetLink {
    /// Parse `token=...&type=recovery`. Returns `None` unless `type` is
    /// exactly `recovery` and a non-empty token is present. A leading `?` is
    /// ignored.
    pub fn from_query(query: &str) -> Option<Self> {
        let mut token = None;
        let mut is_recovery = false;

        for pair in query.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let value = decode(value)?;
            match key {
                "token" => token = Some(value),
                "type" => is_recovery = value == RECOVERY_TYPE,
                _ => {}
            }
        }

        match token {
            Some(token) if is_recovery && !token.is_empty() => Some(Self { token }),
            _ => None,
        }
    }
}

fn decode(value: &str) -> Option<String> {
    let spaced = value.replace('+', " ");
    urlencoding::decode(&spaced).ok().map(|v| v.into_owned())
}
