use std::collections::HashMap;

use serde_json::Value;

use super::ExchangeError;

/// Untrusted claim map decoded from the forwarded payload.
///
/// The payload arrives from the trusted upstream hop and is never
/// cryptographically re-verified here; the values themselves are still
/// treated as arbitrary JSON.
pub type ExternalClaimSet = HashMap<String, Value>;

/// The fixed claim subset copied into every internal token.
///
/// Allow-listing is a narrowing step: every external claim not named here is
/// dropped on the floor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowListedClaims {
    pub sub: String,
    pub preferred_username: String,
}

impl AllowListedClaims {
    /// Copy the trusted subset out of the external claim map.
    ///
    /// `sub` is mandatory and must be non-empty; `preferred_username`
    /// defaults to an empty string when absent, matching the upstream
    /// contract.
    pub fn from_external(claims: &ExternalClaimSet) -> Result<Self, ExchangeError> {
        let sub = claim_str(claims, "sub").unwrap_or_default();
        if sub.is_empty() {
            return Err(ExchangeError::MissingSubject);
        }

        let preferred_username = claim_str(claims, "preferred_username").unwrap_or_default();

        Ok(Self {
            sub,
            preferred_username,
        })
    }
}

fn claim_str(claims: &ExternalClaimSet, name: &str) -> Option<String> {
    // A JSON null is the same as an absent claim, never the string "null".
    claims.get(name).and_then(|v| match v {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn external(payload: Value) -> ExternalClaimSet {
        serde_json::from_value(payload).unwrap()
    }

    #[test]
    fn copies_only_the_allow_listed_subset() {
        let claims = external(json!({
            "sub": "alice",
            "preferred_username": "alice@example.com",
            "email": "alice@example.com",
            "roles": ["admin", "ops"],
            "tenant_id": "t-42"
        }));

        let narrowed = AllowListedClaims::from_external(&claims).unwrap();
        assert_eq!(narrowed.sub, "alice");
        assert_eq!(narrowed.preferred_username, "alice@example.com");
    }

    #[test]
    fn missing_sub_is_rejected() {
        let claims = external(json!({"preferred_username": "bob"}));
        assert!(matches!(
            AllowListedClaims::from_external(&claims),
            Err(ExchangeError::MissingSubject)
        ));
    }

    #[test]
    fn empty_sub_is_rejected() {
        let claims = external(json!({"sub": "", "preferred_username": "bob"}));
        assert!(matches!(
            AllowListedClaims::from_external(&claims),
            Err(ExchangeError::MissingSubject)
        ));
    }

    #[test]
    fn absent_preferred_username_defaults_to_empty() {
        let claims = external(json!({"sub": "carol"}));
        let narrowed = AllowListedClaims::from_external(&claims).unwrap();
        assert_eq!(narrowed.preferred_username, "");
    }

    #[test]
    fn null_sub_is_rejected() {
        let claims = external(json!({"sub": null, "preferred_username": "bob"}));
        assert!(matches!(
            AllowListedClaims::from_external(&claims),
            Err(ExchangeError::MissingSubject)
        ));
    }

    #[test]
    fn null_preferred_username_defaults_to_empty() {
        let claims = external(json!({"sub": "carol", "preferred_username": null}));
        let narrowed = AllowListedClaims::from_external(&claims).unwrap();
        assert_eq!(narrowed.preferred_username, "");
    }

    #[test]
    fn non_string_sub_is_stringified() {
        let claims = external(json!({"sub": 1042}));
        let narrowed = AllowListedClaims::from_external(&claims).unwrap();
        assert_eq!(narrowed.sub, "1042");
    }
}
