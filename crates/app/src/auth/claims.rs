//! Token claims and issuance results.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::{auth::VerifiedToken, policy::Rule};

/// Authenticated payload carried by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to.
    pub sub: String,

    /// Hex-encoded random token identifier.
    pub jti: String,

    /// Expiry as seconds since the Unix epoch. Refresh tokens carry none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Claims {
    /// Username the token was issued to.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.sub
    }

    /// Token identifier, unique per issued token.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.jti
    }

    /// Expiry instant, `None` for refresh tokens.
    #[must_use]
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.exp
            .and_then(|seconds| Timestamp::from_second(seconds).ok())
    }

    /// A token is expired from its expiry second onwards.
    #[must_use]
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.exp.is_some_and(|exp| now.as_second() >= exp)
    }
}

/// Freshly signed token together with its claims.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Claims that were signed.
    pub claims: Claims,
    /// Signed compact form, suitable for a bearer header.
    pub token: String,
}

/// Access and refresh tokens handed to a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    /// Short-lived bearer credential.
    pub access_token: String,
    /// Non-expiring token exchanged for a new pair.
    pub refresh_token: String,
    /// Expiry of `access_token`.
    pub expires_at: Option<Timestamp>,
}

/// A verified access token and the rule set resolved for its subject.
#[derive(Debug, Clone)]
pub struct Identity {
    /// The verified access token.
    pub token: VerifiedToken,
    /// Rules bound to the token subject.
    pub rules: Vec<Rule>,
}

impl Identity {
    /// Username of the authenticated requester.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.token.claims().subject()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(exp: Option<i64>) -> Claims {
        Claims {
            sub: "alice".to_string(),
            jti: "00".to_string(),
            exp,
        }
    }

    #[test]
    fn expiry_second_itself_is_expired() -> testresult::TestResult {
        let now = Timestamp::from_second(1_700_000_000)?;

        assert!(claims(Some(1_700_000_000)).is_expired_at(now));
        assert!(claims(Some(1_699_999_999)).is_expired_at(now));
        assert!(!claims(Some(1_700_000_001)).is_expired_at(now));

        Ok(())
    }

    #[test]
    fn claims_without_expiry_never_expire() {
        assert!(!claims(None).is_expired_at(Timestamp::MAX));
    }

    #[test]
    fn refresh_claims_omit_exp_when_serialized() -> testresult::TestResult {
        let json = serde_json::to_value(claims(None))?;

        assert_eq!(json, serde_json::json!({ "sub": "alice", "jti": "00" }));

        Ok(())
    }
}
