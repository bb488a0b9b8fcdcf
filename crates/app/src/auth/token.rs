//! Token signing, parsing and validation.
//!
//! Tokens are HS256 JWTs. The verifier pins the HMAC family itself rather
//! than trusting the algorithm a token declares.

use std::fmt;

use jiff::{SignedDuration, Timestamp};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode,
    errors::{Error as JwtError, ErrorKind},
};
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;

use crate::auth::{Claims, IssuedToken, SigningSecret};

/// Lifetime of an access token.
pub const ACCESS_TOKEN_TTL: SignedDuration = SignedDuration::from_mins(15);

/// Number of random bytes in a token identifier.
pub const TOKEN_ID_BYTES: usize = 16;

const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

const ACCEPTED_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

/// Why a token string was refused.
///
/// Each failure is an independent flag. Only `expired` may be tolerated, and
/// only by [`TokenCodec::validate_expired_token`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenRejection {
    /// Past its expiry second.
    pub expired: bool,
    /// Not a well-formed token or claims set.
    pub malformed: bool,
    /// Signature does not match the secret.
    pub bad_signature: bool,
    /// Header declares a non-HMAC algorithm.
    pub wrong_algorithm: bool,
}

impl TokenRejection {
    /// Any failure flag is set.
    #[must_use]
    pub const fn is_rejected(self) -> bool {
        self.expired || self.malformed || self.bad_signature || self.wrong_algorithm
    }

    /// The same rejection with the expiry flag cleared.
    #[must_use]
    pub const fn ignoring_expiry(self) -> Self {
        Self {
            expired: false,
            ..self
        }
    }

    /// Rejected for expiry and nothing else.
    #[must_use]
    pub const fn is_expired_only(self) -> bool {
        self.expired && !self.ignoring_expiry().is_rejected()
    }
}

impl fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_expired_only() {
            f.write_str("token expired")
        } else {
            f.write_str("token invalid")
        }
    }
}

impl std::error::Error for TokenRejection {}

impl From<JwtError> for TokenRejection {
    fn from(error: JwtError) -> Self {
        match error.kind() {
            ErrorKind::InvalidSignature => Self {
                bad_signature: true,
                ..Self::default()
            },
            ErrorKind::InvalidAlgorithm
            | ErrorKind::InvalidAlgorithmName
            | ErrorKind::MissingAlgorithm => Self {
                wrong_algorithm: true,
                ..Self::default()
            },
            ErrorKind::ExpiredSignature => Self {
                expired: true,
                ..Self::default()
            },
            _ => Self {
                malformed: true,
                ..Self::default()
            },
        }
    }
}

/// Token issuance and validation failures.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Tokens are only issued to a named subject.
    #[error("token subject cannot be empty")]
    EmptySubject,

    /// The token id could not be generated.
    #[error("failed to generate token id")]
    Entropy(#[source] rand::Error),

    /// The expiry instant overflowed.
    #[error("failed to compute token expiry")]
    Expiry(#[source] jiff::Error),

    /// Encoding or signing failed.
    #[error("failed to sign token")]
    Signing(#[source] JwtError),

    /// A presented token was refused.
    #[error(transparent)]
    Rejected(#[from] TokenRejection),
}

/// A token whose structure, algorithm and signature have been verified.
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    header: Header,
    claims: Claims,
}

impl VerifiedToken {
    /// Statically typed claims of the token.
    #[must_use]
    pub fn claims(&self) -> &Claims {
        &self.claims
    }

    /// Take the claims out of the token.
    #[must_use]
    pub fn into_claims(self) -> Claims {
        self.claims
    }

    /// Algorithm declared in the header. Always an HMAC variant.
    #[must_use]
    pub fn algorithm(&self) -> Algorithm {
        self.header.alg
    }
}

/// Builds, signs and verifies tokens with one signing secret.
#[derive(Debug, Clone)]
pub struct TokenCodec {
    secret: SigningSecret,
    validation: Validation,
}

impl TokenCodec {
    /// Codec signing with HS256 and accepting any HMAC variant.
    #[must_use]
    pub fn new(secret: SigningSecret) -> Self {
        let mut validation = Validation::new(SIGNING_ALGORITHM);

        validation.algorithms = ACCEPTED_ALGORITHMS.to_vec();
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self { secret, validation }
    }

    /// Issue a short-lived access token for `username`.
    ///
    /// # Errors
    ///
    /// Returns an error if `username` is empty, or if random generation or
    /// signing fails.
    pub fn access_token(&self, username: &str) -> Result<IssuedToken, TokenError> {
        let expires_at = Timestamp::now()
            .checked_add(ACCESS_TOKEN_TTL)
            .map_err(TokenError::Expiry)?;

        self.issue(username, Some(expires_at))
    }

    /// Issue a refresh token for `username`. Refresh tokens carry no expiry.
    ///
    /// # Errors
    ///
    /// Returns an error if random generation or signing fails.
    pub fn refresh_token(&self, username: &str) -> Result<String, TokenError> {
        self.issue(username, None).map(|issued| issued.token)
    }

    /// Verify `token` and reject it if expired.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Rejected`] for malformed, forged, wrongly signed
    /// or expired tokens.
    pub fn validate_token(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let (verified, rejection) = self.inspect(token, Timestamp::now())?;

        if rejection.is_rejected() {
            return Err(rejection.into());
        }

        Ok(verified)
    }

    /// Verify `token`, accepting it even when expired.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Rejected`] for malformed, forged or wrongly
    /// signed tokens.
    pub fn validate_expired_token(&self, token: &str) -> Result<VerifiedToken, TokenError> {
        let (verified, rejection) = self.inspect(token, Timestamp::now())?;

        if rejection.ignoring_expiry().is_rejected() {
            return Err(rejection.into());
        }

        Ok(verified)
    }

    pub(crate) fn issue(
        &self,
        username: &str,
        expires_at: Option<Timestamp>,
    ) -> Result<IssuedToken, TokenError> {
        if username.is_empty() {
            return Err(TokenError::EmptySubject);
        }

        let claims = Claims {
            sub: username.to_string(),
            jti: generate_token_id()?,
            exp: expires_at.map(Timestamp::as_second),
        };

        let token = encode(
            &Header::new(SIGNING_ALGORITHM),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(TokenError::Signing)?;

        Ok(IssuedToken { claims, token })
    }

    /// Parse `token` and report its expiry state at `now`.
    ///
    /// Unparseable or unverifiable strings fail before expiry is considered.
    fn inspect(
        &self,
        token: &str,
        now: Timestamp,
    ) -> Result<(VerifiedToken, TokenRejection), TokenRejection> {
        let verified = self.parse_token(token)?;

        let rejection = TokenRejection {
            expired: verified.claims.is_expired_at(now),
            ..TokenRejection::default()
        };

        Ok((verified, rejection))
    }

    fn parse_token(&self, token: &str) -> Result<VerifiedToken, TokenRejection> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &self.validation,
        )
        .map(|data| VerifiedToken {
            header: data.header,
            claims: data.claims,
        })
        .map_err(TokenRejection::from)
    }
}

fn generate_token_id() -> Result<String, TokenError> {
    let mut id = [0_u8; TOKEN_ID_BYTES];

    OsRng.try_fill_bytes(&mut id).map_err(TokenError::Entropy)?;

    Ok(hex::encode(id))
}
