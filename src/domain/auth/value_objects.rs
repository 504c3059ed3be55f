use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::errors::{HashError, ValidationError};

lazy_static! {
  /// Permissive RFC-5322-like pattern; the structural rules around it do the
  /// rest of the work.
  static ref EMAIL_REGEX: Regex =
    Regex::new(r"^[a-zA-Z0-9._%+\-]+@[a-zA-Z0-9.\-]+\.[a-zA-Z]{2,}$").expect("valid email regex");
}

// ============================================================================
// Email Value Object
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  const MAX_LENGTH: usize = 254;
  const MAX_LOCAL_LENGTH: usize = 64;
  const MAX_DOMAIN_LENGTH: usize = 253;

  /// Creates a new Email after validation, normalized to trimmed lowercase.
  pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
    let raw = raw.into();
    let trimmed = raw.trim();

    Self::validate(trimmed)?;

    Ok(Self(trimmed.to_lowercase()))
  }

  /// Creates an Email without validation.
  ///
  /// Only for reconstruction from trusted sources (the database), where the
  /// value was validated when stored.
  pub fn new_unchecked(raw: impl Into<String>) -> Self {
    Self(raw.into())
  }

  /// Validation rules run in a fixed order so the first failing rule's
  /// error is deterministic.
  fn validate(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
      return Err(ValidationError::EmailEmpty);
    }

    if email.len() > Self::MAX_LENGTH {
      return Err(ValidationError::EmailTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    let mut parts = email.split('@');
    let (local, domain) = match (parts.next(), parts.next(), parts.next()) {
      (Some(local), Some(domain), None) => (local, domain),
      _ => return Err(ValidationError::EmailInvalidFormat),
    };

    if local.is_empty() || local.len() > Self::MAX_LOCAL_LENGTH {
      return Err(ValidationError::EmailLocalPartLength);
    }

    if domain.is_empty() || domain.len() > Self::MAX_DOMAIN_LENGTH {
      return Err(ValidationError::EmailDomainPartLength);
    }

    if !EMAIL_REGEX.is_match(email) {
      return Err(ValidationError::EmailInvalidFormat);
    }

    if email.contains("..") {
      return Err(ValidationError::EmailConsecutiveDots);
    }

    if local.starts_with('.') || local.ends_with('.') {
      return Err(ValidationError::EmailLocalDotPlacement);
    }

    Ok(())
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }

  /// Returns the part before the `@`
  pub fn local_part(&self) -> &str {
    self.0.split('@').next().unwrap_or("")
  }

  /// Returns the part after the `@`
  pub fn domain(&self) -> &str {
    self.0.split('@').nth(1).unwrap_or("")
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Policy
// ============================================================================

/// Complexity policy applied by the validating `Password` factory.
///
/// The default is the canonical policy for this service: bcrypt's 72-byte
/// input limit sets the maximum length, and all four character classes are
/// required. Deployments needing the stricter 60-character variant construct
/// their own policy instead of patching constants.
#[derive(Debug, Clone)]
pub struct PasswordPolicy {
  pub min_length: usize,
  pub max_length: usize,
  pub require_character_classes: bool,
  pub weak_patterns: Vec<String>,
  pub reject_sequential: bool,
}

const DEFAULT_WEAK_PATTERNS: &[&str] = &[
  "password", "123456", "qwerty", "abc123", "admin", "user", "login", "welcome", "changeme",
  "default", "guest", "12345678", "87654321", "qwertyui", "asdfghjk",
];

impl Default for PasswordPolicy {
  fn default() -> Self {
    Self {
      min_length: 8,
      max_length: 72,
      require_character_classes: true,
      weak_patterns: DEFAULT_WEAK_PATTERNS.iter().map(|p| p.to_string()).collect(),
      reject_sequential: true,
    }
  }
}

// ============================================================================
// Password Value Object
// ============================================================================

/// A credential value: plaintext before hashing, or the bcrypt hash once the
/// entity has been persisted. Never printed.
#[derive(Clone)]
pub struct Password(String);

const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?~`";

impl Password {
  /// Creates a new Password validated against the default policy
  pub fn new(raw: impl Into<String>) -> Result<Self, ValidationError> {
    Self::with_policy(raw, &PasswordPolicy::default())
  }

  /// Creates a new Password validated against an injected policy
  pub fn with_policy(
    raw: impl Into<String>,
    policy: &PasswordPolicy,
  ) -> Result<Self, ValidationError> {
    let raw = raw.into();
    Self::validate(&raw, policy)?;
    Ok(Self(raw))
  }

  /// Creates a Password without validation, for values reconstructed from
  /// trusted sources.
  pub fn new_unchecked(raw: impl Into<String>) -> Self {
    Self(raw.into())
  }

  /// Wraps an already-hashed value, swapping the in-memory representation
  /// without re-validating.
  pub fn from_hash(hash: impl Into<String>) -> Self {
    Self(hash.into())
  }

  /// Rules run in a fixed order; the first failing rule's error is returned.
  fn validate(raw: &str, policy: &PasswordPolicy) -> Result<(), ValidationError> {
    if raw.is_empty() {
      return Err(ValidationError::PasswordEmpty);
    }

    if raw.len() < policy.min_length {
      return Err(ValidationError::PasswordTooShort {
        min: policy.min_length,
      });
    }

    if raw.len() > policy.max_length {
      return Err(ValidationError::PasswordTooLong {
        max: policy.max_length,
      });
    }

    if policy.require_character_classes {
      if !raw.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::PasswordMissingUppercase);
      }
      if !raw.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(ValidationError::PasswordMissingLowercase);
      }
      if !raw.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordMissingDigit);
      }
      if !raw.chars().any(|c| SPECIAL_CHARS.contains(c)) {
        return Err(ValidationError::PasswordMissingSpecial);
      }
    }

    let lowered = raw.to_lowercase();
    if policy.weak_patterns.iter().any(|p| *p == lowered) {
      return Err(ValidationError::PasswordWeakPattern);
    }

    if policy.reject_sequential && is_sequential(raw) {
      return Err(ValidationError::PasswordSequential);
    }

    Ok(())
  }

  /// Returns the raw value (use with caution; needed for hashing and for
  /// handing the hash to the persistence layer)
  pub fn value(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Hashes the value with bcrypt at the default cost factor
  pub fn hash(&self) -> Result<String, HashError> {
    self.hash_with_cost(bcrypt::DEFAULT_COST)
  }

  /// Hashes the value with bcrypt at an explicit cost factor
  pub fn hash_with_cost(&self, cost: u32) -> Result<String, HashError> {
    if self.0.is_empty() {
      return Err(HashError::NoPasswordSet);
    }
    Ok(bcrypt::hash(&self.0, cost)?)
  }

  /// Treats this value as a plaintext candidate and compares it against a
  /// bcrypt hash. A hash that fails to parse compares as non-matching.
  pub fn matches_hash(&self, hash: &str) -> bool {
    bcrypt::verify(&self.0, hash).unwrap_or(false)
  }

  /// Strength score from 1 (weakest) to 5, based on length and
  /// character-class diversity.
  pub fn strength(&self) -> u8 {
    let mut score = 0u8;

    if self.0.len() >= 8 {
      score += 1;
    }
    if self.0.len() >= 12 {
      score += 1;
    }

    let classes = [
      self.has_uppercase(),
      self.has_lowercase(),
      self.has_digit(),
      self.has_special_char(),
    ]
    .iter()
    .filter(|present| **present)
    .count();

    if classes >= 3 {
      score += 1;
    }
    if classes == 4 {
      score += 1;
    }

    if self.0.len() >= 16 {
      score += 1;
    }

    score.clamp(1, 5)
  }

  pub fn has_uppercase(&self) -> bool {
    self.0.chars().any(|c| c.is_ascii_uppercase())
  }

  pub fn has_lowercase(&self) -> bool {
    self.0.chars().any(|c| c.is_ascii_lowercase())
  }

  pub fn has_digit(&self) -> bool {
    self.0.chars().any(|c| c.is_ascii_digit())
  }

  pub fn has_special_char(&self) -> bool {
    self.0.chars().any(|c| SPECIAL_CHARS.contains(c))
  }
}

/// Strictly ascending or descending byte sequences ("12345678", "hgfedcba")
/// of four or more characters.
fn is_sequential(raw: &str) -> bool {
  let bytes = raw.as_bytes();
  if bytes.len() < 4 {
    return false;
  }

  let ascending = bytes.windows(2).all(|w| w[1] == w[0].wrapping_add(1));
  let descending = bytes.windows(2).all(|w| w[1] == w[0].wrapping_sub(1));

  ascending || descending
}

// Never expose the value through Debug or Display
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}
