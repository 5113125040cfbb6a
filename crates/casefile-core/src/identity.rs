//! Identity key — the (mobile, national ID) pair used for cross-case
//! matching.

use serde::{Deserialize, Serialize};

/// The two optional keys that identify a person across cases.
///
/// Matching is exact string equality on whichever keys are present, combined
/// with logical OR. A key with both fields absent never matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentityKey {
  pub mobile:      Option<String>,
  pub national_id: Option<String>,
}

impl IdentityKey {
  /// Build a key, treating empty strings as absent.
  ///
  /// Form input stores blank fields as `""`; those must not match every
  /// other blank record. No further normalisation is applied.
  pub fn new(mobile: Option<String>, national_id: Option<String>) -> Self {
    Self {
      mobile:      mobile.filter(|m| !m.is_empty()),
      national_id: national_id.filter(|n| !n.is_empty()),
    }
  }

  pub fn from_mobile(mobile: impl Into<String>) -> Self {
    Self::new(Some(mobile.into()), None)
  }

  pub fn from_national_id(national_id: impl Into<String>) -> Self {
    Self::new(None, Some(national_id.into()))
  }

  /// The mobile number, if present and non-empty.
  pub fn mobile(&self) -> Option<&str> {
    self.mobile.as_deref().filter(|m| !m.is_empty())
  }

  /// The national ID, if present and non-empty.
  pub fn national_id(&self) -> Option<&str> {
    self.national_id.as_deref().filter(|n| !n.is_empty())
  }

  /// `false` when neither key is present.
  pub fn is_matchable(&self) -> bool {
    self.mobile().is_some() || self.national_id().is_some()
  }

  /// `true` if either key present on both sides is equal.
  pub fn matches(&self, other: &IdentityKey) -> bool {
    let mobile = matches!(
      (self.mobile(), other.mobile()),
      (Some(a), Some(b)) if a == b
    );
    let national_id = matches!(
      (self.national_id(), other.national_id()),
      (Some(a), Some(b)) if a == b
    );
    mobile || national_id
  }
}
