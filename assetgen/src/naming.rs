// Name conventions of generated struct members.
//
// User struct members are stored as `FriendlyName_<n>_<32 hex GUID>`. The
// friendly part is recovered positionally, so friendly names that contain
// underscores of their own get cut short.

use crate::error::{AssetGenError, Result};
use crate::guid::FGuid;

/// Underscore-separated tokens that make up the generated suffix, at most.
const SUFFIX_TOKENS: usize = 3;

/// Strip the generated suffix: cut before the outermost of the last
/// (up to) three underscores.
pub fn friendly_member_name(member_name: &str) -> Result<&str> {
    let cut = member_name
        .rmatch_indices('_')
        .take(SUFFIX_TOKENS)
        .last()
        .map(|(i, _)| i)
        .ok_or_else(|| AssetGenError::MalformedMemberName(member_name.to_string()))?;
    Ok(&member_name[..cut])
}

/// GUID from the trailing `_<32 hex>` token, or nil when there is none.
pub fn guid_from_member_name(member_name: &str) -> FGuid {
    let len = member_name.len();
    if len <= FGuid::DIGITS + 1 || !member_name.is_char_boundary(len - FGuid::DIGITS) {
        return FGuid::nil();
    }
    let (head, digits) = member_name.split_at(len - FGuid::DIGITS);
    if !head.ends_with('_') {
        return FGuid::nil();
    }
    FGuid::parse_str(digits).unwrap_or_default()
}

/// Short object name of a path, e.g. `/Game/A.B:C` → `C`.
pub fn object_short_name(path: &str) -> &str {
    path.rsplit([':', '.']).next().unwrap_or(path)
}
