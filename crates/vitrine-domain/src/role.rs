//! Role domain rules.

/// Role attached to every newly registered account, when it exists.
pub const DEFAULT_ROLE_NAME: &str = "user";

/// Maximum role-name length in characters.
pub const ROLE_NAME_MAX_LEN: usize = 64;

/// Returns `true` if `name` is acceptable as a role name.
///
/// Rules: not blank, at most [`ROLE_NAME_MAX_LEN`] characters, no surrounding
/// whitespace.
pub fn validate_role_name(name: &str) -> bool {
    !name.trim().is_empty() && name.trim() == name && name.chars().count() <= ROLE_NAME_MAX_LEN
}
