pub(crate) mod options;
pub(crate) mod tables;
pub(crate) mod usermeta;

pub const OPTIONS_TABLE: &str = "options";
pub const OPTION_NAME_COLUMN: &str = "option_name";
pub const USER_ROLES_OPTION: &str = "user_roles";
pub const USERMETA_TABLE: &str = "usermeta";
pub const META_KEY_COLUMN: &str = "meta_key";

/// Swaps `old_prefix` for `new_prefix` at the start of `value`.
///
/// The comparison is byte for byte over the first `old_prefix.len()` bytes, with no
/// case folding. Returns `None` when `value` does not start with `old_prefix`.
pub fn replace_prefix(value: &str, old_prefix: &str, new_prefix: &str) -> Option<String> {
    value
        .strip_prefix(old_prefix)
        .map(|rest| format!("{new_prefix}{rest}"))
}
