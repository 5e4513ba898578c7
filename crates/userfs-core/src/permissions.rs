//! Owner/other permission checks

use crate::Access;

/// Test the mode bit for `access`: the owner triplet when `username` owns the
/// node, the other triplet for everyone else. Group bits are never used.
pub fn mode_allows(mode: u32, owner: &str, username: &str, access: Access) -> bool {
    let shift = if username == owner { 6 } else { 0 };
    (mode >> shift) & access.bit() != 0
}

/// Full access rule: the mode bit grants access, and so does ownership
/// regardless of what the owner bits say.
pub fn is_permitted(mode: u32, owner: &str, username: &str, access: Access) -> bool {
    username == owner || mode_allows(mode, owner, username, access)
}
