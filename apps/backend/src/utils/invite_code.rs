//! Invite code generation for games.
//!
//! A game's primary id doubles as its invite code: a 10-character string
//! drawn from Crockford's Base32 alphabet. The restricted alphabet keeps
//! codes unambiguous when read aloud or typed from a screenshot.

use rand::Rng;

const CROCKFORD: &[u8] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ"; // no I, L, O, U

/// Length of a generated invite code.
pub const INVITE_CODE_LEN: usize = 10;

/// Generate a fresh invite code.
///
/// Creates a 10-character code by randomly selecting characters from
/// Crockford's Base32 alphabet. With 32^10 possible codes, collisions are
/// vanishingly rare; callers inserting into the games table still handle
/// the unique-violation path by regenerating.
///
/// # Example
/// ```
/// use backend::utils::invite_code::generate_invite_code;
///
/// let code1 = generate_invite_code();
/// let code2 = generate_invite_code();
/// assert_ne!(code1, code2);
/// assert_eq!(code1.len(), 10);
/// ```
pub fn generate_invite_code() -> String {
    let mut rng = rand::rng();

    let mut s = String::with_capacity(INVITE_CODE_LEN);
    for _ in 0..INVITE_CODE_LEN {
        let idx = rng.random_range(0..CROCKFORD.len());
        s.push(CROCKFORD[idx] as char);
    }
    s
}

/// Check whether a string is a well-formed invite code.
///
/// Valid codes are exactly 10 characters from the Crockford alphabet.
/// This rejects malformed input before it ever reaches the database.
pub fn is_valid_invite_code(code: &str) -> bool {
    code.len() == INVITE_CODE_LEN && code.bytes().all(|b| CROCKFORD.contains(&b))
}
