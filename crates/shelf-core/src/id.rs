//! # Product Identifiers
//!
//! Products are identified by a 6-digit numeric string, short enough to read
//! aloud or type on a phone keypad.
//!
//! ## Collision Handling
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  generate_id()          uniform in [100000, 999999], no checks          │
//! │                                                                         │
//! │  generate_unique_id(is_taken)                                           │
//! │       │                                                                 │
//! │       ├── up to 32 random draws, first free one wins                    │
//! │       │                                                                 │
//! │       ├── collection very full? scan upward from a random start         │
//! │       │                                                                 │
//! │       └── all 900 000 taken → CoreError::IdSpaceExhausted               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rand::Rng;

use crate::error::{CoreError, CoreResult};

/// Smallest 6-digit id.
pub const MIN_ID: u32 = 100_000;

/// Largest 6-digit id.
pub const MAX_ID: u32 = 999_999;

const RANDOM_ATTEMPTS: usize = 32;

/// Generates a random 6-digit product id.
///
/// Uniqueness is not checked; see [`generate_unique_id`].
pub fn generate_id() -> String {
    generate_id_with(&mut rand::thread_rng())
}

/// Generates a random 6-digit product id from the given RNG.
pub fn generate_id_with<R: Rng + ?Sized>(rng: &mut R) -> String {
    rng.gen_range(MIN_ID..=MAX_ID).to_string()
}

/// Generates a 6-digit id for which `is_taken` returns false.
///
/// ## Example
/// ```rust
/// use std::collections::HashSet;
/// use shelf_core::id::generate_unique_id;
///
/// let existing: HashSet<String> = ["123456".to_string()].into();
/// let id = generate_unique_id(|id| existing.contains(id)).unwrap();
/// assert_ne!(id, "123456");
/// ```
pub fn generate_unique_id<F>(is_taken: F) -> CoreResult<String>
where
    F: Fn(&str) -> bool,
{
    generate_unique_id_with(&mut rand::thread_rng(), is_taken)
}

/// [`generate_unique_id`] with an explicit RNG.
pub fn generate_unique_id_with<R, F>(rng: &mut R, is_taken: F) -> CoreResult<String>
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    for _ in 0..RANDOM_ATTEMPTS {
        let id = generate_id_with(rng);
        if !is_taken(&id) {
            return Ok(id);
        }
    }

    let start = rng.gen_range(MIN_ID..=MAX_ID);
    (start..=MAX_ID)
        .chain(MIN_ID..start)
        .map(|n| n.to_string())
        .find(|id| !is_taken(id))
        .ok_or(CoreError::IdSpaceExhausted)
}

/// Whether `id` has the 6-digit product id format.
pub fn is_valid_id(id: &str) -> bool {
    id.len() == 6
        && id.bytes().all(|b| b.is_ascii_digit())
        && id.parse::<u32>().is_ok_and(|n| (MIN_ID..=MAX_ID).contains(&n))
}
