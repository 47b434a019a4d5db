//! Center seeding and Lloyd refinement.
//!
//! Two seeding strategies share the point/center store: probability-weighted
//! D² seeding (followed by iterative relocation) and deterministic
//! farthest-point greedy seeding. Both produce a [`crate::CenterSet`] sized
//! by the requested cluster count.

mod refine;
mod seeding;

pub(crate) use self::refine::{assignments, refine};
pub(crate) use self::seeding::{dsquared_seed, farthest_seed};

#[cfg(test)]
mod tests;
