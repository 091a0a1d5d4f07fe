//! Game surfaces built on the rule core.

pub mod duel;
