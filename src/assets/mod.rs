//! Asset chores outside the deck pipeline.

pub mod card_back;
pub mod majors;
