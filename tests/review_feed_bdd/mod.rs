//! Support code for review feed behavioural tests.

pub mod state;

pub(crate) use state::FeedState;
