// Public library interface for marketmap
// The debug-layout binary drives the same modules dashboards link against

pub mod layout;
pub mod tiles;
pub mod weight;
