//! Controller layer: discrete action dispatch over a pure state machine,
//! decoupled from any rendering toolkit.

pub mod display;
pub mod events;
pub mod saved_list;
