//! Controller layer: worker events, UI error modeling, and command dispatch.

pub mod events;
pub mod orchestration;
