//! Slice & Conquer - Territorial Slicing Engine
//!
//! The player draws straight lines across a territory. Each legal line splits
//! the regions it crosses, the pieces away from the capital become captured,
//! and the score grows with captured area and landmarks until the cutting
//! budget runs out.

pub mod core;
pub mod game;
pub mod geometry;
pub mod rules;
pub mod territory;
