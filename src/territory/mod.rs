//! Territory model: regions, the partition that owns them, landmarks and setup

pub mod landmark;
pub mod partition;
pub mod region;
pub mod setup;

pub use landmark::{load_landmarks_json, parse_landmarks_json, Landmark};
pub use partition::{
    boundary_crossings, chord_inside, split, Crossing, Partition, Piece, Tolerance,
};
pub use region::{Classification, Region};
pub use setup::{validate_boundary, TerritorySetup};
