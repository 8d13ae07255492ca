//! Orbital Sound Loops library - planets that hum as particles orbit them

pub mod audio;
pub mod cli;
pub mod color;
pub mod effects;
pub mod params;
pub mod physics;
pub mod simulation;
pub mod world;
