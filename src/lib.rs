pub mod bodies;
pub mod builder;
pub mod config;
pub mod consts;
pub mod descriptor;
pub mod error;
pub mod generator;
pub mod model;
pub mod pool;
pub mod render;
pub mod synth;
