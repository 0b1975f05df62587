// src/models/mod.rs

pub mod quiz;
