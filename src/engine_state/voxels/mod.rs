//! # Voxel World Module
//!
//! This module provides the dense voxel grid the raytracer renders and the
//! procedural generator that fills it.
//!
//! ## Storage Strategy
//!
//! The world is one fixed-size dense grid: a flat `Vec<u32>` of voxel codes
//! indexed by `x + SIZE_X * (y + SIZE_Y * z)`. There is no chunking, no
//! sparse structure, and no level of detail; the grid is generated once at
//! startup, uploaded verbatim into a GPU storage buffer, and never touched
//! again by the host. The raymarching shader is the only reader after the
//! upload.
//!
//! The dense layout is a deliberate trade: 512x64x512 u32 codes are 64 MiB,
//! small enough to upload in one shot, and the shader indexes the buffer
//! with the same linear formula the generator writes it with.

pub mod generator;
pub mod grid;

pub use generator::{NoiseParams, WorldGenerator};
pub use grid::{VoxelCode, VoxelGrid};

/// World extent along the X axis, in voxels.
pub const WORLD_SIZE_X: usize = 512;
/// World extent along the Y (up) axis, in voxels.
pub const WORLD_SIZE_Y: usize = 64;
/// World extent along the Z axis, in voxels.
pub const WORLD_SIZE_Z: usize = 512;

/// Terrain height below which every cell is unconditionally solid.
pub const SEA_LEVEL: i32 = 48;

/// Name of the GPU storage buffer holding the serialized voxel grid.
pub const VOXEL_BUFFER_NAME: &str = "voxel_buffer";
