//! # Voxel Raytracer Application Entry Point
//!
//! This is the main entry point for the voxel raytracing demo. It simply
//! calls into the library's `run()` function to initialize the GPU resources
//! and start the frame loop.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --release
//! ```

fn main() {
    voxel_raytracer::run();
}
