//! # Voxel Decor Demo Entry Point
//!
//! This is the main entry point of the demo binary. It simply calls into
//! the library's `run()` function, which loads the catalog and plays a
//! scripted scene against an in-memory world.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- decor.json
//! ```

fn main() {
    voxel_decor::run();
}
