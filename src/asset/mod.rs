//! Texture assets
//!
//! Block and coin textures keyed by palette identifier. The registry is
//! created once by `main`, filled asynchronously, and handed to the renderer.
//! A texture that fails to load is replaced by a solid-colour placeholder,
//! so lookups never fail for known block kinds.

mod registry;

pub use registry::AssetRegistry;
