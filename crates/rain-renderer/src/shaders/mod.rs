//! Shader module - WGSL shaders for GPU rendering
//!
//! Shaders are stored as external .wgsl files and included at compile time.
//! This enables better IDE support (syntax highlighting, validation) while
//! keeping the binary self-contained.

/// Built-in shaders included at compile time
pub mod builtin {
    /// Rain shader - glyph atlas tiling and falling streaks on a textured quad
    pub const RAIN: &str = include_str!("rain.wgsl");
}
