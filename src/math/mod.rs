//! Small linear-algebra library: 2D/3D vectors and 4x4 matrices.

pub mod mat4;
pub mod vec2;
pub mod vec3;
