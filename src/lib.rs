//! # spiral_lsb 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：颜色编解码、位数组编解码、螺旋游标，
//! 以及基于它们的线性与螺旋隐写引擎。命令行与图像文件读写只是核心外围的一层薄胶水。

// 声明库包含的所有模块。

pub mod bits;
pub mod cli;
pub mod color;
pub mod constants;
pub mod error;
pub mod grid;
pub mod handler;
pub mod picture;
pub mod spiral;
pub mod steganography;

pub use error::{Result, StegoError};
pub use grid::Grid;
pub use spiral::{SpiralCursor, SpiralOrder};
