//! # 隐写核心模块
//!
//! 在像素网格的最低有效位 (LSB) 平面中嵌入和提取位数组、黑白图像和文本。
//! 支持两种遍历顺序：行优先的线性顺序，以及由 [`SpiralOrder`] 产生的螺旋顺序。
//!
//! 所有嵌入函数都会复制载体，绝不修改传入的网格；所有容量检查都在写入任何像素之前完成。

use crate::bits::{bits_to_image, bits_to_text, image_to_bits, text_to_bits};
use crate::error::{Result, StegoError};
use crate::grid::Grid;
use crate::spiral::SpiralOrder;
use log::debug;

/// 将 `bit` 写入 `value` 的最低有效位。
pub fn embed_bit(value: u32, bit: bool) -> u32 {
    (value & !1) | u32::from(bit)
}

/// 读取 `value` 的最低有效位。
pub fn read_bit(value: u32) -> bool {
    value & 1 == 1
}

/// 按行优先顺序将位数组嵌入载体副本。
///
/// 超出消息长度的像素保持原样。
///
/// # Errors
///
/// 消息位数超过像素数时返回 [`StegoError::CoverTooSmall`]。
pub fn embed_bit_array(cover: &Grid<u32>, message: &[bool]) -> Result<Grid<u32>> {
    ensure_capacity(cover, message.len())?;
    debug!(
        "embedding {} bits linearly into {}x{} cover",
        message.len(),
        cover.rows(),
        cover.cols()
    );

    let mut hidden = cover.clone();
    hidden
        .as_mut_slice()
        .iter_mut()
        .zip(message)
        .for_each(|(pixel, &bit)| *pixel = embed_bit(*pixel, bit));
    Ok(hidden)
}

/// 按行优先顺序提取每个像素的最低有效位，结果长度恰好为 `rows * cols`。
pub fn reveal_bit_array(cover: &Grid<u32>) -> Vec<bool> {
    cover.iter().map(|&pixel| read_bit(pixel)).collect()
}

/// 将黑白图像逐像素嵌入载体副本的相同二维位置。
///
/// # Errors
///
/// 消息图像的行数或列数超过载体时返回 [`StegoError::CoverTooSmall`]。
pub fn embed_bw_image(cover: &Grid<u32>, message: &Grid<bool>) -> Result<Grid<u32>> {
    if message.rows() > cover.rows() || message.cols() > cover.cols() {
        return Err(StegoError::CoverTooSmall {
            needed: message.len(),
            capacity: cover.len(),
        });
    }
    debug!(
        "embedding {}x{} image linearly into {}x{} cover",
        message.rows(),
        message.cols(),
        cover.rows(),
        cover.cols()
    );

    Ok(Grid::from_fn(cover.rows(), cover.cols(), |row, col| {
        let pixel = cover.as_slice()[row * cover.cols() + col];
        match message.get(row, col) {
            Some(&bit) => embed_bit(pixel, bit),
            None => pixel,
        }
    }))
}

/// 提取载体的整个 LSB 平面，得到与载体同形状的黑白图像。零尺寸载体得到空图像。
pub fn reveal_bw_image(cover: &Grid<u32>) -> Grid<bool> {
    cover.map(|&pixel| read_bit(pixel))
}

/// 将文本编码为位数组后线性嵌入。不写入长度前缀。
///
/// # Errors
///
/// 文本所需位数超过像素数时返回 [`StegoError::CoverTooSmall`]。
pub fn embed_text(cover: &Grid<u32>, message: &str) -> Result<Grid<u32>> {
    embed_bit_array(cover, &text_to_bits(message))
}

/// 线性提取整个 LSB 平面并解码为文本。
///
/// 结果包含 `rows * cols / 16` 个码元，调用方负责截取实际消息部分。
pub fn reveal_text(cover: &Grid<u32>) -> String {
    bits_to_text(&reveal_bit_array(cover))
}

/// 按螺旋顺序将位数组嵌入载体副本。
///
/// # Errors
///
/// 消息位数超过像素数时返回 [`StegoError::CoverTooSmall`]。
pub fn embed_spiral_bit_array(cover: &Grid<u32>, message: &[bool]) -> Result<Grid<u32>> {
    ensure_capacity(cover, message.len())?;
    debug!(
        "embedding {} bits in spiral order into {}x{} cover",
        message.len(),
        cover.rows(),
        cover.cols()
    );

    let mut hidden = cover.clone();
    for ((row, col), &bit) in SpiralOrder::new(cover.rows(), cover.cols()).zip(message) {
        let pixel = cover.as_slice()[row * cover.cols() + col];
        hidden.set(row, col, embed_bit(pixel, bit));
    }
    Ok(hidden)
}

/// 按螺旋顺序提取每个像素的最低有效位，结果长度恰好为 `rows * cols`。
pub fn reveal_spiral_bit_array(cover: &Grid<u32>) -> Vec<bool> {
    SpiralOrder::new(cover.rows(), cover.cols())
        .map(|(row, col)| read_bit(cover.as_slice()[row * cover.cols() + col]))
        .collect()
}

/// 为黑白图像加上尺寸头部后按螺旋顺序嵌入，接收方无需预先知道图像尺寸。
///
/// # Errors
///
/// * 图像尺寸无法编码为 32 位时返回 [`StegoError::InvalidShape`]。
/// * `64 + rows * cols` 超过载体像素数时返回 [`StegoError::CoverTooSmall`]。
pub fn embed_spiral_image(cover: &Grid<u32>, message: &Grid<bool>) -> Result<Grid<u32>> {
    embed_spiral_bit_array(cover, &image_to_bits(message)?)
}

/// 按螺旋顺序提取并解析带尺寸头部的黑白图像。
///
/// # Errors
///
/// 载体少于 64 个像素，或头部声明的尺寸超过载体容量时，
/// 返回 [`StegoError::TruncatedPayload`]。
pub fn reveal_spiral_image(cover: &Grid<u32>) -> Result<Grid<bool>> {
    bits_to_image(&reveal_spiral_bit_array(cover))
}

fn ensure_capacity(cover: &Grid<u32>, needed: usize) -> Result<()> {
    if needed > cover.len() {
        return Err(StegoError::CoverTooSmall {
            needed,
            capacity: cover.len(),
        });
    }
    Ok(())
}
