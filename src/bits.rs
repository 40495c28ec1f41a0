//! # 位数组编解码模块
//!
//! 整数、文本与黑白图像和布尔序列之间的相互转换。所有整数都按最低位在前的顺序展开。
//!
//! 图像消息格式：
//!
//! ```text
//! bit[0..32]            高度 (u32, 最低位在前)
//! bit[32..64]           宽度 (u32, 最低位在前)
//! bit[64..64 + h * w]   行优先的像素位
//! ```

use crate::constants::{CHAR_BITS, HEADER_BITS, HEADER_FIELD_BITS};
use crate::error::{Result, StegoError};
use crate::grid::Grid;
use log::trace;

/// 将 `value` 展开为 `width` 个布尔值，第 `i` 个为 `(value >> i) & 1`。
///
/// `u32` 只有 32 位，因此索引 32 及以后的位始终为 `false`。
pub fn int_to_bits(value: u32, width: usize) -> Vec<bool> {
    (0..width)
        .map(|i| {
            u32::try_from(i)
                .ok()
                .and_then(|shift| value.checked_shr(shift))
                .is_some_and(|v| v & 1 == 1)
        })
        .collect()
}

/// [`int_to_bits`] 的逆操作：对每个为真的第 `i` 位按位或上 `1 << i`。
///
/// 接受任意长度的输入。索引 32 及以后的位无法放入 `u32`，会被忽略。
pub fn bits_to_int(bits: &[bool]) -> u32 {
    bits.iter()
        .take(u32::BITS as usize)
        .enumerate()
        .filter(|&(_, &bit)| bit)
        .fold(0, |acc, (i, _)| acc | (1u32 << i))
}

/// 将文本的每个 UTF-16 码元编码为 16 位，按字符顺序拼接。
pub fn text_to_bits(text: &str) -> Vec<bool> {
    let bits: Vec<bool> = text
        .encode_utf16()
        .flat_map(|unit| int_to_bits(u32::from(unit), CHAR_BITS))
        .collect();
    trace!("encoded {} chars of text into {} bits", text.chars().count(), bits.len());
    bits
}

/// [`text_to_bits`] 的逆操作，按 16 位一组解码。
///
/// 末尾不足 16 位的部分会被忽略；无法配对的代理码元解码为 U+FFFD。
pub fn bits_to_text(bits: &[bool]) -> String {
    let units: Vec<u16> = bits
        .chunks_exact(CHAR_BITS)
        .map(|chunk| bits_to_int(chunk) as u16)
        .collect();
    String::from_utf16_lossy(&units)
}

/// 将黑白图像编码为带有高度、宽度头部的位数组。
///
/// # Errors
///
/// 任一维度超过 `u32::MAX` 时返回 [`StegoError::InvalidShape`]。
pub fn image_to_bits(image: &Grid<bool>) -> Result<Vec<bool>> {
    let height = dimension_to_u32(image.rows(), "height")?;
    let width = dimension_to_u32(image.cols(), "width")?;

    let mut bits = Vec::with_capacity(HEADER_BITS + image.len());
    bits.extend(int_to_bits(height, HEADER_FIELD_BITS));
    bits.extend(int_to_bits(width, HEADER_FIELD_BITS));
    bits.extend(image.iter().copied());

    trace!("framed {height}x{width} image into {} bits", bits.len());
    Ok(bits)
}

/// 从带头部的位数组重建黑白图像，多余的尾部位会被忽略。
///
/// # Errors
///
/// 数组短于 64 位，或短于头部声明的 `64 + height * width` 位时，
/// 返回 [`StegoError::TruncatedPayload`]。
pub fn bits_to_image(bits: &[bool]) -> Result<Grid<bool>> {
    if bits.len() < HEADER_BITS {
        return Err(StegoError::TruncatedPayload {
            needed: HEADER_BITS,
            actual: bits.len(),
        });
    }

    let height = bits_to_int(&bits[..HEADER_FIELD_BITS]) as usize;
    let width = bits_to_int(&bits[HEADER_FIELD_BITS..HEADER_BITS]) as usize;

    let needed = height
        .checked_mul(width)
        .and_then(|area| area.checked_add(HEADER_BITS))
        .ok_or(StegoError::TruncatedPayload {
            needed: usize::MAX,
            actual: bits.len(),
        })?;
    if bits.len() < needed {
        return Err(StegoError::TruncatedPayload {
            needed,
            actual: bits.len(),
        });
    }

    Grid::from_vec(height, width, bits[HEADER_BITS..needed].to_vec())
}

fn dimension_to_u32(value: usize, name: &str) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| StegoError::invalid_shape(format!("image {name} {value} does not fit in 32 bits")))
}
