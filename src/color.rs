//! # 颜色编解码模块
//!
//! 在 24 位打包 RGB 整数与单独的颜色通道、灰度值、黑白值之间转换。
//! 超出 `[0, 255]` 的通道值会被静默截断，这是整个核心中唯一的“修正后继续”行为。

use crate::constants::{CHANNEL_MAX, RGB_MASK};
use crate::error::{Result, StegoError};
use crate::grid::Grid;

/// 红色通道 (第 16-23 位)。
pub fn red(rgb: u32) -> i32 {
    ((rgb & RGB_MASK) >> 16) as i32
}

/// 绿色通道 (第 8-15 位)。
pub fn green(rgb: u32) -> i32 {
    (((rgb & RGB_MASK) >> 8) & 0xFF) as i32
}

/// 蓝色通道 (第 0-7 位)。
pub fn blue(rgb: u32) -> i32 {
    (rgb & 0xFF) as i32
}

/// 三个通道的整数平均值 (向零截断)。
pub fn gray(rgb: u32) -> i32 {
    (red(rgb) + green(rgb) + blue(rgb)) / 3
}

/// 灰度值大于或等于阈值时为白色 (`true`)。
pub fn bw(gray: i32, threshold: i32) -> bool {
    gray >= threshold
}

/// 将三个通道打包为 `0x00RRGGBB`，每个通道先截断到 `[0, 255]`。
pub fn rgb(red: i32, green: i32, blue: i32) -> u32 {
    (clamp_channel(red) << 16) | (clamp_channel(green) << 8) | clamp_channel(blue)
}

pub fn rgb_from_gray(gray: i32) -> u32 {
    rgb(gray, gray, gray)
}

/// 白色 (`true`) 或黑色 (`false`)。
pub fn rgb_from_bw(value: bool) -> u32 {
    let level = if value { CHANNEL_MAX } else { 0 };
    rgb(level, level, level)
}

/// 将打包 RGB 网格转换为灰度网格。
///
/// # Errors
///
/// 网格没有任何行时返回 [`StegoError::InvalidShape`]。
pub fn to_gray(image: &Grid<u32>) -> Result<Grid<i32>> {
    ensure_has_rows(image)?;
    Ok(image.map(|&px| gray(px)))
}

/// 将灰度网格转换为打包 RGB 网格。
///
/// # Errors
///
/// 网格没有任何行时返回 [`StegoError::InvalidShape`]。
pub fn gray_to_rgb(image: &Grid<i32>) -> Result<Grid<u32>> {
    ensure_has_rows(image)?;
    Ok(image.map(|&level| rgb_from_gray(level)))
}

/// 使用给定阈值将灰度网格转换为黑白网格。
///
/// # Errors
///
/// 网格没有任何行时返回 [`StegoError::InvalidShape`]。
pub fn to_bw(image: &Grid<i32>, threshold: i32) -> Result<Grid<bool>> {
    ensure_has_rows(image)?;
    Ok(image.map(|&level| bw(level, threshold)))
}

/// 将黑白网格转换为打包 RGB 网格。
///
/// # Errors
///
/// 网格没有任何行时返回 [`StegoError::InvalidShape`]。
pub fn bw_to_rgb(image: &Grid<bool>) -> Result<Grid<u32>> {
    ensure_has_rows(image)?;
    Ok(image.map(|&value| rgb_from_bw(value)))
}

fn clamp_channel(value: i32) -> u32 {
    value.clamp(0, CHANNEL_MAX) as u32
}

fn ensure_has_rows<T>(image: &Grid<T>) -> Result<()> {
    if image.rows() == 0 {
        return Err(StegoError::invalid_shape(
            "color conversion requires at least one row",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channels_of_zero_are_zero() {
        assert_eq!((red(0), green(0), blue(0)), (0, 0, 0));
        assert_eq!(rgb(0, 0, 0), 0);
        assert_eq!(rgb_from_gray(0), 0);
        assert_eq!(rgb_from_bw(false), 0);
        assert_eq!(gray(0), 0);
    }

    #[test]
    fn channels_ignore_alpha() {
        let argb = 0xFF12_3456;
        assert_eq!(red(argb), 0x12);
        assert_eq!(green(argb), 0x34);
        assert_eq!(blue(argb), 0x56);
    }

    #[test]
    fn pack_clamps_each_channel() {
        assert_eq!(rgb(300, -5, 0x80), 0x00FF_0080);
        assert_eq!(rgb_from_gray(1000), 0x00FF_FFFF);
        assert_eq!(rgb_from_bw(true), 0x00FF_FFFF);
    }

    #[test]
    fn gray_truncates() {
        // (1 + 1 + 2) / 3 = 1
        assert_eq!(gray(rgb(1, 1, 2)), 1);
        assert_eq!(gray(rgb(255, 255, 255)), 255);
    }

    #[test]
    fn threshold_is_inclusive() {
        assert!(bw(128, 128));
        assert!(!bw(127, 128));
    }

    #[test]
    fn grid_conversions_preserve_shape() {
        let image = Grid::from_rows(vec![vec![0x00FF_FFFF, 0], vec![0x0080_8080, 0x0010_2030]]).unwrap();
        let grays = to_gray(&image).unwrap();
        assert_eq!(grays.as_slice(), &[255, 0, 128, 32]);

        let bws = to_bw(&grays, 128).unwrap();
        assert_eq!(bws.as_slice(), &[true, false, true, false]);

        let packed = bw_to_rgb(&bws).unwrap();
        assert_eq!(packed.as_slice(), &[0x00FF_FFFF, 0, 0x00FF_FFFF, 0]);
        assert_eq!(gray_to_rgb(&grays).unwrap().get(1, 0), Some(&0x0080_8080));
    }

    #[test]
    fn grid_conversions_reject_empty_grids() {
        let empty: Grid<u32> = Grid::new(0, 0, 0);
        assert!(matches!(to_gray(&empty), Err(StegoError::InvalidShape { .. })));
        assert!(bw_to_rgb(&Grid::new(0, 3, false)).is_err());
    }
}
