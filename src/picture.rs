//! # 图像文件读写模块
//!
//! 在图像文件与隐写核心使用的 `Grid<u32>` 打包像素网格之间转换。
//! 读取时丢弃 alpha 通道，写出的图像始终是不透明的 RGB。

use crate::color::{self, blue, green, red};
use crate::grid::Grid;
use anyhow::{Context, Result};
use colored::Colorize;
use image::{Rgb, RgbImage};
use log::debug;
use std::path::Path;

/// 读取图像文件并打包为 `0x00RRGGBB` 像素网格。
///
/// # Errors
///
/// 文件无法读取或格式无法解码时返回错误。
pub fn load_pixels(path: &Path) -> Result<Grid<u32>> {
    let picture = image::open(path)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .to_rgb8();

    let (width, height) = picture.dimensions();
    debug!("loaded {width}x{height} image from {}", path.display());

    Ok(Grid::from_fn(height as usize, width as usize, |row, col| {
        let Rgb([r, g, b]) = *picture.get_pixel(col as u32, row as u32);
        color::rgb(i32::from(r), i32::from(g), i32::from(b))
    }))
}

/// 将打包像素网格写为不透明 RGB 图像，格式由文件扩展名决定。
///
/// # Errors
///
/// 网格为空、尺寸超出图像格式范围或写入失败时返回错误。
pub fn save_pixels(path: &Path, pixels: &Grid<u32>) -> Result<()> {
    anyhow::ensure!(
        !pixels.is_empty(),
        "Cannot save an empty image to {}",
        path.to_string_lossy().red().bold()
    );
    let width = u32::try_from(pixels.cols()).context("Image width exceeds 32 bits")?;
    let height = u32::try_from(pixels.rows()).context("Image height exceeds 32 bits")?;

    let picture = RgbImage::from_fn(width, height, |x, y| {
        let packed = pixels.as_slice()[y as usize * pixels.cols() + x as usize];
        Rgb([red(packed) as u8, green(packed) as u8, blue(packed) as u8])
    });

    picture.save(path).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    debug!("saved {width}x{height} image to {}", path.display());
    Ok(())
}

/// 读取图像文件，先转为灰度，再按 `threshold` 转为黑白网格。
///
/// # Errors
///
/// 文件无法读取，或图像没有任何像素行时返回错误。
pub fn load_bw(path: &Path, threshold: i32) -> Result<Grid<bool>> {
    let pixels = load_pixels(path)?;
    let grays = color::to_gray(&pixels)?;
    Ok(color::to_bw(&grays, threshold)?)
}

/// 将黑白网格写为黑白两色的 RGB 图像。
///
/// # Errors
///
/// 网格为空或写入失败时返回错误。
pub fn save_bw(path: &Path, image: &Grid<bool>) -> Result<()> {
    let pixels = color::bw_to_rgb(image).with_context(|| {
        format!(
            "Revealed image is empty, nothing to write to {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    save_pixels(path, &pixels)
}
