//! # 命令处理逻辑模块
//!
//! 包含处理 `hide` 和 `recover` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::bits::{bits_to_text, text_to_bits};
use crate::cli::{HideArgs, RecoverArgs, Traversal};
use crate::error::StegoError;
use crate::grid::Grid;
use crate::picture::{load_bw, load_pixels, save_bw, save_pixels};
use crate::steganography::{
    embed_bw_image, embed_spiral_bit_array, embed_spiral_image, embed_text, reveal_bw_image,
    reveal_spiral_bit_array, reveal_spiral_image, reveal_text,
};
use anyhow::{Context, Result};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体图像和负载 (文本或黑白图像)、按所选遍历顺序调用隐写核心函数，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与遍历参数的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取载体图像或负载文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 载体图像没有足够的空间来隐藏负载。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| default_hidden_path(&args.image));
    ensure_writable(&dest, args.force)?;

    let cover = load_pixels(&args.image)?;

    let hidden = match (&args.text, &args.message) {
        (Some(text_path), _) => {
            let text = fs::read_to_string(text_path).with_context(|| {
                format!(
                    "Unable to read text file: {}",
                    text_path.to_string_lossy().red().bold()
                )
            })?;
            let embedded = match args.mode {
                Traversal::Linear => embed_text(&cover, &text),
                Traversal::Spiral => embed_spiral_bit_array(&cover, &text_to_bits(&text)),
            };
            embedded.map_err(explain_capacity)?
        }
        (None, Some(message_path)) => {
            let message = load_bw(message_path, args.threshold)?;
            let embedded = match args.mode {
                Traversal::Linear => embed_bw_image(&cover, &message),
                Traversal::Spiral => embed_spiral_image(&cover, &message),
            };
            embedded.map_err(explain_capacity)?
        }
        (None, None) => anyhow::bail!("Either --text or --message must be provided."),
    };
    info!("hid payload in {:?} order", args.mode);

    save_pixels(&dest, &hidden)?;

    println!(
        "The payload has been successfully hidden and saved: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、按所选遍历顺序提取 LSB 平面，
/// 最后将恢复的文本或黑白图像写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与遍历参数的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件。
/// * 目标文件已存在且未指定 `--force`。
/// * 螺旋模式下图像中没有有效的尺寸头部。
/// * 无法写入到目标文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let stego = load_pixels(&args.image)?;

    let dest = match (&args.text, &args.message) {
        (Some(text_path), _) => {
            ensure_writable(text_path, args.force)?;
            let text = recover_text(&stego, args.mode, args.chars);
            fs::write(text_path, text).with_context(|| {
                format!(
                    "Unable to write to target text file: {}",
                    text_path.to_string_lossy().red().bold()
                )
            })?;
            text_path
        }
        (None, Some(message_path)) => {
            ensure_writable(message_path, args.force)?;
            let revealed = match args.mode {
                Traversal::Linear => reveal_bw_image(&stego),
                Traversal::Spiral => reveal_spiral_image(&stego).with_context(|| {
                    format!(
                        "Failed to recover a framed image from '{}'. \nThe image may not contain a spiral-embedded message or is corrupted.",
                        args.image.to_string_lossy().red().bold()
                    )
                })?,
            };
            save_bw(message_path, &revealed)?;
            message_path
        }
        (None, None) => anyhow::bail!("Either --text or --message must be provided."),
    };

    println!(
        "The payload has been successfully recovered and saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 按遍历顺序提取 LSB 平面并解码为文本，可选地只保留前 `chars` 个字符。
fn recover_text(stego: &Grid<u32>, mode: Traversal, chars: Option<usize>) -> String {
    let text = match mode {
        Traversal::Linear => reveal_text(stego),
        Traversal::Spiral => bits_to_text(&reveal_spiral_bit_array(stego)),
    };
    match chars {
        Some(limit) => text.chars().take(limit).collect(),
        None => text,
    }
}

/// 载体同目录下的 `doctored_<名称>.png`。
fn default_hidden_path(image: &Path) -> PathBuf {
    let stem = image
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_owned());
    image.with_file_name(format!("doctored_{stem}.png"))
}

fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

fn explain_capacity(err: StegoError) -> anyhow::Error {
    match err {
        StegoError::CoverTooSmall { needed, capacity } => anyhow::anyhow!(
            "Not enough space in the image to hide the payload. \nRequired: {}, Available: {}",
            needed.to_string().red().bold(),
            capacity.to_string().green().bold()
        ),
        other => other.into(),
    }
}
