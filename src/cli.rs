//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::DEFAULT_THRESHOLD;
use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，支持线性与螺旋两种像素遍历顺序，
/// 可在无损格式图像 (如 PNG, BMP) 中隐藏或恢复文本与黑白图像。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，支持线性与螺旋两种像素遍历顺序，可在无损格式图像 (如 PNG, BMP) 中隐藏或恢复文本与黑白图像。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏) 和 recover (恢复)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像中隐藏文本文件内容或一张黑白图像。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文本或黑白图像。
    Recover(RecoverArgs),
}

/// 像素的遍历顺序。
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Traversal {
    /// 行优先顺序。
    #[default]
    Linear,
    /// 从左上角开始、顺时针向内收缩的螺旋顺序。
    Spiral,
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("payload").required(true).args(["text", "message"])))]
pub struct HideArgs {
    /// 用于隐写的载体图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 要隐藏的图像路径，按阈值转换为黑白图像后嵌入。
    #[arg(short, long)]
    pub message: Option<PathBuf>,

    /// 隐写完成后，保存结果图像的输出路径。默认为载体同目录下的 `doctored_<名称>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 像素遍历顺序。
    #[arg(long, value_enum, default_value_t = Traversal::Linear)]
    pub mode: Traversal,

    /// 黑白转换阈值，灰度值大于或等于该值视为白色。
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: i32,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("output").required(true).args(["text", "message"])))]
pub struct RecoverArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复文本后，保存文本内容的输出路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 恢复黑白图像后，保存图像的输出路径。
    #[arg(short, long)]
    pub message: Option<PathBuf>,

    /// 像素遍历顺序，必须与隐藏时一致。
    #[arg(long, value_enum, default_value_t = Traversal::Linear)]
    pub mode: Traversal,

    /// 只保留恢复文本的前 N 个字符。文本没有长度前缀，不指定时输出整个 LSB 平面的解码结果。
    #[arg(short, long)]
    pub chars: Option<usize>,

    /// 目标文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,
}
