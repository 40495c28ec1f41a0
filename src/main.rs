use clap::Parser;
use env_logger::Env;

use spiral_lsb::{
    cli::{Cli, Commands},
    handler::{handle_hide, handle_recover},
};

/// 程序的主入口点
///
/// 初始化日志 (默认只输出警告，可通过 `RUST_LOG` 调整)，解析命令行参数，
/// 并根据指定的子命令（`hide` 或 `recover`）将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    // 解析命令行参数
    let cli = Cli::parse();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Hide(args) => handle_hide(args),
        Commands::Recover(args) => handle_recover(args),
    }
}
