// crates/cli/src/args.rs
use crate::options::{LogLevel, SummaryFormat};
use crate::parsers::{parse_timeout_secs, parse_suffix};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "check_format",
    version = crate::VERSION,
    about = "指定したディレクトリ直下にあるファイルの文字エンコーディング、拡張子のチェック・変換を行うコマンド."
)]
pub struct Args {
    /// 検査対象のファイルが配置されているディレクトリ
    #[arg(short = 'd', long = "dir", value_name = "DIRECTORY", default_value = "./")]
    pub dir: PathBuf,

    /// ログレベル
    #[arg(
        short = 'l',
        long,
        value_enum,
        ignore_case = true,
        default_value = "WARNING",
        value_name = "WARNING|INFO|DEBUG"
    )]
    pub loglevel: LogLevel,

    /// リネーム対象の拡張子
    #[arg(long, value_name = "SUFFIX", default_value = ".txt", value_parser = parse_suffix)]
    pub from_ext: String,

    /// リネーム後の拡張子
    #[arg(long, value_name = "SUFFIX", default_value = ".csv", value_parser = parse_suffix)]
    pub to_ext: String,

    /// 拡張子の変換を行わない
    #[arg(long)]
    pub no_retag: bool,

    /// 最初のエラーで処理を中断する
    #[arg(long, visible_alias = "strict")]
    pub fail_fast: bool,

    /// nkf 1回あたりのタイムアウト (秒)
    #[arg(long, value_name = "SECS", default_value = "30", value_parser = parse_timeout_secs)]
    pub timeout: u64,

    /// nkf コマンドのパス
    #[arg(long, value_name = "PROGRAM", default_value = "nkf")]
    pub nkf: PathBuf,

    /// サマリーの出力形式
    #[arg(long, value_enum, default_value = "text")]
    pub format: SummaryFormat,
}
