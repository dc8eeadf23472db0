use clap::ValueEnum;

/// ログレベル
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "UPPERCASE")]
pub enum LogLevel {
    #[default]
    Warning,
    Info,
    Debug,
}

/// サマリーの出力形式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum SummaryFormat {
    #[default]
    Text,
    Json,
}
