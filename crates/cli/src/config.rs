// crates/cli/src/config.rs
use crate::args::Args;
pub use check_format_engine::config::{
    Config, ConfigBuilder, RetagRule, RetagRuleBuilder, ToolConfig, ToolConfigBuilder,
};
use check_format_engine::options::{ErrorPolicy, TARGET_ENCODING};
use std::time::Duration;

impl From<&Args> for Config {
    fn from(args: &Args) -> Self {
        let retag = (!args.no_retag).then(|| RetagRule {
            from: args.from_ext.clone(),
            to: args.to_ext.clone(),
        });

        let policy = if args.fail_fast {
            ErrorPolicy::FailFast
        } else {
            ErrorPolicy::Continue
        };

        Self {
            directory: args.dir.clone(),
            retag,
            target_encoding: TARGET_ENCODING.to_string(),
            policy,
            tool: ToolConfig {
                program: args.nkf.clone(),
                timeout: Some(Duration::from_secs(args.timeout)),
            },
        }
    }
}
