//! Minimal CLI parsing for configuration overrides.

use std::env;
use std::path::PathBuf;

#[derive(Debug, Default)]
pub struct CliOptions {
    pub archive_root: Option<PathBuf>,
    pub core_root: Option<PathBuf>,
    pub rotation_root: Option<PathBuf>,
    pub state_file: Option<PathBuf>,
    pub capacity: Option<usize>,
    pub max_age_days: Option<i64>,
}

impl CliOptions {
    pub fn from_args() -> Self {
        Self::parse(env::args().skip(1))
    }

    fn parse(mut args: impl Iterator<Item = String>) -> Self {
        let mut options = CliOptions::default();
        while let Some(arg) = args.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) => (flag.to_string(), Some(value.to_string())),
                None => (arg, None),
            };
            match flag.as_str() {
                "--archive-root" => options.archive_root = take(inline, &mut args).map(PathBuf::from),
                "--core-root" => options.core_root = take(inline, &mut args).map(PathBuf::from),
                "--rotation-root" => {
                    options.rotation_root = take(inline, &mut args).map(PathBuf::from)
                }
                "--state-file" => options.state_file = take(inline, &mut args).map(PathBuf::from),
                "--capacity" => {
                    options.capacity = take(inline, &mut args).and_then(|v| v.parse().ok())
                }
                "--max-age-days" => {
                    options.max_age_days = take(inline, &mut args).and_then(|v| v.parse().ok())
                }
                _ => {}
            }
        }
        options
    }
}

fn take(inline: Option<String>, args: &mut impl Iterator<Item = String>) -> Option<String> {
    inline.or_else(|| args.next())
}
