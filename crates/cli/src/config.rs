// crates/cli/src/config.rs
use crate::args::Args;
use crate::options;
pub use lineleak_engine::config::{Config, ConfigBuilder};
use lineleak_engine::options as engine_options;

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let mode = if args.physical {
            engine_options::CountMode::Physical
        } else {
            engine_options::CountMode::Logical
        };
        let limit_policy = if args.silence {
            engine_options::LimitPolicy::Ignore
        } else {
            engine_options::LimitPolicy::Enforce
        };
        let format: engine_options::OutputFormat = args.format.into();

        ConfigBuilder::default()
            .path(args.filename)
            .limit(args.limit)
            .mode(mode)
            .limit_policy(limit_policy)
            .format(format)
            .build()
            .expect("Failed to build config")
    }
}

// From trait implementations for CLI -> Engine enum conversion

macro_rules! map_enum {
    ($from:ty, $to:ty, $($variant:ident),+ $(,)?) => {
        impl From<$from> for $to {
            fn from(f: $from) -> Self {
                match f {
                    $( <$from>::$variant => <$to>::$variant, )+
                }
            }
        }
    };
}

map_enum!(options::OutputFormat, engine_options::OutputFormat, Text, Json);
