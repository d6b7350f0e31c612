use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use hexid::{Id, Representation};

/// Command-line arguments for the `hexid` binary.
///
/// Global options fall back to environment variables, which may also be set
/// in a `.env` file in the working directory.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "hexid",
    version,
    about = "Issue, inspect and hash compact 63-bit identifiers"
)]
pub struct CliArgs {
    /// Node tag stamped into generated IDs (1..=63).
    ///
    /// Every process issuing IDs concurrently must use a distinct node.
    ///
    /// Environment variable: `HEXID_NODE`
    #[arg(long, global = true, env = "HEXID_NODE", default_value_t = Id::MIN_NODE)]
    pub node: u8,

    /// Representation used when printing generated or hashed IDs: `int64`,
    /// `uint64`, `text` or `binary`.
    ///
    /// Environment variable: `HEXID_REPR`
    #[arg(long, global = true, env = "HEXID_REPR", default_value_t = String::from("text"))]
    pub repr: String,

    /// Log filter directives, in `tracing-subscriber` `EnvFilter` syntax.
    ///
    /// Environment variable: `HEXID_LOG`
    #[arg(long, global = true, env = "HEXID_LOG", default_value_t = String::from("warn"))]
    pub log: String,

    /// Emit logs as JSON lines.
    ///
    /// Environment variable: `HEXID_LOG_JSON`
    #[arg(long, global = true, env = "HEXID_LOG_JSON", default_value_t = false)]
    pub log_json: bool,

    /// Print results as JSON, one object per line.
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Issue new time-based IDs.
    Generate {
        /// How many IDs to issue.
        #[arg(short, long, default_value_t = 1)]
        count: usize,
    },
    /// Show the fields of a text token.
    Decode {
        /// A 16-character hex token.
        token: String,
    },
    /// Print the text token for a raw integer.
    Encode {
        /// The raw unsigned value.
        raw: u64,
    },
    /// Derive an ID from content. Parts are concatenated in order.
    Hash {
        #[arg(required = true)]
        parts: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub node: u8,
    pub repr: Representation,
    pub json: bool,
    pub log: LogConfig,
    pub command: Command,
}

impl TryFrom<CliArgs> for Config {
    type Error = anyhow::Error;

    fn try_from(args: CliArgs) -> Result<Self, Self::Error> {
        if !(Id::MIN_NODE..=Id::MAX_NODE).contains(&args.node) {
            bail!(
                "HEXID_NODE ({}) must be between {} and {}",
                args.node,
                Id::MIN_NODE,
                Id::MAX_NODE
            );
        }

        let repr = args
            .repr
            .parse::<Representation>()
            .with_context(|| format!("invalid HEXID_REPR {:?}", args.repr))?;

        if let Command::Generate { count: 0 } = args.command {
            bail!("--count must be greater than 0");
        }

        Ok(Self {
            node: args.node,
            repr,
            json: args.json,
            log: LogConfig {
                filter: args.log,
                json: args.log_json,
            },
            command: args.command,
        })
    }
}
