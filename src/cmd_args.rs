use std::ffi::OsString;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name to read connection settings from. Default is 'default'.
    /// Missing profiles fall back to built-in defaults.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    #[clap(long, help = "API base URL (overrides the profile)")]
    base_url: Option<String>,

    #[clap(long, help = "log file path")]
    log_file: Option<String>,

    #[clap(short = 'v', long, help = "verbose logging")]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    base_url: Option<String>,
    log_file: Option<String>,
    verbose: bool,
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            base_url: args.base_url,
            log_file: args.log_file,
            verbose: args.verbose,
        }
    }
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    pub fn log_file(&self) -> Option<&str> {
        self.log_file.as_deref()
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}
