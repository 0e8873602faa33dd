use clap::Parser;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    "

License: MIT
Rust Edition: 2024"
);

#[derive(Parser, Debug)]
#[command(name = "urlfix")]
#[command(about = "Replace hardcoded API URLs with centralized endpoint references")]
#[command(long_about = "urlfix rewrites a JavaScript source tree in place.

It walks frontend/aegis/src (relative to the working directory), and in every
.js and .jsx file replaces quoted localhost API URLs with references into the
API_ENDPOINTS config object. Files that gain such a reference get an import
line at the top unless one is already there.

Only files whose content actually changes are written. A file that cannot be
read as UTF-8 text is reported and skipped.

OUTPUT:
  Updated: <path>                     File was rewritten
  Error processing <path>: <message>  File was skipped

The run takes no options; the source root and replacement table are built in.")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_version = LONG_VERSION)]
pub struct Cli {}

/// Handle `--help` / `--version`; any other argument is rejected by clap.
pub fn parse_args() -> Cli {
    Cli::parse()
}
