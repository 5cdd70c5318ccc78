use clap::{Command, CommandFactory, Parser};
use dropbox_index::config::{self, IndexConfig};
use dropbox_index::scan::{self, CrawlOptions};
use dropbox_index::template::Template;
use dropbox_index::{logging, output};
use std::ffi::OsString;
use std::path::PathBuf;

fn version_string() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[derive(Parser)]
#[command(name = "dropbox-index")]
#[command(about = "Generate index.html directory listings")]
#[command(long_about = "\
Generate index.html directory listings

Writes an index.html into the given directory listing its files with size,
type icon and modification time. With --recursive every subdirectory gets
its own listing, linked from its parent and linking back to it.

Not listed:
  .hidden             # names starting with a dot
  index.html          # previous output
  dropbox*.*, 404.*   # ignore globs (configurable)
  *dir-info*          # shown below the table as the directory description

Example:
  dropbox-index -R -T template.html ~/Dropbox/Public/show")]
#[command(after_help = "ATTENTION:\n  Overwrites any existing index.html file(s)!")]
#[command(version = version_string())]
struct Cli {
    /// Include subdirectories (disabled by default)
    #[arg(short = 'R', long)]
    recursive: bool,

    /// Use HTML file as template; the listing replaces its %(FILES)s marker
    #[arg(short = 'T', long, value_name = "FILE", value_parser = existing_file)]
    template: Option<PathBuf>,

    /// Load settings from a TOML file (see --gen-config)
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print a documented config file with all defaults and exit
    #[arg(long)]
    gen_config: bool,

    /// Directory to index; when several are given the last one is used
    #[arg(value_name = "DIRECTORY")]
    directories: Vec<PathBuf>,
}

fn existing_file(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("no template file at {value}"))
    }
}

/// Move every argument that is not one of our flags (or a flag's value)
/// behind `--`, keeping their order.
///
/// Anything unrecognized, including `-x` or `--bogus`, is a directory
/// argument and takes part in "last one wins".
fn directories_last(cmd: &Command, args: Vec<OsString>) -> Vec<OsString> {
    let mut args = args.into_iter();
    let mut flags: Vec<OsString> = args.next().into_iter().collect();
    let mut directories = Vec::new();

    while let Some(arg) = args.next() {
        let text = arg.to_string_lossy().into_owned();
        if text == "--" {
            directories.extend(args.by_ref());
            break;
        }
        match flag_value_pending(cmd, &text) {
            Some(needs_value) => {
                flags.push(arg);
                if needs_value {
                    flags.extend(args.next());
                }
            }
            None => directories.push(arg),
        }
    }

    if !directories.is_empty() {
        flags.push(OsString::from("--"));
        flags.extend(directories);
    }
    flags
}

/// `None` when `text` is not one of `cmd`'s flags. Otherwise whether the
/// flag's value is the next argument.
fn flag_value_pending(cmd: &Command, text: &str) -> Option<bool> {
    let (arg, inline_value) = if let Some(long) = text.strip_prefix("--") {
        let (name, value) = match long.split_once('=') {
            Some((name, value)) => (name, Some(value)),
            None => (long, None),
        };
        let arg = cmd.get_arguments().find(|a| a.get_long() == Some(name))?;
        (arg, value.is_some())
    } else if let Some(short) = text.strip_prefix('-') {
        let mut chars = short.chars();
        let first = chars.next()?;
        let arg = cmd.get_arguments().find(|a| a.get_short() == Some(first))?;
        (arg, chars.next().is_some())
    } else {
        return None;
    };
    Some(arg.get_action().takes_values() && !inline_value)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init()?;

    if std::env::args_os().len() <= 1 {
        Cli::command().print_help()?;
        return Ok(());
    }

    let mut cmd = Cli::command();
    cmd.build();
    let args = directories_last(&cmd, std::env::args_os().collect());
    let cli = Cli::parse_from(args);

    if cli.gen_config {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let index_config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => IndexConfig::default(),
    };
    let template = cli.template.as_deref().map(Template::load).transpose()?;

    let target = cli.directories.last();
    output::print_banner(version_string(), target.map(PathBuf::as_path));
    let Some(target) = target else {
        println!("ERROR: No directory specified");
        return Ok(());
    };

    let options = CrawlOptions {
        recursive: cli.recursive,
        config: &index_config,
        template: template.as_ref(),
    };

    match scan::crawl(target, &options) {
        Ok(summary) => output::print_summary(&summary),
        Err(e) if e.is_invalid_target() => output::print_error(&e),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
