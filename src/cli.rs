//! CLI definitions and command routing.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::config::Settings;
use crate::hosts::{self, Address, HostsFile};
use crate::platform;

#[derive(Parser)]
#[command(name = "hostsfile", version)]
#[command(about = "Manage the entries of your hosts file")]
#[command(
    long_about = "Manage the entries of your hosts file.\n\n\
    Reads the hosts file (or stdin, when data is piped in), applies the edit and \
    atomically replaces the file. Comments and blank lines are kept."
)]
pub struct Cli {
    /// File to read/write [default: $HOSTSFILE_PATH or the OS hosts file]
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Print the updated hosts file to stdout instead of writing it
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Bind hostnames to an address, e.g. `add www.example.test api.example.test 127.0.0.1`
    Add {
        /// One or more hostnames followed by the IP address to use for all of them
        #[arg(value_name = "HOSTNAME... IP", num_args = 2.., required = true)]
        args: Vec<String>,
    },
    /// Remove hostnames from every entry
    Remove {
        #[arg(value_name = "HOSTNAME", num_args = 1.., required = true)]
        hostnames: Vec<String>,
    },
    /// Print the addresses a hostname is bound to
    Lookup { hostname: String },
}

/// Run CLI and dispatch to handlers.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    crate::logging::init(cli.verbose);
    let settings = Settings::resolve(cli.file, cli.dry_run);
    debug!(path = %settings.hosts_file.display(), dry_run = settings.dry_run, "resolved settings");

    match cli.command {
        Commands::Add { args } => cmd_add(&settings, &args),
        Commands::Remove { hostnames } => cmd_remove(&settings, &hostnames),
        Commands::Lookup { hostname } => cmd_lookup(&settings, &hostname),
    }
}

/// Split `add` arguments into hostnames and the trailing address.
pub fn split_add_args(args: &[String]) -> Result<(&[String], Address)> {
    let Some((last, names)) = args.split_last() else {
        anyhow::bail!("please provide a hostname to add");
    };
    if names.is_empty() {
        anyhow::bail!("please provide at least one hostname followed by an IP address");
    }
    let address: Address = last.parse()?;
    Ok((names, address))
}

/// Bind every hostname to `address`, in argument order.
pub fn apply_add(
    hosts: &mut HostsFile,
    hostnames: &[String],
    address: impl Into<Address>,
) -> Result<()> {
    let address = address.into();
    for name in hostnames {
        hosts
            .set(address.clone(), name)
            .with_context(|| format!("add {name:?}"))?;
    }
    Ok(())
}

/// Remove every hostname; returns the ones that were not present.
pub fn apply_remove<'a>(hosts: &mut HostsFile, hostnames: &'a [String]) -> Vec<&'a str> {
    hostnames
        .iter()
        .filter(|name| !hosts.remove(name))
        .map(String::as_str)
        .collect()
}

fn cmd_add(settings: &Settings, args: &[String]) -> Result<()> {
    let (names, address) = split_add_args(args)?;
    edit(settings, |hosts| apply_add(hosts, names, address))
}

fn cmd_remove(settings: &Settings, hostnames: &[String]) -> Result<()> {
    edit(settings, |hosts| {
        for name in apply_remove(hosts, hostnames) {
            warn!(hostname = name, "hostname not found");
        }
        Ok(())
    })
}

fn cmd_lookup(settings: &Settings, hostname: &str) -> Result<()> {
    let hosts = read_input(settings)?;
    let addresses = hosts.addresses(hostname);
    if addresses.is_empty() {
        anyhow::bail!("hostname not found: {hostname}");
    }
    for address in addresses {
        println!("{address}");
    }
    Ok(())
}

/// Read, apply, write. The hosts file is only replaced once the edit succeeded.
fn edit<F>(settings: &Settings, apply: F) -> Result<()>
where
    F: FnOnce(&mut HostsFile) -> Result<()>,
{
    if !settings.dry_run {
        platform::ensure_writable(&settings.hosts_file)?;
    }
    let mut hosts = read_input(settings)?;
    apply(&mut hosts)?;
    write_output(settings, &hosts)
}

fn read_input(settings: &Settings) -> Result<HostsFile> {
    if platform::stdin_is_piped() {
        debug!("reading hosts from stdin");
        let hosts = hosts::decode(io::stdin().lock()).context("read hosts from stdin")?;
        return Ok(hosts);
    }
    let path = &settings.hosts_file;
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let hosts = hosts::decode(file).with_context(|| format!("read {}", path.display()))?;
    Ok(hosts)
}

fn write_output(settings: &Settings, hosts: &HostsFile) -> Result<()> {
    if settings.dry_run {
        hosts::encode(io::stdout().lock(), hosts).context("write stdout")?;
        return Ok(());
    }

    let path = &settings.hosts_file;
    let temp = platform::temp_file_for(path)?;
    hosts::encode(BufWriter::new(temp.as_file()), hosts).context("write temp hosts file")?;
    platform::replace_atomically(temp, path)?;
    info!(path = %path.display(), records = hosts.len(), "hosts file updated");
    Ok(())
}
