//! # Command Line
//!
//! `clap` definitions for the `writex` binary. Flags given here win over
//! the config file and the `WX_*` environment.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shared_types::Address;

use crate::container::WritexConfig;

/// WriteX: register as a pseudonymous writer and browse published records.
#[derive(Parser, Debug)]
#[command(name = "writex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "WX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Stealth issuance service base URL
    #[arg(long, global = true)]
    pub backend_url: Option<String>,

    /// JSON-RPC endpoint of the node / wallet bridge
    #[arg(long, global = true)]
    pub rpc_url: Option<String>,

    /// Writer registry contract address
    #[arg(long, global = true)]
    pub contract: Option<Address>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// `writex` subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Run the registration handshake and print the dashboard link
    Register,

    /// List published records
    Blogs {
        /// Stealth address to open the dashboard for
        #[arg(long, conflicts_with = "route")]
        stealth: Option<String>,

        /// Dashboard route or link, e.g. `/blog-page?stealth=0x..`
        #[arg(long)]
        route: Option<String>,
    },

    /// Print the ledger address bound to a writer key
    Writer {
        /// Stealth address used as the writer key
        key: String,
    },

    /// Publish a record
    Post {
        /// Record title
        #[arg(long)]
        title: String,

        /// Off-chain content pointer (e.g. an IPFS CID)
        #[arg(long)]
        pointer: String,

        /// Writer key (stealth address)
        #[arg(long)]
        key: String,

        /// Authorship proof
        #[arg(long)]
        proof: String,
    },
}

impl Cli {
    /// Apply command line overrides on top of a resolved config.
    pub fn apply_overrides(&self, config: &mut WritexConfig) {
        if let Some(url) = &self.backend_url {
            config.issuer.base_url = url.clone();
        }
        if let Some(url) = &self.rpc_url {
            config.ledger.rpc_url = url.clone();
        }
        if let Some(contract) = self.contract {
            config.ledger.contract_address = Some(contract);
        }
    }
}
