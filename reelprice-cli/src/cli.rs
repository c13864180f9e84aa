use clap::{Parser, Subcommand};

/// reelprice - cheapest movie prices across cinemaworld and filmworld
#[derive(Parser, Debug)]
#[command(name = "reelprice")]
#[command(about = "Compare movie prices across cinemaworld and filmworld", long_about = None)]
pub struct Cli {
    /// Base URL of the upstream movie API
    #[arg(long, env = "API_URL_BASE")]
    pub api_url: String,

    /// Access token sent as `x-access-token`
    #[arg(long, env = "API_TOKEN", hide_env_values = true)]
    pub token: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Browse movies and prices from an interactive menu
    Browse {
        /// Per-call provider timeout in milliseconds
        #[arg(long, default_value = "1000")]
        timeout_ms: u64,
    },

    /// Serve the catalog and cheapest-price HTTP API
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Overall deadline per request, in seconds
        #[arg(long, default_value = "30")]
        request_timeout_secs: u64,
    },
}
