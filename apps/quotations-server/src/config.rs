//! Command-line and environment configuration.

use std::{net::SocketAddr, path::PathBuf};

use clap::{Parser, ValueEnum};
use quotations_core::{IdPolicy, LengthPlusOne, MaxPlusOne};

#[derive(Parser, Debug, Clone)]
#[command(name = "quotations-server", about = "Per-session quotation list server", version)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "QUOTATIONS_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Directory served for non-API paths
    #[arg(long, env = "QUOTATIONS_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// How ids are assigned to new quotations
    #[arg(long, env = "QUOTATIONS_ID_POLICY", value_enum, default_value_t = IdPolicyKind::Length)]
    pub id_policy: IdPolicyKind,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdPolicyKind {
    /// Number of quotations in the session plus one
    Length,
    /// Highest id in the session plus one
    Max,
}

impl IdPolicyKind {
    /// Build the policy this option selects.
    #[must_use]
    pub fn into_policy(self) -> Box<dyn IdPolicy> {
        match self {
            Self::Length => Box::new(LengthPlusOne),
            Self::Max => Box::new(MaxPlusOne),
        }
    }
}
