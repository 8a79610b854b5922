use crate::args::Module;
use anyhow::Result;
use gate::features::{duo::DuoConfig, totp::TotpConfig};
use std::net::IpAddr;
use std::path::Path;
use tracing::{info, warn};

/// Logs whether a login from `address` must complete `module`'s second factor.
pub fn run(file: &Path, address: IpAddr, module: Module) -> Result<bool> {
    let properties = super::load(file)?;

    let policy = match module {
        Module::Totp => TotpConfig::new(&properties).host_policy()?,
        Module::Duo => DuoConfig::new(&properties).host_policy()?,
    };

    for warning in policy.warnings() {
        warn!(module = module.id(), "{warning}");
    }

    let required = policy.requires_second_factor(address);
    if required {
        info!(module = module.id(), %address, "Second factor required");
    } else {
        info!(module = module.id(), %address, "Second factor skipped");
    }
    Ok(required)
}
