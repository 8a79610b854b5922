use crate::args::Module;
use anyhow::Result;
use gate::domain::registry::InitializedProvider;
use gate::features::{duo, totp};
use gate::kernel::prelude::{HostPolicy, NetworkRange};
use std::path::Path;
use tracing::{debug, info};

/// Initializes the selected modules (all enabled ones when `modules` is empty).
pub fn run(file: &Path, modules: &[Module]) -> Result<()> {
    let properties = super::load(file)?;

    let providers = if modules.is_empty() {
        gate::init(&properties)?
    } else {
        let mut providers = Vec::with_capacity(modules.len());
        for module in modules {
            providers.push(match module {
                Module::Totp => totp::init(&properties)?,
                Module::Duo => duo::init(&properties)?,
            });
        }
        providers
    };

    for provider in &providers {
        report(provider);
    }

    info!(file = %file.display(), modules = providers.len(), "Configuration is valid");
    Ok(())
}

fn report(provider: &InitializedProvider) {
    if let Some(totp) = provider.downcast_ref::<totp::TotpProvider>() {
        let settings = totp.settings();
        debug!(
            provider = provider.id,
            issuer = %settings.issuer,
            digits = settings.digits,
            period = settings.period,
            mode = %settings.mode,
            "Resolved code settings"
        );
        log_policy(provider.id, totp.policy());
    } else if let Some(duo) = provider.downcast_ref::<duo::DuoProvider>() {
        debug!(
            provider = provider.id,
            api_hostname = duo.api_hostname(),
            client_id = duo.client_id(),
            redirect_uri = duo.redirect_uri(),
            timeout_secs = duo.auth_timeout().as_secs(),
            "Resolved Duo client"
        );
        log_policy(provider.id, duo.policy());
    }
}

fn log_policy(id: &str, policy: &HostPolicy) {
    let join = |ranges: &[NetworkRange]| {
        ranges.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
    };
    debug!(
        provider = id,
        bypass = %join(policy.bypass()),
        enforce = %join(policy.enforce()),
        "Resolved host lists"
    );
}
