pub mod evaluate;
pub mod validate;

use anyhow::{Context, Result};
use gate::kernel::prelude::Properties;
use std::path::Path;

fn load(file: &Path) -> Result<Properties> {
    Properties::load(Some(file)).with_context(|| format!("Cannot read {}", file.display()))
}
