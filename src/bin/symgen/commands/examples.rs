//! `symgen examples` command
//!
//! Builds example applications with cargo and optionally installs them on a
//! connected device.

use anyhow::Result;

use crate::cli::ExamplesArgs;
use symgen::ops::{build_examples, CargoExampleBuilder, DeviceTransfer, StorageToolTransfer};
use symgen::util::diagnostic::suggestions;
use symgen::util::process::find_cargo;
use symgen::Config;

pub fn execute(args: ExamplesArgs, config: &Config) -> Result<()> {
    let settings = &config.examples;
    let names = if args.names.is_empty() {
        settings.names()
    } else {
        args.names
    };

    let builder = CargoExampleBuilder::detect(&args.workspace)?
        .with_package(settings.package())
        .with_target(settings.target());

    let transfer = if args.install {
        Some(StorageToolTransfer::new(find_cargo()?, settings.tools_dir()))
    } else {
        None
    };

    let built = build_examples(
        &builder,
        transfer.as_ref().map(|t| t as &dyn DeviceTransfer),
        &names,
        settings.install_dir(),
    )
    .inspect_err(|_| tracing::info!("help: {}", suggestions::BUILD_FAILED))?;

    for unit in &built {
        match unit.installed_to {
            Some(ref remote) => println!("{} -> {}", unit.name, remote),
            None => println!("{} -> {}", unit.name, unit.artifact.display()),
        }
    }

    Ok(())
}
