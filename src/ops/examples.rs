//! Building example applications and installing them on a device.
//!
//! These are thin wrappers over `cargo`: one builds a named example and
//! reports where the binary landed, the other copies a file to the device
//! with the `storage` tool.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::process::{find_cargo, ProcessBuilder};

/// Default cargo package holding the examples.
pub const DEFAULT_PACKAGE: &str = "flipperzero";

/// Default compilation target of the device.
pub const DEFAULT_TARGET: &str = "thumbv7em-none-eabihf";

/// Default install directory on the device.
pub const DEFAULT_INSTALL_DIR: &str = "/ext/apps/Examples";

/// Default directory of the host tools workspace.
pub const DEFAULT_TOOLS_DIR: &str = "../tools";

/// Examples built when none are named.
pub const DEFAULT_EXAMPLES: &[&str] = &[
    "dialog",
    "example_images",
    "gpio",
    "gui",
    "hello-rust",
    "notification",
    "storage",
];

/// Extension of installed application binaries.
const APP_EXTENSION: &str = "fap";

/// Builds one named unit into a binary artifact.
pub trait UnitBuilder {
    /// Build `unit` and return the artifact path.
    fn build(&self, unit: &str) -> Result<PathBuf>;
}

/// Copies a local file to a path on the device.
pub trait DeviceTransfer {
    /// Send `local` to the device path `remote`.
    fn send(&self, local: &Path, remote: &str) -> Result<()>;
}

/// Builds examples with `cargo build --example`.
#[derive(Debug, Clone)]
pub struct CargoExampleBuilder {
    cargo: PathBuf,
    workspace_root: PathBuf,
    package: String,
    target: String,
}

impl CargoExampleBuilder {
    /// Create a builder for the workspace at `workspace_root`.
    ///
    /// The root is made absolute so artifact paths stay valid for tools
    /// running in another directory.
    pub fn new(
        cargo: impl Into<PathBuf>,
        workspace_root: impl AsRef<Path>,
        package: impl Into<String>,
        target: impl Into<String>,
    ) -> Result<Self> {
        let workspace_root = workspace_root.as_ref();
        let workspace_root = std::path::absolute(workspace_root).with_context(|| {
            format!("failed to resolve workspace {}", workspace_root.display())
        })?;

        Ok(CargoExampleBuilder {
            cargo: cargo.into(),
            workspace_root,
            package: package.into(),
            target: target.into(),
        })
    }

    /// Locate cargo and use the default package and target.
    pub fn detect(workspace_root: impl AsRef<Path>) -> Result<Self> {
        Self::new(find_cargo()?, workspace_root, DEFAULT_PACKAGE, DEFAULT_TARGET)
    }

    /// Override the package.
    pub fn with_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Override the target triple.
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = target.into();
        self
    }

    /// The cargo invocation for `unit`.
    pub fn command(&self, unit: &str) -> ProcessBuilder {
        ProcessBuilder::new(&self.cargo)
            .args(["build", "--package", self.package.as_str(), "--example", unit])
            .args(["--all-features", "--release"])
            .cwd(&self.workspace_root)
    }

    /// Where cargo puts the binary for `unit`.
    pub fn artifact_path(&self, unit: &str) -> PathBuf {
        self.workspace_root
            .join("target")
            .join(&self.target)
            .join("release")
            .join("examples")
            .join(unit)
    }
}

impl UnitBuilder for CargoExampleBuilder {
    fn build(&self, unit: &str) -> Result<PathBuf> {
        self.command(unit)
            .run()
            .with_context(|| format!("failed to build example `{}`", unit))?;
        Ok(self.artifact_path(unit))
    }
}

/// Sends files with the `storage` binary of the tools workspace.
#[derive(Debug, Clone)]
pub struct StorageToolTransfer {
    cargo: PathBuf,
    tools_dir: PathBuf,
}

impl StorageToolTransfer {
    /// Create a transfer that runs the tools workspace at `tools_dir`.
    pub fn new(cargo: impl Into<PathBuf>, tools_dir: impl Into<PathBuf>) -> Self {
        StorageToolTransfer {
            cargo: cargo.into(),
            tools_dir: tools_dir.into(),
        }
    }

    /// The cargo invocation sending `local` to `remote`.
    pub fn command(&self, local: &Path, remote: &str) -> ProcessBuilder {
        ProcessBuilder::new(&self.cargo)
            .args(["run", "--release", "--bin", "storage", "--", "send"])
            .arg(local)
            .arg(remote)
            .cwd(&self.tools_dir)
    }
}

impl DeviceTransfer for StorageToolTransfer {
    fn send(&self, local: &Path, remote: &str) -> Result<()> {
        self.command(local, remote)
            .run()
            .with_context(|| format!("failed to copy {} to {}", local.display(), remote))
    }
}

/// One built (and possibly installed) example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltUnit {
    pub name: String,
    pub artifact: PathBuf,
    /// Device path, if installed
    pub installed_to: Option<String>,
}

/// Device path an example is installed to.
pub fn install_path(install_dir: &str, unit: &str) -> String {
    format!(
        "{}/{}.{}",
        install_dir.trim_end_matches('/'),
        unit,
        APP_EXTENSION
    )
}

/// Build each unit in order, installing it when a transfer is given.
///
/// Stops at the first failure.
pub fn build_examples(
    builder: &dyn UnitBuilder,
    transfer: Option<&dyn DeviceTransfer>,
    units: &[String],
    install_dir: &str,
) -> Result<Vec<BuiltUnit>> {
    let mut built = Vec::with_capacity(units.len());

    for unit in units {
        tracing::info!("Building {}", unit);
        let artifact = builder.build(unit)?;

        let installed_to = match transfer {
            Some(transfer) => {
                let remote = install_path(install_dir, unit);
                tracing::info!("Copying {} to {}", artifact.display(), remote);
                transfer.send(&artifact, &remote)?;
                Some(remote)
            }
            None => None,
        };

        built.push(BuiltUnit {
            name: unit.clone(),
            artifact,
            installed_to,
        });
    }

    Ok(built)
}
