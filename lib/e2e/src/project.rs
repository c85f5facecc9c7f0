use std::{
    env,
    fs::File,
    io::{BufReader, Read},
    path::{Path, PathBuf},
};

use eyre::{bail, Context};
use toml::Table;

use crate::environment::get_programs_dir;

/// A Stylus program crate that can be deployed.
#[derive(Debug)]
pub(crate) struct Program {
    /// Package name, as in the crate's manifest.
    pub name: String,
    /// Path to the directory where the crate's manifest lives.
    pub manifest_dir: PathBuf,
}

impl Program {
    /// The crate whose integration tests are currently running.
    pub(crate) fn current() -> eyre::Result<Self> {
        let manifest_dir = env::current_dir()?;
        let name = read_pkg_name(&manifest_dir)?;
        Ok(Self { name, manifest_dir })
    }

    /// Looks up the program package called `name` among the workspace's
    /// programs.
    pub(crate) fn by_name(name: &str) -> eyre::Result<Self> {
        let programs_dir = get_programs_dir()?;
        let entries = std::fs::read_dir(&programs_dir).wrap_err(format!(
            "failed to read programs in {}",
            programs_dir.display()
        ))?;

        for entry in entries {
            let manifest_dir = entry?.path();
            if !manifest_dir.join("Cargo.toml").is_file() {
                continue;
            }

            if read_pkg_name(&manifest_dir)? == name {
                return Ok(Self { name: name.to_owned(), manifest_dir });
            }
        }

        bail!("no program named `{name}` in {}", programs_dir.display())
    }
}

/// Reads and parses the package name from a manifest in `path`.
fn read_pkg_name<P: AsRef<Path>>(path: P) -> eyre::Result<String> {
    let cargo_toml = path.as_ref().join("Cargo.toml");

    let mut reader = BufReader::new(File::open(&cargo_toml).wrap_err(
        format!("failed to open {}", cargo_toml.display()),
    )?);
    let mut buffer = String::new();
    reader.read_to_string(&mut buffer)?;

    let table = buffer.parse::<Table>()?;
    let name = table
        .get("package")
        .and_then(|package| package.get("name"))
        .and_then(toml::Value::as_str);

    match name {
        Some(x) => Ok(x.to_owned()),
        None => Err(eyre::eyre!("unable to find package name in toml")),
    }
}
