use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
struct Args {
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Parser)]
enum Cmd {
    /// Set the crate version to the newest release in the changelog
    BumpVersion {
        #[arg(long, default_value = "CHANGELOG.md")]
        changelog: PathBuf,
        #[arg(long, default_value = "memviewer/Cargo.toml")]
        manifest: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Cmd::BumpVersion { changelog, manifest } => {
            let root = workspace_root();
            bump_version(&root.join(changelog), &root.join(manifest))?;
        }
    }

    Ok(())
}

/// Paths on the command line are relative to the workspace root.
fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

fn bump_version(changelog: &Path, manifest: &Path) -> Result<()> {
    let text = fs::read_to_string(changelog)
        .with_context(|| format!("Failed to read {}", changelog.display()))?;
    let version = changelog_version(&text)?;
    println!("Version = {version}");

    let original = fs::read_to_string(manifest)
        .with_context(|| format!("Failed to read {}", manifest.display()))?;
    let updated = set_package_version(&original, &version)?;

    // Write next to the target, then rename over it
    let tmp = manifest.with_extension("toml.tmp");
    fs::write(&tmp, updated).with_context(|| format!("Failed to write {}", tmp.display()))?;
    fs::rename(&tmp, manifest)
        .with_context(|| format!("Failed to replace {}", manifest.display()))?;

    println!("✓ {} updated", manifest.display());
    Ok(())
}

/// Version of the first `## X.Y.Z` heading.
fn changelog_version(changelog: &str) -> Result<String> {
    let Some(heading) = changelog.lines().find_map(|line| line.strip_prefix("## ")) else {
        bail!("No '## X.Y.Z' release heading in changelog");
    };
    let version = heading.split_whitespace().next().unwrap_or_default();

    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() != 3 || parts.iter().any(|p| p.parse::<u64>().is_err()) {
        bail!("Invalid release heading {heading:?}, expected X.Y.Z");
    }
    Ok(version.to_string())
}

/// Replace the `version` key of the `[package]` table, keeping every other
/// line as is.
fn set_package_version(manifest: &str, version: &str) -> Result<String> {
    let mut in_package = false;
    let mut replaced = false;
    let mut out = String::with_capacity(manifest.len());

    for line in manifest.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with('[') {
            in_package = trimmed.starts_with("[package]");
        }
        if in_package && !replaced && trimmed.starts_with("version") && trimmed.contains('=') {
            out.push_str("version = \"");
            out.push_str(version);
            out.push('"');
            replaced = true;
        } else {
            out.push_str(line);
        }
        out.push('\n');
    }

    if !replaced {
        bail!("No version key in [package] table");
    }
    Ok(out)
}
