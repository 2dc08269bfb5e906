//! Build automation for rosa-kube
//!
//! Usage: cargo xtask <command>
//!
//! Available commands:
//! - build: Build the project
//! - test: Run unit tests, integration suites, or both
//! - dist: Create a release tarball named the way cargo-binstall expects
//! - deb: Build a Debian package with cargo-deb
//! - install: Install to system
//! - ci: Run CI checks

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use xshell::{cmd, Shell};

const BIN: &str = "rosa-kube";

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Build automation for rosa-kube")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the project
    Build {
        /// Build in release mode
        #[arg(long)]
        release: bool,
    },
    /// Run tests
    Test {
        /// Run only the unit tests inside the crate
        #[arg(long, conflicts_with = "suite")]
        unit: bool,
        /// Run a single integration suite (e.g. edit_cluster_test)
        #[arg(long)]
        suite: Option<String>,
    },
    /// Create a release tarball
    Dist {
        /// Target triple (e.g., x86_64-unknown-linux-gnu)
        #[arg(long)]
        target: Option<String>,
    },
    /// Build a Debian package (requires cargo-deb)
    Deb,
    /// Install to system
    Install {
        /// Installation prefix (default: /usr/local)
        #[arg(long, default_value = "/usr/local")]
        prefix: String,
    },
    /// Run CI checks (format, clippy, test)
    Ci,
    /// Format code
    Format {
        /// Check formatting without modifying files
        #[arg(long)]
        check: bool,
    },
    /// Run clippy
    Clippy,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let sh = Shell::new()?;

    sh.change_dir(project_root()?);

    match cli.command {
        Commands::Build { release } => build(&sh, release),
        Commands::Test { unit, suite } => test(&sh, unit, suite.as_deref()),
        Commands::Dist { target } => dist(&sh, target.as_deref()),
        Commands::Deb => deb(&sh),
        Commands::Install { prefix } => install(&sh, &prefix),
        Commands::Ci => ci(&sh),
        Commands::Format { check } => format(&sh, check),
        Commands::Clippy => clippy(&sh),
    }
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    println!("🔨 Building {}...", BIN);

    if release {
        cmd!(sh, "cargo build --release --bin {BIN}").run()?;
        println!("✅ Release build completed: target/release/{}", BIN);
    } else {
        cmd!(sh, "cargo build --bin {BIN}").run()?;
        println!("✅ Debug build completed: target/debug/{}", BIN);
    }

    Ok(())
}

fn test(sh: &Shell, unit: bool, suite: Option<&str>) -> Result<()> {
    match (unit, suite) {
        (true, _) => {
            println!("🧪 Running unit tests...");
            cmd!(sh, "cargo test -p {BIN} --lib --bins").run()?;
        }
        (false, Some(suite)) => {
            println!("🧪 Running integration suite {}...", suite);
            cmd!(sh, "cargo test -p {BIN} --test {suite}").run()?;
        }
        (false, None) => {
            println!("🧪 Running all tests...");
            cmd!(sh, "cargo test --workspace").run()?;
        }
    }

    println!("✅ Tests passed");
    Ok(())
}

fn dist(sh: &Shell, target: Option<&str>) -> Result<()> {
    println!("📦 Creating distribution package...");

    let root = project_root()?;
    let (release_dir, triple) = match target {
        Some(triple) => {
            cmd!(sh, "cargo build --release --bin {BIN} --target {triple}").run()?;
            (root.join("target").join(triple).join("release"), triple.to_string())
        }
        None => {
            cmd!(sh, "cargo build --release --bin {BIN}").run()?;
            (root.join("target/release"), host_triple(sh)?)
        }
    };

    let dist_dir = root.join("dist");
    sh.create_dir(&dist_dir)?;
    sh.copy_file(release_dir.join(BIN), dist_dir.join(BIN))?;

    // Matches package.metadata.binstall pkg-url
    let archive_name = format!("{}-{}.tar.gz", BIN, triple);
    cmd!(sh, "tar -czf {archive_name} -C dist {BIN}")
        .run()
        .context("Failed to create tarball")?;

    println!("✅ Distribution package created: {}", archive_name);
    Ok(())
}

fn host_triple(sh: &Shell) -> Result<String> {
    let version = cmd!(sh, "rustc -vV").read()?;
    match version.lines().find_map(|l| l.strip_prefix("host: ")) {
        Some(host) => Ok(host.trim().to_string()),
        None => bail!("Could not determine host target from `rustc -vV`"),
    }
}

fn deb(sh: &Shell) -> Result<()> {
    println!("📦 Building Debian package...");
    cmd!(sh, "cargo deb -p {BIN}")
        .run()
        .context("cargo-deb failed; install it with `cargo install cargo-deb`")?;
    println!("✅ Debian package written to target/debian/");
    Ok(())
}

fn install(sh: &Shell, prefix: &str) -> Result<()> {
    println!("📥 Installing {} to {}...", BIN, prefix);

    let binary = project_root()?.join("target/release").join(BIN);
    if !binary.exists() {
        println!("Building release binary first...");
        cmd!(sh, "cargo build --release --bin {BIN}").run()?;
    }

    let bin_dir = Path::new(prefix).join("bin");
    sh.create_dir(&bin_dir)?;

    let install_path = bin_dir.join(BIN);
    sh.copy_file(&binary, &install_path)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&install_path, std::fs::Permissions::from_mode(0o755))?;
    }

    println!("✅ Installed to: {}", install_path.display());
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    println!("🔍 Running CI checks...");

    println!("\n📝 Checking formatting...");
    format(sh, true)?;

    println!("\n🔧 Running clippy...");
    clippy(sh)?;

    println!("\n🧪 Running tests...");
    test(sh, false, None)?;

    println!("\n✅ All CI checks passed!");
    Ok(())
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    if check {
        cmd!(sh, "cargo fmt --all -- --check").run()?;
        println!("✅ Code formatting is correct");
    } else {
        cmd!(sh, "cargo fmt --all").run()?;
        println!("✅ Code formatted");
    }
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --workspace --all-targets -- -D warnings").run()?;
    println!("✅ Clippy checks passed");
    Ok(())
}

fn project_root() -> Result<PathBuf> {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(Path::to_path_buf)
        .context("xtask must live one level below the workspace root")
}
