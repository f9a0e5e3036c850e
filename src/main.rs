//! Entry point for the mkuki UKI assembler.
//!
//! This file handles high-level application flow:
//! 1. Parse command-line arguments using `clap`.
//! 2. Resolve the EFI boot stub (explicit path, or autodetected from the
//!    architecture).
//! 3. Run the build pipeline: inspect, plan, append.
//! 4. Surface the append step's exit status as the process exit code.
//!
//! Error handling is done via `anyhow`.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mkuki::arch::ArchCode;
use mkuki::builder::{SectionSources, UkiBuilder};
use mkuki::config::Config;
use mkuki::editor::ObjcopyEditor;
use mkuki::inspect::ObjdumpInspector;
use mkuki::stub;

fn main() -> Result<()> {
    let config = Config::parse();

    let filter = EnvFilter::try_new(&config.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // An explicit stub takes priority; otherwise guess from the arch.
    let stub = match config.efistub {
        Some(path) => path,
        None => stub::locate(ArchCode::from_machine(&config.arch)?)?,
    };
    tracing::info!("using EFI stub {}", stub.display());

    let sources = SectionSources {
        osrel: config.osrel,
        initrd: config.initrd,
        linux: config.linux,
        splash: config.splash,
        cmdline: config.cmdline,
    };

    let builder = UkiBuilder::new(ObjdumpInspector, ObjcopyEditor);
    let status = builder.build(&stub, &sources, &config.output)?;

    if !status.success() {
        // The edit step's failure is reported, not raised; callers check
        // the exit code and the produced output.
        tracing::warn!("objcopy exited with {status}");
        std::process::exit(status.code().unwrap_or(1));
    }

    println!("Wrote UKI to {}", config.output.display());
    Ok(())
}
