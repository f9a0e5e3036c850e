//! Configuration module.
//!
//! This module defines the command-line interface (CLI) for the tool using
//! `clap`. Flag names and shorts follow the conventions of the existing
//! UKI tooling (`-l` kernel, `-i` initramfs, `-r` os-release, ...).

use clap::Parser;
use std::path::PathBuf;

/// Build a Unified Kernel Image from an EFI boot stub.
///
/// Appends the kernel, initramfs, and metadata as PE sections to an EFI
/// boot stub, producing a single image bootable directly by UEFI firmware.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Output filename
    pub output: PathBuf,

    /// Path to Linux kernel
    #[arg(short, long)]
    pub linux: PathBuf,

    /// Path to initramfs
    #[arg(short, long)]
    pub initrd: PathBuf,

    /// Path to os-release
    #[arg(short = 'r', long)]
    pub osrel: PathBuf,

    /// Path to splash image (.bmp format)
    #[arg(short, long)]
    pub splash: Option<PathBuf>,

    /// Kernel cmdline string
    #[arg(short, long)]
    pub cmdline: Option<String>,

    /// Path to EFI boot stub; bypasses stub autodetection
    #[arg(short, long)]
    pub efistub: Option<PathBuf>,

    /// Architecture to guess the EFI stub with (x64, ia32, aa64...)
    #[arg(short = 'A', long, default_value = std::env::consts::ARCH)]
    pub arch: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", help = "Set the logging level")]
    pub log_level: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_flags_and_positional_output() {
        let config = Config::parse_from([
            "mkuki", "-l", "vmlinuz", "-i", "initrd.img", "-r", "os-release", "uki.efi",
        ]);
        assert_eq!(config.output, PathBuf::from("uki.efi"));
        assert_eq!(config.linux, PathBuf::from("vmlinuz"));
        assert!(config.splash.is_none());
        assert!(config.cmdline.is_none());
        assert!(config.efistub.is_none());
        assert_eq!(config.arch, std::env::consts::ARCH);
    }

    #[test]
    fn optional_flags() {
        let config = Config::parse_from([
            "mkuki",
            "--linux=vmlinuz",
            "--initrd=initrd.img",
            "--osrel=os-release",
            "--splash=splash.bmp",
            "--cmdline=root=/dev/vda1 quiet",
            "--efistub=./stub.efi",
            "--arch=aarch64",
            "uki.efi",
        ]);
        assert_eq!(config.splash, Some(PathBuf::from("splash.bmp")));
        assert_eq!(config.cmdline.as_deref(), Some("root=/dev/vda1 quiet"));
        assert_eq!(config.efistub, Some(PathBuf::from("./stub.efi")));
        assert_eq!(config.arch, "aarch64");
    }

    #[test]
    fn missing_required_flag_is_rejected() {
        assert!(Config::try_parse_from(["mkuki", "-l", "vmlinuz", "uki.efi"]).is_err());
    }
}
