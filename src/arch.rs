//! Architecture-string normalization.
//!
//! EFI stub filenames embed a short architecture code (`linuxx64.efi.stub`
//! and friends). This module maps the many spellings a machine type can
//! arrive in (`uname -m` output, Debian-style names, the codes themselves)
//! onto that closed set of codes. The mapping follows efi-mkuki.

use anyhow::{bail, Result};

/// Canonical EFI architecture code, as used in stub filenames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchCode {
    X64,
    Ia32,
    Aa64,
    Arm,
}

impl ArchCode {
    /// The code as it appears in `linux{code}.efi.stub`.
    pub fn as_str(self) -> &'static str {
        match self {
            ArchCode::X64 => "x64",
            ArchCode::Ia32 => "ia32",
            ArchCode::Aa64 => "aa64",
            ArchCode::Arm => "arm",
        }
    }

    /// Normalizes a free-form machine string to a canonical code.
    ///
    /// Pure function, no I/O. Unknown strings are an error: detection
    /// cannot proceed and the caller must pass an explicit stub path.
    pub fn from_machine(machine: &str) -> Result<Self> {
        match machine {
            "x86_64" | "x64" | "amd64" => return Ok(ArchCode::X64),
            "arm64" | "aarch64" | "aa64" => return Ok(ArchCode::Aa64),
            "ia32" => return Ok(ArchCode::Ia32),
            _ => {}
        }
        if contains_ia32_pattern(machine) {
            return Ok(ArchCode::Ia32);
        }
        if machine.starts_with("arm") {
            return Ok(ArchCode::Arm);
        }
        bail!("unknown architecture {machine}; specify -e/--efistub")
    }
}

/// True if `machine` contains `i386`, `i486`, ... `i786` anywhere.
fn contains_ia32_pattern(machine: &str) -> bool {
    let bytes = machine.as_bytes();
    bytes.windows(4).any(|w| {
        w[0] == b'i' && (b'3'..=b'7').contains(&w[1]) && w[2] == b'8' && w[3] == b'6'
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn x64_aliases() {
        for alias in ["x86_64", "x64", "amd64"] {
            assert_eq!(ArchCode::from_machine(alias).unwrap(), ArchCode::X64);
        }
    }

    #[test]
    fn ia32_aliases() {
        for alias in ["ia32", "i386", "i486", "i586", "i686", "i786"] {
            assert_eq!(ArchCode::from_machine(alias).unwrap(), ArchCode::Ia32);
        }
        assert!(ArchCode::from_machine("i286").is_err());
        assert!(ArchCode::from_machine("i886").is_err());
    }

    #[test]
    fn aa64_aliases() {
        for alias in ["arm64", "aarch64", "aa64"] {
            assert_eq!(ArchCode::from_machine(alias).unwrap(), ArchCode::Aa64);
        }
    }

    #[test]
    fn arm_prefix_after_aa64_check() {
        assert_eq!(ArchCode::from_machine("arm").unwrap(), ArchCode::Arm);
        assert_eq!(ArchCode::from_machine("armv7l").unwrap(), ArchCode::Arm);
        // arm64 spellings must not fall through to the 32-bit code
        assert_eq!(ArchCode::from_machine("arm64").unwrap(), ArchCode::Aa64);
    }

    #[test]
    fn unknown_is_an_error() {
        for bad in ["riscv64", "mips", "s390x", ""] {
            assert!(ArchCode::from_machine(bad).is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn codes_match_stub_naming() {
        assert_eq!(ArchCode::X64.as_str(), "x64");
        assert_eq!(ArchCode::Ia32.as_str(), "ia32");
        assert_eq!(ArchCode::Aa64.as_str(), "aa64");
        assert_eq!(ArchCode::Arm.as_str(), "arm");
    }
}
