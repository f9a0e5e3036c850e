//! EFI boot stub autodetection.
//!
//! Given a canonical architecture code, searches a fixed ordered list of
//! filesystem locations for a matching `linux{code}.efi.stub`. The first
//! existing path wins. This is a pure existence check; nothing validates
//! that the file is actually a PE stub.

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::arch::ArchCode;

/// Returns the first existing stub candidate for `code`.
///
/// Candidates are checked in order: the current directory, the
/// systemd-boot install path, the gummiboot install path. If none exists
/// the error names the missing file, the distribution packages that ship
/// it, and the bypass flag.
pub fn locate(code: ArchCode) -> Result<PathBuf> {
    let name = format!("linux{}.efi.stub", code.as_str());
    for candidate in candidates(&name) {
        if candidate.exists() {
            tracing::debug!("found EFI stub at {}", candidate.display());
            return Ok(candidate);
        }
    }

    bail!(
        "The EFI stub {name} (required to produce a UKI)\n\
         is absent, and no candidate exists in the filesystem.\n\
         \n\
         The following distributions are known to package\n\
         a suitable stub under the following package names.\n\
         \n\
         Alpine: gummiboot-efistub\n\
         Arch: systemd\n\
         Chimera: systemd-boot-efi\n\
         Debian Bookworm, Ubuntu 24.04+: systemd-boot-efi\n\
         Fedora: systemd-boot-unsigned\n\
         Gentoo: sys-apps/systemd[boot] or sys-apps/systemd-utils[boot]\n\
         Void: systemd-boot-efistub\n\
         \n\
         Alternatively, specify -e/--efistub to bypass detection."
    )
}

/// The fixed search order for a stub named `name`.
fn candidates(name: &str) -> [PathBuf; 3] {
    [
        PathBuf::from(format!("./{name}")),
        PathBuf::from(format!("/usr/lib/systemd/boot/efi/{name}")),
        PathBuf::from(format!("/usr/lib/gummiboot/{name}")),
    ]
}
