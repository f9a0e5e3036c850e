//! PE section-header inspection.
//!
//! The layout planner needs to know where the stub's own sections end so
//! new sections can be placed past them. Rather than parse PE headers
//! in-process, this module shells out to `objdump -h` and reads the row
//! for `.reloc`, which the stub's build emits as its last section and
//! which therefore marks the high-water address of stub-occupied space.
//!
//! The external call sits behind the `PeInspector` trait so the rest of
//! the pipeline can be tested against canned header tables.

use anyhow::{anyhow, bail, Context, Result};
use std::path::Path;
use std::process::Command;

/// Capability to list the section headers of a PE image as text.
pub trait PeInspector {
    /// Returns the human-readable section-header table for `image`.
    fn section_headers(&self, image: &Path) -> Result<String>;
}

/// Inspector backed by the `objdump` binary.
pub struct ObjdumpInspector;

impl PeInspector for ObjdumpInspector {
    fn section_headers(&self, image: &Path) -> Result<String> {
        let output = Command::new("objdump")
            .arg("-h")
            .arg(image)
            .output()
            .with_context(|| format!("failed to run objdump -h {}", image.display()))?;
        if !output.status.success() {
            bail!(
                "objdump -h {} failed: {}",
                image.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }
        String::from_utf8(output.stdout).context("objdump output was not UTF-8")
    }
}

/// First free virtual address past the stub's existing sections.
///
/// Fatal if inspection fails or the `.reloc` row cannot be found: without
/// a trustworthy anchor the layout cannot be computed.
pub fn high_water_mark(inspector: &impl PeInspector, stub: &Path) -> Result<u64> {
    let headers = inspector.section_headers(stub)?;
    reloc_end(&headers)
        .with_context(|| format!("no usable .reloc section header in {}", stub.display()))
}

/// Parses the `.reloc` row of an `objdump -h` table and returns its end
/// address (VMA + size).
///
/// The table's columns are `Idx Name Size VMA LMA File-off Algn`; size and
/// VMA are hexadecimal, with or without a leading `0x`.
pub fn reloc_end(headers: &str) -> Result<u64> {
    for line in headers.lines() {
        let mut fields = line.split_whitespace();
        // Skip the index column; the name is the token after it.
        let Some(_idx) = fields.next() else { continue };
        if fields.next() != Some(".reloc") {
            continue;
        }
        let size = fields
            .next()
            .ok_or_else(|| anyhow!(".reloc row is missing a size field"))?;
        let vma = fields
            .next()
            .ok_or_else(|| anyhow!(".reloc row is missing a VMA field"))?;
        return Ok(parse_hex(vma)? + parse_hex(size)?);
    }
    bail!("no .reloc section in header table")
}

fn parse_hex(field: &str) -> Result<u64> {
    let digits = field.strip_prefix("0x").unwrap_or(field);
    u64::from_str_radix(digits, 16).with_context(|| format!("bad hex field {field:?}"))
}
