//! Section address planning.
//!
//! This module is the heart of the tool: given the stub's high-water mark
//! and the files to embed, it assigns each new PE section an aligned,
//! non-overlapping virtual address. A mistake here produces an image that
//! fails to boot or corrupts memory at boot time, so the planner is kept
//! pure (no I/O) and the invariants are enforced by construction:
//!
//! - the plan starts strictly past the stub's last existing byte;
//! - every address is a multiple of the alignment quantum;
//! - section ranges are disjoint and monotonically increasing;
//! - `.linux` is always the final section, because consumers locate the
//!   end of the kernel image by looking at the last section.

use std::path::PathBuf;

use crate::utils::next_boundary;

/// Alignment quantum shared by every size and address in a plan.
pub const SECTION_ALIGN: u64 = 0x1000;

/// The fixed vocabulary of UKI section names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionName {
    OsRelease,
    Initrd,
    Splash,
    Cmdline,
    Linux,
}

impl SectionName {
    /// The PE section name as written into the image.
    pub fn as_str(self) -> &'static str {
        match self {
            SectionName::OsRelease => ".osrel",
            SectionName::Initrd => ".initrd",
            SectionName::Splash => ".splash",
            SectionName::Cmdline => ".cmdline",
            SectionName::Linux => ".linux",
        }
    }

    /// Placement rank. Lower ranks are placed first; `.linux` is last.
    fn rank(self) -> u8 {
        match self {
            SectionName::OsRelease => 0,
            SectionName::Initrd => 1,
            SectionName::Splash => 2,
            SectionName::Cmdline => 3,
            SectionName::Linux => 4,
        }
    }
}

/// A section to be appended, before an address has been assigned.
#[derive(Debug, Clone)]
pub struct SectionInput {
    pub name: SectionName,
    /// File whose bytes become the section content.
    pub source: PathBuf,
    /// Size of `source` in bytes.
    pub size: u64,
}

/// A section with its assigned base virtual address.
#[derive(Debug, Clone)]
pub struct PlannedSection {
    pub name: SectionName,
    pub source: PathBuf,
    pub size: u64,
    /// `size` advanced to the next alignment boundary.
    pub aligned_size: u64,
    /// Base virtual address in the output image.
    pub address: u64,
}

impl PlannedSection {
    /// Half-open address range `[address, address + aligned_size)`.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.address..self.address + self.aligned_size
    }
}

/// An ordered assignment of virtual addresses to sections.
#[derive(Debug)]
pub struct LayoutPlan {
    /// Sections in placement order.
    pub sections: Vec<PlannedSection>,
    /// First address used by the plan (the rounded high-water mark).
    pub start: u64,
}

/// Computes a layout plan.
///
/// `inputs` may arrive in any order; placement always follows the fixed
/// rank (`.osrel`, `.initrd`, `.splash`, `.cmdline`, `.linux`), so the
/// output image's section table order is caller-independent. Addresses
/// accumulate from the rounded high-water mark, each section starting
/// where the previous one's aligned extent ends.
pub fn plan(high_water_mark: u64, align: u64, mut inputs: Vec<SectionInput>) -> LayoutPlan {
    inputs.sort_by_key(|input| input.name.rank());

    let start = next_boundary(high_water_mark, align);
    let mut address = start;
    let mut sections = Vec::with_capacity(inputs.len());
    for input in inputs {
        let aligned_size = next_boundary(input.size, align);
        tracing::debug!(
            "placing {} at {:#x} (size {:#x}, aligned {:#x})",
            input.name.as_str(),
            address,
            input.size,
            aligned_size
        );
        sections.push(PlannedSection {
            name: input.name,
            source: input.source,
            size: input.size,
            aligned_size,
            address,
        });
        address += aligned_size;
    }

    LayoutPlan { sections, start }
}
