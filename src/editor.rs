//! External PE section appending.
//!
//! Translates a layout plan into a single `objcopy` invocation that adds
//! every planned section to the stub at its computed virtual address and
//! writes the result to the output path. The tool itself never rewrites
//! PE structures; `objcopy` does the byte-level work.
//!
//! A non-zero `objcopy` exit is deliberately not an error from this
//! module's point of view: the status is returned for the caller to
//! surface, matching the original tool's fire-and-report behavior. Only a
//! failure to run `objcopy` at all is an `Err`.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, ExitStatus};

use crate::layout::LayoutPlan;

/// Capability to append sections to a PE image at fixed addresses.
pub trait PeEditor {
    /// Applies `plan` to `stub`, writing the combined image to `output`.
    fn append_sections(&self, stub: &Path, output: &Path, plan: &LayoutPlan)
        -> Result<ExitStatus>;
}

/// Editor backed by the `objcopy` binary.
pub struct ObjcopyEditor;

impl PeEditor for ObjcopyEditor {
    fn append_sections(
        &self,
        stub: &Path,
        output: &Path,
        plan: &LayoutPlan,
    ) -> Result<ExitStatus> {
        let args = objcopy_args(stub, output, plan);
        tracing::info!("running objcopy with {} sections", plan.sections.len());
        tracing::debug!("objcopy args: {args:?}");
        Command::new("objcopy")
            .args(&args)
            .status()
            .context("failed to run objcopy")
    }
}

/// Builds the argument list for one `objcopy` run over `plan`.
///
/// Each section contributes an `--add-section name=source` pair and a
/// `--change-section-vma name=0x...` pair, in plan order, followed by the
/// stub (input) and output paths.
pub fn objcopy_args(stub: &Path, output: &Path, plan: &LayoutPlan) -> Vec<OsString> {
    let mut args = Vec::with_capacity(plan.sections.len() * 4 + 2);
    for section in &plan.sections {
        let mut add = OsString::from(format!("{}=", section.name.as_str()));
        add.push(section.source.as_os_str());
        args.push(OsString::from("--add-section"));
        args.push(add);
        args.push(OsString::from("--change-section-vma"));
        args.push(OsString::from(format!(
            "{}={:#x}",
            section.name.as_str(),
            section.address
        )));
    }
    args.push(stub.as_os_str().to_os_string());
    args.push(output.as_os_str().to_os_string());
    args
}
