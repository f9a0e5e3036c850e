//! Build orchestration.
//!
//! This module contains the `UkiBuilder` struct which runs the build
//! pipeline in strict sequence:
//! 1. Materialize the cmdline string into a temporary file, if given.
//! 2. Inspect the stub for its high-water mark.
//! 3. Stat each input file and plan the section layout.
//! 4. Drive the external editor to append the sections.
//!
//! Every fatal check happens before the editor runs, so the output file
//! is never created or modified when an input is unusable. The cmdline
//! temp file is scoped to the run and removed on every exit path.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use tempfile::NamedTempFile;

use crate::editor::PeEditor;
use crate::inspect::{self, PeInspector};
use crate::layout::{self, SectionInput, SectionName, SECTION_ALIGN};

/// The files and strings to embed in the image.
#[derive(Debug, Clone)]
pub struct SectionSources {
    pub osrel: PathBuf,
    pub initrd: PathBuf,
    pub linux: PathBuf,
    pub splash: Option<PathBuf>,
    pub cmdline: Option<String>,
}

/// Assembles a UKI from a stub and a set of section sources.
pub struct UkiBuilder<I: PeInspector, E: PeEditor> {
    inspector: I,
    editor: E,
}

impl<I: PeInspector, E: PeEditor> UkiBuilder<I, E> {
    pub fn new(inspector: I, editor: E) -> Self {
        Self { inspector, editor }
    }

    /// Builds the output image, returning the editor's exit status.
    ///
    /// A non-success status is returned, not raised; the caller decides
    /// how to surface it.
    pub fn build(
        &self,
        stub: &Path,
        sources: &SectionSources,
        output: &Path,
    ) -> Result<ExitStatus> {
        // Held for the whole run; dropping it deletes the file, whether
        // we return through the happy path or through `?`.
        let cmdline_file = sources
            .cmdline
            .as_deref()
            .map(materialize_cmdline)
            .transpose()?;

        let mark = inspect::high_water_mark(&self.inspector, stub)?;
        tracing::info!("stub sections end at {mark:#x}");

        let mut inputs = vec![
            section_input(SectionName::OsRelease, &sources.osrel)?,
            section_input(SectionName::Initrd, &sources.initrd)?,
        ];
        if let Some(splash) = &sources.splash {
            inputs.push(section_input(SectionName::Splash, splash)?);
        }
        if let Some(file) = &cmdline_file {
            inputs.push(section_input(SectionName::Cmdline, file.path())?);
        }
        inputs.push(section_input(SectionName::Linux, &sources.linux)?);

        let plan = layout::plan(mark, SECTION_ALIGN, inputs);
        self.editor.append_sections(stub, output, &plan)
    }
}

/// Writes the cmdline string to a temp file so the external editor can
/// read it as a section source.
fn materialize_cmdline(cmdline: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("failed to create cmdline temp file")?;
    file.write_all(cmdline.as_bytes())
        .context("failed to write cmdline temp file")?;
    Ok(file)
}

fn section_input(name: SectionName, source: &Path) -> Result<SectionInput> {
    let metadata = fs::metadata(source)
        .with_context(|| format!("cannot read {} source {}", name.as_str(), source.display()))?;
    Ok(SectionInput {
        name,
        source: source.to_path_buf(),
        size: metadata.len(),
    })
}
