use std::path::{Path, PathBuf};

use aln_model::{Encoding, JobDescription, RequiredInput, SlotRole};

use crate::{error::ValidationError, params::SlotSnapshot};

/// Assemble a job from a snapshot of the panel inputs.
///
/// Only presence is checked, in panel order: the six file slots, the encoding, then the output path.
/// The first absent input is reported. Values are copied as they are.
pub fn build_job(
    slots: &SlotSnapshot,
    encoding: Option<Encoding>,
    output: Option<&Path>,
) -> Result<JobDescription, ValidationError> {
    let forward = require(slots, SlotRole::ForwardReads)?;
    let reverse = require(slots, SlotRole::ReverseReads)?;
    let genome = require(slots, SlotRole::ReferenceGenome)?;
    let [dbsnp, mills, phase1] = SlotRole::KNOWN_SITES;
    let known_sites = [
        require(slots, dbsnp)?,
        require(slots, mills)?,
        require(slots, phase1)?,
    ];
    let encoding = encoding.ok_or(ValidationError::MissingInput {
        input: RequiredInput::Encoding,
    })?;
    let output = output.ok_or(ValidationError::MissingInput {
        input: RequiredInput::OutputPath,
    })?;

    Ok(JobDescription::new(
        forward,
        reverse,
        genome,
        known_sites,
        encoding,
        output.to_path_buf(),
    ))
}

fn require(slots: &SlotSnapshot, role: SlotRole) -> Result<PathBuf, ValidationError> {
    slots
        .get(role)
        .map(Path::to_path_buf)
        .ok_or(ValidationError::MissingInput { input: role.into() })
}
