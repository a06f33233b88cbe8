use crate::error::PersistError;
use crate::format::{SaveHeader, FORMAT_VERSION, MAGIC};

/// Validate a save file header against the spreader being restored.
///
/// Returns Ok(warnings) on success, Err on fatal errors.
/// A mode mismatch produces a warning, not an error.
pub fn validate_header(
    header: &SaveHeader,
    world_generation: bool,
) -> Result<Vec<String>, PersistError> {
    if header.magic != MAGIC {
        return Err(PersistError::InvalidMagic);
    }

    if header.version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion(header.version));
    }

    let mut warnings = Vec::new();

    if header.world_generation() != world_generation {
        warnings.push(format!(
            "Cursors were saved from a {} spreader but are being restored into a {} one.",
            mode_name(header.world_generation()),
            mode_name(world_generation)
        ));
    }

    Ok(warnings)
}

fn mode_name(world_generation: bool) -> &'static str {
    if world_generation {
        "world-generation"
    } else {
        "live"
    }
}
