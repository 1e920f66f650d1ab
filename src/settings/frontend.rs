use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::lib::errors::SettingsError;

/// Where the session frontend executable lives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontendSection {
    pub program: Option<PathBuf>,
}

#[derive(Debug, Deserialize, Default)]
pub struct RawFrontendSection {
    pub program: Option<String>,
}

pub fn parse_frontend_section(
    raw: Option<RawFrontendSection>,
    path: &Path,
) -> Result<FrontendSection, SettingsError> {
    let Some(program) = raw.unwrap_or_default().program else {
        return Ok(FrontendSection::default());
    };

    let program = program.trim();
    if program.is_empty() {
        return Err(SettingsError::InvalidField {
            path: path.to_path_buf(),
            field: "frontend.program",
            message: "Remove the key or point it at the frontend executable".into(),
        });
    }

    Ok(FrontendSection {
        program: Some(PathBuf::from(program)),
    })
}
