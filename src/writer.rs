use std::fs;

use camino::{Utf8Path, Utf8PathBuf};

use crate::domain::{CompoundCode, OrganismCode, PathwayNumber, ReactionCode};
use crate::error::ExportError;

#[derive(Debug, Clone)]
pub struct PathwayFiles {
    prefix: String,
    organism: OrganismCode,
}

impl PathwayFiles {
    pub fn new(prefix: impl Into<String>, organism: OrganismCode) -> Self {
        Self {
            prefix: prefix.into(),
            organism,
        }
    }

    pub fn compound_path(&self, number: &PathwayNumber) -> Utf8PathBuf {
        self.path_for(number, "cpd")
    }

    pub fn reaction_path(&self, number: &PathwayNumber) -> Utf8PathBuf {
        self.path_for(number, "rn")
    }

    fn path_for(&self, number: &PathwayNumber, extension: &str) -> Utf8PathBuf {
        Utf8PathBuf::from(format!(
            "{}{}{}.{}",
            self.prefix,
            self.organism.as_str(),
            number.as_str(),
            extension
        ))
    }

    pub fn write_compounds(
        &self,
        number: &PathwayNumber,
        codes: &[CompoundCode],
    ) -> Result<Utf8PathBuf, ExportError> {
        let path = self.compound_path(number);
        write_lines(&path, codes.iter().map(|code| code.as_str()))?;
        Ok(path)
    }

    pub fn write_reactions(
        &self,
        number: &PathwayNumber,
        codes: &[ReactionCode],
    ) -> Result<Utf8PathBuf, ExportError> {
        let path = self.reaction_path(number);
        write_lines(&path, codes.iter().map(|code| code.as_str()))?;
        Ok(path)
    }
}

fn write_lines<'a>(
    path: &Utf8Path,
    lines: impl Iterator<Item = &'a str>,
) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        // A bare file name has parent Some("") and needs no directory.
        if !parent.as_str().is_empty() {
            fs::create_dir_all(parent.as_std_path())
                .map_err(|err| ExportError::Filesystem(err.to_string()))?;
        }
    }
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    fs::write(path.as_std_path(), content).map_err(|err| ExportError::Filesystem(err.to_string()))
}
