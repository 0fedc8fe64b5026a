use std::fmt;
use std::str::FromStr;

use regex::Regex;

use crate::error::ExportError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganismCode(String);

impl OrganismCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrganismCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrganismCode {
    type Err = ExportError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_string();
        let is_valid = !normalized.is_empty()
            && normalized.chars().all(|ch| ch.is_ascii_alphanumeric());
        if !is_valid {
            return Err(ExportError::InvalidOrganism(value.to_string()));
        }
        Ok(Self(normalized))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathwayNumber(String);

impl PathwayNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PathwayNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundCode(String);

impl CompoundCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CompoundCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionCode(String);

impl ReactionCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct IdExtractor {
    organism: String,
    pathway: Regex,
    compound: Regex,
    reaction: Regex,
}

impl IdExtractor {
    pub fn new(organism: &OrganismCode) -> Self {
        // OrganismCode is ASCII-alphanumeric, enforced in FromStr.
        let pathway = Regex::new(&format!(r"^path:{}(\d{{5}})$", organism.as_str())).unwrap();
        Self {
            organism: organism.as_str().to_string(),
            pathway,
            compound: Regex::new(r"^cpd:(C\d{5})$").unwrap(),
            reaction: Regex::new(r"^rn:(R\d{5})$").unwrap(),
        }
    }

    pub fn pathway_number(&self, entry_id: &str) -> Result<PathwayNumber, ExportError> {
        let captures =
            self.pathway
                .captures(entry_id)
                .ok_or_else(|| ExportError::PathwayIdMismatch {
                    organism: self.organism.clone(),
                    entry: entry_id.to_string(),
                })?;
        Ok(PathwayNumber(captures[1].to_string()))
    }

    pub fn compound_code(&self, raw: &str) -> Result<CompoundCode, ExportError> {
        let captures = self
            .compound
            .captures(raw)
            .ok_or_else(|| ExportError::CompoundIdMismatch(raw.to_string()))?;
        Ok(CompoundCode(captures[1].to_string()))
    }

    pub fn reaction_code(&self, raw: &str) -> Result<ReactionCode, ExportError> {
        let captures = self
            .reaction
            .captures(raw)
            .ok_or_else(|| ExportError::ReactionIdMismatch(raw.to_string()))?;
        Ok(ReactionCode(captures[1].to_string()))
    }
}
