use serde::Serialize;

use crate::domain::{IdExtractor, OrganismCode};
use crate::error::ExportError;
use crate::kegg::{KeggClient, PathwayEntry};
use crate::writer::PathwayFiles;

#[derive(Debug, Clone, Serialize)]
pub struct ExportResult {
    pub organism: String,
    pub pathways: Vec<PathwayExport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PathwayExport {
    pub entry_id: String,
    pub number: String,
    pub compound_file: String,
    pub reaction_file: String,
    pub compounds: usize,
    pub reactions: usize,
}

pub trait ProgressSink {
    fn pathway(&self, entry: &PathwayEntry);
}

#[derive(Clone)]
pub struct App<K: KeggClient> {
    kegg: K,
}

impl<K: KeggClient> App<K> {
    pub fn new(kegg: K) -> Self {
        Self { kegg }
    }

    pub fn export(
        &self,
        organism: &OrganismCode,
        prefix: &str,
        sink: &dyn ProgressSink,
    ) -> Result<ExportResult, ExportError> {
        let entries = self.kegg.list_pathways(organism)?;
        tracing::info!(
            organism = organism.as_str(),
            pathways = entries.len(),
            "listed pathways"
        );

        let extractor = IdExtractor::new(organism);
        let files = PathwayFiles::new(prefix, organism.clone());

        let mut pathways = Vec::new();
        for entry in &entries {
            sink.pathway(entry);
            let number = extractor.pathway_number(&entry.entry_id)?;

            let reactions = self.kegg.reactions_by_pathway(&entry.entry_id)?;
            let compounds = self.kegg.compounds_by_pathway(&entry.entry_id)?;

            let compound_codes = compounds
                .iter()
                .map(|raw| extractor.compound_code(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let compound_file = files.write_compounds(&number, &compound_codes)?;

            let reaction_codes = reactions
                .iter()
                .map(|raw| extractor.reaction_code(raw))
                .collect::<Result<Vec<_>, _>>()?;
            let reaction_file = files.write_reactions(&number, &reaction_codes)?;

            tracing::debug!(
                entry_id = entry.entry_id.as_str(),
                description = entry.description.as_str(),
                compounds = compound_codes.len(),
                reactions = reaction_codes.len(),
                "exported pathway"
            );

            pathways.push(PathwayExport {
                entry_id: entry.entry_id.clone(),
                number: number.as_str().to_string(),
                compound_file: compound_file.into_string(),
                reaction_file: reaction_file.into_string(),
                compounds: compound_codes.len(),
                reactions: reaction_codes.len(),
            });
        }

        tracing::info!(
            organism = organism.as_str(),
            exported = pathways.len(),
            "export complete"
        );

        Ok(ExportResult {
            organism: organism.as_str().to_string(),
            pathways,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::JsonOutput;
    use assert_matches::assert_matches;
    use std::collections::BTreeMap;

    struct MockKegg {
        pathways: Vec<PathwayEntry>,
        reactions: BTreeMap<String, Vec<String>>,
        compounds: BTreeMap<String, Vec<String>>,
    }

    impl KeggClient for MockKegg {
        fn list_pathways(
            &self,
            _organism: &OrganismCode,
        ) -> Result<Vec<PathwayEntry>, ExportError> {
            Ok(self.pathways.clone())
        }

        fn reactions_by_pathway(&self, entry_id: &str) -> Result<Vec<String>, ExportError> {
            Ok(self.reactions.get(entry_id).cloned().unwrap_or_default())
        }

        fn compounds_by_pathway(&self, entry_id: &str) -> Result<Vec<String>, ExportError> {
            Ok(self.compounds.get(entry_id).cloned().unwrap_or_default())
        }
    }

    fn entry(entry_id: &str) -> PathwayEntry {
        PathwayEntry {
            entry_id: entry_id.to_string(),
            description: String::new(),
        }
    }

    #[test]
    fn export_writes_file_pair_per_pathway() {
        let temp = tempfile::tempdir().unwrap();
        let prefix = format!("{}/out_", temp.path().display());
        let organism: OrganismCode = "hsa".parse().unwrap();

        let mut reactions = BTreeMap::new();
        reactions.insert(
            "path:hsa00010".to_string(),
            vec!["rn:R01786".to_string(), "rn:R02189".to_string()],
        );
        let mut compounds = BTreeMap::new();
        compounds.insert("path:hsa00010".to_string(), vec!["cpd:C00022".to_string()]);

        let app = App::new(MockKegg {
            pathways: vec![entry("path:hsa00010")],
            reactions,
            compounds,
        });

        let result = app.export(&organism, &prefix, &JsonOutput).unwrap();

        assert_eq!(result.organism, "hsa");
        assert_eq!(result.pathways.len(), 1);
        assert_eq!(result.pathways[0].number, "00010");
        assert_eq!(result.pathways[0].compounds, 1);
        assert_eq!(result.pathways[0].reactions, 2);

        let cpd = std::fs::read_to_string(format!("{prefix}hsa00010.cpd")).unwrap();
        let rn = std::fs::read_to_string(format!("{prefix}hsa00010.rn")).unwrap();
        assert_eq!(cpd, "C00022\n");
        assert_eq!(rn, "R01786\nR02189\n");
    }

    #[test]
    fn export_aborts_on_foreign_pathway_entry() {
        let temp = tempfile::tempdir().unwrap();
        let prefix = format!("{}/out_", temp.path().display());
        let organism: OrganismCode = "hsa".parse().unwrap();

        let app = App::new(MockKegg {
            pathways: vec![entry("path:eco00010")],
            reactions: BTreeMap::new(),
            compounds: BTreeMap::new(),
        });

        let err = app.export(&organism, &prefix, &JsonOutput).unwrap_err();
        assert_matches!(err, ExportError::PathwayIdMismatch { .. });
        assert!(!std::path::Path::new(&format!("{prefix}eco00010.cpd")).exists());
    }
}
