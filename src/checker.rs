//! One pass over the tree: walk, extract, classify, resolve, collect.

use std::path::Path;

use crate::classifier::{self, Classifier};
use crate::config::Config;
use crate::error::Error;
use crate::extractor::LinkExtractor;
use crate::report::Report;
use crate::resolver;
use crate::types::{Document, MissingLink, Resolution, TargetKind};

/// Check every local link in every document under `root`.
/// Documents are processed in walk order; the first read failure aborts the run
/// since a partial report would be misleading.
///
/// # Errors
///
/// Returns `Error::Walk` if the directory walk fails, `Error::ReadFailed`
/// if a document cannot be read, or `Error::Regex` if the link patterns fail
/// to compile.
pub fn check_links(root: &Path, config: &Config, include_archived: bool) -> Result<Report, Error> {
    let extractor = LinkExtractor::new()?;
    let classifier = Classifier::new(&config.schemes);
    let walker = crate::walker::Walker::new(root, config, include_archived);

    let mut report = Report::default();
    let mut documents = 0_usize;
    let mut checked = 0_usize;

    for document in walker.documents() {
        let document = document?;
        documents = documents.saturating_add(1);
        checked = checked.saturating_add(check_document(&document, &extractor, &classifier, &mut report));
    }

    tracing::info!(
        documents,
        checked,
        missing = report.missing().len(),
        "link check complete"
    );
    return Ok(report);
}

/// Check one document, appending broken links to the report.
/// Returns how many local links were checked.
fn check_document(
    document: &Document,
    extractor: &LinkExtractor,
    classifier: &Classifier,
    report: &mut Report,
) -> usize {
    let mut checked = 0_usize;

    for occurrence in extractor.extract(&document.text) {
        let target = classifier::normalize_target(&occurrence.target);
        if classifier.classify(target) == TargetKind::External {
            tracing::trace!(document = %document.relative.display(), link = target, "external");
            continue;
        }

        checked = checked.saturating_add(1);
        match resolver::resolve(&document.path, target) {
            Resolution::Found { candidate } => {
                tracing::trace!(document = %document.relative.display(), candidate = %candidate.display(), "resolved");
            },
            Resolution::Missing { candidate } => report.push(MissingLink {
                candidate,
                document: document.relative.clone(),
                line: occurrence.line,
                target: target.to_string(),
            }),
            Resolution::Skipped { reason } => {
                tracing::debug!(document = %document.relative.display(), link = target, ?reason, "not checked");
            },
        }
    }

    return checked;
}
