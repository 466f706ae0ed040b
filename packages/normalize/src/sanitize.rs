use crate::extend::extend;
use crate::trim::trim;
use pagekit_document::PageDocument;
use pagekit_schema::Schema;
use tracing::debug;

/// Trim against the schema, then fill defaults.
pub fn sanitize(doc: &PageDocument, schema: &Schema) -> PageDocument {
    extend(&trim(doc, schema), schema)
}

/// [`sanitize`] for a document that may not exist yet.
///
/// A missing document stays missing.
pub fn sanitize_loaded(doc: Option<&PageDocument>, schema: &Schema) -> Option<PageDocument> {
    match doc {
        Some(doc) => Some(sanitize(doc, schema)),
        None => {
            debug!("No document loaded; nothing to sanitize");
            None
        }
    }
}
