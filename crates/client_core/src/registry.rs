//! Last-known list of ingested documents. Refreshes replace the whole list,
//! so concurrent refreshes degrade to last-write-wins with no merge logic.

use shared::domain::Document;

#[derive(Debug, Clone, Default)]
pub struct DocumentRegistry {
    documents: Vec<Document>,
}

impl DocumentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomic full replacement of the cached list.
    pub fn replace(&mut self, documents: Vec<Document>) {
        self.documents = documents;
    }

    pub fn count(&self) -> usize {
        self.documents.len()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::DocumentId;

    fn doc(id: i64, title: &str) -> Document {
        Document {
            id: DocumentId(id),
            title: title.to_string(),
        }
    }

    #[test]
    fn replace_is_idempotent_for_an_unchanged_list() {
        let mut registry = DocumentRegistry::new();
        registry.replace(vec![doc(1, "intro.pdf"), doc(2, "trees.pdf")]);
        let first = registry.documents().to_vec();

        registry.replace(vec![doc(1, "intro.pdf"), doc(2, "trees.pdf")]);
        assert_eq!(registry.documents(), first.as_slice());
        assert_eq!(registry.count(), 2);
    }

    #[test]
    fn replace_swaps_the_entire_list() {
        let mut registry = DocumentRegistry::new();
        registry.replace(vec![doc(1, "intro.pdf")]);
        registry.replace(vec![doc(3, "graphs.pdf"), doc(4, "sorting.pdf")]);
        assert_eq!(registry.count(), 2);
        assert_eq!(registry.documents()[0].title, "graphs.pdf");
    }
}
