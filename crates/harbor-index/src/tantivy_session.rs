//! Tantivy-backed index session.

use std::path::Path;

use harbor_package::{FileStamp, PackageDocument};
use tantivy::{
    collector::{DocSetCollector, TopDocs},
    doc,
    query::{AllQuery, QueryParser, TermQuery as TantivyTermQuery},
    schema::{IndexRecordOption, Value},
    Index, IndexReader, IndexWriter, TantivyDocument, Term,
};
use tracing::debug;

use crate::{
    error::{IndexError, Result},
    query::TermQuery,
    schema::SchemaFields,
    session::{IndexSession, KeyConstraint},
};

/// Writer heap per segment before a flush is forced.
const WRITER_HEAP_BYTES: usize = 50_000_000;

/// Production [`IndexSession`] over a tantivy index.
///
/// Documents are keyed by the `Path` field; the full [`PackageDocument`]
/// is carried in the stored `Record` field as JSON, so reads never have to
/// reassemble a record from individual index fields.
pub struct TantivySession {
    index: Index,
    writer: IndexWriter,
    reader: IndexReader,
    fields: SchemaFields,
}

impl TantivySession {
    /// Opens the index in the given directory, creating it on first use.
    pub fn open_in_dir(dir: &Path) -> Result<Self> {
        let fields = SchemaFields::new();

        let index = if dir.join("meta.json").exists() {
            Index::open_in_dir(dir)?
        } else {
            std::fs::create_dir_all(dir).map_err(|err| {
                IndexError::IoError {
                    action: format!("creating index directory {}", dir.display()),
                    source: err,
                }
            })?;
            Index::create_in_dir(dir, fields.schema.clone())?
        };

        Self::from_index(index, fields)
    }

    /// Creates a volatile in-memory index. Used by tests.
    pub fn create_in_ram() -> Result<Self> {
        let fields = SchemaFields::new();
        let index = Index::create_in_ram(fields.schema.clone());
        Self::from_index(index, fields)
    }

    fn from_index(index: Index, fields: SchemaFields) -> Result<Self> {
        let writer: IndexWriter = index.writer(WRITER_HEAP_BYTES)?;
        let reader = index.reader()?;

        Ok(Self {
            index,
            writer,
            reader,
            fields,
        })
    }

    fn build_document(&self, document: &PackageDocument) -> Result<TantivyDocument> {
        let record = serde_json::to_string(document)
            .map_err(|err| IndexError::Record(err.to_string()))?;

        let mut tantivy_doc = doc!(
            self.fields.path => document.path.clone(),
            self.fields.id => document.id.clone(),
            self.fields.record => record,
        );

        if let Some(description) = &document.description {
            tantivy_doc.add_text(self.fields.description, description);
        }
        if !document.tags.is_empty() {
            tantivy_doc.add_text(self.fields.tags, document.tags.join(" "));
        }

        Ok(tantivy_doc)
    }

    fn decode(&self, tantivy_doc: &TantivyDocument) -> Result<PackageDocument> {
        let record = tantivy_doc
            .get_first(self.fields.record)
            .and_then(|value| value.as_str())
            .ok_or_else(|| IndexError::Record("missing Record field".to_string()))?;

        serde_json::from_str(record).map_err(|err| IndexError::Record(err.to_string()))
    }
}

impl IndexSession for TantivySession {
    fn list(&self) -> Result<Vec<FileStamp>> {
        let searcher = self.reader.searcher();
        let addresses = searcher.search(&AllQuery, &DocSetCollector)?;

        let mut stamps = Vec::with_capacity(addresses.len());
        for address in addresses {
            let tantivy_doc: TantivyDocument = searcher.doc(address)?;
            let document = self.decode(&tantivy_doc)?;
            stamps.push(FileStamp {
                path: document.path,
                last_modified: document.last_modified,
            });
        }

        stamps.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(stamps)
    }

    fn find_by_path(&self, path: &str) -> Result<Option<PackageDocument>> {
        let searcher = self.reader.searcher();
        let term = Term::from_field_text(self.fields.path, path);
        let query = TantivyTermQuery::new(term, IndexRecordOption::Basic);

        let top_docs = searcher.search(&query, &TopDocs::with_limit(1))?;
        let Some((_score, address)) = top_docs.into_iter().next() else {
            return Ok(None);
        };

        let tantivy_doc: TantivyDocument = searcher.doc(address)?;
        Ok(Some(self.decode(&tantivy_doc)?))
    }

    fn add(&mut self, constraint: KeyConstraint, documents: Vec<PackageDocument>) -> Result<()> {
        for document in &documents {
            if constraint == KeyConstraint::Unique {
                let term = Term::from_field_text(self.fields.path, &document.path);
                self.writer.delete_term(term);
            }

            let tantivy_doc = self.build_document(document)?;
            self.writer.add_document(tantivy_doc)?;
        }

        Ok(())
    }

    fn delete(&mut self, queries: &[TermQuery]) -> Result<()> {
        for query in queries {
            let field = self
                .fields
                .schema
                .get_field(&query.field)
                .map_err(|_| IndexError::UnknownField(query.field.clone()))?;
            self.writer.delete_term(Term::from_field_text(field, &query.value));
        }

        Ok(())
    }

    fn commit(&mut self) -> Result<()> {
        let opstamp = self.writer.commit()?;
        debug!(opstamp, "committed index session");
        self.reader.reload()?;
        Ok(())
    }

    fn search(&self, query: &str, limit: usize) -> Result<Vec<PackageDocument>> {
        let searcher = self.reader.searcher();
        let parser = QueryParser::for_index(
            &self.index,
            vec![self.fields.id, self.fields.description, self.fields.tags],
        );
        let parsed = parser
            .parse_query(query)
            .map_err(|err| IndexError::InvalidQuery(err.to_string()))?;

        let top_docs = searcher.search(&parsed, &TopDocs::with_limit(limit.max(1)))?;

        let mut documents = Vec::with_capacity(top_docs.len());
        for (_score, address) in top_docs {
            let tantivy_doc: TantivyDocument = searcher.doc(address)?;
            documents.push(self.decode(&tantivy_doc)?);
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use url::Url;

    fn sample_document(path: &str, id: &str) -> PackageDocument {
        PackageDocument {
            path: path.to_string(),
            last_modified: Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(),
            id: id.to_string(),
            version: "1.0.0".to_string(),
            description: Some("a queue daemon for busy feeds".to_string()),
            authors: vec![],
            tags: vec!["queue".to_string()],
            dependencies: vec![],
            published: Some(Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()),
            download_count: 0,
            version_download_count: 0,
            origin_url: None,
        }
    }

    #[test]
    fn test_add_commit_find() {
        let mut session = TantivySession::create_in_ram().unwrap();
        let document = sample_document("redisq-1.0.0.pkg", "redisq");

        session.add(KeyConstraint::None, vec![document.clone()]).unwrap();
        assert!(session.find_by_path("redisq-1.0.0.pkg").unwrap().is_none());

        session.commit().unwrap();
        let found = session.find_by_path("redisq-1.0.0.pkg").unwrap().unwrap();
        assert_eq!(found, document);
    }

    #[test]
    fn test_open_in_dir_persists_across_sessions() {
        let dir = tempfile::tempdir().unwrap();
        let document = sample_document("redisq-1.0.0.pkg", "redisq");

        {
            let mut session = TantivySession::open_in_dir(dir.path()).unwrap();
            session.add(KeyConstraint::None, vec![document.clone()]).unwrap();
            session.commit().unwrap();
        }

        let session = TantivySession::open_in_dir(dir.path()).unwrap();
        let found = session.find_by_path("redisq-1.0.0.pkg").unwrap().unwrap();
        assert_eq!(found, document);
    }

    #[test]
    fn test_list_returns_stamps() {
        let mut session = TantivySession::create_in_ram().unwrap();
        session
            .add(
                KeyConstraint::None,
                vec![
                    sample_document("a-1.0.0.pkg", "a"),
                    sample_document("b-1.0.0.pkg", "b"),
                ],
            )
            .unwrap();
        session.commit().unwrap();

        let stamps = session.list().unwrap();
        let paths: Vec<&str> = stamps.iter().map(|s| s.path.as_str()).collect();
        assert_eq!(paths, vec!["a-1.0.0.pkg", "b-1.0.0.pkg"]);
    }

    #[test]
    fn test_delete_by_path_term() {
        let mut session = TantivySession::create_in_ram().unwrap();
        session
            .add(
                KeyConstraint::None,
                vec![
                    sample_document("a-1.0.0.pkg", "a"),
                    sample_document("b-1.0.0.pkg", "b"),
                ],
            )
            .unwrap();
        session.commit().unwrap();

        session.delete(&[TermQuery::path("a-1.0.0.pkg")]).unwrap();
        session.commit().unwrap();

        assert!(session.find_by_path("a-1.0.0.pkg").unwrap().is_none());
        assert!(session.find_by_path("b-1.0.0.pkg").unwrap().is_some());
    }

    #[test]
    fn test_delete_missing_key_is_noop() {
        let mut session = TantivySession::create_in_ram().unwrap();
        session.delete(&[TermQuery::path("ghost.pkg")]).unwrap();
        session.commit().unwrap();
        assert!(session.list().unwrap().is_empty());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut session = TantivySession::create_in_ram().unwrap();
        let err = session
            .delete(&[TermQuery::new("Publisher", "x")])
            .unwrap_err();
        assert!(matches!(err, IndexError::UnknownField(_)));
    }

    #[test]
    fn test_unique_add_replaces() {
        let mut session = TantivySession::create_in_ram().unwrap();
        session
            .add(KeyConstraint::None, vec![sample_document("a-1.0.0.pkg", "a")])
            .unwrap();
        session.commit().unwrap();

        let mut updated = sample_document("a-1.0.0.pkg", "a");
        updated.download_count = 7;
        updated.origin_url = Some(Url::parse("http://mirror.example.com/feed/").unwrap());
        session.add(KeyConstraint::Unique, vec![updated.clone()]).unwrap();
        session.commit().unwrap();

        assert_eq!(session.list().unwrap().len(), 1);
        let found = session.find_by_path("a-1.0.0.pkg").unwrap().unwrap();
        assert_eq!(found.download_count, 7);
        assert_eq!(found.origin_url, updated.origin_url);
    }

    #[test]
    fn test_full_text_search() {
        let mut session = TantivySession::create_in_ram().unwrap();
        session
            .add(KeyConstraint::None, vec![sample_document("redisq-1.0.0.pkg", "redisq")])
            .unwrap();
        session.commit().unwrap();

        let hits = session.search("daemon", 10).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "redisq");

        assert!(session.search("unrelated", 10).unwrap().is_empty());
    }
}
