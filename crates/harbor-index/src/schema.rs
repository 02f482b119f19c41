//! Tantivy schema for the package catalog.
//!
//! Five fields:
//!
//! 1. `Path` - package path key (STORED, keyword)
//! 2. `Id` - package identifier (indexed)
//! 3. `Description` - manifest description (indexed)
//! 4. `Tags` - space-joined manifest tags (indexed)
//! 5. `Record` - full document as JSON (STORED only)

use tantivy::schema::{
    Field, IndexRecordOption, Schema, TextFieldIndexing, TextOptions, STORED, TEXT,
};

use crate::query::PATH_FIELD;

pub const FIELD_ID: &str = "Id";
pub const FIELD_DESCRIPTION: &str = "Description";
pub const FIELD_TAGS: &str = "Tags";
pub const FIELD_RECORD: &str = "Record";

/// Build the catalog schema.
pub fn build_schema() -> Schema {
    let mut schema_builder = Schema::builder();

    // Path - the document key, raw tokenizer for exact term matching.
    let path_opts = TextOptions::default()
        .set_indexing_options(
            TextFieldIndexing::default()
                .set_tokenizer("raw")
                .set_index_option(IndexRecordOption::Basic),
        )
        .set_stored();
    schema_builder.add_text_field(PATH_FIELD, path_opts);

    // Searchable fields (not stored; the Record field carries the data).
    schema_builder.add_text_field(FIELD_ID, TEXT);
    schema_builder.add_text_field(FIELD_DESCRIPTION, TEXT);
    schema_builder.add_text_field(FIELD_TAGS, TEXT);

    // Record - full PackageDocument as JSON.
    schema_builder.add_text_field(FIELD_RECORD, STORED);

    schema_builder.build()
}

/// Field handles, resolved once at session construction.
#[derive(Debug, Clone)]
pub struct SchemaFields {
    pub schema: Schema,
    pub path: Field,
    pub id: Field,
    pub description: Field,
    pub tags: Field,
    pub record: Field,
}

impl SchemaFields {
    pub fn new() -> Self {
        let schema = build_schema();

        Self {
            path: schema.get_field(PATH_FIELD).expect("Path field"),
            id: schema.get_field(FIELD_ID).expect("Id field"),
            description: schema.get_field(FIELD_DESCRIPTION).expect("Description field"),
            tags: schema.get_field(FIELD_TAGS).expect("Tags field"),
            record: schema.get_field(FIELD_RECORD).expect("Record field"),
            schema,
        }
    }
}

impl Default for SchemaFields {
    fn default() -> Self {
        Self::new()
    }
}
