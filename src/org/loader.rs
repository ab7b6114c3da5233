//! Document loading and conversion API
//!
//! `DocumentLoader` is the entry point used by the command line: it reads a file (or takes
//! a string), parses it with the configured keyword seeds, wraps the nodes in a view and
//! renders views with the configured formats.
//!
//! # Architecture
//!
//! - String-based methods are the core functionality (process source text)
//! - File-based methods are thin wrappers (read file, then call the string method)
//! - Rendering delegates to [`FormatRegistry`]
//!
//! # Examples
//!
//! ```rust,ignore
//! let loader = DocumentLoader::from_config(&load_defaults()?);
//! let view = loader.load_and_query("notes.org")?;
//! let out = loader.render(&view.select_tag("work"), "treeviz")?;
//! ```

use crate::org::config::OrgConfig;
use crate::org::error::OrgError;
use crate::org::formats::FormatRegistry;
use crate::org::parsing::{Document, OrgParser};
use crate::org::query::OrgQuery;
use std::fs;
use std::path::Path;
use tracing::debug;

pub struct DocumentLoader {
    parser: OrgParser,
    formats: FormatRegistry,
    default_format: String,
}

impl DocumentLoader {
    /// Loader with the default keywords and formats
    pub fn new() -> Self {
        DocumentLoader {
            parser: OrgParser::new(),
            formats: FormatRegistry::with_defaults(),
            default_format: "org".to_string(),
        }
    }

    pub fn from_config(config: &OrgConfig) -> Self {
        DocumentLoader {
            parser: OrgParser::from_config(&config.parser),
            formats: FormatRegistry::from_config(&config.format),
            default_format: config.format.default_format.clone(),
        }
    }

    pub fn with_parser(mut self, parser: OrgParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn parser(&self) -> &OrgParser {
        &self.parser
    }

    pub fn formats(&self) -> &FormatRegistry {
        &self.formats
    }

    /// Format used when the caller names none
    pub fn default_format(&self) -> &str {
        &self.default_format
    }

    // ===== STRING-BASED PROCESSING (core methods) =====

    pub fn parse(&self, source: &str) -> Result<Document, OrgError> {
        Ok(self.parser.parse(source)?)
    }

    /// Parse source text and index its nodes
    pub fn query(&self, source: &str) -> Result<OrgQuery, OrgError> {
        self.parse(source).map(Document::into_query)
    }

    /// Render a view in the named format
    pub fn render(&self, view: &OrgQuery, format: &str) -> Result<String, OrgError> {
        Ok(self.formats.serialize(view, format)?)
    }

    /// Parse source text and render all of its nodes
    pub fn convert(&self, source: &str, format: &str) -> Result<String, OrgError> {
        let view = self.query(source)?;
        self.render(&view, format)
    }

    // ===== FILE-BASED PROCESSING =====

    pub fn load_source<P: AsRef<Path>>(&self, path: P) -> Result<String, OrgError> {
        debug!(path = %path.as_ref().display(), "reading document");
        Ok(fs::read_to_string(path)?)
    }

    pub fn load_and_parse<P: AsRef<Path>>(&self, path: P) -> Result<Document, OrgError> {
        let source = self.load_source(path)?;
        self.parse(&source)
    }

    pub fn load_and_query<P: AsRef<Path>>(&self, path: P) -> Result<OrgQuery, OrgError> {
        let source = self.load_source(path)?;
        self.query(&source)
    }

    pub fn load_and_convert<P: AsRef<Path>>(
        &self,
        path: P,
        format: &str,
    ) -> Result<String, OrgError> {
        let source = self.load_source(path)?;
        self.convert(&source, format)
    }

    /// Read the file on the tokio runtime, then parse it
    pub async fn load_and_parse_async<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> Result<Document, OrgError> {
        debug!(path = %path.as_ref().display(), "reading document");
        let source = tokio::fs::read_to_string(path).await?;
        self.parse(&source)
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::org::config::Loader;
    use crate::org::error::ParseError;
    use crate::org::formats::FormatError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn org_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("temp file");
        write!(file, "{content}").expect("write document");
        file
    }

    #[test]
    fn test_parse_simple_source() {
        let loader = DocumentLoader::new();
        let doc = loader.parse("* A\n** B\n").unwrap();
        assert_eq!(doc.nodes.len(), 2);
        assert_eq!(loader.default_format(), "org");
    }

    #[test]
    fn test_load_and_query_file() {
        let file = org_file("* A :x:\n** B\n* C\n");
        let view = DocumentLoader::new().load_and_query(file.path()).unwrap();
        assert_eq!(view.len(), 3);
        assert_eq!(view.select_tag("x").len(), 1);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = DocumentLoader::new().load_and_parse("/nonexistent/notes.org");
        assert!(matches!(result, Err(OrgError::Io(_))));
    }

    #[test]
    fn test_parse_error_surfaces() {
        let result = DocumentLoader::new().parse("* A\n:PROPERTIES:\noops\n:END:\n");
        match result {
            Err(OrgError::Parse(err)) => assert_eq!(err.line(), 3),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_convert_unknown_format() {
        let result = DocumentLoader::new().convert("* A\n", "docx");
        assert!(matches!(
            result,
            Err(OrgError::Format(FormatError::FormatNotFound(_)))
        ));
    }

    #[test]
    fn test_load_and_convert_to_treeviz() {
        let file = org_file("* A\n** B\n");
        let out = DocumentLoader::new()
            .load_and_convert(file.path(), "treeviz")
            .unwrap();
        assert_eq!(out, "⧉ Document (2 nodes)\n└─ § A\n  └─ § B\n");
    }

    #[test]
    fn test_from_config() {
        let config = Loader::new()
            .set_override("parser.todo_keywords", vec!["NEXT".to_string()])
            .unwrap()
            .set_override("format.default_format", "json")
            .unwrap()
            .build()
            .unwrap();
        let loader = DocumentLoader::from_config(&config);
        assert_eq!(loader.default_format(), "json");

        let doc = loader.parse("* NEXT call\n* TODO other\n").unwrap();
        assert_eq!(doc.nodes[0].todo(), Some("NEXT"));
        assert_eq!(doc.nodes[1].todo(), None);
    }

    #[tokio::test]
    async fn test_load_and_parse_async() {
        let file = org_file("* Async\n");
        let doc = DocumentLoader::new()
            .load_and_parse_async(file.path())
            .await
            .unwrap();
        assert_eq!(doc.nodes[0].headline(), "Async");
    }

    #[test]
    fn test_unterminated_drawer_from_file() {
        let file = org_file("* A\n:LOGBOOK:\n");
        let result = DocumentLoader::new().load_and_parse(file.path());
        assert!(matches!(
            result,
            Err(OrgError::Parse(ParseError::UnterminatedDrawer { line: 2, .. }))
        ));
    }
}
