use serde::Deserialize;

use super::FamilyDataset;
use crate::error::{FamtreeError, Result};
use crate::model::{Person, RelationLink};

/// Trait for dataset file parsers
pub trait DatasetParser {
    /// Check if this parser can handle the given file extension
    fn can_parse(&self, extension: &str) -> bool;

    /// Parse file content into people and links
    fn parse(&self, content: &str, path: &str) -> Result<FamilyDataset>;
}

/// On-disk layout shared by every format.
#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    people: Vec<Person>,
    #[serde(default)]
    links: Vec<RelationLink>,
}

impl From<RawDataset> for FamilyDataset {
    fn from(raw: RawDataset) -> Self {
        FamilyDataset {
            people: raw.people,
            links: raw.links,
        }
    }
}

/// JSON parser (`{"people": [...], "links": [...]}`)
pub struct JsonParser;

impl DatasetParser for JsonParser {
    fn can_parse(&self, extension: &str) -> bool {
        extension == "json"
    }

    fn parse(&self, content: &str, path: &str) -> Result<FamilyDataset> {
        let raw: RawDataset = serde_json::from_str(content)
            .map_err(|e| FamtreeError::Parse(format!("JSON parse error in {}: {}", path, e)))?;
        Ok(raw.into())
    }
}

/// YAML parser, same layout as JSON
pub struct YamlParser;

impl DatasetParser for YamlParser {
    fn can_parse(&self, extension: &str) -> bool {
        matches!(extension, "yaml" | "yml")
    }

    fn parse(&self, content: &str, path: &str) -> Result<FamilyDataset> {
        let raw: RawDataset = serde_yaml_ng::from_str(content)
            .map_err(|e| FamtreeError::Parse(format!("YAML parse error in {}: {}", path, e)))?;
        Ok(raw.into())
    }
}

/// Parser registry that selects appropriate parser by extension
pub struct ParserRegistry {
    parsers: Vec<Box<dyn DatasetParser>>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ParserRegistry {
    /// Create a new parser registry with all built-in parsers
    pub fn new() -> Self {
        let mut registry = Self {
            parsers: Vec::new(),
        };
        registry.register(Box::new(JsonParser));
        registry.register(Box::new(YamlParser));
        registry
    }

    /// Register a parser
    pub fn register(&mut self, parser: Box<dyn DatasetParser>) {
        self.parsers.push(parser);
    }

    /// Find a parser that can handle the given extension
    pub fn find_parser(&self, extension: &str) -> Option<&dyn DatasetParser> {
        self.parsers
            .iter()
            .find(|p| p.can_parse(extension))
            .map(|p| p.as_ref())
    }

    /// Parse content using the parser registered for the extension
    pub fn parse(&self, content: &str, path: &str, extension: &str) -> Result<FamilyDataset> {
        let parser = self.find_parser(extension).ok_or_else(|| {
            FamtreeError::Parse(format!("No parser found for extension: {}", extension))
        })?;
        parser.parse(content, path)
    }
}
