//! Declarative selector tables for markup backends
//!
//! A table names one selector matching each result container, plus one rule
//! per output field evaluated inside that container. Engines describe their
//! markup as data and the table does the walking.

use crate::error::{Error, Result};
use crate::results::TextResult;
use scraper::{ElementRef, Html, Selector};

/// Output field of a [`TextResult`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Href,
    Body,
}

/// What to read from the matched elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extract {
    /// Text of every match, each match separated by one space
    Text,
    /// Attribute of the first match that carries it
    Attr(String),
}

#[derive(Debug, Clone)]
struct FieldRule {
    field: Field,
    source: String,
    selector: Selector,
    extract: Extract,
}

impl FieldRule {
    fn read(&self, item: ElementRef<'_>) -> String {
        match &self.extract {
            Extract::Text => item
                .select(&self.selector)
                .map(|el| el.text().collect::<String>())
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
            Extract::Attr(name) => item
                .select(&self.selector)
                .find_map(|el| el.value().attr(name))
                .unwrap_or_default()
                .to_string(),
        }
    }
}

/// Compiled selector table
#[derive(Debug, Clone)]
pub struct SelectorTable {
    items_source: String,
    items: Selector,
    rules: Vec<FieldRule>,
}

impl SelectorTable {
    /// Start a table whose result containers match `items`
    pub fn builder(items: impl Into<String>) -> SelectorTableBuilder {
        SelectorTableBuilder {
            items: items.into(),
            rules: Vec::new(),
        }
    }

    /// Selector source for the result containers
    pub fn items(&self) -> &str {
        &self.items_source
    }

    /// Selector source for a field, if the table has a rule for it
    pub fn field(&self, field: Field) -> Option<&str> {
        self.rules
            .iter()
            .find(|r| r.field == field)
            .map(|r| r.source.as_str())
    }

    /// Extract results in document order, dropping items without title or href
    pub fn extract(&self, html: &str) -> Vec<TextResult> {
        let document = Html::parse_document(html);
        document
            .select(&self.items)
            .filter_map(|item| self.extract_item(item))
            .collect()
    }

    fn extract_item(&self, item: ElementRef<'_>) -> Option<TextResult> {
        let mut title = String::new();
        let mut href = String::new();
        let mut body = String::new();

        for rule in &self.rules {
            let value = rule.read(item);
            match rule.field {
                Field::Title => title = value,
                Field::Href => href = value,
                Field::Body => body = value,
            }
        }

        let result = TextResult::new(title, href, body);
        result.is_complete().then_some(result)
    }
}

/// Builder collecting selector sources before compiling them
#[derive(Debug, Clone)]
pub struct SelectorTableBuilder {
    items: String,
    rules: Vec<(Field, String, Extract)>,
}

impl SelectorTableBuilder {
    /// Read the text of `selector` into `field`
    pub fn text(self, field: Field, selector: impl Into<String>) -> Self {
        self.rule(field, selector.into(), Extract::Text)
    }

    /// Read attribute `attr` of `selector` into `field`
    pub fn attr(self, field: Field, selector: impl Into<String>, attr: impl Into<String>) -> Self {
        self.rule(field, selector.into(), Extract::Attr(attr.into()))
    }

    fn rule(mut self, field: Field, source: String, extract: Extract) -> Self {
        self.rules.retain(|(f, _, _)| *f != field);
        self.rules.push((field, source, extract));
        self
    }

    /// Compile every selector
    pub fn build(self) -> Result<SelectorTable> {
        let items = compile(&self.items)?;
        let rules = self
            .rules
            .into_iter()
            .map(|(field, source, extract)| {
                Ok(FieldRule {
                    field,
                    selector: compile(&source)?,
                    source,
                    extract,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SelectorTable {
            items_source: self.items,
            items,
            rules,
        })
    }
}

fn compile(source: &str) -> Result<Selector> {
    Selector::parse(source).map_err(|e| Error::Selector {
        selector: source.to_string(),
        reason: format!("{:?}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <div class="hit">
            <h3><a href="https://one.example">First <b>hit</b></a></h3>
            <p class="desc">Snippet one</p>
          </div>
          <div class="hit">
            <h3><a>No link here</a></h3>
          </div>
          <div class="hit">
            <h3><a href="https://three.example">Third</a></h3>
          </div>
        </body></html>
    "#;

    fn table() -> SelectorTable {
        SelectorTable::builder("div.hit")
            .text(Field::Title, "h3 a")
            .attr(Field::Href, "h3 a", "href")
            .text(Field::Body, "p.desc")
            .build()
            .unwrap()
    }

    #[test]
    fn test_extract_in_document_order() {
        let results = table().extract(PAGE);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "First hit");
        assert_eq!(results[0].href, "https://one.example");
        assert_eq!(results[0].body, "Snippet one");
        assert_eq!(results[1].title, "Third");
        assert_eq!(results[1].body, "");
    }

    #[test]
    fn test_non_markup_body_yields_nothing() {
        assert!(table().extract("{\"not\": \"html\"}").is_empty());
        assert!(table().extract("").is_empty());
    }

    #[test]
    fn test_later_rule_replaces_earlier() {
        let table = SelectorTable::builder("div.hit")
            .text(Field::Title, "p.desc")
            .text(Field::Title, "h3 a")
            .attr(Field::Href, "h3 a", "href")
            .build()
            .unwrap();
        assert_eq!(table.field(Field::Title), Some("h3 a"));
        assert_eq!(table.field(Field::Body), None);
        assert_eq!(table.items(), "div.hit");
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let err = SelectorTable::builder("div[")
            .text(Field::Title, "a")
            .build()
            .unwrap_err();
        assert!(matches!(err, Error::Selector { ref selector, .. } if selector == "div["));
    }
}
