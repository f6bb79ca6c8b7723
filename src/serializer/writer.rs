//! Schematron document rendering
//!
//! Document order:
//! 1. XML declaration and `schema` root with the target `ns` declaration
//! 2. one `phase` per phase, activating its patterns in order
//! 3. every `pattern` body, phase by phase
//!
//! Rendering is a pure function of the schema and the namespaces: same
//! input, same bytes.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::errors::{SerializeError, SerializeResult};
use crate::config::CompilerConfig;
use crate::model::{Assert, Pattern, Phase, Rule, Schema};

const INDENT_SIZE: usize = 2;

/// Renders `schema` to canonical Schematron bytes.
pub fn render(schema: &Schema, config: &CompilerConfig) -> SerializeResult<Vec<u8>> {
    let mut out = SchemaWriter::new(&config.schematron_namespace.prefix);

    out.declaration()?;

    let xmlns = format!("xmlns:{}", config.schematron_namespace.prefix);
    out.start("schema", &[(xmlns.as_str(), config.schematron_namespace.uri.as_str())])?;
    out.empty(
        "ns",
        &[
            ("prefix", config.target_namespace.prefix.as_str()),
            ("uri", config.target_namespace.uri.as_str()),
        ],
    )?;

    for phase in &schema.phases {
        out.phase(phase)?;
    }
    for pattern in schema.patterns() {
        out.pattern(pattern)?;
    }

    out.end("schema")?;
    Ok(out.finish())
}

/// Thin wrapper qualifying every element with the Schematron prefix
struct SchemaWriter {
    writer: Writer<Vec<u8>>,
    prefix: String,
}

impl SchemaWriter {
    fn new(prefix: &str) -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', INDENT_SIZE),
            prefix: prefix.to_string(),
        }
    }

    fn qualified(&self, name: &str) -> String {
        format!("{}:{}", self.prefix, name)
    }

    fn write(&mut self, event: Event<'_>) -> SerializeResult<()> {
        self.writer
            .write_event(event)
            .map_err(|e| SerializeError::Xml(e.to_string()))
    }

    fn element(&self, name: &str, attributes: &[(&str, &str)]) -> BytesStart<'static> {
        let mut element = BytesStart::new(self.qualified(name));
        for attribute in attributes {
            element.push_attribute(*attribute);
        }
        element
    }

    fn declaration(&mut self) -> SerializeResult<()> {
        self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> SerializeResult<()> {
        let element = self.element(name, attributes);
        self.write(Event::Start(element))
    }

    fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> SerializeResult<()> {
        let element = self.element(name, attributes);
        self.write(Event::Empty(element))
    }

    fn end(&mut self, name: &str) -> SerializeResult<()> {
        let name = self.qualified(name);
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn text_element(
        &mut self,
        name: &str,
        attributes: &[(&str, &str)],
        text: &str,
    ) -> SerializeResult<()> {
        self.start(name, attributes)?;
        self.write(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    fn phase(&mut self, phase: &Phase) -> SerializeResult<()> {
        self.start("phase", &[("id", phase.id.as_str()), ("see", phase.see.as_str())])?;
        for pattern in &phase.patterns {
            self.empty("active", &[("pattern", pattern.id.as_str())])?;
        }
        self.end("phase")
    }

    fn pattern(&mut self, pattern: &Pattern) -> SerializeResult<()> {
        self.start("pattern", &[("see", pattern.see.as_str()), ("id", pattern.id.as_str())])?;
        self.text_element("title", &[], &pattern.title)?;
        for rule in &pattern.rules {
            self.rule(rule)?;
        }
        self.end("pattern")
    }

    fn rule(&mut self, rule: &Rule) -> SerializeResult<()> {
        self.start("rule", &[("context", rule.context.as_str())])?;
        for assert in &rule.asserts {
            self.assert(assert)?;
        }
        self.end("rule")
    }

    fn assert(&mut self, assert: &Assert) -> SerializeResult<()> {
        self.text_element(
            "assert",
            &[("test", assert.test.as_str()), ("role", assert.severity.as_str())],
            assert.message(),
        )
    }

    fn finish(self) -> Vec<u8> {
        let mut bytes = self.writer.into_inner();
        bytes.push(b'\n');
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assert, Rule, Severity};

    fn sample_schema() -> Schema {
        let mut rule = Rule::new("", "/auc:BuildingSync");
        rule.asserts.push(Assert::new("count(auc:Facilities)", "", Severity::Error));
        rule.asserts.push(Assert::new("@version", "Version must be set", Severity::Warning));

        let mut pattern = Pattern::new("Area Checks", "https://example.org/area");
        pattern.rules.push(rule);

        let mut phase = Phase::new("P1", "");
        phase.patterns.push(pattern);
        Schema::new(vec![phase])
    }

    fn render_text(schema: &Schema) -> String {
        String::from_utf8(render(schema, &CompilerConfig::default()).unwrap()).unwrap()
    }

    #[test]
    fn test_render_document_order() {
        let text = render_text(&sample_schema());

        let decl = text.find("<?xml").unwrap();
        let ns = text.find("<sch:ns prefix=\"auc\"").unwrap();
        let phase = text.find("<sch:phase id=\"p1\"").unwrap();
        let active = text.find("<sch:active pattern=\"area_checks\"/>").unwrap();
        let pattern = text.find("<sch:pattern see=\"https://example.org/area\" id=\"area_checks\">").unwrap();
        assert!(decl < ns && ns < phase && phase < active && active < pattern);
        assert!(text.contains("xmlns:sch=\"http://purl.oclc.org/dsdl/schematron\""));
        assert!(text.ends_with("</sch:schema>\n"));
    }

    #[test]
    fn test_assert_text_falls_back_to_test() {
        let text = render_text(&sample_schema());
        assert!(text.contains("role=\"ERROR\">count(auc:Facilities)</sch:assert>"));
        assert!(text.contains("role=\"WARNING\">Version must be set</sch:assert>"));
    }

    #[test]
    fn test_title_is_rendered() {
        let text = render_text(&sample_schema());
        assert!(text.contains("<sch:title>Area Checks</sch:title>"));
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let mut rule = Rule::new("", "/a[@b=\"c\"]");
        rule.asserts.push(Assert::new("x < 1 and y > 2", "", Severity::Info));
        let mut pattern = Pattern::new("Escapes", "");
        pattern.rules.push(rule);
        let mut phase = Phase::new("P1", "");
        phase.patterns.push(pattern);

        let text = render_text(&Schema::new(vec![phase]));
        assert!(text.contains("context=\"/a[@b=&quot;c&quot;]\""));
        assert!(text.contains("test=\"x &lt; 1 and y "));
    }

    #[test]
    fn test_render_is_deterministic() {
        let schema = sample_schema();
        let config = CompilerConfig::default();
        assert_eq!(render(&schema, &config).unwrap(), render(&schema, &config).unwrap());
    }

    #[test]
    fn test_custom_prefixes() {
        let mut config = CompilerConfig::default();
        config.schematron_namespace.prefix = "iso".into();
        config.target_namespace.prefix = "bs".into();
        let text = String::from_utf8(render(&sample_schema(), &config).unwrap()).unwrap();
        assert!(text.contains("<iso:schema xmlns:iso="));
        assert!(text.contains("<iso:ns prefix=\"bs\""));
        assert!(!text.contains("sch:"));
    }
}
