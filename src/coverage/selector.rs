//! Context selection against an exemplar document
//!
//! The tracker only needs node identities, so selection sits behind
//! `ContextSelector`. `Exemplar` is the XML/XPath implementation.

use std::fs;
use std::hash::Hash;
use std::path::Path;

use sxd_document::dom::ChildOfRoot;
use sxd_document::{parser, Package};
use sxd_xpath::nodeset::Node;
use sxd_xpath::{Context, Factory, Value};

use super::errors::{CoverageError, CoverageResult};
use crate::config::NamespaceBinding;

/// Selects the nodes a rule context matches.
pub trait ContextSelector {
    /// Node identity, stable for the lifetime of the selector borrow
    type Node<'a>: Eq + Hash
    where
        Self: 'a;

    /// Evaluates `context` and returns the matched nodes.
    ///
    /// An `Err` carries the evaluation failure text.
    fn select<'a>(&'a self, context: &str) -> Result<Vec<Self::Node<'a>>, String>;
}

/// A parsed exemplar XML document
pub struct Exemplar {
    package: Package,
    namespaces: Vec<NamespaceBinding>,
}

impl Exemplar {
    /// Loads an exemplar from disk.
    ///
    /// `namespaces` are the prefixes available to rule contexts.
    pub fn from_path(path: &Path, namespaces: Vec<NamespaceBinding>) -> CoverageResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content, namespaces)
    }

    /// Parses exemplar XML text.
    pub fn parse(xml: &str, namespaces: Vec<NamespaceBinding>) -> CoverageResult<Self> {
        let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
        let package = parser::parse(xml).map_err(|e| CoverageError::MalformedExemplar {
            reason: format!("{:?}", e),
        })?;
        Ok(Self { package, namespaces })
    }

    /// Namespace prefixes visible to rule contexts
    pub fn namespaces(&self) -> &[NamespaceBinding] {
        &self.namespaces
    }
}

impl ContextSelector for Exemplar {
    type Node<'a> = Node<'a>;

    fn select<'a>(&'a self, context: &str) -> Result<Vec<Node<'a>>, String> {
        let document = self.package.as_document();
        let xpath = Factory::new()
            .build(context)
            .map_err(|e| e.to_string())?
            .ok_or_else(|| "empty context expression".to_string())?;

        // Relative contexts start at the root element
        let root = document.root();
        let context_node: Node<'a> = root
            .children()
            .into_iter()
            .find_map(|child| match child {
                ChildOfRoot::Element(element) => Some(Node::from(element)),
                _ => None,
            })
            .unwrap_or_else(|| Node::from(root));

        let mut xpath_context = Context::new();
        for binding in &self.namespaces {
            xpath_context.set_namespace(&binding.prefix, &binding.uri);
        }

        match xpath
            .evaluate(&xpath_context, context_node)
            .map_err(|e| e.to_string())?
        {
            Value::Nodeset(nodes) => Ok(nodes.document_order()),
            other => Err(format!("context does not select nodes, evaluated to {:?}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUC_URI: &str = "http://buildingsync.net/schemas/bedes-auc/2019";

    fn exemplar(xml: &str) -> Exemplar {
        Exemplar::parse(xml, vec![NamespaceBinding::new("auc", AUC_URI)]).unwrap()
    }

    #[test]
    fn test_select_matching_nodes() {
        let doc = exemplar("<a><b/><b/></a>");
        assert_eq!(doc.select("/a/b").unwrap().len(), 2);
        assert_eq!(doc.select("/a").unwrap().len(), 1);
        assert!(doc.select("/c").unwrap().is_empty());
    }

    #[test]
    fn test_root_context_selects_document_root() {
        let doc = exemplar("<a/>");
        assert_eq!(doc.select("/").unwrap().len(), 1);
    }

    #[test]
    fn test_same_node_has_same_identity() {
        let doc = exemplar("<a><b/></a>");
        let first = doc.select("/a/b").unwrap();
        let second = doc.select("//b").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_namespaced_context() {
        let doc = exemplar(&format!(
            "<auc:BuildingSync xmlns:auc=\"{}\"><auc:Facilities/></auc:BuildingSync>",
            AUC_URI
        ));
        assert_eq!(doc.select("/auc:BuildingSync/auc:Facilities").unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_context_is_an_error() {
        let doc = exemplar("<a/>");
        assert!(doc.select("/a[").is_err());
    }

    #[test]
    fn test_empty_context_is_an_error() {
        let doc = exemplar("<a/>");
        assert!(doc.select("").is_err());
        assert!(doc.select("   ").is_err());
    }

    #[test]
    fn test_relative_context_starts_at_root_element() {
        let doc = exemplar("<a><b/><b/></a>");
        assert_eq!(doc.select("b").unwrap().len(), 2);
        assert_eq!(doc.select("b").unwrap(), doc.select("/a/b").unwrap());
        assert!(doc.select("a").unwrap().is_empty());
    }

    #[test]
    fn test_non_nodeset_context_is_an_error() {
        let doc = exemplar("<a/>");
        assert!(doc.select("count(/a)").is_err());
    }

    #[test]
    fn test_malformed_exemplar_is_rejected() {
        let err = Exemplar::parse("<a>", Vec::new()).err().unwrap();
        assert_eq!(err.code(), "SCHGEN_MALFORMED_EXEMPLAR");
    }
}
