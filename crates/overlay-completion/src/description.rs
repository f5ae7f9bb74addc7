//! Description panel text for the selected candidate.

use crate::docs::{DocComment, ReferenceDocs, documentation_xml};
use crate::model::SemanticModel;
use crate::selector::display_parts;
use crate::symbol::{SymbolId, parts_to_string};

/// Text shown under the signature.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Description {
    /// Rendered signature.
    pub signature: String,
    /// Summary text, when documented.
    pub summary: Option<String>,
    /// Per-parameter lines, in parameter order. Undocumented parameters are omitted.
    pub parameters: Vec<ParameterDoc>,
}

/// Documentation for one parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDoc {
    /// Parameter name.
    pub name: String,
    /// Documentation text.
    pub text: String,
}

impl Description {
    /// Lines of the popup body. The parameter sub-panel is included only when asked for.
    pub fn lines(&self, with_parameters: bool) -> Vec<String> {
        let mut lines = vec![self.signature.clone()];
        if let Some(summary) = &self.summary {
            lines.push(summary.clone());
        }
        if with_parameters {
            lines.extend(
                self.parameters
                    .iter()
                    .map(|param| format!("{}: {}", param.name, param.text)),
            );
        }
        lines
    }

    /// Whether there is a parameter sub-panel to drop when space is short.
    pub fn has_parameters(&self) -> bool {
        !self.parameters.is_empty()
    }
}

/// Describe `symbol` using its inline documentation or the reference dictionary.
pub fn describe(model: &impl SemanticModel, symbol: SymbolId, docs: &ReferenceDocs) -> Description {
    let Some(symbol) = model.symbol(symbol) else {
        return Description::default();
    };
    let signature = parts_to_string(&display_parts(model, symbol));
    let Some(xml) = documentation_xml(symbol, docs) else {
        return Description {
            signature,
            ..Description::default()
        };
    };

    let doc = DocComment::parse(xml);
    let parameters = symbol
        .parameters
        .iter()
        .filter_map(|param| {
            doc.param(&param.name).map(|text| ParameterDoc {
                name: param.name.clone(),
                text: text.to_string(),
            })
        })
        .collect();
    Description {
        signature,
        summary: doc.summary,
        parameters,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SymbolTable;
    use crate::symbol::{Parameter, Symbol, SymbolKind};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_describe_falls_back_to_reference_docs() {
        let mut table = SymbolTable::new();
        let console = table.add(Symbol::new("Console", SymbolKind::Type));
        let write_line = table.add(
            Symbol::new("WriteLine", SymbolKind::Method)
                .in_container(console)
                .with_parameters(vec![Parameter::new("value", "string")])
                .with_documentation_id("M:System.Console.WriteLine(System.String)"),
        );

        let description = describe(&table, write_line, ReferenceDocs::bundled());
        assert_eq!(description.signature, "Console.WriteLine(string value)");
        assert_eq!(
            description.parameters,
            vec![ParameterDoc {
                name: "value".into(),
                text: "The value to write.".into()
            }]
        );
        assert_eq!(
            description.lines(false),
            vec![
                "Console.WriteLine(string value)".to_string(),
                "Writes the specified string value, followed by the current line terminator, to the standard output stream.".to_string(),
            ]
        );
        assert_eq!(description.lines(true).len(), 3);
    }

    #[test]
    fn test_undocumented_symbol_has_signature_only() {
        let mut table = SymbolTable::new();
        let ty = table.add(Symbol::new("Local", SymbolKind::Type));
        let description = describe(&table, ty, &ReferenceDocs::default());
        assert_eq!(description.signature, "Local");
        assert_eq!(description.summary, None);
        assert!(!description.has_parameters());
    }
}
