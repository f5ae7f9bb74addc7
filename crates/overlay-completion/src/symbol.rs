//! Symbols as seen by completion.

/// Identity of a symbol within one semantic model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

/// Symbol category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolKind {
    /// Namespace.
    Namespace,
    /// Class, struct, interface or delegate.
    Type,
    /// Method.
    Method,
    /// Constructor of its containing type.
    Constructor,
    /// Property.
    Property,
    /// Field.
    Field,
    /// Local variable.
    Local,
    /// Method parameter.
    Parameter,
}

/// A formal parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Rendered type.
    pub type_name: String,
}

impl Parameter {
    /// Create a parameter.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// A declared symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    /// Identity, assigned by the model.
    pub id: SymbolId,
    /// Simple name.
    pub name: String,
    /// Category.
    pub kind: SymbolKind,
    /// Containing namespace or type.
    pub container: Option<SymbolId>,
    /// Generic type parameter names; the arity is their count.
    pub type_parameters: Vec<String>,
    /// Formal parameters of methods and constructors.
    pub parameters: Vec<Parameter>,
    /// Rendered return or declared type.
    pub return_type: Option<String>,
    /// Stable documentation-comment identifier, e.g. `M:System.Console.WriteLine(System.String)`.
    pub documentation_id: Option<String>,
    /// Inline XML documentation, when the declaration carries it.
    pub documentation_xml: Option<String>,
}

impl Symbol {
    /// A symbol without container, parameters or documentation. The id is reassigned when the
    /// symbol is added to a [`SymbolTable`](crate::model::SymbolTable).
    pub fn new(name: impl Into<String>, kind: SymbolKind) -> Self {
        Self {
            id: SymbolId(0),
            name: name.into(),
            kind,
            container: None,
            type_parameters: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
            documentation_id: None,
            documentation_xml: None,
        }
    }

    /// Set the container.
    pub fn in_container(mut self, container: SymbolId) -> Self {
        self.container = Some(container);
        self
    }

    /// Set generic type parameters.
    pub fn with_type_parameters<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.type_parameters = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set formal parameters.
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Set the return or declared type.
    pub fn with_return_type(mut self, type_name: impl Into<String>) -> Self {
        self.return_type = Some(type_name.into());
        self
    }

    /// Set the documentation-comment identifier.
    pub fn with_documentation_id(mut self, id: impl Into<String>) -> Self {
        self.documentation_id = Some(id.into());
        self
    }

    /// Set inline XML documentation.
    pub fn with_documentation(mut self, xml: impl Into<String>) -> Self {
        self.documentation_xml = Some(xml.into());
        self
    }

    /// Number of generic type parameters.
    pub fn arity(&self) -> usize {
        self.type_parameters.len()
    }

    /// Whether this is a method or constructor.
    pub fn is_invocable(&self) -> bool {
        matches!(self.kind, SymbolKind::Method | SymbolKind::Constructor)
    }
}

/// What the analysis bound at a caret offset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Binding {
    /// Nothing bound.
    #[default]
    None,
    /// A single resolved symbol.
    Resolved(SymbolId),
    /// Overload resolution failed; these were the candidates.
    Ambiguous(Vec<SymbolId>),
}

impl Binding {
    /// The bound symbols in binding order.
    pub fn symbols(&self) -> &[SymbolId] {
        match self {
            Self::None => &[],
            Self::Resolved(id) => std::slice::from_ref(id),
            Self::Ambiguous(ids) => ids,
        }
    }
}

/// Classification of a display fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// Namespace or type name.
    TypeName,
    /// Method or constructor name.
    MethodName,
    /// Generic type parameter.
    TypeParameter,
    /// Parameter name.
    ParameterName,
    /// Brackets, commas and spaces.
    Punctuation,
}

/// A classified fragment of a rendered signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayPart {
    /// Classification.
    pub kind: PartKind,
    /// Text.
    pub text: String,
}

impl DisplayPart {
    /// Create a part.
    pub fn new(kind: PartKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Concatenate parts into plain text.
pub fn parts_to_string(parts: &[DisplayPart]) -> String {
    parts.iter().map(|part| part.text.as_str()).collect()
}
