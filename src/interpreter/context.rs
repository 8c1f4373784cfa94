use std::{cell::RefCell, collections::HashMap, fmt, rc::Rc};

use crate::{
    error::{RuntimeErrorKind, TraceFrame},
    interpreter::value::core::Value,
    source::Span,
};

/// A symbol table shared between a context and the contexts nested in it.
pub type SharedSymbolTable = Rc<RefCell<SymbolTable>>;

/// A single variable binding.
#[derive(Debug, Clone)]
pub struct Binding {
    /// The bound value.
    pub value:   Value,
    /// Whether the binding may be overwritten.
    pub mutable: bool,
}

/// Maps names to values, falling back to a parent table on lookup.
///
/// Writes never walk the chain: assigning to a name always creates or
/// overwrites the binding in this table, shadowing any outer binding.
#[derive(Debug, Default)]
pub struct SymbolTable {
    symbols: HashMap<String, Binding>,
    parent:  Option<SharedSymbolTable>,
}

impl SymbolTable {
    /// Creates an empty table without a parent.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty table whose lookups fall back to `parent`.
    #[must_use]
    pub fn with_parent(parent: SharedSymbolTable) -> Self {
        Self { symbols: HashMap::new(),
               parent:  Some(parent), }
    }

    /// Looks up `name` in this table, then in its ancestors.
    ///
    /// The returned value is a copy; changing it does not affect the binding.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Value> {
        self.symbols
            .get(name)
            .map(|binding| binding.value.clone())
            .or_else(|| self.parent.as_ref().and_then(|parent| parent.borrow().get(name)))
    }

    /// Looks up `name` in this table only.
    #[must_use]
    pub fn get_local(&self, name: &str) -> Option<Value> {
        self.symbols.get(name).map(|binding| binding.value.clone())
    }

    /// Binds `name` in this table, replacing any existing binding regardless
    /// of its mutability.
    pub fn define(&mut self, name: impl Into<String>, value: Value, mutable: bool) {
        self.symbols.insert(name.into(), Binding { value, mutable });
    }

    /// Creates or overwrites the mutable binding `name` in this table.
    ///
    /// # Errors
    /// [`RuntimeErrorKind::ImmutableBinding`] if this table already binds
    /// `name` immutably.
    pub fn set(&mut self, name: &str, value: Value) -> Result<(), RuntimeErrorKind> {
        match self.symbols.get_mut(name) {
            Some(binding) if !binding.mutable => {
                Err(RuntimeErrorKind::ImmutableBinding(name.to_string()))
            },
            Some(binding) => {
                binding.value = value;
                Ok(())
            },
            None => {
                self.define(name, value, true);
                Ok(())
            },
        }
    }
}

/// A named lexical environment.
///
/// Contexts form two chains. The `parent` chain records where the context was
/// entered from and is used for tracebacks. Name resolution follows the
/// symbol table's own parent, which for function calls is the table of the
/// function's defining context rather than the caller's.
pub struct Context {
    /// Shown in tracebacks, e.g. `<program>` or a function name.
    pub name:    String,
    /// The context this one was entered from.
    pub parent:  Option<Rc<Self>>,
    /// Where in the parent this context was entered.
    pub entry:   Option<Span>,
    /// Variables visible in this context.
    pub symbols: SharedSymbolTable,
}

impl Context {
    /// Creates a top-level context with an empty symbol table.
    #[must_use]
    pub fn root(name: impl Into<String>) -> Rc<Self> {
        Rc::new(Self { name:    name.into(),
                       parent:  None,
                       entry:   None,
                       symbols: Rc::new(RefCell::new(SymbolTable::new())), })
    }

    /// Creates a context entered from `parent` at `entry`.
    ///
    /// # Parameters
    /// - `name`: Context name for tracebacks.
    /// - `parent`: The context the new one is entered from.
    /// - `entry`: The call or instantiation site inside `parent`.
    /// - `scope`: The table name lookups fall back to, if any.
    #[must_use]
    pub fn nested(name: impl Into<String>,
                  parent: &Rc<Self>,
                  entry: Span,
                  scope: Option<SharedSymbolTable>)
                  -> Rc<Self> {
        let table = scope.map_or_else(SymbolTable::new, SymbolTable::with_parent);
        Rc::new(Self { name:    name.into(),
                       parent:  Some(Rc::clone(parent)),
                       entry:   Some(entry),
                       symbols: Rc::new(RefCell::new(table)), })
    }

    /// Looks up `name` through the symbol table chain.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.symbols.borrow().get(name)
    }

    /// Looks up `name` in this context's own table.
    #[must_use]
    pub fn lookup_local(&self, name: &str) -> Option<Value> {
        self.symbols.borrow().get_local(name)
    }

    /// Assigns `name` in this context's own table.
    ///
    /// # Errors
    /// [`RuntimeErrorKind::ImmutableBinding`] if the local binding is
    /// immutable.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), RuntimeErrorKind> {
        self.symbols.borrow_mut().set(name, value)
    }

    /// Binds `name` in this context's own table with the given mutability.
    pub fn define(&self, name: &str, value: Value, mutable: bool) {
        self.symbols.borrow_mut().define(name, value, mutable);
    }

    /// Returns the outermost context of the entry chain.
    #[must_use]
    pub fn root_of(context: &Rc<Self>) -> Rc<Self> {
        let mut current = Rc::clone(context);
        while let Some(parent) = current.parent.clone() {
            current = parent;
        }
        current
    }

    /// Builds the traceback for an error raised at `span` in this context.
    ///
    /// Frames are ordered outermost first; the last frame points at `span`.
    #[must_use]
    pub fn traceback(&self, span: &Span) -> Vec<TraceFrame> {
        let mut frames = Vec::new();
        let mut context = Some(self);
        let mut position = Some(span);

        while let Some(current) = context {
            if let Some(span) = position {
                frames.push(TraceFrame { file:    span.file_name().to_string(),
                                         line:    span.line(),
                                         context: current.name.clone(), });
            }
            position = current.entry.as_ref();
            context = current.parent.as_deref();
        }

        frames.reverse();
        frames
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
         .field("name", &self.name)
         .field("parent", &self.parent.as_ref().map(|parent| &parent.name))
         .finish_non_exhaustive()
    }
}
