use std::rc::Rc;

use crate::source::Span;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw constants that can appear directly in source
/// code: integers, floats and strings. Lists are built from element nodes and
/// are therefore not literals.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Int(i64),
    /// A 64-bit floating-point literal.
    Float(f64),
    /// A string literal with its escapes already resolved.
    Str(String),
}

/// An abstract syntax tree (AST) node.
///
/// Sympl has no statement/expression split: every construct, including loops,
/// function definitions and `return`, is a node that evaluates to a value. A
/// sequence of statements is a [`Node::List`]. Each variant carries the span
/// of the source text it was parsed from; composite nodes span from their
/// first to their last child.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// A number or string constant.
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Source range of the literal.
        span:  Span,
    },
    /// A prefix operation (`-x`, `+x`, `not x`).
    UnaryOp {
        /// The unary operator to apply.
        op:      UnaryOperator,
        /// The operand expression.
        operand: Box<Self>,
        /// Source range from the operator to the end of the operand.
        span:    Span,
    },
    /// A binary operation (arithmetic, comparison or logical).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Source range from the left to the right operand.
        span:  Span,
    },
    /// A list literal `[a, b]` or a sequence of statements.
    List {
        /// Element nodes in source order.
        elements: Vec<Self>,
        /// Source range of the whole list.
        span:     Span,
    },
    /// `if ... then ... elif ... else ... end`.
    If {
        /// Condition/body pairs tried in order.
        cases:     Vec<IfCase>,
        /// Body evaluated when no condition holds.
        else_case: Option<Box<ElseCase>>,
        /// Source range of the whole construct.
        span:      Span,
    },
    /// `for name = start to end step n then ...`.
    For {
        /// Loop variable, bound in the enclosing context.
        var_name:      String,
        /// First value of the loop variable.
        start:         Box<Self>,
        /// Exclusive bound.
        end:           Box<Self>,
        /// Increment, `1` when omitted.
        step:          Option<Box<Self>>,
        /// Body evaluated once per iteration.
        body:          Box<Self>,
        /// Block bodies yield `null` instead of the list of iteration values.
        discard_value: bool,
        /// Source range of the whole construct.
        span:          Span,
    },
    /// `while condition then ...`.
    While {
        /// Re-evaluated before every iteration.
        condition:     Box<Self>,
        /// Body evaluated while `condition` is true.
        body:          Box<Self>,
        /// Block bodies yield `null` instead of the list of iteration values.
        discard_value: bool,
        /// Source range of the whole construct.
        span:          Span,
    },
    /// Reading a variable.
    VarAccess {
        /// Name of the variable.
        name: String,
        /// Source range of the identifier.
        span: Span,
    },
    /// `var name = value` or `name = value`.
    VarAssign {
        /// Name of the variable.
        name:  String,
        /// The assigned expression.
        value: Box<Self>,
        /// Source range of the assignment.
        span:  Span,
    },
    /// `object.member` or `object.member = value`.
    ScopeAccess {
        /// Name of the variable holding the object instance.
        object: String,
        /// Member name inside the instance's scope.
        member: String,
        /// Value to store, for assignments.
        value:  Option<Box<Self>>,
        /// Source range of the access.
        span:   Span,
    },
    /// `func name(a, b) -> expr` or a block function ending in `end`.
    FuncDef {
        /// Name the function is bound to; `None` for anonymous functions.
        name:        Option<String>,
        /// Parameter names.
        params:      Vec<String>,
        /// Function body, shared with every function value created from it.
        body:        Rc<Self>,
        /// Whether the body's value is returned without an explicit `return`.
        auto_return: bool,
        /// Source range of the definition.
        span:        Span,
    },
    /// A call expression `callee(args)`.
    Call {
        /// The expression producing the function.
        callee:    Box<Self>,
        /// Arguments, evaluated left to right.
        arguments: Vec<Self>,
        /// Source range from the callee to the closing parenthesis.
        span:      Span,
    },
    /// `object Name ... end`.
    ObjectDef {
        /// Name the template is bound to.
        name: String,
        /// Member statements, evaluated once per instance.
        body: Rc<Self>,
        /// Source range of the definition.
        span: Span,
    },
    /// `new Name`.
    NewObject {
        /// Name of the template (or instance) to copy.
        name: String,
        /// Source range of the expression.
        span: Span,
    },
    /// `return` with an optional value.
    Return {
        /// Returned expression, `null` when omitted.
        value: Option<Box<Self>>,
        /// Source range of the statement.
        span:  Span,
    },
    /// `break`.
    Break {
        /// Source range of the keyword.
        span: Span,
    },
    /// `continue`.
    Continue {
        /// Source range of the keyword.
        span: Span,
    },
}

impl Node {
    /// Gets the source range of `self`.
    #[must_use]
    pub const fn span(&self) -> &Span {
        match self {
            Self::Literal { span, .. }
            | Self::UnaryOp { span, .. }
            | Self::BinaryOp { span, .. }
            | Self::List { span, .. }
            | Self::If { span, .. }
            | Self::For { span, .. }
            | Self::While { span, .. }
            | Self::VarAccess { span, .. }
            | Self::VarAssign { span, .. }
            | Self::ScopeAccess { span, .. }
            | Self::FuncDef { span, .. }
            | Self::Call { span, .. }
            | Self::ObjectDef { span, .. }
            | Self::NewObject { span, .. }
            | Self::Return { span, .. }
            | Self::Break { span }
            | Self::Continue { span } => span,
        }
    }

    /// Gets the line number the node starts on.
    /// ## Example
    /// ```
    /// use sympl::{interpreter::parser::parse_source, ast::Node};
    ///
    /// let root = parse_source("<test>", "1\n\nx").unwrap();
    /// let Node::List { elements, .. } = root else { unreachable!() };
    ///
    /// assert_eq!(elements[1].line_number(), 3);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        self.span().line()
    }
}

/// One `if`/`elif` branch.
#[derive(Debug, Clone, PartialEq)]
pub struct IfCase {
    /// The branch is taken when this evaluates to a true value.
    pub condition:     Node,
    /// The branch body.
    pub body:          Node,
    /// Block bodies yield `null` instead of their value.
    pub discard_value: bool,
}

/// The `else` branch of an `if`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseCase {
    /// The branch body.
    pub body:          Node,
    /// Block bodies yield `null` instead of their value.
    pub discard_value: bool,
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons and the logical
/// connectives.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Exponentiation (`^`)
    Pow,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`and`, `&&`)
    And,
    /// Logical or (`or`, `||`)
    Or,
}

impl BinaryOperator {
    /// Returns `true` for the six comparison operators.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual
                 | Self::Equal
                 | Self::NotEqual)
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Unary plus (e.g. `+x`), returns the operand unchanged.
    Plus,
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Logical NOT (e.g. `not x`, `!x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul, NotEqual, Or, Pow,
            Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Pow => "^",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "and",
            Or => "or",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Plus => "+",
            Self::Negate => "-",
            Self::Not => "not",
        };
        write!(f, "{operator}")
    }
}
