//! Abstract syntax tree for host test lines.
//!
//! A test line is either an assignment (`t = r.table('x')`) or a bare expression. The expression union is closed:
//! anything the parser cannot represent here is rejected as a syntax error, and anything represented here that a
//! backend cannot render must surface as an explicit failure from that backend.
//!
//! ## Notes
//! - Negative numbers are not folded: `-1` is `Unary(Neg, Literal(Int(1)))`, exactly as written.
//! - Chained comparisons keep every operator (`a < b < c` is one [`Expr::Compare`] with two operators) so that
//!   backends can refuse them instead of silently splitting them.

use std::fmt;

use reqlgen_core::lang::operators::OperatorId;

/// Source location span (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// A node with source location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span) -> Self {
        Self { node, span }
    }
}

pub type Ident = String;

/// One parsed test line.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `target = value`; chained assignments keep every target.
    Assign {
        targets: Vec<Spanned<Expr>>,
        value: Spanned<Expr>,
    },
    Expr(Spanned<Expr>),
}

impl Statement {
    /// The expression whose value the line produces.
    pub fn value(&self) -> &Spanned<Expr> {
        match self {
            Statement::Assign { value, .. } => value,
            Statement::Expr(expr) => expr,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Name(Ident),
    /// `owner.member`
    Attribute(Box<Spanned<Expr>>, Ident),
    /// `callee(args...)`
    Call(Box<Spanned<Expr>>, Vec<Argument>),
    /// `value[slice]`
    Subscript(Box<Spanned<Expr>>, Box<Slice>),
    List(Vec<Spanned<Expr>>),
    Tuple(Vec<Spanned<Expr>>),
    Dict(Vec<DictEntry>),
    /// `lambda params: body`
    Lambda(Vec<Ident>, Box<Spanned<Expr>>),
    Unary(UnaryOp, Box<Spanned<Expr>>),
    Binary(Box<Spanned<Expr>>, BinaryOp, Box<Spanned<Expr>>),
    /// `left op1 c1 op2 c2 ...`
    Compare(Box<Spanned<Expr>>, Vec<(CompareOp, Spanned<Expr>)>),
    /// `[elt for target in iter if cond ...]`
    ListComp(Box<Spanned<Expr>>, Vec<Comprehension>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Bytes(Vec<u8>),
    Int(i128),
    Float(f64),
    Bool(bool),
    None,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    Positional(Spanned<Expr>),
    Keyword(Ident, Spanned<Expr>),
    /// `*args`
    Starred(Spanned<Expr>),
    /// `**kwargs`
    DoubleStarred(Spanned<Expr>),
}

/// Contents of `[...]` after a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Slice {
    Index(Spanned<Expr>),
    Range {
        lower: Option<Spanned<Expr>>,
        upper: Option<Spanned<Expr>>,
        step: Option<Spanned<Expr>>,
    },
    /// Comma-separated dimensions where at least one is a range (`a[1:2, 3]`).
    Extended(Vec<Slice>),
}

/// One `key: value` entry; `key` is `None` for `**mapping` unpacking.
#[derive(Debug, Clone, PartialEq)]
pub struct DictEntry {
    pub key: Option<Spanned<Expr>>,
    pub value: Spanned<Expr>,
}

/// One `for target in iter if ...` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct Comprehension {
    pub target: Spanned<Expr>,
    pub iter: Spanned<Expr>,
    pub ifs: Vec<Spanned<Expr>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Pos,
    Not,
    Invert,
}

impl UnaryOp {
    pub fn operator_id(self) -> OperatorId {
        match self {
            UnaryOp::Neg => OperatorId::Minus,
            UnaryOp::Pos => OperatorId::Plus,
            UnaryOp::Not => OperatorId::Not,
            UnaryOp::Invert => OperatorId::Tilde,
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", reqlgen_core::lang::operators::as_str(self.operator_id()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    MatMul,
    BitAnd,
    BitOr,
    BitXor,
    LShift,
    RShift,
}

impl BinaryOp {
    pub fn operator_id(self) -> OperatorId {
        match self {
            BinaryOp::Add => OperatorId::Plus,
            BinaryOp::Sub => OperatorId::Minus,
            BinaryOp::Mul => OperatorId::Star,
            BinaryOp::Div => OperatorId::Slash,
            BinaryOp::FloorDiv => OperatorId::SlashSlash,
            BinaryOp::Mod => OperatorId::Percent,
            BinaryOp::Pow => OperatorId::StarStar,
            BinaryOp::MatMul => OperatorId::At,
            BinaryOp::BitAnd => OperatorId::Amp,
            BinaryOp::BitOr => OperatorId::Pipe,
            BinaryOp::BitXor => OperatorId::Caret,
            BinaryOp::LShift => OperatorId::Shl,
            BinaryOp::RShift => OperatorId::Shr,
        }
    }

    /// Map an infix operator token to its binary operator.
    pub fn from_operator_id(id: OperatorId) -> Option<Self> {
        Some(match id {
            OperatorId::Plus => BinaryOp::Add,
            OperatorId::Minus => BinaryOp::Sub,
            OperatorId::Star => BinaryOp::Mul,
            OperatorId::Slash => BinaryOp::Div,
            OperatorId::SlashSlash => BinaryOp::FloorDiv,
            OperatorId::Percent => BinaryOp::Mod,
            OperatorId::StarStar => BinaryOp::Pow,
            OperatorId::At => BinaryOp::MatMul,
            OperatorId::Amp => BinaryOp::BitAnd,
            OperatorId::Pipe => BinaryOp::BitOr,
            OperatorId::Caret => BinaryOp::BitXor,
            OperatorId::Shl => BinaryOp::LShift,
            OperatorId::Shr => BinaryOp::RShift,
            _ => return None,
        })
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", reqlgen_core::lang::operators::as_str(self.operator_id()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,
    NotIn,
    Is,
    IsNot,
}

impl CompareOp {
    pub fn operator_id(self) -> OperatorId {
        match self {
            CompareOp::Eq => OperatorId::EqEq,
            CompareOp::NotEq => OperatorId::NotEq,
            CompareOp::Lt => OperatorId::Lt,
            CompareOp::LtEq => OperatorId::LtEq,
            CompareOp::Gt => OperatorId::Gt,
            CompareOp::GtEq => OperatorId::GtEq,
            CompareOp::In => OperatorId::In,
            CompareOp::NotIn => OperatorId::NotIn,
            CompareOp::Is => OperatorId::Is,
            CompareOp::IsNot => OperatorId::IsNot,
        }
    }

    /// Map a symbolic comparison token to its operator (word forms are handled by the parser).
    pub fn from_operator_id(id: OperatorId) -> Option<Self> {
        Some(match id {
            OperatorId::EqEq => CompareOp::Eq,
            OperatorId::NotEq => CompareOp::NotEq,
            OperatorId::Lt => CompareOp::Lt,
            OperatorId::LtEq => CompareOp::LtEq,
            OperatorId::Gt => CompareOp::Gt,
            OperatorId::GtEq => CompareOp::GtEq,
            _ => return None,
        })
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", reqlgen_core::lang::operators::as_str(self.operator_id()))
    }
}

impl Expr {
    /// Short human-readable name of the node kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Literal(Literal::Str(_)) => "string literal",
            Expr::Literal(Literal::Bytes(_)) => "bytes literal",
            Expr::Literal(Literal::Int(_)) => "integer literal",
            Expr::Literal(Literal::Float(_)) => "float literal",
            Expr::Literal(Literal::Bool(_)) => "boolean literal",
            Expr::Literal(Literal::None) => "None",
            Expr::Name(_) => "name",
            Expr::Attribute(..) => "attribute access",
            Expr::Call(..) => "call",
            Expr::Subscript(..) => "subscript",
            Expr::List(_) => "list",
            Expr::Tuple(_) => "tuple",
            Expr::Dict(_) => "dict",
            Expr::Lambda(..) => "lambda",
            Expr::Unary(..) => "unary operation",
            Expr::Binary(..) => "binary operation",
            Expr::Compare(..) => "comparison",
            Expr::ListComp(..) => "list comprehension",
        }
    }
}
