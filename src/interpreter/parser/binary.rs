use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Node, UnaryOperator},
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{core::ParseResult, unary::parse_unary, utils::eat},
    },
};

/// Parses `and`/`or` chains.
///
/// Both connectives share one precedence level and associate to the left.
///
/// The rule is: `logical := comparison (("and" | "or") comparison)*`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// A `Node::BinaryOp` tree, or the comparison itself when no connective
/// follows.
pub fn parse_logical<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    binary_operation(tokens,
                     parse_comparison,
                     &[BinaryOperator::And, BinaryOperator::Or],
                     parse_comparison)
}

/// Parses comparisons and the prefix `not`.
///
/// `not` applies to a whole comparison, so `not a == b` is `not (a == b)`.
///
/// The rule is: `comparison := "not" comparison | arith (("==" | "!=" | "<" |
/// "<=" | ">" | ">=") arith)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    if let Some(not) = eat(tokens, &TokenKind::Not) {
        let operand = parse_comparison(tokens)?;
        let span = not.span.to(operand.span());
        return Ok(Node::UnaryOp { op: UnaryOperator::Not,
                                  operand: Box::new(operand),
                                  span });
    }

    binary_operation(tokens,
                     parse_arith,
                     &[BinaryOperator::Equal,
                       BinaryOperator::NotEqual,
                       BinaryOperator::Less,
                       BinaryOperator::LessEqual,
                       BinaryOperator::Greater,
                       BinaryOperator::GreaterEqual],
                     parse_arith)
}

/// Parses addition and subtraction expressions.
///
/// The rule is: `arith := term (("+" | "-") term)*`
pub fn parse_arith<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    binary_operation(tokens,
                     parse_term,
                     &[BinaryOperator::Add, BinaryOperator::Sub],
                     parse_term)
}

/// Parses multiplication and division expressions.
///
/// The rule is: `term := power (("*" | "/") power)*`
pub fn parse_term<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    binary_operation(tokens,
                     parse_power,
                     &[BinaryOperator::Mul, BinaryOperator::Div],
                     parse_power)
}

/// Parses exponentiation expressions.
///
/// Handles repeated exponentiation with right-associativity:
/// `a ^ b ^ c` parses as `a ^ (b ^ c)`. The right-hand side recurses into
/// this rule while the left-hand side is a unary expression, so `-2 ^ 2` is
/// `(-2) ^ 2`.
///
/// The rule is: `power := unary ("^" power)*`
pub fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    binary_operation(tokens, parse_unary, &[BinaryOperator::Pow], parse_power)
}

/// Folds a left-associative chain of binary operators.
///
/// Parses the left operand with `left_rule`, then, while the current token is
/// one of `operators`, consumes it and parses the right operand with
/// `right_rule`, folding both into a [`Node::BinaryOp`].
///
/// # Parameters
/// - `tokens`: Token stream.
/// - `left_rule`: Parses the first operand and every left operand.
/// - `operators`: The operators accepted at this level.
/// - `right_rule`: Parses every right operand.
fn binary_operation<'a, I>(tokens: &mut Peekable<I>,
                           left_rule: impl Fn(&mut Peekable<I>) -> ParseResult<Node>,
                           operators: &[BinaryOperator],
                           right_rule: impl Fn(&mut Peekable<I>) -> ParseResult<Node>)
                           -> ParseResult<Node>
    where I: Iterator<Item = &'a Token> + Clone
{
    let mut left = left_rule(tokens)?;
    loop {
        if let Some(token) = tokens.peek()
           && let Some(op) = token_to_binary_operator(&token.kind)
           && operators.contains(&op)
        {
            tokens.next();
            let right = right_rule(tokens)?;
            let span = left.span().to(right.span());
            left = Node::BinaryOp { left: Box::new(left),
                                    op,
                                    right: Box::new(right),
                                    span };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Converts a token into its corresponding binary operator, if applicable.
///
/// # Parameters
/// - `token`: The token kind to convert.
///
/// # Returns
/// `Some(BinaryOperator)` if the token represents a binary operator, or `None`
/// otherwise.
pub const fn token_to_binary_operator(token: &TokenKind) -> Option<BinaryOperator> {
    match token {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::Caret => Some(BinaryOperator::Pow),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::And => Some(BinaryOperator::And),
        TokenKind::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}
