//! AST evaluation over checked operator arithmetic.

use crate::core::parser::{AstNode, Parser};
use crate::core::CalcResult;

/// Evaluates a parsed expression tree.
pub fn evaluate(node: &AstNode) -> CalcResult<f64> {
    match node {
        AstNode::Number(n) => Ok(*n),
        AstNode::Negate(inner) => Ok(-evaluate(inner)?),
        AstNode::BinaryOp { left, op, right } => {
            let lhs = evaluate(left)?;
            let rhs = evaluate(right)?;
            op.apply(lhs, rhs)
        }
    }
}

/// Parses and evaluates an expression string.
pub fn evaluate_str(input: &str) -> CalcResult<f64> {
    let ast = Parser::parse_str(input)?;
    evaluate(&ast)
}
