//! Invert a conditional expression's test and swap its branches

use super::{RefactoringOptions, Strategy, TransformResult, Transformation};
use crate::matcher::find_map_innermost;
use crate::tree::{AstNode, SourceFile, SyntaxTree};
use mill_foundation::{ErrorReason, MillError, MillResult, Selection};
use mill_lang_common::TextEdits;
use swc_common::Spanned;
use swc_ecma_ast::{BinExpr, BinaryOp, CondExpr, Expr, UnaryOp};
use tracing::debug;

pub struct FlipTernary;

fn find_ternary<'a>(tree: &SyntaxTree<'a>, selection: &Selection) -> Option<&'a CondExpr> {
    find_map_innermost(tree, selection, |_, node| match node {
        AstNode::Expr(Expr::Cond(cond)) => Some(cond),
        _ => None,
    })
}

fn negated_operator(op: BinaryOp) -> Option<(&'static str, &'static str)> {
    match op {
        BinaryOp::EqEqEq => Some(("===", "!==")),
        BinaryOp::NotEqEq => Some(("!==", "===")),
        BinaryOp::EqEq => Some(("==", "!=")),
        BinaryOp::NotEq => Some(("!=", "==")),
        _ => None,
    }
}

/// Swap the operator token of an (in)equality test, keeping both operands as written
fn flip_equality(file: &SourceFile, bin: &BinExpr, from: &str, to: &str) -> MillResult<String> {
    let whole = file.range(bin.span);
    let gap = file.range(bin.left.span()).end..file.range(bin.right.span()).start;
    let code = file.code();
    let operator = code[gap.clone()]
        .find(from)
        .map(|at| gap.start + at)
        .ok_or_else(|| {
            MillError::internal(format!("No `{}` between the operands of a comparison", from))
        })?;
    Ok(format!(
        "{}{}{}",
        &code[whole.start..operator],
        to,
        &code[operator + from.len()..whole.end]
    ))
}

/// Source text of the logical negation of `test`
fn negate(file: &SourceFile, test: &Expr) -> MillResult<String> {
    let text = file.text(test.span());
    match test {
        Expr::Unary(unary) if unary.op == UnaryOp::Bang => match &*unary.arg {
            Expr::Paren(paren)
                if !matches!(
                    &*paren.expr,
                    Expr::Assign(_) | Expr::Seq(_) | Expr::Arrow(_) | Expr::Yield(_) | Expr::Cond(_)
                ) =>
            {
                Ok(file.text(paren.expr.span()).to_string())
            }
            arg => Ok(file.text(arg.span()).to_string()),
        },
        Expr::Bin(bin) => match negated_operator(bin.op) {
            Some((from, to)) => flip_equality(file, bin, from, to),
            None => Ok(format!("!({})", text)),
        },
        Expr::Ident(_)
        | Expr::Member(_)
        | Expr::Call(_)
        | Expr::OptChain(_)
        | Expr::Paren(_)
        | Expr::This(_)
        | Expr::Lit(_) => Ok(format!("!{}", text)),
        _ => Ok(format!("!({})", text)),
    }
}

impl Strategy for FlipTernary {
    const KEY: &'static str = "flipTernary";
    const TITLE: &'static str = "Flip Ternary";
    const ACTION_MESSAGE: &'static str = "Flip ternary";
    const IS_PREFERRED: bool = true;
    const ERROR_REASON: ErrorReason = ErrorReason::DidNotFoundTernaryToFlip;

    fn can_perform(tree: &SyntaxTree<'_>, selection: &Selection) -> bool {
        find_ternary(tree, selection).is_some()
    }

    fn transform(
        tree: &SyntaxTree<'_>,
        selection: &Selection,
        _options: &RefactoringOptions,
    ) -> TransformResult {
        let ternary = find_ternary(tree, selection).ok_or(Self::ERROR_REASON)?;
        let file = tree.file();

        let test = negate(file, &ternary.test)?;
        debug!(test = %test, "Flipping ternary");

        let mut edits = TextEdits::new();
        edits
            .replace(file.range(ternary.test.span()), test)
            .replace(file.range(ternary.cons.span()), file.text(ternary.alt.span()))
            .replace(file.range(ternary.alt.span()), file.text(ternary.cons.span()));

        Ok(Transformation::from_edits(tree, &edits, selection)?)
    }
}
