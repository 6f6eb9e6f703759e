//! Wrap the single-statement body of an `if` or `else` in a block

use super::{
    whitespace_end, whitespace_start, RefactoringOptions, Strategy, TransformResult,
    Transformation,
};
use crate::matcher::find_map_innermost;
use crate::tree::SyntaxTree;
use mill_foundation::{ErrorReason, Selection};
use mill_lang_common::TextEdits;
use swc_common::Spanned;
use swc_ecma_ast::{IfStmt, Stmt};
use tracing::debug;

pub struct AddBracesToIfStatement;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Consequent,
    Alternate,
}

struct Target<'a> {
    if_stmt: &'a IfStmt,
    side: Side,
    body: &'a Stmt,
}

/// Innermost `if` whose targeted side lacks braces
///
/// The alternate is targeted once the selection starts at or after the end
/// of the consequent, i.e. on the `else` keyword or in the else body.
fn find_target<'a>(tree: &SyntaxTree<'a>, selection: &Selection) -> Option<Target<'a>> {
    let file = tree.file();

    find_map_innermost(tree, selection, |_, node| {
        let if_stmt = node.as_if()?;
        let consequent = file.index().selection(file.range(if_stmt.cons.span()));
        let consequent_end = Selection::cursor_at_position(consequent.end());
        let (side, body) = match if_stmt.alt.as_deref() {
            Some(alt) if !selection.starts_before(&consequent_end) => (Side::Alternate, alt),
            _ => (Side::Consequent, &*if_stmt.cons),
        };
        match (side, body) {
            (_, Stmt::Block(_)) => None,
            // `else if` chains keep their shape
            (Side::Alternate, Stmt::If(_)) => None,
            _ => Some(Target {
                if_stmt,
                side,
                body,
            }),
        }
    })
}

impl Strategy for AddBracesToIfStatement {
    const KEY: &'static str = "addBracesToIfStatement";
    const TITLE: &'static str = "Add Braces to If Statement";
    const ACTION_MESSAGE: &'static str = "Add braces to if statement";
    const IS_PREFERRED: bool = false;
    const ERROR_REASON: ErrorReason = ErrorReason::DidNotFoundIfStatementToAddBraces;

    fn can_perform(tree: &SyntaxTree<'_>, selection: &Selection) -> bool {
        find_target(tree, selection).is_some()
    }

    fn transform(
        tree: &SyntaxTree<'_>,
        selection: &Selection,
        options: &RefactoringOptions,
    ) -> TransformResult {
        let target = find_target(tree, selection).ok_or(Self::ERROR_REASON)?;
        let file = tree.file();
        let code = file.code();

        let if_range = file.range(target.if_stmt.span);
        let body_range = file.range(target.body.span());
        let indent = file.index().indentation_at(if_range.start);
        let unit = options.indent_unit(code);

        debug!(side = ?target.side, start = if_range.start, "Adding braces");

        let mut edits = TextEdits::new();
        edits.replace(
            whitespace_start(code, body_range.start)..body_range.start,
            format!(" {{\n{}{}", indent, unit),
        );
        if target.side == Side::Consequent && target.if_stmt.alt.is_some() {
            // `} else` on one line
            edits.replace(
                body_range.end..whitespace_end(code, body_range.end),
                format!("\n{}}} ", indent),
            );
        } else {
            edits.insert(body_range.end, format!("\n{}}}", indent));
        }

        Ok(Transformation::from_edits(tree, &edits, selection)?)
    }
}
