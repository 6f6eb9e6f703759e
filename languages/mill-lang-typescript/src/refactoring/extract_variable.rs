//! Pull an expression out into a `const` declared above its statement

use super::{RefactoringOptions, Strategy, TransformResult, Transformation};
use crate::matcher::find_innermost;
use crate::tree::{AstNode, NodeId, SyntaxTree};
use mill_foundation::{EditorCommand, ErrorReason, Patch, Selection};
use swc_ecma_ast::{Callee, Expr, Stmt};
use tracing::debug;

pub struct ExtractVariable;

/// Whether the expression behind `id` can stand on its own as an initializer
fn is_extractable(tree: &SyntaxTree<'_>, id: NodeId, expr: &Expr) -> bool {
    let extractable_kind = matches!(
        expr,
        Expr::Lit(_)
            | Expr::Tpl(_)
            | Expr::TaggedTpl(_)
            | Expr::Array(_)
            | Expr::Object(_)
            | Expr::Call(_)
            | Expr::New(_)
            | Expr::Member(_)
            | Expr::OptChain(_)
            | Expr::Bin(_)
            | Expr::Unary(_)
            | Expr::Cond(_)
            | Expr::Arrow(_)
            | Expr::Fn(_)
            | Expr::Class(_)
            | Expr::Paren(_)
            | Expr::Await(_)
            | Expr::TsAs(_)
            | Expr::TsNonNull(_)
            | Expr::TsSatisfies(_)
    );
    if !extractable_kind {
        return false;
    }

    match tree.parent(id).map(|parent| tree.node(parent)) {
        // The whole expression of `foo();`
        Some(AstNode::Stmt(Stmt::Expr(_))) => false,
        Some(AstNode::Expr(Expr::Call(call))) => match &call.callee {
            Callee::Expr(callee) => !std::ptr::eq(&**callee, expr),
            _ => true,
        },
        Some(AstNode::Expr(Expr::New(new))) => !std::ptr::eq(&*new.callee, expr),
        Some(AstNode::Expr(Expr::TaggedTpl(tagged))) => !std::ptr::eq(&*tagged.tag, expr),
        _ => true,
    }
}

/// Statement the declaration goes in front of
///
/// `None` when a function, arrow or class member sits between the expression
/// and the nearest statement list, or when the expression belongs to a loop
/// outside of a block body: its head, test, update or a braceless body is
/// evaluated per iteration and may read the loop binding.
fn insertion_statement(tree: &SyntaxTree<'_>, id: NodeId) -> Option<NodeId> {
    let mut current = id;
    for ancestor in tree.ancestors(id) {
        let node = tree.node(ancestor);
        if node.is_statement_list() && tree.node(current).is_statement() {
            return Some(current);
        }
        if node.is_function_boundary() || node.is_loop() {
            return None;
        }
        current = ancestor;
    }
    None
}

struct Target {
    expression: NodeId,
    statement: NodeId,
}

fn find_target(tree: &SyntaxTree<'_>, selection: &Selection) -> Option<Target> {
    let expression = find_innermost(tree, selection, |id, node| match node {
        AstNode::Expr(expr) => is_extractable(tree, id, expr),
        _ => false,
    })?;
    let statement = insertion_statement(tree, expression)?;
    Some(Target {
        expression,
        statement,
    })
}

impl Strategy for ExtractVariable {
    const KEY: &'static str = "extractVariable";
    const TITLE: &'static str = "Extract Variable";
    const ACTION_MESSAGE: &'static str = "Extract variable";
    const IS_PREFERRED: bool = false;
    const ERROR_REASON: ErrorReason = ErrorReason::DidNotFoundExtractedCode;

    fn can_perform(tree: &SyntaxTree<'_>, selection: &Selection) -> bool {
        find_target(tree, selection).is_some()
    }

    fn transform(
        tree: &SyntaxTree<'_>,
        selection: &Selection,
        options: &RefactoringOptions,
    ) -> TransformResult {
        let target = find_target(tree, selection).ok_or(Self::ERROR_REASON)?;
        let name = &options.extracted_variable_name;

        let statement_start = tree.range(target.statement).start;
        let indent = tree.file().index().indentation_at(statement_start);
        let declaration = format!(
            "const {} = {};\n{}",
            name,
            tree.text(target.expression),
            indent
        );

        debug!(
            expression = tree.kind(target.expression),
            statement = tree.kind(target.statement),
            "Extracting variable"
        );

        Ok(Transformation::Patches {
            patches: vec![
                Patch::new(
                    declaration,
                    tree.selection(target.statement).collapse_to_start(),
                ),
                Patch::new(name.clone(), tree.selection(target.expression)),
            ],
            follow_up: Some(EditorCommand::RenameSymbol),
        })
    }
}
