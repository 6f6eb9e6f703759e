//! Turn an `if`/`else if` chain of equality tests into a `switch`

use super::{RefactoringOptions, Strategy, TransformResult, Transformation};
use crate::matcher::find_map_innermost;
use crate::tree::SyntaxTree;
use mill_foundation::{ErrorReason, Selection};
use mill_lang_common::{reindent, TextEdits};
use swc_common::{EqIgnoreSpan, Spanned};
use swc_ecma_ast::{BinaryOp, Expr, IfStmt, Stmt};
use tracing::debug;

pub struct ConvertIfElseToSwitch;

struct Branch<'a> {
    /// `None` for the final `else`
    test: Option<&'a Expr>,
    body: &'a Stmt,
}

struct Chain<'a> {
    head: &'a IfStmt,
    discriminant: &'a Expr,
    branches: Vec<Branch<'a>>,
}

/// Split `a === "x"` or `"x" == a` into discriminant and case value
fn equality_test(test: &Expr) -> Option<(&Expr, &Expr)> {
    let Expr::Bin(bin) = test else {
        return None;
    };
    if !matches!(bin.op, BinaryOp::EqEqEq | BinaryOp::EqEq) {
        return None;
    }
    match (is_case_value(&bin.left), is_case_value(&bin.right)) {
        (false, true) => Some((&*bin.left, &*bin.right)),
        (true, false) => Some((&*bin.right, &*bin.left)),
        _ => None,
    }
}

fn is_case_value(expr: &Expr) -> bool {
    match expr {
        Expr::Lit(_) => true,
        Expr::Tpl(tpl) => tpl.exprs.is_empty(),
        _ => false,
    }
}

/// The whole chain starting at `head`, if every test compares one discriminant
fn chain_of(head: &IfStmt) -> Option<Chain<'_>> {
    let mut discriminant: Option<&Expr> = None;
    let mut branches = Vec::new();
    let mut current = head;
    loop {
        let (subject, value) = equality_test(&current.test)?;
        match discriminant {
            None => discriminant = Some(subject),
            Some(existing) if existing.eq_ignore_span(subject) => {}
            Some(_) => return None,
        }
        branches.push(Branch {
            test: Some(value),
            body: &current.cons,
        });
        match current.alt.as_deref() {
            Some(Stmt::If(next)) => current = next,
            Some(otherwise) => {
                branches.push(Branch {
                    test: None,
                    body: otherwise,
                });
                break;
            }
            None => break,
        }
    }
    Some(Chain {
        head,
        discriminant: discriminant?,
        branches,
    })
}

/// Control never falls out of `stmt`
fn terminates(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Return(_) | Stmt::Throw(_) => true,
        Stmt::Block(block) => block.stmts.iter().any(terminates),
        Stmt::If(if_stmt) => {
            terminates(&if_stmt.cons) && if_stmt.alt.as_deref().is_some_and(terminates)
        }
        _ => false,
    }
}

fn statements(body: &Stmt) -> &[Stmt] {
    match body {
        Stmt::Block(block) => &block.stmts,
        single => std::slice::from_ref(single),
    }
}

fn find_chain<'a>(tree: &SyntaxTree<'a>, selection: &Selection) -> Option<Chain<'a>> {
    find_map_innermost(tree, selection, |id, node| {
        let if_stmt = node.as_if()?;
        let stmt = node.as_stmt()?;
        // `else if` belongs to the chain of its parent
        let is_alternate = tree
            .parent(id)
            .and_then(|parent| tree.node(parent).as_if())
            .and_then(|parent| parent.alt.as_deref())
            .is_some_and(|alt| std::ptr::eq(alt, stmt));
        if is_alternate {
            return None;
        }
        chain_of(if_stmt)
    })
}

impl Strategy for ConvertIfElseToSwitch {
    const KEY: &'static str = "convertIfElseToSwitch";
    const TITLE: &'static str = "Convert If/Else to Switch";
    const ACTION_MESSAGE: &'static str = "Convert if/else to switch";
    const IS_PREFERRED: bool = true;
    const ERROR_REASON: ErrorReason = ErrorReason::DidNotFoundIfElseToConvert;

    fn can_perform(tree: &SyntaxTree<'_>, selection: &Selection) -> bool {
        find_chain(tree, selection).is_some()
    }

    fn transform(
        tree: &SyntaxTree<'_>,
        selection: &Selection,
        options: &RefactoringOptions,
    ) -> TransformResult {
        let chain = find_chain(tree, selection).ok_or(Self::ERROR_REASON)?;
        let file = tree.file();
        let code = file.code();
        let index = file.index();

        let head_range = file.range(chain.head.span);
        let indent = index.indentation_at(head_range.start);
        let body_indent = format!("{}{}", indent, options.indent_unit(code));
        let add_breaks = !chain.branches.iter().all(|branch| terminates(branch.body));

        debug!(
            cases = chain.branches.len(),
            add_breaks, "Converting if/else chain to switch"
        );

        let mut switch = format!("switch ({}) {{\n", file.text(chain.discriminant.span()));
        for branch in &chain.branches {
            match branch.test {
                Some(value) => {
                    switch.push_str(&format!("{}case {}:\n", indent, file.text(value.span())))
                }
                None => switch.push_str(&format!("{}default:\n", indent)),
            }
            for stmt in statements(branch.body) {
                let range = file.range(stmt.span());
                let original_indent = index.indentation_at(range.start);
                switch.push_str(&body_indent);
                switch.push_str(&reindent(&code[range], original_indent, &body_indent));
                switch.push('\n');
            }
            if add_breaks {
                switch.push_str(&format!("{}break;\n", body_indent));
            }
        }
        switch.push_str(indent);
        switch.push('}');

        let mut edits = TextEdits::new();
        edits.replace(head_range, switch);
        Ok(Transformation::from_edits(tree, &edits, selection)?)
    }
}
