//! Replace a property's primitive type with a defaulted type parameter

use super::{RefactoringOptions, Strategy, TransformResult, Transformation};
use crate::matcher::find_map_innermost;
use crate::tree::{AstNode, NodeId, SyntaxTree};
use mill_foundation::{ErrorReason, Selection};
use mill_lang_common::TextEdits;
use swc_ecma_ast::{
    DefaultDecl, Decl, Ident, ModuleDecl, TsKeywordTypeKind, TsType, TsTypeElement,
    TsTypeParamDecl,
};
use tracing::debug;

pub struct ExtractGenericType;

/// Declaration that receives the new type parameter
struct Owner<'a> {
    id: &'a Ident,
    type_params: Option<&'a TsTypeParamDecl>,
}

struct Target<'a> {
    type_node: NodeId,
    owner: Owner<'a>,
}

fn is_primitive(kind: TsKeywordTypeKind) -> bool {
    !matches!(
        kind,
        TsKeywordTypeKind::TsVoidKeyword
            | TsKeywordTypeKind::TsNeverKeyword
            | TsKeywordTypeKind::TsIntrinsicKeyword
    )
}

/// The keyword type annotating the property signature `id`
fn property_type(tree: &SyntaxTree<'_>, id: NodeId) -> Option<NodeId> {
    let AstNode::TsTypeElement(TsTypeElement::TsPropertySignature(_)) = tree.node(id) else {
        return None;
    };
    tree.children(id).iter().copied().find(|&child| {
        matches!(
            tree.node(child),
            AstNode::TsType(TsType::TsKeywordType(keyword)) if is_primitive(keyword.kind)
        )
    })
}

fn owner_of<'a>(tree: &SyntaxTree<'a>, id: NodeId) -> Option<Owner<'a>> {
    tree.ancestors(id).find_map(|ancestor| match tree.node(ancestor) {
        AstNode::ModuleDecl(ModuleDecl::ExportDefaultDecl(export)) => match &export.decl {
            DefaultDecl::TsInterfaceDecl(interface) => Some(Owner {
                id: &interface.id,
                type_params: interface.type_params.as_deref(),
            }),
            _ => None,
        },
        node => match node.as_decl()? {
            Decl::TsInterface(interface) => Some(Owner {
                id: &interface.id,
                type_params: interface.type_params.as_deref(),
            }),
            Decl::TsTypeAlias(alias) => Some(Owner {
                id: &alias.id,
                type_params: alias.type_params.as_deref(),
            }),
            _ => None,
        },
    })
}

fn find_target<'a>(tree: &SyntaxTree<'a>, selection: &Selection) -> Option<Target<'a>> {
    find_map_innermost(tree, selection, |id, _| {
        let type_node = property_type(tree, id)?;
        let owner = owner_of(tree, id)?;
        Some(Target { type_node, owner })
    })
}

/// `T`, or the first of `T1`, `T2`, ... not already declared
fn parameter_name(existing: Option<&TsTypeParamDecl>) -> String {
    let taken: Vec<&str> = existing
        .map(|decl| decl.params.iter().map(|param| &*param.name.sym).collect())
        .unwrap_or_default();
    std::iter::once("T".to_string())
        .chain((1..).map(|n| format!("T{}", n)))
        .find(|candidate| !taken.contains(&candidate.as_str()))
        .unwrap_or_else(|| "T".to_string())
}

impl Strategy for ExtractGenericType {
    const KEY: &'static str = "extractGenericType";
    const TITLE: &'static str = "Extract Generic Type";
    const ACTION_MESSAGE: &'static str = "Extract generic type";
    const IS_PREFERRED: bool = false;
    const ERROR_REASON: ErrorReason = ErrorReason::DidNotFoundTypeToExtract;

    fn can_perform(tree: &SyntaxTree<'_>, selection: &Selection) -> bool {
        find_target(tree, selection).is_some()
    }

    fn transform(
        tree: &SyntaxTree<'_>,
        selection: &Selection,
        _options: &RefactoringOptions,
    ) -> TransformResult {
        let target = find_target(tree, selection).ok_or(Self::ERROR_REASON)?;
        let file = tree.file();
        let name = parameter_name(target.owner.type_params);
        let concrete = tree.text(target.type_node);

        debug!(parameter = %name, default = concrete, "Extracting generic type");

        let mut edits = TextEdits::new();
        match target.owner.type_params {
            Some(params) => {
                // Just before the closing `>`
                let closing = file.range(params.span).end - 1;
                edits.insert(closing, format!(", {} = {}", name, concrete));
            }
            None => {
                let after_name = file.range(target.owner.id.span).end;
                edits.insert(after_name, format!("<{} = {}>", name, concrete));
            }
        }
        edits.replace(tree.range(target.type_node), name);

        Ok(Transformation::from_edits(tree, &edits, selection)?)
    }
}
