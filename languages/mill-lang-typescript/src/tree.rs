//! Source tree adapter over swc
//!
//! [`SourceFile`] owns a parsed module together with its text. A
//! [`SyntaxTree`] is a flat arena of the nodes refactorings care about,
//! borrowed from the `SourceFile`, with parent links and position ranges so
//! a selection can be matched against it without walking the AST again.

use mill_foundation::{MillError, MillResult, Position, Selection};
use mill_lang_common::LineIndex;
use std::ops::Range;
use std::path::{Path, PathBuf};
use swc_common::{sync::Lrc, BytePos, FileName, FilePathMapping, SourceMap, Span, Spanned};
use swc_ecma_ast::*;
use swc_ecma_codegen::{text_writer::JsWriter, Emitter};
use swc_ecma_parser::{error::SyntaxError, lexer::Lexer, Parser, StringInput, Syntax, TsSyntax};
use tracing::debug;

/// Grammar switches for the parser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    pub tsx: bool,
    pub decorators: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tsx: false,
            decorators: true,
        }
    }
}

impl ParseOptions {
    /// Enable TSX for `.tsx` and `.jsx` files
    pub fn for_path(mut self, path: &Path) -> Self {
        if matches!(
            path.extension().and_then(|ext| ext.to_str()),
            Some("tsx") | Some("jsx")
        ) {
            self.tsx = true;
        }
        self
    }
}

/// A parsed document
pub struct SourceFile {
    module: Module,
    index: LineIndex,
    start_pos: BytePos,
    cm: Lrc<SourceMap>,
}

impl SourceFile {
    /// Parse `code` as a TypeScript module
    ///
    /// Any syntax error, recoverable or not, fails the whole parse. The one
    /// exception is a `return` outside of a function: hosts hand over snippets
    /// cut from function bodies as often as whole modules.
    pub fn parse(code: &str, options: &ParseOptions) -> MillResult<Self> {
        let cm = Lrc::new(SourceMap::new(FilePathMapping::empty()));
        let file_name = Lrc::new(FileName::Real(PathBuf::from("input.ts")));
        let source_file = cm.new_source_file(file_name, code.to_string());
        let index = LineIndex::new(code);
        let start_pos = source_file.start_pos;

        let lexer = Lexer::new(
            Syntax::Typescript(TsSyntax {
                tsx: options.tsx,
                decorators: options.decorators,
                ..Default::default()
            }),
            Default::default(),
            StringInput::from(&*source_file),
            None,
        );
        let mut parser = Parser::new_from(lexer);
        let parsed = parser.parse_module();
        let recovered = parser.take_errors();

        let to_error = |error: swc_ecma_parser::error::Error| {
            let offset = error.span().lo.0.saturating_sub(start_pos.0) as usize;
            let position = index.position(offset);
            MillError::parse_at(error.kind().msg(), position.line, position.column)
        };

        let module = parsed.map_err(to_error)?;
        if let Some(error) = recovered
            .into_iter()
            .find(|error| !matches!(error.kind(), SyntaxError::ReturnNotAllowed))
        {
            return Err(to_error(error));
        }

        debug!(items = module.body.len(), "Parsed module");

        Ok(Self {
            module,
            index,
            start_pos,
            cm,
        })
    }

    pub fn code(&self) -> &str {
        self.index.text()
    }

    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn index(&self) -> &LineIndex {
        &self.index
    }

    /// Byte range of a span within [`Self::code`]
    pub fn range(&self, span: Span) -> Range<usize> {
        let len = self.code().len();
        let lo = (span.lo.0.saturating_sub(self.start_pos.0) as usize).min(len);
        let hi = (span.hi.0.saturating_sub(self.start_pos.0) as usize).clamp(lo, len);
        lo..hi
    }

    /// Source text covered by a span
    pub fn text(&self, span: Span) -> &str {
        &self.code()[self.range(span)]
    }

    /// Build the node arena
    pub fn tree(&self) -> SyntaxTree<'_> {
        let mut builder = TreeBuilder {
            file: self,
            nodes: Vec::new(),
        };
        builder.module(&self.module);
        SyntaxTree {
            file: self,
            nodes: builder.nodes,
        }
    }

    /// Render the module with the swc code generator
    ///
    /// Comments are dropped and formatting is normalised, so printing the
    /// re-parsed output gives the same text again.
    pub fn print(&self) -> MillResult<String> {
        let mut buf = vec![];
        {
            let mut emitter = Emitter {
                cfg: Default::default(),
                cm: self.cm.clone(),
                comments: None,
                wr: JsWriter::new(self.cm.clone(), "\n", &mut buf, None),
            };
            emitter
                .emit_module(&self.module)
                .map_err(|e| MillError::internal(format!("Failed to print module: {}", e)))?;
        }
        String::from_utf8(buf)
            .map_err(|e| MillError::internal(format!("Printed module is not UTF-8: {}", e)))
    }
}

/// Index of a node in a [`SyntaxTree`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Borrowed view of the AST construct behind a node
#[derive(Debug, Clone, Copy)]
pub enum AstNode<'a> {
    Module(&'a Module),
    ModuleDecl(&'a ModuleDecl),
    Stmt(&'a Stmt),
    /// A declaration that is not itself a statement, e.g. under `export`
    Decl(&'a Decl),
    /// A block that is not a statement: function bodies, `try`/`catch`/`finally`
    Block(&'a BlockStmt),
    Expr(&'a Expr),
    VarDeclarator(&'a VarDeclarator),
    Function(&'a Function),
    Class(&'a Class),
    ClassMember(&'a ClassMember),
    SwitchCase(&'a SwitchCase),
    CatchClause(&'a CatchClause),
    Prop(&'a Prop),
    Pat(&'a Pat),
    TsTypeElement(&'a TsTypeElement),
    TsType(&'a TsType),
}

impl<'a> AstNode<'a> {
    pub fn as_stmt(&self) -> Option<&'a Stmt> {
        match *self {
            AstNode::Stmt(stmt) => Some(stmt),
            _ => None,
        }
    }

    pub fn as_expr(&self) -> Option<&'a Expr> {
        match *self {
            AstNode::Expr(expr) => Some(expr),
            _ => None,
        }
    }

    pub fn as_if(&self) -> Option<&'a IfStmt> {
        match *self {
            AstNode::Stmt(Stmt::If(if_stmt)) => Some(if_stmt),
            _ => None,
        }
    }

    /// The declaration behind a `Stmt::Decl` or a bare declaration node
    pub fn as_decl(&self) -> Option<&'a Decl> {
        match *self {
            AstNode::Stmt(Stmt::Decl(decl)) | AstNode::Decl(decl) => Some(decl),
            _ => None,
        }
    }

    /// Statements, module items and declarations
    pub fn is_statement(&self) -> bool {
        matches!(
            self,
            AstNode::Stmt(_) | AstNode::ModuleDecl(_) | AstNode::Decl(_)
        )
    }

    /// Nodes whose children run as a sequence of statements
    pub fn is_statement_list(&self) -> bool {
        matches!(
            self,
            AstNode::Module(_)
                | AstNode::Stmt(Stmt::Block(_))
                | AstNode::Block(_)
                | AstNode::SwitchCase(_)
        )
    }

    /// Nodes that start a new function or class member scope
    pub fn is_function_boundary(&self) -> bool {
        matches!(
            self,
            AstNode::Function(_) | AstNode::Expr(Expr::Arrow(_)) | AstNode::ClassMember(_)
        )
    }

    pub fn is_loop(&self) -> bool {
        matches!(
            self,
            AstNode::Stmt(
                Stmt::For(_) | Stmt::ForIn(_) | Stmt::ForOf(_) | Stmt::While(_) | Stmt::DoWhile(_)
            )
        )
    }

    /// Stable kebab-case tag of the construct
    pub fn kind(&self) -> &'static str {
        match self {
            AstNode::Module(_) => "program",
            AstNode::ModuleDecl(decl) => match decl {
                ModuleDecl::Import(_) => "import-declaration",
                ModuleDecl::ExportDecl(_) => "export-declaration",
                ModuleDecl::ExportNamed(_) => "export-named-declaration",
                ModuleDecl::ExportDefaultDecl(_) | ModuleDecl::ExportDefaultExpr(_) => {
                    "export-default-declaration"
                }
                ModuleDecl::ExportAll(_) => "export-all-declaration",
                _ => "module-declaration",
            },
            AstNode::Stmt(stmt) => stmt_kind(stmt),
            AstNode::Decl(decl) => decl_kind(decl),
            AstNode::Block(_) => "block-statement",
            AstNode::Expr(expr) => expr_kind(expr),
            AstNode::VarDeclarator(_) => "variable-declarator",
            AstNode::Function(_) => "function",
            AstNode::Class(_) => "class-body",
            AstNode::ClassMember(member) => match member {
                ClassMember::Constructor(_) => "class-constructor",
                ClassMember::Method(_) | ClassMember::PrivateMethod(_) => "class-method",
                ClassMember::ClassProp(_) | ClassMember::PrivateProp(_) => "class-property",
                ClassMember::StaticBlock(_) => "static-block",
                _ => "class-member",
            },
            AstNode::SwitchCase(_) => "switch-case",
            AstNode::CatchClause(_) => "catch-clause",
            AstNode::Prop(prop) => match prop {
                Prop::Method(_) | Prop::Getter(_) | Prop::Setter(_) => "object-method",
                _ => "object-property",
            },
            AstNode::Pat(_) => "pattern",
            AstNode::TsTypeElement(element) => match element {
                TsTypeElement::TsPropertySignature(_) => "ts-property-signature",
                TsTypeElement::TsMethodSignature(_) => "ts-method-signature",
                TsTypeElement::TsIndexSignature(_) => "ts-index-signature",
                _ => "ts-type-element",
            },
            AstNode::TsType(ty) => match ty {
                TsType::TsKeywordType(_) => "ts-keyword-type",
                TsType::TsTypeLit(_) => "ts-type-literal",
                TsType::TsTypeRef(_) => "ts-type-reference",
                TsType::TsUnionOrIntersectionType(_) => "ts-union-type",
                TsType::TsArrayType(_) => "ts-array-type",
                _ => "ts-type",
            },
        }
    }
}

fn stmt_kind(stmt: &Stmt) -> &'static str {
    match stmt {
        Stmt::Block(_) => "block-statement",
        Stmt::Empty(_) => "empty-statement",
        Stmt::Debugger(_) => "debugger-statement",
        Stmt::With(_) => "with-statement",
        Stmt::Return(_) => "return-statement",
        Stmt::Labeled(_) => "labeled-statement",
        Stmt::Break(_) => "break-statement",
        Stmt::Continue(_) => "continue-statement",
        Stmt::If(_) => "if-statement",
        Stmt::Switch(_) => "switch-statement",
        Stmt::Throw(_) => "throw-statement",
        Stmt::Try(_) => "try-statement",
        Stmt::While(_) => "while-statement",
        Stmt::DoWhile(_) => "do-while-statement",
        Stmt::For(_) => "for-statement",
        Stmt::ForIn(_) => "for-in-statement",
        Stmt::ForOf(_) => "for-of-statement",
        Stmt::Decl(decl) => decl_kind(decl),
        Stmt::Expr(_) => "expression-statement",
        #[allow(unreachable_patterns)]
        _ => "statement",
    }
}

fn decl_kind(decl: &Decl) -> &'static str {
    match decl {
        Decl::Class(_) => "class-declaration",
        Decl::Fn(_) => "function-declaration",
        Decl::Var(_) => "variable-declaration",
        Decl::Using(_) => "using-declaration",
        Decl::TsInterface(_) => "ts-interface-declaration",
        Decl::TsTypeAlias(_) => "ts-type-alias-declaration",
        Decl::TsEnum(_) => "ts-enum-declaration",
        Decl::TsModule(_) => "ts-module-declaration",
        #[allow(unreachable_patterns)]
        _ => "declaration",
    }
}

fn expr_kind(expr: &Expr) -> &'static str {
    match expr {
        Expr::This(_) => "this-expression",
        Expr::Array(_) => "array-expression",
        Expr::Object(_) => "object-expression",
        Expr::Fn(_) => "function-expression",
        Expr::Unary(_) => "unary-expression",
        Expr::Update(_) => "update-expression",
        Expr::Bin(bin) if matches!(bin.op, BinaryOp::LogicalAnd | BinaryOp::LogicalOr) => {
            "logical-expression"
        }
        Expr::Bin(_) => "binary-expression",
        Expr::Assign(_) => "assignment-expression",
        Expr::Member(_) => "member-expression",
        Expr::Cond(_) => "conditional-expression",
        Expr::Call(_) => "call-expression",
        Expr::New(_) => "new-expression",
        Expr::Seq(_) => "sequence-expression",
        Expr::Ident(_) => "identifier",
        Expr::Lit(lit) => match lit {
            Lit::Str(_) => "string-literal",
            Lit::Num(_) => "numeric-literal",
            Lit::Bool(_) => "boolean-literal",
            Lit::Null(_) => "null-literal",
            Lit::Regex(_) => "regexp-literal",
            Lit::BigInt(_) => "bigint-literal",
            _ => "literal",
        },
        Expr::Tpl(_) => "template-literal",
        Expr::TaggedTpl(_) => "tagged-template-expression",
        Expr::Arrow(_) => "arrow-function-expression",
        Expr::Class(_) => "class-expression",
        Expr::Yield(_) => "yield-expression",
        Expr::Await(_) => "await-expression",
        Expr::Paren(_) => "parenthesized-expression",
        Expr::OptChain(_) => "optional-chain-expression",
        Expr::TsAs(_) => "ts-as-expression",
        Expr::TsNonNull(_) => "ts-non-null-expression",
        _ => "expression",
    }
}

/// One entry of the arena
#[derive(Debug, Clone)]
struct NodeData<'a> {
    node: AstNode<'a>,
    range: Range<usize>,
    selection: Selection,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena of syntax nodes in pre-order, the module at index 0
pub struct SyntaxTree<'a> {
    file: &'a SourceFile,
    nodes: Vec<NodeData<'a>>,
}

impl<'a> SyntaxTree<'a> {
    pub fn file(&self) -> &'a SourceFile {
        self.file
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> AstNode<'a> {
        self.nodes[id.index()].node
    }

    pub fn range(&self, id: NodeId) -> Range<usize> {
        self.nodes[id.index()].range.clone()
    }

    pub fn selection(&self, id: NodeId) -> Selection {
        self.nodes[id.index()].selection
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.index()].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.index()].children
    }

    pub fn kind(&self, id: NodeId) -> &'static str {
        self.node(id).kind()
    }

    pub fn text(&self, id: NodeId) -> &'a str {
        let range = self.range(id);
        &self.file.code()[range]
    }

    /// Strict ancestors, innermost first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// Every node the selection is inside of, innermost first
    pub fn nodes_containing(&self, selection: &Selection) -> Vec<NodeId> {
        let mut found: Vec<NodeId> = (0..self.nodes.len())
            .map(|i| NodeId(i as u32))
            .filter(|&id| selection.is_inside(&self.selection(id)))
            .collect();
        found.sort_by_key(|&id| (self.range(id).len(), std::cmp::Reverse(id)));
        found
    }

    /// Innermost node containing `position`, ignoring the module itself
    ///
    /// Positions in comments or blank space between statements give `None`.
    pub fn find_node_at(&self, position: Position) -> Option<NodeId> {
        self.nodes_containing(&Selection::cursor_at_position(position))
            .into_iter()
            .find(|&id| id != self.root())
    }
}

struct TreeBuilder<'a> {
    file: &'a SourceFile,
    nodes: Vec<NodeData<'a>>,
}

impl<'a> TreeBuilder<'a> {
    fn push(&mut self, node: AstNode<'a>, range: Range<usize>, parent: Option<NodeId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        let selection = self.file.index().selection(range.clone());
        self.nodes.push(NodeData {
            node,
            range,
            selection,
            parent,
            children: Vec::new(),
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    fn add(&mut self, node: AstNode<'a>, span: Span, parent: NodeId) -> NodeId {
        let range = self.file.range(span);
        self.push(node, range, Some(parent))
    }

    fn module(&mut self, module: &'a Module) {
        let root = self.push(AstNode::Module(module), 0..self.file.code().len(), None);
        for item in &module.body {
            match item {
                ModuleItem::Stmt(stmt) => self.stmt(stmt, root),
                ModuleItem::ModuleDecl(decl) => self.module_decl(decl, root),
            }
        }
    }

    fn module_decl(&mut self, decl: &'a ModuleDecl, parent: NodeId) {
        let id = self.add(AstNode::ModuleDecl(decl), decl.span(), parent);
        match decl {
            ModuleDecl::ExportDecl(export) => {
                let decl_id = self.add(AstNode::Decl(&export.decl), export.decl.span(), id);
                self.decl(&export.decl, decl_id);
            }
            ModuleDecl::ExportDefaultDecl(export) => match &export.decl {
                DefaultDecl::Class(class) => self.class(&class.class, id),
                DefaultDecl::Fn(function) => self.function(&function.function, id),
                DefaultDecl::TsInterfaceDecl(interface) => self.interface(interface, id),
            },
            ModuleDecl::ExportDefaultExpr(export) => self.expr(&export.expr, id),
            ModuleDecl::TsExportAssignment(export) => self.expr(&export.expr, id),
            _ => {}
        }
    }

    fn stmts(&mut self, stmts: &'a [Stmt], parent: NodeId) {
        for stmt in stmts {
            self.stmt(stmt, parent);
        }
    }

    fn block(&mut self, block: &'a BlockStmt, parent: NodeId) {
        let id = self.add(AstNode::Block(block), block.span, parent);
        self.stmts(&block.stmts, id);
    }

    fn stmt(&mut self, stmt: &'a Stmt, parent: NodeId) {
        let id = self.add(AstNode::Stmt(stmt), stmt.span(), parent);
        match stmt {
            Stmt::Block(block) => self.stmts(&block.stmts, id),
            Stmt::With(with) => {
                self.expr(&with.obj, id);
                self.stmt(&with.body, id);
            }
            Stmt::Return(ret) => self.opt_expr(ret.arg.as_deref(), id),
            Stmt::Labeled(labeled) => self.stmt(&labeled.body, id),
            Stmt::If(if_stmt) => {
                self.expr(&if_stmt.test, id);
                self.stmt(&if_stmt.cons, id);
                if let Some(alt) = &if_stmt.alt {
                    self.stmt(alt, id);
                }
            }
            Stmt::Switch(switch) => {
                self.expr(&switch.discriminant, id);
                for case in &switch.cases {
                    let case_id = self.add(AstNode::SwitchCase(case), case.span, id);
                    self.opt_expr(case.test.as_deref(), case_id);
                    self.stmts(&case.cons, case_id);
                }
            }
            Stmt::Throw(throw) => self.expr(&throw.arg, id),
            Stmt::Try(try_stmt) => {
                self.block(&try_stmt.block, id);
                if let Some(handler) = &try_stmt.handler {
                    let catch_id = self.add(AstNode::CatchClause(handler), handler.span, id);
                    self.block(&handler.body, catch_id);
                }
                if let Some(finalizer) = &try_stmt.finalizer {
                    self.block(finalizer, id);
                }
            }
            Stmt::While(while_stmt) => {
                self.expr(&while_stmt.test, id);
                self.stmt(&while_stmt.body, id);
            }
            Stmt::DoWhile(do_while) => {
                self.stmt(&do_while.body, id);
                self.expr(&do_while.test, id);
            }
            Stmt::For(for_stmt) => {
                match &for_stmt.init {
                    Some(VarDeclOrExpr::VarDecl(var)) => self.var_decl(var, id),
                    Some(VarDeclOrExpr::Expr(expr)) => self.expr(expr, id),
                    None => {}
                }
                self.opt_expr(for_stmt.test.as_deref(), id);
                self.opt_expr(for_stmt.update.as_deref(), id);
                self.stmt(&for_stmt.body, id);
            }
            Stmt::ForIn(for_in) => {
                self.for_head(&for_in.left, id);
                self.expr(&for_in.right, id);
                self.stmt(&for_in.body, id);
            }
            Stmt::ForOf(for_of) => {
                self.for_head(&for_of.left, id);
                self.expr(&for_of.right, id);
                self.stmt(&for_of.body, id);
            }
            Stmt::Decl(decl) => self.decl(decl, id),
            Stmt::Expr(expr_stmt) => self.expr(&expr_stmt.expr, id),
            _ => {}
        }
    }

    fn for_head(&mut self, head: &'a ForHead, parent: NodeId) {
        if let ForHead::VarDecl(var) = head {
            self.var_decl(var, parent);
        }
    }

    fn decl(&mut self, decl: &'a Decl, parent: NodeId) {
        match decl {
            Decl::Class(class) => self.class(&class.class, parent),
            Decl::Fn(function) => self.function(&function.function, parent),
            Decl::Var(var) => self.var_decl(var, parent),
            Decl::TsInterface(interface) => self.interface(interface, parent),
            Decl::TsTypeAlias(alias) => self.ts_type(&alias.type_ann, parent),
            _ => {}
        }
    }

    fn var_decl(&mut self, var: &'a VarDecl, parent: NodeId) {
        for declarator in &var.decls {
            let id = self.add(AstNode::VarDeclarator(declarator), declarator.span, parent);
            self.opt_expr(declarator.init.as_deref(), id);
        }
    }

    fn interface(&mut self, interface: &'a TsInterfaceDecl, parent: NodeId) {
        for element in &interface.body.body {
            self.ts_type_element(element, parent);
        }
    }

    fn ts_type_element(&mut self, element: &'a TsTypeElement, parent: NodeId) {
        let id = self.add(AstNode::TsTypeElement(element), element.span(), parent);
        if let TsTypeElement::TsPropertySignature(property) = element {
            if let Some(annotation) = &property.type_ann {
                self.ts_type(&annotation.type_ann, id);
            }
        }
    }

    fn ts_type(&mut self, ty: &'a TsType, parent: NodeId) {
        let id = self.add(AstNode::TsType(ty), ty.span(), parent);
        if let TsType::TsTypeLit(literal) = ty {
            for element in &literal.members {
                self.ts_type_element(element, id);
            }
        }
    }

    fn function(&mut self, function: &'a Function, parent: NodeId) {
        let id = self.add(AstNode::Function(function), function.span, parent);
        for param in &function.params {
            self.pat(&param.pat, id);
        }
        if let Some(body) = &function.body {
            self.block(body, id);
        }
    }

    fn pat(&mut self, pat: &'a Pat, parent: NodeId) {
        let id = self.add(AstNode::Pat(pat), pat.span(), parent);
        if let Pat::Assign(assign) = pat {
            self.expr(&assign.right, id);
        }
    }

    fn class(&mut self, class: &'a Class, parent: NodeId) {
        let id = self.add(AstNode::Class(class), class.span, parent);
        for member in &class.body {
            let member_id = self.add(AstNode::ClassMember(member), member.span(), id);
            match member {
                ClassMember::Constructor(constructor) => {
                    if let Some(body) = &constructor.body {
                        self.block(body, member_id);
                    }
                }
                ClassMember::Method(method) => self.function(&method.function, member_id),
                ClassMember::PrivateMethod(method) => self.function(&method.function, member_id),
                ClassMember::ClassProp(prop) => self.opt_expr(prop.value.as_deref(), member_id),
                ClassMember::PrivateProp(prop) => self.opt_expr(prop.value.as_deref(), member_id),
                ClassMember::StaticBlock(block) => self.block(&block.body, member_id),
                _ => {}
            }
        }
    }

    fn opt_expr(&mut self, expr: Option<&'a Expr>, parent: NodeId) {
        if let Some(expr) = expr {
            self.expr(expr, parent);
        }
    }

    fn args(&mut self, args: &'a [ExprOrSpread], parent: NodeId) {
        for arg in args {
            self.expr(&arg.expr, parent);
        }
    }

    fn expr(&mut self, expr: &'a Expr, parent: NodeId) {
        let id = self.add(AstNode::Expr(expr), expr.span(), parent);
        match expr {
            Expr::Array(array) => {
                for element in array.elems.iter().flatten() {
                    self.expr(&element.expr, id);
                }
            }
            Expr::Object(object) => {
                for prop in &object.props {
                    match prop {
                        PropOrSpread::Spread(spread) => self.expr(&spread.expr, id),
                        PropOrSpread::Prop(prop) => self.prop(prop, id),
                    }
                }
            }
            Expr::Fn(function) => self.function(&function.function, id),
            Expr::Unary(unary) => self.expr(&unary.arg, id),
            Expr::Update(update) => self.expr(&update.arg, id),
            Expr::Bin(bin) => {
                self.expr(&bin.left, id);
                self.expr(&bin.right, id);
            }
            Expr::Assign(assign) => self.expr(&assign.right, id),
            Expr::Member(member) => self.member(member, id),
            Expr::Cond(cond) => {
                self.expr(&cond.test, id);
                self.expr(&cond.cons, id);
                self.expr(&cond.alt, id);
            }
            Expr::Call(call) => {
                if let Callee::Expr(callee) = &call.callee {
                    self.expr(callee, id);
                }
                self.args(&call.args, id);
            }
            Expr::New(new) => {
                self.expr(&new.callee, id);
                if let Some(args) = &new.args {
                    self.args(args, id);
                }
            }
            Expr::Seq(seq) => {
                for expr in &seq.exprs {
                    self.expr(expr, id);
                }
            }
            Expr::Tpl(tpl) => {
                for expr in &tpl.exprs {
                    self.expr(expr, id);
                }
            }
            Expr::TaggedTpl(tagged) => {
                self.expr(&tagged.tag, id);
                for expr in &tagged.tpl.exprs {
                    self.expr(expr, id);
                }
            }
            Expr::Arrow(arrow) => {
                for param in &arrow.params {
                    self.pat(param, id);
                }
                match &*arrow.body {
                    BlockStmtOrExpr::BlockStmt(block) => self.block(block, id),
                    BlockStmtOrExpr::Expr(body) => self.expr(body, id),
                }
            }
            Expr::Class(class) => self.class(&class.class, id),
            Expr::Yield(yield_expr) => self.opt_expr(yield_expr.arg.as_deref(), id),
            Expr::Await(await_expr) => self.expr(&await_expr.arg, id),
            Expr::Paren(paren) => self.expr(&paren.expr, id),
            Expr::TsAs(as_expr) => self.expr(&as_expr.expr, id),
            Expr::TsNonNull(non_null) => self.expr(&non_null.expr, id),
            Expr::TsSatisfies(satisfies) => self.expr(&satisfies.expr, id),
            Expr::TsTypeAssertion(assertion) => self.expr(&assertion.expr, id),
            Expr::TsConstAssertion(assertion) => self.expr(&assertion.expr, id),
            Expr::TsInstantiation(instantiation) => self.expr(&instantiation.expr, id),
            Expr::OptChain(chain) => match &*chain.base {
                OptChainBase::Member(member) => self.member(member, id),
                OptChainBase::Call(call) => {
                    self.expr(&call.callee, id);
                    self.args(&call.args, id);
                }
            },
            _ => {}
        }
    }

    fn member(&mut self, member: &'a MemberExpr, parent: NodeId) {
        self.expr(&member.obj, parent);
        if let MemberProp::Computed(computed) = &member.prop {
            self.expr(&computed.expr, parent);
        }
    }

    fn prop(&mut self, prop: &'a Prop, parent: NodeId) {
        let id = self.add(AstNode::Prop(prop), prop.span(), parent);
        match prop {
            Prop::KeyValue(key_value) => self.expr(&key_value.value, id),
            Prop::Assign(assign) => self.expr(&assign.value, id),
            Prop::Method(method) => self.function(&method.function, id),
            Prop::Getter(getter) => {
                if let Some(body) = &getter.body {
                    self.block(body, id);
                }
            }
            Prop::Setter(setter) => {
                if let Some(body) = &setter.body {
                    self.block(body, id);
                }
            }
            _ => {}
        }
    }
}
