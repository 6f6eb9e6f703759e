//! TypeScript/JavaScript refactoring engine
//!
//! Parses a document with swc, finds the node a selection points at and
//! rewrites it. The pipeline for one invocation lives in [`orchestrator`]:
//!
//! ```text
//! code + selection -> SourceFile::parse -> SyntaxTree -> Refactoring::can_perform
//!     -> Refactoring::transform -> Editor::write / Editor::apply
//! ```

pub mod matcher;
pub mod orchestrator;
pub mod refactoring;
pub mod tree;

pub use orchestrator::{available_actions, execute, plan, run, Outcome};
pub use refactoring::{Failure, Refactoring, RefactoringOptions, Strategy, Transformation};
pub use tree::{AstNode, NodeId, ParseOptions, SourceFile, SyntaxTree};
