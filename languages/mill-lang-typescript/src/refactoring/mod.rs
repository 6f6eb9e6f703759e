//! Refactoring strategies and their registry
//!
//! Each refactoring is a zero-sized type implementing [`Strategy`]. The
//! closed [`Refactoring`] enum dispatches to them and carries the metadata a
//! host needs for its command palette and code actions.

mod add_braces_to_if_statement;
mod convert_if_else_to_switch;
mod extract_generic_type;
mod extract_variable;
mod flip_ternary;

pub use add_braces_to_if_statement::AddBracesToIfStatement;
pub use convert_if_else_to_switch::ConvertIfElseToSwitch;
pub use extract_generic_type::ExtractGenericType;
pub use extract_variable::ExtractVariable;
pub use flip_ternary::FlipTernary;

use crate::tree::{ParseOptions, SyntaxTree};
use mill_config::AppConfig;
use mill_foundation::{Code, EditorCommand, ErrorReason, MillError, MillResult, Patch, Selection};
use mill_lang_common::TextEdits;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// What a successful refactoring produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transformation {
    /// The whole new document and where the selection goes
    Document { code: Code, selection: Selection },
    /// Patches against the original document, then an optional host command
    Patches {
        patches: Vec<Patch>,
        follow_up: Option<EditorCommand>,
    },
}

impl Transformation {
    /// Apply span edits to the tree's document, carrying `selection` along
    pub fn from_edits(
        tree: &SyntaxTree<'_>,
        edits: &TextEdits,
        selection: &Selection,
    ) -> MillResult<Self> {
        let (code, selection) = edits.apply_with_selection(tree.file().index(), selection)?;
        Ok(Transformation::Document { code, selection })
    }
}

/// Why a transformation did not happen
#[derive(Debug)]
pub enum Failure {
    /// Nothing under the selection to refactor; reported to the user
    NotApplicable(ErrorReason),
    /// A broken invariant while building the result
    Fault(MillError),
}

impl Failure {
    pub fn reason(&self) -> Option<ErrorReason> {
        match self {
            Failure::NotApplicable(reason) => Some(*reason),
            Failure::Fault(_) => None,
        }
    }
}

impl From<ErrorReason> for Failure {
    fn from(reason: ErrorReason) -> Self {
        Failure::NotApplicable(reason)
    }
}

impl From<MillError> for Failure {
    fn from(error: MillError) -> Self {
        Failure::Fault(error)
    }
}

pub type TransformResult = Result<Transformation, Failure>;

/// Settings that shape generated code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefactoringOptions {
    pub extracted_variable_name: String,
    pub indent_width: usize,
    pub validate_output: bool,
    pub parse: ParseOptions,
}

impl Default for RefactoringOptions {
    fn default() -> Self {
        Self::from(&AppConfig::default())
    }
}

impl From<&AppConfig> for RefactoringOptions {
    fn from(config: &AppConfig) -> Self {
        Self {
            extracted_variable_name: config.refactoring.extracted_variable_name.clone(),
            indent_width: config.refactoring.indent_width,
            validate_output: config.refactoring.validate_output,
            parse: ParseOptions {
                tsx: config.parser.tsx,
                decorators: config.parser.decorators,
            },
        }
    }
}

impl RefactoringOptions {
    /// One level of indentation in generated code
    pub fn indent_unit(&self, code: &str) -> String {
        mill_lang_common::IndentationDetector::unit(code, self.indent_width)
    }
}

/// Start of the whitespace run that ends at `offset`
pub(crate) fn whitespace_start(code: &str, offset: usize) -> usize {
    code[..offset].trim_end().len()
}

/// End of the whitespace run that starts at `offset`
pub(crate) fn whitespace_end(code: &str, offset: usize) -> usize {
    code.len() - code[offset..].trim_start().len()
}

/// A single refactoring
///
/// `can_perform` must be cheap and side-effect free: hosts call it on every
/// selection change to decide which actions to offer.
pub trait Strategy {
    const KEY: &'static str;
    const TITLE: &'static str;
    const ACTION_MESSAGE: &'static str;
    const IS_PREFERRED: bool;
    const ERROR_REASON: ErrorReason;

    fn can_perform(tree: &SyntaxTree<'_>, selection: &Selection) -> bool;

    fn transform(
        tree: &SyntaxTree<'_>,
        selection: &Selection,
        options: &RefactoringOptions,
    ) -> TransformResult;
}

/// Every refactoring the engine knows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Refactoring {
    AddBracesToIfStatement,
    ConvertIfElseToSwitch,
    ExtractVariable,
    ExtractGenericType,
    FlipTernary,
}

macro_rules! dispatch {
    ($refactoring:expr, $strategy:ident => $body:expr) => {
        match $refactoring {
            Refactoring::AddBracesToIfStatement => {
                type $strategy = AddBracesToIfStatement;
                $body
            }
            Refactoring::ConvertIfElseToSwitch => {
                type $strategy = ConvertIfElseToSwitch;
                $body
            }
            Refactoring::ExtractVariable => {
                type $strategy = ExtractVariable;
                $body
            }
            Refactoring::ExtractGenericType => {
                type $strategy = ExtractGenericType;
                $body
            }
            Refactoring::FlipTernary => {
                type $strategy = FlipTernary;
                $body
            }
        }
    };
}

impl Refactoring {
    pub const ALL: [Refactoring; 5] = [
        Refactoring::AddBracesToIfStatement,
        Refactoring::ConvertIfElseToSwitch,
        Refactoring::ExtractVariable,
        Refactoring::ExtractGenericType,
        Refactoring::FlipTernary,
    ];

    pub fn key(self) -> &'static str {
        dispatch!(self, S => S::KEY)
    }

    pub fn title(self) -> &'static str {
        dispatch!(self, S => S::TITLE)
    }

    pub fn action_message(self) -> &'static str {
        dispatch!(self, S => S::ACTION_MESSAGE)
    }

    pub fn is_preferred(self) -> bool {
        dispatch!(self, S => S::IS_PREFERRED)
    }

    pub fn error_reason(self) -> ErrorReason {
        dispatch!(self, S => S::ERROR_REASON)
    }

    pub fn can_perform(self, tree: &SyntaxTree<'_>, selection: &Selection) -> bool {
        dispatch!(self, S => S::can_perform(tree, selection))
    }

    pub fn transform(
        self,
        tree: &SyntaxTree<'_>,
        selection: &Selection,
        options: &RefactoringOptions,
    ) -> TransformResult {
        dispatch!(self, S => S::transform(tree, selection, options))
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|refactoring| refactoring.key() == key)
    }
}

impl fmt::Display for Refactoring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Refactoring {
    type Err = MillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s).ok_or_else(|| {
            MillError::not_supported(format!("Unknown refactoring '{}'", s))
        })
    }
}

#[cfg(test)]
pub(crate) mod test_helpers {
    use super::*;
    use crate::tree::SourceFile;

    pub fn run(refactoring: Refactoring, code: &str, selection: Selection) -> TransformResult {
        let file = SourceFile::parse(code, &ParseOptions::default()).unwrap();
        let tree = file.tree();
        refactoring.transform(&tree, &selection, &RefactoringOptions::default())
    }

    /// New document text, or the reason nothing happened
    pub fn rewrite(
        refactoring: Refactoring,
        code: &str,
        selection: Selection,
    ) -> Result<String, ErrorReason> {
        match run(refactoring, code, selection) {
            Ok(Transformation::Document { code, .. }) => Ok(code),
            Ok(other) => panic!("expected a document, got {:?}", other),
            Err(failure) => Err(failure.reason().expect("unexpected fault")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_whitespace_runs() {
        let code = "if (a)\n  b();";
        assert_eq!(whitespace_start(code, 9), 6);
        assert_eq!(whitespace_end(code, 6), 9);
        assert_eq!(whitespace_end(code, code.len()), code.len());
    }

    #[test]
    fn test_keys_round_trip() {
        for refactoring in Refactoring::ALL {
            assert_eq!(refactoring.key().parse::<Refactoring>().unwrap(), refactoring);
        }
        assert!("inlineEverything".parse::<Refactoring>().is_err());
    }

    #[test]
    fn test_serde_name_is_the_key() {
        for refactoring in Refactoring::ALL {
            let json = serde_json::to_string(&refactoring).unwrap();
            assert_eq!(json, format!("\"{}\"", refactoring.key()));
        }
    }

    #[test]
    fn test_metadata_is_distinct() {
        let titles: HashSet<_> = Refactoring::ALL.iter().map(|r| r.title()).collect();
        let reasons: HashSet<_> = Refactoring::ALL.iter().map(|r| r.error_reason()).collect();
        assert_eq!(titles.len(), Refactoring::ALL.len());
        assert_eq!(reasons.len(), Refactoring::ALL.len());
    }

    #[test]
    fn test_options_follow_config() {
        let mut config = AppConfig::default();
        config.refactoring.extracted_variable_name = "value".to_string();
        config.parser.tsx = true;

        let options = RefactoringOptions::from(&config);

        assert_eq!(options.extracted_variable_name, "value");
        assert!(options.parse.tsx);
        assert_eq!(options.indent_unit("a();"), "  ");
    }
}
