//! Transform pipeline infrastructure
//!
//! Parsing runs as three stages, each a [`Runnable`]:
//!
//! ```text
//! String ──DirectivePrepass──▶ Prepass ──HeadingStateMachine──▶ Document ──TodoPostPass──▶ Document
//! ```
//!
//! Stages are chained with [`Transform::then`], which only compiles when the output type of
//! one stage is the input type of the next. The standard pipeline is pre-built as the static
//! [`STRING_TO_DOCUMENT`]; [`OrgParser`](crate::org::parsing::OrgParser) builds its own when
//! the keyword seeds come from configuration.
//!
//! ```rust,ignore
//! let pipeline = Transform::from_fn(Ok)
//!     .then(DirectivePrepass::new(KeywordSet::new()))
//!     .then(HeadingStateMachine)
//!     .then(TodoPostPass);
//! let document = pipeline.run(source.to_string())?;
//! ```

use crate::org::ast::KeywordSet;
use crate::org::error::ParseError;
use crate::org::lexing::{run_prepass, Prepass};
use crate::org::parsing::engine::build_nodes;
use crate::org::parsing::keywords::apply_todo_and_priority;
use crate::org::parsing::Document;
use once_cell::sync::Lazy;

/// Trait for anything that can transform an input to an output
pub trait Runnable<I, O> {
    /// Execute this transformation on the input
    fn run(&self, input: I) -> Result<O, ParseError>;
}

/// A composable transformation pipeline from `I` to `O`
pub struct Transform<I, O> {
    run_fn: Box<dyn Fn(I) -> Result<O, ParseError> + Send + Sync>,
}

impl<I, O> Transform<I, O> {
    /// Create a transform from a function
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(I) -> Result<O, ParseError> + Send + Sync + 'static,
    {
        Transform {
            run_fn: Box::new(f),
        }
    }

    /// Chain a stage after this transform, returning a transform with the stage's output type
    pub fn then<O2, S>(self, stage: S) -> Transform<I, O2>
    where
        S: Runnable<O, O2> + Send + Sync + 'static,
        I: 'static,
        O: 'static,
        O2: 'static,
    {
        let prev_run = self.run_fn;
        Transform {
            run_fn: Box::new(move |input| {
                let intermediate = prev_run(input)?;
                stage.run(intermediate)
            }),
        }
    }

    /// Execute this transform on the given input
    pub fn run(&self, input: I) -> Result<O, ParseError> {
        (self.run_fn)(input)
    }
}

impl<I, O> Runnable<I, O> for Transform<I, O>
where
    I: 'static,
    O: 'static,
{
    fn run(&self, input: I) -> Result<O, ParseError> {
        Transform::run(self, input)
    }
}

/// Stage 1: separate directives from content and collect TODO keywords
pub struct DirectivePrepass {
    seeds: KeywordSet,
}

impl DirectivePrepass {
    pub fn new(seeds: KeywordSet) -> Self {
        DirectivePrepass { seeds }
    }
}

impl Runnable<String, Prepass> for DirectivePrepass {
    fn run(&self, input: String) -> Result<Prepass, ParseError> {
        Ok(run_prepass(&input, self.seeds.clone()))
    }
}

/// Stage 2: build the node list from content lines
pub struct HeadingStateMachine;

impl Runnable<Prepass, Document> for HeadingStateMachine {
    fn run(&self, input: Prepass) -> Result<Document, ParseError> {
        let nodes = build_nodes(&input.lines)?;
        Ok(Document {
            nodes,
            keywords: input.keywords,
            declared_drawers: input.declared_drawers,
            unknown_directives: input.unknown_directives,
        })
    }
}

/// Stage 3: move TODO keywords and priorities out of headlines
pub struct TodoPostPass;

impl Runnable<Document, Document> for TodoPostPass {
    fn run(&self, mut input: Document) -> Result<Document, ParseError> {
        apply_todo_and_priority(&mut input.nodes, &input.keywords);
        Ok(input)
    }
}

/// Type alias for the full parse transform
pub type DocumentTransform = Transform<String, Document>;

/// Build the parse pipeline seeded with the given TODO keywords
pub fn document_pipeline(seeds: KeywordSet) -> DocumentTransform {
    Transform::from_fn(Ok)
        .then(DirectivePrepass::new(seeds))
        .then(HeadingStateMachine)
        .then(TodoPostPass)
}

/// String to document transform with the default `TODO`/`DONE` keywords
pub static STRING_TO_DOCUMENT: Lazy<DocumentTransform> =
    Lazy::new(|| document_pipeline(KeywordSet::new()));

#[cfg(test)]
mod tests {
    use super::*;

    struct DoubleNumber;
    impl Runnable<i32, i32> for DoubleNumber {
        fn run(&self, input: i32) -> Result<i32, ParseError> {
            Ok(input * 2)
        }
    }

    struct FailingStage;
    impl Runnable<i32, i32> for FailingStage {
        fn run(&self, input: i32) -> Result<i32, ParseError> {
            Err(ParseError::UnterminatedDrawer {
                name: "TEST".to_string(),
                line: input as usize,
            })
        }
    }

    #[test]
    fn test_stage_chaining() {
        let transform = Transform::from_fn(|x: i32| Ok(x))
            .then(DoubleNumber)
            .then(DoubleNumber);
        assert_eq!(transform.run(5).unwrap(), 20);
    }

    #[test]
    fn test_error_propagation() {
        let transform = Transform::from_fn(|x: i32| Ok(x))
            .then(DoubleNumber)
            .then(FailingStage)
            .then(DoubleNumber);
        assert_eq!(
            transform.run(3).unwrap_err(),
            ParseError::UnterminatedDrawer {
                name: "TEST".to_string(),
                line: 6
            }
        );
    }

    #[test]
    fn test_prepass_stage_alone() {
        let prepass = DirectivePrepass::new(KeywordSet::new())
            .run("#+SEQ_TODO: NEXT\n* NEXT thing\n".to_string())
            .unwrap();
        assert!(prepass.keywords.contains("NEXT"));
        assert_eq!(prepass.lines.len(), 1);
    }

    #[test]
    fn test_standard_pipeline() {
        let doc = STRING_TO_DOCUMENT
            .run("#+SEQ_TODO: NEXT\n* NEXT thing\n".to_string())
            .unwrap();
        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.nodes[0].todo(), Some("NEXT"));
        assert_eq!(doc.nodes[0].headline(), "thing");
    }
}
