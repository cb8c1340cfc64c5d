//! # entity-manifest
//!
//! A build-time scanner that walks a Java source tree, collects the classes
//! annotated `@Entity`, and repackages a jar so its manifest carries them as
//! a `Hibernate-Contribution` header.
//!
//! ## Architecture
//!
//! - **locate**: source file discovery under ordered roots with include/exclude globs
//! - **extract**: per-file package and class-annotation extraction using tree-sitter AST parsing
//! - **classify**: entity decision and fully qualified name construction
//! - **directive**: manifest directive synthesis (`default; classes="..."`)
//! - **manifest**: MANIFEST.MF merging with the directive header
//! - **repackage**: forced jar rebuild embedding the merged manifest
//! - **pipeline**: sequential orchestration and run reports
//! - **config**: resolution of CLI values into plain pipeline inputs

pub mod classify;
pub mod cli;
pub mod config;
pub mod directive;
pub mod error;
pub mod extract;
pub mod locate;
pub mod manifest;
pub mod pipeline;
pub mod repackage;
