//! examples of usage of RustedTermCollector
/// Like term collection examples
pub mod collect_examples;
