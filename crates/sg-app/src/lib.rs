//! stitchgrid application: CLI parsing, configuration merge and the
//! load → build → export pipeline.

pub mod cli;
pub mod pipeline;
