//! Subcommand handlers.

pub mod fault;
pub mod list;
pub mod random;
pub mod run;

pub use fault::{run_fault, FaultArgs};
pub use list::{run_list, ListArgs, ListFormat};
pub use random::{run_random, RandomArgs};
pub use run::{run_pipeline, RunArgs};

use crate::config::parse_dims;
use crate::BufferOpts;
use numeric_buffer::NumericBuffer;

/// Read the input described by `opts`.
pub(crate) fn read_input(opts: &BufferOpts) -> anyhow::Result<NumericBuffer> {
    let dims = opts.dims.as_deref().map(parse_dims).transpose()?;
    crate::io::read_buffer(&opts.input, opts.dtype, dims)
}

/// Log how far `output` drifted from `input` when the two are comparable.
pub(crate) fn report_difference(input: &NumericBuffer, output: &NumericBuffer) {
    match output.max_abs_difference(input) {
        Some(diff) => tracing::info!(max_abs_difference = diff, "injection complete"),
        None => tracing::info!(
            input_bytes = input.size_in_bytes(),
            output_bytes = output.size_in_bytes(),
            output_type = %output.element_type(),
            "injection complete"
        ),
    }
}
