//! Reading and writing SED-ML documents.
//!
//! Reading never fails: problems with the file or its content end up in the
//! [`SedErrorLog`](crate::errorlog::SedErrorLog) of the returned document.
//! Writing returns a [`SedIoError`](crate::error::SedIoError) when the output
//! cannot be produced.

pub mod reader;
pub mod writer;

pub use reader::{read_sedml_from_file, read_sedml_from_string, SedReader};
pub use writer::{
    write_sedml_to_file, write_sedml_to_string, SedWriter, WriterOptions, WriterOptionsBuilder,
};
