extern crate pest;
#[macro_use]
extern crate pest_derive;

mod error;
mod matcher;
pub mod entry;
pub mod parser;
pub mod query;
pub mod store;
pub mod table;
pub mod tiles;

pub use entry::{Entry, Provenance};
pub use error::{Error, Result};
pub use query::{Classified, Diagnostic, Query};
pub use store::{load_wordlist, Loader};
pub use table::{Column, Lexicon};
pub use tiles::Tile;

#[cfg(feature = "serialize")]
pub use store::{load_csv, save_csv};
