use std::path::{Path, PathBuf};

use bml::{branch, BookRecord, OnError};

use clap::Subcommand;
use eyre::Context;
use log::{info, trace, warn};

use crate::{display, file};

#[derive(Subcommand)]
#[non_exhaustive]
pub enum Commands {
    /// List the codes and names of the library branches
    ListBranches,

    /// Display the catalog title and id of a book
    #[clap(arg_required_else_help = true)]
    IsbnInfo {
        /// The ISBN to search for
        isbn: String,
    },

    /// Resolve the availability at a branch of every book of a CSV file
    ///
    /// The file must have the columns ISBN, TITLE, BMID and AVAILABLE. TITLE and BMID may be left
    /// blank and are filled from the catalog; when both are set the catalog search is skipped.
    /// The resolved table is only written once every book has been resolved.
    #[clap(arg_required_else_help = true, alias = "availability-csv")]
    Availability {
        /// The CSV file listing the books
        #[clap(parse(from_os_str))]
        input: PathBuf,

        /// Where to write the resolved table, defaults to overwriting the input file
        #[clap(short, long, parse(from_os_str))]
        output: Option<PathBuf>,

        /// The code of the branch, see `list-branches`
        #[clap(short, long, default_value = branch::DEFAULT_BRANCH)]
        branch: String,

        /// Mark books that cannot be resolved as ERROR instead of stopping
        #[clap(short, long)]
        keep_going: bool,
    },
}

impl Commands {
    pub fn execute(self, quiet: bool) -> eyre::Result<()> {
        match self {
            Commands::ListBranches => {
                if !quiet {
                    for (code, name) in branch::branches() {
                        println!("- {code}:  \t{name}");
                    }
                }
                Ok(())
            }
            Commands::IsbnInfo { isbn } => {
                let (title, id) = bml::title_id_by_isbn(&isbn)
                    .wrap_err_with(|| format!("Cannot find the ISBN '{isbn}' in the catalog"))?;
                if !quiet {
                    println!("Title: {title}");
                    println!("BMID: {id}");
                }
                Ok(())
            }
            Commands::Availability {
                input,
                output,
                branch,
                keep_going,
            } => {
                let output = output_path(&input, output);

                if branch::branch_name(&branch).is_none() {
                    warn!("'{branch}' is not a known branch code - see the list-branches command");
                }

                let queries = file::read_queries(&input)?;
                trace!("{} book(s) to resolve at '{branch}'", queries.len());

                let on_error = if keep_going {
                    OnError::Record
                } else {
                    OnError::Abort
                };

                let records =
                    bml::availability_of_all(queries, &branch, on_error, |record: &BookRecord| {
                        if !quiet {
                            println!("{}", display::progress_line(record));
                        }
                    })
                    .wrap_err("Cannot resolve every book - no table was written")?;

                file::write_records(&output, &records)?;
                info!(
                    "{} book(s) written to '{}'",
                    records.len(),
                    output.display()
                );
                Ok(())
            }
        }
    }
}

/// The resolved table overwrites the input unless another path is given.
fn output_path(input: &Path, output: Option<PathBuf>) -> PathBuf {
    output.unwrap_or_else(|| input.to_path_buf())
}
