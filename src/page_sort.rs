//! Page sort pipeline
//!
//! Reads one or more JSON pages of view records, hands each page to the sort
//! dispatcher and writes the reordered pages back out. Pages are independent,
//! so several input files are processed in parallel on a rayon pool.

use crate::config::{EntityKind, SortConfig};
use crate::dispatch::SortPlan;
use crate::error::{SortContext, SortError, SortResult};
use crate::field::{Resolution, ViewRecord};
use crate::record::{CategoryView, InventoryView, OrderView, ProductView, UserSummaryView};
use rayon::prelude::*;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use tracing::{debug, info, warn};

/// Hard cap on bytes read for a single page
const MAX_PAGE_BYTES: u64 = 64 * 1024 * 1024;

/// Raw page input with the name used in diagnostics
#[derive(Debug, Clone)]
pub struct PageSource {
    pub name: String,
    pub contents: String,
}

impl PageSource {
    pub fn new(name: &str, contents: &str) -> Self {
        Self {
            name: name.to_string(),
            contents: contents.to_string(),
        }
    }
}

/// Page sort driver
pub struct PageSort {
    config: SortConfig,
}

impl PageSort {
    pub fn new(config: SortConfig) -> Self {
        Self { config }
    }

    /// Read, sort (or check) and write every configured page
    pub fn run(&self) -> SortResult<()> {
        self.config.validate()?;
        let sources = self.read_sources()?;
        debug!(
            entity = %self.config.entity,
            pages = sources.len(),
            "read input pages"
        );

        match self.config.entity {
            EntityKind::Products => self.run_entity::<ProductView>(&sources),
            EntityKind::Orders => self.run_entity::<OrderView>(&sources),
            EntityKind::Categories => self.run_entity::<CategoryView>(&sources),
            EntityKind::Inventory => self.run_entity::<InventoryView>(&sources),
            EntityKind::Users => self.run_entity::<UserSummaryView>(&sources),
        }
    }

    fn run_entity<T>(&self, sources: &[PageSource]) -> SortResult<()>
    where
        T: ViewRecord + Serialize + DeserializeOwned + Send + Sync,
    {
        let pages = self.process_sources::<T>(sources)?;

        if self.config.check {
            info!(pages = pages.len(), "all pages are in order");
            return Ok(());
        }

        self.write_output(&pages)
    }

    /// Decode and sort every source, in input order
    pub fn process_sources<T>(&self, sources: &[PageSource]) -> SortResult<Vec<Vec<T>>>
    where
        T: ViewRecord + DeserializeOwned + Send + Sync,
    {
        let plan = self.plan::<T>();

        if sources.len() <= 1 {
            return sources
                .iter()
                .map(|source| self.process_page(source, plan.as_ref()))
                .collect();
        }

        let threads = self.config.effective_thread_count().min(sources.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| SortError::thread_pool_error(&e.to_string()))?;

        pool.install(|| {
            sources
                .par_iter()
                .map(|source| self.process_page(source, plan.as_ref()))
                .collect()
        })
    }

    /// Resolve the configured tokens once for the whole run.
    ///
    /// `None` means pages pass through untouched, either because no field was
    /// requested or because a token did not resolve.
    fn plan<T: ViewRecord>(&self) -> Option<SortPlan<T>> {
        let field = self.config.sort_by.as_deref()?;
        let algorithm = self.config.effective_algorithm();

        match SortPlan::<T>::resolve(field, algorithm, self.config.sort_order()) {
            Resolution::Resolved(plan) => Some(plan),
            Resolution::Unresolved => {
                warn!(
                    entity = %T::KIND,
                    field,
                    algorithm,
                    "unrecognized sort field or algorithm, leaving pages unchanged"
                );
                None
            }
        }
    }

    fn process_page<T>(&self, source: &PageSource, plan: Option<&SortPlan<T>>) -> SortResult<Vec<T>>
    where
        T: ViewRecord + DeserializeOwned,
    {
        let mut records: Vec<T> = serde_json::from_str(&source.contents)
            .map_err(|e| SortError::invalid_page(&source.name, &e))?;

        if records.len() > self.config.max_page_size {
            return Err(SortError::page_too_large(
                records.len(),
                self.config.max_page_size,
            ));
        }

        let Some(plan) = plan else {
            return Ok(records);
        };

        if self.config.check {
            if let Some(index) = plan.first_out_of_order(&records) {
                return Err(SortError::not_sorted(&source.name, index));
            }
            return Ok(records);
        }

        plan.execute(&mut records);
        Ok(records)
    }

    fn read_sources(&self) -> SortResult<Vec<PageSource>> {
        if self.config.reading_from_stdin() {
            let contents = read_bounded(io::stdin().lock(), "-", MAX_PAGE_BYTES)?;
            return Ok(vec![PageSource {
                name: "-".to_string(),
                contents,
            }]);
        }

        self.config
            .input_files
            .iter()
            .map(|path| {
                let contents = fs::read_to_string(path).with_file_context(path)?;
                Ok(PageSource {
                    name: path.clone(),
                    contents,
                })
            })
            .collect()
    }

    /// Write sorted pages. A single page is written as one JSON array; several
    /// pages are written one compact array per line, in input order.
    fn write_output<T: Serialize>(&self, pages: &[Vec<T>]) -> SortResult<()> {
        let mut output: Box<dyn Write> = match &self.config.output_file {
            Some(output_file) => Box::new(BufWriter::new(
                File::create(output_file).with_file_context(output_file)?,
            )),
            None => Box::new(BufWriter::new(io::stdout())),
        };

        match pages {
            [page] if self.config.pretty => {
                serde_json::to_writer_pretty(&mut output, page).map_err(io::Error::from)?
            }
            _ => {
                for page in pages {
                    serde_json::to_writer(&mut output, page).map_err(io::Error::from)?;
                    output.write_all(b"\n")?;
                }
            }
        }
        if self.config.pretty && pages.len() == 1 {
            output.write_all(b"\n")?;
        }

        output.flush()?;
        Ok(())
    }
}

/// Read at most `limit` bytes; anything beyond that is an error, not a truncation.
fn read_bounded<R: Read>(reader: R, source_name: &str, limit: u64) -> SortResult<String> {
    let mut bytes = Vec::new();
    reader.take(limit.saturating_add(1)).read_to_end(&mut bytes)?;

    if bytes.len() as u64 > limit {
        return Err(SortError::input_too_large(source_name, limit));
    }
    String::from_utf8(bytes).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}
